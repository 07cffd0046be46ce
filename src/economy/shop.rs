use bevy::prelude::*;

use crate::data::{item_def, shop_stock};
use crate::shared::*;

/// Saturday, when the market discount applies.
pub const MARKET_WEEKDAY: usize = 5;
const MARKET_DISCOUNT: f32 = 0.9;

// ─────────────────────────────────────────────────────────────────────────────
// Pricing
// ─────────────────────────────────────────────────────────────────────────────

/// Shop price of `item`: drifted and rounded, then discounted (truncating)
/// on market day. Never below 1g.
pub fn shop_price(item: ItemId, drift: &PriceDrift, market_day: bool) -> u32 {
    let def = item_def(item);
    let mut price = drift.price(def.buy_price, def.category);
    if market_day {
        price = (price as f32 * MARKET_DISCOUNT) as u32;
    }
    price.max(1)
}

pub fn is_market_day(calendar: &Calendar, progression: &Progression) -> bool {
    progression.has(Flag::MarketUnlocked) && calendar.weekday.index() == MARKET_WEEKDAY
}

/// Spends `price` gold for one `item`.
pub fn buy(
    item: ItemId,
    price: u32,
    player: &mut PlayerState,
    inventory: &mut Inventory,
) -> Result<(), ActionRejected> {
    if player.gold < price {
        return Err(ActionRejected::NotEnoughGold);
    }
    player.gold -= price;
    inventory.add(item, 1);
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Shop panel
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct ShopListing {
    pub item: ItemId,
    pub name: &'static str,
    pub price: u32,
}

/// Today's listings, priced when the shop opens.
#[derive(Resource, Debug, Clone, Default)]
pub struct ShopPanel {
    pub listings: Vec<ShopListing>,
    pub cursor: usize,
}

pub fn build_listings(
    calendar: &Calendar,
    drift: &PriceDrift,
    progression: &Progression,
) -> Vec<ShopListing> {
    let market_day = is_market_day(calendar, progression);
    shop_stock(calendar.weekday, progression.has(Flag::ShopPlus))
        .into_iter()
        .map(|item| ShopListing {
            item,
            name: item_def(item).name,
            price: shop_price(item, drift, market_day),
        })
        .collect()
}

pub fn open_shop_panel(
    calendar: Res<Calendar>,
    drift: Res<PriceDrift>,
    progression: Res<Progression>,
    mut panel: ResMut<ShopPanel>,
) {
    panel.listings = build_listings(&calendar, &drift, &progression);
    panel.cursor = 0;
    info!(
        "[Economy] Shop open on {} with {} listings",
        calendar.weekday.short(),
        panel.listings.len()
    );
}

pub fn shop_panel_input(
    input: Res<PlayerInput>,
    mut panel: ResMut<ShopPanel>,
    mut player: ResMut<PlayerState>,
    mut inventory: ResMut<Inventory>,
    mut toasts: EventWriter<ToastEvent>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if input.ui_cancel || input.interact {
        next_state.set(GameState::Playing);
        return;
    }
    if input.ui_left {
        panel.cursor = wrap_index(panel.cursor, panel.listings.len(), -1);
    }
    if input.ui_right {
        panel.cursor = wrap_index(panel.cursor, panel.listings.len(), 1);
    }
    if !input.ui_confirm {
        return;
    }
    let Some(listing) = panel.listings.get(panel.cursor).cloned() else {
        return;
    };
    match buy(listing.item, listing.price, &mut player, &mut inventory) {
        Ok(()) => {
            info!("[Economy] Bought {} for {}g", listing.name, listing.price);
            toasts.send(ToastEvent::new("Purchased"));
        }
        Err(err) => {
            toasts.send(ToastEvent::new(err.to_string()));
        }
    }
}
