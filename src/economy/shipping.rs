use bevy::prelude::*;

use crate::data::item_def;
use crate::shared::*;

// ─────────────────────────────────────────────────────────────────────────────
// Queue operations
// ─────────────────────────────────────────────────────────────────────────────

/// Result of selling the whole queue at the daily tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settlement {
    pub earnings: u32,
    pub count: u32,
    /// Units sold per item, in deposit order.
    pub items: Vec<(ItemId, u32)>,
}

impl ShippingQueue {
    pub fn total_items(&self) -> u32 {
        self.entries.iter().map(|(_, qty)| qty).sum()
    }

    /// Moves one unit of `item` from the inventory into the queue.
    pub fn deposit(&mut self, inventory: &mut Inventory, item: ItemId) -> Result<(), ActionRejected> {
        if item_def(item).sell_price == 0 {
            return Err(ActionRejected::WrongPlace);
        }
        if !inventory.try_remove(item, 1) {
            return Err(ActionRejected::MissingItems(item_def(item).name.to_string()));
        }
        match self.entries.iter_mut().find(|(id, _)| *id == item) {
            Some((_, qty)) => *qty += 1,
            None => self.entries.push((item, 1)),
        }
        Ok(())
    }

    /// Values every queued unit at today's drift and empties the queue.
    pub fn settle(&mut self, drift: &PriceDrift) -> Settlement {
        let mut settlement = Settlement::default();
        for (item, qty) in self.entries.drain(..) {
            settlement.earnings += drift.sell_value(item) * qty;
            settlement.count += qty;
            settlement.items.push((item, qty));
        }
        settlement
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Shipping bin panel
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct ShippingLine {
    pub item: ItemId,
    pub name: &'static str,
    pub held: u32,
    pub sell_price: u32,
}

/// What the open shipping bin shows: every sellable held item.
#[derive(Resource, Debug, Clone, Default)]
pub struct ShippingPanel {
    pub lines: Vec<ShippingLine>,
    pub cursor: usize,
    pub queued: u32,
}

impl ShippingPanel {
    pub fn refresh(&mut self, inventory: &Inventory, queue: &ShippingQueue) {
        self.lines = inventory
            .items
            .iter()
            .filter_map(|(&item, &held)| {
                let def = item_def(item);
                (def.sell_price > 0).then_some(ShippingLine {
                    item,
                    name: def.name,
                    held,
                    sell_price: def.sell_price,
                })
            })
            .collect();
        self.cursor = self.cursor.min(self.lines.len().saturating_sub(1));
        self.queued = queue.total_items();
    }

    pub fn selected(&self) -> Option<ItemId> {
        self.lines.get(self.cursor).map(|line| line.item)
    }
}

pub fn open_shipping_panel(
    inventory: Res<Inventory>,
    queue: Res<ShippingQueue>,
    mut panel: ResMut<ShippingPanel>,
) {
    panel.cursor = 0;
    panel.refresh(&inventory, &queue);
    info!("[Economy] Shipping bin opened, {} queued", panel.queued);
}

pub fn shipping_panel_input(
    input: Res<PlayerInput>,
    mut panel: ResMut<ShippingPanel>,
    mut inventory: ResMut<Inventory>,
    mut queue: ResMut<ShippingQueue>,
    mut toasts: EventWriter<ToastEvent>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if input.ui_cancel || input.interact {
        next_state.set(GameState::Playing);
        return;
    }
    if input.ui_left {
        panel.cursor = wrap_index(panel.cursor, panel.lines.len(), -1);
    }
    if input.ui_right {
        panel.cursor = wrap_index(panel.cursor, panel.lines.len(), 1);
    }
    if input.ui_confirm {
        let Some(item) = panel.selected() else {
            return;
        };
        match queue.deposit(&mut inventory, item) {
            Ok(()) => info!("[Economy] Queued 1 × {:?} for shipping", item),
            Err(err) if !err.is_silent() => {
                toasts.send(ToastEvent::new(err.to_string()));
            }
            Err(_) => {}
        }
        panel.refresh(&inventory, &queue);
    }
}
