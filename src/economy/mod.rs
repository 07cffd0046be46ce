//! Economy domain: price drift, the shipping bin and the general store.
//!
//! Settlement of the shipping queue happens inside the daily tick
//! (`crate::day_end`); this plugin only owns the two modal panels.

use bevy::prelude::*;

use crate::shared::*;

pub mod drift;
pub mod shipping;
pub mod shop;

pub use shipping::{Settlement, ShippingPanel};
pub use shop::{shop_price, ShopPanel};

pub struct EconomyPlugin;

impl Plugin for EconomyPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ShopPanel>()
            .init_resource::<ShippingPanel>();

        // ── Shop state ─────────────────────────────────────────────────────
        app.add_systems(OnEnter(GameState::Shop), shop::open_shop_panel)
            .add_systems(
                Update,
                shop::shop_panel_input.run_if(in_state(GameState::Shop)),
            );

        // ── Shipping state ─────────────────────────────────────────────────
        app.add_systems(OnEnter(GameState::Shipping), shipping::open_shipping_panel)
            .add_systems(
                Update,
                shipping::shipping_panel_input.run_if(in_state(GameState::Shipping)),
            );

        info!("[Economy] EconomyPlugin registered.");
    }
}
