//! MeadowLite library crate: the headless farming-sim core.
//!
//! The binary crate (`main.rs`) drives a scripted session. This library
//! exposes every domain so `tests/` can build an app without a window.

pub mod calendar;
pub mod config;
pub mod crafting;
pub mod data;
pub mod day_end;
pub mod economy;
pub mod farming;
pub mod fishing;
pub mod input;
pub mod npcs;
pub mod player;
pub mod quests;
pub mod save;
pub mod shared;
pub mod ui;
pub mod world;

use bevy::prelude::*;

use shared::*;

/// Registers the game state, every shared resource and every domain
/// plugin. The host supplies the schedule runner (`MinimalPlugins`) and
/// `StatesPlugin`.
pub struct MeadowlitePlugin {
    pub config: GameConfig,
}

impl MeadowlitePlugin {
    pub fn new(config: GameConfig) -> Self {
        Self { config }
    }
}

impl Default for MeadowlitePlugin {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

impl Plugin for MeadowlitePlugin {
    fn build(&self, app: &mut App) {
        let config = self.config.clone();
        info!(
            "[Core] Starting session: {}x{} grid, seed {}",
            config.cols, config.rows, config.seed
        );

        app.init_state::<GameState>()
            // Shared resources
            .insert_resource(Calendar::default())
            .insert_resource(FarmGrid::new(config.cols, config.rows))
            .insert_resource(PlayerState::spawn(&config))
            .insert_resource(Inventory::default())
            .insert_resource(Skills::default())
            .insert_resource(PriceDrift::default())
            .insert_resource(ShippingQueue::default())
            .insert_resource(QuestLog::default())
            .insert_resource(Progression::default())
            .insert_resource(WorldRng::seeded(config.seed))
            .insert_resource(config)
            // Domain plugins
            .add_plugins((
                input::InputPlugin,
                calendar::CalendarPlugin,
                world::WorldPlugin,
                player::PlayerPlugin,
                farming::FarmingPlugin,
                economy::EconomyPlugin,
                quests::QuestPlugin,
                day_end::DayEndPlugin,
                crafting::CraftingPlugin,
                fishing::FishingPlugin,
                npcs::NpcPlugin,
                ui::UiPlugin,
                save::SavePlugin,
            ));
    }
}
