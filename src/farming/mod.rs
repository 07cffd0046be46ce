//! Farming domain: soil tilling, watering, planting, crop growth, harvest,
//! placed structures and the sprinkler sweep.
//!
//! Tile rules live as methods on `FarmGrid` so the interaction resolver and
//! the daily tick can call them directly. The plugin only sizes the grid
//! from configuration and logs harvests.

use bevy::prelude::*;
use crate::shared::*;

pub mod crops;
pub mod harvest;
pub mod soil;
pub mod sprinklers;

pub use crops::{advance_crops, GrowthSummary};
pub use harvest::{harvest_crop, quality_from_roll, Harvest};
pub use sprinklers::sprinkler_footprint;

pub struct FarmingPlugin;

impl Plugin for FarmingPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<CropHarvestedEvent>()
            .add_systems(Startup, size_farm_to_config)
            .add_systems(Update, log_harvests);
    }
}

/// A fresh session's farm must match the configured grid. Saved farms are
/// validated on load instead.
fn size_farm_to_config(config: Res<GameConfig>, mut farm: ResMut<FarmGrid>) {
    if farm.cols != config.cols || farm.rows != config.rows {
        *farm = FarmGrid::new(config.cols, config.rows);
        info!("[Farming] Farm grid sized to {}x{}", config.cols, config.rows);
    }
}

fn log_harvests(mut events: EventReader<CropHarvestedEvent>) {
    for ev in events.read() {
        info!("[Farming] Harvested {:?} at {}", ev.item, ev.tile);
    }
}
