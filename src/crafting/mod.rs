use bevy::prelude::*;
use crate::shared::*;

pub mod bench;

pub use bench::{craft, CraftingLine, CraftingPanel};

pub struct CraftingPlugin;

impl Plugin for CraftingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CraftingPanel>()
            .add_systems(
                Update,
                bench::handle_open_crafting.run_if(in_state(GameState::Playing)),
            )
            .add_systems(OnEnter(GameState::Crafting), bench::open_crafting_panel)
            .add_systems(
                Update,
                bench::crafting_panel_input.run_if(in_state(GameState::Crafting)),
            );
    }
}
