//! Player domain: movement, hotbar, tool/item use and context interaction.

pub mod hotbar;
pub mod interact_dispatch;
pub mod interaction;
pub mod movement;
pub mod skills;

use bevy::prelude::*;

use crate::shared::*;

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ActionCooldown>()
            .init_resource::<AimMode>()
            .add_systems(
                Update,
                (
                    hotbar::select_hotbar_slot,
                    movement::toggle_aim,
                    movement::player_movement,
                    interaction::tick_action_cooldown,
                    interaction::use_selected_system,
                    interact_dispatch::dispatch_interaction,
                )
                    .chain()
                    .run_if(in_state(GameState::Playing)),
            );
    }
}

/// Seconds until the next tool or item use is accepted.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct ActionCooldown {
    pub remaining: f32,
}

impl ActionCooldown {
    pub fn ready(&self) -> Result<(), ActionRejected> {
        if self.remaining > 0.0 {
            Err(ActionRejected::Cooldown)
        } else {
            Ok(())
        }
    }
}
