pub mod snapshot;
pub mod toast;

use bevy::prelude::*;
use crate::shared::*;

pub use snapshot::RenderSnapshot;
pub use toast::Toasts;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Toasts>()
            .init_resource::<RenderSnapshot>()
            .add_event::<ToastEvent>();

        // ─── PAUSE ───
        app.add_systems(
            Update,
            toggle_pause.run_if(in_state(GameState::Playing).or(in_state(GameState::Paused))),
        );

        // ─── TOASTS & SNAPSHOT: after every domain has run ───
        app.add_systems(
            PostUpdate,
            (
                toast::expire_toasts,
                toast::handle_toast_events,
                snapshot::rebuild_snapshot,
            )
                .chain(),
        );
    }
}

fn toggle_pause(
    input: Res<PlayerInput>,
    state: Res<State<GameState>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if !input.pause {
        return;
    }
    match state.get() {
        GameState::Playing => next_state.set(GameState::Paused),
        GameState::Paused => next_state.set(GameState::Playing),
        _ => {}
    }
}
