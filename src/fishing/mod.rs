use bevy::prelude::*;

use crate::shared::*;

// ─── Sub-modules ────────────────────────────────────────────────────────────
pub mod minigame;

pub use minigame::{catch_tolerance, FishingMinigame, FishingResult};

// ─── Plugin ─────────────────────────────────────────────────────────────────

pub struct FishingPlugin;

impl Plugin for FishingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FishingMinigame>()
            .add_systems(OnEnter(GameState::Fishing), start_minigame)
            .add_systems(
                Update,
                run_minigame.run_if(in_state(GameState::Fishing)),
            );
    }
}

// ─── Systems ────────────────────────────────────────────────────────────────

fn start_minigame(mut game: ResMut<FishingMinigame>, mut rng: ResMut<WorldRng>) {
    *game = FishingMinigame::start(&mut rng.0);
    info!("[Fishing] Line cast, fish at {:.2}", game.fish);
}

#[allow(clippy::too_many_arguments)]
fn run_minigame(
    time: Res<Time>,
    input: Res<PlayerInput>,
    config: Res<GameConfig>,
    progression: Res<Progression>,
    mut game: ResMut<FishingMinigame>,
    mut rng: ResMut<WorldRng>,
    mut skills: ResMut<Skills>,
    mut next_state: ResMut<NextState<GameState>>,
    mut toasts: EventWriter<ToastEvent>,
) {
    game.update(time.delta_secs(), &mut rng.0, &config);

    let tolerance = catch_tolerance(&config, &progression);
    let Some(result) = minigame::resolve(&game, &input, tolerance, config.fishing_duration) else {
        return;
    };

    if result == FishingResult::Caught {
        skills.add_xp(SkillKind::Fishing, config.fishing_reward_xp);
    }
    info!("[Fishing] {:?} after {:.1}s", result, game.elapsed);
    toasts.send(ToastEvent::new(result.notice()));
    next_state.set(GameState::Playing);
}
