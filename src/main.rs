//! Headless MeadowLite session.
//!
//! Loads `meadowlite.ron` (or the path given as the first argument), then
//! plays a short scripted morning through the same input events a
//! front-end would send, logging the resulting snapshot.

use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use std::path::PathBuf;

use meadowlite::config::DEFAULT_CONFIG_PATH;
use meadowlite::player::hotbar;
use meadowlite::shared::*;
use meadowlite::ui::snapshot::RenderSnapshot;
use meadowlite::MeadowlitePlugin;

/// One scripted step: the actions sent on a frame, then idle frames.
struct Step {
    actions: Vec<InputAction>,
    idle_frames: u32,
}

impl Step {
    fn new(actions: Vec<InputAction>) -> Self {
        Self {
            actions,
            idle_frames: 15,
        }
    }
}

fn main() {
    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin, LogPlugin::default()));
    let config = GameConfig::load_or_default(&config_path);
    app.add_plugins(MeadowlitePlugin::new(config));
    app.update();

    for step in morning_script(app.world()) {
        for action in step.actions {
            app.world_mut().send_event(action);
        }
        app.update();
        for _ in 0..step.idle_frames {
            app.update();
        }
        report(app.world());
    }
}

/// Till, water and seed a patch beside the spawn point, save, then walk
/// off west.
fn morning_script(world: &World) -> Vec<Step> {
    let player = world.resource::<PlayerState>();
    let config = world.resource::<GameConfig>();
    let inventory = world.resource::<Inventory>();
    let here = player.tile(config.tile_px);
    let patch = here.offset(2, 1);

    let seed_slot = hotbar::item_slots(inventory)
        .iter()
        .position(|&item| item == ItemId::ParsnipSeeds)
        .map_or(TOOL_SLOTS, |i| TOOL_SLOTS + i as u8);

    vec![
        Step::new(vec![InputAction::ToggleAim, InputAction::Pointer(Some(patch))]),
        Step::new(vec![InputAction::SelectSlot(0), InputAction::UseSelected]),
        Step::new(vec![InputAction::SelectSlot(1), InputAction::UseSelected]),
        Step::new(vec![InputAction::SelectSlot(seed_slot), InputAction::UseSelected]),
        Step::new(vec![InputAction::Save]),
        Step::new(vec![InputAction::Move(Vec2::new(-1.0, 0.0))]),
    ]
}

fn report(world: &World) {
    let snapshot = world.resource::<RenderSnapshot>();
    info!(
        "[Demo] {} {} {:?} in {} at {} | {}g, {} energy, {} crop(s)",
        snapshot.clock.label,
        snapshot.clock.season.label(),
        snapshot.mode,
        snapshot.scene.label(),
        snapshot.player.tile,
        snapshot.player.gold,
        snapshot.player.energy,
        snapshot.crops.len()
    );
    for toast in &snapshot.toasts {
        info!("[Demo]   » {}", toast);
    }
}
