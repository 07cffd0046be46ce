use bevy::prelude::*;

use crate::shared::*;
use crate::world::{self, EdgeOutcome};

/// Walking speed in px/s after the low-energy penalty.
pub fn walk_speed(config: &GameConfig, energy: u32) -> f32 {
    if energy < config.low_energy_threshold {
        config.walk_speed * config.low_energy_speed_factor
    } else {
        config.walk_speed
    }
}

/// Where a step lands. The house interior has no edges, only its exit
/// tile; outdoor scenes resolve their edge links.
pub fn step(
    player: &PlayerState,
    delta: Vec2,
    config: &GameConfig,
    landmarks: &Landmarks,
    mountain_access: bool,
) -> EdgeOutcome {
    let size = world::scene_size(player.scene, config, landmarks);
    let moved = player.position + delta;
    if player.scene == Scene::House {
        let pos = world::clamp_to_scene(moved, size);
        if TileCoord::from_pixels(pos, config.tile_px) == world::house_exit_tile(landmarks) {
            return EdgeOutcome::Cross {
                to: Scene::Farm,
                entry: landmarks.house_door.offset(0, 1).center_px(config.tile_px),
            };
        }
        return EdgeOutcome::Stay(pos);
    }
    world::resolve_edges(player.scene, moved, delta, size, mountain_access)
}

/// Applies the frame's move intent. Movement never costs energy.
#[allow(clippy::too_many_arguments)]
pub fn player_movement(
    time: Res<Time>,
    input: Res<PlayerInput>,
    config: Res<GameConfig>,
    farm: Res<FarmGrid>,
    progression: Res<Progression>,
    mut player: ResMut<PlayerState>,
    mut scene_events: EventWriter<SceneChangeEvent>,
    mut toasts: EventWriter<ToastEvent>,
    mut pressing_north: Local<bool>,
) {
    let Some(facing) = Facing::from_vector(input.move_axis) else {
        return;
    };
    player.facing = facing;

    let speed = walk_speed(&config, player.energy);
    let delta = input.move_axis.normalize_or_zero() * speed * time.delta_secs();
    let access = progression.has(Flag::MountainAccess);

    match step(&player, delta, &config, &farm.landmarks, access) {
        EdgeOutcome::Stay(pos) => {
            player.position = pos;
            *pressing_north = false;
        }
        EdgeOutcome::Cross { to, entry } => {
            scene_events.send(world::enter_scene(&mut player, to, entry));
            *pressing_north = false;
        }
        EdgeOutcome::Blocked(pos) => {
            player.position = pos;
            if !*pressing_north {
                toasts.send(ToastEvent::new(world::BLOCKED_NORTH_NOTICE));
                *pressing_north = true;
            }
        }
    }
}

pub fn toggle_aim(
    input: Res<PlayerInput>,
    mut aim: ResMut<AimMode>,
    mut toasts: EventWriter<ToastEvent>,
) {
    if !input.toggle_aim {
        return;
    }
    *aim = match *aim {
        AimMode::Front => AimMode::Pointer,
        AimMode::Pointer => AimMode::Front,
    };
    let label = match *aim {
        AimMode::Front => "Aim: Front",
        AimMode::Pointer => "Aim: Pointer",
    };
    toasts.send(ToastEvent::new(label));
}
