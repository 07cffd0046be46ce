//! NPC domain: the farm villager's wander and the dialogue mode.

use bevy::prelude::*;
use rand::Rng;

use crate::data::VILLAGERS;
use crate::shared::*;
use crate::world;

pub mod dialogue;

pub use dialogue::{repair_bridge, BRIDGE_STONE, BRIDGE_WOOD};

pub struct NpcPlugin;

impl Plugin for NpcPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ActiveDialogue>()
            .add_systems(Startup, spawn_villagers)
            .add_systems(
                Update,
                wander_villagers.run_if(in_state(GameState::Playing)),
            )
            .add_systems(
                Update,
                dialogue::dialogue_input.run_if(in_state(GameState::Dialogue)),
            );
    }
}

/// Random-walk state for a villager.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Wander {
    /// Seconds until the next direction pick.
    pub remaining: f32,
    /// Unit cardinal direction, or zero while standing still.
    pub heading: Vec2,
}

impl Default for Wander {
    fn default() -> Self {
        Self {
            remaining: 0.0,
            heading: Vec2::ZERO,
        }
    }
}

const HEADINGS: [Vec2; 5] = [
    Vec2::ZERO,
    Vec2::new(0.0, -1.0),
    Vec2::new(0.0, 1.0),
    Vec2::new(-1.0, 0.0),
    Vec2::new(1.0, 0.0),
];

impl Wander {
    /// Counts down and, when due, picks a new heading for the next 1-3 s.
    pub fn tick(&mut self, dt: f32, rng: &mut impl Rng) {
        self.remaining -= dt;
        if self.remaining <= 0.0 {
            self.remaining = rng.gen_range(1.0..=3.0);
            self.heading = HEADINGS[rng.gen_range(0..HEADINGS.len())];
        }
    }
}

/// Where a villager first appears: centre column, a few rows from the top.
pub fn spawn_point(config: &GameConfig) -> Vec2 {
    Vec2::new(
        (config.cols / 2) as f32 * config.tile_px,
        (config.rows / 2 - 8).max(1) as f32 * config.tile_px,
    )
}

fn spawn_villagers(mut commands: Commands, config: Res<GameConfig>) {
    for def in VILLAGERS.iter() {
        commands.spawn((
            Villager {
                name: def.name,
                scene: def.home,
                position: spawn_point(&config),
            },
            Wander::default(),
        ));
        info!("[Npcs] {} is out on the {}", def.name, def.home.label());
    }
}

/// Villagers only move while the player shares their scene.
fn wander_villagers(
    time: Res<Time>,
    config: Res<GameConfig>,
    player: Res<PlayerState>,
    farm: Res<FarmGrid>,
    mut rng: ResMut<WorldRng>,
    mut villagers: Query<(&mut Villager, &mut Wander)>,
) {
    let dt = time.delta_secs();
    for (mut villager, mut wander) in &mut villagers {
        if villager.scene != player.scene {
            continue;
        }
        wander.tick(dt, &mut rng.0);
        let size = world::scene_size(villager.scene, &config, &farm.landmarks);
        let moved = villager.position + wander.heading * config.npc_walk_speed * dt;
        villager.position = world::clamp_to_scene(moved, size);
    }
}
