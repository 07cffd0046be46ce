//! World domain: the scene graph.
//!
//! Responsible for:
//! - Scene sizes (six outdoor scenes of one grid each, plus the house)
//! - Edge crossings between outdoor scenes and the locked north edge
//! - The farmhouse door and the interior exit
//!
//! Everything here is a pure function of the player's position; the player
//! domain applies the results and sends `SceneChangeEvent`.

use bevy::prelude::*;

use crate::shared::*;

/// Players are kept this far inside the scene; walking outward past it
/// crosses the edge.
pub const EDGE_MARGIN: f32 = 16.0;
/// Arrival distance from the edge in the destination scene.
pub const ENTRY_INSET: f32 = 20.0;
/// Where the broken bridge stops the player.
pub const LOCKED_NORTH_Y: f32 = 12.0;
/// The bed inside the house interior.
pub const HOUSE_BED: TileCoord = TileCoord::new(2, 1);

pub const BLOCKED_NORTH_NOTICE: &str = "A broken bridge blocks the way north.";

pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<SceneChangeEvent>()
            .add_systems(PostUpdate, announce_scene_changes);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// SCENE GEOMETRY
// ═══════════════════════════════════════════════════════════════════════

/// Pixel size of `scene`. The house interior is the farmhouse footprint.
pub fn scene_size(scene: Scene, config: &GameConfig, landmarks: &Landmarks) -> Vec2 {
    match scene {
        Scene::House => Vec2::new(
            landmarks.house_size.0 as f32 * config.tile_px,
            landmarks.house_size.1 as f32 * config.tile_px,
        ),
        _ => Vec2::new(config.scene_width(), config.scene_height()),
    }
}

/// Tile grid dimensions of `scene`.
pub fn scene_tiles(scene: Scene, config: &GameConfig, landmarks: &Landmarks) -> (i32, i32) {
    match scene {
        Scene::House => landmarks.house_size,
        _ => (config.cols, config.rows),
    }
}

pub fn clamp_to_scene(pos: Vec2, size: Vec2) -> Vec2 {
    Vec2::new(
        pos.x.clamp(EDGE_MARGIN, size.x - EDGE_MARGIN),
        pos.y.clamp(EDGE_MARGIN, size.y - EDGE_MARGIN),
    )
}

// ═══════════════════════════════════════════════════════════════════════
// EDGES
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    North,
    South,
    East,
    West,
}

/// Destination across `edge`, if that edge leads anywhere.
pub fn edge_link(scene: Scene, edge: Edge) -> Option<Scene> {
    use Edge::*;
    match (scene, edge) {
        (Scene::Farm, East) => Some(Scene::Town),
        (Scene::Farm, West) => Some(Scene::Forest),
        (Scene::Farm, North) => Some(Scene::Mountain),
        (Scene::Farm, South) => Some(Scene::Beach),
        (Scene::Town, West) => Some(Scene::Farm),
        (Scene::Forest, East) => Some(Scene::Farm),
        (Scene::Mountain, South) => Some(Scene::Farm),
        (Scene::Mountain, North) => Some(Scene::Mine),
        (Scene::Mine, South) => Some(Scene::Mountain),
        (Scene::Beach, North) => Some(Scene::Farm),
        _ => None,
    }
}

/// Fixed arrival point after crossing `edge` into a `size`-px scene.
pub fn entry_point(edge: Edge, size: Vec2) -> Vec2 {
    match edge {
        Edge::East => Vec2::new(ENTRY_INSET, size.y / 2.0),
        Edge::West => Vec2::new(size.x - ENTRY_INSET, size.y / 2.0),
        Edge::North => Vec2::new(size.x / 2.0, size.y - ENTRY_INSET),
        Edge::South => Vec2::new(size.x / 2.0, ENTRY_INSET),
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EdgeOutcome {
    /// No crossing; the position is clamped inside the scene.
    Stay(Vec2),
    Cross { to: Scene, entry: Vec2 },
    /// The north farm edge while the bridge is out.
    Blocked(Vec2),
}

/// The edge `pos` has been pushed past while moving by `delta`. Only the
/// outward component counts, so sliding along a wall never crosses it.
fn crossed_edge(pos: Vec2, delta: Vec2, size: Vec2) -> Option<Edge> {
    if delta.x > 0.0 && pos.x > size.x - EDGE_MARGIN {
        Some(Edge::East)
    } else if delta.x < 0.0 && pos.x < EDGE_MARGIN {
        Some(Edge::West)
    } else if delta.y < 0.0 && pos.y < EDGE_MARGIN {
        Some(Edge::North)
    } else if delta.y > 0.0 && pos.y > size.y - EDGE_MARGIN {
        Some(Edge::South)
    } else {
        None
    }
}

/// Resolves a freshly moved, not yet clamped position. `delta` is the move
/// that produced it. Clamping happens only when no edge link resolves.
pub fn resolve_edges(
    scene: Scene,
    pos: Vec2,
    delta: Vec2,
    size: Vec2,
    mountain_access: bool,
) -> EdgeOutcome {
    let Some(edge) = crossed_edge(pos, delta, size) else {
        return EdgeOutcome::Stay(clamp_to_scene(pos, size));
    };
    match edge_link(scene, edge) {
        Some(Scene::Mountain) if scene == Scene::Farm && !mountain_access => {
            let held = clamp_to_scene(pos, size);
            EdgeOutcome::Blocked(Vec2::new(held.x, LOCKED_NORTH_Y))
        }
        Some(to) => EdgeOutcome::Cross {
            to,
            entry: entry_point(edge, size),
        },
        None => EdgeOutcome::Stay(clamp_to_scene(pos, size)),
    }
}

// ═══════════════════════════════════════════════════════════════════════
// DOORS
// ═══════════════════════════════════════════════════════════════════════

/// Interior tile that leads back outside.
pub fn house_exit_tile(landmarks: &Landmarks) -> TileCoord {
    let (w, h) = landmarks.house_size;
    TileCoord::new(w / 2, h - 1)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DoorLink {
    pub to: Scene,
    pub arrive: Vec2,
}

/// The door at `tile` in `scene`, if there is one.
pub fn door_at(scene: Scene, tile: TileCoord, landmarks: &Landmarks, tile_px: f32) -> Option<DoorLink> {
    match scene {
        Scene::Farm if tile == landmarks.house_door => {
            // Just inside, one row above the exit.
            let exit = house_exit_tile(landmarks);
            Some(DoorLink {
                to: Scene::House,
                arrive: exit.offset(0, -1).center_px(tile_px),
            })
        }
        Scene::House if tile == house_exit_tile(landmarks) => Some(DoorLink {
            to: Scene::Farm,
            arrive: landmarks.house_door.offset(0, 1).center_px(tile_px),
        }),
        _ => None,
    }
}

/// Moves the player into `to` at `arrive`.
pub fn enter_scene(player: &mut PlayerState, to: Scene, arrive: Vec2) -> SceneChangeEvent {
    let from = player.scene;
    player.scene = to;
    player.position = arrive;
    SceneChangeEvent { from, to }
}

fn announce_scene_changes(
    mut events: EventReader<SceneChangeEvent>,
    mut toasts: EventWriter<ToastEvent>,
) {
    for ev in events.read() {
        info!("[World] {} -> {}", ev.from.label(), ev.to.label());
        match (ev.from, ev.to) {
            (_, Scene::House) => {
                toasts.send(ToastEvent::new("Entered house"));
            }
            (Scene::House, _) => {
                toasts.send(ToastEvent::new("Left house"));
            }
            _ => {}
        }
    }
}
