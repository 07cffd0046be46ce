//! Read-only view of the session for whatever draws it.
//!
//! Rebuilt once per frame in `PostUpdate`, after every domain has run, so
//! a renderer never reads half-updated state.

use bevy::prelude::*;

use crate::crafting::CraftingPanel;
use crate::economy::{ShippingPanel, ShopPanel};
use crate::fishing::FishingMinigame;
use crate::player::hotbar::{self, HotbarEntry};
use crate::player::interaction::{in_reach, target_tile};
use crate::shared::*;

use super::toast::Toasts;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClockView {
    pub day: u32,
    pub season: Season,
    pub weekday: DayOfWeek,
    pub label: String,
    pub weather: Weather,
    pub forecast: Weather,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerView {
    pub position: Vec2,
    pub facing: Facing,
    pub tile: TileCoord,
    pub gold: u32,
    pub energy: u32,
    pub hp: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetView {
    pub tile: TileCoord,
    pub in_reach: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CropView {
    pub tile: TileCoord,
    pub kind: CropKind,
    pub stage: u8,
    pub progress: f32,
    pub watered: bool,
    pub diseased: bool,
    pub mature: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NpcView {
    pub name: &'static str,
    pub position: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FishingGauge {
    pub cursor: f32,
    pub fish: f32,
    pub remaining: f32,
}

#[derive(Debug, Clone)]
pub enum PanelView {
    Shop(ShopPanel),
    Shipping(ShippingPanel),
    Crafting(CraftingPanel),
    Dialogue(ActiveDialogue),
}

#[derive(Resource, Debug, Clone, Default)]
pub struct RenderSnapshot {
    pub scene: Scene,
    pub mode: GameState,
    pub clock: ClockView,
    pub player: PlayerView,
    pub hotbar: Vec<HotbarEntry>,
    pub selected_slot: u8,
    pub target: Option<TargetView>,
    /// Row-major soil, present only on the farm.
    pub soil: Option<Vec<SoilState>>,
    pub crops: Vec<CropView>,
    pub structures: Vec<(TileCoord, StructureKind)>,
    pub npcs: Vec<NpcView>,
    pub toasts: Vec<String>,
    pub fishing: Option<FishingGauge>,
    pub panel: Option<PanelView>,
}

pub fn clock_view(calendar: &Calendar) -> ClockView {
    ClockView {
        day: calendar.day,
        season: calendar.season,
        weekday: calendar.weekday,
        label: calendar.clock_label(),
        weather: calendar.weather,
        forecast: calendar.forecast,
    }
}

pub fn crop_views(farm: &FarmGrid) -> Vec<CropView> {
    farm.crops
        .iter()
        .map(|(&tile, crop)| CropView {
            tile,
            kind: crop.kind,
            stage: crop.stage,
            progress: crop.stage_fraction(),
            watered: crop.watered,
            diseased: crop.diseased,
            mature: crop.is_mature(),
        })
        .collect()
}

#[allow(clippy::too_many_arguments)]
pub fn rebuild_snapshot(
    state: Res<State<GameState>>,
    config: Res<GameConfig>,
    calendar: Res<Calendar>,
    player: Res<PlayerState>,
    inventory: Res<Inventory>,
    farm: Res<FarmGrid>,
    (aim, input): (Res<AimMode>, Res<PlayerInput>),
    villagers: Query<&Villager>,
    toasts: Res<Toasts>,
    fishing: Res<FishingMinigame>,
    (shop, shipping, crafting, dialogue): (
        Res<ShopPanel>,
        Res<ShippingPanel>,
        Res<CraftingPanel>,
        Res<ActiveDialogue>,
    ),
    mut snapshot: ResMut<RenderSnapshot>,
) {
    let mode = *state.get();
    let here = player.tile(config.tile_px);
    let on_farm = player.scene == Scene::Farm;
    let target = target_tile(&player, *aim, input.pointer, config.tile_px);
    let (cols, rows) = crate::world::scene_tiles(player.scene, &config, &farm.landmarks);

    *snapshot = RenderSnapshot {
        scene: player.scene,
        mode,
        clock: clock_view(&calendar),
        player: PlayerView {
            position: player.position,
            facing: player.facing,
            tile: here,
            gold: player.gold,
            energy: player.energy,
            hp: player.hp,
        },
        hotbar: hotbar::entries(&inventory),
        selected_slot: inventory.selected_slot,
        target: target.in_bounds(cols, rows).then_some(TargetView {
            tile: target,
            in_reach: in_reach(here, target, config.reach_tiles),
        }),
        soil: on_farm.then(|| farm.soil.clone()),
        crops: if on_farm { crop_views(&farm) } else { Vec::new() },
        structures: if on_farm {
            farm.structures.iter().map(|(&t, &s)| (t, s)).collect()
        } else {
            Vec::new()
        },
        npcs: villagers
            .iter()
            .filter(|v| v.scene == player.scene)
            .map(|v| NpcView {
                name: v.name,
                position: v.position,
            })
            .collect(),
        toasts: toasts.messages(),
        fishing: (mode == GameState::Fishing).then(|| FishingGauge {
            cursor: fishing.cursor,
            fish: fishing.fish,
            remaining: fishing.remaining(config.fishing_duration),
        }),
        panel: match mode {
            GameState::Shop => Some(PanelView::Shop(shop.clone())),
            GameState::Shipping => Some(PanelView::Shipping(shipping.clone())),
            GameState::Crafting => Some(PanelView::Crafting(crafting.clone())),
            GameState::Dialogue => Some(PanelView::Dialogue(dialogue.clone())),
            _ => None,
        },
    };
}
