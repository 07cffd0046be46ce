//! Resolving "use selected" against the target tile.
//!
//! `use_selected` is the whole rule set as a pure function over the
//! session resources; `use_selected_system` feeds it from the ECS and turns
//! the outcome into cooldowns, notices, mode changes and events.

use bevy::prelude::*;
use rand::Rng;

use crate::data::item_def;
use crate::farming::{harvest_crop, Harvest};
use crate::shared::*;
use crate::world::{self, DoorLink};

use super::hotbar;
use super::ActionCooldown;

pub const HOE_XP: u32 = 1;
pub const MINING_XP: u32 = 3;
const STONE_CHANCE: f32 = 0.75;

// ═══════════════════════════════════════════════════════════════════════
// TARGETING
// ═══════════════════════════════════════════════════════════════════════

/// Tile in front of the player, or the pointer tile in pointer mode.
pub fn target_tile(player: &PlayerState, aim: AimMode, pointer: Option<TileCoord>, tile_px: f32) -> TileCoord {
    match (aim, pointer) {
        (AimMode::Pointer, Some(tile)) => tile,
        _ => {
            let (dc, dr) = player.facing.delta();
            player.tile(tile_px).offset(dc, dr)
        }
    }
}

pub fn in_reach(player_tile: TileCoord, target: TileCoord, reach: i32) -> bool {
    player_tile.chebyshev(target) <= reach
}

// ═══════════════════════════════════════════════════════════════════════
// RESOLVER
// ═══════════════════════════════════════════════════════════════════════

pub struct ActionContext<'a, R: Rng> {
    pub config: &'a GameConfig,
    pub calendar: &'a Calendar,
    pub player: &'a mut PlayerState,
    pub inventory: &'a mut Inventory,
    pub farm: &'a mut FarmGrid,
    pub skills: &'a mut Skills,
    pub progression: &'a mut Progression,
    pub rng: &'a mut R,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    Door(DoorLink),
    Harvested(Harvest),
    Tilled,
    Watered,
    Mined { stone: bool, ore: Option<ItemId> },
    Chopped { wood: u32 },
    CastLine,
    Planted(CropKind),
    Placed {
        structure: StructureKind,
        unlocked: Option<Flag>,
    },
    Fertilized { fertility: u8 },
}

impl ActionOutcome {
    /// Seconds before the next action is accepted. Doors cost nothing.
    pub fn cooldown(&self, config: &GameConfig, farming_level: u8) -> f32 {
        match self {
            ActionOutcome::Door(_) => 0.0,
            ActionOutcome::Planted(_)
            | ActionOutcome::Placed { .. }
            | ActionOutcome::Fertilized { .. } => config.item_cooldown,
            _ => config.tool_cooldown(farming_level),
        }
    }

    pub fn notice(&self) -> Option<String> {
        match self {
            ActionOutcome::Harvested(h) => Some(format!("Harvested {}", item_def(h.item).name)),
            ActionOutcome::Mined { stone, ore } if *stone || ore.is_some() => Some("+ore".into()),
            ActionOutcome::Chopped { .. } => Some("+wood".into()),
            ActionOutcome::CastLine => Some("Fishing…".into()),
            ActionOutcome::Fertilized { .. } => Some("Fertility +".into()),
            _ => None,
        }
    }
}

fn require_scene(ok: bool) -> Result<(), ActionRejected> {
    if ok {
        Ok(())
    } else {
        Err(ActionRejected::WrongPlace)
    }
}

fn spend_energy(player: &mut PlayerState, cost: u32) -> Result<(), ActionRejected> {
    if player.energy < cost {
        return Err(ActionRejected::TooTired);
    }
    player.energy -= cost;
    Ok(())
}

/// Ore drop for a pick swing: `roll` already includes the mining bonus.
pub fn ore_for_roll(roll: f32) -> Option<ItemId> {
    if roll < 0.20 {
        None
    } else if roll < 0.45 {
        Some(ItemId::CopperOre)
    } else if roll < 0.65 {
        Some(ItemId::IronOre)
    } else {
        Some(ItemId::GoldOre)
    }
}

/// Applies the selected tool or item to `target`. Nothing changes unless
/// the result is `Ok`.
pub fn use_selected<R: Rng>(
    ctx: &mut ActionContext<'_, R>,
    selection: HotbarSelection,
    target: TileCoord,
) -> Result<ActionOutcome, ActionRejected> {
    let scene = ctx.player.scene;
    let (cols, rows) = world::scene_tiles(scene, ctx.config, &ctx.farm.landmarks);
    if !target.in_bounds(cols, rows) {
        return Err(ActionRejected::Nothing);
    }

    if let Some(link) = world::door_at(scene, target, &ctx.farm.landmarks, ctx.config.tile_px) {
        return Ok(ActionOutcome::Door(link));
    }

    if !in_reach(ctx.player.tile(ctx.config.tile_px), target, ctx.config.reach_tiles) {
        return Err(ActionRejected::OutOfReach);
    }

    match selection {
        HotbarSelection::Tool(tool) => use_tool(ctx, tool, target),
        HotbarSelection::Item(item) => use_item(ctx, item, target),
        HotbarSelection::Empty => Err(ActionRejected::Nothing),
    }
}

fn use_tool<R: Rng>(
    ctx: &mut ActionContext<'_, R>,
    tool: ToolKind,
    target: TileCoord,
) -> Result<ActionOutcome, ActionRejected> {
    let scene = ctx.player.scene;

    // Any tool picks a ripe crop.
    if scene == Scene::Farm && ctx.farm.crops.get(&target).is_some_and(Crop::is_mature) {
        let harvest = harvest_crop(ctx.farm, target, ctx.skills, ctx.rng)?;
        ctx.inventory.add(harvest.item, 1);
        return Ok(ActionOutcome::Harvested(harvest));
    }

    match tool {
        ToolKind::Hoe => {
            require_scene(scene == Scene::Farm)?;
            ctx.farm.check_till(target)?;
            spend_energy(ctx.player, ctx.config.hoe_energy_cost)?;
            ctx.farm.till(target)?;
            ctx.skills.add_xp(SkillKind::Farming, HOE_XP);
            Ok(ActionOutcome::Tilled)
        }
        ToolKind::WateringCan => {
            require_scene(scene == Scene::Farm)?;
            ctx.farm.check_water(target)?;
            spend_energy(ctx.player, ctx.config.watering_energy_cost)?;
            ctx.farm.water(target)?;
            Ok(ActionOutcome::Watered)
        }
        ToolKind::Pickaxe => {
            require_scene(matches!(scene, Scene::Mine | Scene::Mountain))?;
            let stone = ctx.rng.gen::<f32>() < STONE_CHANCE;
            if stone {
                ctx.inventory.add(ItemId::Stone, 1);
            }
            let roll = ctx.rng.gen::<f32>() + ctx.skills.mining.level as f32 * 0.02;
            let ore = ore_for_roll(roll);
            if let Some(ore) = ore {
                ctx.inventory.add(ore, 1);
            }
            if stone || ore.is_some() {
                ctx.skills.add_xp(SkillKind::Mining, MINING_XP);
            }
            Ok(ActionOutcome::Mined { stone, ore })
        }
        ToolKind::Axe => {
            let wood = match scene {
                Scene::Forest => 2,
                Scene::Farm => 1,
                _ => return Err(ActionRejected::WrongPlace),
            };
            ctx.inventory.add(ItemId::Wood, wood);
            Ok(ActionOutcome::Chopped { wood })
        }
        ToolKind::FishingRod => {
            let water = match scene {
                Scene::Farm => ctx.farm.landmarks.pond.contains(&target),
                Scene::Beach => true,
                _ => false,
            };
            require_scene(water)?;
            Ok(ActionOutcome::CastLine)
        }
    }
}

fn use_item<R: Rng>(
    ctx: &mut ActionContext<'_, R>,
    item: ItemId,
    target: TileCoord,
) -> Result<ActionOutcome, ActionRejected> {
    require_scene(ctx.player.scene == Scene::Farm)?;
    if !ctx.inventory.has(item, 1) {
        return Err(ActionRejected::Nothing);
    }

    let outcome = match item_def(item).kind {
        ItemKind::Seed(crop) => {
            ctx.farm.plant(target, crop, ctx.calendar.season)?;
            ActionOutcome::Planted(crop)
        }
        ItemKind::Placeable(structure) => {
            ctx.farm.place_structure(target, structure)?;
            let flag = match structure {
                StructureKind::Furnace => Some(Flag::FurnaceCrafted),
                s if s.sprinkler().is_some() => Some(Flag::AnySprinklerPlaced),
                _ => None,
            };
            let unlocked = flag.filter(|&f| ctx.progression.set_flag(f));
            ActionOutcome::Placed { structure, unlocked }
        }
        ItemKind::Fertilizer { amount } => {
            let fertility = ctx.farm.fertilize(target, amount)?;
            ActionOutcome::Fertilized { fertility }
        }
        ItemKind::Produce | ItemKind::Resource | ItemKind::AnimalProduct => {
            return Err(ActionRejected::Nothing);
        }
    };
    if !ctx.inventory.try_remove(item, 1) {
        error!("[Player] {:?} vanished from the inventory mid-action", item);
    }
    Ok(outcome)
}

// ═══════════════════════════════════════════════════════════════════════
// SYSTEMS
// ═══════════════════════════════════════════════════════════════════════

pub fn tick_action_cooldown(time: Res<Time>, mut cooldown: ResMut<ActionCooldown>) {
    if cooldown.remaining > 0.0 {
        cooldown.remaining = (cooldown.remaining - time.delta_secs()).max(0.0);
    }
}

#[allow(clippy::too_many_arguments)]
pub fn use_selected_system(
    input: Res<PlayerInput>,
    config: Res<GameConfig>,
    calendar: Res<Calendar>,
    aim: Res<AimMode>,
    mut cooldown: ResMut<ActionCooldown>,
    mut player: ResMut<PlayerState>,
    mut inventory: ResMut<Inventory>,
    mut farm: ResMut<FarmGrid>,
    mut skills: ResMut<Skills>,
    mut progression: ResMut<Progression>,
    mut rng: ResMut<WorldRng>,
    mut next_state: ResMut<NextState<GameState>>,
    mut scene_events: EventWriter<SceneChangeEvent>,
    mut harvest_events: EventWriter<CropHarvestedEvent>,
    (mut flags, mut toasts): (EventWriter<FlagUnlockedEvent>, EventWriter<ToastEvent>),
) {
    if !input.use_selected {
        return;
    }

    let target = target_tile(&player, *aim, input.pointer, config.tile_px);
    let selection = hotbar::selection(&inventory);
    let farming_level = skills.farming.level;

    let result = cooldown.ready().and_then(|()| {
        use_selected(
            &mut ActionContext {
                config: &config,
                calendar: &calendar,
                player: &mut player,
                inventory: &mut inventory,
                farm: &mut farm,
                skills: &mut skills,
                progression: &mut progression,
                rng: &mut rng.0,
            },
            selection,
            target,
        )
    });

    let outcome = match result {
        Ok(outcome) => outcome,
        Err(rejected) => {
            if !rejected.is_silent() {
                toasts.send(ToastEvent::new(rejected.to_string()));
            }
            return;
        }
    };

    cooldown.remaining = outcome.cooldown(&config, farming_level);
    if let Some(notice) = outcome.notice() {
        toasts.send(ToastEvent::new(notice));
    }

    match outcome {
        ActionOutcome::Door(link) => {
            scene_events.send(world::enter_scene(&mut player, link.to, link.arrive));
        }
        ActionOutcome::Harvested(harvest) => {
            harvest_events.send(CropHarvestedEvent {
                tile: target,
                item: harvest.item,
            });
        }
        ActionOutcome::CastLine => next_state.set(GameState::Fishing),
        ActionOutcome::Placed {
            unlocked: Some(flag),
            ..
        } => {
            flags.send(FlagUnlockedEvent { flag });
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    struct Session {
        config: GameConfig,
        calendar: Calendar,
        player: PlayerState,
        inventory: Inventory,
        farm: FarmGrid,
        skills: Skills,
        progression: Progression,
        rng: StdRng,
    }

    impl Session {
        fn new() -> Self {
            Self {
                config: GameConfig::default(),
                calendar: Calendar::default(),
                player: PlayerState::default(),
                inventory: Inventory::default(),
                farm: FarmGrid::new(40, 22),
                skills: Skills::default(),
                progression: Progression::default(),
                rng: StdRng::seed_from_u64(3),
            }
        }

        fn stand_at(&mut self, tile: TileCoord) {
            self.player.position = tile.center_px(self.config.tile_px);
        }

        fn apply(
            &mut self,
            selection: HotbarSelection,
            target: TileCoord,
        ) -> Result<ActionOutcome, ActionRejected> {
            use_selected(
                &mut ActionContext {
                    config: &self.config,
                    calendar: &self.calendar,
                    player: &mut self.player,
                    inventory: &mut self.inventory,
                    farm: &mut self.farm,
                    skills: &mut self.skills,
                    progression: &mut self.progression,
                    rng: &mut self.rng,
                },
                selection,
                target,
            )
        }
    }

    const HOE: HotbarSelection = HotbarSelection::Tool(ToolKind::Hoe);

    #[test]
    fn test_front_and_pointer_targeting() {
        let mut player = PlayerState::default();
        player.position = TileCoord::new(5, 5).center_px(32.0);
        player.facing = Facing::Left;
        assert_eq!(target_tile(&player, AimMode::Front, None, 32.0), TileCoord::new(4, 5));
        let pointer = Some(TileCoord::new(9, 9));
        assert_eq!(target_tile(&player, AimMode::Pointer, pointer, 32.0), TileCoord::new(9, 9));
        assert_eq!(target_tile(&player, AimMode::Pointer, None, 32.0), TileCoord::new(4, 5));
    }

    #[test]
    fn test_hoe_twice_costs_energy_once() {
        let mut s = Session::new();
        s.stand_at(TileCoord::new(20, 5));
        let target = TileCoord::new(20, 6);
        let start = s.player.energy;
        assert_eq!(s.apply(HOE, target), Ok(ActionOutcome::Tilled));
        assert_eq!(s.player.energy, start - 2);
        assert_eq!(s.apply(HOE, target), Err(ActionRejected::AlreadyDone));
        assert_eq!(s.player.energy, start - 2);
        assert_eq!(s.skills.farming.xp, HOE_XP);
    }

    #[test]
    fn test_out_of_reach_rejected() {
        let mut s = Session::new();
        s.stand_at(TileCoord::new(20, 5));
        let err = s.apply(HOE, TileCoord::new(23, 5)).unwrap_err();
        assert_eq!(err, ActionRejected::OutOfReach);
        assert_eq!(err.to_string(), "Out of reach");
        assert_eq!(s.farm.soil_at(TileCoord::new(23, 5)), Some(SoilState::Untilled));
    }

    #[test]
    fn test_too_tired_changes_nothing() {
        let mut s = Session::new();
        s.stand_at(TileCoord::new(20, 5));
        s.player.energy = 1;
        assert_eq!(s.apply(HOE, TileCoord::new(20, 6)), Err(ActionRejected::TooTired));
        assert_eq!(s.player.energy, 1);
        assert_eq!(s.farm.soil_at(TileCoord::new(20, 6)), Some(SoilState::Untilled));
    }

    #[test]
    fn test_out_of_season_seed_not_consumed() {
        let mut s = Session::new();
        s.calendar.season = Season::Summer;
        s.stand_at(TileCoord::new(20, 5));
        let target = TileCoord::new(20, 6);
        s.farm.till(target).unwrap();
        let seeds = s.inventory.count(ItemId::ParsnipSeeds);
        assert_eq!(
            s.apply(HotbarSelection::Item(ItemId::ParsnipSeeds), target),
            Err(ActionRejected::OutOfSeason)
        );
        assert_eq!(s.inventory.count(ItemId::ParsnipSeeds), seeds);
        assert!(s.farm.crops.is_empty());
    }

    #[test]
    fn test_seed_plants_and_is_consumed() {
        let mut s = Session::new();
        s.stand_at(TileCoord::new(20, 5));
        let target = TileCoord::new(21, 6);
        s.farm.till(target).unwrap();
        let outcome = s.apply(HotbarSelection::Item(ItemId::TurnipSeeds), target);
        assert_eq!(outcome, Ok(ActionOutcome::Planted(CropKind::Turnip)));
        assert_eq!(s.inventory.count(ItemId::TurnipSeeds), 4);
        assert_eq!(s.farm.crops[&target].stage, 0);
    }

    #[test]
    fn test_placing_sprinkler_sets_flag_once() {
        let mut s = Session::new();
        s.stand_at(TileCoord::new(20, 5));
        s.inventory.add(ItemId::SprinklerCopper, 1);
        let first = s.apply(HotbarSelection::Item(ItemId::SprinklerCopper), TileCoord::new(20, 6));
        assert_eq!(
            first,
            Ok(ActionOutcome::Placed {
                structure: StructureKind::SprinklerCopper,
                unlocked: Some(Flag::AnySprinklerPlaced)
            })
        );
        let second = s.apply(HotbarSelection::Item(ItemId::SprinklerCopper), TileCoord::new(21, 6));
        assert!(matches!(second, Ok(ActionOutcome::Placed { unlocked: None, .. })));
        assert_eq!(s.inventory.count(ItemId::SprinklerCopper), 0);
    }

    #[test]
    fn test_any_tool_harvests_ripe_crop() {
        let mut s = Session::new();
        s.stand_at(TileCoord::new(20, 5));
        let target = TileCoord::new(20, 6);
        s.farm.till(target).unwrap();
        s.farm.plant(target, CropKind::Parsnip, Season::Spring).unwrap();
        s.farm.crops.get_mut(&target).unwrap().stage = 3;
        let outcome = s.apply(HotbarSelection::Tool(ToolKind::Axe), target).unwrap();
        let ActionOutcome::Harvested(harvest) = outcome else {
            panic!("expected a harvest, got {outcome:?}");
        };
        assert_eq!(s.inventory.count(harvest.item), 1);
        assert!(s.farm.crops.is_empty());
    }

    #[test]
    fn test_tools_gated_by_scene() {
        let mut s = Session::new();
        s.stand_at(TileCoord::new(20, 5));
        let target = TileCoord::new(20, 6);
        let pick = HotbarSelection::Tool(ToolKind::Pickaxe);
        assert_eq!(s.apply(pick, target), Err(ActionRejected::WrongPlace));
        s.player.scene = Scene::Forest;
        assert_eq!(s.apply(HOE, target), Err(ActionRejected::WrongPlace));
        assert_eq!(
            s.apply(HotbarSelection::Tool(ToolKind::Axe), target),
            Ok(ActionOutcome::Chopped { wood: 2 })
        );
        s.player.scene = Scene::Mine;
        assert!(matches!(s.apply(pick, target), Ok(ActionOutcome::Mined { .. })));
    }

    #[test]
    fn test_rod_needs_pond_on_farm() {
        let mut s = Session::new();
        let rod = HotbarSelection::Tool(ToolKind::FishingRod);
        let pond = s.farm.landmarks.pond[2];
        s.stand_at(pond.offset(0, -1));
        assert_eq!(s.apply(rod, pond), Ok(ActionOutcome::CastLine));
        assert_eq!(s.apply(rod, pond.offset(0, -2)), Err(ActionRejected::WrongPlace));
        s.player.scene = Scene::Beach;
        assert_eq!(s.apply(rod, pond.offset(0, -2)), Ok(ActionOutcome::CastLine));
    }

    #[test]
    fn test_door_ignores_reach() {
        let mut s = Session::new();
        s.stand_at(TileCoord::new(30, 15));
        let door = s.farm.landmarks.house_door;
        let outcome = s.apply(HOE, door).unwrap();
        assert!(matches!(outcome, ActionOutcome::Door(DoorLink { to: Scene::House, .. })));
        assert_eq!(outcome.cooldown(&s.config, 0), 0.0);
    }

    #[test]
    fn test_cooldown_rejects_silently() {
        let mut cooldown = ActionCooldown { remaining: 0.25 };
        assert_eq!(cooldown.ready(), Err(ActionRejected::Cooldown));
        assert!(ActionRejected::Cooldown.is_silent());
        cooldown.remaining = 0.0;
        assert_eq!(cooldown.ready(), Ok(()));
    }

    #[test]
    fn test_ore_thresholds() {
        assert_eq!(ore_for_roll(0.19), None);
        assert_eq!(ore_for_roll(0.20), Some(ItemId::CopperOre));
        assert_eq!(ore_for_roll(0.5), Some(ItemId::IronOre));
        assert_eq!(ore_for_roll(0.65), Some(ItemId::GoldOre));
    }

    #[test]
    fn test_off_grid_target_is_silent() {
        let mut s = Session::new();
        s.stand_at(TileCoord::new(0, 0));
        let err = s.apply(HOE, TileCoord::new(-1, 0)).unwrap_err();
        assert!(err.is_silent());
    }
}
