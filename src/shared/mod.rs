//! Shared resources, events, and states for MeadowLite.
//!
//! This is the type contract. Every domain plugin imports from here; the
//! static tables in `crate::data` are the only other common import.

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub use crate::config::GameConfig;

// ═══════════════════════════════════════════════════════════════════════
// GAME STATE: top-level mode machine
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, States, Default)]
pub enum GameState {
    /// Normal world simulation.
    #[default]
    Playing,
    Paused,
    Dialogue,
    Shop,
    Shipping,
    Crafting,
    Fishing,
}

impl GameState {
    /// Only free roaming and the fishing sub-loop let the clock run.
    pub fn advances_clock(self) -> bool {
        matches!(self, GameState::Playing | GameState::Fishing)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// CALENDAR
// ═══════════════════════════════════════════════════════════════════════

pub const DAYS_PER_SEASON: u32 = 28;
pub const DAY_START_MINUTES: u32 = 6 * 60;
pub const LIGHTS_OUT_MINUTES: u32 = 26 * 60;
pub const LIGHTS_OUT_RESET_MINUTES: u32 = 2 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    #[default]
    Spring,
    Summer,
    Fall,
    Winter,
}

impl Season {
    pub const ALL: [Season; 4] = [Season::Spring, Season::Summer, Season::Fall, Season::Winter];

    pub fn next(self) -> Self {
        match self {
            Season::Spring => Season::Summer,
            Season::Summer => Season::Fall,
            Season::Fall => Season::Winter,
            Season::Winter => Season::Spring,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Season::Spring => 0,
            Season::Summer => 1,
            Season::Fall => 2,
            Season::Winter => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Fall => "Fall",
            Season::Winter => "Winter",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayOfWeek {
    #[default]
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    pub fn from_index(index: usize) -> Self {
        match index % 7 {
            0 => DayOfWeek::Monday,
            1 => DayOfWeek::Tuesday,
            2 => DayOfWeek::Wednesday,
            3 => DayOfWeek::Thursday,
            4 => DayOfWeek::Friday,
            5 => DayOfWeek::Saturday,
            _ => DayOfWeek::Sunday,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn next(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    pub fn short(self) -> &'static str {
        match self {
            DayOfWeek::Monday => "Mon",
            DayOfWeek::Tuesday => "Tue",
            DayOfWeek::Wednesday => "Wed",
            DayOfWeek::Thursday => "Thu",
            DayOfWeek::Friday => "Fri",
            DayOfWeek::Saturday => "Sat",
            DayOfWeek::Sunday => "Sun",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Weather {
    #[default]
    Clear,
    Rain,
    Snow,
}

impl Weather {
    /// Rain and snow both count as watering for crops.
    pub fn is_wet(self) -> bool {
        matches!(self, Weather::Rain | Weather::Snow)
    }

    pub fn label(self) -> &'static str {
        match self {
            Weather::Clear => "Clear",
            Weather::Rain => "Rain",
            Weather::Snow => "Snow",
        }
    }
}

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Calendar {
    pub day: u32, // 1-28
    pub season: Season,
    pub minutes: u32, // minutes since midnight, 2:00..26:00 sawtooth
    pub weekday: DayOfWeek,
    pub weather: Weather,
    pub forecast: Weather,
    /// Sub-minute remainder of real time not yet converted to clock minutes.
    #[serde(default)]
    pub pending_minutes: f32,
}

impl Default for Calendar {
    fn default() -> Self {
        Self {
            day: 1,
            season: Season::Spring,
            minutes: DAY_START_MINUTES,
            weekday: DayOfWeek::Monday,
            weather: Weather::Clear,
            forecast: Weather::Clear,
            pending_minutes: 0.0,
        }
    }
}

impl Calendar {
    pub fn hour(&self) -> u32 {
        self.minutes / 60
    }

    /// 12-hour clock label, e.g. "06:00 AM" or "01:30 AM" after midnight.
    pub fn clock_label(&self) -> String {
        let hour24 = self.hour() % 24;
        let minute = self.minutes % 60;
        let suffix = if hour24 < 12 { "AM" } else { "PM" };
        let hour12 = match hour24 % 12 {
            0 => 12,
            h => h,
        };
        format!("{hour12:02}:{minute:02} {suffix}")
    }
}

// ═══════════════════════════════════════════════════════════════════════
// TILE COORDINATES
// ═══════════════════════════════════════════════════════════════════════

/// Grid cell address. Serialized as the string `"col,row"` so it can key
/// JSON maps directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct TileCoord {
    pub col: i32,
    pub row: i32,
}

impl TileCoord {
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    pub fn offset(self, dc: i32, dr: i32) -> Self {
        Self::new(self.col + dc, self.row + dr)
    }

    pub fn chebyshev(self, other: TileCoord) -> i32 {
        (self.col - other.col).abs().max((self.row - other.row).abs())
    }

    pub fn from_pixels(pos: Vec2, tile_px: f32) -> Self {
        Self::new((pos.x / tile_px).floor() as i32, (pos.y / tile_px).floor() as i32)
    }

    /// Pixel position of the tile centre.
    pub fn center_px(self, tile_px: f32) -> Vec2 {
        Vec2::new(
            self.col as f32 * tile_px + tile_px / 2.0,
            self.row as f32 * tile_px + tile_px / 2.0,
        )
    }

    pub fn in_bounds(self, cols: i32, rows: i32) -> bool {
        (0..cols).contains(&self.col) && (0..rows).contains(&self.row)
    }
}

impl fmt::Display for TileCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.col, self.row)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed tile key `{0}`")]
pub struct TileParseError(pub String);

impl FromStr for TileCoord {
    type Err = TileParseError;

    /// Accepts `"3,4"` and the older `"(3, 4)"` form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || TileParseError(s.to_string());
        let trimmed = s.trim().trim_start_matches('(').trim_end_matches(')');
        let (col, row) = trimmed.split_once(',').ok_or_else(bad)?;
        let col = col.trim().parse().map_err(|_| bad())?;
        let row = row.trim().parse().map_err(|_| bad())?;
        Ok(TileCoord::new(col, row))
    }
}

impl Serialize for TileCoord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TileCoord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// WORLD
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scene {
    #[default]
    Farm,
    Town,
    Forest,
    Mountain,
    Beach,
    Mine,
    House,
}

impl Scene {
    pub fn label(self) -> &'static str {
        match self {
            Scene::Farm => "Farm",
            Scene::Town => "Town",
            Scene::Forest => "Forest",
            Scene::Mountain => "Mountain",
            Scene::Beach => "Beach",
            Scene::Mine => "Mine",
            Scene::House => "House",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Facing {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

impl Facing {
    /// Tile offset in grid space (rows grow downward).
    pub fn delta(self) -> (i32, i32) {
        match self {
            Facing::Up => (0, -1),
            Facing::Down => (0, 1),
            Facing::Left => (-1, 0),
            Facing::Right => (1, 0),
        }
    }

    /// Dominant axis of a movement vector; `None` for a zero vector.
    pub fn from_vector(v: Vec2) -> Option<Self> {
        if v == Vec2::ZERO {
            return None;
        }
        Some(if v.x.abs() > v.y.abs() {
            if v.x > 0.0 {
                Facing::Right
            } else {
                Facing::Left
            }
        } else if v.y > 0.0 {
            Facing::Down
        } else {
            Facing::Up
        })
    }
}

#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AimMode {
    #[default]
    Front,
    Pointer,
}

// ═══════════════════════════════════════════════════════════════════════
// ITEMS, TOOLS, CROPS, STRUCTURES
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    Hoe,
    WateringCan,
    FishingRod,
    Pickaxe,
    Axe,
}

impl ToolKind {
    /// Hotbar order: slots 0-4.
    pub const ALL: [ToolKind; 5] = [
        ToolKind::Hoe,
        ToolKind::WateringCan,
        ToolKind::FishingRod,
        ToolKind::Pickaxe,
        ToolKind::Axe,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ToolKind::Hoe => "Hoe",
            ToolKind::WateringCan => "Watering Can",
            ToolKind::FishingRod => "Fishing Rod",
            ToolKind::Pickaxe => "Pickaxe",
            ToolKind::Axe => "Axe",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CropKind {
    Parsnip,
    Turnip,
    Potato,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quality {
    Base,
    Silver,
    Gold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SprinklerKind {
    Copper,
    Iron,
    Gold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StructureKind {
    PathTile,
    Chest,
    Furnace,
    SprinklerCopper,
    SprinklerIron,
    SprinklerGold,
}

impl StructureKind {
    pub fn sprinkler(self) -> Option<SprinklerKind> {
        match self {
            StructureKind::SprinklerCopper => Some(SprinklerKind::Copper),
            StructureKind::SprinklerIron => Some(SprinklerKind::Iron),
            StructureKind::SprinklerGold => Some(SprinklerKind::Gold),
            _ => None,
        }
    }
}

/// Every item the game knows about. Static data lives in `crate::data`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemId {
    ParsnipSeeds,
    TurnipSeeds,
    PotatoSeeds,
    Parsnip,
    ParsnipSilver,
    ParsnipGold,
    Turnip,
    TurnipSilver,
    TurnipGold,
    Potato,
    PotatoSilver,
    PotatoGold,
    Fiber,
    Wood,
    Stone,
    CopperOre,
    IronOre,
    GoldOre,
    PathTile,
    Chest,
    Furnace,
    SprinklerCopper,
    SprinklerIron,
    SprinklerGold,
    Fertilizer,
    QualityFertilizer,
    Egg,
    EggSilver,
    EggGold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Seed(CropKind),
    Produce,
    Resource,
    Placeable(StructureKind),
    Fertilizer { amount: u8 },
    AnimalProduct,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceCategory {
    Crops,
    Res,
    Animal,
}

impl PriceCategory {
    pub const ALL: [PriceCategory; 3] = [PriceCategory::Crops, PriceCategory::Res, PriceCategory::Animal];
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemDef {
    pub name: &'static str,
    pub kind: ItemKind,
    pub category: PriceCategory,
    /// Shop price; zero when the shop never sells it.
    pub buy_price: u32,
    /// Shipping value; zero when it cannot be shipped.
    pub sell_price: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CropDef {
    pub kind: CropKind,
    pub name: &'static str,
    /// Days required in each stage before advancing.
    pub stage_days: &'static [u32],
    pub seasons: &'static [Season],
}

impl CropDef {
    pub fn stage_count(&self) -> u8 {
        self.stage_days.len() as u8
    }

    pub fn grows_in(&self, season: Season) -> bool {
        self.seasons.contains(&season)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// FARM
// ═══════════════════════════════════════════════════════════════════════

pub const FERTILITY_MIN: u8 = 10;
pub const FERTILITY_MAX: u8 = 100;
pub const BASE_FERTILITY: u8 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoilState {
    #[default]
    Untilled,
    Tilled,
    Watered,
}

impl SoilState {
    /// Tilled or watered: ready for seeds, fertilizer and sprinklers.
    pub fn is_worked(self) -> bool {
        matches!(self, SoilState::Tilled | SoilState::Watered)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Crop {
    pub kind: CropKind,
    pub stage: u8,
    pub progress: f32,
    pub watered: bool,
    pub diseased: bool,
}

/// Fixed farm landmarks, derived from the grid size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Landmarks {
    pub house_pos: TileCoord,
    pub house_size: (i32, i32),
    pub house_door: TileCoord,
    pub bed: TileCoord,
    pub shipping_bin: TileCoord,
    pub tv: TileCoord,
    pub bridge_col: i32,
    pub pond: Vec<TileCoord>,
}

impl Landmarks {
    pub fn for_grid(cols: i32, rows: i32) -> Self {
        let pond_col = (cols / 2 - 10).max(1);
        let pond_row = (rows / 2 + 6).min(rows - 2);
        Self {
            house_pos: TileCoord::new(cols / 2 - 14, rows / 2 - 4),
            house_size: (6, 4),
            house_door: TileCoord::new(cols / 2 - 11, rows / 2),
            bed: TileCoord::new(cols / 2 - 9, rows / 2 - 1),
            shipping_bin: TileCoord::new(cols / 2 - 2, rows / 2 - 1),
            tv: TileCoord::new(cols / 2 - 8, rows / 2 - 1),
            bridge_col: cols / 2,
            pond: (0..8)
                .map(|i| TileCoord::new(pond_col + i, pond_row))
                .filter(|t| t.col < cols)
                .collect(),
        }
    }
}

/// Dense soil/fertility arrays plus sparse crop and structure maps.
/// Absence from a map means nothing is on that tile.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FarmGrid {
    pub cols: i32,
    pub rows: i32,
    /// Row-major, `cols * rows` entries.
    pub soil: Vec<SoilState>,
    /// Row-major, `cols * rows` entries, each in 10..=100.
    pub fertility: Vec<u8>,
    pub crops: BTreeMap<TileCoord, Crop>,
    pub structures: BTreeMap<TileCoord, StructureKind>,
    pub landmarks: Landmarks,
}

impl Default for FarmGrid {
    fn default() -> Self {
        let config = GameConfig::default();
        FarmGrid::new(config.cols, config.rows)
    }
}

impl FarmGrid {
    pub fn new(cols: i32, rows: i32) -> Self {
        let size = (cols * rows).max(0) as usize;
        Self {
            cols,
            rows,
            soil: vec![SoilState::Untilled; size],
            fertility: vec![BASE_FERTILITY; size],
            crops: BTreeMap::new(),
            structures: BTreeMap::new(),
            landmarks: Landmarks::for_grid(cols, rows),
        }
    }

    pub fn in_bounds(&self, tile: TileCoord) -> bool {
        tile.in_bounds(self.cols, self.rows)
    }

    pub fn index(&self, tile: TileCoord) -> Option<usize> {
        self.in_bounds(tile)
            .then(|| (tile.row * self.cols + tile.col) as usize)
    }

    pub fn soil_at(&self, tile: TileCoord) -> Option<SoilState> {
        self.index(tile).map(|i| self.soil[i])
    }

    pub fn fertility_at(&self, tile: TileCoord) -> Option<u8> {
        self.index(tile).map(|i| self.fertility[i])
    }
}

// ═══════════════════════════════════════════════════════════════════════
// PLAYER
// ═══════════════════════════════════════════════════════════════════════

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct PlayerState {
    pub scene: Scene,
    /// Continuous pixel position within the current scene.
    pub position: Vec2,
    pub facing: Facing,
    pub gold: u32,
    pub energy: u32,
    pub hp: u32,
    pub tools: BTreeMap<ToolKind, u8>,
}

impl PlayerState {
    pub fn starter_tools() -> BTreeMap<ToolKind, u8> {
        ToolKind::ALL.iter().map(|&t| (t, 1)).collect()
    }

    pub fn tile(&self, tile_px: f32) -> TileCoord {
        TileCoord::from_pixels(self.position, tile_px)
    }
}

impl PlayerState {
    /// Fresh player standing mid-farm, sized to the configured grid.
    pub fn spawn(config: &GameConfig) -> Self {
        Self {
            scene: Scene::Farm,
            position: Vec2::new(
                (config.cols / 2) as f32 * config.tile_px,
                (config.rows / 2) as f32 * config.tile_px,
            ),
            facing: Facing::Down,
            gold: 250,
            energy: config.base_energy,
            hp: config.max_hp,
            tools: Self::starter_tools(),
        }
    }
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::spawn(&GameConfig::default())
    }
}

pub const HOTBAR_SLOTS: u8 = 10;
pub const TOOL_SLOTS: u8 = 5;

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    /// Absent key means zero; stored quantities are always > 0.
    pub items: BTreeMap<ItemId, u32>,
    pub selected_slot: u8,
}

impl Default for Inventory {
    fn default() -> Self {
        let items = [
            (ItemId::ParsnipSeeds, 6),
            (ItemId::TurnipSeeds, 5),
            (ItemId::PotatoSeeds, 3),
            (ItemId::Fertilizer, 4),
            (ItemId::SprinklerCopper, 1),
        ]
        .into_iter()
        .collect();
        Self {
            items,
            selected_slot: 0,
        }
    }
}

impl Inventory {
    pub fn empty() -> Self {
        Self {
            items: BTreeMap::new(),
            selected_slot: 0,
        }
    }

    pub fn count(&self, item: ItemId) -> u32 {
        self.items.get(&item).copied().unwrap_or(0)
    }

    pub fn has(&self, item: ItemId, qty: u32) -> bool {
        self.count(item) >= qty
    }

    pub fn add(&mut self, item: ItemId, qty: u32) {
        if qty == 0 {
            return;
        }
        *self.items.entry(item).or_insert(0) += qty;
    }

    /// Removes `qty` units if all are present. Returns false (and changes
    /// nothing) otherwise.
    pub fn try_remove(&mut self, item: ItemId, qty: u32) -> bool {
        let held = self.count(item);
        if held < qty {
            return false;
        }
        if held == qty {
            self.items.remove(&item);
        } else {
            self.items.insert(item, held - qty);
        }
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HotbarSelection {
    Tool(ToolKind),
    Item(ItemId),
    Empty,
}

// ═══════════════════════════════════════════════════════════════════════
// SKILLS
// ═══════════════════════════════════════════════════════════════════════

pub const MAX_SKILL_LEVEL: u8 = 10;
pub const XP_PER_LEVEL: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillKind {
    Farming,
    Mining,
    Fishing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SkillLine {
    pub level: u8,
    pub xp: u32,
}

#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Skills {
    pub farming: SkillLine,
    pub mining: SkillLine,
    pub fishing: SkillLine,
}

// ═══════════════════════════════════════════════════════════════════════
// ECONOMY
// ═══════════════════════════════════════════════════════════════════════

pub const DRIFT_MIN: f32 = 0.85;
pub const DRIFT_MAX: f32 = 1.25;
pub const DRIFT_STEP: f32 = 0.05;

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceDrift {
    pub multipliers: BTreeMap<PriceCategory, f32>,
}

impl Default for PriceDrift {
    fn default() -> Self {
        Self {
            multipliers: PriceCategory::ALL.iter().map(|&c| (c, 1.0)).collect(),
        }
    }
}

/// Items waiting to be sold at the next daily tick, in deposit order.
#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShippingQueue {
    pub entries: Vec<(ItemId, u32)>,
}

// ═══════════════════════════════════════════════════════════════════════
// QUESTS & PROGRESSION
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quest {
    pub id: String,
    pub title: String,
    pub required: BTreeMap<ItemId, u32>,
    #[serde(default)]
    pub shipped: BTreeMap<ItemId, u32>,
}

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestLog {
    pub active: Vec<Quest>,
    pub completed: BTreeSet<String>,
}

impl Default for QuestLog {
    fn default() -> Self {
        Self {
            active: vec![Quest {
                id: "ship_parsnips".into(),
                title: "Ship 3 parsnips".into(),
                required: [(ItemId::Parsnip, 3)].into_iter().collect(),
                shipped: BTreeMap::new(),
            }],
            completed: BTreeSet::new(),
        }
    }
}

impl QuestLog {
    pub fn empty() -> Self {
        Self {
            active: Vec::new(),
            completed: BTreeSet::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Flag {
    BridgeWorksite,
    BridgeBuilt,
    MountainAccess,
    FurnaceCrafted,
    AnySprinklerPlaced,
    Bulk10,
    ShopPlus,
    HouseUpgrade1,
    FishingBonus,
    MarketUnlocked,
}

impl Flag {
    pub fn label(self) -> &'static str {
        match self {
            Flag::BridgeWorksite => "Bridge Worksite",
            Flag::BridgeBuilt => "Bridge Built",
            Flag::MountainAccess => "Mountain Access",
            Flag::FurnaceCrafted => "Furnace Crafted",
            Flag::AnySprinklerPlaced => "Any Sprinkler Placed",
            Flag::Bulk10 => "Bulk10",
            Flag::ShopPlus => "Shop Plus",
            Flag::HouseUpgrade1 => "House Upgrade 1",
            Flag::FishingBonus => "Fishing Bonus",
            Flag::MarketUnlocked => "Market Unlocked",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Milestone {
    Start,
    Bridge,
    Furnace,
    Sprinkler,
    Beach,
    Market,
}

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Progression {
    pub flags: BTreeSet<Flag>,
    /// Lifetime gold earned through the shipping bin.
    pub total_shipped: u64,
    pub day_ship_count: u32,
    /// `None` once the whole chain is done.
    pub active: Option<Milestone>,
}

impl Default for Progression {
    fn default() -> Self {
        Self {
            flags: BTreeSet::new(),
            total_shipped: 0,
            day_ship_count: 0,
            active: Some(Milestone::Start),
        }
    }
}

impl Progression {
    pub fn has(&self, flag: Flag) -> bool {
        self.flags.contains(&flag)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// ACTION REJECTIONS
// ═══════════════════════════════════════════════════════════════════════

/// Why a player action did nothing. The display text doubles as the
/// notice shown to the player; silent variants show nothing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionRejected {
    #[error("Out of reach")]
    OutOfReach,
    #[error("Out of season")]
    OutOfSeason,
    #[error("Too tired")]
    TooTired,
    #[error("Not enough gold")]
    NotEnoughGold,
    #[error("Need {0}")]
    MissingItems(String),
    #[error("Something is already there")]
    Occupied,
    #[error("Till the soil first")]
    NeedsWorkedSoil,
    #[error("Already done")]
    AlreadyDone,
    #[error("Can't use that here")]
    WrongPlace,
    #[error("Nothing here")]
    Nothing,
    #[error("Still recovering")]
    Cooldown,
}

impl ActionRejected {
    pub fn is_silent(&self) -> bool {
        matches!(
            self,
            ActionRejected::AlreadyDone
                | ActionRejected::WrongPlace
                | ActionRejected::Nothing
                | ActionRejected::Cooldown
        )
    }
}

// ═══════════════════════════════════════════════════════════════════════
// INPUT
// ═══════════════════════════════════════════════════════════════════════

/// Logical input events. Whatever drives the game (a key-binding layer, a
/// script, a test) sends these; domain systems only ever read `PlayerInput`.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum InputAction {
    /// Movement intent for this frame; grid space, y grows downward.
    Move(Vec2),
    SelectSlot(u8),
    CycleSlot(i8),
    UseSelected,
    Interact,
    OpenCrafting,
    ToggleAim,
    /// Tile under the pointer, or `None` when the pointer left the grid.
    Pointer(Option<TileCoord>),
    Save,
    Load,
    Pause,
    NavLeft,
    NavRight,
    Confirm,
    Cancel,
}

/// Per-frame input snapshot, reset every frame except for `pointer`.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct PlayerInput {
    pub move_axis: Vec2,
    pub select_slot: Option<u8>,
    pub cycle_slot: i8,
    pub use_selected: bool,
    pub interact: bool,
    pub open_crafting: bool,
    pub toggle_aim: bool,
    pub pointer: Option<TileCoord>,
    pub quicksave: bool,
    pub quickload: bool,
    pub pause: bool,
    pub ui_left: bool,
    pub ui_right: bool,
    pub ui_confirm: bool,
    pub ui_cancel: bool,
}

#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputContext {
    #[default]
    Gameplay,
    Menu,
    Fishing,
}

/// Moves a menu cursor by `step`, wrapping within `len` entries.
pub fn wrap_index(index: usize, len: usize, step: i32) -> usize {
    if len == 0 {
        return 0;
    }
    (index as i64 + step as i64).rem_euclid(len as i64) as usize
}

// ═══════════════════════════════════════════════════════════════════════
// VILLAGERS & DIALOGUE
// ═══════════════════════════════════════════════════════════════════════

#[derive(Component, Debug, Clone)]
pub struct Villager {
    pub name: &'static str,
    pub scene: Scene,
    pub position: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialoguePrompt {
    /// Confirm spends the repair materials and opens the north edge.
    BridgeRepair,
}

/// Contents of the open dialogue box. Filled before entering
/// `GameState::Dialogue`.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct ActiveDialogue {
    pub speaker: String,
    pub lines: Vec<String>,
    pub prompt: Option<DialoguePrompt>,
}

impl ActiveDialogue {
    pub fn say(speaker: impl Into<String>, lines: Vec<String>) -> Self {
        Self {
            speaker: speaker.into(),
            lines,
            prompt: None,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// RANDOMNESS
// ═══════════════════════════════════════════════════════════════════════

/// The session's world random stream. Forecasts never draw from it.
#[derive(Resource, Debug, Clone)]
pub struct WorldRng(pub StdRng);

impl WorldRng {
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl Default for WorldRng {
    fn default() -> Self {
        Self::seeded(GameConfig::default().seed)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// EVENTS
// ═══════════════════════════════════════════════════════════════════════

/// The player asked to sleep; the daily tick runs once per request.
#[derive(Event, Debug, Clone, Default)]
pub struct SleepEvent;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DayReport {
    pub earnings: u32,
    pub items_shipped: u32,
    pub day: u32,
    pub season: Season,
    pub weekday: DayOfWeek,
    pub weather: Weather,
    pub forecast: Weather,
    pub crops_lost: Vec<TileCoord>,
    pub crops_advanced: Vec<TileCoord>,
    pub crops_fell_ill: Vec<TileCoord>,
    /// `(id, title)` of every quest completed by this tick.
    pub quests_completed: Vec<(String, String)>,
}

/// Sent after the daily tick has fully applied.
#[derive(Event, Debug, Clone)]
pub struct DayEndEvent {
    pub report: DayReport,
}

#[derive(Event, Debug, Clone)]
pub struct SceneChangeEvent {
    pub from: Scene,
    pub to: Scene,
}

#[derive(Event, Debug, Clone)]
pub struct CropHarvestedEvent {
    pub tile: TileCoord,
    pub item: ItemId,
}

#[derive(Event, Debug, Clone)]
pub struct QuestCompletedEvent {
    pub quest_id: String,
    pub title: String,
}

#[derive(Event, Debug, Clone)]
pub struct FlagUnlockedEvent {
    pub flag: Flag,
}

/// Transient user-facing notice.
#[derive(Event, Debug, Clone)]
pub struct ToastEvent {
    pub message: String,
    pub duration_secs: f32,
}

impl ToastEvent {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            duration_secs: 1.6,
        }
    }

    pub fn long(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            duration_secs: 3.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_key_round_trip_and_legacy_form() {
        let tile = TileCoord::new(12, 7);
        assert_eq!(tile.to_string(), "12,7");
        assert_eq!("12,7".parse::<TileCoord>().unwrap(), tile);
        assert_eq!("(12, 7)".parse::<TileCoord>().unwrap(), tile);
        assert!("12;7".parse::<TileCoord>().is_err());
        assert!("a,b".parse::<TileCoord>().is_err());
    }

    #[test]
    fn test_tile_keyed_map_serializes_as_string_keys() {
        let mut map = BTreeMap::new();
        map.insert(TileCoord::new(3, 4), SoilState::Watered);
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"3,4":"watered"}"#);
        let back: BTreeMap<TileCoord, SoilState> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, map);
    }

    #[test]
    fn test_chebyshev_distance() {
        let a = TileCoord::new(5, 5);
        assert_eq!(a.chebyshev(TileCoord::new(7, 6)), 2);
        assert_eq!(a.chebyshev(TileCoord::new(2, 5)), 3);
        assert_eq!(a.chebyshev(a), 0);
    }

    #[test]
    fn test_clock_label() {
        let mut cal = Calendar::default();
        assert_eq!(cal.clock_label(), "06:00 AM");
        cal.minutes = 13 * 60 + 5;
        assert_eq!(cal.clock_label(), "01:05 PM");
        cal.minutes = 25 * 60 + 30;
        assert_eq!(cal.clock_label(), "01:30 AM");
        cal.minutes = 24 * 60;
        assert_eq!(cal.clock_label(), "12:00 AM");
    }

    #[test]
    fn test_facing_from_vector() {
        assert_eq!(Facing::from_vector(Vec2::new(1.0, 0.2)), Some(Facing::Right));
        assert_eq!(Facing::from_vector(Vec2::new(-0.1, -1.0)), Some(Facing::Up));
        assert_eq!(Facing::from_vector(Vec2::ZERO), None);
    }

    #[test]
    fn test_inventory_try_remove_is_all_or_nothing() {
        let mut inv = Inventory::empty();
        inv.add(ItemId::Wood, 3);
        assert!(!inv.try_remove(ItemId::Wood, 4));
        assert_eq!(inv.count(ItemId::Wood), 3);
        assert!(inv.try_remove(ItemId::Wood, 3));
        assert!(!inv.items.contains_key(&ItemId::Wood));
    }

    #[test]
    fn test_landmarks_for_default_grid() {
        let marks = Landmarks::for_grid(40, 22);
        assert_eq!(marks.house_door, TileCoord::new(9, 11));
        assert_eq!(marks.bed, TileCoord::new(11, 10));
        assert_eq!(marks.pond.len(), 8);
        assert_eq!(marks.pond[0], TileCoord::new(10, 17));
    }

    #[test]
    fn test_wrap_index() {
        assert_eq!(wrap_index(0, 4, -1), 3);
        assert_eq!(wrap_index(3, 4, 1), 0);
        assert_eq!(wrap_index(2, 0, 1), 0);
    }

    #[test]
    fn test_week_wraps() {
        assert_eq!(DayOfWeek::Sunday.next(), DayOfWeek::Monday);
        assert_eq!(DayOfWeek::Friday.index(), 4);
    }
}
