use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::shared::*;

// ═══════════════════════════════════════════════════════════════════════
// PUBLIC TYPES
// ═══════════════════════════════════════════════════════════════════════

pub const SAVE_VERSION: u32 = 2;

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed save document: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("save version {found} is not supported (current is {expected})")]
    VersionMismatch { found: u32, expected: u32 },
    #[error("no save found at {0}")]
    NotFound(PathBuf),
    #[error("save document is corrupted: {0}")]
    Corrupted(String),
}

pub type SaveResult<T> = Result<T, SaveError>;

/// Player fields as stored. Version 1 documents may lack `hp`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub x: f32,
    pub y: f32,
    pub facing: Facing,
    pub gold: u32,
    pub energy: u32,
    #[serde(default)]
    pub hp: Option<u32>,
    #[serde(default = "PlayerState::starter_tools")]
    pub tools: BTreeMap<ToolKind, u8>,
}

/// The whole persisted session. Fields marked `serde(default)` were
/// added in version 2.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveDocument {
    pub save_version: u32,
    pub calendar: Calendar,
    pub scene: Scene,
    pub player: PlayerRecord,
    pub inventory: Inventory,
    pub farm: FarmGrid,
    #[serde(default)]
    pub shipping: ShippingQueue,
    #[serde(default)]
    pub skills: Skills,
    #[serde(default)]
    pub drift: PriceDrift,
    #[serde(default)]
    pub quests: QuestLog,
    #[serde(default)]
    pub progression: Progression,
}

/// Everything a load puts back, ready to be written into resources.
#[derive(Debug, Clone, PartialEq)]
pub struct RestoredSession {
    pub calendar: Calendar,
    pub player: PlayerState,
    pub inventory: Inventory,
    pub farm: FarmGrid,
    pub shipping: ShippingQueue,
    pub skills: Skills,
    pub drift: PriceDrift,
    pub quests: QuestLog,
    pub progression: Progression,
}

impl SaveDocument {
    #[allow(clippy::too_many_arguments)]
    pub fn capture(
        calendar: &Calendar,
        player: &PlayerState,
        inventory: &Inventory,
        farm: &FarmGrid,
        shipping: &ShippingQueue,
        skills: &Skills,
        drift: &PriceDrift,
        quests: &QuestLog,
        progression: &Progression,
    ) -> Self {
        Self {
            save_version: SAVE_VERSION,
            calendar: calendar.clone(),
            scene: player.scene,
            player: PlayerRecord {
                x: player.position.x,
                y: player.position.y,
                facing: player.facing,
                gold: player.gold,
                energy: player.energy,
                hp: Some(player.hp),
                tools: player.tools.clone(),
            },
            inventory: inventory.clone(),
            farm: farm.clone(),
            shipping: shipping.clone(),
            skills: *skills,
            drift: drift.clone(),
            quests: quests.clone(),
            progression: progression.clone(),
        }
    }

    pub fn restore(self, config: &GameConfig) -> RestoredSession {
        let p = self.player;
        RestoredSession {
            calendar: self.calendar,
            player: PlayerState {
                scene: self.scene,
                position: Vec2::new(p.x, p.y),
                facing: p.facing,
                gold: p.gold,
                energy: p.energy,
                hp: p.hp.unwrap_or(config.max_hp),
                tools: p.tools,
            },
            inventory: self.inventory,
            farm: self.farm,
            shipping: self.shipping,
            skills: self.skills,
            drift: self.drift,
            quests: self.quests,
            progression: self.progression,
        }
    }

    /// Checks that the dense grids and sparse maps agree with the grid size.
    fn validate(&self) -> SaveResult<()> {
        let farm = &self.farm;
        let expected = (farm.cols.max(0) * farm.rows.max(0)) as usize;
        if farm.soil.len() != expected || farm.fertility.len() != expected {
            return Err(SaveError::Corrupted(format!(
                "grid is {}x{} but holds {} soil and {} fertility entries",
                farm.cols,
                farm.rows,
                farm.soil.len(),
                farm.fertility.len()
            )));
        }
        let stray = farm
            .crops
            .keys()
            .chain(farm.structures.keys())
            .find(|&&tile| !farm.in_bounds(tile));
        if let Some(tile) = stray {
            return Err(SaveError::Corrupted(format!("tile {tile} lies outside the grid")));
        }
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════
// EVENTS
// ═══════════════════════════════════════════════════════════════════════

/// Write the session to the configured save path.
#[derive(Event, Debug, Clone, Default)]
pub struct SaveRequestEvent;

/// Replace the session with the configured save file.
#[derive(Event, Debug, Clone, Default)]
pub struct LoadRequestEvent;

#[derive(Event, Debug, Clone)]
pub struct SaveCompleteEvent {
    pub success: bool,
    pub error_message: Option<String>,
}

#[derive(Event, Debug, Clone)]
pub struct LoadCompleteEvent {
    pub success: bool,
    pub error_message: Option<String>,
}

// ═══════════════════════════════════════════════════════════════════════
// PLUGIN
// ═══════════════════════════════════════════════════════════════════════

pub struct SavePlugin;

impl Plugin for SavePlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<SaveRequestEvent>()
            .add_event::<LoadRequestEvent>()
            .add_event::<SaveCompleteEvent>()
            .add_event::<LoadCompleteEvent>()
            .add_systems(
                Update,
                quicksave_input
                    .run_if(in_state(GameState::Playing).or(in_state(GameState::Paused))),
            )
            .add_systems(
                Update,
                (autosave_on_day_end, handle_save_request, handle_load_request)
                    .chain()
                    .after(quicksave_input)
                    .after(crate::day_end::process_sleep),
            );
    }
}

// ═══════════════════════════════════════════════════════════════════════
// SAVE / LOAD LOGIC
// ═══════════════════════════════════════════════════════════════════════

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> SaveError + '_ {
    move |source| SaveError::Io {
        path: path.to_path_buf(),
        source,
    }
}

pub fn encode_document(doc: &SaveDocument) -> SaveResult<String> {
    Ok(serde_json::to_string_pretty(doc)?)
}

/// Parses, version-gates, upgrades and validates a save document.
pub fn decode_document(text: &str) -> SaveResult<SaveDocument> {
    let raw: serde_json::Value = serde_json::from_str(text)?;
    let found = raw
        .get("save_version")
        .and_then(serde_json::Value::as_u64)
        .ok_or_else(|| SaveError::Corrupted("missing save_version".into()))?;
    let found = u32::try_from(found).unwrap_or(u32::MAX);
    if found == 0 || found > SAVE_VERSION {
        return Err(SaveError::VersionMismatch {
            found,
            expected: SAVE_VERSION,
        });
    }

    let mut doc: SaveDocument = serde_json::from_value(raw)?;
    if doc.save_version < SAVE_VERSION {
        info!(
            "[Save] Upgrading version {} document to {}",
            doc.save_version, SAVE_VERSION
        );
        doc.save_version = SAVE_VERSION;
    }
    doc.validate()?;
    Ok(doc)
}

/// Writes to `<path>.tmp` first, then renames over `path`, so a failed
/// write never clobbers the previous save.
pub fn write_document(path: &Path, doc: &SaveDocument) -> SaveResult<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(io_error(dir))?;
    }
    let json = encode_document(doc)?;
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    fs::write(&tmp, json).map_err(io_error(&tmp))?;
    fs::rename(&tmp, path).map_err(io_error(path))?;
    Ok(())
}

pub fn read_document(path: &Path) -> SaveResult<SaveDocument> {
    if !path.exists() {
        return Err(SaveError::NotFound(path.to_path_buf()));
    }
    let text = fs::read_to_string(path).map_err(io_error(path))?;
    decode_document(&text)
}

// ═══════════════════════════════════════════════════════════════════════
// SYSTEMS
// ═══════════════════════════════════════════════════════════════════════

#[allow(clippy::too_many_arguments)]
fn handle_save_request(
    mut save_events: EventReader<SaveRequestEvent>,
    mut complete_events: EventWriter<SaveCompleteEvent>,
    mut toasts: EventWriter<ToastEvent>,
    config: Res<GameConfig>,
    calendar: Res<Calendar>,
    player: Res<PlayerState>,
    inventory: Res<Inventory>,
    farm: Res<FarmGrid>,
    shipping: Res<ShippingQueue>,
    skills: Res<Skills>,
    (drift, quests, progression): (Res<PriceDrift>, Res<QuestLog>, Res<Progression>),
) {
    // Several requests in one frame write the same state; do it once.
    if save_events.read().count() == 0 {
        return;
    }

    let doc = SaveDocument::capture(
        &calendar,
        &player,
        &inventory,
        &farm,
        &shipping,
        &skills,
        &drift,
        &quests,
        &progression,
    );
    match write_document(&config.save_path, &doc) {
        Ok(()) => {
            info!("[Save] Wrote {}", config.save_path.display());
            toasts.send(ToastEvent::new("Saved."));
            complete_events.send(SaveCompleteEvent {
                success: true,
                error_message: None,
            });
        }
        Err(e) => {
            warn!("[Save] Save FAILED: {}", e);
            toasts.send(ToastEvent::long(format!("Save failed: {e}")));
            complete_events.send(SaveCompleteEvent {
                success: false,
                error_message: Some(e.to_string()),
            });
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn handle_load_request(
    mut load_events: EventReader<LoadRequestEvent>,
    mut complete_events: EventWriter<LoadCompleteEvent>,
    mut toasts: EventWriter<ToastEvent>,
    config: Res<GameConfig>,
    mut calendar: ResMut<Calendar>,
    mut player: ResMut<PlayerState>,
    mut inventory: ResMut<Inventory>,
    mut farm: ResMut<FarmGrid>,
    mut shipping: ResMut<ShippingQueue>,
    mut skills: ResMut<Skills>,
    (mut drift, mut quests, mut progression): (
        ResMut<PriceDrift>,
        ResMut<QuestLog>,
        ResMut<Progression>,
    ),
) {
    if load_events.read().count() == 0 {
        return;
    }

    match read_document(&config.save_path) {
        Ok(doc) => {
            let restored = doc.restore(&config);
            *calendar = restored.calendar;
            *player = restored.player;
            *inventory = restored.inventory;
            *farm = restored.farm;
            *shipping = restored.shipping;
            *skills = restored.skills;
            *drift = restored.drift;
            *quests = restored.quests;
            *progression = restored.progression;

            info!("[Save] Loaded {}", config.save_path.display());
            toasts.send(ToastEvent::new("Loaded."));
            complete_events.send(LoadCompleteEvent {
                success: true,
                error_message: None,
            });
        }
        Err(e) => {
            warn!("[Save] Load FAILED: {}", e);
            let notice = match &e {
                SaveError::NotFound(_) => "No save found.".to_string(),
                other => format!("Load failed: {other}"),
            };
            toasts.send(ToastEvent::long(notice));
            complete_events.send(LoadCompleteEvent {
                success: false,
                error_message: Some(e.to_string()),
            });
        }
    }
}

/// Listen for DayEndEvent and autosave.
fn autosave_on_day_end(
    mut day_end_events: EventReader<DayEndEvent>,
    mut save_writer: EventWriter<SaveRequestEvent>,
) {
    for ev in day_end_events.read() {
        info!(
            "[Save] Autosaving for day {} {}",
            ev.report.day,
            ev.report.season.label()
        );
        save_writer.send(SaveRequestEvent);
    }
}

fn quicksave_input(
    input: Res<PlayerInput>,
    mut save_writer: EventWriter<SaveRequestEvent>,
    mut load_writer: EventWriter<LoadRequestEvent>,
) {
    if input.quicksave {
        save_writer.send(SaveRequestEvent);
    }
    if input.quickload {
        load_writer.send(LoadRequestEvent);
    }
}
