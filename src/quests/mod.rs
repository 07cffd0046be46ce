//! Quest domain: shipping quests and the milestone chain.
//!
//! Shipping quests only ever progress from the daily settlement; the
//! milestone chain re-checks itself whenever progression or skills change.

pub mod milestones;

use bevy::prelude::*;

use crate::shared::*;

pub use milestones::{check_milestones, milestone_title, MilestoneStep};

pub struct QuestPlugin;

impl Plugin for QuestPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<QuestCompletedEvent>()
            .add_event::<FlagUnlockedEvent>()
            .add_systems(
                Update,
                (
                    advance_milestones.run_if(
                        resource_changed::<Progression>.or(resource_changed::<Skills>),
                    ),
                    announce_flags,
                    announce_quests,
                )
                    .chain(),
            );
    }
}

// ─── Quest log ────────────────────────────────────────────────────────────────

impl Quest {
    pub fn new(id: &str, title: &str, required: &[(ItemId, u32)]) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            required: required.iter().copied().collect(),
            shipped: Default::default(),
        }
    }

    pub fn is_satisfied(&self) -> bool {
        self.required
            .iter()
            .all(|(item, need)| self.shipped.get(item).copied().unwrap_or(0) >= *need)
    }
}

impl QuestLog {
    /// Activates a quest unless it is already active or was completed.
    pub fn add(&mut self, quest: Quest) -> bool {
        if self.completed.contains(&quest.id) || self.active.iter().any(|q| q.id == quest.id) {
            return false;
        }
        self.active.push(quest);
        true
    }

    /// Credits shipped units to every active quest that asks for them.
    pub fn record_shipped(&mut self, shipped: &[(ItemId, u32)]) {
        for quest in &mut self.active {
            for (item, qty) in shipped {
                if quest.required.contains_key(item) {
                    *quest.shipped.entry(*item).or_insert(0) += qty;
                }
            }
        }
    }

    /// Moves every satisfied quest to the completed set and returns
    /// `(id, title)` for each.
    pub fn evaluate(&mut self) -> Vec<(String, String)> {
        let (done, still_active): (Vec<Quest>, Vec<Quest>) =
            self.active.drain(..).partition(Quest::is_satisfied);
        self.active = still_active;
        done.into_iter()
            .map(|quest| {
                self.completed.insert(quest.id.clone());
                (quest.id, quest.title)
            })
            .collect()
    }
}

// ─── Systems ──────────────────────────────────────────────────────────────────

fn advance_milestones(
    mut progression: ResMut<Progression>,
    skills: Res<Skills>,
    mut flags: EventWriter<FlagUnlockedEvent>,
    mut toasts: EventWriter<ToastEvent>,
) {
    // Checking must not itself count as a change, or this would re-run forever.
    let steps = check_milestones(progression.bypass_change_detection(), &skills);
    if steps.is_empty() {
        return;
    }
    progression.set_changed();
    for step in steps {
        info!("[Quests] Milestone {:?} done, unlocked {:?}", step.completed, step.unlocked);
        if step.newly_set {
            flags.send(FlagUnlockedEvent { flag: step.unlocked });
        }
        if let Some(next) = step.next {
            toasts.send(ToastEvent::long(format!("New Quest: {}", milestone_title(next))));
        }
    }
}

fn announce_flags(mut events: EventReader<FlagUnlockedEvent>, mut toasts: EventWriter<ToastEvent>) {
    for ev in events.read() {
        toasts.send(ToastEvent::long(format!("Unlocked: {}", ev.flag.label())));
    }
}

fn announce_quests(
    mut events: EventReader<QuestCompletedEvent>,
    mut toasts: EventWriter<ToastEvent>,
) {
    for ev in events.read() {
        info!("[Quests] Completed {}", ev.quest_id);
        toasts.send(ToastEvent::long(format!("Quest complete: {}", ev.title)));
    }
}
