use bevy::prelude::*;
use crate::shared::*;

// ═══════════════════════════════════════════════════════════════════════
// RESOURCES
// ═══════════════════════════════════════════════════════════════════════

pub const MAX_TOASTS: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct ActiveToast {
    pub message: String,
    pub remaining: f32,
}

/// Notices currently on screen, oldest first.
#[derive(Resource, Debug, Clone, Default)]
pub struct Toasts {
    pub active: Vec<ActiveToast>,
}

impl Toasts {
    /// Adds a notice, dropping the oldest once more than three are showing.
    pub fn push(&mut self, message: impl Into<String>, duration_secs: f32) {
        if self.active.len() >= MAX_TOASTS {
            self.active.remove(0);
        }
        self.active.push(ActiveToast {
            message: message.into(),
            remaining: duration_secs,
        });
    }

    pub fn tick(&mut self, dt: f32) {
        for toast in &mut self.active {
            toast.remaining -= dt;
        }
        self.active.retain(|t| t.remaining > 0.0);
    }

    pub fn messages(&self) -> Vec<String> {
        self.active.iter().map(|t| t.message.clone()).collect()
    }
}

// ═══════════════════════════════════════════════════════════════════════
// SYSTEMS
// ═══════════════════════════════════════════════════════════════════════

pub fn expire_toasts(time: Res<Time>, mut toasts: ResMut<Toasts>) {
    if !toasts.active.is_empty() {
        toasts.tick(time.delta_secs());
    }
}

pub fn handle_toast_events(mut events: EventReader<ToastEvent>, mut toasts: ResMut<Toasts>) {
    for event in events.read() {
        debug!("[Ui] toast: {}", event.message);
        toasts.push(event.message.clone(), event.duration_secs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oldest_dropped_past_three() {
        let mut toasts = Toasts::default();
        for msg in ["a", "b", "c", "d"] {
            toasts.push(msg, 1.6);
        }
        assert_eq!(toasts.messages(), vec!["b", "c", "d"]);
    }

    #[test]
    fn test_expiry() {
        let mut toasts = Toasts::default();
        toasts.push("short", 1.0);
        toasts.push("long", 3.0);
        toasts.tick(1.5);
        assert_eq!(toasts.messages(), vec!["long"]);
        toasts.tick(1.5);
        assert!(toasts.active.is_empty());
    }
}
