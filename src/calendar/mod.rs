//! Calendar domain: the in-game clock.
//!
//! Responsible for:
//! - Advancing clock minutes from real delta time while the world runs
//! - The lights-out wrap at 2:00 AM (a clamp, never a day roll)
//! - Rolling the calendar forward one day when the player sleeps
//! - Opening-day weather and forecast
//!
//! The day roll itself is only ever called from the daily tick in
//! `crate::day_end`, which owns the ordering of the whole batch.

pub mod weather;

use bevy::prelude::*;
use rand::Rng;

use crate::shared::*;

pub struct CalendarPlugin;

impl Plugin for CalendarPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, roll_opening_weather).add_systems(
            Update,
            tick_time.run_if(clock_running),
        );
    }
}

// ─── Run Conditions ───────────────────────────────────────────────────────────

fn clock_running(state: Res<State<GameState>>) -> bool {
    state.get().advances_clock()
}

// ─── Clock operations ─────────────────────────────────────────────────────────

impl Calendar {
    /// Adds `delta_secs * minutes_per_second` clock minutes. Fractions carry
    /// over between calls. Reaching 26:00 clamps the clock back to 2:00 and
    /// returns true; the day does not change.
    pub fn advance(&mut self, delta_secs: f32, minutes_per_second: f32) -> bool {
        if delta_secs <= 0.0 || minutes_per_second <= 0.0 {
            return false;
        }
        self.pending_minutes += delta_secs * minutes_per_second;
        let whole = self.pending_minutes.floor();
        self.pending_minutes -= whole;
        self.minutes += whole as u32;

        if self.minutes >= LIGHTS_OUT_MINUTES {
            self.minutes = LIGHTS_OUT_RESET_MINUTES;
            return true;
        }
        false
    }

    /// Moves to the next morning and rolls its weather. Returns true when
    /// the season changed.
    pub fn roll_day(&mut self, world: &mut impl Rng) -> bool {
        self.day += 1;
        let mut season_changed = false;
        if self.day > DAYS_PER_SEASON {
            self.day = 1;
            self.season = self.season.next();
            season_changed = true;
        }
        self.minutes = DAY_START_MINUTES;
        self.pending_minutes = 0.0;
        self.weekday = self.weekday.next();

        let (today, forecast) = weather::roll_weather(self.season, self.day, world);
        self.weather = today;
        self.forecast = forecast;
        season_changed
    }
}

// ─── Systems ──────────────────────────────────────────────────────────────────

fn roll_opening_weather(mut calendar: ResMut<Calendar>, mut rng: ResMut<WorldRng>) {
    let (today, forecast) = weather::roll_weather(calendar.season, calendar.day, &mut rng.0);
    calendar.weather = today;
    calendar.forecast = forecast;
    info!(
        "[Calendar] Day {} {} begins, {} (forecast {})",
        calendar.day,
        calendar.season.label(),
        today.label(),
        forecast.label()
    );
}

fn tick_time(
    time: Res<Time>,
    config: Res<GameConfig>,
    mut calendar: ResMut<Calendar>,
    mut toasts: EventWriter<ToastEvent>,
) {
    if calendar.advance(time.delta_secs(), config.minutes_per_second) {
        info!("[Calendar] Lights out on day {}", calendar.day);
        toasts.send(ToastEvent::long("It's 2 AM. You should get some sleep."));
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_advance_accumulates_fractions() {
        let mut cal = Calendar::default();
        // 1/60 s at 8 min/s is 0.133 minutes: nothing visible yet.
        cal.advance(1.0 / 60.0, 8.0);
        assert_eq!(cal.minutes, DAY_START_MINUTES);
        for _ in 0..59 {
            cal.advance(1.0 / 60.0, 8.0);
        }
        // One real second in total.
        assert!((DAY_START_MINUTES + 7..=DAY_START_MINUTES + 8).contains(&cal.minutes));
    }

    #[test]
    fn test_advance_wraps_to_two_am_without_day_roll() {
        let mut cal = Calendar::default();
        cal.minutes = LIGHTS_OUT_MINUTES - 1;
        let wrapped = cal.advance(1.0, 6.0);
        assert!(wrapped);
        assert_eq!(cal.minutes, LIGHTS_OUT_RESET_MINUTES);
        assert_eq!(cal.day, 1);
    }

    #[test]
    fn test_advance_ignores_zero_delta() {
        let mut cal = Calendar::default();
        assert!(!cal.advance(0.0, 8.0));
        assert_eq!(cal, Calendar::default());
    }

    #[test]
    fn test_roll_day_resets_clock_and_weekday() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut cal = Calendar::default();
        cal.minutes = 22 * 60;
        cal.weekday = DayOfWeek::Sunday;
        let season_changed = cal.roll_day(&mut rng);
        assert!(!season_changed);
        assert_eq!(cal.day, 2);
        assert_eq!(cal.minutes, DAY_START_MINUTES);
        assert_eq!(cal.weekday, DayOfWeek::Monday);
        assert_eq!(cal.forecast, weather::forecast_weather(2, Season::Spring));
    }

    #[test]
    fn test_roll_day_wraps_season() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut cal = Calendar {
            day: DAYS_PER_SEASON,
            season: Season::Winter,
            ..Calendar::default()
        };
        assert!(cal.roll_day(&mut rng));
        assert_eq!(cal.day, 1);
        assert_eq!(cal.season, Season::Spring);
    }

    #[test]
    fn test_spring_to_summer_after_28_days() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut cal = Calendar::default();
        for _ in 0..DAYS_PER_SEASON {
            cal.roll_day(&mut rng);
        }
        assert_eq!(cal.season, Season::Summer);
        assert_eq!(cal.day, 1);
        assert_eq!(cal.weekday, DayOfWeek::from_index(28));
    }
}
