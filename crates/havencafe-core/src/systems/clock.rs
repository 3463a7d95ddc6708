//! Game clock - day/night cycle, days, and seasons

use crate::components::Season;
use havencafe_logic::constants::{
    AFTERNOON_START, DAYS_PER_SEASON, EVENING_START, GAME_HOURS_PER_DAY, MORNING_START,
    REAL_SECONDS_PER_GAME_HOUR,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
    Night,
}

/// Transitions produced by advancing the clock, in occurrence order.
#[derive(Debug, Clone, PartialEq)]
pub enum ClockEvent {
    DayStarted(u32),
    SeasonChanged(Season),
    PeriodChanged { from: TimeOfDay, to: TimeOfDay },
}

/// The in-game clock. 30 real seconds make one game hour; 7-day seasons
/// give a 28-day year.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Clock {
    /// Hour of day, 0.0-23.999...
    hour: f64,
    /// Day number, 1-based.
    day: u32,
    season_index: usize,
    /// Total game hours since the start of the game.
    total_hours: f64,
    time_scale: f32,
    paused: bool,
}

impl Default for Clock {
    fn default() -> Self {
        Self {
            hour: 8.0, // games start at 8:00 AM
            day: 1,
            season_index: 0,
            total_hours: 0.0,
            time_scale: 1.0,
            paused: false,
        }
    }
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by real seconds, converting through the time scale.
    /// Returns the transitions that occurred, in order.
    pub fn advance(&mut self, real_seconds: f32) -> Vec<ClockEvent> {
        if self.paused {
            return Vec::new();
        }
        let game_hours =
            (real_seconds * self.time_scale) as f64 / REAL_SECONDS_PER_GAME_HOUR as f64;
        self.advance_hours(game_hours)
    }

    /// Advance by game hours directly.
    pub fn advance_hours(&mut self, game_hours: f64) -> Vec<ClockEvent> {
        let mut events = Vec::new();
        let previous_period = self.time_of_day();

        self.hour += game_hours;
        self.total_hours += game_hours;

        while self.hour >= GAME_HOURS_PER_DAY {
            self.hour -= GAME_HOURS_PER_DAY;
            self.roll_day(&mut events);
        }

        let period = self.time_of_day();
        if period != previous_period {
            events.push(ClockEvent::PeriodChanged {
                from: previous_period,
                to: period,
            });
        }
        events
    }

    fn roll_day(&mut self, events: &mut Vec<ClockEvent>) {
        self.day += 1;
        events.push(ClockEvent::DayStarted(self.day));

        if (self.day - 1) % DAYS_PER_SEASON == 0 {
            self.season_index = (self.season_index + 1) % Season::ALL.len();
            events.push(ClockEvent::SeasonChanged(self.season()));
        }
    }

    /// Jump to 6:00 AM of the next day (sleeping).
    pub fn sleep_to_morning(&mut self) -> Vec<ClockEvent> {
        let mut events = Vec::new();
        let previous_period = self.time_of_day();

        self.total_hours += (GAME_HOURS_PER_DAY - self.hour) + MORNING_START;
        self.hour = MORNING_START;
        self.roll_day(&mut events);

        let period = self.time_of_day();
        if period != previous_period {
            events.push(ClockEvent::PeriodChanged {
                from: previous_period,
                to: period,
            });
        }
        events
    }

    pub fn time_of_day(&self) -> TimeOfDay {
        if (MORNING_START..AFTERNOON_START).contains(&self.hour) {
            TimeOfDay::Morning
        } else if (AFTERNOON_START..EVENING_START).contains(&self.hour) {
            TimeOfDay::Afternoon
        } else if self.hour >= EVENING_START {
            TimeOfDay::Evening
        } else {
            TimeOfDay::Night
        }
    }

    pub fn hour(&self) -> f64 {
        self.hour
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn season(&self) -> Season {
        Season::ALL[self.season_index % Season::ALL.len()]
    }

    /// Day within the current season, 1-based.
    pub fn day_in_season(&self) -> u32 {
        (self.day - 1) % DAYS_PER_SEASON + 1
    }

    pub fn total_hours(&self) -> f64 {
        self.total_hours
    }

    /// "8:00 AM" / "2:30 PM" style display.
    pub fn formatted_time(&self) -> String {
        let hours = self.hour as u32;
        let minutes = ((self.hour - hours as f64) * 60.0) as u32;
        let suffix = if hours < 12 { "AM" } else { "PM" };
        let display = match hours % 12 {
            0 => 12,
            h => h,
        };
        format!("{}:{:02} {}", display, minutes, suffix)
    }

    pub fn is_daytime(&self) -> bool {
        matches!(self.time_of_day(), TimeOfDay::Morning | TimeOfDay::Afternoon)
    }

    pub fn is_nighttime(&self) -> bool {
        self.time_of_day() == TimeOfDay::Night
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale.clamp(0.1, 10.0);
    }

    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Test hook: set the hour directly.
    pub fn set_time(&mut self, hour: f64) {
        self.hour = hour.clamp(0.0, 23.999);
    }

    /// Test hook: set the day directly.
    pub fn set_day(&mut self, day: u32) {
        self.day = day.max(1);
        self.season_index = ((day - 1) / DAYS_PER_SEASON) as usize % Season::ALL.len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hour_conversion() {
        let mut clock = Clock::new();
        // 30 real seconds = 1 game hour
        clock.advance(30.0);
        assert!((clock.hour() - 9.0).abs() < 0.001);
    }

    #[test]
    fn test_day_rollover() {
        let mut clock = Clock::new();
        let events = clock.advance_hours(16.5);
        assert!(events.contains(&ClockEvent::DayStarted(2)));
        assert!((clock.hour() - 0.5).abs() < 0.001);
        assert_eq!(clock.day(), 2);
    }

    #[test]
    fn test_season_change_every_seven_days() {
        let mut clock = Clock::new();
        assert_eq!(clock.season(), Season::Spring);

        let mut season_changes = 0;
        for _ in 0..28 {
            for event in clock.advance_hours(24.0) {
                if let ClockEvent::SeasonChanged(_) = event {
                    season_changes += 1;
                }
            }
        }
        assert_eq!(season_changes, 4);
        assert_eq!(clock.season(), Season::Spring);
    }

    #[test]
    fn test_period_boundaries() {
        let mut clock = Clock::new();
        clock.set_time(5.9);
        assert_eq!(clock.time_of_day(), TimeOfDay::Night);
        let events = clock.advance_hours(0.2);
        assert!(events.iter().any(|e| matches!(
            e,
            ClockEvent::PeriodChanged {
                to: TimeOfDay::Morning,
                ..
            }
        )));
        clock.set_time(13.0);
        assert_eq!(clock.time_of_day(), TimeOfDay::Afternoon);
        clock.set_time(19.0);
        assert_eq!(clock.time_of_day(), TimeOfDay::Evening);
    }

    #[test]
    fn test_sleep_to_morning() {
        let mut clock = Clock::new();
        clock.set_time(22.0);
        let events = clock.sleep_to_morning();
        assert!(events.contains(&ClockEvent::DayStarted(2)));
        assert!((clock.hour() - 6.0).abs() < 0.001);
    }

    #[test]
    fn test_time_scale() {
        let mut clock = Clock::new();
        clock.set_time_scale(2.0);
        clock.advance(30.0);
        assert!((clock.hour() - 10.0).abs() < 0.001);

        clock.set_time_scale(100.0);
        assert!((clock.time_scale() - 10.0).abs() < 0.001);
    }

    #[test]
    fn test_pause_stops_time() {
        let mut clock = Clock::new();
        clock.pause();
        assert!(clock.advance(1000.0).is_empty());
        assert!((clock.hour() - 8.0).abs() < 0.001);
        clock.resume();
        clock.advance(30.0);
        assert!(clock.hour() > 8.0);
    }

    #[test]
    fn test_formatted_time() {
        let mut clock = Clock::new();
        assert_eq!(clock.formatted_time(), "8:00 AM");
        clock.set_time(14.5);
        assert_eq!(clock.formatted_time(), "2:30 PM");
        clock.set_time(0.0);
        assert_eq!(clock.formatted_time(), "12:00 AM");
    }

    #[test]
    fn test_day_in_season() {
        let mut clock = Clock::new();
        assert_eq!(clock.day_in_season(), 1);
        clock.set_day(7);
        assert_eq!(clock.day_in_season(), 7);
        clock.set_day(8);
        assert_eq!(clock.day_in_season(), 1);
        assert_eq!(clock.season(), Season::Summer);
    }
}
