//! Cafe management - service periods, menu, reputation, daily stats

use havencafe_logic::constants::{
    CAFE_MAX_MENU_ITEMS, CAFE_SKIP_DAY_PENALTY, EVENING_CLEANUP_END, EVENING_PREP_START,
    EVENING_SERVICE_END, EVENING_SERVICE_START, MORNING_CLEANUP_END, MORNING_PREP_START,
    MORNING_SERVICE_END, MORNING_SERVICE_START, REPUTATION_DAILY_DECAY,
};
use havencafe_logic::reputation::{self, ReputationLevel};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CafeState {
    #[default]
    Closed,
    Prep,
    Service,
    Cleanup,
}

/// A scheduled cafe opening window with its own prep/service/cleanup
/// sub-state-machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServicePeriod {
    Morning,
    Evening,
}

impl ServicePeriod {
    pub fn prep_start(&self) -> f64 {
        match self {
            ServicePeriod::Morning => MORNING_PREP_START,
            ServicePeriod::Evening => EVENING_PREP_START,
        }
    }

    pub fn service_start(&self) -> f64 {
        match self {
            ServicePeriod::Morning => MORNING_SERVICE_START,
            ServicePeriod::Evening => EVENING_SERVICE_START,
        }
    }

    pub fn service_end(&self) -> f64 {
        match self {
            ServicePeriod::Morning => MORNING_SERVICE_END,
            ServicePeriod::Evening => EVENING_SERVICE_END,
        }
    }

    pub fn cleanup_end(&self) -> f64 {
        match self {
            ServicePeriod::Morning => MORNING_CLEANUP_END,
            ServicePeriod::Evening => EVENING_CLEANUP_END,
        }
    }
}

/// Statistics for one day of service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceStats {
    pub customers_served: u32,
    pub dishes_sold: u32,
    pub revenue: u32,
    pub tips: u32,
    pub satisfaction_sum: f32,
    pub satisfaction_count: u32,
}

impl ServiceStats {
    pub fn average_satisfaction(&self) -> f32 {
        if self.satisfaction_count == 0 {
            0.0
        } else {
            self.satisfaction_sum / self.satisfaction_count as f32
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CafeEvent {
    PrepStarted(ServicePeriod),
    ServiceStarted(ServicePeriod),
    ServiceEnded(ServiceStats),
    CleanupFinished,
}

/// The cafe's operational state machine and day-to-day bookkeeping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CafeManager {
    state: CafeState,
    period: Option<ServicePeriod>,
    /// Today's menu, recipe ids, up to six dishes.
    menu: Vec<String>,
    today: ServiceStats,
    reputation: u32,
    day_skipped: bool,
    services_completed: u32,
}

impl Default for CafeManager {
    fn default() -> Self {
        Self {
            state: CafeState::Closed,
            period: None,
            menu: Vec::new(),
            today: ServiceStats::default(),
            reputation: 0,
            day_skipped: false,
            services_completed: 0,
        }
    }
}

impl CafeManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> CafeState {
        self.state
    }

    pub fn period(&self) -> Option<ServicePeriod> {
        self.period
    }

    pub fn is_open(&self) -> bool {
        self.state == CafeState::Service
    }

    /// Derive state from the clock hour and emit transition events.
    pub fn update(&mut self, hour: f64) -> Vec<CafeEvent> {
        let (new_state, new_period) = if self.day_skipped {
            (CafeState::Closed, None)
        } else {
            Self::state_for_hour(hour)
        };

        let old_state = self.state;
        if old_state == new_state {
            self.period = new_period.or(self.period);
            return Vec::new();
        }
        self.state = new_state;
        if new_period.is_some() {
            self.period = new_period;
        }

        let mut events = Vec::new();
        match (old_state, new_state) {
            (_, CafeState::Prep) => {
                if let Some(period) = self.period {
                    events.push(CafeEvent::PrepStarted(period));
                }
            }
            (CafeState::Prep, CafeState::Service) => {
                if let Some(period) = self.period {
                    events.push(CafeEvent::ServiceStarted(period));
                }
            }
            (CafeState::Service, CafeState::Cleanup) => {
                self.services_completed += 1;
                events.push(CafeEvent::ServiceEnded(self.today.clone()));
            }
            (CafeState::Cleanup, CafeState::Closed) => {
                self.period = None;
                events.push(CafeEvent::CleanupFinished);
            }
            _ => {}
        }
        events
    }

    fn state_for_hour(hour: f64) -> (CafeState, Option<ServicePeriod>) {
        for period in [ServicePeriod::Morning, ServicePeriod::Evening] {
            if (period.prep_start()..period.service_start()).contains(&hour) {
                return (CafeState::Prep, Some(period));
            }
            if (period.service_start()..period.service_end()).contains(&hour) {
                return (CafeState::Service, Some(period));
            }
            if (period.service_end()..period.cleanup_end()).contains(&hour) {
                return (CafeState::Cleanup, Some(period));
            }
        }
        (CafeState::Closed, None)
    }

    /// Open early from prep.
    pub fn start_service(&mut self) -> Option<CafeEvent> {
        if self.state != CafeState::Prep {
            return None;
        }
        self.state = CafeState::Service;
        self.period.map(CafeEvent::ServiceStarted)
    }

    /// Close up early.
    pub fn end_service(&mut self) -> Option<CafeEvent> {
        if self.state != CafeState::Service {
            return None;
        }
        self.state = CafeState::Cleanup;
        self.services_completed += 1;
        Some(CafeEvent::ServiceEnded(self.today.clone()))
    }

    // ── Menu ────────────────────────────────────────────────────────────

    pub fn menu(&self) -> &[String] {
        &self.menu
    }

    pub fn set_menu(&mut self, recipe_ids: Vec<String>) {
        self.menu = recipe_ids;
        self.menu.truncate(CAFE_MAX_MENU_ITEMS);
    }

    pub fn add_to_menu(&mut self, recipe_id: impl Into<String>) -> bool {
        let recipe_id = recipe_id.into();
        if self.menu.contains(&recipe_id) || self.menu.len() >= CAFE_MAX_MENU_ITEMS {
            return false;
        }
        self.menu.push(recipe_id);
        true
    }

    pub fn remove_from_menu(&mut self, recipe_id: &str) -> bool {
        let before = self.menu.len();
        self.menu.retain(|id| id != recipe_id);
        self.menu.len() != before
    }

    pub fn clear_menu(&mut self) {
        self.menu.clear();
    }

    // ── Service tracking ────────────────────────────────────────────────

    pub fn record_sale(&mut self, price: u32, satisfaction: f32) {
        self.today.dishes_sold += 1;
        self.today.revenue += price;
        self.today.satisfaction_sum += satisfaction;
        self.today.satisfaction_count += 1;
    }

    pub fn record_tip(&mut self, tip: u32) {
        self.today.tips += tip;
    }

    pub fn record_customer_served(&mut self) {
        self.today.customers_served += 1;
    }

    pub fn today_stats(&self) -> &ServiceStats {
        &self.today
    }

    // ── Reputation ──────────────────────────────────────────────────────

    pub fn reputation(&self) -> u32 {
        self.reputation
    }

    pub fn add_reputation(&mut self, change: i32) {
        self.reputation = reputation::apply_change(self.reputation, change);
    }

    pub fn reputation_level(&self) -> ReputationLevel {
        ReputationLevel::from_reputation(self.reputation)
    }

    // ── Day management ──────────────────────────────────────────────────

    /// Skip today's services for a reputation penalty. Not allowed once a
    /// service has completed or while one is running.
    pub fn skip_day(&mut self) -> bool {
        if self.services_completed > 0 || self.state == CafeState::Service {
            return false;
        }
        self.day_skipped = true;
        self.state = CafeState::Closed;
        self.period = None;
        self.add_reputation(-(CAFE_SKIP_DAY_PENALTY as i32));
        true
    }

    pub fn was_day_skipped(&self) -> bool {
        self.day_skipped
    }

    /// Reset for a new day. A day with no completed service (and not an
    /// explicit skip, which already paid its penalty) decays reputation.
    pub fn advance_day(&mut self) -> Option<u32> {
        let decay = (self.services_completed == 0 && !self.day_skipped)
            .then_some(REPUTATION_DAILY_DECAY);
        if let Some(amount) = decay {
            self.add_reputation(-(amount as i32));
        }
        self.today = ServiceStats::default();
        self.day_skipped = false;
        self.services_completed = 0;
        self.state = CafeState::Closed;
        self.period = None;
        decay
    }

    /// Hours until the next service starts (0 if one is running).
    pub fn hours_until_service(&self, hour: f64) -> f64 {
        if self.state == CafeState::Service {
            return 0.0;
        }
        for period in [ServicePeriod::Morning, ServicePeriod::Evening] {
            if hour < period.service_start() {
                return period.service_start() - hour;
            }
        }
        // Both services have passed; next is tomorrow morning
        (24.0 - hour) + MORNING_SERVICE_START
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_day_transitions() {
        let mut cafe = CafeManager::new();
        assert_eq!(cafe.state(), CafeState::Closed);

        let events = cafe.update(9.5);
        assert_eq!(events, vec![CafeEvent::PrepStarted(ServicePeriod::Morning)]);

        let events = cafe.update(10.0);
        assert_eq!(events, vec![CafeEvent::ServiceStarted(ServicePeriod::Morning)]);
        assert!(cafe.is_open());

        let events = cafe.update(14.2);
        assert!(matches!(events[0], CafeEvent::ServiceEnded(_)));

        let events = cafe.update(15.0);
        assert_eq!(events, vec![CafeEvent::CleanupFinished]);
        assert_eq!(cafe.state(), CafeState::Closed);

        // Evening period runs its own cycle
        let events = cafe.update(16.5);
        assert_eq!(events, vec![CafeEvent::PrepStarted(ServicePeriod::Evening)]);
        let events = cafe.update(18.0);
        assert_eq!(events, vec![CafeEvent::ServiceStarted(ServicePeriod::Evening)]);
    }

    #[test]
    fn test_skipped_day_stays_closed() {
        let mut cafe = CafeManager::new();
        cafe.add_reputation(50);
        assert!(cafe.skip_day());
        assert_eq!(cafe.reputation(), 40);
        assert!(cafe.update(11.0).is_empty());
        assert_eq!(cafe.state(), CafeState::Closed);
    }

    #[test]
    fn test_cannot_skip_during_service() {
        let mut cafe = CafeManager::new();
        cafe.update(10.5);
        assert!(!cafe.skip_day());
    }

    #[test]
    fn test_cannot_skip_after_service_completed() {
        let mut cafe = CafeManager::new();
        cafe.update(10.5);
        cafe.update(14.5);
        assert!(!cafe.skip_day());
    }

    #[test]
    fn test_menu_capacity_and_duplicates() {
        let mut cafe = CafeManager::new();
        for i in 0..CAFE_MAX_MENU_ITEMS {
            assert!(cafe.add_to_menu(format!("recipe_{}", i)));
        }
        assert!(!cafe.add_to_menu("recipe_extra"));
        assert!(!cafe.add_to_menu("recipe_0"));
        assert!(cafe.remove_from_menu("recipe_0"));
        assert!(!cafe.remove_from_menu("recipe_0"));
        assert!(cafe.add_to_menu("recipe_extra"));
    }

    #[test]
    fn test_stats_accumulate() {
        let mut cafe = CafeManager::new();
        cafe.record_sale(50, 4.0);
        cafe.record_sale(80, 5.0);
        cafe.record_tip(12);
        cafe.record_customer_served();

        let stats = cafe.today_stats();
        assert_eq!(stats.dishes_sold, 2);
        assert_eq!(stats.revenue, 130);
        assert_eq!(stats.tips, 12);
        assert!((stats.average_satisfaction() - 4.5).abs() < 0.001);
    }

    #[test]
    fn test_idle_day_decays_reputation() {
        let mut cafe = CafeManager::new();
        cafe.add_reputation(100);
        assert_eq!(cafe.advance_day(), Some(REPUTATION_DAILY_DECAY));
        assert_eq!(cafe.reputation(), 98);

        // A day with a completed service does not decay
        cafe.update(10.5);
        cafe.update(14.5);
        assert_eq!(cafe.advance_day(), None);
        assert_eq!(cafe.reputation(), 98);

        // A skipped day already paid its penalty
        cafe.skip_day();
        assert_eq!(cafe.advance_day(), None);
    }

    #[test]
    fn test_manual_start_and_end() {
        let mut cafe = CafeManager::new();
        cafe.update(9.2);
        assert!(matches!(
            cafe.start_service(),
            Some(CafeEvent::ServiceStarted(ServicePeriod::Morning))
        ));
        assert!(cafe.is_open());
        assert!(matches!(cafe.end_service(), Some(CafeEvent::ServiceEnded(_))));
        assert_eq!(cafe.state(), CafeState::Cleanup);
        assert!(cafe.end_service().is_none());
    }

    #[test]
    fn test_hours_until_service() {
        let cafe = CafeManager::new();
        assert!((cafe.hours_until_service(8.0) - 2.0).abs() < 0.001);
        assert!((cafe.hours_until_service(15.0) - 2.0).abs() < 0.001);
        assert!((cafe.hours_until_service(23.0) - 11.0).abs() < 0.001);
    }
}
