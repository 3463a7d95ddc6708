//! People components: customers, staff, and story characters

use havencafe_logic::affinity::{self, AffinityLevel, RecipePreference};
use havencafe_logic::constants::{
    CUSTOMER_EATING_TIME, STAFF_MORALE_DECAY_PER_HOUR, STAFF_MORALE_MAX, STAFF_MORALE_START,
    STAFF_TALK_COOLDOWN, STAFF_TALK_MORALE_BOOST,
};
use havencafe_logic::pricing;
use havencafe_logic::recipes::DishCategory;
use havencafe_logic::satisfaction::{self, ServiceReview};
use havencafe_logic::staffing::{self, StaffRole, StaffTrait};
use rand::Rng;
use serde::{Deserialize, Serialize};

// ── Customers ───────────────────────────────────────────────────────────

/// Where a customer is in the service flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CustomerState {
    /// Waiting to be seated
    Waiting,
    /// At a table, waiting for a server
    Seated,
    /// Placing an order
    Ordering,
    /// Order placed, waiting for food
    WaitingFood,
    /// Eating
    Eating,
    /// About to leave
    Leaving,
}

/// A customer's order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub category: DishCategory,
    pub recipe: String,
    /// Sale price, fixed when the dish is served.
    pub price: u32,
    pub quality_received: u8,
    pub fulfilled: bool,
}

/// A cafe patron. Patience drains while they wait; satisfaction decides
/// their tip and the reputation they leave behind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    /// Stable id, assigned by the patronage counter (entity ids don't
    /// survive save/load).
    pub id: u32,
    pub name: String,
    /// Expected dish quality: 2 easygoing, 3 average, 4 demanding.
    pub expectation: u8,
    /// Patience in game hours.
    pub patience_max: f32,
    pub patience_remaining: f32,
    pub state: CustomerState,
    pub order: Option<Order>,
    pub satisfaction: f32,
    pub time_waiting: f32,
    pub time_eating: f32,
    pub table: Option<u8>,
}

/// Settlement when a customer walks out.
#[derive(Debug, Clone)]
pub struct Departure {
    pub tip: u32,
    pub reputation_change: i32,
    pub satisfaction: f32,
}

/// Why serving a dish to a customer was rejected.
#[derive(Debug, PartialEq, Eq)]
pub enum ServeError {
    NotWaitingForFood,
    NoOrder,
}

impl std::fmt::Display for ServeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServeError::NotWaitingForFood => write!(f, "customer is not waiting for food"),
            ServeError::NoOrder => write!(f, "customer has not ordered"),
        }
    }
}

impl std::error::Error for ServeError {}

impl Customer {
    pub fn new(id: u32, name: impl Into<String>, expectation: u8, patience: f32) -> Self {
        Self {
            id,
            name: name.into(),
            expectation,
            patience_max: patience,
            patience_remaining: patience,
            state: CustomerState::Waiting,
            order: None,
            satisfaction: 3.0,
            time_waiting: 0.0,
            time_eating: 0.0,
            table: None,
        }
    }

    pub fn is_waiting(&self) -> bool {
        matches!(
            self.state,
            CustomerState::Waiting | CustomerState::Seated | CustomerState::WaitingFood
        )
    }

    pub fn seat(&mut self, table: u8) {
        self.table = Some(table);
        self.state = CustomerState::Seated;
        self.time_waiting = 0.0;
    }

    /// Place an order for a menu item.
    pub fn place_order(&mut self, category: DishCategory, recipe: impl Into<String>) {
        self.order = Some(Order {
            category,
            recipe: recipe.into(),
            price: 0,
            quality_received: 0,
            fulfilled: false,
        });
        self.state = CustomerState::WaitingFood;
    }

    /// Serve the ordered dish. Computes satisfaction and starts eating.
    pub fn serve(
        &mut self,
        quality: u8,
        price: u32,
        staff_efficiency: f32,
    ) -> Result<f32, ServeError> {
        if self.state != CustomerState::WaitingFood {
            return Err(ServeError::NotWaitingForFood);
        }
        let order = self.order.as_mut().ok_or(ServeError::NoOrder)?;
        order.fulfilled = true;
        order.quality_received = quality;
        order.price = price;

        self.satisfaction = satisfaction::score(&ServiceReview {
            dish_quality: quality,
            expectation: self.expectation,
            wait_hours: self.time_waiting,
            patience_hours: self.patience_max,
            staff_efficiency,
        });
        self.state = CustomerState::Eating;
        self.time_eating = 0.0;
        Ok(self.satisfaction)
    }

    /// Tick waiting/eating timers. Returns a departure when the customer
    /// runs out of patience or finishes their meal.
    pub fn tick(&mut self, dt_hours: f32) -> Option<Departure> {
        match self.state {
            CustomerState::Seated | CustomerState::WaitingFood => {
                self.time_waiting += dt_hours;
                self.patience_remaining -= dt_hours;
                (self.patience_remaining <= 0.0).then(|| self.depart_angry())
            }
            CustomerState::Eating => {
                self.time_eating += dt_hours;
                (self.time_eating >= CUSTOMER_EATING_TIME).then(|| self.finish_eating())
            }
            _ => None,
        }
    }

    /// Leave without being served: no tip, reputation hit.
    pub fn depart_angry(&mut self) -> Departure {
        self.state = CustomerState::Leaving;
        self.satisfaction = 1.0;
        Departure {
            tip: 0,
            reputation_change: pricing::reputation_change(1.0),
            satisfaction: 1.0,
        }
    }

    /// Finish the meal and settle up.
    pub fn finish_eating(&mut self) -> Departure {
        self.state = CustomerState::Leaving;
        let price = self.order.as_ref().map_or(0, |order| order.price);
        Departure {
            tip: pricing::tip(price, self.satisfaction),
            reputation_change: pricing::reputation_change(self.satisfaction),
            satisfaction: self.satisfaction,
        }
    }

    /// A parting remark matching the customer's satisfaction.
    pub fn feedback_line(&self, rng: &mut impl Rng) -> String {
        let options: &[&str] = if self.satisfaction >= 4.5 {
            &[
                "Absolutely delicious! I'll be back!",
                "Best meal I've had in ages!",
                "Simply wonderful!",
            ]
        } else if self.satisfaction >= 4.0 {
            &[
                "Very tasty, thank you!",
                "That hit the spot!",
                "Good food, good service.",
            ]
        } else if self.satisfaction >= 3.0 {
            &["It was okay.", "Not bad.", "Decent meal."]
        } else {
            &[
                "Not what I expected...",
                "Could be better.",
                "Hmm, disappointing.",
            ]
        };
        let line = options[rng.gen_range(0..options.len())];
        format!("{}: '{}'", self.name, line)
    }
}

// ── Staff ───────────────────────────────────────────────────────────────

/// Kinds of work a staff member can be assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskKind {
    Serve,
    Greet,
    Cook,
    Prep,
    Clean,
    Restock,
    Idle,
}

impl TaskKind {
    /// Which roles may take this task.
    pub fn allowed_for(&self, role: StaffRole) -> bool {
        match role {
            StaffRole::Server => matches!(self, TaskKind::Serve | TaskKind::Greet | TaskKind::Idle),
            StaffRole::Chef => matches!(self, TaskKind::Cook | TaskKind::Prep | TaskKind::Idle),
            StaffRole::Busser => {
                matches!(self, TaskKind::Clean | TaskKind::Restock | TaskKind::Idle)
            }
        }
    }
}

/// A task in progress.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffTask {
    pub kind: TaskKind,
    /// Recipe id for cook tasks.
    pub target: Option<String>,
    /// Customer the task is for, if any.
    pub customer: Option<u32>,
    /// 0.0-1.0 completion.
    pub progress: f32,
    /// Base duration in game hours.
    pub duration: f32,
}

impl StaffTask {
    pub fn is_complete(&self) -> bool {
        self.progress >= 1.0
    }
}

/// Outcome of one staff update.
#[derive(Debug, Clone, Default)]
pub struct StaffTurn {
    pub completed: Option<StaffTask>,
    pub mistake: Option<String>,
}

/// Result of a pep talk.
#[derive(Debug, Clone)]
pub struct TalkOutcome {
    pub morale_gain: f32,
    pub new_morale: f32,
    pub message: String,
}

/// A cafe worker with morale, a trait, and a current task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Staff {
    pub id: String,
    pub name: String,
    pub role: StaffRole,
    pub trait_: StaffTrait,
    pub morale: f32,
    pub task: Option<StaffTask>,
    pub time_since_talk: f32,
    pub tasks_completed: u32,
    pub mistakes_made: u32,
}

impl Staff {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        role: StaffRole,
        trait_: StaffTrait,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            role,
            trait_,
            morale: STAFF_MORALE_START,
            task: None,
            // Fresh staff can be talked to right away
            time_since_talk: STAFF_TALK_COOLDOWN,
            tasks_completed: 0,
            mistakes_made: 0,
        }
    }

    pub fn efficiency(&self) -> f32 {
        staffing::efficiency(self.morale, self.trait_)
    }

    pub fn quality_bonus(&self) -> f32 {
        staffing::quality_bonus(self.morale, self.trait_)
    }

    pub fn decay_morale(&mut self, hours: f32) {
        let decay = hours * STAFF_MORALE_DECAY_PER_HOUR * self.trait_.morale_decay_factor();
        self.morale = (self.morale - decay).max(0.0);
    }

    pub fn boost_morale(&mut self, amount: f32) {
        self.morale = (self.morale + amount).min(STAFF_MORALE_MAX);
    }

    /// Overnight morale recovery: 10-20 depending on remaining morale.
    pub fn overnight_recovery(&mut self) {
        let recovery = 10.0 + (self.morale / STAFF_MORALE_MAX) * 10.0;
        self.boost_morale(recovery);
    }

    pub fn can_talk(&self) -> bool {
        self.time_since_talk >= STAFF_TALK_COOLDOWN
    }

    /// Pep talk: boosts morale, varied by trait. Fails during cooldown.
    pub fn talk(&mut self, rng: &mut impl Rng) -> Option<TalkOutcome> {
        if !self.can_talk() {
            return None;
        }
        let (boost, message) = match self.trait_ {
            StaffTrait::Enthusiastic => (
                STAFF_TALK_MORALE_BOOST + rng.gen_range(0.0..5.0),
                format!("{} beams at your encouragement!", self.name),
            ),
            StaffTrait::Skilled => (
                STAFF_TALK_MORALE_BOOST - rng.gen_range(0.0..5.0),
                format!("{} nods appreciatively at your feedback.", self.name),
            ),
            StaffTrait::Lazy => (
                STAFF_TALK_MORALE_BOOST + rng.gen_range(0.0..8.0),
                format!("{} seems more motivated after your pep talk.", self.name),
            ),
        };
        self.boost_morale(boost);
        self.time_since_talk = 0.0;
        Some(TalkOutcome {
            morale_gain: boost,
            new_morale: self.morale,
            message,
        })
    }

    pub fn is_busy(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_complete())
    }

    /// Assign a task if the role allows it.
    pub fn assign_task(&mut self, task: StaffTask) -> bool {
        if !task.kind.allowed_for(self.role) {
            return false;
        }
        self.task = Some(task);
        true
    }

    /// Progress the current task. Mistakes knock progress back and are
    /// reported with a trait-flavored message.
    pub fn tick(&mut self, dt_hours: f32, rng: &mut impl Rng) -> StaffTurn {
        let mut turn = StaffTurn::default();
        self.time_since_talk += dt_hours;

        let Some(task) = self.task.as_mut() else {
            return turn;
        };

        let rate = staffing::efficiency(self.morale, self.trait_) / task.duration.max(0.01);
        task.progress += rate * dt_hours;

        let mistake_odds =
            (staffing::mistake_chance(self.morale, self.trait_) * dt_hours as f64).min(1.0);
        if rng.gen_bool(mistake_odds) {
            task.progress = (task.progress - 0.3).max(0.0);
            self.mistakes_made += 1;
            turn.mistake = Some(self.mistake_message(rng));
        }

        if self.task.as_ref().is_some_and(|task| task.is_complete()) {
            self.tasks_completed += 1;
            turn.completed = self.task.take();
        }
        turn
    }

    fn mistake_message(&self, rng: &mut impl Rng) -> String {
        let options: &[&str] = match self.trait_ {
            StaffTrait::Enthusiastic => &[
                "accidentally knocked something over!",
                "was moving too fast and made an error.",
            ],
            StaffTrait::Skilled => &[
                "refused to make an unfamiliar dish.",
                "insisted on doing it 'the right way' and lost time.",
            ],
            StaffTrait::Lazy => &[
                "was caught slacking off!",
                "took an unscheduled break.",
            ],
        };
        format!("{} {}", self.name, options[rng.gen_range(0..options.len())])
    }
}

// ── Story characters ────────────────────────────────────────────────────

/// A recurring story character with a 0-100 affinity toward the player.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoryCharacter {
    pub id: String,
    pub name: String,
    pub affinity: u8,
    pub met: bool,
    pub favorite_recipes: Vec<String>,
    pub liked_recipes: Vec<String>,
    pub disliked_recipes: Vec<String>,
    pub favorite_gifts: Vec<String>,
}

impl StoryCharacter {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            affinity: 0,
            met: false,
            favorite_recipes: Vec::new(),
            liked_recipes: Vec::new(),
            disliked_recipes: Vec::new(),
            favorite_gifts: Vec::new(),
        }
    }

    pub fn level(&self) -> AffinityLevel {
        AffinityLevel::from_affinity(self.affinity)
    }

    pub fn preference_for(&self, recipe: &str) -> RecipePreference {
        if self.favorite_recipes.iter().any(|id| id == recipe) {
            RecipePreference::Favorite
        } else if self.liked_recipes.iter().any(|id| id == recipe) {
            RecipePreference::Liked
        } else if self.disliked_recipes.iter().any(|id| id == recipe) {
            RecipePreference::Disliked
        } else {
            RecipePreference::Neutral
        }
    }

    /// Apply a signed affinity change; returns the new level if it rose.
    pub fn add_affinity(&mut self, change: i8) -> Option<AffinityLevel> {
        let before = self.level();
        self.affinity = affinity::apply_change(self.affinity, change);
        let after = self.level();
        (after > before).then_some(after)
    }

    /// Affinity for cooking this recipe at this quality.
    pub fn cook_bonus(&self, recipe: &str, quality: u8) -> i8 {
        affinity::cook_bonus(self.preference_for(recipe), quality)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_customer_service_flow() {
        let mut customer = Customer::new(1, "Quinn", 3, 2.0);
        assert_eq!(customer.state, CustomerState::Waiting);

        customer.seat(2);
        assert_eq!(customer.state, CustomerState::Seated);

        customer.place_order(DishCategory::Main, "herb_soup");
        assert_eq!(customer.state, CustomerState::WaitingFood);

        let satisfaction = customer.serve(4, 50, 1.0).unwrap();
        assert!(satisfaction > 3.0);
        assert_eq!(customer.state, CustomerState::Eating);

        // Eat for long enough
        let departure = customer.tick(0.6).expect("should finish eating");
        assert_eq!(customer.state, CustomerState::Leaving);
        assert!(departure.tip > 0);
    }

    #[test]
    fn test_serve_out_of_order_rejected() {
        let mut customer = Customer::new(1, "Quinn", 3, 2.0);
        assert_eq!(customer.serve(3, 50, 1.0), Err(ServeError::NotWaitingForFood));
    }

    #[test]
    fn test_patience_expiry() {
        let mut customer = Customer::new(1, "Quinn", 3, 1.0);
        customer.seat(0);
        assert!(customer.tick(0.5).is_none());
        let departure = customer.tick(0.6).expect("patience should run out");
        assert_eq!(departure.tip, 0);
        assert!(departure.reputation_change < 0);
        assert_eq!(customer.state, CustomerState::Leaving);
    }

    #[test]
    fn test_staff_task_progress_and_completion() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut staff = Staff::new("bruno", "Bruno", StaffRole::Chef, StaffTrait::Skilled);
        assert!(staff.assign_task(StaffTask {
            kind: TaskKind::Cook,
            target: Some("herb_soup".into()),
            customer: Some(1),
            progress: 0.0,
            duration: 0.3,
        }));
        assert!(staff.is_busy());

        let mut completed = None;
        for _ in 0..100 {
            let turn = staff.tick(0.05, &mut rng);
            if turn.completed.is_some() {
                completed = turn.completed;
                break;
            }
        }
        let task = completed.expect("task should finish");
        assert_eq!(task.target.as_deref(), Some("herb_soup"));
        assert_eq!(staff.tasks_completed, 1);
        assert!(!staff.is_busy());
    }

    #[test]
    fn test_role_gates_tasks() {
        let mut server = Staff::new("melody", "Melody", StaffRole::Server, StaffTrait::Enthusiastic);
        assert!(!server.assign_task(StaffTask {
            kind: TaskKind::Cook,
            target: None,
            customer: None,
            progress: 0.0,
            duration: 1.0,
        }));
        assert!(server.assign_task(StaffTask {
            kind: TaskKind::Serve,
            target: None,
            customer: None,
            progress: 0.0,
            duration: 1.0,
        }));
    }

    #[test]
    fn test_talk_cooldown() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut staff = Staff::new("sage", "Sage", StaffRole::Busser, StaffTrait::Lazy);
        staff.morale = 40.0;

        let outcome = staff.talk(&mut rng).expect("first talk works");
        assert!(outcome.morale_gain >= STAFF_TALK_MORALE_BOOST);
        assert!(staff.talk(&mut rng).is_none());

        staff.time_since_talk = STAFF_TALK_COOLDOWN;
        assert!(staff.talk(&mut rng).is_some());
    }

    #[test]
    fn test_morale_decay_lazy_faster() {
        let mut lazy = Staff::new("sage", "Sage", StaffRole::Busser, StaffTrait::Lazy);
        let mut keen = Staff::new("melody", "Melody", StaffRole::Server, StaffTrait::Enthusiastic);
        lazy.decay_morale(10.0);
        keen.decay_morale(10.0);
        assert!(lazy.morale < keen.morale);
    }

    #[test]
    fn test_character_affinity_levels() {
        let mut character = StoryCharacter::new("iris", "Iris");
        character.favorite_recipes.push("berry_tart".into());

        assert_eq!(character.cook_bonus("berry_tart", 1), 15);
        assert_eq!(character.cook_bonus("herb_soup", 5), 10);

        let mut reached = None;
        for _ in 0..3 {
            if let Some(level) = character.add_affinity(15) {
                reached = Some(level);
            }
        }
        assert_eq!(reached, Some(AffinityLevel::Friendly));
        assert_eq!(character.affinity, 45);
    }
}
