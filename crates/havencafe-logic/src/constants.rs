//! Balance constants shared by the simulation engine.
//!
//! Values tuned for a 30-real-seconds-per-game-hour pace: a full day plays
//! out in 12 real minutes, a season in about an hour and a half.

// ── Time ────────────────────────────────────────────────────────────────

/// Real seconds per game hour at time scale 1.0.
pub const REAL_SECONDS_PER_GAME_HOUR: f32 = 30.0;
pub const GAME_HOURS_PER_DAY: f64 = 24.0;
pub const DAYS_PER_SEASON: u32 = 7;

/// Hour the player wakes after sleeping.
pub const MORNING_START: f64 = 6.0;
pub const AFTERNOON_START: f64 = 12.0;
pub const EVENING_START: f64 = 18.0;

// ── Cafe schedule ───────────────────────────────────────────────────────

pub const MORNING_PREP_START: f64 = 9.0;
pub const MORNING_SERVICE_START: f64 = 10.0;
pub const MORNING_SERVICE_END: f64 = 14.0;
pub const MORNING_CLEANUP_END: f64 = 15.0;

pub const EVENING_PREP_START: f64 = 16.0;
pub const EVENING_SERVICE_START: f64 = 17.0;
pub const EVENING_SERVICE_END: f64 = 21.0;
pub const EVENING_CLEANUP_END: f64 = 22.0;

pub const CAFE_MAX_MENU_ITEMS: usize = 6;
pub const CAFE_TABLE_SEATS: usize = 8;
pub const CAFE_SKIP_DAY_PENALTY: u32 = 10;
pub const REPUTATION_DAILY_DECAY: u32 = 2;

// ── Dragon ──────────────────────────────────────────────────────────────

pub const DRAGON_STAT_MAX: f32 = 100.0;
pub const DRAGON_BOND_MAX: u32 = 500;

/// Days spent in each pre-adult stage (egg day 1, adult from day 10).
pub const DRAGON_EGG_DAYS: u32 = 1;
pub const DRAGON_HATCHLING_DAYS: u32 = 2;
pub const DRAGON_JUVENILE_DAYS: u32 = 2;
pub const DRAGON_ADOLESCENT_DAYS: u32 = 4;

/// Stat decay per game hour.
pub const DRAGON_HUNGER_DECAY: f32 = 3.0;
pub const DRAGON_HAPPINESS_DECAY: f32 = 1.0;
pub const DRAGON_STAMINA_REGEN: f32 = 8.0;
/// Fraction of the resting regen rate applied while active.
pub const DRAGON_ACTIVE_REGEN_FACTOR: f32 = 0.3;

pub const DRAGON_HUNGER_WARNING: f32 = 40.0;
pub const DRAGON_HAPPINESS_WARNING: f32 = 40.0;
pub const DRAGON_STAMINA_LOW: f32 = 25.0;

pub const DRAGON_FEED_HUNGER_RESTORE: f32 = 35.0;
pub const DRAGON_FEED_HAPPINESS_BONUS: f32 = 12.0;
pub const DRAGON_FEED_BOND_BONUS: u32 = 8;
pub const DRAGON_PET_HAPPINESS: f32 = 18.0;
pub const DRAGON_PET_BOND: u32 = 5;

/// How far each meal pulls the diet color toward the food's influence.
pub const DRAGON_COLOR_SHIFT_RATE: f32 = 0.05;
pub const DRAGON_NAME_MAX_LENGTH: usize = 20;
pub const DRAGON_NAME_DEFAULT: &str = "Dragon";

// ── Customers ───────────────────────────────────────────────────────────

/// Base patience in game hours, with uniform variation either side.
pub const CUSTOMER_PATIENCE_BASE: f32 = 2.0;
pub const CUSTOMER_PATIENCE_VARIATION: f32 = 0.5;
pub const CUSTOMER_EATING_TIME: f32 = 0.5;

/// Customers per game hour at zero reputation.
pub const CUSTOMER_SPAWN_BASE: f32 = 2.0;
/// Spawn rate bonus per reputation point.
pub const CUSTOMER_SPAWN_REP_BONUS: f32 = 0.01;

// ── Staff ───────────────────────────────────────────────────────────────

pub const STAFF_MORALE_MAX: f32 = 100.0;
pub const STAFF_MORALE_START: f32 = 70.0;
pub const STAFF_MORALE_DECAY_PER_HOUR: f32 = 1.0;
pub const STAFF_TALK_MORALE_BOOST: f32 = 15.0;
/// Game hours between pep talks.
pub const STAFF_TALK_COOLDOWN: f32 = 2.0;
pub const STAFF_MIN_EFFICIENCY: f32 = 0.5;
pub const STAFF_MAX_EFFICIENCY: f32 = 1.2;
pub const STAFF_MISTAKE_BASE_CHANCE: f64 = 0.05;
pub const STAFF_LOW_MORALE_THRESHOLD: f32 = 30.0;

// ── Items & inventory ───────────────────────────────────────────────────

pub const INVENTORY_CARRIED_SLOTS: usize = 20;
pub const INVENTORY_STORAGE_SLOTS: usize = 100;
pub const INVENTORY_FRIDGE_SLOTS: usize = 30;
pub const ITEM_STACK_SIZE: u32 = 10;
pub const STARTING_GOLD: u32 = 150;

// ── Quality ─────────────────────────────────────────────────────────────

pub const QUALITY_MIN: u8 = 1;
pub const QUALITY_MAX: u8 = 5;

// ── Recipe mastery ──────────────────────────────────────────────────────

pub const RECIPE_MASTERY_COOK_COUNT: u32 = 10;
pub const RECIPE_MASTERY_PERFECT_COUNT: u32 = 5;

// ── Affinity ────────────────────────────────────────────────────────────

pub const AFFINITY_MAX: u8 = 100;
pub const AFFINITY_COOK_BASE: i8 = 5;
pub const AFFINITY_COOK_QUALITY_BONUS: i8 = 5;
pub const AFFINITY_COOK_FAVORITE: i8 = 15;
pub const AFFINITY_COOK_LIKED: i8 = 8;
pub const AFFINITY_COOK_DISLIKED: i8 = -5;
pub const AFFINITY_DIALOGUE_POSITIVE: i8 = 8;
pub const AFFINITY_DIALOGUE_NEGATIVE: i8 = -5;
pub const AFFINITY_GIFT_MIN: i8 = 3;
pub const AFFINITY_GIFT_MAX: i8 = 15;

/// Affinity thresholds for relationship unlocks.
pub const AFFINITY_UNLOCK_PERSONAL_STORY: u8 = 25;
pub const AFFINITY_UNLOCK_SECRET_RECIPE: u8 = 50;
pub const AFFINITY_UNLOCK_SPECIAL_EVENT: u8 = 75;
