//! Dragon components: life stages, stats, diet color, abilities

use havencafe_logic::constants::{
    DRAGON_ACTIVE_REGEN_FACTOR, DRAGON_ADOLESCENT_DAYS, DRAGON_BOND_MAX, DRAGON_COLOR_SHIFT_RATE,
    DRAGON_EGG_DAYS, DRAGON_FEED_BOND_BONUS, DRAGON_FEED_HAPPINESS_BONUS,
    DRAGON_FEED_HUNGER_RESTORE, DRAGON_HAPPINESS_DECAY, DRAGON_HAPPINESS_WARNING,
    DRAGON_HATCHLING_DAYS, DRAGON_HUNGER_DECAY, DRAGON_HUNGER_WARNING, DRAGON_JUVENILE_DAYS,
    DRAGON_NAME_DEFAULT, DRAGON_NAME_MAX_LENGTH, DRAGON_PET_BOND, DRAGON_PET_HAPPINESS,
    DRAGON_STAMINA_LOW, DRAGON_STAMINA_REGEN, DRAGON_STAT_MAX,
};
use serde::{Deserialize, Serialize};

/// Life phases of the dragon.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DragonStage {
    #[default]
    Egg,
    Hatchling,
    Juvenile,
    Adolescent,
    Adult,
}

impl DragonStage {
    /// Stage for an age in days (1-based).
    pub fn from_age_days(days: u32) -> Self {
        let hatchling_end = DRAGON_EGG_DAYS + DRAGON_HATCHLING_DAYS;
        let juvenile_end = hatchling_end + DRAGON_JUVENILE_DAYS;
        let adolescent_end = juvenile_end + DRAGON_ADOLESCENT_DAYS;

        if days <= DRAGON_EGG_DAYS {
            DragonStage::Egg
        } else if days <= hatchling_end {
            DragonStage::Hatchling
        } else if days <= juvenile_end {
            DragonStage::Juvenile
        } else if days <= adolescent_end {
            DragonStage::Adolescent
        } else {
            DragonStage::Adult
        }
    }

    /// Stamina cap grows as the dragon does.
    pub fn max_stamina(&self) -> f32 {
        match self {
            DragonStage::Egg | DragonStage::Hatchling | DragonStage::Juvenile => 100.0,
            DragonStage::Adolescent => 125.0,
            DragonStage::Adult => 150.0,
        }
    }

    /// Abilities available at this stage (cumulative).
    pub fn abilities(&self) -> &'static [Ability] {
        use Ability::*;
        match self {
            DragonStage::Egg => &[],
            DragonStage::Hatchling => &[BurrowFetch, SniffTrack],
            DragonStage::Juvenile => &[BurrowFetch, SniffTrack, RockSmash, CreatureScare],
            DragonStage::Adolescent => &[
                BurrowFetch,
                SniffTrack,
                RockSmash,
                CreatureScare,
                EmberBreath,
                FireBreath,
            ],
            DragonStage::Adult => &[
                BurrowFetch,
                SniffTrack,
                RockSmash,
                CreatureScare,
                EmberBreath,
                FireBreath,
                FlightScout,
                FireStream,
            ],
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            DragonStage::Egg => "Egg",
            DragonStage::Hatchling => "Hatchling",
            DragonStage::Juvenile => "Juvenile",
            DragonStage::Adolescent => "Adolescent",
            DragonStage::Adult => "Adult",
        }
    }
}

/// Active dragon abilities, each with a one-time stamina cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ability {
    /// Dig up buried items
    BurrowFetch,
    /// Find hidden resources
    SniffTrack,
    /// Break rocks for minerals
    RockSmash,
    /// Frighten hostile creatures
    CreatureScare,
    /// Light torches, clear brambles
    EmberBreath,
    /// Cook items, clear obstacles
    FireBreath,
    /// Reveal distant resources
    FlightScout,
    /// Clear major obstacles
    FireStream,
}

impl Ability {
    pub fn stamina_cost(&self) -> f32 {
        match self {
            Ability::BurrowFetch => 20.0,
            Ability::SniffTrack => 15.0,
            Ability::RockSmash => 30.0,
            Ability::CreatureScare => 20.0,
            Ability::EmberBreath => 25.0,
            Ability::FireBreath => 40.0,
            Ability::FlightScout => 50.0,
            Ability::FireStream => 40.0,
        }
    }
}

/// RGB deviation from the base dragon color, shifted by diet over time.
/// Each channel is -1.0 to 1.0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DietColor {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
}

impl DietColor {
    /// Blend toward a food's color influence (channels 0.0-1.0) at the
    /// given rate.
    pub fn blend(&mut self, food: [f32; 3], rate: f32) {
        self.red = (self.red * (1.0 - rate) + (food[0] - 0.5) * 2.0 * rate).clamp(-1.0, 1.0);
        self.green = (self.green * (1.0 - rate) + (food[1] - 0.5) * 2.0 * rate).clamp(-1.0, 1.0);
        self.blue = (self.blue * (1.0 - rate) + (food[2] - 0.5) * 2.0 * rate).clamp(-1.0, 1.0);
    }

    /// Integer RGB shift for tinting, max +/-50 per channel.
    pub fn shift(&self) -> [i32; 3] {
        [
            (self.red * 50.0) as i32,
            (self.green * 50.0) as i32,
            (self.blue * 50.0) as i32,
        ]
    }
}

/// A meal offered to the dragon - quality scales the stat effects and the
/// color influence nudges the diet color.
#[derive(Debug, Clone, Copy)]
pub struct Meal {
    pub quality: u8,
    pub color_influence: [f32; 3],
}

impl Meal {
    /// Effect multiplier: 3-star food is baseline, 1-star weak, 5-star rich.
    pub fn quality_factor(&self) -> f32 {
        0.7 + 0.15 * (self.quality.clamp(1, 5) - 1) as f32
    }
}

/// Derived emotional state, for front ends and staff dialogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mood {
    Incubating,
    Happy,
    Content,
    Hungry,
    Sad,
    Tired,
    Neutral,
}

/// Errors from renaming the dragon.
#[derive(Debug, PartialEq, Eq)]
pub enum NameError {
    Empty,
    TooLong,
}

impl std::fmt::Display for NameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NameError::Empty => write!(f, "Name cannot be empty"),
            NameError::TooLong => {
                write!(f, "Name cannot exceed {} characters", DRAGON_NAME_MAX_LENGTH)
            }
        }
    }
}

impl std::error::Error for NameError {}

/// The companion dragon. One per world.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dragon {
    pub name: String,
    /// Total game hours alive.
    pub age_hours: f64,
    pub stage: DragonStage,
    pub hatched: bool,
    /// 0-100; low hunger means the dragon is starving.
    pub hunger: f32,
    /// 0-100.
    pub happiness: f32,
    /// 0 to stage max (100-150).
    pub stamina: f32,
    /// Lifetime bond accumulation, 0-500.
    pub bond: u32,
    pub color: DietColor,
    pub resting: bool,
    pub times_fed_today: u32,
}

impl Dragon {
    /// A freshly laid egg.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            age_hours: 0.0,
            stage: DragonStage::Egg,
            hatched: false,
            hunger: DRAGON_STAT_MAX,
            happiness: DRAGON_STAT_MAX,
            stamina: DRAGON_STAT_MAX,
            bond: 0,
            color: DietColor::default(),
            resting: false,
            times_fed_today: 0,
        }
    }

    /// Age in days, 1-based.
    pub fn age_days(&self) -> u32 {
        (self.age_hours / 24.0) as u32 + 1
    }

    /// Advance age and stats by elapsed game hours. Returns the stage
    /// transition if one occurred.
    pub fn advance(&mut self, hours: f32) -> Option<(DragonStage, DragonStage)> {
        self.age_hours += hours as f64;

        let old_stage = self.stage;
        self.stage = DragonStage::from_age_days(self.age_days());
        if self.stage != DragonStage::Egg {
            self.hatched = true;
        }

        // Eggs don't get hungry
        if self.stage != DragonStage::Egg {
            self.decay_stats(hours);
        }

        (old_stage != self.stage).then_some((old_stage, self.stage))
    }

    fn decay_stats(&mut self, hours: f32) {
        self.hunger = (self.hunger - DRAGON_HUNGER_DECAY * hours).max(0.0);

        // Hungry dragons grow unhappy twice as fast
        let mut happiness_decay = DRAGON_HAPPINESS_DECAY;
        if self.hunger < DRAGON_HUNGER_WARNING {
            happiness_decay *= 2.0;
        }
        self.happiness = (self.happiness - happiness_decay * hours).max(0.0);

        let regen = if self.resting {
            DRAGON_STAMINA_REGEN
        } else {
            DRAGON_STAMINA_REGEN * DRAGON_ACTIVE_REGEN_FACTOR
        };
        self.stamina = (self.stamina + regen * hours).clamp(0.0, self.stage.max_stamina());
    }

    /// Feed the dragon. Eggs can't eat.
    pub fn feed(&mut self, meal: &Meal) -> bool {
        if self.stage == DragonStage::Egg {
            return false;
        }
        let factor = meal.quality_factor();
        self.hunger = (self.hunger + DRAGON_FEED_HUNGER_RESTORE * factor).min(DRAGON_STAT_MAX);
        self.happiness =
            (self.happiness + DRAGON_FEED_HAPPINESS_BONUS * factor).min(DRAGON_STAT_MAX);
        self.bond = (self.bond + DRAGON_FEED_BOND_BONUS).min(DRAGON_BOND_MAX);
        self.color.blend(meal.color_influence, DRAGON_COLOR_SHIFT_RATE);
        self.times_fed_today += 1;
        true
    }

    /// Pet the dragon for happiness and bond. Eggs can't be petted.
    pub fn pet(&mut self) -> bool {
        if self.stage == DragonStage::Egg {
            return false;
        }
        self.happiness = (self.happiness + DRAGON_PET_HAPPINESS).min(DRAGON_STAT_MAX);
        self.bond = (self.bond + DRAGON_PET_BOND).min(DRAGON_BOND_MAX);
        true
    }

    pub fn abilities(&self) -> &'static [Ability] {
        self.stage.abilities()
    }

    pub fn can_use_ability(&self, ability: Ability) -> bool {
        self.abilities().contains(&ability) && self.stamina >= ability.stamina_cost()
    }

    /// Use an ability, consuming stamina. Fails if locked or too tired.
    pub fn use_ability(&mut self, ability: Ability) -> bool {
        if !self.can_use_ability(ability) {
            return false;
        }
        self.stamina -= ability.stamina_cost();
        true
    }

    pub fn is_hungry(&self) -> bool {
        self.hunger < DRAGON_HUNGER_WARNING
    }

    pub fn is_unhappy(&self) -> bool {
        self.happiness < DRAGON_HAPPINESS_WARNING
    }

    pub fn is_tired(&self) -> bool {
        self.stamina < DRAGON_STAMINA_LOW
    }

    pub fn mood(&self) -> Mood {
        if self.stage == DragonStage::Egg {
            Mood::Incubating
        } else if self.happiness >= 80.0 && self.hunger >= 50.0 {
            Mood::Happy
        } else if self.hunger < 20.0 {
            Mood::Hungry
        } else if self.happiness < 20.0 {
            Mood::Sad
        } else if self.stamina < 20.0 {
            Mood::Tired
        } else if self.happiness >= 50.0 {
            Mood::Content
        } else {
            Mood::Neutral
        }
    }

    /// Progress through the current life stage, 0.0-1.0. Adults show bond
    /// progress instead.
    pub fn stage_progress(&self) -> f32 {
        let days = self.age_days();
        let hatchling_end = DRAGON_EGG_DAYS + DRAGON_HATCHLING_DAYS;
        let juvenile_end = hatchling_end + DRAGON_JUVENILE_DAYS;

        let fraction = |days_in: u32, span: u32| (days_in as f32 / span as f32).min(1.0);
        match self.stage {
            DragonStage::Egg => fraction(days, DRAGON_EGG_DAYS),
            DragonStage::Hatchling => fraction(days - DRAGON_EGG_DAYS, DRAGON_HATCHLING_DAYS),
            DragonStage::Juvenile => fraction(days - hatchling_end, DRAGON_JUVENILE_DAYS),
            DragonStage::Adolescent => fraction(days - juvenile_end, DRAGON_ADOLESCENT_DAYS),
            DragonStage::Adult => (self.bond as f32 / DRAGON_BOND_MAX as f32).min(1.0),
        }
    }

    /// Validate a prospective name: trimmed, non-empty, bounded length.
    pub fn validate_name(name: &str) -> Result<String, NameError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(NameError::Empty);
        }
        if trimmed.chars().count() > DRAGON_NAME_MAX_LENGTH {
            return Err(NameError::TooLong);
        }
        Ok(trimmed.to_string())
    }

    pub fn rename(&mut self, name: &str) -> Result<(), NameError> {
        self.name = Self::validate_name(name)?;
        Ok(())
    }

    /// Called at the start of each new day.
    pub fn reset_daily_counters(&mut self) {
        self.times_fed_today = 0;
    }
}

impl Default for Dragon {
    fn default() -> Self {
        Self::new(DRAGON_NAME_DEFAULT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_from_age() {
        assert_eq!(DragonStage::from_age_days(1), DragonStage::Egg);
        assert_eq!(DragonStage::from_age_days(2), DragonStage::Hatchling);
        assert_eq!(DragonStage::from_age_days(3), DragonStage::Hatchling);
        assert_eq!(DragonStage::from_age_days(4), DragonStage::Juvenile);
        assert_eq!(DragonStage::from_age_days(6), DragonStage::Adolescent);
        assert_eq!(DragonStage::from_age_days(10), DragonStage::Adult);
        assert_eq!(DragonStage::from_age_days(100), DragonStage::Adult);
    }

    #[test]
    fn test_egg_stats_frozen() {
        let mut dragon = Dragon::default();
        dragon.advance(12.0);
        assert_eq!(dragon.stage, DragonStage::Egg);
        assert!((dragon.hunger - DRAGON_STAT_MAX).abs() < f32::EPSILON);
    }

    #[test]
    fn test_hatching_reported() {
        let mut dragon = Dragon::default();
        // Advance past day 1
        let change = dragon.advance(25.0);
        assert_eq!(change, Some((DragonStage::Egg, DragonStage::Hatchling)));
        assert!(dragon.hatched);
    }

    #[test]
    fn test_hunger_decay_and_feed() {
        let mut dragon = Dragon::default();
        dragon.advance(25.0); // hatch
        dragon.advance(10.0);
        assert!(dragon.hunger < DRAGON_STAT_MAX);

        let before = dragon.hunger;
        let fed = dragon.feed(&Meal {
            quality: 3,
            color_influence: [0.5, 0.5, 0.5],
        });
        assert!(fed);
        assert!(dragon.hunger > before);
        assert_eq!(dragon.times_fed_today, 1);
        assert_eq!(dragon.bond, DRAGON_FEED_BOND_BONUS);
    }

    #[test]
    fn test_cannot_feed_or_pet_egg() {
        let mut dragon = Dragon::default();
        assert!(!dragon.feed(&Meal {
            quality: 5,
            color_influence: [0.5, 0.5, 0.5],
        }));
        assert!(!dragon.pet());
    }

    #[test]
    fn test_hungry_dragon_unhappier_faster() {
        let mut fed = Dragon::default();
        fed.advance(25.0);
        let mut starved = fed.clone();
        starved.hunger = 10.0;

        fed.advance(5.0);
        starved.advance(5.0);
        assert!(starved.happiness < fed.happiness);
    }

    #[test]
    fn test_ability_gating() {
        let mut dragon = Dragon::default();
        assert!(!dragon.can_use_ability(Ability::BurrowFetch));

        dragon.advance(25.0); // hatchling
        assert!(dragon.can_use_ability(Ability::BurrowFetch));
        assert!(!dragon.can_use_ability(Ability::FireBreath));

        let stamina = dragon.stamina;
        assert!(dragon.use_ability(Ability::BurrowFetch));
        assert!((dragon.stamina - (stamina - 20.0)).abs() < 0.001);

        dragon.stamina = 5.0;
        assert!(!dragon.use_ability(Ability::BurrowFetch));
    }

    #[test]
    fn test_diet_color_shifts_toward_food() {
        let mut dragon = Dragon::default();
        dragon.advance(25.0);
        for _ in 0..50 {
            dragon.feed(&Meal {
                quality: 3,
                color_influence: [1.0, 0.0, 0.5],
            });
        }
        assert!(dragon.color.red > 0.5);
        assert!(dragon.color.green < -0.5);
        assert!(dragon.color.blue.abs() < 0.2);
        assert!(dragon.color.shift()[0] > 25);
    }

    #[test]
    fn test_name_validation() {
        assert_eq!(Dragon::validate_name("  Ember  ").unwrap(), "Ember");
        assert_eq!(Dragon::validate_name("   "), Err(NameError::Empty));
        assert_eq!(
            Dragon::validate_name("An Exceedingly Long Dragon Name"),
            Err(NameError::TooLong)
        );
    }

    #[test]
    fn test_bond_clamped() {
        let mut dragon = Dragon::default();
        dragon.advance(25.0);
        for _ in 0..200 {
            dragon.pet();
        }
        assert_eq!(dragon.bond, DRAGON_BOND_MAX);
    }

    #[test]
    fn test_stamina_capped_by_stage() {
        let mut dragon = Dragon::default();
        dragon.advance(24.0 * 20.0); // adult
        assert_eq!(dragon.stage, DragonStage::Adult);
        dragon.resting = true;
        dragon.advance(100.0);
        assert!(dragon.stamina <= DragonStage::Adult.max_stamina());
    }
}
