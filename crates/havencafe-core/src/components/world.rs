//! World components: zones, weather, seasons, and resource spawn points

use crate::components::{Ability, DragonStage};
use havencafe_logic::ingredients::{self, ItemCategory};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Explorable areas, unlocked as the dragon grows and the story advances.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    #[default]
    CafeGrounds,
    MeadowFields,
    ForestDepths,
    CoastalShore,
}

impl Zone {
    pub const ALL: [Zone; 4] = [
        Zone::CafeGrounds,
        Zone::MeadowFields,
        Zone::ForestDepths,
        Zone::CoastalShore,
    ];

    /// Minimum dragon stage required to explore this zone.
    pub fn required_stage(&self) -> DragonStage {
        match self {
            Zone::CafeGrounds => DragonStage::Egg,
            Zone::MeadowFields => DragonStage::Hatchling,
            Zone::ForestDepths => DragonStage::Juvenile,
            Zone::CoastalShore => DragonStage::Adolescent,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Zone::CafeGrounds => "Cafe Grounds",
            Zone::MeadowFields => "Meadow Fields",
            Zone::ForestDepths => "Forest Depths",
            Zone::CoastalShore => "Coastal Shore",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Season {
    #[default]
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl Season {
    pub const ALL: [Season; 4] = [Season::Spring, Season::Summer, Season::Autumn, Season::Winter];

    pub fn display_name(&self) -> &'static str {
        match self {
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Autumn => "Autumn",
            Season::Winter => "Winter",
        }
    }

    /// Ingredient category favored by the season (+1 spawn quality).
    pub fn quality_bonus(&self, category: ItemCategory) -> u8 {
        let favored = match self {
            Season::Spring => ItemCategory::Spice,
            Season::Summer => ItemCategory::Fruit,
            Season::Autumn => ItemCategory::Vegetable,
            Season::Winter => ItemCategory::Special,
        };
        u8::from(category == favored)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weather {
    #[default]
    Sunny,
    Cloudy,
    Rainy,
    Stormy,
}

impl Weather {
    /// Respawn-chance multiplier for rare resources.
    pub fn forage_multiplier(&self) -> f64 {
        match self {
            Weather::Sunny => 1.0,
            Weather::Cloudy => 1.1,
            Weather::Rainy => 1.3,
            Weather::Stormy => 1.5,
        }
    }

    /// Ingredient category favored by the weather (+1 spawn quality).
    pub fn quality_bonus(&self, category: ItemCategory) -> u8 {
        let favored: &[ItemCategory] = match self {
            Weather::Sunny => &[ItemCategory::Special],
            Weather::Cloudy => &[ItemCategory::Vegetable],
            Weather::Rainy => &[ItemCategory::Spice, ItemCategory::Vegetable, ItemCategory::Seafood],
            Weather::Stormy => &[ItemCategory::Special, ItemCategory::Seafood],
        };
        u8::from(favored.contains(&category))
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Weather::Sunny => "Sunny",
            Weather::Cloudy => "Cloudy",
            Weather::Rainy => "Rainy",
            Weather::Stormy => "Stormy",
        }
    }
}

/// Spawn rarity tier: how often a point yields, and how long it sleeps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rarity {
    #[default]
    Common,
    Uncommon,
    Rare,
}

impl Rarity {
    /// Daily probability of respawning once the timer has elapsed.
    pub fn spawn_chance(&self) -> f64 {
        match self {
            Rarity::Common => 1.0,
            Rarity::Uncommon => 0.5,
            Rarity::Rare => 0.25,
        }
    }

    /// Days between depletion and the first respawn roll.
    pub fn respawn_days(&self) -> u8 {
        match self {
            Rarity::Common => 1,
            Rarity::Uncommon => 2,
            Rarity::Rare => 3,
        }
    }

    fn quantity(&self, rng: &mut impl Rng) -> u8 {
        match self {
            Rarity::Common => rng.gen_range(2..=3),
            Rarity::Uncommon => rng.gen_range(1..=2),
            Rarity::Rare => 1,
        }
    }
}

/// Item quality multiplier for a 1-5 star spawn quality: 0.7-1.3.
pub fn quality_factor(quality: u8) -> f32 {
    (quality.clamp(1, 5) as f32 - 3.0) * 0.15 + 1.0
}

/// One successful gather.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Harvest {
    pub ingredient: String,
    pub quality: u8,
}

/// A fixed world location yielding a gatherable ingredient on a
/// rarity-weighted respawn timer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnPoint {
    pub id: String,
    pub name: String,
    pub zone: Zone,
    pub x: i32,
    pub y: i32,
    pub ingredient: String,
    pub rarity: Rarity,
    /// Dragon ability needed to gather here, if any.
    pub requires: Option<Ability>,
    pub available: bool,
    pub days_until_respawn: u8,
    /// Quality of the current spawn, 1-5.
    pub quality: u8,
    pub quantity: u8,
}

impl SpawnPoint {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        zone: Zone,
        position: (i32, i32),
        ingredient: impl Into<String>,
        rarity: Rarity,
        requires: Option<Ability>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            zone,
            x: position.0,
            y: position.1,
            ingredient: ingredient.into(),
            rarity,
            requires,
            available: false,
            days_until_respawn: 0,
            quality: 3,
            quantity: 1,
        }
    }

    pub fn can_gather(&self, abilities: &[Ability]) -> bool {
        if !self.available {
            return false;
        }
        match self.requires {
            Some(required) => abilities.contains(&required),
            None => true,
        }
    }

    /// Take one item from this point. Depletion starts the respawn timer.
    pub fn gather(&mut self, abilities: &[Ability]) -> Option<Harvest> {
        if !self.can_gather(abilities) {
            return None;
        }
        let harvest = Harvest {
            ingredient: self.ingredient.clone(),
            quality: self.quality,
        };
        self.quantity = self.quantity.saturating_sub(1);
        if self.quantity == 0 {
            self.available = false;
            self.days_until_respawn = self.rarity.respawn_days();
        }
        Some(harvest)
    }

    /// Put a harvest back (inventory was full).
    pub fn return_harvest(&mut self) {
        self.quantity += 1;
        self.available = true;
    }

    /// Daily respawn roll. Returns true if the point came back.
    pub fn try_respawn(&mut self, weather: Weather, season: Season, rng: &mut impl Rng) -> bool {
        if self.available {
            return false;
        }
        if self.days_until_respawn > 0 {
            self.days_until_respawn -= 1;
            return false;
        }

        let mut chance = self.rarity.spawn_chance();
        if self.rarity == Rarity::Rare {
            chance = (chance * weather.forage_multiplier()).min(1.0);
        }
        if !rng.gen_bool(chance) {
            return false;
        }

        self.available = true;
        self.quality = self.roll_quality(weather, season, rng);
        self.quantity = self.rarity.quantity(rng);
        true
    }

    fn roll_quality(&self, weather: Weather, season: Season, rng: &mut impl Rng) -> u8 {
        let mut quality = rng.gen_range(2i8..=4);
        if let Some(def) = ingredients::get(&self.ingredient) {
            quality += season.quality_bonus(def.category) as i8;
            quality += weather.quality_bonus(def.category) as i8;
        }
        quality += rng.gen_range(-1i8..=1);
        quality.clamp(1, 5) as u8
    }

    /// Make the point immediately gatherable (world setup and tests).
    pub fn force_spawn(&mut self, quality: u8, quantity: u8) {
        self.available = true;
        self.quality = quality.clamp(1, 5);
        self.quantity = quantity.max(1);
        self.days_until_respawn = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn test_point(rarity: Rarity) -> SpawnPoint {
        let mut point = SpawnPoint::new(
            "cg_berry_1",
            "Berry Bush",
            Zone::CafeGrounds,
            (8, 10),
            "wild_berry",
            rarity,
            None,
        );
        point.force_spawn(3, 2);
        point
    }

    #[test]
    fn test_gather_depletes_and_times_respawn() {
        let mut point = test_point(Rarity::Uncommon);
        assert!(point.gather(&[]).is_some());
        assert!(point.available);
        assert!(point.gather(&[]).is_some());
        assert!(!point.available);
        assert_eq!(point.days_until_respawn, 2);
        assert!(point.gather(&[]).is_none());
    }

    #[test]
    fn test_ability_gate() {
        let mut point = test_point(Rarity::Common);
        point.requires = Some(Ability::BurrowFetch);
        assert!(point.gather(&[]).is_none());
        assert!(point.gather(&[Ability::BurrowFetch]).is_some());
    }

    #[test]
    fn test_common_respawns_after_timer() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut point = test_point(Rarity::Common);
        point.gather(&[]);
        point.gather(&[]);
        assert!(!point.available);

        // Day 1: timer ticks down, no roll yet
        assert!(!point.try_respawn(Weather::Sunny, Season::Spring, &mut rng));
        // Day 2: common points respawn with certainty
        assert!(point.try_respawn(Weather::Sunny, Season::Spring, &mut rng));
        assert!(point.available);
        assert!((1..=5).contains(&point.quality));
        assert!((2..=3).contains(&point.quantity));
    }

    #[test]
    fn test_rare_respawn_weather_boosted() {
        let mut rng = StdRng::seed_from_u64(5);
        let trials = 2000;
        let mut sunny = 0;
        let mut stormy = 0;
        for _ in 0..trials {
            let mut point = test_point(Rarity::Rare);
            point.available = false;
            point.days_until_respawn = 0;
            if point.try_respawn(Weather::Sunny, Season::Spring, &mut rng) {
                sunny += 1;
            }
            let mut point = test_point(Rarity::Rare);
            point.available = false;
            point.days_until_respawn = 0;
            if point.try_respawn(Weather::Stormy, Season::Spring, &mut rng) {
                stormy += 1;
            }
        }
        assert!(stormy > sunny, "storms should boost rare respawns");
    }

    #[test]
    fn test_quality_factor_range() {
        assert!((quality_factor(1) - 0.7).abs() < 0.001);
        assert!((quality_factor(3) - 1.0).abs() < 0.001);
        assert!((quality_factor(5) - 1.3).abs() < 0.001);
    }

    #[test]
    fn test_zone_stage_gates() {
        assert_eq!(Zone::CafeGrounds.required_stage(), DragonStage::Egg);
        assert!(Zone::CoastalShore.required_stage() > Zone::MeadowFields.required_stage());
    }
}
