//! World state - zones, weather rolls, and the daily respawn pass

use crate::components::{DragonStage, Season, SpawnPoint, Weather, Zone};
use hecs::World;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Why the player couldn't travel to a zone.
#[derive(Debug, PartialEq, Eq)]
pub enum TravelError {
    Locked,
    DragonTooYoung(DragonStage),
}

impl std::fmt::Display for TravelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TravelError::Locked => write!(f, "zone is not unlocked yet"),
            TravelError::DragonTooYoung(stage) => {
                write!(f, "the dragon must be at least a {}", stage.display_name())
            }
        }
    }
}

impl std::error::Error for TravelError {}

/// Where the player is and what the sky is doing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldState {
    pub current_zone: Zone,
    pub unlocked_zones: Vec<Zone>,
    pub weather: Weather,
}

impl Default for WorldState {
    fn default() -> Self {
        Self {
            current_zone: Zone::CafeGrounds,
            unlocked_zones: vec![Zone::CafeGrounds, Zone::MeadowFields],
            weather: Weather::Sunny,
        }
    }
}

impl WorldState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_unlocked(&self, zone: Zone) -> bool {
        self.unlocked_zones.contains(&zone)
    }

    /// Unlock a zone (story outcome). Returns true if newly unlocked.
    pub fn unlock_zone(&mut self, zone: Zone) -> bool {
        if self.is_unlocked(zone) {
            return false;
        }
        self.unlocked_zones.push(zone);
        true
    }

    /// Move to a zone if it's unlocked and the dragon is grown enough.
    pub fn travel(&mut self, zone: Zone, dragon_stage: DragonStage) -> Result<(), TravelError> {
        if !self.is_unlocked(zone) {
            return Err(TravelError::Locked);
        }
        if dragon_stage < zone.required_stage() {
            return Err(TravelError::DragonTooYoung(zone.required_stage()));
        }
        self.current_zone = zone;
        Ok(())
    }
}

/// Roll the day's weather from the season's probability table.
pub fn roll_weather(season: Season, rng: &mut impl Rng) -> Weather {
    // (sunny, cloudy, rainy) weights; storms take the remainder
    let (sunny, cloudy, rainy) = match season {
        Season::Spring => (0.35, 0.30, 0.25),
        Season::Summer => (0.50, 0.25, 0.15),
        Season::Autumn => (0.30, 0.32, 0.25),
        Season::Winter => (0.22, 0.40, 0.25),
    };
    let roll: f64 = rng.gen();
    if roll < sunny {
        Weather::Sunny
    } else if roll < sunny + cloudy {
        Weather::Cloudy
    } else if roll < sunny + cloudy + rainy {
        Weather::Rainy
    } else {
        Weather::Stormy
    }
}

/// Daily respawn pass over every spawn point. Returns the ids that came
/// back.
pub fn respawn_system(
    world: &mut World,
    weather: Weather,
    season: Season,
    rng: &mut impl Rng,
) -> Vec<String> {
    let mut respawned = Vec::new();
    for (_, point) in world.query_mut::<&mut SpawnPoint>() {
        if point.try_respawn(weather, season, rng) {
            respawned.push(point.id.clone());
        }
    }
    respawned
}

/// Spawn points in a zone that the dragon can currently gather from.
pub fn gatherable_points(world: &World, zone: Zone, abilities: &[crate::components::Ability]) -> Vec<String> {
    world
        .query::<&SpawnPoint>()
        .iter()
        .filter(|(_, point)| point.zone == zone && point.can_gather(abilities))
        .map(|(_, point)| point.id.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Rarity;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_travel_gates() {
        let mut state = WorldState::new();
        assert_eq!(
            state.travel(Zone::ForestDepths, DragonStage::Adult),
            Err(TravelError::Locked)
        );

        state.unlock_zone(Zone::ForestDepths);
        assert_eq!(
            state.travel(Zone::ForestDepths, DragonStage::Hatchling),
            Err(TravelError::DragonTooYoung(DragonStage::Juvenile))
        );
        assert!(state.travel(Zone::ForestDepths, DragonStage::Juvenile).is_ok());
        assert_eq!(state.current_zone, Zone::ForestDepths);
    }

    #[test]
    fn test_unlock_zone_idempotent() {
        let mut state = WorldState::new();
        assert!(state.unlock_zone(Zone::CoastalShore));
        assert!(!state.unlock_zone(Zone::CoastalShore));
    }

    #[test]
    fn test_weather_distribution_sane() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut counts = [0u32; 4];
        for _ in 0..10_000 {
            match roll_weather(Season::Summer, &mut rng) {
                Weather::Sunny => counts[0] += 1,
                Weather::Cloudy => counts[1] += 1,
                Weather::Rainy => counts[2] += 1,
                Weather::Stormy => counts[3] += 1,
            }
        }
        // Summer is mostly sunny, storms are rare but present
        assert!(counts[0] > counts[1]);
        assert!(counts[3] > 0);
        assert!(counts[3] < counts[0]);
    }

    #[test]
    fn test_respawn_system_sweeps_world() {
        let mut world = World::new();
        let mut rng = StdRng::seed_from_u64(3);
        for i in 0..5 {
            let mut point = SpawnPoint::new(
                format!("p{}", i),
                "Patch",
                Zone::CafeGrounds,
                (i, 0),
                "garden_herb",
                Rarity::Common,
                None,
            );
            point.available = false;
            point.days_until_respawn = 0;
            world.spawn((point,));
        }

        let respawned = respawn_system(&mut world, Weather::Sunny, Season::Spring, &mut rng);
        assert_eq!(respawned.len(), 5);
    }

    #[test]
    fn test_gatherable_points_filters_zone() {
        let mut world = World::new();
        let mut in_zone = SpawnPoint::new(
            "a",
            "A",
            Zone::CafeGrounds,
            (0, 0),
            "garden_herb",
            Rarity::Common,
            None,
        );
        in_zone.force_spawn(3, 1);
        world.spawn((in_zone,));
        let mut elsewhere = SpawnPoint::new(
            "b",
            "B",
            Zone::MeadowFields,
            (0, 0),
            "meadow_berry",
            Rarity::Common,
            None,
        );
        elsewhere.force_spawn(3, 1);
        world.spawn((elsewhere,));

        let ids = gatherable_points(&world, Zone::CafeGrounds, &[]);
        assert_eq!(ids, vec!["a".to_string()]);
    }
}
