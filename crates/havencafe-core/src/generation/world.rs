//! World setup - spawn points and the staff roster for a new game

use crate::components::{Ability, Rarity, SpawnPoint, Staff, Zone};
use havencafe_logic::staffing::{StaffRole, StaffTrait};
use hecs::{Entity, World};
use rand::Rng;

/// Static spawn point layout:
/// (id, name, zone, x, y, ingredient, rarity, required ability).
type SpawnDef = (
    &'static str,
    &'static str,
    Zone,
    i32,
    i32,
    &'static str,
    Rarity,
    Option<Ability>,
);

const SPAWN_POINTS: &[SpawnDef] = &[
    // Cafe grounds - safe starter pickings
    ("cg_herb_1", "Garden Patch", Zone::CafeGrounds, 5, 5, "garden_herb", Rarity::Common, None),
    ("cg_herb_2", "Herb Garden", Zone::CafeGrounds, 3, 8, "garden_herb", Rarity::Common, None),
    ("cg_berry_1", "Berry Bush", Zone::CafeGrounds, 8, 10, "wild_berry", Rarity::Common, None),
    ("cg_flower_1", "Flower Bed", Zone::CafeGrounds, 15, 7, "edible_flower", Rarity::Uncommon, None),
    ("cg_flower_2", "Window Box", Zone::CafeGrounds, 12, 3, "edible_flower", Rarity::Uncommon, None),
    // Meadow fields
    ("mf_berry_1", "Wild Berry Thicket", Zone::MeadowFields, 4, 8, "meadow_berry", Rarity::Common, None),
    ("mf_berry_2", "Sunlit Berries", Zone::MeadowFields, 16, 5, "meadow_berry", Rarity::Common, None),
    ("mf_honey_1", "Bee Hive", Zone::MeadowFields, 12, 3, "golden_honey", Rarity::Rare, None),
    ("mf_herb_1", "Herb Meadow", Zone::MeadowFields, 16, 12, "wild_herb", Rarity::Common, None),
    ("mf_mushroom_1", "Mushroom Circle", Zone::MeadowFields, 7, 14, "field_mushroom", Rarity::Uncommon, None),
    ("mf_root_1", "Buried Treasure", Zone::MeadowFields, 10, 6, "buried_root", Rarity::Uncommon, Some(Ability::BurrowFetch)),
    ("mf_root_2", "Deep Soil", Zone::MeadowFields, 14, 10, "buried_root", Rarity::Rare, Some(Ability::BurrowFetch)),
    // Forest depths
    ("fd_mushroom_1", "Rare Fungi", Zone::ForestDepths, 6, 6, "rare_mushroom", Rarity::Uncommon, None),
    ("fd_mushroom_2", "Hidden Grove", Zone::ForestDepths, 14, 4, "rare_mushroom", Rarity::Rare, Some(Ability::SniffTrack)),
    ("fd_herb_1", "Forest Floor", Zone::ForestDepths, 10, 8, "forest_herb", Rarity::Common, None),
    ("fd_game_1", "Hunting Grounds", Zone::ForestDepths, 10, 11, "wild_game", Rarity::Rare, Some(Ability::SniffTrack)),
    ("fd_fish_1", "Forest Stream", Zone::ForestDepths, 17, 9, "forest_fish", Rarity::Uncommon, None),
    ("fd_truffle_1", "Truffle Spot", Zone::ForestDepths, 8, 3, "hidden_truffle", Rarity::Rare, Some(Ability::SniffTrack)),
    // Coastal shore
    ("cs_salt_1", "Salt Flats", Zone::CoastalShore, 4, 6, "sea_salt", Rarity::Common, None),
    ("cs_seaweed_1", "Seaweed Bed", Zone::CoastalShore, 8, 10, "fresh_seaweed", Rarity::Common, None),
    ("cs_clam_1", "Tidal Pool", Zone::CoastalShore, 10, 4, "tidal_clam", Rarity::Uncommon, None),
    ("cs_oyster_1", "Pearl Beds", Zone::CoastalShore, 16, 5, "pearl_oyster", Rarity::Rare, Some(Ability::BurrowFetch)),
    ("cs_storm_1", "Windswept Bluff", Zone::CoastalShore, 18, 12, "storm_flower", Rarity::Rare, None),
];

/// Spawn every resource point, each with an initial yield.
pub fn generate_spawn_points(world: &mut World, rng: &mut impl Rng) -> Vec<Entity> {
    SPAWN_POINTS
        .iter()
        .map(|(id, name, zone, x, y, ingredient, rarity, requires)| {
            let mut point =
                SpawnPoint::new(*id, *name, *zone, (*x, *y), *ingredient, *rarity, *requires);
            point.force_spawn(rng.gen_range(2..=4), 1);
            world.spawn((point,))
        })
        .collect()
}

/// The fixed cafe roster.
pub fn generate_staff(world: &mut World) -> Vec<Entity> {
    let roster = [
        ("melody", "Melody", StaffRole::Server, StaffTrait::Enthusiastic),
        ("bruno", "Bruno", StaffRole::Chef, StaffTrait::Skilled),
        ("sage", "Sage", StaffRole::Busser, StaffTrait::Lazy),
    ];
    roster
        .into_iter()
        .map(|(id, name, role, trait_)| world.spawn((Staff::new(id, name, role, trait_),)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use havencafe_logic::ingredients;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_spawn_points_reference_real_ingredients() {
        for (id, _, _, _, _, ingredient, _, _) in SPAWN_POINTS {
            assert!(
                ingredients::get(ingredient).is_some(),
                "{} references unknown ingredient {}",
                id,
                ingredient
            );
        }
    }

    #[test]
    fn test_every_zone_has_points() {
        for zone in Zone::ALL {
            assert!(SPAWN_POINTS.iter().any(|def| def.2 == zone));
        }
    }

    #[test]
    fn test_generation_populates_world() {
        let mut world = World::new();
        let mut rng = StdRng::seed_from_u64(1);
        let points = generate_spawn_points(&mut world, &mut rng);
        assert_eq!(points.len(), SPAWN_POINTS.len());
        for entity in points {
            let point = world.get::<&SpawnPoint>(entity).unwrap();
            assert!(point.available);
            assert!((2..=4).contains(&point.quality));
        }

        let staff = generate_staff(&mut world);
        assert_eq!(staff.len(), 3);
    }
}
