//! Customer generation

use super::names::generate_customer_name;
use crate::components::Customer;
use crate::systems::Patronage;
use havencafe_logic::constants::{CUSTOMER_PATIENCE_BASE, CUSTOMER_PATIENCE_VARIATION};
use hecs::{Entity, World};
use rand::Rng;

/// Spawn a walk-in customer with a random name, expectation, and patience.
pub fn spawn_customer(world: &mut World, patronage: &mut Patronage, rng: &mut impl Rng) -> Entity {
    let id = patronage.allocate_id();
    let name = generate_customer_name(rng);

    // Half the crowd has average expectations; the rest split between
    // easygoing and demanding
    let expectation = match rng.gen_range(0..10) {
        0..=4 => 3,
        5..=7 => 2,
        _ => 4,
    };

    let patience = CUSTOMER_PATIENCE_BASE
        + rng.gen_range(-CUSTOMER_PATIENCE_VARIATION..=CUSTOMER_PATIENCE_VARIATION);

    world.spawn((Customer::new(id, name, expectation, patience),))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_spawned_customers_valid() {
        let mut world = World::new();
        let mut patronage = Patronage::new();
        let mut rng = StdRng::seed_from_u64(4);

        let mut ids = Vec::new();
        for _ in 0..30 {
            let entity = spawn_customer(&mut world, &mut patronage, &mut rng);
            let customer = world.get::<&Customer>(entity).unwrap();
            assert!((2..=4).contains(&customer.expectation));
            assert!(customer.patience_max >= CUSTOMER_PATIENCE_BASE - CUSTOMER_PATIENCE_VARIATION);
            assert!(customer.patience_max <= CUSTOMER_PATIENCE_BASE + CUSTOMER_PATIENCE_VARIATION);
            ids.push(customer.id);
        }
        // Stable ids are unique
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 30);
    }
}
