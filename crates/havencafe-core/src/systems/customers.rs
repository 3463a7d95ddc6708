//! Customer flow - spawning, seating, ordering, delivery, departures

use crate::components::{Customer, CustomerState};
use havencafe_logic::constants::{
    CAFE_TABLE_SEATS, CUSTOMER_SPAWN_BASE, CUSTOMER_SPAWN_REP_BONUS,
};
use havencafe_logic::recipes::{self, DishCategory};
use hecs::{Entity, World};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A cooked dish sitting on the kitchen pass, waiting to be carried out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreparedDish {
    pub recipe: String,
    pub quality: u8,
    pub price: u32,
    /// Stable customer id the dish was cooked for.
    pub customer_id: u32,
}

/// Singleton tracking everything customer-related that isn't on a
/// customer entity: the spawn accumulator, the id counter, and the pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Patronage {
    spawn_accumulator: f32,
    next_id: u32,
    pub pass: Vec<PreparedDish>,
    /// Customers whose orders the kitchen gave up on (missing
    /// ingredients); they wait until their patience runs out.
    pub abandoned: Vec<u32>,
}

impl Patronage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Expected-value spawn check: accumulates `rate * dt` and spawns when
    /// the accumulator crosses 1.0, with a probabilistic remainder.
    pub fn should_spawn(
        &mut self,
        reputation: u32,
        dt_hours: f32,
        bonus: f32,
        rng: &mut impl Rng,
    ) -> bool {
        let rate =
            CUSTOMER_SPAWN_BASE * (1.0 + reputation as f32 * CUSTOMER_SPAWN_REP_BONUS) * bonus;
        self.spawn_accumulator += rate * dt_hours;

        if self.spawn_accumulator >= 1.0 {
            self.spawn_accumulator -= 1.0;
            return true;
        }
        // Small chance proportional to the partial accumulation
        if self.spawn_accumulator > 0.0
            && rng.gen_bool((self.spawn_accumulator as f64 * dt_hours as f64).min(1.0))
        {
            self.spawn_accumulator = 0.0;
            return true;
        }
        false
    }

    /// Drop everything at the end of a service period.
    pub fn clear_service(&mut self) {
        self.spawn_accumulator = 0.0;
        self.pass.clear();
        self.abandoned.clear();
    }
}

/// A customer departure that the engine must settle.
#[derive(Debug, Clone)]
pub enum CustomerEvent {
    LeftAngry {
        entity: Entity,
        name: String,
        reputation_change: i32,
    },
    FinishedEating {
        entity: Entity,
        name: String,
        tip: u32,
        reputation_change: i32,
        satisfaction: f32,
        feedback: String,
    },
}

/// Tick all customers: patience drains, meals finish, departures settle.
pub fn customer_system(world: &mut World, dt_hours: f32, rng: &mut impl Rng) -> Vec<CustomerEvent> {
    let mut events = Vec::new();
    for (entity, customer) in world.query_mut::<&mut Customer>() {
        let Some(departure) = customer.tick(dt_hours) else {
            continue;
        };
        // An unfulfilled order means patience ran out
        let was_served = customer.order.as_ref().map_or(false, |order| order.fulfilled);
        if !was_served {
            events.push(CustomerEvent::LeftAngry {
                entity,
                name: customer.name.clone(),
                reputation_change: departure.reputation_change,
            });
        } else {
            events.push(CustomerEvent::FinishedEating {
                entity,
                name: customer.name.clone(),
                tip: departure.tip,
                reputation_change: departure.reputation_change,
                satisfaction: departure.satisfaction,
                feedback: customer.feedback_line(rng),
            });
        }
    }
    events
}

/// Number of seats currently taken.
pub fn seats_taken(world: &World) -> usize {
    world
        .query::<&Customer>()
        .iter()
        .filter(|(_, customer)| customer.table.is_some() && customer.state != CustomerState::Leaving)
        .count()
}

/// Seat waiting customers at free tables.
pub fn seat_waiting_customers(world: &mut World) -> Vec<Entity> {
    let mut free = CAFE_TABLE_SEATS.saturating_sub(seats_taken(world));
    if free == 0 {
        return Vec::new();
    }

    let mut taken: Vec<u8> = world
        .query::<&Customer>()
        .iter()
        .filter_map(|(_, customer)| customer.table)
        .collect();
    taken.sort_unstable();

    let mut seated = Vec::new();
    for (entity, customer) in world.query_mut::<&mut Customer>() {
        if free == 0 {
            break;
        }
        if customer.state != CustomerState::Waiting {
            continue;
        }
        let table = (0..CAFE_TABLE_SEATS as u8)
            .find(|t| !taken.contains(t))
            .unwrap_or(0);
        taken.push(table);
        customer.seat(table);
        seated.push(entity);
        free -= 1;
    }
    seated
}

/// Seated customers pick something off the menu, weighted toward mains.
/// With an empty menu nobody can order and patience keeps draining.
pub fn take_orders(world: &mut World, menu: &[String], rng: &mut impl Rng) -> Vec<(Entity, String)> {
    if menu.is_empty() {
        return Vec::new();
    }

    // Resolve menu entries to categories once
    let menu_dishes: Vec<(String, DishCategory)> = menu
        .iter()
        .filter_map(|id| recipes::get(id).map(|def| (id.clone(), def.category)))
        .collect();
    if menu_dishes.is_empty() {
        return Vec::new();
    }

    let mut orders = Vec::new();
    for (entity, customer) in world.query_mut::<&mut Customer>() {
        if customer.state != CustomerState::Seated {
            continue;
        }
        // Prefer a main course when one is on the menu
        let pick = if rng.gen_bool(0.5) {
            menu_dishes
                .iter()
                .find(|(_, category)| *category == DishCategory::Main)
        } else {
            None
        };
        let (recipe, category) = match pick {
            Some((id, category)) => (id.clone(), *category),
            None => {
                let (id, category) = &menu_dishes[rng.gen_range(0..menu_dishes.len())];
                (id.clone(), *category)
            }
        };
        customer.place_order(category, recipe.clone());
        orders.push((entity, recipe));
    }
    orders
}

/// Customers waiting on food whose order nobody is cooking yet.
pub fn unclaimed_orders(world: &World, claimed: &[u32]) -> Vec<(u32, String)> {
    let mut pending = Vec::new();
    for (_, customer) in world.query::<&Customer>().iter() {
        if customer.state != CustomerState::WaitingFood {
            continue;
        }
        if claimed.contains(&customer.id) {
            continue;
        }
        if let Some(order) = &customer.order {
            if !order.fulfilled {
                pending.push((customer.id, order.recipe.clone()));
            }
        }
    }
    pending
}

/// A dish delivered to a customer.
#[derive(Debug, Clone)]
pub struct Delivery {
    pub customer_id: u32,
    pub recipe: String,
    pub price: u32,
    pub satisfaction: f32,
}

/// Carry dishes from the pass to their customers. Dishes whose customer
/// already left are discarded.
pub fn deliver_dishes(
    world: &mut World,
    pass: &mut Vec<PreparedDish>,
    server_efficiency: f32,
) -> Vec<Delivery> {
    let mut deliveries = Vec::new();
    pass.retain(|dish| {
        let mut served = false;
        let mut customer_present = false;
        for (_, customer) in world.query_mut::<&mut Customer>() {
            if customer.id != dish.customer_id {
                continue;
            }
            customer_present = customer.state != CustomerState::Leaving;
            if let Ok(satisfaction) = customer.serve(dish.quality, dish.price, server_efficiency) {
                deliveries.push(Delivery {
                    customer_id: dish.customer_id,
                    recipe: dish.recipe.clone(),
                    price: dish.price,
                    satisfaction,
                });
                served = true;
            }
            break;
        }
        // Keep dishes for customers still waiting; drop the rest
        !served && customer_present
    });
    deliveries
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn spawn_customer(world: &mut World, patronage: &mut Patronage, patience: f32) -> Entity {
        let id = patronage.allocate_id();
        world.spawn((Customer::new(id, format!("Guest {}", id), 3, patience),))
    }

    #[test]
    fn test_spawn_rate_scales_with_reputation() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut low = Patronage::new();
        let mut high = Patronage::new();

        let mut low_count = 0;
        let mut high_count = 0;
        for _ in 0..1000 {
            if low.should_spawn(0, 0.05, 1.0, &mut rng) {
                low_count += 1;
            }
            if high.should_spawn(500, 0.05, 1.0, &mut rng) {
                high_count += 1;
            }
        }
        assert!(high_count > low_count);
        // Base rate of 2/hour over 50 hours of checks lands near 100
        assert!((80..=140).contains(&low_count), "low_count={}", low_count);
    }

    #[test]
    fn test_seating_respects_capacity() {
        let mut world = World::new();
        let mut patronage = Patronage::new();
        for _ in 0..CAFE_TABLE_SEATS + 3 {
            spawn_customer(&mut world, &mut patronage, 2.0);
        }

        let seated = seat_waiting_customers(&mut world);
        assert_eq!(seated.len(), CAFE_TABLE_SEATS);
        assert_eq!(seats_taken(&world), CAFE_TABLE_SEATS);

        // Nobody else fits
        assert!(seat_waiting_customers(&mut world).is_empty());
    }

    #[test]
    fn test_orders_come_from_menu() {
        let mut world = World::new();
        let mut patronage = Patronage::new();
        let mut rng = StdRng::seed_from_u64(2);
        spawn_customer(&mut world, &mut patronage, 2.0);
        seat_waiting_customers(&mut world);

        let menu = vec!["herb_soup".to_string(), "berry_tart".to_string()];
        let orders = take_orders(&mut world, &menu, &mut rng);
        assert_eq!(orders.len(), 1);
        assert!(menu.contains(&orders[0].1));

        // No double ordering
        assert!(take_orders(&mut world, &menu, &mut rng).is_empty());
    }

    #[test]
    fn test_empty_menu_no_orders() {
        let mut world = World::new();
        let mut patronage = Patronage::new();
        let mut rng = StdRng::seed_from_u64(3);
        spawn_customer(&mut world, &mut patronage, 2.0);
        seat_waiting_customers(&mut world);
        assert!(take_orders(&mut world, &[], &mut rng).is_empty());
    }

    #[test]
    fn test_delivery_and_departure() {
        let mut world = World::new();
        let mut patronage = Patronage::new();
        let mut rng = StdRng::seed_from_u64(4);
        let entity = spawn_customer(&mut world, &mut patronage, 2.0);
        seat_waiting_customers(&mut world);
        let menu = vec!["herb_soup".to_string()];
        take_orders(&mut world, &menu, &mut rng);

        let customer_id = world.get::<&Customer>(entity).unwrap().id;
        let mut pass = vec![PreparedDish {
            recipe: "herb_soup".into(),
            quality: 4,
            price: 50,
            customer_id,
        }];
        let deliveries = deliver_dishes(&mut world, &mut pass, 1.0);
        assert_eq!(deliveries.len(), 1);
        assert!(pass.is_empty());
        assert!(deliveries[0].satisfaction > 3.0);

        // Eat until done
        let events = customer_system(&mut world, 0.6, &mut rng);
        assert_eq!(events.len(), 1);
        match &events[0] {
            CustomerEvent::FinishedEating { tip, .. } => assert!(*tip > 0),
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn test_patience_expiry_produces_angry_departure() {
        let mut world = World::new();
        let mut patronage = Patronage::new();
        let mut rng = StdRng::seed_from_u64(5);
        spawn_customer(&mut world, &mut patronage, 0.5);
        seat_waiting_customers(&mut world);

        let events = customer_system(&mut world, 1.0, &mut rng);
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], CustomerEvent::LeftAngry { .. }));
    }

    #[test]
    fn test_unclaimed_orders_skips_claimed() {
        let mut world = World::new();
        let mut patronage = Patronage::new();
        let mut rng = StdRng::seed_from_u64(6);
        spawn_customer(&mut world, &mut patronage, 2.0);
        spawn_customer(&mut world, &mut patronage, 2.0);
        seat_waiting_customers(&mut world);
        take_orders(&mut world, &["herb_soup".to_string()], &mut rng);

        let all = unclaimed_orders(&world, &[]);
        assert_eq!(all.len(), 2);
        let filtered = unclaimed_orders(&world, &[all[0].0]);
        assert_eq!(filtered.len(), 1);
    }
}
