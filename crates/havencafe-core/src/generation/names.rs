//! Name generation utilities

use rand::Rng;

/// Pick a random customer name.
pub fn generate_customer_name(rng: &mut impl Rng) -> &'static str {
    CUSTOMER_NAMES[rng.gen_range(0..CUSTOMER_NAMES.len())]
}

// Androgynous village-visitor names
static CUSTOMER_NAMES: &[&str] = &[
    "Alex", "Ash", "Casey", "Drew", "Ellis", "Flynn", "Gray", "Harper", "Indigo", "Jade", "Kay",
    "Lake", "Linden", "Morgan", "Noel", "Parker", "Quinn", "Reed", "River", "Rowan", "Sage",
    "Taylor", "Val", "Wren",
];

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_names_drawn_from_pool() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..50 {
            let name = generate_customer_name(&mut rng);
            assert!(CUSTOMER_NAMES.contains(&name));
        }
    }
}
