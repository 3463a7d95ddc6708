//! Static recipe catalog.
//!
//! Recipes reference ingredients by catalog id. Difficulty (1-5) sets the
//! base quality a cook starts from; the unlock rule gates when the recipe
//! becomes available.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DishCategory {
    Appetizer,
    Main,
    Dessert,
    Beverage,
}

/// How a recipe becomes available to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnlockRule {
    /// Known from the start.
    Default,
    /// Unlocks at a minimum reputation score.
    Reputation(u32),
    /// Unlocks when a story event completes.
    Story(&'static str),
    /// Found through exploration; unlocks on discovery.
    Discovery,
    /// Cookable only while the named festival is active.
    Seasonal(&'static str),
}

/// One ingredient requirement: (ingredient id, quantity, minimum quality).
pub type Requirement = (&'static str, u32, u8);

#[derive(Debug, Clone, Copy)]
pub struct RecipeDef {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub category: DishCategory,
    /// 1-5 stars; harder recipes start from a higher base quality.
    pub difficulty: u8,
    pub base_price: u32,
    pub ingredients: &'static [Requirement],
    /// RGB influence on the dragon's diet color when fed this dish.
    pub color_influence: [f32; 3],
    pub unlock: UnlockRule,
}

impl RecipeDef {
    /// Base quality floor for a cook of this recipe.
    pub fn base_quality(&self) -> u8 {
        match self.difficulty {
            1 | 2 => 2,
            3 | 4 => 3,
            _ => 4,
        }
    }
}

const RECIPES: &[RecipeDef] = &[
    // Appetizers
    RecipeDef {
        id: "herb_salad",
        name: "Fresh Herb Salad",
        description: "A light salad with garden herbs. Simple but refreshing.",
        category: DishCategory::Appetizer,
        difficulty: 1,
        base_price: 25,
        ingredients: &[("garden_herb", 2, 1), ("edible_flower", 1, 1)],
        color_influence: [0.3, 0.7, 0.4],
        unlock: UnlockRule::Default,
    },
    RecipeDef {
        id: "berry_toast",
        name: "Berry Toast",
        description: "Toasted bread topped with fresh wild berries.",
        category: DishCategory::Appetizer,
        difficulty: 1,
        base_price: 30,
        ingredients: &[("wild_berry", 2, 1)],
        color_influence: [0.7, 0.3, 0.5],
        unlock: UnlockRule::Default,
    },
    RecipeDef {
        id: "mushroom_skewers",
        name: "Mushroom Skewers",
        description: "Grilled mushrooms on wooden skewers with herbs.",
        category: DishCategory::Appetizer,
        difficulty: 2,
        base_price: 40,
        ingredients: &[("field_mushroom", 2, 2), ("wild_herb", 1, 1)],
        color_influence: [0.5, 0.5, 0.4],
        unlock: UnlockRule::Reputation(20),
    },
    RecipeDef {
        id: "seaweed_bites",
        name: "Seaweed Bites",
        description: "Crisp seaweed parcels with a pinch of sea salt.",
        category: DishCategory::Appetizer,
        difficulty: 2,
        base_price: 45,
        ingredients: &[("fresh_seaweed", 2, 1), ("sea_salt", 1, 1)],
        color_influence: [0.3, 0.6, 0.6],
        unlock: UnlockRule::Discovery,
    },
    // Mains
    RecipeDef {
        id: "herb_soup",
        name: "Hearty Herb Soup",
        description: "A warming soup of wild herbs and root vegetables.",
        category: DishCategory::Main,
        difficulty: 2,
        base_price: 50,
        ingredients: &[("wild_herb", 2, 1), ("buried_root", 1, 1)],
        color_influence: [0.3, 0.6, 0.3],
        unlock: UnlockRule::Default,
    },
    RecipeDef {
        id: "forest_fish_plate",
        name: "Forest Fish Plate",
        description: "Pan-seared stream fish with foraged herbs.",
        category: DishCategory::Main,
        difficulty: 3,
        base_price: 80,
        ingredients: &[("forest_fish", 1, 2), ("forest_herb", 1, 1)],
        color_influence: [0.3, 0.5, 0.7],
        unlock: UnlockRule::Reputation(150),
    },
    RecipeDef {
        id: "game_roast",
        name: "Wild Game Roast",
        description: "Slow-roasted game with a truffle glaze.",
        category: DishCategory::Main,
        difficulty: 4,
        base_price: 120,
        ingredients: &[("wild_game", 1, 2), ("hidden_truffle", 1, 2)],
        color_influence: [0.7, 0.4, 0.2],
        unlock: UnlockRule::Reputation(300),
    },
    RecipeDef {
        id: "clam_chowder",
        name: "Tidal Clam Chowder",
        description: "Creamy chowder of coastal clams and buried roots.",
        category: DishCategory::Main,
        difficulty: 3,
        base_price: 90,
        ingredients: &[("tidal_clam", 2, 2), ("buried_root", 1, 1)],
        color_influence: [0.6, 0.6, 0.7],
        unlock: UnlockRule::Story("chapter2_coastal_road"),
    },
    // Desserts
    RecipeDef {
        id: "berry_tart",
        name: "Berry Tart",
        description: "A buttery tart piled with meadow berries.",
        category: DishCategory::Dessert,
        difficulty: 2,
        base_price: 55,
        ingredients: &[("meadow_berry", 2, 2), ("wild_berry", 1, 1)],
        color_influence: [0.8, 0.3, 0.5],
        unlock: UnlockRule::Default,
    },
    RecipeDef {
        id: "honey_cake",
        name: "Golden Honey Cake",
        description: "A sponge cake soaked in golden meadow honey.",
        category: DishCategory::Dessert,
        difficulty: 3,
        base_price: 75,
        ingredients: &[("golden_honey", 1, 1), ("meadow_berry", 1, 1)],
        color_influence: [0.9, 0.7, 0.3],
        unlock: UnlockRule::Reputation(150),
    },
    RecipeDef {
        id: "flower_pudding",
        name: "Flower Petal Pudding",
        description: "Delicate pudding set with edible petals.",
        category: DishCategory::Dessert,
        difficulty: 3,
        base_price: 70,
        ingredients: &[("edible_flower", 2, 2), ("golden_honey", 1, 1)],
        color_influence: [0.7, 0.5, 0.7],
        unlock: UnlockRule::Seasonal("spring_bloom"),
    },
    // Beverages
    RecipeDef {
        id: "berry_juice",
        name: "Fresh Berry Juice",
        description: "Pressed wild berries over crushed ice.",
        category: DishCategory::Beverage,
        difficulty: 1,
        base_price: 20,
        ingredients: &[("wild_berry", 2, 1)],
        color_influence: [0.8, 0.2, 0.5],
        unlock: UnlockRule::Reputation(50),
    },
    RecipeDef {
        id: "herb_tea",
        name: "Calming Herb Tea",
        description: "A fragrant tea of garden and forest herbs.",
        category: DishCategory::Beverage,
        difficulty: 1,
        base_price: 25,
        ingredients: &[("garden_herb", 1, 1), ("forest_herb", 1, 1)],
        color_influence: [0.3, 0.7, 0.3],
        unlock: UnlockRule::Default,
    },
    RecipeDef {
        id: "storm_cordial",
        name: "Storm Flower Cordial",
        description: "A crackling blue cordial brewed from storm flowers.",
        category: DishCategory::Beverage,
        difficulty: 5,
        base_price: 150,
        ingredients: &[("storm_flower", 1, 3), ("golden_honey", 1, 1)],
        color_influence: [0.3, 0.4, 0.9],
        unlock: UnlockRule::Discovery,
    },
];

/// All recipes in the catalog.
pub fn all() -> &'static [RecipeDef] {
    RECIPES
}

/// Look up a recipe by id.
pub fn get(id: &str) -> Option<&'static RecipeDef> {
    RECIPES.iter().find(|def| def.id == id)
}

/// Recipe ids known from the start of a new game.
pub fn default_unlocked() -> Vec<&'static str> {
    RECIPES
        .iter()
        .filter(|def| matches!(def.unlock, UnlockRule::Default))
        .map(|def| def.id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        let tart = get("berry_tart").unwrap();
        assert_eq!(tart.category, DishCategory::Dessert);
        assert!(get("mystery_stew").is_none());
    }

    #[test]
    fn test_base_quality_by_difficulty() {
        assert_eq!(get("herb_salad").unwrap().base_quality(), 2);
        assert_eq!(get("forest_fish_plate").unwrap().base_quality(), 3);
        assert_eq!(get("storm_cordial").unwrap().base_quality(), 4);
    }

    #[test]
    fn test_default_unlocked_non_empty() {
        let defaults = default_unlocked();
        assert!(defaults.len() >= 4);
        assert!(defaults.contains(&"herb_salad"));
    }

    #[test]
    fn test_every_category_represented() {
        for category in [
            DishCategory::Appetizer,
            DishCategory::Main,
            DishCategory::Dessert,
            DishCategory::Beverage,
        ] {
            assert!(all().iter().any(|def| def.category == category));
        }
    }
}
