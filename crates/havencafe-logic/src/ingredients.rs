//! Static ingredient catalog.
//!
//! Every gatherable item in the world, keyed by a stable string id. Base
//! prices rise with the zone's distance from the cafe; spoil_days of 0
//! means the item never spoils.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemCategory {
    Vegetable,
    Fruit,
    Spice,
    Meat,
    Seafood,
    Special,
}

/// Catalog entry for a gatherable ingredient.
#[derive(Debug, Clone, Copy)]
pub struct IngredientDef {
    pub id: &'static str,
    pub name: &'static str,
    pub category: ItemCategory,
    pub base_price: u32,
    /// Days until a gathered stack spoils (0 = never).
    pub spoil_days: u8,
    /// RGB influence on the dragon's diet color (0.0-1.0 per channel).
    pub color_influence: [f32; 3],
}

const INGREDIENTS: &[IngredientDef] = &[
    // Cafe grounds
    IngredientDef {
        id: "garden_herb",
        name: "Garden Herb",
        category: ItemCategory::Spice,
        base_price: 5,
        spoil_days: 2,
        color_influence: [0.3, 0.7, 0.3],
    },
    IngredientDef {
        id: "wild_berry",
        name: "Wild Berry",
        category: ItemCategory::Fruit,
        base_price: 8,
        spoil_days: 2,
        color_influence: [0.8, 0.2, 0.4],
    },
    IngredientDef {
        id: "edible_flower",
        name: "Edible Flower",
        category: ItemCategory::Special,
        base_price: 10,
        spoil_days: 1,
        color_influence: [0.6, 0.4, 0.7],
    },
    // Meadow fields
    IngredientDef {
        id: "meadow_berry",
        name: "Meadow Berry",
        category: ItemCategory::Fruit,
        base_price: 12,
        spoil_days: 3,
        color_influence: [0.7, 0.3, 0.5],
    },
    IngredientDef {
        id: "golden_honey",
        name: "Golden Honey",
        category: ItemCategory::Special,
        base_price: 25,
        spoil_days: 0,
        color_influence: [0.9, 0.7, 0.2],
    },
    IngredientDef {
        id: "wild_herb",
        name: "Wild Herb",
        category: ItemCategory::Spice,
        base_price: 10,
        spoil_days: 3,
        color_influence: [0.2, 0.8, 0.3],
    },
    IngredientDef {
        id: "field_mushroom",
        name: "Field Mushroom",
        category: ItemCategory::Vegetable,
        base_price: 15,
        spoil_days: 2,
        color_influence: [0.5, 0.4, 0.3],
    },
    IngredientDef {
        id: "buried_root",
        name: "Buried Root",
        category: ItemCategory::Vegetable,
        base_price: 18,
        spoil_days: 4,
        color_influence: [0.6, 0.4, 0.2],
    },
    // Forest depths
    IngredientDef {
        id: "rare_mushroom",
        name: "Rare Mushroom",
        category: ItemCategory::Vegetable,
        base_price: 30,
        spoil_days: 2,
        color_influence: [0.4, 0.3, 0.6],
    },
    IngredientDef {
        id: "forest_herb",
        name: "Forest Herb",
        category: ItemCategory::Spice,
        base_price: 20,
        spoil_days: 3,
        color_influence: [0.1, 0.6, 0.2],
    },
    IngredientDef {
        id: "wild_game",
        name: "Wild Game",
        category: ItemCategory::Meat,
        base_price: 35,
        spoil_days: 1,
        color_influence: [0.8, 0.3, 0.2],
    },
    IngredientDef {
        id: "forest_fish",
        name: "Forest Fish",
        category: ItemCategory::Seafood,
        base_price: 28,
        spoil_days: 1,
        color_influence: [0.3, 0.5, 0.8],
    },
    IngredientDef {
        id: "hidden_truffle",
        name: "Hidden Truffle",
        category: ItemCategory::Special,
        base_price: 45,
        spoil_days: 2,
        color_influence: [0.4, 0.3, 0.2],
    },
    // Coastal shore
    IngredientDef {
        id: "sea_salt",
        name: "Sea Salt",
        category: ItemCategory::Spice,
        base_price: 15,
        spoil_days: 0,
        color_influence: [0.8, 0.8, 0.9],
    },
    IngredientDef {
        id: "fresh_seaweed",
        name: "Fresh Seaweed",
        category: ItemCategory::Vegetable,
        base_price: 20,
        spoil_days: 2,
        color_influence: [0.2, 0.6, 0.5],
    },
    IngredientDef {
        id: "tidal_clam",
        name: "Tidal Clam",
        category: ItemCategory::Seafood,
        base_price: 25,
        spoil_days: 1,
        color_influence: [0.6, 0.6, 0.8],
    },
    IngredientDef {
        id: "pearl_oyster",
        name: "Pearl Oyster",
        category: ItemCategory::Seafood,
        base_price: 50,
        spoil_days: 1,
        color_influence: [0.8, 0.8, 0.9],
    },
    // Only spawns while a storm is blowing
    IngredientDef {
        id: "storm_flower",
        name: "Storm Flower",
        category: ItemCategory::Special,
        base_price: 60,
        spoil_days: 2,
        color_influence: [0.3, 0.4, 0.9],
    },
];

/// All ingredients in the catalog.
pub fn all() -> &'static [IngredientDef] {
    INGREDIENTS
}

/// Look up an ingredient by id.
pub fn get(id: &str) -> Option<&'static IngredientDef> {
    INGREDIENTS.iter().find(|def| def.id == id)
}
