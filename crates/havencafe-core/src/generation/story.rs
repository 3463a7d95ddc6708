//! Built-in story content: the main event chain and its characters

use crate::components::{DragonStage, StoryCharacter, Zone};
use crate::systems::{Condition, Outcome, StoryEvent};

/// The main story arc. Loaded at new game and re-registered after a load.
pub fn story_events() -> Vec<StoryEvent> {
    vec![
        StoryEvent {
            id: "prologue_arrival".into(),
            chapter: "prologue".into(),
            sequence_order: 0,
            name: "A Cafe and an Egg".into(),
            description: "The cafe keys and a warm egg change hands.".into(),
            conditions: vec![],
            outcomes: vec![Outcome::SetFlag("cafe_opened".into())],
            repeatable: false,
        },
        StoryEvent {
            id: "prologue_first_morning".into(),
            chapter: "prologue".into(),
            sequence_order: 1,
            name: "First Morning".into(),
            description: "Iris from the village drops by to meet the new owner.".into(),
            conditions: vec![
                Condition::Flag("cafe_opened".into()),
                Condition::TimeOfDay([6.0, 12.0]),
            ],
            outcomes: vec![
                Outcome::SetFlag("met_iris".into()),
                Outcome::AffinityChange {
                    character: "iris".into(),
                    amount: 5,
                },
            ],
            repeatable: false,
        },
        StoryEvent {
            id: "chapter1_hatching".into(),
            chapter: "chapter1".into(),
            sequence_order: 0,
            name: "The Hatching".into(),
            description: "The egg rocks, cracks, and a small face peers out.".into(),
            conditions: vec![Condition::DragonStage(DragonStage::Hatchling)],
            outcomes: vec![
                Outcome::SetFlag("dragon_hatched".into()),
                Outcome::GoldReward(50),
            ],
            repeatable: false,
        },
        StoryEvent {
            id: "chapter1_first_regulars".into(),
            chapter: "chapter1".into(),
            sequence_order: 1,
            name: "First Regulars".into(),
            description: "Word of the little cafe starts to spread.".into(),
            conditions: vec![
                Condition::Flag("dragon_hatched".into()),
                Condition::ReputationMin(50),
            ],
            outcomes: vec![
                Outcome::ReputationChange(10),
                Outcome::SetFlag("regulars_arrived".into()),
            ],
            repeatable: false,
        },
        StoryEvent {
            id: "chapter2_forest_road".into(),
            chapter: "chapter2".into(),
            sequence_order: 0,
            name: "The Forest Road".into(),
            description: "Old Marlow clears the bramble path into the deep woods.".into(),
            conditions: vec![
                Condition::DragonStage(DragonStage::Juvenile),
                Condition::EventsCompleted(vec!["chapter1_first_regulars".into()]),
            ],
            outcomes: vec![
                Outcome::UnlockZone(Zone::ForestDepths),
                Outcome::SetFlag("met_marlow".into()),
                Outcome::AffinityChange {
                    character: "marlow".into(),
                    amount: 5,
                },
            ],
            repeatable: false,
        },
        StoryEvent {
            id: "chapter2_coastal_road".into(),
            chapter: "chapter2".into(),
            sequence_order: 1,
            name: "Down to the Shore".into(),
            description: "With wings coming in, the coast is finally reachable.".into(),
            conditions: vec![
                Condition::DragonStage(DragonStage::Adolescent),
                Condition::Flag("met_marlow".into()),
            ],
            outcomes: vec![
                Outcome::UnlockZone(Zone::CoastalShore),
                Outcome::UnlockRecipe("clam_chowder".into()),
            ],
            repeatable: false,
        },
        StoryEvent {
            id: "chapter3_full_wings".into(),
            chapter: "chapter3".into(),
            sequence_order: 0,
            name: "Full Wings".into(),
            description: "An adult dragon circles the cafe to a full house.".into(),
            conditions: vec![
                Condition::DragonStage(DragonStage::Adult),
                Condition::ReputationMin(300),
            ],
            outcomes: vec![
                Outcome::ReputationChange(25),
                Outcome::GoldReward(200),
                Outcome::SetFlag("dragon_grown".into()),
            ],
            repeatable: false,
        },
        StoryEvent {
            id: "epilogue_haven".into(),
            chapter: "epilogue".into(),
            sequence_order: 0,
            name: "Dragon Haven".into(),
            description: "The cafe everyone talks about, and the dragon it's named for.".into(),
            conditions: vec![
                Condition::Flag("dragon_grown".into()),
                Condition::ReputationMin(500),
            ],
            outcomes: vec![Outcome::SetChapter("epilogue".into())],
            repeatable: false,
        },
    ]
}

/// The recurring characters.
pub fn story_characters() -> Vec<StoryCharacter> {
    let mut iris = StoryCharacter::new("iris", "Iris");
    iris.favorite_recipes = vec!["berry_tart".into()];
    iris.liked_recipes = vec!["berry_toast".into(), "berry_juice".into()];
    iris.disliked_recipes = vec!["game_roast".into()];
    iris.favorite_gifts = vec!["edible_flower".into()];

    let mut marlow = StoryCharacter::new("marlow", "Old Marlow");
    marlow.favorite_recipes = vec!["game_roast".into()];
    marlow.liked_recipes = vec!["herb_soup".into(), "mushroom_skewers".into()];
    marlow.disliked_recipes = vec!["flower_pudding".into()];
    marlow.favorite_gifts = vec!["hidden_truffle".into()];

    let mut nerissa = StoryCharacter::new("nerissa", "Nerissa");
    nerissa.favorite_recipes = vec!["clam_chowder".into()];
    nerissa.liked_recipes = vec!["seaweed_bites".into(), "forest_fish_plate".into()];
    nerissa.disliked_recipes = vec!["honey_cake".into()];
    nerissa.favorite_gifts = vec!["pearl_oyster".into()];

    vec![iris, marlow, nerissa]
}
