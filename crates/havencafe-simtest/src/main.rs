//! Dragon Haven Cafe - Headless Simulation Harness
//!
//! Runs the full simulation for several in-game weeks with no rendering
//! and validates cross-system invariants: catalog consistency, the cafe
//! schedule, dragon growth, the customer economy, and save round-trips.
//!
//! Usage:
//!   cargo run -p havencafe-simtest
//!   cargo run -p havencafe-simtest -- --verbose

use havencafe_core::engine::{GameConfig, SimEvent, SimulationEngine};
use havencafe_core::prelude::*;
use havencafe_logic::{ingredients, recipes};

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn main() {
    let verbose = std::env::args().any(|a| a == "--verbose");
    println!("=== Dragon Haven Cafe Simulation Harness ===\n");

    let mut results = Vec::new();

    // 1. Static catalog consistency
    results.extend(validate_catalogs(verbose));

    // 2. A full simulated fortnight
    results.extend(validate_fortnight(verbose));

    // 3. Save/load round-trip mid-run
    results.extend(validate_persistence(verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!("\n=== RESULT: {}/{} passed, {} failed ===", passed, total, failed);

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── 1. Catalogs ─────────────────────────────────────────────────────────

fn validate_catalogs(verbose: bool) -> Vec<TestResult> {
    println!("--- Catalogs ---");
    let mut results = Vec::new();

    results.push(TestResult {
        name: "ingredient_count".into(),
        passed: ingredients::all().len() >= 14,
        detail: format!("{} ingredients", ingredients::all().len()),
    });

    results.push(TestResult {
        name: "recipe_count".into(),
        passed: recipes::all().len() >= 12,
        detail: format!("{} recipes", recipes::all().len()),
    });

    let dangling: Vec<&str> = recipes::all()
        .iter()
        .flat_map(|recipe| recipe.ingredients.iter())
        .filter(|(id, _, _)| ingredients::get(id).is_none())
        .map(|(id, _, _)| *id)
        .collect();
    results.push(TestResult {
        name: "recipes_resolve".into(),
        passed: dangling.is_empty(),
        detail: if dangling.is_empty() {
            "all recipe ingredients exist".into()
        } else {
            format!("dangling: {}", dangling.join(", "))
        },
    });

    let defaults = recipes::default_unlocked();
    results.push(TestResult {
        name: "starter_recipes".into(),
        passed: defaults.len() >= 4,
        detail: format!("{} recipes known from the start", defaults.len()),
    });

    if verbose {
        for recipe in recipes::all() {
            println!("    {:20} {:?} difficulty {}", recipe.id, recipe.category, recipe.difficulty);
        }
    }

    results
}

// ── 2. Fortnight run ────────────────────────────────────────────────────

fn validate_fortnight(verbose: bool) -> Vec<TestResult> {
    println!("--- Fortnight Run ---");
    let mut results = Vec::new();

    let mut engine = SimulationEngine::new();
    engine.new_game(GameConfig {
        dragon_name: "Ember".into(),
        ..GameConfig::default()
    });

    let starting_gold = engine.gold();
    let mut services = 0u32;
    let mut customers_arrived = 0u32;
    let mut customers_served = 0u32;
    let mut stage_changes = Vec::new();
    let mut story_completed = 0u32;
    let mut festivals = 0u32;

    for day in 1..=14 {
        // Restock the larder each morning so the kitchen stays busy
        for ingredient in ["garden_herb", "wild_berry", "edible_flower", "wild_herb", "buried_root"] {
            engine.inventory.add_item(ingredient, 1.0, 20);
        }

        // Play the whole waking day, one-second frames at 30s/hour
        for _ in 0..(16 * 30) {
            for event in engine.update(1.0) {
                match event {
                    SimEvent::CafeServiceEnded(_) => services += 1,
                    SimEvent::CustomerArrived(_) => customers_arrived += 1,
                    SimEvent::CustomerServed { .. } => customers_served += 1,
                    SimEvent::DragonStageChanged { to, .. } => stage_changes.push(to),
                    SimEvent::StoryEventTriggered(_) => {
                        for done in engine.complete_story_event() {
                            if matches!(done, SimEvent::StoryEventCompleted(_)) {
                                story_completed += 1;
                            }
                        }
                    }
                    SimEvent::FestivalStarted(_) => festivals += 1,
                    _ => {}
                }
            }
        }

        // Keep the dragon fed before bed
        if let Ok(dish) = engine.cook("herb_soup") {
            engine.feed_dragon(&dish);
        }
        engine.sleep();

        if verbose {
            let dragon = engine.dragon().expect("dragon exists");
            println!(
                "    day {:2}: gold={} rep={} stage={:?} customers={}",
                day,
                engine.gold(),
                engine.reputation(),
                dragon.stage,
                customers_arrived
            );
        }
    }

    results.push(TestResult {
        name: "services_ran".into(),
        passed: services >= 20,
        detail: format!("{} service periods completed over 14 days", services),
    });

    results.push(TestResult {
        name: "customers_flowed".into(),
        passed: customers_arrived > 50 && customers_served > 10,
        detail: format!("{} arrived, {} served", customers_arrived, customers_served),
    });

    results.push(TestResult {
        name: "economy_grew".into(),
        passed: engine.gold() > starting_gold,
        detail: format!("{} gold -> {} gold", starting_gold, engine.gold()),
    });

    let dragon = engine.dragon().expect("dragon exists");
    results.push(TestResult {
        name: "dragon_grew_up".into(),
        passed: dragon.stage == DragonStage::Adult,
        detail: format!("day-14 stage: {:?} (changes: {:?})", dragon.stage, stage_changes),
    });

    results.push(TestResult {
        name: "dragon_stats_in_range".into(),
        passed: (0.0..=100.0).contains(&dragon.hunger)
            && (0.0..=100.0).contains(&dragon.happiness)
            && dragon.stamina <= dragon.stage.max_stamina()
            && dragon.bond <= 500,
        detail: format!(
            "hunger={:.0} happiness={:.0} stamina={:.0} bond={}",
            dragon.hunger, dragon.happiness, dragon.stamina, dragon.bond
        ),
    });

    results.push(TestResult {
        name: "story_progressed".into(),
        passed: story_completed >= 2,
        detail: format!(
            "{} events completed, chapter {}",
            story_completed,
            engine.story.chapter()
        ),
    });

    results.push(TestResult {
        name: "festival_season".into(),
        passed: festivals >= 1 || engine.calendar.active().is_some(),
        detail: format!("{} festivals started in two weeks", festivals),
    });

    results.push(TestResult {
        name: "floor_cleared_nightly".into(),
        passed: engine.customer_count() == 0,
        detail: "no customers linger after close".into(),
    });

    results
}

// ── 3. Persistence ──────────────────────────────────────────────────────

fn validate_persistence(_verbose: bool) -> Vec<TestResult> {
    println!("--- Persistence ---");
    let mut results = Vec::new();

    let mut engine = SimulationEngine::new();
    engine.new_game(GameConfig::default());
    for _ in 0..(4 * 30) {
        engine.update(1.0);
    }

    let mut buffer = Vec::new();
    let saved = engine.save(&mut buffer).is_ok();
    results.push(TestResult {
        name: "save_writes".into(),
        passed: saved && !buffer.is_empty(),
        detail: format!("{} bytes of JSON", buffer.len()),
    });

    let mut loaded = SimulationEngine::new();
    let load_ok = loaded.load(&buffer[..]).is_ok();
    results.push(TestResult {
        name: "load_reads".into(),
        passed: load_ok,
        detail: "saved state loads back".into(),
    });

    results.push(TestResult {
        name: "roundtrip_consistent".into(),
        passed: load_ok
            && loaded.gold() == engine.gold()
            && loaded.clock.day() == engine.clock.day()
            && loaded.staff_count() == engine.staff_count()
            && loaded.spawn_point_count() == engine.spawn_point_count(),
        detail: format!(
            "gold={} day={} staff={} points={}",
            loaded.gold(),
            loaded.clock.day(),
            loaded.staff_count(),
            loaded.spawn_point_count()
        ),
    });

    // A load mustn't wedge the simulation
    let events = loaded.update(1.0);
    results.push(TestResult {
        name: "loaded_engine_ticks".into(),
        passed: loaded.clock.total_hours() > 0.0,
        detail: format!("{} events on first post-load tick", events.len()),
    });

    // Garbage must fail loudly, not corrupt the engine
    let mut untouched = SimulationEngine::new();
    untouched.new_game(GameConfig::default());
    let gold_before = untouched.gold();
    let rejected = untouched.load(&b"{\"version\": 99}"[..]).is_err()
        && untouched.load(&b"not json"[..]).is_err();
    results.push(TestResult {
        name: "bad_saves_rejected".into(),
        passed: rejected && untouched.gold() == gold_before,
        detail: "wrong version and malformed JSON both refused".into(),
    });

    results
}
