//! Overland Headless Simulation Harness
//!
//! Validates the movement stack end to end without any frontend: the
//! configuration surface, the rate model, the pathfinder, the goal policy,
//! multi-day scheduler scenarios, determinism, snapshots, and world
//! templates. Runs entirely in-process.
//!
//! Usage:
//!   cargo run -p overland-simtest
//!   cargo run -p overland-simtest -- --verbose

use overland_core::generation::{demo_world, DEMO_LOCATIONS};
use overland_core::prelude::*;
use overland_logic::goal::{select_goal, GoalDecision, HomeCheck};
use overland_logic::pathfinding::find_path;
use overland_logic::rate::{movement_rate, TravelScale};
use serde::Deserialize;

// ── Sample world (same JSON a frontend would ship) ──────────────────────
const SAMPLE_WORLD_JSON: &str = include_str!("../../../data/sample_world.json");

/// Expected day-by-day state for a courier walking a straight southward
/// line at 52.5 points per day.
const COURIER_MARCH_JSON: &str = r#"[
    { "day": 1, "q": 5, "r": 6, "points": 2.5 },
    { "day": 2, "q": 5, "r": 7, "points": 5.0 },
    { "day": 3, "q": 5, "r": 8, "points": 7.5 }
]"#;

#[derive(Debug, Deserialize)]
struct MarchDay {
    day: u32,
    q: i32,
    r: i32,
    points: f32,
}

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn main() {
    let verbose = std::env::args().any(|a| a == "--verbose");
    println!("=== Overland Simulation Harness ===\n");

    let mut results = Vec::new();

    // 1. Configuration surface
    results.extend(validate_config(verbose));

    // 2. Rate model sweep
    results.extend(validate_rate_model(verbose));

    // 3. Pathfinding on synthetic grids
    results.extend(validate_pathfinding(verbose));

    // 4. Goal policy decisions
    results.extend(validate_goal_policy(verbose));

    // 5. Multi-day scheduler scenarios
    results.extend(validate_scheduler(verbose));

    // 6. Seeded determinism
    results.extend(validate_determinism(verbose));

    // 7. Snapshot persistence
    results.extend(validate_persistence(verbose));

    // 8. World templates
    results.extend(validate_world_files(verbose));

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

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── 1. Configuration ────────────────────────────────────────────────────

fn validate_config(_verbose: bool) -> Vec<TestResult> {
    println!("--- Configuration ---");
    let mut results = Vec::new();

    let config = SimConfig::default();
    results.push(TestResult {
        name: "config_defaults".into(),
        passed: config.astar_budget == 1000
            && config.wander_attempts == 10
            && config.scale.daily_max_points == 50.0
            && config.seed == 42,
        detail: format!(
            "budget {}, wander attempts {}, daily max {}, seed {}",
            config.astar_budget,
            config.wander_attempts,
            config.scale.daily_max_points,
            config.seed
        ),
    });

    let costs = &config.terrain_costs;
    results.push(TestResult {
        name: "config_cost_table_ordering".into(),
        passed: costs.camp < costs.land
            && costs.land < costs.vegetation
            && costs.vegetation < costs.ice
            && costs.ice < costs.ocean
            && costs.is_impassable(TerrainCategory::Void),
        detail: format!(
            "camp {} < land {} < vegetation {} < ice {} < ocean {}, void blocked",
            costs.camp, costs.land, costs.vegetation, costs.ice, costs.ocean
        ),
    });

    let builtins = ["on_foot", "horse", "wagon", "river_boat", "ocean_ship", "flight"];
    let all_known = builtins.iter().all(|n| config.transports.contains(n));
    results.push(TestResult {
        name: "config_builtin_transports".into(),
        passed: all_known && !config.transports.contains("dragon"),
        detail: format!("{} builtins resolve, unknown names do not", builtins.len()),
    });

    match SimConfig::from_json(r#"{ "seed": 7, "astar_budget": 250 }"#) {
        Ok(partial) => results.push(TestResult {
            name: "config_partial_json".into(),
            passed: partial.seed == 7
                && partial.astar_budget == 250
                && partial.wander_attempts == 10
                && partial.terrain_costs == TerrainCosts::default(),
            detail: "stated fields override, the rest take defaults".into(),
        }),
        Err(e) => results.push(TestResult {
            name: "config_partial_json".into(),
            passed: false,
            detail: format!("JSON parse error: {}", e),
        }),
    }

    let round_trip = config
        .to_json()
        .ok()
        .and_then(|json| SimConfig::from_json(&json).ok());
    results.push(TestResult {
        name: "config_json_round_trip".into(),
        passed: round_trip.as_ref() == Some(&config),
        detail: "serialize then reparse gives the same config".into(),
    });

    let degenerate = r#"{
        "transports": {
            "custom": {
                "sled": { "speed": 1.0, "restricted": [], "cost_factor": 0.0 }
            }
        }
    }"#;
    results.push(TestResult {
        name: "config_rejects_degenerate_transport".into(),
        passed: SimConfig::from_json(degenerate).is_err(),
        detail: "a zero cost factor cannot load".into(),
    });

    results
}

// ── 2. Rate Model ───────────────────────────────────────────────────────

fn validate_rate_model(_verbose: bool) -> Vec<TestResult> {
    println!("--- Rate Model ---");
    let mut results = Vec::new();
    let costs = TerrainCosts::default();
    let scale = TravelScale::default();
    let catalog = TransportCatalog::new();

    let walk = TransportCatalog::on_foot();
    let land_rate = movement_rate(&walk, TerrainCategory::Land, &costs, &scale);
    results.push(TestResult {
        name: "rate_walk_on_land".into(),
        passed: (land_rate - 7.5).abs() < 1e-5,
        detail: format!("rate = {} (expected 7.5)", land_rate),
    });

    let ocean_rate = movement_rate(&walk, TerrainCategory::Ocean, &costs, &scale);
    results.push(TestResult {
        name: "rate_feet_blocked_by_ocean".into(),
        passed: ocean_rate == 0.0,
        detail: format!("rate = {}", ocean_rate),
    });

    let flight = catalog.resolve("flight");
    let void_rate = movement_rate(&flight, TerrainCategory::Void, &costs, &scale);
    results.push(TestResult {
        name: "rate_void_blocks_everything".into(),
        passed: void_rate == 0.0,
        detail: format!("flight over void = {}", void_rate),
    });

    let horse = catalog.resolve("horse");
    let horse_land = movement_rate(&horse, TerrainCategory::Land, &costs, &scale);
    results.push(TestResult {
        name: "rate_horse_outpaces_feet".into(),
        passed: horse_land > land_rate,
        detail: format!("horse {} vs foot {}", horse_land, land_rate),
    });

    // Gated mode without its gear degrades to walking.
    let ungeared = catalog.effective_mode("ocean_ship", None, &[]);
    results.push(TestResult {
        name: "rate_shipless_sailor_walks".into(),
        passed: ungeared == TransportCatalog::on_foot(),
        detail: format!("resolved speed {}", ungeared.speed),
    });

    let geared = catalog.effective_mode("ocean_ship", None, &["ship".to_string()]);
    let sail_rate = movement_rate(&geared, TerrainCategory::Ocean, &costs, &scale);
    results.push(TestResult {
        name: "rate_crewed_ship_crosses_ocean".into(),
        passed: (sail_rate - 11.25).abs() < 1e-4,
        detail: format!("rate = {} (expected 11.25)", sail_rate),
    });

    let mut shadowed = TransportCatalog::new();
    shadowed.define(
        "horse",
        TransportMode::new(2.4, vec![TerrainCategory::Ocean], 1.0),
    );
    results.push(TestResult {
        name: "rate_custom_mode_shadows_builtin".into(),
        passed: shadowed.resolve("horse").speed == 2.4,
        detail: format!("speed = {}", shadowed.resolve("horse").speed),
    });

    results
}

// ── 3. Pathfinding ──────────────────────────────────────────────────────

fn validate_pathfinding(_verbose: bool) -> Vec<TestResult> {
    println!("--- Pathfinding ---");
    let mut results = Vec::new();
    let open = |_: Coord| 7.5;

    let start = Coord::new(2, 2);
    let goal = Coord::new(8, 6);
    let path = find_path(start, goal, 12, 12, 1000, &open);
    let ok = match &path {
        Some(p) => {
            p.len() as u32 == start.manhattan(&goal)
                && p.last() == Some(&goal)
                && !p.contains(&start)
        }
        None => false,
    };
    results.push(TestResult {
        name: "path_uniform_grid_manhattan_length".into(),
        passed: ok,
        detail: format!(
            "len = {:?}, manhattan = {}",
            path.as_ref().map(|p| p.len()),
            start.manhattan(&goal)
        ),
    });

    let walled = |c: Coord| if c.q == 6 { 0.0 } else { 7.5 };
    results.push(TestResult {
        name: "path_full_wall_unreachable".into(),
        passed: find_path(Coord::new(2, 2), Coord::new(10, 2), 12, 12, 1000, &walled).is_none(),
        detail: "zero-rate column splits the grid".into(),
    });

    let gapped = |c: Coord| {
        if c.q == 6 && c.r != 11 {
            0.0
        } else {
            7.5
        }
    };
    let detour = find_path(Coord::new(2, 2), Coord::new(10, 2), 12, 12, 1000, &gapped);
    results.push(TestResult {
        name: "path_threads_the_gap".into(),
        passed: detour
            .as_ref()
            .map(|p| p.contains(&Coord::new(6, 11)))
            .unwrap_or(false),
        detail: format!("len = {:?} via (6, 11)", detour.as_ref().map(|p| p.len())),
    });

    results.push(TestResult {
        name: "path_starved_budget_gives_up".into(),
        passed: find_path(Coord::new(0, 0), Coord::new(90, 40), 100, 50, 15, &open).is_none(),
        detail: "15 expansions cannot cover 130 manhattan".into(),
    });

    let a = find_path(Coord::new(0, 0), Coord::new(9, 9), 16, 16, 1000, &open);
    let b = find_path(Coord::new(0, 0), Coord::new(9, 9), 16, 16, 1000, &open);
    results.push(TestResult {
        name: "path_repeat_calls_identical".into(),
        passed: a == b && a.is_some(),
        detail: "tie-break by discovery order is stable".into(),
    });

    results.push(TestResult {
        name: "path_empty_when_standing_on_goal".into(),
        passed: find_path(Coord::new(4, 4), Coord::new(4, 4), 12, 12, 1000, &open)
            == Some(Vec::new()),
        detail: "same cell yields an empty path".into(),
    });

    results
}

// ── 4. Goal Policy ──────────────────────────────────────────────────────

fn validate_goal_policy(_verbose: bool) -> Vec<TestResult> {
    println!("--- Goal Policy ---");
    let mut results = Vec::new();

    let decision = select_goal(
        Coord::new(5, 5),
        Some(Coord::new(9, 9)),
        Some(HomeCheck {
            coord: Some(Coord::new(1, 1)),
            days_since_home: 7,
            return_interval_days: 7,
        }),
    );
    results.push(TestResult {
        name: "goal_due_binding_overrides".into(),
        passed: decision == GoalDecision::ReturnHome(Coord::new(1, 1)),
        detail: format!("{:?}", decision),
    });

    let decision = select_goal(
        Coord::new(1, 1),
        None,
        Some(HomeCheck {
            coord: Some(Coord::new(1, 1)),
            days_since_home: 9,
            return_interval_days: 7,
        }),
    );
    results.push(TestResult {
        name: "goal_at_home_resets_and_wanders".into(),
        passed: decision
            == GoalDecision::Wander {
                reset_home_counter: true,
            },
        detail: format!("{:?}", decision),
    });

    let decision = select_goal(Coord::new(5, 5), Some(Coord::new(9, 9)), None);
    results.push(TestResult {
        name: "goal_unreached_persists".into(),
        passed: decision
            == GoalDecision::Keep {
                goal: Coord::new(9, 9),
                reset_home_counter: false,
            },
        detail: format!("{:?}", decision),
    });

    let decision = select_goal(Coord::new(9, 9), Some(Coord::new(9, 9)), None);
    results.push(TestResult {
        name: "goal_reached_rolls_fresh_wander".into(),
        passed: matches!(decision, GoalDecision::Wander { .. }),
        detail: format!("{:?}", decision),
    });

    results
}

// ── 5. Scheduler Scenarios ──────────────────────────────────────────────

/// A custom mode fast enough to cross one land cell per day (52.5 points).
fn courier_config() -> SimConfig {
    let mut config = SimConfig::default();
    config
        .transports
        .define("courier", TransportMode::new(7.0, Vec::new(), 1.0));
    config
}

fn validate_scheduler(verbose: bool) -> Vec<TestResult> {
    println!("--- Scheduler Scenarios ---");
    let mut results = Vec::new();

    // Steady march: one cell per day with the remainder carried.
    {
        let mut sim = Simulation::new(
            courier_config(),
            TerrainGrid::filled(20, 20, TerrainCategory::Land),
        );
        let runner = sim.spawn_player("Runner", Coord::new(5, 5)).unwrap();
        sim.set_transport_mode(runner, "courier").unwrap();
        sim.set_goal(runner, Coord::new(5, 15)).unwrap();

        let march: Vec<MarchDay> = serde_json::from_str(COURIER_MARCH_JSON).unwrap();
        let mut mismatch = None;
        if verbose {
            println!("  Courier march (52.5 points/day, 50 per cell):");
        }
        for expected in &march {
            sim.advance(1);
            let position = sim.position(runner).unwrap();
            let points = sim.progress(runner).unwrap();
            if verbose {
                println!(
                    "    day {}: at ({}, {}) with {:.1} banked",
                    expected.day, position.q, position.r, points
                );
            }
            let day_ok = position == Coord::new(expected.q, expected.r)
                && (points - expected.points).abs() < 1e-3;
            if !day_ok && mismatch.is_none() {
                mismatch = Some(format!(
                    "day {}: at {:?} with {} points, expected ({}, {}) with {}",
                    expected.day, position, points, expected.q, expected.r, expected.points
                ));
            }
        }
        results.push(TestResult {
            name: "sched_courier_march_with_carry".into(),
            passed: mismatch.is_none(),
            detail: mismatch.unwrap_or_else(|| "three days match the march table".into()),
        });

        // The bank never holds a full day after a tick.
        let points = sim.progress(runner).unwrap();
        results.push(TestResult {
            name: "sched_bank_stays_below_daily_max".into(),
            passed: (0.0..50.0).contains(&points),
            detail: format!("banked {} after three days", points),
        });
    }

    // Unreachable goal with a bound home: the agent turns around.
    {
        let mut grid = TerrainGrid::filled(20, 20, TerrainCategory::Land);
        grid.fill_rect(10, 0, 10, 19, TerrainCategory::Ocean);
        let mut sim = Simulation::new(SimConfig::default(), grid);
        sim.register_location("Base", Coord::new(2, 5)).unwrap();
        let scout = sim.spawn_player("Scout", Coord::new(5, 5)).unwrap();
        sim.bind_home(scout, "Base", 30).unwrap();
        sim.set_goal(scout, Coord::new(15, 5)).unwrap();

        sim.advance(1);
        results.push(TestResult {
            name: "sched_blocked_goal_retargets_home".into(),
            passed: sim.goal(scout) == Some(Coord::new(2, 5)),
            detail: format!("goal = {:?} (expected Base)", sim.goal(scout)),
        });
    }

    // Unreachable goal without a home: the goal is dropped.
    {
        let mut grid = TerrainGrid::filled(20, 20, TerrainCategory::Land);
        grid.fill_rect(10, 0, 10, 19, TerrainCategory::Ocean);
        let mut sim = Simulation::new(SimConfig::default(), grid);
        let scout = sim.spawn_player("Scout", Coord::new(5, 5)).unwrap();
        sim.set_goal(scout, Coord::new(15, 5)).unwrap();

        sim.advance(1);
        results.push(TestResult {
            name: "sched_blocked_goal_without_home_idles".into(),
            passed: sim.goal(scout).is_none() && sim.position(scout) == Some(Coord::new(5, 5)),
            detail: format!("goal = {:?}, stayed put", sim.goal(scout)),
        });
    }

    // A world nobody can move in: everyone idles, time still passes.
    {
        let mut sim = Simulation::new(
            SimConfig::default(),
            TerrainGrid::filled(10, 10, TerrainCategory::Void),
        );
        let drifter = sim.spawn_npc("Drifter", Coord::new(4, 4)).unwrap();
        let watcher = sim.spawn_player("Watcher", Coord::new(6, 6)).unwrap();

        sim.advance(5);
        results.push(TestResult {
            name: "sched_fully_blocked_world_idles".into(),
            passed: sim.position(drifter) == Some(Coord::new(4, 4))
                && sim.position(watcher) == Some(Coord::new(6, 6))
                && sim.day() == 5,
            detail: format!(
                "drifter {:?}, watcher {:?}, day {}",
                sim.position(drifter),
                sim.position(watcher),
                sim.day()
            ),
        });
    }

    // Two travelers converge on one cell; arrival order does not matter.
    {
        let finals = |first: &str, second: &str| {
            let mut sim = Simulation::new(
                courier_config(),
                TerrainGrid::filled(20, 20, TerrainCategory::Land),
            );
            let a = sim.spawn_player(first, Coord::new(2, 10)).unwrap();
            let b = sim.spawn_player(second, Coord::new(8, 10)).unwrap();
            for agent in [a, b] {
                sim.set_transport_mode(agent, "courier").unwrap();
                sim.set_goal(agent, Coord::new(5, 10)).unwrap();
            }
            sim.advance(4);
            (sim.position(a).unwrap(), sim.position(b).unwrap())
        };
        let (a1, b1) = finals("East", "West");
        let (b2, a2) = finals("West", "East");
        results.push(TestResult {
            name: "sched_two_agents_share_target_cell".into(),
            passed: a1 == Coord::new(5, 10) && b1 == Coord::new(5, 10),
            detail: format!("{:?} / {:?}", a1, b1),
        });
        results.push(TestResult {
            name: "sched_spawn_order_irrelevant".into(),
            passed: a1 == a2 && b1 == b2,
            detail: "swapped spawn order gives the same positions".into(),
        });
    }

    // A due home binding pulls a traveler off its route. The npc leaves
    // camp on a long errand; on the third day the binding overrides it.
    {
        let mut sim = Simulation::new(
            courier_config(),
            TerrainGrid::filled(30, 30, TerrainCategory::Land),
        );
        sim.register_location("Camp", Coord::new(15, 15)).unwrap();
        let oren = sim.spawn_npc("Oren", Coord::new(15, 15)).unwrap();
        sim.set_transport_mode(oren, "courier").unwrap();
        sim.bind_home(oren, "Camp", 3).unwrap();
        sim.set_goal(oren, Coord::new(29, 29)).unwrap();

        sim.advance(2);
        let en_route = sim.goal(oren) == Some(Coord::new(29, 29))
            && sim.position(oren) != Some(Coord::new(15, 15));
        sim.advance(1);
        results.push(TestResult {
            name: "sched_home_binding_comes_due".into(),
            passed: en_route && sim.goal(oren) == Some(Coord::new(15, 15)),
            detail: format!("goal after day 3 = {:?} (expected Camp)", sim.goal(oren)),
        });
    }

    // Stopped agents are frozen solid.
    {
        let mut sim = Simulation::new(
            courier_config(),
            TerrainGrid::filled(20, 20, TerrainCategory::Land),
        );
        let idler = sim.spawn_npc("Idler", Coord::new(5, 5)).unwrap();
        sim.set_status(idler, AgentStatus::Stopped).unwrap();

        sim.advance(10);
        results.push(TestResult {
            name: "sched_stopped_agent_frozen".into(),
            passed: sim.position(idler) == Some(Coord::new(5, 5))
                && sim.goal(idler).is_none()
                && sim.progress(idler) == Some(0.0),
            detail: format!(
                "position {:?}, goal {:?} after ten days",
                sim.position(idler),
                sim.goal(idler)
            ),
        });
    }

    results
}

// ── 6. Determinism ──────────────────────────────────────────────────────

const CARAVAN_NAMES: [&str; 6] = ["Mara", "Oren", "Tal", "Bryn", "Caravan", "Trappers"];

/// The demo continent with a mixed population: one steered player, three
/// home-bound riders, two wandering groups.
fn caravan_world(seed: u64) -> Simulation {
    let mut config = SimConfig::default();
    config.seed = seed;
    let mut sim = Simulation::new(config, demo_world());
    for (name, coord) in DEMO_LOCATIONS {
        sim.register_location(name, coord).unwrap();
    }

    let mara = sim.spawn_player("Mara", Coord::new(50, 50)).unwrap();
    sim.set_goal(mara, Coord::new(80, 50)).unwrap();

    for (name, q, r, home) in [
        ("Oren", 96, 40, "Riverside"),
        ("Tal", 137, 28, "Highcamp"),
        ("Bryn", 60, 70, "Southholt"),
    ] {
        let npc = sim.spawn_npc(name, Coord::new(q, r)).unwrap();
        sim.bind_home(npc, home, 10).unwrap();
        sim.set_transport_mode(npc, "horse").unwrap();
    }
    for (name, q, r) in [("Caravan", 40, 30), ("Trappers", 120, 60)] {
        sim.spawn_group(name, Coord::new(q, r)).unwrap();
    }
    sim
}

fn agents_match(a: &Simulation, b: &Simulation) -> Result<(), String> {
    for name in CARAVAN_NAMES {
        let ea = a.find_agent(name).ok_or(format!("{} missing", name))?;
        let eb = b.find_agent(name).ok_or(format!("{} missing", name))?;
        if a.position(ea) != b.position(eb) {
            return Err(format!(
                "{}: {:?} vs {:?}",
                name,
                a.position(ea),
                b.position(eb)
            ));
        }
        if a.goal(ea) != b.goal(eb) {
            return Err(format!("{} goals differ", name));
        }
        if a.progress(ea) != b.progress(eb) {
            return Err(format!("{} progress differs", name));
        }
    }
    Ok(())
}

fn validate_determinism(verbose: bool) -> Vec<TestResult> {
    println!("--- Determinism ---");
    let mut results = Vec::new();

    let mut first = caravan_world(7);
    let mut second = caravan_world(7);
    first.advance(30);
    second.advance(30);

    let outcome = agents_match(&first, &second);
    results.push(TestResult {
        name: "det_same_seed_same_month".into(),
        passed: outcome.is_ok(),
        detail: outcome
            .err()
            .unwrap_or_else(|| "six agents agree after thirty days".into()),
    });
    results.push(TestResult {
        name: "det_clocks_agree".into(),
        passed: first.day() == second.day() && first.day() == 30,
        detail: format!("{} vs {}", first.day(), second.day()),
    });

    if verbose {
        println!("  Caravan positions after 30 days (seed 7):");
        for name in CARAVAN_NAMES {
            if let Some(agent) = first.find_agent(name) {
                if let Some(position) = first.position(agent) {
                    println!("    {:10} ({}, {})", name, position.q, position.r);
                }
            }
        }
    }

    results
}

// ── 7. Persistence ──────────────────────────────────────────────────────

fn validate_persistence(_verbose: bool) -> Vec<TestResult> {
    println!("--- Persistence ---");
    let mut results = Vec::new();

    let mut sim = caravan_world(11);
    sim.advance(5);

    let mut buffer = Vec::new();
    let saved = sim.save(&mut buffer);
    results.push(TestResult {
        name: "save_live_world".into(),
        passed: saved.is_ok(),
        detail: format!("{} bytes written", buffer.len()),
    });

    match Simulation::load(buffer.as_slice()) {
        Ok(loaded) => {
            results.push(TestResult {
                name: "load_clock_survives".into(),
                passed: loaded.day() == sim.day(),
                detail: format!("{} vs {}", loaded.day(), sim.day()),
            });
            results.push(TestResult {
                name: "load_agent_counts_survive".into(),
                passed: loaded.agent_count() == sim.agent_count(),
                detail: format!("{} vs {}", loaded.agent_count(), sim.agent_count()),
            });
            let outcome = agents_match(&sim, &loaded);
            results.push(TestResult {
                name: "load_agent_state_survives".into(),
                passed: outcome.is_ok(),
                detail: outcome
                    .err()
                    .unwrap_or_else(|| "positions, goals, progress all intact".into()),
            });
            results.push(TestResult {
                name: "load_locations_survive".into(),
                passed: loaded.locations().len() == sim.locations().len(),
                detail: format!("{} location(s)", loaded.locations().len()),
            });
        }
        Err(err) => {
            results.push(TestResult {
                name: "load_saved_world".into(),
                passed: false,
                detail: err.to_string(),
            });
        }
    }

    results
}

// ── 8. World Templates ──────────────────────────────────────────────────

fn validate_world_files(_verbose: bool) -> Vec<TestResult> {
    println!("--- World Templates ---");
    let mut results = Vec::new();

    let grid = TerrainGrid::filled(20, 20, TerrainCategory::Land);
    let parsed = WorldFile::from_json(SAMPLE_WORLD_JSON);
    results.push(TestResult {
        name: "world_sample_parses".into(),
        passed: parsed.is_ok(),
        detail: parsed
            .as_ref()
            .err()
            .map(|e| format!("JSON parse error: {}", e))
            .unwrap_or_else(|| "data/sample_world.json".into()),
    });
    let Ok(file) = parsed else {
        return results;
    };

    match file.into_simulation(SimConfig::default(), grid.clone()) {
        Ok(sim) => {
            results.push(TestResult {
                name: "world_spawns_every_agent".into(),
                passed: sim.agent_count() == 3,
                detail: format!("{} agent(s), one of each kind", sim.agent_count()),
            });
            results.push(TestResult {
                name: "world_custom_transport_in_catalog".into(),
                passed: sim.config().transports.resolve("camel_train").speed == 1.4,
                detail: "camel_train resolves at speed 1.4".into(),
            });
            let ferry = sim.find_agent("Ferry");
            results.push(TestResult {
                name: "world_equipment_arrives_with_agent".into(),
                passed: ferry
                    .and_then(|f| sim.transport(f))
                    .map(|t| t.has_equipment("boat"))
                    .unwrap_or(false),
                detail: "the Ferry carries its boat".into(),
            });

            let exported = WorldFile::from_simulation(&sim);
            let reloaded = exported
                .to_json()
                .ok()
                .and_then(|json| WorldFile::from_json(&json).ok())
                .and_then(|f| f.into_simulation(SimConfig::default(), grid).ok());
            results.push(TestResult {
                name: "world_export_reloads_identically".into(),
                passed: reloaded
                    .as_ref()
                    .map(|s| {
                        s.agent_count() == sim.agent_count()
                            && s.locations().len() == sim.locations().len()
                    })
                    .unwrap_or(false),
                detail: "export, reparse, rebuild".into(),
            });
        }
        Err(err) => {
            results.push(TestResult {
                name: "world_sample_builds".into(),
                passed: false,
                detail: err.to_string(),
            });
        }
    }

    let bad = r#"{ "npcs": [ { "name": "Oren", "position": { "q": 2, "r": 3 }, "transport": "dragon" } ] }"#;
    let rejected = WorldFile::from_json(bad)
        .unwrap()
        .into_simulation(
            SimConfig::default(),
            TerrainGrid::filled(20, 20, TerrainCategory::Land),
        )
        .is_err();
    results.push(TestResult {
        name: "world_unknown_transport_rejected".into(),
        passed: rejected,
        detail: "nobody rides a dragon".into(),
    });

    let degenerate = r#"{
        "custom_transports": {
            "sled": { "speed": 0.0, "restricted": [], "cost_factor": 1.0 }
        }
    }"#;
    let rejected = WorldFile::from_json(degenerate)
        .unwrap()
        .into_simulation(
            SimConfig::default(),
            TerrainGrid::filled(20, 20, TerrainCategory::Land),
        )
        .is_err();
    results.push(TestResult {
        name: "world_degenerate_transport_rejected".into(),
        passed: rejected,
        detail: "a zero-speed mode cannot load".into(),
    });

    results
}
