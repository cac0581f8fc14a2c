//! Helpers for deterministic regression tests.

use arena_core::{ArenaConfig, BattleReport, BattleSettings, Catalog, FighterSpec};
use combat_core::{skill_roll_triggers, Armor, ClassDefinition, CombatRng, Skill, Weapon};
use serde_json::json;

pub use combat_core::DEFAULT_SEED;

/// Skill rolls a computer fighter would draw from `seed`.
pub fn sample_skill_rolls(seed: u64, count: usize) -> serde_json::Value {
    let mut rng = CombatRng::new(seed);
    let rolls: Vec<u32> = (0..count).map(|_| rng.gen_range(1..=100)).collect();
    let triggered = rolls.iter().filter(|&&roll| skill_roll_triggers(roll)).count();
    json!({ "seed": seed, "rolls": rolls, "triggered": triggered })
}

/// A small duel with whole-number stats. The enemy's skill costs more stamina
/// than it can ever hold, so its rolls never change the outcome.
pub fn duel_config() -> ArenaConfig {
    let mut catalog = Catalog::default();
    catalog.classes.insert(
        "duelist".into(),
        ClassDefinition {
            name: "Duelist".into(),
            max_health: 20.0,
            max_stamina: 10.0,
            attack: 1.0,
            stamina: 2.5,
            armor: 1.0,
            skill: Skill {
                name: "Lunge".into(),
                damage: 9.0,
                stamina: 4.0,
            },
        },
    );
    catalog.classes.insert(
        "brute".into(),
        ClassDefinition {
            name: "Brute".into(),
            max_health: 16.0,
            max_stamina: 10.0,
            attack: 1.0,
            stamina: 2.5,
            armor: 1.0,
            skill: Skill {
                name: "Rampage".into(),
                damage: 50.0,
                stamina: 100.0,
            },
        },
    );
    catalog.weapons.insert(
        "blade".into(),
        Weapon {
            name: "Blade".into(),
            damage: 6.0,
            stamina_per_hit: 2.0,
        },
    );
    catalog.weapons.insert(
        "club".into(),
        Weapon {
            name: "Club".into(),
            damage: 5.0,
            stamina_per_hit: 3.0,
        },
    );
    catalog.armors.insert(
        "vest".into(),
        Armor {
            name: "Vest".into(),
            defence: 1.0,
            stamina_per_turn: 1.0,
        },
    );
    catalog.armors.insert(
        "hide".into(),
        Armor {
            name: "Hide".into(),
            defence: 2.0,
            stamina_per_turn: 1.0,
        },
    );

    ArenaConfig {
        player: FighterSpec {
            name: "Ines".into(),
            class: "duelist".into(),
            weapon: "blade".into(),
            armor: "vest".into(),
        },
        enemy: FighterSpec {
            name: "Ogg".into(),
            class: "brute".into(),
            weapon: "club".into(),
            armor: "hide".into(),
        },
        battle: BattleSettings {
            seed: Some(DEFAULT_SEED),
            max_rounds: Some(20),
            player_skill_round: Some(2),
        },
        report: None,
        telemetry: None,
        catalog: Some(catalog),
    }
}

/// One line per turn: `round actor action damage | player hp/st | enemy hp/st`.
pub fn trace_lines(report: &BattleReport) -> String {
    report
        .turns
        .iter()
        .map(|turn| {
            let damage = turn
                .damage
                .map(|d| format!("{d:.1}"))
                .unwrap_or_else(|| "-".to_owned());
            format!(
                "{} {} {:?} {}{} | {:.1}/{:.1} | {:.1}/{:.1}",
                turn.round,
                turn.actor,
                turn.action,
                damage,
                if turn.skill_spent { " +skill" } else { "" },
                turn.player_health,
                turn.player_stamina,
                turn.enemy_health,
                turn.enemy_stamina
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
