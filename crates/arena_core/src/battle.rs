//! Round sequencing for a player against a computer-controlled enemy.
//!
//! Each round regenerates both fighters, then lets the player act and, if the
//! enemy still stands, the enemy. Damage returned by an action is applied to
//! the opponent through [`Combatant::take_hit`].

use combat_core::{CombatRng, Combatant, Controller};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::{ArenaConfig, BattleSettings, ConfigError};
use crate::report::BattleReport;

pub struct BattleOptions {
    pub seed: u64,
    pub run_id: String,
}

impl BattleOptions {
    pub fn new(seed: u64, run_id: impl Into<String>) -> Self {
        Self {
            seed,
            run_id: run_id.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    PlayerWon,
    EnemyWon,
    Draw,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Hit,
    Skill,
}

/// One fighter's action and both fighters' rounded vitals afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TurnRecord {
    pub round: u32,
    pub actor: Controller,
    pub action: ActionKind,
    /// `None` when the actor lacked the stamina to act.
    pub damage: Option<f64>,
    /// Set when the actor spent its skill during this turn.
    pub skill_spent: bool,
    pub player_health: f64,
    pub player_stamina: f64,
    pub enemy_health: f64,
    pub enemy_stamina: f64,
}

pub struct Battle {
    player: Combatant,
    enemy: Combatant,
    rng: CombatRng,
    max_rounds: u32,
    player_skill_round: Option<u32>,
    round: u32,
    outcome: Option<Outcome>,
    turns: Vec<TurnRecord>,
}

impl Battle {
    pub fn new(
        player: Combatant,
        enemy: Combatant,
        rng: CombatRng,
        settings: &BattleSettings,
    ) -> Self {
        Self {
            player,
            enemy,
            rng,
            max_rounds: settings.max_rounds_or_default(),
            player_skill_round: settings.player_skill_round,
            round: 0,
            outcome: None,
            turns: Vec::new(),
        }
    }

    pub fn from_config(config: &ArenaConfig, seed: u64) -> Result<Self, ConfigError> {
        let (player, enemy) = config.build_fighters()?;
        Ok(Self::new(player, enemy, CombatRng::new(seed), &config.battle))
    }

    pub fn player(&self) -> &Combatant {
        &self.player
    }

    pub fn enemy(&self) -> &Combatant {
        &self.enemy
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn turns(&self) -> &[TurnRecord] {
        &self.turns
    }

    /// Plays one round and returns the outcome once the battle is decided.
    /// Further calls after a decision do nothing.
    pub fn play_round(&mut self) -> Option<Outcome> {
        if self.outcome.is_some() {
            return self.outcome;
        }
        self.round += 1;
        self.player.regenerate_stamina();
        self.enemy.regenerate_stamina();

        self.player_turn();
        if self.enemy.is_defeated() {
            return self.finish(Outcome::PlayerWon);
        }

        self.enemy_turn();
        if self.player.is_defeated() {
            return self.finish(Outcome::EnemyWon);
        }

        if self.round >= self.max_rounds {
            return self.finish(Outcome::Draw);
        }
        None
    }

    pub fn run(&mut self) -> Outcome {
        loop {
            if let Some(outcome) = self.play_round() {
                return outcome;
            }
        }
    }

    pub fn into_report(self, id: impl Into<String>) -> BattleReport {
        BattleReport::new(
            id,
            self.rng.seed(),
            self.outcome.unwrap_or(Outcome::Draw),
            self.round,
            &self.player,
            &self.enemy,
            self.turns,
        )
    }

    fn player_turn(&mut self) {
        if self.player_skill_round == Some(self.round) {
            if let Some(damage) = self.player.use_skill() {
                self.enemy.take_hit(damage);
                self.record(Controller::Player, ActionKind::Skill, Some(damage), true);
                return;
            }
        }
        let damage = self.player.hit(&mut self.enemy, &mut self.rng);
        if let Some(damage) = damage {
            self.enemy.take_hit(damage);
        }
        self.record(Controller::Player, ActionKind::Hit, damage, false);
    }

    fn enemy_turn(&mut self) {
        let skill_before = self.enemy.skill_used();
        let damage = self.enemy.hit(&mut self.player, &mut self.rng);
        if let Some(damage) = damage {
            self.player.take_hit(damage);
        }
        let skill_spent = !skill_before && self.enemy.skill_used();
        self.record(Controller::Computer, ActionKind::Hit, damage, skill_spent);
    }

    fn record(
        &mut self,
        actor: Controller,
        action: ActionKind,
        damage: Option<f64>,
        skill_spent: bool,
    ) {
        self.turns.push(TurnRecord {
            round: self.round,
            actor,
            action,
            damage,
            skill_spent,
            player_health: self.player.health(),
            player_stamina: self.player.stamina(),
            enemy_health: self.enemy.health(),
            enemy_stamina: self.enemy.stamina(),
        });
    }

    fn finish(&mut self, outcome: Outcome) -> Option<Outcome> {
        info!(
            target: "arena.battle",
            ?outcome,
            rounds = self.round,
            player_health = self.player.health(),
            enemy_health = self.enemy.health(),
            "battle finished"
        );
        self.outcome = Some(outcome);
        self.outcome
    }
}

/// Builds the fighters from `config`, plays the battle to completion and
/// returns its report.
pub fn run_battle(
    config: &ArenaConfig,
    options: &BattleOptions,
) -> Result<BattleReport, ConfigError> {
    let mut battle = Battle::from_config(config, options.seed)?;
    info!(
        target: "arena.battle",
        run_id = %options.run_id,
        seed = options.seed,
        player = battle.player().name(),
        enemy = battle.enemy().name(),
        "battle started"
    );
    battle.run();
    Ok(battle.into_report(options.run_id.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(max_rounds: u32, player_skill_round: Option<u32>) -> BattleSettings {
        BattleSettings {
            seed: None,
            max_rounds: Some(max_rounds),
            player_skill_round,
        }
    }

    #[test]
    fn default_battle_reaches_an_outcome() {
        let report = run_battle(&ArenaConfig::default(), &BattleOptions::new(42, "t")).unwrap();
        assert_eq!(report.id, "t");
        assert_eq!(report.seed, 42);
        assert!(report.rounds >= 1);
        match report.outcome {
            Outcome::PlayerWon => assert_eq!(report.enemy.health, 0.0),
            Outcome::EnemyWon => assert_eq!(report.player.health, 0.0),
            Outcome::Draw => assert_eq!(report.rounds, 100),
        }
    }

    #[test]
    fn max_rounds_forces_a_draw() {
        let (player, enemy) = ArenaConfig::default().build_fighters().unwrap();
        let mut battle = Battle::new(player, enemy, CombatRng::new(1), &settings(1, None));
        assert_eq!(battle.play_round(), Some(Outcome::Draw));
        assert_eq!(battle.turns().len(), 2);
        assert_eq!(battle.play_round(), Some(Outcome::Draw));
        assert_eq!(battle.round(), 1);
    }

    #[test]
    fn player_skill_round_spends_skill() {
        let (player, enemy) = ArenaConfig::default().build_fighters().unwrap();
        let mut battle = Battle::new(player, enemy, CombatRng::new(1), &settings(1, Some(1)));
        battle.play_round();
        let first = &battle.turns()[0];
        assert_eq!(first.action, ActionKind::Skill);
        assert_eq!(first.damage, Some(12.0));
        assert_eq!(first.enemy_health, 38.0);
        assert!(battle.player().skill_used());
    }

    #[test]
    fn skill_round_falls_back_to_hit_when_skill_is_spent() {
        let (mut player, enemy) = ArenaConfig::default().build_fighters().unwrap();
        player.use_skill();
        let mut battle = Battle::new(player, enemy, CombatRng::new(1), &settings(1, Some(1)));
        battle.play_round();
        assert_eq!(battle.turns()[0].action, ActionKind::Hit);
    }
}
