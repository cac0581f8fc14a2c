use combat_core::{Combatant, Controller};
use serde::{Deserialize, Serialize};

use crate::battle::{Outcome, TurnRecord};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BattleReport {
    pub id: String,
    pub seed: u64,
    pub outcome: Outcome,
    pub rounds: u32,
    pub player: FighterSummary,
    pub enemy: FighterSummary,
    pub turns: Vec<TurnRecord>,
}

impl BattleReport {
    pub fn new(
        id: impl Into<String>,
        seed: u64,
        outcome: Outcome,
        rounds: u32,
        player: &Combatant,
        enemy: &Combatant,
        turns: Vec<TurnRecord>,
    ) -> Self {
        Self {
            id: id.into(),
            seed,
            outcome,
            rounds,
            player: FighterSummary::from(player),
            enemy: FighterSummary::from(enemy),
            turns,
        }
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(data: &str) -> serde_json::Result<Self> {
        serde_json::from_str(data)
    }

    pub fn summary_line(&self) -> String {
        format!(
            "Battle {} -> {:?} after {} rounds ({} {:.1} hp vs {} {:.1} hp)",
            self.id,
            self.outcome,
            self.rounds,
            self.player.name,
            self.player.health,
            self.enemy.name,
            self.enemy.health
        )
    }
}

/// Final state of one fighter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FighterSummary {
    pub name: String,
    pub controller: Controller,
    pub class: String,
    pub health: f64,
    pub stamina: f64,
    pub skill_used: bool,
}

impl From<&Combatant> for FighterSummary {
    fn from(combatant: &Combatant) -> Self {
        Self {
            name: combatant.name().to_owned(),
            controller: combatant.controller(),
            class: combatant.class().name.clone(),
            health: combatant.health(),
            stamina: combatant.stamina(),
            skill_used: combatant.skill_used(),
        }
    }
}
