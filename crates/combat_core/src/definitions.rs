use serde::{Deserialize, Serialize};

/// Once-per-battle special attack granted by a class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    pub damage: f64,
    /// Stamina a hero must hold to trigger the skill.
    pub stamina: f64,
}

/// Class attributes a combatant is built from.
///
/// `attack`, `stamina` and `armor` are multipliers applied to weapon damage,
/// per-round regeneration and armor defence respectively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassDefinition {
    pub name: String,
    pub max_health: f64,
    pub max_stamina: f64,
    pub attack: f64,
    pub stamina: f64,
    pub armor: f64,
    pub skill: Skill,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weapon {
    pub name: String,
    pub damage: f64,
    pub stamina_per_hit: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Armor {
    pub name: String,
    pub defence: f64,
    pub stamina_per_turn: f64,
}
