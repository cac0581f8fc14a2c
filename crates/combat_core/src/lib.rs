//! Turn-based combat rules for two heroes.

pub mod combatant;
pub mod definitions;
pub mod rng;

pub use combatant::{
    round1, skill_roll_triggers, Combatant, Controller, BASE_STAMINA_PER_ROUND, SKILL_ROLL_RANGE,
    SKILL_ROLL_THRESHOLD,
};
pub use definitions::{Armor, ClassDefinition, Skill, Weapon};
pub use rng::{CombatRng, SimulationParams, DEFAULT_SEED};
