//! Combat state of a single hero and the rules that mutate it.
//!
//! Health and stamina are stored at full precision; [`Combatant::health`] and
//! [`Combatant::stamina`] round to one decimal at the read boundary. Running
//! out of stamina never fails loudly: the affected operation returns `None`
//! (or zero mitigation) and leaves state untouched.

use std::fmt;
use std::ops::RangeInclusive;
use std::sync::Arc;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::definitions::{Armor, ClassDefinition, Weapon};

/// Fraction of the class stamina multiplier recovered each round.
pub const BASE_STAMINA_PER_ROUND: f64 = 0.4;

/// Range of the computer's skill roll.
pub const SKILL_ROLL_RANGE: RangeInclusive<u32> = 1..=100;

/// Rolls strictly below this value trigger the computer's skill (10 in 100).
pub const SKILL_ROLL_THRESHOLD: u32 = 11;

/// Rounds to one decimal place for reporting.
///
/// Goes through exact decimal formatting, so a value sitting exactly on a
/// binary half rounds to even (`2.25` -> `2.2`) and `0.35`, stored just
/// below the tie, rounds down.
pub fn round1(value: f64) -> f64 {
    format!("{value:.1}").parse().unwrap_or(value)
}

pub fn skill_roll_triggers(roll: u32) -> bool {
    roll < SKILL_ROLL_THRESHOLD
}

/// Who decides a combatant's actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Controller {
    Player,
    Computer,
}

impl Controller {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Player => "player",
            Self::Computer => "computer",
        }
    }
}

impl fmt::Display for Controller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct Combatant {
    controller: Controller,
    class: Arc<ClassDefinition>,
    weapon: Arc<Weapon>,
    armor: Arc<Armor>,
    name: String,
    health: f64,
    stamina: f64,
    skill_used: bool,
}

impl Combatant {
    /// Builds a combatant at full health and stamina with its skill unspent.
    pub fn new(
        controller: Controller,
        class: Arc<ClassDefinition>,
        weapon: Arc<Weapon>,
        armor: Arc<Armor>,
        name: impl Into<String>,
    ) -> Self {
        let health = class.max_health;
        let stamina = class.max_stamina;
        Self {
            controller,
            class,
            weapon,
            armor,
            name: name.into(),
            health,
            stamina,
            skill_used: false,
        }
    }

    pub fn player(
        class: Arc<ClassDefinition>,
        weapon: Arc<Weapon>,
        armor: Arc<Armor>,
        name: impl Into<String>,
    ) -> Self {
        Self::new(Controller::Player, class, weapon, armor, name)
    }

    pub fn computer(
        class: Arc<ClassDefinition>,
        weapon: Arc<Weapon>,
        armor: Arc<Armor>,
        name: impl Into<String>,
    ) -> Self {
        Self::new(Controller::Computer, class, weapon, armor, name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn controller(&self) -> Controller {
        self.controller
    }

    pub fn class(&self) -> &ClassDefinition {
        &self.class
    }

    pub fn weapon(&self) -> &Weapon {
        &self.weapon
    }

    pub fn armor(&self) -> &Armor {
        &self.armor
    }

    /// Health rounded to one decimal.
    pub fn health(&self) -> f64 {
        round1(self.health)
    }

    /// Stamina rounded to one decimal.
    pub fn stamina(&self) -> f64 {
        round1(self.stamina)
    }

    pub fn raw_health(&self) -> f64 {
        self.health
    }

    pub fn raw_stamina(&self) -> f64 {
        self.stamina
    }

    pub fn skill_used(&self) -> bool {
        self.skill_used
    }

    pub fn is_defeated(&self) -> bool {
        self.health <= 0.0
    }

    /// Raises armor against an incoming hit.
    ///
    /// Charges `armor.stamina_per_turn` and returns the class-scaled defence,
    /// or returns `0.0` without charging when stamina cannot cover the cost.
    pub fn armor_mitigation(&mut self) -> f64 {
        if self.stamina < self.armor.stamina_per_turn {
            debug!(
                target: "combat.armor",
                name = %self.name,
                stamina = self.stamina,
                cost = self.armor.stamina_per_turn,
                "armor not raised"
            );
            return 0.0;
        }
        self.stamina -= self.armor.stamina_per_turn;
        let mitigation = self.armor.defence * self.class.armor;
        debug!(
            target: "combat.armor",
            name = %self.name,
            mitigation,
            stamina = self.stamina,
            "armor raised"
        );
        mitigation
    }

    /// Resolves a weapon strike against `target` and returns the damage to
    /// apply, or `None` when the attacker is too tired to swing.
    ///
    /// The target raises armor as part of the exchange, so its stamina may
    /// drop even though its health is untouched until [`Combatant::take_hit`].
    pub fn attempt_hit(&mut self, target: &mut Combatant) -> Option<f64> {
        if self.stamina < self.weapon.stamina_per_hit {
            debug!(
                target: "combat.hit",
                attacker = %self.name,
                stamina = self.stamina,
                cost = self.weapon.stamina_per_hit,
                "too tired to hit"
            );
            return None;
        }
        let raw_damage = self.weapon.damage * self.class.attack;
        let mitigation = target.armor_mitigation();
        let dealt = raw_damage - mitigation;
        self.stamina -= self.weapon.stamina_per_hit;

        let damage = if dealt < 0.0 { 0.0 } else { round1(dealt) };
        info!(
            target: "combat.hit",
            attacker = %self.name,
            defender = %target.name,
            raw_damage,
            mitigation,
            damage,
            "hit resolved"
        );
        Some(damage)
    }

    /// Subtracts `damage` from health, clamping at zero.
    ///
    /// Callers pass non-negative damage; negative values are not rejected.
    pub fn take_hit(&mut self, damage: f64) {
        self.health -= damage;
        if self.health < 0.0 {
            self.health = 0.0;
        }
        info!(
            target: "combat.health",
            name = %self.name,
            damage,
            health = round1(self.health),
            max = self.class.max_health,
            "health updated"
        );
    }

    /// Recovers `BASE_STAMINA_PER_ROUND * class.stamina`, capped at `max_stamina`.
    pub fn regenerate_stamina(&mut self) {
        let delta = BASE_STAMINA_PER_ROUND * self.class.stamina;
        if self.stamina + delta <= self.class.max_stamina {
            self.stamina += delta;
        } else {
            self.stamina = self.class.max_stamina;
        }
        debug!(
            target: "combat.stamina",
            name = %self.name,
            delta,
            stamina = round1(self.stamina),
            "stamina regenerated"
        );
    }

    /// Spends the once-per-battle skill and returns its damage.
    ///
    /// Requires enough stamina to cover the skill cost, but the cost is not
    /// deducted.
    pub fn use_skill(&mut self) -> Option<f64> {
        if self.skill_used || self.stamina - self.class.skill.stamina < 0.0 {
            debug!(
                target: "combat.skill",
                name = %self.name,
                skill_used = self.skill_used,
                stamina = self.stamina,
                "skill unavailable"
            );
            return None;
        }
        self.skill_used = true;
        let damage = round1(self.class.skill.damage);
        info!(
            target: "combat.skill",
            name = %self.name,
            skill = %self.class.skill.name,
            damage,
            "skill used"
        );
        Some(damage)
    }

    /// Takes this combatant's turn against `target`.
    ///
    /// A computer-controlled combatant rolls on [`SKILL_ROLL_RANGE`] first and
    /// may spend its skill; the skill's damage is not part of the returned
    /// value. Both variants then strike with their weapon.
    pub fn hit<R: Rng + ?Sized>(&mut self, target: &mut Combatant, rng: &mut R) -> Option<f64> {
        match self.controller {
            Controller::Player => self.attempt_hit(target),
            Controller::Computer => {
                let roll = rng.gen_range(SKILL_ROLL_RANGE);
                if skill_roll_triggers(roll)
                    && self.stamina >= self.class.skill.stamina
                    && !self.skill_used
                {
                    debug!(target: "combat.skill", name = %self.name, roll, "skill roll passed");
                    self.use_skill();
                }
                self.attempt_hit(target)
            }
        }
    }
}
