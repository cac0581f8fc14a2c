//! Class and equipment definitions keyed by id.

use std::collections::BTreeMap;
use std::sync::Arc;

use combat_core::{Armor, ClassDefinition, Skill, Weapon};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("unknown class `{0}`")]
    UnknownClass(String),
    #[error("unknown weapon `{0}`")]
    UnknownWeapon(String),
    #[error("unknown armor `{0}`")]
    UnknownArmor(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub classes: BTreeMap<String, ClassDefinition>,
    #[serde(default)]
    pub weapons: BTreeMap<String, Weapon>,
    #[serde(default)]
    pub armors: BTreeMap<String, Armor>,
}

impl Catalog {
    /// Definitions available without any configuration file.
    pub fn builtin() -> Self {
        let mut catalog = Self::default();
        catalog.classes.insert(
            "warrior".into(),
            class("Warrior", 60.0, 30.0, 0.8, 0.9, 1.2, ("Ferocious Kick", 12.0, 6.0)),
        );
        catalog.classes.insert(
            "thief".into(),
            class("Thief", 50.0, 25.0, 1.5, 1.2, 1.0, ("Piercing Stab", 15.0, 5.0)),
        );
        catalog.classes.insert(
            "knight".into(),
            class("Knight", 65.0, 20.0, 1.0, 1.0, 1.5, ("Shield Bash", 10.0, 4.0)),
        );

        for (id, name, damage, stamina_per_hit) in [
            ("short_sword", "Short Sword", 6.0, 1.5),
            ("dagger", "Dagger", 4.0, 1.0),
            ("axe", "Axe", 8.0, 2.5),
        ] {
            catalog.weapons.insert(
                id.into(),
                Weapon {
                    name: name.into(),
                    damage,
                    stamina_per_hit,
                },
            );
        }

        for (id, name, defence, stamina_per_turn) in [
            ("leather", "Leather Jerkin", 2.0, 0.8),
            ("chainmail", "Chainmail", 4.0, 1.5),
            ("plate", "Plate Armor", 6.0, 2.5),
        ] {
            catalog.armors.insert(
                id.into(),
                Armor {
                    name: name.into(),
                    defence,
                    stamina_per_turn,
                },
            );
        }
        catalog
    }

    /// Adds `other`'s entries, replacing any with the same id.
    pub fn merge(&mut self, other: Catalog) {
        self.classes.extend(other.classes);
        self.weapons.extend(other.weapons);
        self.armors.extend(other.armors);
    }

    pub fn class(&self, id: &str) -> Result<Arc<ClassDefinition>, CatalogError> {
        self.classes
            .get(id)
            .cloned()
            .map(Arc::new)
            .ok_or_else(|| CatalogError::UnknownClass(id.to_owned()))
    }

    pub fn weapon(&self, id: &str) -> Result<Arc<Weapon>, CatalogError> {
        self.weapons
            .get(id)
            .cloned()
            .map(Arc::new)
            .ok_or_else(|| CatalogError::UnknownWeapon(id.to_owned()))
    }

    pub fn armor(&self, id: &str) -> Result<Arc<Armor>, CatalogError> {
        self.armors
            .get(id)
            .cloned()
            .map(Arc::new)
            .ok_or_else(|| CatalogError::UnknownArmor(id.to_owned()))
    }
}

fn class(
    name: &str,
    max_health: f64,
    max_stamina: f64,
    attack: f64,
    stamina: f64,
    armor: f64,
    (skill_name, skill_damage, skill_stamina): (&str, f64, f64),
) -> ClassDefinition {
    ClassDefinition {
        name: name.into(),
        max_health,
        max_stamina,
        attack,
        stamina,
        armor,
        skill: Skill {
            name: skill_name.into(),
            damage: skill_damage,
            stamina: skill_stamina,
        },
    }
}
