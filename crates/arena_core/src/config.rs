use std::fs;
use std::path::{Path, PathBuf};

use combat_core::{Combatant, Controller, DEFAULT_SEED};
use serde::Deserialize;
use thiserror::Error;

use crate::catalog::{Catalog, CatalogError};

pub const DEFAULT_MAX_ROUNDS: u32 = 100;
pub const DEFAULT_TRACE_FILTER: &str = "info";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid arena config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArenaConfig {
    pub player: FighterSpec,
    pub enemy: FighterSpec,
    #[serde(default)]
    pub battle: BattleSettings,
    #[serde(default)]
    pub report: Option<ReportConfig>,
    #[serde(default)]
    pub telemetry: Option<TelemetryConfig>,
    /// Extra definitions layered over [`Catalog::builtin`].
    #[serde(default)]
    pub catalog: Option<Catalog>,
}

impl ArenaConfig {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&data)
    }

    pub fn from_toml_str(data: &str) -> Result<Self, ConfigError> {
        let cfg: ArenaConfig = toml::from_str(data)?;
        Ok(cfg)
    }

    pub fn catalog(&self) -> Catalog {
        let mut catalog = Catalog::builtin();
        if let Some(extra) = self.catalog.clone() {
            catalog.merge(extra);
        }
        catalog
    }

    /// Resolves both fighters, failing on the first unknown definition id.
    pub fn build_fighters(&self) -> Result<(Combatant, Combatant), ConfigError> {
        let catalog = self.catalog();
        let player = self.player.build(&catalog, Controller::Player)?;
        let enemy = self.enemy.build(&catalog, Controller::Computer)?;
        Ok((player, enemy))
    }

    pub fn trace_filter(&self) -> &str {
        self.telemetry
            .as_ref()
            .and_then(|t| t.trace_filter.as_deref())
            .unwrap_or(DEFAULT_TRACE_FILTER)
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            player: FighterSpec {
                name: "Hero".into(),
                class: "warrior".into(),
                weapon: "short_sword".into(),
                armor: "chainmail".into(),
            },
            enemy: FighterSpec {
                name: "Raider".into(),
                class: "thief".into(),
                weapon: "dagger".into(),
                armor: "leather".into(),
            },
            battle: BattleSettings::default(),
            report: None,
            telemetry: None,
            catalog: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct FighterSpec {
    pub name: String,
    pub class: String,
    pub weapon: String,
    pub armor: String,
}

impl FighterSpec {
    pub fn build(
        &self,
        catalog: &Catalog,
        controller: Controller,
    ) -> Result<Combatant, CatalogError> {
        Ok(Combatant::new(
            controller,
            catalog.class(&self.class)?,
            catalog.weapon(&self.weapon)?,
            catalog.armor(&self.armor)?,
            self.name.clone(),
        ))
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct BattleSettings {
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub max_rounds: Option<u32>,
    /// Round on which the player spends its skill instead of hitting.
    #[serde(default)]
    pub player_skill_round: Option<u32>,
}

impl BattleSettings {
    pub fn max_rounds_or_default(&self) -> u32 {
        self.max_rounds.unwrap_or(DEFAULT_MAX_ROUNDS)
    }

    /// `override_seed` wins over the configured seed, which wins over
    /// [`DEFAULT_SEED`].
    pub fn seed_or(&self, override_seed: Option<u64>) -> u64 {
        override_seed.or(self.seed).unwrap_or(DEFAULT_SEED)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReportConfig {
    pub path: PathBuf,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct TelemetryConfig {
    #[serde(default)]
    pub trace_filter: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[player]
name = "Aria"
class = "knight"
weapon = "spear"
armor = "plate"

[enemy]
name = "Goblin"
class = "thief"
weapon = "dagger"
armor = "leather"

[battle]
seed = 7
player_skill_round = 3

[telemetry]
trace_filter = "combat=debug"

[catalog.weapons.spear]
name = "Spear"
damage = 7.5
stamina_per_hit = 2.0
"#;

    #[test]
    fn parses_full_config() {
        let cfg = ArenaConfig::from_toml_str(SAMPLE).unwrap();
        assert_eq!(cfg.battle.seed, Some(7));
        assert_eq!(cfg.battle.player_skill_round, Some(3));
        assert_eq!(cfg.battle.max_rounds_or_default(), DEFAULT_MAX_ROUNDS);
        assert_eq!(cfg.trace_filter(), "combat=debug");
        assert!(cfg.report.is_none());

        let (player, enemy) = cfg.build_fighters().unwrap();
        assert_eq!(player.controller(), Controller::Player);
        assert_eq!(player.weapon().name, "Spear");
        assert_eq!(player.health(), 65.0);
        assert_eq!(enemy.controller(), Controller::Computer);
        assert_eq!(enemy.name(), "Goblin");
    }

    #[test]
    fn unknown_class_fails_build() {
        let mut cfg = ArenaConfig::default();
        cfg.enemy.class = "dragon".into();
        let err = cfg.build_fighters().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Catalog(CatalogError::UnknownClass(ref id)) if id == "dragon"
        ));
    }

    #[test]
    fn missing_fighter_is_a_parse_error() {
        let err = ArenaConfig::from_toml_str("[player]\nname = \"x\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = ArenaConfig::from_path(Path::new("does/not/exist.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn override_seed_beats_configured_seed() {
        let cfg = ArenaConfig::from_toml_str(SAMPLE).unwrap();
        assert_eq!(cfg.battle.seed_or(Some(99)), 99);
        assert_eq!(cfg.battle.seed_or(None), 7);
        assert_eq!(BattleSettings::default().seed_or(None), DEFAULT_SEED);
    }

    #[test]
    fn default_config_builds() {
        let cfg = ArenaConfig::default();
        assert_eq!(cfg.trace_filter(), DEFAULT_TRACE_FILTER);
        let (player, enemy) = cfg.build_fighters().unwrap();
        assert_eq!(player.class().name, "Warrior");
        assert_eq!(enemy.class().name, "Thief");
    }
}
