pub mod battle;
pub mod catalog;
pub mod config;
pub mod report;

pub use battle::{run_battle, ActionKind, Battle, BattleOptions, Outcome, TurnRecord};
pub use catalog::{Catalog, CatalogError};
pub use config::{ArenaConfig, BattleSettings, ConfigError, FighterSpec};
pub use report::{BattleReport, FighterSummary};
