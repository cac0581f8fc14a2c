use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use arena_core::{run_battle, ArenaConfig, BattleOptions, BattleReport};
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use combat_core::SimulationParams;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about = "Resolve turn-based duels between two heroes")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a battle and emit its JSON report.
    Fight(FightArgs),
    /// List the classes, weapons and armors a config can reference.
    Catalog(CatalogArgs),
    /// Summarize a saved report.
    Report(ReportArgs),
}

#[derive(Args)]
struct FightArgs {
    /// Arena config; the builtin duel is used when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Battle seed. Precedence: this flag, then COMBAT_SEED, then the config's
    /// `[battle].seed`, then 42.
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    id: Option<String>,
}

#[derive(Args)]
struct CatalogArgs {
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args)]
struct ReportArgs {
    #[arg(long)]
    input: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Fight(args) => handle_fight(args),
        Commands::Catalog(args) => handle_catalog(args),
        Commands::Report(args) => handle_report(args),
    }
}

fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .ok();
}

fn load_config(path: Option<&Path>) -> Result<ArenaConfig> {
    match path {
        Some(path) => ArenaConfig::from_path(path)
            .with_context(|| format!("failed to load arena config {}", path.display())),
        None => Ok(ArenaConfig::default()),
    }
}

fn handle_fight(args: FightArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    init_tracing(config.trace_filter());

    let seed = config
        .battle
        .seed_or(args.seed.or_else(SimulationParams::seed_from_env));
    let run_id = args
        .id
        .unwrap_or_else(|| format!("battle-{}", Utc::now().format("%Y%m%dT%H%M%S")));
    let options = BattleOptions::new(seed, run_id);

    let report = run_battle(&config, &options)?;
    let json = report.to_json_pretty()?;
    println!("{json}");

    if let Some(report_cfg) = config.report.as_ref() {
        if let Some(parent) = report_cfg.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&report_cfg.path, &json)
            .with_context(|| format!("failed to write report {}", report_cfg.path.display()))?;
        info!(target: "arena.cli", path = %report_cfg.path.display(), "report written");
    }

    Ok(())
}

fn handle_catalog(args: CatalogArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    init_tracing(config.trace_filter());
    let catalog = config.catalog();

    println!("Classes:");
    for (id, class) in &catalog.classes {
        println!(
            "  {id:<12} {} (hp {:.1}, stamina {:.1}, skill {} {:.1} dmg / {:.1} stamina)",
            class.name,
            class.max_health,
            class.max_stamina,
            class.skill.name,
            class.skill.damage,
            class.skill.stamina
        );
    }
    println!("Weapons:");
    for (id, weapon) in &catalog.weapons {
        println!(
            "  {id:<12} {} ({:.1} dmg, {:.1} stamina/hit)",
            weapon.name, weapon.damage, weapon.stamina_per_hit
        );
    }
    println!("Armors:");
    for (id, armor) in &catalog.armors {
        println!(
            "  {id:<12} {} ({:.1} def, {:.1} stamina/turn)",
            armor.name, armor.defence, armor.stamina_per_turn
        );
    }
    Ok(())
}

fn handle_report(args: ReportArgs) -> Result<()> {
    init_tracing(arena_core::config::DEFAULT_TRACE_FILTER);
    let data = fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    let report = BattleReport::from_json(&data)?;
    println!("{}", report.summary_line());
    Ok(())
}
