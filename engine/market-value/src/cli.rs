//! # Command Line Interface
//!
//! Runs the rating and valuation engines over JSON files on disk.

use crate::calculator::MarketValueCalculator;
use crate::comparables::ComparableCriteria;
use crate::config::ValuationConfig;
use crate::history::annotate_sales;
use crate::logging::LogFormat;
use crate::models::{MarketValueEstimate, PlayerMetadata, ValuationInputs};
use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use position_ratings::{Position, RatingCalculator, DEFAULT_BEST_POSITIONS};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Player position ratings and market value estimates
#[derive(Parser)]
#[command(name = "mfl-value")]
#[command(about = "Position ratings and market value estimates for MFL players")]
pub struct Cli {
    /// Log level when RUST_LOG is unset
    #[arg(long, default_value = "warn", global = true)]
    pub log_level: String,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Compact, global = true)]
    pub log_format: LogFormat,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rate a player at every position
    Rate {
        /// Player metadata JSON
        #[arg(short, long)]
        input: PathBuf,

        /// Only rate this position
        #[arg(short, long)]
        position: Option<Position>,

        /// Number of best positions to list
        #[arg(long, default_value_t = DEFAULT_BEST_POSITIONS)]
        limit: usize,
    },
    /// Estimate a player's market value
    Estimate {
        /// Valuation snapshot JSON
        #[arg(short, long)]
        input: PathBuf,

        /// TOML configuration; MV_* environment overrides apply otherwise
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Valuation time (RFC 3339), defaults to the current time
        #[arg(long)]
        now: Option<String>,
    },
    /// Show the comparable listing window for a player
    Criteria {
        /// Player metadata JSON
        #[arg(short, long)]
        input: PathBuf,
    },
    /// Print the effective configuration as TOML
    Config {
        /// TOML configuration to load
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

/// CLI handler
pub struct CliHandler {
    ratings: RatingCalculator,
}

impl Default for CliHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl CliHandler {
    pub fn new() -> Self {
        Self { ratings: RatingCalculator::new() }
    }

    /// Handle CLI commands
    pub fn handle_command(&self, command: Commands) -> Result<()> {
        match command {
            Commands::Rate { input, position, limit } => self.rate(&input, position, limit),
            Commands::Estimate { input, config, now } => {
                let config = load_config(config.as_deref())?;
                let now = parse_now(now.as_deref())?;
                let inputs: ValuationInputs = read_json(&input)?;
                let estimate = self.estimate(inputs, config, now)?;
                print_json(&estimate)
            }
            Commands::Criteria { input } => {
                let player: PlayerMetadata = read_json(&input)?;
                print_json(&ComparableCriteria::for_player(&player))
            }
            Commands::Config { config } => {
                let config = load_config(config.as_deref())?;
                print!("{}", config.to_toml()?);
                Ok(())
            }
        }
    }

    fn rate(&self, input: &Path, position: Option<Position>, limit: usize) -> Result<()> {
        let player: PlayerMetadata = read_json(input)?;
        let rating_player = player.for_rating();

        if let Some(position) = position {
            return print_json(&self.ratings.rate_position(&rating_player, position));
        }

        let all = self.ratings.rate_all_positions(&rating_player);
        if !all.success {
            bail!(
                "Could not rate player {}: {}",
                player.id,
                all.error.map(|e| e.message).unwrap_or_default()
            );
        }
        let best = self.ratings.best_positions(&rating_player, limit);
        print_json(&serde_json::json!({
            "ratings": all,
            "bestPositions": best,
            "preciseOverall": self.ratings.precise_overall(&rating_player),
        }))
    }

    /// Fill in what the snapshot leaves to the engines, then estimate
    pub fn estimate(
        &self,
        mut inputs: ValuationInputs,
        config: ValuationConfig,
        now: DateTime<Utc>,
    ) -> Result<MarketValueEstimate> {
        let player = inputs.player.as_ref().context("Snapshot has no player")?;
        let (player_id, rating_player) = (player.id, player.for_rating());

        if inputs.position_ratings.is_none() {
            let all = self.ratings.rate_all_positions(&rating_player);
            if all.success {
                inputs.position_ratings = Some(all.ovr_map());
            } else {
                warn!("Position ratings unavailable for player {}, counting listed positions", player_id);
            }
        }

        inputs.recent_sales = annotate_sales(&inputs.recent_sales, &inputs.progression);

        let estimate = MarketValueCalculator::new(config).estimate(&inputs, now)?;
        info!("Estimate complete: {}", estimate.display_value());
        Ok(estimate)
    }
}

fn load_config(path: Option<&Path>) -> Result<ValuationConfig> {
    let config = match path {
        Some(path) => ValuationConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ValuationConfig::from_env()?,
    };
    Ok(config)
}

fn parse_now(raw: Option<&str>) -> Result<DateTime<Utc>> {
    match raw {
        Some(raw) => Ok(DateTime::parse_from_rfc3339(raw)
            .with_context(|| format!("Invalid --now timestamp '{raw}'"))?
            .with_timezone(&Utc)),
        None => Ok(Utc::now()),
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
