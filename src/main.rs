use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use sin_parser::{FeatureTier, RegionCategory, Settings};

/// Decode 16-digit Single Identity Numbers into region, birth date and gender.
#[derive(Parser, Debug)]
#[command(name = "sin-parser", version, about)]
struct Cli {
    /// Region reference table (overrides SIN_REGION_TABLE)
    #[arg(long, global = true)]
    regions: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decode one or more numbers and print them as JSON
    Parse {
        /// Numbers to decode
        #[arg(required = true)]
        sins: Vec<String>,

        /// minimal (no age/zodiac) or full (overrides SIN_TIER)
        #[arg(long)]
        tier: Option<FeatureTier>,

        /// Reference date, YYYY-MM-DD (defaults to today)
        #[arg(long)]
        today: Option<NaiveDate>,

        /// One line per record instead of indented JSON
        #[arg(long)]
        compact: bool,
    },
    /// Show which region table is in use
    Info,
}

fn main() -> Result<()> {
    // Logs go to stderr; stdout carries the JSON
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut settings = Settings::from_env();
    if let Some(path) = cli.regions {
        settings.region_table = path;
    }

    match cli.command {
        Command::Parse {
            sins,
            tier,
            today,
            compact,
        } => {
            if let Some(tier) = tier {
                settings.tier = tier;
            }
            run_parse(&settings, &sins, today, compact)
        }
        Command::Info => run_info(&settings),
    }
}

fn run_parse(
    settings: &Settings,
    sins: &[String],
    today: Option<NaiveDate>,
    compact: bool,
) -> Result<()> {
    let decoder = settings.build_decoder()?;
    let today = today.unwrap_or_else(|| chrono::Local::now().date_naive());

    let mut failed = 0;
    for sin in sins {
        match decoder.parse_at(sin, today) {
            Ok(identity) => {
                let json = if compact {
                    serde_json::to_string(&identity)?
                } else {
                    serde_json::to_string_pretty(&identity)?
                };
                println!("{}", json);
            }
            Err(e) => {
                failed += 1;
                eprintln!("❌ {}: {}", sin, e);
            }
        }
    }

    if failed > 0 {
        return Err(anyhow!("{} of {} numbers failed to decode", failed, sins.len()));
    }
    Ok(())
}

fn run_info(settings: &Settings) -> Result<()> {
    let decoder = settings.build_decoder()?;
    let table = decoder.table();

    println!("🗺️  Region table: {}", settings.region_table.display());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("   digest:    {}", table.digest());
    println!("   provinces: {}", table.len(RegionCategory::Province));
    println!("   cities:    {}", table.len(RegionCategory::City));
    println!("   districts: {}", table.len(RegionCategory::District));
    println!("   tier:      {}", decoder.tier());

    Ok(())
}
