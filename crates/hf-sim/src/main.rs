//! hf-sim command line
//!
//! Usage:
//!   hf-sim simulate --spins 1000000 --seed 42     - RTP run over parallel batches
//!   hf-sim simulate --output report.md            - Also save the report (.json, .md, text)
//!   hf-sim play --spins 50 --bet 5                - Turn-based session, one step at a time
//!   hf-sim dump-config --format yaml              - Print the built-in game definition

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use hf_sim::{ReportFormat, Session, SessionEvent, SimConfig, Simulator, resolve_seed};
use hf_slot::{GameConfig, SlotEngine};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[derive(Parser)]
#[command(name = "hf-sim", about = "Sticky-tile respin slot simulator", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a batch simulation and print an RTP report
    Simulate {
        /// Number of base spins
        #[arg(short, long, default_value_t = 100_000)]
        spins: u64,
        /// Seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,
        /// Stake per spin
        #[arg(short, long, default_value_t = 1)]
        bet: u64,
        /// Parallel batches
        #[arg(long, default_value_t = 8)]
        batches: usize,
        /// Game definition (.json, .yaml or .yml)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
        /// Also write the report to a file (.json, .md or text)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Play a turn-based session
    Play {
        /// Number of base spins
        #[arg(short, long, default_value_t = 20)]
        spins: u64,
        /// Seed for a reproducible session
        #[arg(long)]
        seed: Option<u64>,
        /// Stake per spin, clamped to 1..=50
        #[arg(short, long, default_value_t = 1)]
        bet: u64,
        /// Starting balance
        #[arg(long, default_value_t = 1000)]
        balance: u64,
        /// Game definition (.json, .yaml or .yml)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Print the built-in game definition
    DumpConfig {
        #[arg(short, long, value_enum, default_value_t = DumpFormat::Json)]
        format: DumpFormat,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum DumpFormat {
    Json,
    Yaml,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate {
            spins,
            seed,
            bet,
            batches,
            config,
            json,
            output,
        } => {
            let mut sim = SimConfig::default()
                .with_spins(spins)
                .with_bet(bet)
                .with_batches(batches);
            sim.seed = seed;
            simulate(config.as_deref(), sim, json, output.as_deref())
        }
        Commands::Play {
            spins,
            seed,
            bet,
            balance,
            config,
        } => {
            let mut sim = SimConfig::default()
                .with_spins(spins)
                .with_bet(bet)
                .with_starting_balance(balance);
            sim.seed = seed;
            play(config.as_deref(), sim)
        }
        Commands::DumpConfig { format } => dump_config(format),
    }
}

fn load_engine(path: Option<&Path>) -> Result<SlotEngine> {
    let config = match path {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("Failed to load game config {}", path.display()))?,
        None => GameConfig::three_pigs(),
    };
    SlotEngine::new(config).context("Invalid game config")
}

fn simulate(
    path: Option<&Path>,
    config: SimConfig,
    json: bool,
    output: Option<&Path>,
) -> Result<()> {
    let engine = load_engine(path)?;
    let report = Simulator::new(engine, config)?.run()?;

    if json {
        println!("{}", report.to_json()?);
    } else {
        print!("{}", report.to_text());
    }

    if let Some(output) = output {
        let format = match output.extension().and_then(|ext| ext.to_str()) {
            Some("json") => ReportFormat::Json,
            Some("md") => ReportFormat::Markdown,
            _ => ReportFormat::Text,
        };
        report
            .save(output, format)
            .with_context(|| format!("Failed to write report {}", output.display()))?;
        log::info!("Report written to {}", output.display());
    }
    Ok(())
}

fn play(path: Option<&Path>, config: SimConfig) -> Result<()> {
    let engine = load_engine(path)?;
    let seed = resolve_seed(config.seed);
    let spins = config.spins;
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut session = Session::new(engine, config)?;

    log::info!(
        "Session start: balance {}, bet {}, seed {}",
        session.balance(),
        session.bet(),
        seed
    );

    let mut played = 0;
    while played < spins || session.in_feature() {
        if !session.in_feature() && !session.can_spin() {
            log::warn!(
                "Balance {} cannot cover bet {}, stopping",
                session.balance(),
                session.bet()
            );
            break;
        }

        match session.step(&mut rng)? {
            SessionEvent::Spin(outcome) => {
                played += 1;
                log::info!(
                    "Spin {:>4}: win {:>5} (x{:.1}), holds {}, balance {}",
                    played,
                    outcome.total_win,
                    outcome.win_ratio(),
                    outcome.hold_count,
                    session.balance()
                );
                for line in &outcome.line_wins {
                    log::debug!(
                        "  line {:>2}: {} x{} pays {}",
                        line.line_index + 1,
                        line.symbol,
                        line.match_count,
                        line.multiplier
                    );
                }
                if outcome.feature_triggered {
                    log::info!("Respins triggered with {} HOLD symbols", outcome.hold_count);
                }
            }
            SessionEvent::Tick {
                outcome,
                feature_win,
            } => {
                log::info!(
                    "  respin {:>2}: landed {:?}, upgraded {:?}, {} left",
                    outcome.tick,
                    outcome.landed,
                    outcome.upgraded,
                    outcome.spins_remaining
                );
                if let Some(win) = feature_win {
                    log::info!("  feature win {}, balance {}", win, session.balance());
                }
            }
        }
    }

    if played == 0 && spins > 0 {
        bail!(
            "Balance {} cannot cover a single bet of {}",
            session.balance(),
            session.bet()
        );
    }

    let stats = session.stats();
    println!(
        "Played {} spins: balance {}, won {}, RTP {:.2}%, features {}",
        stats.total_spins,
        session.balance(),
        stats.total_win(),
        stats.rtp(),
        stats.features_triggered
    );
    Ok(())
}

fn dump_config(format: DumpFormat) -> Result<()> {
    let config = GameConfig::three_pigs();
    let text = match format {
        DumpFormat::Json => config.to_json_pretty()?,
        DumpFormat::Yaml => config.to_yaml()?,
    };
    println!("{text}");
    Ok(())
}
