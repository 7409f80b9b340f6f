mod render;
mod report;
mod util;
mod verify;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use sadari_game::{GameError, GameRequest, LadderConfig, entropy_seed, play_seeded};
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::{Path, PathBuf};
use std::time::Instant;

use util::{parse_seed, split_csv, split_csv_positional};
use verify::Verifier;

/// Exit code for input the game refuses to play.
const EXIT_INVALID_INPUT: i32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Console,
    Markdown,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "sadari", version)]
#[command(about = "Ladder game (Amidakuji) draws - play a round or verify ladder generation")]
struct Args {
    /// Number of players (2-10); defaults to the number of names given, or 2
    #[arg(short, long)]
    players: Option<usize>,

    /// Player names (comma-separated, blanks fall back to PlayerN)
    #[arg(long, default_value = "")]
    names: String,

    /// Rewards handed out in order to the lowest bottom slots (comma-separated)
    #[arg(long, default_value = "")]
    rewards: String,

    /// Seed for a reproducible draw (decimal or 0x-prefixed hex)
    #[arg(long)]
    seed: Option<String>,

    /// JSON file with ladder settings ({"rows": 18, "rung_probability": 0.3})
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the number of rung rows
    #[arg(long)]
    rows: Option<usize>,

    /// Override the chance of placing each eligible rung
    #[arg(long)]
    probability: Option<f64>,

    /// Highlight the path of this player (1-based) in the drawn ladder
    #[arg(long, value_name = "PLAYER")]
    trace: Option<usize>,

    /// Instead of playing, verify this many seeded ladders per player count
    #[arg(long)]
    verify: Option<usize>,

    /// Output report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Console)]
    report: ReportFormat,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let cfg = load_config(&args)?;
    let mut output_target = OutputTarget::new(args.output.clone())?;
    if matches!(output_target, OutputTarget::File(_)) {
        colored::control::set_override(false);
    }

    if let Some(trials) = args.verify {
        let all_passed = run_verify(&args, cfg, trials, &mut output_target)?;
        output_target.flush_inner()?;
        if !all_passed {
            std::process::exit(1);
        }
        return Ok(());
    }

    match run_game(&args, &cfg, &mut output_target) {
        Ok(()) => {
            output_target.flush_inner()?;
            Ok(())
        }
        Err(GameOutcome::Invalid(message)) => {
            eprintln!("❌ {}", message.red());
            std::process::exit(EXIT_INVALID_INPUT);
        }
        Err(GameOutcome::Failed(err)) => Err(err),
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn load_config(args: &Args) -> Result<LadderConfig> {
    let mut cfg = match args.config.as_deref() {
        Some(path) => read_config_file(path)?,
        None => LadderConfig::default(),
    };
    if let Some(rows) = args.rows {
        cfg.rows = rows;
    }
    if let Some(probability) = args.probability {
        cfg.rung_probability = probability;
    }
    cfg.validate().context("invalid ladder configuration")?;
    log::debug!(
        "ladder config: {} rows, rung probability {:.2}",
        cfg.rows,
        cfg.rung_probability
    );
    Ok(cfg)
}

fn read_config_file(path: &Path) -> Result<LadderConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    LadderConfig::from_json(&raw).with_context(|| format!("failed to parse {}", path.display()))
}

enum GameOutcome {
    Invalid(String),
    Failed(anyhow::Error),
}

impl From<anyhow::Error> for GameOutcome {
    fn from(err: anyhow::Error) -> Self {
        Self::Failed(err)
    }
}

fn build_request(args: &Args) -> Result<GameRequest, GameOutcome> {
    let names = if args.names.trim().is_empty() {
        Vec::new()
    } else {
        split_csv_positional(&args.names)
    };
    let num_players = args
        .players
        .unwrap_or_else(|| names.len().max(sadari_game::MIN_PLAYERS));
    let rewards = split_csv(&args.rewards);
    GameRequest::new(num_players, &names, &rewards)
        .map_err(|err| GameOutcome::Invalid(err.to_string()))
}

fn run_game(args: &Args, cfg: &LadderConfig, out: &mut OutputTarget) -> Result<(), GameOutcome> {
    let request = build_request(args)?;
    let seed = match args.seed.as_deref() {
        Some(token) => parse_seed(token)?,
        None => entropy_seed(),
    };
    log::info!(
        "playing {} players, {} rewards, seed {seed}",
        request.num_players(),
        request.rewards().len()
    );

    let highlight = trace_column(args.trace, request.num_players())?;
    let result = play_seeded(&request, cfg, seed).map_err(|err| match err {
        GameError::Validation(invalid) => GameOutcome::Invalid(invalid.to_string()),
        other => GameOutcome::Failed(other.into()),
    })?;

    match args.report {
        ReportFormat::Console => report::write_game_console(out, &result, highlight)?,
        ReportFormat::Markdown => report::write_game_markdown(out, &result, highlight)?,
        ReportFormat::Json => report::write_game_json(out, &result)?,
    }
    Ok(())
}

/// Start column for `--trace`, which numbers players from 1.
fn trace_column(
    player: Option<usize>,
    num_players: usize,
) -> Result<Option<usize>, GameOutcome> {
    match player {
        None => Ok(None),
        Some(number) if (1..=num_players).contains(&number) => Ok(Some(number - 1)),
        Some(number) => Err(GameOutcome::Invalid(format!(
            "trace player must be between 1 and {num_players} (got {number})"
        ))),
    }
}

fn run_verify(
    args: &Args,
    cfg: LadderConfig,
    trials: usize,
    out: &mut OutputTarget,
) -> Result<bool> {
    let base_seed = match args.seed.as_deref() {
        Some(token) => parse_seed(token)?,
        None => 1337,
    };
    if matches!(args.report, ReportFormat::Console) {
        println!("{}", "🎲 Sadari Ladder Verifier".bright_cyan().bold());
        println!("{}", "=========================".cyan());
    }

    let start_time = Instant::now();
    let verifier = Verifier::new(cfg, base_seed);
    let results = verifier.run(trials);

    match args.report {
        ReportFormat::Console => {
            report::write_verify_console(out, &results, start_time.elapsed())?;
        }
        ReportFormat::Markdown => report::write_verify_markdown(out, &results)?,
        ReportFormat::Json => report::write_verify_json(out, &results)?,
    }
    Ok(results.iter().all(|r| r.passed))
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}
