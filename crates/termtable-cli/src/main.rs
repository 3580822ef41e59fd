//! termtable CLI - Curriculum Timetabling Engine
//!
//! Command-line interface for scheduling a term from a JSON snapshot,
//! checking capacity, and creating starter files.

mod starter;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use termtable_core::{
    Renderer, ScheduleRequest, ScheduleResponse, Scheduler, Snapshot, SubjectId, TeacherId,
};
use termtable_render::{CsvRenderer, GridRenderer, TextRenderer};
use termtable_solver::{GreedySolver, SolverOptions};
use tracing::{debug, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "termtable")]
#[command(author, version, about = "Deterministic curriculum timetabling", long_about = None)]
struct Cli {
    /// Verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a timetable for a term
    Schedule {
        #[command(flatten)]
        term: TermArgs,

        /// Preferred teacher for a subject, by id or name (repeatable)
        #[arg(long = "assign", value_name = "SUBJECT=TEACHER")]
        assign: Vec<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Report whether the term has room for every declared hour
    Check {
        #[command(flatten)]
        term: TermArgs,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a starter snapshot and solver config
    Init {
        /// Name of the timetable
        #[arg(default_value = "my-timetable")]
        name: String,

        /// Output directory
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },
}

#[derive(Args)]
struct TermArgs {
    /// Snapshot file (JSON)
    #[arg(value_name = "SNAPSHOT")]
    snapshot: PathBuf,

    /// First date of the term (YYYY-MM-DD)
    #[arg(long)]
    start: NaiveDate,

    /// Last date of the term, inclusive (YYYY-MM-DD)
    #[arg(long)]
    end: NaiveDate,

    /// Solver options (TOML)
    #[arg(short, long, env = "TERMTABLE_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Listing grouped by date
    Text,
    /// Weekly Markdown grid
    Grid,
    /// One CSV row per entry
    Csv,
    /// Response envelope
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Some(Commands::Schedule {
            term,
            assign,
            format,
            output,
        }) => cmd_schedule(&term, &assign, format, output.as_deref()),
        Some(Commands::Check { term, json }) => cmd_check(&term, json),
        Some(Commands::Init { name, output }) => cmd_init(&name, &output),
        None => {
            println!("termtable - Curriculum Timetabling Engine");
            println!("Run with --help for usage information");
            Ok(ExitCode::SUCCESS)
        }
    }
}

// ============================================================================
// Loading
// ============================================================================

fn load_snapshot(path: &Path) -> Result<Snapshot> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read snapshot {}", path.display()))?;
    let snapshot: Snapshot = serde_json::from_str(&text)
        .with_context(|| format!("invalid snapshot {}", path.display()))?;
    debug!(
        teachers = snapshot.teachers.len(),
        rooms = snapshot.rooms.len(),
        subjects = snapshot.subjects.len(),
        slots = snapshot.time_slots.len(),
        holidays = snapshot.holidays.len(),
        "snapshot loaded"
    );
    Ok(snapshot)
}

fn load_options(path: Option<&Path>) -> Result<SolverOptions> {
    let Some(path) = path else {
        return Ok(SolverOptions::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let options: SolverOptions =
        toml::from_str(&text).with_context(|| format!("invalid config {}", path.display()))?;
    debug!(?options, "solver options loaded");
    Ok(options)
}

/// Parse `SUBJECT=TEACHER`; each side is an id or an exact name, and must exist
/// in the snapshot
fn parse_assignment(snapshot: &Snapshot, pair: &str) -> Result<(SubjectId, TeacherId)> {
    let Some((subject, teacher)) = pair.split_once('=') else {
        bail!("invalid assignment '{}': expected SUBJECT=TEACHER", pair);
    };
    let (subject, teacher) = (subject.trim(), teacher.trim());

    let subject_id = match subject.parse::<SubjectId>() {
        Ok(id) => snapshot.get_subject(id).map(|s| s.id),
        Err(_) => snapshot.subjects.iter().find(|s| s.name == subject).map(|s| s.id),
    }
    .with_context(|| format!("unknown subject '{}'", subject))?;

    let teacher_id = match teacher.parse::<TeacherId>() {
        Ok(id) => snapshot.get_teacher(id).map(|t| t.id),
        Err(_) => snapshot.teachers.iter().find(|t| t.name == teacher).map(|t| t.id),
    }
    .with_context(|| format!("unknown teacher '{}'", teacher))?;

    Ok((subject_id, teacher_id))
}

fn write_output(content: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, content)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), "output written");
        }
        None => print!("{}", content),
    }
    Ok(())
}

// ============================================================================
// Commands
// ============================================================================

fn cmd_schedule(
    term: &TermArgs,
    assign: &[String],
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<ExitCode> {
    let snapshot = load_snapshot(&term.snapshot)?;
    let options = load_options(term.config.as_deref())?;

    let mut request = ScheduleRequest::new(term.start, term.end);
    for pair in assign {
        let (subject, teacher) = parse_assignment(&snapshot, pair)?;
        request = request.assign(subject, teacher);
    }

    let schedule = match GreedySolver::with_options(options).schedule(&snapshot, &request) {
        Ok(schedule) => schedule,
        Err(err) if format == OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&ScheduleResponse::from(Err(err.clone())))
                .context("failed to serialize response")?;
            write_output(&format!("{}\n", json), output)?;
            eprintln!("Error: {}", err);
            return Ok(ExitCode::FAILURE);
        }
        Err(err) => return Err(err.into()),
    };

    if !schedule.is_complete() {
        warn!(unplaced = schedule.unplaced.len(), "schedule is incomplete");
    }

    let rendered = match format {
        OutputFormat::Text => TextRenderer::new().render(&schedule)?,
        OutputFormat::Grid => GridRenderer::new().weekly().render(&schedule)?,
        OutputFormat::Csv => CsvRenderer::new().render(&schedule)?,
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&ScheduleResponse::from(Ok(schedule)))
                .context("failed to serialize response")?;
            format!("{}\n", json)
        }
    };
    write_output(&rendered, output)?;
    Ok(ExitCode::SUCCESS)
}

fn cmd_check(term: &TermArgs, json: bool) -> Result<ExitCode> {
    let snapshot = load_snapshot(&term.snapshot)?;
    let options = load_options(term.config.as_deref())?;
    let request = ScheduleRequest::new(term.start, term.end);

    let report = GreedySolver::with_options(options).check_capacity(&snapshot, &request)?;

    if json {
        let json = serde_json::to_string_pretty(&report).context("failed to serialize report")?;
        println!("{}", json);
    } else {
        println!("Teaching days:      {}", report.teaching_days);
        println!("Slots per day:      {}", report.slots_per_day);
        println!("Parallel capacity:  {}", report.parallel_capacity);
        println!("Available slots:    {}", report.available);
        println!("Required slots:     {}", report.required);
        if report.is_feasible() {
            println!("Status: OK");
        } else {
            println!("Status: INSUFFICIENT (short by {})", report.shortfall());
        }
    }

    Ok(if report.is_feasible() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn cmd_init(name: &str, output: &Path) -> Result<ExitCode> {
    let stem = starter::sanitize_name(name);
    let snapshot_path = output.join(format!("{}.json", stem));
    let config_path = output.join(format!("{}.toml", stem));

    for path in [&snapshot_path, &config_path] {
        if path.exists() {
            bail!("{} already exists", path.display());
        }
    }

    fs::create_dir_all(output).with_context(|| format!("failed to create {}", output.display()))?;

    let snapshot = serde_json::to_string_pretty(&starter::starter_snapshot())
        .context("failed to serialize snapshot")?;
    fs::write(&snapshot_path, format!("{}\n", snapshot))
        .with_context(|| format!("failed to write {}", snapshot_path.display()))?;

    let config = starter::starter_config().context("failed to serialize config")?;
    fs::write(&config_path, config)
        .with_context(|| format!("failed to write {}", config_path.display()))?;

    println!("Created: {}", snapshot_path.display());
    println!("Created: {}", config_path.display());
    println!();
    println!("Next steps:");
    println!(
        "  termtable schedule {} --start 2025-01-06 --end 2025-01-31 --config {}",
        snapshot_path.display(),
        config_path.display()
    );

    Ok(ExitCode::SUCCESS)
}
