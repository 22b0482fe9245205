use anyhow::{anyhow, Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use log::LevelFilter;
use seqview::{
    about,
    annotation::legend,
    engine::{Engine, Operation, ProjectState, ViewerEngine, Workflow},
    gc_contents::SequenceStats,
    nucleotide::Nucleotide,
    search::find_matches,
};
use serde::Serialize;
use std::{fs, path::Path};

const DEFAULT_STATE_PATH: &str = ".seqview_state.json";

#[derive(Parser)]
#[command(
    name = "seqview_cli",
    version = about::SEQVIEW_DISPLAY_VERSION,
    about = "Lays out annotated nucleotide sequences for rendering",
    disable_help_subcommand = true
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    #[clap(long = "state", value_name = "PATH", default_value = DEFAULT_STATE_PATH)]
    #[clap(help = "Project state file read and written by operations")]
    state: String,

    #[clap(short = 'v', long = "verbose", action = ArgAction::Count)]
    #[clap(help = "Specify multiple times to increase verbosity level (e.g., -vv)")]
    verbosity: u8,
}

#[derive(Subcommand)]
enum Command {
    #[clap(about = "List supported operations and samples")]
    Capabilities,
    #[clap(about = "Apply one operation given as JSON (or @file.json)")]
    Op { json: String },
    #[clap(about = "Apply a workflow given as JSON (or @file.json)")]
    Workflow { json: String },
    #[clap(about = "Summarize the project state")]
    StateSummary,
    #[clap(about = "Print the layout for the current view as JSON")]
    Layout {
        #[clap(long, help = "Pretty-print the JSON")]
        pretty: bool,
        #[clap(long, help = "Print rows as plain text instead of JSON")]
        text: bool,
    },
    #[clap(about = "Describe the annotations covering OFFSET in the current view")]
    AnnotationsAt { offset: usize },
    #[clap(about = "Print composition statistics")]
    Stats,
    #[clap(about = "List match offsets of QUERY in the sequence")]
    Search { query: String },
    #[clap(about = "Copy a state file into the working state")]
    ImportState { path: String },
    #[clap(about = "Copy the working state to PATH")]
    ExportState { path: String },
}

#[derive(Serialize)]
struct StateSummary {
    sequence_name: Option<String>,
    sequence_length: usize,
    annotation_count: usize,
    legend: Vec<seqview::annotation::LegendEntry>,
    view: seqview::view_state::ViewState,
}

#[derive(Serialize)]
struct StatsReport {
    total: usize,
    counts: Vec<(Nucleotide, usize, f64)>,
    gc_content: f64,
}

fn init_verbose(verbosity: u8) {
    let filter_level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    env_logger::Builder::from_default_env()
        .filter_level(filter_level)
        .init();
}

fn load_json_arg(value: &str) -> Result<String> {
    if let Some(path) = value.strip_prefix('@') {
        fs::read_to_string(path).with_context(|| format!("Could not read JSON file '{path}'"))
    } else {
        Ok(value.to_string())
    }
}

fn load_state(path: &str) -> Result<ProjectState> {
    if Path::new(path).exists() {
        Ok(ProjectState::load_from_path(path)?)
    } else {
        log::info!("State file '{path}' not found, starting empty");
        Ok(ProjectState::default())
    }
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let text = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .context("Could not serialize JSON output")?;
    println!("{text}");
    Ok(())
}

fn stats_report(stats: &SequenceStats) -> StatsReport {
    StatsReport {
        total: stats.total(),
        counts: stats
            .counts()
            .map(|(n, count)| (n, count, stats.percent(n)))
            .collect(),
        gc_content: stats.gc_content(),
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_verbose(cli.verbosity);
    log::debug!("{}", about::version_cli_text());
    let state_path = cli.state.as_str();

    match cli.command {
        Command::Capabilities => print_json(&ViewerEngine::capabilities(), true),
        Command::Op { json } => {
            let json = load_json_arg(&json)?;
            let op: Operation = serde_json::from_str(&json).context("Invalid operation JSON")?;
            let mut engine = ViewerEngine::from_state(load_state(state_path)?);
            let result = engine.apply(op)?;
            engine.state().save_to_path(state_path)?;
            print_json(&result, true)
        }
        Command::Workflow { json } => {
            let json = load_json_arg(&json)?;
            let workflow: Workflow =
                serde_json::from_str(&json).context("Invalid workflow JSON")?;
            let mut engine = ViewerEngine::from_state(load_state(state_path)?);
            let results = engine.apply_workflow(workflow)?;
            engine.state().save_to_path(state_path)?;
            print_json(&results, true)
        }
        Command::StateSummary => {
            let state = load_state(state_path)?;
            print_json(
                &StateSummary {
                    sequence_name: state.sequence.name().clone(),
                    sequence_length: state.sequence.len(),
                    annotation_count: state.annotations.len(),
                    legend: legend(&state.annotations),
                    view: state.view.clone(),
                },
                true,
            )
        }
        Command::Layout { pretty, text } => {
            let engine = ViewerEngine::from_state(load_state(state_path)?);
            let layout = engine.layout();
            if !text {
                return print_json(&layout, pretty);
            }
            for row in &layout.rows {
                println!("{:>8} {}", row.start_offset + 1, row.text());
            }
            Ok(())
        }
        Command::AnnotationsAt { offset } => {
            let engine = ViewerEngine::from_state(load_state(state_path)?);
            let layout = engine.layout();
            let symbol = layout
                .symbol_at(offset)
                .ok_or_else(|| anyhow!("Offset {offset} is not in the current view"))?;
            let tooltips: Vec<String> = engine
                .state()
                .annotations
                .iter()
                .filter(|a| symbol.annotation_ids.contains(&a.id))
                .map(|a| a.tooltip())
                .collect();
            print_json(&tooltips, true)
        }
        Command::Stats => {
            let state = load_state(state_path)?;
            let stats = SequenceStats::from_sequence(state.sequence.forward());
            print_json(&stats_report(&stats), true)
        }
        Command::Search { query } => {
            let state = load_state(state_path)?;
            let matches = find_matches(state.sequence.forward(), &query);
            log::info!("Found {} matches for \"{query}\"", matches.len());
            print_json(&matches.positions(), false)
        }
        Command::ImportState { path } => {
            let state = ProjectState::load_from_path(&path)?;
            state.save_to_path(state_path)?;
            println!("Loaded project from '{path}' into '{state_path}'");
            Ok(())
        }
        Command::ExportState { path } => {
            let state = load_state(state_path)?;
            state.save_to_path(&path)?;
            println!("Saved project from '{state_path}' to '{path}'");
            Ok(())
        }
    }
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{e:#}");
        std::process::exit(1);
    }
}
