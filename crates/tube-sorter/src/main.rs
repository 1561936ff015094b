//! CLI entry point for the tube sorter.
//!
//! Usage:
//!   tube-sorter solve <puzzle.json> [options]
//!   tube-sorter solve --stdin --format text [options]
//!   tube-sorter validate <puzzle.json> [options]
//!
//! Options:
//!   --format <json|text>    Input format (default: json)
//!   --capacity <n>          Tube capacity (json: overrides file, text: default 4)
//!   --spare-tubes <n>       Empty tubes appended to text input (default: 2)
//!   --ceiling <n>           Move ceiling for the search (default: 100)
//!   --verbose               Print diagnostics to stderr

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use tube_sorter::{
    load_puzzle, read_puzzle, search, validation_report, ColorMismatch, InputFormat, LoadOptions,
    Puzzle, Solution, SolverConfig, SolverResult, ValidationReport, DEFAULT_CEILING,
};

#[derive(Parser)]
#[command(name = "tube-sorter")]
#[command(about = "Bounded solver for tube sorting puzzles")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct InputArgs {
    /// Path to puzzle file (use --stdin to read from stdin)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Read puzzle from stdin instead of file
    #[arg(long)]
    stdin: bool,

    /// Input format
    #[arg(long, value_enum, default_value_t = InputFormat::Json)]
    format: InputFormat,

    /// Tube capacity
    #[arg(long)]
    capacity: Option<usize>,

    /// Empty tubes appended after recognized text
    #[arg(long)]
    spare_tubes: Option<usize>,

    /// Print diagnostics to stderr
    #[arg(long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a puzzle and search for a solution
    Solve {
        #[command(flatten)]
        input: InputArgs,

        /// Maximum number of moves on a search path
        #[arg(long, default_value_t = DEFAULT_CEILING)]
        ceiling: usize,
    },
    /// Check that every color fills exactly one tube
    Validate {
        #[command(flatten)]
        input: InputArgs,
    },
}

/// Output format for a solve run
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SolveOutput {
    valid: bool,
    solved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    mismatches: Vec<ColorMismatch>,
    #[serde(skip_serializing_if = "Option::is_none")]
    moves: Option<Solution>,
    #[serde(skip_serializing_if = "Option::is_none")]
    move_count: Option<usize>,
    states_explored: usize,
    ceiling_hits: usize,
    time_elapsed_ms: u64,
}

/// Output format for a validate run
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ValidateOutput {
    valid: bool,
    tubes: usize,
    capacity: usize,
    #[serde(flatten)]
    report: ValidationReport,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Commands::Solve { input, ceiling } => {
            let puzzle = read_input(&input)?;
            let report = validation_report(&puzzle);
            if input.verbose || !report.is_valid() {
                eprintln!("{} tubes, capacity {}: {}", puzzle.tube_count(), puzzle.capacity(), report);
            }

            // An inconsistent puzzle is never searched
            let output = if report.is_valid() {
                let config = SolverConfig { ceiling };
                let result = search(&puzzle, &config);
                if input.verbose {
                    eprintln!(
                        "explored {} states in {} ms",
                        result.states_explored, result.time_elapsed_ms
                    );
                }
                format_result(result, ceiling)
            } else {
                invalid_output(report)
            };

            print_json(&output)?;
            Ok(exit_code(output.solved))
        }
        Commands::Validate { input } => {
            let puzzle = read_input(&input)?;
            let report = validation_report(&puzzle);
            if input.verbose || !report.is_valid() {
                eprintln!("{}", report);
            }

            let output = ValidateOutput {
                valid: report.is_valid(),
                tubes: puzzle.tube_count(),
                capacity: puzzle.capacity(),
                report,
            };
            print_json(&output)?;
            Ok(exit_code(output.valid))
        }
    }
}

fn read_input(input: &InputArgs) -> Result<Puzzle> {
    let options = LoadOptions {
        format: input.format,
        capacity: input.capacity,
        spare_tubes: input.spare_tubes,
    };

    if input.stdin {
        read_puzzle(io::stdin().lock(), &options).context("Failed to read puzzle from stdin")
    } else if let Some(path) = &input.file {
        load_puzzle(path, &options)
            .with_context(|| format!("Failed to load puzzle from {}", path.display()))
    } else {
        bail!("Must provide either a file path or --stdin");
    }
}

fn format_result(result: SolverResult, ceiling: usize) -> SolveOutput {
    let solved = result.solved();
    SolveOutput {
        valid: true,
        solved,
        reason: if solved {
            None
        } else {
            Some(format!("no_solution_within_ceiling ({})", ceiling))
        },
        mismatches: Vec::new(),
        move_count: result.solution.as_ref().map(Solution::len),
        moves: result.solution,
        states_explored: result.states_explored,
        ceiling_hits: result.ceiling_hits,
        time_elapsed_ms: result.time_elapsed_ms,
    }
}

fn invalid_output(report: ValidationReport) -> SolveOutput {
    SolveOutput {
        valid: false,
        solved: false,
        reason: Some("color_count_mismatch".to_string()),
        mismatches: report.mismatches,
        moves: None,
        move_count: None,
        states_explored: 0,
        ceiling_hits: 0,
        time_elapsed_ms: 0,
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}

fn exit_code(success: bool) -> ExitCode {
    if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
