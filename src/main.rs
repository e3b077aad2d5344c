//! critpath CLI - critical path computation for activity files.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use rand::seq::SliceRandom;

use critpath::{build_graph, parse_descriptors, report};

#[derive(Parser)]
#[command(name = "critpath")]
#[command(about = "Critical path computation for activity dependency networks")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute and print the critical path of an activity file
    Run {
        /// Path to the activity descriptor file
        file: PathBuf,

        /// Shuffle descriptor order before building; the result must not
        /// change
        #[arg(long)]
        shuffle: bool,

        /// Golden reference file to compare the result against
        #[arg(long)]
        expect: Option<PathBuf>,
    },

    /// Build the dependency graph and check that a schedule exists
    Check {
        /// Path to the activity descriptor file
        file: PathBuf,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            file,
            shuffle,
            expect,
        } => run(&file, shuffle, expect.as_deref()),
        Commands::Check { file } => check(&file),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run(file: &Path, shuffle: bool, expect: Option<&Path>) -> anyhow::Result<()> {
    let input = fs::read_to_string(file).with_context(|| format!("reading {}", file.display()))?;
    let mut descriptors = parse_descriptors(&input)?;

    if shuffle {
        descriptors.shuffle(&mut rand::thread_rng());
    }

    let graph = build_graph(descriptors)?;
    let path = graph.critical_path()?;

    let ids: Vec<&str> = path.nodes.iter().map(|a| a.id.as_str()).collect();
    println!("Critical path: {}", ids.join(" "));
    println!("Total duration: {}", path.total_weight);

    if let Some(golden) = expect {
        let expected = fs::read_to_string(golden)
            .with_context(|| format!("reading {}", golden.display()))?;
        let rendered = report::render(&path);
        if !report::matches_golden(&rendered, &expected) {
            bail!(
                "result does not match {}\nexpected:\n{}\nactual:\n{}",
                golden.display(),
                expected.trim(),
                rendered
            );
        }
        println!("Matches {}", golden.display());
    }

    Ok(())
}

fn check(file: &Path) -> anyhow::Result<()> {
    let input = fs::read_to_string(file).with_context(|| format!("reading {}", file.display()))?;
    let descriptors = parse_descriptors(&input)?;
    let graph = build_graph(descriptors)?;

    match graph.critical_path() {
        Ok(path) => {
            println!(
                "{} activities; critical path covers {} with total duration {}",
                graph.len(),
                path.nodes.len(),
                path.total_weight
            );
            Ok(())
        }
        Err(e) => bail!("no valid schedule exists: {e}"),
    }
}
