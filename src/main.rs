use std::collections::BTreeSet;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use api_baseline::analysis::AnalysisResults;
use api_baseline::artifact::{ArtifactCoordinate, ArtifactKey, VersionToken};
use api_baseline::config::model::{AcceptedBreak, Justification};
use api_baseline::config::store::{ConfigStore, DEFAULT_CONFIG_FILE};

#[derive(Parser)]
#[command(name = "api-baseline")]
#[command(version, about = "Checks a library's public API against its published baseline")]
struct Cli {
    /// Path to the acceptance config file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Accept every break reported by an analyzer run
    AcceptBreaks {
        #[command(flatten)]
        baseline: BaselineArgs,

        /// Analyzer results file (JSON) whose findings should be accepted
        #[arg(long)]
        results: PathBuf,

        /// Why these breaks are ok
        #[arg(long)]
        justification: String,
    },
    /// Accept a single break by its finding identifier
    AcceptBreak {
        #[command(flatten)]
        baseline: BaselineArgs,

        /// Finding identifier as reported by the analyzer
        #[arg(long)]
        finding: String,

        /// Why this break is ok
        #[arg(long)]
        justification: String,
    },
    /// Redirect a baseline version that no longer resolves
    VersionOverride {
        #[command(flatten)]
        baseline: BaselineArgs,

        /// Version to use instead of the requested one
        #[arg(long)]
        replacement: String,
    },
}

#[derive(Args)]
struct BaselineArgs {
    /// Group of the baseline artifact
    #[arg(long)]
    group: String,

    /// Name of the baseline artifact
    #[arg(long)]
    name: String,

    /// Baseline version the entry is recorded against
    #[arg(long)]
    version: String,
}

impl BaselineArgs {
    fn coordinate(&self) -> ArtifactCoordinate {
        ArtifactKey::new(&self.group, &self.name).at_version(VersionToken::new(&self.version))
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let store = ConfigStore::new(&cli.config);

    match cli.command {
        Command::AcceptBreaks {
            baseline,
            results,
            justification,
        } => {
            let justification = Justification::new(justification)
                .context("please supply a non-empty --justification")?;
            let breaks = AnalysisResults::from_file(&results)
                .with_context(|| {
                    format!("failed to read analyzer results from {}", results.display())
                })?
                .to_accepted_breaks(&justification);
            let coordinate = baseline.coordinate();

            let accepted = breaks.len();
            store.modify(|config| config.with_accepted_breaks(&coordinate, breaks))?;
            println!("accepted {accepted} break(s) against {coordinate}");
        }
        Command::AcceptBreak {
            baseline,
            finding,
            justification,
        } => {
            let justification = Justification::new(justification)
                .context("please supply a non-empty --justification")?;
            let coordinate = baseline.coordinate();

            store.modify(|config| {
                config.with_accepted_breaks(
                    &coordinate,
                    BTreeSet::from([AcceptedBreak::new(finding, justification)]),
                )
            })?;
            println!("accepted 1 break against {coordinate}");
        }
        Command::VersionOverride {
            baseline,
            replacement,
        } => {
            let coordinate = baseline.coordinate();
            let replacement = VersionToken::new(replacement);

            store.modify(|config| {
                config.with_version_override(coordinate.clone(), replacement.clone())
            })?;
            println!("{coordinate} will now resolve as {replacement}");
        }
    }

    Ok(())
}
