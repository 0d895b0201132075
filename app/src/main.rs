#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

mod command;

use clap::{Parser, Subcommand};
use medex_core::NerBackendKind;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use command::{
    CommandStrategy, ExtractInput, ExtractStrategy, InitStrategy, KeywordsStrategy,
    VersionStrategy,
};

#[derive(Parser)]
#[command(name = "medex")]
#[command(about = "Clinical attribute extraction from free-text reports", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract attributes from a report and print them as JSON
    Extract {
        /// Report file (reads stdin when omitted)
        file: Option<PathBuf>,

        /// NER backend: socket, corenlp or none
        #[arg(long)]
        ner: Option<NerBackendKind>,

        /// Config file (defaults to ~/medex/config.json)
        #[arg(short = 'c', long)]
        config: Option<PathBuf>,
    },
    /// Initialize configuration
    Init,
    /// Print the effective keyword definitions
    Keywords {
        /// Config file (defaults to ~/medex/config.json)
        #[arg(short = 'c', long)]
        config: Option<PathBuf>,
    },
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Extract { file, ner, config } => {
            ExtractStrategy
                .execute(ExtractInput { file, ner, config })
                .await
        }
        Commands::Init => InitStrategy.execute(()).await,
        Commands::Keywords { config } => KeywordsStrategy.execute(config).await,
        Commands::Version => VersionStrategy.execute(()).await,
    }
}
