use medex_config::Config;
use medex_core::NerBackendKind;
use medex_extract::{DateNormalizer, ReportExtractor};
use medex_providers::build_backend;
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Input parameters for the Extract command strategy.
#[derive(Debug, Clone)]
pub struct ExtractInput {
    /// Report file; stdin when absent
    pub file: Option<PathBuf>,
    /// Overrides `ner.backend` from the config
    pub ner: Option<NerBackendKind>,
    /// Explicit config file
    pub config: Option<PathBuf>,
}

/// Strategy for running every extraction over one report.
///
/// Loads the config and keyword registry, connects the configured NER
/// backend, and prints the report summary as pretty JSON on stdout.
#[derive(Debug, Clone, Copy)]
pub struct ExtractStrategy;

impl super::CommandStrategy for ExtractStrategy {
    type Input = ExtractInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let mut config = Config::load(input.config.as_deref())?;
        if let Some(backend) = input.ner {
            config.ner.backend = backend;
        }

        let registry = Arc::new(super::load_registry(&config)?);
        let mut extractor =
            ReportExtractor::new(registry).with_normalizer(DateNormalizer::new(config.dates));
        if let Some(ner) = build_backend(&config.ner) {
            extractor = extractor.with_ner(ner);
        }

        let report = match &input.file {
            Some(path) => {
                info!("Reading report from {}", path.display());
                tokio::fs::read_to_string(path).await.map_err(|e| {
                    anyhow::anyhow!("Cannot read report {}: {e}", path.display())
                })?
            }
            None => {
                info!("Reading report from stdin");
                let mut report = String::new();
                std::io::stdin().read_to_string(&mut report)?;
                report
            }
        };

        let summary = extractor.summarize(&report).await;
        info!(
            "Extracted {} dates, age {:?}",
            summary.dates.len(),
            summary.age
        );
        println!("{}", serde_json::to_string_pretty(&summary)?);
        Ok(())
    }
}
