use medex_config::Config;
use std::path::PathBuf;

/// Strategy for printing the effective keyword definitions as JSON.
///
/// Useful as a starting point for a custom `keywords_path` file.
#[derive(Debug, Clone, Copy)]
pub struct KeywordsStrategy;

impl super::CommandStrategy for KeywordsStrategy {
    /// Explicit config file, if any.
    type Input = Option<PathBuf>;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load(input.as_deref())?;
        let registry = super::load_registry(&config)?;
        println!("{}", serde_json::to_string_pretty(registry.defs())?);
        Ok(())
    }
}
