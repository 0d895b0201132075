//! Static strategy pattern for CLI commands.
//!
//! Each subcommand is a separate strategy type with its own input, dispatched
//! statically from `main`.

use medex_config::Config;
use medex_extract::KeywordRegistry;
use tracing::info;

mod extract;
mod init;
mod keywords;
mod version;

pub use extract::{ExtractInput, ExtractStrategy};
pub use init::InitStrategy;
pub use keywords::KeywordsStrategy;
pub use version::VersionStrategy;

/// Keyword registry named by the config, or the built-in one.
fn load_registry(config: &Config) -> anyhow::Result<KeywordRegistry> {
    let registry = match &config.keywords_path {
        Some(path) => {
            info!("Loading keywords from {}", path.display());
            KeywordRegistry::from_json_file(path)?
        }
        None => KeywordRegistry::with_defaults()?,
    };
    Ok(registry)
}

/// Contract shared by all command strategies.
///
/// # Example
/// ```ignore
/// struct MyStrategy;
///
/// impl CommandStrategy for MyStrategy {
///     type Input = MyInput;
///
///     async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
///         Ok(())
///     }
/// }
/// ```
pub trait CommandStrategy: Send + Sync + 'static {
    /// The input type this strategy accepts.
    type Input;

    /// Execute the command with the given input.
    ///
    /// # Errors
    /// Returns an error if command execution fails.
    async fn execute(&self, input: Self::Input) -> anyhow::Result<()>;
}
