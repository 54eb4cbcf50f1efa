//! CLI execution context.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context as _, Result};
use bookstore_client::{
    AccessToken, AdminConsole, BookstoreClient, CartStore, Catalog, ClientConfig, FileTokenStore,
    MemoryTokenStore, StaticToken, TokenProvider,
};
use tracing::{debug, warn};

use crate::output::Output;

/// Overrides any stored token for a single invocation.
pub const TOKEN_ENV: &str = "BOOKSTORE_TOKEN";

/// Execution context for CLI commands.
pub struct Context {
    pub config: ClientConfig,
    /// The `--config` path, if one was given.
    pub config_path: Option<PathBuf>,
    pub output: Output,
    pub api: Arc<BookstoreClient>,
    pub tokens: Arc<dyn TokenProvider>,
}

impl Context {
    /// Loads configuration, builds the HTTP client, and opens the token store.
    pub fn load(config_path: Option<PathBuf>, output: Output) -> Result<Self> {
        let config = ClientConfig::load(config_path.clone())?;
        debug!(base_url = %config.base_url(), "Configuration loaded");

        let api = Arc::new(BookstoreClient::new(&config)?);
        let tokens = open_tokens(&config, std::env::var(TOKEN_ENV).ok())?;

        Ok(Self {
            config,
            config_path,
            output,
            api,
            tokens,
        })
    }

    pub fn cart_store(&self) -> CartStore {
        CartStore::new(self.api.clone(), self.tokens.clone())
            .with_updated_flag_duration(self.config.updated_flag_duration())
    }

    pub fn catalog(&self) -> Catalog {
        Catalog::new(self.api.clone())
    }

    pub fn admin(&self) -> AdminConsole {
        AdminConsole::new(self.api.clone(), self.tokens.clone())
    }
}

/// Picks where the session token lives.
///
/// ```text
/// BOOKSTORE_TOKEN set ──► StaticToken (read-only)
/// token path known    ──► FileTokenStore
/// otherwise           ──► MemoryTokenStore (nothing persists)
/// ```
fn open_tokens(config: &ClientConfig, env_token: Option<String>) -> Result<Arc<dyn TokenProvider>> {
    if let Some(token) = env_token.and_then(AccessToken::new) {
        debug!("Using token from {}", TOKEN_ENV);
        return Ok(Arc::new(StaticToken::new(token)));
    }

    match config.token_path() {
        Some(path) => {
            let store = FileTokenStore::open(&path)
                .with_context(|| format!("opening token file {}", path.display()))?;
            Ok(Arc::new(store))
        }
        None => {
            warn!("No data directory available; session will not persist");
            Ok(Arc::new(MemoryTokenStore::new()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_token_file(dir: &std::path::Path) -> ClientConfig {
        let mut config = ClientConfig::default();
        config.session.token_file = Some(dir.join("token"));
        config
    }

    #[test]
    fn test_env_token_wins_and_is_read_only() {
        let dir = std::env::temp_dir().join(format!("bookstore-cli-ctx-{}", std::process::id()));
        let tokens = open_tokens(&config_with_token_file(&dir), Some("from-env".into())).unwrap();

        assert_eq!(tokens.token().unwrap().expose(), "from-env");
        assert!(tokens.clear().is_err());
    }

    #[test]
    fn test_blank_env_token_falls_back_to_file() {
        let dir = std::env::temp_dir().join(format!("bookstore-cli-ctx-file-{}", std::process::id()));
        let tokens = open_tokens(&config_with_token_file(&dir), Some("  ".into())).unwrap();

        assert!(!tokens.is_signed_in());
        tokens.set_token(AccessToken::new("saved").unwrap()).unwrap();
        assert!(dir.join("token").exists());

        tokens.clear().unwrap();
        std::fs::remove_dir_all(&dir).ok();
    }
}
