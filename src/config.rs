use crate::error::Error;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_PRINT_SETTLE_DELAY: Duration = Duration::from_millis(1000);
const STORAGE_DIR: &str = ".nrv-vocab";
const STORAGE_FILE: &str = "storage.json";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub storage_path: PathBuf,
    /// Pause between the print document loading and the print call.
    pub print_settle_delay: Duration,
    /// Answer every confirmation with yes.
    pub assume_yes: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            storage_path: PathBuf::from(STORAGE_DIR).join(STORAGE_FILE),
            print_settle_delay: DEFAULT_PRINT_SETTLE_DELAY,
            assume_yes: false,
        }
    }
}

impl ClientConfig {
    /// Default storage location under the user's home directory, falling
    /// back to the working directory.
    #[cfg(feature = "cli")]
    pub fn default_storage_path() -> PathBuf {
        dirs::home_dir()
            .map(|home| home.join(STORAGE_DIR).join(STORAGE_FILE))
            .unwrap_or_else(|| PathBuf::from(STORAGE_DIR).join(STORAGE_FILE))
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_storage_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.storage_path = path.into();
        self
    }

    pub fn with_print_settle_delay(mut self, delay: Duration) -> Self {
        self.print_settle_delay = delay;
        self
    }

    pub fn with_assume_yes(mut self, assume_yes: bool) -> Self {
        self.assume_yes = assume_yes;
        self
    }

    /// Checks the base URL scheme and drops any trailing slash.
    pub fn validated(mut self) -> Result<Self, Error> {
        let trimmed = self.base_url.trim().trim_end_matches('/');
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(Error::Config(format!(
                "base URL must start with http:// or https://, got {:?}",
                self.base_url
            )));
        }
        self.base_url = trimmed.to_string();
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_backend() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://127.0.0.1:8000");
        assert_eq!(config.print_settle_delay, Duration::from_secs(1));
        assert!(!config.assume_yes);
    }

    #[test]
    fn validation_trims_trailing_slash() {
        let config = ClientConfig::default()
            .with_base_url("https://vocab.example.com/")
            .validated()
            .unwrap();
        assert_eq!(config.base_url, "https://vocab.example.com");
    }

    #[test]
    fn validation_rejects_missing_scheme() {
        let result = ClientConfig::default()
            .with_base_url("vocab.example.com")
            .validated();
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
