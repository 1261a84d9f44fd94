use crate::model::PageSize;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub browse: BrowseConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowseConfig {
    pub default_database: Option<String>,
    pub page_size: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            timeout_secs: 30,
        }
    }
}

impl Default for BrowseConfig {
    fn default() -> Self {
        Self {
            default_database: None,
            page_size: PageSize::default().get(),
        }
    }
}

/// Command-line values that win over every other source.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub base_url: Option<String>,
    pub default_database: Option<String>,
    pub page_size: Option<u32>,
}

impl AppConfig {
    /// Load configuration from defaults, an optional config file and environment variables.
    ///
    /// `CONSOLE_API__BASE_URL=http://db:8000` sets `api.base_url`.
    pub fn load(path: Option<&str>) -> anyhow::Result<Self> {
        let mut config = config::Config::builder();

        // Add default configuration
        config = config.add_source(config::Config::try_from(&AppConfig::default())?);

        // Add config file if it exists
        config = config.add_source(config::File::with_name(path.unwrap_or("console")).required(false));

        config = config.add_source(
            config::Environment::with_prefix("CONSOLE")
                .prefix_separator("_")
                .separator("__"),
        );

        let config = config.build()?;
        let app_config: AppConfig = config.try_deserialize()?;
        app_config.page_size()?;

        Ok(app_config)
    }

    pub fn apply(&mut self, overrides: Overrides) {
        if let Some(base_url) = overrides.base_url {
            self.api.base_url = base_url;
        }
        if let Some(db) = overrides.default_database {
            self.browse.default_database = Some(db);
        }
        if let Some(size) = overrides.page_size {
            self.browse.page_size = size;
        }
    }

    /// An empty `default_database` means none.
    pub fn default_database(&self) -> Option<String> {
        self.browse
            .default_database
            .as_deref()
            .map(str::trim)
            .filter(|db| !db.is_empty())
            .map(str::to_string)
    }

    pub fn page_size(&self) -> anyhow::Result<PageSize> {
        PageSize::try_from(self.browse.page_size).map_err(anyhow::Error::msg)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }
}
