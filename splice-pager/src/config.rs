//! Configuration management using Figment
//!
//! Configuration is loaded from multiple sources with the following precedence (highest to lowest):
//! 1. Environment variables (prefix: SPLICE_, nested keys separated by `__`)
//! 2. Current working directory: ./config.toml
//! 3. XDG config directory: ~/.config/splice-pager/{service_name}/config.toml
//! 4. System directory: /etc/splice-pager/{service_name}/config.toml
//! 5. Default values

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::pagination::{PageRequest, SortDirection, SortOrder, DEFAULT_SORT_FIELD};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Service configuration
    pub service: ServiceConfig,

    /// Merged pagination configuration
    #[serde(default)]
    pub pager: PagerConfig,
}

/// Service-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Service name
    pub name: String,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Merged pagination configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagerConfig {
    /// Sort field applied when a request names none
    #[serde(default = "default_sort_field")]
    pub default_sort_field: String,

    /// Sort direction applied when a request names none
    #[serde(default)]
    pub default_sort_direction: SortDirection,

    /// Page size for [`PagerConfig::default_request`]
    #[serde(default = "default_page_size")]
    pub default_page_size: i64,

    /// Issue both origins' calls concurrently instead of one after the other
    #[serde(default = "default_true")]
    pub concurrent_fetch: bool,
}

impl PagerConfig {
    /// The sort applied to requests without one
    pub fn default_sort(&self) -> SortOrder {
        SortOrder::new(self.default_sort_field.clone(), self.default_sort_direction)
    }

    /// A request for `page_index` using the configured page size and sort
    pub fn default_request(&self, page_index: i64) -> PageRequest {
        PageRequest::of(page_index, self.default_page_size).with_sort(self.default_sort())
    }

    /// Resolve the sort a request should be served with
    pub fn resolve_sort(&self, request: &PageRequest) -> SortOrder {
        request
            .sort
            .clone()
            .unwrap_or_else(|| self.default_sort())
    }
}

impl Default for PagerConfig {
    fn default() -> Self {
        Self {
            default_sort_field: default_sort_field(),
            default_sort_direction: SortDirection::default(),
            default_page_size: default_page_size(),
            concurrent_fetch: true,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_sort_field() -> String {
    DEFAULT_SORT_FIELD.to_string()
}

fn default_page_size() -> i64 {
    20
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from all sources
    ///
    /// Searches for config files in this order (first found is used):
    /// 1. Current working directory: ./config.toml
    /// 2. XDG config directory: ~/.config/splice-pager/{service_name}/config.toml
    /// 3. System directory: /etc/splice-pager/{service_name}/config.toml
    ///
    /// Environment variables (SPLICE_ prefix) override all file-based configs.
    pub fn load() -> Result<Self> {
        let service_name = std::env::current_exe()
            .ok()
            .and_then(|p| p.file_stem().map(|s| s.to_string_lossy().into_owned()))
            .unwrap_or_else(|| "splice-pager".to_string());

        Self::load_for_service(&service_name)
    }

    /// Load configuration for a specific service name
    pub fn load_for_service(service_name: &str) -> Result<Self> {
        let config_paths = Self::find_config_paths(service_name);

        tracing::debug!("Searching for config files in order:");
        for path in &config_paths {
            tracing::debug!("  - {}", path.display());
        }

        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        // Lowest priority first so that higher priority files override
        for path in config_paths.iter().rev() {
            if path.exists() {
                tracing::info!("Loading configuration from: {}", path.display());
                figment = figment.merge(Toml::file(path));
            }
        }

        figment = figment.merge(Env::prefixed("SPLICE_").split("__"));

        let config = figment.extract()?;
        Ok(config)
    }

    /// Load configuration from a specific file
    ///
    /// This bypasses XDG directories and loads directly from the given path.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed("SPLICE_").split("__"))
            .extract()?;

        Ok(config)
    }

    /// Find all possible config file paths for a service, highest priority first
    fn find_config_paths(service_name: &str) -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("config.toml")];

        let xdg_dirs = xdg::BaseDirectories::with_prefix("splice-pager");
        let config_file_path = Path::new(service_name).join("config.toml");
        if let Some(path) = xdg_dirs.find_config_file(&config_file_path) {
            paths.push(path);
        }

        paths.push(
            PathBuf::from("/etc/splice-pager")
                .join(service_name)
                .join("config.toml"),
        );

        paths
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service: ServiceConfig {
                name: "splice-pager".to_string(),
                log_level: default_log_level(),
            },
            pager: PagerConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.service.log_level, "info");
        assert_eq!(config.pager.default_sort_field, "timestamp");
        assert_eq!(
            config.pager.default_sort_direction,
            SortDirection::Descending
        );
        assert_eq!(config.pager.default_page_size, 20);
        assert!(config.pager.concurrent_fetch);
    }

    #[test]
    fn test_default_sort_is_overridable() {
        let pager = PagerConfig {
            default_sort_field: "started_at".to_string(),
            default_sort_direction: SortDirection::Ascending,
            ..PagerConfig::default()
        };
        assert_eq!(pager.default_sort(), SortOrder::asc("started_at"));

        let request = pager.default_request(3);
        assert_eq!(request.page_index, 3);
        assert_eq!(request.page_size, 20);
        assert_eq!(request.sort, Some(SortOrder::asc("started_at")));
    }

    #[test]
    fn test_resolve_sort_prefers_request() {
        let pager = PagerConfig::default();
        assert_eq!(
            pager.resolve_sort(&PageRequest::of(0, 5)),
            SortOrder::desc("timestamp")
        );
        assert_eq!(
            pager.resolve_sort(&PageRequest::of(0, 5).with_sort(SortOrder::asc("id"))),
            SortOrder::asc("id")
        );
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[service]
name = "drive-history"
log_level = "debug"

[pager]
default_sort_direction = "asc"
default_page_size = 50
concurrent_fetch = false
"#
        )
        .unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.service.name, "drive-history");
        assert_eq!(config.service.log_level, "debug");
        assert_eq!(config.pager.default_sort_field, "timestamp");
        assert_eq!(
            config.pager.default_sort_direction,
            SortDirection::Ascending
        );
        assert_eq!(config.pager.default_page_size, 50);
        assert!(!config.pager.concurrent_fetch);
    }

    #[test]
    fn test_load_from_missing_file_uses_defaults() {
        let config = Config::load_from("/nonexistent/splice-pager/config.toml").unwrap();
        assert_eq!(config.service.name, "splice-pager");
        assert_eq!(config.pager, PagerConfig::default());
    }

    #[test]
    fn test_load_from_rejects_bad_types() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[pager]\ndefault_page_size = \"many\"").unwrap();

        let err = Config::load_from(file.path()).unwrap_err();
        assert!(matches!(err, crate::error::Error::Config(_)));
    }
}
