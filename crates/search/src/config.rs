use crate::error::{Result, SearchError};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Results kept per provider when the caller gives no limit
pub const DEFAULT_PROVIDER_CAP: usize = 20;
const MAX_PROVIDER_CAP: usize = 1000;

pub const PROVIDER_CAP_ENV: &str = "PALETTE_PROVIDER_CAP";
pub const PROVIDER_TIMEOUT_ENV: &str = "PALETTE_PROVIDER_TIMEOUT_MS";

/// Search engine tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteConfig {
    /// Per-provider cap applied before merging when no limit is given
    pub provider_cap: usize,

    /// Per-provider deadline. `None` waits for every provider indefinitely.
    pub provider_timeout: Option<Duration>,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            provider_cap: DEFAULT_PROVIDER_CAP,
            provider_timeout: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawPaletteConfig {
    provider_cap: Option<usize>,
    provider_timeout_ms: Option<u64>,
}

impl PaletteConfig {
    /// Builder: set per-provider cap
    #[must_use]
    pub const fn with_provider_cap(mut self, cap: usize) -> Self {
        self.provider_cap = cap;
        self
    }

    /// Builder: set per-provider timeout
    #[must_use]
    pub const fn with_provider_timeout(mut self, timeout: Duration) -> Self {
        self.provider_timeout = Some(timeout);
        self
    }

    /// Parse a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let raw: RawPaletteConfig =
            toml::from_str(raw).map_err(|e| SearchError::Config(e.to_string()))?;

        let mut cfg = Self::default();
        if let Some(cap) = raw.provider_cap {
            if cap == 0 || cap > MAX_PROVIDER_CAP {
                return Err(SearchError::Config(format!(
                    "provider_cap must be between 1 and {MAX_PROVIDER_CAP} (got {cap})"
                )));
            }
            cfg.provider_cap = cap;
        }
        cfg.provider_timeout = raw.provider_timeout_ms.and_then(timeout_from_millis);
        Ok(cfg)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let cfg = Self::from_toml_str(&raw)?;
        log::info!("Loaded palette config from {}", path.display());
        Ok(cfg)
    }

    /// Read `PALETTE_PROVIDER_CAP` and `PALETTE_PROVIDER_TIMEOUT_MS`.
    /// Blank or unparsable values fall back to defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let cap = std::env::var(PROVIDER_CAP_ENV).ok();
        let timeout = std::env::var(PROVIDER_TIMEOUT_ENV).ok();
        Self::from_env_values(cap.as_deref(), timeout.as_deref())
    }

    fn from_env_values(cap: Option<&str>, timeout_ms: Option<&str>) -> Self {
        Self {
            provider_cap: parse_provider_cap(cap),
            provider_timeout: parse_number::<u64>(timeout_ms).and_then(timeout_from_millis),
        }
    }
}

fn parse_number<T: std::str::FromStr>(raw: Option<&str>) -> Option<T> {
    raw.map(str::trim)
        .filter(|v| !v.is_empty())
        .and_then(|v| v.parse::<T>().ok())
}

fn parse_provider_cap(raw: Option<&str>) -> usize {
    parse_number::<usize>(raw)
        .unwrap_or(DEFAULT_PROVIDER_CAP)
        .clamp(1, MAX_PROVIDER_CAP)
}

// 0 disables the deadline
fn timeout_from_millis(ms: u64) -> Option<Duration> {
    (ms > 0).then(|| Duration::from_millis(ms))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_reference_behavior() {
        let cfg = PaletteConfig::default();
        assert_eq!(cfg.provider_cap, 20);
        assert_eq!(cfg.provider_timeout, None);
    }

    #[test]
    fn toml_overrides_and_defaults() {
        let cfg = PaletteConfig::from_toml_str("provider_cap = 5\nprovider_timeout_ms = 250\n")
            .unwrap();
        assert_eq!(cfg.provider_cap, 5);
        assert_eq!(cfg.provider_timeout, Some(Duration::from_millis(250)));

        let empty = PaletteConfig::from_toml_str("").unwrap();
        assert_eq!(empty, PaletteConfig::default());

        let disabled = PaletteConfig::from_toml_str("provider_timeout_ms = 0").unwrap();
        assert_eq!(disabled.provider_timeout, None);
    }

    #[test]
    fn toml_rejects_bad_values() {
        assert!(matches!(
            PaletteConfig::from_toml_str("provider_cap = 0"),
            Err(SearchError::Config(_))
        ));
        assert!(matches!(
            PaletteConfig::from_toml_str("unknown_key = 1"),
            Err(SearchError::Config(_))
        ));
        assert!(matches!(
            PaletteConfig::from_toml_str("provider_cap = \"many\""),
            Err(SearchError::Config(_))
        ));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "provider_cap = 7").unwrap();

        let cfg = PaletteConfig::from_path(file.path()).unwrap();
        assert_eq!(cfg.provider_cap, 7);

        let missing = PaletteConfig::from_path(file.path().with_extension("missing"));
        assert!(matches!(missing, Err(SearchError::IoError(_))));
    }

    #[test]
    fn env_values_parse_with_fallbacks() {
        let cfg = PaletteConfig::from_env_values(Some(" 8 "), Some("150"));
        assert_eq!(cfg.provider_cap, 8);
        assert_eq!(cfg.provider_timeout, Some(Duration::from_millis(150)));

        let fallback = PaletteConfig::from_env_values(Some(""), Some("soon"));
        assert_eq!(fallback, PaletteConfig::default());

        let clamped = PaletteConfig::from_env_values(Some("0"), None);
        assert_eq!(clamped.provider_cap, 1);

        let huge = PaletteConfig::from_env_values(Some("99999"), None);
        assert_eq!(huge.provider_cap, 1000);
    }
}
