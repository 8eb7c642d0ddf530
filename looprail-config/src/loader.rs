//! Resolving a scroller config from the environment and files

use std::{
    env, fmt, fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, anyhow};
use looprail_core::ScrollerConfig;

use crate::validation::{ConfigWarnings, apply_guard_rails};

/// Path to a TOML or JSON config file.
pub const CONFIG_PATH_VAR: &str = "LOOPRAIL_CONFIG_PATH";
/// Inline JSON config.
pub const CONFIG_JSON_VAR: &str = "LOOPRAIL_CONFIG_JSON";

const CANDIDATES: &[&str] = &[
    "looprail.toml",
    "looprail.json",
    "config/looprail.toml",
    "config/looprail.json",
];

/// Source that produced the scroller configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrollerConfigSource {
    /// Path given on the command line.
    Explicit(PathBuf),
    /// File named by `$LOOPRAIL_CONFIG_PATH`.
    EnvPath(PathBuf),
    /// Inline JSON from `$LOOPRAIL_CONFIG_JSON`.
    EnvInline,
    /// First default file found.
    File(PathBuf),
}

impl fmt::Display for ScrollerConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Explicit(path) => write!(f, "{}", path.display()),
            Self::EnvPath(path) => {
                write!(f, "{} ({CONFIG_PATH_VAR})", path.display())
            }
            Self::EnvInline => f.write_str(CONFIG_JSON_VAR),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// No configuration was supplied and none of the default files exist.
#[derive(Debug, thiserror::Error)]
#[error(
    "no scroller configuration found: set {CONFIG_PATH_VAR} or \
     {CONFIG_JSON_VAR}, or create one of {searched:?}"
)]
pub struct ConfigNotFound {
    /// Default files that were probed.
    pub searched: Vec<PathBuf>,
}

/// A validated configuration and where it came from.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// Validated configuration.
    pub config: ScrollerConfig,
    /// Where it was read from.
    pub source: ScrollerConfigSource,
    /// Non-fatal guard rail findings.
    pub warnings: ConfigWarnings,
}

/// Resolves the configuration. Evaluation order:
/// 1) `$LOOPRAIL_CONFIG_PATH` (TOML or JSON file),
/// 2) `$LOOPRAIL_CONFIG_JSON` (inline JSON),
/// 3) the first existing default file under `root`.
///
/// The layout inputs have no defaults, so finding nothing is an error.
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    root: PathBuf,
    path_var: Option<String>,
    inline_var: Option<String>,
}

impl ConfigLoader {
    /// Loader rooted at `root` that ignores the environment.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    /// Loader rooted at the working directory, reading both variables.
    pub fn from_env() -> Self {
        Self {
            root: PathBuf::new(),
            path_var: env::var(CONFIG_PATH_VAR).ok(),
            inline_var: env::var(CONFIG_JSON_VAR).ok(),
        }
    }

    /// Act as if `$LOOPRAIL_CONFIG_PATH` were `value`.
    pub fn with_path_var(mut self, value: impl Into<String>) -> Self {
        self.path_var = Some(value.into());
        self
    }

    /// Act as if `$LOOPRAIL_CONFIG_JSON` were `value`.
    pub fn with_inline_var(mut self, value: impl Into<String>) -> Self {
        self.inline_var = Some(value.into());
        self
    }

    /// Resolve the first configured source.
    pub fn load(
        &self,
    ) -> anyhow::Result<(ScrollerConfig, ScrollerConfigSource)> {
        if let Some(path_str) = self.path_var.as_deref()
            && !path_str.trim().is_empty()
        {
            let path = PathBuf::from(path_str.trim());
            let config = load_from_file(&path).with_context(|| {
                format!("while resolving {CONFIG_PATH_VAR}")
            })?;
            return Ok((config, ScrollerConfigSource::EnvPath(path)));
        }

        if let Some(raw) = self.inline_var.as_deref()
            && !raw.trim().is_empty()
        {
            let parsed = parse_json(raw).with_context(|| {
                format!("failed to parse {CONFIG_JSON_VAR}")
            })?;
            return Ok((parsed, ScrollerConfigSource::EnvInline));
        }

        if let Some(path) = self.find_default_file() {
            let config = load_from_file(&path)?;
            return Ok((config, ScrollerConfigSource::File(path)));
        }

        Err(ConfigNotFound {
            searched: CANDIDATES.iter().map(|c| self.root.join(c)).collect(),
        }
        .into())
    }

    /// [`load`](Self::load) followed by the guard rails.
    pub fn load_validated(&self) -> anyhow::Result<LoadedConfig> {
        let (config, source) = self.load()?;
        validated(config, source)
    }

    fn find_default_file(&self) -> Option<PathBuf> {
        CANDIDATES
            .iter()
            .map(|candidate| self.root.join(candidate))
            .find(|path| path.is_file())
    }
}

/// Load and validate a file named explicitly by the caller.
pub fn load_explicit(path: &Path) -> anyhow::Result<LoadedConfig> {
    let config = load_from_file(path)?;
    validated(config, ScrollerConfigSource::Explicit(path.to_path_buf()))
}

fn validated(
    config: ScrollerConfig,
    source: ScrollerConfigSource,
) -> anyhow::Result<LoadedConfig> {
    let warnings = apply_guard_rails(&config)
        .with_context(|| format!("rejected scroller config from {source}"))?;
    for warning in &warnings.items {
        log::warn!("{warning}");
    }
    log::debug!("scroller config loaded from {source}");
    Ok(LoadedConfig {
        config,
        source,
        warnings,
    })
}

/// Read a config file, choosing the format by extension.
pub fn load_from_file(path: &Path) -> anyhow::Result<ScrollerConfig> {
    let contents = fs::read_to_string(path).with_context(|| {
        format!("failed to read scroller config from {}", path.display())
    })?;

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => parse_json(&contents).with_context(|| {
            format!("invalid scroller config {}", path.display())
        }),
        Some("toml") | Some("tml") => {
            toml::from_str(&contents).map_err(|err| {
                anyhow!(
                    "invalid scroller config {}: {}",
                    path.display(),
                    err
                )
            })
        }
        _ => parse_from_str(&contents, &path.display().to_string()),
    }
}

/// Parse text of unknown format, trying TOML first and then JSON.
pub fn parse_from_str(
    contents: &str,
    origin: &str,
) -> anyhow::Result<ScrollerConfig> {
    toml::from_str(contents).or_else(|toml_err| {
        serde_json::from_str(contents).map_err(|json_err| {
            anyhow!(
                "failed to parse scroller config {}: toml error: {}; json error: {}",
                origin,
                toml_err,
                json_err
            )
        })
    })
}

/// Parse a JSON config.
pub fn parse_json(raw: &str) -> anyhow::Result<ScrollerConfig> {
    serde_json::from_str(raw)
        .map_err(|err| anyhow!("invalid scroller config json: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_fills_default_timings() {
        let raw = r#"{"threshold_px": 40, "settle_delay_ms": 80,
                      "step_px": 320.5}"#;
        let config = parse_json(raw).unwrap();
        assert_eq!(config, ScrollerConfig::new(40.0, 80, 320.5));
    }

    #[test]
    fn sniffing_accepts_toml_and_json() {
        let toml_text =
            "threshold_px = 50\nsettle_delay_ms = 120\nstep_px = 150\n";
        let json_text =
            r#"{"threshold_px":50,"settle_delay_ms":120,"step_px":150}"#;
        let from_toml = parse_from_str(toml_text, "inline").unwrap();
        let from_json = parse_from_str(json_text, "inline").unwrap();
        assert_eq!(from_toml, from_json);
    }

    #[test]
    fn missing_required_field_is_reported() {
        let err = parse_from_str("threshold_px = 50\nstep_px = 150\n", "inline")
            .unwrap_err();
        assert!(err.to_string().contains("settle_delay_ms"), "{err}");
    }

    #[test]
    fn source_display_names_the_variable() {
        let source = ScrollerConfigSource::EnvPath(PathBuf::from(
            "/etc/looprail.toml",
        ));
        assert_eq!(
            source.to_string(),
            "/etc/looprail.toml (LOOPRAIL_CONFIG_PATH)"
        );
        assert_eq!(
            ScrollerConfigSource::EnvInline.to_string(),
            "LOOPRAIL_CONFIG_JSON"
        );
    }
}
