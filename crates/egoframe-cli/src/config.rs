//! User preferences – reads/writes `~/.egoframe/config.toml`.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// How conversion results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format '{other}'")),
        }
    }
}

/// Persisted user configuration stored in `~/.egoframe/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Default output format for `egoframe convert`.
    #[serde(default)]
    pub output_format: OutputFormat,

    /// Decimal places shown in table output, at most [`MAX_PRECISION`].
    #[serde(default = "default_precision")]
    pub precision: usize,
}

/// Digits beyond this carry no information for an `f64`.
pub const MAX_PRECISION: usize = 17;

fn default_precision() -> usize {
    4
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_format: OutputFormat::default(),
            precision: default_precision(),
        }
    }
}

/// Return the path to `~/.egoframe/config.toml`.
pub fn config_path() -> PathBuf {
    config_path_for_home(
        &std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .unwrap_or_else(|_| ".".to_string()),
    )
}

/// Build the config path relative to the given home directory.
pub(crate) fn config_path_for_home(home: &str) -> PathBuf {
    PathBuf::from(home).join(".egoframe").join("config.toml")
}

/// Load the config from disk, falling back to defaults when the file does
/// not exist.  Environment overrides are applied in both cases.
pub fn load() -> Result<Config, String> {
    let mut cfg = load_from(&config_path())?.unwrap_or_default();
    apply_env_overrides(&mut cfg);
    Ok(cfg)
}

/// Load the config from a specific path.  Returns `None` if the file does
/// not exist.
pub(crate) fn load_from(path: &Path) -> Result<Option<Config>, String> {
    if !path.exists() {
        return Ok(None);
    }
    let raw = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config at {}: {}", path.display(), e))?;
    let mut cfg: Config =
        toml::from_str(&raw).map_err(|e| format!("Failed to parse config: {}", e))?;
    cfg.precision = cfg.precision.min(MAX_PRECISION);
    Ok(Some(cfg))
}

/// Apply `EGOFRAME_*` environment variable overrides to `cfg`.
///
/// | Variable | Config field |
/// |---|---|
/// | `EGOFRAME_OUTPUT_FORMAT` | `output_format` |
/// | `EGOFRAME_PRECISION` | `precision` |
///
/// Unparseable values are ignored; precision is capped at [`MAX_PRECISION`].
pub fn apply_env_overrides(cfg: &mut Config) {
    if let Ok(v) = std::env::var("EGOFRAME_OUTPUT_FORMAT")
        && let Ok(format) = v.parse::<OutputFormat>()
    {
        cfg.output_format = format;
    }
    if let Ok(v) = std::env::var("EGOFRAME_PRECISION")
        && let Ok(precision) = v.parse::<usize>()
    {
        cfg.precision = precision.min(MAX_PRECISION);
    }
}

/// Save the config to disk, creating `~/.egoframe/` if necessary.
pub fn save(cfg: &Config) -> Result<PathBuf, String> {
    let path = config_path();
    save_to(cfg, &path)?;
    Ok(path)
}

/// Save the config to a specific path.
pub(crate) fn save_to(cfg: &Config, path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create config directory: {}", e))?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(parent, fs::Permissions::from_mode(0o700))
                .map_err(|e| format!("Failed to set config directory permissions: {}", e))?;
        }
    }
    let raw = toml::to_string_pretty(cfg)
        .map_err(|e| format!("Failed to serialize config: {}", e))?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(0o600)
            .open(path)
            .and_then(|mut f| {
                use std::io::Write;
                f.write_all(raw.as_bytes())
            })
            .map_err(|e| format!("Failed to write config at {}: {}", path.display(), e))?;
    }
    #[cfg(not(unix))]
    fs::write(path, raw)
        .map_err(|e| format!("Failed to write config at {}: {}", path.display(), e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_default_config() {
        let dir = tempfile::tempdir().expect("tmp dir");
        let path = config_path_for_home(&dir.path().to_string_lossy());

        save_to(&Config::default(), &path).expect("save");

        let loaded = load_from(&path).expect("load ok").expect("some");
        assert_eq!(loaded.output_format, OutputFormat::Table);
        assert_eq!(loaded.precision, 4);
    }

    #[cfg(unix)]
    #[test]
    fn config_file_has_restrictive_permissions() {
        use std::os::unix::fs::PermissionsExt;
        let dir = tempfile::tempdir().expect("tmp dir");
        let path = config_path_for_home(&dir.path().to_string_lossy());

        save_to(&Config::default(), &path).expect("save");

        let file_mode = std::fs::metadata(&path).expect("file metadata").permissions().mode() & 0o777;
        assert_eq!(file_mode, 0o600, "config file must have 0o600 permissions");
    }

    #[test]
    fn config_path_points_to_egoframe_dir() {
        let p = config_path_for_home("/home/testuser");
        assert!(p.to_string_lossy().contains(".egoframe"));
        assert!(p.to_string_lossy().ends_with("config.toml"));
    }

    #[test]
    fn load_from_returns_none_when_missing() {
        let dir = tempfile::tempdir().expect("tmp dir");
        let path = config_path_for_home(&dir.path().to_string_lossy());
        assert!(load_from(&path).expect("no error").is_none());
    }

    #[test]
    fn partial_file_uses_defaults() {
        let dir = tempfile::tempdir().expect("tmp dir");
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "output_format = \"json\"\n").expect("write");

        let cfg = load_from(&path).expect("load ok").expect("some");
        assert_eq!(cfg.output_format, OutputFormat::Json);
        assert_eq!(cfg.precision, 4);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().expect("tmp dir");
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "precision = \"lots\"\n").expect("write");

        let err = load_from(&path).unwrap_err();
        assert!(err.contains("Failed to parse config"), "got: {err}");
    }

    #[test]
    fn oversized_precision_in_file_is_capped() {
        let dir = tempfile::tempdir().expect("tmp dir");
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "precision = 9000000000000000000\n").expect("write");

        let cfg = load_from(&path).expect("load ok").expect("some");
        assert_eq!(cfg.precision, MAX_PRECISION);
    }

    #[test]
    fn output_format_parses_case_insensitively() {
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!(" table ".parse::<OutputFormat>(), Ok(OutputFormat::Table));
        assert!("yaml".parse::<OutputFormat>().is_err());
    }

    // Env-var tests touch distinct variables so they can run in parallel.

    #[test]
    fn apply_env_overrides_changes_output_format() {
        // SAFETY: only this test reads or writes EGOFRAME_OUTPUT_FORMAT.
        unsafe { std::env::set_var("EGOFRAME_OUTPUT_FORMAT", "json") };
        let mut cfg = Config::default();
        apply_env_overrides(&mut cfg);
        assert_eq!(cfg.output_format, OutputFormat::Json);
        unsafe { std::env::remove_var("EGOFRAME_OUTPUT_FORMAT") };
    }

    #[test]
    fn apply_env_overrides_validates_precision() {
        // SAFETY: only this test reads or writes EGOFRAME_PRECISION.
        unsafe { std::env::set_var("EGOFRAME_PRECISION", "-3") };
        let mut cfg = Config::default();
        apply_env_overrides(&mut cfg);
        assert_eq!(cfg.precision, 4, "negative precision must be ignored");

        unsafe { std::env::set_var("EGOFRAME_PRECISION", usize::MAX.to_string()) };
        apply_env_overrides(&mut cfg);
        assert_eq!(cfg.precision, MAX_PRECISION, "huge precision must be capped");

        unsafe { std::env::remove_var("EGOFRAME_PRECISION") };
    }
}
