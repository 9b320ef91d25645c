use config::{Config, Environment, File, Map};
use lmarc_domain::config::ArchiveConfig;
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::Path;
use tracing::{debug, info};

/// Base name of the optional configuration file looked up in the working directory
/// (`lmarc.toml`, `lmarc.yaml`, ...).
pub const DEFAULT_CONFIG_NAME: &str = "lmarc";
/// Prefix of environment overrides (`LMARC__OLLAMA__BINARY` maps to `ollama.binary`).
pub const ENV_PREFIX: &str = "LMARC";

#[lmarc_derive::lmarc_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },

    #[error("Invalid configuration{}: {message}", format_context(.context))]
    Invalid { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

/// Layered configuration loader: file first, then `LMARC__` environment overrides.
///
/// * With `Some(path)` the file is **required**; a missing file is an error.
/// * With `None` the loader looks for `lmarc.*` in the working directory and silently
///   falls back to defaults when there is none.
///
/// # Errors
/// Returns [`ConfigError::Config`] when an explicit file is missing, a file cannot be
/// parsed, or values do not fit `T`.
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    load_layers(path.as_ref().map(|p| p.as_ref()), None)
}

/// Loads and validates the [`ArchiveConfig`].
///
/// # Errors
/// Everything [`load_config`] reports, plus [`ConfigError::Invalid`] for values that
/// deserialize but make no sense (empty binary name, zero timeout).
pub fn load_archive_config(path: Option<impl AsRef<Path>>) -> Result<ArchiveConfig, ConfigError> {
    let config: ArchiveConfig = load_config(path)?;
    validate(&config)?;
    Ok(config)
}

fn load_layers<T>(path: Option<&Path>, env: Option<Map<String, String>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let file = match path {
        Some(path) => {
            info!("Loading config from {}", path.display());
            File::from(path).required(true)
        },
        None => {
            debug!("Looking for optional {DEFAULT_CONFIG_NAME} config in the working directory");
            File::with_name(DEFAULT_CONFIG_NAME).required(false)
        },
    };

    let environment =
        Environment::with_prefix(ENV_PREFIX).separator("__").try_parsing(true).source(env);

    Config::builder()
        .add_source(file)
        .add_source(environment)
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")
}

fn validate(config: &ArchiveConfig) -> Result<(), ConfigError> {
    let problem = if config.ollama.binary.trim().is_empty() {
        Some("ollama.binary cannot be empty")
    } else if config.ollama.timeout_seconds == 0 {
        Some("ollama.timeout_seconds must be greater than zero")
    } else if config.bench.prompts.is_empty() {
        Some("bench.prompts cannot be empty")
    } else if config.bench.preview_chars == 0 {
        Some("bench.preview_chars must be greater than zero")
    } else {
        None
    };

    problem.map_or(Ok(()), |message| {
        Err(ConfigError::Invalid { message: message.into(), context: None })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn explicit_file_is_required() {
        let tmp = tempdir().unwrap();
        let err = load_config::<ArchiveConfig>(Some(tmp.path().join("missing.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Config { .. }));
    }

    #[test]
    fn file_values_override_defaults() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("lmarc.toml");
        fs::write(
            &path,
            r#"
            [archive]
            root = "/home/me/ai-notes"

            [ollama]
            timeout_seconds = 45

            [[hardware.probes]]
            label = "CPU topology"
            program = "lscpu"
            "#,
        )
        .unwrap();

        let config = load_archive_config(Some(&path)).unwrap();
        assert_eq!(config.archive.root, Path::new("/home/me/ai-notes"));
        assert_eq!(config.ollama.timeout_seconds, 45);
        assert_eq!(config.ollama.binary, "ollama");
        assert_eq!(config.hardware.probes.len(), 1);
    }

    #[test]
    fn environment_overrides_file() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("lmarc.toml");
        fs::write(&path, "[ollama]\nbinary = \"ollama\"\n").unwrap();

        let env = Map::from([
            ("LMARC__OLLAMA__BINARY".to_owned(), "/opt/ollama/bin/ollama".to_owned()),
            ("LMARC__ARCHIVE__OVERWRITE".to_owned(), "true".to_owned()),
        ]);

        let config: ArchiveConfig = load_layers(Some(&path), Some(env)).unwrap();
        assert_eq!(config.ollama.binary, "/opt/ollama/bin/ollama");
        assert!(config.archive.overwrite);
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("lmarc.toml");
        fs::write(&path, "[ollama]\ntimeout_seconds = 0\n").unwrap();

        let err = load_archive_config(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("timeout_seconds"));
    }
}
