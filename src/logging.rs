//! Logging System
//!
//! Structured logging using the `tracing` crate. This is the diagnostic
//! channel: snapshot and journal failures are reported here and nowhere else.

use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Mutex;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriterExt};
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Registry};

/// Resolve the log file path with precedence: CLI, FSSIM_LOG_FILE env, config file, default.
///
/// Default uses the `ProjectDirs` state directory (data-local directory where
/// the platform has no state directory).
pub fn resolve_log_file_path(
    cli_file: Option<PathBuf>,
    config_file: Option<PathBuf>,
) -> Result<PathBuf, ApiError> {
    if let Some(p) = cli_file {
        if !p.as_os_str().is_empty() {
            return Ok(p);
        }
    }
    if let Ok(env_path) = std::env::var("FSSIM_LOG_FILE") {
        if !env_path.is_empty() {
            return Ok(PathBuf::from(env_path));
        }
    }
    if let Some(p) = config_file {
        if !p.as_os_str().is_empty() {
            return Ok(p);
        }
    }
    default_log_file_path()
}

fn default_log_file_path() -> Result<PathBuf, ApiError> {
    let project_dirs = directories::ProjectDirs::from("", "fssim", "fssim").ok_or_else(|| {
        ApiError::ConfigError(
            "Could not determine platform state directory for log file".to_string(),
        )
    })?;
    let dir = project_dirs
        .state_dir()
        .unwrap_or_else(|| project_dirs.data_local_dir())
        .to_path_buf();
    Ok(dir.join("fssim.log"))
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Whether logging is enabled (default: true)
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Log level: trace, debug, info, warn, error, off
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: json, text (default: text)
    #[serde(default = "default_format")]
    pub format: String,

    /// Output destination: stdout, stderr, file, file+stderr, both
    #[serde(default = "default_output")]
    pub output: String,

    /// Log file path when output includes file; None means use runtime default
    #[serde(default)]
    pub file: Option<PathBuf>,

    /// Enable colored output (text format only, stdout/stderr only)
    #[serde(default = "default_true")]
    pub color: bool,

    /// Module-specific log levels
    #[serde(default)]
    pub modules: HashMap<String, String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

fn default_output() -> String {
    "file".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            level: default_log_level(),
            format: default_format(),
            output: default_output(),
            file: None,
            color: default_true(),
            modules: HashMap::new(),
        }
    }
}

impl LoggingConfig {
    /// Apply command-line flags on top of the loaded configuration.
    pub fn with_overrides(
        mut self,
        level: Option<&str>,
        format: Option<&str>,
        output: Option<&str>,
        file: Option<PathBuf>,
    ) -> Self {
        if let Some(level) = level {
            self.level = level.to_string();
        }
        if let Some(format) = format {
            self.format = format.to_string();
        }
        if let Some(output) = output {
            self.output = output.to_string();
        }
        if file.is_some() {
            self.file = file;
        }
        self
    }
}

/// Rendering of log records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(ApiError::ConfigError(format!(
                "Invalid log format: {} (must be 'json' or 'text')",
                other
            ))),
        }
    }
}

/// Where log records are written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OutputDestinations {
    stdout: bool,
    stderr: bool,
    file: bool,
}

impl FromStr for OutputDestinations {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (stdout, stderr, file) = match s {
            "stdout" => (true, false, false),
            "stderr" => (false, true, false),
            "file" => (false, false, true),
            "file+stderr" => (false, true, true),
            "both" => (true, true, false),
            other => {
                return Err(ApiError::ConfigError(format!(
                    "Invalid log output: {} (must be 'stdout', 'stderr', 'file', 'file+stderr', or 'both')",
                    other
                )))
            }
        };
        Ok(Self {
            stdout,
            stderr,
            file,
        })
    }
}

/// Non-empty value of an environment variable.
fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

/// Install the global subscriber.
///
/// `FSSIM_LOG`, `FSSIM_LOG_FORMAT`, `FSSIM_LOG_OUTPUT` and `FSSIM_LOG_MODULES`
/// win over `config`; command-line flags are expected to be folded into
/// `config` already (see [`LoggingConfig::with_overrides`]). A second call in
/// the same process fails.
pub fn init_logging(config: Option<&LoggingConfig>) -> Result<(), ApiError> {
    let install_failed = |e: TryInitError| ApiError::ConfigError(format!("Failed to install logger: {}", e));

    if matches!(config, Some(c) if !c.enabled) {
        return Registry::default()
            .with(EnvFilter::new("off"))
            .with(fmt::layer().with_writer(std::io::sink))
            .try_init()
            .map_err(install_failed);
    }

    let filter = build_env_filter(config)?;
    let format = match env_value("FSSIM_LOG_FORMAT").and_then(|f| f.parse().ok()) {
        Some(format) => format,
        None => config.map_or("text", |c| c.format.as_str()).parse::<LogFormat>()?,
    };
    let output: OutputDestinations = match env_value("FSSIM_LOG_OUTPUT") {
        Some(output) => output.parse()?,
        None => config.map_or("file", |c| c.output.as_str()).parse()?,
    };
    let ansi = config.map_or(true, |c| c.color) && !output.file;

    let layer = fmt::layer()
        .with_target(true)
        .with_timer(ChronoUtc::rfc_3339())
        .with_writer(build_writer(output, config)?);
    let subscriber = Registry::default().with(filter);
    let installed = match format {
        LogFormat::Json => subscriber.with(layer.json()).try_init(),
        LogFormat::Text => subscriber.with(layer.with_ansi(ansi)).try_init(),
    };
    installed.map_err(install_failed)
}

fn open_log_file(config: Option<&LoggingConfig>) -> Result<Mutex<std::fs::File>, ApiError> {
    let path = resolve_log_file_path(None, config.and_then(|c| c.file.clone()))?;
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|e| {
            ApiError::ConfigError(format!("Failed to create log directory {:?}: {}", dir, e))
        })?;
    }
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map(Mutex::new)
        .map_err(|e| ApiError::ConfigError(format!("Failed to open log file {:?}: {}", path, e)))
}

fn build_writer(
    output: OutputDestinations,
    config: Option<&LoggingConfig>,
) -> Result<BoxMakeWriter, ApiError> {
    let writer = match (output.file, output.stdout, output.stderr) {
        (true, _, true) => BoxMakeWriter::new(open_log_file(config)?.and(std::io::stderr)),
        (true, _, false) => BoxMakeWriter::new(open_log_file(config)?),
        (false, true, true) => BoxMakeWriter::new(std::io::stdout.and(std::io::stderr)),
        (false, false, true) => BoxMakeWriter::new(std::io::stderr),
        (false, _, false) => BoxMakeWriter::new(std::io::stdout),
    };
    Ok(writer)
}

/// `FSSIM_LOG` replaces everything; otherwise the configured level plus
/// per-module directives from the config and `FSSIM_LOG_MODULES`.
fn build_env_filter(config: Option<&LoggingConfig>) -> Result<EnvFilter, ApiError> {
    if let Ok(filter) = EnvFilter::try_from_env("FSSIM_LOG") {
        return Ok(filter);
    }

    let level = config.map_or("info", |c| c.level.as_str());
    let mut filter = EnvFilter::new(level);
    if level == "off" {
        return Ok(filter);
    }

    let mut directives: Vec<(String, String)> = config
        .map(|c| {
            c.modules
                .iter()
                .map(|(module, level)| (module.clone(), level.clone()))
                .collect()
        })
        .unwrap_or_default();
    if let Some(modules) = env_value("FSSIM_LOG_MODULES") {
        directives.extend(modules.split(',').filter_map(|entry| {
            entry.split_once('=')
                .map(|(module, level)| (module.trim().to_string(), level.trim().to_string()))
        }));
    }

    for (module, module_level) in directives {
        let directive = format!("{}={}", module, module_level)
            .parse()
            .map_err(|e| ApiError::ConfigError(format!("Invalid log directive {}: {}", module, e)))?;
        filter = filter.add_directive(directive);
    }
    Ok(filter)
}
