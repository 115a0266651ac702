//! CLI route: loads configuration once and dispatches each command.

use crate::cli::parse::Commands;
use crate::cli::presentation::{
    format_manifest_json, format_manifest_text, format_summary_json, format_summary_text,
    ConsoleProgress,
};
use crate::config::{ConfigLoader, VeepiaciConfig};
use crate::error::ApiError;
use crate::manifest::parse_manifest;
use crate::report::VerificationReport;
use crate::runner::AsyncRunner;
use crate::verify::dispatch;
use std::path::{Path, PathBuf};
use tracing::info;

/// Output mode shared by all commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Result<Self, ApiError> {
        match value {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(ApiError::ConfigError(format!(
                "Invalid output format: {} (must be 'text' or 'json')",
                other
            ))),
        }
    }
}

/// What a command produced
#[derive(Debug)]
pub struct CommandOutput {
    pub text: String,
    /// False when a verification ran but found problems
    pub success: bool,
}

pub struct RunContext {
    config: VeepiaciConfig,
}

impl RunContext {
    /// Load configuration from `config_path`, or the layered defaults for `working_dir`
    pub fn new(working_dir: &Path, config_path: Option<&Path>) -> Result<Self, ApiError> {
        let config = match config_path {
            Some(path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load(working_dir)?,
        };
        Self::with_config(config)
    }

    pub fn with_config(config: VeepiaciConfig) -> Result<Self, ApiError> {
        config.validate().map_err(|errors| {
            let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            ApiError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                messages.join("\n")
            ))
        })?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &VeepiaciConfig {
        &self.config
    }

    pub fn execute(&self, command: &Commands) -> Result<CommandOutput, ApiError> {
        match command {
            Commands::Verify {
                checksum_file,
                directory,
                result_file,
                format,
            } => self.verify(
                checksum_file.clone(),
                directory.clone(),
                result_file.clone(),
                OutputFormat::parse(format)?,
            ),
            Commands::Inspect {
                checksum_file,
                format,
            } => self.inspect(checksum_file, OutputFormat::parse(format)?),
        }
    }

    fn verify(
        &self,
        checksum_file: Option<PathBuf>,
        directory: Option<PathBuf>,
        result_file: Option<PathBuf>,
        format: OutputFormat,
    ) -> Result<CommandOutput, ApiError> {
        let settings = self
            .config
            .settings
            .overridden_by(checksum_file, directory, result_file);
        let (Some(checksum_file), Some(directory)) = (&settings.checksum_file, &settings.directory)
        else {
            return Err(ApiError::ConfigError(
                "A checksum file and a directory are required (--checksum-file, --directory or [settings] in the config file)"
                    .to_string(),
            ));
        };

        let manifest = parse_manifest(checksum_file)?;
        let runner = AsyncRunner::with_config(&self.config.scan);
        let runtime = tokio::runtime::Runtime::new()?;

        let (result, report) = runtime.block_on(async {
            let mut run = runner.start(manifest, directory.clone());
            let mut console = ConsoleProgress::new(std::io::stdout(), self.config.logging.color);
            let mut report = VerificationReport::new();
            while let Some(event) = run.next_event().await {
                if format == OutputFormat::Text {
                    dispatch(&mut console, &event);
                }
                dispatch(&mut report, &event);
            }
            run.wait().await.map(|result| (result, report))
        })?;

        if let Some(result_file) = &settings.result_file {
            report.write_to(result_file)?;
            info!(path = %result_file.display(), "Verification report written");
        }

        let text = match format {
            OutputFormat::Text => format_summary_text(&result),
            OutputFormat::Json => format_summary_json(&result)?,
        };
        Ok(CommandOutput {
            text,
            success: result.success(),
        })
    }

    fn inspect(&self, checksum_file: &Path, format: OutputFormat) -> Result<CommandOutput, ApiError> {
        let manifest = parse_manifest(checksum_file)?;
        let text = match format {
            OutputFormat::Text => format_manifest_text(checksum_file, &manifest),
            OutputFormat::Json => format_manifest_json(checksum_file, &manifest)?,
        };
        Ok(CommandOutput {
            text,
            success: true,
        })
    }
}
