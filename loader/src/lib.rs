//! Load application configuration definitions from disk.
//!
//! A definition file describes an [`ApplicationConfiguration`]: the
//! application name, its configuration entries, and its subcommands. YAML
//! (`.yaml`, `.yml`) and JSON (`.json`) are supported; the format is picked
//! from the file extension.
//!
//! # Example YAML
//!
//! ```yaml
//! application_name: navigator
//! entries:
//!   - name: app
//!     short_description: Subcommands
//!     subcommand_value: true
//!   - name: mode
//!     short_description: Specify the user-interface mode
//!     default: interactive
//!     cli_parameters:
//!       short: "-m"
//!   - name: playbook
//!     short_description: Specify the playbook name
//!     subcommands: [run]
//!     cli_parameters:
//!       positional: true
//! subcommands:
//!   - name: run
//!     description: Run a playbook
//! ```
//!
//! # Quick start
//!
//! ```no_run
//! use argspec_core::ParserBuilder;
//!
//! let config = argspec_loader::load_configuration("navigator.yml").unwrap();
//! let schema = ParserBuilder::new(&config).build().unwrap();
//! ```

mod error;

use std::io::{BufReader, BufWriter};
use std::path::Path;

use argspec_core::ApplicationConfiguration;
use tracing::debug;

pub use error::{LoaderError, Result};

/// Definition file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionFormat {
    Yaml,
    Json,
}

impl DefinitionFormat {
    /// Picks the format from a file extension.
    ///
    /// # Errors
    ///
    /// Returns [`LoaderError::UnsupportedFormat`] for any other extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("yaml" | "yml") => Ok(Self::Yaml),
            Some("json") => Ok(Self::Json),
            _ => Err(LoaderError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Parses a YAML definition.
pub fn from_yaml_str(raw: &str) -> Result<ApplicationConfiguration> {
    Ok(serde_yaml::from_str(raw)?)
}

/// Parses a JSON definition.
pub fn from_json_str(raw: &str) -> Result<ApplicationConfiguration> {
    Ok(serde_json::from_str(raw)?)
}

/// Loads a definition file.
///
/// # Errors
///
/// Returns [`UnsupportedFormat`](LoaderError::UnsupportedFormat) for an
/// unknown extension, [`IoError`](LoaderError::IoError) if the file cannot
/// be read, or a JSON/YAML error if parsing fails.
pub fn load_configuration(path: impl AsRef<Path>) -> Result<ApplicationConfiguration> {
    let path = path.as_ref();
    let format = DefinitionFormat::from_path(path)?;
    let reader = BufReader::new(std::fs::File::open(path)?);

    let config: ApplicationConfiguration = match format {
        DefinitionFormat::Yaml => serde_yaml::from_reader(reader)?,
        DefinitionFormat::Json => serde_json::from_reader(reader)?,
    };

    debug!(
        path = %path.display(),
        entries = config.entries.len(),
        subcommands = config.subcommands.len(),
        "loaded definition"
    );
    Ok(config)
}

/// Writes a definition file in the format named by its extension.
///
/// # Errors
///
/// Returns [`UnsupportedFormat`](LoaderError::UnsupportedFormat) for an
/// unknown extension, [`IoError`](LoaderError::IoError) if the file cannot
/// be written, or a JSON/YAML error if serialization fails.
pub fn save_configuration(config: &ApplicationConfiguration, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let format = DefinitionFormat::from_path(path)?;
    let writer = BufWriter::new(std::fs::File::create(path)?);

    match format {
        DefinitionFormat::Yaml => serde_yaml::to_writer(writer, config)?,
        DefinitionFormat::Json => serde_json::to_writer_pretty(writer, config)?,
    }
    Ok(())
}
