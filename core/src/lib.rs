//! Compile a declarative configuration model into a command-line parser.
//!
//! An application describes its settings as [`ConfigurationEntry`] values and
//! its subcommands as [`Subcommand`] values, collected in an
//! [`ApplicationConfiguration`]. This crate turns that model into a
//! two-level [`clap::Command`]:
//!
//! - [`project`] maps one entry onto an [`ArgumentDefinition`] (spellings,
//!   help text with the default, value count, action).
//! - [`ParserBuilder`] registers entries that apply to every subcommand once,
//!   as global arguments, and gives each subcommand its own arguments.
//! - [`validate_configuration`] rejects malformed CLI parameters before
//!   anything is registered.
//! - [`ParserSchema::try_parse_from`] reports the values typed on the
//!   command line, keyed by entry name.
//!
//! # Example
//!
//! ```
//! use argspec_core::*;
//!
//! let mut config = ApplicationConfiguration::new("navigator");
//! config.entries.push(ConfigurationEntry::new("app", "Subcommands").as_subcommand_value());
//! config.entries.push(
//!     ConfigurationEntry::new("verbose", "Enable verbose output")
//!         .with_cli(CliParameters::flag().with_short("-v").with_action(ArgumentAction::StoreTrue)),
//! );
//! config.entries.push(
//!     ConfigurationEntry::new("target", "Playbook to run")
//!         .with_cli(CliParameters::positional())
//!         .for_subcommands(&["run"]),
//! );
//! config.subcommands.push(Subcommand::new("run", "Run a playbook"));
//!
//! let schema = ParserBuilder::new(&config).build().unwrap();
//! assert_eq!(schema.base_arguments().len(), 1);
//! assert_eq!(schema.subcommand_arguments("run").unwrap()[0].name, "target");
//!
//! let parsed = schema.try_parse_from(["navigator", "run", "site.yml"]).unwrap();
//! assert_eq!(parsed.get("app"), Some(&ParsedValue::Single(Some("run".into()))));
//! ```

mod assemble;
mod error;
mod parsed;
mod project;
mod summary;
mod types;
mod validate;

pub use assemble::{ParserBuilder, ParserSchema, RegisteredArgument, SubcommandScope};
pub use error::{BuildError, Result};
pub use parsed::{ParsedArguments, ParsedValue};
pub use project::{
    ArgumentDefinition, ArgumentOptions, ValueKind, help_text, is_positional_form, project,
};
pub use summary::{
    ArgumentSummary, OutputFormat, SchemaSummary, SubcommandSummary, format_summary,
};
pub use types::*;
pub use validate::{ValidationError, validate_configuration};
