//! Precondition checks on an application configuration.
//!
//! Catches authoring mistakes in CLI parameters before a parser is
//! assembled: malformed flag spellings, positional entries that also carry a
//! flag spelling, duplicate names, flags that collide within a scope, and
//! positional layouts that cannot be matched left to right.
//! Selector problems are reported by [`ParserBuilder`](crate::ParserBuilder)
//! itself.
//!
//! # Examples
//!
//! ```
//! use argspec_core::*;
//!
//! let mut config = ApplicationConfiguration::new("navigator");
//! config.entries.push(
//!     ConfigurationEntry::new("verbose", "Verbose output")
//!         .with_cli(CliParameters::flag().with_short("-v")),
//! );
//! assert!(validate_configuration(&config).is_empty());
//!
//! // Invalid: short flag missing leading dash
//! config.entries.push(
//!     ConfigurationEntry::new("quiet", "Quiet output")
//!         .with_cli(CliParameters::flag().with_short("q")),
//! );
//! assert!(!validate_configuration(&config).is_empty());
//! ```

use std::collections::HashSet;

use thiserror::Error;

use crate::{
    Applicability, ApplicationConfiguration, ArgumentDefinition, ConfigurationEntry, NArgs, project,
};

/// Configuration precondition errors.
///
/// Each variant describes one authoring mistake. The `Display` impl provides
/// a human-readable message naming the offending entry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Application name is empty or whitespace-only.
    #[error("application name cannot be empty")]
    EmptyApplicationName,
    /// Entry name is empty or whitespace-only.
    #[error("entry name cannot be empty")]
    EmptyEntryName,
    /// Two entries share a name.
    #[error("duplicate entry: {0}")]
    DuplicateEntry(String),
    /// A CLI-exposed entry uses an argument id the generated parser reserves.
    #[error("entry name '{0}' is reserved by the generated parser")]
    ReservedName(String),
    /// Two subcommands share a name, or a subcommand name is empty.
    #[error("duplicate subcommand: {0}")]
    DuplicateSubcommand(String),
    /// Short flag is not a single dash followed by one character.
    #[error("invalid short flag format for '{entry}': {flag}")]
    InvalidShortFlag { entry: String, flag: String },
    /// Long flag does not start with `--` or has no name.
    #[error("invalid long flag format for '{entry}': {flag}")]
    InvalidLongFlag { entry: String, flag: String },
    /// A positional entry also sets a short or long spelling.
    #[error("positional entry '{0}' cannot define a short or long flag")]
    PositionalWithFlag(String),
    /// A positional entry uses an action that never takes a value.
    #[error("positional entry '{0}' cannot use a store_true, store_false or count action")]
    PositionalWithFlagAction(String),
    /// A flag-like action is combined with an explicit value count.
    #[error("entry '{0}' combines a value-less action with nargs")]
    ActionWithNargs(String),
    /// `nargs` of zero.
    #[error("entry '{0}' must accept at least one value")]
    ZeroNargs(String),
    /// The same flag spelling appears twice in one scope.
    #[error("duplicate flag in scope '{scope}': {flag}")]
    DuplicateFlag { scope: String, flag: String },
    /// A required positional comes after an optional one in the same scope.
    #[error("required positional '{entry}' follows an optional positional in scope '{scope}'")]
    RequiredAfterOptional { scope: String, entry: String },
    /// A positional taking several values is followed by positionals it
    /// could swallow.
    #[error("positional '{entry}' takes several values but is not last in scope '{scope}'")]
    MultiValueNotLast { scope: String, entry: String },
}

/// Validates an application configuration.
///
/// Checks names, per-entry CLI parameters, and flag collisions in the base
/// scope and in every subcommand scope (which includes the inherited base
/// flags). `-h`/`--help`, and `-V`/`--version` when a version is set, are
/// taken by the generated parser. Stops at the first error.
///
/// # Examples
///
/// ```
/// use argspec_core::*;
///
/// let mut config = ApplicationConfiguration::new("navigator");
/// config.subcommands.push(Subcommand::new("run", "Run"));
/// config.entries.push(
///     ConfigurationEntry::new("playbook", "Playbook")
///         .with_cli(CliParameters::positional().with_short("-p"))
///         .for_subcommands(&["run"]),
/// );
///
/// let errors = validate_configuration(&config);
/// assert_eq!(
///     errors,
///     vec![ValidationError::PositionalWithFlag("playbook".into())]
/// );
/// ```
pub fn validate_configuration(config: &ApplicationConfiguration) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if config.application_name.trim().is_empty() {
        errors.push(ValidationError::EmptyApplicationName);
        return errors;
    }

    let mut seen_entries: HashSet<&str> = HashSet::new();
    for entry in &config.entries {
        let name = entry.name.trim();
        if name.is_empty() {
            errors.push(ValidationError::EmptyEntryName);
            return errors;
        }
        if !seen_entries.insert(name) {
            errors.push(ValidationError::DuplicateEntry(name.to_string()));
            return errors;
        }
        let reserved_id = name == "help" || (name == "version" && config.version.is_some());
        if reserved_id && entry.is_cli_exposed() {
            errors.push(ValidationError::ReservedName(name.to_string()));
            return errors;
        }
        errors.extend(validate_entry(entry));
        if !errors.is_empty() {
            return errors;
        }
    }

    let mut seen_subcommands: HashSet<&str> = HashSet::new();
    for sub in &config.subcommands {
        let name = sub.name.trim();
        if name.is_empty() {
            errors.push(ValidationError::DuplicateSubcommand("<empty>".to_string()));
            return errors;
        }
        if !seen_subcommands.insert(name) {
            errors.push(ValidationError::DuplicateSubcommand(name.to_string()));
            return errors;
        }
    }

    let base: Vec<&ConfigurationEntry> = config
        .entries
        .iter()
        .filter(|entry| entry.subcommands == Applicability::All)
        .collect();
    let mut reserved = vec!["-h", "--help"];
    if config.version.is_some() {
        reserved.extend(["-V", "--version"]);
    }

    errors.extend(validate_scope(&config.application_name, &reserved, &base));
    if !errors.is_empty() {
        return errors;
    }

    for sub in &config.subcommands {
        let scope: Vec<&ConfigurationEntry> = base
            .iter()
            .copied()
            .chain(
                config
                    .entries
                    .iter()
                    .filter(|entry| entry.subcommands.includes(&sub.name)),
            )
            .collect();
        errors.extend(validate_scope(&sub.name, &reserved, &scope));
        if !errors.is_empty() {
            return errors;
        }
    }

    errors
}

fn validate_entry(entry: &ConfigurationEntry) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let Some(params) = &entry.cli_parameters else {
        return errors;
    };

    if params.nargs == Some(NArgs::Exactly(0)) {
        errors.push(ValidationError::ZeroNargs(entry.name.clone()));
        return errors;
    }

    if params.positional {
        if params.short.is_some() || params.long_override.is_some() {
            errors.push(ValidationError::PositionalWithFlag(entry.name.clone()));
        } else if params.action.is_some_and(|action| action.is_flag_like()) {
            errors.push(ValidationError::PositionalWithFlagAction(entry.name.clone()));
        }
        return errors;
    }

    if let Some(short) = &params.short {
        if !short.starts_with('-') || short.starts_with("--") || short.chars().count() != 2 {
            errors.push(ValidationError::InvalidShortFlag {
                entry: entry.name.clone(),
                flag: short.clone(),
            });
            return errors;
        }
    }

    if let Some(long) = &params.long_override {
        if !long.starts_with("--") || long.len() < 3 {
            errors.push(ValidationError::InvalidLongFlag {
                entry: entry.name.clone(),
                flag: long.clone(),
            });
            return errors;
        }
    }

    if params.action.is_some_and(|action| action.is_flag_like()) && params.nargs.is_some() {
        errors.push(ValidationError::ActionWithNargs(entry.name.clone()));
    }

    errors
}

fn validate_scope(
    scope: &str,
    reserved: &[&str],
    entries: &[&ConfigurationEntry],
) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut seen: HashSet<String> = reserved.iter().map(|flag| flag.to_string()).collect();
    let mut positionals = Vec::new();

    for entry in entries {
        let Some(definition) = project(entry) else {
            continue;
        };
        if definition.is_positional_form() {
            positionals.push((entry.name.as_str(), definition));
            continue;
        }
        for flag in [definition.short, definition.long].into_iter().flatten() {
            if !seen.insert(flag.clone()) {
                errors.push(ValidationError::DuplicateFlag {
                    scope: scope.to_string(),
                    flag,
                });
                return errors;
            }
        }
    }

    errors.extend(validate_positional_layout(scope, &positionals));
    errors
}

/// Checks that the positionals of one scope, in registration order, can be
/// matched unambiguously from left to right.
///
/// Required positionals come first. A positional taking several values must
/// be last, or second to last when the last one takes exactly one value; it
/// then receives every value but the final one.
fn validate_positional_layout(
    scope: &str,
    positionals: &[(&str, ArgumentDefinition)],
) -> Option<ValidationError> {
    let mut optional_seen = false;
    for (name, definition) in positionals {
        if !definition.is_required() {
            optional_seen = true;
        } else if optional_seen {
            return Some(ValidationError::RequiredAfterOptional {
                scope: scope.to_string(),
                entry: name.to_string(),
            });
        }
    }

    let (_, last) = positionals.last()?;
    let last_idx = positionals.len() - 1;
    positionals[..last_idx]
        .iter()
        .enumerate()
        .find(|(idx, (_, definition))| {
            definition.accepts_many()
                && (idx + 1 != last_idx || !last.is_required() || last.accepts_many())
        })
        .map(|(_, (name, _))| ValidationError::MultiValueNotLast {
            scope: scope.to_string(),
            entry: name.to_string(),
        })
}
