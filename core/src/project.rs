//! Projection of a single configuration entry onto a command-line argument.
//!
//! [`project`] turns one [`ConfigurationEntry`] into an
//! [`ArgumentDefinition`]: the flag spellings plus the options clap needs.
//! The definition is an intermediate, inspectable value; [`to_arg`]
//! (`ArgumentDefinition::to_arg`) produces the actual [`clap::Arg`].
//!
//! # Example
//!
//! ```
//! use argspec_core::*;
//!
//! let entry = ConfigurationEntry::new("mode", "Specify the user-interface mode")
//!     .with_default("interactive")
//!     .with_cli(CliParameters::flag().with_short("-m"));
//!
//! let def = project(&entry).unwrap();
//! assert_eq!(def.short.as_deref(), Some("-m"));
//! assert_eq!(def.long.as_deref(), Some("--mode"));
//! assert_eq!(
//!     def.options.help,
//!     "Specify the user-interface mode (default: interactive)"
//! );
//! ```
//!
//! [`to_arg`]: ArgumentDefinition::to_arg

use clap::builder::ValueRange;
use clap::{Arg, ArgAction};

use crate::{ArgumentAction, ConfigurationEntry, NArgs};

/// Keyword options of a projected argument.
///
/// Carries no default value. Effective defaults are resolved by the
/// application, and the parser only reports what the user typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentOptions {
    /// Help text, including the `(default: ...)` suffix when one is set.
    pub help: String,
    /// Destination name of an optional argument; `None` for positionals,
    /// which are bound by their own name.
    pub binding: Option<String>,
    pub nargs: Option<NArgs>,
    pub action: Option<ArgumentAction>,
}

/// How a parsed value of an argument is read back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Flag,
    Count,
    Single,
    Many,
}

/// The projected form of one configuration entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentDefinition {
    /// Short spelling such as `-v`.
    pub short: Option<String>,
    /// Long spelling such as `--verbose`.
    pub long: Option<String>,
    pub options: ArgumentOptions,
}

/// Returns `true` only when *both* spellings are absent.
///
/// A single present spelling (typically a long flag without a short alias)
/// is the ordinary optional-argument case, not a positional one.
///
/// # Examples
///
/// ```
/// use argspec_core::is_positional_form;
///
/// assert!(is_positional_form(None, None));
/// assert!(!is_positional_form(None, Some("--verbose")));
/// assert!(!is_positional_form(Some("-v"), None));
/// ```
pub fn is_positional_form(short: Option<&str>, long: Option<&str>) -> bool {
    short.is_none() && long.is_none()
}

/// Builds the help text of an entry.
pub fn help_text(entry: &ConfigurationEntry) -> String {
    match entry.default.value() {
        Some(default) => format!("{} (default: {default})", entry.short_description),
        None => entry.short_description.clone(),
    }
}

/// Projects an entry onto an argument definition.
///
/// Returns `None` for config-only entries (no `cli_parameters`).
pub fn project(entry: &ConfigurationEntry) -> Option<ArgumentDefinition> {
    let params = entry.cli_parameters.as_ref()?;
    let help = help_text(entry);

    let definition = if params.positional {
        ArgumentDefinition {
            short: None,
            long: None,
            options: ArgumentOptions {
                help,
                binding: None,
                nargs: Some(params.nargs.unwrap_or(NArgs::Optional)),
                action: params.action,
            },
        }
    } else {
        let long = params
            .long_override
            .clone()
            .unwrap_or_else(|| format!("--{}", entry.name_dashed()));
        ArgumentDefinition {
            short: params.short.clone(),
            long: Some(long),
            options: ArgumentOptions {
                help,
                binding: Some(entry.name.clone()),
                nargs: params.nargs,
                action: params.action,
            },
        }
    };

    Some(definition)
}

impl ArgumentDefinition {
    pub fn is_positional_form(&self) -> bool {
        is_positional_form(self.short.as_deref(), self.long.as_deref())
    }

    /// Whether the parser insists on a value. Only positionals with `+` or
    /// an exact count are required.
    pub fn is_required(&self) -> bool {
        self.is_positional_form()
            && matches!(
                self.positional_nargs(),
                NArgs::OneOrMore | NArgs::Exactly(_)
            )
    }

    /// Whether one occurrence collects several values, or the argument
    /// may be repeated.
    pub fn accepts_many(&self) -> bool {
        self.options.nargs.is_some_and(NArgs::is_multiple)
            || self.options.action == Some(ArgumentAction::Append)
    }

    fn positional_nargs(&self) -> NArgs {
        self.options.nargs.unwrap_or(NArgs::Optional)
    }

    /// How the parsed value of this argument is read back.
    pub fn value_kind(&self) -> ValueKind {
        match self.options.action {
            Some(ArgumentAction::StoreTrue | ArgumentAction::StoreFalse) => ValueKind::Flag,
            Some(ArgumentAction::Count) => ValueKind::Count,
            Some(ArgumentAction::Append) => ValueKind::Many,
            Some(ArgumentAction::Store) | None => match self.options.nargs {
                Some(nargs) if nargs.is_multiple() => ValueKind::Many,
                _ => ValueKind::Single,
            },
        }
    }

    /// Converts the definition into a [`clap::Arg`] with the given id.
    ///
    /// Spellings that do not have the `-x` / `--name` shape are ignored;
    /// [`validate_configuration`](crate::validate_configuration) rejects them
    /// before a parser is assembled.
    pub fn to_arg(&self, id: &str) -> Arg {
        let mut arg = Arg::new(id.to_string()).help(self.options.help.clone());

        if self.is_positional_form() {
            arg = arg
                .num_args(positional_range(self.positional_nargs()))
                .required(self.is_required());
        } else {
            if let Some(short) = self.short.as_deref().and_then(short_char) {
                arg = arg.short(short);
            }
            if let Some(long) = self.long.as_deref().and_then(|l| l.strip_prefix("--")) {
                arg = arg.long(long.to_string());
            }
            if let Some(nargs) = self.options.nargs {
                arg = arg.num_args(flag_range(nargs));
            }
        }

        arg.action(clap_action(self.options.action))
    }
}

fn short_char(short: &str) -> Option<char> {
    let mut chars = short.strip_prefix('-')?.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c != '-' => Some(c),
        _ => None,
    }
}

fn positional_range(nargs: NArgs) -> ValueRange {
    match nargs {
        NArgs::Optional => ValueRange::new(1),
        NArgs::ZeroOrMore | NArgs::OneOrMore => ValueRange::new(1..),
        NArgs::Exactly(count) => ValueRange::new(count),
    }
}

fn flag_range(nargs: NArgs) -> ValueRange {
    match nargs {
        NArgs::Optional => ValueRange::new(0..=1),
        NArgs::ZeroOrMore => ValueRange::new(0..),
        NArgs::OneOrMore => ValueRange::new(1..),
        NArgs::Exactly(count) => ValueRange::new(count),
    }
}

fn clap_action(action: Option<ArgumentAction>) -> ArgAction {
    match action {
        None | Some(ArgumentAction::Store) => ArgAction::Set,
        Some(ArgumentAction::StoreTrue) => ArgAction::SetTrue,
        Some(ArgumentAction::StoreFalse) => ArgAction::SetFalse,
        Some(ArgumentAction::Count) => ArgAction::Count,
        Some(ArgumentAction::Append) => ArgAction::Append,
    }
}
