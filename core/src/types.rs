//! Configuration model definitions.
//!
//! These types describe an application's settings declaratively: each
//! [`ConfigurationEntry`] names one setting, and its optional
//! [`CliParameters`] describe how the setting is exposed on the command line.
//! The model is read-only input to [`ParserBuilder`](crate::ParserBuilder)
//! and round-trips through YAML and JSON with [`serde`].

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A legitimate default value for a configuration entry.
///
/// The [`Display`](fmt::Display) rendering is what appears in generated help
/// text, so strings are written without quotes.
///
/// # Examples
///
/// ```
/// use argspec_core::ConfigValue;
///
/// assert_eq!(ConfigValue::from("stdout").to_string(), "stdout");
/// assert_eq!(ConfigValue::from(false).to_string(), "false");
/// assert_eq!(
///     ConfigValue::List(vec!["a".into(), "b".into()]).to_string(),
///     "[a, b]"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    /// An explicit null. Distinct from "no default configured".
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    List(Vec<ConfigValue>),
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value:?}"),
            Self::String(value) => f.write_str(value),
            Self::List(items) => {
                f.write_str("[")?;
                for (idx, item) in items.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
        }
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for ConfigValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for ConfigValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for ConfigValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

/// Default of a configuration entry, with an explicit "not set" marker.
///
/// `NotSet` is never confused with a real default: an entry whose default is
/// [`ConfigValue::Null`] or `false` still has a default and shows it in help.
/// When deserializing, a missing `default` key yields `NotSet` while an
/// explicit `null` yields `Value(ConfigValue::Null)`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum EntryDefault {
    #[default]
    NotSet,
    Value(ConfigValue),
}

impl EntryDefault {
    /// Returns `true` when no default is configured.
    pub fn is_not_set(&self) -> bool {
        matches!(self, Self::NotSet)
    }

    /// Returns the configured default, if any.
    pub fn value(&self) -> Option<&ConfigValue> {
        match self {
            Self::NotSet => None,
            Self::Value(value) => Some(value),
        }
    }
}

impl Serialize for EntryDefault {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::NotSet => serializer.serialize_none(),
            Self::Value(value) => value.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for EntryDefault {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        ConfigValue::deserialize(deserializer).map(Self::Value)
    }
}

/// Which subcommands a configuration entry applies to.
///
/// Serialized as the keyword `"all"` or as a list of subcommand names.
///
/// # Examples
///
/// ```
/// use argspec_core::Applicability;
///
/// let only: Applicability = serde_json::from_str(r#"["run", "doc"]"#).unwrap();
/// assert!(only.includes("run"));
/// assert!(!only.includes("lint"));
///
/// let all: Applicability = serde_json::from_str(r#""all""#).unwrap();
/// assert_eq!(all, Applicability::All);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "ApplicabilityRepr", into = "ApplicabilityRepr")]
pub enum Applicability {
    /// Shared by every subcommand; registered once on the base scope.
    #[default]
    All,
    /// Registered only on the named subcommands.
    Only(Vec<String>),
}

impl Applicability {
    /// Builds an explicit subcommand list.
    pub fn only<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Only(names.into_iter().map(Into::into).collect())
    }

    /// Returns `true` when this is an explicit list naming `subcommand`.
    ///
    /// `All` entries live on the base scope, so they never count as
    /// included in a specific subcommand.
    pub fn includes(&self, subcommand: &str) -> bool {
        match self {
            Self::All => false,
            Self::Only(names) => names.iter().any(|name| name == subcommand),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum ApplicabilityRepr {
    Keyword(String),
    List(Vec<String>),
}

impl TryFrom<ApplicabilityRepr> for Applicability {
    type Error = String;

    fn try_from(repr: ApplicabilityRepr) -> Result<Self, Self::Error> {
        match repr {
            ApplicabilityRepr::Keyword(word) if word.eq_ignore_ascii_case("all") => Ok(Self::All),
            ApplicabilityRepr::Keyword(word) => Err(format!(
                "expected \"all\" or a list of subcommand names, found \"{word}\""
            )),
            ApplicabilityRepr::List(names) => Ok(Self::Only(names)),
        }
    }
}

impl From<Applicability> for ApplicabilityRepr {
    fn from(value: Applicability) -> Self {
        match value {
            Applicability::All => Self::Keyword("all".to_string()),
            Applicability::Only(names) => Self::List(names),
        }
    }
}

/// How many values an argument consumes.
///
/// Serialized with the familiar `"?"`, `"*"`, `"+"` symbols or an integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "NArgsRepr", into = "NArgsRepr")]
pub enum NArgs {
    /// Zero or one value (`?`).
    Optional,
    /// Any number of values (`*`).
    ZeroOrMore,
    /// At least one value (`+`).
    OneOrMore,
    /// Exactly this many values.
    Exactly(usize),
}

impl NArgs {
    /// Returns `true` when the argument collects a list rather than a single value.
    pub fn is_multiple(self) -> bool {
        match self {
            Self::Optional => false,
            Self::ZeroOrMore | Self::OneOrMore => true,
            Self::Exactly(count) => count > 1,
        }
    }
}

impl fmt::Display for NArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Optional => f.write_str("?"),
            Self::ZeroOrMore => f.write_str("*"),
            Self::OneOrMore => f.write_str("+"),
            Self::Exactly(count) => write!(f, "{count}"),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum NArgsRepr {
    Count(usize),
    Symbol(String),
}

impl TryFrom<NArgsRepr> for NArgs {
    type Error = String;

    fn try_from(repr: NArgsRepr) -> Result<Self, Self::Error> {
        match repr {
            NArgsRepr::Count(count) => Ok(Self::Exactly(count)),
            NArgsRepr::Symbol(symbol) => match symbol.as_str() {
                "?" => Ok(Self::Optional),
                "*" => Ok(Self::ZeroOrMore),
                "+" => Ok(Self::OneOrMore),
                other => other
                    .parse::<usize>()
                    .map(Self::Exactly)
                    .map_err(|_| format!("invalid nargs specifier: {other}")),
            },
        }
    }
}

impl From<NArgs> for NArgsRepr {
    fn from(value: NArgs) -> Self {
        match value {
            NArgs::Exactly(count) => Self::Count(count),
            other => Self::Symbol(other.to_string()),
        }
    }
}

/// Behavior override for an argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArgumentAction {
    /// Capture the supplied value (the implicit behavior).
    Store,
    #[serde(alias = "store-true")]
    StoreTrue,
    #[serde(alias = "store-false")]
    StoreFalse,
    /// Count occurrences (`-vvv`).
    Count,
    /// Collect every occurrence into a list.
    Append,
}

impl ArgumentAction {
    /// Returns `true` for actions that never take a value.
    pub fn is_flag_like(self) -> bool {
        matches!(self, Self::StoreTrue | Self::StoreFalse | Self::Count)
    }
}

/// Command-line exposure of a configuration entry.
///
/// # Examples
///
/// ```
/// use argspec_core::{ArgumentAction, CliParameters};
///
/// let params = CliParameters::flag()
///     .with_short("-v")
///     .with_action(ArgumentAction::StoreTrue);
/// assert_eq!(params.short.as_deref(), Some("-v"));
/// assert!(!params.positional);
///
/// let target = CliParameters::positional();
/// assert!(target.positional);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliParameters {
    /// Single-letter alias, spelled with its dash (e.g. `"-v"`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short: Option<String>,
    /// Explicit long spelling (e.g. `"--ee"`); otherwise derived from the entry name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long_override: Option<String>,
    pub positional: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nargs: Option<NArgs>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<ArgumentAction>,
}

impl CliParameters {
    /// Parameters for an optional (flag-style) argument.
    pub fn flag() -> Self {
        Self::default()
    }

    /// Parameters for a positional argument.
    pub fn positional() -> Self {
        Self {
            positional: true,
            ..Self::default()
        }
    }

    pub fn with_short(mut self, short: &str) -> Self {
        self.short = Some(short.to_string());
        self
    }

    pub fn with_long(mut self, long: &str) -> Self {
        self.long_override = Some(long.to_string());
        self
    }

    pub fn with_nargs(mut self, nargs: NArgs) -> Self {
        self.nargs = Some(nargs);
        self
    }

    pub fn with_action(mut self, action: ArgumentAction) -> Self {
        self.action = Some(action);
        self
    }
}

/// One declarative setting of the application.
///
/// # Examples
///
/// ```
/// use argspec_core::{Applicability, CliParameters, ConfigurationEntry, project};
///
/// let entry = ConfigurationEntry::new("log_file", "Specify the full path for the log file")
///     .with_default("./app.log")
///     .with_cli(CliParameters::flag().with_short("-l"));
///
/// assert_eq!(entry.name_dashed(), "log-file");
/// assert_eq!(entry.subcommands, Applicability::All);
/// assert!(entry.is_cli_exposed());
///
/// let arg = project(&entry).unwrap().to_arg(&entry.name);
/// assert_eq!(arg.get_short(), Some('l'));
/// assert_eq!(arg.get_long(), Some("log-file"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigurationEntry {
    /// Unique identifier; also the binding name of the parsed value.
    pub name: String,
    pub short_description: String,
    #[serde(default, skip_serializing_if = "EntryDefault::is_not_set")]
    pub default: EntryDefault,
    /// Absent when the setting is not exposed on the command line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cli_parameters: Option<CliParameters>,
    #[serde(default)]
    pub subcommands: Applicability,
    /// Marks the entry that records which subcommand was chosen.
    #[serde(default)]
    pub subcommand_value: bool,
}

impl ConfigurationEntry {
    /// Creates a config-only entry that applies to all subcommands.
    pub fn new(name: &str, short_description: &str) -> Self {
        Self {
            name: name.to_string(),
            short_description: short_description.to_string(),
            default: EntryDefault::NotSet,
            cli_parameters: None,
            subcommands: Applicability::All,
            subcommand_value: false,
        }
    }

    /// Sets the entry's default value.
    pub fn with_default(mut self, value: impl Into<ConfigValue>) -> Self {
        self.default = EntryDefault::Value(value.into());
        self
    }

    /// Exposes the entry on the command line.
    pub fn with_cli(mut self, params: CliParameters) -> Self {
        self.cli_parameters = Some(params);
        self
    }

    /// Restricts the entry to the named subcommands.
    pub fn for_subcommands(mut self, names: &[&str]) -> Self {
        self.subcommands = Applicability::only(names.iter().copied());
        self
    }

    /// Marks this entry as the subcommand selector.
    pub fn as_subcommand_value(mut self) -> Self {
        self.subcommand_value = true;
        self
    }

    /// The flag spelling derived from the name (`log_file` → `log-file`).
    pub fn name_dashed(&self) -> String {
        self.name.replace('_', "-")
    }

    pub fn is_cli_exposed(&self) -> bool {
        self.cli_parameters.is_some()
    }
}

/// A subcommand the application offers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subcommand {
    pub name: String,
    pub description: String,
}

impl Subcommand {
    pub fn new(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
        }
    }
}

/// The complete declarative configuration of an application.
///
/// Owns the ordered entries and subcommands. Registration order in the
/// generated parser follows the order here.
///
/// # Examples
///
/// ```
/// use argspec_core::*;
///
/// let mut config = ApplicationConfiguration::new("navigator");
/// config.entries.push(
///     ConfigurationEntry::new("app", "Subcommands").as_subcommand_value(),
/// );
/// config.subcommands.push(Subcommand::new("run", "Run a playbook"));
///
/// assert_eq!(config.selector_entries().count(), 1);
/// assert!(config.find_subcommand("run").is_some());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApplicationConfiguration {
    /// Program name shown in usage lines.
    pub application_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default)]
    pub entries: Vec<ConfigurationEntry>,
    #[serde(default)]
    pub subcommands: Vec<Subcommand>,
}

impl ApplicationConfiguration {
    pub fn new(application_name: &str) -> Self {
        Self {
            application_name: application_name.to_string(),
            ..Default::default()
        }
    }

    /// Adds a description shown at the top of the root help.
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Finds an entry by name.
    pub fn find_entry(&self, name: &str) -> Option<&ConfigurationEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    /// Finds a declared subcommand by name.
    pub fn find_subcommand(&self, name: &str) -> Option<&Subcommand> {
        self.subcommands.iter().find(|sub| sub.name == name)
    }

    /// Entries flagged as the subcommand selector.
    pub fn selector_entries(&self) -> impl Iterator<Item = &ConfigurationEntry> {
        self.entries.iter().filter(|entry| entry.subcommand_value)
    }

    /// Gets all subcommand names in declaration order.
    pub fn subcommand_names(&self) -> Vec<&str> {
        self.subcommands.iter().map(|sub| sub.name.as_str()).collect()
    }
}
