//! Two-tier parser assembly.
//!
//! [`ParserBuilder`] compiles an [`ApplicationConfiguration`] into a
//! [`clap::Command`]:
//!
//! - entries applying to all subcommands are registered once on the root
//!   command as global arguments, so every subcommand inherits them without
//!   a copy. clap does not propagate positionals, so a shared positional is
//!   recorded once and attached to the root and to every child command;
//! - the single selector entry names the subcommand group and the binding
//!   that reports the chosen subcommand;
//! - each declared subcommand becomes a child command carrying only the
//!   entries that name it.
//!
//! # Example
//!
//! ```
//! use argspec_core::*;
//!
//! let mut config = ApplicationConfiguration::new("navigator");
//! config.entries.push(ConfigurationEntry::new("app", "Subcommands").as_subcommand_value());
//! config.entries.push(
//!     ConfigurationEntry::new("verbose", "Verbose output")
//!         .with_cli(CliParameters::flag().with_short("-v").with_action(ArgumentAction::StoreTrue)),
//! );
//! config.subcommands.push(Subcommand::new("run", "Run a playbook"));
//!
//! let schema = ParserBuilder::new(&config).build().unwrap();
//! let parsed = schema.try_parse_from(["navigator", "run", "-v"]).unwrap();
//!
//! assert_eq!(parsed.subcommand.as_deref(), Some("run"));
//! assert_eq!(parsed.get("verbose"), Some(&ParsedValue::Flag(true)));
//! ```

use clap::Command;
use tracing::{debug, warn};

use crate::error::{BuildError, Result};
use crate::parsed::{ParsedArguments, ParsedValue, collect_values};
use crate::{
    Applicability, ApplicationConfiguration, ArgumentDefinition, ConfigurationEntry, Subcommand,
    project, validate_configuration,
};

/// An argument registered on one scope of the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredArgument {
    /// Entry name; also the clap argument id and the parsed-value key.
    pub name: String,
    pub definition: ArgumentDefinition,
}

/// The arguments registered on one subcommand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubcommandScope {
    pub name: String,
    pub description: String,
    pub arguments: Vec<RegisteredArgument>,
}

/// A fully assembled parser.
///
/// Wraps the [`clap::Command`] together with a record of which entries were
/// registered where, so parsed values can be reported by entry name.
#[derive(Debug, Clone)]
pub struct ParserSchema {
    pub(crate) command: Command,
    pub(crate) selector: String,
    pub(crate) selector_title: String,
    pub(crate) base: Vec<RegisteredArgument>,
    pub(crate) subcommands: Vec<SubcommandScope>,
}

impl ParserSchema {
    /// The generated clap command.
    pub fn command(&self) -> &Command {
        &self.command
    }

    /// Consumes the schema, returning the clap command.
    pub fn into_command(self) -> Command {
        self.command
    }

    /// Binding name that holds the chosen subcommand after parsing.
    pub fn selector_binding(&self) -> &str {
        &self.selector
    }

    /// Heading of the subcommand group in help output.
    pub fn selector_title(&self) -> &str {
        &self.selector_title
    }

    /// Arguments shared by every subcommand.
    pub fn base_arguments(&self) -> &[RegisteredArgument] {
        &self.base
    }

    pub fn subcommand_scopes(&self) -> &[SubcommandScope] {
        &self.subcommands
    }

    /// Arguments registered on one subcommand, excluding the inherited base.
    pub fn subcommand_arguments(&self, name: &str) -> Option<&[RegisteredArgument]> {
        self.subcommands
            .iter()
            .find(|scope| scope.name == name)
            .map(|scope| scope.arguments.as_slice())
    }

    /// Parses `argv` (including the program name) with the generated parser.
    ///
    /// Only values typed on the command line are reported; the application
    /// layers defaults on top.
    ///
    /// # Errors
    ///
    /// Returns the [`clap::Error`] for malformed input, including the
    /// `--help` and `--version` displays.
    pub fn try_parse_from<I, T>(&self, argv: I) -> std::result::Result<ParsedArguments, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let matches = self.command.clone().try_get_matches_from(argv)?;
        let mut parsed = ParsedArguments::default();

        match matches.subcommand() {
            Some((name, sub_matches)) => {
                let shared_positionals: Vec<RegisteredArgument> = self
                    .base
                    .iter()
                    .filter(|arg| arg.definition.is_positional_form())
                    .cloned()
                    .collect();
                collect_values(&matches, &shared_positionals, &mut parsed.values);
                collect_values(sub_matches, &self.base, &mut parsed.values);
                if let Some(arguments) = self.subcommand_arguments(name) {
                    collect_values(sub_matches, arguments, &mut parsed.values);
                }
                parsed.values.insert(
                    self.selector.clone(),
                    ParsedValue::Single(Some(name.to_string())),
                );
                parsed.subcommand = Some(name.to_string());
            }
            None => collect_values(&matches, &self.base, &mut parsed.values),
        }

        Ok(parsed)
    }

    /// Renders the long help of the root command or of one subcommand.
    ///
    /// Returns `None` when `subcommand` is not declared.
    pub fn render_help(&self, subcommand: Option<&str>) -> Option<String> {
        let mut command = self.command.clone();
        command.build();
        match subcommand {
            None => Some(command.render_long_help().to_string()),
            Some(name) => command
                .find_subcommand_mut(name)
                .map(|sub| sub.render_long_help().to_string()),
        }
    }
}

/// Builds a [`ParserSchema`] from an [`ApplicationConfiguration`].
///
/// The configuration is only read. Building is a single pass: locate the
/// selector, check preconditions, register the base arguments, then one
/// child command per subcommand.
#[derive(Debug, Clone, Copy)]
pub struct ParserBuilder<'a> {
    config: &'a ApplicationConfiguration,
    subcommand_required: bool,
}

impl<'a> ParserBuilder<'a> {
    pub fn new(config: &'a ApplicationConfiguration) -> Self {
        Self {
            config,
            subcommand_required: false,
        }
    }

    /// Requires a subcommand on the command line (off by default).
    pub fn subcommand_required(mut self, required: bool) -> Self {
        self.subcommand_required = required;
        self
    }

    /// Assembles the parser.
    ///
    /// # Errors
    ///
    /// - [`BuildError::MissingSelector`] when no entry has `subcommand_value`.
    /// - [`BuildError::AmbiguousSelector`] when more than one does.
    /// - [`BuildError::Invalid`] when an entry fails
    ///   [`validate_configuration`].
    pub fn build(&self) -> Result<ParserSchema> {
        let selector = self.locate_selector()?;
        if let Some(error) = validate_configuration(self.config).into_iter().next() {
            return Err(BuildError::Invalid(error));
        }
        self.warn_dangling_subcommands();

        let (root, base) = self.build_base();
        let root = root
            .subcommand_help_heading(selector.short_description.clone())
            .subcommand_value_name(selector.name.to_uppercase())
            .subcommand_required(self.subcommand_required);
        let (root, subcommands) = self.build_subcommands(root, &base);

        debug!(
            application = %self.config.application_name,
            base = base.len(),
            subcommands = subcommands.len(),
            "assembled parser"
        );

        Ok(ParserSchema {
            command: root,
            selector: selector.name.clone(),
            selector_title: selector.short_description.clone(),
            base,
            subcommands,
        })
    }

    /// Finds the single entry that records the chosen subcommand.
    fn locate_selector(&self) -> Result<&'a ConfigurationEntry> {
        let selectors: Vec<&'a ConfigurationEntry> = self.config.selector_entries().collect();
        match selectors.as_slice() {
            [] => Err(BuildError::MissingSelector),
            [entry] => Ok(*entry),
            many => Err(BuildError::AmbiguousSelector(
                many.iter().map(|entry| entry.name.clone()).collect(),
            )),
        }
    }

    fn build_base(&self) -> (Command, Vec<RegisteredArgument>) {
        let config = self.config;
        let mut root = Command::new(config.application_name.clone())
            .args_override_self(true)
            .disable_help_subcommand(true);
        if let Some(description) = &config.description {
            root = root.about(description.clone());
        }
        if let Some(version) = &config.version {
            root = root.version(version.clone());
        }

        let mut registered = Vec::new();
        for entry in &config.entries {
            if entry.subcommands == Applicability::All {
                root = register(root, entry, true, &mut registered);
            }
        }

        // A subcommand name may follow the shared positionals.
        if registered.iter().any(|arg| arg.definition.is_positional_form()) {
            root = root
                .subcommand_precedence_over_arg(true)
                .subcommand_negates_reqs(true);
        }
        (root, registered)
    }

    fn build_subcommands(
        &self,
        mut root: Command,
        base: &[RegisteredArgument],
    ) -> (Command, Vec<SubcommandScope>) {
        let mut scopes = Vec::with_capacity(self.config.subcommands.len());

        for subcommand in &self.config.subcommands {
            let (child, scope) = self.build_subcommand(subcommand, base);
            root = root.subcommand(child);
            scopes.push(scope);
        }

        (root, scopes)
    }

    fn build_subcommand(
        &self,
        subcommand: &Subcommand,
        base: &[RegisteredArgument],
    ) -> (Command, SubcommandScope) {
        let mut child = Command::new(subcommand.name.clone())
            .about(subcommand.description.clone())
            .long_about(format!("{}: {}", subcommand.name, subcommand.description))
            .args_override_self(true);

        for shared in base.iter().filter(|arg| arg.definition.is_positional_form()) {
            child = child.arg(shared.definition.to_arg(&shared.name));
        }

        let mut registered = Vec::new();
        for entry in &self.config.entries {
            if entry.subcommands.includes(&subcommand.name) {
                child = register(child, entry, false, &mut registered);
            }
        }

        debug!(
            subcommand = %subcommand.name,
            arguments = registered.len(),
            "assembled subcommand"
        );

        let scope = SubcommandScope {
            name: subcommand.name.clone(),
            description: subcommand.description.clone(),
            arguments: registered,
        };
        (child, scope)
    }

    fn warn_dangling_subcommands(&self) {
        for entry in &self.config.entries {
            let Applicability::Only(names) = &entry.subcommands else {
                continue;
            };
            for name in names {
                if self.config.find_subcommand(name).is_none() {
                    warn!(
                        entry = %entry.name,
                        subcommand = %name,
                        "entry names an undeclared subcommand"
                    );
                }
            }
        }
    }
}

/// Projects `entry` and registers it on `command`.
///
/// The positional path is taken only when the projection has neither a short
/// nor a long spelling; otherwise the argument is a flag using whichever
/// spellings are present. Positionals are never global. Config-only entries
/// are skipped.
fn register(
    command: Command,
    entry: &ConfigurationEntry,
    global: bool,
    registered: &mut Vec<RegisteredArgument>,
) -> Command {
    let Some(definition) = project(entry) else {
        return command;
    };

    let positional = definition.is_positional_form();
    let arg = definition
        .to_arg(&entry.name)
        .global(global && !positional);

    debug!(
        entry = %entry.name,
        scope = %command.get_name(),
        positional,
        short = definition.short.as_deref().unwrap_or(""),
        long = definition.long.as_deref().unwrap_or(""),
        "registered argument"
    );

    registered.push(RegisteredArgument {
        name: entry.name.clone(),
        definition,
    });
    command.arg(arg)
}
