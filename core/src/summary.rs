//! Serializable description of an assembled parser, and its output formats.

use serde::Serialize;

use crate::{ArgumentAction, ParserSchema, RegisteredArgument};

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Yaml,
    Markdown,
}

/// One registered argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArgumentSummary {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long: Option<String>,
    pub positional: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nargs: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<ArgumentAction>,
    pub help: String,
}

impl From<&RegisteredArgument> for ArgumentSummary {
    fn from(argument: &RegisteredArgument) -> Self {
        let def = &argument.definition;
        Self {
            name: argument.name.clone(),
            short: def.short.clone(),
            long: def.long.clone(),
            positional: def.is_positional_form(),
            nargs: def.options.nargs.map(|nargs| nargs.to_string()),
            action: def.options.action,
            help: def.options.help.clone(),
        }
    }
}

/// One subcommand and the arguments registered on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubcommandSummary {
    pub name: String,
    pub description: String,
    pub args: Vec<ArgumentSummary>,
}

/// The whole parser, as a plain data structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaSummary {
    pub application: String,
    /// Binding that receives the chosen subcommand.
    pub selector: String,
    pub global_args: Vec<ArgumentSummary>,
    pub subcommands: Vec<SubcommandSummary>,
}

impl ParserSchema {
    /// Describes the parser as a [`SchemaSummary`].
    pub fn summary(&self) -> SchemaSummary {
        SchemaSummary {
            application: self.command.get_name().to_string(),
            selector: self.selector.clone(),
            global_args: self.base.iter().map(ArgumentSummary::from).collect(),
            subcommands: self
                .subcommands
                .iter()
                .map(|scope| SubcommandSummary {
                    name: scope.name.clone(),
                    description: scope.description.clone(),
                    args: scope.arguments.iter().map(ArgumentSummary::from).collect(),
                })
                .collect(),
        }
    }
}

/// Formats a summary in the requested output format.
pub fn format_summary(summary: &SchemaSummary, format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(summary)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        OutputFormat::Yaml => {
            serde_yaml::to_string(summary).map_err(|e| format!("YAML serialization failed: {e}"))
        }
        OutputFormat::Markdown => Ok(summary_to_markdown(summary)),
    }
}

fn summary_to_markdown(summary: &SchemaSummary) -> String {
    let mut out = String::new();

    out.push_str(&format!("# {}\n\n", summary.application));
    out.push_str(&format!("**Subcommand binding:** `{}`\n\n", summary.selector));

    if !summary.global_args.is_empty() {
        out.push_str("## Global arguments\n\n");
        push_argument_table(&mut out, &summary.global_args);
    }

    for sub in &summary.subcommands {
        out.push_str(&format!("## {}\n\n{}\n\n", sub.name, sub.description));
        if !sub.args.is_empty() {
            push_argument_table(&mut out, &sub.args);
        }
    }

    out
}

fn push_argument_table(out: &mut String, args: &[ArgumentSummary]) {
    out.push_str("| Argument | Name | Nargs | Description |\n");
    out.push_str("|----------|------|-------|-------------|\n");
    for arg in args {
        let spelling = if arg.positional {
            format!("<{}>", arg.name)
        } else {
            [arg.short.as_deref(), arg.long.as_deref()]
                .into_iter()
                .flatten()
                .collect::<Vec<_>>()
                .join(", ")
        };
        out.push_str(&format!(
            "| `{}` | {} | {} | {} |\n",
            spelling,
            arg.name,
            arg.nargs.as_deref().unwrap_or(""),
            arg.help
        ));
    }
    out.push('\n');
}
