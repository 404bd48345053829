//! Values read back from a parse, keyed by entry name.

use std::collections::BTreeMap;

use clap::ArgMatches;
use clap::parser::ValueSource;
use serde::Serialize;

use crate::assemble::RegisteredArgument;
use crate::project::ValueKind;

/// One value taken from the command line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ParsedValue {
    /// `store_true` / `store_false` result.
    Flag(bool),
    /// Number of occurrences of a `count` argument.
    Count(u8),
    /// A single value; `None` when an optional value was omitted (`--opt`).
    Single(Option<String>),
    /// Every value of a multi-value or `append` argument.
    Many(Vec<String>),
}

/// Result of parsing `argv` with a [`ParserSchema`](crate::ParserSchema).
///
/// `values` holds only what the user typed; entries left out on the command
/// line are absent rather than carrying a default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedArguments {
    /// The chosen subcommand, if any.
    pub subcommand: Option<String>,
    pub values: BTreeMap<String, ParsedValue>,
}

impl ParsedArguments {
    pub fn get(&self, name: &str) -> Option<&ParsedValue> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }
}

pub(crate) fn collect_values(
    matches: &ArgMatches,
    arguments: &[RegisteredArgument],
    values: &mut BTreeMap<String, ParsedValue>,
) {
    for argument in arguments {
        let id = argument.name.as_str();
        if matches.value_source(id) != Some(ValueSource::CommandLine) {
            continue;
        }
        if let Some(value) = read_value(matches, id, argument.definition.value_kind()) {
            values.insert(argument.name.clone(), value);
        }
    }
}

fn read_value(matches: &ArgMatches, id: &str, kind: ValueKind) -> Option<ParsedValue> {
    match kind {
        ValueKind::Flag => matches
            .try_get_one::<bool>(id)
            .ok()
            .flatten()
            .map(|flag| ParsedValue::Flag(*flag)),
        ValueKind::Count => matches
            .try_get_one::<u8>(id)
            .ok()
            .flatten()
            .map(|count| ParsedValue::Count(*count)),
        ValueKind::Single => matches
            .try_get_one::<String>(id)
            .ok()
            .map(|value| ParsedValue::Single(value.cloned())),
        ValueKind::Many => matches.try_get_many::<String>(id).ok().map(|values| {
            ParsedValue::Many(values.map(|v| v.cloned().collect()).unwrap_or_default())
        }),
    }
}
