use argspec_core::*;

fn app_with(entries: Vec<ConfigurationEntry>, subcommands: &[&str]) -> ApplicationConfiguration {
    let mut config = ApplicationConfiguration::new("navigator");
    config
        .entries
        .push(ConfigurationEntry::new("app", "Subcommands").as_subcommand_value());
    config.entries.extend(entries);
    for name in subcommands {
        config
            .subcommands
            .push(Subcommand::new(name, &format!("The {name} subcommand")));
    }
    config
}

fn names(arguments: &[RegisteredArgument]) -> Vec<&str> {
    arguments.iter().map(|arg| arg.name.as_str()).collect()
}

#[test]
fn verbose_flag_is_shared_by_run() {
    let config = app_with(
        vec![
            ConfigurationEntry::new("verbose", "Verbose output")
                .with_cli(CliParameters::flag().with_short("-v")),
        ],
        &["run"],
    );

    let schema = ParserBuilder::new(&config).build().unwrap();

    let base = schema.base_arguments();
    assert_eq!(names(base), vec!["verbose"]);
    assert_eq!(base[0].definition.short.as_deref(), Some("-v"));
    assert_eq!(base[0].definition.long.as_deref(), Some("--verbose"));
    assert_eq!(base[0].definition.options.binding.as_deref(), Some("verbose"));

    assert!(schema.subcommand_arguments("run").unwrap().is_empty());
    let run = schema.command().find_subcommand("run").unwrap();
    assert_eq!(run.get_arguments().count(), 0);

    let parsed = schema
        .try_parse_from(["navigator", "run", "--verbose", "yes"])
        .unwrap();
    assert_eq!(
        parsed.get("verbose"),
        Some(&ParsedValue::Single(Some("yes".to_string())))
    );
}

#[test]
fn two_selectors_produce_no_parser() {
    let config = app_with(
        vec![ConfigurationEntry::new("mode", "Mode").as_subcommand_value()],
        &["run"],
    );

    let result = ParserBuilder::new(&config).build();
    assert!(matches!(result, Err(BuildError::AmbiguousSelector(_))));
}

#[test]
fn positional_target_only_on_run() {
    let config = app_with(
        vec![
            ConfigurationEntry::new("target", "Target")
                .with_cli(CliParameters::positional())
                .for_subcommands(&["run"]),
        ],
        &["run", "doc"],
    );

    let schema = ParserBuilder::new(&config).build().unwrap();

    assert!(schema.base_arguments().is_empty());
    let run = schema.subcommand_arguments("run").unwrap();
    assert_eq!(names(run), vec!["target"]);
    assert!(run[0].definition.short.is_none());
    assert!(run[0].definition.long.is_none());
    assert_eq!(run[0].definition.options.nargs, Some(NArgs::Optional));
    assert!(schema.subcommand_arguments("doc").unwrap().is_empty());

    let parsed = schema.try_parse_from(["navigator", "run"]).unwrap();
    assert!(!parsed.contains("target"));
}

#[test]
fn every_all_entry_with_cli_is_registered_once() {
    let entries = vec![
        ConfigurationEntry::new("mode", "Mode").with_cli(CliParameters::flag().with_short("-m")),
        ConfigurationEntry::new("log_file", "Log file").with_default("./navigator.log"),
        ConfigurationEntry::new("log_level", "Log level")
            .with_default("warning")
            .with_cli(CliParameters::flag().with_long("--ll")),
        ConfigurationEntry::new("container_engine", "Engine")
            .with_cli(CliParameters::flag().with_long("--ce")),
    ];
    let config = app_with(entries, &["run", "doc", "exec"]);

    let schema = ParserBuilder::new(&config).build().unwrap();

    assert_eq!(
        names(schema.base_arguments()),
        vec!["mode", "log_level", "container_engine"]
    );
    for scope in schema.subcommand_scopes() {
        assert!(scope.arguments.is_empty(), "{} got copies", scope.name);
    }
}

#[test]
fn explicit_lists_land_on_exactly_the_named_subcommands() {
    let config = app_with(
        vec![
            ConfigurationEntry::new("plugin_name", "Plugin")
                .with_cli(CliParameters::positional())
                .for_subcommands(&["doc"]),
            ConfigurationEntry::new("playbook_artifact_enable", "Artifacts")
                .with_default(true)
                .with_cli(CliParameters::flag().with_long("--pae"))
                .for_subcommands(&["run", "exec"]),
        ],
        &["run", "doc", "exec", "images"],
    );

    let schema = ParserBuilder::new(&config).build().unwrap();

    assert_eq!(
        names(schema.subcommand_arguments("run").unwrap()),
        vec!["playbook_artifact_enable"]
    );
    assert_eq!(names(schema.subcommand_arguments("doc").unwrap()), vec!["plugin_name"]);
    assert_eq!(
        names(schema.subcommand_arguments("exec").unwrap()),
        vec!["playbook_artifact_enable"]
    );
    assert!(schema.subcommand_arguments("images").unwrap().is_empty());
}

#[test]
fn help_text_shows_real_defaults_only() {
    let config = app_with(
        vec![
            ConfigurationEntry::new("cmdline", "Extra parameters")
                .with_cli(CliParameters::flag()),
            ConfigurationEntry::new("pull_policy", "Image pull policy")
                .with_default("tag")
                .with_cli(CliParameters::flag().with_long("--pp")),
            ConfigurationEntry::new("set_environment_variable", "Environment")
                .with_default(ConfigValue::List(vec!["A=1".into(), "B=2".into()]))
                .with_cli(CliParameters::flag().with_long("--senv")),
        ],
        &["run"],
    );

    let schema = ParserBuilder::new(&config).build().unwrap();
    let helps: Vec<&str> = schema
        .base_arguments()
        .iter()
        .map(|arg| arg.definition.options.help.as_str())
        .collect();

    assert_eq!(
        helps,
        vec![
            "Extra parameters",
            "Image pull policy (default: tag)",
            "Environment (default: [A=1, B=2])",
        ]
    );
}

#[test]
fn long_only_flag_is_not_positional() {
    let config = app_with(
        vec![
            ConfigurationEntry::new("execution_environment", "Enable the execution environment")
                .with_cli(CliParameters::flag().with_long("--ee"))
                .for_subcommands(&["run"]),
        ],
        &["run"],
    );

    let schema = ParserBuilder::new(&config).build().unwrap();
    let run = schema.command().find_subcommand("run").unwrap();
    let arg = run.get_arguments().next().unwrap();

    assert!(!arg.is_positional());
    assert_eq!(arg.get_long(), Some("ee"));
    assert_eq!(arg.get_short(), None);
}

#[test]
fn configuration_is_not_mutated_by_build() {
    let config = app_with(
        vec![
            ConfigurationEntry::new("mode", "Mode").with_cli(CliParameters::flag().with_short("-m")),
        ],
        &["run"],
    );
    let before = config.clone();

    let _ = ParserBuilder::new(&config).build().unwrap();
    let _ = ParserBuilder::new(&config).build().unwrap();

    assert_eq!(config, before);
}
