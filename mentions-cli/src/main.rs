//! Command-line interface for mentions
//! Inspects marked-up values and replays widget edits against them, mostly for
//! debugging stored values and scripting migrations.
//!
//! Usage:
//!   mentions plain `<value>`                                  - Print the plain text
//!   mentions mentions `<value>`                               - List the mentions
//!   mentions map `<value>` `<index>` [--boundary start|end|null] - Map a plain-text offset
//!   mentions apply `<value>` --plain `<text>` --end-after `<n>`  - Replay an edit
//!
//! Global options: --template, --config, --format json|yaml|text.
//! Logging goes to stderr and is controlled by `MENTIONS_LOG` (default `warn`).

mod commands;

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use commands::{execute, format_output, parse_boundary, Operation};
use mentions::mentions::SelectionChange;
use mentions_config::{Loader, MentionsConfig};
use tracing_subscriber::EnvFilter;

fn value_arg() -> Arg {
    Arg::new("value")
        .help("Marked-up value")
        .required(true)
        .index(1)
}

fn index_arg() -> Arg {
    Arg::new("index")
        .help("Offset in the plain text, in characters")
        .required(true)
        .index(2)
        .value_parser(value_parser!(usize))
}

fn offset_arg(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .help(help)
        .value_parser(value_parser!(usize))
}

fn cli() -> Command {
    Command::new("mentions")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for inspecting and editing mention markup")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("template")
                .long("template")
                .short('t')
                .global(true)
                .help("Markup template (e.g. '@[__display__](__id__)')"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .help("Path to a TOML configuration file"),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .global(true)
                .value_parser(["json", "yaml", "text"])
                .help("Output format (default from configuration)"),
        )
        .subcommand(
            Command::new("plain")
                .about("Print the plain text of a value")
                .arg(value_arg()),
        )
        .subcommand(
            Command::new("mentions")
                .about("List the mentions of a value")
                .arg(value_arg()),
        )
        .subcommand(
            Command::new("events")
                .about("Print the scanner event stream of a value")
                .arg(value_arg()),
        )
        .subcommand(
            Command::new("map")
                .about("Map a plain-text offset into the value")
                .arg(value_arg())
                .arg(index_arg())
                .arg(
                    Arg::new("boundary")
                        .long("boundary")
                        .short('b')
                        .default_value("start")
                        .help("Result for offsets inside a mention: start, end or null"),
                ),
        )
        .subcommand(
            Command::new("locate")
                .about("Find the mention under a plain-text offset")
                .arg(value_arg())
                .arg(index_arg()),
        )
        .subcommand(
            Command::new("apply")
                .about("Apply a plain-text edit to a value")
                .arg(value_arg())
                .arg(
                    Arg::new("plain")
                        .long("plain")
                        .required(true)
                        .help("Plain text after the edit"),
                )
                .arg(offset_arg("start-before", "Selection start before the edit"))
                .arg(offset_arg("end-before", "Selection end before the edit"))
                .arg(offset_arg("end-after", "Selection end after the edit").required(true)),
        )
        .subcommand(
            Command::new("markup")
                .about("Serialize a single mention")
                .arg(Arg::new("id").long("id").required(true))
                .arg(Arg::new("display").long("display").required(true))
                .arg(Arg::new("type").long("type")),
        )
        .subcommand(
            Command::new("escape")
                .about("HTML-escape a display string")
                .arg(Arg::new("text").required(true).index(1)),
        )
        .subcommand(
            Command::new("search")
                .about("Find a query inside a text, ignoring case")
                .arg(Arg::new("text").required(true).index(1))
                .arg(Arg::new("query").required(true).index(2))
                .arg(
                    Arg::new("ignore-accents")
                        .long("ignore-accents")
                        .action(ArgAction::SetTrue)
                        .help("Fold accents before comparing (default from configuration)"),
                ),
        )
}

fn main() {
    init_tracing();

    let matches = cli().get_matches();
    let config = load_config(&matches).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });
    let template = config.markup.compile().unwrap_or_else(|e| {
        eprintln!("Template error: {}", e);
        std::process::exit(1);
    });

    let operation = parse_operation(&matches, &config).unwrap_or_else(|e| {
        eprintln!("{}", e);
        std::process::exit(2);
    });

    let output = execute(&operation, &template)
        .and_then(|value| format_output(&value, config.output.format))
        .unwrap_or_else(|e| {
            eprintln!("Execution error: {}", e);
            std::process::exit(1);
        });

    println!("{}", output.trim_end());
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("MENTIONS_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Layer the configuration file and command-line overrides over the defaults
fn load_config(matches: &ArgMatches) -> Result<MentionsConfig, String> {
    let mut loader = match matches.get_one::<String>("config") {
        Some(path) => Loader::new().with_file(path),
        None => Loader::new().with_optional_file("mentions.toml"),
    };
    if let Some(template) = matches.get_one::<String>("template") {
        loader = loader.with_template(template).map_err(|e| e.to_string())?;
    }
    if let Some(format) = matches.get_one::<String>("format") {
        loader = loader.with_output_format(format).map_err(|e| e.to_string())?;
    }
    loader.build().map_err(|e| e.to_string())
}

fn parse_operation(matches: &ArgMatches, config: &MentionsConfig) -> Result<Operation, String> {
    let Some((name, args)) = matches.subcommand() else {
        return Err("A subcommand is required".to_string());
    };

    let string = |key: &str| args.get_one::<String>(key).cloned().unwrap_or_default();
    let offset = |key: &str| args.get_one::<usize>(key).copied();

    let operation = match name {
        "plain" => Operation::Plain {
            value: string("value"),
        },
        "mentions" => Operation::Mentions {
            value: string("value"),
        },
        "events" => Operation::Events {
            value: string("value"),
        },
        "map" => Operation::Map {
            value: string("value"),
            index: offset("index").unwrap_or_default(),
            boundary: parse_boundary(&string("boundary"))?,
        },
        "locate" => Operation::Locate {
            value: string("value"),
            index: offset("index").unwrap_or_default(),
        },
        "apply" => Operation::Apply {
            value: string("value"),
            plain: string("plain"),
            selection: SelectionChange {
                start_before: offset("start-before"),
                end_before: offset("end-before"),
                end_after: offset("end-after").unwrap_or_default(),
            },
        },
        "markup" => Operation::Markup {
            id: string("id"),
            display: string("display"),
            mention_type: args.get_one::<String>("type").cloned(),
        },
        "escape" => Operation::Escape {
            text: string("text"),
        },
        "search" => Operation::Search {
            text: string("text"),
            query: string("query"),
            ignore_accents: args.get_flag("ignore-accents") || config.suggestions.ignore_accents,
        },
        other => return Err(format!("Unknown command '{}'", other)),
    };

    Ok(operation)
}
