// Command-line interface for dbnb
//
// This binary converts, normalizes and inspects Databricks paired-source notebooks.
//
// The conversion machinery lives in dbnb-babel; this crate only wires files, flags and config to it.
//
// Converting:
//
// The conversion needs a to and from pair. The from can be auto-detected from the file extension, while being overwrittable by an explicit --from flag.
// Usage:
//  dbnb <input> --to <format> [--from <format>] [--output <file>]  - Convert between formats (default)
//  dbnb convert <input> --to <format> [--from <format>] [--output <file>]  - Same as above (explicit)
//  dbnb format <input>                    - Normalize a paired-source notebook
//  dbnb upgrade <input> [--output <file>] - Rewrite a headerless (v1) notebook as v2
//  dbnb inspect <path> [<transform>]      - Execute a transform (defaults to "cells-summary")
//  dbnb --list-transforms                 - List available transforms
//
// Extra Parameters:
//
// Parameters can be passed using --extra-<parameter-name> <value>.
// Known keys override the configuration (version, guest-language, pretty, show-linum); the rest are
// passed on to the format/transform.
// Example:
//  dbnb inspect notebook.scala line-kinds --extra-show-linum false

use dbnb_cli::transforms;

use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use dbnb_babel::error::decode_utf8;
use dbnb_babel::format::parse_bool;
use dbnb_babel::{FormatRegistry, SourceFormat, SourceVersion};
use dbnb_config::{DbnbConfig, Loader};
use std::collections::HashMap;
use std::fs;
use tracing::debug;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

const SUBCOMMANDS: &[&str] = &["convert", "format", "upgrade", "inspect", "help"];

/// Parse extra-* arguments from command line args
///
/// Supports both:
/// - `--extra-<key> <value>` (explicit value)
/// - `--extra-<key>` (boolean flag, defaults to "true")
/// - `--extras-<key>` (alias for `--extra-<key>`)
fn parse_extra_args(args: &[String]) -> (Vec<String>, HashMap<String, String>) {
    let mut cleaned_args = Vec::new();
    let mut extra_params = HashMap::new();
    let mut i = 0;

    while i < args.len() {
        let arg = &args[i];

        let key_opt = arg
            .strip_prefix("--extra-")
            .or_else(|| arg.strip_prefix("--extras-"));

        if let Some(key) = key_opt {
            let has_value = args
                .get(i + 1)
                .map(|next| !next.starts_with('-'))
                .unwrap_or(false);

            if has_value {
                extra_params.insert(key.to_string(), args[i + 1].clone());
                i += 2;
            } else {
                extra_params.insert(key.to_string(), "true".to_string());
                i += 1;
            }
            continue;
        }

        cleaned_args.push(arg.clone());
        i += 1;
    }

    (cleaned_args, extra_params)
}

fn build_cli() -> Command {
    Command::new("dbnb")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for converting and inspecting Databricks paired-source notebooks")
        .long_about(
            "dbnb works with the flat text files Databricks uses for source-controlled notebooks.\n\n\
            Commands:\n  \
            - convert: Transform between notebook formats (databricks, databricks-v1, json)\n  \
            - format:  Normalize a paired-source notebook\n  \
            - upgrade: Rewrite a headerless notebook with the current encoding\n  \
            - inspect: View how a notebook is split into lines and cells\n\n\
            Extra Parameters:\n  \
            Use --extra-<name> [value] to pass options.\n  \
            Boolean flags can omit the value (defaults to 'true').\n\n\
            Examples:\n  \
            dbnb inspect notebook.scala                      # One row per cell\n  \
            dbnb notebook.scala --to json                    # Convert to JSON (stdout)\n  \
            dbnb cells.json --to databricks -o out.scala     # Back to paired source\n  \
            dbnb format notebook.scala --extra-guest-language python",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("list-transforms")
                .long("list-transforms")
                .help("List available transforms")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a dbnb.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .subcommand(
            Command::new("inspect")
                .about("Inspect how a notebook is split into lines and cells")
                .long_about(
                    "View a notebook at different processing stages.\n\n\
                    Transforms (stage-format):\n  \
                    - cells-summary: One row per cell (default)\n  \
                    - cells-json:    Parsed cells as JSON\n  \
                    - line-kinds:    Classification of every line\n  \
                    - line-json:     Line classification as JSON\n\n\
                    Extra Parameters:\n  \
                    --extra-show-linum false   Hide line numbers in line-kinds\n  \
                    --extra-pretty false       Single-line JSON\n\n\
                    Examples:\n  \
                    dbnb inspect notebook.scala\n  \
                    dbnb inspect notebook.scala line-kinds --extra-version v1",
                )
                .arg(
                    Arg::new("path")
                        .help("Path to the notebook")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("transform")
                        .help("Transform to apply (stage-format). Defaults to 'cells-summary'")
                        .required(false)
                        .value_parser(clap::builder::PossibleValuesParser::new(
                            transforms::AVAILABLE_TRANSFORMS,
                        ))
                        .index(2)
                        .value_hint(ValueHint::Other),
                ),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert between notebook formats (default command)")
                .long_about(
                    "Convert notebooks between formats.\n\n\
                    Supported formats:\n  \
                    - databricks:    Paired source with header (.scala)\n  \
                    - databricks-v1: Headerless paired source\n  \
                    - json:          Structured cell list (.json)\n\n\
                    The source format is auto-detected from the file extension.\n\
                    Output goes to stdout by default, or use -o to specify a file.",
                )
                .arg(
                    Arg::new("input")
                        .help("Input file path")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("from")
                        .long("from")
                        .help("Source format (auto-detected from file extension if not specified)")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Target format (required)")
                        .required(true)
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("format")
                .about("Normalize a paired-source notebook")
                .long_about(
                    "Parse the notebook and write it back with the configured encoding.\n\n\
                    Whitespace around code is trimmed and empty cells are dropped.\n\
                    Output is always written to stdout.",
                )
                .arg(
                    Arg::new("input")
                        .help("Input file path")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("upgrade")
                .about("Rewrite a headerless (v1) notebook in the v2 encoding")
                .arg(
                    Arg::new("input")
                        .help("Input file path")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                ),
        )
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();

    // Parse extra-* arguments before clap processing
    let (cleaned_args, mut extra_params) = parse_extra_args(&args);

    // If no subcommand is provided, inject "convert"
    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&cleaned_args) {
        Ok(m) => m,
        Err(e) => {
            if should_inject_convert(&cleaned_args) {
                let mut new_args = vec![cleaned_args[0].clone(), "convert".to_string()];
                new_args.extend_from_slice(&cleaned_args[1..]);

                match cli.try_get_matches_from(&new_args) {
                    Ok(m) => m,
                    Err(e2) => e2.exit(),
                }
            } else {
                e.exit();
            }
        }
    };

    let mut config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));
    apply_config_overrides(&mut config, &mut extra_params);
    debug!(
        version = %config.source.version,
        guest_language = %config.source.guest_language,
        "configuration loaded"
    );

    if matches.get_flag("list-transforms") {
        handle_list_transforms_command(&config);
        return;
    }

    match matches.subcommand() {
        Some(("inspect", sub_matches)) => {
            let path = required_arg(sub_matches, "path");
            let transform = sub_matches
                .get_one::<String>("transform")
                .map(|s| s.as_str())
                .unwrap_or(transforms::DEFAULT_TRANSFORM);
            handle_inspect_command(path, transform, &extra_params, &config);
        }
        Some(("convert", sub_matches)) => {
            let input = required_arg(sub_matches, "input");
            let to = required_arg(sub_matches, "to");
            let registry = FormatRegistry::with_options(&config.registry_options());

            // Auto-detect --from if not provided
            let from = match sub_matches.get_one::<String>("from") {
                Some(f) => f.to_string(),
                None => match registry.detect_format_from_filename(input) {
                    Some(detected) => detected,
                    None => {
                        eprintln!("Error: Could not detect format from filename '{input}'");
                        eprintln!("Please specify --from explicitly");
                        std::process::exit(1);
                    }
                },
            };

            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            handle_convert_command(&registry, input, &from, to, output, &extra_params);
        }
        Some(("format", sub_matches)) => {
            let input = required_arg(sub_matches, "input");
            let registry = FormatRegistry::with_options(&config.registry_options());
            let name = SourceFormat::name_for(config.source.version);
            // Format command always outputs to stdout (no -o flag)
            handle_convert_command(&registry, input, name, name, None, &extra_params);
        }
        Some(("upgrade", sub_matches)) => {
            let input = required_arg(sub_matches, "input");
            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            let registry = FormatRegistry::with_options(&config.registry_options());
            handle_convert_command(
                &registry,
                input,
                SourceFormat::name_for(SourceVersion::V1),
                SourceFormat::name_for(SourceVersion::V2),
                output,
                &extra_params,
            );
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

/// Whether a failed parse looks like `dbnb <file> ...` with the subcommand left out.
fn should_inject_convert(args: &[String]) -> bool {
    args.get(1)
        .map(|first| !first.starts_with('-') && !SUBCOMMANDS.contains(&first.as_str()))
        .unwrap_or(false)
}

fn required_arg<'a>(matches: &'a ArgMatches, name: &str) -> &'a str {
    match matches.get_one::<String>(name) {
        Some(value) => value.as_str(),
        None => {
            eprintln!("Error: missing required argument '{name}'");
            std::process::exit(1);
        }
    }
}

/// Handle the inspect command
fn handle_inspect_command(
    path: &str,
    transform: &str,
    extra_params: &HashMap<String, String>,
    config: &DbnbConfig,
) {
    let bytes = fs::read(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{path}': {e}");
        std::process::exit(1);
    });
    let source = decode_utf8(&bytes).unwrap_or_else(|e| {
        eprintln!("Parse error: {e}");
        std::process::exit(1);
    });

    let params = build_inspect_params(config, extra_params);

    let output = transforms::execute_transform(source, transform, &config.dialect(), &params)
        .unwrap_or_else(|e| {
            eprintln!("Execution error: {e}");
            std::process::exit(1);
        });

    print!("{output}");
}

/// Handle the convert command
fn handle_convert_command(
    registry: &FormatRegistry,
    input: &str,
    from: &str,
    to: &str,
    output: Option<&str>,
    extra_params: &HashMap<String, String>,
) {
    // Validate formats exist
    if let Err(e) = registry.get(from) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
    if let Err(e) = registry.get(to) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    let bytes = fs::read(input).unwrap_or_else(|e| {
        eprintln!("Error reading file '{input}': {e}");
        std::process::exit(1);
    });

    let notebook = registry.parse_bytes(&bytes, from).unwrap_or_else(|e| {
        eprintln!("Parse error: {e}");
        std::process::exit(1);
    });
    debug!(from, to, cells = notebook.len(), "parsed input");

    // Serialize (format-specific parameters allowed via --extra-*)
    let text = registry
        .serialize_with_options(&notebook, to, extra_params)
        .unwrap_or_else(|e| {
            eprintln!("Serialization error: {e}");
            std::process::exit(1);
        });

    match output {
        Some(path) => {
            fs::write(path, text).unwrap_or_else(|e| {
                eprintln!("Error writing file '{path}': {e}");
                std::process::exit(1);
            });
        }
        None => print!("{text}"),
    }
}

/// Handle the list-transforms command
fn handle_list_transforms_command(config: &DbnbConfig) {
    println!("Available transforms:\n");
    println!("Stages:");
    println!("  line   - Line classification (header, separator, magic, plain)");
    println!("  cells  - Parsed notebook cells\n");

    println!("Formats:");
    println!("  kinds    - Plain text line labels (line only)");
    println!("  summary  - One row per cell (cells only)");
    println!("  json     - JSON output (all stages)\n");

    println!("Available transform combinations:");
    for transform_name in transforms::AVAILABLE_TRANSFORMS {
        println!("  {transform_name}");
    }

    println!("\nConversion formats:");
    let registry = FormatRegistry::with_options(&config.registry_options());
    for format_name in registry.list_formats() {
        let description = registry
            .get(&format_name)
            .map(|format| format.description())
            .unwrap_or_default();
        println!("  {format_name:<14} {description}");
    }
}

fn load_cli_config(explicit_path: Option<&str>) -> DbnbConfig {
    let loader = Loader::new().with_optional_file("dbnb.toml");
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    loader.build().unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}

fn apply_config_overrides(config: &mut DbnbConfig, extra_params: &mut HashMap<String, String>) {
    if let Some(raw) = take_override(extra_params, &["version", "source-version"]) {
        config.source.version = raw.parse::<SourceVersion>().unwrap_or_else(|e| {
            eprintln!("{e}");
            std::process::exit(1);
        });
    }
    if let Some(raw) = take_override(extra_params, &["guest-language", "language"]) {
        config.source.guest_language = raw;
    }
    if let Some(raw) = extra_params.remove("pretty") {
        config.convert.json.pretty = parse_bool_arg("pretty", &raw);
    }
    if let Some(raw) = extra_params.remove("show-linum") {
        config.inspect.show_line_numbers = parse_bool_arg("show-linum", &raw);
    }
}

fn build_inspect_params(
    config: &DbnbConfig,
    overrides: &HashMap<String, String>,
) -> HashMap<String, String> {
    let mut params = HashMap::new();

    params.insert(
        "show-linum".to_string(),
        config.inspect.show_line_numbers.to_string(),
    );
    params.insert("pretty".to_string(), config.convert.json.pretty.to_string());

    for (key, value) in overrides {
        params.insert(key.clone(), value.clone());
    }

    params
}

fn take_override(map: &mut HashMap<String, String>, keys: &[&str]) -> Option<String> {
    for key in keys {
        if let Some(value) = map.remove(*key) {
            return Some(value);
        }
    }
    None
}

fn parse_bool_arg(flag: &str, raw: &str) -> bool {
    parse_bool(raw).unwrap_or_else(|| {
        eprintln!("Invalid boolean value '{raw}' for --extra-{flag}");
        std::process::exit(1);
    })
}
