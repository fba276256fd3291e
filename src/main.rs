//! @ai:module:intent CLI entry point for parsing captured show-command output
//! @ai:module:layer presentation
//! @ai:module:public_api main
//! @ai:module:depends_on registry, batch, config, device, output

use clap::{Parser, Subcommand, ValueEnum};
use showparse::{
    batch, output, registry, Config, Error, ExtractOptions, OutputFormat, ReplayDevice, Result,
};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG: &str = "showparse.toml";

#[derive(Parser)]
#[command(name = "showparse")]
#[command(author, version, about = "Structured parsers for IOS-XR show-command output")]
struct Cli {
    /// Configuration file (defaults to ./showparse.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse the output of one command
    Parse {
        /// Command as typed on the device, e.g. `show evpn evi`
        #[arg(required = true)]
        command: Vec<String>,

        /// Read the output from a file, or `-` for stdin
        #[arg(long, short)]
        input: Option<PathBuf>,

        /// Replay the output from a capture directory
        #[arg(long)]
        replay_dir: Option<PathBuf>,

        /// Output format
        #[arg(long, short, value_enum)]
        format: Option<Format>,

        /// Abort on the first line a rule cannot assign
        #[arg(long)]
        strict: bool,
    },

    /// Parse every capture in a directory and report the result per file
    Batch {
        /// Directory of `.txt` captures
        dir: PathBuf,

        /// Output format
        #[arg(long, short, value_enum)]
        format: Option<Format>,

        /// Abort a capture on the first line a rule cannot assign
        #[arg(long)]
        strict: bool,
    },

    /// List the available parsers
    List {
        /// Output format
        #[arg(long, short, value_enum)]
        format: Option<Format>,
    },

    /// Show the declared shape of a command's result
    Schema {
        /// Parser name or full command line
        #[arg(required = true)]
        command: Vec<String>,

        /// Output format
        #[arg(long, short, value_enum)]
        format: Option<Format>,
    },

    /// Write a default configuration file
    Init {
        /// Where to write the file
        #[arg(long, short, default_value = DEFAULT_CONFIG)]
        output: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
    JsonPretty,
}

impl From<Format> for OutputFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Text => OutputFormat::Text,
            Format::Json => OutputFormat::Json,
            Format::JsonPretty => OutputFormat::JsonPretty,
        }
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path),
        None if Path::new(DEFAULT_CONFIG).is_file() => Config::load(Path::new(DEFAULT_CONFIG)),
        None => Ok(Config::default()),
    }
}

fn extract_options(config: &Config, strict: bool) -> ExtractOptions {
    if strict {
        ExtractOptions::strict()
    } else {
        config.extract
    }
}

fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        return Ok(text);
    }
    std::fs::read_to_string(path).map_err(|source| Error::FileRead {
        path: path.to_path_buf(),
        source,
    })
}

/// Exit code 1 when the output was not recognized, 2 for usage and I/O errors.
fn report(e: &Error) -> ExitCode {
    eprintln!("Error: {}", e);
    if e.is_recognition_failure() {
        ExitCode::from(1)
    } else {
        ExitCode::from(2)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => return report(&e),
    };
    if cli.no_color || !config.output.color {
        colored::control::set_override(false);
    }
    let format_or_default = |format: Option<Format>| format.map_or(config.output.format, OutputFormat::from);

    match cli.command {
        Commands::Parse {
            command,
            input,
            replay_dir,
            format,
            strict,
        } => {
            let options = extract_options(&config, strict);
            let result = registry::resolve(&command.join(" ")).and_then(|(parser, params)| {
                match (input, replay_dir.or_else(|| config.replay.dir.clone())) {
                    (Some(input), _) => parser.parse_output(&read_input(&input)?, &params, &options),
                    (None, Some(dir)) => parser.parse(&ReplayDevice::new(dir), &params, &options),
                    (None, None) => Err(Error::NoInput),
                }
            });

            match result {
                Ok(tree) => {
                    println!("{}", output::format_tree(&tree, format_or_default(format)));
                    ExitCode::SUCCESS
                }
                Err(e) => report(&e),
            }
        }

        Commands::Batch { dir, format, strict } => {
            let options = extract_options(&config, strict);
            match batch::check_directory(&dir, &options) {
                Ok(result) => {
                    println!("{}", output::format_batch_result(&result, format_or_default(format)));

                    if result.passed() {
                        ExitCode::SUCCESS
                    } else {
                        ExitCode::from(1)
                    }
                }
                Err(e) => report(&e),
            }
        }

        Commands::List { format } => {
            println!(
                "{}",
                output::format_catalog(registry::parsers(), format_or_default(format))
            );
            ExitCode::SUCCESS
        }

        Commands::Schema { command, format } => {
            let line = command.join(" ");
            let parser = match registry::find(&line) {
                Some(parser) => Ok(parser),
                None => registry::resolve(&line).map(|(parser, _)| parser),
            };
            match parser {
                Ok(parser) => {
                    println!("{}", output::format_shape(parser, format_or_default(format)));
                    ExitCode::SUCCESS
                }
                Err(e) => report(&e),
            }
        }

        Commands::Init { output, force } => {
            if output.exists() && !force {
                eprintln!("Error: {} exists, pass --force to overwrite", output.display());
                return ExitCode::from(2);
            }
            match Config::default().save(&output) {
                Ok(()) => {
                    println!("Wrote {}", output.display());
                    ExitCode::SUCCESS
                }
                Err(e) => report(&e),
            }
        }
    }
}
