use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use csx::output;
use csx::query::{Operation, QuerySession};
use csx::utils::{self, AppConfig, logging};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "csx")]
#[command(about = "Terminal-first cscope query browser")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Symbol directory containing the cscope database (supports ~)
    #[arg(short, long, global = true)]
    dir: Option<String>,

    /// Put the result pane beside the editor view instead of below it
    #[arg(long)]
    vertical: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one query and print the matches
    Find {
        /// Symbol, text or pattern to look up
        symbol: String,

        /// Kind of query
        #[arg(short, long, value_enum, default_value = "symbol")]
        op: Operation,

        /// Print cscope's output unparsed
        #[arg(long, conflicts_with = "json")]
        raw: bool,

        /// Print records as JSON
        #[arg(long)]
        json: bool,

        /// When to use colors
        #[arg(long, value_enum, default_value = "auto")]
        color: ColorWhen,
    },
    /// Check that a directory holds a usable cscope database
    Check {
        /// Directory to check (supports ~)
        path: String,
    },
    /// Show the effective configuration
    Config,
}

#[derive(Clone, Copy, ValueEnum)]
enum ColorWhen {
    Auto,
    Never,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let mut config = AppConfig::load()?;

    if let Some(dir) = cli.dir {
        config.index_directory = Some(dir);
    }
    if cli.vertical {
        config.split_horizontal = false;
    }

    match cli.command {
        Some(Commands::Find {
            symbol,
            op,
            raw,
            json,
            color,
        }) => {
            logging::init_stderr();
            let format = if raw {
                Format::Raw
            } else if json {
                Format::Json
            } else {
                Format::Records {
                    color: matches!(color, ColorWhen::Auto),
                }
            };
            find(&config, op, &symbol, format)
        }
        Some(Commands::Check { path }) => {
            logging::init_stderr();
            match utils::validate_index_directory(&path, &config.database_file) {
                Ok(dir) => {
                    println!("{}", dir.display());
                    Ok(ExitCode::SUCCESS)
                }
                Err(e) => {
                    eprintln!("{}", e);
                    Ok(ExitCode::FAILURE)
                }
            }
        }
        Some(Commands::Config) => {
            println!("# {}", utils::get_config_path()?.display());
            println!("{}", serde_json::to_string_pretty(&config)?);
            Ok(ExitCode::SUCCESS)
        }
        None => interactive(&config),
    }
}

enum Format {
    Records { color: bool },
    Json,
    Raw,
}

fn find(config: &AppConfig, op: Operation, symbol: &str, format: Format) -> Result<ExitCode> {
    let dir = config
        .index_directory
        .as_deref()
        .context("No symbol directory: pass --dir or set index_directory in the config")?;

    let mut session = QuerySession::new(config.tool.clone(), config.database_file.clone());
    if let Err(e) = session.set_index_directory(dir) {
        eprintln!("{}", e);
        return Ok(ExitCode::FAILURE);
    }

    match session.execute_query(op, symbol) {
        Ok(results) => {
            match format {
                Format::Records { color } => output::print_records(results.records(), color)?,
                Format::Json => output::print_json(results.records())?,
                Format::Raw => output::print_raw(results.raw())?,
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(_) => {
            eprintln!("cscope query failed");
            Ok(ExitCode::FAILURE)
        }
    }
}

#[cfg(feature = "interactive")]
fn interactive(config: &AppConfig) -> Result<ExitCode> {
    logging::init_file(&utils::get_log_path()?)?;
    csx::tui::run(config)?;
    Ok(ExitCode::SUCCESS)
}

#[cfg(not(feature = "interactive"))]
fn interactive(_config: &AppConfig) -> Result<ExitCode> {
    anyhow::bail!("csx was built without the `interactive` feature; use `csx find`")
}
