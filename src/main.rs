use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use creativefuse::{Backend, ClientConfig, HttpBackend, IdeaForm, Style};
use tracing_subscriber::EnvFilter;

/// Command-line arguments for the creativefuse binary.
#[derive(Debug, Parser)]
#[command(name = "creativefuse", version, about = "Boost or generate ideas with the CreativeFuse backend")]
struct Cli {
    /// Backend origin
    #[arg(long, env = "CREATIVEFUSE_API_URL", default_value = creativefuse::DEFAULT_BASE_URL)]
    api_url: String,

    /// Per-request timeout in milliseconds (0 disables it)
    #[arg(long, env = "CREATIVEFUSE_TIMEOUT_MS", default_value_t = creativefuse::DEFAULT_TIMEOUT_MS)]
    timeout_ms: u64,

    /// How to print the returned text
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Enhance an idea into an actionable plan
    Boost {
        idea: String,
    },
    /// Generate a fresh idea for a domain
    Generate {
        #[arg(long)]
        domain: String,
        #[arg(long, default_value = "")]
        keywords: String,
        #[arg(long, default_value = "creative")]
        style: Style,
    },
    /// Render a local file (or stdin) without contacting the backend
    Render {
        file: Option<PathBuf>,
    },
    /// Check that the backend is reachable
    Ping,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Plain terminal text
    Text,
    /// Escaped HTML
    Html,
    /// The text exactly as the backend returned it
    Raw,
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .try_init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = ClientConfig {
        base_url: cli.api_url,
        timeout_ms: cli.timeout_ms,
        ..Default::default()
    };

    let text = match cli.command {
        Command::Render { file } => read_input(file)?,
        Command::Ping => {
            let backend = HttpBackend::new(config)?;
            println!("{}", backend.ping()?);
            return Ok(());
        }
        Command::Boost { idea } => {
            let mut form = IdeaForm::new(HttpBackend::new(config)?);
            form.set_idea(idea);
            form.submit_boost()?
        }
        Command::Generate {
            domain,
            keywords,
            style,
        } => {
            let mut form = IdeaForm::new(HttpBackend::new(config)?);
            form.set_domain(domain);
            form.set_keywords(keywords);
            form.set_style(style);
            form.submit_generate()?
        }
    };

    match cli.format {
        Format::Text => println!("{}", creativefuse::parse(text.as_str()).to_plain_text()),
        Format::Html => println!("{}", creativefuse::render(text.as_str())),
        Format::Raw => println!("{}", text),
    }
    Ok(())
}

fn read_input(file: Option<PathBuf>) -> anyhow::Result<String> {
    match file {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display())),
        _ => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}
