//! `aarogya` command-line front end.

use std::io::Stdout;
use std::path::PathBuf;

use aarogya_core::{AppConfig, TextPresenter, Theme};
use aarogya_suggest::Session;
use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "aarogya", version, about = "Symptom checker with suggested tests")]
struct Cli {
    /// Config file (defaults to $AAROGYA_CONFIG, then ./aarogya.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Match symptoms against the built-in rules
    Diagnose {
        symptoms: Vec<String>,
    },
    /// Look up suggested tests for a symptom phrase
    Suggest {
        symptoms: Vec<String>,
        /// Override the table location (path or http(s) URL)
        #[arg(long)]
        source: Option<String>,
    },
    /// Show or toggle the colour theme
    Theme {
        #[arg(value_enum, default_value_t = ThemeAction::Show)]
        action: ThemeAction,
    },
    /// Interactive prompt
    Repl,
}

#[derive(Clone, Copy, ValueEnum)]
enum ThemeAction {
    Show,
    Toggle,
}

type StdoutSession = Session<TextPresenter<Stdout>>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };
    if let Command::Suggest { source: Some(source), .. } = &cli.command {
        config.suggestions.source = source.clone();
    }

    // Initialise structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    debug!(version = env!("CARGO_PKG_VERSION"), "aarogya starting");

    let mut session = Session::from_config(&config, TextPresenter::new(std::io::stdout()))
        .context("could not start session")?;

    match cli.command {
        Command::Diagnose { symptoms } => session.diagnose(&symptoms.join(" "))?,
        Command::Suggest { symptoms, .. } => {
            session.suggest(&symptoms.join(" ")).await?;
        }
        Command::Theme { action: ThemeAction::Show } => session.start()?,
        Command::Theme { action: ThemeAction::Toggle } => {
            let theme = session.toggle_theme()?;
            info!(theme = %theme, "theme switched");
        }
        Command::Repl => repl(&mut session).await?,
    }

    Ok(())
}

const REPL_HELP: &str = "\
Commands:
  diagnose <symptoms>   match symptoms against the rules
  suggest <symptom>     look up suggested tests
  reset                 clear results
  theme                 toggle light/dark
  help                  show this message
  quit                  exit
Anything else is treated as `diagnose`.";

async fn repl(session: &mut StdoutSession) -> anyhow::Result<()> {
    session.start()?;
    println!("{}", REPL_HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        let (command, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));

        match command {
            "quit" | "exit" => break,
            "help" => println!("{}", REPL_HELP),
            "reset" => session.reset()?,
            "theme" => {
                let theme: Theme = session.toggle_theme()?;
                debug!(theme = %theme, "theme switched");
            }
            "suggest" => {
                session.suggest(rest).await?;
            }
            "diagnose" => session.diagnose(rest)?,
            _ => session.diagnose(line)?,
        }
    }

    Ok(())
}
