//! sheetmark CLI: the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(
    name = "sheetmark",
    version,
    about = "Multiple-choice answer sheets with live scoring"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a printable answer sheet
    Generate {
        /// Number of questions (default from config)
        #[arg(long)]
        questions: Option<String>,

        /// Option labels: number, alpha, kana (default from config)
        #[arg(long)]
        option_type: Option<String>,

        /// Options per question (default from config)
        #[arg(long)]
        options: Option<String>,

        /// Sheet mode: plain, keyed (default from config)
        #[arg(long)]
        mode: Option<String>,

        /// Output format: text, html
        #[arg(long, default_value = "text")]
        format: String,

        /// Write to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Score a filled-in answer file
    Score {
        /// Path to the .toml answer file
        #[arg(long)]
        answers: PathBuf,

        /// Output format: text, json, table, html
        #[arg(long, default_value = "text")]
        format: String,

        /// Write to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,

        /// Copy the score text to the clipboard
        #[arg(long)]
        copy: bool,

        /// Clipboard command override (program reading stdin)
        #[arg(long)]
        clipboard_command: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Check an answer file for problems
    Validate {
        /// Path to the .toml answer file
        #[arg(long)]
        answers: PathBuf,
    },

    /// Fill in a sheet from stdin, rescoring after every change
    Interactive {
        /// Clipboard command override (program reading stdin)
        #[arg(long)]
        clipboard_command: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create starter config and example answer file
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("sheetmark=info")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate {
            questions,
            option_type,
            options,
            mode,
            format,
            output,
            config,
        } => commands::generate::execute(
            questions,
            option_type,
            options,
            mode,
            format,
            output,
            config,
        ),
        Commands::Score {
            answers,
            format,
            output,
            copy,
            clipboard_command,
            config,
        } => {
            commands::score::execute(answers, format, output, copy, clipboard_command, config)
                .await
        }
        Commands::Validate { answers } => commands::validate::execute(answers),
        Commands::Interactive {
            clipboard_command,
            config,
        } => commands::interactive::execute(clipboard_command, config).await,
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
