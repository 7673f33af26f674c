use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use ac_cli::commands::{config_ops, lookup_ops, simulate_ops};

#[derive(Parser)]
#[command(name = "completetool", about = "Inline completion diagnostics")]
struct Cli {
    /// Custom settings TOML applied before running the command
    #[arg(long, global = true)]
    settings: Option<String>,
    /// Write a JSON-lines trace to this directory (requires --features trace)
    #[arg(long, global = true)]
    trace_dir: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Replay a keystroke script and print the input after every step
    Simulate {
        /// Word list file (one candidate per line, priority order)
        #[arg(long)]
        words: String,
        /// Keyboard language tag
        #[arg(long, default_value = "en-US")]
        language: String,
        /// Simulate voice dictation
        #[arg(long)]
        dictation: bool,
        /// Output one JSON object per step
        #[arg(long)]
        json: bool,
        /// Keystrokes, e.g. "Ban<bs><bs>n<tap>"
        script: String,
    },
    /// Show the candidate and completion split for a typed text
    Lookup {
        /// Word list file
        #[arg(long)]
        words: String,
        /// Typed text
        text: String,
    },
    /// Export default settings as TOML
    SettingsExport,
    /// Validate a custom settings TOML file
    SettingsValidate {
        /// Path to the TOML file
        file: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let _trace = match &cli.trace_dir {
        Some(dir) => Some(config_ops::start_trace(dir)),
        None => {
            tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .with_env_filter(
                    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
                )
                .init();
            None
        }
    };

    if let Some(file) = &cli.settings {
        config_ops::load_settings(file);
    }

    match cli.command {
        Command::Simulate {
            words,
            language,
            dictation,
            json,
            script,
        } => {
            let opts = simulate_ops::SimulateOptions {
                words_file: &words,
                language: &language,
                dictation,
                json,
            };
            simulate_ops::simulate_cmd(&script, &opts);
        }
        Command::Lookup { words, text } => lookup_ops::lookup_cmd(&words, &text),
        Command::SettingsExport => config_ops::settings_export(),
        Command::SettingsValidate { file } => config_ops::settings_validate(&file),
    }
}
