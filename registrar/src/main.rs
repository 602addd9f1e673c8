//! Console student records manager.
//!
//! With no subcommand the interactive shell runs against the configured
//! records file. `init`, `validate`, and `report` are thin non-interactive
//! maintenance commands over the same store.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::warn;

use registrar::core::report::transcript;
use registrar::error::RecordsError;
use registrar::exit_codes;
use registrar::io::config::{RegistrarConfig, load_config, write_config};
use registrar::io::render::render_transcript;
use registrar::io::store::{load_records, save_records};
use registrar::logging;
use registrar::records::RecordBook;
use registrar::shell::Shell;

#[derive(Parser)]
#[command(name = "registrar", version, about = "Console student records manager")]
struct Cli {
    /// Config file path.
    #[arg(short, long, default_value = "registrar.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Write a default config and an empty records file if missing.
    Init {
        /// Overwrite existing files.
        #[arg(short, long)]
        force: bool,
    },
    /// Check the records file against schema and invariants.
    Validate,
    /// Print a student transcript.
    Report { student_id: String },
}

fn main() {
    logging::init();
    let cli = Cli::parse();
    let code = match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{:#}", err);
            exit_codes::INVALID
        }
    };
    std::process::exit(code);
}

fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Some(Command::Init { force }) => cmd_init(&cli.config, force),
        Some(Command::Validate) => cmd_validate(&cli.config),
        Some(Command::Report { student_id }) => cmd_report(&cli.config, &student_id),
        None => cmd_shell(&cli.config),
    }
}

/// Run the interactive shell on stdin/stdout.
fn cmd_shell(config_path: &Path) -> Result<i32> {
    let config = load_config(config_path)?;
    let book = load_or_fallback(&config)?;

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut shell = Shell::new(config, book, stdin.lock(), stdout.lock());
    shell.run()?;
    Ok(exit_codes::OK)
}

/// Load records; a corrupt file degrades to an empty book with a warning,
/// any other failure is unrecoverable at startup.
fn load_or_fallback(config: &RegistrarConfig) -> Result<RecordBook> {
    match load_records(&config.data_file) {
        Ok(book) => Ok(book),
        Err(RecordsError::Corrupt(message)) => {
            warn!(%message, "records file corrupt, starting empty");
            eprintln!("warning: {message}");
            eprintln!("warning: starting with an empty record book");
            Ok(RecordBook::default())
        }
        Err(err) => Err(err).with_context(|| format!("load {}", config.data_file.display())),
    }
}

fn cmd_init(config_path: &Path, force: bool) -> Result<i32> {
    if force || !config_path.exists() {
        write_config(config_path, &RegistrarConfig::default())?;
        println!("wrote {}", config_path.display());
    }
    let config = load_config(config_path)?;
    if force || !config.data_file.exists() {
        save_records(&config.data_file, &RecordBook::default())
            .with_context(|| format!("write {}", config.data_file.display()))?;
        println!("wrote {}", config.data_file.display());
    }
    Ok(exit_codes::OK)
}

fn cmd_validate(config_path: &Path) -> Result<i32> {
    let config = load_config(config_path)?;
    let book = load_records(&config.data_file)
        .with_context(|| format!("validate {}", config.data_file.display()))?;
    println!(
        "{} ok ({} students, {} courses)",
        config.data_file.display(),
        book.students.len(),
        book.courses.len()
    );
    Ok(exit_codes::OK)
}

fn cmd_report(config_path: &Path, student_id: &str) -> Result<i32> {
    let config = load_config(config_path)?;
    let book = load_records(&config.data_file)
        .with_context(|| format!("load {}", config.data_file.display()))?;
    let transcript = transcript(&book, student_id)?;
    println!("{}", render_transcript(&transcript));
    Ok(exit_codes::OK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_defaults_to_shell() {
        let cli = Cli::parse_from(["registrar"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.config, PathBuf::from("registrar.toml"));
    }

    #[test]
    fn parse_init_force() {
        let cli = Cli::parse_from(["registrar", "init", "--force"]);
        assert!(matches!(cli.command, Some(Command::Init { force: true })));
    }

    #[test]
    fn parse_custom_config() {
        let cli = Cli::parse_from(["registrar", "--config", "custom.toml", "validate"]);
        assert_eq!(cli.config, PathBuf::from("custom.toml"));
        assert!(matches!(cli.command, Some(Command::Validate)));
    }
}
