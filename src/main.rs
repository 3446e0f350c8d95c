//! # tern - A Small Modal Text Editor
//!
//! Opens one file in the terminal. Visual mode moves the cursor, insert mode
//! types; `s` saves and `q` quits.
//!
//! ## Quick Start
//!
//! ```bash
//! # Edit a file (created on first save if missing)
//! cargo run -- notes.txt
//!
//! # Log debug output to a chosen file
//! cargo run -- -vv --log-file /tmp/tern.log notes.txt
//! ```

use anyhow::Context;
use clap::Parser;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use tern_core::{Config, Session, Surface};
use tern_term::{Screen, TerminalGuard, TerminalKeys};

/// tern - a small modal text editor
#[derive(Parser, Debug)]
#[command(name = "tern")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// File to edit
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Config file to use instead of the default location
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log file (defaults to the user cache directory)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    // Usage errors exit with status 1; --help and --version keep clap's handling.
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if e.use_stderr() => {
            let _ = e.print();
            std::process::exit(1);
        }
        Err(e) => e.exit(),
    };

    if let Err(e) = run(args) {
        tracing::error!("{:#}", e);
        eprintln!("tern: {:#}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    init_logging(args.verbose, args.log_file.as_deref());
    tracing::info!("Starting tern v{}", env!("CARGO_PKG_VERSION"));

    let config = match &args.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => Config::load_default().context("failed to load config")?,
    };

    // Dropped before any error is printed, so messages land on the normal screen.
    let _guard = TerminalGuard::enter().context("failed to set up the terminal")?;
    let mut screen = Screen::stdout(config.editor.status_bar_height)?;
    let mut session = Session::open(&args.file, &config, screen.text_height());

    session
        .run(&mut TerminalKeys, &mut screen)
        .context("editing session aborted")?;

    tracing::info!("Exiting");
    Ok(())
}

fn log_level(verbose: u8) -> tracing::Level {
    match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    }
}

fn default_log_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join("tern").join("tern.log"))
}

/// Sends tracing output to a file, since the terminal belongs to the editor.
///
/// Logging stays off when no log file can be created.
fn init_logging(verbose: u8, log_file: Option<&Path>) {
    let Some(path) = log_file.map(Path::to_path_buf).or_else(default_log_path) else {
        return;
    };
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    let Ok(file) = File::create(&path) else {
        return;
    };

    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(log_level(verbose)).into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Arc::new(file))
                .with_ansi(false)
                .with_target(false)
                .with_level(true),
        )
        .with(filter)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_with_file() {
        let args = Args::parse_from(["tern", "notes.txt"]);
        assert_eq!(args.file, PathBuf::from("notes.txt"));
        assert_eq!(args.verbose, 0);
        assert!(args.config.is_none());
        assert!(args.log_file.is_none());
    }

    #[test]
    fn test_missing_file_is_a_usage_error() {
        let err = Args::try_parse_from(["tern"]).unwrap_err();
        assert!(err.use_stderr());
    }

    #[test]
    fn test_two_files_is_a_usage_error() {
        let err = Args::try_parse_from(["tern", "a.txt", "b.txt"]).unwrap_err();
        assert!(err.use_stderr());
    }

    #[test]
    fn test_help_is_not_a_usage_error() {
        let err = Args::try_parse_from(["tern", "--help"]).unwrap_err();
        assert!(!err.use_stderr());
    }

    #[test]
    fn test_options() {
        let args = Args::parse_from([
            "tern",
            "-vv",
            "--config",
            "my.toml",
            "--log-file",
            "out.log",
            "x.txt",
        ]);
        assert_eq!(args.verbose, 2);
        assert_eq!(args.config, Some(PathBuf::from("my.toml")));
        assert_eq!(args.log_file, Some(PathBuf::from("out.log")));
        assert_eq!(args.file, PathBuf::from("x.txt"));
    }

    #[test]
    fn test_log_levels() {
        assert_eq!(log_level(0), tracing::Level::WARN);
        assert_eq!(log_level(1), tracing::Level::INFO);
        assert_eq!(log_level(2), tracing::Level::DEBUG);
        assert_eq!(log_level(7), tracing::Level::TRACE);
    }
}
