#![cfg_attr(not(windows), allow(dead_code))]

mod cli;
mod clipboard;
mod stream;

use std::io;

use clap::Parser;
use cli::{Cli, Command};
use tracing_subscriber::EnvFilter;

/// Process exit code for any failure, parse error, or help exit.
const EXIT_FAILURE: i32 = 42;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Help output and usage errors share the failure code.
            let _ = e.print();
            std::process::exit(EXIT_FAILURE);
        }
    };

    let result = match cli.command {
        Command::Paste { mode } => paste(mode.mode()),
        Command::Copy { mode, max_bytes } => copy(mode.mode(), max_bytes),
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "clipbridge failed");
        eprintln!("clipbridge: {e}");
        std::process::exit(EXIT_FAILURE);
    }
}

/// Top-level failures surfaced to the user.
#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error(transparent)]
    Clipboard(#[from] clipboard::ClipboardError),
    #[error(transparent)]
    Stream(#[from] stream::StreamError),
    #[error("output write failed: {0}")]
    Output(#[from] io::Error),
    #[cfg(not(windows))]
    #[error("the system clipboard bridge is only available on Windows")]
    Unsupported,
}

#[cfg(windows)]
fn paste(mode: stream::Mode) -> Result<(), AppError> {
    let os = clipboard::windows::WinOs;
    let text = clipboard::read_utf8(&os)?;
    stream::write_output(&mut io::stdout().lock(), &text, mode)?;
    Ok(())
}

#[cfg(windows)]
fn copy(mode: stream::Mode, max_bytes: usize) -> Result<(), AppError> {
    let text = stream::read_input(&mut io::stdin().lock(), mode, max_bytes)?;
    let os = clipboard::windows::WinOs;
    clipboard::write_utf8(&os, &text)?;
    Ok(())
}

#[cfg(not(windows))]
fn paste(_mode: stream::Mode) -> Result<(), AppError> {
    Err(AppError::Unsupported)
}

#[cfg(not(windows))]
fn copy(_mode: stream::Mode, _max_bytes: usize) -> Result<(), AppError> {
    Err(AppError::Unsupported)
}
