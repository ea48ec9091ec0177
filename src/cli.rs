use clap::{Args, Parser, Subcommand};

use crate::stream::{MAX_INPUT_BYTES, Mode};

#[derive(Parser)]
#[command(
    name = "clipbridge",
    about = "Bridge the system clipboard to standard streams as UTF-8"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the clipboard's text to stdout
    Paste {
        #[command(flatten)]
        mode: ModeArgs,
    },

    /// Set the clipboard's text from stdin
    Copy {
        #[command(flatten)]
        mode: ModeArgs,

        /// Maximum number of input bytes accepted
        #[arg(long, default_value_t = MAX_INPUT_BYTES)]
        max_bytes: usize,
    },
}

/// Stream translation flags. Binary is the default.
#[derive(Args)]
pub struct ModeArgs {
    /// Raw byte stream (default)
    #[arg(short = 'b', long, conflicts_with = "text")]
    pub binary: bool,

    /// Translate line endings as a console text stream
    #[arg(short = 't', long)]
    pub text: bool,
}

impl ModeArgs {
    pub fn mode(&self) -> Mode {
        if self.text { Mode::Text } else { Mode::Binary }
    }
}
