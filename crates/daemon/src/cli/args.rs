pub use clap::Parser;

use std::path::PathBuf;
use url::Url;

#[derive(Parser, Debug)]
#[command(name = "quill")]
#[command(about = "QuillMind daemon and command line client")]
pub struct Args {
    /// Daemon API URL (defaults to localhost and the configured api_port)
    #[arg(long, global = true)]
    pub remote: Option<Url>,

    /// Path to the config directory (defaults to ~/.quillmind)
    #[arg(long, global = true)]
    pub config_path: Option<PathBuf>,

    #[command(subcommand)]
    pub command: crate::Command,
}
