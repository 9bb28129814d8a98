//! Command-line interface for tagsoup.

use clap::Parser;
use std::path::PathBuf;

/// Default width when neither the command line, the config nor the
/// terminal provide one.
const FALLBACK_WIDTH: usize = 80;

/// Tagsoup - render HTML fragments as word-wrapped terminal text.
///
/// Reads each FILE (or stdin), renders it to lines of text followed by a
/// numbered list of its links, and prints the result.
#[derive(Parser, Debug)]
#[command(
    name = "tagsoup",
    version,
    about = "Render HTML fragments as word-wrapped terminal text",
    after_help = "Examples:\n  \
                  curl -s https://example.com/feed-item.html | tagsoup -u https://example.com/\n  \
                  tagsoup -w 72 article.html\n  \
                  tagsoup --list -c '[[highlight]]\\nPattern = \"rust\"' article.html"
)]
pub struct Cli {
    /// Input files to render (reads from stdin if not provided)
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Set the logging level (trace, debug, info, warn, error)
    #[arg(short = 'l', long = "loglevel", default_value = "warn")]
    pub log_level: String,

    /// Use a custom config file or inline TOML
    #[arg(short = 'c', long = "config")]
    pub config: Option<String>,

    /// Set the output width (0 = config value, then terminal width)
    #[arg(short = 'w', long = "width", default_value = "0")]
    pub width: u16,

    /// Drop emphasis markers, keep link numbers
    #[arg(short = 'r', long = "raw")]
    pub raw: bool,

    /// Base URL for resolving relative links
    #[arg(short = 'u', long = "url", value_name = "BASE_URL", default_value = "")]
    pub base_url: String,

    /// Print the list widget payload instead of text
    #[arg(long = "list")]
    pub list: bool,

    /// Never emit ANSI escape sequences
    #[arg(long = "plain")]
    pub plain: bool,

    /// Show configuration paths and exit
    #[arg(long = "paths")]
    pub show_paths: bool,
}

impl Cli {
    /// Get the effective width.
    ///
    /// The command line wins over `config_width`; when both are 0 the
    /// terminal is asked.
    pub fn effective_width(&self, config_width: usize) -> usize {
        if self.width > 0 {
            self.width as usize
        } else if config_width > 0 {
            config_width
        } else {
            crossterm::terminal::size()
                .ok()
                .map(|(cols, _)| cols as usize)
                .filter(|&cols| cols > 0)
                .unwrap_or(FALLBACK_WIDTH)
        }
    }

    /// Check if we should read from stdin.
    pub fn should_read_stdin(&self) -> bool {
        self.files.is_empty()
    }
}

/// Show paths information.
pub fn show_paths() {
    use tagsoup_config::Config;

    let config_path = Config::config_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(not found)".to_string());
    let exists = Config::config_path().is_some_and(|p| p.exists());

    println!("paths:");
    println!("  config                {}", config_path);
    println!("  config exists         {}", exists);
}
