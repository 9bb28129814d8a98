//! Tagsoup - render HTML fragments as word-wrapped terminal text.
//!
//! This binary provides the CLI interface to the tagsoup libraries,
//! rendering documents from files or stdin.

mod cli;

use clap::Parser as ClapParser;
use cli::Cli;
use log::{debug, error, info, LevelFilter};
use std::io::{self, Read, Write};

use tagsoup_ansi::utils::{strip_markup, stylize};
use tagsoup_config::Config;
use tagsoup_core::{Rendered, Result};
use tagsoup_render::{HtmlRenderer, LineHighlighter, ListFormatter, RegexHighlighter};

/// Location name used for highlight rules applied to rendered documents.
const HIGHLIGHT_LOCATION: &str = "article";

fn main() {
    let cli = <Cli as ClapParser>::parse();

    // Handle --paths flag
    if cli.show_paths {
        cli::show_paths();
        return;
    }

    setup_logging(&cli.log_level);
    info!("tagsoup v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(&cli) {
        error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Set up logging based on the log level argument.
fn setup_logging(level: &str) {
    let filter = match level.to_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        _ => LevelFilter::Warn,
    };

    env_logger::Builder::new()
        .filter_level(filter)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] {}: {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}

/// How rendered lines reach stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    /// ANSI escape sequences for emphasis and highlights
    Styled,
    /// Delimiters stripped
    Plain,
    /// List widget payload
    List,
}

impl OutputMode {
    fn from_cli(cli: &Cli) -> Self {
        if cli.list {
            OutputMode::List
        } else if cli.plain || !atty::is(atty::Stream::Stdout) {
            OutputMode::Plain
        } else {
            OutputMode::Styled
        }
    }
}

/// Main application logic.
fn run(cli: &Cli) -> Result<()> {
    let config = Config::load_with_override(cli.config.as_deref())?;
    debug!("Loaded config: {:?}", config.render);

    let width = cli.effective_width(config.render.width);
    let raw = cli.raw || config.render.raw;
    let renderer = HtmlRenderer::new(width)
        .raw(raw)
        .with_labels(config.labels.clone());
    let highlighter = RegexHighlighter::from_rules(&config.highlight)?;
    let mode = OutputMode::from_cli(cli);
    debug!("Rendering at width {} in {:?} mode", renderer.width(), mode);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if cli.should_read_stdin() {
        info!("Reading from stdin");
        let mut bytes = Vec::new();
        io::stdin().lock().read_to_end(&mut bytes)?;
        let rendered = renderer.render(&String::from_utf8_lossy(&bytes), &cli.base_url);
        emit(&mut out, &rendered, &highlighter, mode, config.render.list_width)?;
    } else {
        for path in &cli.files {
            info!("Processing file: {}", path.display());
            let bytes = std::fs::read(path)?;
            let rendered = renderer.render(&String::from_utf8_lossy(&bytes), &cli.base_url);
            emit(&mut out, &rendered, &highlighter, mode, config.render.list_width)?;
        }
    }

    out.flush()?;
    Ok(())
}

/// Write one rendered document.
fn emit<W: Write>(
    out: &mut W,
    rendered: &Rendered,
    highlighter: &RegexHighlighter,
    mode: OutputMode,
    list_width: usize,
) -> io::Result<()> {
    if mode == OutputMode::List {
        let mut list = ListFormatter::new();
        list.add_lines(&rendered.lines, list_width);
        let hl: Option<&dyn LineHighlighter> = if highlighter.is_empty() {
            None
        } else {
            Some(highlighter)
        };
        return writeln!(out, "{}", list.format_list(hl, HIGHLIGHT_LOCATION));
    }

    for line in &rendered.lines {
        let mut line = line.clone();
        highlighter.highlight(&mut line, HIGHLIGHT_LOCATION);
        match mode {
            OutputMode::Styled => writeln!(out, "{}", stylize(&line))?,
            _ => writeln!(out, "{}", strip_markup(&line))?,
        }
    }
    Ok(())
}
