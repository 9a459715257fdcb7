//! screenmd - A split-pane terminal markdown editor with live preview.
//!
//! # Usage
//!
//! ```bash
//! screenmd
//! screenmd --layout sequential --theme light
//! screenmd --fullscreen-switch --save
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use screenmd::app::App;
use screenmd::app::focus::SplitMode;
use screenmd::config::{
    ConfigFlags, ThemeMode, clear_config_flags, global_config_path, load_config_flags,
    local_override_path, parse_flag_tokens, save_config_flags,
};
use screenmd::logging;
use screenmd::markdown::DEFAULT_WRAP_WIDTH;
use screenmd::perf;

/// A split-pane terminal markdown editor with live preview
#[derive(Parser, Debug)]
#[command(name = "screenmd", version, about, long_about = None)]
struct Cli {
    /// Initial pane arrangement
    #[arg(long, value_enum, value_name = "MODE")]
    layout: Option<SplitMode>,

    /// Go fullscreen on the focused pane when switching focus
    #[arg(long)]
    fullscreen_switch: bool,

    /// Preview word-wrap width
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(usize))]
    wrap: Option<usize>,

    /// Color theme
    #[arg(long, value_enum)]
    theme: Option<ThemeMode>,

    /// Hide editor line numbers
    #[arg(long)]
    no_line_numbers: bool,

    /// Keep copied text inside screenmd instead of the system clipboard
    #[arg(long)]
    internal_clipboard: bool,

    /// Log render and draw timings
    #[arg(long)]
    perf: bool,

    /// Write logs to a file; without it logs are discarded
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

fn main() -> Result<()> {
    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    logging::init(effective.log_file.as_deref(), effective.perf)?;
    perf::set_enabled(effective.perf);
    tracing::debug!(?effective, "startup flags");

    let app = App::new()
        .with_split_mode(effective.layout.unwrap_or_default())
        .with_fullscreen_switch(effective.fullscreen_switch)
        .with_wrap_width(effective.wrap.unwrap_or(DEFAULT_WRAP_WIDTH))
        .with_theme(effective.theme.unwrap_or_default())
        .with_line_numbers(!effective.no_line_numbers)
        .with_internal_clipboard(effective.internal_clipboard);

    app.run().context("Application error")
}
