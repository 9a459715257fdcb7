//! Startup defaults saved as flag tokens.
//!
//! Config files hold the same flags as the command line, one or more per
//! line, with `#` comments. The global file lives in the platform config
//! directory; `.screenmdrc` in the working directory overrides it, and the
//! command line overrides both.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ValueEnum;

use crate::app::focus::SplitMode;

#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub layout: Option<SplitMode>,
    pub fullscreen_switch: bool,
    pub wrap: Option<usize>,
    pub theme: Option<ThemeMode>,
    pub no_line_numbers: bool,
    pub internal_clipboard: bool,
    pub perf: bool,
    pub log_file: Option<PathBuf>,
}

impl ConfigFlags {
    /// Merge two flag sets; switches from either side stay on, values from
    /// `other` win.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            layout: other.layout.or(self.layout),
            fullscreen_switch: self.fullscreen_switch || other.fullscreen_switch,
            wrap: other.wrap.or(self.wrap),
            theme: other.theme.or(self.theme),
            no_line_numbers: self.no_line_numbers || other.no_line_numbers,
            internal_clipboard: self.internal_clipboard || other.internal_clipboard,
            perf: self.perf || other.perf,
            log_file: other.log_file.clone().or_else(|| self.log_file.clone()),
        }
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("screenmd").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("screenmd")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("screenmd").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".config")
                .join("screenmd")
                .join("config");
        }
    }

    local_override_path()
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".screenmdrc")
}

/// Read flags from `path`. A missing file yields the defaults.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read.
pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| line.split_whitespace().map(ToOwned::to_owned))
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

/// Write `flags` to `path`, creating parent directories.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be written.
pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = vec!["# screenmd defaults (saved with --save)".to_string()];
    if let Some(layout) = flags.layout {
        lines.push(format!("--layout {}", layout.label()));
    }
    if flags.fullscreen_switch {
        lines.push("--fullscreen-switch".to_string());
    }
    if let Some(wrap) = flags.wrap {
        lines.push(format!("--wrap {wrap}"));
    }
    if let Some(theme) = flags.theme {
        let theme_str = match theme {
            ThemeMode::Dark => "dark",
            ThemeMode::Light => "light",
        };
        lines.push(format!("--theme {theme_str}"));
    }
    if flags.no_line_numbers {
        lines.push("--no-line-numbers".to_string());
    }
    if flags.internal_clipboard {
        lines.push("--internal-clipboard".to_string());
    }
    if flags.perf {
        lines.push("--perf".to_string());
    }
    if let Some(log_file) = &flags.log_file {
        lines.push(format!("--log-file {}", log_file.display()));
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

/// Remove saved defaults at `path`, if any.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be removed.
pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Extract the known flags from raw tokens, ignoring everything else.
///
/// Value flags accept both `--flag value` and `--flag=value`. Unparseable
/// values are ignored.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i].as_str();
        match token {
            "--fullscreen-switch" => flags.fullscreen_switch = true,
            "--no-line-numbers" => flags.no_line_numbers = true,
            "--internal-clipboard" => flags.internal_clipboard = true,
            "--perf" => flags.perf = true,
            _ => {
                if let Some(value) = flag_value(tokens, &mut i, "--layout") {
                    flags.layout = SplitMode::from_str(value, true).ok();
                } else if let Some(value) = flag_value(tokens, &mut i, "--wrap") {
                    flags.wrap = value.parse().ok().filter(|w| *w > 0);
                } else if let Some(value) = flag_value(tokens, &mut i, "--theme") {
                    flags.theme = ThemeMode::from_str(value, true).ok();
                } else if let Some(value) = flag_value(tokens, &mut i, "--log-file") {
                    flags.log_file = Some(PathBuf::from(value));
                }
            }
        }
        i += 1;
    }
    flags
}

/// Value of `name` at `tokens[*i]`, advancing past a separate value token.
fn flag_value<'a>(tokens: &'a [String], i: &mut usize, name: &str) -> Option<&'a str> {
    let token = tokens.get(*i)?;
    if token == name {
        let value = tokens.get(*i + 1)?;
        *i += 1;
        return Some(value.as_str());
    }
    token
        .strip_prefix(name)
        .and_then(|rest| rest.strip_prefix('='))
}
