use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use ratatui::style::Color;
use serde::Deserialize;
use thiserror::Error;

use crate::config::{SNAKE_PALETTE_COUNT, SnakePalette, Theme, fallback_theme};

const USER_THEME_APP_DIR: &str = "grid-snake";
const USER_THEME_FILE: &str = "theme.json";

/// Failure to load a theme file.
#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("failed to read theme file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid theme json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown color '{value}' for '{token}'")]
    UnknownColor { token: String, value: String },
    #[error("snake_palettes holds {0} entries, expected at most {max}", max = SNAKE_PALETTE_COUNT)]
    TooManyPalettes(usize),
}

#[derive(Debug, Deserialize)]
struct ThemeFile {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    defs: HashMap<String, ColorValue>,
    #[serde(default)]
    theme: HashMap<String, ColorValue>,
    #[serde(default)]
    snake_palettes: Vec<PaletteFile>,
}

#[derive(Debug, Deserialize)]
struct PaletteFile {
    head: ColorValue,
    body: ColorValue,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum ColorValue {
    String(String),
    Ansi(u8),
}

/// Resolves the theme for this session.
///
/// An explicit path must load. Without one, a theme in the user config
/// directory is used when present and valid; otherwise the built-in theme.
pub fn load_theme(explicit: Option<&Path>) -> Result<Theme, ThemeError> {
    if let Some(path) = explicit {
        return load_theme_file(path);
    }

    let Some(path) = user_theme_path().filter(|path| path.is_file()) else {
        return Ok(fallback_theme());
    };

    match load_theme_file(&path) {
        Ok(theme) => Ok(theme),
        Err(error) => {
            log::warn!(
                "ignoring theme file {}: {error}; using built-in theme",
                path.display()
            );
            Ok(fallback_theme())
        }
    }
}

/// Reads and parses one theme file.
pub fn load_theme_file(path: &Path) -> Result<Theme, ThemeError> {
    let raw = fs::read_to_string(path).map_err(|source| ThemeError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let theme = parse_theme(&raw)?;
    log::info!("loaded theme '{}' from {}", theme.name, path.display());
    Ok(theme)
}

/// Parses a theme document; unspecified tokens keep built-in colors.
pub fn parse_theme(raw: &str) -> Result<Theme, ThemeError> {
    let parsed = serde_json::from_str::<ThemeFile>(raw)?;
    let mut theme = fallback_theme();

    if let Some(name) = parsed.name.clone() {
        theme.name = name;
    }

    let slots: [(&str, &mut Color); 10] = [
        ("food_normal", &mut theme.food_normal),
        ("food_special", &mut theme.food_special),
        ("food_golden", &mut theme.food_golden),
        ("wall", &mut theme.wall),
        ("field_bg", &mut theme.field_bg),
        ("border_fg", &mut theme.border_fg),
        ("ui_text", &mut theme.ui_text),
        ("ui_accent", &mut theme.ui_accent),
        ("ui_muted", &mut theme.ui_muted),
        ("overlay_bg", &mut theme.overlay_bg),
    ];
    for (token, slot) in slots {
        if let Some(value) = parsed.theme.get(token) {
            *slot = resolve_value(&parsed, token, value)?;
        }
    }

    if parsed.snake_palettes.len() > SNAKE_PALETTE_COUNT {
        return Err(ThemeError::TooManyPalettes(parsed.snake_palettes.len()));
    }
    for (slot, palette) in theme
        .snake_palettes
        .iter_mut()
        .zip(parsed.snake_palettes.iter())
    {
        *slot = SnakePalette {
            head: resolve_value(&parsed, "snake_palettes.head", &palette.head)?,
            body: resolve_value(&parsed, "snake_palettes.body", &palette.body)?,
        };
    }

    Ok(theme)
}

fn resolve_value(file: &ThemeFile, token: &str, value: &ColorValue) -> Result<Color, ThemeError> {
    let unknown = || ThemeError::UnknownColor {
        token: token.to_owned(),
        value: match value {
            ColorValue::String(s) => s.clone(),
            ColorValue::Ansi(code) => code.to_string(),
        },
    };

    match value {
        ColorValue::Ansi(code) => Ok(Color::Indexed(*code)),
        ColorValue::String(s) => parse_color_string(file, s, &mut Vec::new()).ok_or_else(unknown),
    }
}

fn parse_color_string(file: &ThemeFile, value: &str, stack: &mut Vec<String>) -> Option<Color> {
    if value.eq_ignore_ascii_case("none") || value.eq_ignore_ascii_case("reset") {
        return Some(Color::Reset);
    }

    if let Some(color) = parse_hex_color(value) {
        return Some(color);
    }

    if let Some(color) = parse_named_ansi_color(value) {
        return Some(color);
    }

    if stack.iter().any(|seen| seen == value) {
        return None;
    }

    let referenced = file.defs.get(value)?;
    stack.push(value.to_owned());
    let resolved = match referenced {
        ColorValue::Ansi(code) => Some(Color::Indexed(*code)),
        ColorValue::String(s) => parse_color_string(file, s, stack),
    };
    let _ = stack.pop();
    resolved
}

fn parse_named_ansi_color(value: &str) -> Option<Color> {
    let normalized: String = value
        .chars()
        .filter(|c| *c != '_' && *c != '-')
        .map(|c| c.to_ascii_lowercase())
        .collect();

    match normalized.as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "white" => Some(Color::White),
        "gray" | "grey" => Some(Color::Gray),
        "darkgray" | "darkgrey" => Some(Color::DarkGray),
        "lightred" => Some(Color::LightRed),
        "lightgreen" => Some(Color::LightGreen),
        "lightyellow" => Some(Color::LightYellow),
        "lightblue" => Some(Color::LightBlue),
        "lightmagenta" => Some(Color::LightMagenta),
        "lightcyan" => Some(Color::LightCyan),
        _ => None,
    }
}

fn parse_hex_color(value: &str) -> Option<Color> {
    let hex = value.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }

    let red = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let green = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let blue = u8::from_str_radix(&hex[4..6], 16).ok()?;

    Some(Color::Rgb(red, green, blue))
}

fn user_theme_path() -> Option<PathBuf> {
    dirs::config_dir().map(|config_dir| config_dir.join(USER_THEME_APP_DIR).join(USER_THEME_FILE))
}
