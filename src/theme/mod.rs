//! Color themes for the commitdiff UI.

use ratatui::style::Color;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;

/// A complete theme definition.
///
/// Field names are self-documenting (`bg_elevated` = raised panel background,
/// `text_muted` = de-emphasized text).
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub struct Theme {
    // Base colors
    pub bg_dark: Color,
    pub bg_surface: Color,
    pub bg_elevated: Color,
    pub bg_selected: Color,

    // Borders
    pub border_dim: Color,
    pub border_active: Color,

    // Text
    pub text_muted: Color,
    pub text_dim: Color,
    pub text_normal: Color,
    pub text_bright: Color,

    // Accent
    pub accent: Color,
    pub accent_dim: Color,

    // Status (also used for change kinds)
    pub success: Color,
    pub error: Color,
    pub warning: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::builtin_default()
    }
}

/// JSON theme file format.
#[derive(Debug, Deserialize)]
#[allow(missing_docs)]
pub struct ThemeJson {
    #[serde(default)]
    pub defs: HashMap<String, String>,
    pub theme: ThemeColorsJson,
}

/// Theme color definitions from JSON. Missing keys keep the default color.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct ThemeColorsJson {
    pub bg_dark: Option<String>,
    pub bg_surface: Option<String>,
    pub bg_elevated: Option<String>,
    pub bg_selected: Option<String>,
    pub border_dim: Option<String>,
    pub border_active: Option<String>,
    pub text_muted: Option<String>,
    pub text_dim: Option<String>,
    pub text_normal: Option<String>,
    pub text_bright: Option<String>,
    pub accent: Option<String>,
    pub accent_dim: Option<String>,
    pub success: Option<String>,
    pub error: Option<String>,
    pub warning: Option<String>,
}

const BUILTIN_THEMES: [&str; 4] = ["default", "dracula", "gruvbox", "nord"];

impl Theme {
    /// Load a theme by name. Checks user themes first, then builtin.
    pub fn load(name: &str) -> Self {
        if let Some(theme) = load_user_theme(name) {
            return theme;
        }

        match name {
            "dracula" => Self::dracula(),
            "gruvbox" => Self::gruvbox(),
            "nord" => Self::nord(),
            _ => Self::builtin_default(),
        }
    }

    /// List available theme names (builtin plus user themes), sorted.
    pub fn list() -> Vec<String> {
        let mut themes: Vec<String> = BUILTIN_THEMES.iter().map(|s| s.to_string()).collect();

        if let Some(dir) = user_themes_dir() {
            if let Ok(entries) = std::fs::read_dir(dir) {
                for entry in entries.flatten() {
                    let path = entry.path();
                    if path.extension().is_some_and(|e| e == "json") {
                        if let Some(stem) = path.file_stem() {
                            let name = stem.to_string_lossy().to_string();
                            if !themes.contains(&name) {
                                themes.push(name);
                            }
                        }
                    }
                }
            }
        }

        themes.sort();
        themes
    }

    /// Default dark theme.
    pub fn builtin_default() -> Self {
        Self {
            bg_dark: Color::Rgb(18, 18, 22),
            bg_surface: Color::Rgb(26, 26, 32),
            bg_elevated: Color::Rgb(36, 36, 44),
            bg_selected: Color::Rgb(45, 45, 55),
            border_dim: Color::Rgb(50, 50, 60),
            border_active: Color::Rgb(80, 200, 200),
            text_muted: Color::Rgb(80, 80, 92),
            text_dim: Color::Rgb(110, 110, 125),
            text_normal: Color::Rgb(175, 175, 185),
            text_bright: Color::Rgb(230, 230, 235),
            accent: Color::Rgb(80, 200, 200),
            accent_dim: Color::Rgb(55, 130, 130),
            success: Color::Rgb(85, 185, 105),
            error: Color::Rgb(215, 85, 85),
            warning: Color::Rgb(215, 175, 80),
        }
    }

    /// Dracula theme.
    pub fn dracula() -> Self {
        Self {
            bg_dark: Color::Rgb(40, 42, 54),
            bg_surface: Color::Rgb(33, 34, 44),
            bg_elevated: Color::Rgb(68, 71, 90),
            bg_selected: Color::Rgb(68, 71, 90),
            border_dim: Color::Rgb(68, 71, 90),
            border_active: Color::Rgb(189, 147, 249),
            text_muted: Color::Rgb(98, 114, 164),
            text_dim: Color::Rgb(128, 134, 174),
            text_normal: Color::Rgb(248, 248, 242),
            text_bright: Color::Rgb(255, 255, 255),
            accent: Color::Rgb(139, 233, 253),
            accent_dim: Color::Rgb(80, 150, 170),
            success: Color::Rgb(80, 250, 123),
            error: Color::Rgb(255, 85, 85),
            warning: Color::Rgb(241, 250, 140),
        }
    }

    /// Gruvbox Dark theme.
    pub fn gruvbox() -> Self {
        Self {
            bg_dark: Color::Rgb(40, 40, 40),
            bg_surface: Color::Rgb(50, 48, 47),
            bg_elevated: Color::Rgb(60, 56, 54),
            bg_selected: Color::Rgb(80, 73, 69),
            border_dim: Color::Rgb(60, 56, 54),
            border_active: Color::Rgb(215, 153, 33),
            text_muted: Color::Rgb(146, 131, 116),
            text_dim: Color::Rgb(168, 153, 132),
            text_normal: Color::Rgb(235, 219, 178),
            text_bright: Color::Rgb(251, 241, 199),
            accent: Color::Rgb(215, 153, 33),
            accent_dim: Color::Rgb(152, 151, 26),
            success: Color::Rgb(152, 151, 26),
            error: Color::Rgb(204, 36, 29),
            warning: Color::Rgb(250, 189, 47),
        }
    }

    /// Nord theme.
    pub fn nord() -> Self {
        Self {
            bg_dark: Color::Rgb(46, 52, 64),
            bg_surface: Color::Rgb(59, 66, 82),
            bg_elevated: Color::Rgb(67, 76, 94),
            bg_selected: Color::Rgb(76, 86, 106),
            border_dim: Color::Rgb(67, 76, 94),
            border_active: Color::Rgb(136, 192, 208),
            text_muted: Color::Rgb(96, 106, 126),
            text_dim: Color::Rgb(150, 160, 180),
            text_normal: Color::Rgb(216, 222, 233),
            text_bright: Color::Rgb(236, 239, 244),
            accent: Color::Rgb(136, 192, 208),
            accent_dim: Color::Rgb(129, 161, 193),
            success: Color::Rgb(163, 190, 140),
            error: Color::Rgb(191, 97, 106),
            warning: Color::Rgb(235, 203, 139),
        }
    }

    /// Build a theme from parsed JSON, falling back to the default per color.
    pub fn from_json(json: &ThemeJson) -> Self {
        let base = Theme::builtin_default();
        let defs = &json.defs;
        let t = &json.theme;
        let pick = |value: &Option<String>, fallback: Color| {
            value
                .as_deref()
                .map_or(fallback, |v| resolve_color(v, defs, fallback))
        };

        Theme {
            bg_dark: pick(&t.bg_dark, base.bg_dark),
            bg_surface: pick(&t.bg_surface, base.bg_surface),
            bg_elevated: pick(&t.bg_elevated, base.bg_elevated),
            bg_selected: pick(&t.bg_selected, base.bg_selected),
            border_dim: pick(&t.border_dim, base.border_dim),
            border_active: pick(&t.border_active, base.border_active),
            text_muted: pick(&t.text_muted, base.text_muted),
            text_dim: pick(&t.text_dim, base.text_dim),
            text_normal: pick(&t.text_normal, base.text_normal),
            text_bright: pick(&t.text_bright, base.text_bright),
            accent: pick(&t.accent, base.accent),
            accent_dim: pick(&t.accent_dim, base.accent_dim),
            success: pick(&t.success, base.success),
            error: pick(&t.error, base.error),
            warning: pick(&t.warning, base.warning),
        }
    }
}

/// Get user themes directory (~/.config/commitdiff/themes/).
fn user_themes_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("commitdiff").join("themes"))
}

/// Load a theme from user themes directory.
fn load_user_theme(name: &str) -> Option<Theme> {
    let path = user_themes_dir()?.join(format!("{}.json", name));
    let content = std::fs::read_to_string(&path).ok()?;
    match serde_json::from_str::<ThemeJson>(&content) {
        Ok(json) => Some(Theme::from_json(&json)),
        Err(e) => {
            log::warn!("Ignoring theme {}: {}", path.display(), e);
            None
        }
    }
}

/// Parse a hex color string to Color.
fn parse_hex(s: &str) -> Option<Color> {
    let s = s.trim_start_matches('#');
    if s.len() != 6 {
        return None;
    }

    let r = u8::from_str_radix(&s[0..2], 16).ok()?;
    let g = u8::from_str_radix(&s[2..4], 16).ok()?;
    let b = u8::from_str_radix(&s[4..6], 16).ok()?;

    Some(Color::Rgb(r, g, b))
}

/// Resolve a color value (hex or reference into `defs`).
fn resolve_color(value: &str, defs: &HashMap<String, String>, fallback: Color) -> Color {
    if value.starts_with('#') {
        parse_hex(value).unwrap_or(fallback)
    } else if let Some(def) = defs.get(value) {
        parse_hex(def).unwrap_or(fallback)
    } else {
        fallback
    }
}
