//! Theme registry and active theme state.

use std::sync::RwLock;

use once_cell::sync::Lazy;
use ratatui::style::Color;

#[derive(Debug, Clone, Copy)]
pub struct UiTheme {
    pub bg_default: Color,
    pub bg_selected: Color,
    pub bg_added_word: Color,
    pub bg_removed_word: Color,
    pub fg_default: Color,
    pub fg_muted: Color,
    pub fg_accent: Color,
    pub fg_border: Color,
    pub fg_warning: Color,
    pub fg_added: Color,
    pub fg_removed: Color,
    pub gauge_goal: Color,
    pub gauge_daily: Color,
}

#[derive(Clone, Copy)]
pub struct ThemeSpec {
    pub name: &'static str,
    pub ui: UiTheme,
}

struct ThemeState {
    name: String,
    ui: UiTheme,
}

static THEME_STATE: Lazy<RwLock<ThemeState>> = Lazy::new(|| {
    let spec = github_dark();
    RwLock::new(ThemeState {
        name: spec.name.to_string(),
        ui: spec.ui,
    })
});

const THEME_ORDER: &[&str] = &[
    "github-dark",
    "github-light",
    "catppuccin-mocha",
    "catppuccin-latte",
];

pub fn available_themes() -> Vec<String> {
    THEME_ORDER.iter().map(|name| (*name).to_string()).collect()
}

pub fn current_name() -> String {
    THEME_STATE.read().expect("theme state").name.clone()
}

pub fn current_ui() -> UiTheme {
    THEME_STATE.read().expect("theme state").ui
}

pub fn set_theme(name: &str) -> Result<(), String> {
    let spec = find_theme(name).ok_or_else(|| {
        format!(
            "Unknown theme '{}'. Available: {}",
            name,
            available_themes().join(", ")
        )
    })?;

    let mut guard = THEME_STATE.write().expect("theme state");
    guard.name = spec.name.to_string();
    guard.ui = spec.ui;
    Ok(())
}

/// Resolve the startup theme: CLI flag, then REDLINE_THEME, then config.
pub fn init(theme_arg: Option<&str>, config_theme: Option<&str>) -> Result<(), String> {
    if let Some(arg) = theme_arg {
        return set_theme(arg);
    }

    if let Ok(value) = std::env::var("REDLINE_THEME") {
        let trimmed = value.trim();
        if !trimmed.is_empty() {
            return set_theme(trimmed);
        }
    }

    if let Some(saved) = config_theme {
        return set_theme(saved);
    }

    Ok(())
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase().replace('_', "-")
}

fn find_theme(name: &str) -> Option<ThemeSpec> {
    match normalize(name).as_str() {
        "github-dark" | "dark" | "gh-dark" => Some(github_dark()),
        "github-light" | "light" | "gh-light" => Some(github_light()),
        "catppuccin" | "catppuccin-dark" | "catppuccin-mocha" => Some(catppuccin_mocha()),
        "catppuccin-light" | "catppuccin-latte" => Some(catppuccin_latte()),
        _ => None,
    }
}

fn rgb(r: u8, g: u8, b: u8) -> Color {
    Color::Rgb(r, g, b)
}

fn as_rgb(color: Color) -> (u8, u8, u8) {
    match color {
        Color::Rgb(r, g, b) => (r, g, b),
        _ => (0, 0, 0),
    }
}

fn blend(a: Color, b: Color, t: f32) -> Color {
    let (ar, ag, ab) = as_rgb(a);
    let (br, bg, bb) = as_rgb(b);
    let mix = |a: u8, b: u8| ((a as f32) * (1.0 - t) + (b as f32) * t).round() as u8;
    rgb(mix(ar, br), mix(ag, bg), mix(ab, bb))
}

// ─── GitHub ──────────────────────────────────────────────────────────────────

fn github_dark() -> ThemeSpec {
    ThemeSpec {
        name: "github-dark",
        ui: UiTheme {
            bg_default: rgb(36, 41, 46),
            bg_selected: rgb(57, 65, 74),
            bg_added_word: rgb(50, 82, 56),
            bg_removed_word: rgb(99, 51, 50),
            fg_default: rgb(225, 228, 232),
            fg_muted: rgb(149, 157, 165),
            fg_accent: rgb(121, 184, 255),
            fg_border: rgb(68, 77, 86),
            fg_warning: rgb(255, 171, 112),
            fg_added: rgb(52, 208, 88),
            fg_removed: rgb(234, 74, 90),
            gauge_goal: rgb(121, 184, 255),
            gauge_daily: rgb(52, 208, 88),
        },
    }
}

fn github_light() -> ThemeSpec {
    ThemeSpec {
        name: "github-light",
        ui: UiTheme {
            bg_default: rgb(255, 255, 255),
            bg_selected: rgb(234, 238, 242),
            bg_added_word: rgb(172, 242, 189),
            bg_removed_word: rgb(253, 184, 192),
            fg_default: rgb(36, 41, 47),
            fg_muted: rgb(87, 96, 106),
            fg_accent: rgb(9, 105, 218),
            fg_border: rgb(208, 215, 222),
            fg_warning: rgb(154, 103, 0),
            fg_added: rgb(26, 127, 55),
            fg_removed: rgb(207, 34, 46),
            gauge_goal: rgb(9, 105, 218),
            gauge_daily: rgb(26, 127, 55),
        },
    }
}

// ─── Catppuccin ──────────────────────────────────────────────────────────────

#[derive(Clone, Copy)]
struct CatppuccinPalette {
    base: (u8, u8, u8),
    surface0: (u8, u8, u8),
    text: (u8, u8, u8),
    subtext0: (u8, u8, u8),
    overlay0: (u8, u8, u8),
    blue: (u8, u8, u8),
    green: (u8, u8, u8),
    yellow: (u8, u8, u8),
    red: (u8, u8, u8),
}

fn catppuccin_theme(name: &'static str, p: CatppuccinPalette, is_light: bool) -> ThemeSpec {
    let base = rgb(p.base.0, p.base.1, p.base.2);
    let surface0 = rgb(p.surface0.0, p.surface0.1, p.surface0.2);
    let text = rgb(p.text.0, p.text.1, p.text.2);
    let subtext0 = rgb(p.subtext0.0, p.subtext0.1, p.subtext0.2);
    let overlay0 = rgb(p.overlay0.0, p.overlay0.1, p.overlay0.2);
    let blue = rgb(p.blue.0, p.blue.1, p.blue.2);
    let green = rgb(p.green.0, p.green.1, p.green.2);
    let yellow = rgb(p.yellow.0, p.yellow.1, p.yellow.2);
    let red = rgb(p.red.0, p.red.1, p.red.2);

    let word_t = if is_light { 0.30 } else { 0.28 };

    ThemeSpec {
        name,
        ui: UiTheme {
            bg_default: base,
            bg_selected: surface0,
            bg_added_word: blend(base, green, word_t),
            bg_removed_word: blend(base, red, word_t),
            fg_default: text,
            fg_muted: subtext0,
            fg_accent: blue,
            fg_border: overlay0,
            fg_warning: yellow,
            fg_added: green,
            fg_removed: red,
            gauge_goal: blue,
            gauge_daily: green,
        },
    }
}

fn catppuccin_mocha() -> ThemeSpec {
    catppuccin_theme(
        "catppuccin-mocha",
        CatppuccinPalette {
            base: (30, 30, 46),
            surface0: (49, 50, 68),
            text: (205, 214, 244),
            subtext0: (166, 173, 200),
            overlay0: (108, 112, 134),
            blue: (137, 180, 250),
            green: (166, 227, 161),
            yellow: (249, 226, 175),
            red: (243, 139, 168),
        },
        false,
    )
}

fn catppuccin_latte() -> ThemeSpec {
    catppuccin_theme(
        "catppuccin-latte",
        CatppuccinPalette {
            base: (239, 241, 245),
            surface0: (204, 208, 218),
            text: (76, 79, 105),
            subtext0: (108, 111, 133),
            overlay0: (156, 160, 176),
            blue: (30, 102, 245),
            green: (64, 160, 43),
            yellow: (223, 142, 29),
            red: (210, 15, 57),
        },
        true,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_available_themes() {
        let names = available_themes();
        assert!(names.contains(&"github-dark".to_string()));
        assert!(names.contains(&"catppuccin-mocha".to_string()));
    }

    #[test]
    fn test_unknown_theme_rejected() {
        assert!(set_theme("solarized-disco").is_err());
    }

    #[test]
    fn test_aliases_resolve() {
        assert!(find_theme("GH_Dark").is_some());
        assert!(find_theme("catppuccin").is_some());
    }
}
