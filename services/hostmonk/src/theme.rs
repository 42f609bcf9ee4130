//! Color themes for the dashboard

use serde::Serialize;

/// Theme used when the configured name is missing or unrecognized
pub const DEFAULT_THEME: &str = "terminal-green";

/// Color tokens of a theme
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThemeColors {
    pub primary: &'static str,
    pub primary_dim: &'static str,
    pub primary_bright: &'static str,
    pub background: &'static str,
    pub background_alt: &'static str,
    pub text: &'static str,
    pub border: &'static str,
    pub success: &'static str,
    pub warning: &'static str,
    pub error: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Theme {
    pub name: &'static str,
    pub display_name: &'static str,
    pub colors: ThemeColors,
    pub font: &'static str,
    pub scanline_opacity: f32,
}

static THEMES: [Theme; 5] = [
    Theme {
        name: "terminal-green",
        display_name: "Terminal Green",
        colors: ThemeColors {
            primary: "#00ff00",
            primary_dim: "#00cc00",
            primary_bright: "#39ff14",
            background: "#0a0a0a",
            background_alt: "#1a1a1a",
            text: "#00ff00",
            border: "#00ff00",
            success: "#00ff00",
            warning: "#ffff00",
            error: "#ff0000",
        },
        font: "Share Tech Mono",
        scanline_opacity: 0.03,
    },
    Theme {
        name: "amber",
        display_name: "Amber Alert",
        colors: ThemeColors {
            primary: "#ffb000",
            primary_dim: "#cc8800",
            primary_bright: "#ffd700",
            background: "#0a0a0a",
            background_alt: "#1a1a1a",
            text: "#ffb000",
            border: "#ffb000",
            success: "#00ff00",
            warning: "#ffd700",
            error: "#ff0000",
        },
        font: "Share Tech Mono",
        scanline_opacity: 0.03,
    },
    Theme {
        name: "cyan",
        display_name: "Cyan Matrix",
        colors: ThemeColors {
            primary: "#00ffff",
            primary_dim: "#00cccc",
            primary_bright: "#66ffff",
            background: "#0a0a0a",
            background_alt: "#1a1a1a",
            text: "#00ffff",
            border: "#00ffff",
            success: "#00ff00",
            warning: "#ffff00",
            error: "#ff0000",
        },
        font: "Share Tech Mono",
        scanline_opacity: 0.03,
    },
    Theme {
        name: "paper-noir",
        display_name: "Paper Noir",
        colors: ThemeColors {
            primary: "#ffffff",
            primary_dim: "#cccccc",
            primary_bright: "#ffffff",
            background: "#000000",
            background_alt: "#0f0f0f",
            text: "#ffffff",
            border: "#ffffff",
            success: "#00ff00",
            warning: "#ffff00",
            error: "#ff0000",
        },
        font: "VT323",
        scanline_opacity: 0.02,
    },
    Theme {
        name: "vintage-paper",
        display_name: "Vintage Paper",
        colors: ThemeColors {
            primary: "#2a2a2a",
            primary_dim: "#4a4a4a",
            primary_bright: "#000000",
            background: "#f4e8d0",
            background_alt: "#e8dcc4",
            text: "#2a2a2a",
            border: "#8a7a6a",
            success: "#2a6a2a",
            warning: "#8a6a2a",
            error: "#8a2a2a",
        },
        font: "VT323",
        scanline_opacity: 0.01,
    },
];

/// Look up a theme by name, falling back silently to [`DEFAULT_THEME`]
pub fn get_theme(name: &str) -> &'static Theme {
    find_theme(name).unwrap_or(&THEMES[0])
}

/// Exact-match lookup with no fallback
pub fn find_theme(name: &str) -> Option<&'static Theme> {
    THEMES.iter().find(|t| t.name == name)
}

/// All themes in selector order
pub fn all_themes() -> &'static [Theme] {
    &THEMES
}
