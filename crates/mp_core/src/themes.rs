//! Built-in style presets for the article preview.

use crate::types::{EditorTheme, ThemeColors};

pub const THEMES: [EditorTheme; 5] = [
    EditorTheme {
        id: "minimalist",
        name: "极简白",
        description: "Clean, modern, and spacious. Best for general reading.",
        colors: ThemeColors {
            primary: "#333333",
            secondary: "#666666",
            text: "#333333",
            background: "#ffffff",
            accent: "#000000",
        },
        font_family: "-apple-system, BlinkMacSystemFont, \"Helvetica Neue\", \"PingFang SC\", \"Hiragino Sans GB\", \"Microsoft YaHei UI\", \"Microsoft YaHei\", Arial, sans-serif",
        border_radius: "0px",
    },
    EditorTheme {
        id: "literary",
        name: "文艺暖",
        description: "Warm tones, serif fonts. Great for emotional or story-telling content.",
        colors: ThemeColors {
            primary: "#8B5E3C",
            secondary: "#A67B5B",
            text: "#4A4A4A",
            background: "#FDFBF7",
            accent: "#D4A373",
        },
        font_family: "\"Songti SC\", \"SimSun\", serif",
        border_radius: "4px",
    },
    EditorTheme {
        id: "tech",
        name: "科技蓝",
        description: "Professional, blue accents. Good for tutorials and news.",
        colors: ThemeColors {
            primary: "#1E88E5",
            secondary: "#64B5F6",
            text: "#263238",
            background: "#FFFFFF",
            accent: "#1565C0",
        },
        font_family: "system-ui, sans-serif",
        border_radius: "8px",
    },
    EditorTheme {
        id: "fresh",
        name: "清新绿",
        description: "Natural and vibrant. Suitable for lifestyle and health.",
        colors: ThemeColors {
            primary: "#43A047",
            secondary: "#81C784",
            text: "#1B5E20",
            background: "#FAFFF9",
            accent: "#2E7D32",
        },
        font_family: "sans-serif",
        border_radius: "12px",
    },
    EditorTheme {
        id: "future",
        name: "未来风",
        description: "Neon accents, high contrast, cyberpunk aesthetic.",
        colors: ThemeColors {
            primary: "#7C3AED",
            secondary: "#DB2777",
            text: "#1F2937",
            background: "#F5F3FF",
            accent: "#06B6D4",
        },
        font_family: "\"Segoe UI\", Roboto, \"Helvetica Neue\", Arial, sans-serif",
        border_radius: "0px",
    },
];

pub fn all() -> &'static [EditorTheme] {
    &THEMES
}

pub fn by_id(id: &str) -> Option<&'static EditorTheme> {
    THEMES.iter().find(|theme| theme.id == id)
}

pub fn default_theme() -> &'static EditorTheme {
    &THEMES[0]
}
