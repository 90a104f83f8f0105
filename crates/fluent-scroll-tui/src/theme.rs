use ratatui::style::Color;

use fluent_scroll_core::UiConfig;

/// Runtime theme with light and dark variants
#[derive(Debug, Clone)]
pub struct Theme {
    // Background colors
    pub bg0: Color,
    pub bg1: Color,
    pub bg2: Color,

    // Foreground colors
    pub fg0: Color,
    pub fg1: Color,
    pub grey1: Color,
    pub grey2: Color,

    // Semantic colors
    pub accent: Color,
    pub selection: Color,
    pub moving: Color,
    pub warning: Color,
    pub border: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub fn from_config(ui: &UiConfig) -> Self {
        if ui.dark {
            Self::dark()
        } else {
            Self::light()
        }
    }

    pub fn dark() -> Self {
        Self {
            bg0: Color::Rgb(0x20, 0x20, 0x20),
            bg1: Color::Rgb(0x2b, 0x2b, 0x2b),
            bg2: Color::Rgb(0x3a, 0x3a, 0x3a),
            fg0: Color::Rgb(0xff, 0xff, 0xff),
            fg1: Color::Rgb(0xd0, 0xd0, 0xd0),
            grey1: Color::Rgb(0x8a, 0x8a, 0x8a),
            grey2: Color::Rgb(0xa8, 0xa8, 0xa8),
            accent: Color::Rgb(0x60, 0xcd, 0xff),
            selection: Color::Rgb(0x2d, 0x4f, 0x6b),
            moving: Color::Rgb(0x6c, 0xcb, 0x5f),
            warning: Color::Rgb(0xfc, 0xe1, 0x00),
            border: Color::Rgb(0x4a, 0x4a, 0x4a),
        }
    }

    pub fn light() -> Self {
        Self {
            bg0: Color::Rgb(0xf3, 0xf3, 0xf3),
            bg1: Color::Rgb(0xfb, 0xfb, 0xfb),
            bg2: Color::Rgb(0xe5, 0xe5, 0xe5),
            fg0: Color::Rgb(0x1b, 0x1b, 0x1b),
            fg1: Color::Rgb(0x3b, 0x3b, 0x3b),
            grey1: Color::Rgb(0x86, 0x86, 0x86),
            grey2: Color::Rgb(0x60, 0x60, 0x60),
            accent: Color::Rgb(0x00, 0x5f, 0xb8),
            selection: Color::Rgb(0xcc, 0xe4, 0xf7),
            moving: Color::Rgb(0x0f, 0x7b, 0x0f),
            warning: Color::Rgb(0x9d, 0x5d, 0x00),
            border: Color::Rgb(0xd1, 0xd1, 0xd1),
        }
    }
}
