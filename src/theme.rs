use serde::{Deserialize, Serialize};

/// Named background presets. Cosmetic only: the choice never feeds back into
/// geometry, and `Transparent` leaves the raster export alpha-clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Background {
    White,
    Transparent,
    Linen,
    Slate,
    Midnight,
}

impl Background {
    /// Solid fill for the preset, `None` for a transparent canvas.
    pub fn fill(self) -> Option<&'static str> {
        match self {
            Self::White => Some("#FFFFFF"),
            Self::Transparent => None,
            Self::Linen => Some("#FAF6EF"),
            Self::Slate => None,
            Self::Midnight => None,
        }
    }

    /// Gradient stops (top, bottom) for the preset, if it uses one.
    pub fn gradient(self) -> Option<(&'static str, &'static str)> {
        match self {
            Self::Slate => Some(("#F4F7FB", "#DDE5EF")),
            Self::Midnight => Some(("#1C2430", "#0D1117")),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub background: Background,
    pub spine_color: String,
    pub classification_label_color: String,
    pub category_label_color: String,
    pub cause_label_color: String,
    pub subcause_label_color: String,
    pub head_fill: String,
    pub head_text_color: String,
}

impl Theme {
    pub fn classic() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            background: Background::White,
            spine_color: "#333333".to_string(),
            classification_label_color: "#FFFFFF".to_string(),
            category_label_color: "#1C2430".to_string(),
            cause_label_color: "#2C3A4D".to_string(),
            subcause_label_color: "#5B6B80".to_string(),
            head_fill: "#F0F0F0".to_string(),
            head_text_color: "#1C2430".to_string(),
        }
    }

    pub fn midnight() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            background: Background::Midnight,
            spine_color: "#9FB2CC".to_string(),
            classification_label_color: "#0D1117".to_string(),
            category_label_color: "#D6E0EE".to_string(),
            cause_label_color: "#C0CDDF".to_string(),
            subcause_label_color: "#8B9BB3".to_string(),
            head_fill: "#2A3647".to_string(),
            head_text_color: "#E8EEF6".to_string(),
        }
    }

    pub fn for_background(background: Background) -> Self {
        let mut theme = match background {
            Background::Midnight => Self::midnight(),
            _ => Self::classic(),
        };
        theme.background = background;
        theme
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::classic()
    }
}
