use crate::theme::{Background, Theme};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Discrete font tiers keyed on label length. The reference behavior sizes
/// text by a short/medium/long lookup instead of measuring glyphs, so the
/// same thresholds must hold across exports for a diagram to regenerate
/// byte-identically.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FontTiers {
    /// Labels up to this many characters use the first size.
    pub short_max: usize,
    /// Labels up to this many characters use the second size; longer ones
    /// fall through to the third.
    pub medium_max: usize,
    pub title_sizes: [f32; 3],
    pub classification_sizes: [f32; 3],
    pub category_sizes: [f32; 3],
    pub cause_sizes: [f32; 3],
    pub subcause_sizes: [f32; 3],
    /// Head box width per title tier.
    pub head_widths: [f32; 3],
    /// Filled classification marker width per label tier.
    pub classification_marker_widths: [f32; 3],
}

impl Default for FontTiers {
    fn default() -> Self {
        Self {
            short_max: 12,
            medium_max: 24,
            title_sizes: [20.0, 17.0, 14.0],
            classification_sizes: [16.0, 14.0, 12.0],
            category_sizes: [14.0, 13.0, 12.0],
            cause_sizes: [13.0, 12.0, 11.0],
            subcause_sizes: [11.0, 10.0, 9.0],
            head_widths: [160.0, 220.0, 300.0],
            classification_marker_widths: [120.0, 170.0, 230.0],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Outer margin around the whole drawing.
    pub margin: f32,
    /// Base canvas width before growth with classification pairs.
    pub base_width: f32,
    /// Extra width per classification pair beyond the second.
    pub width_per_pair: f32,
    /// Minimum canvas height.
    pub min_height: f32,
    /// Canvas height at zero branch load.
    pub base_height: f32,
    /// Height added per cause/sub-cause entry in the densest branch.
    pub unit_row_height: f32,
    /// Horizontal distance between consecutive classification pairs along
    /// the spine, working back from the head.
    pub classification_spacing: f32,
    /// Horizontal run of the diagonal branch (anchor x minus tip x).
    pub branch_run: f32,
    /// Vertical gap kept between a branch tip label and the canvas edge.
    pub branch_label_band: f32,
    /// Offset of the classification label past its branch tip.
    pub classification_label_offset: f32,
    /// Length of the horizontal category segment toward the spine interior.
    pub category_run: f32,
    /// Horizontal reach of a cause connector away from the category line.
    pub cause_run: f32,
    /// Vertical droop of the cause connector end, in the branch direction.
    pub cause_droop: f32,
    /// Upper bound on the gap between stacked causes.
    pub cause_spacing_max: f32,
    /// Fraction of the branch rise available to a single cause stack; the
    /// per-item gap shrinks so the stack never exceeds it.
    pub cause_budget_fraction: f32,
    /// Vertical step between cascading sub-causes.
    pub subcause_spacing: f32,
    /// Glyph prefixed to every sub-cause label.
    pub subcause_glyph: String,
    pub spine_width: f32,
    pub branch_width: f32,
    pub connector_width: f32,
    pub font_tiers: FontTiers,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            margin: 40.0,
            base_width: 960.0,
            width_per_pair: 180.0,
            min_height: 420.0,
            base_height: 280.0,
            unit_row_height: 36.0,
            classification_spacing: 180.0,
            branch_run: 60.0,
            branch_label_band: 44.0,
            classification_label_offset: 24.0,
            category_run: 70.0,
            cause_run: 90.0,
            cause_droop: 12.0,
            cause_spacing_max: 34.0,
            cause_budget_fraction: 0.85,
            subcause_spacing: 16.0,
            subcause_glyph: "\u{21b3} ".to_string(),
            spine_width: 3.0,
            branch_width: 2.0,
            connector_width: 1.0,
            font_tiers: FontTiers::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Raster output scale: 1.0 renders at layout size, 2.0 at double.
    pub scale: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self { scale: 2.0 }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub render: RenderConfig,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeOverrides {
    background: Option<Background>,
    spine_color: Option<String>,
    classification_label_color: Option<String>,
    category_label_color: Option<String>,
    cause_label_color: Option<String>,
    subcause_label_color: Option<String>,
    head_fill: Option<String>,
    head_text_color: Option<String>,
    font_family: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<ThemeOverrides>,
    layout: Option<serde_json::Value>,
    render: Option<serde_json::Value>,
}

/// Loads defaults, then applies a JSON config file on top if one is given.
/// Layout and render sections are partial: absent fields keep their
/// defaults.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let Some(path) = path else {
        return Ok(config);
    };

    let contents = std::fs::read_to_string(path)?;
    let parsed: ConfigFile = serde_json::from_str(&contents)?;

    if let Some(theme) = parsed.theme {
        if let Some(background) = theme.background {
            config.theme = Theme::for_background(background);
        }
        if let Some(v) = theme.spine_color {
            config.theme.spine_color = v;
        }
        if let Some(v) = theme.classification_label_color {
            config.theme.classification_label_color = v;
        }
        if let Some(v) = theme.category_label_color {
            config.theme.category_label_color = v;
        }
        if let Some(v) = theme.cause_label_color {
            config.theme.cause_label_color = v;
        }
        if let Some(v) = theme.subcause_label_color {
            config.theme.subcause_label_color = v;
        }
        if let Some(v) = theme.head_fill {
            config.theme.head_fill = v;
        }
        if let Some(v) = theme.head_text_color {
            config.theme.head_text_color = v;
        }
        if let Some(v) = theme.font_family {
            config.theme.font_family = v;
        }
    }

    if let Some(layout) = parsed.layout {
        config.layout = merge_partial(&config.layout, layout)?;
    }
    if let Some(render) = parsed.render {
        config.render = merge_partial(&config.render, render)?;
    }

    Ok(config)
}

/// Overlays a partial JSON object onto a serializable config section by
/// round-tripping through `serde_json::Value`.
fn merge_partial<T>(base: &T, overlay: serde_json::Value) -> anyhow::Result<T>
where
    T: Serialize + for<'de> Deserialize<'de>,
{
    let mut value = serde_json::to_value(base)?;
    let serde_json::Value::Object(overlay_map) = overlay else {
        anyhow::bail!("config section must be a JSON object");
    };
    if let serde_json::Value::Object(base_map) = &mut value {
        for (key, entry) in overlay_map {
            base_map.insert(key, entry);
        }
    }
    Ok(serde_json::from_value(value)?)
}
