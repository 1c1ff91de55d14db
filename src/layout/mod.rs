mod fishbone;
mod text;

use crate::config::LayoutConfig;
use crate::ir::FishboneTree;
use crate::theme::Theme;

pub(crate) use text::tier_index;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Horizontal text alignment relative to the label position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineStyle {
    pub color: String,
    pub width: f32,
}

/// Filled marker drawn behind a label (head box, classification marker).
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerBox {
    pub fill: String,
    pub width: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LabelStyle {
    pub color: String,
    pub font_size: f32,
    pub bold: bool,
    pub marker: Option<MarkerBox>,
}

/// One positioned drawing instruction. The ordered primitive sequence is the
/// whole contract between layout and rendering: a renderer draws these in
/// order and makes no further placement decisions.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Line {
        from: Point,
        to: Point,
        style: LineStyle,
    },
    Label {
        position: Point,
        text: String,
        style: LabelStyle,
        anchor: Anchor,
    },
    /// Arrow-tipped connector from a cause attachment point to its label.
    Connector {
        from: Point,
        to: Point,
        style: LineStyle,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct FishboneLayout {
    pub width: f32,
    pub height: f32,
    pub primitives: Vec<Primitive>,
}

/// Computes the full fishbone layout for a tree and title.
///
/// Pure and deterministic: identical `(tree, title, theme, config)` always
/// produce an identical primitive sequence, and the function touches no
/// shared state, so concurrent calls are independent. An empty tree is
/// valid and yields just the spine and head.
pub fn compute_layout(
    tree: &FishboneTree,
    title: &str,
    theme: &Theme,
    config: &LayoutConfig,
) -> FishboneLayout {
    fishbone::compute_fishbone_layout(tree, title, theme, config)
}
