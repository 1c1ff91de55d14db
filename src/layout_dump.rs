use crate::layout::{Anchor, FishboneLayout, Primitive};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// JSON snapshot of a computed primitive sequence. Useful for diffing a
/// regenerated diagram against a previous run without comparing pixels.
#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub width: f32,
    pub height: f32,
    pub primitives: Vec<PrimitiveDump>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PrimitiveDump {
    Line {
        from: [f32; 2],
        to: [f32; 2],
        color: String,
        width: f32,
    },
    Label {
        position: [f32; 2],
        text: String,
        color: String,
        font_size: f32,
        anchor: String,
        marker_fill: Option<String>,
        marker_width: Option<f32>,
    },
    Connector {
        from: [f32; 2],
        to: [f32; 2],
        color: String,
        width: f32,
    },
}

impl LayoutDump {
    pub fn from_layout(layout: &FishboneLayout) -> Self {
        let primitives = layout
            .primitives
            .iter()
            .map(|primitive| match primitive {
                Primitive::Line { from, to, style } => PrimitiveDump::Line {
                    from: [from.x, from.y],
                    to: [to.x, to.y],
                    color: style.color.clone(),
                    width: style.width,
                },
                Primitive::Connector { from, to, style } => PrimitiveDump::Connector {
                    from: [from.x, from.y],
                    to: [to.x, to.y],
                    color: style.color.clone(),
                    width: style.width,
                },
                Primitive::Label {
                    position,
                    text,
                    style,
                    anchor,
                } => PrimitiveDump::Label {
                    position: [position.x, position.y],
                    text: text.clone(),
                    color: style.color.clone(),
                    font_size: style.font_size,
                    anchor: match anchor {
                        Anchor::Start => "start".to_string(),
                        Anchor::Middle => "middle".to_string(),
                        Anchor::End => "end".to_string(),
                    },
                    marker_fill: style.marker.as_ref().map(|m| m.fill.clone()),
                    marker_width: style.marker.as_ref().map(|m| m.width),
                },
            })
            .collect();

        LayoutDump {
            width: layout.width,
            height: layout.height,
            primitives,
        }
    }
}

pub fn write_layout_dump(path: &Path, layout: &FishboneLayout) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = LayoutDump::from_layout(layout);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}
