use crate::layout::{Anchor, FishboneLayout, Primitive};
use crate::theme::Theme;
use anyhow::Result;
use std::path::Path;

#[cfg(feature = "png")]
use crate::config::RenderConfig;

/// Serializes a primitive sequence to SVG markup. Rendering makes no layout
/// decisions: every coordinate comes from the primitives, and the PNG export
/// rasterizes this exact markup, so both formats always agree.
pub fn render_svg(layout: &FishboneLayout, theme: &Theme) -> String {
    let mut svg = String::new();
    let width = layout.width;
    let height = layout.height;

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
    ));

    svg.push_str("<defs>");
    svg.push_str(&format!(
        "<marker id=\"arrow\" viewBox=\"0 0 10 10\" refX=\"10\" refY=\"5\" markerWidth=\"6\" markerHeight=\"6\" orient=\"auto-start-reverse\"><path d=\"M 0 0 L 10 5 L 0 10 z\" fill=\"{}\"/></marker>",
        theme.spine_color
    ));
    if let Some((top, bottom)) = theme.background.gradient() {
        svg.push_str(&format!(
            "<linearGradient id=\"bg\" x1=\"0\" y1=\"0\" x2=\"0\" y2=\"1\"><stop offset=\"0\" stop-color=\"{top}\"/><stop offset=\"1\" stop-color=\"{bottom}\"/></linearGradient>",
        ));
    }
    svg.push_str("</defs>");

    if theme.background.gradient().is_some() {
        svg.push_str("<rect width=\"100%\" height=\"100%\" fill=\"url(#bg)\"/>");
    } else if let Some(fill) = theme.background.fill() {
        svg.push_str(&format!(
            "<rect width=\"100%\" height=\"100%\" fill=\"{fill}\"/>"
        ));
    }

    for primitive in &layout.primitives {
        match primitive {
            Primitive::Line { from, to, style } => {
                svg.push_str(&format!(
                    "<line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" stroke=\"{}\" stroke-width=\"{}\" stroke-linecap=\"round\"/>",
                    from.x, from.y, to.x, to.y, style.color, style.width
                ));
            }
            Primitive::Connector { from, to, style } => {
                svg.push_str(&format!(
                    "<line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" stroke=\"{}\" stroke-width=\"{}\" marker-end=\"url(#arrow)\"/>",
                    from.x, from.y, to.x, to.y, style.color, style.width
                ));
            }
            Primitive::Label {
                position,
                text,
                style,
                anchor,
            } => {
                if let Some(marker) = &style.marker {
                    let box_height = style.font_size * 2.4;
                    svg.push_str(&format!(
                        "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" rx=\"8\" ry=\"8\" fill=\"{}\"/>",
                        position.x - marker.width / 2.0,
                        position.y - box_height / 2.0,
                        marker.width,
                        box_height,
                        marker.fill
                    ));
                }
                let text_anchor = match anchor {
                    Anchor::Start => "start",
                    Anchor::Middle => "middle",
                    Anchor::End => "end",
                };
                let weight = if style.bold { " font-weight=\"bold\"" } else { "" };
                svg.push_str(&format!(
                    "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"{text_anchor}\" dominant-baseline=\"middle\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\"{weight}>{}</text>",
                    position.x,
                    position.y,
                    theme.font_family,
                    style.font_size,
                    style.color,
                    escape_xml(text)
                ));
            }
        }
    }

    svg.push_str("</svg>");
    svg
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

/// Rasterizes the SVG at the configured scale. The pixmap starts fully
/// transparent, so a theme without a background fill exports with alpha.
#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, render_cfg: &RenderConfig) -> Result<()> {
    let opt = usvg::Options::default();
    let tree = usvg::Tree::from_str(svg, &opt)?;

    let scale = render_cfg.scale.max(0.1);
    let size = tree.size();
    let pixel_width = (size.width() * scale).ceil() as u32;
    let pixel_height = (size.height() * scale).ceil() as u32;
    let mut pixmap = resvg::tiny_skia::Pixmap::new(pixel_width.max(1), pixel_height.max(1))
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let transform = resvg::tiny_skia::Transform::from_scale(scale, scale);
    resvg::render(&tree, transform, &mut pixmap.as_mut());
    pixmap.save_png(output)?;
    Ok(())
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
