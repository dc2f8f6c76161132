use crate::canvas::{Canvas, Point, Primitive, Rect};
use crate::error::RenderError;
use crate::fonts::Font;
use crate::text::TextBlock;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

#[cfg(feature = "png")]
use crate::fonts::{BUILTIN_FAMILY, BUILTIN_FONT_DATA};
#[cfg(feature = "png")]
use once_cell::sync::Lazy;
#[cfg(feature = "png")]
use std::sync::Arc;

#[cfg(feature = "png")]
static SVG_FONTS: Lazy<Arc<usvg::fontdb::Database>> = Lazy::new(|| {
    let mut db = usvg::fontdb::Database::new();
    db.load_font_data(BUILTIN_FONT_DATA.to_vec());
    db.set_sans_serif_family(BUILTIN_FAMILY);
    db.set_serif_family(BUILTIN_FAMILY);
    db.load_system_fonts();
    tracing::debug!(faces = db.len(), "loaded system fonts for rasterising");
    Arc::new(db)
});

pub fn render_svg(canvas: &Canvas) -> String {
    let mut svg = String::new();
    let width = canvas.width();
    let height = canvas.height();

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
    ));
    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        canvas.background()
    ));

    for primitive in canvas.primitives() {
        match primitive {
            Primitive::Rect {
                rect,
                fill,
                stroke,
                stroke_width,
            } => {
                svg.push_str(&format!(
                    "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"{}\"/>",
                    rect.x, rect.y, rect.width, rect.height, fill, stroke, stroke_width
                ));
            }
            Primitive::Line {
                from,
                to,
                stroke,
                stroke_width,
            } => {
                svg.push_str(&format!(
                    "<line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" stroke=\"{}\" stroke-width=\"{}\"/>",
                    from.x, from.y, to.x, to.y, stroke, stroke_width
                ));
            }
            Primitive::Polygon { points, fill } => {
                svg.push_str(&format!(
                    "<polygon points=\"{}\" fill=\"{fill}\" stroke=\"{fill}\" stroke-width=\"1\"/>",
                    points_attr(points)
                ));
            }
            Primitive::Text {
                bounds,
                block,
                font,
                fill,
                centered,
            } => {
                svg.push_str(&text_block_svg(bounds, block, font, fill, *centered));
            }
        }
    }

    svg.push_str("</svg>");
    svg
}

fn points_attr(points: &[Point]) -> String {
    points
        .iter()
        .map(|p| format!("{:.2},{:.2}", p.x, p.y))
        .collect::<Vec<_>>()
        .join(" ")
}

fn text_block_svg(bounds: &Rect, block: &TextBlock, font: &Font, fill: &str, centered: bool) -> String {
    let (x, anchor) = if centered {
        (bounds.x + bounds.width / 2.0, "middle")
    } else {
        (bounds.x, "start")
    };
    let mut text = String::new();
    text.push_str(&format!(
        "<text text-anchor=\"{anchor}\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">",
        escape_xml(&font.family),
        font.size,
        fill
    ));
    for (idx, line) in block.lines.iter().enumerate() {
        let baseline = bounds.y + block.ascent + idx as f32 * block.line_advance;
        text.push_str(&format!(
            "<tspan x=\"{x:.2}\" y=\"{baseline:.2}\">{}</tspan>",
            escape_xml(line)
        ));
    }
    text.push_str("</text>");
    text
}

pub fn write_output_svg(svg: &str, output: &Path) -> Result<(), RenderError> {
    write_file(output, svg.as_bytes())
}

/// Rasterises the canvas onto a pixmap of exactly the canvas size.
#[cfg(feature = "png")]
pub fn rasterize(canvas: &Canvas) -> Result<resvg::tiny_skia::Pixmap, RenderError> {
    let svg = render_svg(canvas);
    let mut opt = usvg::Options::default();
    opt.font_family = BUILTIN_FAMILY.to_string();
    opt.fontdb = SVG_FONTS.clone();

    let tree = usvg::Tree::from_str(&svg, &opt)?;
    let (width, height) = (canvas.width(), canvas.height());
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or(RenderError::Surface { width, height })?;

    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap.as_mut());
    Ok(pixmap)
}

#[cfg(feature = "png")]
pub fn write_output_png(canvas: &Canvas, output: &Path) -> Result<(), RenderError> {
    let pixmap = rasterize(canvas)?;
    let png = pixmap
        .encode_png()
        .map_err(|err| RenderError::Encode(err.to_string()))?;
    write_file(output, &png)
}

#[cfg(not(feature = "png"))]
pub fn write_output_png(_canvas: &Canvas, _output: &Path) -> Result<(), RenderError> {
    Err(RenderError::PngUnsupported)
}

/// Persists the canvas as a PNG image at `path`.
///
/// The parent directory must already exist.
pub fn save(canvas: &Canvas, path: &Path) -> Result<(), RenderError> {
    write_output_png(canvas, path)?;
    tracing::debug!(path = %path.display(), "saved diagram");
    Ok(())
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<(), RenderError> {
    let file = File::create(path).map_err(|err| RenderError::io(path, err))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(bytes)
        .map_err(|err| RenderError::io(path, err))?;
    writer.flush().map_err(|err| RenderError::io(path, err))
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
