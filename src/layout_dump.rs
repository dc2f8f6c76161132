use crate::canvas::{Canvas, Primitive};
use crate::fonts::FontSet;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct LayoutDump<'a> {
    pub width: u32,
    pub height: u32,
    pub background: &'a str,
    pub builtin_font: bool,
    pub fonts: &'a FontSet,
    pub primitives: &'a [Primitive],
}

impl<'a> LayoutDump<'a> {
    pub fn from_canvas(canvas: &'a Canvas, fonts: &'a FontSet) -> Self {
        Self {
            width: canvas.width(),
            height: canvas.height(),
            background: canvas.background(),
            builtin_font: fonts.is_builtin(),
            fonts,
            primitives: canvas.primitives(),
        }
    }
}

pub fn write_layout_dump(path: &Path, canvas: &Canvas, fonts: &FontSet) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &LayoutDump::from_canvas(canvas, fonts))?;
    Ok(())
}
