use crate::fonts::Font;
use crate::text_metrics::{self, VerticalMetrics};
use serde::Serialize;

/// Extra gap between consecutive lines of a label.
pub const LINE_SPACING: f32 = 4.0;

// Used only when no face can be loaded for a family.
const FALLBACK_ASCENT: f32 = 0.905;
const FALLBACK_DESCENT: f32 = 0.212;

/// A measured label. `width` is the widest line; `height` spans from the top
/// of the first line to the bottom of the last.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextBlock {
    pub lines: Vec<String>,
    pub line_widths: Vec<f32>,
    pub width: f32,
    pub height: f32,
    pub ascent: f32,
    pub line_advance: f32,
}

impl TextBlock {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

pub fn measure_block(text: &str, font: &Font) -> TextBlock {
    let metrics = vertical_metrics(font);
    let line_height = metrics.line_height();
    let line_advance = line_height + LINE_SPACING;
    if text.is_empty() {
        return TextBlock {
            lines: Vec::new(),
            line_widths: Vec::new(),
            width: 0.0,
            height: 0.0,
            ascent: metrics.ascent,
            line_advance,
        };
    }

    let lines = split_lines(text);
    let line_widths: Vec<f32> = lines.iter().map(|line| text_width(line, font)).collect();
    let width = line_widths.iter().copied().fold(0.0, f32::max);
    let height = lines.len() as f32 * line_height + (lines.len() - 1) as f32 * LINE_SPACING;

    TextBlock {
        lines,
        line_widths,
        width,
        height,
        ascent: metrics.ascent,
        line_advance,
    }
}

pub(crate) fn split_lines(text: &str) -> Vec<String> {
    text.split('\n')
        .map(|line| line.trim_end_matches('\r').to_string())
        .collect()
}

/// Measures with the face that will be rasterised, so the built-in font is
/// measured from its embedded data like any installed one.
pub(crate) fn text_width(text: &str, font: &Font) -> f32 {
    text_metrics::measure_text_width(text, font.size, &font.family)
        .unwrap_or_else(|| fallback_text_width(text, font.size))
}

fn vertical_metrics(font: &Font) -> VerticalMetrics {
    text_metrics::vertical_metrics(font.size, &font.family).unwrap_or(VerticalMetrics {
        ascent: font.size * FALLBACK_ASCENT,
        descent: font.size * FALLBACK_DESCENT,
    })
}

fn fallback_text_width(text: &str, font_size: f32) -> f32 {
    text.chars().map(char_width_factor).sum::<f32>() * font_size
}

/// Approximate advance widths of a sans-serif face, in ems.
pub(crate) fn char_width_factor(ch: char) -> f32 {
    match ch {
        ' ' => 0.306,
        '\\' | '.' | ',' | ':' | ';' | '|' | '!' | '(' | ')' | '[' | ']' | '{' | '}' => 0.321,
        '-' => 0.333,
        'A' => 0.652,
        'B' => 0.648,
        'C' => 0.734,
        'D' => 0.723,
        'E' => 0.594,
        'F' => 0.575,
        'G' | 'H' => 0.742,
        'I' => 0.272,
        'J' => 0.557,
        'K' => 0.648,
        'L' => 0.559,
        'M' => 0.903,
        'N' => 0.763,
        'O' => 0.754,
        'P' => 0.623,
        'Q' => 0.755,
        'R' => 0.637,
        'S' => 0.633,
        'T' => 0.599,
        'U' => 0.746,
        'V' => 0.661,
        'W' => 0.958,
        'X' => 0.655,
        'Y' => 0.646,
        'Z' => 0.621,
        'a' => 0.550,
        'b' => 0.603,
        'c' => 0.547,
        'd' => 0.609,
        'e' => 0.570,
        'f' => 0.340,
        'g' | 'h' => 0.600,
        'i' => 0.235,
        'j' => 0.227,
        'k' => 0.522,
        'l' => 0.239,
        'm' => 0.867,
        'n' => 0.585,
        'o' => 0.574,
        'p' => 0.595,
        'q' => 0.585,
        'r' => 0.364,
        's' => 0.523,
        't' => 0.305,
        'u' => 0.585,
        'v' => 0.545,
        'w' => 0.811,
        'x' => 0.538,
        'y' => 0.556,
        'z' => 0.550,
        '0' => 0.613,
        '1' => 0.396,
        '2' => 0.609,
        '3' => 0.597,
        '4' => 0.614,
        '5' => 0.586,
        '6' => 0.608,
        '7' => 0.559,
        '8' => 0.611,
        '9' => 0.595,
        '@' | '#' | '%' | '&' => 0.946,
        '\u{2192}' => 1.0,
        _ => 0.568,
    }
}
