use crate::fonts::{BUILTIN_FAMILY, BUILTIN_FONT_DATA};
use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Mutex;
use ttf_parser::Face;

static TEXT_MEASURER: Lazy<Mutex<TextMeasurer>> = Lazy::new(|| Mutex::new(TextMeasurer::new()));

/// Ascent and descent of a face scaled to a font size, both positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerticalMetrics {
    pub ascent: f32,
    pub descent: f32,
}

impl VerticalMetrics {
    pub fn line_height(&self) -> f32 {
        self.ascent + self.descent
    }
}

/// Whether any installed face matches the family list.
pub fn has_family(font_family: &str) -> bool {
    let Ok(mut guard) = TEXT_MEASURER.lock() else {
        return false;
    };
    guard.face(font_family).is_some()
}

pub fn measure_text_width(text: &str, font_size: f32, font_family: &str) -> Option<f32> {
    if text.is_empty() || font_size <= 0.0 {
        return Some(0.0);
    }
    let mut guard = TEXT_MEASURER.lock().ok()?;
    guard
        .face(font_family)?
        .measure_width(&text.replace('\t', "    "), font_size)
}

pub fn vertical_metrics(font_size: f32, font_family: &str) -> Option<VerticalMetrics> {
    if font_size <= 0.0 {
        return None;
    }
    let mut guard = TEXT_MEASURER.lock().ok()?;
    let face = guard.face(font_family)?;
    let scale = font_size / face.units_per_em as f32;
    Some(VerticalMetrics {
        ascent: face.ascender as f32 * scale,
        descent: -(face.descender as f32) * scale,
    })
}

struct TextMeasurer {
    db: Database,
    loaded_system_fonts: bool,
    cache: HashMap<String, Option<FontFace>>,
}

impl TextMeasurer {
    fn new() -> Self {
        let mut db = Database::new();
        db.load_font_data(BUILTIN_FONT_DATA.to_vec());
        db.set_sans_serif_family(BUILTIN_FAMILY);
        db.set_serif_family(BUILTIN_FAMILY);
        Self {
            db,
            loaded_system_fonts: false,
            cache: HashMap::new(),
        }
    }

    fn face(&mut self, font_family: &str) -> Option<&mut FontFace> {
        let key = normalize_family_key(font_family);
        if !self.cache.contains_key(&key) {
            let face = self.load_face(&key);
            if face.is_none() {
                tracing::debug!(family = %key, "no system face matches family");
            }
            self.cache.insert(key.clone(), face);
        }
        self.cache.get_mut(&key).and_then(|face| face.as_mut())
    }

    fn load_face(&mut self, font_family: &str) -> Option<FontFace> {
        let mut names: Vec<&str> = Vec::new();
        let mut generics: Vec<Option<Family<'_>>> = Vec::new();
        for part in font_family.split(',') {
            let raw = part.trim().trim_matches('"').trim_matches('\'');
            if raw.is_empty() {
                continue;
            }
            let generic = match raw.to_ascii_lowercase().as_str() {
                "serif" => Some(Family::Serif),
                "sans-serif" | "system-ui" => Some(Family::SansSerif),
                "monospace" => Some(Family::Monospace),
                "cursive" => Some(Family::Cursive),
                "fantasy" => Some(Family::Fantasy),
                _ => None,
            };
            if generic.is_none() {
                names.push(raw);
            }
            generics.push(generic);
        }

        let mut named = names.into_iter();
        let families: Vec<Family<'_>> = generics
            .into_iter()
            .filter_map(|generic| generic.or_else(|| named.next().map(|name| Family::Name(name))))
            .collect();
        if families.is_empty() {
            return None;
        }

        if !self.loaded_system_fonts {
            self.db.load_system_fonts();
            self.loaded_system_fonts = true;
            tracing::debug!(faces = self.db.len(), "loaded system fonts");
        }

        let query = Query {
            families: &families,
            weight: Weight::NORMAL,
            stretch: Stretch::Normal,
            style: Style::Normal,
        };
        let id = self.db.query(&query)?;
        self.db
            .with_face_data(id, |data, index| FontFace::new(data.to_vec(), index))
            .flatten()
    }
}

struct FontFace {
    data: Vec<u8>,
    index: u32,
    units_per_em: u16,
    ascender: i16,
    descender: i16,
    ascii_advances: [u16; 128],
    advance_cache: HashMap<char, Option<u16>>,
}

impl FontFace {
    fn new(data: Vec<u8>, index: u32) -> Option<Self> {
        let face = Face::parse(&data, index).ok()?;
        let mut ascii_advances = [0u16; 128];
        for byte in 0u8..=127 {
            if let Some(glyph_id) = face.glyph_index(byte as char) {
                ascii_advances[byte as usize] = face.glyph_hor_advance(glyph_id).unwrap_or(0);
            }
        }
        let units_per_em = face.units_per_em().max(1);
        let ascender = face.ascender();
        let descender = face.descender();
        Some(Self {
            data,
            index,
            units_per_em,
            ascender,
            descender,
            ascii_advances,
            advance_cache: HashMap::new(),
        })
    }

    fn measure_width(&mut self, text: &str, font_size: f32) -> Option<f32> {
        let scale = font_size / self.units_per_em as f32;
        let fallback = font_size * 0.56;

        if text.is_ascii() {
            let mut width = 0.0f32;
            for byte in text.as_bytes() {
                if *byte == b'\n' {
                    continue;
                }
                let advance = self.ascii_advances[*byte as usize];
                if advance == 0 {
                    width += fallback;
                } else {
                    width += advance as f32 * scale;
                }
            }
            return Some(width.max(0.0));
        }

        let face = Face::parse(&self.data, self.index).ok()?;
        let mut width = 0.0f32;
        for ch in text.chars() {
            if ch == '\n' {
                continue;
            }
            let advance = *self.advance_cache.entry(ch).or_insert_with(|| {
                face.glyph_index(ch)
                    .and_then(|glyph_id| face.glyph_hor_advance(glyph_id))
            });
            match advance {
                Some(advance) => width += advance as f32 * scale,
                None => width += fallback,
            }
        }

        Some(width.max(0.0))
    }
}

fn normalize_family_key(font_family: &str) -> String {
    let trimmed = font_family.trim();
    if trimmed.is_empty() {
        "sans-serif".to_string()
    } else {
        trimmed.to_string()
    }
}
