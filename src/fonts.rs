//! Font roles used by the diagram and their resolution against installed fonts.
//!
//! The preferred family is looked up once. When it is not installed every role
//! switches to the built-in font, a DejaVu Sans face compiled into the binary
//! and registered with both the measuring and the rasterising font databases.

use crate::config::FontConfig;
use crate::text::{self, TextBlock};
use crate::text_metrics;
use serde::Serialize;

pub const BUILTIN_FAMILY: &str = "DejaVu Sans";

/// The built-in face. Generic `sans-serif` and `serif` lookups resolve to it.
pub static BUILTIN_FONT_DATA: &[u8] = include_bytes!("../assets/fonts/DejaVuSans.ttf");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FontSource {
    System,
    Builtin,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Font {
    pub family: String,
    pub size: f32,
    pub source: FontSource,
}

impl Font {
    pub fn system(family: &str, size: f32) -> Self {
        Self {
            family: family.to_string(),
            size,
            source: FontSource::System,
        }
    }

    pub fn builtin(size: f32) -> Self {
        Self {
            family: BUILTIN_FAMILY.to_string(),
            size,
            source: FontSource::Builtin,
        }
    }

    /// Lays out `text` in this font; see [`text::measure_block`].
    pub fn measure(&self, text: &str) -> TextBlock {
        text::measure_block(text, self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FontSet {
    pub title: Font,
    pub header: Font,
    pub normal: Font,
    pub small: Font,
}

impl FontSet {
    /// Resolves all four roles from the preferred family, falling back to the
    /// built-in font as a whole when that family is not installed.
    pub fn resolve(config: &FontConfig) -> Self {
        if text_metrics::has_family(&config.family) {
            tracing::debug!(family = %config.family, "using system font");
            Self::from_fn(config, |size| Font::system(&config.family, size))
        } else {
            tracing::debug!(
                family = %config.family,
                "preferred font not installed, using built-in font"
            );
            Self::builtin(config)
        }
    }

    pub fn builtin(config: &FontConfig) -> Self {
        Self::from_fn(config, Font::builtin)
    }

    fn from_fn(config: &FontConfig, make: impl Fn(f32) -> Font) -> Self {
        Self {
            title: make(config.title_size),
            header: make(config.header_size),
            normal: make(config.normal_size),
            small: make(config.small_size),
        }
    }

    pub fn roles(&self) -> [&Font; 4] {
        [&self.title, &self.header, &self.normal, &self.small]
    }

    pub fn is_builtin(&self) -> bool {
        self.roles()
            .iter()
            .all(|font| font.source == FontSource::Builtin)
    }
}
