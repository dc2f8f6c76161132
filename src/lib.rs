pub mod canvas;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod diagram;
pub mod error;
pub mod fonts;
pub mod layout_dump;
pub mod logging;
pub mod render;
pub mod text;
pub mod text_metrics;
pub mod theme;

pub use canvas::{Canvas, Point, Primitive, Rect};
#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, load_config};
pub use diagram::render_fixed_diagram;
pub use error::RenderError;
pub use fonts::{Font, FontSet};
pub use render::{render_svg, save};
pub use theme::Theme;
