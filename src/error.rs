use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[cfg(feature = "png")]
    #[error("failed to parse generated SVG: {0}")]
    Svg(#[from] usvg::Error),

    #[error("failed to allocate {width}x{height} surface")]
    Surface { width: u32, height: u32 },

    #[error("failed to encode PNG output: {0}")]
    Encode(String),

    #[error("PNG output requires the `png` feature")]
    PngUnsupported,
}

impl RenderError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
