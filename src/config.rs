use crate::theme::Theme;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Where the diagram lands when no output override is given.
pub const DEFAULT_OUTPUT_PATH: &str = "/tmp/agentic-ai-onboarding/ARCHITECTURE_DIAGRAM.png";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 1600,
            height: 1200,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FontConfig {
    pub family: String,
    pub title_size: f32,
    pub header_size: f32,
    pub normal_size: f32,
    pub small_size: f32,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            family: "Arial".to_string(),
            title_size: 28.0,
            header_size: 18.0,
            normal_size: 14.0,
            small_size: 12.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub canvas: CanvasConfig,
    pub fonts: FontConfig,
    pub theme: Theme,
    pub output: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            canvas: CanvasConfig::default(),
            fonts: FontConfig::default(),
            theme: Theme::onboarding(),
            output: PathBuf::from(DEFAULT_OUTPUT_PATH),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    background: Option<String>,
    text_color: Option<String>,
    border_color: Option<String>,
    border_width: Option<f32>,
    line_color: Option<String>,
    line_width: Option<f32>,
    frontend: Option<String>,
    api: Option<String>,
    streaming: Option<String>,
    storage: Option<String>,
    external: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FontSizes {
    title: Option<f32>,
    header: Option<f32>,
    normal: Option<f32>,
    small: Option<f32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    width: Option<u32>,
    height: Option<u32>,
    font_family: Option<String>,
    font_sizes: Option<FontSizes>,
    theme_variables: Option<ThemeVariables>,
    output: Option<PathBuf>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let Some(path) = path else {
        return Ok(config);
    };

    let contents = std::fs::read_to_string(path)?;
    let parsed: ConfigFile = serde_json::from_str(&contents)?;
    apply_config_file(&mut config, parsed)?;
    tracing::debug!(path = %path.display(), "loaded config file");
    Ok(config)
}

fn apply_config_file(config: &mut Config, parsed: ConfigFile) -> anyhow::Result<()> {
    if let Some(width) = parsed.width {
        config.canvas.width = width;
    }
    if let Some(height) = parsed.height {
        config.canvas.height = height;
    }
    if config.canvas.width == 0 || config.canvas.height == 0 {
        return Err(anyhow::anyhow!(
            "canvas size must be non-zero, got {}x{}",
            config.canvas.width,
            config.canvas.height
        ));
    }

    if let Some(family) = parsed.font_family {
        config.fonts.family = family;
    }
    if let Some(sizes) = parsed.font_sizes {
        if let Some(v) = sizes.title {
            config.fonts.title_size = v;
        }
        if let Some(v) = sizes.header {
            config.fonts.header_size = v;
        }
        if let Some(v) = sizes.normal {
            config.fonts.normal_size = v;
        }
        if let Some(v) = sizes.small {
            config.fonts.small_size = v;
        }
    }

    if let Some(vars) = parsed.theme_variables {
        if let Some(v) = vars.background {
            config.theme.background = v;
        }
        if let Some(v) = vars.text_color {
            config.theme.text_color = v;
        }
        if let Some(v) = vars.border_color {
            config.theme.border_color = v;
        }
        if let Some(v) = vars.border_width {
            config.theme.border_width = v;
        }
        if let Some(v) = vars.line_color {
            config.theme.line_color = v;
        }
        if let Some(v) = vars.line_width {
            config.theme.line_width = v;
        }
        if let Some(v) = vars.frontend {
            config.theme.frontend = v;
        }
        if let Some(v) = vars.api {
            config.theme.api = v;
        }
        if let Some(v) = vars.streaming {
            config.theme.streaming = v;
        }
        if let Some(v) = vars.storage {
            config.theme.storage = v;
        }
        if let Some(v) = vars.external {
            config.theme.external = v;
        }
    }

    if let Some(output) = parsed.output {
        config.output = output;
    }
    Ok(())
}
