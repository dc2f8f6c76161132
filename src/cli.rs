use crate::canvas::Canvas;
use crate::config::{Config, load_config};
use crate::diagram::render_fixed_diagram;
use crate::fonts::FontSet;
use crate::layout_dump::write_layout_dump;
use crate::logging::{Verbosity, init_logging};
use crate::render::{render_svg, save, write_output_svg};
use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "archdiagram",
    version,
    about = "Render the Insurance Onboarding Platform architecture diagram"
)]
pub struct Args {
    /// Output file. Defaults to the fixed diagram path.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "png")]
    pub output_format: OutputFormat,

    /// Config JSON file (canvas size, fonts, themeVariables, output)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Preferred font family
    #[arg(short = 'f', long = "font")]
    pub font: Option<String>,

    /// Write the drawn primitives as JSON
    #[arg(long = "dumpLayout")]
    pub dump_layout: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only report errors
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Svg,
}

impl Args {
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            return Verbosity::Quiet;
        }
        match self.verbose {
            0 => Verbosity::Normal,
            1 => Verbosity::Verbose,
            _ => Verbosity::Trace,
        }
    }

    /// Loads the config file, if any, and applies the command-line overrides.
    pub fn resolve_config(&self) -> Result<Config> {
        let mut config = load_config(self.config.as_deref())?;
        if let Some(font) = &self.font {
            config.fonts.family = font.clone();
        }
        if let Some(output) = &self.output {
            config.output = output.clone();
        }
        Ok(config)
    }
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbosity());

    let config = args.resolve_config()?;
    let fonts = FontSet::resolve(&config.fonts);
    let mut canvas = Canvas::new(config.canvas.width, config.canvas.height, config.theme.clone());
    render_fixed_diagram(&mut canvas, &fonts);

    if let Some(path) = args.dump_layout.as_deref() {
        write_layout_dump(path, &canvas, &fonts)?;
    }

    match args.output_format {
        OutputFormat::Png => save(&canvas, &config.output)?,
        OutputFormat::Svg => write_output_svg(&render_svg(&canvas), &config.output)?,
    }

    println!("Architecture diagram saved to: {}", config.output.display());
    Ok(())
}
