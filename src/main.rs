use anyhow::Result;
use clap::Parser;
use llm_icon_gen::{
    config::{parse_css_color, IconConfig},
    generate_icons,
};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[clap(
    name = "llm-icon-gen",
    about = "Generate square gradient PNG icons with a centered text label"
)]
struct Args {
    /// Output directory.
    #[clap(short, long, value_name = "DIR", default_value = ".")]
    output: PathBuf,

    /// Icon sizes to generate, each written as icon<SIZE>.png.
    #[clap(
        short,
        long,
        value_delimiter = ',',
        value_name = "SIZES",
        default_value = "16,48,128"
    )]
    sizes: Vec<u32>,

    /// Label drawn in the middle of every icon.
    #[clap(short, long, default_value = "LLM")]
    label: String,

    /// Font file to try for the label. Repeat to build a fallback list;
    /// replaces the default candidates.
    #[clap(long = "font", value_name = "PATH")]
    fonts: Vec<PathBuf>,

    /// Gradient color at the top row (CSS color format)
    #[clap(long)]
    start_color: Option<String>,

    /// Gradient color approached at the bottom row (CSS color format)
    #[clap(long)]
    end_color: Option<String>,

    /// Label color (CSS color format)
    #[clap(long)]
    text_color: Option<String>,
}

impl Args {
    fn into_config(self) -> Result<IconConfig> {
        let mut config = IconConfig {
            sizes: self.sizes,
            output: self.output,
            label: self.label,
            ..IconConfig::default()
        };

        if !self.fonts.is_empty() {
            config.font_candidates = self.fonts;
        }
        if let Some(color) = &self.start_color {
            config.start_color = parse_css_color(color)?;
        }
        if let Some(color) = &self.end_color {
            config.end_color = parse_css_color(color)?;
        }
        if let Some(color) = &self.text_color {
            config.text_color = parse_css_color(color)?;
        }

        Ok(config)
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = Args::parse().into_config()?;
    generate_icons(&config)?;

    Ok(())
}
