use crate::gradient::Color;
use anyhow::{anyhow, Result};
use std::{path::PathBuf, str::FromStr};

pub const DEFAULT_SIZES: [u32; 3] = [16, 48, 128];
pub const DEFAULT_LABEL: &str = "LLM";
pub const GRADIENT_START: Color = Color::new(102, 126, 234);
pub const GRADIENT_END: Color = Color::new(118, 75, 162);
pub const TEXT_COLOR: Color = Color::new(255, 255, 255);

/// Largest icon edge accepted, keeps the RGB buffer around 48 MiB.
pub const MAX_ICON_SIZE: u32 = 4096;

/// Font files probed in order before falling back to the built-in font.
pub const DEFAULT_FONT_CANDIDATES: [&str; 2] = [
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/System/Library/Fonts/Helvetica.ttc",
];

/// Everything that shapes a generation run.
///
/// `IconConfig::default()` reproduces the stock icon set: `icon16.png`,
/// `icon48.png` and `icon128.png` written to the current directory.
#[derive(Debug, Clone)]
pub struct IconConfig {
    pub sizes: Vec<u32>,
    pub output: PathBuf,
    pub label: String,
    pub start_color: Color,
    pub end_color: Color,
    pub text_color: Color,
    pub font_candidates: Vec<PathBuf>,
}

impl Default for IconConfig {
    fn default() -> Self {
        Self {
            sizes: DEFAULT_SIZES.to_vec(),
            output: PathBuf::from("."),
            label: DEFAULT_LABEL.to_string(),
            start_color: GRADIENT_START,
            end_color: GRADIENT_END,
            text_color: TEXT_COLOR,
            font_candidates: DEFAULT_FONT_CANDIDATES
                .iter()
                .map(PathBuf::from)
                .collect(),
        }
    }
}

impl IconConfig {
    /// Reject configurations that cannot produce an image.
    pub fn validate(&self) -> Result<()> {
        if self.sizes.is_empty() {
            anyhow::bail!("At least one icon size is required");
        }

        if let Some(size) = self.sizes.iter().find(|&&size| size == 0) {
            anyhow::bail!("Icon size must be positive, got {size}");
        }

        if let Some(size) = self.sizes.iter().find(|&&size| size > MAX_ICON_SIZE) {
            anyhow::bail!("Icon size {size} exceeds the maximum of {MAX_ICON_SIZE}");
        }

        Ok(())
    }
}

/// Parse any CSS color notation (`#667eea`, `rgb(102, 126, 234)`, `white`, ...).
pub fn parse_css_color(value: &str) -> Result<Color> {
    let color = css_color::Srgb::from_str(value)
        .map_err(|_| anyhow!("Invalid CSS color: {value}"))?;

    Ok(Color::new(
        (color.red * 255.).round() as u8,
        (color.green * 255.).round() as u8,
        (color.blue * 255.).round() as u8,
    ))
}
