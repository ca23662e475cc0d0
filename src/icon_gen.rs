use crate::{
    config::IconConfig,
    font::{LabelFont, TextBox},
    gradient::fill_vertical_gradient,
};
use anyhow::{Context, Result};
use image::{
    codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder},
    ColorType, ImageBuffer, ImageEncoder, RgbImage,
};
use std::{
    fs::{create_dir_all, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

/// Generate every configured icon size and write it to the output directory.
///
/// Returns the written paths in the order of `config.sizes`. The first write
/// error aborts the run; files already written are left in place.
pub fn generate_icons(config: &IconConfig) -> Result<Vec<PathBuf>> {
    config.validate()?;

    // Ensure the output directory exists
    create_dir_all(&config.output).context("Can't create output directory")?;

    let mut written = Vec::with_capacity(config.sizes.len());
    for &size in &config.sizes {
        let icon = create_icon_with(size, config);
        let filename = icon_filename(size);
        let output_path = config.output.join(&filename);

        save_png(&icon, &output_path)?;
        println!("Created {filename} ({size}x{size})");
        written.push(output_path);
    }

    // No blank line before the summary: one line per icon, then this one.
    println!("Icon generation complete!");
    Ok(written)
}

/// Render a `size`x`size` icon with the stock colors, label and fonts.
pub fn create_icon(size: u32) -> RgbImage {
    create_icon_with(size, &IconConfig::default())
}

/// Render a `size`x`size` icon: a vertical gradient with the label centered on top.
pub fn create_icon_with(size: u32, config: &IconConfig) -> RgbImage {
    let mut img = ImageBuffer::from_pixel(size, size, config.start_color.to_rgb());
    fill_vertical_gradient(&mut img, config.start_color, config.end_color);

    let font = LabelFont::resolve(&config.font_candidates, font_size_for(size) as f32);
    let bbox = font.text_bbox(&config.label);
    let (x, y) = label_position(size, bbox);

    log::debug!("Drawing {:?} at ({x}, {y}) in {size}px icon with {font:?}", config.label);
    font.draw_text(&mut img, &config.label, x, y, config.text_color);

    img
}

/// Em size of the label font for an icon of `size` pixels.
pub fn font_size_for(size: u32) -> u32 {
    (size / 3).max(12)
}

/// Top-left draw position that centers `bbox` in a square of `size` pixels.
///
/// Uses floor division, so text wider than the icon gets a negative offset.
pub fn label_position(size: u32, bbox: TextBox) -> (i32, i32) {
    let size = size as i32;
    (
        (size - bbox.width()).div_euclid(2),
        (size - bbox.height()).div_euclid(2),
    )
}

pub fn icon_filename(size: u32) -> String {
    format!("icon{size}.png")
}

/// Write an RGB image as PNG, replacing any existing file.
pub fn save_png(image: &RgbImage, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create PNG file: {}", path.display()))?;
    let mut out_file = BufWriter::new(file);

    write_png(image.as_raw(), &mut out_file, image.width(), image.height())
        .with_context(|| format!("Failed to write PNG: {}", path.display()))?;
    out_file.flush()?;

    Ok(())
}

// Encode RGB image data as PNG with compression
fn write_png<W: Write>(image_data: &[u8], w: W, width: u32, height: u32) -> Result<()> {
    let encoder = PngEncoder::new_with_quality(w, CompressionType::Best, PngFilterType::Adaptive);
    encoder.write_image(image_data, width, height, ColorType::Rgb8)?;
    Ok(())
}
