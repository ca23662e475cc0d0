use image::{Rgb, RgbImage};

/// An 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Color {
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    pub fn to_rgb(self) -> Rgb<u8> {
        Rgb([self.red, self.green, self.blue])
    }
}

/// Interpolate a single channel for `row` out of `rows`.
///
/// The offset is computed in floating point and the sum is truncated, so the
/// end value is only approached, never reached, for the last row.
fn lerp_channel(start: u8, end: u8, row: u32, rows: u32) -> u8 {
    let delta = i64::from(end) - i64::from(start);
    let offset = (delta * i64::from(row)) as f64 / f64::from(rows);
    (f64::from(start) + offset) as u8
}

/// Color of pixel row `row` in a gradient that spans `rows` rows.
pub fn row_color(start: Color, end: Color, row: u32, rows: u32) -> Color {
    if rows == 0 {
        return start;
    }

    Color::new(
        lerp_channel(start.red, end.red, row, rows),
        lerp_channel(start.green, end.green, row, rows),
        lerp_channel(start.blue, end.blue, row, rows),
    )
}

/// Paint a top-to-bottom gradient over the whole image, one row at a time.
pub fn fill_vertical_gradient(img: &mut RgbImage, start: Color, end: Color) {
    let height = img.height();

    for y in 0..height {
        let color = row_color(start, end, y, height).to_rgb();
        for x in 0..img.width() {
            img.put_pixel(x, y, color);
        }
    }
}
