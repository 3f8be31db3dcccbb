use crate::font::{self, FontResolution};
use anyhow::{Context, Result};
use image::{
    codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder},
    ColorType, ImageEncoder, Rgb, RgbImage,
};
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

/// Gradient endpoint at the top row.
pub const GRADIENT_TOP: Rgb<u8> = Rgb([102, 126, 234]);
/// Gradient endpoint approached at the bottom row.
pub const GRADIENT_BOTTOM: Rgb<u8> = Rgb([118, 75, 162]);

/// Text drawn in the middle of every icon.
pub const LABEL: &str = "AI";

/// Alpha of the cursor accent, composited over the gradient. The buffer
/// itself stays opaque RGB; the alpha is honored by blending, not by
/// giving the file an alpha channel.
const ACCENT_ALPHA: u8 = 200;

/// The fixed extension icon set: pixel side and output file name.
pub const ICON_SIZES: [(u32, &str); 3] = [
    (16, "icon16.png"),
    (48, "icon48.png"),
    (128, "icon128.png"),
];

/// Render the whole icon set into `out_dir`, in order. The font is probed
/// once up front; a failed render aborts the remaining icons.
pub fn generate_icons(out_dir: &Path) -> Result<()> {
    let font = font::resolve();
    if font.is_builtin() {
        println!("Preferred font unavailable, using built-in glyphs");
    }

    for (size, filename) in ICON_SIZES {
        render_icon(size, &out_dir.join(filename), &font)?;
        println!("✓ Generated {filename}");
    }

    println!("All icons generated successfully!");
    Ok(())
}

/// Compose one icon and write it to `path` as PNG, overwriting any
/// existing file.
pub fn render_icon(size: u32, path: &Path, font: &FontResolution) -> Result<()> {
    let img = compose_icon(size, font)?;
    write_png(&img, path).with_context(|| format!("Failed to write {}", path.display()))
}

/// Build one icon in memory: gradient rows, centered label, cursor accent.
/// Deterministic for a given size and font resolution.
pub fn compose_icon(size: u32, font: &FontResolution) -> Result<RgbImage> {
    if size == 0 {
        anyhow::bail!("Icon size must be positive, got 0");
    }

    let mut img = RgbImage::new(size, size);
    paint_gradient(&mut img);
    font::draw_label_centered(&mut img, LABEL, font);
    paint_cursor_accent(&mut img);
    Ok(img)
}

/// Color of the vertical gradient at normalized position `ratio`
/// (0.0 at the top row). Channels truncate toward zero, so ratio 0.0 is
/// exactly `GRADIENT_TOP` and each channel moves monotonically.
pub fn gradient_at(ratio: f32) -> Rgb<u8> {
    let lerp = |start: u8, end: u8| (start as f32 + (end as f32 - start as f32) * ratio) as u8;
    Rgb([
        lerp(GRADIENT_TOP[0], GRADIENT_BOTTOM[0]),
        lerp(GRADIENT_TOP[1], GRADIENT_BOTTOM[1]),
        lerp(GRADIENT_TOP[2], GRADIENT_BOTTOM[2]),
    ])
}

fn paint_gradient(img: &mut RgbImage) {
    let size = img.height();
    for y in 0..size {
        let row_color = gradient_at(y as f32 / size as f32);
        for x in 0..img.width() {
            img.put_pixel(x, y, row_color);
        }
    }
}

/// Cursor accent geometry for a given icon side: (x, y, width, height).
pub fn accent_rect(size: u32) -> (u32, u32, u32, u32) {
    let side = size as f32;
    let x = (side * 0.70).round() as u32;
    let y = (side * 0.39).round() as u32;
    let width = ((side * 0.03).round() as u32).max(2);
    let height = (side * 0.25).round() as u32;
    (x, y, width, height)
}

fn paint_cursor_accent(img: &mut RgbImage) {
    let size = img.width();
    let (x0, y0, width, height) = accent_rect(size);

    for y in y0..(y0 + height).min(size) {
        for x in x0..(x0 + width).min(size) {
            let px = img.get_pixel_mut(x, y);
            *px = blend_over(*px, Rgb([255, 255, 255]), ACCENT_ALPHA);
        }
    }
}

/// Alpha-composite `top` over the opaque `base`.
fn blend_over(base: Rgb<u8>, top: Rgb<u8>, alpha: u8) -> Rgb<u8> {
    let a = alpha as f32 / 255.0;
    let mix = |b: u8, t: u8| (t as f32 * a + b as f32 * (1.0 - a)).round() as u8;
    Rgb([
        mix(base[0], top[0]),
        mix(base[1], top[1]),
        mix(base[2], top[2]),
    ])
}

// Encode as PNG with best compression and adaptive filtering.
fn write_png(img: &RgbImage, path: &Path) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut out = BufWriter::new(file);
    let encoder =
        PngEncoder::new_with_quality(&mut out, CompressionType::Best, PngFilterType::Adaptive);
    encoder.write_image(img.as_raw(), img.width(), img.height(), ColorType::Rgb8)?;
    out.flush()?;
    Ok(())
}
