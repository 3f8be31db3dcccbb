use image::{Rgb, RgbImage};
use rusttype::{point, Font, Scale};

/// Preferred label font. Absence is tolerated via the bitmap fallback.
const FONT_PATH: &str = "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf";

/// Label height as a fraction of the icon side when the TrueType font loads.
const LABEL_SCALE: f32 = 0.45;

/// The label sits this fraction of the side above dead center so it reads
/// balanced against the cursor accent below-right of it.
const VERTICAL_NUDGE: f32 = 0.05;

const LABEL_COLOR: Rgb<u8> = Rgb([255, 255, 255]);

/// Outcome of the one-time font probe: either the preferred TrueType font
/// or the built-in fixed-size glyphs. The fallback only degrades text
/// fidelity, it never fails a render.
pub enum FontResolution {
    Loaded(Font<'static>),
    Builtin,
}

impl FontResolution {
    pub fn is_builtin(&self) -> bool {
        matches!(self, FontResolution::Builtin)
    }
}

/// Probe the preferred font once, before any drawing.
pub fn resolve() -> FontResolution {
    match std::fs::read(FONT_PATH).ok().and_then(Font::try_from_vec) {
        Some(font) => FontResolution::Loaded(font),
        None => FontResolution::Builtin,
    }
}

/// Draw `text` in solid white, centered on the square image: horizontal
/// center exact, vertical center nudged up by `VERTICAL_NUDGE` of the side.
/// Centering uses the measured ink bounding box in both font paths.
pub fn draw_label_centered(img: &mut RgbImage, text: &str, font: &FontResolution) {
    match font {
        FontResolution::Loaded(font) => draw_truetype(img, text, font),
        FontResolution::Builtin => draw_builtin(img, text),
    }
}

fn draw_truetype(img: &mut RgbImage, text: &str, font: &Font<'_>) {
    let size = img.width();
    let scale = Scale::uniform(size as f32 * LABEL_SCALE);
    let v_metrics = font.v_metrics(scale);
    let glyphs: Vec<_> = font
        .layout(text, scale, point(0.0, v_metrics.ascent))
        .collect();

    // Ink bounding box across all glyphs.
    let mut min_x = i32::MAX;
    let mut min_y = i32::MAX;
    let mut max_x = i32::MIN;
    let mut max_y = i32::MIN;
    for glyph in &glyphs {
        if let Some(bb) = glyph.pixel_bounding_box() {
            min_x = min_x.min(bb.min.x);
            min_y = min_y.min(bb.min.y);
            max_x = max_x.max(bb.max.x);
            max_y = max_y.max(bb.max.y);
        }
    }
    if min_x > max_x {
        // Nothing but whitespace; no ink to place.
        return;
    }

    let text_w = max_x - min_x;
    let text_h = max_y - min_y;
    let offset_x = (size as i32 - text_w) / 2 - min_x;
    let offset_y =
        (size as i32 - text_h) / 2 - min_y - (size as f32 * VERTICAL_NUDGE) as i32;

    for glyph in &glyphs {
        if let Some(bb) = glyph.pixel_bounding_box() {
            glyph.draw(|gx, gy, coverage| {
                let x = bb.min.x + gx as i32 + offset_x;
                let y = bb.min.y + gy as i32 + offset_y;
                if x >= 0 && y >= 0 && (x as u32) < size && (y as u32) < size {
                    let px = img.get_pixel_mut(x as u32, y as u32);
                    *px = blend_coverage(*px, coverage);
                }
            });
        }
    }
}

/// Composite the label color over `base` weighted by rasterizer coverage.
fn blend_coverage(base: Rgb<u8>, coverage: f32) -> Rgb<u8> {
    let c = coverage.clamp(0.0, 1.0);
    let mix = |b: u8, t: u8| (t as f32 * c + b as f32 * (1.0 - c)).round() as u8;
    Rgb([
        mix(base[0], LABEL_COLOR[0]),
        mix(base[1], LABEL_COLOR[1]),
        mix(base[2], LABEL_COLOR[2]),
    ])
}

// Fixed-size 5x7 fallback glyphs, one bit per pixel, high bit first.
const GLYPH_WIDTH: u32 = 5;
const GLYPH_HEIGHT: u32 = 7;
const GLYPH_GAP: u32 = 1;

fn builtin_glyph(c: char) -> Option<[u8; GLYPH_HEIGHT as usize]> {
    match c {
        'A' => Some([
            0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001,
        ]),
        'I' => Some([
            0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b11111,
        ]),
        _ => None,
    }
}

fn draw_builtin(img: &mut RgbImage, text: &str) {
    let size = img.width();
    let glyph_count = text.chars().count() as u32;
    if glyph_count == 0 {
        return;
    }

    let text_w = glyph_count * GLYPH_WIDTH + (glyph_count - 1) * GLYPH_GAP;
    let offset_x = (size as i32 - text_w as i32) / 2;
    let offset_y =
        (size as i32 - GLYPH_HEIGHT as i32) / 2 - (size as f32 * VERTICAL_NUDGE) as i32;

    let mut pen_x = offset_x;
    for c in text.chars() {
        if let Some(rows) = builtin_glyph(c) {
            for (row_y, row) in rows.iter().enumerate() {
                for bit_x in 0..GLYPH_WIDTH {
                    if row & (1 << (GLYPH_WIDTH - 1 - bit_x)) == 0 {
                        continue;
                    }
                    let x = pen_x + bit_x as i32;
                    let y = offset_y + row_y as i32;
                    if x >= 0 && y >= 0 && (x as u32) < size && (y as u32) < size {
                        img.put_pixel(x as u32, y as u32, LABEL_COLOR);
                    }
                }
            }
        }
        pen_x += (GLYPH_WIDTH + GLYPH_GAP) as i32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_label_is_horizontally_centered() {
        let mut img = RgbImage::new(48, 48);
        draw_builtin(&mut img, "AI");

        let white_xs: Vec<u32> = img
            .enumerate_pixels()
            .filter(|(_, _, px)| **px == LABEL_COLOR)
            .map(|(x, _, _)| x)
            .collect();
        assert!(!white_xs.is_empty(), "fallback glyphs should produce ink");

        let min_x = *white_xs.iter().min().unwrap();
        let max_x = *white_xs.iter().max().unwrap();
        let center_sum = (min_x + max_x) as i32;
        assert!(
            (center_sum - 47).abs() <= 2,
            "ink span {min_x}..={max_x} should straddle the image center"
        );
    }

    #[test]
    fn builtin_ignores_unknown_glyphs() {
        let mut img = RgbImage::new(16, 16);
        draw_builtin(&mut img, "??");
        assert!(img.pixels().all(|px| *px == Rgb([0, 0, 0])));
    }

    #[test]
    fn coverage_blend_endpoints() {
        let base = Rgb([102, 126, 234]);
        assert_eq!(blend_coverage(base, 0.0), base);
        assert_eq!(blend_coverage(base, 1.0), LABEL_COLOR);
    }
}
