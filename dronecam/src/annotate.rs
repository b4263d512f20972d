/// Overlay drawing on RGB snapshots
///
/// Mirrors the on-screen overlay (tracker boxes, FPS counter, tracker legend)
/// on an `RgbImage` so headless runs can still be inspected.
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;
use roitrack::{Bbox, TrackResult, TrackerKind};

pub const BOX_THICKNESS: i32 = 2;
pub const LABEL_SCALE: u32 = 3;
pub const FPS_ORIGIN: (i32, i32) = (400, 20);
pub const LEGEND_STEP: i32 = 20;

const GLYPH_WIDTH: u32 = 3;
const GLYPH_HEIGHT: u32 = 5;

/// Tracker colors are stored BGR for OpenCV
pub fn bgr_to_rgb(color: [u8; 3]) -> Rgb<u8> {
    Rgb([color[2], color[1], color[0]])
}

/// 3x5 glyph rows, most significant of the three bits is the left column
fn glyph(ch: char) -> [u8; 5] {
    match ch.to_ascii_uppercase() {
        'A' => [0b010, 0b101, 0b111, 0b101, 0b101],
        'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'C' => [0b011, 0b100, 0b100, 0b100, 0b011],
        'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'E' => [0b111, 0b100, 0b110, 0b100, 0b111],
        'F' => [0b111, 0b100, 0b110, 0b100, 0b100],
        'G' => [0b011, 0b100, 0b101, 0b101, 0b011],
        'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'J' => [0b001, 0b001, 0b001, 0b101, 0b010],
        'K' => [0b101, 0b101, 0b110, 0b101, 0b101],
        'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'M' => [0b101, 0b111, 0b111, 0b101, 0b101],
        'N' => [0b110, 0b101, 0b101, 0b101, 0b101],
        'O' => [0b010, 0b101, 0b101, 0b101, 0b010],
        'P' => [0b110, 0b101, 0b110, 0b100, 0b100],
        'Q' => [0b010, 0b101, 0b101, 0b110, 0b011],
        'R' => [0b110, 0b101, 0b110, 0b101, 0b101],
        'S' => [0b011, 0b100, 0b010, 0b001, 0b110],
        'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'V' => [0b101, 0b101, 0b101, 0b101, 0b010],
        'W' => [0b101, 0b101, 0b111, 0b111, 0b101],
        'X' => [0b101, 0b101, 0b010, 0b101, 0b101],
        'Y' => [0b101, 0b101, 0b010, 0b010, 0b010],
        'Z' => [0b111, 0b001, 0b010, 0b100, 0b111],
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b110, 0b001, 0b010, 0b100, 0b111],
        '3' => [0b110, 0b001, 0b010, 0b001, 0b110],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b110, 0b001, 0b110],
        '6' => [0b011, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b010, 0b010, 0b010],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b110],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        ' ' => [0b000; 5],
        _ => [0b111; 5],
    }
}

/// Width in pixels of `text` drawn at `scale`, one blank column between glyphs
pub fn text_width(text: &str, scale: u32) -> u32 {
    let n = text.chars().count() as u32;
    if n == 0 {
        return 0;
    }
    (n * (GLYPH_WIDTH + 1) - 1) * scale
}

/// Draw text with its baseline at `y`, clipped to the image
pub fn draw_label(img: &mut RgbImage, text: &str, x: i32, y: i32, color: Rgb<u8>, scale: u32) {
    let scale = scale.max(1) as i32;
    let top = y - GLYPH_HEIGHT as i32 * scale;
    let (w, h) = (img.width() as i32, img.height() as i32);

    for (i, ch) in text.chars().enumerate() {
        let left = x + i as i32 * (GLYPH_WIDTH as i32 + 1) * scale;
        for (row, bits) in glyph(ch).iter().enumerate() {
            for col in 0..GLYPH_WIDTH as i32 {
                if (bits >> (GLYPH_WIDTH as i32 - 1 - col)) & 1 == 0 {
                    continue;
                }
                for dy in 0..scale {
                    for dx in 0..scale {
                        let px = left + col * scale + dx;
                        let py = top + row as i32 * scale + dy;
                        if px >= 0 && py >= 0 && px < w && py < h {
                            img.put_pixel(px as u32, py as u32, color);
                        }
                    }
                }
            }
        }
    }
}

/// Draw a hollow box `thickness` pixels wide, growing outwards
pub fn draw_box(img: &mut RgbImage, bbox: &Bbox, color: Rgb<u8>, thickness: i32) {
    let ((x1, y1), (x2, y2)) = bbox.corners();
    if x2 <= x1 || y2 <= y1 {
        log::warn!("Skipping degenerate box {}", bbox);
        return;
    }

    for offset in 0..thickness.max(1) {
        let rect = Rect::at(x1 - offset, y1 - offset).of_size(
            (x2 - x1 + offset * 2) as u32,
            (y2 - y1 + offset * 2) as u32,
        );
        draw_hollow_rect_mut(img, rect, color);
    }
}

/// Boxes of the trackers that found the target, the FPS counter and the legend
pub fn annotate_frame(
    img: &mut RgbImage,
    results: &[TrackResult],
    trackers: &[TrackerKind],
    fps: f64,
) {
    for result in results {
        draw_box(img, &result.bbox, bgr_to_rgb(result.kind.color()), BOX_THICKNESS);
    }

    draw_label(
        img,
        &format!("FPS : {}", fps as i64),
        FPS_ORIGIN.0,
        FPS_ORIGIN.1,
        Rgb([50, 170, 50]),
        LABEL_SCALE,
    );

    let mut y = LEGEND_STEP;
    for kind in trackers {
        draw_label(img, kind.name(), 0, y, bgr_to_rgb(kind.color()), LABEL_SCALE);
        y += LEGEND_STEP;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

    #[test]
    fn test_bgr_to_rgb() {
        // KCF is red on screen
        assert_eq!(bgr_to_rgb(TrackerKind::Kcf.color()), Rgb([255, 0, 0]));
        assert_eq!(bgr_to_rgb(TrackerKind::Boosting.color()), Rgb([0, 0, 255]));
    }

    #[test]
    fn test_draw_box_edges() {
        let mut img = RgbImage::new(100, 100);
        let red = Rgb([255, 0, 0]);
        draw_box(&mut img, &Bbox::new(10.0, 20.0, 30.0, 40.0), red, 2);

        assert_eq!(*img.get_pixel(10, 20), red);
        assert_eq!(*img.get_pixel(9, 19), red);
        assert_eq!(*img.get_pixel(39, 59), red);
        // Interior stays untouched
        assert_eq!(*img.get_pixel(25, 40), BLACK);
    }

    #[test]
    fn test_out_of_frame_box_is_clipped() {
        let mut img = RgbImage::new(50, 50);
        draw_box(&mut img, &Bbox::new(-20.0, 40.0, 100.0, 100.0), Rgb([0, 255, 0]), 2);
        draw_box(&mut img, &Bbox::new(10.0, 10.0, 0.0, 5.0), Rgb([0, 255, 0]), 2);
        assert_eq!(*img.get_pixel(25, 40), Rgb([0, 255, 0]));
    }

    #[test]
    fn test_label_width_and_clipping() {
        assert_eq!(text_width("KCF", 1), 11);
        assert_eq!(text_width("KCF", 3), 33);
        assert_eq!(text_width("", 3), 0);

        let mut img = RgbImage::new(20, 20);
        draw_label(&mut img, "MEDIANFLOW", 5, 10, Rgb([255, 0, 255]), 2);
        draw_label(&mut img, "MOSSE", -30, 200, Rgb([255, 0, 255]), 2);
        // Top-left pixel of 'M' at scale 2 lands at (5, 0)
        assert_eq!(*img.get_pixel(5, 0), Rgb([255, 0, 255]));
    }

    #[test]
    fn test_annotate_frame_draws_boxes_and_legend() {
        let mut img = RgbImage::new(640, 480);
        let results = [TrackResult {
            kind: TrackerKind::Mosse,
            bbox: Bbox::new(100.0, 100.0, 50.0, 50.0),
        }];
        annotate_frame(&mut img, &results, &[TrackerKind::Kcf, TrackerKind::Mosse], 30.0);

        assert_eq!(*img.get_pixel(100, 100), bgr_to_rgb(TrackerKind::Mosse.color()));
        let legend_has = |color: Rgb<u8>, top: u32| {
            (0..40).any(|x| (top..top + 15).any(|y| *img.get_pixel(x, y) == color))
        };
        assert!(legend_has(bgr_to_rgb(TrackerKind::Kcf.color()), 5));
        assert!(legend_has(bgr_to_rgb(TrackerKind::Mosse.color()), 25));
    }
}
