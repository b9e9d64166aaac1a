//! Source-over alpha blending with per-layer opacity

use image::{Rgba, RgbaImage};

/// Blit `sprite` onto `canvas` with its top-left corner at `(x, y)`.
///
/// Offsets may be negative or extend past the canvas; pixels outside the
/// canvas are clipped. `opacity` (0.0-1.0) scales the source alpha of
/// every pixel, like a global alpha for the whole draw call.
pub(crate) fn blit_layer(canvas: &mut RgbaImage, sprite: &RgbaImage, x: i32, y: i32, opacity: f64) {
    let opacity = opacity.clamp(0.0, 1.0) as f32;
    if opacity == 0.0 {
        return;
    }

    let canvas_width = canvas.width() as i64;
    let canvas_height = canvas.height() as i64;

    for (sy, row) in sprite.rows().enumerate() {
        let dest_y = y as i64 + sy as i64;
        if dest_y < 0 {
            continue;
        }
        if dest_y >= canvas_height {
            break;
        }

        for (sx, pixel) in row.enumerate() {
            let dest_x = x as i64 + sx as i64;
            if dest_x < 0 {
                continue;
            }
            if dest_x >= canvas_width {
                break;
            }

            // Fully transparent source, skip
            if pixel[3] == 0 {
                continue;
            }

            let src_alpha = (pixel[3] as f32 / 255.0) * opacity;
            let dst = canvas.get_pixel(dest_x as u32, dest_y as u32);
            let blended = blend_over(pixel, dst, src_alpha);
            canvas.put_pixel(dest_x as u32, dest_y as u32, blended);
        }
    }
}

/// Porter-Duff "source over" in straight (non-premultiplied) alpha.
pub(crate) fn blend_over(src: &Rgba<u8>, dst: &Rgba<u8>, src_alpha: f32) -> Rgba<u8> {
    let dst_alpha = dst[3] as f32 / 255.0;

    // out_alpha = src_alpha + dst_alpha * (1 - src_alpha)
    let out_alpha = src_alpha + dst_alpha * (1.0 - src_alpha);
    if out_alpha == 0.0 {
        return Rgba([0, 0, 0, 0]);
    }

    // out_color = (src * src_alpha + dst * dst_alpha * (1 - src_alpha)) / out_alpha
    let composite = |s: u8, d: u8| -> u8 {
        let s = s as f32 / 255.0;
        let d = d as f32 / 255.0;
        let result = (s * src_alpha + d * dst_alpha * (1.0 - src_alpha)) / out_alpha;
        (result.clamp(0.0, 1.0) * 255.0).round() as u8
    };

    Rgba([
        composite(src[0], dst[0]),
        composite(src[1], dst[1]),
        composite(src[2], dst[2]),
        (out_alpha * 255.0).round() as u8,
    ])
}
