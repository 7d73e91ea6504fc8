//! Reference RGGB demosaic.
//!
//! Every 2x2 quad `R Gr / Gb B` expands to four RGBA pixels that all share
//! the quad's R and B. Green is averaged on the R and B sites and kept as
//! sampled on the two green sites. The CUDA kernel implements the same
//! mapping and is checked against this function.

use debayer_base::CHANNEL_EXPANSION;
use debayer_camera::RawFrame;

#[inline]
fn put(out: &mut [u8], i: usize, r: u8, g: u8, b: u8) {
    out[i] = r;
    out[i + 1] = g;
    out[i + 2] = b;
    out[i + 3] = 255;
}

/// Demosaic `frame` into `out` (RGBA, tightly packed).
///
/// `frame` must have even dimensions and `out` must hold
/// `width * height * 4` bytes; both are guaranteed by the converters,
/// which validate geometry when they are created.
pub fn rggb_to_rgba(frame: &RawFrame<'_>, out: &mut [u8]) {
    let geometry = frame.geometry();
    let width = geometry.width as usize;
    let height = geometry.height as usize;
    debug_assert_eq!(out.len(), geometry.converted_len());

    let row_bytes = width * CHANNEL_EXPANSION;
    for y in (0..height).step_by(2) {
        let top = frame.row(y);
        let bot = frame.row(y + 1);
        for x in (0..width).step_by(2) {
            let r = top[x];
            let gr = top[x + 1];
            let gb = bot[x];
            let b = bot[x + 1];
            let g = ((gr as u16 + gb as u16) / 2) as u8;

            let i = y * row_bytes + x * CHANNEL_EXPANSION;
            let j = i + row_bytes;
            put(out, i, r, g, b);
            put(out, i + CHANNEL_EXPANSION, r, gr, b);
            put(out, j, r, gb, b);
            put(out, j + CHANNEL_EXPANSION, r, g, b);
        }
    }
}
