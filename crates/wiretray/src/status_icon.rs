//! In-memory rendering of the tray icon.
//!
//! A grey ring glyph with a status dot in the bottom-right corner: green when
//! a tunnel is up, red otherwise.

use crate::TrayIconState;

use image::{Rgba, RgbaImage};

/// Icon edge length in pixels.
pub(crate) const ICON_SIZE: u32 = 64;

/// Status dot diameter in pixels.
pub(crate) const DOT_SIZE: u32 = 24;

pub(crate) const CONNECTED_COLOR: Rgba<u8> = Rgba([0x4C, 0xAF, 0x50, 0xFF]);
pub(crate) const DISCONNECTED_COLOR: Rgba<u8> = Rgba([0xF4, 0x43, 0x36, 0xFF]);
const GLYPH_COLOR: Rgba<u8> = Rgba([0x60, 0x7D, 0x8B, 0xFF]);
const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

const GLYPH_CENTER: f32 = 28.0;
const GLYPH_OUTER_RADIUS: f32 = 24.0;
const GLYPH_INNER_RADIUS: f32 = 17.0;

/// Dot colour for a state.
pub(crate) fn dot_color(state: TrayIconState) -> Rgba<u8> {
    match state {
        TrayIconState::Connected => CONNECTED_COLOR,
        TrayIconState::Disconnected => DISCONNECTED_COLOR,
    }
}

/// Render the icon for `state` as RGBA pixels.
pub(crate) fn render(state: TrayIconState) -> RgbaImage {
    let dot = dot_color(state);
    let dot_radius = DOT_SIZE as f32 / 2.0;
    let dot_center = (ICON_SIZE - DOT_SIZE) as f32 + dot_radius;

    RgbaImage::from_fn(ICON_SIZE, ICON_SIZE, |x, y| {
        // Sample at pixel centres.
        let (px, py) = (x as f32 + 0.5, y as f32 + 0.5);

        if distance(px, py, dot_center, dot_center) <= dot_radius {
            return dot;
        }

        let r = distance(px, py, GLYPH_CENTER, GLYPH_CENTER);
        if (GLYPH_INNER_RADIUS..=GLYPH_OUTER_RADIUS).contains(&r) {
            GLYPH_COLOR
        } else {
            TRANSPARENT
        }
    })
}

fn distance(x0: f32, y0: f32, x1: f32, y1: f32) -> f32 {
    ((x0 - x1).powi(2) + (y0 - y1).powi(2)).sqrt()
}
