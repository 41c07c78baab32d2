//! Rating to color mapping.
//!
//! The palette has 100 entries: the lower half is pure red, the upper half a
//! 50-step red to green ramp interpolated in HSL (so it passes through orange
//! and yellow). A rating `r` picks entry `floor(r * 10) - 1`, or entry 0 when
//! `r` is 0.

use ratatui::style::Color;

pub const GRADIENT_STEPS: usize = 50;
const PALETTE_LEN: usize = GRADIENT_STEPS * 2;

// HSL endpoints, hue in turns.
const START: (f64, f64, f64) = (0.0, 1.0, 0.5);
const END: (f64, f64, f64) = (1.0 / 3.0, 1.0, 128.0 / 255.0 / 2.0);

pub fn palette_index(rating: f32) -> usize {
    let r = if rating.is_finite() { rating.max(0.0) } else { 0.0 };
    let scaled = (r * 10.0).floor() as usize;
    let idx = if r > 0.0 { scaled.saturating_sub(1) } else { scaled };
    idx.min(PALETTE_LEN - 1)
}

/// Position of `rating` on the red to green ramp, in `0..GRADIENT_STEPS`.
pub fn gradient_step(rating: f32) -> usize {
    palette_index(rating)
        .saturating_sub(GRADIENT_STEPS)
        .min(GRADIENT_STEPS - 1)
}

pub fn rating_color(rating: f32) -> Color {
    step_color(gradient_step(rating))
}

pub fn step_color(step: usize) -> Color {
    let t = step.min(GRADIENT_STEPS - 1) as f64 / (GRADIENT_STEPS - 1) as f64;
    let h = START.0 + (END.0 - START.0) * t;
    let s = START.1 + (END.1 - START.1) * t;
    let l = START.2 + (END.2 - START.2) * t;
    let (r, g, b) = hsl_to_rgb(h, s, l);
    Color::Rgb(r, g, b)
}

fn hsl_to_rgb(h: f64, s: f64, l: f64) -> (u8, u8, u8) {
    if s == 0.0 {
        let v = to_byte(l);
        return (v, v, v);
    }
    let q = if l < 0.5 {
        l * (1.0 + s)
    } else {
        l + s - l * s
    };
    let p = 2.0 * l - q;
    (
        to_byte(hue_to_channel(p, q, h + 1.0 / 3.0)),
        to_byte(hue_to_channel(p, q, h)),
        to_byte(hue_to_channel(p, q, h - 1.0 / 3.0)),
    )
}

fn hue_to_channel(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

fn to_byte(v: f64) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}
