//! Presentation of the backing buffer on a terminal cell grid.
//!
//! Every cell shows two vertically stacked samples using an upper half
//! block: the foreground colors the top half, the background the bottom.

use osmon_core::Mode;
use ratatui::{
    style::Style,
    text::{Line, Span},
};

use crate::canvas::Canvas;
use crate::color::{Pixel, Rgba, TRANSPARENT, composite_over};

const HALF_BLOCK: &str = "▀";

/// How strongly the brightest pixel of a sample pulls the average toward it.
/// Keeps stars and meteor trails smaller than a cell from vanishing.
const PEAK_WEIGHT: f32 = 0.45;

/// Page color behind the canvas for the given mode.
pub fn backdrop(mode: Mode) -> Rgba {
    match mode {
        Mode::Night => Rgba::opaque(7, 9, 20),
        Mode::Day => Rgba::opaque(238, 244, 250),
    }
}

/// Render the canvas onto a `columns` × `rows` grid of half-block cells.
pub fn to_lines(canvas: &Canvas, columns: u16, rows: u16, backdrop: Rgba) -> Vec<Line<'static>> {
    let sample_rows = rows as usize * 2;
    (0..rows as usize)
        .map(|row| {
            let spans: Vec<Span> = (0..columns as usize)
                .map(|column| {
                    let top = sample(canvas, column, columns as usize, row * 2, sample_rows);
                    let bottom = sample(canvas, column, columns as usize, row * 2 + 1, sample_rows);
                    Span::styled(
                        HALF_BLOCK,
                        Style::new()
                            .fg(composite_over(top, backdrop))
                            .bg(composite_over(bottom, backdrop)),
                    )
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}

/// Sample the block of device pixels that maps to one grid slot.
fn sample(canvas: &Canvas, column: usize, columns: usize, row: usize, rows: usize) -> Pixel {
    let (x0, x1) = span(column, columns, canvas.width());
    let (y0, y1) = span(row, rows, canvas.height());
    if x0 >= x1 || y0 >= y1 {
        return TRANSPARENT;
    }

    let mut sum = [0.0f32; 4];
    let mut peak = TRANSPARENT;
    let mut peak_level = -1.0f32;
    for y in y0..y1 {
        for x in x0..x1 {
            let Some(pixel) = canvas.pixel(x, y) else {
                continue;
            };
            for (total, channel) in sum.iter_mut().zip(pixel) {
                *total += channel;
            }
            let level = pixel[0].max(pixel[1]).max(pixel[2]);
            if level > peak_level {
                peak_level = level;
                peak = pixel;
            }
        }
    }

    let count = ((x1 - x0) * (y1 - y0)) as f32;
    let mut out = TRANSPARENT;
    for (i, value) in out.iter_mut().enumerate() {
        let mean = sum[i] / count;
        *value = mean + (peak[i] - mean).max(0.0) * PEAK_WEIGHT;
    }
    out
}

/// Device pixel range covered by slot `index` of `slots`, at least one pixel wide.
fn span(index: usize, slots: usize, pixels: usize) -> (usize, usize) {
    if slots == 0 || pixels == 0 {
        return (0, 0);
    }
    let start = (index * pixels / slots).min(pixels - 1);
    let end = ((index + 1) * pixels / slots).clamp(start + 1, pixels);
    (start, end)
}
