use image::RgbaImage;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::Widget;

/// Draws an image with upper half blocks: each terminal cell shows two
/// vertically stacked pixels, the top one as foreground and the bottom one
/// as background. Sampling is nearest-neighbour, aspect ratio is kept.
pub struct Cover<'a> {
    image: &'a RgbaImage,
}

impl<'a> Cover<'a> {
    pub fn new(image: &'a RgbaImage) -> Self {
        Self { image }
    }

    /// Cells needed to show the image inside `area` without distortion.
    pub fn fit(&self, area: Rect) -> Rect {
        let (w, h) = self.image.dimensions();
        if w == 0 || h == 0 || area.is_empty() {
            return Rect::new(area.x, area.y, 0, 0);
        }
        // One cell is one pixel wide and two pixels tall.
        let max_w = f64::from(area.width);
        let max_h = f64::from(area.height) * 2.0;
        let scale = (max_w / f64::from(w)).min(max_h / f64::from(h));
        let cols = ((f64::from(w) * scale + 1e-9).floor() as u16).clamp(1, area.width);
        let rows = ((f64::from(h) * scale / 2.0 + 1e-9).floor() as u16).clamp(1, area.height);
        let x = area.x + (area.width - cols) / 2;
        Rect::new(x, area.y, cols, rows)
    }

    fn sample(&self, col: u16, px_row: u32, target: Rect) -> Color {
        let (w, h) = self.image.dimensions();
        let sx = (u32::from(col) * w / u32::from(target.width)).min(w - 1);
        let sy = (px_row * h / (u32::from(target.height) * 2)).min(h - 1);
        let [r, g, b, _] = self.image.get_pixel(sx, sy).0;
        Color::Rgb(r, g, b)
    }
}

impl Widget for Cover<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let target = self.fit(area);
        if target.is_empty() {
            return;
        }
        for row in 0..target.height {
            for col in 0..target.width {
                let top = self.sample(col, u32::from(row) * 2, target);
                let bottom = self.sample(col, u32::from(row) * 2 + 1, target);
                buf[(target.x + col, target.y + row)]
                    .set_symbol("▀")
                    .set_style(Style::default().fg(top).bg(bottom));
            }
        }
    }
}
