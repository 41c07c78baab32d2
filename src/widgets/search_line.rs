use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::Widget;

/// Text-entry strip. Accepts anything typed; overflow is clipped when drawn.
#[derive(Debug, Default, Clone)]
pub struct SearchLine {
    text: String,
}

impl SearchLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn push(&mut self, c: char) {
        self.text.push(c);
    }

    pub fn remove_chr(&mut self) {
        self.text.pop();
    }

    /// Hands the buffer over and leaves the line empty.
    pub fn take(&mut self) -> String {
        std::mem::take(&mut self.text)
    }
}

impl Widget for &SearchLine {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let style = Style::default().fg(Color::White).bg(Color::Black);
        buf.set_style(area, style);

        let width = self.text.chars().count() as u16;
        let x = area.x + area.width.saturating_sub(width) / 2;
        let y = area.y + area.height / 2;
        let max_width = (area.right() - x) as usize;
        buf.set_stringn(x, y, &self.text, max_width, style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typing_accumulates_and_backspace_removes() {
        let mut line = SearchLine::new();
        for c in "Lost".chars() {
            line.push(c);
        }
        assert_eq!(line.text(), "Lost");
        line.remove_chr();
        assert_eq!(line.text(), "Los");
    }

    #[test]
    fn backspace_on_empty_buffer_is_a_no_op() {
        let mut line = SearchLine::new();
        line.remove_chr();
        line.remove_chr();
        assert!(line.is_empty());
        assert_eq!(line.text(), "");
    }

    #[test]
    fn backspace_removes_whole_characters() {
        let mut line = SearchLine::new();
        line.push('é');
        line.push('ß');
        line.remove_chr();
        assert_eq!(line.text(), "é");
    }

    #[test]
    fn take_clears_the_buffer() {
        let mut line = SearchLine::new();
        line.push('x');
        assert_eq!(line.take(), "x");
        assert!(line.is_empty());
    }

    #[test]
    fn text_is_centered() {
        let mut line = SearchLine::new();
        for c in "abcd".chars() {
            line.push(c);
        }
        let area = Rect::new(0, 0, 10, 3);
        let mut buf = Buffer::empty(area);
        (&line).render(area, &mut buf);
        assert_eq!(buf[(3, 1)].symbol(), "a");
        assert_eq!(buf[(6, 1)].symbol(), "d");
        assert_eq!(buf[(0, 0)].bg, Color::Black);
    }

    #[test]
    fn long_text_is_clipped_not_an_error() {
        let mut line = SearchLine::new();
        for _ in 0..50 {
            line.push('z');
        }
        let area = Rect::new(0, 0, 8, 1);
        let mut buf = Buffer::empty(area);
        (&line).render(area, &mut buf);
        assert_eq!(buf[(7, 0)].symbol(), "z");
    }
}
