use crate::font::Base14Font;
use crate::image_decode::DecodedImage;
use crate::types::{Color, Pt, Size};
use std::collections::BTreeMap;
use std::sync::Arc;

// Coordinates are top-left origin, y growing downwards. The PDF writer flips them.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    // Non-rendered metadata used for page-aware reporting. Ignored by the PDF renderer.
    Meta {
        key: String,
        value: String,
    },
    SetFillColor(Color),
    SetStrokeColor(Color),
    SetLineWidth(Pt),
    SetFont(Base14Font),
    SetFontSize(Pt),
    MoveTo {
        x: Pt,
        y: Pt,
    },
    LineTo {
        x: Pt,
        y: Pt,
    },
    ClosePath,
    Fill,
    Stroke,
    // `y` is the top of the text box; the baseline sits one font size below.
    DrawString {
        x: Pt,
        y: Pt,
        text: String,
    },
    DrawRect {
        x: Pt,
        y: Pt,
        width: Pt,
        height: Pt,
    },
    DrawImage {
        x: Pt,
        y: Pt,
        width: Pt,
        height: Pt,
        resource_id: String,
    },
}

#[derive(Debug, Clone, Default)]
pub struct Page {
    pub commands: Vec<Command>,
}

impl Page {
    fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    pub fn meta(&self, key: &str) -> Option<&str> {
        self.commands.iter().find_map(|cmd| match cmd {
            Command::Meta { key: k, value } if k == key => Some(value.as_str()),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|cmd| match cmd {
            Command::DrawString { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn image_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|cmd| matches!(cmd, Command::DrawImage { .. }))
            .count()
    }
}

#[derive(Debug, Clone)]
pub struct Document {
    pub page_size: Size,
    pub pages: Vec<Page>,
    pub images: BTreeMap<String, Arc<DecodedImage>>,
}

#[derive(Debug, Clone)]
struct GraphicsState {
    fill_color: Color,
    stroke_color: Color,
    line_width: Pt,
    font_size: Pt,
    font: Base14Font,
}

impl GraphicsState {
    fn initial() -> Self {
        Self {
            fill_color: Color::BLACK,
            stroke_color: Color::BLACK,
            line_width: Pt::from_f32(1.0),
            font_size: Pt::from_f32(12.0),
            font: Base14Font::Helvetica,
        }
    }
}

pub struct Canvas {
    page_size: Size,
    pages: Vec<Page>,
    current: Page,
    current_state: GraphicsState,
    images: BTreeMap<String, Arc<DecodedImage>>,
}

impl Canvas {
    pub fn new(page_size: Size) -> Self {
        Self {
            page_size,
            pages: Vec::new(),
            current: Page::new(),
            current_state: GraphicsState::initial(),
            images: BTreeMap::new(),
        }
    }

    pub fn page_size(&self) -> Size {
        self.page_size
    }

    pub fn meta(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.current.commands.push(Command::Meta {
            key: key.into(),
            value: value.into(),
        });
    }

    pub fn set_fill_color(&mut self, color: Color) {
        if self.current_state.fill_color == color {
            return;
        }
        self.current_state.fill_color = color;
        self.current.commands.push(Command::SetFillColor(color));
    }

    pub fn set_stroke_color(&mut self, color: Color) {
        if self.current_state.stroke_color == color {
            return;
        }
        self.current_state.stroke_color = color;
        self.current.commands.push(Command::SetStrokeColor(color));
    }

    pub fn set_line_width(&mut self, width: Pt) {
        let width = if width < Pt::ZERO { Pt::ZERO } else { width };
        if self.current_state.line_width == width {
            return;
        }
        self.current_state.line_width = width;
        self.current.commands.push(Command::SetLineWidth(width));
    }

    pub fn set_font(&mut self, font: Base14Font, size: Pt) {
        if self.current_state.font != font {
            self.current_state.font = font;
            self.current.commands.push(Command::SetFont(font));
        }
        if self.current_state.font_size != size {
            self.current_state.font_size = size;
            self.current.commands.push(Command::SetFontSize(size));
        }
    }

    pub fn move_to(&mut self, x: Pt, y: Pt) {
        self.current.commands.push(Command::MoveTo { x, y });
    }

    pub fn line_to(&mut self, x: Pt, y: Pt) {
        self.current.commands.push(Command::LineTo { x, y });
    }

    pub fn close_path(&mut self) {
        self.current.commands.push(Command::ClosePath);
    }

    pub fn fill(&mut self) {
        self.current.commands.push(Command::Fill);
    }

    pub fn stroke(&mut self) {
        self.current.commands.push(Command::Stroke);
    }

    pub fn draw_string(&mut self, x: Pt, y: Pt, text: impl Into<String>) {
        self.current.commands.push(Command::DrawString {
            x,
            y,
            text: text.into(),
        });
    }

    pub fn draw_rect(&mut self, x: Pt, y: Pt, width: Pt, height: Pt) {
        self.current.commands.push(Command::DrawRect {
            x,
            y,
            width,
            height,
        });
    }

    /// Registers a decoded raster for embedding and returns its resource id.
    /// Identical payloads share one id.
    pub fn register_image(&mut self, image: Arc<DecodedImage>) -> String {
        let resource_id = format!("img-{:016x}", image.content_hash());
        self.images.entry(resource_id.clone()).or_insert(image);
        resource_id
    }

    pub fn draw_image(
        &mut self,
        x: Pt,
        y: Pt,
        width: Pt,
        height: Pt,
        resource_id: impl Into<String>,
    ) {
        self.current.commands.push(Command::DrawImage {
            x,
            y,
            width,
            height,
            resource_id: resource_id.into(),
        });
    }

    /// Finalizes the current page. Nothing drawn afterwards can reach it.
    pub fn show_page(&mut self) {
        let current = std::mem::replace(&mut self.current, Page::new());
        self.pages.push(current);
        self.current_state = GraphicsState::initial();
    }

    pub fn current_command_count(&self) -> usize {
        self.current.commands.len()
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn finish(mut self) -> Document {
        if !self.current.commands.is_empty() {
            self.show_page();
        }
        Document {
            page_size: self.page_size,
            pages: self.pages,
            images: self.images,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_decode::decode;
    use crate::image_decode::tests::png_bytes;
    use crate::model::ImagePayload;

    #[test]
    fn redundant_state_changes_are_dropped() {
        let mut canvas = Canvas::new(Size::a4());
        let red = Color::rgb(1.0, 0.0, 0.0);
        canvas.set_fill_color(red);
        canvas.set_fill_color(red);
        canvas.set_font(Base14Font::Helvetica, Pt::from_i32(12));
        canvas.set_font(Base14Font::HelveticaBold, Pt::from_i32(12));
        assert_eq!(canvas.current_command_count(), 2);
    }

    #[test]
    fn show_page_resets_graphics_state() {
        let mut canvas = Canvas::new(Size::a4());
        let red = Color::rgb(1.0, 0.0, 0.0);
        canvas.set_fill_color(red);
        canvas.draw_rect(Pt::ZERO, Pt::ZERO, Pt::from_i32(10), Pt::from_i32(10));
        canvas.show_page();
        canvas.set_fill_color(red);
        assert_eq!(canvas.current_command_count(), 1);
        assert_eq!(canvas.page_count(), 1);
    }

    #[test]
    fn finish_keeps_finalized_pages_only_once() {
        let mut canvas = Canvas::new(Size::a4());
        canvas.draw_string(Pt::ZERO, Pt::ZERO, "one");
        canvas.show_page();
        canvas.draw_string(Pt::ZERO, Pt::ZERO, "two");
        let doc = canvas.finish();
        assert_eq!(doc.pages.len(), 2);
        assert_eq!(doc.pages[1].texts().collect::<Vec<_>>(), vec!["two"]);
    }

    #[test]
    fn identical_rasters_register_once() {
        let mut canvas = Canvas::new(Size::a4());
        let payload = ImagePayload::Bytes(png_bytes(2, 2, 255));
        let a = canvas.register_image(Arc::new(decode(&payload).expect("decode")));
        let b = canvas.register_image(Arc::new(decode(&payload).expect("decode")));
        assert_eq!(a, b);
        canvas.draw_image(Pt::ZERO, Pt::ZERO, Pt::from_i32(2), Pt::from_i32(2), a);
        let doc = canvas.finish();
        assert_eq!(doc.images.len(), 1);
        assert_eq!(doc.pages[0].image_count(), 1);
    }
}
