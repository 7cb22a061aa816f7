#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageKind {
    #[default]
    Cover,
    Content,
}

impl PageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PageKind::Cover => "cover",
            PageKind::Content => "content",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PageMetrics {
    pub page_number: usize,
    pub kind: PageKind,
    pub section: Option<String>,
    pub item_count: usize,
    pub images_drawn: usize,
    pub images_skipped: usize,
    pub command_count: usize,
    pub content_bytes: usize,
    pub render_ms: f64,
}

#[derive(Debug, Clone, Default)]
pub struct DocumentMetrics {
    pub pages: Vec<PageMetrics>,
    pub total_render_ms: f64,
    pub total_bytes: usize,
}

impl DocumentMetrics {
    pub fn images_skipped(&self) -> usize {
        self.pages.iter().map(|page| page.images_skipped).sum()
    }
}
