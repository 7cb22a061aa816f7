use crate::canvas::Document;
use crate::debug::DebugLogger;
use crate::doc_context::{AssemblyPhase, RenderState};
use crate::grid::paginate;
use crate::metrics::{PageKind, PageMetrics};
use crate::model::CatalogDocument;
use crate::painter::{PageOutcome, PagePainter, PainterOptions};
use crate::theme::Theme;
use crate::types::Size;
use std::time::Instant;

pub(crate) struct Assembly {
    pub document: Document,
    pub pages: Vec<PageMetrics>,
}

/// Runs Start -> Cover -> SectionLoop -> Done over one document. Every page is
/// painted completely and finalized before the next one is opened.
pub(crate) fn assemble(
    catalog: &CatalogDocument,
    page_size: Size,
    options: &PainterOptions,
    debug: Option<&DebugLogger>,
) -> Assembly {
    let mut state = RenderState::new(Theme::for_index(catalog.theme_index), page_size);
    let painter = PagePainter::new(catalog, state.theme(), options, debug);
    let mut pages = Vec::new();

    state.enter(AssemblyPhase::Cover);
    let started = Instant::now();
    let page_number = state.begin_page();
    let outcome = painter.paint_cover(state.canvas_mut(), page_number);
    pages.push(finish_page(
        &mut state,
        debug,
        PageKind::Cover,
        None,
        outcome,
        started,
    ));

    state.enter(AssemblyPhase::SectionLoop);
    for section in &catalog.sections {
        if section.items.is_empty() {
            log::debug!("skipping empty section {:?}", section.name);
            continue;
        }
        for tile in paginate(&section.items) {
            let started = Instant::now();
            let page_number = state.begin_page();
            let outcome =
                painter.paint_content(state.canvas_mut(), &section.name, &tile, page_number);
            pages.push(finish_page(
                &mut state,
                debug,
                PageKind::Content,
                Some(&section.name),
                outcome,
                started,
            ));
        }
    }

    state.enter(AssemblyPhase::Done);
    log::debug!(
        "catalog {:?} assembled into {} pages",
        catalog.display_name,
        state.page_number()
    );
    Assembly {
        document: state.finish(),
        pages,
    }
}

fn finish_page(
    state: &mut RenderState,
    debug: Option<&DebugLogger>,
    kind: PageKind,
    section: Option<&str>,
    outcome: PageOutcome,
    started: Instant,
) -> PageMetrics {
    let page_number = state.page_number();
    let command_count = state.canvas_mut().current_command_count();
    state.finalize_page();
    if let Some(debug) = debug {
        debug.log_page(page_number, kind.as_str(), section, outcome.item_count);
    }
    log::debug!(
        "page {page_number} ({}) painted with {} items",
        kind.as_str(),
        outcome.item_count
    );
    PageMetrics {
        page_number,
        kind,
        section: section.map(str::to_string),
        item_count: outcome.item_count,
        images_drawn: outcome.images_drawn,
        images_skipped: outcome.images_skipped,
        command_count,
        content_bytes: 0,
        render_ms: started.elapsed().as_secs_f64() * 1000.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Command;
    use crate::grid::TILE_SLOTS;
    use crate::model::{Item, Section};
    use crate::painter::slot_origin;

    fn rings(count: usize) -> Section {
        let items = (1..=count)
            .map(|i| Item::new(format!("R{i}"), "").with_attribute("Metal: silver"))
            .collect();
        Section::new("Rings", items)
    }

    fn label_position(page: &crate::canvas::Page, text: &str) -> Option<(crate::types::Pt, crate::types::Pt)> {
        // The foreground copy is the second of each shadow pair.
        page.commands
            .iter()
            .filter_map(|cmd| match cmd {
                Command::DrawString { x, y, text: t } if t == text => Some((*x, *y)),
                _ => None,
            })
            .nth(1)
    }

    #[test]
    fn rings_example_produces_three_pages() {
        let catalog = CatalogDocument::new("Lumen").with_section(rings(10));
        let options = PainterOptions::default();
        let assembly = assemble(&catalog, Size::a4(), &options, None);
        let doc = assembly.document;
        assert_eq!(doc.pages.len(), 3);
        assert_eq!(assembly.pages.len(), 3);

        let last = &doc.pages[2];
        assert!(last.texts().any(|t| t == "3"));
        assert_eq!(last.meta("catalog.page"), Some("3"));

        let (x0, _) = slot_origin(0, 0);
        let r1 = label_position(&doc.pages[1], "Code: R1").expect("R1 on first content page");
        assert_eq!(r1.0, x0);
        let r10 = label_position(&doc.pages[2], "Code: R10").expect("R10 on second content page");
        assert_eq!(r10, r1);

        let codes_on_last = last.texts().filter(|t| t.starts_with("Code: ")).count();
        assert_eq!(codes_on_last, 2);
        assert_eq!(assembly.pages[2].item_count, 1);
    }

    #[test]
    fn page_count_is_cover_plus_tiles_per_section() {
        let catalog = CatalogDocument::new("Lumen")
            .with_section(rings(9))
            .with_section(Section::new("Empty", Vec::new()))
            .with_section(rings(19))
            .with_section(rings(1));
        let options = PainterOptions::default();
        let assembly = assemble(&catalog, Size::a4(), &options, None);
        let expected = 1 + 9usize.div_ceil(TILE_SLOTS) + 19usize.div_ceil(TILE_SLOTS) + 1;
        assert_eq!(assembly.document.pages.len(), expected);
        let numbers: Vec<usize> = assembly.pages.iter().map(|p| p.page_number).collect();
        assert_eq!(numbers, (1..=expected).collect::<Vec<_>>());
        assert!(
            assembly
                .pages
                .iter()
                .all(|p| p.section.as_deref() != Some("Empty"))
        );
    }

    #[test]
    fn catalog_without_sections_renders_only_the_cover() {
        let catalog = CatalogDocument::new("Lumen");
        let options = PainterOptions::default();
        let assembly = assemble(&catalog, Size::a4(), &options, None);
        assert_eq!(assembly.document.pages.len(), 1);
        assert_eq!(assembly.pages[0].kind, PageKind::Cover);
    }

    #[test]
    fn out_of_range_theme_uses_the_first_palette() {
        let mut catalog = CatalogDocument::new("Lumen").with_section(rings(1));
        catalog.theme_index = 42;
        let options = PainterOptions::default();
        let assembly = assemble(&catalog, Size::a4(), &options, None);
        let first = Theme::for_index(0);
        let fills: Vec<_> = assembly.document.pages[1]
            .commands
            .iter()
            .filter_map(|cmd| match cmd {
                Command::SetFillColor(color) => Some(*color),
                _ => None,
            })
            .collect();
        assert!(fills.contains(&first.background));
        assert!(fills.contains(&first.accent));
    }
}
