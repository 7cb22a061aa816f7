use crate::canvas::Canvas;
use crate::debug::DebugLogger;
use crate::font::{Base14Font, measure_text_width};
use crate::grid::Tile;
use crate::image_decode::{self, DecodeError, DecodedImage, FitEdge};
use crate::model::{CatalogDocument, Item};
use crate::theme::Theme;
use crate::types::{Color, Pt};
use crate::wrap::wrap;
use std::sync::Arc;

// Layout is expressed in top-left page space, in points.
const HEADER_BAND: f32 = 100.0;
const FOOTER_BAND: f32 = 35.0;
const SIDE_MARGIN: f32 = 40.0;

const HEADER_FONT_SIZE: f32 = 9.0;
const HEADER_NAME_BASELINE: f32 = 45.0;
const HEADER_CONTACT_BASELINE: f32 = 60.0;

const TITLE_FONT_SIZE: f32 = 17.0;
const TITLE_BASELINE: f32 = 147.0;
const TITLE_RULE_Y: f32 = 142.0;
const TITLE_RULE_LEFT_END: f32 = 200.0;
const TITLE_RULE_RIGHT_START: f32 = 195.0;
const TITLE_RULE_RIGHT_END: f32 = 50.0;
const TITLE_BOX_PADDING: f32 = 6.0;
const RULE_BOTTOM_MARGIN: f32 = 80.0;

const SLOT_ORIGIN_X: f32 = 80.0;
const SLOT_PITCH_X: f32 = 170.0;
const SLOT_ANCHOR_Y: f32 = 280.0;
const SLOT_PITCH_Y: f32 = 210.0;
const IMAGE_BUDGET_DIVISOR: f32 = 6.5;

const LABEL_FONT_SIZE: f32 = 8.0;
const LABEL_LINE_STEP: f32 = 10.0;
const LABEL_FIRST_LINE: usize = 2;

const FOOTER_BASELINE_FROM_BOTTOM: f32 = 15.0;
const PAGE_NUMBER_FONT_SIZE: f32 = 10.0;
const ATTRIBUTION_FONT_SIZE: f32 = 8.0;

const CORNER_LOGO_EDGE: u32 = 50;
const CORNER_LOGO_TOP: f32 = 25.0;
const COVER_LOGO_EDGE: u32 = 300;

const COVER_BORDER_INSET: f32 = 18.0;
const COVER_TRIANGLE: f32 = 190.0;
const COVER_NAME_FONT_SIZE: f32 = 18.0;
const COVER_NAME_BELOW_CENTER: f32 = 200.0;
const COVER_CONTACT_FONT_SIZE: f32 = 12.0;
const COVER_CONTACT_BELOW_CENTER: f32 = 250.0;
const COVER_CONTACT_STEP: f32 = 20.0;

pub const SHADOW_OFFSET: f32 = 1.5;
pub const SHADOW_TONE: f32 = 0.6;

const TEXT_COLOR: Color = Color {
    r: 0.17,
    g: 0.17,
    b: 0.17,
};

fn pt(value: f32) -> Pt {
    Pt::from_f32(value)
}

/// Offset and tone of the drop shadow drawn under every filled shape and label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shadow {
    pub offset: Pt,
    pub color: Color,
}

impl Shadow {
    pub fn of(color: Color) -> Self {
        Self {
            offset: pt(SHADOW_OFFSET),
            color: color.shade(SHADOW_TONE),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// Draws `text` twice: the shadow copy shifted right and down, then the
/// foreground. `y` is the top of the text box.
pub fn draw_shadowed_text(
    canvas: &mut Canvas,
    x: Pt,
    y: Pt,
    text: &str,
    color: Color,
    shadow: Shadow,
) {
    canvas.set_fill_color(shadow.color);
    canvas.draw_string(x + shadow.offset, y + shadow.offset, text);
    canvas.set_fill_color(color);
    canvas.draw_string(x, y, text);
}

pub fn draw_shadowed_polygon(canvas: &mut Canvas, points: &[(Pt, Pt)], color: Color, shadow: Shadow) {
    if points.len() < 3 {
        return;
    }
    canvas.set_fill_color(shadow.color);
    trace_polygon(canvas, points, shadow.offset);
    canvas.fill();
    canvas.set_fill_color(color);
    trace_polygon(canvas, points, Pt::ZERO);
    canvas.fill();
}

pub fn draw_shadowed_rect(
    canvas: &mut Canvas,
    x: Pt,
    y: Pt,
    width: Pt,
    height: Pt,
    color: Color,
    shadow: Shadow,
) {
    canvas.set_fill_color(shadow.color);
    canvas.draw_rect(x + shadow.offset, y + shadow.offset, width, height);
    canvas.set_fill_color(color);
    canvas.draw_rect(x, y, width, height);
}

fn trace_polygon(canvas: &mut Canvas, points: &[(Pt, Pt)], offset: Pt) {
    let (first_x, first_y) = points[0];
    canvas.move_to(first_x + offset, first_y + offset);
    for &(x, y) in &points[1..] {
        canvas.line_to(x + offset, y + offset);
    }
    canvas.close_path();
}

fn stroke_line(canvas: &mut Canvas, from: (Pt, Pt), to: (Pt, Pt)) {
    canvas.move_to(from.0, from.1);
    canvas.line_to(to.0, to.1);
    canvas.stroke();
}

fn stroke_rect(canvas: &mut Canvas, x: Pt, y: Pt, width: Pt, height: Pt) {
    canvas.move_to(x, y);
    canvas.line_to(x + width, y);
    canvas.line_to(x + width, y + height);
    canvas.line_to(x, y + height);
    canvas.close_path();
    canvas.stroke();
}

/// Places a single line by its baseline, anchored left, centered or right.
#[allow(clippy::too_many_arguments)]
fn place_text(
    canvas: &mut Canvas,
    font: Base14Font,
    size: f32,
    anchor_x: Pt,
    baseline: Pt,
    align: TextAlign,
    text: &str,
    color: Color,
) {
    let size = pt(size);
    canvas.set_font(font, size);
    let x = match align {
        TextAlign::Left => anchor_x,
        TextAlign::Center => anchor_x - measure_text_width(font, size, text) / 2,
        TextAlign::Right => anchor_x - measure_text_width(font, size, text),
    };
    draw_shadowed_text(canvas, x, baseline - size, text, color, Shadow::of(color));
}

/// Top-left corner of a slot's label anchor. The image box sits directly above it.
pub fn slot_origin(row: usize, column: usize) -> (Pt, Pt) {
    (
        pt(SLOT_ORIGIN_X + SLOT_PITCH_X * column as f32),
        pt(SLOT_ANCHOR_Y + SLOT_PITCH_Y * row as f32),
    )
}

/// Baseline of the `index`-th label line in a slot.
pub fn label_baseline(row: usize, index: usize) -> Pt {
    let (_, anchor) = slot_origin(row, 0);
    anchor + pt(LABEL_LINE_STEP * (LABEL_FIRST_LINE + index) as f32)
}

/// Lines printed under an item image, top to bottom.
pub fn label_lines(item: &Item, wide: usize, narrow: usize) -> Vec<String> {
    let mut lines = vec![format!("Code: {}", item.code)];
    if !item.name.trim().is_empty() {
        lines.extend(wrap(&format!("Description: {}", item.name), wide));
    }
    for attribute in &item.attribute_lines {
        lines.extend(wrap(attribute, narrow));
    }
    lines
}

/// Digits only. 10 and 11 digit numbers are grouped, longer ones are kept
/// verbatim and shorter ones are dropped.
pub fn format_phone(raw: &str) -> Option<String> {
    let digits: String = raw.chars().filter(|ch| ch.is_ascii_digit()).collect();
    match digits.len() {
        0..=9 => None,
        10 => Some(format!(
            "({}) {}-{}",
            &digits[..2],
            &digits[2..6],
            &digits[6..]
        )),
        11 => Some(format!(
            "({}) {}-{}",
            &digits[..2],
            &digits[2..7],
            &digits[7..]
        )),
        _ => Some(digits),
    }
}

pub fn capitalize(text: &str) -> String {
    let mut chars = text.trim().chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

#[derive(Debug, Clone)]
pub struct PainterOptions {
    pub attribution: String,
    pub description_wrap: usize,
    pub attribute_wrap: usize,
}

impl Default for PainterOptions {
    fn default() -> Self {
        Self {
            attribution: "Made with Vitrine".to_string(),
            description_wrap: 30,
            attribute_wrap: 25,
        }
    }
}

/// What a painted page contributed, for metrics and logging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageOutcome {
    pub item_count: usize,
    pub images_drawn: usize,
    pub images_skipped: usize,
}

enum LogoState {
    Absent,
    Ready(Arc<DecodedImage>),
    Broken(String),
}

/// Paints cover and content pages for one document. Holds no page state: the
/// page number is supplied by the caller for every page.
pub struct PagePainter<'a> {
    document: &'a CatalogDocument,
    theme: Theme,
    options: &'a PainterOptions,
    debug: Option<&'a DebugLogger>,
    logo: LogoState,
}

impl<'a> PagePainter<'a> {
    pub(crate) fn new(
        document: &'a CatalogDocument,
        theme: Theme,
        options: &'a PainterOptions,
        debug: Option<&'a DebugLogger>,
    ) -> Self {
        let logo = match document.logo_payload() {
            None => LogoState::Absent,
            Some(payload) => match image_decode::decode(payload) {
                Ok(image) => LogoState::Ready(Arc::new(image)),
                Err(err) => {
                    log::warn!("catalog logo could not be decoded: {err}");
                    LogoState::Broken(err.to_string())
                }
            },
        };
        Self {
            document,
            theme,
            options,
            debug,
            logo,
        }
    }

    pub fn paint_cover(&self, canvas: &mut Canvas, page_number: usize) -> PageOutcome {
        let mut outcome = PageOutcome::default();
        let size = canvas.page_size();
        let (w, h) = (size.width, size.height);
        let accent = self.theme.accent;

        canvas.meta("catalog.page", page_number.to_string());
        self.paint_bands(canvas);

        let inset = pt(COVER_BORDER_INSET);
        canvas.set_stroke_color(accent.shade(SHADOW_TONE));
        canvas.set_line_width(pt(2.0));
        stroke_rect(
            canvas,
            inset + pt(SHADOW_OFFSET),
            inset + pt(SHADOW_OFFSET),
            w - inset * 2,
            h - inset * 2,
        );
        canvas.set_stroke_color(accent);
        stroke_rect(canvas, inset, inset, w - inset * 2, h - inset * 2);

        let corner = pt(COVER_TRIANGLE);
        let shadow = Shadow::of(accent);
        draw_shadowed_polygon(
            canvas,
            &[(Pt::ZERO, Pt::ZERO), (corner, Pt::ZERO), (Pt::ZERO, corner)],
            accent,
            shadow,
        );
        draw_shadowed_polygon(
            canvas,
            &[(w, h - corner), (w, h), (w - corner, h)],
            accent,
            shadow,
        );
        self.paint_header_text(canvas);
        self.paint_footer(canvas, page_number);

        if let Some(image) = self.logo_for(page_number, "cover logo", &mut outcome) {
            let (draw_w, draw_h) =
                image_decode::scaled_size(image.width, image.height, COVER_LOGO_EDGE, FitEdge::Height);
            let (draw_w, draw_h) = (pt(draw_w as f32), pt(draw_h as f32));
            let resource_id = canvas.register_image(image);
            canvas.draw_image((w - draw_w) / 2, (h - draw_h) / 2, draw_w, draw_h, resource_id);
            outcome.images_drawn += 1;
        }

        let center_x = w / 2;
        let center_y = h / 2;
        if !self.document.display_name.trim().is_empty() {
            place_text(
                canvas,
                Base14Font::HelveticaBold,
                COVER_NAME_FONT_SIZE,
                center_x,
                center_y + pt(COVER_NAME_BELOW_CENTER),
                TextAlign::Center,
                self.document.display_name.trim(),
                TEXT_COLOR,
            );
        }
        let mut baseline = center_y + pt(COVER_CONTACT_BELOW_CENTER);
        for line in self.contact_lines() {
            place_text(
                canvas,
                Base14Font::Helvetica,
                COVER_CONTACT_FONT_SIZE,
                center_x,
                baseline,
                TextAlign::Center,
                &line,
                TEXT_COLOR,
            );
            baseline += pt(COVER_CONTACT_STEP);
        }
        outcome
    }

    pub fn paint_content(
        &self,
        canvas: &mut Canvas,
        section: &str,
        tile: &Tile<'_, Item>,
        page_number: usize,
    ) -> PageOutcome {
        let mut outcome = PageOutcome::default();
        let w = canvas.page_size().width;

        canvas.meta("catalog.page", page_number.to_string());
        canvas.meta("catalog.section", section);

        self.paint_bands(canvas);
        self.paint_header_text(canvas);
        self.paint_title_banner(canvas, section);

        let box_edge = (w.to_f32() / IMAGE_BUDGET_DIVISOR).floor();
        for (row, column, item) in tile.occupied() {
            outcome.item_count += 1;
            let (x, anchor) = slot_origin(row, column);
            if let Some(payload) = &item.image {
                match image_decode::decode(payload) {
                    Ok(image) => {
                        let (fit_w, fit_h) =
                            image_decode::fit_within(image.width, image.height, box_edge as u32);
                        let (fit_w, fit_h) = (pt(fit_w as f32), pt(fit_h as f32));
                        let edge = pt(box_edge);
                        let left = x + (edge - fit_w) / 2;
                        let top = anchor - edge + (edge - fit_h) / 2;
                        let resource_id = canvas.register_image(Arc::new(image));
                        canvas.draw_image(left, top, fit_w, fit_h, resource_id);
                        outcome.images_drawn += 1;
                    }
                    Err(err) => {
                        self.report_skipped(page_number, &format!("item {}", item.code), &err);
                        outcome.images_skipped += 1;
                    }
                }
            }
            let lines = label_lines(
                item,
                self.options.description_wrap,
                self.options.attribute_wrap,
            );
            for (index, line) in lines.iter().enumerate() {
                place_text(
                    canvas,
                    Base14Font::Helvetica,
                    LABEL_FONT_SIZE,
                    x,
                    label_baseline(row, index),
                    TextAlign::Left,
                    line,
                    TEXT_COLOR,
                );
            }
        }

        self.paint_footer(canvas, page_number);

        if let Some(image) = self.logo_for(page_number, "corner logo", &mut outcome) {
            let (draw_w, draw_h) =
                image_decode::scaled_size(image.width, image.height, CORNER_LOGO_EDGE, FitEdge::Height);
            let resource_id = canvas.register_image(image);
            canvas.draw_image(
                pt(SIDE_MARGIN),
                pt(CORNER_LOGO_TOP),
                pt(draw_w as f32),
                pt(draw_h as f32),
                resource_id,
            );
            outcome.images_drawn += 1;
        }
        outcome
    }

    fn paint_bands(&self, canvas: &mut Canvas) {
        let size = canvas.page_size();
        let (w, h) = (size.width, size.height);
        let background = self.theme.background;
        let accent = self.theme.accent;
        let band_shadow = Shadow::of(background);
        draw_shadowed_rect(canvas, Pt::ZERO, Pt::ZERO, w, pt(HEADER_BAND), background, band_shadow);
        draw_shadowed_rect(
            canvas,
            Pt::ZERO,
            h - pt(FOOTER_BAND),
            w,
            pt(FOOTER_BAND),
            background,
            band_shadow,
        );

        let shadow = Shadow::of(accent);
        let header = pt(HEADER_BAND);
        draw_shadowed_polygon(
            canvas,
            &[
                (Pt::ZERO, header),
                (pt(90.0), header),
                (pt(190.0), Pt::ZERO),
                (Pt::ZERO, Pt::ZERO),
            ],
            accent,
            shadow,
        );
        let footer_top = h - pt(FOOTER_BAND);
        draw_shadowed_polygon(
            canvas,
            &[
                (w, footer_top),
                (w - pt(60.0), footer_top),
                (w - pt(95.0), h),
                (w, h),
            ],
            accent,
            shadow,
        );
    }

    fn paint_header_text(&self, canvas: &mut Canvas) {
        let right = canvas.page_size().width - pt(SIDE_MARGIN);
        let name = self.document.display_name.trim();
        if !name.is_empty() {
            place_text(
                canvas,
                Base14Font::Helvetica,
                HEADER_FONT_SIZE,
                right,
                pt(HEADER_NAME_BASELINE),
                TextAlign::Right,
                name,
                TEXT_COLOR,
            );
        }
        if let Some(phone) = non_empty(&self.document.contact.phone).and_then(format_phone) {
            place_text(
                canvas,
                Base14Font::Helvetica,
                HEADER_FONT_SIZE,
                right,
                pt(HEADER_CONTACT_BASELINE),
                TextAlign::Right,
                &format!("Contact: {phone}"),
                TEXT_COLOR,
            );
        }
    }

    fn paint_title_banner(&self, canvas: &mut Canvas, section: &str) {
        let size = canvas.page_size();
        let (w, h) = (size.width, size.height);
        let accent = self.theme.accent;
        let title = capitalize(section);
        let font_size = pt(TITLE_FONT_SIZE);
        let title_width = measure_text_width(Base14Font::HelveticaBold, font_size, &title);
        let padding = pt(TITLE_BOX_PADDING);
        let box_x = (w - title_width) / 2 - padding;
        let box_y = pt(TITLE_BASELINE) - font_size - padding;
        let box_w = title_width + padding * 2;
        let box_h = font_size + padding * 2;

        draw_shadowed_rect(
            canvas,
            box_x,
            box_y,
            box_w,
            box_h,
            self.theme.background,
            Shadow::of(self.theme.background),
        );
        canvas.set_stroke_color(accent);
        canvas.set_line_width(pt(1.0));
        stroke_rect(canvas, box_x, box_y, box_w, box_h);

        let rule_y = pt(TITLE_RULE_Y);
        let margin = pt(SIDE_MARGIN);
        stroke_line(canvas, (margin, rule_y), (pt(TITLE_RULE_LEFT_END), rule_y));
        stroke_line(
            canvas,
            (w - pt(TITLE_RULE_RIGHT_START), rule_y),
            (w - pt(TITLE_RULE_RIGHT_END), rule_y),
        );
        stroke_line(
            canvas,
            (margin, rule_y),
            (margin, h - pt(RULE_BOTTOM_MARGIN)),
        );

        if !title.is_empty() {
            place_text(
                canvas,
                Base14Font::HelveticaBold,
                TITLE_FONT_SIZE,
                w / 2,
                pt(TITLE_BASELINE),
                TextAlign::Center,
                &title,
                accent,
            );
        }
    }

    /// Page number at the right, attribution centered. Shared by cover and content pages.
    fn paint_footer(&self, canvas: &mut Canvas, page_number: usize) {
        let size = canvas.page_size();
        let baseline = size.height - pt(FOOTER_BASELINE_FROM_BOTTOM);
        place_text(
            canvas,
            Base14Font::HelveticaBold,
            PAGE_NUMBER_FONT_SIZE,
            size.width - pt(SIDE_MARGIN),
            baseline,
            TextAlign::Right,
            &page_number.to_string(),
            self.theme.accent,
        );
        place_text(
            canvas,
            Base14Font::CourierOblique,
            ATTRIBUTION_FONT_SIZE,
            size.width / 2,
            baseline,
            TextAlign::Center,
            &self.options.attribution,
            self.theme.accent,
        );
    }

    fn contact_lines(&self) -> Vec<String> {
        let contact = &self.document.contact;
        let mut lines = Vec::new();
        if let Some(phone) = non_empty(&contact.phone).and_then(format_phone) {
            lines.push(format!("Phone: {phone}"));
        }
        if let Some(email) = non_empty(&contact.email) {
            lines.push(format!("Email: {email}"));
        }
        if let Some(handle) = non_empty(&contact.social_handle) {
            let handle = handle.trim_start_matches('@');
            if !handle.is_empty() {
                lines.push(format!("Social: @{handle}"));
            }
        }
        if let Some(website) = non_empty(&contact.website) {
            lines.push(format!("Website: {website}"));
        }
        lines
    }

    fn logo_for(
        &self,
        page_number: usize,
        context: &str,
        outcome: &mut PageOutcome,
    ) -> Option<Arc<DecodedImage>> {
        match &self.logo {
            LogoState::Absent => None,
            LogoState::Ready(image) => Some(Arc::clone(image)),
            LogoState::Broken(reason) => {
                if let Some(debug) = self.debug {
                    debug.log_image_skipped(page_number, context, reason);
                }
                outcome.images_skipped += 1;
                None
            }
        }
    }

    fn report_skipped(&self, page_number: usize, context: &str, err: &DecodeError) {
        log::warn!("page {page_number}: skipping {context} image: {err}");
        if let Some(debug) = self.debug {
            debug.log_image_skipped(page_number, context, &err.to_string());
        }
    }
}
