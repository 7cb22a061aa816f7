use crate::canvas::{Command, Document, Page};
use crate::font::Base14Font;
use crate::image_decode::{DecodedImage, PixelData};
use crate::types::{Color, Pt, Size};
use fixed::types::I32F32;
use std::collections::{BTreeMap, HashMap};
use std::io::{self, Write};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub(crate) struct PdfOptions {
    // When true, an image registered once on the canvas is embedded once and
    // every draw of it references the same XObject.
    pub reuse_xobjects: bool,
    pub document_title: Option<String>,
}

impl Default for PdfOptions {
    fn default() -> Self {
        Self {
            reuse_xobjects: true,
            document_title: None,
        }
    }
}

const PDF_CATALOG_ID: usize = 1;
const PDF_PAGES_ID: usize = 2;
const PDF_RESOURCES_ID: usize = 3;

// Keep the page tree shallow but avoid huge /Kids arrays for large outputs.
const PDF_PAGE_NODE_MAX_KIDS: usize = 256;

struct PdfPageNode {
    id: usize,
    kids: Vec<usize>,
}

/// Sizes reported back once a document has been written.
#[derive(Debug, Clone, Default)]
pub(crate) struct PdfWriteReport {
    pub total_bytes: usize,
    pub page_content_bytes: Vec<usize>,
}

pub(crate) struct PdfStreamWriter<'a, W: Write> {
    writer: &'a mut W,
    offset: usize,
    offsets: Vec<usize>, // index by object id; 0 is the free object.
    next_id: usize,
    page_size: Size,
    options: PdfOptions,

    fonts: BTreeMap<Base14Font, (String, usize)>,

    image_resources: Vec<(String, usize)>,
    image_name_map: HashMap<String, String>,
    next_image_index: usize,
    image_bytes_total: usize,

    page_nodes: Vec<PdfPageNode>,
    current_node: Option<PdfPageNode>,
    page_content_bytes: Vec<usize>,
}

impl<'a, W: Write> PdfStreamWriter<'a, W> {
    pub(crate) fn new(writer: &'a mut W, page_size: Size, options: PdfOptions) -> io::Result<Self> {
        let mut offset: usize = 0;
        write_bytes(writer, b"%PDF-1.7\n", &mut offset)?;
        write_bytes(writer, b"%\xE2\xE3\xCF\xD3\n", &mut offset)?;
        Ok(Self {
            writer,
            offset,
            offsets: vec![0; PDF_RESOURCES_ID + 1],
            next_id: PDF_RESOURCES_ID + 1,
            page_size,
            options,
            fonts: BTreeMap::new(),
            image_resources: Vec::new(),
            image_name_map: HashMap::new(),
            next_image_index: 1,
            image_bytes_total: 0,
            page_nodes: Vec::new(),
            current_node: None,
            page_content_bytes: Vec::new(),
        })
    }

    pub(crate) fn add_page(
        &mut self,
        page: &Page,
        images: &BTreeMap<String, Arc<DecodedImage>>,
    ) -> io::Result<()> {
        let parent_id = self.ensure_page_node();
        let start = self.alloc_ids(2);
        let content_id = start;
        let page_id = start + 1;
        if let Some(node) = self.current_node.as_mut() {
            node.kids.push(page_id);
        }

        let content_stream = self.render_page(page, images)?;
        self.page_content_bytes.push(content_stream.len());
        self.write_object(content_id, &stream_object(&content_stream))?;

        let page_obj = format!(
            "<< /Type /Page /Parent {} 0 R /MediaBox [0 0 {} {}] /Resources {} 0 R /Contents {} 0 R >>",
            parent_id,
            fmt_pt(self.page_size.width),
            fmt_pt(self.page_size.height),
            PDF_RESOURCES_ID,
            content_id,
        );
        self.write_object(page_id, &page_obj)
    }

    pub(crate) fn finish(mut self) -> io::Result<PdfWriteReport> {
        if let Some(node) = self.current_node.take() {
            self.page_nodes.push(node);
        }

        let fonts = std::mem::take(&mut self.fonts);
        let mut font_entries = Vec::with_capacity(fonts.len());
        for (font, (resource, id)) in &fonts {
            self.write_object(*id, &font_object(*font))?;
            font_entries.push((resource.clone(), *id));
        }

        let mut resources = format!("<< /Font {}", named_refs(&font_entries));
        if !self.image_resources.is_empty() {
            resources.push_str(&format!(" /XObject {}", named_refs(&self.image_resources)));
        }
        resources.push_str(" >>");
        self.write_object(PDF_RESOURCES_ID, &resources)?;

        let page_nodes = std::mem::take(&mut self.page_nodes);
        let mut page_count = 0usize;
        for node in &page_nodes {
            page_count += node.kids.len();
            let kids = node
                .kids
                .iter()
                .map(|id| format!("{} 0 R", id))
                .collect::<Vec<_>>()
                .join(" ");
            self.write_object(
                node.id,
                &format!(
                    "<< /Type /Pages /Parent {} 0 R /Kids [{}] /Count {} >>",
                    PDF_PAGES_ID,
                    kids,
                    node.kids.len()
                ),
            )?;
        }
        let root_kids = page_nodes
            .iter()
            .map(|node| format!("{} 0 R", node.id))
            .collect::<Vec<_>>()
            .join(" ");
        self.write_object(
            PDF_PAGES_ID,
            &format!(
                "<< /Type /Pages /Kids [{}] /Count {} >>",
                root_kids, page_count
            ),
        )?;

        let doc_title = self.options.document_title.clone();
        let mut catalog = format!("<< /Type /Catalog /Pages {} 0 R", PDF_PAGES_ID);
        if doc_title.is_some() {
            catalog.push_str(" /ViewerPreferences << /DisplayDocTitle true >>");
        }
        catalog.push_str(" >>");
        self.write_object(PDF_CATALOG_ID, &catalog)?;
        let info_id = self.alloc_ids(1);
        self.write_object(info_id, &info_object(doc_title.as_deref()))?;

        let total_objects = self.next_id.saturating_sub(1);
        let xref_start = self.offset;
        write_str(
            self.writer,
            &format!("xref\n0 {}\n", total_objects + 1),
            &mut self.offset,
        )?;
        write_bytes(self.writer, b"0000000000 65535 f \n", &mut self.offset)?;
        for id in 1..=total_objects {
            let obj_offset = self.offsets.get(id).copied().unwrap_or(0);
            write_str(
                self.writer,
                &format!("{:010} 00000 n \n", obj_offset),
                &mut self.offset,
            )?;
        }
        let trailer = format!(
            "trailer\n<< /Size {} /Root {} 0 R /Info {} 0 R >>\nstartxref\n{}\n%%EOF",
            total_objects + 1,
            PDF_CATALOG_ID,
            info_id,
            xref_start
        );
        write_str(self.writer, &trailer, &mut self.offset)?;
        self.writer.flush()?;

        log::debug!(
            "pdf written: {} bytes, {} pages, {} fonts, {} images ({} image bytes)",
            self.offset,
            page_count,
            fonts.len(),
            self.image_resources.len(),
            self.image_bytes_total
        );
        Ok(PdfWriteReport {
            total_bytes: self.offset,
            page_content_bytes: self.page_content_bytes,
        })
    }

    fn render_page(
        &mut self,
        page: &Page,
        images: &BTreeMap<String, Arc<DecodedImage>>,
    ) -> io::Result<String> {
        let page_height = self.page_size.height;
        let mut out = String::new();
        let mut current_font_size = Pt::from_f32(12.0);
        let mut current_font = Base14Font::Helvetica;

        for cmd in &page.commands {
            match cmd {
                Command::Meta { .. } => {}
                Command::SetFillColor(color) => out.push_str(&color_to_pdf_fill(*color)),
                Command::SetStrokeColor(color) => out.push_str(&color_to_pdf_stroke(*color)),
                Command::SetLineWidth(width) => {
                    out.push_str(&format!("{} w\n", fmt_pt(*width)));
                }
                Command::SetFont(font) => current_font = *font,
                Command::SetFontSize(size) => current_font_size = *size,
                Command::MoveTo { x, y } => {
                    out.push_str(&format!("{} {} m\n", fmt_pt(*x), fmt_pt(page_height - *y)));
                }
                Command::LineTo { x, y } => {
                    out.push_str(&format!("{} {} l\n", fmt_pt(*x), fmt_pt(page_height - *y)));
                }
                Command::ClosePath => out.push_str("h\n"),
                Command::Fill => out.push_str("f\n"),
                Command::Stroke => out.push_str("S\n"),
                Command::DrawString { x, y, text } => {
                    let resource = self.ensure_font(current_font);
                    let encoded = encode_winansi_pdf_string(text);
                    if encoded.replaced > 0 {
                        log::debug!(
                            "{} characters outside WinAnsi replaced in {:?}",
                            encoded.replaced,
                            text
                        );
                    }
                    out.push_str("BT\n");
                    out.push_str(&format!("/{} {} Tf\n", resource, fmt_pt(current_font_size)));
                    out.push_str(&format!(
                        "{} {} Td\n",
                        fmt_pt(*x),
                        fmt_pt(page_height - *y - current_font_size)
                    ));
                    out.push_str(&format!("({}) Tj\n", encoded.text));
                    out.push_str("ET\n");
                }
                Command::DrawRect {
                    x,
                    y,
                    width,
                    height,
                } => {
                    out.push_str(&format!(
                        "{} {} {} {} re\nf\n",
                        fmt_pt(*x),
                        fmt_pt(page_height - *y - *height),
                        fmt_pt(*width),
                        fmt_pt(*height)
                    ));
                }
                Command::DrawImage {
                    x,
                    y,
                    width,
                    height,
                    resource_id,
                } => {
                    let Some(name) = self.ensure_image(resource_id, images)? else {
                        log::warn!("image resource {resource_id} is not registered; draw skipped");
                        continue;
                    };
                    let draw_y = page_height - *y - *height;
                    out.push_str("q\n");
                    out.push_str(&format!(
                        "{} 0 0 {} {} {} cm\n",
                        fmt_pt(*width),
                        fmt_pt(*height),
                        fmt_pt(*x),
                        fmt_pt(draw_y)
                    ));
                    out.push_str(&format!("/{} Do\n", name));
                    out.push_str("Q\n");
                }
            }
        }
        Ok(out)
    }

    fn ensure_font(&mut self, font: Base14Font) -> String {
        if let Some((resource, _)) = self.fonts.get(&font) {
            return resource.clone();
        }
        let resource = format!("F{}", self.fonts.len() + 1);
        let id = self.alloc_ids(1);
        self.fonts.insert(font, (resource.clone(), id));
        resource
    }

    fn ensure_image(
        &mut self,
        resource_id: &str,
        images: &BTreeMap<String, Arc<DecodedImage>>,
    ) -> io::Result<Option<String>> {
        if self.options.reuse_xobjects {
            if let Some(name) = self.image_name_map.get(resource_id) {
                return Ok(Some(name.clone()));
            }
        }
        let Some(image) = images.get(resource_id) else {
            return Ok(None);
        };

        let stream = ImageStream::from_decoded(image)?;
        let smask_id = stream.alpha.as_ref().map(|_| self.alloc_ids(1));
        let obj_id = self.alloc_ids(1);
        let name = format!("Im{}", self.next_image_index);
        self.next_image_index += 1;

        self.image_bytes_total += stream.data.len();
        if let (Some(alpha), Some(mask_id)) = (stream.alpha.as_ref(), smask_id) {
            self.image_bytes_total += alpha.len();
            self.write_object(mask_id, &image_smask_object(&stream, alpha))?;
        }
        self.write_object(obj_id, &image_object(&stream, smask_id))?;
        self.image_resources.push((name.clone(), obj_id));
        if self.options.reuse_xobjects {
            self.image_name_map
                .insert(resource_id.to_string(), name.clone());
        }
        Ok(Some(name))
    }

    fn ensure_offsets_len(&mut self, required_len: usize) {
        if self.offsets.len() < required_len {
            self.offsets.resize(required_len, 0);
        }
    }

    fn alloc_ids(&mut self, count: usize) -> usize {
        let start = self.next_id;
        self.next_id = self.next_id.saturating_add(count);
        self.ensure_offsets_len(self.next_id);
        start
    }

    fn write_object(&mut self, obj_id: usize, body: &str) -> io::Result<()> {
        write_pdf_object(
            self.writer,
            &mut self.offset,
            &mut self.offsets,
            obj_id,
            body,
        )
    }

    fn ensure_page_node(&mut self) -> usize {
        let needs_new = self
            .current_node
            .as_ref()
            .map(|n| n.kids.len() >= PDF_PAGE_NODE_MAX_KIDS)
            .unwrap_or(true);
        if needs_new {
            if let Some(node) = self.current_node.take() {
                self.page_nodes.push(node);
            }
            let id = self.alloc_ids(1);
            self.current_node = Some(PdfPageNode {
                id,
                kids: Vec::with_capacity(PDF_PAGE_NODE_MAX_KIDS),
            });
        }
        self.current_node
            .as_ref()
            .map(|n| n.id)
            .unwrap_or(PDF_PAGES_ID)
    }
}

pub(crate) fn write_document<W: Write>(
    writer: &mut W,
    document: &Document,
    options: &PdfOptions,
) -> io::Result<PdfWriteReport> {
    let mut pdf = PdfStreamWriter::new(writer, document.page_size, options.clone())?;
    for page in &document.pages {
        pdf.add_page(page, &document.images)?;
    }
    pdf.finish()
}

pub(crate) fn document_to_pdf(
    document: &Document,
    options: &PdfOptions,
) -> io::Result<(Vec<u8>, PdfWriteReport)> {
    let mut out = Vec::new();
    let report = write_document(&mut out, document, options)?;
    Ok((out, report))
}

// Stream-ready samples: JPEG bytes pass through, decoded pixels are deflated.
struct ImageStream {
    width: u32,
    height: u32,
    color_space: &'static str,
    filter: &'static str,
    data: Vec<u8>,
    alpha: Option<Vec<u8>>,
}

impl ImageStream {
    fn from_decoded(image: &DecodedImage) -> io::Result<Self> {
        Ok(match &image.pixels {
            PixelData::Jpeg { data, gray } => Self {
                width: image.width,
                height: image.height,
                color_space: if *gray { "/DeviceGray" } else { "/DeviceRGB" },
                filter: "/DCTDecode",
                data: data.clone(),
                alpha: None,
            },
            PixelData::Rgb { rgb, alpha } => Self {
                width: image.width,
                height: image.height,
                color_space: "/DeviceRGB",
                filter: "/FlateDecode",
                data: flate_compress(rgb)?,
                alpha: alpha.as_deref().map(flate_compress).transpose()?,
            },
        })
    }
}

fn flate_compress(data: &[u8]) -> io::Result<Vec<u8>> {
    use flate2::Compression;
    use flate2::write::ZlibEncoder;

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}

fn image_object(image: &ImageStream, smask_id: Option<usize>) -> String {
    let stream_data = encode_stream_data(&image.data);
    let smask = smask_id
        .map(|id| format!(" /SMask {} 0 R", id))
        .unwrap_or_default();
    format!(
        "<< /Type /XObject /Subtype /Image /Width {} /Height {} /ColorSpace {} /BitsPerComponent 8 /Length {} /Filter [/ASCIIHexDecode {}]{} >>
stream
{}
endstream",
        image.width,
        image.height,
        image.color_space,
        stream_data.len(),
        image.filter,
        smask,
        stream_data
    )
}

fn image_smask_object(image: &ImageStream, alpha: &[u8]) -> String {
    let stream_data = encode_stream_data(alpha);
    format!(
        "<< /Type /XObject /Subtype /Image /Width {} /Height {} /ColorSpace /DeviceGray /BitsPerComponent 8 /Length {} /Filter [/ASCIIHexDecode /FlateDecode] >>
stream
{}
endstream",
        image.width,
        image.height,
        stream_data.len(),
        stream_data
    )
}

fn encode_stream_data(data: &[u8]) -> String {
    let mut hex = ascii_hex_encode(data);
    hex.push('>');
    hex
}

fn ascii_hex_encode(data: &[u8]) -> String {
    let mut out = String::with_capacity(data.len() * 2);
    for (index, byte) in data.iter().enumerate() {
        use std::fmt::Write;
        let _ = write!(&mut out, "{:02X}", byte);
        if index % 32 == 31 {
            out.push('\n');
        }
    }
    out
}

fn font_object(font: Base14Font) -> String {
    format!(
        "<< /Type /Font /Subtype /Type1 /BaseFont /{} /Encoding /WinAnsiEncoding >>",
        font.pdf_name()
    )
}

fn named_refs(entries: &[(String, usize)]) -> String {
    let refs = entries
        .iter()
        .map(|(resource, id)| format!("/{} {} 0 R", resource, id))
        .collect::<Vec<_>>();
    format!("<< {} >>", refs.join(" "))
}

fn stream_object(content: &str) -> String {
    format!(
        "<< /Length {} >>\nstream\n{}\nendstream",
        content.len(),
        content
    )
}

fn info_object(title: Option<&str>) -> String {
    let mut entries = vec!["/Producer (Vitrine)".to_string()];
    if let Some(title) = title {
        entries.push(format!("/Title ({})", encode_winansi_pdf_string(title).text));
    }
    format!("<< {} >>", entries.join(" "))
}

fn write_pdf_object<W: Write>(
    writer: &mut W,
    offset: &mut usize,
    offsets: &mut [usize],
    obj_id: usize,
    body: &str,
) -> io::Result<()> {
    if let Some(slot) = offsets.get_mut(obj_id) {
        *slot = *offset;
    }
    write_str(writer, &format!("{} 0 obj\n", obj_id), offset)?;
    write_bytes(writer, body.as_bytes(), offset)?;
    write_bytes(writer, b"\nendobj\n", offset)?;
    Ok(())
}

fn write_bytes<W: Write>(writer: &mut W, data: &[u8], offset: &mut usize) -> io::Result<()> {
    writer.write_all(data)?;
    *offset += data.len();
    Ok(())
}

fn write_str<W: Write>(writer: &mut W, data: &str, offset: &mut usize) -> io::Result<()> {
    write_bytes(writer, data.as_bytes(), offset)
}

struct WinAnsiEncoded {
    text: String,
    replaced: usize,
}

fn encode_winansi_pdf_string(input: &str) -> WinAnsiEncoded {
    let mut out = String::new();
    let mut replaced = 0usize;
    for ch in input.chars() {
        let byte = match ch {
            '\u{0000}'..='\u{007F}' => ch as u8,
            '\u{00A0}'..='\u{00FF}' => ch as u8,
            // cp1252 punctuation that shows up in product copy.
            '\u{20AC}' => 0x80,
            '\u{2026}' => 0x85,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201C}' => 0x93,
            '\u{201D}' => 0x94,
            '\u{2022}' => 0x95,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            '\u{2122}' => 0x99,
            _ => {
                replaced += 1;
                b'?'
            }
        };

        match byte {
            b'\\' => out.push_str("\\\\"),
            b'(' => out.push_str("\\("),
            b')' => out.push_str("\\)"),
            b'\n' => out.push_str("\\n"),
            b'\r' => out.push_str("\\r"),
            b if !(0x20..0x7f).contains(&b) => out.push_str(&format!("\\{:03o}", b)),
            b => out.push(b as char),
        }
    }

    WinAnsiEncoded {
        text: out,
        replaced,
    }
}

fn fmt(value: f32) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let fixed = I32F32::from_num(value);
    let scaled = (fixed * I32F32::from_num(1000)).round();
    let milli: i64 = scaled.to_num();
    format_milli(milli)
}

fn format_milli(milli: i64) -> String {
    if milli == 0 {
        return "0".to_string();
    }
    let sign = if milli < 0 { "-" } else { "" };
    let abs = milli.abs();
    let int_part = abs / 1000;
    let frac_part = abs % 1000;
    if frac_part == 0 {
        format!("{}{}", sign, int_part)
    } else {
        let mut s = format!("{}{}.{:03}", sign, int_part, frac_part);
        while s.ends_with('0') {
            s.pop();
        }
        s
    }
}

fn fmt_pt(value: Pt) -> String {
    format_milli(value.to_milli_i64())
}

fn color_to_pdf_fill(color: Color) -> String {
    format!("{} {} {} rg\n", fmt(color.r), fmt(color.g), fmt(color.b))
}

fn color_to_pdf_stroke(color: Color) -> String {
    format!("{} {} {} RG\n", fmt(color.r), fmt(color.g), fmt(color.b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Canvas;
    use crate::image_decode::decode;
    use crate::image_decode::tests::png_bytes;
    use crate::model::ImagePayload;
    use crate::pdfinspect::inspect_pdf_bytes;

    fn count_token(bytes: &[u8], token: &[u8]) -> usize {
        bytes
            .windows(token.len())
            .filter(|window| *window == token)
            .count()
    }

    fn image_pages(page_count: usize, alpha: u8) -> Document {
        let mut canvas = Canvas::new(Size::a4());
        let payload = ImagePayload::Bytes(png_bytes(4, 4, alpha));
        for _ in 0..page_count {
            let image = Arc::new(decode(&payload).expect("decode"));
            let id = canvas.register_image(image);
            canvas.draw_image(
                Pt::from_f32(12.0),
                Pt::from_f32(16.0),
                Pt::from_f32(60.0),
                Pt::from_f32(30.0),
                id,
            );
            canvas.show_page();
        }
        canvas.finish()
    }

    #[test]
    fn numbers_are_formatted_without_trailing_zeros() {
        assert_eq!(fmt(0.5), "0.5");
        assert_eq!(fmt(12.0), "12");
        assert_eq!(fmt(-1.25), "-1.25");
        assert_eq!(fmt(f32::NAN), "0");
        assert_eq!(fmt_pt(Pt::from_f32(841.89)), "841.89");
    }

    #[test]
    fn winansi_escapes_delimiters_and_replaces_unmapped() {
        let encoded = encode_winansi_pdf_string("Ring (18k) \u{00E9}\u{4E2D}");
        assert_eq!(encoded.text, "Ring \\(18k\\) \\351?");
        assert_eq!(encoded.replaced, 1);
    }

    #[test]
    fn text_is_flipped_to_bottom_left_baseline() {
        let mut canvas = Canvas::new(Size::a4());
        canvas.set_font(Base14Font::HelveticaBold, Pt::from_i32(10));
        canvas.draw_string(Pt::from_i32(40), Pt::from_i32(100), "Title");
        let doc = canvas.finish();
        let (bytes, report) = document_to_pdf(&doc, &PdfOptions::default()).expect("pdf");
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("/F1 10 Tf\n40 731.89 Td\n(Title) Tj"));
        assert!(text.contains("/BaseFont /Helvetica-Bold /Encoding /WinAnsiEncoding"));
        assert_eq!(report.page_content_bytes.len(), 1);
        assert_eq!(report.total_bytes, bytes.len());
    }

    #[test]
    fn image_xobject_reused_across_pages() {
        let doc = image_pages(3, 255);
        let (bytes, _) = document_to_pdf(&doc, &PdfOptions::default()).expect("pdf");
        assert_eq!(count_token(&bytes, b"/Subtype /Image"), 1);
        assert_eq!(count_token(&bytes, b"/Im1 Do"), 3);
        assert_eq!(inspect_pdf_bytes(&bytes).expect("inspect").page_count, 3);
    }

    #[test]
    fn disabling_reuse_embeds_every_draw() {
        let doc = image_pages(2, 255);
        let options = PdfOptions {
            reuse_xobjects: false,
            ..PdfOptions::default()
        };
        let (bytes, _) = document_to_pdf(&doc, &options).expect("pdf");
        assert_eq!(count_token(&bytes, b"/Subtype /Image"), 2);
    }

    #[test]
    fn translucent_images_get_a_soft_mask() {
        let doc = image_pages(1, 128);
        let (bytes, _) = document_to_pdf(&doc, &PdfOptions::default()).expect("pdf");
        assert_eq!(count_token(&bytes, b"/ColorSpace /DeviceGray"), 1);
        assert_eq!(count_token(&bytes, b"/SMask "), 1);
    }

    #[test]
    fn image_samples_are_deflated_losslessly() {
        use std::io::Read;

        let image = decode(&ImagePayload::Bytes(png_bytes(4, 4, 128))).expect("decode");
        let stream = ImageStream::from_decoded(&image).expect("stream");
        assert_eq!(stream.filter, "/FlateDecode");
        let PixelData::Rgb { rgb, alpha } = &image.pixels else {
            panic!("png decodes to raw pixels");
        };

        let mut inflated = Vec::new();
        flate2::read::ZlibDecoder::new(stream.data.as_slice())
            .read_to_end(&mut inflated)
            .expect("inflate rgb");
        assert_eq!(&inflated, rgb);

        let mut inflated_alpha = Vec::new();
        flate2::read::ZlibDecoder::new(stream.alpha.as_deref().expect("alpha plane"))
            .read_to_end(&mut inflated_alpha)
            .expect("inflate alpha");
        assert_eq!(Some(&inflated_alpha), alpha.as_ref());
    }

    #[test]
    fn title_lands_in_info_dictionary() {
        let mut canvas = Canvas::new(Size::a4());
        canvas.draw_rect(Pt::ZERO, Pt::ZERO, Pt::from_i32(5), Pt::from_i32(5));
        let doc = canvas.finish();
        let options = PdfOptions {
            document_title: Some("Spring (2026)".to_string()),
            ..PdfOptions::default()
        };
        let (bytes, _) = document_to_pdf(&doc, &options).expect("pdf");
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("/Title (Spring \\(2026\\))"));
        assert!(text.contains("/DisplayDocTitle true"));
        assert!(text.ends_with("%%EOF"));
    }
}
