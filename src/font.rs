use crate::types::Pt;

/// Standard 14 faces used by the catalog layout. Nothing is embedded; the
/// widths below are the AFM advance widths (1/1000 em) for printable ASCII.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Base14Font {
    Helvetica,
    HelveticaBold,
    CourierOblique,
}

impl Base14Font {
    pub fn pdf_name(self) -> &'static str {
        match self {
            Base14Font::Helvetica => "Helvetica",
            Base14Font::HelveticaBold => "Helvetica-Bold",
            Base14Font::CourierOblique => "Courier-Oblique",
        }
    }

    pub fn from_pdf_name(name: &str) -> Option<Self> {
        match name {
            "Helvetica" => Some(Base14Font::Helvetica),
            "Helvetica-Bold" => Some(Base14Font::HelveticaBold),
            "Courier-Oblique" => Some(Base14Font::CourierOblique),
            _ => None,
        }
    }

    fn advance(self, ch: char) -> u16 {
        let table = match self {
            Base14Font::Helvetica => &HELVETICA_WIDTHS,
            Base14Font::HelveticaBold => &HELVETICA_BOLD_WIDTHS,
            Base14Font::CourierOblique => return 600,
        };
        let code = ch as u32;
        if (0x20..=0x7E).contains(&code) {
            table[(code - 0x20) as usize]
        } else {
            // Latin-1 letters are close enough to a lowercase average.
            556
        }
    }
}

pub fn measure_text_width(font: Base14Font, font_size: Pt, text: &str) -> Pt {
    let units: u32 = text.chars().map(|ch| font.advance(ch) as u32).sum();
    Pt::from_f32(units as f32 * font_size.to_f32() / 1000.0)
}

#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn helvetica_widths_follow_afm() {
        let size = Pt::from_i32(10);
        assert_eq!(
            measure_text_width(Base14Font::Helvetica, size, "A").to_milli_i64(),
            6_670
        );
        assert_eq!(
            measure_text_width(Base14Font::Helvetica, size, "il").to_milli_i64(),
            4_440
        );
        assert_eq!(
            measure_text_width(Base14Font::HelveticaBold, size, "W").to_milli_i64(),
            9_440
        );
    }

    #[test]
    fn courier_is_monospaced() {
        let size = Pt::from_i32(8);
        let narrow = measure_text_width(Base14Font::CourierOblique, size, "iiii");
        let wide = measure_text_width(Base14Font::CourierOblique, size, "MMMM");
        assert_eq!(narrow, wide);
        assert_eq!(narrow.to_milli_i64(), 19_200);
    }

    #[test]
    fn names_round_trip() {
        for font in [
            Base14Font::Helvetica,
            Base14Font::HelveticaBold,
            Base14Font::CourierOblique,
        ] {
            assert_eq!(Base14Font::from_pdf_name(font.pdf_name()), Some(font));
        }
        assert_eq!(Base14Font::from_pdf_name("Times-Roman"), None);
    }
}
