use crate::model::ImagePayload;
use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use image::GenericImageView;
use std::fmt;

// Padding is repaired before decoding, so the engine can insist on canonical
// padding while still tolerating non-zero trailing bits.
const TOLERANT_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_allow_trailing_bits(true)
        .with_decode_padding_mode(DecodePaddingMode::RequireCanonical),
);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    Empty,
    Base64(String),
    Unsupported(String),
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::Empty => write!(f, "image payload is empty"),
            DecodeError::Base64(message) => write!(f, "invalid base64 payload: {}", message),
            DecodeError::Unsupported(message) => {
                write!(f, "unsupported raster payload: {}", message)
            }
        }
    }
}

impl std::error::Error for DecodeError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PixelData {
    // Baseline JPEG bytes, embedded as-is.
    Jpeg {
        data: Vec<u8>,
        gray: bool,
    },
    // Uncompressed 8-bit RGB samples plus an optional 8-bit alpha plane.
    Rgb {
        rgb: Vec<u8>,
        alpha: Option<Vec<u8>>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub(crate) pixels: PixelData,
    content_hash: u64,
}

impl DecodedImage {
    pub fn content_hash(&self) -> u64 {
        self.content_hash
    }

    pub fn has_alpha(&self) -> bool {
        matches!(self.pixels, PixelData::Rgb { alpha: Some(_), .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitEdge {
    Height,
    Width,
}

/// Decodes a payload into pixels plus native dimensions.
pub fn decode(payload: &ImagePayload) -> Result<DecodedImage, DecodeError> {
    let bytes = payload_bytes(payload)?;
    decode_image_bytes(&bytes)
}

pub(crate) fn payload_bytes(payload: &ImagePayload) -> Result<Vec<u8>, DecodeError> {
    match payload {
        ImagePayload::Bytes(bytes) if bytes.is_empty() => Err(DecodeError::Empty),
        ImagePayload::Bytes(bytes) => Ok(bytes.clone()),
        ImagePayload::Encoded(text) => decode_base64_text(text),
    }
}

/// Strips an optional `<mime>;base64,` header and repairs missing `=` padding.
pub(crate) fn decode_base64_text(text: &str) -> Result<Vec<u8>, DecodeError> {
    let data = match text.split_once(',') {
        Some((_header, data)) => data,
        None => text,
    };
    let mut data: String = data.chars().filter(|ch| !ch.is_ascii_whitespace()).collect();
    if data.is_empty() {
        return Err(DecodeError::Empty);
    }
    while data.len() % 4 != 0 {
        data.push('=');
    }
    TOLERANT_BASE64
        .decode(data.as_bytes())
        .map_err(|err| DecodeError::Base64(err.to_string()))
}

fn decode_image_bytes(data: &[u8]) -> Result<DecodedImage, DecodeError> {
    let format =
        image::guess_format(data).map_err(|err| DecodeError::Unsupported(err.to_string()))?;
    let decoded = image::load_from_memory_with_format(data, format)
        .map_err(|err| DecodeError::Unsupported(err.to_string()))?;
    let (width, height) = decoded.dimensions();
    if width == 0 || height == 0 {
        return Err(DecodeError::Unsupported("zero-sized raster".to_string()));
    }
    let content_hash = hash_bytes(data);

    if format == image::ImageFormat::Jpeg {
        let gray = matches!(
            decoded.color(),
            image::ColorType::L8 | image::ColorType::La8
        );
        return Ok(DecodedImage {
            width,
            height,
            pixels: PixelData::Jpeg {
                data: data.to_vec(),
                gray,
            },
            content_hash,
        });
    }

    let rgba = decoded.to_rgba8();
    let mut rgb = Vec::with_capacity((width * height * 3) as usize);
    let mut alpha = Vec::with_capacity((width * height) as usize);
    let mut has_alpha = false;
    for pixel in rgba.pixels() {
        let [r, g, b, a] = pixel.0;
        if a != 255 {
            has_alpha = true;
        }
        rgb.extend_from_slice(&[r, g, b]);
        alpha.push(a);
    }
    Ok(DecodedImage {
        width,
        height,
        pixels: PixelData::Rgb {
            rgb,
            alpha: has_alpha.then_some(alpha),
        },
        content_hash,
    })
}

/// Scales `native_w x native_h` so that `fit_edge` becomes `target_edge`,
/// keeping the aspect ratio. Both results are whole units, never below 1.
pub fn scaled_size(native_w: u32, native_h: u32, target_edge: u32, fit_edge: FitEdge) -> (u32, u32) {
    let native_w = native_w.max(1) as f64;
    let native_h = native_h.max(1) as f64;
    let target = target_edge.max(1);
    match fit_edge {
        FitEdge::Height => {
            let width = (target as f64 / native_h * native_w) as u32;
            (width.max(1), target)
        }
        FitEdge::Width => {
            let height = (target as f64 / native_w * native_h) as u32;
            (target, height.max(1))
        }
    }
}

/// Aspect-fits into a square of `box_edge`: the longer native edge is pinned to the box.
pub fn fit_within(native_w: u32, native_h: u32, box_edge: u32) -> (u32, u32) {
    let edge = if native_w >= native_h {
        FitEdge::Width
    } else {
        FitEdge::Height
    };
    scaled_size(native_w, native_h, box_edge, edge)
}

fn hash_bytes(data: &[u8]) -> u64 {
    use std::hash::{Hash, Hasher};
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    data.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::io::Cursor;

    pub(crate) fn png_bytes(width: u32, height: u32, alpha: u8) -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(width, height, image::Rgba([200, 40, 90, alpha]));
        let mut out = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut out), image::ImageFormat::Png)
            .expect("encode png");
        out
    }

    pub(crate) fn png_data_uri(width: u32, height: u32) -> String {
        let encoded = base64::engine::general_purpose::STANDARD.encode(png_bytes(width, height, 255));
        format!("data:image/png;base64,{encoded}")
    }

    fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbImage::from_pixel(width, height, image::Rgb([10, 120, 200]));
        let mut out = Vec::new();
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut out), image::ImageFormat::Jpeg)
            .expect("encode jpeg");
        out
    }

    #[test]
    fn decodes_data_uri_png() {
        let image = decode(&ImagePayload::Encoded(png_data_uri(4, 2))).expect("decode");
        assert_eq!((image.width, image.height), (4, 2));
        assert!(!image.has_alpha());
        match &image.pixels {
            PixelData::Rgb { rgb, alpha } => {
                assert_eq!(rgb.len(), 4 * 2 * 3);
                assert!(alpha.is_none());
            }
            other => panic!("unexpected pixels {other:?}"),
        }
    }

    #[test]
    fn raw_bytes_and_bare_base64_decode_the_same() {
        let bytes = png_bytes(3, 5, 128);
        let bare = base64::engine::general_purpose::STANDARD.encode(&bytes);
        let from_bytes = decode(&ImagePayload::Bytes(bytes)).expect("bytes");
        let from_text = decode(&ImagePayload::Encoded(bare)).expect("text");
        assert_eq!(from_bytes, from_text);
        assert!(from_bytes.has_alpha());
    }

    #[test]
    fn jpeg_is_passed_through() {
        let bytes = jpeg_bytes(8, 6);
        let image = decode(&ImagePayload::Bytes(bytes.clone())).expect("jpeg");
        assert_eq!((image.width, image.height), (8, 6));
        assert_eq!(
            image.pixels,
            PixelData::Jpeg {
                data: bytes,
                gray: false
            }
        );
    }

    #[test]
    fn missing_padding_is_repaired_for_remainders_two_and_three() {
        // "hi" -> "aGk=" (remainder 3 once stripped), "h" -> "aA==" (remainder 2).
        assert_eq!(decode_base64_text("aGk").expect("rem 3"), b"hi".to_vec());
        assert_eq!(decode_base64_text("aA").expect("rem 2"), b"h".to_vec());
        assert_eq!(
            decode_base64_text("data:text/plain;base64,aGk").expect("prefixed"),
            b"hi".to_vec()
        );
    }

    #[test]
    fn remainder_one_fails_cleanly() {
        let err = decode_base64_text("aGkaG").expect_err("rem 1");
        assert!(matches!(err, DecodeError::Base64(_)));
    }

    #[test]
    fn padded_png_payload_survives_stripped_padding() {
        let uri = png_data_uri(7, 3);
        let stripped = uri.trim_end_matches('=').to_string();
        let image = decode(&ImagePayload::Encoded(stripped)).expect("decode");
        assert_eq!((image.width, image.height), (7, 3));
    }

    #[test]
    fn non_raster_payloads_are_unsupported() {
        let text = base64::engine::general_purpose::STANDARD.encode(b"definitely not an image");
        assert!(matches!(
            decode(&ImagePayload::Encoded(text)),
            Err(DecodeError::Unsupported(_))
        ));
        assert_eq!(decode(&ImagePayload::Bytes(Vec::new())), Err(DecodeError::Empty));
        assert_eq!(
            decode(&ImagePayload::Encoded("data:image/png;base64,".to_string())),
            Err(DecodeError::Empty)
        );
        assert!(matches!(
            decode(&ImagePayload::Encoded("!!!!".to_string())),
            Err(DecodeError::Base64(_))
        ));
    }

    #[test]
    fn identical_payloads_share_a_content_hash() {
        let a = decode(&ImagePayload::Encoded(png_data_uri(2, 2))).expect("a");
        let b = decode(&ImagePayload::Bytes(png_bytes(2, 2, 255))).expect("b");
        let c = decode(&ImagePayload::Bytes(png_bytes(3, 2, 255))).expect("c");
        assert_eq!(a.content_hash(), b.content_hash());
        assert_ne!(a.content_hash(), c.content_hash());
    }

    #[test]
    fn scaled_size_pins_the_named_edge() {
        assert_eq!(scaled_size(400, 200, 300, FitEdge::Height), (600, 300));
        assert_eq!(scaled_size(400, 200, 50, FitEdge::Width), (50, 25));
        assert_eq!(scaled_size(3, 2, 50, FitEdge::Height), (75, 50));
        // truncation, never below one unit
        assert_eq!(scaled_size(1, 1000, 50, FitEdge::Height), (1, 50));
        assert_eq!(scaled_size(0, 0, 0, FitEdge::Width), (1, 1));
    }

    #[test]
    fn fit_within_keeps_both_edges_inside_the_box() {
        assert_eq!(fit_within(400, 200, 91), (91, 45));
        assert_eq!(fit_within(200, 400, 91), (45, 91));
        assert_eq!(fit_within(64, 64, 91), (91, 91));
    }
}
