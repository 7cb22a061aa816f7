use crate::error::CatalogError;
use serde::Deserialize;

/// Image payload as handed over by the normalization layer: raw encoded file
/// bytes, or a base64 string with an optional `data:<mime>;base64,` prefix.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ImagePayload {
    Encoded(String),
    Bytes(Vec<u8>),
}

impl ImagePayload {
    pub fn is_empty(&self) -> bool {
        match self {
            ImagePayload::Encoded(text) => text.trim().is_empty(),
            ImagePayload::Bytes(bytes) => bytes.is_empty(),
        }
    }
}

impl From<Vec<u8>> for ImagePayload {
    fn from(value: Vec<u8>) -> Self {
        ImagePayload::Bytes(value)
    }
}

impl From<&str> for ImagePayload {
    fn from(value: &str) -> Self {
        ImagePayload::Encoded(value.to_string())
    }
}

impl From<String> for ImagePayload {
    fn from(value: String) -> Self {
        ImagePayload::Encoded(value)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Contact {
    pub phone: Option<String>,
    pub email: Option<String>,
    pub social_handle: Option<String>,
    pub website: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Item {
    pub code: String,
    pub name: String,
    pub image: Option<ImagePayload>,
    pub attribute_lines: Vec<String>,
}

impl Item {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            image: None,
            attribute_lines: Vec::new(),
        }
    }

    pub fn with_image(mut self, image: impl Into<ImagePayload>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn with_attribute(mut self, line: impl Into<String>) -> Self {
        self.attribute_lines.push(line.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Section {
    pub name: String,
    pub items: Vec<Item>,
}

impl Section {
    pub fn new(name: impl Into<String>, items: Vec<Item>) -> Self {
        Self {
            name: name.into(),
            items,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CatalogDocument {
    pub display_name: String,
    pub contact: Contact,
    pub theme_index: i64,
    pub logo: Option<ImagePayload>,
    // Older exports carried the logo as a raw blob next to the primary field.
    pub legacy_logo: Option<ImagePayload>,
    pub sections: Vec<Section>,
}

impl CatalogDocument {
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            ..Self::default()
        }
    }

    pub fn from_json_str(raw: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn from_json_slice(raw: &[u8]) -> Result<Self, CatalogError> {
        Ok(serde_json::from_slice(raw)?)
    }

    /// The primary logo when it carries data, otherwise the legacy field.
    pub fn logo_payload(&self) -> Option<&ImagePayload> {
        self.logo
            .as_ref()
            .filter(|payload| !payload.is_empty())
            .or_else(|| self.legacy_logo.as_ref().filter(|payload| !payload.is_empty()))
    }

    pub fn with_section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }
}
