use crate::types::Color;
use std::sync::LazyLock;

pub const THEME_COUNT: usize = 10;

// (name, background, accent)
const THEME_TABLE: [(&str, u32, u32); THEME_COUNT] = [
    ("classic", 0xF0FCF8, 0xC9A961),
    ("modern", 0xFAFAFA, 0xC0C0C0),
    ("luxury", 0xFAF0E6, 0x722F37),
    ("rose_gold", 0xFFF8F0, 0xCD7F32),
    ("white_gold", 0xFAFAFA, 0xDCDCDC),
    ("diamond", 0xF8FAFF, 0x4169E1),
    ("emerald", 0xF5FFFA, 0x50C878),
    ("ruby", 0xFFF0F5, 0xE0115F),
    ("sapphire", 0xF0F8FF, 0x0F52BA),
    ("vintage", 0xFDF5E6, 0xD2691E),
];

static THEMES: LazyLock<[Theme; THEME_COUNT]> = LazyLock::new(|| {
    THEME_TABLE.map(|(name, background, accent)| Theme {
        name,
        background: Color::from_hex(background),
        accent: Color::from_hex(accent),
    })
});

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub name: &'static str,
    pub background: Color,
    pub accent: Color,
}

impl Theme {
    /// Resolves a theme by registry index. Anything outside `0..THEME_COUNT`
    /// falls back to the first entry.
    pub fn for_index(index: i64) -> Theme {
        let slot = usize::try_from(index)
            .ok()
            .filter(|slot| *slot < THEME_COUNT)
            .unwrap_or(0);
        THEMES[slot]
    }

    /// Maps a palette name (e.g. `"rose_gold"`) to its registry index; unknown
    /// names map to 0.
    pub fn index_for_name(name: &str) -> usize {
        let key = name.trim().to_ascii_lowercase();
        THEME_TABLE
            .iter()
            .position(|(theme_name, _, _)| *theme_name == key)
            .unwrap_or(0)
    }

    pub fn all() -> &'static [Theme; THEME_COUNT] {
        &THEMES
    }
}

/// `(background, accent)` for a registry index.
pub fn theme_for(index: i64) -> (Color, Color) {
    let theme = Theme::for_index(index);
    (theme.background, theme.accent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_indices_resolve_to_classic() {
        let classic = theme_for(0);
        for index in [-1, 10, 11, 255, i64::MAX, i64::MIN] {
            assert_eq!(theme_for(index), classic, "index {index}");
        }
        assert_eq!(Theme::for_index(42).name, "classic");
    }

    #[test]
    fn every_registered_index_is_distinct_by_name() {
        for (index, theme) in Theme::all().iter().enumerate() {
            assert_eq!(Theme::for_index(index as i64).name, theme.name);
            assert_eq!(Theme::index_for_name(theme.name), index);
        }
    }

    #[test]
    fn palette_names_map_to_indices() {
        assert_eq!(Theme::index_for_name("ruby"), 7);
        assert_eq!(Theme::index_for_name(" Sapphire "), 8);
        assert_eq!(Theme::index_for_name("neon"), 0);
        assert_eq!(Theme::index_for_name(""), 0);
    }

    #[test]
    fn colors_match_the_hex_table() {
        let (background, accent) = theme_for(9);
        assert_eq!(background.to_hex(), 0xFDF5E6);
        assert_eq!(accent.to_hex(), 0xD2691E);
    }
}
