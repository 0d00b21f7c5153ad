//! Read back what a font covers, and spell it as a CSS `unicode-range`

use std::fmt;

use skrifa::{string::StringId, FontRef, MetadataProvider};

use crate::error::Result;

/// Sorted codepoints mapped by the font's preferred Unicode cmap subtable.
pub fn codepoint_coverage(font_data: &[u8]) -> Result<Vec<u32>> {
    let font = FontRef::new(font_data)?;
    let mut codepoints: Vec<u32> = font.charmap().mappings().map(|(cp, _)| cp).collect();
    codepoints.sort_unstable();
    codepoints.dedup();
    Ok(codepoints)
}

/// The typographic family name if there is one, otherwise the family name.
pub fn family_name(font_data: &[u8]) -> Result<Option<String>> {
    let font = FontRef::new(font_data)?;
    let name = [StringId::TYPOGRAPHIC_FAMILY_NAME, StringId::FAMILY_NAME]
        .into_iter()
        .find_map(|id| font.localized_strings(id).english_or_first())
        .map(|s| s.to_string());
    Ok(name)
}

/// How codepoints are listed in a `unicode-range` descriptor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RangeStyle {
    /// Every codepoint on its own: `U+0041,U+0042,U+0043`
    #[default]
    Individual,
    /// Consecutive runs folded together: `U+0041-0043`
    Collapsed,
}

/// A `unicode-range` value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UnicodeRange {
    codepoints: Vec<u32>,
    style: RangeStyle,
}

impl UnicodeRange {
    pub fn new(mut codepoints: Vec<u32>, style: RangeStyle) -> Self {
        codepoints.sort_unstable();
        codepoints.dedup();
        UnicodeRange { codepoints, style }
    }

    pub fn codepoints(&self) -> &[u32] {
        &self.codepoints
    }

    pub fn is_empty(&self) -> bool {
        self.codepoints.is_empty()
    }

    /// Inclusive runs of consecutive codepoints.
    fn runs(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        let mut iter = self.codepoints.iter().copied().peekable();
        std::iter::from_fn(move || {
            let start = iter.next()?;
            let mut end = start;
            while iter.next_if(|next| Some(*next) == end.checked_add(1)).is_some() {
                end += 1;
            }
            Some((start, end))
        })
    }
}

impl fmt::Display for UnicodeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let items: Vec<String> = match self.style {
            RangeStyle::Individual => self
                .codepoints
                .iter()
                .map(|cp| format!("U+{cp:04x}"))
                .collect(),
            RangeStyle::Collapsed => self
                .runs()
                .map(|(start, end)| {
                    if start == end {
                        format!("U+{start:04x}")
                    } else {
                        format!("U+{start:04x}-{end:04x}")
                    }
                })
                .collect(),
        };
        f.write_str(&items.join(","))
    }
}
