//! Reduce a font to a set of codepoints

use skera::{Plan, SubsetFlags, DEFAULT_LAYOUT_FEATURES};
use write_fonts::{
    read::{collections::IntSet, FontRef},
    types::{NameId, Tag},
};

use crate::error::Result;

/// Tables that are never carried into a subset unless asked for.
pub static DEFAULT_DROP_TABLES: &[Tag] = &[
    Tag::new(b"BASE"),
    Tag::new(b"JSTF"),
    Tag::new(b"DSIG"),
    Tag::new(b"EBDT"),
    Tag::new(b"EBLC"),
    Tag::new(b"EBSC"),
    Tag::new(b"PCLT"),
    Tag::new(b"LTSH"),
    Tag::new(b"Feat"),
    Tag::new(b"Glat"),
    Tag::new(b"Gloc"),
    Tag::new(b"Silf"),
    Tag::new(b"Sill"),
];

const ENGLISH_US: u16 = 0x0409;

/// Knobs passed through to the subsetter.
#[derive(Clone, Debug)]
pub struct SubsetOptions {
    pub drop_tables: IntSet<Tag>,
    pub layout_features: IntSet<Tag>,
    pub name_ids: IntSet<NameId>,
    pub name_languages: IntSet<u16>,
    pub flags: SubsetFlags,
}

impl Default for SubsetOptions {
    fn default() -> Self {
        let mut name_ids = IntSet::empty();
        name_ids.insert_range(NameId::COPYRIGHT_NOTICE..=NameId::POSTSCRIPT_NAME);
        SubsetOptions {
            drop_tables: DEFAULT_DROP_TABLES.iter().copied().collect(),
            layout_features: DEFAULT_LAYOUT_FEATURES.iter().copied().collect(),
            name_ids,
            name_languages: [ENGLISH_US].into(),
            flags: SubsetFlags::default(),
        }
    }
}

/// Produce a font holding only what is needed to render `codepoints`.
///
/// Codepoints the source does not map are ignored; an empty set still yields
/// a font with `.notdef`.
pub fn subset_font(
    font_data: &[u8],
    codepoints: &IntSet<u32>,
    options: &SubsetOptions,
) -> Result<Vec<u8>> {
    let font = FontRef::new(font_data)?;
    let mut layout_scripts = IntSet::<Tag>::empty();
    layout_scripts.invert();

    log::debug!(
        "subsetting to {} codepoints, dropping {} tables",
        codepoints.len(),
        options.drop_tables.len()
    );
    let plan = Plan::new(
        &IntSet::empty(),
        codepoints,
        &font,
        options.flags,
        &options.drop_tables,
        &layout_scripts,
        &options.layout_features,
        &options.name_ids,
        &options.name_languages,
    );
    Ok(skera::subset_font(&font, &plan)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use skrifa::{FontRef as SkrifaFont, MetadataProvider};

    fn mapped(data: &[u8]) -> Vec<u32> {
        let font = SkrifaFont::new(data).unwrap();
        font.charmap().mappings().map(|(cp, _)| cp).collect()
    }

    #[test]
    fn default_options() {
        let options = SubsetOptions::default();
        assert!(options.drop_tables.contains(Tag::new(b"DSIG")));
        assert!(!options.drop_tables.contains(Tag::new(b"glyf")));
        assert!(options.layout_features.contains(Tag::new(b"kern")));
        assert_eq!(
            options.name_ids.iter().map(|id| id.to_u16()).collect::<Vec<_>>(),
            (0..=6).collect::<Vec<_>>()
        );
        assert!(options.name_languages.contains(ENGLISH_US));
    }

    #[test]
    fn keeps_only_requested() {
        let codepoints: IntSet<u32> = ['A' as u32, 'W' as u32].into();
        let out = subset_font(font_test_data::VAZIRMATN_VAR, &codepoints, &Default::default())
            .unwrap();
        // the source has no 'W'
        assert_eq!(mapped(&out), ['A' as u32]);
    }

    #[test]
    fn empty_request() {
        let out = subset_font(
            font_test_data::VAZIRMATN_VAR,
            &IntSet::empty(),
            &Default::default(),
        )
        .unwrap();
        assert!(mapped(&out).is_empty());
        let font = FontRef::new(&out).unwrap();
        use write_fonts::read::TableProvider;
        assert_eq!(font.maxp().unwrap().num_glyphs(), 1);
    }

    #[test]
    fn not_a_font() {
        let err = subset_font(b"nope", &IntSet::empty(), &Default::default()).unwrap_err();
        assert!(matches!(err, crate::Error::Read(_)), "{err}");
    }
}
