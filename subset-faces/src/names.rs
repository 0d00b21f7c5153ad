//! Tag a subset's name table with its suffix
//!
//! This makes it obvious in browser dev tools which of several faces sharing
//! a `font-family` actually got used for a run of text.

use write_fonts::{
    from_obj::ToOwnedTable,
    read::{tables::name::Encoding, FontRef, ReadError, TableProvider},
    tables::name::Name,
    types::NameId,
    FontBuilder,
};

use crate::error::Result;

/// Rewrite rule for name strings: every occurrence of a needle `N` becomes
/// `N-{suffix}`.
#[derive(Clone, Debug, PartialEq)]
pub struct Relabel {
    pub needles: Vec<String>,
    pub suffix: String,
}

impl Relabel {
    pub fn new(needles: Vec<String>, suffix: impl Into<String>) -> Self {
        Relabel {
            needles,
            suffix: suffix.into(),
        }
    }

    /// Drop records past the PostScript name and suffix the Unicode ones.
    ///
    /// Records in legacy encodings are kept as they are.
    pub fn apply(&self, name: &mut Name) {
        name.name_record.retain(|record| record.name_id <= NameId::POSTSCRIPT_NAME);
        for record in name.name_record.iter_mut() {
            if Encoding::new(record.platform_id, record.encoding_id) != Encoding::Utf16Be {
                continue;
            }
            let relabeled = self.relabel_str(record.string.as_str());
            if relabeled != *record.string {
                record.string = relabeled.into();
            }
        }
    }

    /// Suffix needles in a single left to right pass.
    ///
    /// At any position the earliest, then longest, needle wins and the
    /// inserted text is never rescanned.
    pub fn relabel_str(&self, value: &str) -> String {
        let mut out = String::with_capacity(value.len());
        let mut rest = value;
        loop {
            let next = self
                .needles
                .iter()
                .filter(|needle| !needle.is_empty())
                .filter_map(|needle| rest.find(needle.as_str()).map(|pos| (pos, needle)))
                .min_by_key(|(pos, needle)| (*pos, std::cmp::Reverse(needle.len())));
            let Some((pos, needle)) = next else {
                out.push_str(rest);
                return out;
            };
            let end = pos + needle.len();
            out.push_str(&rest[..end]);
            out.push('-');
            out.push_str(&self.suffix);
            rest = &rest[end..];
        }
    }
}

/// The family name as written in name records, plus its PostScript spelling
/// when that differs.
pub fn default_needles(family: &str) -> Vec<String> {
    let mut needles = vec![family.to_string()];
    let compact: String = family.chars().filter(|c| !c.is_whitespace()).collect();
    if !compact.is_empty() && compact != family {
        needles.push(compact);
    }
    needles
}

/// Apply `relabel` to the name table of a font, leaving all other tables as
/// they are.
pub fn relabel_font(font_data: &[u8], relabel: &Relabel) -> Result<Vec<u8>> {
    let font = FontRef::new(font_data)?;
    let name = match font.name() {
        Ok(name) => name,
        Err(ReadError::TableIsMissing(_)) => {
            log::warn!("no 'name' table, '{}' subset left unlabeled", relabel.suffix);
            return Ok(font_data.to_vec());
        }
        Err(e) => return Err(e.into()),
    };
    let mut name: Name = name.to_owned_table();
    relabel.apply(&mut name);
    Ok(FontBuilder::new()
        .add_table(&name)?
        .copy_missing_tables(font)
        .build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use write_fonts::{tables::name::NameRecord, types::Tag};

    fn record(platform_id: u16, encoding_id: u16, name_id: u16, value: &str) -> NameRecord {
        NameRecord::new(
            platform_id,
            encoding_id,
            0x409,
            NameId::new(name_id),
            String::from(value).into(),
        )
    }

    fn garamond_names() -> Name {
        let mut name = Name::default();
        name.name_record.push(record(1, 0, 1, "EB Garamond"));
        name.name_record.push(record(3, 1, 1, "EB Garamond"));
        name.name_record.push(record(3, 1, 2, "Regular"));
        name.name_record.push(record(3, 1, 4, "EB Garamond Regular"));
        name.name_record.push(record(3, 1, 6, "EBGaramond-Regular"));
        name.name_record.push(record(3, 1, 16, "EB Garamond"));
        name.name_record.sort();
        name
    }

    fn strings(name: &Name) -> Vec<(u16, u16, String)> {
        name.name_record
            .iter()
            .map(|r| (r.platform_id, r.name_id.to_u16(), r.string.as_str().to_string()))
            .collect()
    }

    #[test]
    fn relabel_records() {
        let mut name = garamond_names();
        Relabel::new(default_needles("EB Garamond"), "AW").apply(&mut name);
        assert_eq!(
            strings(&name),
            [
                (1, 1, "EB Garamond".to_string()),
                (3, 1, "EB Garamond-AW".to_string()),
                (3, 2, "Regular".to_string()),
                (3, 4, "EB Garamond-AW Regular".to_string()),
                (3, 6, "EBGaramond-AW-Regular".to_string()),
            ]
        );
    }

    #[test]
    fn single_needle_like_str_replace() {
        let relabel = Relabel::new(vec!["Garamond".into()], "AW");
        assert_eq!(relabel.relabel_str("EB Garamond"), "EB Garamond-AW");
        assert_eq!(
            relabel.relabel_str("Garamond Garamond"),
            "Garamond-AW Garamond-AW"
        );
        assert_eq!(relabel.relabel_str("Regular"), "Regular");
    }

    #[test]
    fn overlapping_needles() {
        let relabel = Relabel::new(vec!["Garamond".into(), "EB Garamond".into()], "x");
        assert_eq!(relabel.relabel_str("EB Garamond"), "EB Garamond-x");
        let relabel = Relabel::new(vec!["a".into(), "ab".into()], "z");
        assert_eq!(relabel.relabel_str("abab"), "ab-zab-z");
    }

    #[test]
    fn needles_from_family() {
        assert_eq!(default_needles("EB Garamond"), ["EB Garamond", "EBGaramond"]);
        assert_eq!(default_needles("Inter"), ["Inter"]);
    }

    #[test]
    fn relabel_whole_font() {
        let data = FontBuilder::new()
            .add_table(&garamond_names())
            .unwrap()
            .add_raw(Tag::new(b"TEST"), vec![1, 2, 3, 4])
            .build();
        let relabel = Relabel::new(default_needles("EB Garamond"), "A-comb-caron");
        let out = relabel_font(&data, &relabel).unwrap();

        let font = FontRef::new(&out).unwrap();
        assert_eq!(
            font.data_for_tag(Tag::new(b"TEST")).unwrap().as_bytes(),
            [1, 2, 3, 4]
        );
        let name = font.name().unwrap();
        let family = name
            .name_record()
            .iter()
            .find(|r| r.platform_id() == 3 && r.name_id() == NameId::FAMILY_NAME)
            .unwrap()
            .string(name.string_data())
            .unwrap()
            .chars()
            .collect::<String>();
        assert_eq!(family, "EB Garamond-A-comb-caron");
        assert!(name
            .name_record()
            .iter()
            .all(|r| r.name_id() <= NameId::POSTSCRIPT_NAME));

        let reloaded: Name = name.to_owned_table();
        assert_eq!(reloaded.name_record.len(), 5);
    }

    #[test]
    fn missing_name_table() {
        let data = FontBuilder::new()
            .add_raw(Tag::new(b"TEST"), vec![0; 4])
            .build();
        let out = relabel_font(&data, &Relabel::new(vec!["x".into()], "y")).unwrap();
        assert_eq!(out, data);
    }
}
