//! The list of subsets to cut from a source font
//!
//! When the produced faces are used together via `unicode-range`, later
//! entries take precedence over earlier ones, so a list reads from lowest to
//! highest priority.

use std::{collections::HashSet, path::Path};

use serde::Deserialize;
use skera::parse_unicodes;
use write_fonts::read::collections::IntSet;

use crate::error::{Error, Result};

const LATIN_CAPITAL_A: u32 = 0x41;
const LATIN_CAPITAL_W: u32 = 0x57;
const COMBINING_CARON: u32 = 0x30C;
const LATIN_CAPITAL_A_WITH_CARON: u32 = 0x1CD;

/// One subset to produce: a file suffix, the codepoints to keep and a note
/// that ends up in the generated CSS.
#[derive(Clone, Debug, PartialEq)]
pub struct SubsetDefinition {
    pub suffix: String,
    pub codepoints: IntSet<u32>,
    pub description: String,
}

impl SubsetDefinition {
    pub fn new(
        suffix: impl Into<String>,
        codepoints: impl IntoIterator<Item = u32>,
        description: impl Into<String>,
    ) -> Self {
        let mut set = IntSet::empty();
        set.extend_unsorted(codepoints);
        SubsetDefinition {
            suffix: suffix.into(),
            codepoints: set,
            description: description.into(),
        }
    }
}

/// The built-in subsets.
///
/// Only precomposed and decomposed forms of Ǎ are paired here; pairing Ǎ with
/// ǎ trips <https://github.com/harfbuzz/harfbuzz/issues/2283>.
pub fn default_definitions() -> Vec<SubsetDefinition> {
    vec![
        SubsetDefinition::new(
            "A-comb-caron",
            [
                LATIN_CAPITAL_A,
                COMBINING_CARON,
                LATIN_CAPITAL_A_WITH_CARON,
            ],
            "A, comb caron, precomposed A comb caron",
        ),
        SubsetDefinition::new(
            "AW",
            [LATIN_CAPITAL_A, LATIN_CAPITAL_W],
            "AW, playing the role of latin",
        ),
    ]
}

/// An entry in a JSON definitions file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawDefinition {
    suffix: String,
    /// Hex codepoints or ranges, e.g. `41,30c,1cd` or `U+0041-005A`
    #[serde(default)]
    unicodes: String,
    /// Literal characters to keep
    #[serde(default)]
    text: String,
    #[serde(default)]
    description: String,
}

impl TryFrom<RawDefinition> for SubsetDefinition {
    type Error = Error;

    fn try_from(raw: RawDefinition) -> Result<Self> {
        let mut codepoints = parse_unicodes(&raw.unicodes)?;
        codepoints.extend_unsorted(raw.text.chars().map(u32::from));
        if codepoints.is_empty() {
            return Err(Error::InvalidDefinition(format!(
                "subset '{}' selects no codepoints",
                raw.suffix
            )));
        }
        Ok(SubsetDefinition {
            suffix: raw.suffix,
            codepoints,
            description: raw.description,
        })
    }
}

/// Parse definitions from the contents of a JSON file.
pub fn parse_definitions(json: &str) -> Result<Vec<SubsetDefinition>> {
    let raw: Vec<RawDefinition> = serde_json::from_str(json)?;
    let definitions = raw
        .into_iter()
        .map(SubsetDefinition::try_from)
        .collect::<Result<Vec<_>>>()?;
    validate_definitions(&definitions)?;
    Ok(definitions)
}

/// Read and parse a JSON definitions file.
pub fn load_definitions(path: &Path) -> Result<Vec<SubsetDefinition>> {
    let json = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    parse_definitions(&json)
}

/// Check that a list of definitions can be written side by side.
///
/// Suffixes become part of file names, so they must be non-empty, unique and
/// free of separators or whitespace.
pub fn validate_definitions(definitions: &[SubsetDefinition]) -> Result<()> {
    if definitions.is_empty() {
        return Err(Error::InvalidDefinition("no subsets defined".into()));
    }
    let mut seen = HashSet::new();
    for def in definitions {
        let suffix = def.suffix.as_str();
        if suffix.is_empty() {
            return Err(Error::InvalidDefinition("empty suffix".into()));
        }
        if suffix
            .chars()
            .any(|c| c == '/' || c == '\\' || c.is_whitespace())
        {
            return Err(Error::InvalidDefinition(format!(
                "suffix '{suffix}' must not contain separators or whitespace"
            )));
        }
        if !seen.insert(suffix) {
            return Err(Error::InvalidDefinition(format!(
                "duplicate suffix '{suffix}'"
            )));
        }
    }
    Ok(())
}
