//! Cut every subset from a source font and describe the results as CSS

use std::path::{Path, PathBuf};

use crate::{
    coverage::{codepoint_coverage, family_name, RangeStyle, UnicodeRange},
    css::FontFace,
    definition::{self, default_definitions, SubsetDefinition},
    error::{Error, Result},
    names::{default_needles, relabel_font, Relabel},
    subset::{subset_font, SubsetOptions},
};

const DEFAULT_EXTENSION: &str = "ttf";
/// Used when nothing is left of the source name, e.g. `[wght].ttf`
const FALLBACK_STEM: &str = "font";

/// A subset font that has been written to disk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Output {
    pub path: PathBuf,
    pub description: String,
    /// The `font-family` shared by all faces cut from one source
    pub family: String,
}

/// Settings for one run over a source font.
#[derive(Clone, Debug)]
pub struct Generator {
    pub source: PathBuf,
    pub out_dir: PathBuf,
    pub definitions: Vec<SubsetDefinition>,
    pub options: SubsetOptions,
    /// Strings to suffix in name records; derived from the family if unset
    pub needles: Option<Vec<String>>,
    /// CSS `font-family`; the source's family name if unset
    pub css_family: Option<String>,
    pub range_style: RangeStyle,
}

impl Generator {
    /// A generator using the built-in subsets and default subsetter options.
    pub fn new(source: impl Into<PathBuf>, out_dir: impl Into<PathBuf>) -> Self {
        Generator {
            source: source.into(),
            out_dir: out_dir.into(),
            definitions: default_definitions(),
            options: SubsetOptions::default(),
            needles: None,
            css_family: None,
            range_style: RangeStyle::default(),
        }
    }

    /// Where the subset with the given suffix is written.
    ///
    /// `EBGaramond[wght].ttf` with suffix `AW` becomes `EBGaramond-AW.ttf`.
    pub fn output_path(&self, suffix: &str) -> PathBuf {
        let extension = self
            .source
            .extension()
            .map(|ext| ext.to_string_lossy())
            .unwrap_or(DEFAULT_EXTENSION.into());
        let file_name = format!("{}-{suffix}.{extension}", self.source_stem());
        self.out_dir.join(file_name)
    }

    /// The source file stem without any variation axes in brackets.
    fn source_stem(&self) -> String {
        let stem = self
            .source
            .file_stem()
            .map(|stem| stem.to_string_lossy())
            .unwrap_or_default();
        let base = match stem.split_once('[') {
            Some((base, _)) => base.trim_end(),
            None => &*stem,
        };
        if base.is_empty() {
            FALLBACK_STEM.to_string()
        } else {
            base.to_string()
        }
    }

    /// Subset, relabel and write each definition in order.
    pub fn generate_subsets(&self) -> Result<Vec<Output>> {
        definition::validate_definitions(&self.definitions)?;
        let source_data = read(&self.source)?;
        let source_family = family_name(&source_data)?;
        let family = self
            .css_family
            .clone()
            .or_else(|| source_family.clone())
            .unwrap_or_else(|| self.source_stem());
        let needles = match (&self.needles, &source_family) {
            (Some(needles), _) => needles.clone(),
            (None, Some(source_family)) => default_needles(source_family),
            (None, None) => {
                log::warn!(
                    "'{}' has no family name, subsets will not be relabeled",
                    self.source.display()
                );
                Vec::new()
            }
        };
        log::debug!("family '{family}', relabeling {needles:?}");

        std::fs::create_dir_all(&self.out_dir).map_err(|e| Error::io(&self.out_dir, e))?;

        let mut outputs = Vec::with_capacity(self.definitions.len());
        for def in &self.definitions {
            let subset = subset_font(&source_data, &def.codepoints, &self.options)?;
            let relabel = Relabel::new(needles.clone(), def.suffix.as_str());
            let subset = relabel_font(&subset, &relabel)?;

            let path = self.output_path(&def.suffix);
            std::fs::write(&path, &subset).map_err(|e| Error::io(&path, e))?;
            log::info!("wrote {} ({} bytes)", path.display(), subset.len());
            outputs.push(Output {
                path,
                description: def.description.clone(),
                family: family.clone(),
            });
        }
        Ok(outputs)
    }

    /// Reopen each written subset and build a rule from what it really covers.
    pub fn font_faces(&self, outputs: &[Output]) -> Result<Vec<FontFace>> {
        outputs
            .iter()
            .map(|output| {
                let data = read(&output.path)?;
                let coverage = codepoint_coverage(&data)?;
                if coverage.is_empty() {
                    log::warn!(
                        "{} maps no codepoints, its @font-face rule is omitted",
                        output.path.display()
                    );
                }
                Ok(FontFace {
                    file_name: file_name(&output.path),
                    description: output.description.clone(),
                    family: output.family.clone(),
                    unicode_range: UnicodeRange::new(coverage, self.range_style),
                })
            })
            .collect()
    }

    /// Write all subsets, then describe them.
    pub fn run(&self) -> Result<(Vec<Output>, Vec<FontFace>)> {
        let outputs = self.generate_subsets()?;
        let faces = self.font_faces(&outputs)?;
        Ok((outputs, faces))
    }
}

fn read(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|e| Error::io(path, e))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
