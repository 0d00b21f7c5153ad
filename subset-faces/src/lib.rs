//! Split a font into tiny subsets for `unicode-range` experiments.
//!
//! Each [`SubsetDefinition`] names a handful of codepoints. For every
//! definition the source font is subset, its name table is tagged with the
//! definition's suffix (so dev tools show which face was picked), and the
//! result is written next to its siblings. The written files are then read
//! back to produce `@font-face` rules whose `unicode-range` is exactly what
//! each subset ended up covering.
//!
//! ```no_run
//! use subset_faces::Generator;
//!
//! let generator = Generator::new("EBGaramond[wght].ttf", "out");
//! let (_, faces) = generator.run().unwrap();
//! for face in faces {
//!     print!("{face}");
//! }
//! ```

mod coverage;
mod css;
mod definition;
mod error;
mod generate;
mod names;
mod subset;

pub use coverage::{codepoint_coverage, family_name, RangeStyle, UnicodeRange};
pub use css::FontFace;
pub use definition::{
    default_definitions, load_definitions, parse_definitions, validate_definitions, SubsetDefinition,
};
pub use error::{Error, Result};
pub use generate::{Generator, Output};
pub use names::{default_needles, relabel_font, Relabel};
pub use subset::{subset_font, SubsetOptions, DEFAULT_DROP_TABLES};
