//! binary subset-faces tool
//!
//! Cuts a source font into the configured subsets, writes each one next to
//! the others and prints `@font-face` rules for them.

use std::{
    io::{self, Write},
    path::PathBuf,
    process::ExitCode,
};

use clap::Parser;
use skera::{parse_tag_list, SubsetFlags};
use subset_faces::{load_definitions, Error, FontFace, Generator, Output, RangeStyle, Result};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The source font file.
    font: PathBuf,

    /// Directory the subset fonts are written to
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// JSON file listing the subsets to produce; built-in subsets if omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// font-family used in the CSS, defaults to the source family name
    #[arg(long)]
    family: Option<String>,

    /// Text in name records to suffix with the subset name (repeatable)
    #[arg(long)]
    rename: Vec<String>,

    /// Tables to drop, comma separated ('*' for all)
    #[arg(long)]
    drop_tables: Option<String>,

    /// Layout features to keep, comma separated ('*' for all)
    #[arg(long)]
    layout_features: Option<String>,

    /// drop hints
    #[arg(long)]
    no_hinting: bool,

    /// Fold consecutive codepoints into spans in unicode-range
    #[arg(long)]
    collapse_ranges: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    let generator = configure(args)?;
    let (outputs, faces) = generator.run()?;
    write_report(&mut io::stdout().lock(), &outputs, &faces)
        .map_err(|source| Error::Io {
            path: "<stdout>".into(),
            source,
        })
}

/// The written files, then the CSS for them.
fn write_report(out: &mut impl Write, outputs: &[Output], faces: &[FontFace]) -> io::Result<()> {
    for output in outputs {
        writeln!(out, "Wrote {}", output.path.display())?;
    }
    writeln!(out, "Font Faces")?;
    for face in faces {
        write!(out, "{face}")?;
    }
    out.flush()
}

fn configure(args: Args) -> Result<Generator> {
    let mut generator = Generator::new(args.font, args.out_dir);
    if let Some(config) = &args.config {
        generator.definitions = load_definitions(config)?;
    }
    if let Some(tables) = &args.drop_tables {
        generator.options.drop_tables = parse_tag_list(tables)?;
    }
    if let Some(features) = &args.layout_features {
        generator.options.layout_features = parse_tag_list(features)?;
    }
    if args.no_hinting {
        generator.options.flags |= SubsetFlags::SUBSET_FLAGS_NO_HINTING;
    }
    if args.collapse_ranges {
        generator.range_style = RangeStyle::Collapsed;
    }
    if !args.rename.is_empty() {
        generator.needles = Some(args.rename);
    }
    generator.css_family = args.family;
    Ok(generator)
}
