//! Identify file formats by their magic numbers.
//!
//! The heavy lifting lives in [`filesig_core`]; this crate wires it to real
//! files and turns lookups into reports.
//!
//! ```no_run
//! use filesig::{identify, Catalog, Identifier};
//!
//! let catalog = Catalog::builtin()?;
//! let identifier = Identifier::new(&catalog);
//! let found = identify(&identifier, "invoice.pdf")?;
//! for signature in &found.matches {
//!     println!("{} ({})", signature.description(), signature.class());
//! }
//! # Ok::<(), filesig::CoreError>(())
//! ```

pub mod report;

pub use filesig_core::{
    normalize_extension, Catalog, CatalogOptions, CoreError, FileSignature, Identification,
    Identifier, Phase, RawRecord, Result, WildcardMode,
};
pub use report::{FileReport, MatchReport, Outcome};

use filesig_io::FileSource;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Opens `path`, runs the two-phase lookup on it and closes it again.
pub fn identify<'c>(identifier: &Identifier<'c>, path: impl AsRef<Path>) -> Result<Identification<'c>> {
    let path = path.as_ref();
    debug!(path = %path.display(), "identifying");
    let mut source = FileSource::open(path)?;
    identifier.identify(path, &mut source)
}

/// Validates `path` against every catalog signature, skipping the extension
/// phase.
pub fn identify_exhaustive<'c>(
    identifier: &Identifier<'c>,
    path: impl AsRef<Path>,
) -> Result<Identification<'c>> {
    let path = path.as_ref();
    let mut source = FileSource::open(path)?;
    Ok(Identification {
        extension: filesig_core::extension_of(path),
        matches: identifier.scan_all(&mut source)?,
        resolved_by: Phase::Exhaustive,
    })
}

/// Identifies several files in parallel. Results come back in input order.
pub fn identify_many<'c>(
    identifier: &Identifier<'c>,
    paths: &[PathBuf],
    exhaustive: bool,
) -> Vec<Result<Identification<'c>>> {
    paths
        .par_iter()
        .map(|path| {
            if exhaustive {
                identify_exhaustive(identifier, path)
            } else {
                identify(identifier, path)
            }
        })
        .collect()
}
