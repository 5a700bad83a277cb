//! Lookup orchestration
//!
//! A query walks an explicit state machine:
//!
//! ```text
//! Start -> ExtensionPhase -> Resolved      -> Done
//!                         \-> FallbackPhase -> Done
//! ```
//!
//! The extension phase validates only the signatures indexed under the
//! file's extension. The exhaustive fallback over the whole catalog runs
//! only when that phase produced no match, whether because the extension is
//! unknown, missing, or every candidate failed validation.

use crate::catalog::Catalog;
use crate::error::Result;
use crate::index::ExtensionIndex;
use crate::matcher::validate;
use crate::traits::ByteSource;
use crate::types::FileSignature;
use serde::Serialize;
use std::path::Path;
use tracing::debug;

/// States of a single lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupState {
    Start,
    ExtensionPhase,
    FallbackPhase,
    Resolved,
    Done,
}

impl LookupState {
    /// The state that follows `self`, given how many matches have been
    /// collected so far.
    pub fn advance(self, matches: usize) -> LookupState {
        match self {
            LookupState::Start => LookupState::ExtensionPhase,
            LookupState::ExtensionPhase if matches == 0 => LookupState::FallbackPhase,
            LookupState::ExtensionPhase => LookupState::Resolved,
            LookupState::FallbackPhase | LookupState::Resolved | LookupState::Done => {
                LookupState::Done
            }
        }
    }
}

/// Which phase produced the final answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Extension,
    Fallback,
    /// Whole-catalog scan requested up front; no extension phase ran.
    Exhaustive,
}

/// Outcome of a lookup. An empty `matches` list is a valid answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identification<'c> {
    pub extension: String,
    pub matches: Vec<&'c FileSignature>,
    pub resolved_by: Phase,
}

impl Identification<'_> {
    pub fn is_match(&self) -> bool {
        !self.matches.is_empty()
    }
}

/// Extracts the lookup extension of a path: everything after the last `.`
/// of the file name, uppercased. Empty when there is no dot.
///
/// ```
/// use filesig_core::extension_of;
/// use std::path::Path;
///
/// assert_eq!(extension_of(Path::new("report.final.pdf")), "PDF");
/// assert_eq!(extension_of(Path::new("dir.d/Makefile")), "");
/// ```
pub fn extension_of(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();
    match name.rsplit_once('.') {
        Some((_, ext)) => ext.to_uppercase(),
        None => String::new(),
    }
}

/// Runs lookups against a borrowed catalog.
///
/// The identifier owns the derived [`ExtensionIndex`]; both it and the
/// catalog are read-only, so one identifier can serve concurrent queries as
/// long as each query brings its own byte source.
#[derive(Debug)]
pub struct Identifier<'c> {
    catalog: &'c Catalog,
    index: ExtensionIndex,
}

impl<'c> Identifier<'c> {
    pub fn new(catalog: &'c Catalog) -> Self {
        Self {
            catalog,
            index: ExtensionIndex::build(catalog),
        }
    }

    pub fn index(&self) -> &ExtensionIndex {
        &self.index
    }

    /// Identifies the content of `source`, using `path` only for its
    /// extension.
    pub fn identify<S>(&self, path: &Path, source: &mut S) -> Result<Identification<'c>>
    where
        S: ByteSource + ?Sized,
    {
        let mut run = LookupRun {
            catalog: self.catalog,
            checked: vec![false; self.catalog.len()],
            matches: Vec::new(),
        };
        let mut extension = String::new();
        let mut resolved_by = Phase::Extension;
        let mut state = LookupState::Start;

        while state != LookupState::Done {
            match state {
                LookupState::Start => {
                    extension = extension_of(path);
                }
                LookupState::ExtensionPhase => {
                    let candidates = self.index.lookup(&extension);
                    debug!(%extension, candidates = candidates.len(), "extension phase");
                    for &position in candidates {
                        run.check(position, source)?;
                    }
                }
                LookupState::FallbackPhase => {
                    debug!(%extension, "no extension match, scanning full catalog");
                    resolved_by = Phase::Fallback;
                    for position in 0..self.catalog.len() {
                        run.check(position, source)?;
                    }
                }
                LookupState::Resolved | LookupState::Done => {}
            }
            state = state.advance(run.matches.len());
        }

        debug!(matches = run.matches.len(), ?resolved_by, "lookup done");
        Ok(Identification {
            extension,
            matches: run.matches,
            resolved_by,
        })
    }

    /// Validates every catalog signature in order, ignoring extensions.
    pub fn scan_all<S>(&self, source: &mut S) -> Result<Vec<&'c FileSignature>>
    where
        S: ByteSource + ?Sized,
    {
        let mut matches = Vec::new();
        for signature in self.catalog {
            if validate(signature, source)? {
                matches.push(signature);
            }
        }
        Ok(matches)
    }
}

/// Per-query bookkeeping: which catalog positions were already validated.
struct LookupRun<'c> {
    catalog: &'c Catalog,
    checked: Vec<bool>,
    matches: Vec<&'c FileSignature>,
}

impl<'c> LookupRun<'c> {
    fn check<S>(&mut self, position: usize, source: &mut S) -> Result<()>
    where
        S: ByteSource + ?Sized,
    {
        if std::mem::replace(&mut self.checked[position], true) {
            return Ok(());
        }
        let Some(signature) = self.catalog.get(position) else {
            return Ok(());
        };
        if validate(signature, source)? {
            self.matches.push(signature);
        }
        Ok(())
    }
}
