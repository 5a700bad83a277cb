//! Rendering lookup results and mapping them to process outcomes.

use filesig_core::{CoreError, FileSignature, Identification, Phase};
use serde::Serialize;
use std::fmt::Write as _;
use std::path::Path;

/// What a caller learns about one matching signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchReport {
    pub description: String,
    pub class: String,
    pub extensions: Vec<String>,
}

impl From<&FileSignature> for MatchReport {
    fn from(signature: &FileSignature) -> Self {
        Self {
            description: signature.description().to_string(),
            class: signature.class().to_string(),
            extensions: signature.extensions().to_vec(),
        }
    }
}

/// Result of one file, in a shape that serializes cleanly.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_by: Option<Phase>,
    pub matches: Vec<MatchReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip)]
    pub outcome: Outcome,
}

impl FileReport {
    pub fn new(path: &Path, result: &Result<Identification<'_>, CoreError>) -> Self {
        let path = path.display().to_string();
        match result {
            Ok(found) => Self {
                path,
                extension: Some(found.extension.clone()).filter(|e| !e.is_empty()),
                resolved_by: Some(found.resolved_by),
                matches: found.matches.iter().copied().map(MatchReport::from).collect(),
                error: None,
                outcome: Outcome::of(found),
            },
            Err(e) => Self {
                path,
                extension: None,
                resolved_by: None,
                matches: Vec::new(),
                error: Some(e.to_string()),
                outcome: Outcome::from_error(e),
            },
        }
    }

    /// Human-readable rendering.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        if let Some(error) = &self.error {
            let _ = writeln!(out, "{}: error: {}", self.path, error);
            return out;
        }
        if self.matches.is_empty() {
            let _ = writeln!(out, "{}: No matching signatures found.", self.path);
            return out;
        }

        let via = match self.resolved_by {
            Some(Phase::Fallback) => "fallback catalog scan",
            Some(Phase::Exhaustive) => "exhaustive catalog scan",
            _ => "extension",
        };
        let _ = writeln!(
            out,
            "{}: {} signature(s) matched (via {}):",
            self.path,
            self.matches.len(),
            via
        );
        for m in &self.matches {
            let _ = writeln!(out);
            let _ = writeln!(out, "Description:\t{}", m.description);
            let _ = writeln!(out, "Class:\t\t{}", m.class);
            let _ = writeln!(out, "Extension:\t{}", m.extensions.join("|"));
        }
        out
    }
}

/// The four distinguishable query outcomes, ordered by severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Outcome {
    #[default]
    Matched,
    NoMatch,
    IoFailure,
    CatalogFailure,
}

impl Outcome {
    pub fn of(found: &Identification<'_>) -> Self {
        if found.is_match() {
            Outcome::Matched
        } else {
            Outcome::NoMatch
        }
    }

    pub fn from_error(error: &CoreError) -> Self {
        if error.is_catalog_error() {
            Outcome::CatalogFailure
        } else {
            Outcome::IoFailure
        }
    }

    /// Process exit code. `2` is left to the argument parser for usage
    /// errors.
    pub fn exit_code(self) -> u8 {
        match self {
            Outcome::Matched => 0,
            Outcome::NoMatch => 1,
            Outcome::IoFailure => 3,
            Outcome::CatalogFailure => 4,
        }
    }

    /// The most severe outcome of a batch; an empty batch counts as matched.
    pub fn worst<I: IntoIterator<Item = Outcome>>(outcomes: I) -> Self {
        outcomes.into_iter().max().unwrap_or_default()
    }
}
