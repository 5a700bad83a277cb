//! Extension index
//!
//! Maps a normalized extension token to the catalog positions of every
//! signature advertising it. Buckets keep catalog order so lookups are
//! deterministic.

use crate::catalog::Catalog;
use crate::types::FileSignature;
use std::collections::HashMap;
use tracing::debug;

/// Normalizes an extension for lookup: trims it, strips one leading dot and
/// uppercases it.
///
/// ```
/// use filesig_core::normalize_extension;
///
/// assert_eq!(normalize_extension(".pdf"), "PDF");
/// assert_eq!(normalize_extension(" Jpeg "), "JPEG");
/// ```
pub fn normalize_extension(raw: &str) -> String {
    let trimmed = raw.trim();
    trimmed
        .strip_prefix('.')
        .unwrap_or(trimmed)
        .to_uppercase()
}

#[derive(Debug, Clone, Default)]
pub struct ExtensionIndex {
    buckets: HashMap<String, Vec<usize>>,
}

impl ExtensionIndex {
    pub fn build(catalog: &Catalog) -> Self {
        let mut buckets: HashMap<String, Vec<usize>> = HashMap::new();

        for (position, signature) in catalog.iter().enumerate() {
            for ext in signature.extensions() {
                buckets.entry(ext.clone()).or_default().push(position);
            }
        }

        debug!(extensions = buckets.len(), "extension index built");
        Self { buckets }
    }

    /// Catalog positions of the signatures advertising `ext`.
    ///
    /// `ext` must already be normalized; unknown extensions yield an empty
    /// slice.
    pub fn lookup(&self, ext: &str) -> &[usize] {
        self.buckets.get(ext).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Resolves [`lookup`](Self::lookup) against the catalog it was built from.
    pub fn signatures<'c>(
        &self,
        catalog: &'c Catalog,
        ext: &str,
    ) -> impl Iterator<Item = &'c FileSignature> {
        self.lookup(ext)
            .iter()
            .filter_map(move |&position| catalog.get(position))
    }

    /// Number of distinct extension tokens.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// All indexed tokens, sorted.
    pub fn extensions(&self) -> Vec<&str> {
        let mut exts: Vec<&str> = self.buckets.keys().map(String::as_str).collect();
        exts.sort_unstable();
        exts
    }
}
