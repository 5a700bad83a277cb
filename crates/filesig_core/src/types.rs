//! File signature entity
//!
//! A signature is the set of magic bytes (header at a fixed offset and an
//! optional trailer at the end of the file) that identifies a file format,
//! together with the extensions and class the format is known by.

use crate::error::{Field, ParseError};
use serde::{Serialize, Serializer};
use std::fmt;

/// One position of a byte pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternByte {
    /// The byte at this position must equal the value.
    Exact(u8),
    /// Any byte is accepted at this position.
    Any,
}

impl PatternByte {
    #[inline]
    pub fn matches(self, byte: u8) -> bool {
        match self {
            PatternByte::Exact(expected) => expected == byte,
            PatternByte::Any => true,
        }
    }
}

/// An ordered byte pattern, possibly containing wildcard positions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Pattern(Vec<PatternByte>);

impl Pattern {
    pub fn new(bytes: Vec<PatternByte>) -> Self {
        Self(bytes)
    }

    /// Builds a pattern that matches exactly the given bytes.
    pub fn exact(bytes: &[u8]) -> Self {
        Self(bytes.iter().copied().map(PatternByte::Exact).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn bytes(&self) -> &[PatternByte] {
        &self.0
    }

    /// Compares `data` against the pattern position by position.
    ///
    /// `data` must be exactly as long as the pattern.
    pub fn matches(&self, data: &[u8]) -> bool {
        data.len() == self.0.len() && self.0.iter().zip(data).all(|(p, &b)| p.matches(b))
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, byte) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            match byte {
                PatternByte::Exact(b) => write!(f, "{b:02X}")?,
                PatternByte::Any => f.write_str("??")?,
            }
        }
        Ok(())
    }
}

/// Patterns serialize as their display form, e.g. `"52 49 46 46 ?? ??"`.
impl Serialize for Pattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A named pattern identifying a file format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileSignature {
    /// Human-readable label, never empty
    description: String,
    /// Bytes expected at `header_offset`
    header: Option<Pattern>,
    /// Offset from the start of the file where the header should be found
    header_offset: u64,
    /// Bytes expected at the very end of the file
    trailer: Option<Pattern>,
    /// Uppercase extension tokens without the leading dot, deduplicated
    extensions: Vec<String>,
    /// Category of the format (Picture, Archive, ...)
    class: String,
}

impl FileSignature {
    /// Creates a signature. Empty patterns are stored as absent; an empty
    /// description is rejected.
    pub fn new(
        description: impl Into<String>,
        header: Option<Pattern>,
        header_offset: u64,
        trailer: Option<Pattern>,
        class: impl Into<String>,
    ) -> Result<Self, ParseError> {
        let description = description.into();
        if description.trim().is_empty() {
            return Err(ParseError::new(
                Field::Description,
                &description,
                "description is empty",
            ));
        }
        Ok(Self {
            description,
            header: header.filter(|p| !p.is_empty()),
            header_offset,
            trailer: trailer.filter(|p| !p.is_empty()),
            extensions: Vec::new(),
            class: class.into(),
        })
    }

    /// Attaches extension tokens, normalizing and deduplicating them.
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for ext in extensions {
            let ext = crate::index::normalize_extension(ext.as_ref());
            if !ext.is_empty() && !self.extensions.contains(&ext) {
                self.extensions.push(ext);
            }
        }
        self
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn header(&self) -> Option<&Pattern> {
        self.header.as_ref()
    }

    pub fn header_offset(&self) -> u64 {
        self.header_offset
    }

    pub fn trailer(&self) -> Option<&Pattern> {
        self.trailer.as_ref()
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    pub fn class(&self) -> &str {
        &self.class
    }

    /// Whether the signature constrains content at all.
    pub fn has_content_pattern(&self) -> bool {
        self.header.is_some() || self.trailer.is_some()
    }

    pub fn has_extension(&self, ext: &str) -> bool {
        self.extensions.iter().any(|e| e == ext)
    }
}

impl fmt::Display for FileSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.description, self.class)
    }
}
