//! Signature catalog
//!
//! Turns raw textual records into an ordered, immutable list of
//! [`FileSignature`]s. Construction is all-or-nothing: the first malformed
//! record aborts the build and no partial catalog is ever returned.

use crate::error::{Field, ParseError, Result};
use crate::types::{FileSignature, Pattern, PatternByte};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// Marker used by the dataset for "no header/trailer".
pub const NULL_PATTERN: &str = "(null)";
/// Marker used by the dataset for "no extensions".
pub const NO_EXTENSIONS: &str = "(none)";

const BUILTIN_CATALOG: &str = include_str!("../data/builtin.json");

/// One unparsed catalog entry, as found in the dataset.
///
/// Deserializes from either a six-element string array or an object with
/// the named fields.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawRecord {
    pub description: String,
    pub header: String,
    pub extensions: String,
    pub class: String,
    pub offset: String,
    pub trailer: String,
}

impl RawRecord {
    pub fn new(
        description: &str,
        header: &str,
        extensions: &str,
        class: &str,
        offset: &str,
        trailer: &str,
    ) -> Self {
        Self {
            description: description.to_string(),
            header: header.to_string(),
            extensions: extensions.to_string(),
            class: class.to_string(),
            offset: offset.to_string(),
            trailer: trailer.to_string(),
        }
    }
}

/// How `?`-prefixed wildcard tokens in patterns are ingested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WildcardMode {
    /// Each wildcard token becomes a position that matches any byte.
    #[default]
    MatchAny,
    /// Wildcard tokens are removed, shifting the remaining bytes together.
    Drop,
}

/// Options controlling catalog construction
#[derive(Debug, Clone, Default)]
pub struct CatalogOptions {
    pub wildcards: WildcardMode,
}

impl CatalogOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the wildcard ingestion mode
    pub fn with_wildcards(mut self, mode: WildcardMode) -> Self {
        self.wildcards = mode;
        self
    }
}

/// The full, immutable set of known signatures in source order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    signatures: Vec<FileSignature>,
}

impl Catalog {
    /// Builds a catalog with default options.
    pub fn build<I>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = RawRecord>,
    {
        Self::build_with(records, &CatalogOptions::default())
    }

    pub fn build_with<I>(records: I, options: &CatalogOptions) -> Result<Self>
    where
        I: IntoIterator<Item = RawRecord>,
    {
        let signatures = records
            .into_iter()
            .map(|record| parse_record(&record, options))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        debug!(signatures = signatures.len(), "catalog built");
        Ok(Self { signatures })
    }

    /// Parses a JSON catalog document and builds it.
    pub fn from_json(text: &str, options: &CatalogOptions) -> Result<Self> {
        let records: Vec<RawRecord> = serde_json::from_str(text)?;
        Self::build_with(records, options)
    }

    /// Reads a JSON catalog document from disk.
    pub fn load(path: impl AsRef<Path>, options: &CatalogOptions) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading catalog");
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text, options)
    }

    /// The catalog compiled into the crate.
    pub fn builtin() -> Result<Self> {
        Self::builtin_with(&CatalogOptions::default())
    }

    pub fn builtin_with(options: &CatalogOptions) -> Result<Self> {
        Self::from_json(BUILTIN_CATALOG, options)
    }

    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&FileSignature> {
        self.signatures.get(position)
    }

    pub fn signatures(&self) -> &[FileSignature] {
        &self.signatures
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FileSignature> {
        self.signatures.iter()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a FileSignature;
    type IntoIter = std::slice::Iter<'a, FileSignature>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn parse_record(record: &RawRecord, options: &CatalogOptions) -> Result<FileSignature> {
    let desc = record.description.as_str();
    let header = parse_pattern(&record.header, options.wildcards)
        .map_err(|reason| ParseError::new(Field::Header, desc, reason))?;
    let trailer = parse_pattern(&record.trailer, options.wildcards)
        .map_err(|reason| ParseError::new(Field::Trailer, desc, reason))?;
    let offset = parse_offset(&record.offset)
        .map_err(|reason| ParseError::new(Field::Offset, desc, reason))?;

    let signature = FileSignature::new(desc, header, offset, trailer, record.class.as_str())?;
    Ok(signature.with_extensions(split_extensions(&record.extensions)))
}

/// Decodes a space-separated hex pattern. `None` means "no pattern".
fn parse_pattern(text: &str, wildcards: WildcardMode) -> std::result::Result<Option<Pattern>, String> {
    let text = text.trim();
    if text.is_empty() || text == NULL_PATTERN {
        return Ok(None);
    }

    let mut bytes = Vec::new();
    for token in text.split_whitespace() {
        if token.starts_with('?') {
            if wildcards == WildcardMode::MatchAny {
                bytes.push(PatternByte::Any);
            }
            continue;
        }
        let decoded = hex::decode(token).map_err(|e| format!("token {token:?}: {e}"))?;
        bytes.extend(decoded.into_iter().map(PatternByte::Exact));
    }

    Ok(Some(Pattern::new(bytes)).filter(|p| !p.is_empty()))
}

fn parse_offset(text: &str) -> std::result::Result<u64, String> {
    let value: i64 = text
        .trim()
        .parse()
        .map_err(|e| format!("{text:?} is not a decimal integer: {e}"))?;
    u64::try_from(value).map_err(|_| format!("{value} is negative"))
}

fn split_extensions(text: &str) -> Vec<&str> {
    let text = text.trim();
    if text.is_empty() || text == NO_EXTENSIONS {
        return Vec::new();
    }
    text.split('|').collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use rstest::rstest;

    fn pdf_record() -> RawRecord {
        RawRecord::new("Portable Document Format", "25 50 44 46", "PDF", "Document", "0", "(null)")
    }

    fn parse_error(result: Result<Catalog>) -> ParseError {
        match result {
            Err(CoreError::Parse(e)) => e,
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_pdf_record() {
        let catalog = Catalog::build([pdf_record()]).unwrap();
        assert_eq!(catalog.len(), 1);

        let sig = catalog.get(0).unwrap();
        assert_eq!(sig.description(), "Portable Document Format");
        assert_eq!(sig.header(), Some(&Pattern::exact(&[0x25, 0x50, 0x44, 0x46])));
        assert_eq!(sig.header_offset(), 0);
        assert!(sig.trailer().is_none());
        assert_eq!(sig.extensions(), ["PDF"]);
        assert_eq!(sig.class(), "Document");
    }

    #[test]
    fn test_bad_offset_names_the_field() {
        let mut record = pdf_record();
        record.offset = "abc".to_string();
        let err = parse_error(Catalog::build([record]));
        assert_eq!(err.field, Field::Offset);
        assert_eq!(err.record, "Portable Document Format");
        assert!(err.to_string().contains("offset"));
    }

    #[test]
    fn test_negative_offset_is_rejected() {
        let mut record = pdf_record();
        record.offset = "-4".to_string();
        assert_eq!(parse_error(Catalog::build([record])).field, Field::Offset);
    }

    #[rstest]
    #[case::odd_length("25 5")]
    #[case::not_hex("25 ZZ")]
    #[case::odd_multi_byte("255044F")]
    fn test_bad_header_hex(#[case] header: &str) {
        let mut record = pdf_record();
        record.header = header.to_string();
        assert_eq!(parse_error(Catalog::build([record])).field, Field::Header);
    }

    #[test]
    fn test_bad_trailer_hex() {
        let mut record = pdf_record();
        record.trailer = "0A 25 25 4G".to_string();
        assert_eq!(parse_error(Catalog::build([record])).field, Field::Trailer);
    }

    #[test]
    fn test_empty_description_is_rejected() {
        let mut record = pdf_record();
        record.description = "  ".to_string();
        assert_eq!(parse_error(Catalog::build([record])).field, Field::Description);
    }

    #[test]
    fn test_build_is_all_or_nothing() {
        let mut broken = pdf_record();
        broken.description = "Broken".to_string();
        broken.header = "XY".to_string();
        let records = vec![pdf_record(), broken, pdf_record()];
        let err = parse_error(Catalog::build(records));
        assert_eq!(err.record, "Broken");
    }

    #[test]
    fn test_multi_byte_tokens_are_decoded() {
        let record = RawRecord::new("Packed", "2550 44 46", "(none)", "Document", "0", "(null)");
        let catalog = Catalog::build([record]).unwrap();
        let sig = catalog.get(0).unwrap();
        assert_eq!(sig.header(), Some(&Pattern::exact(b"%PDF")));
        assert!(sig.extensions().is_empty());
    }

    #[rstest]
    #[case(WildcardMode::MatchAny, "52 49 46 46 ?? ?? ?? ?? 57 41 56 45")]
    #[case(WildcardMode::Drop, "52 49 46 46 57 41 56 45")]
    fn test_wildcard_modes(#[case] mode: WildcardMode, #[case] expected: &str) {
        let record = RawRecord::new(
            "Resource Interchange File Format - Wave",
            "52 49 46 46 ?? ?? ?? ?? 57 41 56 45",
            "WAV",
            "Multimedia",
            "0",
            "(null)",
        );
        let options = CatalogOptions::new().with_wildcards(mode);
        let catalog = Catalog::build_with([record], &options).unwrap();
        let header = catalog.get(0).unwrap().header().unwrap();
        assert_eq!(header.to_string(), expected);
    }

    #[test]
    fn test_only_wildcards_in_drop_mode_leaves_no_header() {
        let record = RawRecord::new("Odd", "?? ??", "ODD", "Misc", "0", "(null)");
        let options = CatalogOptions::new().with_wildcards(WildcardMode::Drop);
        let catalog = Catalog::build_with([record], &options).unwrap();
        assert!(catalog.get(0).unwrap().header().is_none());
    }

    #[rstest]
    #[case("JPG|JPEG|jpe", &["JPG", "JPEG", "JPE"])]
    #[case("doc|DOC|.dot|", &["DOC", "DOT"])]
    #[case("(none)", &[])]
    #[case("", &[])]
    fn test_extension_strings(#[case] raw: &str, #[case] expected: &[&str]) {
        let record = RawRecord::new("Something", "00", raw, "Misc", "0", "(null)");
        let catalog = Catalog::build([record]).unwrap();
        assert_eq!(catalog.get(0).unwrap().extensions(), expected);
    }

    #[test]
    fn test_from_json_accepts_arrays_and_objects() {
        let text = r#"[
            ["Portable Document Format", "25 50 44 46", "PDF", "Document", "0", "(null)"],
            {"description": "GIF", "header": "47 49 46 38", "extensions": "GIF",
             "class": "Picture", "offset": "0", "trailer": "00 3B"}
        ]"#;
        let catalog = Catalog::from_json(text, &CatalogOptions::default()).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(1).unwrap().trailer(), Some(&Pattern::exact(&[0x00, 0x3B])));
    }

    #[test]
    fn test_from_json_rejects_short_records() {
        let text = r#"[["Too short", "00", "X"]]"#;
        let err = Catalog::from_json(text, &CatalogOptions::default()).unwrap_err();
        assert!(matches!(err, CoreError::Document(_)));
        assert!(err.is_catalog_error());
    }

    #[test]
    fn test_builtin_catalog_builds() {
        let catalog = Catalog::builtin().unwrap();
        assert!(catalog.len() > 20);
        assert!(catalog.iter().all(|s| !s.description().is_empty()));
        assert!(catalog.iter().any(|s| s.has_extension("PDF")));
    }
}
