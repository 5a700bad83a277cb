//! Core of filesig: the signature catalog, its extension index, the
//! signature matcher and the two-phase lookup built on top of them.

pub mod catalog;
mod error;
pub mod index;
pub mod lookup;
pub mod matcher;
mod traits;
mod types;

pub use catalog::{Catalog, CatalogOptions, RawRecord, WildcardMode};
pub use error::{CoreError, Field, ParseError, Result};
pub use index::{normalize_extension, ExtensionIndex};
pub use lookup::{extension_of, Identification, Identifier, LookupState, Phase};
pub use matcher::validate;
pub use traits::ByteSource;
pub use types::{FileSignature, Pattern, PatternByte};
