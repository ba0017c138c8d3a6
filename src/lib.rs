//! AAS Validation
//!
//! Validation core for Asset Administration Shell documents: reference key
//! chains, XSD-typed literals, and the entity rules that tie them together.
//!
//! ## Features
//!
//! - **Reference grammar**: ModelReference and ExternalReference key chains,
//!   fragment keys, list indices
//! - **Typed literals**: the XSD subset AAS uses, with range and format checks
//! - **Coercion**: opt-in typed output for export, never ambient
//! - **Entities**: shells, submodels, and submodel elements validated on
//!   construction and on parse
//! - **Batch checking**: walk a tree of JSON documents and report per file
//!
//! ## Example
//!
//! ```
//! use aas_validation::reference::{validate_reference, Key, KeyType, ReferenceType};
//! use aas_validation::literal::{validate_typed_literal, DataTypeDefXsd};
//!
//! let keys = vec![
//!     Key::new(KeyType::Submodel, "S1"),
//!     Key::new(KeyType::SubmodelElementList, "Items"),
//!     Key::new(KeyType::Property, "2"),
//! ];
//! assert!(validate_reference(ReferenceType::ModelReference, &keys).is_ok());
//!
//! let err = validate_typed_literal(DataTypeDefXsd::UnsignedShort, "65536").unwrap_err();
//! assert_eq!(err.rule(), "range-error");
//! ```

pub mod check;
pub mod config;
pub mod error;
pub mod literal;
pub mod model;
pub mod reference;

pub use error::{AasError, ConfigurationError, ConstraintError, Result, StructuralError, ValueError};
pub use literal::{
    coerce_typed_literal, validate_tagged_literal, validate_typed_literal, CoerceOptions,
    DataTypeDefXsd, TypedValue,
};
pub use model::{ExportOptions, Validate};
pub use reference::{validate_reference, Key, KeyType, Reference, ReferenceType};
