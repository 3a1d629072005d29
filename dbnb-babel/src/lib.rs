//! Conversion between Databricks paired-source notebooks and structured notebooks
//!
//!     This crate converts the flat, line-oriented notebook encoding that Databricks uses for
//!     source-controlled notebooks (the "paired source" files, e.g. `notebook.scala`) into an
//!     ordered list of typed cells, and back again.
//!
//!     TLDR: for format authors:
//!         - Every format converts to and from the [`notebook::Notebook`] model, nothing else.
//!         - The literal tokens of the paired-source encoding live in exactly one place
//!           (formats/databricks/dialect.rs) and are injected into both directions.
//!         - Converters are total: malformed input degrades, it does not error. Only the byte
//!           boundary (UTF-8 decoding) and structured formats like JSON can fail.
//!
//! Architecture
//!
//!     This is a pure lib, that is, it powers the dbnb cli but is shell agnostic: no code here
//!     prints, reads env vars or touches the file system. Hosts (editors, the cli) own I/O.
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── format.rs               # Format trait definition
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     ├── notebook.rs             # Cell / Notebook model
//!     ├── transforms.rs           # Functional helpers (normalize, upgrade)
//!     ├── formats
//!     │   ├── databricks
//!     │   │   ├── dialect.rs      # Versions, literal tokens, guest language
//!     │   │   ├── lines.rs        # Line classifier and block splitter
//!     │   │   ├── parser.rs       # Text → Notebook
//!     │   │   ├── serializer.rs   # Notebook → Text
//!     │   │   └── mod.rs
//!     │   └── json                # Structured notebook format
//!     └── lib.rs
//!
//! Testing
//!     tests
//!     └── <format>
//!         └── <testname>.rs
//!     └── fixtures
//!
//!     Note that rust does not by default discover tests in subdirectories, so we need to include these
//!     in the mod.
//!
//! Format Versions
//!
//!     Two encodings of the paired-source format exist in the wild. The first (V1) never writes a
//!     header and marks narrative blocks only by their `// MAGIC` lines. The second (V2) writes
//!     the `// Databricks notebook source` header, always drops the first line on read and marks
//!     narrative blocks with a `// MAGIC %md` header line. Both are selected through
//!     [`formats::databricks::SourceDialect`], never hardcoded.
//!
//!     Round tripping is a normalization law, not byte identity: whitespace around code lines is
//!     trimmed on read, so `parse(serialize(parse(x))) == parse(x)` holds while
//!     `serialize(parse(x)) == x` in general does not.
//!
pub mod error;
pub mod format;
pub mod formats;
pub mod notebook;
pub mod registry;
pub mod transforms;

pub use error::{FormatError, TextDecodeError};
pub use format::Format;
pub use formats::databricks::{SourceDialect, SourceFormat, SourceVersion};
pub use notebook::{Cell, CellKind, Notebook};
pub use registry::{FormatRegistry, RegistryOptions};

/// Parses paired-source text with the default (V2, scala) dialect.
///
/// Never fails; see [`formats::databricks::parser`] for the degradation rules.
pub fn parse(raw: &str) -> Notebook {
    formats::databricks::parse(raw, &SourceDialect::default())
}

/// Serializes a notebook with the default (V2, scala) dialect.
pub fn serialize(notebook: &Notebook) -> String {
    formats::databricks::serialize(notebook, &SourceDialect::default())
}
