//! Paired-source format tests
//!
//! Tests for bidirectional paired-source ↔ Notebook conversion.

mod fixtures;
mod laws;
mod scenarios;
