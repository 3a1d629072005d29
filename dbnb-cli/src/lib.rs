//! Library half of the dbnb cli, shared between the binary and its tests.

pub mod transforms;
