//! JSON format tests

mod interop;
