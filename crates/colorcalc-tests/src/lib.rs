//! End-to-end tests for colorcalc crates.
//!
//! Each test resolves a set of command-line style options, runs a record
//! stream through the processor and checks the bytes that come out.
