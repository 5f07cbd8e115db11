//! Board module tests.
//!
//! Tests are organized into separate files by category:
//! - `perft.rs` - Node counts for move generation
//! - `make_unmake.rs` - Make/unmake move correctness
//! - `edge_cases.rs` - Special positions and edge cases
//! - `legality.rs` - Generated moves against a brute-force reference
//! - `proptest.rs` - Property-based tests

mod edge_cases;
mod legality;
mod proptest;
