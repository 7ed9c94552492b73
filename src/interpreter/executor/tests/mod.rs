//! Tests for the executor
//!
//! Organized by feature area

mod helpers;
