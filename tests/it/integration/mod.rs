//! Integration tests for the moodboard core.
//!
//! These tests verify the interaction between multiple components
//! and test complete workflows end-to-end.

mod export_tests;
mod script_tests;
