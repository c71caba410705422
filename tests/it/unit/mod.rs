//! Unit tests for the moodboard core.

mod keyboard_tests;
mod notifications_tests;
mod settings_tests;
mod snapshot_tests;
mod view_tests;
