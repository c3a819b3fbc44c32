//! Pasteimg - paste clipboard images into temporary PNG files
//!
//! This library exports the core modules for testing and benchmarks.

pub mod app;
pub mod clipboard;
pub mod image;
pub mod logging;
pub mod models;
pub mod paste;
pub mod storage;
pub mod timers;
pub mod ui;
