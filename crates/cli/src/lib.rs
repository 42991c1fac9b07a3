//! Terminal output utilities for Buildyard
//!
//! Provides shared CLI functionality:
//! - Status messages
//! - Error rendering with recovery suggestions
//! - Size, count, and duration formatting

#![warn(missing_docs)]

pub mod output;
