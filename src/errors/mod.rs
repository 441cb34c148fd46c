//! Error types and error handling for the lexer.
//!
//! This module defines the error types produced around a scan session:
//!
//! - Lexical error kinds carried by `Invalid` tokens
//! - Error structures with source position information
//! - Helpful tips attached to each lexical error
//! - Source loading errors, raised before scanning begins

pub mod errors;
