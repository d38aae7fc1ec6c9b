//! Arithmetic expression evaluation.
//!
//! See [`expr::calc`] for the entry point.
pub mod expr;
