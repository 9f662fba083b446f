//! Equality-predicate filtering over record batches
//!
//! The dashboard's interactive filters compile to [`Expr`] trees that are
//! evaluated into boolean masks and applied with Arrow's filter kernel.

pub mod core;
pub mod expr;

pub use core::{BatchFilter, filter_record_batch};
pub use expr::{Expr, ExpressionFilter, LiteralValue, eq_filter, starts_with_filter};
