//! A Rust library and web dashboard over the DANE non-fetal mortality
//! extracts, with schema normalization, ICD-10 cause resolution, and
//! filterable chart aggregation.

pub mod aggregate;
pub mod charts;
pub mod codes;
pub mod config;
pub mod dataset;
pub mod demo;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod reader;
pub mod registry;
pub mod schema;
pub mod server;
pub mod utils;

// Re-export the most common types for easier use
// Core types
pub use config::DashboardConfig;
pub use error::{DashboardError, Result};
pub use loader::{Dashboard, load_dashboard};

// Arrow types
pub use arrow::datatypes::Schema as ArrowSchema;
pub use arrow::record_batch::RecordBatch;

// Dataset and filtering
pub use codes::CauseCatalog;
pub use dataset::{MortalityData, Selection};
pub use filter::{Expr, ExpressionFilter, LiteralValue};
pub use model::DivisionLookup;

// Source loaders
pub use registry::{CodigosSource, DivipolaSource, NoFetalSource, TableSource};
