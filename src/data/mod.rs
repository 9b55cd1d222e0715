//! Data pipeline module
//!
//! Ingestion, cleaning, charting and export for uploaded tables.
//!
//! ## Pipeline
//!
//! - `ingest`: pick a parser from the extension (`.csv` via polars,
//!   `.xlsx` via calamine)
//! - `cleaning`: in-place transforms
//! - `chart_engine`: chart specifications from two numeric columns
//! - `export` / `archive`: CSV or Excel output, bundled into one ZIP
//!
//! ## Error Handling
//!
//! All data operations return `DataResult<T>` which uses the `DataError` type.
//! Every error is scoped to one file.

mod archive;
mod chart_engine;
mod cleaning;
mod csv_parser;
mod error;
mod excel;
mod export;
mod ingest;

pub use archive::*;
pub use chart_engine::*;
pub use cleaning::*;
pub use csv_parser::*;
pub use error::*;
pub use excel::*;
pub use export::*;
pub use ingest::*;
