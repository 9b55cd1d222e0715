//! Data Sweeper: clean, chart and convert CSV and Excel files.
//!
//! The pipeline runs per uploaded file:
//!
//! 1. **Ingestion** (`data::ingest`): `.csv` or `.xlsx` into a [`types::Table`]
//! 2. **Cleaning** (`data::Transform`): deduplicate, fill missing numbers,
//!    drop empty columns, lowercase text
//! 3. **Visualization** (`data::build_chart`): bar, pie or line chart specs
//! 4. **Export** (`data::export_table`, `data::bundle`): CSV or Excel output,
//!    optionally bundled into `processed_files.zip`
//!
//! [`session::Session`] keeps the per-file state an interactive host needs
//! and queues a notification for every command.

pub mod constants;
pub mod data;
pub mod notifications;
pub mod session;
pub mod settings;
pub mod types;
