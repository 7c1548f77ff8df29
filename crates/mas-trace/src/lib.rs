//! `mas-trace` — world-state trace writers for the rust_mas framework.
//!
//! A [`CsvTrace`] attaches to an environment as a change listener and
//! appends one row per object for every notified tick.  Listener hooks have
//! no return value, so write errors are stored and retrieved after the run.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use mas_trace::CsvTrace;
//!
//! let trace = Arc::new(CsvTrace::create(Path::new("trace.csv"))?);
//! env.add_listener(trace.clone());
//! // ... step the environment ...
//! trace.flush()?;
//! if let Some(e) = trace.take_error() {
//!     eprintln!("trace error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod row;

#[cfg(test)]
mod tests;

pub use csv::CsvTrace;
pub use error::{TraceError, TraceResult};
pub use row::SnapshotRow;
