//! Account statements for Bank-Link
//!
//! - document: statement content built from a cached account
//! - pdf: the primary PDF layout
//! - csv: the plain-text fallback
//! - renderer: renderer seam and lazy PDF loading
//! - exporter: picks a renderer, falls back, names the file

pub mod csv;
pub mod document;
pub mod error;
pub mod exporter;
pub mod pdf;
pub mod renderer;

pub use crate::csv::CsvRenderer;
pub use document::{resolve_holder, statement_file_name, StatementDocument, StatementRow};
pub use error::{StatementError, StatementErrorCode, StatementResult};
pub use exporter::{ExportSettings, ExportedStatement, StatementExporter};
pub use pdf::{PdfCore, PdfRenderer, TableExtension};
pub use renderer::{BuiltinLoader, LazyRenderer, LoadState, RendererLoader, StatementRenderer};
