//! Archdoc - Generate architecture docs from module-organized PHP codebases
//!
//! Statically discovers bounded contexts and modules, extracts commands,
//! queries, domain events, event subscribers and cross-module calls, and
//! writes a normalized JSON document for an interactive viewer.

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod extractor;
pub mod model;
pub mod parser;
pub mod scanner;
pub mod symbols;

// Re-export main types
pub use config::Config;
pub use error::{Error, Result};
pub use export::{ArchExporter, DocPublisher, ExportReport};
pub use model::ArchOutput;
pub use scanner::{ClassScanner, ModuleInfo, ModuleScanner};
pub use symbols::SymbolTable;
