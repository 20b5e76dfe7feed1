// Scanner module: module discovery via marker files and class iteration

pub mod classes;
pub mod modules;

pub use classes::ClassScanner;
pub use modules::ModuleScanner;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A discovered module: one vertical slice of a bounded context
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModuleInfo {
    /// Bounded context name (first path segment under the root)
    pub context: String,
    /// Module name (second path segment under the root)
    pub module: String,
    /// Absolute path of the module directory
    pub path: PathBuf,
    /// Summary taken from the marker class docblock
    pub description: Option<String>,
}
