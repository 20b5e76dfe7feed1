// Class iteration over a module subtree
//
// Thin view over the symbol table: every resolvable class under a module
// directory, in file order, optionally restricted to one layer
// subdirectory.

use crate::scanner::ModuleInfo;
use crate::symbols::{ClassInfo, SymbolTable};

/// Yields class descriptors for a module
pub struct ClassScanner<'a> {
    table: &'a SymbolTable,
}

impl<'a> ClassScanner<'a> {
    pub fn new(table: &'a SymbolTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &'a SymbolTable {
        self.table
    }

    /// Every class in the module subtree
    pub fn scan(&self, module: &ModuleInfo) -> Vec<&'a ClassInfo> {
        self.table.classes_under(&module.path)
    }

    /// Classes in one layer subdirectory of the module; nothing if that
    /// subdirectory does not exist.
    pub fn scan_layer(&self, module: &ModuleInfo, layer: &str) -> Vec<&'a ClassInfo> {
        let path = module.path.join(layer);
        if !path.is_dir() {
            return Vec::new();
        }
        self.table.classes_under(&path)
    }
}
