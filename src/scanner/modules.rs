// Module discovery
//
// A module is visible when a marker file named `*Extension.php` (suffix
// configurable) sits in its infrastructure layer and declares a concrete
// subtype of the module-registration base type. Context and module names
// come from the first two path segments beneath the scanned root.

use crate::config::ConventionsConfig;
use crate::scanner::ModuleInfo;
use crate::symbols::SymbolTable;
use std::path::Path;
use walkdir::WalkDir;

/// Discovers modules by scanning for marker files
pub struct ModuleScanner<'a> {
    table: &'a SymbolTable,
    conventions: &'a ConventionsConfig,
    exclude_contexts: &'a [String],
}

impl<'a> ModuleScanner<'a> {
    pub fn new(
        table: &'a SymbolTable,
        conventions: &'a ConventionsConfig,
        exclude_contexts: &'a [String],
    ) -> Self {
        Self {
            table,
            conventions,
            exclude_contexts,
        }
    }

    /// Scan the source root for modules, sorted by marker file name.
    /// Markers that fail to resolve or are not concrete subtypes of the
    /// module base are skipped, never fatal.
    pub fn scan(&self, root: &Path) -> Vec<ModuleInfo> {
        let mut modules = Vec::new();

        for entry in WalkDir::new(root)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if path.is_dir() {
                continue;
            }

            let file_name = match path.file_name().and_then(|n| n.to_str()) {
                Some(name) => name,
                None => continue,
            };
            if !file_name.ends_with(&self.conventions.marker_suffix) {
                continue;
            }

            let relative = match path.strip_prefix(root) {
                Ok(relative) => relative,
                Err(_) => continue,
            };
            let segments: Vec<&str> = relative
                .iter()
                .filter_map(|s| s.to_str())
                .collect();

            // {Context}/{Module}/{Infrastructure}/{Marker}.php
            if segments.len() < 4 {
                continue;
            }

            let context = segments[0];
            let module = segments[1];
            if self.exclude_contexts.iter().any(|c| c == context) {
                continue;
            }

            let Some(class) = self.table.class_for_file(path) else {
                continue;
            };
            if !class.is_concrete_class() {
                continue;
            }
            if !self
                .table
                .is_subtype_of(&class.fqcn, &self.conventions.module_base)
            {
                continue;
            }

            modules.push(ModuleInfo {
                context: context.to_string(),
                module: module.to_string(),
                path: root.join(context).join(module),
                description: class.summary(),
            });
        }

        modules
    }
}
