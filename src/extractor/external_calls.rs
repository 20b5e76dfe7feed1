// Cross-module call extraction
//
// A class participates when its constructor depends on one of the two
// dispatch capabilities. Its recorded `new` targets are resolved through
// the file's alias map; a call edge is emitted for each target that lives
// in another module and is a command or query subtype. Unresolvable
// targets are skipped, never an error.

use crate::config::ConventionsConfig;
use crate::model::{CallKind, ExternalCallOutput};
use crate::scanner::{ClassScanner, ModuleInfo};
use crate::symbols::{resolve_type_name, ClassInfo, SymbolTable};

/// Extracts cross-module command/query dispatches from a module
pub struct ExternalCallExtractor<'a> {
    scanner: ClassScanner<'a>,
    conventions: &'a ConventionsConfig,
}

impl<'a> ExternalCallExtractor<'a> {
    pub fn new(table: &'a SymbolTable, conventions: &'a ConventionsConfig) -> Self {
        Self {
            scanner: ClassScanner::new(table),
            conventions,
        }
    }

    pub fn extract(&self, module: &ModuleInfo) -> Vec<ExternalCallOutput> {
        let mut calls = Vec::new();

        for class in self.scanner.scan(module) {
            if !self.has_bus_dependency(class) {
                continue;
            }
            self.extract_from_class(class, module, &mut calls);
        }

        calls
    }

    /// The constructor must declare a parameter typed as one of the two
    /// known dispatch capabilities.
    fn has_bus_dependency(&self, class: &ClassInfo) -> bool {
        class.constructor_params.iter().any(|p| {
            p.type_class == self.conventions.command_bus
                || p.type_class == self.conventions.query_bus
        })
    }

    fn extract_from_class(
        &self,
        class: &ClassInfo,
        module: &ModuleInfo,
        calls: &mut Vec<ExternalCallOutput>,
    ) {
        let table = self.scanner.table();

        for written in &class.instantiations {
            let fqcn = resolve_type_name(written, &class.uses, &class.namespace);

            let Some(target) = table.get(&fqcn) else {
                continue;
            };

            let Some((context, target_module)) =
                context_and_module(&fqcn, &self.conventions.root_namespace)
            else {
                continue;
            };
            if context == module.context && target_module == module.module {
                continue;
            }

            let kind = if table.is_subtype_of(&fqcn, &self.conventions.command_base) {
                CallKind::Command
            } else if table.is_subtype_of(&fqcn, &self.conventions.query_base) {
                CallKind::Query
            } else {
                continue;
            };

            calls.push(ExternalCallOutput {
                kind,
                source: class.short_name.clone(),
                source_class: class.fqcn.clone(),
                name: target.short_name.clone(),
                target_class: fqcn,
                target_context: context,
                target_module,
            });
        }
    }
}

/// Derive (context, module) from the path segments of a qualified name
/// beneath the configured root namespace.
fn context_and_module(fqcn: &str, root_namespace: &str) -> Option<(String, String)> {
    let mut segments = fqcn.split('\\');

    if segments.next()? != root_namespace {
        return None;
    }
    let context = segments.next()?;
    let module = segments.next()?;

    Some((context.to_string(), module.to_string()))
}
