// Domain event extraction
//
// Concrete subtypes of the event base type in the domain layer. The
// property list walks every ancestor the table knows in base-to-derived
// order before the class itself, so inherited fields always precede own
// fields; each name appears once, first occurrence wins.

use crate::config::ConventionsConfig;
use crate::model::{DomainEventOutput, EventPropertyOutput};
use crate::scanner::{ClassScanner, ModuleInfo};
use crate::symbols::{ClassInfo, SymbolTable};
use std::collections::HashSet;

/// Extracts domain events from a module's domain layer
pub struct DomainEventExtractor<'a> {
    scanner: ClassScanner<'a>,
    conventions: &'a ConventionsConfig,
}

impl<'a> DomainEventExtractor<'a> {
    pub fn new(table: &'a SymbolTable, conventions: &'a ConventionsConfig) -> Self {
        Self {
            scanner: ClassScanner::new(table),
            conventions,
        }
    }

    pub fn extract(&self, module: &ModuleInfo) -> Vec<DomainEventOutput> {
        let table = self.scanner.table();

        self.scanner
            .scan_layer(module, &self.conventions.domain_dir)
            .into_iter()
            .filter(|class| class.is_concrete_class())
            .filter(|class| table.is_subtype_of(&class.fqcn, &self.conventions.event_base))
            .map(|class| self.event_output(class))
            .collect()
    }

    fn event_output(&self, class: &ClassInfo) -> DomainEventOutput {
        let table = self.scanner.table();
        let mut seen: HashSet<String> = HashSet::new();
        let mut properties = Vec::new();

        for ancestor in table.parent_chain(&class.fqcn) {
            if let Some(info) = table.get(&ancestor) {
                append_fields(info, &mut seen, &mut properties);
            }
        }
        append_fields(class, &mut seen, &mut properties);

        DomainEventOutput {
            name: class.short_name.clone(),
            class: class.fqcn.clone(),
            description: class.summary(),
            properties,
        }
    }
}

fn append_fields(
    source: &ClassInfo,
    seen: &mut HashSet<String>,
    properties: &mut Vec<EventPropertyOutput>,
) {
    for field in &source.fields {
        if !seen.insert(field.name.clone()) {
            continue;
        }
        properties.push(EventPropertyOutput {
            name: field.name.clone(),
            type_name: field.type_display.clone(),
            description: field.description.clone(),
        });
    }
}
