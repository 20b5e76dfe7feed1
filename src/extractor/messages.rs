// Command and query extraction
//
// Both message kinds share one routine: concrete classes in the
// application layer whose parent chain contains the configured base type.
// The input list comes from the constructor; the output type comes from
// the `@extends Base<T>` annotation, with a per-kind sentinel when absent.

use crate::config::ConventionsConfig;
use crate::model::{MessageOutput, OutputTypeOutput, ParameterOutput};
use crate::parser::extract_generic_type;
use crate::scanner::{ClassScanner, ModuleInfo};
use crate::symbols::{ClassInfo, SymbolTable};

/// Extracts command messages from a module's application layer
pub struct CommandExtractor<'a> {
    scanner: ClassScanner<'a>,
    conventions: &'a ConventionsConfig,
}

impl<'a> CommandExtractor<'a> {
    pub fn new(table: &'a SymbolTable, conventions: &'a ConventionsConfig) -> Self {
        Self {
            scanner: ClassScanner::new(table),
            conventions,
        }
    }

    pub fn extract(&self, module: &ModuleInfo) -> Vec<MessageOutput> {
        extract_messages(
            &self.scanner,
            module,
            self.conventions,
            &self.conventions.command_base,
            OutputTypeOutput::void,
        )
    }
}

/// Extracts query messages from a module's application layer
pub struct QueryExtractor<'a> {
    scanner: ClassScanner<'a>,
    conventions: &'a ConventionsConfig,
}

impl<'a> QueryExtractor<'a> {
    pub fn new(table: &'a SymbolTable, conventions: &'a ConventionsConfig) -> Self {
        Self {
            scanner: ClassScanner::new(table),
            conventions,
        }
    }

    pub fn extract(&self, module: &ModuleInfo) -> Vec<MessageOutput> {
        extract_messages(
            &self.scanner,
            module,
            self.conventions,
            &self.conventions.query_base,
            OutputTypeOutput::mixed,
        )
    }
}

fn extract_messages(
    scanner: &ClassScanner<'_>,
    module: &ModuleInfo,
    conventions: &ConventionsConfig,
    base: &str,
    default_output: fn() -> OutputTypeOutput,
) -> Vec<MessageOutput> {
    let table = scanner.table();

    scanner
        .scan_layer(module, &conventions.application_dir)
        .into_iter()
        .filter(|class| class.is_concrete_class())
        .filter(|class| table.is_subtype_of(&class.fqcn, base))
        .map(|class| message_output(class, default_output()))
        .collect()
}

fn message_output(class: &ClassInfo, default_output: OutputTypeOutput) -> MessageOutput {
    let input = class
        .constructor_params
        .iter()
        .map(|p| {
            ParameterOutput::new(
                &p.name,
                &p.type_display,
                &p.type_class,
                p.description.clone(),
            )
        })
        .collect();

    let output = class
        .doc
        .as_deref()
        .and_then(|doc| extract_generic_type(doc, &class.uses, &class.namespace))
        .map(|generic| OutputTypeOutput::new(generic.type_name, generic.class))
        .unwrap_or(default_output);

    MessageOutput {
        name: class.short_name.clone(),
        class: class.fqcn.clone(),
        description: class.summary(),
        input,
        output,
    }
}
