// Event subscriber extraction
//
// Subscribers are infrastructure-layer classes carrying the subscription
// marker attribute. The subscribed event is named by the declared type of
// the first parameter of the public `__invoke` method; classes without a
// usable invocation method are silently excluded.

use crate::config::ConventionsConfig;
use crate::model::EventSubscriberOutput;
use crate::scanner::{ClassScanner, ModuleInfo};
use crate::symbols::{ClassInfo, SymbolTable};

const INVOKE_METHOD: &str = "__invoke";

/// Extracts event subscribers from a module's infrastructure layer
pub struct EventSubscriberExtractor<'a> {
    scanner: ClassScanner<'a>,
    conventions: &'a ConventionsConfig,
}

impl<'a> EventSubscriberExtractor<'a> {
    pub fn new(table: &'a SymbolTable, conventions: &'a ConventionsConfig) -> Self {
        Self {
            scanner: ClassScanner::new(table),
            conventions,
        }
    }

    pub fn extract(&self, module: &ModuleInfo) -> Vec<EventSubscriberOutput> {
        self.scanner
            .scan_layer(module, &self.conventions.infrastructure_dir)
            .into_iter()
            .filter(|class| class.has_marker(&self.conventions.subscriber_attribute))
            .filter_map(subscriber_output)
            .collect()
    }
}

fn subscriber_output(class: &ClassInfo) -> Option<EventSubscriberOutput> {
    let invoke = class.public_method(INVOKE_METHOD)?;
    let event_param = invoke.params.first()?;

    // an untyped or `mixed` parameter does not name an event
    if event_param.type_class == "mixed" {
        return None;
    }

    Some(EventSubscriberOutput {
        name: class.short_name.clone(),
        class: class.fqcn.clone(),
        description: class.summary(),
        event: event_param.type_display.clone(),
        event_class: event_param.type_class.clone(),
    })
}
