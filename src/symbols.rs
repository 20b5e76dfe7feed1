// Static symbol table
//
// Pass 1 walks the source tree and registers one ClassInfo per resolvable
// file: fully-qualified name, parent link, declared public fields,
// constructor parameters, markers, alias map and instantiation targets.
// Pass 2 answers subtype and field queries purely from the table, with no
// dependency on a live runtime. The table lives for one scan and is
// discarded with the export call that owns it.

use crate::error::Result;
use crate::model::ScalarType;
use crate::parser::{docblock, parse_source, MethodDecl, ParamDecl, TypeKind};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A declared public field (property or promoted constructor parameter)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldInfo {
    pub name: String,
    /// Display type, shortened to the last name segment
    pub type_display: String,
    pub description: Option<String>,
}

/// A constructor or method parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamInfo {
    pub name: String,
    /// Display type, shortened to the last name segment
    pub type_display: String,
    /// Resolved fully-qualified name, or the scalar keyword itself
    pub type_class: String,
    pub description: Option<String>,
}

/// A method with resolved parameter types
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodInfo {
    pub name: String,
    pub is_public: bool,
    pub params: Vec<ParamInfo>,
}

/// Everything the table knows about one class
#[derive(Debug, Clone)]
pub struct ClassInfo {
    pub fqcn: String,
    pub short_name: String,
    pub file: PathBuf,
    /// Declaring namespace, empty for the global namespace
    pub namespace: String,
    pub kind: TypeKind,
    pub is_abstract: bool,
    /// Resolved parent fully-qualified name
    pub parent: Option<String>,
    /// Resolved attribute marker names
    pub markers: Vec<String>,
    /// Raw docblock attached to the declaration
    pub doc: Option<String>,
    /// Declared public fields in declaration order
    pub fields: Vec<FieldInfo>,
    pub constructor_params: Vec<ParamInfo>,
    pub methods: Vec<MethodInfo>,
    /// Alias-or-short-name -> fully-qualified name from `use` statements
    pub uses: BTreeMap<String, String>,
    /// Distinct literal `new` targets as written, in order
    pub instantiations: Vec<String>,
}

impl ClassInfo {
    /// Concrete class: instantiable and not abstract
    pub fn is_concrete_class(&self) -> bool {
        self.kind == TypeKind::Class && !self.is_abstract
    }

    /// Docblock summary of the class
    pub fn summary(&self) -> Option<String> {
        self.doc.as_deref().and_then(docblock::summary)
    }

    /// Check whether this class carries the given marker attribute
    pub fn has_marker(&self, marker: &str) -> bool {
        self.markers.iter().any(|m| m == marker)
    }

    /// The first public method with the given name
    pub fn public_method(&self, name: &str) -> Option<&MethodInfo> {
        self.methods.iter().find(|m| m.is_public && m.name == name)
    }
}

/// Shorten a type name to its last segment
pub fn short_type_name(name: &str) -> String {
    let name = name.trim_start_matches('\\');
    name.rsplit('\\').next().unwrap_or(name).to_string()
}

/// Resolve a written type name against a file's alias map and namespace:
/// an explicitly qualified name is returned as-is; otherwise the short
/// form is matched against the aliases, then the leading segment against
/// an alias prefix, then built-in scalars pass through unchanged, and
/// anything else is taken relative to the referencing namespace.
pub fn resolve_type_name(
    name: &str,
    uses: &BTreeMap<String, String>,
    namespace: &str,
) -> String {
    if let Some(stripped) = name.strip_prefix('\\') {
        return stripped.to_string();
    }

    let short = short_type_name(name);
    if let Some(full) = uses.get(&short) {
        return full.clone();
    }

    if let Some(pos) = name.find('\\') {
        let first = &name[..pos];
        if let Some(prefix) = uses.get(first) {
            return format!("{}{}", prefix, &name[pos..]);
        }
    }

    if ScalarType::is(name) {
        return name.to_string();
    }

    if !namespace.is_empty() {
        return format!("{}\\{}", namespace, name);
    }

    name.to_string()
}

/// Shorten a raw type hint for display: the nullable marker is dropped
/// and every union/intersection member is reduced to its last segment.
pub fn display_type(raw: &str) -> String {
    let raw = raw.trim_start_matches('?');
    let mut out = String::new();
    let mut segment = String::new();

    for c in raw.chars() {
        if c == '|' || c == '&' {
            out.push_str(&short_type_name(&segment));
            out.push(c);
            segment.clear();
        } else {
            segment.push(c);
        }
    }
    out.push_str(&short_type_name(&segment));
    out
}

/// Resolve a raw type hint to its qualified form, keeping union and
/// intersection separators.
pub fn resolve_type_hint(raw: &str, uses: &BTreeMap<String, String>, namespace: &str) -> String {
    let raw = raw.trim_start_matches('?');
    let mut out = String::new();
    let mut segment = String::new();

    for c in raw.chars() {
        if c == '|' || c == '&' {
            out.push_str(&resolve_type_name(&segment, uses, namespace));
            out.push(c);
            segment.clear();
        } else {
            segment.push(c);
        }
    }
    out.push_str(&resolve_type_name(&segment, uses, namespace));
    out
}

/// Discover `.php` files under a root, honoring exclude glob patterns.
/// Results are sorted for deterministic registration order.
pub fn discover_files(root: &Path, exclude: &[String]) -> Result<Vec<PathBuf>> {
    let patterns = exclude
        .iter()
        .map(|p| glob::Pattern::new(p))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let mut files = Vec::new();

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
        if path.extension().map_or(true, |ext| ext != "php") {
            continue;
        }

        let relative = path.strip_prefix(root).unwrap_or(path);
        let relative_str = relative.to_string_lossy();
        if patterns.iter().any(|p| p.matches(&relative_str)) {
            continue;
        }

        files.push(path.to_path_buf());
    }

    files.sort();
    Ok(files)
}

/// The per-scan class registry
#[derive(Debug, Default)]
pub struct SymbolTable {
    classes: HashMap<String, ClassInfo>,
    by_file: BTreeMap<PathBuf, String>,
    skipped: Vec<(PathBuf, String)>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table over every discoverable file under the root
    pub fn build(root: &Path, exclude: &[String]) -> Result<Self> {
        let mut table = Self::new();
        for file in discover_files(root, exclude)? {
            table.register_file(&file);
        }
        Ok(table)
    }

    /// Parse one file and register its first type declaration. Files that
    /// cannot be read or resolved are noted and skipped, never fatal.
    pub fn register_file(&mut self, path: &Path) {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                self.skipped.push((path.to_path_buf(), e.to_string()));
                return;
            }
        };

        let parsed = parse_source(&content);
        let Some(decl) = parsed.type_decl else {
            self.skipped
                .push((path.to_path_buf(), "no type declaration".to_string()));
            return;
        };

        let namespace = parsed.namespace.unwrap_or_default();
        let fqcn = if namespace.is_empty() {
            decl.name.clone()
        } else {
            format!("{}\\{}", namespace, decl.name)
        };

        if self.classes.contains_key(&fqcn) {
            self.skipped
                .push((path.to_path_buf(), format!("duplicate class {}", fqcn)));
            return;
        }

        let uses = parsed.uses;
        let parent = decl
            .extends
            .as_deref()
            .map(|e| resolve_type_name(e, &uses, &namespace));
        let markers = decl
            .attributes
            .iter()
            .map(|a| resolve_type_name(a, &uses, &namespace))
            .collect();

        let constructor_params = decl
            .constructor
            .as_ref()
            .map(|ctor| {
                ctor.params
                    .iter()
                    .map(|p| param_info(p, ctor, &uses, &namespace))
                    .collect()
            })
            .unwrap_or_default();

        let fields = decl
            .properties
            .iter()
            .filter(|p| p.is_public)
            .map(|p| FieldInfo {
                name: p.name.clone(),
                type_display: p
                    .type_hint
                    .as_deref()
                    .map(display_type)
                    .unwrap_or_else(|| "mixed".to_string()),
                description: p
                    .doc
                    .as_deref()
                    .and_then(docblock::summary)
                    .or_else(|| constructor_param_description(&decl.constructor, &p.name)),
            })
            .collect();

        let methods = decl
            .methods
            .iter()
            .map(|m| MethodInfo {
                name: m.name.clone(),
                is_public: m.is_public,
                params: m
                    .params
                    .iter()
                    .map(|p| param_info(p, m, &uses, &namespace))
                    .collect(),
            })
            .collect();

        let info = ClassInfo {
            fqcn: fqcn.clone(),
            short_name: decl.name,
            file: path.to_path_buf(),
            namespace,
            kind: decl.kind,
            is_abstract: decl.is_abstract,
            parent,
            markers,
            doc: decl.doc,
            fields,
            constructor_params,
            methods,
            uses,
            instantiations: parsed.instantiations,
        };

        self.by_file.insert(path.to_path_buf(), fqcn.clone());
        self.classes.insert(fqcn, info);
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn get(&self, fqcn: &str) -> Option<&ClassInfo> {
        self.classes.get(fqcn)
    }

    pub fn contains(&self, fqcn: &str) -> bool {
        self.classes.contains_key(fqcn)
    }

    pub fn class_for_file(&self, path: &Path) -> Option<&ClassInfo> {
        self.by_file.get(path).and_then(|fqcn| self.classes.get(fqcn))
    }

    /// Ancestors of a class in base-to-derived order, excluding the class
    /// itself. Links reaching outside the table terminate the chain.
    pub fn parent_chain(&self, fqcn: &str) -> Vec<String> {
        let mut chain = Vec::new();
        let mut seen = HashSet::new();
        let mut current = self.classes.get(fqcn).and_then(|c| c.parent.clone());

        while let Some(parent) = current {
            if !seen.insert(parent.clone()) {
                break;
            }
            current = self.classes.get(&parent).and_then(|c| c.parent.clone());
            chain.push(parent);
        }

        chain.reverse();
        chain
    }

    pub fn is_subtype_of(&self, fqcn: &str, base: &str) -> bool {
        self.parent_chain(fqcn).iter().any(|p| p == base)
    }

    /// All registered classes whose file lives under the given directory,
    /// in file order.
    pub fn classes_under(&self, dir: &Path) -> Vec<&ClassInfo> {
        self.by_file
            .iter()
            .filter(|(path, _)| path.starts_with(dir))
            .filter_map(|(_, fqcn)| self.classes.get(fqcn))
            .collect()
    }

    /// Files that were skipped during registration, with reasons
    pub fn skipped(&self) -> &[(PathBuf, String)] {
        &self.skipped
    }
}

fn param_info(
    param: &ParamDecl,
    method: &MethodDecl,
    uses: &BTreeMap<String, String>,
    namespace: &str,
) -> ParamInfo {
    let (type_display, type_class) = match param.type_hint.as_deref() {
        Some(raw) => (display_type(raw), resolve_type_hint(raw, uses, namespace)),
        None => ("mixed".to_string(), "mixed".to_string()),
    };

    let description = param
        .doc
        .as_deref()
        .and_then(docblock::summary)
        .or_else(|| {
            method
                .doc
                .as_deref()
                .and_then(|doc| docblock::param_description(doc, &param.name))
        });

    ParamInfo {
        name: param.name.clone(),
        type_display,
        type_class,
        description,
    }
}

fn constructor_param_description(
    constructor: &Option<MethodDecl>,
    name: &str,
) -> Option<String> {
    let ctor = constructor.as_ref()?;
    ctor.params
        .iter()
        .find(|p| p.name == name)
        .and_then(|p| p.doc.as_deref())
        .and_then(docblock::summary)
        .or_else(|| {
            ctor.doc
                .as_deref()
                .and_then(|doc| docblock::param_description(doc, name))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_file(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
        fs::write(path, content).expect("write");
    }

    fn event_base() -> &'static str {
        r"<?php
namespace App\Shared\Domain\Event;

abstract class DomainEvent
{
    /** Unique identifier for this event instance. */
    public string $id;

    /** Identifier of the aggregate that produced this event. */
    public string $aggregateId;

    /** Timestamp when this event occurred. */
    public \DateTimeImmutable $occurredOn;

    public function __construct(string $aggregateId)
    {
    }
}
"
    }

    fn invoice_created() -> &'static str {
        r"<?php
namespace App\Billing\Invoice\Domain\Event;

use App\Shared\Domain\Event\DomainEvent;

/**
 * Emitted when a new invoice is created.
 */
final readonly class InvoiceCreated extends DomainEvent
{
    /**
     * @param string $aggregateId The aggregate root identifier.
     * @param string $invoiceId The unique identifier of the invoice.
     * @param string $customerId The customer who owns the invoice.
     * @param float $amount The total amount of the invoice.
     */
    public function __construct(
        string $aggregateId,
        public string $invoiceId,
        public string $customerId,
        public float $amount,
    ) {
        parent::__construct($aggregateId);
    }
}
"
    }

    fn build_table(files: &[(&str, &str)]) -> (TempDir, SymbolTable) {
        let dir = TempDir::new().expect("tempdir");
        for (relative, content) in files {
            write_file(dir.path(), relative, content);
        }
        let table = SymbolTable::build(dir.path(), &[]).expect("build");
        (dir, table)
    }

    #[test]
    fn test_short_type_name() {
        assert_eq!(short_type_name("App\\Billing\\Invoice"), "Invoice");
        assert_eq!(short_type_name("\\DateTimeImmutable"), "DateTimeImmutable");
        assert_eq!(short_type_name("string"), "string");
    }

    #[test]
    fn test_resolve_type_name_rules() {
        let mut uses = BTreeMap::new();
        uses.insert("Baz".to_string(), "Foo\\Bar".to_string());
        uses.insert("Model".to_string(), "App\\Domain\\Model".to_string());

        // explicitly qualified
        assert_eq!(
            resolve_type_name("\\Vendor\\Thing", &uses, "App\\X"),
            "Vendor\\Thing"
        );
        // short-form alias
        assert_eq!(resolve_type_name("Baz", &uses, "App\\X"), "Foo\\Bar");
        // leading-segment alias prefix
        assert_eq!(
            resolve_type_name("Model\\Customer", &uses, "App\\X"),
            "App\\Domain\\Model\\Customer"
        );
        // built-in scalar passes through
        assert_eq!(resolve_type_name("string", &uses, "App\\X"), "string");
        // everything else is namespace-relative
        assert_eq!(
            resolve_type_name("Customer", &uses, "App\\X"),
            "App\\X\\Customer"
        );
        // global namespace
        assert_eq!(resolve_type_name("Customer", &BTreeMap::new(), ""), "Customer");
    }

    #[test]
    fn test_display_type() {
        assert_eq!(display_type("App\\Billing\\InvoiceId"), "InvoiceId");
        assert_eq!(display_type("?string"), "string");
        assert_eq!(display_type("Foo\\Bar|Baz"), "Bar|Baz");
        assert_eq!(display_type("A&B"), "A&B");
    }

    #[test]
    fn test_register_and_lookup() {
        let (_dir, table) = build_table(&[(
            "Billing/Invoice/Domain/Model/Invoice.php",
            "<?php\nnamespace App\\Billing\\Invoice\\Domain\\Model;\nclass Invoice {}\n",
        )]);

        assert_eq!(table.len(), 1);
        let info = table
            .get("App\\Billing\\Invoice\\Domain\\Model\\Invoice")
            .expect("registered");
        assert_eq!(info.short_name, "Invoice");
        assert_eq!(info.namespace, "App\\Billing\\Invoice\\Domain\\Model");
        assert!(info.is_concrete_class());
    }

    #[test]
    fn test_unresolvable_file_is_skipped_not_fatal() {
        let (_dir, table) = build_table(&[
            ("a.php", "<?php class A {}"),
            ("broken.php", "<?php // nothing declared here"),
        ]);

        assert_eq!(table.len(), 1);
        assert_eq!(table.skipped().len(), 1);
        assert!(table.skipped()[0].1.contains("no type declaration"));
    }

    #[test]
    fn test_first_file_wins_for_duplicate_class() {
        let (_dir, table) = build_table(&[
            ("a/Thing.php", "<?php namespace App; class Thing { public int $fromA; }"),
            ("b/Thing.php", "<?php namespace App; class Thing { public int $fromB; }"),
        ]);

        assert_eq!(table.len(), 1);
        assert_eq!(table.get("App\\Thing").expect("thing").fields[0].name, "fromA");
        assert_eq!(table.skipped().len(), 1);
    }

    #[test]
    fn test_parent_chain_and_subtype() {
        let (_dir, table) = build_table(&[
            ("Shared/DomainEvent.php", event_base()),
            ("Billing/InvoiceCreated.php", invoice_created()),
        ]);

        let chain = table.parent_chain("App\\Billing\\Invoice\\Domain\\Event\\InvoiceCreated");
        assert_eq!(chain, vec!["App\\Shared\\Domain\\Event\\DomainEvent"]);
        assert!(table.is_subtype_of(
            "App\\Billing\\Invoice\\Domain\\Event\\InvoiceCreated",
            "App\\Shared\\Domain\\Event\\DomainEvent"
        ));
        assert!(!table.is_subtype_of(
            "App\\Shared\\Domain\\Event\\DomainEvent",
            "App\\Billing\\Invoice\\Domain\\Event\\InvoiceCreated"
        ));
    }

    #[test]
    fn test_chain_terminates_outside_table() {
        let (_dir, table) = build_table(&[(
            "X.php",
            "<?php namespace App; use Vendor\\Framework\\Base; class X extends Base {}",
        )]);

        let chain = table.parent_chain("App\\X");
        assert_eq!(chain, vec!["Vendor\\Framework\\Base"]);
    }

    #[test]
    fn test_fields_record_declaration_order_and_descriptions() {
        let (_dir, table) = build_table(&[("DomainEvent.php", event_base())]);

        let info = table.get("App\\Shared\\Domain\\Event\\DomainEvent").expect("base");
        let names: Vec<&str> = info.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["id", "aggregateId", "occurredOn"]);
        assert_eq!(info.fields[2].type_display, "DateTimeImmutable");
        assert_eq!(
            info.fields[0].description.as_deref(),
            Some("Unique identifier for this event instance.")
        );
        assert!(info.is_abstract);
    }

    #[test]
    fn test_promoted_fields_fall_back_to_constructor_param_tags() {
        let (_dir, table) = build_table(&[("InvoiceCreated.php", invoice_created())]);

        let info = table
            .get("App\\Billing\\Invoice\\Domain\\Event\\InvoiceCreated")
            .expect("event");
        let names: Vec<&str> = info.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["invoiceId", "customerId", "amount"]);
        assert_eq!(
            info.fields[0].description.as_deref(),
            Some("The unique identifier of the invoice.")
        );
        assert_eq!(info.fields[2].type_display, "float");
    }

    #[test]
    fn test_constructor_params_resolved() {
        let (_dir, table) = build_table(&[(
            "CreateInvoice.php",
            r"<?php
namespace App\Billing\Invoice\Application\Create;

use App\Billing\Invoice\Domain\Model\InvoiceCustomerId;

class CreateInvoice
{
    /**
     * @param InvoiceCustomerId $customerId The customer who will own the invoice.
     * @param int $amount The invoice amount in cents.
     */
    public function __construct(
        public InvoiceCustomerId $customerId,
        public int $amount,
    ) {
    }
}
",
        )]);

        let info = table
            .get("App\\Billing\\Invoice\\Application\\Create\\CreateInvoice")
            .expect("command");
        assert_eq!(info.constructor_params.len(), 2);
        assert_eq!(info.constructor_params[0].type_display, "InvoiceCustomerId");
        assert_eq!(
            info.constructor_params[0].type_class,
            "App\\Billing\\Invoice\\Domain\\Model\\InvoiceCustomerId"
        );
        assert_eq!(
            info.constructor_params[0].description.as_deref(),
            Some("The customer who will own the invoice.")
        );
        assert_eq!(info.constructor_params[1].type_class, "int");
    }

    #[test]
    fn test_markers_resolved_via_uses() {
        let (_dir, table) = build_table(&[(
            "Subscriber.php",
            r"<?php
namespace App\Billing\Invoice\Infrastructure;

use App\Shared\Infrastructure\Event\AsDomainEventSubscriber;

#[AsDomainEventSubscriber]
class SendEmail
{
    public function __invoke(InvoiceCreated $event): void {}
}
",
        )]);

        let info = table
            .get("App\\Billing\\Invoice\\Infrastructure\\SendEmail")
            .expect("subscriber");
        assert!(info.has_marker("App\\Shared\\Infrastructure\\Event\\AsDomainEventSubscriber"));
        let invoke = info.public_method("__invoke").expect("invoke");
        assert_eq!(
            invoke.params[0].type_class,
            "App\\Billing\\Invoice\\Infrastructure\\InvoiceCreated"
        );
    }

    #[test]
    fn test_classes_under_directory() {
        let (dir, table) = build_table(&[
            ("Billing/Invoice/Domain/A.php", "<?php namespace App; class A {}"),
            ("Billing/Invoice/Application/B.php", "<?php namespace App; class B {}"),
            ("Identity/Customer/C.php", "<?php namespace App2; class C {}"),
        ]);

        let under = table.classes_under(&dir.path().join("Billing/Invoice"));
        let names: Vec<&str> = under.iter().map(|c| c.short_name.as_str()).collect();
        assert_eq!(names, vec!["B", "A"]); // file order: Application before Domain
        assert_eq!(table.classes_under(&dir.path().join("Missing")).len(), 0);
    }

    #[test]
    fn test_discover_files_respects_excludes() {
        let dir = TempDir::new().expect("tempdir");
        write_file(dir.path(), "src/Keep.php", "<?php class Keep {}");
        write_file(dir.path(), "vendor/lib/Skip.php", "<?php class Skip {}");
        write_file(dir.path(), "src/notes.txt", "not php");

        let files =
            discover_files(dir.path(), &["vendor/**".to_string()]).expect("discover");
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("src/Keep.php"));
    }

    #[test]
    fn test_instantiations_recorded() {
        let (_dir, table) = build_table(&[(
            "Processor.php",
            r"<?php
namespace App\Billing;

use App\Identity\Customer\Application\Find\FindCustomer as FindCustomerQuery;

class Processor
{
    public function go(): void
    {
        $q = new FindCustomerQuery('id');
    }
}
",
        )]);

        let info = table.get("App\\Billing\\Processor").expect("processor");
        assert_eq!(info.instantiations, vec!["FindCustomerQuery"]);
        assert_eq!(
            resolve_type_name("FindCustomerQuery", &info.uses, &info.namespace),
            "App\\Identity\\Customer\\Application\\Find\\FindCustomer"
        );
    }
}
