// Structural parse of a single PHP source file
//
// One pass over the token stream collects everything the symbol table
// needs: the namespace, the use-alias map, the first type declaration with
// its members, and every literal `new` instantiation target. Only the
// first class/interface/trait/enum in a file is exposed; later
// declarations are invisible (an intentional, load-bearing limitation).

use crate::parser::tokens::{tokenize, Token};
use std::collections::BTreeMap;

/// Kind of the declared type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Class,
    Interface,
    Trait,
    Enum,
}

impl TypeKind {
    /// Interfaces and traits cannot be instantiated and count as abstract
    pub fn is_instantiable(&self) -> bool {
        matches!(self, TypeKind::Class | TypeKind::Enum)
    }
}

/// Result of structurally parsing one file
#[derive(Debug, Clone, Default)]
pub struct SourceFile {
    /// Declared namespace, if any
    pub namespace: Option<String>,
    /// Alias-or-short-name -> fully qualified name, from `use` statements
    pub uses: BTreeMap<String, String>,
    /// The first type declaration in the file
    pub type_decl: Option<TypeDecl>,
    /// Distinct literal `new` targets as written, in order of appearance
    pub instantiations: Vec<String>,
}

/// The first type declaration of a file
#[derive(Debug, Clone)]
pub struct TypeDecl {
    pub kind: TypeKind,
    pub name: String,
    pub is_abstract: bool,
    /// Parent type name as written (unresolved)
    pub extends: Option<String>,
    /// Attribute names as written, e.g. `AsDomainEventSubscriber`
    pub attributes: Vec<String>,
    /// Raw docblock attached to the declaration
    pub doc: Option<String>,
    /// Declared properties and promoted constructor parameters, in source order
    pub properties: Vec<PropertyDecl>,
    pub constructor: Option<MethodDecl>,
    pub methods: Vec<MethodDecl>,
}

/// A declared class property
#[derive(Debug, Clone)]
pub struct PropertyDecl {
    pub name: String,
    /// Raw type hint as written, e.g. `?Foo|Bar`
    pub type_hint: Option<String>,
    pub is_public: bool,
    pub doc: Option<String>,
}

/// A method declaration (constructor included)
#[derive(Debug, Clone)]
pub struct MethodDecl {
    pub name: String,
    pub is_public: bool,
    pub params: Vec<ParamDecl>,
    pub doc: Option<String>,
}

/// A method parameter
#[derive(Debug, Clone)]
pub struct ParamDecl {
    pub name: String,
    /// Raw type hint as written
    pub type_hint: Option<String>,
    /// Promoted with an explicit visibility modifier
    pub promoted: bool,
    /// Promoted with `public` visibility
    pub promoted_public: bool,
    pub doc: Option<String>,
}

const MODIFIERS: &[&str] = &[
    "public",
    "protected",
    "private",
    "static",
    "abstract",
    "final",
    "readonly",
    "var",
];

fn is_modifier(name: &str) -> bool {
    MODIFIERS.iter().any(|m| name.eq_ignore_ascii_case(m))
}

/// Parse PHP source into its structural facts. Never fails: malformed
/// input yields whatever could be recognized.
pub fn parse_source(source: &str) -> SourceFile {
    Parser::new(tokenize(source)).run()
}

struct Parser {
    tokens: Vec<Token>,
    i: usize,
    out: SourceFile,
    depth: usize,
    /// Brace depth of the first type's body while it is open
    body_depth: Option<usize>,
    pending_doc: Option<String>,
    pending_attrs: Vec<String>,
    pending_abstract: bool,
    member_mods: Vec<String>,
    member_type: String,
    prev_colon: bool,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            i: 0,
            out: SourceFile::default(),
            depth: 0,
            body_depth: None,
            pending_doc: None,
            pending_attrs: Vec::new(),
            pending_abstract: false,
            member_mods: Vec::new(),
            member_type: String::new(),
            prev_colon: false,
        }
    }

    fn run(mut self) -> SourceFile {
        while self.i < self.tokens.len() {
            let was_colon = self.prev_colon;
            self.prev_colon = self.tokens[self.i].is_punct(':');

            match self.tokens[self.i].clone() {
                Token::DocBlock(doc) => {
                    self.pending_doc = Some(doc);
                    self.i += 1;
                }
                Token::Attributes(raw) => {
                    self.pending_attrs.extend(attribute_names(&raw));
                    self.i += 1;
                }
                Token::Punct('{') => {
                    self.depth += 1;
                    self.i += 1;
                }
                Token::Punct('}') => {
                    self.depth = self.depth.saturating_sub(1);
                    if self.body_depth.is_some_and(|d| self.depth < d) {
                        self.body_depth = None;
                    }
                    self.reset_member_state();
                    self.i += 1;
                }
                Token::Punct(';') => {
                    self.reset_member_state();
                    self.pending_doc = None;
                    self.i += 1;
                }
                Token::Name(name) if name.eq_ignore_ascii_case("namespace")
                    && self.out.namespace.is_none()
                    && self.depth == 0 =>
                {
                    self.parse_namespace();
                }
                Token::Name(name) if name.eq_ignore_ascii_case("use") && self.depth == 0 => {
                    self.parse_use();
                }
                Token::Name(name) if name.eq_ignore_ascii_case("new") => {
                    self.parse_new();
                }
                Token::Name(name)
                    if !was_colon
                        && self.depth == 0
                        && self.out.type_decl.is_none()
                        && type_kind(&name).is_some() =>
                {
                    self.parse_type_decl(type_kind(&name).expect("checked"));
                }
                Token::Name(name)
                    if name.eq_ignore_ascii_case("function")
                        && self.at_body_depth() =>
                {
                    self.parse_method();
                }
                Token::Name(name) if self.depth == 0 && name.eq_ignore_ascii_case("abstract") => {
                    self.pending_abstract = true;
                    self.i += 1;
                }
                Token::Name(name) if self.at_body_depth() && is_modifier(&name) => {
                    self.member_mods.push(name.to_ascii_lowercase());
                    self.i += 1;
                }
                Token::Name(name) if self.at_body_depth() && !self.member_mods.is_empty() => {
                    self.member_type.push_str(&name);
                    self.i += 1;
                }
                Token::Punct(c @ ('?' | '|' | '&'))
                    if self.at_body_depth() && !self.member_mods.is_empty() =>
                {
                    self.member_type.push(c);
                    self.i += 1;
                }
                Token::Variable(name) if self.at_body_depth() => {
                    self.finish_property(name);
                }
                _ => {
                    self.i += 1;
                }
            }
        }

        self.out
    }

    fn at_body_depth(&self) -> bool {
        self.body_depth == Some(self.depth)
    }

    fn reset_member_state(&mut self) {
        self.member_mods.clear();
        self.member_type.clear();
    }

    fn peek(&self, offset: usize) -> Option<&Token> {
        self.tokens.get(self.i + offset)
    }

    /// `namespace Foo\Bar;` or `namespace Foo\Bar {`
    fn parse_namespace(&mut self) {
        self.i += 1;
        let mut namespace = String::new();

        while self.i < self.tokens.len() {
            match &self.tokens[self.i] {
                Token::Name(n) => namespace.push_str(n),
                Token::Punct(';') => {
                    self.i += 1;
                    break;
                }
                Token::Punct('{') => break,
                _ => {}
            }
            self.i += 1;
        }

        if !namespace.is_empty() {
            self.out.namespace = Some(namespace);
        }
        self.pending_doc = None;
    }

    /// `use Foo\Bar;`, `use Foo\Bar as Baz;`, `use A, B;`
    fn parse_use(&mut self) {
        self.i += 1;

        // Function/const imports and closure `use (...)` are not class
        // imports; group declarations `use Foo\{A, B}` are skipped whole.
        if let Some(Token::Name(n)) = self.peek(0) {
            if n.eq_ignore_ascii_case("function") || n.eq_ignore_ascii_case("const") {
                self.skip_to_semicolon();
                return;
            }
        }

        let mut name = String::new();
        let mut alias: Option<String> = None;

        while self.i < self.tokens.len() {
            match self.tokens[self.i].clone() {
                Token::Name(n) if n.eq_ignore_ascii_case("as") => {
                    self.i += 1;
                    if let Some(Token::Name(a)) = self.peek(0) {
                        alias = Some(a.clone());
                        self.i += 1;
                    }
                    continue;
                }
                Token::Name(n) => {
                    name.push_str(&n);
                    self.i += 1;
                }
                Token::Punct(',') => {
                    self.register_use(&name, alias.take());
                    name.clear();
                    self.i += 1;
                }
                Token::Punct(';') => {
                    self.i += 1;
                    break;
                }
                Token::Punct('{') | Token::Punct('(') => {
                    // group use or closure capture: contributes no aliases;
                    // leave the token for the main loop
                    name.clear();
                    alias = None;
                    break;
                }
                _ => {
                    self.i += 1;
                }
            }
        }

        self.register_use(&name, alias);
        self.pending_doc = None;
    }

    fn register_use(&mut self, name: &str, alias: Option<String>) {
        if name.is_empty() {
            return;
        }
        let full = name.trim_start_matches('\\').to_string();
        let short = alias.unwrap_or_else(|| {
            full.rsplit('\\').next().unwrap_or(&full).to_string()
        });
        self.out.uses.insert(short, full);
    }

    fn skip_to_semicolon(&mut self) {
        while self.i < self.tokens.len() && !self.tokens[self.i].is_punct(';') {
            self.i += 1;
        }
        if self.i < self.tokens.len() {
            self.i += 1;
        }
    }

    /// `new Foo\Bar(...)` — records the written target name
    fn parse_new(&mut self) {
        self.i += 1;
        if let Some(Token::Name(target)) = self.peek(0) {
            let lowered = target.to_ascii_lowercase();
            // anonymous classes and relative instantiation keywords
            if !matches!(lowered.as_str(), "class" | "static" | "self" | "parent") {
                let target = target.clone();
                if !self.out.instantiations.contains(&target) {
                    self.out.instantiations.push(target);
                }
            }
            self.i += 1;
        }
    }

    fn parse_type_decl(&mut self, kind: TypeKind) {
        self.i += 1;

        let name = match self.peek(0) {
            Some(Token::Name(n)) => n.clone(),
            _ => return, // anonymous or malformed: ignore
        };
        self.i += 1;

        let mut decl = TypeDecl {
            kind,
            name,
            is_abstract: self.pending_abstract || !kind.is_instantiable(),
            extends: None,
            attributes: std::mem::take(&mut self.pending_attrs),
            doc: self.pending_doc.take(),
            properties: Vec::new(),
            constructor: None,
            methods: Vec::new(),
        };
        self.pending_abstract = false;

        // Header: `extends Base implements A, B` up to the body brace
        while self.i < self.tokens.len() {
            match self.tokens[self.i].clone() {
                Token::Name(n) if n.eq_ignore_ascii_case("extends") => {
                    self.i += 1;
                    if let Some(Token::Name(parent)) = self.peek(0) {
                        if decl.extends.is_none() {
                            decl.extends = Some(parent.clone());
                        }
                        self.i += 1;
                    }
                }
                Token::Punct('{') => {
                    self.depth += 1;
                    self.body_depth = Some(self.depth);
                    self.i += 1;
                    break;
                }
                Token::Punct(';') => {
                    self.i += 1;
                    break;
                }
                _ => {
                    self.i += 1;
                }
            }
        }

        self.out.type_decl = Some(decl);
        self.reset_member_state();
    }

    /// A property declaration ends at the member variable name; any
    /// default value runs to the statement terminator.
    fn finish_property(&mut self, name: String) {
        let is_public = self.visibility_is_public();
        let has_visibility = self
            .member_mods
            .iter()
            .any(|m| matches!(m.as_str(), "public" | "protected" | "private" | "var"));

        if has_visibility {
            let type_hint = if self.member_type.is_empty() {
                None
            } else {
                Some(self.member_type.clone())
            };
            if let Some(decl) = self.out.type_decl.as_mut() {
                decl.properties.push(PropertyDecl {
                    name,
                    type_hint,
                    is_public,
                    doc: self.pending_doc.take(),
                });
            }
        }

        self.reset_member_state();
        self.pending_doc = None;

        // Skip a possible default value up to `;` without touching braces
        while self.i < self.tokens.len() {
            if self.tokens[self.i].is_punct(';') || self.tokens[self.i].is_punct('}') {
                return;
            }
            self.i += 1;
        }
    }

    fn visibility_is_public(&self) -> bool {
        !self
            .member_mods
            .iter()
            .any(|m| m == "private" || m == "protected")
    }

    fn parse_method(&mut self) {
        let is_public = self.visibility_is_public();
        let doc = self.pending_doc.take();
        self.reset_member_state();
        self.i += 1;

        // optional by-reference marker
        if self.peek(0).is_some_and(|t| t.is_punct('&')) {
            self.i += 1;
        }

        let name = match self.peek(0) {
            Some(Token::Name(n)) => n.clone(),
            _ => return,
        };
        self.i += 1;

        // find the parameter list
        while self.i < self.tokens.len() && !self.tokens[self.i].is_punct('(') {
            if self.tokens[self.i].is_punct(';') || self.tokens[self.i].is_punct('{') {
                return;
            }
            self.i += 1;
        }
        if self.i >= self.tokens.len() {
            return;
        }
        self.i += 1;

        let params = self.parse_params();

        let method = MethodDecl {
            name: name.clone(),
            is_public,
            params,
            doc,
        };

        if let Some(decl) = self.out.type_decl.as_mut() {
            if name == "__construct" {
                for param in &method.params {
                    if param.promoted_public {
                        decl.properties.push(PropertyDecl {
                            name: param.name.clone(),
                            type_hint: param.type_hint.clone(),
                            is_public: true,
                            doc: param.doc.clone(),
                        });
                    }
                }
                if decl.constructor.is_none() {
                    decl.constructor = Some(method);
                }
            } else {
                decl.methods.push(method);
            }
        }

        // Skip the return type; the body brace is handled by the main loop
        while self.i < self.tokens.len() {
            if self.tokens[self.i].is_punct(';') {
                self.i += 1;
                return;
            }
            if self.tokens[self.i].is_punct('{') {
                return;
            }
            self.i += 1;
        }
    }

    fn parse_params(&mut self) -> Vec<ParamDecl> {
        let mut params = Vec::new();
        let mut mods: Vec<String> = Vec::new();
        let mut type_hint = String::new();
        let mut doc: Option<String> = None;
        let mut nest = 0usize;
        let mut in_default = false;

        while self.i < self.tokens.len() {
            match self.tokens[self.i].clone() {
                Token::Punct('(') | Token::Punct('[') => {
                    nest += 1;
                    self.i += 1;
                }
                Token::Punct(']') => {
                    nest = nest.saturating_sub(1);
                    self.i += 1;
                }
                Token::Punct(')') => {
                    if nest == 0 {
                        self.i += 1;
                        return params;
                    }
                    nest -= 1;
                    self.i += 1;
                }
                Token::Punct(',') if nest == 0 => {
                    mods.clear();
                    type_hint.clear();
                    doc = None;
                    in_default = false;
                    self.i += 1;
                }
                _ if in_default => {
                    self.i += 1;
                }
                Token::DocBlock(d) => {
                    doc = Some(d);
                    self.i += 1;
                }
                Token::Attributes(_) => {
                    self.i += 1;
                }
                Token::Name(n) if is_modifier(&n) => {
                    mods.push(n.to_ascii_lowercase());
                    self.i += 1;
                }
                Token::Name(n) => {
                    type_hint.push_str(&n);
                    self.i += 1;
                }
                Token::Punct(c @ ('?' | '|')) => {
                    type_hint.push(c);
                    self.i += 1;
                }
                Token::Punct('&') => {
                    // intersection type inside a hint, by-ref marker otherwise
                    if !type_hint.is_empty() {
                        type_hint.push('&');
                    }
                    self.i += 1;
                }
                Token::Variable(name) => {
                    let promoted = mods
                        .iter()
                        .any(|m| matches!(m.as_str(), "public" | "protected" | "private"));
                    params.push(ParamDecl {
                        name,
                        type_hint: if type_hint.is_empty() {
                            None
                        } else {
                            Some(type_hint.clone())
                        },
                        promoted,
                        promoted_public: mods.iter().any(|m| m == "public"),
                        doc: doc.take(),
                    });
                    mods.clear();
                    type_hint.clear();
                    in_default = true;
                    self.i += 1;
                }
                _ => {
                    self.i += 1;
                }
            }
        }

        params
    }
}

fn type_kind(name: &str) -> Option<TypeKind> {
    if name.eq_ignore_ascii_case("class") {
        Some(TypeKind::Class)
    } else if name.eq_ignore_ascii_case("interface") {
        Some(TypeKind::Interface)
    } else if name.eq_ignore_ascii_case("trait") {
        Some(TypeKind::Trait)
    } else if name.eq_ignore_ascii_case("enum") {
        Some(TypeKind::Enum)
    } else {
        None
    }
}

/// Extract the leading name of each attribute in a raw `#[...]` group
fn attribute_names(raw: &str) -> Vec<String> {
    let mut names = Vec::new();
    let chars: Vec<char> = raw.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        while i < chars.len() && !chars[i].is_alphanumeric() && chars[i] != '_' && chars[i] != '\\'
        {
            i += 1;
        }
        let start = i;
        while i < chars.len()
            && (chars[i].is_alphanumeric() || chars[i] == '_' || chars[i] == '\\')
        {
            i += 1;
        }
        if i > start {
            names.push(chars[start..i].iter().collect());
        }

        // skip to the next top-level comma
        let mut depth = 0usize;
        while i < chars.len() {
            match chars[i] {
                '(' | '[' => depth += 1,
                ')' | ']' => depth = depth.saturating_sub(1),
                '\'' | '"' => {
                    let quote = chars[i];
                    i += 1;
                    while i < chars.len() && chars[i] != quote {
                        if chars[i] == '\\' {
                            i += 1;
                        }
                        i += 1;
                    }
                }
                ',' if depth == 0 => {
                    i += 1;
                    break;
                }
                _ => {}
            }
            i += 1;
        }
    }

    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespace_and_class_name() {
        let file = parse_source("<?php\nnamespace App\\Billing\\Invoice;\nclass Invoice {}\n");
        assert_eq!(file.namespace.as_deref(), Some("App\\Billing\\Invoice"));
        let decl = file.type_decl.expect("type");
        assert_eq!(decl.name, "Invoice");
        assert_eq!(decl.kind, TypeKind::Class);
        assert!(!decl.is_abstract);
    }

    #[test]
    fn test_first_type_declaration_wins() {
        let file = parse_source("<?php class First {} class Second {}");
        assert_eq!(file.type_decl.expect("type").name, "First");
    }

    #[test]
    fn test_use_statements_build_alias_map() {
        let file = parse_source(
            "<?php\nuse App\\Billing\\Invoice;\nuse Foo\\Bar as Baz;\nclass X {}\n",
        );
        assert_eq!(
            file.uses.get("Invoice").map(String::as_str),
            Some("App\\Billing\\Invoice")
        );
        assert_eq!(file.uses.get("Baz").map(String::as_str), Some("Foo\\Bar"));
        assert!(file.uses.get("Bar").is_none());
    }

    #[test]
    fn test_use_function_import_ignored() {
        let file = parse_source("<?php use function Foo\\bar; class X {}");
        assert!(file.uses.is_empty());
    }

    #[test]
    fn test_abstract_and_interface_flags() {
        let file = parse_source("<?php abstract class Base {}");
        assert!(file.type_decl.expect("type").is_abstract);

        let file = parse_source("<?php interface Repo {}");
        let decl = file.type_decl.expect("type");
        assert_eq!(decl.kind, TypeKind::Interface);
        assert!(decl.is_abstract);
    }

    #[test]
    fn test_extends_captured() {
        let file = parse_source("<?php class CreateInvoice extends Command {}");
        assert_eq!(
            file.type_decl.expect("type").extends.as_deref(),
            Some("Command")
        );
    }

    #[test]
    fn test_class_docblock_and_attributes() {
        let source = "<?php\n/**\n * Creates a new invoice.\n */\n#[AsDomainEventSubscriber]\nfinal readonly class CreateInvoice {}\n";
        let decl = parse_source(source).type_decl.expect("type");
        assert!(decl.doc.expect("doc").contains("Creates a new invoice."));
        assert_eq!(decl.attributes, vec!["AsDomainEventSubscriber"]);
    }

    #[test]
    fn test_namespace_docblock_not_attached_to_class() {
        let source = "<?php\n/** File header. */\nnamespace App;\nclass Foo {}\n";
        let decl = parse_source(source).type_decl.expect("type");
        assert!(decl.doc.is_none());
    }

    #[test]
    fn test_constructor_parameters_and_promotion() {
        let source = r"<?php
class CreateInvoice {
    public function __construct(
        public InvoiceCustomerId $customerId,
        public int $amount,
        string $currency,
        private QueryBus $bus,
    ) {
    }
}";
        let decl = parse_source(source).type_decl.expect("type");
        let ctor = decl.constructor.expect("constructor");
        assert_eq!(ctor.params.len(), 4);
        assert_eq!(ctor.params[0].name, "customerId");
        assert_eq!(ctor.params[0].type_hint.as_deref(), Some("InvoiceCustomerId"));
        assert!(ctor.params[0].promoted_public);
        assert!(!ctor.params[2].promoted);
        assert!(ctor.params[3].promoted);
        assert!(!ctor.params[3].promoted_public);

        // Promoted public params become properties, promoted private does not
        let fields: Vec<&str> = decl.properties.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(fields, vec!["customerId", "amount"]);
    }

    #[test]
    fn test_parameter_defaults_skipped() {
        let source = "<?php class X { public function __construct(int $a = 10, array $b = [1, 2], string $c = 'x,y') {} }";
        let ctor = parse_source(source)
            .type_decl
            .expect("type")
            .constructor
            .expect("ctor");
        let names: Vec<&str> = ctor.params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_declared_properties() {
        let source = r"<?php
class DomainEvent {
    /** Event id. */
    public string $id;
    public string $aggregateId;
    protected int $version = 1;
    private bool $hidden;
}";
        let decl = parse_source(source).type_decl.expect("type");
        let publics: Vec<&str> = decl
            .properties
            .iter()
            .filter(|p| p.is_public)
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(publics, vec!["id", "aggregateId"]);
        assert_eq!(decl.properties[0].doc.as_deref(), Some("/** Event id. */"));
        assert_eq!(decl.properties[0].type_hint.as_deref(), Some("string"));
    }

    #[test]
    fn test_nullable_and_union_property_types() {
        let source = "<?php class X { public ?string $a; public int|string $b; }";
        let decl = parse_source(source).type_decl.expect("type");
        assert_eq!(decl.properties[0].type_hint.as_deref(), Some("?string"));
        assert_eq!(decl.properties[1].type_hint.as_deref(), Some("int|string"));
    }

    #[test]
    fn test_methods_collected_with_visibility() {
        let source = r"<?php
class Subscriber {
    public function __invoke(InvoiceCreated $event): void {}
    private function helper(): void {}
    public function other(string $x, int $y) {}
}";
        let decl = parse_source(source).type_decl.expect("type");
        let names: Vec<&str> = decl.methods.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["__invoke", "helper", "other"]);
        assert!(decl.methods[0].is_public);
        assert!(!decl.methods[1].is_public);
        assert_eq!(
            decl.methods[0].params[0].type_hint.as_deref(),
            Some("InvoiceCreated")
        );
    }

    #[test]
    fn test_instantiations_deduplicated_in_order() {
        let source = r"<?php
class Processor {
    public function go() {
        $a = new FindCustomer($id);
        $b = new CreateInvoice(new FindCustomer($id));
        $c = new \DateTimeImmutable();
    }
}";
        let file = parse_source(source);
        assert_eq!(
            file.instantiations,
            vec!["FindCustomer", "CreateInvoice", "\\DateTimeImmutable"]
        );
    }

    #[test]
    fn test_anonymous_class_and_relative_new_ignored() {
        let source = "<?php class X { function f() { $a = new class {}; $b = new static(); $c = new self(); } }";
        let file = parse_source(source);
        assert!(file.instantiations.is_empty());
    }

    #[test]
    fn test_class_constant_access_is_not_a_declaration() {
        let source = "<?php\n$x = Invoice::class;\nclass Real {}\n";
        let decl = parse_source(source).type_decl.expect("type");
        assert_eq!(decl.name, "Real");
    }

    #[test]
    fn test_enum_declaration() {
        let file = parse_source("<?php enum Status: string { case Open = 'open'; }");
        let decl = file.type_decl.expect("type");
        assert_eq!(decl.kind, TypeKind::Enum);
        assert_eq!(decl.name, "Status");
        assert!(!decl.is_abstract);
    }

    #[test]
    fn test_interface_method_without_body() {
        let source = "<?php interface Repo { public function find(CustomerId $id): Customer; }";
        let decl = parse_source(source).type_decl.expect("type");
        assert_eq!(decl.methods.len(), 1);
        assert_eq!(decl.methods[0].params[0].name, "id");
    }

    #[test]
    fn test_param_docblock_attached() {
        let source = r"<?php
class X {
    public function __construct(
        /** The invoice amount. */
        public int $amount,
    ) {
    }
}";
        let ctor = parse_source(source)
            .type_decl
            .expect("type")
            .constructor
            .expect("ctor");
        assert!(ctor.params[0]
            .doc
            .as_deref()
            .expect("doc")
            .contains("The invoice amount."));
    }

    #[test]
    fn test_constructor_docblock_attached() {
        let source = r"<?php
class X {
    /**
     * @param int $amount The amount.
     */
    public function __construct(int $amount) {}
}";
        let ctor = parse_source(source)
            .type_decl
            .expect("type")
            .constructor
            .expect("ctor");
        assert!(ctor.doc.expect("doc").contains("@param int $amount"));
    }

    #[test]
    fn test_attribute_names_with_arguments() {
        assert_eq!(
            attribute_names("Route('/invoices', name: 'list'), AsController"),
            vec!["Route", "AsController"]
        );
        assert_eq!(
            attribute_names("Assert\\NotBlank"),
            vec!["Assert\\NotBlank"]
        );
    }

    #[test]
    fn test_malformed_source_does_not_panic() {
        let file = parse_source("<?php class {{{ $$$ use ;;; new");
        assert!(file.type_decl.is_none());
    }
}
