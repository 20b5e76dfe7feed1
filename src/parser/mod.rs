// Parser module: lexing and narrow structural parsing of PHP sources

pub mod docblock;
pub mod generics;
pub mod source;
pub mod tokens;

pub use generics::{extract_generic_type, GenericType};
pub use source::{parse_source, MethodDecl, ParamDecl, PropertyDecl, SourceFile, TypeDecl, TypeKind};
pub use tokens::{tokenize, Token};
