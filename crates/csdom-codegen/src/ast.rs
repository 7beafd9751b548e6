//! Code DOM types for generated C#
//!
//! These types describe a C# source file structurally. A `CompileUnit` is
//! rendered to text by the generator before it reaches a compiler, so the
//! model only covers what generated code actually needs: namespaces,
//! type declarations, fields, methods, and verbatim snippets.

/// A complete source file: referenced assemblies plus namespaces.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompileUnit {
    /// Assembly names this unit requires. The compiler layer merges these
    /// into the request's reference list before invocation.
    pub referenced_assemblies: Vec<String>,
    /// Namespaces in declaration order.
    pub namespaces: Vec<NamespaceDecl>,
}

impl CompileUnit {
    pub fn new() -> Self {
        Self::default()
    }
}

/// A namespace and its contents. `name: None` is the global namespace,
/// whose types are emitted without a wrapping declaration.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NamespaceDecl {
    pub name: Option<String>,
    /// `using` directives emitted at the top of the namespace.
    pub imports: Vec<String>,
    pub types: Vec<TypeDecl>,
}

impl NamespaceDecl {
    /// The global (unnamed) namespace.
    pub fn global() -> Self {
        Self::default()
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}

/// A type declaration: `class`, `struct`, or `interface`.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDecl {
    pub name: String,
    pub kind: TypeKind,
    pub visibility: Visibility,
    /// Only valid on classes.
    pub is_static: bool,
    /// Base class and implemented interfaces, in declaration order.
    pub base_types: Vec<String>,
    pub members: Vec<Member>,
}

impl TypeDecl {
    pub fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            visibility: Visibility::Public,
            is_static: false,
            base_types: Vec::new(),
            members: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Class,
    Struct,
    Interface,
}

/// C# access modifier. Only the levels generated code uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Public,
    Internal,
    Private,
}

/// A member of a type declaration.
#[derive(Debug, Clone, PartialEq)]
pub enum Member {
    Field(FieldDecl),
    Method(MethodDecl),
    /// Verbatim member text, emitted unchanged at member indentation.
    Snippet(String),
}

/// A field declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDecl {
    pub ty: String,
    pub name: String,
    /// Initializer expression, verbatim.
    pub init: Option<String>,
    pub is_static: bool,
    pub visibility: Visibility,
}

impl FieldDecl {
    pub fn new(ty: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            ty: ty.into(),
            name: name.into(),
            init: None,
            is_static: false,
            visibility: Visibility::Public,
        }
    }
}

/// A method declaration.
///
/// On an interface, an empty body renders as a plain declaration and a
/// non-empty body renders as a default interface member.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodDecl {
    pub name: String,
    /// `None` is `void`.
    pub return_type: Option<String>,
    pub params: Vec<ParamDecl>,
    /// Statement lines, verbatim.
    pub body: Vec<String>,
    pub is_static: bool,
    pub visibility: Visibility,
}

impl MethodDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            return_type: None,
            params: Vec::new(),
            body: Vec::new(),
            is_static: false,
            visibility: Visibility::Public,
        }
    }
}

/// A method parameter: type and name.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamDecl {
    pub ty: String,
    pub name: String,
}

impl ParamDecl {
    pub fn new(ty: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            ty: ty.into(),
            name: name.into(),
        }
    }
}
