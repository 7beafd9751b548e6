/// C# source rendering
///
/// Transforms a `CompileUnit` into compilable C# text. Output follows the
/// conventions of machine-generated C#: an auto-generated banner, Allman
/// braces, four-space indentation, and `@`-quoted identifiers wherever a
/// name collides with a keyword.

use crate::ast::*;
use crate::error::{GenError, Result};
use std::fmt::Write as _;

/// Banner emitted at the top of every rendered unit.
const BANNER: &str = "\
//------------------------------------------------------------------------------
// <auto-generated>
//     This code was generated by a tool.
//     Changes to this file may cause incorrect behavior and will be lost if
//     the code is regenerated.
// </auto-generated>
//------------------------------------------------------------------------------
";

/// Reserved words that must be quoted with `@` when used as identifiers.
const KEYWORDS: &[&str] = &[
    "abstract", "as", "base", "bool", "break", "byte", "case", "catch", "char", "checked",
    "class", "const", "continue", "decimal", "default", "delegate", "do", "double", "else",
    "enum", "event", "explicit", "extern", "false", "finally", "fixed", "float", "for",
    "foreach", "goto", "if", "implicit", "in", "int", "interface", "internal", "is", "lock",
    "long", "namespace", "new", "null", "object", "operator", "out", "override", "params",
    "private", "protected", "public", "readonly", "ref", "return", "sbyte", "sealed", "short",
    "sizeof", "stackalloc", "static", "string", "struct", "switch", "this", "throw", "true",
    "try", "typeof", "uint", "ulong", "unchecked", "unsafe", "ushort", "using", "virtual",
    "void", "volatile", "while",
];

/// C# code generator
pub struct CSharpGenerator {
    /// Indentation level for pretty-printing
    indent: usize,
    /// Output buffer
    output: String,
}

impl CSharpGenerator {
    pub fn new() -> Self {
        Self {
            indent: 0,
            output: String::new(),
        }
    }

    /// Render a compile unit to C# source text.
    pub fn generate(&mut self, unit: &CompileUnit) -> Result<String> {
        // A failed render leaves partial state behind; start each unit clean.
        self.indent = 0;
        self.output.clear();
        self.output.push_str(BANNER);
        self.output.push('\n');
        for (i, ns) in unit.namespaces.iter().enumerate() {
            if i > 0 {
                self.output.push('\n');
            }
            self.generate_namespace(ns)?;
        }
        Ok(std::mem::take(&mut self.output))
    }

    fn generate_namespace(&mut self, ns: &NamespaceDecl) -> Result<()> {
        match &ns.name {
            Some(name) => {
                writeln!(self.output, "namespace {}", quote_identifier_path(name))?;
                self.output.push_str("{\n");
                self.indent += 1;
                self.generate_namespace_body(ns)?;
                self.indent -= 1;
                self.output.push_str("}\n");
            }
            None => self.generate_namespace_body(ns)?,
        }
        Ok(())
    }

    fn generate_namespace_body(&mut self, ns: &NamespaceDecl) -> Result<()> {
        for import in &ns.imports {
            self.write_indent();
            writeln!(self.output, "using {};", quote_identifier_path(import))?;
        }
        if !ns.imports.is_empty() {
            self.output.push('\n');
        }
        for (i, ty) in ns.types.iter().enumerate() {
            if i > 0 {
                self.output.push('\n');
            }
            self.generate_type(ty)?;
        }
        Ok(())
    }

    fn generate_type(&mut self, ty: &TypeDecl) -> Result<()> {
        if ty.is_static && ty.kind != TypeKind::Class {
            return Err(GenError::Unsupported(format!(
                "static modifier on {} `{}`",
                kind_keyword(ty.kind),
                ty.name
            )));
        }
        self.write_indent();
        self.output.push_str(visibility_keyword(ty.visibility));
        self.output.push(' ');
        if ty.is_static {
            self.output.push_str("static ");
        }
        self.output.push_str(kind_keyword(ty.kind));
        self.output.push(' ');
        self.output.push_str(&quote_identifier(&ty.name));
        if !ty.base_types.is_empty() {
            self.output.push_str(" : ");
            for (i, base) in ty.base_types.iter().enumerate() {
                if i > 0 {
                    self.output.push_str(", ");
                }
                self.output.push_str(&quote_identifier_path(base));
            }
        }
        self.output.push('\n');
        self.write_indent();
        self.output.push_str("{\n");
        self.indent += 1;
        for (i, member) in ty.members.iter().enumerate() {
            if i > 0 {
                self.output.push('\n');
            }
            self.generate_member(ty, member)?;
        }
        self.indent -= 1;
        self.write_indent();
        self.output.push_str("}\n");
        Ok(())
    }

    fn generate_member(&mut self, ty: &TypeDecl, member: &Member) -> Result<()> {
        match member {
            Member::Field(field) => self.generate_field(ty, field),
            Member::Method(method) => self.generate_method(ty, method),
            Member::Snippet(text) => {
                for line in text.lines() {
                    self.write_indent();
                    self.output.push_str(line);
                    self.output.push('\n');
                }
                Ok(())
            }
        }
    }

    fn generate_field(&mut self, ty: &TypeDecl, field: &FieldDecl) -> Result<()> {
        if ty.kind == TypeKind::Interface {
            return Err(GenError::Unsupported(format!(
                "field `{}` on interface `{}`",
                field.name, ty.name
            )));
        }
        self.write_indent();
        self.output.push_str(visibility_keyword(field.visibility));
        self.output.push(' ');
        if field.is_static {
            self.output.push_str("static ");
        }
        write!(self.output, "{} {}", field.ty, quote_identifier(&field.name))?;
        if let Some(init) = &field.init {
            write!(self.output, " = {}", init)?;
        }
        self.output.push_str(";\n");
        Ok(())
    }

    fn generate_method(&mut self, ty: &TypeDecl, method: &MethodDecl) -> Result<()> {
        self.write_indent();
        // Interface members carry no access modifier. A body on an
        // interface method becomes a default interface member.
        if ty.kind != TypeKind::Interface {
            self.output.push_str(visibility_keyword(method.visibility));
            self.output.push(' ');
        }
        if method.is_static {
            self.output.push_str("static ");
        }
        self.output.push_str(method.return_type.as_deref().unwrap_or("void"));
        self.output.push(' ');
        self.output.push_str(&quote_identifier(&method.name));
        self.output.push('(');
        for (i, param) in method.params.iter().enumerate() {
            if i > 0 {
                self.output.push_str(", ");
            }
            write!(self.output, "{} {}", param.ty, quote_identifier(&param.name))?;
        }
        self.output.push(')');
        if ty.kind == TypeKind::Interface && method.body.is_empty() {
            self.output.push_str(";\n");
            return Ok(());
        }
        self.output.push('\n');
        self.write_indent();
        self.output.push_str("{\n");
        self.indent += 1;
        for line in &method.body {
            self.write_indent();
            self.output.push_str(line);
            self.output.push('\n');
        }
        self.indent -= 1;
        self.write_indent();
        self.output.push_str("}\n");
        Ok(())
    }

    /// Write current indentation
    fn write_indent(&mut self) {
        for _ in 0..self.indent {
            self.output.push_str("    ");
        }
    }
}

fn kind_keyword(kind: TypeKind) -> &'static str {
    match kind {
        TypeKind::Class => "class",
        TypeKind::Struct => "struct",
        TypeKind::Interface => "interface",
    }
}

fn visibility_keyword(visibility: Visibility) -> &'static str {
    match visibility {
        Visibility::Public => "public",
        Visibility::Internal => "internal",
        Visibility::Private => "private",
    }
}

/// Quote an identifier with `@` if it collides with a C# keyword.
pub fn quote_identifier(name: &str) -> String {
    if KEYWORDS.contains(&name) {
        format!("@{}", name)
    } else {
        name.to_string()
    }
}

/// Quote each segment of a dotted identifier path.
fn quote_identifier_path(path: &str) -> String {
    path.split('.').map(quote_identifier).collect::<Vec<_>>().join(".")
}

/// Escape text for use inside a double-quoted C# string literal. Useful
/// when building snippet members or field initializers.
pub fn escape_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
        .replace('\0', "\\0")
}
