//! Statement-level nodes: module root, declarations, and imports.
//!
//! These types describe the parsed syntax tree the emitter consumes. They
//! are plain read-only data owned by the upstream parser; the emitter holds
//! transient references during a single traversal pass and never mutates or
//! outlives them.

use super::{Arg, Expression, Param};

// ============================================================================
// Module and statements
// ============================================================================

/// Root of a parsed source file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Module<'a> {
    /// Top-level statements in source order.
    pub body: Vec<Statement<'a>>,
}

impl<'a> Module<'a> {
    pub fn new(body: Vec<Statement<'a>>) -> Self {
        Self { body }
    }
}

/// A statement in a module, class, or function body.
///
/// This is a closed set: the emitter distinguishes exactly the four
/// declaration kinds that can appear in a stub. Everything executable
/// (assignments, expression statements, control flow) collapses to
/// [`Statement::Other`], which is neither rendered nor descended into.
/// A statement kind added upstream therefore surfaces as a compile-time
/// gap here rather than being silently dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement<'a> {
    ClassDef(ClassDef<'a>),
    FunctionDef(FunctionDef<'a>),
    Import(Import<'a>),
    ImportFrom(ImportFrom<'a>),
    /// Executable logic; never part of a stub.
    Other,
}

// ============================================================================
// Declarations
// ============================================================================

/// A `class` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDef<'a> {
    pub name: &'a str,
    /// Positional base classes.
    pub bases: Vec<Arg<'a>>,
    /// Keyword arguments in the class header (`metaclass=...` and friends).
    pub keywords: Vec<Arg<'a>>,
    pub decorators: Vec<Decorator<'a>>,
    pub body: Vec<Statement<'a>>,
}

impl<'a> ClassDef<'a> {
    pub fn new(name: &'a str) -> Self {
        Self {
            name,
            bases: Vec::new(),
            keywords: Vec::new(),
            decorators: Vec::new(),
            body: Vec::new(),
        }
    }

    pub fn with_bases(mut self, bases: Vec<Arg<'a>>) -> Self {
        self.bases = bases;
        self
    }

    pub fn with_keywords(mut self, keywords: Vec<Arg<'a>>) -> Self {
        self.keywords = keywords;
        self
    }

    pub fn with_decorators(mut self, decorators: Vec<Decorator<'a>>) -> Self {
        self.decorators = decorators;
        self
    }

    pub fn with_body(mut self, body: Vec<Statement<'a>>) -> Self {
        self.body = body;
        self
    }
}

/// A `def` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDef<'a> {
    pub name: &'a str,
    /// Formal parameters, linearized in declaration order.
    pub params: Vec<Param<'a>>,
    /// Return annotation, if present.
    pub returns: Option<Expression<'a>>,
    pub decorators: Vec<Decorator<'a>>,
    pub is_async: bool,
    pub body: Vec<Statement<'a>>,
}

impl<'a> FunctionDef<'a> {
    pub fn new(name: &'a str) -> Self {
        Self {
            name,
            params: Vec::new(),
            returns: None,
            decorators: Vec::new(),
            is_async: false,
            body: Vec::new(),
        }
    }

    pub fn with_params(mut self, params: Vec<Param<'a>>) -> Self {
        self.params = params;
        self
    }

    pub fn with_returns(mut self, returns: Expression<'a>) -> Self {
        self.returns = Some(returns);
        self
    }

    pub fn with_decorators(mut self, decorators: Vec<Decorator<'a>>) -> Self {
        self.decorators = decorators;
        self
    }

    pub fn with_body(mut self, body: Vec<Statement<'a>>) -> Self {
        self.body = body;
        self
    }

    /// Mark this as an `async def`.
    pub fn asynchronous(mut self) -> Self {
        self.is_async = true;
        self
    }
}

/// A decorator attached to a class or function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decorator<'a> {
    /// The decorated-by expression (the part after `@`, before any call).
    pub target: Expression<'a>,
    /// Call arguments when the decorator uses call syntax. `Some(vec![])`
    /// is an empty call (`@cached()`); `None` is a bare reference.
    pub args: Option<Vec<Arg<'a>>>,
}

impl<'a> Decorator<'a> {
    pub fn new(target: Expression<'a>) -> Self {
        Self { target, args: None }
    }

    pub fn with_args(mut self, args: Vec<Arg<'a>>) -> Self {
        self.args = Some(args);
        self
    }
}

// ============================================================================
// Imports
// ============================================================================

/// A possibly-relative dotted module reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleName<'a> {
    /// Leading-dot count for a relative reference.
    pub relative: usize,
    /// Dotted path segments; empty for a bare relative import of the
    /// enclosing package.
    pub segments: Vec<&'a str>,
}

impl<'a> ModuleName<'a> {
    /// An absolute dotted reference.
    pub fn dotted(segments: Vec<&'a str>) -> Self {
        Self {
            relative: 0,
            segments,
        }
    }

    /// A relative reference with `relative` leading dots.
    pub fn relative(relative: usize, segments: Vec<&'a str>) -> Self {
        Self { relative, segments }
    }
}

/// One name in an import statement, with an optional `as` binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportAlias<'a> {
    pub name: ModuleName<'a>,
    pub asname: Option<&'a str>,
}

impl<'a> ImportAlias<'a> {
    pub fn new(name: ModuleName<'a>) -> Self {
        Self { name, asname: None }
    }

    pub fn with_asname(mut self, asname: &'a str) -> Self {
        self.asname = Some(asname);
        self
    }
}

/// An `import a.b, c as d` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Import<'a> {
    pub names: Vec<ImportAlias<'a>>,
}

impl<'a> Import<'a> {
    pub fn new(names: Vec<ImportAlias<'a>>) -> Self {
        Self { names }
    }
}

/// The imported-names side of a from-import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportNames<'a> {
    /// `from m import *`
    Star,
    /// `from m import a, b as c`
    Aliases(Vec<ImportAlias<'a>>),
}

/// A `from <module> import <names>` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportFrom<'a> {
    pub module: ModuleName<'a>,
    pub names: ImportNames<'a>,
}

impl<'a> ImportFrom<'a> {
    pub fn new(module: ModuleName<'a>, names: ImportNames<'a>) -> Self {
        Self { module, names }
    }
}
