//! Node types for the parsed syntax tree the emitter consumes.
//!
//! The upstream parser owns these; the emitter borrows them read-only for
//! the duration of one traversal pass. Constructors and chainable `with_*`
//! builders keep tree assembly readable for parsers and tests alike.

mod expression;
mod statement;

pub use expression::{Arg, Expression, Param};
pub use statement::{
    ClassDef, Decorator, FunctionDef, Import, ImportAlias, ImportFrom, ImportNames, Module,
    ModuleName, Statement,
};
