//! The traversal-and-emission engine.
//!
//! [`StubEmitter`] walks a parsed module once, top-down, and renders the
//! declaration-only stub view: public classes and functions with their
//! signatures, module-scope imports, and ellipsis placeholders in place of
//! bodies. Filtering and emission happen in the same pre-order pass, so the
//! output buffer order always matches the traversal order of the filtered
//! tree.
//!
//! # Filtering rules
//!
//! 1. Classes are rendered unless their name is private or protected by
//!    convention. A rendered class's body is walked with the class nest
//!    count raised; a rejected class is skipped entirely.
//! 2. Functions are rendered only outside any enclosing function body and
//!    only when their name is public. A rendered function's body is walked
//!    with the function nest count raised, so functions nested inside are
//!    invisible regardless of name.
//! 3. Imports are rendered at module scope only.
//! 4. Everything else is dropped without descent.

use tracing::{debug, trace};

use crate::codegen::CodegenState;
use crate::config::FormatStyle;
use crate::error::StubError;
use crate::nodes::{
    Arg, ClassDef, Decorator, FunctionDef, Import, ImportAlias, ImportFrom, ImportNames, Module,
    ModuleName, Param, Statement,
};
use crate::render::RenderExpression;
use crate::visibility::NameVisibility;

/// The ellipsis placeholder emitted in place of an omitted or empty body.
const PLACEHOLDER: &str = "...";

/// Fixed header comment emitted at the top of every generated stub.
const HEADER_LINES: &[&str] = &[
    "# Machine-generated stub; do not edit.",
    "# Declaration bodies and private members are omitted.",
];

// ============================================================================
// StubEmitter
// ============================================================================

/// Generates declaration-only stub text from parsed modules.
///
/// The two collaborators — visibility classification and expression
/// rendering — are injected at construction and shared across invocations.
/// All traversal state is created fresh per [`generate`] call and discarded
/// afterwards, so one emitter can serve many files and invocations never
/// share mutable state.
///
/// [`generate`]: StubEmitter::generate
#[derive(Debug)]
pub struct StubEmitter<V, R> {
    visibility: V,
    renderer: R,
}

impl<V, R> StubEmitter<V, R>
where
    V: NameVisibility,
    R: RenderExpression,
{
    pub fn new(visibility: V, renderer: R) -> Self {
        Self {
            visibility,
            renderer,
        }
    }

    /// Render `module` into stub text using the given formatting style.
    ///
    /// # Errors
    ///
    /// Propagates the first failure the expression renderer reports; no
    /// partial buffer is returned.
    pub fn generate(&self, module: &Module<'_>, style: &FormatStyle) -> Result<String, StubError> {
        let mut pass = EmitPass {
            state: CodegenState::new(style),
            visibility: &self.visibility,
            renderer: &self.renderer,
            class_nest_depth: 0,
            function_nest_depth: 0,
            suite_has_content: false,
        };
        pass.emit_header();
        pass.emit_body(&module.body)?;
        let text = pass.state.finish();
        debug!("generated stub ({} bytes)", text.len());
        Ok(text)
    }
}

// ============================================================================
// Emission pass
// ============================================================================

/// State for a single traversal; discarded once the buffer is handed back.
struct EmitPass<'e, 's, V, R> {
    state: CodegenState<'s>,
    visibility: &'e V,
    renderer: &'e R,
    /// Enclosing class scopes currently open.
    class_nest_depth: usize,
    /// Enclosing function scopes currently open.
    function_nest_depth: usize,
    /// Whether the innermost suite being built has emitted a statement.
    /// Saved and restored around each nested suite; see [`EmitPass::emit_suite`].
    suite_has_content: bool,
}

impl<V, R> EmitPass<'_, '_, V, R>
where
    V: NameVisibility,
    R: RenderExpression,
{
    fn emit_header(&mut self) {
        for line in HEADER_LINES {
            self.emit_line(line);
        }
        self.state.add_blank_lines(1);
    }

    /// Append one indented line and mark the current suite non-empty.
    fn emit_line(&mut self, text: &str) {
        self.state.add_indent();
        self.state.add_token(text);
        self.state.add_newline();
        self.suite_has_content = true;
    }

    fn emit_body(&mut self, body: &[Statement<'_>]) -> Result<(), StubError> {
        for stmt in body {
            self.emit_statement(stmt)?;
        }
        Ok(())
    }

    fn emit_statement(&mut self, stmt: &Statement<'_>) -> Result<(), StubError> {
        match stmt {
            Statement::ClassDef(class) => self.emit_class(class),
            Statement::FunctionDef(function) => self.emit_function(function),
            Statement::Import(import) => self.emit_import(import),
            Statement::ImportFrom(import) => self.emit_import_from(import),
            Statement::Other => Ok(()),
        }
    }

    /// Wrap `body`'s emissions in an indented, non-empty block.
    ///
    /// Suite-emptiness is scoped per suite: the flag is saved before the
    /// nested suite starts and restored after it ends, on the error path
    /// too, so a failure inside a nested suite cannot corrupt an ancestor
    /// suite's tracking.
    fn emit_suite<F>(&mut self, body: F) -> Result<(), StubError>
    where
        F: FnOnce(&mut Self) -> Result<(), StubError>,
    {
        self.state.indent();
        let saved = self.suite_has_content;
        self.suite_has_content = false;
        let result = body(self);
        if result.is_ok() && !self.suite_has_content {
            self.emit_line(PLACEHOLDER);
        }
        self.suite_has_content = saved;
        self.state.dedent();
        result
    }

    fn is_hidden(&self, name: &str) -> bool {
        self.visibility.is_private(name) || self.visibility.is_protected(name)
    }

    fn at_module_scope(&self) -> bool {
        self.class_nest_depth == 0 && self.function_nest_depth == 0
    }

    fn emit_class(&mut self, class: &ClassDef<'_>) -> Result<(), StubError> {
        if self.is_hidden(class.name) {
            trace!("dropping non-public class: {}", class.name);
            return Ok(());
        }
        self.emit_decorators(&class.decorators)?;

        let mut header = String::from("class ");
        header.push_str(class.name);
        if !class.bases.is_empty() || !class.keywords.is_empty() {
            let args = class
                .bases
                .iter()
                .chain(class.keywords.iter())
                .map(|arg| self.render_arg(arg))
                .collect::<Result<Vec<_>, StubError>>()?;
            header.push('(');
            header.push_str(&args.join(", "));
            header.push(')');
        }
        header.push(':');
        self.emit_line(&header);

        self.emit_suite(|pass| {
            pass.class_nest_depth += 1;
            let result = pass.emit_body(&class.body);
            pass.class_nest_depth -= 1;
            result
        })?;
        self.state.add_blank_lines(2);
        Ok(())
    }

    fn emit_function(&mut self, function: &FunctionDef<'_>) -> Result<(), StubError> {
        if self.function_nest_depth > 0 {
            trace!("dropping nested function: {}", function.name);
            return Ok(());
        }
        if self.is_hidden(function.name) {
            trace!("dropping non-public function: {}", function.name);
            return Ok(());
        }
        self.emit_decorators(&function.decorators)?;

        let mut header = String::new();
        if function.is_async {
            header.push_str("async ");
        }
        header.push_str("def ");
        header.push_str(function.name);
        let params = function
            .params
            .iter()
            .map(|param| self.render_param(param))
            .collect::<Result<Vec<_>, StubError>>()?;
        header.push('(');
        header.push_str(&params.join(", "));
        header.push(')');
        if let Some(returns) = &function.returns {
            header.push_str(" -> ");
            header.push_str(&self.renderer.render(returns)?);
        }
        header.push(':');
        self.emit_line(&header);

        self.emit_suite(|pass| {
            pass.function_nest_depth += 1;
            let result = pass.emit_body(&function.body);
            pass.function_nest_depth -= 1;
            result
        })?;
        self.state.add_blank_lines(1);
        Ok(())
    }

    fn emit_decorators(&mut self, decorators: &[Decorator<'_>]) -> Result<(), StubError> {
        for decorator in decorators {
            let mut line = String::from("@");
            line.push_str(&self.renderer.render(&decorator.target)?);
            if let Some(args) = &decorator.args {
                let rendered = args
                    .iter()
                    .map(|arg| self.render_arg(arg))
                    .collect::<Result<Vec<_>, StubError>>()?;
                line.push('(');
                line.push_str(&rendered.join(", "));
                line.push(')');
            }
            self.emit_line(&line);
        }
        Ok(())
    }

    fn emit_import(&mut self, import: &Import<'_>) -> Result<(), StubError> {
        if !self.at_module_scope() {
            trace!("dropping import inside class or function body");
            return Ok(());
        }
        let names: Vec<String> = import.names.iter().map(render_alias).collect();
        let mut line = String::from("import ");
        line.push_str(&names.join(", "));
        self.emit_line(&line);
        Ok(())
    }

    fn emit_import_from(&mut self, import: &ImportFrom<'_>) -> Result<(), StubError> {
        if !self.at_module_scope() {
            trace!("dropping from-import inside class or function body");
            return Ok(());
        }
        let mut line = String::from("from ");
        line.push_str(&render_module_name(&import.module));
        line.push_str(" import ");
        match &import.names {
            ImportNames::Star => line.push('*'),
            ImportNames::Aliases(aliases) => {
                let names: Vec<String> = aliases.iter().map(render_alias).collect();
                line.push_str(&names.join(", "));
            }
        }
        self.emit_line(&line);
        Ok(())
    }

    /// Sigil, then `name: annotation`, then the default marker. The concrete
    /// default expression never appears; only its presence is signaled.
    fn render_param(&self, param: &Param<'_>) -> Result<String, StubError> {
        let mut out = String::new();
        out.push_str(param.star);
        out.push_str(param.name);
        if let Some(annotation) = &param.annotation {
            out.push_str(": ");
            out.push_str(&self.renderer.render(annotation)?);
            if param.default.is_some() {
                out.push_str(" = ...");
            }
        } else if param.default.is_some() {
            out.push_str("=...");
        }
        Ok(out)
    }

    /// Sigil, then the keyword prefix, then the verbatim value.
    fn render_arg(&self, arg: &Arg<'_>) -> Result<String, StubError> {
        let mut out = String::new();
        out.push_str(arg.star);
        if let Some(keyword) = arg.keyword {
            out.push_str(keyword);
            out.push('=');
        }
        out.push_str(&self.renderer.render(&arg.value)?);
        Ok(out)
    }
}

/// `a.b.c` with an optional ` as name` suffix.
fn render_alias(alias: &ImportAlias<'_>) -> String {
    let mut out = render_module_name(&alias.name);
    if let Some(asname) = alias.asname {
        out.push_str(" as ");
        out.push_str(asname);
    }
    out
}

/// Leading dots for the relative depth, then dot-joined segments.
fn render_module_name(name: &ModuleName<'_>) -> String {
    let mut out = ".".repeat(name.relative);
    out.push_str(&name.segments.join("."));
    out
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::Expression;
    use crate::render::SourceRenderer;
    use crate::visibility::UnderscoreVisibility;

    fn stub(module: &Module<'_>) -> String {
        StubEmitter::new(UnderscoreVisibility, SourceRenderer)
            .generate(module, &FormatStyle::default())
            .expect("render error")
    }

    fn expr(source: &str) -> Expression<'_> {
        Expression::new(source)
    }

    #[test]
    fn private_and_protected_classes_are_dropped() {
        let module = Module::new(vec![
            Statement::ClassDef(ClassDef::new("__Hidden")),
            Statement::ClassDef(ClassDef::new("_Internal")),
            Statement::ClassDef(ClassDef::new("Visible")),
        ]);
        let out = stub(&module);
        assert!(!out.contains("__Hidden"));
        assert!(!out.contains("_Internal"));
        assert!(out.contains("class Visible:"));
    }

    #[test]
    fn dunder_methods_are_kept() {
        let module = Module::new(vec![Statement::ClassDef(
            ClassDef::new("Point").with_body(vec![Statement::FunctionDef(
                FunctionDef::new("__init__").with_params(vec![Param::new("self")]),
            )]),
        )]);
        assert!(stub(&module).contains("def __init__(self):"));
    }

    #[test]
    fn functions_inside_functions_are_invisible() {
        let module = Module::new(vec![Statement::FunctionDef(
            FunctionDef::new("outer").with_body(vec![Statement::FunctionDef(
                FunctionDef::new("inner").with_body(vec![Statement::FunctionDef(
                    FunctionDef::new("innermost"),
                )]),
            )]),
        )]);
        let out = stub(&module);
        assert!(out.contains("def outer():"));
        assert!(!out.contains("inner"));
        assert!(!out.contains("innermost"));
    }

    #[test]
    fn methods_of_rendered_classes_are_filtered_independently() {
        let module = Module::new(vec![Statement::ClassDef(
            ClassDef::new("Service").with_body(vec![
                Statement::FunctionDef(FunctionDef::new("start")),
                Statement::FunctionDef(FunctionDef::new("_warm_cache")),
                Statement::FunctionDef(FunctionDef::new("__rotate_keys")),
            ]),
        )]);
        let out = stub(&module);
        assert!(out.contains("def start():"));
        assert!(!out.contains("_warm_cache"));
        assert!(!out.contains("__rotate_keys"));
    }

    #[test]
    fn filtered_out_suite_degenerates_to_placeholder() {
        let module = Module::new(vec![Statement::ClassDef(
            ClassDef::new("Opaque").with_body(vec![
                Statement::FunctionDef(FunctionDef::new("__compute")),
                Statement::Other,
            ]),
        )]);
        assert!(stub(&module).contains("class Opaque:\n    ...\n"));
    }

    #[test]
    fn decorators_of_dropped_functions_never_appear() {
        let module = Module::new(vec![Statement::FunctionDef(
            FunctionDef::new("_hidden")
                .with_decorators(vec![Decorator::new(expr("functools.cache"))]),
        )]);
        assert!(!stub(&module).contains("functools.cache"));
    }

    #[test]
    fn decorators_referencing_non_public_names_render_verbatim() {
        // Only the declaration's own name drives filtering; decorator
        // targets are part of the declaration surface.
        let module = Module::new(vec![Statement::FunctionDef(
            FunctionDef::new("handler")
                .with_decorators(vec![Decorator::new(expr("_registry.register"))]),
        )]);
        assert!(stub(&module).contains("@_registry.register\n"));
    }

    #[test]
    fn decorator_call_arguments_are_rendered() {
        let module = Module::new(vec![Statement::FunctionDef(
            FunctionDef::new("task").with_decorators(vec![
                Decorator::new(expr("retry"))
                    .with_args(vec![
                        Arg::new(expr("3")),
                        Arg::new(expr("0.5")).with_keyword("backoff"),
                    ]),
                Decorator::new(expr("atomic")).with_args(vec![]),
            ]),
        )]);
        let out = stub(&module);
        assert!(out.contains("@retry(3, backoff=0.5)\n"));
        assert!(out.contains("@atomic()\n"));
    }

    #[test]
    fn class_header_renders_bases_and_keywords() {
        let module = Module::new(vec![Statement::ClassDef(
            ClassDef::new("Store")
                .with_bases(vec![Arg::new(expr("Base")), Arg::new(expr("Generic[T]"))])
                .with_keywords(vec![Arg::new(expr("Meta")).with_keyword("metaclass")]),
        )]);
        assert!(stub(&module).contains("class Store(Base, Generic[T], metaclass=Meta):"));
    }

    #[test]
    fn async_functions_carry_the_qualifier() {
        let module = Module::new(vec![Statement::FunctionDef(
            FunctionDef::new("fetch")
                .asynchronous()
                .with_returns(expr("bytes")),
        )]);
        assert!(stub(&module).contains("async def fetch() -> bytes:"));
    }

    #[test]
    fn parameter_defaults_are_redacted() {
        let module = Module::new(vec![Statement::FunctionDef(
            FunctionDef::new("configure").with_params(vec![
                Param::new("host")
                    .with_annotation(expr("str"))
                    .with_default(expr("\"localhost\"")),
                Param::new("port").with_default(expr("8080")),
                Param::new("args").with_star("*"),
                Param::new("kwargs").with_star("**"),
            ]),
        )]);
        let out = stub(&module);
        assert!(out.contains("def configure(host: str = ..., port=..., *args, **kwargs):"));
        assert!(!out.contains("localhost"));
        assert!(!out.contains("8080"));
    }

    #[test]
    fn bare_keyword_only_marker_renders_as_star() {
        let module = Module::new(vec![Statement::FunctionDef(
            FunctionDef::new("fetch").with_params(vec![
                Param::new("url").with_annotation(expr("str")),
                Param::new("").with_star("*"),
                Param::new("timeout")
                    .with_annotation(expr("float"))
                    .with_default(expr("30.0")),
            ]),
        )]);
        assert!(stub(&module).contains("def fetch(url: str, *, timeout: float = ...):"));
    }

    #[test]
    fn imports_render_only_at_module_scope() {
        let module = Module::new(vec![
            Statement::Import(Import::new(vec![ImportAlias::new(ModuleName::dotted(
                vec!["os"],
            ))])),
            Statement::ClassDef(ClassDef::new("C").with_body(vec![Statement::Import(
                Import::new(vec![ImportAlias::new(ModuleName::dotted(vec!["json"]))]),
            )])),
            Statement::FunctionDef(FunctionDef::new("f").with_body(vec![
                Statement::ImportFrom(ImportFrom::new(
                    ModuleName::dotted(vec!["sys"]),
                    ImportNames::Star,
                )),
            ])),
        ]);
        let out = stub(&module);
        assert!(out.contains("import os\n"));
        assert!(!out.contains("json"));
        assert!(!out.contains("sys"));
    }

    #[test]
    fn module_names_render_relative_depth_and_segments() {
        let module = Module::new(vec![
            Statement::ImportFrom(ImportFrom::new(
                ModuleName::relative(2, vec!["util", "text"]),
                ImportNames::Aliases(vec![
                    ImportAlias::new(ModuleName::dotted(vec!["wrap"])).with_asname("w"),
                ]),
            )),
            Statement::ImportFrom(ImportFrom::new(
                ModuleName::relative(1, vec![]),
                ImportNames::Star,
            )),
        ]);
        let out = stub(&module);
        assert!(out.contains("from ..util.text import wrap as w\n"));
        assert!(out.contains("from . import *\n"));
    }

    #[test]
    fn classes_inside_rendered_function_bodies_are_emitted() {
        let module = Module::new(vec![Statement::FunctionDef(
            FunctionDef::new("factory").with_body(vec![Statement::ClassDef(
                ClassDef::new("Product"),
            )]),
        )]);
        assert!(stub(&module).contains("def factory():\n    class Product:\n        ...\n"));
    }

    #[test]
    fn header_is_present_even_for_an_empty_module() {
        let out = stub(&Module::default());
        assert!(out.starts_with("# Machine-generated stub; do not edit.\n"));
    }
}
