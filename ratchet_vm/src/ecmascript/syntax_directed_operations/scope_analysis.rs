//! ### [8.2 Scope Analysis](https://tc39.es/ecma262/#sec-syntax-directed-operations-scope-analysis)
//!
//! The declaration-collecting syntax-directed operations used by script,
//! function and block instantiation: LexicallyDeclaredNames,
//! LexicallyScopedDeclarations, VarDeclaredNames and VarScopedDeclarations.

use oxc_ast::ast::{
    Class, Function, Statement, SwitchCase, VariableDeclarationKind, VariableDeclarator,
};
use oxc_ecmascript::BoundNames;
use oxc_span::Atom;

/// A var-scoped declaration: a `var` declarator, or (at the top level of a
/// script or function body) a hoisted function declaration.
#[derive(Debug, Clone, Copy)]
pub(crate) enum VarScopedDeclaration {
    Variable(&'static VariableDeclarator<'static>),
    Function(&'static Function<'static>),
}

/// A lexically scoped declaration of a statement list.
#[derive(Debug, Clone, Copy)]
pub(crate) enum LexicallyScopedDeclaration {
    Variable(&'static VariableDeclarator<'static>),
    Function(&'static Function<'static>),
    Class(&'static Class<'static>),
}

impl LexicallyScopedDeclaration {
    /// ### [8.2.3 Static Semantics: IsConstantDeclaration](https://tc39.es/ecma262/#sec-static-semantics-isconstantdeclaration)
    pub(crate) fn is_constant_declaration(&self) -> bool {
        match self {
            LexicallyScopedDeclaration::Variable(decl) => {
                decl.kind == VariableDeclarationKind::Const
            }
            _ => false,
        }
    }

    pub(crate) fn bound_names<F: FnMut(Atom<'static>)>(&self, f: &mut F) {
        match self {
            LexicallyScopedDeclaration::Variable(decl) => {
                decl.id.bound_names(&mut |identifier| f(identifier.name))
            }
            LexicallyScopedDeclaration::Function(decl) => {
                decl.bound_names(&mut |identifier| f(identifier.name))
            }
            LexicallyScopedDeclaration::Class(decl) => {
                decl.bound_names(&mut |identifier| f(identifier.name))
            }
        }
    }
}

/// ### [8.2.4 Static Semantics: LexicallyScopedDeclarations](https://tc39.es/ecma262/#sec-static-semantics-lexicallyscopeddeclarations)
///
/// The declarations directly contained in a StatementList; used by block,
/// case-block and catch-block instantiation. Function declarations are
/// lexically scoped here.
pub(crate) fn statement_list_lexically_scoped_declarations(
    statements: &'static [Statement<'static>],
) -> Vec<LexicallyScopedDeclaration> {
    let mut declarations = Vec::new();
    for statement in statements {
        statement_lexically_scoped_declarations(statement, &mut declarations);
    }
    declarations
}

fn statement_lexically_scoped_declarations(
    statement: &'static Statement<'static>,
    declarations: &mut Vec<LexicallyScopedDeclaration>,
) {
    match statement {
        // StatementListItem : Declaration
        // 1. Return a List whose sole element is DeclarationPart of
        //    Declaration.
        Statement::VariableDeclaration(decl) if decl.kind.is_lexical() => {
            for declarator in &decl.declarations {
                declarations.push(LexicallyScopedDeclaration::Variable(declarator));
            }
        }
        Statement::FunctionDeclaration(decl) => {
            declarations.push(LexicallyScopedDeclaration::Function(decl));
        }
        Statement::ClassDeclaration(decl) => {
            declarations.push(LexicallyScopedDeclaration::Class(decl));
        }
        // LabelledItem : FunctionDeclaration
        // 1. Return « FunctionDeclaration ».
        Statement::LabeledStatement(labeled) => {
            if let Statement::FunctionDeclaration(decl) = &labeled.body {
                declarations.push(LexicallyScopedDeclaration::Function(decl));
            }
        }
        // LabelledItem : Statement
        // 1. Return a new empty List.
        _ => {}
    }
}

/// ### [8.2.5 Static Semantics: LexicallyDeclaredNames](https://tc39.es/ecma262/#sec-static-semantics-lexicallydeclarednames)
/// at the top level of a script or function body: TopLevelLexicallyDeclaredNames.
///
/// At the top level, function declarations are treated like var
/// declarations rather than like lexical declarations.
pub(crate) fn top_level_lexically_declared_names(
    statements: &'static [Statement<'static>],
) -> Vec<Atom<'static>> {
    let mut names = Vec::new();
    for statement in statements {
        match statement {
            Statement::VariableDeclaration(decl) if decl.kind.is_lexical() => {
                decl.bound_names(&mut |identifier| names.push(identifier.name));
            }
            Statement::ClassDeclaration(decl) => {
                decl.bound_names(&mut |identifier| names.push(identifier.name));
            }
            _ => {}
        }
    }
    names
}

/// TopLevelLexicallyScopedDeclarations of a script or function body.
pub(crate) fn top_level_lexically_scoped_declarations(
    statements: &'static [Statement<'static>],
) -> Vec<LexicallyScopedDeclaration> {
    let mut declarations = Vec::new();
    for statement in statements {
        match statement {
            Statement::VariableDeclaration(decl) if decl.kind.is_lexical() => {
                for declarator in &decl.declarations {
                    declarations.push(LexicallyScopedDeclaration::Variable(declarator));
                }
            }
            Statement::ClassDeclaration(decl) => {
                declarations.push(LexicallyScopedDeclaration::Class(decl));
            }
            _ => {}
        }
    }
    declarations
}

/// ### [8.2.6 Static Semantics: VarDeclaredNames](https://tc39.es/ecma262/#sec-static-semantics-vardeclarednames)
/// at the top level of a script or function body: TopLevelVarDeclaredNames.
pub(crate) fn top_level_var_declared_names(
    statements: &'static [Statement<'static>],
) -> Vec<Atom<'static>> {
    let mut names = Vec::new();
    for declaration in top_level_var_scoped_declarations(statements) {
        match declaration {
            VarScopedDeclaration::Variable(decl) => {
                decl.id.bound_names(&mut |identifier| names.push(identifier.name));
            }
            VarScopedDeclaration::Function(decl) => {
                decl.bound_names(&mut |identifier| names.push(identifier.name));
            }
        }
    }
    names
}

/// ### [8.2.7 Static Semantics: VarScopedDeclarations](https://tc39.es/ecma262/#sec-static-semantics-varscopeddeclarations)
/// at the top level of a script or function body:
/// TopLevelVarScopedDeclarations.
pub(crate) fn top_level_var_scoped_declarations(
    statements: &'static [Statement<'static>],
) -> Vec<VarScopedDeclaration> {
    let mut declarations = Vec::new();
    for statement in statements {
        match statement {
            // At the top level of a function or script, inner function
            // declarations are treated like var declarations.
            Statement::FunctionDeclaration(decl) => {
                declarations.push(VarScopedDeclaration::Function(decl));
            }
            Statement::LabeledStatement(labeled) => {
                if let Statement::FunctionDeclaration(decl) = &labeled.body {
                    declarations.push(VarScopedDeclaration::Function(decl));
                } else {
                    statement_var_scoped_declarations(&labeled.body, &mut declarations);
                }
            }
            _ => statement_var_scoped_declarations(statement, &mut declarations),
        }
    }
    declarations
}

/// VarScopedDeclarations of a nested statement: traverses every statement
/// position that is not a function boundary.
fn statement_var_scoped_declarations(
    statement: &'static Statement<'static>,
    declarations: &mut Vec<VarScopedDeclaration>,
) {
    match statement {
        Statement::BreakStatement(_)
        | Statement::ContinueStatement(_)
        | Statement::DebuggerStatement(_)
        | Statement::EmptyStatement(_)
        | Statement::ExpressionStatement(_)
        | Statement::ReturnStatement(_)
        | Statement::ThrowStatement(_)
        | Statement::FunctionDeclaration(_)
        | Statement::ClassDeclaration(_) => {}
        Statement::VariableDeclaration(decl) => {
            // VariableStatement : var VariableDeclarationList ;
            // 1. Return the VarScopedDeclarations of VariableDeclarationList.
            if !decl.kind.is_lexical() {
                for declarator in &decl.declarations {
                    declarations.push(VarScopedDeclaration::Variable(declarator));
                }
            }
        }
        Statement::BlockStatement(block) => {
            for statement in &block.body {
                statement_var_scoped_declarations(statement, declarations);
            }
        }
        Statement::IfStatement(statement) => {
            statement_var_scoped_declarations(&statement.consequent, declarations);
            if let Some(alternate) = &statement.alternate {
                statement_var_scoped_declarations(alternate, declarations);
            }
        }
        Statement::DoWhileStatement(statement) => {
            statement_var_scoped_declarations(&statement.body, declarations);
        }
        Statement::WhileStatement(statement) => {
            statement_var_scoped_declarations(&statement.body, declarations);
        }
        Statement::ForStatement(statement) => {
            if let Some(oxc_ast::ast::ForStatementInit::VariableDeclaration(decl)) =
                &statement.init
            {
                if !decl.kind.is_lexical() {
                    for declarator in &decl.declarations {
                        declarations.push(VarScopedDeclaration::Variable(declarator));
                    }
                }
            }
            statement_var_scoped_declarations(&statement.body, declarations);
        }
        Statement::ForInStatement(statement) => {
            if let oxc_ast::ast::ForStatementLeft::VariableDeclaration(decl) = &statement.left {
                if !decl.kind.is_lexical() {
                    for declarator in &decl.declarations {
                        declarations.push(VarScopedDeclaration::Variable(declarator));
                    }
                }
            }
            statement_var_scoped_declarations(&statement.body, declarations);
        }
        Statement::ForOfStatement(statement) => {
            if let oxc_ast::ast::ForStatementLeft::VariableDeclaration(decl) = &statement.left {
                if !decl.kind.is_lexical() {
                    for declarator in &decl.declarations {
                        declarations.push(VarScopedDeclaration::Variable(declarator));
                    }
                }
            }
            statement_var_scoped_declarations(&statement.body, declarations);
        }
        Statement::WithStatement(statement) => {
            statement_var_scoped_declarations(&statement.body, declarations);
        }
        Statement::SwitchStatement(statement) => {
            for case in &statement.cases {
                case_var_scoped_declarations(case, declarations);
            }
        }
        Statement::LabeledStatement(statement) => {
            if !matches!(statement.body, Statement::FunctionDeclaration(_)) {
                statement_var_scoped_declarations(&statement.body, declarations);
            }
        }
        Statement::TryStatement(statement) => {
            for inner in &statement.block.body {
                statement_var_scoped_declarations(inner, declarations);
            }
            if let Some(handler) = &statement.handler {
                for inner in &handler.body.body {
                    statement_var_scoped_declarations(inner, declarations);
                }
            }
            if let Some(finalizer) = &statement.finalizer {
                for inner in &finalizer.body {
                    statement_var_scoped_declarations(inner, declarations);
                }
            }
        }
        _ => {}
    }
}

fn case_var_scoped_declarations(
    case: &'static SwitchCase<'static>,
    declarations: &mut Vec<VarScopedDeclaration>,
) {
    for statement in &case.consequent {
        statement_var_scoped_declarations(statement, declarations);
    }
}

/// LexicallyScopedDeclarations of a switch statement's case block.
pub(crate) fn case_block_lexically_scoped_declarations(
    cases: &'static [SwitchCase<'static>],
) -> Vec<LexicallyScopedDeclaration> {
    let mut declarations = Vec::new();
    for case in cases {
        for statement in &case.consequent {
            statement_lexically_scoped_declarations(statement, &mut declarations);
        }
    }
    declarations
}
