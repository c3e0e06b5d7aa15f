//! Built-in module passes.
//!
//! - `remove-debugger`: drops `debugger;` statements
//! - `strip-console`: drops expression statements calling `console.*(..)`

use swc_ecma_ast::{Callee, EmptyStmt, Expr, ExprStmt, MemberExpr, ModuleItem, Stmt};
use swc_ecma_visit::{VisitMut, VisitMutWith};

/// Removes statements matched by a predicate.
///
/// Statements in a list are removed outright. A matched statement that is
/// the sole body of a control construct becomes an empty statement.
pub struct StatementRemover {
    matches: fn(&Stmt) -> bool,
}

impl StatementRemover {
    pub fn new(matches: fn(&Stmt) -> bool) -> Self {
        Self { matches }
    }

    pub fn debugger() -> Self {
        Self::new(is_debugger)
    }

    pub fn console() -> Self {
        Self::new(is_console_call)
    }
}

impl VisitMut for StatementRemover {
    fn visit_mut_module_items(&mut self, items: &mut Vec<ModuleItem>) {
        items.retain(|item| !matches!(item, ModuleItem::Stmt(stmt) if (self.matches)(stmt)));
        items.visit_mut_children_with(self);
    }

    fn visit_mut_stmts(&mut self, stmts: &mut Vec<Stmt>) {
        stmts.retain(|stmt| !(self.matches)(stmt));
        stmts.visit_mut_children_with(self);
    }

    fn visit_mut_stmt(&mut self, stmt: &mut Stmt) {
        stmt.visit_mut_children_with(self);
        if (self.matches)(stmt) {
            *stmt = Stmt::Empty(EmptyStmt {
                span: Default::default(),
            });
        }
    }
}

fn is_debugger(stmt: &Stmt) -> bool {
    matches!(stmt, Stmt::Debugger(_))
}

fn is_console_call(stmt: &Stmt) -> bool {
    let Stmt::Expr(ExprStmt { expr, .. }) = stmt else {
        return false;
    };
    let Expr::Call(call) = &**expr else {
        return false;
    };
    let Callee::Expr(callee) = &call.callee else {
        return false;
    };
    match &**callee {
        Expr::Member(MemberExpr { obj, .. }) => {
            matches!(&**obj, Expr::Ident(ident) if &*ident.sym == "console")
        }
        _ => false,
    }
}
