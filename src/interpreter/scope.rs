//! Lexical scope stack: module → function → nested function.
//!
//! Reads search from the innermost scope outward; writes always land in
//! the innermost scope. A scope that ends is popped and discarded — per
//! spec invariant 4, a binding introduced in a nested scope never leaks
//! upward.

use std::collections::HashMap;

use crate::lattice::Csf;
use crate::source::span::Span;

pub struct Binding {
    pub fact: Csf,
    pub defined_at: Span,
}

pub struct ScopeStack {
    scopes: Vec<HashMap<String, Binding>>,
}

impl ScopeStack {
    pub fn new() -> Self {
        Self {
            scopes: vec![HashMap::new()],
        }
    }

    pub fn push(&mut self) {
        self.scopes.push(HashMap::new());
    }

    pub fn pop(&mut self) {
        self.scopes.pop();
        debug_assert!(!self.scopes.is_empty(), "module scope must never be popped");
    }

    /// Bind `name` to `fact` in the innermost scope.
    pub fn bind(&mut self, name: &str, fact: Csf, defined_at: Span) {
        let top = self.scopes.last_mut().expect("at least module scope");
        top.insert(name.to_string(), Binding { fact, defined_at });
    }

    /// Look up `name`, searching from innermost to outermost scope.
    pub fn lookup(&self, name: &str) -> Option<&Csf> {
        for scope in self.scopes.iter().rev() {
            if let Some(b) = scope.get(name) {
                return Some(&b.fact);
            }
        }
        None
    }
}

impl Default for ScopeStack {
    fn default() -> Self {
        Self::new()
    }
}
