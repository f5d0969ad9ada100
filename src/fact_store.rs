//! # Fact store
//!
//! The external collaborator from `SPEC_FULL.md` §3/§6: a mapping `(module-path, tag) ->
//! {theorem | guide-body}` that the executor mutates through `decl_theorem`/`decl_redir` and
//! queries through `prove`. Modeled as a trait so the executor can be constructed with a fake in
//! tests, following the donor's injected-collaborator pattern rather than a global singleton
//! (`src/loader/mod.rs` threads `Modules<T>` through as an explicit argument rather than reaching
//! for global state).

use std::collections::HashMap;

use crate::term::TermArena;
use crate::term::TermHandle;

#[derive(Debug, Clone)]
pub struct DeclaredTheorem {
    pub module_path_text: String,
    pub tag_text: String,
    pub theorem_text: String,
}

/// Consumed interface from `SPEC_FULL.md` §6. Duplicate declarations at the same
/// `(module_path, tag)` key are rejected by the store, not the executor.
pub trait FactStore {
    fn decl_theorem(
        &mut self,
        arena: &TermArena,
        module_path: TermHandle,
        tag: TermHandle,
        theorem: TermHandle,
    ) -> bool;

    fn decl_redir(
        &mut self,
        arena: &TermArena,
        module_path: TermHandle,
        tag: TermHandle,
        args: TermHandle,
        guide: TermHandle,
    ) -> bool;

    /// Not part of the external interface proper, but needed by the executor's `Infer` path and
    /// by tests asserting the executor properties from `SPEC_FULL.md` §8.
    fn query_theorem(&self, module_path_text: &str, tag_text: &str) -> Option<&DeclaredTheorem>;
}

/// Default in-process implementation. Keys are canonicalized to the term's printed s-expression
/// form (`TermArena::render`) since `TermHandle`s from different frames are not comparable as
/// stable keys and the terms here are always ground by the time they reach the store.
#[derive(Debug, Default)]
pub struct InMemoryFactStore {
    theorems: HashMap<(String, String), DeclaredTheorem>,
    redirs: HashMap<(String, String), (String, String)>,
}

impl FactStore for InMemoryFactStore {
    fn decl_theorem(
        &mut self,
        arena: &TermArena,
        module_path: TermHandle,
        tag: TermHandle,
        theorem: TermHandle,
    ) -> bool {
        let key = (arena.render(module_path), arena.render(tag));
        if self.theorems.contains_key(&key) {
            return false;
        }
        self.theorems.insert(
            key.clone(),
            DeclaredTheorem {
                module_path_text: key.0,
                tag_text: key.1,
                theorem_text: arena.render(theorem),
            },
        );
        true
    }

    fn decl_redir(
        &mut self,
        arena: &TermArena,
        module_path: TermHandle,
        tag: TermHandle,
        args: TermHandle,
        guide: TermHandle,
    ) -> bool {
        let key = (arena.render(module_path), arena.render(tag));
        if self.redirs.contains_key(&key) {
            return false;
        }
        self.redirs
            .insert(key, (arena.render(args), arena.render(guide)));
        true
    }

    fn query_theorem(&self, module_path_text: &str, tag_text: &str) -> Option<&DeclaredTheorem> {
        self.theorems
            .get(&(module_path_text.to_owned(), tag_text.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_duplicate_theorem_declarations() {
        let mut arena = TermArena::new();
        let module_path = arena.nil();
        let tag = arena.atom("a0");
        let theorem = arena.atom("x");

        let mut store = InMemoryFactStore::default();
        assert!(store.decl_theorem(&arena, module_path, tag, theorem));
        assert!(!store.decl_theorem(&arena, module_path, tag, theorem));
    }

    #[test]
    fn query_after_declare_round_trips() {
        let mut arena = TermArena::new();
        let module_path = arena.nil();
        let tag = arena.atom("a0");
        let theorem = arena.atom("x");

        let mut store = InMemoryFactStore::default();
        store.decl_theorem(&arena, module_path, tag, theorem);

        let found = store
            .query_theorem(&arena.render(module_path), &arena.render(tag))
            .unwrap();
        assert_eq!(found.theorem_text, "x");
    }
}
