//! # Term parser
//!
//! Reads one logical term at a time from a [`Lexer`] under a shared [`Scope`], following
//! `original_source/src/parser.cpp`'s `extract_term_t()` (list-termination-flag mechanism,
//! tail-first cons build, `_` exemption). Expressed as free functions over explicit state rather
//! than methods on a long-lived struct, matching the donor's `loader`/`typechecker` free-function
//! style (e.g. `extract_imports`, `convert_to_path`) for this kind of recursive-descent work.

use std::collections::HashMap;

use log::trace;

use crate::error::{ErrorKind, UnilogError, UnilogResult};
use crate::lexer::{Lexer, TokenKind};
use crate::term::{TermArena, TermHandle};

/// Per-statement mapping from variable identifier to the term handle it denotes. Created empty
/// at each statement boundary (`SPEC_FULL.md` §3) and discarded afterwards; `_` is deliberately
/// never inserted here.
#[derive(Debug, Default)]
pub struct Scope {
    variables: HashMap<String, TermHandle>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve an occurrence of `identifier` to a term handle, allocating and registering a
    /// fresh variable on first occurrence. `_` always allocates a fresh, unregistered variable.
    fn resolve(&mut self, identifier: &str, arena: &mut TermArena) -> TermHandle {
        if identifier == "_" {
            return arena.fresh_variable();
        }
        if let Some(existing) = self.variables.get(identifier) {
            return *existing;
        }
        let fresh = arena.fresh_variable();
        self.variables.insert(identifier.to_owned(), fresh);
        fresh
    }
}

/// Parse exactly one term from `lexer`, threading `scope` so repeated identifiers within the
/// enclosing statement share a slot. `inside_list` gates whether `ListClose`/`ListSeparator` are
/// legal list terminators (`true`) or parse errors (`false`, the top-level case).
pub fn parse_term(
    lexer: &mut Lexer,
    arena: &mut TermArena,
    scope: &mut Scope,
) -> UnilogResult<TermHandle> {
    parse_term_inner(lexer, arena, scope, false)
}

fn parse_term_inner(
    lexer: &mut Lexer,
    arena: &mut TermArena,
    scope: &mut Scope,
    inside_list: bool,
) -> UnilogResult<TermHandle> {
    let Some(token) = lexer.next_token()? else {
        return Err(UnilogError::new(ErrorKind::MalformedTerm));
    };

    match token.kind {
        TokenKind::Atom { text } => {
            trace!("parsed atom term '{text}'");
            Ok(arena.atom(text))
        }
        TokenKind::Variable { identifier } => Ok(scope.resolve(&identifier, arena)),
        TokenKind::ListOpen => parse_list(lexer, arena, scope),
        TokenKind::ListClose if inside_list => {
            Err(UnilogError::new(ErrorKind::UnexpectedListClose).with_position(token.position))
        }
        TokenKind::ListSeparator if inside_list => Err(
            UnilogError::new(ErrorKind::UnexpectedListSeparator).with_position(token.position)
        ),
        _ => Err(UnilogError::new(ErrorKind::MalformedTerm).with_position(token.position)),
    }
}

/// List sub-parser entered right after consuming `ListOpen`. Collects elements into a buffer
/// while a "list-termination" flag is enabled for the sub-parses, then folds the buffer
/// tail-first into a right-nested cons chain.
fn parse_list(
    lexer: &mut Lexer,
    arena: &mut TermArena,
    scope: &mut Scope,
) -> UnilogResult<TermHandle> {
    let mut elements = Vec::new();

    loop {
        let Some(token) = lexer.next_token()? else {
            return Err(UnilogError::new(ErrorKind::MalformedTerm));
        };

        match token.kind {
            TokenKind::ListClose => {
                let nil = arena.nil();
                return Ok(fold_cons(arena, elements, nil));
            }
            TokenKind::ListSeparator => {
                let tail = parse_term_inner(lexer, arena, scope, true)?;
                require_list_close(lexer)?;
                return Ok(fold_cons(arena, elements, tail));
            }
            TokenKind::Atom { text } => elements.push(arena.atom(text)),
            TokenKind::Variable { identifier } => elements.push(scope.resolve(&identifier, arena)),
            TokenKind::ListOpen => elements.push(parse_list(lexer, arena, scope)?),
            TokenKind::Eol => {
                return Err(
                    UnilogError::new(ErrorKind::MalformedTerm).with_position(token.position)
                )
            }
        }
    }
}

fn require_list_close(lexer: &mut Lexer) -> UnilogResult<()> {
    match lexer.next_token()? {
        Some(token) if token.kind == TokenKind::ListClose => Ok(()),
        Some(token) => {
            Err(UnilogError::new(ErrorKind::MalformedTerm).with_position(token.position))
        }
        None => Err(UnilogError::new(ErrorKind::MalformedTerm)),
    }
}

fn fold_cons(arena: &mut TermArena, elements: Vec<TermHandle>, tail: TermHandle) -> TermHandle {
    elements
        .into_iter()
        .rev()
        .fold(tail, |acc, element| arena.cons(element, acc))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> (TermArena, TermHandle) {
        let mut arena = TermArena::new();
        let mut lexer = Lexer::new(input);
        let mut scope = Scope::new();
        let handle = parse_term(&mut lexer, &mut arena, &mut scope).unwrap();
        (arena, handle)
    }

    #[test]
    fn empty_list_is_nil() {
        let (arena, handle) = parse("[]");
        assert!(arena.is_nil(handle));
    }

    #[test]
    fn single_element_list() {
        let (arena, handle) = parse("[a]");
        assert_eq!(arena.render(handle), "[a]");
    }

    #[test]
    fn cons_tail_syntax_keeps_variable_as_tail() {
        let (arena, handle) = parse("[a b | T]");
        let (head, tail) = arena.as_cons(handle).unwrap();
        assert_eq!(arena.as_atom_text(head), Some("a"));
        let (head2, tail2) = arena.as_cons(tail).unwrap();
        assert_eq!(arena.as_atom_text(head2), Some("b"));
        assert!(arena.is_variable(tail2));
    }

    #[test]
    fn multiple_terms_after_separator_is_an_error() {
        let mut arena = TermArena::new();
        let mut lexer = Lexer::new("[a b | c d]");
        let mut scope = Scope::new();
        let err = parse_term(&mut lexer, &mut arena, &mut scope).unwrap_err();
        assert_eq!(err.kind, ErrorKind::MalformedTerm);
    }

    #[test]
    fn variable_sharing_within_one_term() {
        let mut arena = TermArena::new();
        let mut lexer = Lexer::new("[X X Y]");
        let mut scope = Scope::new();
        let handle = parse_term(&mut lexer, &mut arena, &mut scope).unwrap();

        let (first, rest) = arena.as_cons(handle).unwrap();
        let (second, rest) = arena.as_cons(rest).unwrap();
        let (third, _) = arena.as_cons(rest).unwrap();

        assert!(arena.is_variable(first));
        assert!(arena.is_variable(second));
        assert!(arena.is_variable(third));

        // first and second came from the same scope entry, so binding one resolves the other
        let marker = arena.atom("marker");
        assert!(arena.unify(first, marker));
        assert_eq!(arena.as_atom_text(second), Some("marker"));
        assert!(arena.is_variable(third));
    }

    #[test]
    fn underscore_is_never_shared() {
        let mut arena = TermArena::new();
        let mut lexer = Lexer::new("[_ _]");
        let mut scope = Scope::new();
        let handle = parse_term(&mut lexer, &mut arena, &mut scope).unwrap();

        let (first, rest) = arena.as_cons(handle).unwrap();
        let (second, _) = arena.as_cons(rest).unwrap();

        let marker = arena.atom("marker");
        assert!(arena.unify(first, marker));
        assert!(arena.is_variable(second));
    }

    #[test]
    fn bare_list_close_at_top_level_is_malformed() {
        let mut arena = TermArena::new();
        let mut lexer = Lexer::new("]");
        let mut scope = Scope::new();
        let err = parse_term(&mut lexer, &mut arena, &mut scope).unwrap_err();
        assert_eq!(err.kind, ErrorKind::MalformedTerm);
    }
}
