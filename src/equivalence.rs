//! # Formal equivalence
//!
//! Term equality modulo consistent variable renaming, preserving the sharing pattern of
//! variables (`SPEC_FULL.md` §4.5). Transcribed from `original_source/src/parser.cpp`'s
//! `equal_forms()`: variables encountered in lock-step are destructively bound to a freshly
//! generated atom guaranteed not to collide with any real atom in the inputs, so that a second
//! encounter of the same variable on either side must equal the same label, revealing mismatched
//! sharing as a later atom/atom inequality.

use crate::term::{TermArena, TermHandle};

/// A fixed, deliberately unusual prefix combined with a monotonic counter. 50+ characters long,
/// as the specification requires, and not something a real `.ul` source file would ever spell
/// out as an atom.
fn fresh_label(counter: usize) -> String {
    format!("##unilog_formal_equivalence_fresh_marker_{counter:032}##")
}

/// Compare `a` and `b` for formal equivalence. Runs inside its own disposable frame so the
/// destructive variable bindings it makes are invisible to the caller once it returns.
pub fn equal_forms(arena: &mut TermArena, a: TermHandle, b: TermHandle) -> bool {
    let frame = arena.open_frame();
    let mut bound_variables = Vec::new();
    let mut counter = 0usize;

    let result = equal_forms_inner(arena, a, b, &mut counter, &mut bound_variables);

    for handle in bound_variables {
        arena.unbind(handle);
    }
    arena.close_frame();

    result
}

fn equal_forms_inner(
    arena: &mut TermArena,
    a: TermHandle,
    b: TermHandle,
    counter: &mut usize,
    bound_variables: &mut Vec<TermHandle>,
) -> bool {
    let a_is_var = arena.is_variable(a);
    let b_is_var = arena.is_variable(b);

    if a_is_var && b_is_var {
        *counter += 1;
        let label = arena.atom(fresh_label(*counter));
        let bound_a = arena.bind_unbound(a, label);
        let bound_b = arena.bind_unbound(b, label);
        bound_variables.push(bound_a);
        bound_variables.push(bound_b);
        return true;
    }
    if a_is_var || b_is_var {
        return false;
    }

    if arena.is_nil(a) && arena.is_nil(b) {
        return true;
    }
    if arena.is_nil(a) || arena.is_nil(b) {
        return false;
    }

    match (arena.as_atom_text(a), arena.as_atom_text(b)) {
        (Some(x), Some(y)) => return x == y,
        (Some(_), None) | (None, Some(_)) => return false,
        (None, None) => {}
    }

    match (arena.as_cons(a), arena.as_cons(b)) {
        (Some((h1, t1)), Some((h2, t2))) => {
            equal_forms_inner(arena, h1, h2, counter, bound_variables)
                && equal_forms_inner(arena, t1, t2, counter, bound_variables)
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;
    use crate::term_parser::{parse_term, Scope};

    fn parse(arena: &mut TermArena, input: &str) -> TermHandle {
        let mut lexer = Lexer::new(input);
        let mut scope = Scope::new();
        parse_term(&mut lexer, arena, &mut scope).unwrap()
    }

    #[test]
    fn same_sharing_pattern_is_equivalent() {
        let mut arena = TermArena::new();
        let a = parse(&mut arena, "[X X Y]");
        let b = parse(&mut arena, "[A A B]");
        assert!(equal_forms(&mut arena, a, b));
    }

    #[test]
    fn different_sharing_pattern_is_not_equivalent() {
        let mut arena = TermArena::new();
        let a = parse(&mut arena, "[X X Y]");
        let b = parse(&mut arena, "[A A A]");
        assert!(!equal_forms(&mut arena, a, b));
    }

    #[test]
    fn atoms_are_not_variables() {
        let mut arena = TermArena::new();
        let a = parse(&mut arena, "[a a a]");
        let b = parse(&mut arena, "[A A A]");
        assert!(!equal_forms(&mut arena, a, b));
    }

    #[test]
    fn identical_atoms_are_equivalent() {
        let mut arena = TermArena::new();
        let a = parse(&mut arena, "[a b c]");
        let b = parse(&mut arena, "[a b c]");
        assert!(equal_forms(&mut arena, a, b));
    }

    #[test]
    fn does_not_leak_bindings_across_calls() {
        let mut arena = TermArena::new();
        let a = parse(&mut arena, "X");
        let b = parse(&mut arena, "Y");
        assert!(equal_forms(&mut arena, a, b));
        assert!(arena.is_variable(a));
        assert!(arena.is_variable(b));

        // a fresh comparison against a different shape must not be biased by the earlier call:
        // a variable can never be formally equivalent to a ground atom
        let c = parse(&mut arena, "z");
        assert!(!equal_forms(&mut arena, a, c));
    }
}
