//! # Statement parser
//!
//! Parses one statement per invocation: a leading command atom, its fixed-arity term arguments,
//! and a terminating `;`. Grounded on `original_source/src/parser.cpp`'s `extract_statement()`
//! (command dispatch table and arities) and the `operator>>(istream&, statement&)` entry point
//! (fresh [`Scope`] per statement, atomic-parse discipline: any sub-failure leaves the statement
//! unparsed and the caller stops the file).

use log::debug;

use crate::error::{ErrorKind, UnilogError, UnilogResult};
use crate::lexer::{Lexer, TokenKind};
use crate::term::TermHandle;
use crate::term::TermArena;
use crate::term_parser::{parse_term, Scope};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Axiom {
    pub tag: TermHandle,
    pub theorem: TermHandle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Guide {
    pub tag: TermHandle,
    pub args: TermHandle,
    pub guide: TermHandle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Infer {
    pub tag: TermHandle,
    pub theorem: TermHandle,
    pub guide: TermHandle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Refer {
    pub tag: TermHandle,
    pub file_path: TermHandle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Statement {
    Axiom(Axiom),
    Guide(Guide),
    Infer(Infer),
    Refer(Refer),
}

/// Parse exactly one statement from `lexer`, or `Ok(None)` at clean end-of-file.
pub fn next_statement(lexer: &mut Lexer, arena: &mut TermArena) -> UnilogResult<Option<Statement>> {
    let Some(command_token) = lexer.next_token()? else {
        return Ok(None);
    };

    let TokenKind::Atom { text: command } = command_token.kind else {
        return Err(
            UnilogError::new(ErrorKind::InvalidCommand).with_position(command_token.position)
        );
    };

    let mut scope = Scope::new();
    debug!("parsing '{command}' statement");

    let statement = match command.as_str() {
        "axiom" => {
            let tag = parse_term(lexer, arena, &mut scope)?;
            let theorem = parse_term(lexer, arena, &mut scope)?;
            Statement::Axiom(Axiom { tag, theorem })
        }
        "guide" => {
            let tag = parse_term(lexer, arena, &mut scope)?;
            let args = parse_term(lexer, arena, &mut scope)?;
            let guide = parse_term(lexer, arena, &mut scope)?;
            Statement::Guide(Guide { tag, args, guide })
        }
        "infer" => {
            let tag = parse_term(lexer, arena, &mut scope)?;
            let theorem = parse_term(lexer, arena, &mut scope)?;
            let guide = parse_term(lexer, arena, &mut scope)?;
            Statement::Infer(Infer { tag, theorem, guide })
        }
        "refer" => {
            let tag = parse_term(lexer, arena, &mut scope)?;
            let file_path = parse_term(lexer, arena, &mut scope)?;
            Statement::Refer(Refer { tag, file_path })
        }
        _ => {
            return Err(
                UnilogError::new(ErrorKind::InvalidCommand).with_position(command_token.position)
            )
        }
    };

    require_eol(lexer)?;

    Ok(Some(statement))
}

fn require_eol(lexer: &mut Lexer) -> UnilogResult<()> {
    match lexer.next_token()? {
        Some(token) if token.kind == TokenKind::Eol => Ok(()),
        Some(token) => Err(UnilogError::new(ErrorKind::NoEol).with_position(token.position)),
        None => Err(UnilogError::new(ErrorKind::NoEol)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_axiom_statement() {
        let mut arena = TermArena::new();
        let mut lexer = Lexer::new("axiom a0 x ;");
        let statement = next_statement(&mut lexer, &mut arena).unwrap().unwrap();
        let Statement::Axiom(Axiom { tag, theorem }) = statement else {
            panic!("expected axiom");
        };
        assert_eq!(arena.as_atom_text(tag), Some("a0"));
        assert_eq!(arena.as_atom_text(theorem), Some("x"));
    }

    #[test]
    fn parses_refer_statement() {
        let mut arena = TermArena::new();
        let mut lexer = Lexer::new("refer m1 'm1.ul' ;");
        let statement = next_statement(&mut lexer, &mut arena).unwrap().unwrap();
        let Statement::Refer(Refer { tag, file_path }) = statement else {
            panic!("expected refer");
        };
        assert_eq!(arena.as_atom_text(tag), Some("m1"));
        assert_eq!(arena.as_atom_text(file_path), Some("m1.ul"));
    }

    #[test]
    fn unknown_command_fails() {
        let mut arena = TermArena::new();
        let mut lexer = Lexer::new("bogus a b ;");
        let err = next_statement(&mut lexer, &mut arena).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidCommand);
    }

    #[test]
    fn missing_eol_fails() {
        let mut arena = TermArena::new();
        let mut lexer = Lexer::new("axiom a0 x");
        let err = next_statement(&mut lexer, &mut arena).unwrap_err();
        assert_eq!(err.kind, ErrorKind::NoEol);
    }

    #[test]
    fn extra_token_before_eol_fails_as_no_eol() {
        let mut arena = TermArena::new();
        let mut lexer = Lexer::new("axiom a0 x y ;");
        let err = next_statement(&mut lexer, &mut arena).unwrap_err();
        assert_eq!(err.kind, ErrorKind::NoEol);
    }

    #[test]
    fn clean_eof_yields_none() {
        let mut arena = TermArena::new();
        let mut lexer = Lexer::new("   ");
        assert!(next_statement(&mut lexer, &mut arena).unwrap().is_none());
    }

    #[test]
    fn scope_is_fresh_per_statement() {
        let mut arena = TermArena::new();
        let mut lexer = Lexer::new("axiom a X ; axiom b X ;");

        let Statement::Axiom(Axiom { theorem: x1, .. }) =
            next_statement(&mut lexer, &mut arena).unwrap().unwrap()
        else {
            panic!("expected axiom");
        };
        let Statement::Axiom(Axiom { theorem: x2, .. }) =
            next_statement(&mut lexer, &mut arena).unwrap().unwrap()
        else {
            panic!("expected axiom");
        };

        // binding the variable from the first statement must not affect the second
        let marker = arena.atom("marker");
        assert!(arena.unify(x1, marker));
        assert!(arena.is_variable(x2));
    }
}
