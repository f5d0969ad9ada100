//! # Prover
//!
//! The proof-search external collaborator (`SPEC_FULL.md` §1/§6, out of scope here). The shipped
//! [`NoopProver`] always succeeds without discharging anything, matching
//! `original_source/src/executor.cpp`'s `execute(infer_statement, term_t) { return true; }`
//! byte-for-byte — this front-end only needs the call site wired correctly so a real prover is a
//! drop-in trait implementation later.

use crate::term::TermArena;
use crate::term::TermHandle;

pub trait Prover {
    fn prove(
        &mut self,
        arena: &TermArena,
        module_path: TermHandle,
        theorem: TermHandle,
        guide: TermHandle,
    ) -> bool;
}

#[derive(Debug, Default)]
pub struct NoopProver;

impl Prover for NoopProver {
    fn prove(
        &mut self,
        _arena: &TermArena,
        _module_path: TermHandle,
        _theorem: TermHandle,
        _guide: TermHandle,
    ) -> bool {
        true
    }
}
