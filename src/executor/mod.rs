//! # Executor
//!
//! Walks a sequence of statements against a module-path stack and drives side effects on the
//! injected [`FactStore`]/[`Prover`] collaborators. Grounded on
//! `original_source/src/executor.cpp`'s `execute()` overloads (exact per-statement semantics,
//! CWD save/set/restore sequencing, frame-per-call discipline) and on the donor's
//! `load_modules` recursive-DFS shape (`src/loader/mod.rs`) for the cycle-detection addition
//! documented in `DESIGN.md`.

mod cwd_guard;

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::error::{ErrorKind, UnilogError, UnilogResult};
use crate::fact_store::FactStore;
use crate::lexer::Lexer;
use crate::prover::Prover;
use crate::statement_parser::{self, Axiom, Guide, Infer, Refer, Statement};
use crate::term::{TermArena, TermHandle};

pub use cwd_guard::CwdGuard;

/// The list-of-tags module path from `SPEC_FULL.md` §3, plus the parallel bookkeeping needed to
/// detect `refer` cycles: the canonicalized absolute path of every file currently on the active
/// `refer` chain.
pub struct Executor {
    arena: TermArena,
    fact_store: Box<dyn FactStore>,
    prover: Box<dyn Prover>,
    active_files: Vec<PathBuf>,
}

impl Executor {
    pub fn new(fact_store: Box<dyn FactStore>, prover: Box<dyn Prover>) -> Self {
        Self {
            arena: TermArena::new(),
            fact_store,
            prover,
            active_files: Vec::new(),
        }
    }

    pub fn arena(&self) -> &TermArena {
        &self.arena
    }

    pub fn fact_store(&self) -> &dyn FactStore {
        self.fact_store.as_ref()
    }

    /// Entry point: run the top-level CLI surface from `SPEC_FULL.md` §6 for one file, with the
    /// root tag `"root"` and an empty initial module path.
    pub fn execute_root_file(&mut self, path: &Path) -> UnilogResult<()> {
        let frame = self.arena.open_frame();
        let tag = self.arena.atom("root");
        let path_text = path.to_string_lossy().to_string();
        let file_path = self.arena.atom(path_text);
        let module_path = self.arena.nil();

        let result = self.execute_refer(Refer { tag, file_path }, module_path);

        self.arena.close_frame();
        let _ = frame;
        result
    }

    fn execute_statement(&mut self, statement: Statement, module_path: TermHandle) -> UnilogResult<()> {
        match statement {
            Statement::Axiom(axiom) => self.execute_axiom(axiom, module_path),
            Statement::Guide(guide) => self.execute_guide(guide, module_path),
            Statement::Infer(infer) => self.execute_infer(infer, module_path),
            Statement::Refer(refer) => self.execute_refer(refer, module_path),
        }
    }

    fn execute_axiom(&mut self, axiom: Axiom, module_path: TermHandle) -> UnilogResult<()> {
        let ok = self
            .fact_store
            .decl_theorem(&self.arena, module_path, axiom.tag, axiom.theorem);

        if !ok {
            return Err(UnilogError::new(ErrorKind::DeclTheoremFailed));
        }
        Ok(())
    }

    fn execute_guide(&mut self, guide: Guide, module_path: TermHandle) -> UnilogResult<()> {
        // Matches `execute(guide_statement, term_t) { return true; }` in the original: recorded
        // but not yet prover-integrated (`SPEC_FULL.md` §4.4, §9).
        let ok = self
            .fact_store
            .decl_redir(&self.arena, module_path, guide.tag, guide.args, guide.guide);

        if !ok {
            return Err(UnilogError::new(ErrorKind::DeclRedirFailed));
        }
        Ok(())
    }

    fn execute_infer(&mut self, infer: Infer, module_path: TermHandle) -> UnilogResult<()> {
        let proved = self
            .prover
            .prove(&self.arena, module_path, infer.theorem, infer.guide);
        let result = if proved {
            self.fact_store
                .decl_theorem(&self.arena, module_path, infer.tag, infer.theorem)
        } else {
            false
        };

        if !result {
            return Err(UnilogError::new(ErrorKind::InferenceFailed));
        }
        Ok(())
    }

    fn execute_refer(&mut self, refer: Refer, module_path: TermHandle) -> UnilogResult<()> {
        let frame = self.arena.open_frame();

        let Some(file_path_text) = self.arena.as_atom_text(refer.file_path).map(str::to_owned)
        else {
            self.arena.close_frame();
            return Err(UnilogError::new(ErrorKind::NotAFile));
        };

        let file_path = PathBuf::from(&file_path_text);
        let canonical = match fs::canonicalize(&file_path) {
            Ok(canonical) => canonical,
            Err(_) => {
                self.arena.close_frame();
                return Err(
                    UnilogError::new(ErrorKind::FileOpenFailed).with_detail(file_path_text.clone())
                );
            }
        };

        if self.active_files.contains(&canonical) {
            self.arena.close_frame();
            return Err(
                UnilogError::new(ErrorKind::ReferCycle).with_detail(file_path_text.clone())
            );
        }

        let source = match fs::read_to_string(&canonical) {
            Ok(source) => source,
            Err(_) => {
                self.arena.close_frame();
                return Err(
                    UnilogError::new(ErrorKind::FileOpenFailed).with_detail(file_path_text.clone())
                );
            }
        };

        let new_module_path = self.arena.cons(refer.tag, module_path);

        let parent = canonical
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        info!("referring file {}", canonical.display());
        self.active_files.push(canonical.clone());

        let cwd_guard = match CwdGuard::enter(&parent) {
            Ok(guard) => guard,
            Err(err) => {
                self.active_files.pop();
                self.arena.close_frame();
                return Err(err);
            }
        };

        let result = self.execute_all_statements(&source, new_module_path, &canonical);

        drop(cwd_guard);
        self.active_files.pop();
        self.arena.close_frame();

        result
    }

    fn execute_all_statements(
        &mut self,
        source: &str,
        module_path: TermHandle,
        file: &Path,
    ) -> UnilogResult<()> {
        let mut lexer = Lexer::new(source);

        loop {
            let statement = statement_parser::next_statement(&mut lexer, &mut self.arena)
                .map_err(|err| err.with_file(file.to_string_lossy().to_string()))?;
            let Some(statement) = statement else {
                break;
            };
            debug!("executing statement in {}", file.display());
            self.execute_statement(statement, module_path)
                .map_err(|err| err.with_file(file.to_string_lossy().to_string()))?;
        }

        Ok(())
    }
}
