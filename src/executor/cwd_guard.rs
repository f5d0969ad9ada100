//! RAII wrapper around the process-global current working directory, per the discipline
//! `SPEC_FULL.md` §4.4/§9 calls for: CWD is saved once on entry and restored unconditionally on
//! every exit path, including error propagation, via `Drop`.

use std::env;
use std::path::{Path, PathBuf};

use crate::error::{ErrorKind, UnilogError, UnilogResult};

pub struct CwdGuard {
    previous: PathBuf,
}

impl CwdGuard {
    /// Save the current directory, then change into `target`.
    pub fn enter(target: &Path) -> UnilogResult<Self> {
        let previous =
            env::current_dir().map_err(|_| UnilogError::new(ErrorKind::FileOpenFailed))?;
        env::set_current_dir(target)
            .map_err(|_| UnilogError::new(ErrorKind::FileOpenFailed))?;
        Ok(Self { previous })
    }
}

impl Drop for CwdGuard {
    fn drop(&mut self) {
        // best-effort: if the previous directory vanished underneath us there is nothing more
        // useful to do than log and move on, since Drop cannot propagate a Result.
        if env::set_current_dir(&self.previous).is_err() {
            log::error!(
                "failed to restore working directory to {}",
                self.previous.display()
            );
        }
    }
}
