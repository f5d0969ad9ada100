use std::{
    error::Error,
    io,
    path::Path,
    process::{Command, Output},
    str,
};

const UNILOG_PATH: &str = "./target/debug/unilog";

fn run_unilog(src_path: &Path) -> Result<Output, io::Error> {
    Command::new(UNILOG_PATH).arg(src_path).output()
}

/// Run the built `unilog` binary against `src_path` and assert it exits successfully, i.e. every
/// file it checked was free of lex/parse/execution errors (`SPEC_FULL.md` §6 exit codes).
pub fn check_success(src_path: &Path) -> Result<(), Box<dyn Error>> {
    let output = run_unilog(src_path)?;
    let stderr = str::from_utf8(&output.stderr)?;

    assert!(
        output.status.success(),
        "unilog exited with status {:?}, stderr:\n{stderr}",
        output.status.code()
    );

    Ok(())
}

/// Run the built `unilog` binary against `src_path` and assert it fails, with a single stderr
/// diagnostic line containing `expected_phrase` (`SPEC_FULL.md` §7 user-visible behavior).
pub fn check_failure(src_path: &Path, expected_phrase: &str) -> Result<(), Box<dyn Error>> {
    let output = run_unilog(src_path)?;
    let stderr = str::from_utf8(&output.stderr)?;

    assert!(
        !output.status.success(),
        "unilog unexpectedly succeeded on {}",
        src_path.display()
    );
    assert!(
        stderr.contains(expected_phrase),
        "expected stderr to contain '{expected_phrase}', got:\n{stderr}"
    );

    Ok(())
}
