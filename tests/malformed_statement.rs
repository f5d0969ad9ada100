use std::{error::Error, path::Path};

use test_utils::check_failure;

const SRC_PATH: &str = "./demos/malformed_statement/f.ul";

#[test]
fn rejects_a_statement_missing_its_terminator() -> Result<(), Box<dyn Error>> {
    check_failure(Path::new(SRC_PATH), "expected end-of-line")
}
