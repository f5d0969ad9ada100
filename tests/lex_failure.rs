use std::{error::Error, path::Path};

use test_utils::check_failure;

const SRC_PATH: &str = "./demos/lex_failure/f.ul";

#[test]
fn rejects_an_unterminated_quote() -> Result<(), Box<dyn Error>> {
    check_failure(Path::new(SRC_PATH), "no closing quote")
}
