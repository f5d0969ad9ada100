use std::{error::Error, path::Path};

use test_utils::check_success;

const SRC_PATH: &str = "./demos/axiom_roundtrip/f.ul";

#[test]
fn accepts_a_single_axiom() -> Result<(), Box<dyn Error>> {
    check_success(Path::new(SRC_PATH))
}
