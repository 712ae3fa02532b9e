pub mod check;
pub mod play;

use std::fs;
use std::path::Path;

use miette::{IntoDiagnostic, Result, WrapErr};
use tw_engine::Adventure;

/// Read a file, naming it in the error.
fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("cannot read {}", path.display()))
}

/// Load and validate a world document.
fn load_adventure(path: &Path) -> Result<Adventure> {
    let json = read(path)?;
    Adventure::from_json(&json)
        .into_diagnostic()
        .wrap_err_with(|| format!("{} is not a playable world", path.display()))
}
