//! File-backed question bank, game history and rule loading for `duosweep-core`.

pub use error::*;
pub use history::*;
pub use questions::*;
pub use rules::*;

mod error;
mod history;
mod questions;
mod rules;

#[cfg(test)]
pub(crate) fn temp_path(name: &str) -> std::path::PathBuf {
    let path = std::env::temp_dir().join(format!("duosweep-{}-{}", std::process::id(), name));
    let _ = std::fs::remove_file(&path);
    path
}
