//! Shared unit test utilities.
//!
//! Provides common helpers for unit tests in the smelltab crate.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::fs;
use std::path::Path;

/// Creates a directory tree from a list of (path, content) pairs.
///
/// Parent directories are created automatically.
///
/// # Example
///
/// ```ignore
/// let tmp = TempDir::new().unwrap();
/// create_tree(tmp.path(), &[
///     ("src/test/java/pkg/CalcTest.java", "class CalcTest {}"),
///     ("src/main/java/pkg/Calc.java", "class Calc {}"),
/// ]);
/// ```
pub fn create_tree(root: &Path, files: &[(&str, &str)]) {
    for (path, content) in files {
        let full_path = root.join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(full_path, content).unwrap();
    }
}
