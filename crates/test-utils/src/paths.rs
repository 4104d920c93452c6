//! Locating bundled test data and variant configs.

use std::path::PathBuf;

/// Workspace root, two levels above this crate's manifest.
pub fn workspace_root() -> PathBuf {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .ancestors()
        .nth(2)
        .map(PathBuf::from)
        .unwrap_or(manifest_dir)
}

/// `crates/{crate_name}/testdata/`
pub fn crate_testdata_dir(crate_name: &str) -> PathBuf {
    workspace_root().join("crates").join(crate_name).join("testdata")
}

/// `config/variants/`, the YAML definitions shipped with the workspace.
pub fn variant_config_dir() -> PathBuf {
    workspace_root().join("config").join("variants")
}

/// Find a test file by name.
///
/// Looks in `$TEST_DATA_DIR`, then the parser crate's `testdata/`, then
/// `testdata/` at the workspace root.
pub fn find_test_file(name: &str) -> Option<PathBuf> {
    let from_env = std::env::var_os("TEST_DATA_DIR").map(|dir| PathBuf::from(dir).join(name));

    from_env
        .into_iter()
        .chain([
            crate_testdata_dir("eve-parser").join(name),
            workspace_root().join("testdata").join(name),
        ])
        .find(|path| path.exists())
}

/// Temporary directory removed when the returned handle drops.
pub fn temp_test_dir() -> tempfile::TempDir {
    tempfile::Builder::new()
        .prefix("eve_test_")
        .tempdir()
        .expect("Failed to create temporary test directory")
}
