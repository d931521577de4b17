use std::env;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Short sha of the checkout holding the workspace, with `-dirty` when the
/// tree has local edits. `None` for a packaged source tree.
fn describe(workspace: &Path) -> Option<String> {
    let out = Command::new("git")
        .arg("-C")
        .arg(workspace)
        .args(["describe", "--always", "--dirty", "--abbrev=8"])
        .output()
        .ok()?;
    if !out.status.success() {
        return None;
    }
    let sha = String::from_utf8_lossy(&out.stdout).trim().to_string();
    (!sha.is_empty()).then_some(sha)
}

fn main() {
    let manifest_dir = PathBuf::from(env::var_os("CARGO_MANIFEST_DIR").unwrap_or_else(|| ".".into()));
    let workspace = manifest_dir.join("..");

    // a new commit or branch switch must refresh the embedded sha
    let head = workspace.join(".git").join("HEAD");
    if head.exists() {
        println!("cargo:rerun-if-changed={}", head.display());
    }
    println!("cargo:rerun-if-changed=build.rs");

    let build = describe(&workspace).unwrap_or_else(|| {
        format!("release v{}", env::var("CARGO_PKG_VERSION").unwrap_or_default())
    });
    println!("cargo:rustc-env=OVERVIEW_BUILD_SHA={build}");
}
