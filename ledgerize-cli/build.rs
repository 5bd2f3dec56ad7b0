//! Stamps `ledgerize --version` with the source revision (`git describe`).

use std::path::{Path, PathBuf};
use std::process::Command;

fn git(repo: &Path, args: &[&str]) -> Option<String> {
    let out = Command::new("git").arg("-C").arg(repo).args(args).output().ok()?;
    if !out.status.success() {
        return None;
    }
    let s = String::from_utf8(out.stdout).ok()?;
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

fn main() {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let workspace = manifest_dir.parent().unwrap_or(&manifest_dir);

    let rev = git(workspace, &["describe", "--always", "--dirty", "--abbrev=8"])
        .unwrap_or_else(|| "unknown".to_string());
    println!("cargo:rustc-env=LEDGERIZE_BUILD_REV={rev}");

    println!("cargo:rerun-if-changed=build.rs");
    // HEAD moves on commit/checkout, index changes flip the -dirty suffix.
    if let Some(git_dir) = git(workspace, &["rev-parse", "--git-dir"]) {
        let git_dir = workspace.join(git_dir);
        for file in ["HEAD", "index"] {
            println!("cargo:rerun-if-changed={}", git_dir.join(file).display());
        }
    }
}
