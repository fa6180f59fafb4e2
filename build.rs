//! Build script that stamps the binary with a version string from
//! `STOWAWAY_VERSION` or `git describe`.

use std::process::Command;

fn main() {
    // Prefer STOWAWAY_VERSION env var if set (e.g., by CI release workflow),
    // otherwise fall back to git describe for local development builds.
    if let Ok(version) = std::env::var("STOWAWAY_VERSION") {
        println!("cargo:rustc-env=STOWAWAY_VERSION={version}");
    } else if let Ok(output) = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        && output.status.success()
    {
        let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
        println!("cargo:rustc-env=STOWAWAY_VERSION={version}");
    }

    // Re-run if git HEAD, the tag set, or the env var changes.  The stamped
    // value comes from `git describe --tags`, and a bare refs/ directory
    // only re-triggers on its own mtime.
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/tags");
    println!("cargo:rerun-if-env-changed=STOWAWAY_VERSION");
}
