//! Build script for nutrigoals
//!
//! Embeds the source revision, build profile and build time. Nothing is
//! written into the source tree.

use std::env;
use std::process::Command;

/// Short commit hash of the checkout, if this is a git work tree
fn git_revision() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short=10", "HEAD"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let revision = String::from_utf8(output.stdout).ok()?;
    let revision = revision.trim();
    (!revision.is_empty()).then(|| revision.to_string())
}

/// Honors SOURCE_DATE_EPOCH for reproducible builds
fn build_timestamp() -> String {
    let pinned = env::var("SOURCE_DATE_EPOCH")
        .ok()
        .and_then(|s| s.trim().parse::<i64>().ok())
        .and_then(|secs| chrono::DateTime::from_timestamp(secs, 0));
    pinned
        .unwrap_or_else(chrono::Utc::now)
        .format("%Y-%m-%dT%H:%M:%SZ")
        .to_string()
}

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-env-changed=SOURCE_DATE_EPOCH");
    println!("cargo:rerun-if-env-changed=NUTRIGOALS_BUILD_ID");

    // Packagers can stamp their own id; otherwise fall back to the commit
    let build_id = env::var("NUTRIGOALS_BUILD_ID")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .or_else(git_revision)
        .unwrap_or_else(|| "unknown".to_string());
    let profile = env::var("PROFILE").unwrap_or_else(|_| "unknown".to_string());

    println!("cargo:rustc-env=NUTRIGOALS_BUILD_ID={}", build_id);
    println!("cargo:rustc-env=NUTRIGOALS_BUILD_PROFILE={}", profile);
    println!("cargo:rustc-env=NUTRIGOALS_BUILD_TIMESTAMP={}", build_timestamp());
}
