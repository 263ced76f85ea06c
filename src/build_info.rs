//! Build information
//!
//! Revision, profile and compile time stamped in by `build.rs`, reported in
//! the startup banner and by the `service_status` tool.

use serde::Serialize;

/// Commit hash or packager-supplied id
pub const BUILD_ID: &str = match option_env!("NUTRIGOALS_BUILD_ID") {
    Some(s) => s,
    None => "unknown",
};

/// Cargo profile (`debug` / `release`)
pub const BUILD_PROFILE: &str = match option_env!("NUTRIGOALS_BUILD_PROFILE") {
    Some(s) => s,
    None => "unknown",
};

/// Build time, ISO 8601 UTC
pub const BUILD_TIMESTAMP: &str = match option_env!("NUTRIGOALS_BUILD_TIMESTAMP") {
    Some(s) => s,
    None => "unknown",
};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[derive(Debug, Clone, Serialize)]
pub struct BuildInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub build_id: &'static str,
    pub profile: &'static str,
    pub build_timestamp: &'static str,
}

impl BuildInfo {
    pub fn current() -> Self {
        Self {
            name: NAME,
            version: VERSION,
            build_id: BUILD_ID,
            profile: BUILD_PROFILE,
            build_timestamp: BUILD_TIMESTAMP,
        }
    }

    /// `1.0.0+3fa9c01d2e`, or just the version when no id is known
    pub fn version_label(&self) -> String {
        if self.build_id == "unknown" {
            self.version.to_string()
        } else {
            format!("{}+{}", self.version, self.build_id)
        }
    }
}

/// Print the startup banner to stderr; stdout is reserved for MCP
pub fn print_startup_banner() {
    let info = BuildInfo::current();
    eprintln!("nutrigoals {} ({} build, {})", info.version_label(), info.profile, info.build_timestamp);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_uses_package_metadata() {
        let info = BuildInfo::current();
        assert_eq!(info.name, "nutrigoals");
        assert_eq!(info.version, VERSION);
        assert!(!info.build_id.is_empty());
    }

    #[test]
    fn test_version_label() {
        let mut info = BuildInfo::current();
        info.build_id = "unknown";
        assert_eq!(info.version_label(), VERSION);

        info.build_id = "3fa9c01d2e";
        assert_eq!(info.version_label(), format!("{}+3fa9c01d2e", VERSION));
    }
}
