/// Compile-time build metadata produced by `build.rs`.
#[derive(Debug, Clone, Copy)]
pub struct BuildMetadata {
    pub version: &'static str,
    pub git_hash: &'static str,
    pub build_date: &'static str,
    pub profile: &'static str,
}

impl BuildMetadata {
    /// One-line description printed by `budget_tracker_cli version`.
    pub fn summary(&self) -> String {
        format!(
            "budget_tracker {} ({} {}, {})",
            self.version, self.git_hash, self.build_date, self.profile
        )
    }
}

/// Returns the statically-embedded build metadata.
pub fn current() -> BuildMetadata {
    BuildMetadata {
        version: env!("CARGO_PKG_VERSION"),
        git_hash: option_env!("BUDGET_TRACKER_BUILD_HASH").unwrap_or("unknown"),
        build_date: option_env!("BUDGET_TRACKER_BUILD_DATE").unwrap_or("unknown"),
        profile: option_env!("BUDGET_TRACKER_BUILD_PROFILE").unwrap_or("unknown"),
    }
}
