use serde::Serialize;

/// Build metadata captured by the calling crate's build script.
#[derive(Debug, Clone, Serialize)]
pub struct BuildInfo {
    pub build_profile: &'static str,
    pub build_features: &'static str,
    pub version: &'static str,
    pub build_timestamp: &'static str,
    pub rust_version: &'static str,
    pub target: Option<&'static str>,
}

/// Expand to a [`BuildInfo`] using the env vars set by the invoking
/// crate's `build.rs`.
#[macro_export]
macro_rules! build_info {
    () => {
        $crate::version::BuildInfo {
            build_profile: env!("BUILD_PROFILE"),
            build_features: env!("BUILD_FEATURES"),
            version: env!("REPO_VERSION"),
            build_timestamp: env!("BUILD_TIMESTAMP"),
            rust_version: env!("RUST_VERSION"),
            target: option_env!("BUILD_TARGET"),
        }
    };
}

impl std::fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "version: {}\nprofile: {}\nfeatures: {}\nbuilt: {}\nrustc: {}",
            self.version,
            self.build_profile,
            self.build_features,
            self.build_timestamp,
            self.rust_version
        )?;
        if let Some(target) = self.target {
            write!(f, "\ntarget: {}", target)?;
        }
        Ok(())
    }
}
