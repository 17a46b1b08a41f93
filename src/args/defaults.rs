/// Placeholder base URL used when `API_URL` is not set.
pub const DEFAULT_API_URL: &str = "<API_URL>";

/// Deployment profile used when `DEPLOY_ENV` is not set.
pub const DEFAULT_DEPLOY_ENV: &str = "default";

pub const DEFAULT_USER_AGENT: &str = concat!("dialogue-probe/", env!("CARGO_PKG_VERSION"));

/// Deployment config filenames checked when `--samconfig` is not given.
pub(crate) const DEFAULT_SAMCONFIG_FILES: [&str; 3] =
    ["samconfig.yaml", "samconfig.yml", "samconfig.toml"];
