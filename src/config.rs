pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(not(windows))]
pub const EXEC_NAME: &str = "ghp";
#[cfg(windows)]
pub const EXEC_NAME: &str = "ghp.exe";

pub const GITHUB_API_URL: &str = "https://api.github.com";
pub const CONTEXT_STORE_PATH: &str = ".ghp/context.json";

pub const TOKEN_ENV_VARS: &[&str] = &["GH_TOKEN", "GITHUB_TOKEN"];
pub const API_URL_ENV_VAR: &str = "GH_API_URL";
