pub mod http;

use anyhow::{ensure, Result};

use self::http::HttpClient;
use crate::config::{API_URL_ENV_VAR, TOKEN_ENV_VARS};
use crate::store::context::Context;
use crate::store::Store;

#[derive(Debug)]
pub struct State {
    pub is_ci: bool,
    pub ctx: Context,
    pub http: HttpClient,
    token: Option<String>,
}

pub struct StateOptions {
    pub override_token: Option<String>,
    pub override_api_url: Option<String>,
}

impl StateOptions {
    /// Reads the overrides from the environment, `GH_TOKEN` wins over `GITHUB_TOKEN`.
    pub fn from_env() -> Self {
        Self {
            override_token: TOKEN_ENV_VARS
                .iter()
                .find_map(|key| std::env::var(key).ok().filter(|v| !v.is_empty())),
            override_api_url: std::env::var(API_URL_ENV_VAR).ok(),
        }
    }
}

impl State {
    pub async fn new(options: StateOptions) -> Result<Self> {
        let ctx = Context::new().await?;

        // prefer the environment over the stored context
        let api_url = options.override_api_url.or_else(|| ctx.api_url.clone());

        let http = HttpClient::new(options.override_token.clone(), api_url)?;

        Ok(State {
            is_ci: Self::check_if_ci(),
            token: options.override_token,
            http,
            ctx,
        })
    }

    /// Checks if the current environment is a CI environment.
    fn check_if_ci() -> bool {
        std::env::vars().any(|(key, _)| {
            matches!(
                key.as_str(),
                "BUILD_NUMBER"
                    | "CONTINUOUS_INTEGRATION"
                    | "GITHUB_ACTIONS"
                    | "GITLAB_CI"
                    | "CIRCLECI"
                    | "APPVEYOR"
                    | "RUN_ID"
                    | "CI"
            )
        })
    }

    /// Fails early for commands that talk to the API without a token.
    pub fn ensure_token(&self) -> Result<()> {
        ensure!(
            self.token.is_some(),
            "no token found, set {} or {}",
            TOKEN_ENV_VARS[0],
            TOKEN_ENV_VARS[1]
        );

        Ok(())
    }
}
