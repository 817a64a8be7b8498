//! Relay configuration
//!
//! Every setting is read once at startup, either from a flag or from the
//! environment variable of the same name. The resulting [`Config`] is
//! immutable and shared behind an `Arc`.

use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use relay_core::domain::registry::RepositoryRegistry;

use crate::service::router::RouterSettings;

/// Command-line / environment arguments
#[derive(Debug, Parser)]
#[command(name = "relay-server")]
#[command(about = "Trigger GitHub Actions workflows from a Telegram bot", long_about = None)]
pub struct Args {
    /// Telegram bot token; also the secret webhook path
    #[arg(long, env = "TG_BOT_TOKEN", hide_env_values = true)]
    pub bot_token: String,

    /// GitHub token with `actions:write` on the configured repositories
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: String,

    /// Telegram user id allowed to use the bot
    #[arg(long, env = "ADMIN_ID")]
    pub admin_id: i64,

    /// Public base URL Telegram should deliver updates to
    #[arg(long, env = "WEBHOOK_URL")]
    pub webhook_url: String,

    /// Repositories as `alias:owner/repo,alias2:owner/repo2`
    #[arg(long, env = "REPO_CONFIG", default_value = "")]
    pub repo_config: String,

    /// Listen port
    #[arg(long, env = "PORT", default_value_t = 8000)]
    pub port: u16,

    /// Listen address
    #[arg(long, env = "BIND_HOST", default_value = "0.0.0.0")]
    pub bind_host: String,

    /// Timeout for every outbound request, in seconds
    #[arg(long, env = "HTTP_TIMEOUT_SECS", default_value_t = 10)]
    pub http_timeout_secs: u64,

    #[arg(long, env = "GITHUB_API_URL", default_value = "https://api.github.com")]
    pub github_api_url: String,

    #[arg(long, env = "TELEGRAM_API_URL", default_value = "https://api.telegram.org")]
    pub telegram_api_url: String,

    /// Branch used when the repository's default branch cannot be read
    #[arg(long, env = "DEFAULT_BRANCH", default_value = "main")]
    pub default_branch: String,
}

/// Validated relay configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub bot_token: String,
    pub github_token: String,
    pub admin_id: i64,
    pub webhook_url: String,
    pub repositories: RepositoryRegistry,
    pub bind_addr: String,
    pub http_timeout: Duration,
    pub github_api_url: String,
    pub telegram_api_url: String,
    pub default_branch: String,
}

impl Config {
    /// Builds and validates the configuration from parsed arguments
    pub fn from_args(args: Args) -> anyhow::Result<Self> {
        let config = Self {
            repositories: RepositoryRegistry::parse(&args.repo_config),
            bot_token: args.bot_token.trim().to_string(),
            github_token: args.github_token.trim().to_string(),
            admin_id: args.admin_id,
            webhook_url: args.webhook_url.trim().trim_end_matches('/').to_string(),
            bind_addr: format!("{}:{}", args.bind_host, args.port),
            http_timeout: Duration::from_secs(args.http_timeout_secs),
            github_api_url: args.github_api_url,
            telegram_api_url: args.telegram_api_url,
            default_branch: args.default_branch.trim().to_string(),
        };

        config.validate().context("invalid configuration")?;
        Ok(config)
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.bot_token.is_empty() {
            anyhow::bail!("TG_BOT_TOKEN cannot be empty");
        }

        if self.bot_token.contains('/') {
            anyhow::bail!("TG_BOT_TOKEN must not contain '/'");
        }

        if self.github_token.is_empty() {
            anyhow::bail!("GITHUB_TOKEN cannot be empty");
        }

        if !self.webhook_url.starts_with("http://") && !self.webhook_url.starts_with("https://") {
            anyhow::bail!("WEBHOOK_URL must start with http:// or https://");
        }

        if self.http_timeout.as_secs() == 0 {
            anyhow::bail!("HTTP_TIMEOUT_SECS must be greater than 0");
        }

        if self.default_branch.is_empty() {
            anyhow::bail!("DEFAULT_BRANCH cannot be empty");
        }

        Ok(())
    }

    /// Full URL registered with Telegram
    pub fn webhook_endpoint(&self) -> String {
        format!("{}/{}", self.webhook_url, self.bot_token)
    }

    /// Bot token safe to print: a short prefix and the length
    pub fn masked_token(&self) -> String {
        mask_secret(&self.bot_token)
    }

    pub fn router_settings(&self) -> RouterSettings {
        RouterSettings {
            registry: self.repositories.clone(),
            admin_id: self.admin_id,
            fallback_branch: self.default_branch.clone(),
        }
    }
}

/// Keeps the first 8 characters of a secret
pub fn mask_secret(secret: &str) -> String {
    let prefix: String = secret.chars().take(8).collect();
    format!("{}… (len {})", prefix, secret.chars().count())
}
