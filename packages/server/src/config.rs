use anyhow::{bail, Context, Result};
use dotenvy::dotenv;
use std::env;
use std::time::Duration;

use crate::kernel::WorkflowPolicy;

/// Where audit events are delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditSinkKind {
    /// `audit_events` table
    Database,
    /// Structured log lines on the `audit` target
    Log,
}

impl std::str::FromStr for AuditSinkKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "database" | "db" => Ok(AuditSinkKind::Database),
            "log" => Ok(AuditSinkKind::Log),
            other => bail!("Invalid audit sink: {}", other),
        }
    }
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_issuer: String,
    pub audit_sink: AuditSinkKind,
    pub request_timeout: Duration,
    pub policy: WorkflowPolicy,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let max_reason_chars = get_or(
            "MAX_REASON_CHARS",
            &WorkflowPolicy::DEFAULT_MAX_REASON_CHARS.to_string(),
        )
        .parse()
        .context("MAX_REASON_CHARS must be a valid number")?;

        let audit_timeout = Duration::from_millis(
            get_or("AUDIT_TIMEOUT_MS", "2000")
                .parse()
                .context("AUDIT_TIMEOUT_MS must be a valid number")?,
        );

        let allow_self_decision = parse_bool(&get_or("ALLOW_SELF_DECISION", "false"))
            .context("ALLOW_SELF_DECISION must be true or false")?;

        Ok(Self {
            database_url: lookup("DATABASE_URL").context("DATABASE_URL must be set")?,
            database_max_connections: get_or("DATABASE_MAX_CONNECTIONS", "10")
                .parse()
                .context("DATABASE_MAX_CONNECTIONS must be a valid number")?,
            port: get_or("PORT", "8080")
                .parse()
                .context("PORT must be a valid number")?,
            jwt_secret: lookup("JWT_SECRET").context("JWT_SECRET must be set")?,
            jwt_issuer: get_or("JWT_ISSUER", "classroom-server"),
            audit_sink: get_or("AUDIT_SINK", "database").parse()?,
            request_timeout: Duration::from_secs(
                get_or("REQUEST_TIMEOUT_SECS", "30")
                    .parse()
                    .context("REQUEST_TIMEOUT_SECS must be a valid number")?,
            ),
            policy: WorkflowPolicy::new(allow_self_decision, max_reason_chars)
                .with_audit_timeout(audit_timeout),
        })
    }
}

fn parse_bool(raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => bail!("not a boolean: {}", other),
    }
}
