//! Startup configuration for the chatbot client.
//!
//! Supports reading credentials from `~/.config/kaichat/secret.json`.
//!
//! Configuration priority: secret.json > environment variables. Validation
//! happens once at startup and returns a typed error; nothing network-facing
//! is constructed from an unvalidated source.

use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use kaichat_core::error::{ChatError, Result};
use serde::Deserialize;

pub const ENV_ORGANIZATION_ID: &str = "KAI_ORGANIZATION_ID";
pub const ENV_INSTANCE_ID: &str = "KAI_INSTANCE_ID";
pub const ENV_API_KEY: &str = "KAI_API_KEY";
pub const ENV_HOST: &str = "KAI_HOST";
pub const ENV_MULTI_DOCUMENTS: &str = "KAI_MULTI_DOCUMENTS";

/// Raw contents of secret.json. All fields optional; validation happens
/// after merging with the environment.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SecretFile {
    pub organization_id: Option<String>,
    pub instance_id: Option<String>,
    pub api_key: Option<String>,
    pub host: Option<String>,
    pub multi_documents: Option<bool>,
}

/// Where the chatbot connects and how it authenticates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credentials {
    /// Managed deployment addressed by organization + instance.
    Hosted {
        organization_id: String,
        instance_id: String,
        api_key: String,
    },
    /// Explicit base URL, for self-hosted or test deployments.
    HostOverride {
        host: String,
        api_key: Option<String>,
    },
}

impl Credentials {
    /// Returns the base URL for the conversation endpoint.
    pub fn base_url(&self) -> String {
        match self {
            Self::Hosted {
                organization_id,
                instance_id,
                ..
            } => format!("https://{organization_id}.kai-studio.ai/{instance_id}"),
            Self::HostOverride { host, .. } => host.trim_end_matches('/').to_string(),
        }
    }

    /// Returns the API key, when one is configured.
    pub fn api_key(&self) -> Option<&str> {
        match self {
            Self::Hosted { api_key, .. } => Some(api_key),
            Self::HostOverride { api_key, .. } => api_key.as_deref(),
        }
    }
}

/// Validated startup configuration.
#[derive(Debug, Clone)]
pub struct ChatbotConfig {
    pub credentials: Credentials,
    /// Whether the service may cite multiple source documents per answer.
    pub multi_documents: bool,
}

impl ChatbotConfig {
    /// Loads the configuration from the default secret.json location and
    /// the process environment.
    ///
    /// # Errors
    ///
    /// Returns a [`ChatError::Config`] if the merged sources do not form a
    /// complete credential set. This is a fatal startup failure.
    pub fn load() -> Result<Self> {
        let secret = match default_secret_path() {
            Ok(path) if path.exists() => read_secret_file(&path)?,
            _ => SecretFile::default(),
        };
        Self::resolve(secret, &env_snapshot())
    }

    /// Merges the secret file with an environment snapshot and validates.
    ///
    /// Secret file values win over environment variables, field by field.
    pub fn resolve(secret: SecretFile, env: &HashMap<String, String>) -> Result<Self> {
        let organization_id = secret
            .organization_id
            .or_else(|| env.get(ENV_ORGANIZATION_ID).cloned());
        let instance_id = secret
            .instance_id
            .or_else(|| env.get(ENV_INSTANCE_ID).cloned());
        let api_key = secret.api_key.or_else(|| env.get(ENV_API_KEY).cloned());
        let host = secret.host.or_else(|| env.get(ENV_HOST).cloned());

        let multi_documents = secret
            .multi_documents
            .or_else(|| env.get(ENV_MULTI_DOCUMENTS).map(|v| v == "true"))
            .unwrap_or(false);

        let credentials = match (organization_id, instance_id, api_key, host) {
            (Some(organization_id), Some(instance_id), Some(api_key), _) => {
                Credentials::Hosted {
                    organization_id,
                    instance_id,
                    api_key,
                }
            }
            (_, _, api_key, Some(host)) => Credentials::HostOverride { host, api_key },
            _ => {
                return Err(ChatError::config(format!(
                    "missing credentials: set {ENV_ORGANIZATION_ID}, {ENV_INSTANCE_ID} and \
                     {ENV_API_KEY}, or {ENV_HOST}"
                )));
            }
        };

        Ok(Self {
            credentials,
            multi_documents,
        })
    }
}

/// Reads and parses a secret.json file.
pub fn read_secret_file(path: &Path) -> Result<SecretFile> {
    let content = fs::read_to_string(path).map_err(|e| {
        ChatError::config(format!(
            "failed to read configuration file at {}: {}",
            path.display(),
            e
        ))
    })?;

    serde_json::from_str(&content).map_err(|e| {
        ChatError::config(format!(
            "failed to parse configuration file at {}: {}",
            path.display(),
            e
        ))
    })
}

/// Returns the path to the configuration file: ~/.config/kaichat/secret.json
fn default_secret_path() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| ChatError::config("could not determine home directory"))?;
    Ok(home.join(".config").join("kaichat").join("secret.json"))
}

fn env_snapshot() -> HashMap<String, String> {
    env::vars().collect()
}
