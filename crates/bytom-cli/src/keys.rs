//! Key-management requests proxied to the API server. Arguments are checked
//! locally first so malformed input never reaches the network.

use serde::Serialize;
use serde_json::Value;

use crate::client::{CliError, Client};

pub const XPUB_BYTES: usize = 64;

#[derive(Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum KeyRequest {
    Create {
        alias: String,
        password: String,
    },
    Delete {
        xpub: String,
        password: String,
    },
    List {},
    ResetPassword {
        xpub: String,
        old_password: String,
        new_password: String,
    },
    ExportPrivate {
        xpub: String,
        password: String,
    },
    ImportPrivate {
        alias: String,
        xprv: String,
        password: String,
        index: u64,
        account_alias: String,
    },
    ImportProgress {},
}

/// How a successful reply is shown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Render {
    Json,
    List,
    Feedback(&'static str),
}

fn parse_xpub(cmd: &str, s: &str) -> Result<String, CliError> {
    let raw = hex::decode(s).map_err(|e| CliError::LocalExe(format!("{cmd}: xpub: {e}")))?;
    if raw.len() != XPUB_BYTES {
        return Err(CliError::LocalExe(format!(
            "{cmd}: xpub: expected {XPUB_BYTES} bytes, got {}",
            raw.len()
        )));
    }
    Ok(hex::encode(raw))
}

impl KeyRequest {
    pub fn create(alias: String, password: String) -> Self {
        KeyRequest::Create { alias, password }
    }

    pub fn delete(xpub: &str, password: String) -> Result<Self, CliError> {
        Ok(KeyRequest::Delete {
            xpub: parse_xpub("delete-key", xpub)?,
            password,
        })
    }

    pub fn reset_password(
        xpub: &str,
        old_password: String,
        new_password: String,
    ) -> Result<Self, CliError> {
        Ok(KeyRequest::ResetPassword {
            xpub: parse_xpub("reset-key-password", xpub)?,
            old_password,
            new_password,
        })
    }

    pub fn export_private(xpub: &str, password: String) -> Result<Self, CliError> {
        Ok(KeyRequest::ExportPrivate {
            xpub: parse_xpub("export-private-key", xpub)?,
            password,
        })
    }

    pub fn import_private(
        alias: String,
        xprv: String,
        index: &str,
        password: String,
        account_alias: String,
    ) -> Result<Self, CliError> {
        let index = index
            .parse::<u64>()
            .map_err(|e| CliError::LocalExe(format!("import-private-key: index: {e}")))?;
        Ok(KeyRequest::ImportPrivate {
            alias,
            xprv,
            password,
            index,
            account_alias,
        })
    }

    pub fn endpoint(&self) -> &'static str {
        match self {
            KeyRequest::Create { .. } => "/create-key",
            KeyRequest::Delete { .. } => "/delete-key",
            KeyRequest::List {} => "/list-keys",
            KeyRequest::ResetPassword { .. } => "/reset-key-password",
            KeyRequest::ExportPrivate { .. } => "/export-private-key",
            KeyRequest::ImportPrivate { .. } => "/import-private-key",
            KeyRequest::ImportProgress {} => "/import-key-progress",
        }
    }

    pub fn render(&self) -> Render {
        match self {
            KeyRequest::Delete { .. } => Render::Feedback("Successfully deleted key"),
            KeyRequest::ResetPassword { .. } => Render::Feedback("Successfully reset key password"),
            KeyRequest::List {} => Render::List,
            _ => Render::Json,
        }
    }

    pub fn send(&self, client: &Client) -> Result<Value, CliError> {
        client.call(self.endpoint(), self)
    }
}
