//! Error taxonomy for the exporter.

use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

use crate::models::store::ContentKind;

#[derive(Debug, Error)]
pub enum ExportError {
    /// Bad command-line input; reported together with usage.
    #[error("{0}")]
    FlagInvalid(String),

    /// Transport-level HTTP failure.
    #[error("{context} fail: {source}")]
    Remote {
        context: String,
        #[source]
        source: reqwest::Error,
    },

    /// The remote answered with a non-success status.
    #[error("{context} fail: SendGrid returned status {status}: {body}")]
    Status {
        context: String,
        status: StatusCode,
        body: String,
    },

    /// Response body was not JSON of the expected shape.
    #[error("parse {context} json fail: {source}")]
    Decode {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("no versions for TemplateID='{template_id}'")]
    EmptyTemplate { template_id: String },

    #[error(
        "store TemplateID='{template_id}'/VersionID={version_id} {kind} content to file '{}' fail: {source}",
        .path.display()
    )]
    Store {
        template_id: String,
        version_id: String,
        kind: ContentKind,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot resolve working directory: {0}")]
    Environment(#[source] std::io::Error),

    #[error("invalid SENDGRID_* environment override: {0}")]
    Config(#[from] envy::Error),
}

impl ExportError {
    pub fn exit_code(&self) -> u8 {
        match self {
            ExportError::FlagInvalid(_) => 2,
            _ => 1,
        }
    }

    /// Whether the run must stop. Per-template store problems are logged and skipped.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            ExportError::EmptyTemplate { .. } | ExportError::Store { .. }
        )
    }
}
