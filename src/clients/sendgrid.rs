use reqwest::Client;
use tracing::{debug, info};

use crate::{
    config::Config,
    error::ExportError,
    models::template::{TemplateDetail, TemplateList, TemplateSummary},
};

pub const DEFAULT_HOST: &str = "https://api.sendgrid.com";

/// Read-only client for the SendGrid v3 transactional templates API.
pub struct SendgridClient {
    http_client: Client,
    host: String,
    api_key: String,
}

impl SendgridClient {
    pub fn new(config: &Config) -> Result<Self, ExportError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        let http_client = builder.build().map_err(|source| ExportError::Remote {
            context: "create HTTP client".to_string(),
            source,
        })?;

        info!(host = %config.host, "SendGrid client initialized");

        Ok(Self {
            http_client,
            host: config.host.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    /// Lists dynamic templates. Classic templates are left out on purpose.
    pub async fn list_templates(&self) -> Result<Vec<TemplateSummary>, ExportError> {
        let url = format!("{}/v3/templates", self.host);

        debug!(url = %url, "Fetching template list");

        let body = self
            .get(&url, &[("generations", "dynamic")], "load templates")
            .await?;

        let list: TemplateList =
            serde_json::from_str(&body).map_err(|source| ExportError::Decode {
                context: "templates".to_string(),
                source,
            })?;

        Ok(list.templates)
    }

    pub async fn get_template(&self, template_id: &str) -> Result<TemplateDetail, ExportError> {
        let url = format!("{}/v3/templates/{}", self.host, template_id);

        debug!(template_id, "Fetching template from SendGrid");

        let body = self
            .get(&url, &[], &format!("load template ID='{}'", template_id))
            .await?;

        serde_json::from_str(&body).map_err(|source| ExportError::Decode {
            context: format!("template ID='{}'", template_id),
            source,
        })
    }

    async fn get(
        &self,
        url: &str,
        query: &[(&str, &str)],
        context: &str,
    ) -> Result<String, ExportError> {
        let response = self
            .http_client
            .get(url)
            .bearer_auth(&self.api_key)
            .query(query)
            .send()
            .await
            .map_err(|source| ExportError::Remote {
                context: context.to_string(),
                source,
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| ExportError::Remote {
                context: context.to_string(),
                source,
            })?;

        if !status.is_success() {
            return Err(ExportError::Status {
                context: context.to_string(),
                status,
                body,
            });
        }

        Ok(body)
    }
}
