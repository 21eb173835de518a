use std::{
    io::IsTerminal,
    path::{Component, Path, PathBuf},
};

use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    clients::{file_store::TemplateFileStore, sendgrid::SendgridClient},
    config::{Config, LogFormat},
    error::ExportError,
    models::{
        store::{ExportSummary, StorePolicy},
        validation::mask_api_key,
    },
};

/// Installs the global subscriber. Output goes to stdout, next to the
/// progress lines users redirect into backup logs.
pub fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());

    let (json, text) = match format {
        LogFormat::Json => (Some(fmt::layer().json().with_writer(std::io::stdout)), None),
        LogFormat::Text => (
            None,
            Some(
                fmt::layer()
                    .with_target(false)
                    .with_ansi(ansi_enabled(&std::io::stdout()))
                    .with_writer(std::io::stdout),
            ),
        ),
    };

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(json)
        .with(text)
        .try_init();
}

/// Colors only for an interactive terminal, never in redirected logs.
fn ansi_enabled(stream: &impl IsTerminal) -> bool {
    stream.is_terminal()
}

/// Lexical cleanup: collapses repeated separators and `.` segments, folds
/// `..` into the preceding component, drops trailing separators.
pub fn normalize_path(path: impl AsRef<Path>) -> PathBuf {
    let mut parts: Vec<Component> = Vec::new();

    for component in path.as_ref().components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }

    if parts.is_empty() {
        return PathBuf::from(".");
    }

    parts.iter().collect()
}

/// Runs one export: list, then fetch and store each template in order.
pub async fn run_export(config: &Config) -> Result<ExportSummary, ExportError> {
    info!(
        host = %config.host,
        api_key = %mask_api_key(&config.api_key),
        base_dir = %config.base_dir.display(),
        include_plain = config.policy.include_plain,
        overwrite = config.policy.overwrite_existing,
        all_versions = config.policy.all_versions,
        "Effective settings"
    );

    let client = SendgridClient::new(config)?;
    let store = TemplateFileStore::new(&config.base_dir);

    export_templates(&client, &store, &config.policy).await
}

/// A failed fetch stops the run. A template that cannot be stored is logged
/// and the loop moves on.
pub async fn export_templates(
    client: &SendgridClient,
    store: &TemplateFileStore,
    policy: &StorePolicy,
) -> Result<ExportSummary, ExportError> {
    let templates = client.list_templates().await?;

    info!("Found {} dynamic templates", templates.len());

    let mut summary = ExportSummary {
        templates_found: templates.len(),
        ..ExportSummary::default()
    };

    info!("Retrieve templates data");

    for (index, template_info) in templates.iter().enumerate() {
        let template = client.get_template(&template_info.id).await.inspect_err(|e| {
            error!(
                template_id = %template_info.id,
                error = %e,
                "Failed to retrieve template data"
            );
        })?;

        info!("{}. Template ID={} '{}'", index, template_info.id, template_info.name);

        match store.store(&template, policy).await {
            Ok(report) => summary.record(&report),
            Err(e) if !e.is_fatal() => {
                error!(
                    template_id = %template_info.id,
                    error = %e,
                    "Failed to store template to file"
                );
                summary.templates_failed += 1;
            }
            Err(e) => return Err(e),
        }
    }

    info!(
        templates_found = summary.templates_found,
        templates_stored = summary.templates_stored,
        templates_failed = summary.templates_failed,
        files_written = summary.files_written,
        versions_skipped = summary.versions_skipped,
        "Retrieve templates data: OK"
    );

    Ok(summary)
}
