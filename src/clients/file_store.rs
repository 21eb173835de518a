use std::path::{Path, PathBuf};

use tokio::{fs, io::AsyncWriteExt};
use tracing::{info, warn};

use crate::{
    error::ExportError,
    models::{
        store::{ContentKind, SkipReason, StorePolicy, StoreReport},
        template::{TemplateDetail, VersionDetail},
        validation::sanitize_file_stem,
    },
    utils::normalize_path,
};

#[cfg(unix)]
const FILE_MODE: u32 = 0o644;

/// Writes template versions as files under a base directory.
///
/// The directory must exist already; it is never created here.
pub struct TemplateFileStore {
    base_dir: PathBuf,
}

impl TemplateFileStore {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: normalize_path(base_dir),
        }
    }

    /// `{base}/{name}.{ext}`, or `{base}/{name}__{version}.{ext}` when every
    /// version is exported.
    pub fn file_path(
        &self,
        template_name: &str,
        template_id: &str,
        version_id: &str,
        all_versions: bool,
        kind: ContentKind,
    ) -> PathBuf {
        let stem = sanitize_file_stem(template_name, template_id);

        let file_name = if all_versions {
            format!(
                "{}__{}.{}",
                stem,
                sanitize_file_stem(version_id, ""),
                kind.extension()
            )
        } else {
            format!("{}.{}", stem, kind.extension())
        };

        self.base_dir.join(file_name)
    }

    pub async fn store(
        &self,
        template: &TemplateDetail,
        policy: &StorePolicy,
    ) -> Result<StoreReport, ExportError> {
        if template.versions.is_empty() {
            return Err(ExportError::EmptyTemplate {
                template_id: template.id.clone(),
            });
        }

        info!(
            template_id = %template.id,
            name = %template.name,
            "Saving versions for template"
        );

        let mut report = StoreReport::default();

        for version in &template.versions {
            if !policy.all_versions && !version.is_active() {
                info!(
                    template_id = %template.id,
                    version_id = %version.id(),
                    "Skip inactive version"
                );
                report.skip(version.id(), SkipReason::Inactive);
                continue;
            }

            if !version.info.template_id.is_empty() && version.info.template_id != template.id {
                warn!(
                    template_id = %template.id,
                    version_id = %version.id(),
                    owner = %version.info.template_id,
                    "Version reports a different owning template"
                );
            }

            let html_path = self.path_for(template, version, policy, ContentKind::Html);

            let exists = fs::try_exists(&html_path)
                .await
                .map_err(|source| store_error(template, version, ContentKind::Html, &html_path, source))?;

            if exists && !policy.overwrite_existing {
                warn!(
                    template_id = %template.id,
                    version_id = %version.id(),
                    path = %html_path.display(),
                    "File already exists, skipping version (use --overwrite to replace it)"
                );
                report.skip(version.id(), SkipReason::HtmlExists(html_path));
                continue;
            }

            info!(
                version_id = %version.id(),
                name = %version.info.name,
                path = %html_path.display(),
                "Saving version"
            );

            write_content(&html_path, &version.html_content)
                .await
                .map_err(|source| store_error(template, version, ContentKind::Html, &html_path, source))?;
            report.written.push(html_path);

            if policy.include_plain {
                let plain_path = self.path_for(template, version, policy, ContentKind::Plain);

                write_content(&plain_path, &version.plain_content)
                    .await
                    .map_err(|source| {
                        store_error(template, version, ContentKind::Plain, &plain_path, source)
                    })?;
                report.written.push(plain_path);
            }
        }

        Ok(report)
    }

    fn path_for(
        &self,
        template: &TemplateDetail,
        version: &VersionDetail,
        policy: &StorePolicy,
        kind: ContentKind,
    ) -> PathBuf {
        self.file_path(
            &template.name,
            &template.id,
            version.id(),
            policy.all_versions,
            kind,
        )
    }
}

/// Create-or-truncate write, not atomic.
async fn write_content(path: &Path, content: &str) -> std::io::Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    options.mode(FILE_MODE);

    let mut file = options.open(path).await?;
    file.write_all(content.as_bytes()).await?;
    file.flush().await
}

fn store_error(
    template: &TemplateDetail,
    version: &VersionDetail,
    kind: ContentKind,
    path: &Path,
    source: std::io::Error,
) -> ExportError {
    ExportError::Store {
        template_id: template.id.clone(),
        version_id: version.id().to_string(),
        kind,
        path: path.to_path_buf(),
        source,
    }
}
