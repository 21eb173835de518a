use serde::{Deserialize, Deserializer};

/// Item returned by `GET /v3/templates`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TemplateSummary {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub versions: Vec<VersionSummary>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct VersionSummary {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub template_id: String,
    /// `1` for the version currently served by SendGrid, `0` otherwise.
    #[serde(deserialize_with = "null_as_default")]
    pub active: u8,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub updated_at: String,
    #[serde(deserialize_with = "null_as_default")]
    pub editor: String,
}

/// Payload of `GET /v3/templates/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TemplateDetail {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub versions: Vec<VersionDetail>,
}

/// A template version together with its bodies.
///
/// The metadata fields are flattened so the wire shape matches the
/// version objects SendGrid nests inside a template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct VersionDetail {
    #[serde(flatten)]
    pub info: VersionSummary,
    #[serde(deserialize_with = "null_as_default")]
    pub subject: String,
    #[serde(deserialize_with = "null_as_default")]
    pub html_content: String,
    #[serde(deserialize_with = "null_as_default")]
    pub plain_content: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TemplateList {
    #[serde(deserialize_with = "null_as_default")]
    pub templates: Vec<TemplateSummary>,
}

impl VersionSummary {
    pub fn is_active(&self) -> bool {
        self.active == 1
    }
}

impl VersionDetail {
    pub fn id(&self) -> &str {
        &self.info.id
    }

    pub fn is_active(&self) -> bool {
        self.info.is_active()
    }
}

/// `null` decodes to the empty value, same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_detail_with_flattened_version_fields() {
        let json = r#"{
            "id": "T1",
            "name": "welcome",
            "generation": "dynamic",
            "versions": [{
                "id": "V1",
                "template_id": "T1",
                "active": 1,
                "name": "v1",
                "updated_at": "2021-01-01 00:00:00",
                "editor": "code",
                "subject": "Hello",
                "html_content": "<h1>hi</h1>",
                "plain_content": "hi",
                "thumbnail_url": "ignored"
            }]
        }"#;

        let detail: TemplateDetail = serde_json::from_str(json).unwrap();
        let version = &detail.versions[0];

        assert_eq!(version.id(), "V1");
        assert_eq!(version.info.template_id, "T1");
        assert!(version.is_active());
        assert_eq!(version.subject, "Hello");
        assert_eq!(version.html_content, "<h1>hi</h1>");
    }

    #[test]
    fn missing_fields_decode_to_defaults() {
        let detail: TemplateDetail =
            serde_json::from_str(r#"{"id": "T2", "versions": [{"id": "V9"}]}"#).unwrap();

        assert_eq!(detail.name, "");
        assert_eq!(detail.versions[0].info.active, 0);
        assert_eq!(detail.versions[0].plain_content, "");
        assert!(!detail.versions[0].is_active());
    }

    #[test]
    fn null_fields_decode_to_defaults() {
        let detail: TemplateDetail = serde_json::from_str(
            r#"{
                "id": "T3",
                "name": null,
                "versions": [{
                    "id": "V1",
                    "template_id": null,
                    "active": null,
                    "subject": null,
                    "html_content": "<h1>hi</h1>",
                    "plain_content": null
                }]
            }"#,
        )
        .unwrap();

        let version = &detail.versions[0];
        assert_eq!(detail.name, "");
        assert_eq!(version.info.template_id, "");
        assert_eq!(version.info.active, 0);
        assert_eq!(version.subject, "");
        assert_eq!(version.html_content, "<h1>hi</h1>");
        assert_eq!(version.plain_content, "");

        let list: TemplateList =
            serde_json::from_str(r#"{"templates": [{"id": "T1", "versions": null}]}"#).unwrap();
        assert!(list.templates[0].versions.is_empty());

        let list: TemplateList = serde_json::from_str(r#"{"templates": null}"#).unwrap();
        assert!(list.templates.is_empty());
    }

    #[test]
    fn list_payload_without_templates_key_is_empty() {
        let list: TemplateList = serde_json::from_str(r#"{"result": []}"#).unwrap();
        assert!(list.templates.is_empty());
    }
}
