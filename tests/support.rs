use std::path::Path;

use sendgrid_export::{config::Config, models::store::StorePolicy};
use serde_json::{Value, json};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path, query_param},
};

pub const API_KEY: &str = "SG.test-key";

pub fn config_for(server: &MockServer, base_dir: &Path, policy: StorePolicy) -> Config {
    Config {
        api_key: API_KEY.to_string(),
        host: server.uri(),
        base_dir: base_dir.to_path_buf(),
        policy,
        timeout: None,
    }
}

pub fn version(id: &str, template_id: &str, active: u8, html: &str, plain: &str) -> Value {
    json!({
        "id": id,
        "template_id": template_id,
        "active": active,
        "name": format!("{} name", id),
        "updated_at": "2021-03-04 10:00:00",
        "editor": "code",
        "subject": "Subject",
        "html_content": html,
        "plain_content": plain
    })
}

pub fn detail(id: &str, name: &str, versions: Vec<Value>) -> Value {
    json!({
        "id": id,
        "name": name,
        "generation": "dynamic",
        "versions": versions
    })
}

/// List payload derived from full details, bodies stripped.
pub fn list_of(details: &[Value]) -> Value {
    let templates: Vec<Value> = details
        .iter()
        .map(|d| {
            let versions: Vec<Value> = d["versions"]
                .as_array()
                .map(|vs| {
                    vs.iter()
                        .map(|v| {
                            json!({
                                "id": v["id"],
                                "template_id": v["template_id"],
                                "active": v["active"],
                                "name": v["name"],
                                "updated_at": v["updated_at"],
                                "editor": v["editor"]
                            })
                        })
                        .collect()
                })
                .unwrap_or_default();
            json!({ "id": d["id"], "name": d["name"], "versions": versions })
        })
        .collect();

    json!({ "templates": templates })
}

pub async fn mount_list(server: &MockServer, body: Value) {
    Mock::given(method("GET"))
        .and(path("/v3/templates"))
        .and(query_param("generations", "dynamic"))
        .and(header("Authorization", format!("Bearer {}", API_KEY).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

pub async fn mount_detail(server: &MockServer, body: Value) {
    let id = body["id"].as_str().unwrap_or_default().to_string();

    Mock::given(method("GET"))
        .and(path(format!("/v3/templates/{}", id)))
        .and(header("Authorization", format!("Bearer {}", API_KEY).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Mounts the list endpoint and one detail endpoint per template.
pub async fn mount_templates(server: &MockServer, details: Vec<Value>) {
    mount_list(server, list_of(&details)).await;
    for d in details {
        mount_detail(server, d).await;
    }
}
