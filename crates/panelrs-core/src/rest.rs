//! REST implementation of the record service.
//!
//! Talks to the admin API with a blocking HTTP client. All responses share
//! one envelope: `{error, message?, <entityKey>?, totalPages?,
//! totalElements?, currentPage?, pageSize?}` where the legacy `error` flag
//! may be a boolean or the strings `"true"`/`"false"`. That inconsistency
//! is normalized here and nowhere else.

use crate::entity::EntityDescriptor;
use crate::models::{Audit, PageData, Query, Record, RecordDraft, RecordId};
use crate::service::{RecordService, ServiceError};
use anyhow::{Context, Result};
use serde_json::{Map, Value};
use url::Url;

/// Blocking REST client for one entity.
pub struct RestRecordService {
    http: reqwest::blocking::Client,
    base: String,
    desc: EntityDescriptor,
}

impl RestRecordService {
    /// Build a service against an API root like `http://host:8080/api`.
    pub fn new(base_url: &str, desc: EntityDescriptor) -> Result<Self> {
        Url::parse(base_url).with_context(|| format!("Invalid API base URL: {base_url}"))?;
        Ok(Self {
            http: reqwest::blocking::Client::new(),
            base: base_url.trim_end_matches('/').to_string(),
            desc,
        })
    }

    pub fn descriptor(&self) -> &EntityDescriptor {
        &self.desc
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }
}

impl RecordService for RestRecordService {
    fn list(&self, query: &Query) -> Result<PageData, ServiceError> {
        // The wire convention is 0-indexed pages.
        let page = query.page.saturating_sub(1);
        let mut request = self
            .http
            .get(self.url(&self.desc.list_path()))
            .query(&[("page", page.to_string()), ("size", query.size.to_string())]);
        if !query.search.is_empty() {
            request = request.query(&[("search", query.search.as_str())]);
        }

        tracing::debug!(entity = self.desc.slug, page, "fetching list page");
        let body: Value = request.send()?.json()?;
        ensure_accepted(&body)?;
        parse_page(&body, &self.desc)
    }

    fn create(&self, draft: &RecordDraft) -> Result<Option<String>, ServiceError> {
        let body = draft_body(draft, &self.desc, None);
        let response: Value = self
            .http
            .post(self.url(&self.desc.create_path()))
            .json(&body)
            .send()?
            .json()?;
        ensure_accepted(&response)?;
        Ok(message_of(&response))
    }

    fn get(&self, id: &RecordId) -> Result<Record, ServiceError> {
        let body: Value = self
            .http
            .get(self.url(&self.desc.detail_path(id)))
            .send()?
            .json()?;
        ensure_accepted(&body)?;
        let detail = body
            .get(self.desc.detail_key)
            .ok_or_else(|| malformed(self.desc.detail_key))?;
        parse_record(detail, &self.desc)
    }

    fn update(&self, id: &RecordId, draft: &RecordDraft) -> Result<Option<String>, ServiceError> {
        let body = draft_body(draft, &self.desc, Some(id));
        let response: Value = self
            .http
            .put(self.url(&self.desc.update_path()))
            .json(&body)
            .send()?
            .json()?;
        ensure_accepted(&response)?;
        Ok(message_of(&response))
    }

    fn delete(&self, id: &RecordId) -> Result<Option<String>, ServiceError> {
        // Soft delete: PUT with an empty body.
        let response: Value = self
            .http
            .put(self.url(&self.desc.delete_path(id)))
            .send()?
            .json()?;
        ensure_accepted(&response)?;
        Ok(message_of(&response))
    }
}

/// Normalize the legacy boolean-or-string error flag into one bool.
///
/// `false`, `"false"`, an empty string and an absent flag are falsy;
/// `true` and any other non-empty string are truthy.
fn flag_is_error(envelope: &Value) -> bool {
    match envelope.get("error") {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => !s.is_empty() && !s.eq_ignore_ascii_case("false"),
        _ => false,
    }
}

fn message_of(envelope: &Value) -> Option<String> {
    envelope
        .get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// Check the envelope's error flag, converting a truthy flag into a
/// `Rejected` error carrying the server message verbatim.
fn ensure_accepted(envelope: &Value) -> Result<(), ServiceError> {
    if flag_is_error(envelope) {
        return Err(ServiceError::Rejected {
            message: message_of(envelope),
        });
    }
    Ok(())
}

fn malformed(key: &str) -> ServiceError {
    ServiceError::Transport(format!("Malformed response: missing `{key}`"))
}

fn opt_str(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(str::to_string)
}

fn parse_record(value: &Value, desc: &EntityDescriptor) -> Result<Record, ServiceError> {
    let id = value
        .get(desc.id_key)
        .and_then(RecordId::from_value)
        .ok_or_else(|| malformed(desc.id_key))?;
    Ok(Record {
        id,
        name: opt_str(value, desc.name_key).unwrap_or_default(),
        description: opt_str(value, "description").unwrap_or_default(),
        color: desc.color_key.and_then(|key| opt_str(value, key)),
        audit: Audit {
            status: opt_str(value, "status"),
            created_by: opt_str(value, "created_by"),
            created_on: opt_str(value, "created_on"),
            updated_by: opt_str(value, "updated_by"),
            updated_on: opt_str(value, "updated_on"),
        },
    })
}

fn parse_page(envelope: &Value, desc: &EntityDescriptor) -> Result<PageData, ServiceError> {
    let rows = envelope
        .get(desc.list_key)
        .and_then(Value::as_array)
        .ok_or_else(|| malformed(desc.list_key))?;
    let records = rows
        .iter()
        .map(|row| parse_record(row, desc))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(PageData {
        records,
        total_pages: envelope
            .get("totalPages")
            .and_then(Value::as_u64)
            .unwrap_or(0) as u32,
        total_elements: envelope
            .get("totalElements")
            .and_then(Value::as_u64)
            .unwrap_or(0),
        page_size: envelope
            .get("pageSize")
            .and_then(Value::as_u64)
            .unwrap_or(0) as u32,
    })
}

fn draft_body(draft: &RecordDraft, desc: &EntityDescriptor, id: Option<&RecordId>) -> Value {
    let mut body = Map::new();
    if let Some(id) = id {
        body.insert(desc.id_key.to_string(), id.to_value());
    }
    body.insert(desc.name_key.to_string(), Value::from(draft.name.as_str()));
    body.insert(
        "description".to_string(),
        Value::from(draft.description.as_str()),
    );
    if let (Some(key), Some(color)) = (desc.color_key, draft.color.as_deref()) {
        body.insert(key.to_string(), Value::from(color));
    }
    Value::Object(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    #[test]
    fn error_flag_handles_bool_and_legacy_strings() {
        assert!(!flag_is_error(&json!({ "error": false })));
        assert!(!flag_is_error(&json!({ "error": "false" })));
        assert!(!flag_is_error(&json!({ "error": "FALSE" })));
        assert!(!flag_is_error(&json!({ "error": "" })));
        assert!(!flag_is_error(&json!({})));
        assert!(flag_is_error(&json!({ "error": true })));
        assert!(flag_is_error(&json!({ "error": "true" })));
        assert!(flag_is_error(&json!({ "error": "failed" })));
    }

    #[test]
    fn rejection_carries_server_message_verbatim() {
        let err = ensure_accepted(&json!({ "error": "true", "message": "locked" })).unwrap_err();
        assert_eq!(
            err,
            ServiceError::Rejected {
                message: Some("locked".into())
            }
        );

        let bare = ensure_accepted(&json!({ "error": true })).unwrap_err();
        assert_eq!(bare, ServiceError::Rejected { message: None });
    }

    #[test]
    fn parse_page_maps_theme_rows() {
        let desc = EntityDescriptor::theme();
        let envelope = json!({
            "error": "false",
            "themes": [
                {
                    "theme_id": 3,
                    "theme_name": "Dark",
                    "description": "default dark palette",
                    "theme_color": "#1A2B3C",
                    "status": "active",
                    "created_by": "admin",
                    "created_on": "2024-01-05",
                },
            ],
            "totalPages": 3,
            "totalElements": 12,
            "currentPage": 0,
            "pageSize": 5,
        });
        let page = parse_page(&envelope, &desc).unwrap();
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.total_elements, 12);
        assert_eq!(page.page_size, 5);
        assert_eq!(page.records.len(), 1);
        let record = &page.records[0];
        assert_eq!(record.id, RecordId::Num(3));
        assert_eq!(record.name, "Dark");
        assert_eq!(record.color.as_deref(), Some("#1A2B3C"));
        assert_eq!(record.audit.status.as_deref(), Some("active"));
        assert_eq!(record.audit.updated_by, None);
    }

    #[test]
    fn parse_record_without_color_key_leaves_color_empty() {
        let desc = EntityDescriptor::user_access_type();
        let record = parse_record(
            &json!({
                "user_access_type_id": "u-1",
                "user_access_type_name": "Auditor",
                "description": "read only",
            }),
            &desc,
        )
        .unwrap();
        assert_eq!(record.id, RecordId::Text("u-1".into()));
        assert_eq!(record.color, None);
    }

    #[test]
    fn missing_list_key_is_a_transport_failure() {
        let desc = EntityDescriptor::theme();
        let err = parse_page(&json!({ "error": false }), &desc).unwrap_err();
        assert_matches!(err, ServiceError::Transport(_));
    }

    #[test]
    fn draft_body_uses_descriptor_keys() {
        let desc = EntityDescriptor::theme();
        let draft = RecordDraft {
            name: "Dark".into(),
            description: "palette".into(),
            color: Some("#1A2B3C".into()),
        };
        let body = draft_body(&draft, &desc, Some(&RecordId::Num(3)));
        assert_eq!(
            body,
            json!({
                "theme_id": 3,
                "theme_name": "Dark",
                "description": "palette",
                "theme_color": "#1A2B3C",
            })
        );

        let create = draft_body(&draft, &desc, None);
        assert_eq!(create.get("theme_id"), None);
    }
}
