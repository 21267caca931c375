//! Entity descriptors.
//!
//! The two admin screens (themes, user access types) share one CRUD
//! implementation; everything entity-specific is captured here as plain
//! configuration: wire field keys, envelope keys, human labels and the
//! endpoint paths derived from the slug.

use crate::models::RecordId;

/// Static description of one CRUD entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityDescriptor {
    /// URL path segment and wire-key prefix, e.g. `theme`.
    pub slug: &'static str,
    /// Screen title, e.g. `Themes`.
    pub title: &'static str,
    /// Lowercase singular label used in messages, e.g. `theme`.
    pub label: &'static str,
    /// Wire key of the id field in bodies and detail payloads.
    pub id_key: &'static str,
    /// Wire key of the name field, e.g. `theme_name`.
    pub name_key: &'static str,
    /// Wire key of the color field, for entities that carry one.
    pub color_key: Option<&'static str>,
    /// Envelope key under which the list payload arrives.
    pub list_key: &'static str,
    /// Envelope key under which a single record arrives.
    pub detail_key: &'static str,
}

impl EntityDescriptor {
    pub fn theme() -> Self {
        Self {
            slug: "theme",
            title: "Themes",
            label: "theme",
            id_key: "theme_id",
            name_key: "theme_name",
            color_key: Some("theme_color"),
            list_key: "themes",
            detail_key: "theme",
        }
    }

    pub fn user_access_type() -> Self {
        Self {
            slug: "user_access_type",
            title: "User Access Types",
            label: "access type",
            id_key: "user_access_type_id",
            name_key: "user_access_type_name",
            color_key: None,
            list_key: "user_access_types",
            detail_key: "user_access_type",
        }
    }

    pub fn has_color(&self) -> bool {
        self.color_key.is_some()
    }

    pub fn list_path(&self) -> String {
        format!("/{}/list", self.slug)
    }

    pub fn create_path(&self) -> String {
        format!("/{}/create", self.slug)
    }

    pub fn detail_path(&self, id: &RecordId) -> String {
        format!("/{}/{}", self.slug, id)
    }

    pub fn update_path(&self) -> String {
        format!("/{}/update", self.slug)
    }

    pub fn delete_path(&self, id: &RecordId) -> String {
        format!("/{}/delete/{}", self.slug, id)
    }
}
