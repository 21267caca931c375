//! Field sanitization and submit-time validation.
//!
//! `restrict` runs on every keystroke and keeps the draft inside each
//! field's allowlist and length cap, so most invalid input never reaches
//! the draft at all. `validate` runs once per submit attempt and fills the
//! per-field error map; all fields are checked before returning so several
//! errors can display at once.

use crate::entity::EntityDescriptor;
use crate::models::RecordDraft;

pub const NAME_MAX: usize = 50;
pub const NAME_MIN: usize = 2;
pub const DESCRIPTION_MAX: usize = 200;
pub const COLOR_MAX: usize = 7;

/// The editable fields of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Description,
    Color,
}

/// Per-field error map. `None` means the field is clean.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldErrors {
    pub name: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
}

impl FieldErrors {
    pub fn is_clean(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.color.is_none()
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::Name => self.name.as_deref(),
            Field::Description => self.description.as_deref(),
            Field::Color => self.color.as_deref(),
        }
    }

    pub fn clear(&mut self, field: Field) {
        match field {
            Field::Name => self.name = None,
            Field::Description => self.description = None,
            Field::Color => self.color = None,
        }
    }
}

/// Sanitize a raw input value for the given field kind.
///
/// Characters outside the field's allowlist are stripped and the result is
/// truncated to the field's cap, so over-long input is unrepresentable in a
/// draft. Color values get a `#` prepended when missing and non-empty.
pub fn restrict(field: Field, raw: &str) -> String {
    match field {
        Field::Name => raw
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
            .take(NAME_MAX)
            .collect(),
        Field::Description => raw
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace() || matches!(c, ',' | '.' | '-'))
            .take(DESCRIPTION_MAX)
            .collect(),
        Field::Color => {
            let kept: String = raw
                .chars()
                .filter(|c| *c == '#' || c.is_ascii_hexdigit())
                .collect();
            if kept.is_empty() {
                return kept;
            }
            let mut color = if kept.starts_with('#') {
                kept
            } else {
                format!("#{kept}")
            };
            color.truncate(COLOR_MAX);
            color
        }
    }
}

/// Exactly `#` followed by six hex digits.
pub fn is_valid_hex_color(value: &str) -> bool {
    let Some(rest) = value.strip_prefix('#') else {
        return false;
    };
    rest.len() == 6 && rest.chars().all(|c| c.is_ascii_hexdigit())
}

/// Submit-time validation of a draft against the entity's field set.
///
/// Every field is checked independently; the caller proceeds only when the
/// returned map is clean.
pub fn validate(draft: &RecordDraft, desc: &EntityDescriptor) -> FieldErrors {
    let mut errors = FieldErrors::default();

    // Lengths are counted in characters, the same unit restrict caps in.
    let name = draft.name.trim();
    let name_chars = name.chars().count();
    if name.is_empty() {
        errors.name = Some("Name is required".to_string());
    } else if name_chars < NAME_MIN {
        errors.name = Some(format!("Name must be at least {NAME_MIN} characters"));
    } else if name_chars > NAME_MAX {
        errors.name = Some(format!("Name must be at most {NAME_MAX} characters"));
    }

    let description = draft.description.trim();
    if description.chars().count() > DESCRIPTION_MAX {
        errors.description = Some(format!(
            "Description must be at most {DESCRIPTION_MAX} characters"
        ));
    }

    if desc.has_color() {
        let color = draft.color.as_deref().unwrap_or("").trim();
        if color.is_empty() {
            errors.color = Some("Color is required".to_string());
        } else if !is_valid_hex_color(color) {
            errors.color = Some("Color must be a hex value like #1A2B3C".to_string());
        }
    }

    errors
}
