//! Shared data types for the CRUD screens.

use serde_json::Value;
use std::fmt;

/// Stable identifier of a record, numeric or string depending on the backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecordId {
    Num(i64),
    Text(String),
}

impl RecordId {
    /// Read an id out of a wire value.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_i64().map(RecordId::Num),
            Value::String(s) => Some(RecordId::Text(s.clone())),
            _ => None,
        }
    }

    /// Convert back to a wire value.
    pub fn to_value(&self) -> Value {
        match self {
            RecordId::Num(n) => Value::from(*n),
            RecordId::Text(s) => Value::from(s.as_str()),
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Num(n) => write!(f, "{n}"),
            RecordId::Text(s) => write!(f, "{s}"),
        }
    }
}

/// Optional audit trail carried by list and detail responses.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Audit {
    pub status: Option<String>,
    pub created_by: Option<String>,
    pub created_on: Option<String>,
    pub updated_by: Option<String>,
    pub updated_on: Option<String>,
}

/// An immutable snapshot of an entity as last fetched from the server.
///
/// The client never mutates a record in place; edits go through a
/// [`RecordDraft`] and the list is re-fetched after a successful mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub id: RecordId,
    pub name: String,
    pub description: String,
    /// `#RRGGBB` color attribute, present only for entities that carry one.
    pub color: Option<String>,
    pub audit: Audit,
}

/// Mutable staging copy of a record's editable fields, scoped to one modal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordDraft {
    pub name: String,
    pub description: String,
    pub color: Option<String>,
}

impl RecordDraft {
    /// Draft pre-populated from a fetched record (edit flow).
    pub fn from_record(record: &Record) -> Self {
        Self {
            name: record.name.clone(),
            description: record.description.clone(),
            color: record.color.clone(),
        }
    }

    /// Trim all fields, as done when a submit passes validation.
    pub fn trimmed(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            color: self.color.as_ref().map(|c| c.trim().to_string()),
        }
    }
}

/// One page of records plus the pagination metadata that came with it.
///
/// Derived state: recomputed fully on every fetch, never patched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageData {
    pub records: Vec<Record>,
    pub total_pages: u32,
    pub total_elements: u64,
    pub page_size: u32,
}

/// The closed set of selectable page sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSize {
    S5,
    S10,
    S20,
    S50,
}

impl PageSize {
    pub const ALL: [PageSize; 4] = [PageSize::S5, PageSize::S10, PageSize::S20, PageSize::S50];

    pub fn as_u32(self) -> u32 {
        match self {
            PageSize::S5 => 5,
            PageSize::S10 => 10,
            PageSize::S20 => 20,
            PageSize::S50 => 50,
        }
    }

    pub fn from_u32(value: u32) -> Option<Self> {
        match value {
            5 => Some(PageSize::S5),
            10 => Some(PageSize::S10),
            20 => Some(PageSize::S20),
            50 => Some(PageSize::S50),
            _ => None,
        }
    }

    /// Next size in the cycle, wrapping around (for the UI size toggle).
    pub fn next(self) -> Self {
        match self {
            PageSize::S5 => PageSize::S10,
            PageSize::S10 => PageSize::S20,
            PageSize::S20 => PageSize::S50,
            PageSize::S50 => PageSize::S5,
        }
    }
}

impl Default for PageSize {
    fn default() -> Self {
        PageSize::S10
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u32())
    }
}

/// What the list controller asks the service for.
///
/// `page` is 1-indexed here; the REST layer translates to the 0-indexed
/// wire convention. An empty `search` means no filter.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub page: u32,
    pub size: PageSize,
    pub search: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn record_id_round_trips_through_wire_values() {
        let num = RecordId::from_value(&json!(42)).unwrap();
        assert_eq!(num, RecordId::Num(42));
        assert_eq!(num.to_value(), json!(42));

        let text = RecordId::from_value(&json!("a1b2")).unwrap();
        assert_eq!(text, RecordId::Text("a1b2".into()));
        assert_eq!(text.to_value(), json!("a1b2"));

        assert_eq!(RecordId::from_value(&json!(null)), None);
        assert_eq!(RecordId::from_value(&json!([1])), None);
    }

    #[test]
    fn page_size_cycle_covers_all_sizes() {
        let mut size = PageSize::default();
        let mut seen = Vec::new();
        for _ in 0..4 {
            seen.push(size.as_u32());
            size = size.next();
        }
        seen.sort_unstable();
        assert_eq!(seen, vec![5, 10, 20, 50]);
        assert_eq!(size, PageSize::default());
    }

    #[test]
    fn page_size_from_u32_rejects_unknown_values() {
        assert_eq!(PageSize::from_u32(20), Some(PageSize::S20));
        assert_eq!(PageSize::from_u32(25), None);
    }

    #[test]
    fn draft_trimming_touches_every_field() {
        let draft = RecordDraft {
            name: "  Dark Mode ".into(),
            description: " primary palette  ".into(),
            color: Some(" #1A2B3C ".into()),
        };
        let trimmed = draft.trimmed();
        assert_eq!(trimmed.name, "Dark Mode");
        assert_eq!(trimmed.description, "primary palette");
        assert_eq!(trimmed.color.as_deref(), Some("#1A2B3C"));
    }
}
