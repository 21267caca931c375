//! Core models and CRUD controllers for panelrs.
//!
//! This crate holds everything that is independent of the terminal frontend:
//! the record data model, per-field validation rules, the record service
//! trait with its REST implementation, and the two controllers (list and
//! modal) that drive a paginated admin screen.

pub mod entity;
pub mod list;
pub mod modal;
pub mod models;
pub mod rest;
pub mod service;
pub mod validate;

pub use entity::EntityDescriptor;
pub use list::{FetchRequest, ListController, PageItem};
pub use modal::{DetailState, ModalController, ModalKind, ModalPhase, ModalRequest};
pub use models::{Audit, PageData, PageSize, Query, Record, RecordDraft, RecordId};
pub use rest::RestRecordService;
pub use service::{Notifier, RecordService, ServiceError};
pub use validate::{Field, FieldErrors};
