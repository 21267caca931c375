//! Modal lifecycle state machine.
//!
//! One controller covers the four modal variants (add, edit, view, delete).
//! It is deliberately free of IO: operations that need the network are
//! emitted as [`ModalRequest`] values and their outcomes fed back through
//! the `resolve_*` methods, which makes the in-flight window explicit and
//! lets the frontend decide how to execute requests.
//!
//! Lifecycle: `Opening -> Active -> Closing -> Closed`. The frontend calls
//! [`ModalController::mounted`] once the overlay is up (standing in for the
//! entry animation) and [`ModalController::finish_close`] when the exit
//! transition has played out.

use crate::entity::EntityDescriptor;
use crate::models::{Record, RecordDraft, RecordId};
use crate::service::{Notifier, ServiceError};
use crate::validate::{self, Field, FieldErrors};

/// Which flavor of modal this instance is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalKind {
    Add,
    Edit,
    View,
    Delete,
}

impl ModalKind {
    /// Whether this modal shows an editable form.
    pub fn is_form(self) -> bool {
        matches!(self, ModalKind::Add | ModalKind::Edit)
    }

    /// Whether this modal needs a detail fetch on mount.
    pub fn loads_detail(self) -> bool {
        matches!(self, ModalKind::Edit | ModalKind::View)
    }
}

/// Coarse lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalPhase {
    Opening,
    Active,
    Closing,
    Closed,
}

/// Detail sub-state for edit/view modals.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
    /// No detail fetch applies (add/delete).
    Idle,
    Loading,
    Ready,
    /// Detail fetch failed; rendered as an inline error block.
    Failed(String),
}

/// A network operation the frontend must run on the controller's behalf.
#[derive(Debug, Clone, PartialEq)]
pub enum ModalRequest {
    FetchDetail(RecordId),
    Create(RecordDraft),
    Update(RecordId, RecordDraft),
    Delete(RecordId),
}

/// State machine for one modal instance.
pub struct ModalController {
    kind: ModalKind,
    desc: EntityDescriptor,
    record_id: Option<RecordId>,
    phase: ModalPhase,
    detail: DetailState,
    record: Option<Record>,
    draft: RecordDraft,
    errors: FieldErrors,
    /// True while a submit or delete is outstanding.
    mutating: bool,
    completion_pending: bool,
    completion_fired: bool,
}

impl ModalController {
    /// Create a controller in the `Opening` phase.
    ///
    /// `record_id` is required for edit/view/delete and ignored for add.
    pub fn new(kind: ModalKind, desc: EntityDescriptor, record_id: Option<RecordId>) -> Self {
        Self {
            kind,
            desc,
            record_id,
            phase: ModalPhase::Opening,
            detail: DetailState::Idle,
            record: None,
            draft: RecordDraft::default(),
            errors: FieldErrors::default(),
            mutating: false,
            completion_pending: false,
            completion_fired: false,
        }
    }

    pub fn kind(&self) -> ModalKind {
        self.kind
    }

    pub fn phase(&self) -> ModalPhase {
        self.phase
    }

    pub fn detail(&self) -> &DetailState {
        &self.detail
    }

    /// The record shown by view/delete modals, once fetched or provided.
    pub fn record(&self) -> Option<&Record> {
        self.record.as_ref()
    }

    pub fn draft(&self) -> &RecordDraft {
        &self.draft
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn descriptor(&self) -> &EntityDescriptor {
        &self.desc
    }

    pub fn record_id(&self) -> Option<&RecordId> {
        self.record_id.as_ref()
    }

    /// A load, submit or delete is outstanding; close requests are dropped.
    pub fn is_busy(&self) -> bool {
        self.mutating || self.detail == DetailState::Loading
    }

    /// Transition `Opening -> Active` once the overlay is mounted.
    ///
    /// Add starts with an empty draft and no request; edit/view start their
    /// detail fetch. Returns the request to run, if any.
    pub fn mounted(&mut self) -> Option<ModalRequest> {
        if self.phase != ModalPhase::Opening {
            return None;
        }
        self.phase = ModalPhase::Active;
        if self.kind.loads_detail() {
            if let Some(id) = self.record_id.clone() {
                self.detail = DetailState::Loading;
                return Some(ModalRequest::FetchDetail(id));
            }
            self.detail = DetailState::Failed(self.load_failure_message(None));
        }
        None
    }

    /// Feed back the result of a `FetchDetail` request.
    ///
    /// Results arriving after the modal started closing are dropped: the
    /// fetch is never aborted, its outcome just no longer has a home.
    pub fn resolve_detail(&mut self, result: Result<Record, ServiceError>) {
        if self.phase != ModalPhase::Active {
            tracing::debug!("dropping detail result for a dismissed modal");
            return;
        }
        match result {
            Ok(record) => {
                self.draft = RecordDraft::from_record(&record);
                if !self.desc.has_color() {
                    self.draft.color = None;
                }
                self.record = Some(record);
                self.detail = DetailState::Ready;
            }
            Err(err) => {
                self.detail = DetailState::Failed(self.load_failure_message(err.message()));
            }
        }
    }

    /// Sanitize an input change into the draft and clear that field's error.
    ///
    /// Errors are only re-evaluated at the next submit.
    pub fn input(&mut self, field: Field, raw: &str) {
        if self.phase != ModalPhase::Active || !self.kind.is_form() || self.is_busy() {
            return;
        }
        if field == Field::Color && !self.desc.has_color() {
            return;
        }
        let sanitized = validate::restrict(field, raw);
        match field {
            Field::Name => self.draft.name = sanitized,
            Field::Description => self.draft.description = sanitized,
            Field::Color => self.draft.color = Some(sanitized),
        }
        self.errors.clear(field);
    }

    /// Explicit close request (close control, backdrop click, Escape).
    ///
    /// Dropped, not queued, while a load/submit/delete is in flight.
    /// Returns whether the request was accepted.
    pub fn request_close(&mut self) -> bool {
        if self.phase != ModalPhase::Active || self.is_busy() {
            return false;
        }
        self.phase = ModalPhase::Closing;
        true
    }

    /// Validate and stage a create/update request.
    ///
    /// On validation failure the error map is populated, no request is
    /// emitted and the modal stays active. On success the trimmed draft is
    /// staged and the controller is busy until `resolve_submit`.
    pub fn begin_submit(&mut self) -> Option<ModalRequest> {
        if self.phase != ModalPhase::Active || !self.kind.is_form() || self.is_busy() {
            return None;
        }
        if self.kind == ModalKind::Edit && self.detail != DetailState::Ready {
            return None;
        }
        self.errors = validate::validate(&self.draft, &self.desc);
        if !self.errors.is_clean() {
            return None;
        }
        self.draft = self.draft.trimmed();
        let request = match self.kind {
            ModalKind::Add => ModalRequest::Create(self.draft.clone()),
            ModalKind::Edit => {
                let id = self.record_id.clone()?;
                ModalRequest::Update(id, self.draft.clone())
            }
            _ => return None,
        };
        self.mutating = true;
        Some(request)
    }

    /// Feed back the result of a create/update request.
    pub fn resolve_submit(
        &mut self,
        result: Result<Option<String>, ServiceError>,
        notifier: &mut dyn Notifier,
    ) {
        if !self.mutating {
            return;
        }
        self.mutating = false;
        match result {
            Ok(message) => {
                let default = match self.kind {
                    ModalKind::Add => format!("{} created", capitalized(self.desc.label)),
                    _ => format!("{} updated", capitalized(self.desc.label)),
                };
                notifier.success(message.as_deref().unwrap_or(&default));
                self.complete();
            }
            Err(err) => {
                let default = match self.kind {
                    ModalKind::Add => format!("Failed to create {}", self.desc.label),
                    _ => format!("Failed to update {}", self.desc.label),
                };
                notifier.error(err.message().unwrap_or(&default));
            }
        }
    }

    /// Stage the delete request after the user confirms.
    pub fn begin_delete(&mut self) -> Option<ModalRequest> {
        if self.phase != ModalPhase::Active || self.kind != ModalKind::Delete || self.is_busy() {
            return None;
        }
        let id = self.record_id.clone()?;
        self.mutating = true;
        Some(ModalRequest::Delete(id))
    }

    /// Feed back the result of a delete request.
    pub fn resolve_delete(
        &mut self,
        result: Result<Option<String>, ServiceError>,
        notifier: &mut dyn Notifier,
    ) {
        if !self.mutating {
            return;
        }
        self.mutating = false;
        match result {
            Ok(message) => {
                let default = format!("{} deleted", capitalized(self.desc.label));
                notifier.success(message.as_deref().unwrap_or(&default));
                self.complete();
            }
            Err(err) => {
                let default = format!("Failed to delete {}", self.desc.label);
                notifier.error(err.message().unwrap_or(&default));
            }
        }
    }

    /// Consume the completion signal, at most once per successful mutation.
    ///
    /// The parent re-fetches its current page when this returns true.
    pub fn take_completion(&mut self) -> bool {
        std::mem::take(&mut self.completion_pending)
    }

    /// Transition `Closing -> Closed` once the exit transition finished.
    ///
    /// Returns true exactly once, when the parent should unmount the modal.
    pub fn finish_close(&mut self) -> bool {
        if self.phase != ModalPhase::Closing {
            return false;
        }
        self.phase = ModalPhase::Closed;
        true
    }

    /// Completion is recorded before the close transition is initiated.
    fn complete(&mut self) {
        if !self.completion_fired {
            self.completion_fired = true;
            self.completion_pending = true;
        }
        self.phase = ModalPhase::Closing;
    }

    fn load_failure_message(&self, server: Option<&str>) -> String {
        server
            .map(str::to_string)
            .unwrap_or_else(|| format!("Failed to load {} details", self.desc.label))
    }
}

fn capitalized(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
