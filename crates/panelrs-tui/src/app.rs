//! Application state management.

use crate::config::Config;
use crate::toast::ToastBin;
use anyhow::Result;
use chrono::{DateTime, Local};
use panelrs_core::{
    EntityDescriptor, Field, ListController, ModalController, ModalKind, ModalRequest, RecordId,
    RecordService, RestRecordService,
};
use std::time::Duration;

/// Which admin screen is on display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Themes,
    AccessTypes,
}

/// Input mode for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Normal navigation mode.
    Normal,
    /// Typing into the search box.
    Search,
}

/// One entity screen: its service, list state and row selection.
pub struct Pane {
    pub service: RestRecordService,
    pub list: ListController,
    pub selected_row: usize,
    pub loaded: bool,
}

impl Pane {
    fn new(service: RestRecordService, list: ListController) -> Self {
        Self {
            service,
            list,
            selected_row: 0,
            loaded: false,
        }
    }

    pub fn descriptor(&self) -> &EntityDescriptor {
        self.service.descriptor()
    }

    /// Keep the selection inside the current page after a re-fetch.
    fn clamp_selection(&mut self) {
        let rows = self.list.data().records.len();
        if rows == 0 {
            self.selected_row = 0;
        } else if self.selected_row >= rows {
            self.selected_row = rows - 1;
        }
    }

    fn selected_id(&self) -> Option<RecordId> {
        self.list
            .data()
            .records
            .get(self.selected_row)
            .map(|r| r.id.clone())
    }
}

/// Main application model.
pub struct App {
    /// Screen currently on display.
    pub screen: Screen,
    /// Theme management screen.
    pub themes: Pane,
    /// User-access-type management screen.
    pub access_types: Pane,
    /// The open modal, if any. Modal keys take precedence over list keys.
    pub modal: Option<ModalController>,
    /// Form field the modal cursor is on.
    pub modal_field: Field,
    /// Current input mode.
    pub input_mode: InputMode,
    /// Toast notifications.
    pub toasts: ToastBin,
    /// When the visible list was last fetched.
    pub last_refreshed: Option<DateTime<Local>>,
    /// Application should quit.
    pub should_quit: bool,
}

impl App {
    /// Create the application from its configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let size = config.initial_page_size();
        let themes = Pane::new(
            RestRecordService::new(&config.api_url, EntityDescriptor::theme())?,
            ListController::new("theme", size),
        );
        let access_types = Pane::new(
            RestRecordService::new(&config.api_url, EntityDescriptor::user_access_type())?,
            ListController::new("access type", size),
        );
        Ok(Self {
            screen: Screen::Themes,
            themes,
            access_types,
            modal: None,
            modal_field: Field::Name,
            input_mode: InputMode::Normal,
            toasts: ToastBin::new(Duration::from_secs(config.toast_ttl_secs)),
            last_refreshed: None,
            should_quit: false,
        })
    }

    pub fn pane(&self) -> &Pane {
        match self.screen {
            Screen::Themes => &self.themes,
            Screen::AccessTypes => &self.access_types,
        }
    }

    fn parts_mut(&mut self) -> (&mut Pane, &mut ToastBin) {
        match self.screen {
            Screen::Themes => (&mut self.themes, &mut self.toasts),
            Screen::AccessTypes => (&mut self.access_types, &mut self.toasts),
        }
    }

    /// Fetch the visible list if it has never been loaded.
    pub fn ensure_loaded(&mut self) {
        if !self.pane().loaded {
            self.refresh();
        }
    }

    /// Re-fetch the visible list with its current page, size and search.
    pub fn refresh(&mut self) {
        let (pane, toasts) = self.parts_mut();
        let request = pane.list.refresh();
        let result = pane.service.list(&request.query);
        pane.list.resolve(request.token, result, toasts);
        pane.loaded = true;
        pane.clamp_selection();
        self.last_refreshed = Some(Local::now());
    }

    /// Switch between the two screens.
    pub fn switch_screen(&mut self) {
        self.screen = match self.screen {
            Screen::Themes => Screen::AccessTypes,
            Screen::AccessTypes => Screen::Themes,
        };
        self.ensure_loaded();
    }

    pub fn move_up(&mut self) {
        let pane = self.parts_mut().0;
        if pane.selected_row > 0 {
            pane.selected_row -= 1;
        }
    }

    pub fn move_down(&mut self) {
        let pane = self.parts_mut().0;
        if pane.selected_row + 1 < pane.list.data().records.len() {
            pane.selected_row += 1;
        }
    }

    pub fn next_page(&mut self) {
        let (pane, toasts) = self.parts_mut();
        if let Some(request) = pane.list.next_page() {
            let result = pane.service.list(&request.query);
            pane.list.resolve(request.token, result, toasts);
            pane.clamp_selection();
        }
    }

    pub fn prev_page(&mut self) {
        let (pane, toasts) = self.parts_mut();
        if let Some(request) = pane.list.prev_page() {
            let result = pane.service.list(&request.query);
            pane.list.resolve(request.token, result, toasts);
            pane.clamp_selection();
        }
    }

    /// Cycle through the selectable page sizes.
    pub fn cycle_page_size(&mut self) {
        let (pane, toasts) = self.parts_mut();
        let next = pane.list.size().next();
        if let Some(request) = pane.list.set_size(next) {
            let result = pane.service.list(&request.query);
            pane.list.resolve(request.token, result, toasts);
            pane.clamp_selection();
        }
    }

    // Search box editing. Typing never fetches; only submit does.

    pub fn start_search(&mut self) {
        self.input_mode = InputMode::Search;
    }

    pub fn exit_search(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn search_push(&mut self, c: char) {
        let pane = self.parts_mut().0;
        let mut text = pane.list.typed_search().to_string();
        text.push(c);
        pane.list.set_typed_search(text);
    }

    pub fn search_pop(&mut self) {
        let pane = self.parts_mut().0;
        let mut text = pane.list.typed_search().to_string();
        text.pop();
        pane.list.set_typed_search(text);
    }

    pub fn submit_search(&mut self) {
        let (pane, toasts) = self.parts_mut();
        if let Some(request) = pane.list.submit_search() {
            let result = pane.service.list(&request.query);
            pane.list.resolve(request.token, result, toasts);
            pane.selected_row = 0;
        }
        self.input_mode = InputMode::Normal;
    }

    // Modal lifecycle.

    /// Open a modal for the current screen; edit/view/delete need a row.
    pub fn open_modal(&mut self, kind: ModalKind) {
        if self.modal.is_some() {
            return;
        }
        let pane = self.pane();
        let record_id = match kind {
            ModalKind::Add => None,
            _ => match pane.selected_id() {
                Some(id) => Some(id),
                None => return,
            },
        };
        let mut modal = ModalController::new(kind, pane.descriptor().clone(), record_id);
        let request = modal.mounted();
        self.modal_field = Field::Name;
        self.modal = Some(modal);
        if let Some(request) = request {
            self.run_modal_request(request);
        }
    }

    fn run_modal_request(&mut self, request: ModalRequest) {
        let service = match self.screen {
            Screen::Themes => &self.themes.service,
            Screen::AccessTypes => &self.access_types.service,
        };
        let Some(modal) = self.modal.as_mut() else {
            return;
        };
        match request {
            ModalRequest::FetchDetail(id) => modal.resolve_detail(service.get(&id)),
            ModalRequest::Create(draft) => {
                modal.resolve_submit(service.create(&draft), &mut self.toasts)
            }
            ModalRequest::Update(id, draft) => {
                modal.resolve_submit(service.update(&id, &draft), &mut self.toasts)
            }
            ModalRequest::Delete(id) => {
                modal.resolve_delete(service.delete(&id), &mut self.toasts)
            }
        }
        // Completion is consumed after the mutation settles; the list is
        // re-fetched with its current query before the modal unmounts.
        let completed = self
            .modal
            .as_mut()
            .map(|m| m.take_completion())
            .unwrap_or(false);
        if completed {
            self.refresh();
        }
    }

    /// Submit the add/edit form. Validation failures stay in the modal.
    pub fn submit_modal(&mut self) {
        let request = self.modal.as_mut().and_then(|m| m.begin_submit());
        if let Some(request) = request {
            self.run_modal_request(request);
        }
    }

    /// Confirm the delete modal.
    pub fn confirm_delete(&mut self) {
        let request = self.modal.as_mut().and_then(|m| m.begin_delete());
        if let Some(request) = request {
            self.run_modal_request(request);
        }
    }

    /// Ask the modal to close; dropped while a request is in flight.
    pub fn close_modal(&mut self) {
        if let Some(modal) = self.modal.as_mut() {
            modal.request_close();
        }
    }

    /// Move the form cursor to the next field.
    pub fn next_modal_field(&mut self) {
        let has_color = self
            .modal
            .as_ref()
            .map(|m| m.descriptor().has_color())
            .unwrap_or(false);
        self.modal_field = match (self.modal_field, has_color) {
            (Field::Name, _) => Field::Description,
            (Field::Description, true) => Field::Color,
            (Field::Description, false) => Field::Name,
            (Field::Color, _) => Field::Name,
        };
    }

    pub fn modal_type(&mut self, c: char) {
        let field = self.modal_field;
        if let Some(modal) = self.modal.as_mut() {
            let mut value = field_value(modal, field);
            value.push(c);
            modal.input(field, &value);
        }
    }

    pub fn modal_backspace(&mut self) {
        let field = self.modal_field;
        if let Some(modal) = self.modal.as_mut() {
            let mut value = field_value(modal, field);
            value.pop();
            modal.input(field, &value);
        }
    }

    /// Periodic housekeeping: expire toasts and unmount closed modals.
    ///
    /// The next tick after a modal enters `Closing` stands in for its exit
    /// transition finishing.
    pub fn tick(&mut self) {
        self.toasts.prune();
        let closed = self
            .modal
            .as_mut()
            .map(|m| m.finish_close())
            .unwrap_or(false);
        if closed {
            self.modal = None;
        }
    }
}

fn field_value(modal: &ModalController, field: Field) -> String {
    match field {
        Field::Name => modal.draft().name.clone(),
        Field::Description => modal.draft().description.clone(),
        Field::Color => modal.draft().color.clone().unwrap_or_default(),
    }
}
