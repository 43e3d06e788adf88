//! Calibration session controller.
//!
//! The controller never performs IO. Each action hands back the request to
//! send; the caller feeds the outcome into the matching `complete_*` method.
//! The server owns the session mode: the controller only moves between
//! `Idle` and `Calibrating` when a reply says the server did.

use leptos::logging::warn;

use super::field::{FieldKey, FieldState};
use super::reply::Reply;
use crate::api::{ApiError, ApiRequest, CalibrationParameter, Endpoint};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Idle,
    Calibrating,
}

/// Toolbar-level actions. Field previews go through [`CalibrationController::preview`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Init,
    Start,
    Commit,
    Revert,
}

/// Which toolbar controls are enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Toolbar {
    pub start: bool,
    pub revert: bool,
    pub comment: bool,
    pub commit: bool,
}

/// Message for the modal dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Error(String),
}

/// Work the caller must do after a completed action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowUp {
    /// Fetch `/get/calibration.json` and pass it to [`CalibrationController::load`].
    LoadParameters,
    /// A commit landed; history views are stale.
    RefreshHistory,
}

#[derive(Debug, Clone, Default)]
pub struct CalibrationController {
    mode: Mode,
    loading: bool,
    fields: Vec<FieldState>,
    comment: String,
    pending_comment: String,
    notice: Option<Notice>,
}

impl CalibrationController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn toolbar(&self) -> Toolbar {
        let calibrating = self.mode == Mode::Calibrating;
        Toolbar {
            start: !calibrating,
            revert: calibrating,
            comment: calibrating,
            commit: calibrating,
        }
    }

    pub fn inputs_enabled(&self) -> bool {
        self.mode == Mode::Calibrating
    }

    pub fn fields(&self) -> &[FieldState] {
        &self.fields
    }

    pub fn field(&self, key: &FieldKey) -> Option<&FieldState> {
        self.fields.iter().find(|f| f.param.group == key.group && f.param.name == key.name)
    }

    fn field_mut(&mut self, key: &FieldKey) -> Option<&mut FieldState> {
        self.fields
            .iter_mut()
            .find(|f| f.param.group == key.group && f.param.name == key.name)
    }

    /// Group names in first-seen order.
    pub fn groups(&self) -> Vec<String> {
        let mut groups: Vec<String> = Vec::new();
        for field in &self.fields {
            if !groups.contains(&field.param.group) {
                groups.push(field.param.group.clone());
            }
        }
        groups
    }

    pub fn keys_in_group(&self, group: &str) -> Vec<FieldKey> {
        self.fields
            .iter()
            .filter(|f| f.param.group == group)
            .map(FieldState::key)
            .collect()
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn set_comment(&mut self, comment: String) {
        self.comment = comment;
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Begin a toolbar action. Returns `None` when the action is not valid in
    /// the current mode.
    pub fn request(&mut self, action: Action) -> Option<ApiRequest> {
        let request = match action {
            Action::Init => ApiRequest::new(Endpoint::CalibrationMode),
            Action::Start => {
                if self.mode != Mode::Idle {
                    return None;
                }
                ApiRequest::new(Endpoint::CalibrationStart)
            }
            Action::Commit => {
                if self.mode != Mode::Calibrating {
                    return None;
                }
                for field in &mut self.fields {
                    field.snapshot();
                }
                self.pending_comment = self.comment.clone();
                ApiRequest::new(Endpoint::CalibrationCommit).param("comment", self.comment.clone())
            }
            Action::Revert => {
                if self.mode != Mode::Calibrating {
                    return None;
                }
                for field in &mut self.fields {
                    field.reset();
                }
                ApiRequest::new(Endpoint::CalibrationRevert)
            }
        };

        self.loading = true;
        Some(request)
    }

    /// Apply the outcome of a toolbar action.
    pub fn complete(&mut self, action: Action, outcome: Result<String, ApiError>) -> Option<FollowUp> {
        self.loading = false;

        let reply = match outcome.and_then(|text| Reply::parse(&text)) {
            Ok(reply) => reply,
            Err(e) => {
                self.fail(e);
                return None;
            }
        };

        match action {
            Action::Init => {
                if reply.is_calibrating() {
                    self.mode = Mode::Calibrating;
                    Some(FollowUp::LoadParameters)
                } else {
                    self.mode = Mode::Idle;
                    self.clear();
                    None
                }
            }
            Action::Start => {
                self.mode = Mode::Calibrating;
                Some(FollowUp::LoadParameters)
            }
            Action::Commit => {
                self.notice = Some(Notice::Info(format!(
                    "Successful commit with comment:\n{}",
                    self.pending_comment
                )));
                self.mode = Mode::Idle;
                self.clear();
                self.comment.clear();
                Some(FollowUp::RefreshHistory)
            }
            Action::Revert => {
                self.mode = Mode::Idle;
                self.clear();
                None
            }
        }
    }

    /// Populate the list from the server. Ignored if the session ended while
    /// the list was in flight.
    pub fn load(&mut self, outcome: Result<Vec<CalibrationParameter>, ApiError>) {
        match outcome {
            Ok(params) => {
                if self.mode == Mode::Calibrating {
                    self.fields = params.into_iter().map(FieldState::new).collect();
                }
            }
            Err(e) => self.fail(e),
        }
    }

    /// Empty the list.
    pub fn clear(&mut self) {
        self.fields.clear();
    }

    /// Record an edit and build its preview request. Nothing is sent while
    /// idle or for a field that is not in the list.
    pub fn preview(&mut self, key: &FieldKey, raw: &str) -> Option<ApiRequest> {
        if self.mode != Mode::Calibrating {
            return None;
        }
        let field = self.field_mut(key)?;
        field.value = raw.to_string();

        Some(
            ApiRequest::new(Endpoint::CalibrationPreview)
                .param("domain", key.group.clone())
                .param("name", key.name.clone())
                .param("value", raw),
        )
    }

    /// Write the server's corrected value and hint back into the field.
    /// Replies apply in arrival order; a reply for a field that has since
    /// left the list is dropped.
    pub fn complete_preview(&mut self, key: &FieldKey, outcome: Result<String, ApiError>) {
        let reply = match outcome.and_then(|text| Reply::parse(&text)) {
            Ok(reply) => reply,
            Err(e) => {
                self.fail(e);
                return;
            }
        };

        let value = reply.preview_value().map(str::to_string);
        let hint = reply.preview_hint().map(str::to_string);
        if let Some(field) = self.field_mut(key) {
            if let Some(value) = value {
                field.value = value;
            }
            field.hint = hint;
        }
    }

    fn fail(&mut self, err: ApiError) {
        if let ApiError::Transport(detail) = &err {
            warn!("Calibration request failed: {}", detail);
        }
        self.notice = Some(Notice::Error(err.to_string()));
    }
}
