//! Wish draft model
//!
//! Holds the title and description of a wish while the user types it.
//!
//! ## Lifecycle
//!
//! ```text
//! Empty ──edit──▶ Invalid ⇄ Valid ──begin_submit──▶ Submitting
//!                    ▲                                  │
//!                    └──────── Failed ◀──── error ──────┤
//!                                                       └── ok ──▶ Submitted
//! ```
//!
//! A failed submit keeps both fields untouched so the user can retry.

use tracing::debug;
use wishkit_types::{CreateWishRequest, SubmitRequest, WishRecord};

use crate::config::{DescriptionPolicy, DraftLimits};
use crate::error::{ValidationError, WishKitError, WishKitResult};

/// Editable field of a draft
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DraftField {
    Title,
    Description,
}

/// Observable state of a draft
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftPhase {
    /// Nothing typed yet
    Empty,
    /// Edited, but `can_submit()` is false
    Invalid,
    /// Edited and ready to submit
    Valid,
    /// Create request in flight
    Submitting,
    /// Last submit failed; text preserved, editing allowed again
    Failed,
    /// Created on the backend; the draft is closed
    Submitted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    Composing,
    Submitting,
    Submitted,
}

/// Draft of a new wish
#[derive(Debug, Clone)]
pub struct WishDraftModel {
    limits: DraftLimits,
    title: String,
    description: String,
    lifecycle: Lifecycle,
    last_error: Option<String>,
}

impl WishDraftModel {
    pub fn new(limits: DraftLimits) -> Self {
        Self {
            limits,
            title: String::new(),
            description: String::new(),
            lifecycle: Lifecycle::Composing,
            last_error: None,
        }
    }

    // ========== Editing ==========

    /// Replace the title
    ///
    /// Returns false, leaving the title unchanged, if `text` exceeds the title
    /// limit or the draft is not editable.
    pub fn set_title(&mut self, text: impl Into<String>) -> bool {
        self.set_field(DraftField::Title, text.into())
    }

    /// Replace the description, same rules as [`set_title`](Self::set_title)
    pub fn set_description(&mut self, text: impl Into<String>) -> bool {
        self.set_field(DraftField::Description, text.into())
    }

    fn set_field(&mut self, field: DraftField, text: String) -> bool {
        if self.lifecycle != Lifecycle::Composing {
            debug!(field = ?field, "Ignoring edit of a draft that is not editable");
            return false;
        }

        let limit = self.character_limit(field);
        if char_count(&text) > limit {
            return false;
        }

        match field {
            DraftField::Title => self.title = text,
            DraftField::Description => self.description = text,
        }
        self.last_error = None;
        true
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn limits(&self) -> &DraftLimits {
        &self.limits
    }

    // ========== Derived state ==========

    pub fn character_count(&self, field: DraftField) -> usize {
        match field {
            DraftField::Title => char_count(&self.title),
            DraftField::Description => char_count(&self.description),
        }
    }

    pub fn character_limit(&self, field: DraftField) -> usize {
        match field {
            DraftField::Title => self.limits.title_limit,
            DraftField::Description => self.limits.description_limit,
        }
    }

    /// "used/limit" counter text, e.g. `12/50`
    pub fn counter_label(&self, field: DraftField) -> String {
        format!("{}/{}", self.character_count(field), self.character_limit(field))
    }

    pub fn is_dirty(&self) -> bool {
        !self.title.is_empty() || !self.description.is_empty()
    }

    /// Whether cancelling should ask for confirmation first
    pub fn show_discard_warning(&self) -> bool {
        self.is_dirty()
    }

    /// Check both fields against the configured limits and policy
    pub fn validate(&self) -> Result<(), ValidationError> {
        let title_count = self.character_count(DraftField::Title);
        if self.title.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        if title_count > self.limits.title_limit {
            return Err(ValidationError::TitleTooLong {
                count: title_count,
                limit: self.limits.title_limit,
            });
        }

        let description_count = self.character_count(DraftField::Description);
        if description_count > self.limits.description_limit {
            return Err(ValidationError::DescriptionTooLong {
                count: description_count,
                limit: self.limits.description_limit,
            });
        }
        if self.limits.description_policy == DescriptionPolicy::Required
            && self.description.is_empty()
        {
            return Err(ValidationError::EmptyDescription);
        }

        Ok(())
    }

    pub fn can_submit(&self) -> bool {
        self.lifecycle == Lifecycle::Composing && self.validate().is_ok()
    }

    pub fn phase(&self) -> DraftPhase {
        match self.lifecycle {
            Lifecycle::Submitting => DraftPhase::Submitting,
            Lifecycle::Submitted => DraftPhase::Submitted,
            Lifecycle::Composing if self.last_error.is_some() => DraftPhase::Failed,
            Lifecycle::Composing if !self.is_dirty() => DraftPhase::Empty,
            Lifecycle::Composing if self.validate().is_ok() => DraftPhase::Valid,
            Lifecycle::Composing => DraftPhase::Invalid,
        }
    }

    /// Reason of the last failed submit, cleared by the next accepted edit
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    // ========== Submission ==========

    /// Build the create request for the current fields, sent as typed
    pub fn build_submit_request(&self) -> Result<SubmitRequest, ValidationError> {
        self.validate()?;
        Ok(SubmitRequest::Create(CreateWishRequest::new(
            self.title.as_str(),
            self.description.as_str(),
        )))
    }

    /// Validate, build the request and enter `Submitting`
    pub fn begin_submit(&mut self) -> WishKitResult<SubmitRequest> {
        match self.lifecycle {
            Lifecycle::Submitting => return Err(WishKitError::SubmitInProgress),
            Lifecycle::Submitted => return Err(WishKitError::AlreadySubmitted),
            Lifecycle::Composing => {}
        }

        let request = self.build_submit_request()?;
        self.lifecycle = Lifecycle::Submitting;
        self.last_error = None;
        Ok(request)
    }

    /// Record the result of the request started by `begin_submit`
    ///
    /// Success closes the draft. Failure returns it to editing with the text
    /// intact.
    pub fn finish_submit(&mut self, result: Result<&WishRecord, &WishKitError>) {
        if self.lifecycle != Lifecycle::Submitting {
            debug!("finish_submit without a submit in flight");
            return;
        }

        match result {
            Ok(_) => self.lifecycle = Lifecycle::Submitted,
            Err(e) => {
                self.lifecycle = Lifecycle::Composing;
                self.last_error = Some(e.user_message());
            }
        }
    }
}

fn char_count(text: &str) -> usize {
    text.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use wishkit_types::UserId;

    fn limits(title: usize, description: usize) -> DraftLimits {
        DraftLimits {
            title_limit: title,
            description_limit: description,
            description_policy: DescriptionPolicy::Optional,
        }
    }

    #[test]
    fn test_fresh_draft() {
        let draft = WishDraftModel::new(DraftLimits::default());

        assert_eq!(draft.phase(), DraftPhase::Empty);
        assert!(!draft.is_dirty());
        assert!(!draft.show_discard_warning());
        assert!(!draft.can_submit());
        assert_eq!(draft.counter_label(DraftField::Title), "0/50");
        assert_eq!(draft.counter_label(DraftField::Description), "0/500");
    }

    #[test]
    fn test_any_character_makes_draft_dirty() {
        let mut draft = WishDraftModel::new(DraftLimits::default());
        assert!(draft.set_description("x"));
        assert!(draft.show_discard_warning());

        let mut draft = WishDraftModel::new(DraftLimits::default());
        assert!(draft.set_title("x"));
        assert!(draft.show_discard_warning());
    }

    #[test]
    fn test_input_beyond_limit_is_rejected() {
        let mut draft = WishDraftModel::new(limits(5, 8));

        assert!(draft.set_title("Hello"));
        assert!(!draft.set_title("Hello!"));
        assert_eq!(draft.title(), "Hello");

        assert!(!draft.set_description("123456789"));
        assert_eq!(draft.description(), "");
    }

    #[test]
    fn test_limit_counts_characters_not_bytes() {
        let mut draft = WishDraftModel::new(limits(3, 10));

        assert!(draft.set_title("äöü"));
        assert_eq!(draft.character_count(DraftField::Title), 3);
        assert!(!draft.set_title("äöüß"));
    }

    #[test]
    fn test_can_submit_rules() {
        let mut draft = WishDraftModel::new(DraftLimits::default());

        assert!(draft.set_description("Details only"));
        assert!(!draft.can_submit());
        assert_eq!(draft.validate(), Err(ValidationError::EmptyTitle));
        assert_eq!(draft.phase(), DraftPhase::Invalid);

        assert!(draft.set_title(""));
        assert!(!draft.can_submit());

        // whitespace counts like any other character
        assert!(draft.set_title(" "));
        assert!(draft.can_submit());

        assert!(draft.set_title("Widgets"));
        assert!(draft.can_submit());
        assert_eq!(draft.phase(), DraftPhase::Valid);

        assert!(draft.set_description(""));
        assert!(draft.can_submit());
    }

    #[test]
    fn test_required_description_policy() {
        let mut draft = WishDraftModel::new(DraftLimits {
            description_policy: DescriptionPolicy::Required,
            ..DraftLimits::default()
        });

        assert!(draft.set_title("Widgets"));
        assert_eq!(draft.validate(), Err(ValidationError::EmptyDescription));

        assert!(draft.set_description(" "));
        assert!(draft.can_submit());

        assert!(draft.set_description("On the home screen"));
        assert!(draft.can_submit());
    }

    #[test]
    fn test_build_submit_request() {
        let mut draft = WishDraftModel::new(DraftLimits::default());
        assert!(draft.build_submit_request().is_err());

        draft.set_title("  Offline mode ");
        draft.set_description("Sync later\n");

        let request = draft.build_submit_request().unwrap();
        assert_eq!(
            request,
            SubmitRequest::Create(CreateWishRequest::new("  Offline mode ", "Sync later\n"))
        );
    }

    #[test]
    fn test_failed_submit_keeps_text() {
        let mut draft = WishDraftModel::new(DraftLimits::default());
        draft.set_title("Offline mode");
        draft.set_description("Sync later");

        draft.begin_submit().unwrap();
        assert_eq!(draft.phase(), DraftPhase::Submitting);
        assert!(!draft.set_title("changed mid-flight"));
        assert!(matches!(draft.begin_submit(), Err(WishKitError::SubmitInProgress)));

        let error = WishKitError::Api {
            status: 500,
            reason: "Database unavailable".into(),
        };
        draft.finish_submit(Err(&error));

        assert_eq!(draft.phase(), DraftPhase::Failed);
        assert_eq!(draft.last_error(), Some("Database unavailable"));
        assert_eq!(draft.title(), "Offline mode");
        assert_eq!(draft.description(), "Sync later");
        assert!(draft.can_submit());

        assert!(draft.set_title("Offline mode!"));
        assert_eq!(draft.last_error(), None);
        assert_eq!(draft.phase(), DraftPhase::Valid);
    }

    #[test]
    fn test_successful_submit_closes_draft() {
        let mut draft = WishDraftModel::new(DraftLimits::default());
        draft.set_title("Offline mode");

        draft.begin_submit().unwrap();
        let created = WishRecord::new(UserId::generate(), "Offline mode", "");
        draft.finish_submit(Ok(&created));

        assert_eq!(draft.phase(), DraftPhase::Submitted);
        assert!(!draft.can_submit());
        assert!(!draft.set_description("too late"));
        assert!(matches!(draft.begin_submit(), Err(WishKitError::AlreadySubmitted)));
    }
}
