use crate::route::Route;

use super::SignupError;

/// Progress of the form's submission, as displayed to the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionState {
    is_submitting: bool,
    error: Option<String>,
}

impl SubmissionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// While true the form must not accept input nor a new submission.
    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Start an attempt: the previous error is cleared. Returns false, leaving the state
    /// untouched, if an attempt is already in flight.
    pub fn begin(&mut self) -> bool {
        if self.is_submitting {
            return false;
        }
        self.error = None;
        self.is_submitting = true;
        true
    }

    /// Conclude the attempt, whatever its outcome. On failure the error is rendered to its user
    /// message and kept for display. On success the route to navigate to is returned.
    pub fn settle(&mut self, result: Result<Route, SignupError>) -> Option<Route> {
        self.is_submitting = false;
        match result {
            Ok(route) => Some(route),
            Err(e) => {
                self.error = Some(e.user_message());
                None
            }
        }
    }

    /// Same as [`SubmissionState::begin`], the returned guard clears the in-progress flag when
    /// dropped even if the attempt is never settled.
    pub fn attempt(&mut self) -> Option<Attempt<'_>> {
        if self.begin() {
            Some(Attempt { state: self })
        } else {
            None
        }
    }
}

/// An attempt in flight.
#[derive(Debug)]
pub struct Attempt<'a> {
    state: &'a mut SubmissionState,
}

impl Attempt<'_> {
    pub fn state(&self) -> &SubmissionState {
        self.state
    }

    pub fn settle(self, result: Result<Route, SignupError>) -> Option<Route> {
        self.state.settle(result)
    }
}

impl Drop for Attempt<'_> {
    fn drop(&mut self) {
        self.state.is_submitting = false;
    }
}
