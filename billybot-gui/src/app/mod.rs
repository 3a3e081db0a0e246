mod message;
mod view;

pub use message::{Message, ViewMessage};

use iced::Task;
use tracing::{debug, info, warn};

use billybot::{Route, Router, SignupError, SignupFlow, SignupInput, SubmissionState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Signup,
    CheckEmail,
    AccountSetup,
}

impl From<Route> for Page {
    fn from(route: Route) -> Self {
        match route {
            Route::CheckEmail => Page::CheckEmail,
            Route::AccountSetup => Page::AccountSetup,
        }
    }
}

/// Outcome of the last request to resend the confirmation email.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resend {
    processing: bool,
    sent: bool,
    error: Option<String>,
}

pub struct App {
    flow: SignupFlow,
    form: SignupInput,
    submission: SubmissionState,
    page: Page,
    // Email of the account created, as sent to the identity provider.
    email: String,
    resend: Resend,
}

impl Router for App {
    fn navigate(&mut self, route: Route) {
        info!("Navigating to {}", route.path());
        self.page = route.into();
    }
}

impl App {
    pub fn new(flow: SignupFlow) -> (Self, Task<Message>) {
        (
            Self {
                flow,
                form: SignupInput::default(),
                submission: SubmissionState::new(),
                page: Page::Signup,
                email: String::new(),
                resend: Resend::default(),
            },
            Task::none(),
        )
    }

    pub fn title(&self) -> String {
        match self.page {
            Page::Signup => "BillyBot - Sign up".to_string(),
            Page::CheckEmail => "BillyBot - Check your email".to_string(),
            Page::AccountSetup => "BillyBot - Account setup".to_string(),
        }
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::View(msg) => return self.on_view_message(msg),
            Message::Submitted(result) => {
                if let Some(route) = self.submission.settle(result) {
                    self.form.password.clear();
                    self.resend = Resend::default();
                    self.navigate(route);
                }
            }
            Message::ConfirmationResent(result) => {
                self.resend.processing = false;
                match result {
                    Ok(()) => self.resend.sent = true,
                    Err(e) => {
                        warn!("{}", e);
                        self.resend.error = Some(e.user_message());
                    }
                }
            }
        }
        Task::none()
    }

    fn on_view_message(&mut self, msg: ViewMessage) -> Task<Message> {
        // The form is frozen while an attempt is in flight.
        if self.submission.is_submitting()
            && matches!(
                msg,
                ViewMessage::EmailEdited(_)
                    | ViewMessage::PasswordEdited(_)
                    | ViewMessage::MobileEdited(_)
                    | ViewMessage::BusinessNameEdited(_)
                    | ViewMessage::Submit
            )
        {
            debug!("Ignoring form edit while submitting");
            return Task::none();
        }

        match msg {
            ViewMessage::EmailEdited(v) => self.form.email = v,
            ViewMessage::PasswordEdited(v) => self.form.password = v,
            ViewMessage::MobileEdited(v) => self.form.mobile = v,
            ViewMessage::BusinessNameEdited(v) => self.form.business_name = v,
            ViewMessage::Submit => return self.submit(),
            ViewMessage::ResendConfirmation => {
                if self.resend.processing {
                    return Task::none();
                }
                self.resend = Resend {
                    processing: true,
                    ..Resend::default()
                };
                let flow = self.flow.clone();
                let email = self.email.clone();
                return Task::perform(
                    async move { flow.resend_confirmation(&email).await },
                    Message::ConfirmationResent,
                );
            }
            ViewMessage::BackToSignup => {
                self.page = Page::Signup;
                self.resend = Resend::default();
            }
        }
        Task::none()
    }

    fn submit(&mut self) -> Task<Message> {
        if !self.submission.begin() {
            return Task::none();
        }
        match self.flow.validate(&self.form) {
            Err(e) => {
                debug!("Signup form is invalid: {}", e);
                self.submission.settle(Err(SignupError::from(e)));
                Task::none()
            }
            Ok(signup) => {
                self.email = signup.email.clone();
                let flow = self.flow.clone();
                Task::perform(
                    async move { flow.submit(signup).await },
                    Message::Submitted,
                )
            }
        }
    }
}
