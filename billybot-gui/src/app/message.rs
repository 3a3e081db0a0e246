use billybot::{Route, SignupError};

#[derive(Debug, Clone)]
pub enum Message {
    View(ViewMessage),
    Submitted(Result<Route, SignupError>),
    ConfirmationResent(Result<(), SignupError>),
}

#[derive(Debug, Clone)]
pub enum ViewMessage {
    EmailEdited(String),
    PasswordEdited(String),
    MobileEdited(String),
    BusinessNameEdited(String),
    Submit,
    ResendConfirmation,
    BackToSignup,
}
