use std::fmt;

/// Where the user is sent once the signup attempt succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// The auth service issued a session: the account can be set up right away.
    AccountSetup,
    /// No session yet, the user must confirm their email first.
    CheckEmail,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Self::AccountSetup => "/account/setup",
            Self::CheckEmail => "/signup/check-email",
        }
    }

    pub fn after_signup(has_session: bool) -> Self {
        if has_session {
            Self::AccountSetup
        } else {
            Self::CheckEmail
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}

/// Leaves the signup page. Fire-and-forget.
pub trait Router {
    fn navigate(&mut self, route: Route);
}
