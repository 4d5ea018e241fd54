use crate::portal::{IdentityGateway, SignUpOutcome};

/// Role attribute attached to every sign-up issued by this form.
pub const VENDOR_ROLE: &str = "vendor";

/// Shown after a successful sign-up; the account stays pending until the
/// emailed confirmation link is followed.
pub const CONFIRMATION_PROMPT: &str = "Check your email to confirm your account";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationStatus {
    /// Sign-up accepted; the message tells the user to check their email.
    Accepted(String),
    /// Sign-up rejected; the message is the provider's error, unmodified.
    Rejected(String),
}

/// Vendor sign-up form. One user-initiated attempt per submit, no retry and
/// no client-side email validation.
#[derive(Debug, Default)]
pub struct RegistrationForm {
    pub email: String,
    pub password: String,
    status: Option<RegistrationStatus>,
}

impl RegistrationForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn submit<I: IdentityGateway>(&mut self, identity: &I) {
        let result = identity
            .sign_up(&self.email, &self.password, VENDOR_ROLE)
            .await;
        self.status = Some(match result {
            Ok(SignUpOutcome { .. }) => RegistrationStatus::Accepted(CONFIRMATION_PROMPT.into()),
            Err(err) => RegistrationStatus::Rejected(err.0),
        });
    }

    pub fn status(&self) -> Option<&RegistrationStatus> {
        self.status.as_ref()
    }

    /// The message currently shown under the form, if a submit has completed.
    pub fn message(&self) -> Option<&str> {
        match self.status.as_ref()? {
            RegistrationStatus::Accepted(msg) | RegistrationStatus::Rejected(msg) => Some(msg),
        }
    }
}
