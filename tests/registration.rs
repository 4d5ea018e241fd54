use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;
use vendor_portal_api::portal::{
    GatewayError, IdentityGateway, RegistrationForm, RegistrationStatus, SignUpOutcome,
    registration::{CONFIRMATION_PROMPT, VENDOR_ROLE},
};

/// Identity provider fake: accepts or rejects every sign-up and records the
/// role attribute it was handed.
struct FakeProvider {
    rejection: Option<String>,
    seen_role: Mutex<Option<String>>,
}

impl FakeProvider {
    fn accepting() -> Self {
        Self {
            rejection: None,
            seen_role: Mutex::new(None),
        }
    }

    fn rejecting(message: &str) -> Self {
        Self {
            rejection: Some(message.to_string()),
            seen_role: Mutex::new(None),
        }
    }
}

#[async_trait]
impl IdentityGateway for FakeProvider {
    async fn sign_up(
        &self,
        _email: &str,
        _password: &str,
        role: &str,
    ) -> Result<SignUpOutcome, GatewayError> {
        *self.seen_role.lock().unwrap() = Some(role.to_string());
        match &self.rejection {
            Some(message) => Err(GatewayError(message.clone())),
            None => Ok(SignUpOutcome {
                user_id: Uuid::new_v4(),
                confirmation_required: true,
            }),
        }
    }

    async fn current_user(&self) -> Result<Option<Uuid>, GatewayError> {
        Ok(None)
    }
}

#[tokio::test]
async fn successful_registration_prompts_for_email_confirmation() {
    let provider = FakeProvider::accepting();
    let mut form = RegistrationForm::new();
    form.email = "shop@example.com".into();
    form.password = "secret123".into();

    form.submit(&provider).await;

    assert_eq!(
        form.status(),
        Some(&RegistrationStatus::Accepted(CONFIRMATION_PROMPT.into()))
    );
    assert_eq!(form.message(), Some(CONFIRMATION_PROMPT));
}

#[tokio::test]
async fn rejected_registration_shows_provider_message_verbatim() {
    let provider = FakeProvider::rejecting("Email is already taken");
    let mut form = RegistrationForm::new();
    form.email = "shop@example.com".into();
    form.password = "secret123".into();

    form.submit(&provider).await;

    assert_eq!(
        form.status(),
        Some(&RegistrationStatus::Rejected("Email is already taken".into()))
    );
    assert_eq!(form.message(), Some("Email is already taken"));
}

#[tokio::test]
async fn sign_up_carries_the_vendor_role_attribute() {
    let provider = FakeProvider::accepting();
    let mut form = RegistrationForm::new();
    form.email = "shop@example.com".into();
    form.password = "secret123".into();

    form.submit(&provider).await;

    assert_eq!(
        provider.seen_role.lock().unwrap().as_deref(),
        Some(VENDOR_ROLE)
    );
}
