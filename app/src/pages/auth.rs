//! The sign-in modal.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::error;
use trippy_core::LoginForm;

use super::SubmitError;
use crate::services::AuthService;

#[derive(Debug, Default)]
struct ModalState {
    open: bool,
    form: LoginForm,
}

#[derive(Clone)]
pub struct AuthModal {
    auth: AuthService,
    state: Arc<Mutex<ModalState>>,
}

impl AuthModal {
    pub fn new(auth: AuthService) -> Self {
        Self {
            auth,
            state: Arc::default(),
        }
    }

    fn state(&self) -> MutexGuard<'_, ModalState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn open(&self) {
        self.state().open = true;
    }

    pub fn close(&self) {
        self.state().open = false;
    }

    pub fn is_open(&self) -> bool {
        self.state().open
    }

    pub fn form(&self) -> LoginForm {
        self.state().form.clone()
    }

    pub fn edit(&self, f: impl FnOnce(&mut LoginForm)) {
        f(&mut self.state().form);
    }

    /// Sign in with the entered credentials. Success closes the modal and
    /// clears the form; failure is logged and leaves the modal open.
    pub async fn submit(&self) -> Result<(), SubmitError> {
        let credentials = self.state().form.validate()?;
        if let Err(err) = self.auth.login(&credentials).await {
            error!(username = %credentials.username, error = %err, "sign-in failed");
            return Err(err.into());
        }
        let mut state = self.state();
        state.open = false;
        state.form = LoginForm::default();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use trippy_core::{FormError, HttpResponse};

    use super::*;
    use crate::services::testing::context_with;
    use crate::transport::testing::ScriptedTransport;

    fn modal(status: u16, body: &str) -> AuthModal {
        let (ctx, _) = context_with(ScriptedTransport::new(Ok(HttpResponse::new(status, body))));
        AuthModal::new(AuthService::new(ctx))
    }

    fn fill(modal: &AuthModal) {
        modal.edit(|form| {
            form.email = "ana@example.com".into();
            form.password = "secret".into();
        });
    }

    #[tokio::test]
    async fn successful_sign_in_closes_modal() {
        let modal = modal(200, r#"{"token":"t"}"#);
        modal.open();
        fill(&modal);
        modal.submit().await.unwrap();
        assert!(!modal.is_open());
        assert_eq!(modal.form(), LoginForm::default());
    }

    #[tokio::test]
    async fn failed_sign_in_keeps_modal_open() {
        let modal = modal(401, r#"{"message":"Invalid credentials"}"#);
        modal.open();
        fill(&modal);
        let err = modal.submit().await.unwrap_err();
        assert!(matches!(err, SubmitError::Api(_)));
        assert!(modal.is_open());
        assert_eq!(modal.form().email, "ana@example.com");
    }

    #[tokio::test]
    async fn password_is_required() {
        let modal = modal(200, r#"{"token":"t"}"#);
        modal.edit(|form| form.email = "ana@example.com".into());
        assert_eq!(
            modal.submit().await.unwrap_err(),
            SubmitError::Form(FormError::MissingField("password"))
        );
    }
}
