//! Local validation for the login, register and account forms.
//!
//! A failed check blocks the request entirely; nothing is sent.

use crate::types::api::{ChangePasswordForm, DeleteAccountForm, LoginForm, RegisterForm};
use crate::types::errors::ValidationError;

pub const MIN_PASSWORD_LEN: usize = 6;

pub fn validate_login(form: &LoginForm) -> Result<(), ValidationError> {
    if form.username.is_empty() || form.password.is_empty() {
        return Err(ValidationError::MissingCredentials);
    }
    Ok(())
}

/// Checks run in order: confirmation, length, then verification code.
pub fn validate_registration(form: &RegisterForm) -> Result<(), ValidationError> {
    check_new_password(&form.password, &form.confirm_password)?;
    if form.verification_code.trim().is_empty() {
        return Err(ValidationError::MissingVerificationCode);
    }
    Ok(())
}

pub fn validate_password_change(form: &ChangePasswordForm) -> Result<(), ValidationError> {
    check_new_password(&form.new_password, &form.confirm_new_password)
}

pub fn validate_account_deletion(form: &DeleteAccountForm) -> Result<(), ValidationError> {
    if !form.confirmed {
        return Err(ValidationError::DeletionNotConfirmed);
    }
    Ok(())
}

fn check_new_password(password: &str, confirmation: &str) -> Result<(), ValidationError> {
    if password != confirmation {
        return Err(ValidationError::PasswordMismatch);
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort(MIN_PASSWORD_LEN));
    }
    Ok(())
}
