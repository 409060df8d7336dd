//! Request bodies, response shapes and form inputs for the bookmark API.
//!
//! Form structs that carry passwords derive `ZeroizeOnDrop` so their contents
//! are wiped once a flow is finished with them. They are only ever borrowed.

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::session::User;

// === Forms ===

/// Login form input.
#[derive(Debug, Clone, Default, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Register form input.
#[derive(Debug, Clone, Default, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct RegisterForm {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
    #[serde(default)]
    pub verification_code: String,
}

/// Change-password dialog input.
#[derive(Debug, Clone, Default, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct ChangePasswordForm {
    pub old_password: String,
    pub new_password: String,
    pub confirm_new_password: String,
}

/// Delete-account dialog input. `confirmed` is the dialog's checkbox.
#[derive(Debug, Clone, Default, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct DeleteAccountForm {
    pub password: String,
    #[serde(default)]
    #[zeroize(skip)]
    pub confirmed: bool,
}

// === Request bodies ===

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub struct RegisterRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
    pub verification_code: &'a str,
}

#[derive(Debug, Serialize)]
pub struct ChangePasswordRequest<'a> {
    pub old_password: &'a str,
    pub new_password: &'a str,
}

#[derive(Debug, Serialize)]
pub struct DeleteAccountRequest<'a> {
    pub password: &'a str,
    pub confirm: bool,
}

#[derive(Debug, Serialize)]
pub struct ReorderRequest<'a> {
    pub bookmark_ids: &'a [i64],
}

// === Responses ===

/// Successful `/login` body.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

/// `{message}` body returned by register and account endpoints.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// `{error}` body returned with non-2xx statuses.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}
