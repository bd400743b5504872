use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Password;
use crate::domain::user::models::Username;

/// Command to register a new account with validated fields.
#[derive(Debug)]
pub struct RegisterUserCommand {
    pub username: Username,
    pub email: EmailAddress,
    pub password: Password,
}

impl RegisterUserCommand {
    pub fn new(username: Username, email: EmailAddress, password: Password) -> Self {
        Self {
            username,
            email,
            password,
        }
    }
}

/// Credentials presented at login.
///
/// The identifier is the username; email addresses are registration-unique
/// but are not accepted as a login key. Fields are raw strings on purpose:
/// an identifier that fails validation must take the same failure path as
/// an unknown one, not a validation error.
#[derive(Debug)]
pub struct LoginCommand {
    pub username: String,
    pub password: String,
}
