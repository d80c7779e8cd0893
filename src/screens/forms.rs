//! Login and signup form validation
//!
//! Field checks run before the session store is called; the password policy
//! itself lives with the store.

use crate::utils::errors::ValidationError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

fn require(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::MissingField(field))
    } else {
        Ok(())
    }
}

fn require_email(email: &str) -> Result<(), ValidationError> {
    require(email, "email")?;
    if !email.contains('@') {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

impl LoginForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self { email: email.into(), password: password.into() }
    }

    /// First problem with the form, in on-screen field order
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_email(&self.email)?;
        require(&self.password, "password")
    }
}

impl SignupForm {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        confirm_password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
            confirm_password: confirm_password.into(),
        }
    }

    /// First problem with the form, in on-screen field order
    pub fn validate(&self) -> Result<(), ValidationError> {
        require(&self.name, "name")?;
        require_email(&self.email)?;
        require(&self.password, "password")?;
        require(&self.confirm_password, "password confirmation")
    }
}
