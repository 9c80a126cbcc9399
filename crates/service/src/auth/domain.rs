use secrecy::SecretString;
use std::fmt;

/// Registration input. Confirmation is checked by the transport before this is built.
#[derive(Debug)]
pub struct RegisterInput {
    pub email: String,
    pub password: SecretString,
}

/// Login input
#[derive(Debug)]
pub struct LoginInput {
    pub email: String,
    pub password: SecretString,
    pub app_id: i32,
}

/// Stored user as seen by the engine.
#[derive(Clone)]
pub struct User {
    pub id: String,
    pub email: String,
    /// Argon2 PHC string.
    pub password_hash: String,
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Client application with its token-signing secret.
#[derive(Debug)]
pub struct App {
    pub id: i32,
    pub name: String,
    pub secret: SecretString,
}

impl RegisterInput {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self { email: email.into(), password: SecretString::from(password.into()) }
    }
}

impl LoginInput {
    pub fn new(email: impl Into<String>, password: impl Into<String>, app_id: i32) -> Self {
        Self { email: email.into(), password: SecretString::from(password.into()), app_id }
    }
}

impl App {
    pub fn new(id: i32, name: impl Into<String>, secret: impl Into<String>) -> Self {
        Self { id, name: name.into(), secret: SecretString::from(secret.into()) }
    }
}
