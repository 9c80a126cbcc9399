//! Request shape checks run before any engine call.
//!
//! Every failure is `InvalidArgument` with a message meant for the caller.
#![allow(clippy::result_large_err)]

use tonic::Status;

use crate::proto::{IsAdminRequest, LoginRequest, RegisterRequest};

fn require_credentials(email: &str, password: &str) -> Result<(), Status> {
    if email.is_empty() {
        return Err(Status::invalid_argument("Email is required."));
    }
    if password.is_empty() {
        return Err(Status::invalid_argument("Password is required."));
    }
    Ok(())
}

pub fn validate_login(req: &LoginRequest) -> Result<(), Status> {
    require_credentials(&req.email, &req.password)?;
    if req.app_id == 0 {
        return Err(Status::invalid_argument("App id is required."));
    }
    Ok(())
}

pub fn validate_register(req: &RegisterRequest) -> Result<(), Status> {
    require_credentials(&req.email, &req.password)?;
    if req.password != req.password_confirm {
        return Err(Status::invalid_argument(
            "Passwords are different. Please make sure they are the same.",
        ));
    }
    Ok(())
}

pub fn validate_is_admin(req: &IsAdminRequest) -> Result<(), Status> {
    if req.user_id.is_empty() {
        return Err(Status::invalid_argument("User ID is required."));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tonic::Code;

    fn login(email: &str, password: &str, app_id: i32) -> LoginRequest {
        LoginRequest { email: email.into(), password: password.into(), app_id }
    }

    fn register(email: &str, password: &str, confirm: &str) -> RegisterRequest {
        RegisterRequest { email: email.into(), password: password.into(), password_confirm: confirm.into() }
    }

    fn message_of(res: Result<(), Status>) -> String {
        let status = res.unwrap_err();
        assert_eq!(status.code(), Code::InvalidArgument);
        status.message().to_string()
    }

    #[test]
    fn login_requires_every_field() {
        assert!(validate_login(&login("a@x.com", "pw", 1)).is_ok());
        assert_eq!(message_of(validate_login(&login("", "pw", 1))), "Email is required.");
        assert_eq!(message_of(validate_login(&login("a@x.com", "", 1))), "Password is required.");
        assert_eq!(message_of(validate_login(&login("a@x.com", "pw", 0))), "App id is required.");
    }

    #[test]
    fn negative_app_id_passes_shape_check() {
        assert!(validate_login(&login("a@x.com", "pw", -1)).is_ok());
    }

    #[test]
    fn register_requires_matching_confirmation() {
        assert!(validate_register(&register("a@x.com", "pw", "pw")).is_ok());
        assert_eq!(message_of(validate_register(&register("", "pw", "pw"))), "Email is required.");
        assert_eq!(message_of(validate_register(&register("a@x.com", "", ""))), "Password is required.");
        assert_eq!(
            message_of(validate_register(&register("a@x.com", "pw", "pW"))),
            "Passwords are different. Please make sure they are the same."
        );
    }

    #[test]
    fn is_admin_requires_user_id() {
        assert!(validate_is_admin(&IsAdminRequest { user_id: "u1".into() }).is_ok());
        assert_eq!(message_of(validate_is_admin(&IsAdminRequest { user_id: String::new() })), "User ID is required.");
    }
}
