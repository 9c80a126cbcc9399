//! gRPC `sso.v1.Auth` implementation.
//!
//! Each handler validates the request shape, calls the engine and maps the
//! outcome through [`crate::errors::status_from`].

use std::sync::Arc;

use service::auth::domain::{LoginInput, RegisterInput};
use service::auth::AuthService;
use tonic::{Request, Response, Status};

use crate::errors::status_from;
use crate::proto::auth_server::{Auth, AuthServer};
use crate::proto::{
    IsAdminRequest, IsAdminResponse, LoginRequest, LoginResponse, RegisterRequest, RegisterResponse,
};
use crate::validation;

/// gRPC service implementation
#[derive(Clone)]
pub struct AuthGrpc {
    auth: Arc<AuthService>,
}

impl AuthGrpc {
    pub fn new(auth: Arc<AuthService>) -> Self {
        Self { auth }
    }

    pub fn into_server(self) -> AuthServer<Self> {
        AuthServer::new(self)
    }
}

#[tonic::async_trait]
impl Auth for AuthGrpc {
    async fn register(&self, request: Request<RegisterRequest>) -> Result<Response<RegisterResponse>, Status> {
        let req = request.into_inner();
        validation::validate_register(&req)?;

        let user_id = self
            .auth
            .register(RegisterInput::new(req.email, req.password))
            .await
            .map_err(status_from)?;

        Ok(Response::new(RegisterResponse { user_id }))
    }

    async fn login(&self, request: Request<LoginRequest>) -> Result<Response<LoginResponse>, Status> {
        let req = request.into_inner();
        validation::validate_login(&req)?;

        let token = self
            .auth
            .login(LoginInput::new(req.email, req.password, req.app_id))
            .await
            .map_err(status_from)?;

        Ok(Response::new(LoginResponse { token }))
    }

    async fn is_admin(&self, request: Request<IsAdminRequest>) -> Result<Response<IsAdminResponse>, Status> {
        let req = request.into_inner();
        validation::validate_is_admin(&req)?;

        let is_admin = self.auth.is_admin(&req.user_id).await.map_err(status_from)?;

        Ok(Response::new(IsAdminResponse { is_admin }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::INTERNAL_ERROR_MESSAGE;
    use service::auth::repository::mock::MockAuthRepository;
    use service::auth::AuthConfig;
    use std::time::Duration;
    use tonic::Code;

    fn setup() -> (Arc<MockAuthRepository>, AuthGrpc) {
        let repo = Arc::new(MockAuthRepository::new());
        repo.insert_app(1, "web", "app-1-secret");
        let auth = AuthService::with_repository(repo.clone(), AuthConfig { token_ttl: Duration::from_secs(600) });
        (repo, AuthGrpc::new(Arc::new(auth)))
    }

    fn register_req(email: &str, password: &str, confirm: &str) -> Request<RegisterRequest> {
        Request::new(RegisterRequest {
            email: email.into(),
            password: password.into(),
            password_confirm: confirm.into(),
        })
    }

    fn login_req(email: &str, password: &str, app_id: i32) -> Request<LoginRequest> {
        Request::new(LoginRequest { email: email.into(), password: password.into(), app_id })
    }

    #[tokio::test]
    async fn mismatched_confirmation_never_reaches_storage() {
        let (repo, grpc) = setup();
        let status = grpc.register(register_req("a@x.com", "pw123", "pw124")).await.unwrap_err();
        assert_eq!(status.code(), Code::InvalidArgument);
        assert_eq!(repo.calls(), 0);
        assert_eq!(repo.user_count(), 0);
    }

    #[tokio::test]
    async fn invalid_login_never_reaches_storage() {
        let (repo, grpc) = setup();
        let status = grpc.login(login_req("a@x.com", "pw123", 0)).await.unwrap_err();
        assert_eq!(status.code(), Code::InvalidArgument);
        assert_eq!(status.message(), "App id is required.");
        let status = grpc.is_admin(Request::new(IsAdminRequest { user_id: String::new() })).await.unwrap_err();
        assert_eq!(status.code(), Code::InvalidArgument);
        assert_eq!(repo.calls(), 0);
    }

    #[tokio::test]
    async fn register_login_and_admin_flow() {
        let (repo, grpc) = setup();
        let user_id = grpc.register(register_req("a@x.com", "pw123", "pw123")).await.unwrap().into_inner().user_id;
        assert!(!user_id.is_empty());

        let token = grpc.login(login_req("a@x.com", "pw123", 1)).await.unwrap().into_inner().token;
        assert!(!token.is_empty());

        let req = || Request::new(IsAdminRequest { user_id: user_id.clone() });
        assert!(!grpc.is_admin(req()).await.unwrap().into_inner().is_admin);
        repo.set_admin(&user_id, true);
        assert!(grpc.is_admin(req()).await.unwrap().into_inner().is_admin);
    }

    #[tokio::test]
    async fn domain_errors_map_to_distinct_codes() {
        let (_repo, grpc) = setup();
        grpc.register(register_req("a@x.com", "pw123", "pw123")).await.unwrap();

        let dup = grpc.register(register_req("a@x.com", "pw123", "pw123")).await.unwrap_err();
        assert_eq!(dup.code(), Code::AlreadyExists);

        let wrong = grpc.login(login_req("a@x.com", "nope", 1)).await.unwrap_err();
        let unknown = grpc.login(login_req("z@x.com", "pw123", 1)).await.unwrap_err();
        assert_eq!(wrong.code(), Code::Unauthenticated);
        assert_eq!(wrong.code(), unknown.code());
        assert_eq!(wrong.message(), unknown.message());

        let no_app = grpc.login(login_req("a@x.com", "pw123", 99)).await.unwrap_err();
        assert_eq!(no_app.code(), Code::NotFound);
    }

    #[tokio::test]
    async fn internal_failures_are_masked() {
        let (repo, grpc) = setup();
        let user_id = grpc.register(register_req("a@x.com", "pw123", "pw123")).await.unwrap().into_inner().user_id;
        repo.set_unavailable(true);

        let login = grpc.login(login_req("a@x.com", "pw123", 1)).await.unwrap_err();
        assert_eq!(login.code(), Code::Internal);
        assert_eq!(login.message(), INTERNAL_ERROR_MESSAGE);

        let admin = grpc.is_admin(Request::new(IsAdminRequest { user_id })).await.unwrap_err();
        assert_eq!(admin.code(), Code::Internal);
        assert_eq!(admin.message(), INTERNAL_ERROR_MESSAGE);
    }

    #[tokio::test]
    async fn unknown_user_admin_lookup_is_internal_not_false() {
        let (_repo, grpc) = setup();
        let status = grpc.is_admin(Request::new(IsAdminRequest { user_id: "ghost".into() })).await.unwrap_err();
        assert_eq!(status.code(), Code::Internal);
    }
}
