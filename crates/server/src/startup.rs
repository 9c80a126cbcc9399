use std::{future::Future, sync::Arc, time::Duration};

use configs::AppConfig;
use models::db;
use service::auth::repo::seaorm::SeaOrmAuthRepository;
use service::auth::{AuthConfig, AuthService};
use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::Server;
use tracing::{info, info_span};

use crate::errors::StartupError;
use crate::grpc::AuthGrpc;

/// Open storage (creating and migrating it when needed) and wire the engine.
pub async fn build_auth(cfg: &AppConfig) -> anyhow::Result<Arc<AuthService>> {
    common::env::ensure_storage_dir(&cfg.storage_path).await?;
    let conn = db::connect_and_migrate(&cfg.storage_path).await?;
    info!(storage_path = %cfg.storage_path, "storage ready");

    let repo = Arc::new(SeaOrmAuthRepository::new(conn));
    Ok(Arc::new(AuthService::with_repository(
        repo,
        AuthConfig { token_ttl: cfg.token_ttl() },
    )))
}

/// Serve the auth service on an already bound listener until `shutdown` resolves.
///
/// `timeout` bounds every request; in-flight requests are allowed to finish on shutdown.
pub async fn serve<F>(
    listener: TcpListener,
    auth: Arc<AuthService>,
    timeout: Duration,
    shutdown: F,
) -> Result<(), StartupError>
where
    F: Future<Output = ()> + Send,
{
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "grpc server listening");
    }

    Server::builder()
        .timeout(timeout)
        .trace_fn(|req| info_span!("grpc", path = %req.uri().path()))
        .add_service(AuthGrpc::new(auth).into_server())
        .serve_with_incoming_shutdown(TcpListenerStream::new(listener), shutdown)
        .await?;

    info!("grpc server stopped");
    Ok(())
}

/// Public entry: open storage, bind the configured address and serve until `shutdown`.
pub async fn run<F>(cfg: &AppConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send,
{
    let auth = build_auth(cfg).await?;

    let addr = cfg.grpc.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| StartupError::Bind { addr: addr.clone(), source })?;

    serve(listener, auth, cfg.grpc.timeout(), shutdown).await?;
    Ok(())
}
