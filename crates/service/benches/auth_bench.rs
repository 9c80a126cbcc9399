use criterion::{criterion_group, criterion_main, Criterion};
use std::{sync::Arc, time::Duration};

use service::auth::domain::{LoginInput, RegisterInput};
use service::auth::repository::mock::MockAuthRepository;
use service::auth::{AuthConfig, AuthService};

fn setup() -> AuthService {
    let repo = Arc::new(MockAuthRepository::default());
    repo.insert_app(1, "bench", "bench-secret");
    AuthService::with_repository(repo, AuthConfig { token_ttl: Duration::from_secs(3600) })
}

fn bench_login(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let svc = setup();
    rt.block_on(svc.register(RegisterInput::new("bench@example.com", "Benchmark1"))).unwrap();

    let svc = &svc;
    c.bench_function("auth_login_verify_and_issue", |b| {
        b.to_async(&rt).iter(|| async move {
            svc.login(LoginInput::new("bench@example.com", "Benchmark1", 1)).await.unwrap()
        });
    });
}

fn bench_register(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let svc = setup();

    let svc = &svc;
    c.bench_function("auth_register_hash", |b| {
        b.to_async(&rt).iter(|| async move {
            let email = format!("{}@example.com", uuid::Uuid::new_v4());
            svc.register(RegisterInput::new(email, "Benchmark1")).await.unwrap()
        });
    });
}

criterion_group!(benches, bench_login, bench_register);
criterion_main!(benches);
