#![allow(dead_code)]

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use namecast_domain::{Config, FieldSelection, NewUser};
use namecast_infra::DbManager;
use namecast_lib::{router, AppContext};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

pub const ADMIN_TOKEN: &str = "test-admin-token";

/// Application wired over a fresh temporary database.
pub struct TestApp {
    pub ctx: Arc<AppContext>,
    pub router: Router,
    _temp_dir: TempDir,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_token(Some(ADMIN_TOKEN))
    }

    pub fn with_token(token: Option<&str>) -> Self {
        let temp_dir = TempDir::new().expect("temp dir should be created");
        let db_path = temp_dir.path().join("api.db");

        let db = DbManager::new(&db_path, 4).expect("db manager should be created");
        db.run_migrations().expect("migrations should run");

        let mut config = Config::default();
        config.database.path = db_path.to_string_lossy().into_owned();
        config.server.admin_token = token.map(str::to_string);

        let ctx = Arc::new(AppContext::with_db(config, Arc::new(db)));
        let router = router(Arc::clone(&ctx));

        Self { ctx, router, _temp_dir: temp_dir }
    }

    pub async fn select(&self, selection: impl Into<FieldSelection>) {
        self.ctx.settings.save(&selection.into()).await.expect("selection should save");
    }

    pub async fn seed(&self, login: &str, first: &str, last: &str) -> i64 {
        self.ctx
            .users
            .create_user(NewUser {
                login: login.into(),
                email: format!("{login}@example.com"),
                first_name: first.into(),
                last_name: last.into(),
                roles: vec!["subscriber".into()],
                ..NewUser::default()
            })
            .await
            .expect("user should be created")
            .id
    }

    /// Send an authenticated request with an optional JSON body.
    pub async fn call(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        self.send(method, uri, body, Some(ADMIN_TOKEN)).await
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request should build");

        let response = self.router.clone().oneshot(request).await.expect("router should respond");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body should read");
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        (status, value)
    }
}
