//! Test helpers: build AppState and router for integration tests.
//!
//! Run from workspace root: `cargo test -p pushup-api`.

pub mod fixtures;

use axum_test::TestServer;
use pushup_api::setup::routes;
use pushup_api::AppState;
use pushup_core::{Config, PushupConfig};
use pushup_storage::test_helpers::MockStorage;
use pushup_storage::Storage;
use std::collections::HashMap;
use std::sync::Arc;

pub const TEST_BUCKET: &str = "pixels";

/// Test application: server plus a handle on the in-memory store behind it.
pub struct TestApp {
    pub server: TestServer,
    pub storage: MockStorage,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }
}

/// Config from an explicit variable set, ignoring the process environment.
pub fn test_config(vars: &[(&str, &str)]) -> Config {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    let inner = PushupConfig::from_lookup(|key| map.get(key).cloned())
        .expect("Failed to build test config");
    Config(Box::new(inner))
}

fn build(config: Config, storage: MockStorage, with_bucket: bool) -> TestApp {
    let backend: Option<Arc<dyn Storage>> = if with_bucket {
        Some(Arc::new(storage.clone()))
    } else {
        None
    };
    let state = Arc::new(AppState::new(config.clone(), backend));
    let app = routes::setup_routes(&config, state).expect("Failed to build router");
    let server = TestServer::new(app.into_make_service()).expect("Failed to create test server");

    TestApp { server, storage }
}

/// App with a configured bucket backed by [`MockStorage`].
pub fn setup_test_app() -> TestApp {
    setup_test_app_with(&[])
}

/// Same as [`setup_test_app`] with extra configuration variables.
pub fn setup_test_app_with(extra: &[(&str, &str)]) -> TestApp {
    let mut vars = vec![("S3_BUCKET_NAME", TEST_BUCKET)];
    vars.extend_from_slice(extra);
    build(
        test_config(&vars),
        MockStorage::with_bucket(TEST_BUCKET),
        true,
    )
}

/// App started without `S3_BUCKET_NAME`.
pub fn setup_test_app_without_bucket() -> TestApp {
    build(test_config(&[]), MockStorage::new(), false)
}
