//! Fake remote API and fixtures shared by integration tests.

#![allow(dead_code, reason = "not every test uses every fixture")]

use std::{
    sync::{Arc, Mutex},
    time::{SystemTime, UNIX_EPOCH},
};

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, Method, StatusCode, Uri},
    Json, Router,
};
use common::operations::{Delete, Insert, Select};
use jsonwebtoken::{EncodingKey, Header};
use serde::Serialize;
use serde_json::{json, Value};
use service::{
    command::LoadSession,
    infra::{
        storage::{self, Entry, Key, Memory},
        Rest, Storage,
    },
    Command as _,
};
use tracerr::Traced;

/// [`service::Service`] under test.
pub type Service = service::Service<Rest, Memory>;

/// Canned response of the [`FakeApi`].
#[derive(Clone, Debug)]
pub struct Route {
    pub method: Method,
    pub path: &'static str,
    pub status: StatusCode,
    pub body: Value,
}

impl Route {
    pub fn new(method: Method, path: &'static str, body: Value) -> Self {
        Self {
            method,
            path,
            status: StatusCode::OK,
            body,
        }
    }

    pub fn status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }
}

/// Request received by the [`FakeApi`].
#[derive(Clone, Debug)]
pub struct Call {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub body: Value,
}

#[derive(Debug, Default)]
struct Inner {
    routes: Vec<Route>,
    calls: Mutex<Vec<Call>>,
}

/// Remote API answering with canned [`Route`]s on a random local port.
#[derive(Clone, Debug)]
pub struct FakeApi {
    pub url: String,
    inner: Arc<Inner>,
}

impl FakeApi {
    pub async fn start(routes: Vec<Route>) -> Self {
        let inner = Arc::new(Inner {
            routes,
            calls: Mutex::default(),
        });
        let app = Router::new().fallback(respond).with_state(Arc::clone(&inner));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        drop(tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        }));

        Self { url, inner }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.inner.calls.lock().unwrap().clone()
    }

    pub fn rest(&self) -> Rest {
        Rest::new(&self.url).unwrap()
    }
}

async fn respond(
    State(inner): State<Arc<Inner>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, Json<Value>) {
    inner.calls.lock().unwrap().push(Call {
        method: method.clone(),
        path: uri.path().to_owned(),
        query: uri.query().map(ToOwned::to_owned),
        authorization: headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(ToOwned::to_owned),
        body: serde_json::from_slice(&body).unwrap_or(Value::Null),
    });

    inner
        .routes
        .iter()
        .find(|r| r.method == method && r.path == uri.path())
        .map_or_else(
            || {
                (
                    StatusCode::NOT_FOUND,
                    Json(json!({"message": "no such route"})),
                )
            },
            |r| (r.status, Json(r.body.clone())),
        )
}

/// Base URL nothing listens on.
pub const UNREACHABLE: &str = "http://127.0.0.1:9";

/// Stored [`User`] JSON of the player `ana`.
///
/// [`User`]: service::domain::User
pub const ANA: &str = r#"{"id":7,"username":"ana","email":"a@x.com"}"#;

/// Mints a JWT expiring `offset` seconds from now.
pub fn jwt(offset: i64) -> String {
    #[derive(Serialize)]
    struct Claims {
        sub: String,
        exp: i64,
    }

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs();
    let claims = Claims {
        sub: "ana".into(),
        exp: i64::try_from(now).unwrap() + offset,
    };
    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(b"toros"),
    )
    .unwrap()
}

/// Creates a [`Memory`] storage holding the provided entries.
pub async fn storage(entries: &[(Key, &str)]) -> Memory {
    let storage = Memory::new();
    for (key, value) in entries {
        storage
            .execute(Insert(Entry::new(*key, *value)))
            .await
            .unwrap();
    }
    storage
}

/// Creates a [`Service`] with `ana` logged in with the provided `token`.
pub async fn logged_in(rest: Rest, token: &str) -> (Service, Memory) {
    let storage = storage(&[
        (Key::SessionToken, token),
        (Key::UserData, ANA),
        (Key::UserRole, "J"),
        (Key::UserSuperuser, "N"),
    ])
    .await;
    let service = Service::new(rest, storage.clone());
    let state = service.execute(LoadSession).await.unwrap();
    assert!(state.is_logged_in());
    (service, storage)
}

/// [`Memory`] storage failing to write the value of a single [`Key`].
#[derive(Clone, Debug)]
pub struct Faulty {
    pub inner: Memory,
    pub broken: Key,
}

impl Storage<Select<Key>> for Faulty {
    type Ok = Option<String>;
    type Err = Traced<storage::Error>;

    async fn execute(&self, op: Select<Key>) -> Result<Self::Ok, Self::Err> {
        self.inner.execute(op).await
    }
}

impl Storage<Insert<Entry>> for Faulty {
    type Ok = ();
    type Err = Traced<storage::Error>;

    async fn execute(&self, op: Insert<Entry>) -> Result<Self::Ok, Self::Err> {
        if op.0.key == self.broken {
            return Err(tracerr::new!(storage::Error::Io(
                std::io::Error::other("disk full"),
            )));
        }
        self.inner.execute(op).await
    }
}

impl Storage<Delete<Key>> for Faulty {
    type Ok = ();
    type Err = Traced<storage::Error>;

    async fn execute(&self, op: Delete<Key>) -> Result<Self::Ok, Self::Err> {
        self.inner.execute(op).await
    }
}
