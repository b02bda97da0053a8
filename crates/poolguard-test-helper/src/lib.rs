//! Spins up a mock pool manager backend so the client can be exercised over
//! real HTTP. The backend keeps per endpoint request counters and exposes a
//! few knobs (auth type token, logout status, properties delay) so tests can
//! drive the interesting paths

#![warn(unused_crate_dependencies)]

use actix_web::{http::StatusCode, web, App, HttpResponse, HttpServer};
use chrono::{TimeZone as _, Utc};
use poolguard_client_core::{AuthLevel, Client};
use poolguard_shared::{
    files::FileEntry,
    notifications::{Notification, Severity},
    pool::{Container, Data, Pool, Property},
    req_args::LoginReqArgs,
    session::SessionInfo,
    telemetry::{self, get_subscriber, init_subscriber},
    tfa::{TfaChallenge, TfaEnabled, TotpSetup},
};
use std::collections::HashMap;
use std::net::TcpListener;
use std::ops::Deref;
use std::sync::atomic::{AtomicBool, AtomicU16, AtomicUsize, Ordering};
use std::sync::{Arc, LazyLock, Mutex};
use std::time::Duration;
use uuid::Uuid;

/// TOTP code the mock backend accepts
pub const VALID_TOTP_CODE: &str = "123456";
/// Passphrase the mock backend's key load endpoint accepts
pub const VALID_PASSPHRASE: &str = "correct horse";

// Ensure that the `tracing` stack is only initialised once
pub static TRACING: LazyLock<String> = LazyLock::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();
    if std::env::var("TEST_LOG").is_ok() {
        let log_file_name = format!("client_tests{}", Uuid::new_v4());
        let (file, path) = telemetry::create_trace_file(&log_file_name).unwrap();
        let subscriber = get_subscriber(subscriber_name, default_filter_level, file);
        init_subscriber(subscriber).unwrap();
        format!("Traces for tests being written to: {path:?}")
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber).unwrap();
        "Traces set to std::io::sink".to_string()
    }
});

fn start_tracing() {
    // Accessing TRACING also forces the LazyLock to initialize
    let logging_msg = TRACING.deref();
    println!("{logging_msg}");
}

#[derive(Debug, Clone)]
pub struct TestUser {
    pub username: String,
    pub password: String,
}

impl TestUser {
    pub fn generate() -> Self {
        Self {
            username: format!("user-{}", Uuid::new_v4()),
            password: Uuid::new_v4().to_string(),
        }
    }

    pub fn login_args(&self) -> LoginReqArgs {
        LoginReqArgs::new(self.username.clone(), self.password.clone().into())
    }
}

/// Knobs and counters for the mock backend, shared with the test body
#[derive(Debug)]
pub struct BackendState {
    /// Token the authenticate endpoint answers with on valid credentials
    auth_type: Mutex<String>,
    /// What the info endpoint reports as the session's auth status
    authenticated: AtomicBool,
    tfa_enabled: AtomicBool,
    /// Status code the logout endpoint answers with
    logout_status: AtomicU16,
    /// How long the properties endpoint stalls before answering
    fields_delay: Mutex<Duration>,
    info_requests: AtomicUsize,
    fields_requests: Mutex<HashMap<String, usize>>,
    notifications: Mutex<Vec<Notification>>,
}

impl Default for BackendState {
    fn default() -> Self {
        Self {
            auth_type: Mutex::new("full".to_string()),
            authenticated: AtomicBool::new(false),
            tfa_enabled: AtomicBool::new(false),
            logout_status: AtomicU16::new(200),
            fields_delay: Mutex::new(Duration::ZERO),
            info_requests: AtomicUsize::new(0),
            fields_requests: Mutex::new(HashMap::new()),
            notifications: Mutex::new(sample_notifications()),
        }
    }
}

impl BackendState {
    pub fn set_auth_type(&self, token: &str) {
        *self.auth_type.lock().unwrap() = token.to_string();
    }

    pub fn set_logout_status(&self, status: u16) {
        self.logout_status.store(status, Ordering::SeqCst);
    }

    pub fn set_fields_delay(&self, delay: Duration) {
        *self.fields_delay.lock().unwrap() = delay;
    }

    pub fn set_tfa_enabled(&self, enabled: bool) {
        self.tfa_enabled.store(enabled, Ordering::SeqCst);
    }

    pub fn info_request_count(&self) -> usize {
        self.info_requests.load(Ordering::SeqCst)
    }

    pub fn fields_request_count(&self, table: &str) -> usize {
        self.fields_requests
            .lock()
            .unwrap()
            .get(table)
            .copied()
            .unwrap_or(0)
    }

    /// Notifications in the order the backend serves them (oldest first)
    pub fn served_notifications(&self) -> Vec<Notification> {
        self.notifications.lock().unwrap().clone()
    }
}

#[derive(Debug)]
struct MockBackend {
    state: Arc<BackendState>,
    user: TestUser,
}

#[derive(Debug)]
pub struct TestBackend {
    pub address: String,
    pub state: Arc<BackendState>,
    pub core_client: Client,
    pub test_user: TestUser,
}

impl TestBackend {
    pub async fn login(&self) -> anyhow::Result<AuthLevel> {
        self.core_client.login(self.test_user.login_args()).await
    }
}

pub async fn spawn_backend() -> TestBackend {
    start_tracing();
    let test_user = TestUser::generate();
    let state = Arc::new(BackendState::default());
    let listener = TcpListener::bind("127.0.0.1:0").expect("failed to bind random port");
    let address = format!(
        "http://127.0.0.1:{}",
        listener.local_addr().expect("failed to get port").port()
    );

    let app_data = web::Data::new(MockBackend {
        state: Arc::clone(&state),
        user: test_user.clone(),
    });
    let server = HttpServer::new(move || {
        App::new()
            .app_data(app_data.clone())
            .route("/api/v0/authenticate", web::post().to(authenticate))
            .route("/api/v0/logout", web::post().to(logout))
            .route("/api/v0/info", web::get().to(info))
            .route("/api/v0/support", web::get().to(support))
            .route("/api/v0/pools", web::get().to(pools))
            .route("/api/v0/pool/{id}", web::get().to(pool))
            .route("/api/v0/pool/{id}/scrub/start", web::post().to(scrub_start))
            .route("/api/v0/pool/{id}/scrub/pause", web::post().to(scrub_pause))
            .route("/api/v0/pool/{id}/trim", web::post().to(trim))
            .route("/api/v0/pool/{id}/iostat", web::get().to(iostat))
            .route("/api/v0/properties/{table}", web::get().to(properties))
            .route("/api/v0/data/{id}/info", web::get().to(data_info))
            .route("/api/v0/data/{id}/mount", web::post().to(mount))
            .route("/api/v0/data/{id}/unmount", web::post().to(unmount))
            .route("/api/v0/key/{id}/load", web::post().to(key_load))
            .route("/api/v0/key/{id}/unload", web::post().to(key_unload))
            .route("/api/v0/files/browse/{id}", web::get().to(browse))
            .route(
                "/api/v0/notifications/list",
                web::get().to(notifications_list),
            )
            .route("/api/v0/tfa/challenge", web::get().to(tfa_challenge))
            .route("/api/v0/tfa/enabled", web::get().to(tfa_enabled))
            .route(
                "/api/v0/tfa/totp/initialize",
                web::get().to(totp_initialize),
            )
            .route("/api/v0/tfa/totp/save", web::post().to(totp_save))
            .route(
                "/api/v0/tfa/totp/authenticate",
                web::post().to(totp_authenticate),
            )
    })
    .listen(listener)
    .expect("failed to listen on test port")
    .run();
    tokio::spawn(server);

    let core_client = Client::new(address.clone());
    TestBackend {
        address,
        state,
        core_client,
        test_user,
    }
}

/// A healthy pool as the mock backend reports it
pub fn sample_pool(name: &str) -> Pool {
    Pool {
        name: name.to_string(),
        state: "ONLINE".to_string(),
        status: String::new(),
        scan: "none requested".to_string(),
        scanned: 0.0,
        scan_paused: false,
        action: String::new(),
        see: String::new(),
        containers: vec![Container {
            name: name.to_string(),
            state: "ONLINE".to_string(),
            read: "0".to_string(),
            write: "0".to_string(),
            cksum: "0".to_string(),
            status: String::new(),
            level: 0,
        }],
        errors: "No known data errors".to_string(),
        raw: String::new(),
        datasets: Vec::new(),
        snapshots: Vec::new(),
        properties: HashMap::from([(
            "health".to_string(),
            Property {
                name: "health".to_string(),
                value: "ONLINE".to_string(),
                hmac: String::new(),
            },
        )]),
    }
}

fn sample_notifications() -> Vec<Notification> {
    vec![
        Notification {
            id: 1,
            timestamp: Utc.with_ymd_and_hms(2024, 11, 28, 8, 0, 0).unwrap(),
            severity: Severity::Info,
            message: "Pool \"tank\" scrub: started".to_string(),
        },
        Notification {
            id: 2,
            timestamp: Utc.with_ymd_and_hms(2024, 11, 28, 9, 30, 0).unwrap(),
            severity: Severity::Warning,
            message: "Pool \"tank\" new status: One or more devices has experienced an error"
                .to_string(),
        },
        Notification {
            id: 3,
            timestamp: Utc.with_ymd_and_hms(2024, 11, 28, 10, 0, 0).unwrap(),
            severity: Severity::Critical,
            message: "Pool \"tank\" state changed: ONLINE -> DEGRADED".to_string(),
        },
    ]
}

async fn authenticate(
    data: web::Data<MockBackend>,
    form: web::Form<HashMap<String, String>>,
) -> HttpResponse {
    let empty = String::new();
    let username = form.get("Username").unwrap_or(&empty);
    let password = form.get("Password").unwrap_or(&empty);
    if *username != data.user.username || *password != data.user.password {
        return HttpResponse::Forbidden().body("Forbidden\n");
    }
    let token = data.state.auth_type.lock().unwrap().clone();
    data.state
        .authenticated
        .store(token == "full", Ordering::SeqCst);
    // Trailing newline matches the real backend's text responses
    HttpResponse::Ok().body(format!("{token}\n"))
}

async fn logout(data: web::Data<MockBackend>) -> HttpResponse {
    data.state.authenticated.store(false, Ordering::SeqCst);
    let status = StatusCode::from_u16(data.state.logout_status.load(Ordering::SeqCst))
        .unwrap_or(StatusCode::OK);
    HttpResponse::build(status).finish()
}

async fn info(data: web::Data<MockBackend>) -> web::Json<SessionInfo> {
    data.state.info_requests.fetch_add(1, Ordering::SeqCst);
    let authenticated = data.state.authenticated.load(Ordering::SeqCst);
    web::Json(SessionInfo {
        product: "Poolguard".to_string(),
        authenticated,
        debug: false,
        zfs_version: authenticated.then(|| "zfs-2.1.5".to_string()),
        commit: authenticated.then(|| "abc1234".to_string()),
        build_time: authenticated.then(|| "2024-11-30T10:00:00Z".to_string()),
    })
}

async fn support(data: web::Data<MockBackend>) -> HttpResponse {
    let body = format!(
        "Poolguard information:\n\tUsername: {}\n\tBuild: abc1234\n\nZFS information:\n\tZFS version: zfs-2.1.5\n",
        data.user.username
    );
    HttpResponse::Ok().body(body)
}

async fn pools() -> web::Json<Vec<Pool>> {
    web::Json(vec![sample_pool("tank"), sample_pool("backup")])
}

async fn pool(path: web::Path<String>) -> web::Json<Pool> {
    web::Json(sample_pool(&path.into_inner()))
}

async fn scrub_start(path: web::Path<String>) -> HttpResponse {
    let _ = path.into_inner();
    HttpResponse::Ok().body("")
}

async fn scrub_pause(path: web::Path<String>) -> HttpResponse {
    let _ = path.into_inner();
    HttpResponse::Ok().body("")
}

async fn trim(path: web::Path<String>) -> HttpResponse {
    let _ = path.into_inner();
    HttpResponse::Ok().body("")
}

async fn iostat(path: web::Path<String>) -> HttpResponse {
    let pool = path.into_inner();
    HttpResponse::Ok().body(format!(
        "              capacity     operations     bandwidth\npool        alloc   free   read  write   read  write\n{pool}       1.2G  10.8G      0      0    10K    25K\n"
    ))
}

async fn properties(data: web::Data<MockBackend>, path: web::Path<String>) -> web::Json<serde_json::Value> {
    let table = path.into_inner();
    *data
        .state
        .fields_requests
        .lock()
        .unwrap()
        .entry(table.clone())
        .or_insert(0) += 1;
    let delay = *data.state.fields_delay.lock().unwrap();
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
    web::Json(serde_json::json!({
        "Table": table,
        "Fields": ["name", "used", "avail"],
    }))
}

async fn data_info(path: web::Path<String>) -> web::Json<Data> {
    let name = path.into_inner();
    web::Json(Data {
        name: name.clone(),
        kind: "filesystem".to_string(),
        properties: HashMap::from([(
            "used".to_string(),
            Property {
                name: "used".to_string(),
                value: "1048576".to_string(),
                hmac: String::new(),
            },
        )]),
        internal: HashMap::from([(
            "keylocation".to_string(),
            Property {
                name: "keylocation".to_string(),
                value: "prompt".to_string(),
                hmac: String::new(),
            },
        )]),
    })
}

async fn mount(path: web::Path<String>) -> HttpResponse {
    let _ = path.into_inner();
    HttpResponse::Ok().body("")
}

async fn unmount(path: web::Path<String>) -> HttpResponse {
    let _ = path.into_inner();
    HttpResponse::Ok().body("")
}

async fn key_load(form: web::Form<HashMap<String, String>>) -> HttpResponse {
    match form.get("Passphrase").map(String::as_str) {
        Some(VALID_PASSPHRASE) => HttpResponse::Ok().body(""),
        Some(_) => HttpResponse::Unauthorized().body("Incorrect passphrase\n"),
        None => HttpResponse::BadRequest().body("Missing Passphrase parameter\n"),
    }
}

async fn key_unload(form: web::Form<HashMap<String, String>>) -> HttpResponse {
    if form.get("id").is_none() {
        return HttpResponse::BadRequest().body("Missing id parameter\n");
    }
    HttpResponse::Ok().body("")
}

async fn browse(path: web::Path<String>) -> web::Json<Vec<FileEntry>> {
    let dir = path.into_inner();
    web::Json(vec![
        FileEntry {
            kind: "@".to_string(),
            name: dir,
            hmac: String::new(),
            size: "0".to_string(),
        },
        FileEntry {
            kind: "fold".to_string(),
            name: "documents".to_string(),
            hmac: "hmac-documents".to_string(),
            size: "4096".to_string(),
        },
        FileEntry {
            kind: "file".to_string(),
            name: "notes.txt".to_string(),
            hmac: "hmac-notes".to_string(),
            size: "812".to_string(),
        },
    ])
}

async fn notifications_list(data: web::Data<MockBackend>) -> web::Json<Vec<Notification>> {
    web::Json(data.state.served_notifications())
}

async fn tfa_challenge() -> web::Json<TfaChallenge> {
    web::Json(TfaChallenge {
        provider: "totp".to_string(),
    })
}

async fn tfa_enabled(data: web::Data<MockBackend>) -> web::Json<TfaEnabled> {
    web::Json(TfaEnabled {
        enabled: data.state.tfa_enabled.load(Ordering::SeqCst),
    })
}

async fn totp_initialize() -> web::Json<TotpSetup> {
    web::Json(TotpSetup {
        secret: "JBSWY3DPEHPK3PXP".to_string(),
        image: "data:image/png;base64,iVBORw0KGgo=".to_string(),
    })
}

async fn totp_save(form: web::Form<HashMap<String, String>>) -> HttpResponse {
    if form.get("secret").is_none() || form.get("code").is_none() {
        return HttpResponse::BadRequest().body("Missing parameter\n");
    }
    if form.get("code").map(String::as_str) != Some(VALID_TOTP_CODE) {
        return HttpResponse::BadRequest()
            .body("Invalid code - check that the time is in sync on the server and your phone\n");
    }
    HttpResponse::Ok().body("OK\n")
}

async fn totp_authenticate(
    data: web::Data<MockBackend>,
    form: web::Form<HashMap<String, String>>,
) -> HttpResponse {
    if form.get("code").map(String::as_str) == Some(VALID_TOTP_CODE) {
        data.state.authenticated.store(true, Ordering::SeqCst);
        HttpResponse::Ok().body("OK\n")
    } else {
        HttpResponse::Forbidden().body("Invalid code\n")
    }
}
