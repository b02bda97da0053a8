use anyhow::{anyhow, Context};
use futures::future::{BoxFuture, FutureExt as _, Shared};
use poolguard_shared::{
    const_config::path::{PathSpec, PATH_AUTHENTICATE, PATH_INFO, PATH_PROPERTIES},
    errors::AuthError,
    req_args::LoginReqArgs,
    session::SessionInfo,
};
use reqwest::{Method, Response, StatusCode};
use secrecy::ExposeSecret as _;
use std::collections::HashMap;
use std::fmt::Debug;
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use tracing::info;

pub mod api;

/// For endpoints that take no arguments
pub const NO_ARGS: &[(&str, &str)] = &[];

/// In-progress or completed schema fetch shared by every caller for a table
type SharedFieldsFetch = Shared<BoxFuture<'static, Result<Arc<serde_json::Value>, FieldsError>>>;

/// Clonable error so a failed shared fetch can be reported to every waiter
#[derive(Debug, Clone, thiserror::Error)]
#[error("{0:#}")]
struct FieldsError(Arc<anyhow::Error>);

#[derive(Debug, Clone)]
pub struct Client {
    api_client: reqwest::Client,
    inner: Arc<Mutex<ClientInner>>,
}

struct ClientInner {
    server_address: String,
    /// Only ever holds a value whose `authenticated` flag is true
    info: Option<Arc<SessionInfo>>,
    fields: HashMap<String, SharedFieldsFetch>,
}

impl Debug for ClientInner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientInner")
            .field("server_address", &self.server_address)
            .field("info", &self.info)
            .field("fields", &self.fields.keys())
            .finish()
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new("http://localhost:5120".to_string())
    }
}

/// Authentication level granted by the authenticate endpoint
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthLevel {
    /// Session is fully authenticated
    Full,
    /// Primary credentials accepted, second factor still outstanding
    Partial,
}

impl AuthLevel {
    /// Returns `true` if the login outcome is [`Full`]
    ///
    /// [`Full`]: AuthLevel::Full
    #[must_use]
    pub fn is_full(&self) -> bool {
        matches!(self, Self::Full)
    }
}

impl FromStr for AuthLevel {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "full" => Ok(Self::Full),
            "partial" => Ok(Self::Partial),
            other => Err(AuthError::UnrecognizedAuthType(other.to_string())),
        }
    }
}

impl ClientInner {
    #[tracing::instrument]
    fn new(server_address: String) -> Self {
        Self {
            server_address,
            info: None,
            fields: HashMap::new(),
        }
    }
}

impl Client {
    #[tracing::instrument(name = "NEW CLIENT-CORE")]
    pub fn new(server_address: String) -> Self {
        let api_client = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .expect("Unable to create reqwest client");
        Self {
            api_client,
            inner: Arc::new(Mutex::new(ClientInner::new(server_address))),
        }
    }

    /// Sends `body` form urlencoded and returns the raw response. Only
    /// transport failures are errors; HTTP error statuses are handed back to
    /// the caller to inspect
    #[tracing::instrument(skip(body))]
    pub async fn post<T>(&self, path: &str, body: &T) -> anyhow::Result<Response>
    where
        T: serde::Serialize + ?Sized,
    {
        self.api_client
            .post(self.path_to_url(path))
            .form(body)
            .send()
            .await
            .context("failed to send request")
    }

    #[tracing::instrument]
    pub async fn login(&self, args: LoginReqArgs) -> anyhow::Result<AuthLevel> {
        let form = [
            ("Username", args.username.as_str()),
            ("Password", args.password.expose_secret()),
        ];
        let response = self
            .api_client
            .post(self.path_to_url(PATH_AUTHENTICATE.path))
            .form(&form)
            .send()
            .await;
        process_login(response, self.clone()).await
    }

    /// Serves the cached value when one is present (only authenticated
    /// responses are ever cached). On a miss the freshly fetched value is
    /// returned to the caller whether or not it was cacheable
    #[tracing::instrument]
    pub async fn get_info(&self) -> anyhow::Result<Arc<SessionInfo>> {
        if let Some(info) = self.cached_info() {
            return Ok(info);
        }
        let fresh: SessionInfo = self.send_request_expect_json(PATH_INFO, &NO_ARGS).await?;
        let fresh = Arc::new(fresh);
        if fresh.authenticated {
            self.inner.lock().expect("mutex poisoned").info = Some(Arc::clone(&fresh));
        }
        Ok(fresh)
    }

    /// Property schema for `table`. Lookups are single-flight: concurrent
    /// callers for the same uncached table share one request, and the
    /// completed fetch stays cached until the auth state changes
    #[tracing::instrument]
    pub async fn get_fields(&self, table: &str) -> anyhow::Result<Arc<serde_json::Value>> {
        // Built before taking the lock, path_to_url needs it too
        let request = self
            .api_client
            .get(self.path_to_url(&PATH_PROPERTIES.resolve(table)));
        let entry = {
            let mut guard = self.inner.lock().expect("mutex poisoned");
            match guard.fields.get(table) {
                Some(entry) => entry.clone(),
                None => {
                    let fetch = async move {
                        process_json_body::<serde_json::Value>(request.send().await)
                            .await
                            .map(Arc::new)
                            .map_err(|e| FieldsError(Arc::new(e)))
                    }
                    .boxed()
                    .shared();
                    guard.fields.insert(table.to_string(), fetch.clone());
                    fetch
                }
            }
        };
        entry.await.map_err(|e| anyhow!(e))
    }

    /// Session info from the cache, if an authenticated fetch has happened
    /// since the last auth state change
    pub fn cached_info(&self) -> Option<Arc<SessionInfo>> {
        self.inner.lock().expect("mutex poisoned").info.clone()
    }

    pub fn is_logged_in(&self) -> bool {
        self.cached_info().is_some()
    }

    fn clear_cached_state(&self) {
        let mut guard = self.inner.lock().expect("mutex poisoned");
        guard.info = None;
        guard.fields.clear();
    }

    // WARNING: Must skip args as it may contain sensitive info and "safe"
    // versions would usually already be logged by the caller
    #[tracing::instrument(skip(args))]
    async fn send_request<T>(
        &self,
        path_spec: PathSpec,
        url_path: &str,
        args: &T,
    ) -> reqwest::Result<Response>
    where
        T: serde::Serialize + Debug,
    {
        let is_get_method = path_spec.method == Method::GET;
        let mut request = self
            .api_client
            .request(path_spec.method, self.path_to_url(url_path));
        request = if is_get_method {
            request.query(&args)
        } else {
            request.form(&args)
        };
        request.send().await
    }

    async fn send_request_expect_json<T, U>(&self, path_spec: PathSpec, args: &T) -> anyhow::Result<U>
    where
        T: serde::Serialize + Debug,
        U: serde::de::DeserializeOwned + Debug,
    {
        let url_path = path_spec.path;
        process_json_body(self.send_request(path_spec, url_path, args).await).await
    }

    async fn send_request_expect_json_at<T, U>(
        &self,
        path_spec: PathSpec,
        id: &str,
        args: &T,
    ) -> anyhow::Result<U>
    where
        T: serde::Serialize + Debug,
        U: serde::de::DeserializeOwned + Debug,
    {
        let url_path = path_spec.resolve(id);
        process_json_body(self.send_request(path_spec, &url_path, args).await).await
    }

    async fn send_request_expect_text<T>(&self, path_spec: PathSpec, args: &T) -> anyhow::Result<String>
    where
        T: serde::Serialize + Debug,
    {
        let url_path = path_spec.path;
        process_text_body(self.send_request(path_spec, url_path, args).await).await
    }

    async fn send_request_expect_text_at<T>(
        &self,
        path_spec: PathSpec,
        id: &str,
        args: &T,
    ) -> anyhow::Result<String>
    where
        T: serde::Serialize + Debug,
    {
        let url_path = path_spec.resolve(id);
        process_text_body(self.send_request(path_spec, &url_path, args).await).await
    }

    async fn send_request_expect_empty<T>(&self, path_spec: PathSpec, args: &T) -> anyhow::Result<()>
    where
        T: serde::Serialize + Debug,
    {
        let url_path = path_spec.path;
        process_empty(self.send_request(path_spec, url_path, args).await).await
    }

    #[tracing::instrument(ret)]
    fn path_to_url(&self, path: &str) -> String {
        format!(
            "{}{path}",
            &self
                .inner
                .lock()
                .expect("failed to unlock client mutex")
                .server_address
        )
    }
}

#[tracing::instrument(ret, err(Debug))]
async fn process_login(
    response: reqwest::Result<Response>,
    client: Client,
) -> anyhow::Result<AuthLevel> {
    let (response, status) = extract_response(response)?;
    if status != StatusCode::OK {
        return Err(AuthError::InvalidCredentials.into());
    }
    let token = response.text().await.context("failed to read auth type")?;
    let level: AuthLevel = token.trim_end().parse()?;
    if level.is_full() {
        // A fresh fully authenticated session invalidates anything cached
        // for the previous one
        client.clear_cached_state();
    }
    Ok(level)
}

#[tracing::instrument(ret, err(Debug))]
async fn process_empty(response: reqwest::Result<Response>) -> anyhow::Result<()> {
    let (response, status) = extract_response(response)?;
    if status == StatusCode::OK {
        Ok(())
    } else {
        Err(handle_error(response).await)
    }
}

#[tracing::instrument(ret, err(Debug))]
async fn process_json_body<T>(response: reqwest::Result<Response>) -> anyhow::Result<T>
where
    T: Debug + serde::de::DeserializeOwned,
{
    let (response, status) = extract_response(response)?;
    match status {
        StatusCode::OK => Ok(response
            .json()
            .await
            .context("failed to parse result as json")?),
        _ => Err(handle_error(response).await),
    }
}

#[tracing::instrument(ret, err(Debug))]
async fn process_text_body(response: reqwest::Result<Response>) -> anyhow::Result<String> {
    let (response, status) = extract_response(response)?;
    match status {
        StatusCode::OK => response.text().await.context("failed to read response body"),
        _ => Err(handle_error(response).await),
    }
}

#[tracing::instrument(ret)]
async fn handle_error(response: Response) -> anyhow::Error {
    let status = response.status();
    debug_assert!(
        !status.is_success(),
        "this is supposed to be an error, right? Status code is: {status}"
    );
    let Ok(body) = response.text().await else {
        return anyhow!("failed to get response body");
    };
    let body = body.trim_end();
    if body.is_empty() {
        anyhow!("request failed with status code: {status} and no body")
    } else {
        anyhow!("{body}")
    }
}

/// Provides a way to standardize the error message
#[tracing::instrument(ret, err(Debug))]
fn extract_response(
    response: reqwest::Result<Response>,
) -> anyhow::Result<(Response, StatusCode)> {
    if response.is_err() {
        info!("Response is err: {:#?}", response);
    }
    let response = response.context("failed to send request")?;
    let status = response.status();
    Ok((response, status))
}
