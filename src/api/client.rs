//
//  generic-api
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Generic Envelope Client
//!
//! This module provides [`GenericApi<T>`], one client per REST collection of an
//! envelope-style backend.
//!
//! ## Request Flow
//!
//! 1. Build the URL from the API root, the resource key and the id or sub-path
//! 2. Attach the session headers and, where applicable, the query parameters
//! 3. Perform the call
//! 4. Classify transport failures and non-success statuses
//! 5. Unwrap the envelope; return the payload only when `isSuccess` is true
//!
//! Every operation issues exactly one request and resolves to an [`Outcome`].
//! There are no retries, no caching and no timeout.
//!
//! ## Operations
//!
//! | Operation | Method | URL | Returns |
//! |-----------|--------|-----|---------|
//! | [`get`](GenericApi::get) | GET | `{root}/{key}/{id}` | `data` |
//! | [`simple_get`](GenericApi::simple_get) | GET | `{root}/{key}[/{id}][/{path}]` | `data` or `items` |
//! | [`search`](GenericApi::search) | GET | `{root}/{key}` | whole envelope |
//! | [`create`](GenericApi::create) | POST | `{root}/{key}[/{path}]` | `data` |
//! | [`update`](GenericApi::update) | PUT | `{root}/{key}/{path}` or `{root}/{key}/{id}` | `data` |
//! | [`remove`](GenericApi::remove) | DELETE | `{root}/{key}/{id}` | nothing |
//! | [`simple_post`](GenericApi::simple_post) | POST | `{root}/{key}` | `data` |
//! | [`export_report`](GenericApi::export_report) | GET | `{root}/{path}` or `{root}/{key}` | saved file |

use std::fmt::Display;
use std::marker::PhantomData;
use std::sync::Arc;

use anyhow::Result;
use reqwest::header::HeaderMap;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::{Backend, Config};
use crate::session::{KeyringSession, SessionSource, UnloadGuard};

use super::common::{
    classify_status, ApiError, Envelope, GetParams, Outcome, PageRequest, Payload, QueryParams,
};
use super::export::{
    content_disposition, resolve_content_type, resolve_file_name, DirectorySaver, ExportedReport,
    FileSaver,
};
use super::headers::build_headers;

/// Client for one REST collection of an envelope-style backend.
///
/// # Type Parameters
///
/// * `T` - The collection's model, sent as request body and read from `data`/`items`
///
/// # Creating a Client
///
/// ```rust,no_run
/// use generic_api::api::GenericApi;
/// use generic_api::config::{Backend, Config};
/// use generic_api::session::SessionContext;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct Invoice { id: u64, amount: f64 }
///
/// let config = Config::load()?;
/// let invoices: GenericApi<Invoice> = GenericApi::new("invoices", Backend::Ems, &config)?
///     .with_session(SessionContext::new().with_external_token("token").with_org_code("ORG"));
/// # Ok::<(), anyhow::Error>(())
/// ```
///
/// # Session Expiry
///
/// A 401 resolves to [`Outcome::SessionExpired`] and disarms the client's
/// [`UnloadGuard`]. Clients sharing a guard (see
/// [`with_unload_guard`](Self::with_unload_guard)) all observe the expiry.
pub struct GenericApi<T> {
    /// The underlying HTTP client
    http: Client,
    /// The resource key, i.e. the collection path segment
    key: String,
    /// Which deployment this client talks to
    backend: Backend,
    /// `{base}/api`
    root_url: String,
    /// Where session tokens are read from on every request
    session: Arc<dyn SessionSource>,
    /// Receives exported reports
    saver: Arc<dyn FileSaver>,
    unload_guard: UnloadGuard,
    _model: PhantomData<fn() -> T>,
}

impl<T> GenericApi<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Creates a client for the collection `key` of `backend`.
    ///
    /// The API root comes from `config` (`{base}/api`, or `{backend}/api` when
    /// the backend has no configured URL). Tokens are read from the system
    /// keyring and reports are saved to the configured export directory until
    /// replaced with [`with_session`](Self::with_session) and
    /// [`with_file_saver`](Self::with_file_saver).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client could not be created.
    pub fn new(key: &str, backend: Backend, config: &Config) -> Result<Self> {
        Ok(Self::with_root_url(key, backend, config.root_url(backend))?
            .with_file_saver(DirectorySaver::new(config.export_dir())))
    }

    /// Creates a client against an explicit API root, e.g. `https://host/api`.
    pub fn with_root_url(key: &str, backend: Backend, root_url: impl Into<String>) -> Result<Self> {
        Ok(Self {
            http: Client::builder()
                .user_agent(format!("{}/{}", crate::APP_NAME, crate::VERSION))
                .build()?,
            key: key.trim_matches('/').to_string(),
            backend,
            root_url: root_url.into().trim_end_matches('/').to_string(),
            session: Arc::new(KeyringSession::new()),
            saver: Arc::new(DirectorySaver::default()),
            unload_guard: UnloadGuard::new(),
            _model: PhantomData,
        })
    }

    /// Sets where session tokens are read from.
    pub fn with_session(mut self, session: impl SessionSource + 'static) -> Self {
        self.session = Arc::new(session);
        self
    }

    /// Sets the capability exported reports are handed to.
    pub fn with_file_saver(mut self, saver: impl FileSaver + 'static) -> Self {
        self.saver = Arc::new(saver);
        self
    }

    /// Replaces the client's unload guard, typically with one shared by the host.
    pub fn with_unload_guard(mut self, guard: UnloadGuard) -> Self {
        self.unload_guard = guard;
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    pub fn root_url(&self) -> &str {
        &self.root_url
    }

    pub fn unload_guard(&self) -> &UnloadGuard {
        &self.unload_guard
    }

    /// `{root}/{key}`
    pub fn collection_url(&self) -> String {
        format!("{}/{}", self.root_url, self.key)
    }

    /// `{root}/{key}/{segment}`
    fn member_url(&self, segment: impl Display) -> String {
        format!("{}/{}", self.collection_url(), segment)
    }

    fn headers(&self) -> Result<HeaderMap, ApiError> {
        build_headers(self.backend, &self.session.load())
    }

    /// Fetches one model by id.
    pub async fn get(&self, id: impl Display) -> Outcome<T> {
        let result = async {
            let request = self.http.get(self.member_url(id));
            self.fetch_envelope::<T>(request).await?.into_data()
        }
        .await;
        self.settle("get", result)
    }

    /// Fetches `{key}[/{id}][/{path}]` and returns `data`, or `items` when
    /// `data` is absent.
    pub async fn simple_get(&self, params: Option<&GetParams>) -> Outcome<Payload<T>> {
        let result = async {
            let mut url = self.collection_url();
            let mut query = None;
            if let Some(params) = params {
                if let Some(id) = params.id.as_deref().filter(|id| !id.is_empty()) {
                    url = format!("{}/{}", url, id);
                }
                if let Some(path) = params.path.as_deref().filter(|path| !path.is_empty()) {
                    url = format!("{}/{}", url, path);
                }
                query = params.page_request.as_ref().map(PageRequest::to_query_params);
            }

            let request = with_query(self.http.get(url), query.as_ref());
            self.fetch_envelope::<T>(request).await?.into_payload()
        }
        .await;
        self.settle("simple_get", result)
    }

    /// Runs a paginated search and returns the whole envelope, so pagination
    /// metadata (`totalCount`, `pageNo`, ...) is available next to `items`.
    pub async fn search(&self, page_request: &PageRequest) -> Outcome<Envelope<T>> {
        let result = async {
            let query = page_request.to_query_params();
            let request = with_query(self.http.get(self.collection_url()), Some(&query));
            self.fetch_envelope::<T>(request).await
        }
        .await;
        self.settle("search", result)
    }

    /// Creates a model with a POST to `{key}` or `{key}/{path}`.
    pub async fn create(&self, model: &T, path: Option<&str>) -> Outcome<T> {
        let result = async {
            let url = match path.filter(|path| !path.is_empty()) {
                Some(path) => self.member_url(path),
                None => self.collection_url(),
            };
            let request = self.http.post(url).json(model);
            self.fetch_envelope::<T>(request).await?.into_data()
        }
        .await;
        self.settle("create", result)
    }

    /// Updates a model with a PUT to `{key}/{path}` when a path is given,
    /// otherwise to `{key}/{id}`.
    pub async fn update(
        &self,
        id: impl Display,
        model: &T,
        page_request: Option<&PageRequest>,
        path: Option<&str>,
    ) -> Outcome<T> {
        let result = async {
            let url = match path.filter(|path| !path.is_empty()) {
                Some(path) => self.member_url(path),
                None => self.member_url(id),
            };
            let query = page_request.map(PageRequest::to_query_params);
            let request = with_query(self.http.put(url), query.as_ref()).json(model);
            self.fetch_envelope::<T>(request).await?.into_data()
        }
        .await;
        self.settle("update", result)
    }

    /// Deletes a model by id.
    pub async fn remove(&self, id: impl Display) -> Outcome<()> {
        let result = async {
            let request = self.http.delete(self.member_url(id));
            self.fetch_envelope::<Value>(request).await.map(|_| ())
        }
        .await;
        self.settle("remove", result)
    }

    /// Posts an arbitrary body to `{key}` and returns `data`.
    ///
    /// Unlike [`create`](Self::create), body and payload are not tied to `T`.
    pub async fn simple_post<B, R>(&self, body: &B) -> Outcome<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let result = async {
            let request = self.http.post(self.collection_url()).json(body);
            self.fetch_envelope::<R>(request).await?.into_data()
        }
        .await;
        self.settle("simple_post", result)
    }

    /// Downloads a binary report and hands it to the file saver.
    ///
    /// The report is fetched from `{root}/{path}`, or `{root}/{key}` when no
    /// path is given. The saved name comes from `report_name`, else from the
    /// `Content-Disposition` header, else `"report"`. Nothing is saved when the
    /// request fails.
    pub async fn export_report(
        &self,
        page_request: &PageRequest,
        path: Option<&str>,
        report_name: Option<&str>,
    ) -> Outcome<ExportedReport> {
        let result = self.download_report(page_request, path, report_name).await;
        self.settle("export_report", result)
    }

    async fn download_report(
        &self,
        page_request: &PageRequest,
        path: Option<&str>,
        report_name: Option<&str>,
    ) -> Result<ExportedReport, ApiError> {
        let url = match path.map(|path| path.trim_matches('/')).filter(|path| !path.is_empty()) {
            Some(path) => format!("{}/{}", self.root_url, path),
            None => self.collection_url(),
        };
        let query = page_request.to_query_params();
        let request = with_query(self.http.get(url), Some(&query));

        let response = self.send(request).await?;
        let content_type = resolve_content_type(response.headers());
        let file_name = resolve_file_name(content_disposition(response.headers()), report_name);
        let bytes = response.bytes().await?;

        self.saver
            .save_bytes_as_file(&bytes, &file_name, &content_type)
            .await
            .map_err(|e| ApiError::Save(format!("{e:#}")))?;

        Ok(ExportedReport {
            file_name,
            content_type,
            size: bytes.len(),
        })
    }

    /// Sends the request with session headers and rejects non-success statuses.
    async fn send(&self, request: RequestBuilder) -> Result<reqwest::Response, ApiError> {
        let request = request.headers(self.headers()?).build()?;
        debug!("{} {}", request.method(), request.url());

        let response = self.http.execute(request).await?;
        let status = response.status();
        debug!("Received {} from {}", status, response.url());

        if !status.is_success() {
            return Err(classify_status(status.as_u16()));
        }
        Ok(response)
    }

    /// Sends the request and unwraps the JSON envelope of the response.
    async fn fetch_envelope<R>(&self, request: RequestBuilder) -> Result<Envelope<R>, ApiError>
    where
        R: DeserializeOwned,
    {
        let response = self.send(request).await?;
        let status: StatusCode = response.status();
        let body = response.bytes().await?;
        Envelope::parse(&body)?.check(status)?.into_typed()
    }

    /// Converts the result of one call into its outcome.
    fn settle<R>(&self, operation: &str, result: Result<R, ApiError>) -> Outcome<R> {
        match result {
            Ok(value) => Outcome::Ok(value),
            Err(ApiError::SessionExpired) => {
                warn!("Session expired during {} on /{}", operation, self.key);
                self.unload_guard.disarm();
                Outcome::SessionExpired
            }
            Err(e) => {
                debug!("{} on /{} failed: {}", operation, self.key, e);
                Outcome::Failed(e)
            }
        }
    }
}

fn with_query(request: RequestBuilder, query: Option<&QueryParams>) -> RequestBuilder {
    match query {
        Some(query) if !query.is_empty() => request.query(query.as_pairs()),
        _ => request,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use mockito::{Matcher, Server, ServerGuard};
    use serde::Deserialize;
    use serde_json::json;

    use crate::api::headers::{ACCESS_TOKEN_HEADER, EXTERNAL_TOKEN_HEADER, ORG_CODE_HEADER};
    use crate::session::SessionContext;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Item {
        id: u32,
        #[serde(default)]
        name: String,
    }

    #[derive(Default)]
    struct RecordingSaver {
        saved: Mutex<Vec<(Vec<u8>, String, String)>>,
    }

    #[async_trait]
    impl FileSaver for Arc<RecordingSaver> {
        async fn save_bytes_as_file(
            &self,
            bytes: &[u8],
            file_name: &str,
            mime_type: &str,
        ) -> Result<()> {
            self.saved.lock().unwrap().push((
                bytes.to_vec(),
                file_name.to_string(),
                mime_type.to_string(),
            ));
            Ok(())
        }
    }

    fn session() -> SessionContext {
        SessionContext::new()
            .with_access_token("primary")
            .with_external_token("external")
            .with_org_code("ORG1")
    }

    fn client(server: &ServerGuard, backend: Backend) -> GenericApi<Item> {
        GenericApi::with_root_url("items", backend, format!("{}/api", server.url()))
            .unwrap()
            .with_session(session())
    }

    #[tokio::test]
    async fn test_get_returns_data() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/items/1")
            .match_header("content-type", "application/json")
            .match_header(ACCESS_TOKEN_HEADER, "primary")
            .match_header(EXTERNAL_TOKEN_HEADER, "external")
            .match_header(ORG_CODE_HEADER, "ORG1")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"isSuccess": true, "data": {"id": 1}}"#)
            .create_async()
            .await;

        let outcome = client(&server, Backend::Ams).get(1).await;
        assert_eq!(outcome.ok(), Some(Item { id: 1, name: String::new() }));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_ems_headers_on_the_wire() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/items/1")
            .match_header(ACCESS_TOKEN_HEADER, "external")
            .match_header(EXTERNAL_TOKEN_HEADER, Matcher::Missing)
            .with_body(r#"{"isSuccess": true, "data": {"id": 1}}"#)
            .create_async()
            .await;

        assert!(client(&server, Backend::Ems).get(1).await.is_ok());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_application_failure_rejects_with_message() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/items/1")
            .with_body(r#"{"isSuccess": false, "message": "bad"}"#)
            .create_async()
            .await;

        let err = client(&server, Backend::Ams).get(1).await.err().unwrap();
        assert!(matches!(err, ApiError::Application(_)));
        assert_eq!(err.to_string(), "bad");
    }

    #[tokio::test]
    async fn test_unauthorized_resolves_as_session_expired() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/items/1")
            .with_status(401)
            .create_async()
            .await;

        let client = client(&server, Backend::Ams);
        let host_guard = client.unload_guard().clone();
        assert!(host_guard.is_armed());

        let outcome = client.get(1).await;
        assert!(outcome.is_session_expired());
        assert!(!host_guard.is_armed());
    }

    #[tokio::test]
    async fn test_server_error_rejects_with_status_text() {
        let mut server = Server::new_async().await;
        server
            .mock("DELETE", "/api/items/4")
            .with_status(500)
            .with_body("<html>oops</html>")
            .create_async()
            .await;

        let err = client(&server, Backend::Ams).remove(4).await.err().unwrap();
        assert_eq!(err.to_string(), "Internal Server Error");
        assert_eq!(err.status(), Some(500));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_no_connectivity() {
        let client: GenericApi<Item> =
            GenericApi::with_root_url("items", Backend::Ams, "http://127.0.0.1:1/api")
                .unwrap()
                .with_session(session());

        let err = client.get(1).await.err().unwrap();
        assert_eq!(err.to_string(), "There is no internet connection");
    }

    #[tokio::test]
    async fn test_request_error_before_status_is_transport() {
        let client: GenericApi<Item> = GenericApi::new("items", Backend::Ems, &Config::default())
            .unwrap()
            .with_session(session());
        assert_eq!(client.root_url(), "ems/api");

        match client.get(1).await {
            Outcome::Failed(ApiError::Transport(message)) => {
                assert!(message.contains("builder error"), "{}", message)
            }
            other => panic!("expected a transport failure, got {:?}", other.err()),
        }
    }

    #[tokio::test]
    async fn test_failure_envelope_with_mismatched_payload_keeps_message() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/items/1")
            .with_body(r#"{"isSuccess":false,"message":"Not allowed","data":{}}"#)
            .create_async()
            .await;

        let err = client(&server, Backend::Ams).get(1).await.err().unwrap();
        assert!(matches!(err, ApiError::Application(ref m) if m == "Not allowed"));
    }

    #[tokio::test]
    async fn test_simple_get_appends_zero_id() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/items/0")
            .with_body(r#"{"isSuccess": true, "data": {"id": 0}}"#)
            .create_async()
            .await;

        let params = GetParams::new().id(0);
        let payload = client(&server, Backend::Ams).simple_get(Some(&params)).await;
        assert_eq!(payload.ok(), Some(Payload::Item(Item { id: 0, name: String::new() })));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_search_returns_whole_envelope() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/items")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("pageNo".into(), "1".into()),
                Matcher::UrlEncoded("pageSize".into(), "2".into()),
                Matcher::UrlEncoded("status".into(), "open".into()),
            ]))
            .with_body(
                r#"{"isSuccess": true, "items": [{"id": 1}, {"id": 2}],
                    "totalCount": 5, "pageNo": 1, "pageSize": 2}"#,
            )
            .create_async()
            .await;

        let request = PageRequest::new()
            .page(1, 2)
            .filter("status", "open")
            .filter("owner", "");
        let envelope = client(&server, Backend::Ams).search(&request).await.ok().unwrap();

        assert!(envelope.is_success);
        assert_eq!(envelope.items.as_ref().map(Vec::len), Some(2));
        assert_eq!(envelope.total_count, Some(5));
        assert!(envelope.has_next());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_returns_payload_only() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/items/1")
            .with_body(r#"{"isSuccess": true, "data": {"id": 1}, "totalCount": 5}"#)
            .create_async()
            .await;

        let item: Item = client(&server, Backend::Ams).get(1).await.ok().unwrap();
        assert_eq!(item.id, 1);
    }

    #[tokio::test]
    async fn test_simple_get_builds_url_and_falls_back_to_items() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/items/3/children")
            .match_query(Matcher::UrlEncoded("active".into(), "true".into()))
            .with_body(r#"{"isSuccess": true, "items": [{"id": 4}, {"id": 5}]}"#)
            .create_async()
            .await;

        let params = GetParams::new()
            .id(3)
            .path("children")
            .page_request(PageRequest::new().filter("active", true));
        let payload = client(&server, Backend::Ams)
            .simple_get(Some(&params))
            .await
            .ok()
            .unwrap();

        assert_eq!(payload.into_items().len(), 2);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_simple_get_without_params() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/items")
            .with_body(r#"{"isSuccess": true, "data": {"id": 9}}"#)
            .create_async()
            .await;

        let payload = client(&server, Backend::Ams).simple_get(None).await.ok().unwrap();
        assert_eq!(payload, Payload::Item(Item { id: 9, name: String::new() }));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_create_posts_model_to_path() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/api/items/bulk")
            .match_body(Matcher::Json(json!({"id": 0, "name": "new"})))
            .with_body(r#"{"isSuccess": true, "data": {"id": 10, "name": "new"}}"#)
            .create_async()
            .await;

        let model = Item { id: 0, name: "new".into() };
        let created = client(&server, Backend::Ams)
            .create(&model, Some("bulk"))
            .await
            .ok()
            .unwrap();

        assert_eq!(created.id, 10);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_create_without_data_is_rejected() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/api/items")
            .with_body(r#"{"isSuccess": true}"#)
            .create_async()
            .await;

        let model = Item { id: 0, name: "new".into() };
        let err = client(&server, Backend::Ams).create(&model, None).await.err().unwrap();
        assert!(matches!(err, ApiError::InvalidEnvelope(_)));
    }

    #[tokio::test]
    async fn test_update_prefers_path_over_id() {
        let mut server = Server::new_async().await;
        let by_path = server
            .mock("PUT", "/api/items/archive")
            .match_query(Matcher::UrlEncoded("force".into(), "1".into()))
            .with_body(r#"{"isSuccess": true, "data": {"id": 2, "name": "x"}}"#)
            .create_async()
            .await;
        let by_id = server
            .mock("PUT", "/api/items/2")
            .with_body(r#"{"isSuccess": true, "data": {"id": 2, "name": "y"}}"#)
            .create_async()
            .await;

        let client = client(&server, Backend::Ams);
        let model = Item { id: 2, name: "x".into() };
        let request = PageRequest::new().field("force", 1);

        let updated = client
            .update(2, &model, Some(&request), Some("archive"))
            .await
            .ok()
            .unwrap();
        assert_eq!(updated.name, "x");

        let updated = client.update(2, &model, None, None).await.ok().unwrap();
        assert_eq!(updated.name, "y");

        by_path.assert_async().await;
        by_id.assert_async().await;
    }

    #[tokio::test]
    async fn test_remove_returns_nothing() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("DELETE", "/api/items/7")
            .with_body(r#"{"isSuccess": true}"#)
            .create_async()
            .await;

        let outcome = client(&server, Backend::Ams).remove(7).await;
        assert!(matches!(outcome, Outcome::Ok(())));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_simple_post_is_independent_of_model() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/api/items")
            .match_body(Matcher::Json(json!({"ids": [1, 2]})))
            .with_body(r#"{"isSuccess": true, "data": 2}"#)
            .create_async()
            .await;

        let count: u32 = client(&server, Backend::Ams)
            .simple_post(&json!({"ids": [1, 2]}))
            .await
            .ok()
            .unwrap();
        assert_eq!(count, 2);
    }

    #[tokio::test]
    async fn test_export_report_uses_disposition_filename() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/reports/sales")
            .match_query(Matcher::UrlEncoded("year".into(), "2024".into()))
            .with_header("Content-Type", "application/octet-stream")
            .with_header("Content-Disposition", r#"attachment; filename="Q1.xlsx""#)
            .with_body(b"PK\x03\x04".as_slice())
            .create_async()
            .await;

        let saver = Arc::new(RecordingSaver::default());
        let client = client(&server, Backend::Ams).with_file_saver(saver.clone());
        let request = PageRequest::new().field("year", 2024);

        let report = client
            .export_report(&request, Some("reports/sales"), None)
            .await
            .ok()
            .unwrap();

        assert_eq!(report.file_name, "Q1.xlsx");
        assert_eq!(report.size, 4);
        let saved = saver.saved.lock().unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].0, b"PK\x03\x04".to_vec());
        assert_eq!(saved[0].1, "Q1.xlsx");
        assert_eq!(saved[0].2, "application/octet-stream");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_export_report_name_override_and_key_fallback() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/items")
            .with_header("content-type", "text/csv")
            .with_header("content-disposition", r#"attachment; filename="Q1.xlsx""#)
            .with_body("id\n1\n")
            .create_async()
            .await;

        let saver = Arc::new(RecordingSaver::default());
        let client = client(&server, Backend::Ams).with_file_saver(saver.clone());

        let report = client
            .export_report(&PageRequest::new(), None, Some("custom"))
            .await
            .ok()
            .unwrap();

        assert_eq!(report.file_name, "custom");
        assert_eq!(report.content_type, "text/csv");
        assert_eq!(saver.saved.lock().unwrap()[0].1, "custom");
    }

    #[tokio::test]
    async fn test_failed_export_saves_nothing() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/items")
            .with_status(503)
            .create_async()
            .await;

        let saver = Arc::new(RecordingSaver::default());
        let client = client(&server, Backend::Ams).with_file_saver(saver.clone());

        let err = client
            .export_report(&PageRequest::new(), None, None)
            .await
            .err()
            .unwrap();
        assert_eq!(err.to_string(), "Service Unavailable");
        assert!(saver.saved.lock().unwrap().is_empty());
    }
}
