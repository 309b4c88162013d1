//! # API REST
//!
//! HTTP front-end for Safekeep.
//!
//! Handles:
//! - HTTP endpoints with axum (upload, delete, recover, list, thumbnails)
//! - Session-scoped recovery maps (`x-session-id` header)
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (multipart uploads, JSON, CORS, status codes)
//!
//! Uses `api-shared` for request/response types and user notices.

#![warn(rust_2018_idioms)]

pub mod config;
pub mod session;

use axum::{
    extract::{DefaultBodyLimit, Multipart, Path as AxumPath, State},
    http::{header, HeaderMap, StatusCode},
    response::Json,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

use api_shared::{
    DeleteReq, DeleteRes, DeleteStatus, FileEntry, HealthRes, HealthService, IngestRes,
    ListFilesRes, Notice, NoticeLevel, RecoverReq, RecoverRes, RecoverStatus, SESSION_HEADER,
};
use safekeep_vault::{media_type, FileName, FileVault, RecoveryMap, VaultError, IMAGE_EXTENSIONS};
use session::{lock, session_id_string, SessionError, SessionStore};

pub use config::RestConfig;

/// Error response: status plus a notice the page can show as-is.
type ApiError = (StatusCode, Json<Notice>);

/// Response carrying the session id header alongside a JSON body.
type WithSession<T> = (StatusCode, [(&'static str, String); 1], Json<T>);

/// Application state for the REST API server
///
/// Shared by every request handler: the vault (two directory paths) and the
/// session index holding each user's recovery map. Sessions idle for longer than
/// `session_idle` are forgotten along with their codes.
#[derive(Clone)]
pub struct AppState {
    vault: Arc<FileVault>,
    sessions: SessionStore,
}

impl AppState {
    pub fn new(vault: FileVault, session_idle: Duration) -> Self {
        Self {
            vault: Arc::new(vault),
            sessions: SessionStore::new(session_idle),
        }
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }
}

/// Multipart body of an upload.
#[derive(ToSchema)]
#[allow(dead_code)]
struct UploadForm {
    #[schema(value_type = String, format = Binary)]
    file: Vec<u8>,
}

#[derive(OpenApi)]
#[openapi(
    paths(health, upload_file, list_files, get_file, delete_file, recover_file),
    components(schemas(
        HealthRes,
        UploadForm,
        IngestRes,
        DeleteReq,
        DeleteRes,
        DeleteStatus,
        RecoverReq,
        RecoverRes,
        RecoverStatus,
        FileEntry,
        ListFilesRes,
        Notice,
        NoticeLevel,
    ))
)]
pub struct ApiDoc;

/// Builds the REST router
///
/// # Arguments
/// * `state` - Shared vault and session state
/// * `max_upload_bytes` - Request body limit applied to uploads
pub fn router(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/files", get(list_files).post(upload_file))
        .route("/files/delete", post(delete_file))
        .route("/files/:filename", get(get_file))
        .route("/recover", post(recover_file))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
///
/// # Returns
/// * `Json<HealthRes>` - Health status response containing service status
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    post,
    path = "/files",
    request_body(content = UploadForm, content_type = "multipart/form-data"),
    params(
        ("x-session-id" = Option<String>, Header, description = "Session to record the recovery code in")
    ),
    responses(
        (status = 201, description = "File stored and backed up", body = IngestRes),
        (status = 400, description = "Missing file, unsupported extension or invalid file name", body = Notice),
        (status = 500, description = "Storage error", body = Notice)
    )
)]
/// Upload an image
///
/// Stores the `file` field under its own file name in the active store, copies it to the
/// archive store and returns a recovery code recorded in the caller's session. Only png, jpg
/// and jpeg extensions are accepted; the content itself is not inspected.
///
/// # Returns
/// * `Ok(...)` - Recovery code, session id (also in the `x-session-id` header) and notices
/// * `Err((StatusCode, Json<Notice>))` - Bad request or storage error
#[axum::debug_handler]
async fn upload_file(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<WithSession<IngestRes>, ApiError> {
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| (e.status(), Json(Notice::error("Malformed multipart body."))))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let raw_name = field.file_name().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| (e.status(), Json(Notice::error("Failed to read uploaded file."))))?;
        upload = Some((raw_name, bytes));
        break;
    }

    let Some((raw_name, bytes)) = upload else {
        return Err(bad_request("No file selected."));
    };
    let filename = FileName::new(raw_name).map_err(|e| {
        tracing::warn!("Rejected upload name: {}", e);
        bad_request("Invalid file name.")
    })?;
    if !is_accepted_image(&filename) {
        return Err(bad_request("Only png, jpg and jpeg images are accepted."));
    }

    let (session_id, map) = state
        .sessions
        .get_or_create(session_header(&headers))
        .map_err(session_failure)?;
    let code = {
        let mut map = lock(&map).map_err(session_failure)?;
        state
            .vault
            .ingest(&mut map, &filename, &bytes)
            .map_err(storage_failure)?
    };

    let session_id = session_id_string(&session_id);
    Ok((
        StatusCode::CREATED,
        [(SESSION_HEADER, session_id.clone())],
        Json(IngestRes {
            filename: filename.to_string(),
            notices: Notice::ingested(&code),
            recovery_code: code.to_string(),
            session_id,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/files",
    responses(
        (status = 200, description = "Files in the active store", body = ListFilesRes),
        (status = 500, description = "Storage error", body = Notice)
    )
)]
/// List the files currently in the active store
///
/// Re-reads the directory on every call; order is unspecified.
#[axum::debug_handler]
async fn list_files(State(state): State<AppState>) -> Result<Json<ListFilesRes>, ApiError> {
    let files = state
        .vault
        .list_active()
        .map_err(storage_failure)?
        .map(|entry| {
            entry.map(|file| FileEntry {
                url: file_url(file.name.as_str()),
                filename: file.name.into_inner(),
                size_bytes: file.size_bytes,
                media_type: file.media_type,
            })
        })
        .collect::<Result<Vec<_>, _>>()
        .map_err(storage_failure)?;

    let notice = files.is_empty().then(Notice::no_files);
    Ok(Json(ListFilesRes { files, notice }))
}

#[utoipa::path(
    get,
    path = "/files/{filename}",
    params(("filename" = String, Path, description = "Name of a file in the active store")),
    responses(
        (status = 200, description = "File bytes"),
        (status = 400, description = "Invalid file name", body = Notice),
        (status = 404, description = "No such file", body = Notice),
        (status = 500, description = "Storage error", body = Notice)
    )
)]
/// Fetch a file's bytes for display
#[axum::debug_handler]
async fn get_file(
    State(state): State<AppState>,
    AxumPath(filename): AxumPath<String>,
) -> Result<([(header::HeaderName, String); 1], Vec<u8>), ApiError> {
    let filename = FileName::new(filename).map_err(|_| bad_request("Invalid file name."))?;
    let bytes = match state.vault.read_active(&filename) {
        Ok(bytes) => bytes,
        Err(VaultError::FileNotFound(_)) => {
            return Err((StatusCode::NOT_FOUND, Json(Notice::error("File not found."))));
        }
        Err(e) => return Err(storage_failure(e)),
    };
    let content_type =
        media_type(&bytes).unwrap_or_else(|| "application/octet-stream".to_string());
    Ok(([(header::CONTENT_TYPE, content_type)], bytes))
}

#[utoipa::path(
    post,
    path = "/files/delete",
    request_body = DeleteReq,
    responses(
        (status = 200, description = "Delete outcome, including not found", body = DeleteRes),
        (status = 400, description = "Invalid file name", body = Notice),
        (status = 500, description = "Storage error", body = Notice)
    )
)]
/// Delete a file from the active store
///
/// The archived copy is kept, so the file can still be recovered with its code. A missing
/// file is reported as the `not_found` outcome rather than an HTTP error.
#[axum::debug_handler]
async fn delete_file(
    State(state): State<AppState>,
    Json(req): Json<DeleteReq>,
) -> Result<Json<DeleteRes>, ApiError> {
    let filename = FileName::new(req.filename).map_err(|_| bad_request("Invalid file name."))?;
    let outcome = state.vault.delete(&filename).map_err(storage_failure)?;
    Ok(Json(DeleteRes {
        outcome: outcome.into(),
        notice: Notice::delete(&filename, outcome),
    }))
}

#[utoipa::path(
    post,
    path = "/recover",
    request_body = RecoverReq,
    params(
        ("x-session-id" = Option<String>, Header, description = "Session the code was issued in")
    ),
    responses(
        (status = 200, description = "Recover outcome, including invalid code", body = RecoverRes),
        (status = 500, description = "Storage error", body = Notice)
    )
)]
/// Restore a file from the archive store using a recovery code
///
/// Codes are only known to the session that issued them. Requests without a known session
/// behave as an empty session and always get `invalid_code`.
#[axum::debug_handler]
async fn recover_file(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<RecoverReq>,
) -> Result<Json<RecoverRes>, ApiError> {
    let session = state
        .sessions
        .get(session_header(&headers))
        .map_err(session_failure)?;

    let outcome = match session {
        Some(map) => {
            let map = lock(&map).map_err(session_failure)?;
            state.vault.recover(&map, &req.recovery_code)
        }
        None => state.vault.recover(&RecoveryMap::new(), &req.recovery_code),
    }
    .map_err(storage_failure)?;

    Ok(Json(RecoverRes::from(outcome)))
}

/// Opens the vault, then serves the REST API until the listener fails
///
/// # Errors
/// Returns an error if:
/// - the storage directories cannot be created,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
pub async fn serve(cfg: RestConfig) -> anyhow::Result<()> {
    let vault = FileVault::open(&cfg.vault)?;
    tracing::info!(
        "-- Active store {}, archive store {}",
        vault.active_dir().display(),
        vault.archive_dir().display()
    );

    let app = router(
        AppState::new(vault, cfg.session_idle),
        cfg.max_upload_bytes,
    );
    let listener = tokio::net::TcpListener::bind(&cfg.addr).await?;
    tracing::info!("-- Safekeep REST API listening on {}", cfg.addr);
    axum::serve(listener, app).await?;

    Ok(())
}

fn session_header(headers: &HeaderMap) -> Option<&str> {
    headers.get(SESSION_HEADER).and_then(|v| v.to_str().ok())
}

fn is_accepted_image(filename: &FileName) -> bool {
    filename
        .extension()
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

/// `/files/<name>` with the name percent-encoded as a single path segment.
fn file_url(name: &str) -> String {
    format!("/files/{}", urlencoding::encode(name))
}

fn bad_request(message: &'static str) -> ApiError {
    (StatusCode::BAD_REQUEST, Json(Notice::error(message)))
}

fn storage_failure(e: VaultError) -> ApiError {
    tracing::error!("Vault error: {:?}", e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(Notice::storage_failure()),
    )
}

fn session_failure(e: SessionError) -> ApiError {
    tracing::error!("Session error: {:?}", e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(Notice::error("Internal error, please try again.")),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{HeaderValue, Request};
    use http_body_util::BodyExt;
    use safekeep_vault::VaultConfig;
    use session::DEFAULT_SESSION_IDLE;
    use serde::de::DeserializeOwned;
    use std::fs;
    use tempfile::TempDir;
    use tower::ServiceExt;

    const BOUNDARY: &str = "safekeep-test-boundary";

    struct TestApp {
        temp: TempDir,
        app: Router,
    }

    impl TestApp {
        fn new() -> Self {
            Self::build(config::DEFAULT_MAX_UPLOAD_BYTES, DEFAULT_SESSION_IDLE)
        }

        fn with_limit(max_upload_bytes: usize) -> Self {
            Self::build(max_upload_bytes, DEFAULT_SESSION_IDLE)
        }

        fn build(max_upload_bytes: usize, session_idle: Duration) -> Self {
            let temp = TempDir::new().expect("Failed to create temp dir");
            let vault =
                FileVault::open(&VaultConfig::new(temp.path())).expect("Failed to open vault");
            let app = router(AppState::new(vault, session_idle), max_upload_bytes);
            Self { temp, app }
        }

        fn uploads(&self) -> std::path::PathBuf {
            self.temp.path().join("uploads")
        }

        fn backup(&self) -> std::path::PathBuf {
            self.temp.path().join("backup")
        }

        async fn send(&self, req: Request<Body>) -> (StatusCode, HeaderMap, Vec<u8>) {
            let res = self.app.clone().oneshot(req).await.unwrap();
            let status = res.status();
            let headers = res.headers().clone();
            let body = res.into_body().collect().await.unwrap().to_bytes().to_vec();
            (status, headers, body)
        }

        async fn send_json<T: DeserializeOwned>(&self, req: Request<Body>) -> (StatusCode, T) {
            let (status, _, body) = self.send(req).await;
            assert!(status.is_success(), "unexpected status {status}");
            (status, serde_json::from_slice(&body).unwrap())
        }

        async fn upload(&self, filename: &str, content: &[u8], session: Option<&str>) -> IngestRes {
            let (status, res) = self.send_json(upload_request(filename, content, session)).await;
            assert_eq!(status, StatusCode::CREATED);
            res
        }

        async fn delete(&self, filename: &str) -> DeleteRes {
            let body = serde_json::json!({ "filename": filename });
            self.send_json(json_request("/files/delete", body, None)).await.1
        }

        async fn recover(&self, code: &str, session: Option<&str>) -> RecoverRes {
            let body = serde_json::json!({ "recovery_code": code });
            self.send_json(json_request("/recover", body, session)).await.1
        }

        async fn list(&self) -> ListFilesRes {
            let req = Request::get("/files").body(Body::empty()).unwrap();
            self.send_json(req).await.1
        }
    }

    fn multipart_body(field: &str, filename: &str, content: &[u8]) -> Vec<u8> {
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(content);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn multipart_request(body: Vec<u8>, session: Option<&str>) -> Request<Body> {
        let mut req = Request::post("/files")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap();
        if let Some(session) = session {
            req.headers_mut()
                .insert(SESSION_HEADER, HeaderValue::from_str(session).unwrap());
        }
        req
    }

    fn upload_request(filename: &str, content: &[u8], session: Option<&str>) -> Request<Body> {
        multipart_request(multipart_body("file", filename, content), session)
    }

    fn json_request(uri: &str, body: serde_json::Value, session: Option<&str>) -> Request<Body> {
        let mut builder = Request::post(uri).header(header::CONTENT_TYPE, "application/json");
        if let Some(session) = session {
            builder = builder.header(SESSION_HEADER, session);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let app = TestApp::new();
        let req = Request::get("/health").body(Body::empty()).unwrap();

        let (status, res): (_, HealthRes) = app.send_json(req).await;

        assert_eq!(status, StatusCode::OK);
        assert!(res.ok);
    }

    #[tokio::test]
    async fn test_upload_stores_and_backs_up() {
        let app = TestApp::new();
        let (status, headers, body) = app
            .send(upload_request("photo.jpg", b"IMGDATA", None))
            .await;

        assert_eq!(status, StatusCode::CREATED);
        let res: IngestRes = serde_json::from_slice(&body).unwrap();
        assert_eq!(res.filename, "photo.jpg");
        assert_eq!(res.recovery_code.len(), 8);
        assert!(res
            .recovery_code
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
        assert_eq!(
            headers.get(SESSION_HEADER).unwrap().to_str().unwrap(),
            res.session_id
        );
        assert_eq!(res.notices.len(), 2);
        assert_eq!(res.notices[0].level, NoticeLevel::Success);

        assert_eq!(fs::read(app.uploads().join("photo.jpg")).unwrap(), b"IMGDATA");
        assert_eq!(fs::read(app.backup().join("photo.jpg")).unwrap(), b"IMGDATA");
    }

    #[tokio::test]
    async fn test_upload_reuses_session() {
        let app = TestApp::new();
        let first = app.upload("a.png", b"a", None).await;
        let second = app
            .upload("b.PNG", b"b", Some(first.session_id.as_str()))
            .await;

        assert_eq!(first.session_id, second.session_id);
        assert_ne!(first.recovery_code, second.recovery_code);
    }

    #[tokio::test]
    async fn test_upload_rejects_other_extensions() {
        let app = TestApp::new();
        for name in ["anim.gif", "notes.txt", "noextension", ".png"] {
            let (status, _, body) = app.send(upload_request(name, b"x", None)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{name}");
            let notice: Notice = serde_json::from_slice(&body).unwrap();
            assert_eq!(notice.level, NoticeLevel::Error);
        }
        assert_eq!(fs::read_dir(app.uploads()).unwrap().count(), 0);
        assert_eq!(fs::read_dir(app.backup()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_upload_rejects_path_in_name() {
        let app = TestApp::new();
        let (status, _, _) = app
            .send(upload_request("nested/escape.png", b"x", None))
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(fs::read_dir(app.uploads()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_upload_missing_file_field() {
        let app = TestApp::new();
        let body = multipart_body("attachment", "a.png", b"x");

        let (status, _, _) = app.send(multipart_request(body, None)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_upload_over_limit_not_stored() {
        let app = TestApp::with_limit(64);
        let (status, _, _) = app
            .send(upload_request("big.png", &[0u8; 4096], None))
            .await;

        assert_ne!(status, StatusCode::CREATED);
        assert_eq!(fs::read_dir(app.uploads()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_delete_recover_round_trip() {
        let app = TestApp::new();
        let ingest = app.upload("a.png", b"original bytes", None).await;

        let deleted = app.delete("a.png").await;
        assert_eq!(deleted.outcome, DeleteStatus::Deleted);
        assert_eq!(deleted.notice.message, "a.png deleted from uploads/");
        assert!(!app.uploads().join("a.png").exists());
        assert!(app.backup().join("a.png").exists());

        let recovered = app
            .recover(&ingest.recovery_code, Some(ingest.session_id.as_str()))
            .await;
        assert_eq!(recovered.outcome, RecoverStatus::Recovered);
        assert_eq!(recovered.filename.as_deref(), Some("a.png"));
        assert_eq!(recovered.notice.message, "Recovered: a.png");
        assert_eq!(
            fs::read(app.uploads().join("a.png")).unwrap(),
            b"original bytes"
        );
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_an_error() {
        let app = TestApp::new();

        let res = app.delete("missing.png").await;

        assert_eq!(res.outcome, DeleteStatus::NotFound);
        assert_eq!(res.notice, Notice::error("File not found."));
    }

    #[tokio::test]
    async fn test_delete_invalid_name() {
        let app = TestApp::new();
        let body = serde_json::json!({ "filename": "../backup/a.png" });

        let (status, _, _) = app.send(json_request("/files/delete", body, None)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_recover_unknown_code() {
        let app = TestApp::new();
        let ingest = app.upload("a.png", b"x", None).await;

        let res = app
            .recover("ZZZZZZZZ", Some(ingest.session_id.as_str()))
            .await;

        assert_eq!(res.outcome, RecoverStatus::InvalidCode);
        assert_eq!(res.notice, Notice::error("Invalid recovery code."));
    }

    #[tokio::test]
    async fn test_recover_requires_issuing_session() {
        let app = TestApp::new();
        let ingest = app.upload("a.png", b"x", None).await;
        app.delete("a.png").await;
        let other = app.upload("b.png", b"y", None).await;
        assert_ne!(ingest.session_id, other.session_id);

        let no_session = app.recover(&ingest.recovery_code, None).await;
        let wrong_session = app
            .recover(&ingest.recovery_code, Some(other.session_id.as_str()))
            .await;

        assert_eq!(no_session.outcome, RecoverStatus::InvalidCode);
        assert_eq!(wrong_session.outcome, RecoverStatus::InvalidCode);
        assert!(!app.uploads().join("a.png").exists());
    }

    #[tokio::test]
    async fn test_recover_archive_missing() {
        let app = TestApp::new();
        let ingest = app.upload("a.png", b"x", None).await;
        fs::remove_file(app.backup().join("a.png")).unwrap();

        let res = app
            .recover(&ingest.recovery_code, Some(ingest.session_id.as_str()))
            .await;

        assert_eq!(res.outcome, RecoverStatus::ArchiveMissing);
        assert_eq!(res.notice, Notice::error("Backup missing."));
    }

    #[tokio::test]
    async fn test_list_and_fetch() {
        let app = TestApp::new();
        let empty = app.list().await;
        assert!(empty.files.is_empty());
        assert_eq!(empty.notice, Some(Notice::no_files()));

        let png = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
        app.upload("my photo.png", &png, None).await;

        let listed = app.list().await;
        assert_eq!(listed.notice, None);
        assert_eq!(listed.files.len(), 1);
        let entry = &listed.files[0];
        assert_eq!(entry.filename, "my photo.png");
        assert_eq!(entry.size_bytes, 8);
        assert_eq!(entry.media_type.as_deref(), Some("image/png"));
        assert_eq!(entry.url, "/files/my%20photo.png");

        let req = Request::get(entry.url.as_str()).body(Body::empty()).unwrap();
        let (status, headers, body) = app.send(req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers.get(header::CONTENT_TYPE).unwrap(), "image/png");
        assert_eq!(body, png);
    }

    #[tokio::test]
    async fn test_fetch_missing_file() {
        let app = TestApp::new();
        let req = Request::get("/files/none.png").body(Body::empty()).unwrap();

        let (status, _, _) = app.send(req).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_upload_storage_failure_is_a_notice() {
        let app = TestApp::new();
        fs::remove_dir_all(app.backup()).unwrap();

        let (status, _, body) = app.send(upload_request("a.png", b"x", None)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let notice: Notice = serde_json::from_slice(&body).unwrap();
        assert_eq!(notice, Notice::storage_failure());
        assert!(app.uploads().join("a.png").exists());
    }

    #[tokio::test]
    async fn test_idle_session_codes_expire() {
        let app = TestApp::build(config::DEFAULT_MAX_UPLOAD_BYTES, Duration::ZERO);
        let ingest = app.upload("a.png", b"x", None).await;
        app.delete("a.png").await;

        let res = app
            .recover(&ingest.recovery_code, Some(ingest.session_id.as_str()))
            .await;

        assert_eq!(res.outcome, RecoverStatus::InvalidCode);
        assert!(!app.uploads().join("a.png").exists());
    }

    #[test]
    fn test_file_url_encoding() {
        assert_eq!(file_url("a.png"), "/files/a.png");
        assert_eq!(file_url("a b#1?.jpg"), "/files/a%20b%231%3F.jpg");
        assert_eq!(file_url("é.png"), "/files/%C3%A9.png");
    }

    #[test]
    fn test_accepted_extensions() {
        let accepted = |s: &str| is_accepted_image(&FileName::new(s).unwrap());
        assert!(accepted("a.png"));
        assert!(accepted("a.JPG"));
        assert!(accepted("a.jpeg"));
        assert!(!accepted("a.gif"));
        assert!(!accepted("png"));
    }
}
