//! Shared harness for the view integration tests.
//!
//! Runs a minimal in-process backend on an ephemeral port. Every
//! endpoint counts its requests so tests can assert that validation
//! failures never reach the network, and the tag endpoint propagates
//! the name across the face's whole cluster so the tagging round-trip
//! is observable end-to-end.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use clipsight_client::{BackendApi, ClientConfig};
use clipsight_core::faces::Face;
use clipsight_session::SessionHub;
use clipsight_views::ViewSet;

/// Canned data and request counters for the mock backend.
#[derive(Default)]
pub struct MockState {
    /// Clusters per video id, in domain form; serialized with
    /// stringified keys on the way out.
    pub clusters: Mutex<HashMap<String, BTreeMap<i64, Vec<Face>>>>,
    /// Full `/api/events/{id}` response bodies per video id.
    pub events: Mutex<HashMap<String, Value>>,
    /// Search result arrays per video id (empty key = unscoped).
    pub search_results: Mutex<HashMap<String, Value>>,
    /// The next `/api/qa` response body.
    pub qa_response: Mutex<Value>,
    /// Artificial delay for the clusters endpoint, per video id.
    pub cluster_delays_ms: Mutex<HashMap<String, u64>>,

    pub fail_search: AtomicBool,
    pub fail_upload: AtomicBool,
    pub fail_clusters: AtomicBool,

    pub upload_calls: AtomicUsize,
    pub search_calls: AtomicUsize,
    pub qa_calls: AtomicUsize,
    pub cluster_calls: AtomicUsize,
    pub events_calls: AtomicUsize,
    pub tag_calls: AtomicUsize,

    /// `(face_id, person_name)` pairs the tag endpoint received.
    pub tag_requests: Mutex<Vec<(String, String)>>,
}

impl MockState {
    /// Seed a cluster map for a video.
    pub fn set_clusters(&self, video_id: &str, clusters: BTreeMap<i64, Vec<Face>>) {
        self.clusters
            .lock()
            .unwrap()
            .insert(video_id.to_string(), clusters);
    }

    /// Seed a full events body for a video.
    pub fn set_events(&self, video_id: &str, body: Value) {
        self.events
            .lock()
            .unwrap()
            .insert(video_id.to_string(), body);
    }

    /// Seed search results for a video id ("" for unscoped searches).
    pub fn set_search_results(&self, video_id: &str, results: Value) {
        self.search_results
            .lock()
            .unwrap()
            .insert(video_id.to_string(), results);
    }

    pub fn set_qa_response(&self, body: Value) {
        *self.qa_response.lock().unwrap() = body;
    }

    pub fn delay_clusters(&self, video_id: &str, millis: u64) {
        self.cluster_delays_ms
            .lock()
            .unwrap()
            .insert(video_id.to_string(), millis);
    }
}

/// Everything a test needs: the running mock, the client stack, and the
/// shared hub.
pub struct TestContext {
    pub state: Arc<MockState>,
    pub api: Arc<BackendApi>,
    pub hub: Arc<SessionHub>,
    pub views: ViewSet,
}

/// Build a face in the shape the backend emits.
pub fn face(face_id: &str, video_id: &str, timestamp: f64, person_name: Option<&str>) -> Face {
    Face {
        face_id: face_id.to_string(),
        video_id: video_id.to_string(),
        timestamp,
        person_name: person_name.map(Into::into),
        cluster_id: None,
    }
}

/// An events body with the given events array and top moments.
pub fn events_body(video_id: &str, events: Value, top_moments: Value) -> Value {
    let count = events.as_array().map(Vec::len).unwrap_or(0);
    json!({
        "video_id": video_id,
        "duration": 300,
        "events": events,
        "summary": {
            "top_moments": top_moments,
            "event_count": count,
            "scene_count": count,
            "audio_spike_count": 0,
            "highlight_description": format!("Video contains {count} scene changes.")
        }
    })
}

/// Spin up the mock backend and the full client stack against it.
pub async fn spawn_app() -> TestContext {
    init_tracing();

    let state = Arc::new(MockState::default());
    let router = mock_router(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock backend");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    let api = Arc::new(BackendApi::new(ClientConfig::with_base_url(format!(
        "http://{addr}"
    ))));
    let hub = Arc::new(SessionHub::new());
    let views = ViewSet::new(api.clone(), hub.clone());

    TestContext {
        state,
        api,
        hub,
        views,
    }
}

/// Poll `cond` every 10ms for up to one second.
pub async fn wait_until<F, Fut>(mut cond: F) -> bool
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = bool>,
{
    for _ in 0..100 {
        if cond().await {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    false
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn mock_router(state: Arc<MockState>) -> Router {
    Router::new()
        .route("/api/upload", post(upload))
        .route("/api/search", get(search))
        .route("/api/qa", post(qa))
        .route("/api/events/{video_id}", get(events))
        .route("/api/faces/clusters", get(clusters))
        .route("/api/faces/tag", post(tag))
        .with_state(state)
}

async fn upload(
    State(state): State<Arc<MockState>>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let n = state.upload_calls.fetch_add(1, Ordering::SeqCst) + 1;

    let mut filename = String::new();
    while let Some(field) = multipart.next_field().await.unwrap() {
        if field.name() == Some("file") {
            filename = field.file_name().unwrap_or("upload.bin").to_string();
            let _ = field.bytes().await.unwrap();
        }
    }

    if state.fail_upload.load(Ordering::SeqCst) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"detail": "ingest exploded"})),
        );
    }

    (
        StatusCode::OK,
        Json(json!({
            "video_id": format!("vid-upload-{n}"),
            "filename": filename,
            "message": "Video uploaded and processing started in background"
        })),
    )
}

async fn search(
    State(state): State<Arc<MockState>>,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    state.search_calls.fetch_add(1, Ordering::SeqCst);

    if state.fail_search.load(Ordering::SeqCst) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"detail": "index unavailable"})),
        );
    }

    let key = params.get("video_id").cloned().unwrap_or_default();
    let results = state
        .search_results
        .lock()
        .unwrap()
        .get(&key)
        .cloned()
        .unwrap_or_else(|| json!([]));

    (
        StatusCode::OK,
        Json(json!({"query": params.get("query"), "results": results})),
    )
}

async fn qa(State(state): State<Arc<MockState>>) -> impl IntoResponse {
    state.qa_calls.fetch_add(1, Ordering::SeqCst);
    Json(state.qa_response.lock().unwrap().clone())
}

async fn events(
    State(state): State<Arc<MockState>>,
    Path(video_id): Path<String>,
) -> impl IntoResponse {
    state.events_calls.fetch_add(1, Ordering::SeqCst);

    match state.events.lock().unwrap().get(&video_id) {
        Some(body) => (StatusCode::OK, Json(body.clone())),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({"detail": "Events not found for this video"})),
        ),
    }
}

async fn clusters(
    State(state): State<Arc<MockState>>,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    state.cluster_calls.fetch_add(1, Ordering::SeqCst);

    let video_id = params.get("video_id").cloned().unwrap_or_default();

    let delay = state
        .cluster_delays_ms
        .lock()
        .unwrap()
        .get(&video_id)
        .copied();
    if let Some(millis) = delay {
        tokio::time::sleep(Duration::from_millis(millis)).await;
    }

    if state.fail_clusters.load(Ordering::SeqCst) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"detail": "face database unavailable"})),
        );
    }

    let clusters = state
        .clusters
        .lock()
        .unwrap()
        .get(&video_id)
        .cloned()
        .unwrap_or_default();
    let wire: serde_json::Map<String, Value> = clusters
        .iter()
        .map(|(id, faces)| (id.to_string(), serde_json::to_value(faces).unwrap()))
        .collect();

    (
        StatusCode::OK,
        Json(json!({"video_id": video_id, "clusters": wire})),
    )
}

async fn tag(
    State(state): State<Arc<MockState>>,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    state.tag_calls.fetch_add(1, Ordering::SeqCst);

    let face_id = params.get("face_id").cloned().unwrap_or_default();
    let person_name = params.get("person_name").cloned().unwrap_or_default();
    state
        .tag_requests
        .lock()
        .unwrap()
        .push((face_id.clone(), person_name.clone()));

    // Propagate the name across the face's whole cluster, like the real
    // face service does.
    let mut all = state.clusters.lock().unwrap();
    for clusters in all.values_mut() {
        for faces in clusters.values_mut() {
            if faces.iter().any(|f| f.face_id == face_id) {
                for face in faces.iter_mut() {
                    face.person_name = Some(person_name.clone());
                }
            }
        }
    }

    Json(json!({"message": format!("Face tagged as {person_name}"), "face_id": face_id}))
}
