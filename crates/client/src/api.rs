//! REST API client for the analysis backend endpoints.
//!
//! One method per endpoint: video ingest, semantic search, question
//! answering, event timelines, face clusters and tagging, plus the
//! library-listing and person-lookup extras. Response bodies are
//! deserialized straight into the `clipsight-core` payload types.

use std::collections::BTreeMap;

use serde::Deserialize;

use clipsight_core::faces::{ClusterMap, Face};
use clipsight_core::qa::QaResponse;
use clipsight_core::search::SearchResult;
use clipsight_core::timeline::{Summary, TimelineEvent};
use clipsight_core::types::ClusterId;

use crate::config::ClientConfig;
use crate::error::ApiError;

/// HTTP client for a single backend origin.
pub struct BackendApi {
    client: reqwest::Client,
    base_url: String,
}

/// Response returned by `/api/upload` after the file is stored and
/// background processing has been kicked off.
#[derive(Debug, Deserialize)]
pub struct UploadResponse {
    /// Server-assigned identifier for the new video.
    pub video_id: String,
    /// Filename the backend stored the upload under.
    pub filename: String,
}

/// Response returned by `/api/events/{video_id}`.
#[derive(Debug, Deserialize)]
pub struct EventsResponse {
    #[serde(default)]
    pub events: Vec<TimelineEvent>,
    #[serde(default)]
    pub summary: Summary,
}

/// Response returned by `/api/summary/{video_id}`.
#[derive(Debug, Deserialize)]
pub struct SummaryResponse {
    #[serde(default)]
    pub summary: Summary,
    #[serde(default)]
    pub top_moments: Vec<f64>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct ClustersResponse {
    /// Keyed by stringified cluster id on the wire; serde parses the
    /// keys back into integers.
    #[serde(default)]
    clusters: BTreeMap<ClusterId, Vec<Face>>,
}

#[derive(Debug, Deserialize)]
struct VideosResponse {
    #[serde(default)]
    videos: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct AppearancesResponse {
    #[serde(default)]
    appearances: Vec<Face>,
}

impl BackendApi {
    /// Create a new API client for a backend origin.
    pub fn new(config: ClientConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url,
        }
    }

    /// Create an API client reusing an existing [`reqwest::Client`]
    /// (useful for connection pooling across components).
    pub fn with_client(client: reqwest::Client, config: ClientConfig) -> Self {
        Self {
            client,
            base_url: config.base_url,
        }
    }

    /// Backend origin this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Static URL the stored upload is streamable from. This is a plain
    /// byte stream served by the backend, not a JSON endpoint.
    pub fn playable_url(&self, filename: &str) -> String {
        format!("{}/uploads/{filename}", self.base_url)
    }

    /// Ingest a video: `POST /api/upload` with a multipart `file` field.
    ///
    /// The backend stores the file, assigns a video id, and processes
    /// the video in the background; the id is usable immediately.
    pub async fn upload_video(
        &self,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<UploadResponse, ApiError> {
        let part = reqwest::multipart::Part::bytes(bytes).file_name(filename.to_string());
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(format!("{}/api/upload", self.base_url))
            .multipart(form)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Semantic search: `GET /api/search?query=&video_id=?`.
    ///
    /// With `video_id` the search is scoped to that video; without it
    /// the whole corpus is searched. Results come back in backend order.
    pub async fn search(
        &self,
        query: &str,
        video_id: Option<&str>,
    ) -> Result<Vec<SearchResult>, ApiError> {
        let mut params = vec![("query", query)];
        if let Some(video_id) = video_id {
            params.push(("video_id", video_id));
        }

        let response = self
            .client
            .get(format!("{}/api/search", self.base_url))
            .query(&params)
            .send()
            .await?;

        let body: SearchResponse = Self::parse_response(response).await?;
        Ok(body.results)
    }

    /// Ask a question about a video: `POST /api/qa?question=&video_id=`.
    ///
    /// The response is the raw discriminated record; see
    /// [`clipsight_core::qa::QaOutcome::from_response`] for the
    /// error-vs-answer branching.
    pub async fn ask(&self, question: &str, video_id: &str) -> Result<QaResponse, ApiError> {
        let response = self
            .client
            .post(format!("{}/api/qa", self.base_url))
            .query(&[("question", question), ("video_id", video_id)])
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Load detected events plus the summary:
    /// `GET /api/events/{video_id}`.
    pub async fn load_events(&self, video_id: &str) -> Result<EventsResponse, ApiError> {
        let response = self
            .client
            .get(format!("{}/api/events/{video_id}", self.base_url))
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Load the face clusters for a video:
    /// `GET /api/faces/clusters?video_id=`.
    ///
    /// The returned map still contains the noise cluster (`-1`); the
    /// caller decides whether to display it.
    pub async fn face_clusters(&self, video_id: &str) -> Result<ClusterMap, ApiError> {
        let response = self
            .client
            .get(format!("{}/api/faces/clusters", self.base_url))
            .query(&[("video_id", video_id)])
            .send()
            .await?;

        let body: ClustersResponse = Self::parse_response(response).await?;
        Ok(body.clusters)
    }

    /// Tag one face with a person name:
    /// `POST /api/faces/tag?face_id=&person_name=`.
    ///
    /// The backend propagates the name to the rest of the face's
    /// cluster; callers reload clusters afterwards instead of patching
    /// local state.
    pub async fn tag_face(&self, face_id: &str, person_name: &str) -> Result<(), ApiError> {
        let response = self
            .client
            .post(format!("{}/api/faces/tag", self.base_url))
            .query(&[("face_id", face_id), ("person_name", person_name)])
            .send()
            .await?;

        tracing::info!(face_id, person_name, "Face tagged");

        Self::check_status(response).await
    }

    /// List stored uploads: `GET /api/videos`.
    pub async fn list_videos(&self) -> Result<Vec<String>, ApiError> {
        let response = self
            .client
            .get(format!("{}/api/videos", self.base_url))
            .send()
            .await?;

        let body: VideosResponse = Self::parse_response(response).await?;
        Ok(body.videos)
    }

    /// All appearances of a named person across the corpus:
    /// `GET /api/faces/search?person_name=`.
    pub async fn person_appearances(&self, person_name: &str) -> Result<Vec<Face>, ApiError> {
        let response = self
            .client
            .get(format!("{}/api/faces/search", self.base_url))
            .query(&[("person_name", person_name)])
            .send()
            .await?;

        let body: AppearancesResponse = Self::parse_response(response).await?;
        Ok(body.appearances)
    }

    /// Summary without the full event list:
    /// `GET /api/summary/{video_id}`.
    pub async fn summary(&self, video_id: &str) -> Result<SummaryResponse, ApiError> {
        let response = self
            .client
            .get(format!("{}/api/summary/{video_id}", self.base_url))
            .send()
            .await?;

        Self::parse_response(response).await
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or an [`ApiError::Api`] containing
    /// the status and body text on failure.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ApiError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }

    /// Assert the response has a success status code, discarding the body.
    async fn check_status(response: reqwest::Response) -> Result<(), ApiError> {
        Self::ensure_success(response).await?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
