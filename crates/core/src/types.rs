/// Video identifiers are assigned by the backend at ingest (UUID strings).
pub type VideoId = String;

/// Face identifiers are assigned by the backend at detection time.
pub type FaceId = String;

/// Face cluster identifiers. `-1` is reserved for unclustered noise.
pub type ClusterId = i64;

/// All wall-clock timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
