//! Face detections and backend-computed clusters.
//!
//! The backend groups face detections into clusters it believes belong
//! to the same person and keys them by integer cluster id. Cluster `-1`
//! is reserved for unclustered noise and is never shown. Naming is
//! write-once from the client's perspective: tagging submits one
//! representative face and the backend propagates the name across the
//! cluster.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{ClusterId, FaceId, VideoId};

/// Cluster id the backend assigns to detections it could not group.
pub const NOISE_CLUSTER_ID: ClusterId = -1;

/// Shown when a tag is confirmed with an empty or whitespace-only name.
pub const TAG_NAME_VALIDATION_MESSAGE: &str = "Please enter a name.";

/// One face detection within a video.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Face {
    pub face_id: FaceId,

    #[serde(default)]
    pub video_id: VideoId,

    /// Position of the frame the face was detected in, in seconds.
    #[serde(default)]
    pub timestamp: f64,

    /// Set once the cluster has been tagged and propagated.
    #[serde(default)]
    pub person_name: Option<String>,

    #[serde(default)]
    pub cluster_id: Option<ClusterId>,
}

/// Clusters keyed by id, in ascending id order for stable display.
pub type ClusterMap = BTreeMap<ClusterId, Vec<Face>>;

/// Drop the reserved noise cluster from a freshly loaded map.
///
/// The result is what the UI works with; noise faces are excluded from
/// display entirely, so a noise-only video counts as having no faces.
pub fn displayable_clusters(mut clusters: ClusterMap) -> ClusterMap {
    clusters.remove(&NOISE_CLUSTER_ID);
    clusters
}

/// The face submitted when the cluster is tagged: the first in the
/// cluster's sequence.
pub fn representative(faces: &[Face]) -> Option<&Face> {
    faces.first()
}

/// Whether the cluster already carries a name and so exposes no tagging
/// affordance. Keyed on the representative face, which is the one a tag
/// request names.
pub fn is_tagged(faces: &[Face]) -> bool {
    representative(faces).is_some_and(|face| face.person_name.is_some())
}

/// Display name for a cluster: the first non-null `person_name` among
/// its members, falling back to `"Person {id + 1}"`.
pub fn display_name(cluster_id: ClusterId, faces: &[Face]) -> String {
    faces
        .iter()
        .find_map(|face| face.person_name.clone())
        .unwrap_or_else(|| format!("Person {}", cluster_id + 1))
}

/// Normalize a draft tag name: trimmed, `None` when nothing remains.
pub fn normalize_person_name(name: &str) -> Option<&str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn face(id: &str, name: Option<&str>) -> Face {
        Face {
            face_id: id.into(),
            video_id: "vid-a".into(),
            timestamp: 1.0,
            person_name: name.map(Into::into),
            cluster_id: Some(0),
        }
    }

    // -- noise filtering -----------------------------------------------------

    #[test]
    fn noise_cluster_is_dropped() {
        let mut map = ClusterMap::new();
        map.insert(NOISE_CLUSTER_ID, vec![face("f1", None)]);
        map.insert(0, vec![face("f2", None)]);

        let shown = displayable_clusters(map);
        assert_eq!(shown.len(), 1);
        assert!(shown.contains_key(&0));
    }

    #[test]
    fn noise_only_map_becomes_empty() {
        let mut map = ClusterMap::new();
        map.insert(NOISE_CLUSTER_ID, vec![face("f1", None), face("f2", None)]);
        assert!(displayable_clusters(map).is_empty());
    }

    // -- naming --------------------------------------------------------------

    #[test]
    fn display_name_prefers_first_tagged_member() {
        let faces = vec![face("f1", None), face("f2", Some("Alice")), face("f3", None)];
        assert_eq!(display_name(0, &faces), "Alice");
    }

    #[test]
    fn display_name_falls_back_to_ordinal() {
        let faces = vec![face("f1", None)];
        assert_eq!(display_name(0, &faces), "Person 1");
        assert_eq!(display_name(4, &faces), "Person 5");
    }

    #[test]
    fn tagged_is_keyed_on_representative() {
        assert!(is_tagged(&[face("f1", Some("Alice")), face("f2", None)]));
        assert!(!is_tagged(&[face("f1", None), face("f2", Some("Alice"))]));
        assert!(!is_tagged(&[]));
    }

    // -- name validation -----------------------------------------------------

    #[test]
    fn whitespace_only_name_is_rejected() {
        assert_eq!(normalize_person_name("   "), None);
        assert_eq!(normalize_person_name(""), None);
        assert_eq!(normalize_person_name("  Alice "), Some("Alice"));
    }

    // -- wire shape ----------------------------------------------------------

    #[test]
    fn deserializes_with_missing_optionals() {
        let raw = r#"{"face_id": "f9"}"#;
        let f: Face = serde_json::from_str(raw).unwrap();
        assert_eq!(f.face_id, "f9");
        assert_eq!(f.person_name, None);
        assert_eq!(f.timestamp, 0.0);
    }
}
