//! Question-answering payloads.
//!
//! The QA endpoint returns a loosely-shaped record: either an answer
//! (optionally with a grounding timestamp and transcript context) or an
//! `error` field explaining why no answer was produced. [`QaResponse`]
//! mirrors the wire shape; [`QaOutcome`] is the discriminated form the
//! rest of the client branches on. There is no answer history — a new
//! outcome fully replaces the previous one.

use serde::{Deserialize, Serialize};

/// Shown when the user asks a question without an active video session
/// or with an empty question. Checked synchronously; no request is sent.
pub const QA_VALIDATION_MESSAGE: &str = "Please upload a video first and enter a question.";

/// Shown when the QA request itself fails (network, bad gateway, ...).
pub const QA_REQUEST_FAILED_MESSAGE: &str = "Failed to get an answer. Please try again.";

/// Raw QA endpoint response. All fields are optional on the wire; the
/// `error` field and the `answer` field are mutually exclusive in
/// practice but nothing enforces that, so conversion gives `error`
/// precedence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QaResponse {
    #[serde(default)]
    pub answer: Option<String>,

    /// Playback position of the segment the answer was grounded on.
    #[serde(default)]
    pub timestamp: Option<f64>,

    /// Backend-reported failure (e.g. no relevant content found).
    #[serde(default)]
    pub error: Option<String>,

    /// Transcript snippet the answer was grounded on.
    #[serde(default)]
    pub context: Option<String>,
}

/// The single QA slot held by the client: an answer or an error, never
/// both. Rendering branches on the variant, not on field presence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum QaOutcome {
    Answered {
        answer: String,
        /// When present, receiving the answer also retargets the cursor.
        timestamp: Option<f64>,
        context: Option<String>,
    },
    Failed {
        message: String,
    },
}

impl QaOutcome {
    /// Convert a wire response into the discriminated form.
    ///
    /// Precedence: an `error` field wins over everything; otherwise a
    /// present `answer` is an [`QaOutcome::Answered`]; a response with
    /// neither is treated as a failure rather than an empty answer.
    pub fn from_response(response: QaResponse) -> Self {
        if let Some(message) = response.error {
            return QaOutcome::Failed { message };
        }
        match response.answer {
            Some(answer) => QaOutcome::Answered {
                answer,
                timestamp: response.timestamp,
                context: response.context,
            },
            None => QaOutcome::Failed {
                message: QA_REQUEST_FAILED_MESSAGE.to_string(),
            },
        }
    }

    /// Timestamp to propose to the cursor, if the outcome carries one.
    pub fn cursor_target(&self) -> Option<f64> {
        match self {
            QaOutcome::Answered { timestamp, .. } => *timestamp,
            QaOutcome::Failed { .. } => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn answer_with_timestamp() {
        let outcome = QaOutcome::from_response(QaResponse {
            answer: Some("a red car".into()),
            timestamp: Some(17.5),
            error: None,
            context: Some("the car passes by".into()),
        });
        assert_matches!(&outcome, QaOutcome::Answered { answer, .. } if answer == "a red car");
        assert_eq!(outcome.cursor_target(), Some(17.5));
    }

    #[test]
    fn error_field_wins_over_answer() {
        let outcome = QaOutcome::from_response(QaResponse {
            answer: Some("ignored".into()),
            timestamp: Some(3.0),
            error: Some("No relevant content found for this question".into()),
            context: None,
        });
        assert_matches!(outcome, QaOutcome::Failed { message } if message.contains("No relevant"));
    }

    #[test]
    fn empty_response_is_a_failure_not_an_empty_answer() {
        let outcome = QaOutcome::from_response(QaResponse::default());
        assert_matches!(outcome, QaOutcome::Failed { .. });
    }

    #[test]
    fn failed_outcome_never_targets_the_cursor() {
        let outcome = QaOutcome::from_response(QaResponse {
            error: Some("nope".into()),
            timestamp: Some(9.0),
            ..QaResponse::default()
        });
        assert_eq!(outcome.cursor_target(), None);
    }
}
