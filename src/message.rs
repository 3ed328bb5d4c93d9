// src/message.rs
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::debug;

/// Body of the POST sent to the copilot endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub user_id: String,
    pub message: String,
}

impl ChatRequest {
    pub fn new(user_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            message: message.into(),
        }
    }
}

/// What the backend answers with. Only `reply` matters for display; the
/// rest is progress bookkeeping the backend attaches to every exchange.
/// A counter of the wrong type reads as absent instead of failing the body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ChatResponse {
    pub reply: Option<String>,
    pub suggest: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub xp_gained: Option<u64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub total_xp: Option<u64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub anxiety_xp: Option<u64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub streak: Option<u64>,
}

fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(Value::as_u64))
}

impl ChatResponse {
    pub fn progress(&self) -> Option<Progress> {
        let xp_gained = self.xp_gained?;
        Some(Progress {
            xp_gained,
            total_xp: self.total_xp.unwrap_or_default(),
            anxiety_xp: self.anxiety_xp.unwrap_or_default(),
            streak: self.streak.unwrap_or_default(),
        })
    }

    pub fn into_reply(self) -> Reply {
        let text = self.reply.unwrap_or_else(|| {
            debug!("backend response carried no reply field");
            String::new()
        });
        Reply {
            text,
            suggest: self.suggest.unwrap_or_default(),
        }
    }
}

/// Display-ready answer to one user message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggest: Vec<String>,
}

impl Reply {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            suggest: Vec::new(),
        }
    }

    pub fn with_suggestions<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.suggest = items.into_iter().map(Into::into).collect();
        self
    }
}

/// XP earned by a single exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub xp_gained: u64,
    pub total_xp: u64,
    pub anxiety_xp: u64,
    pub streak: u64,
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "+{} XP (total {}, streak {})",
            self.xp_gained, self.total_xp, self.streak
        )
    }
}

// GET /api/health
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub message: String,
}

// GET /api/progress/{user_id}
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProgressReport {
    pub user_id: String,
    pub progress: ProgressTotals,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ProgressTotals {
    pub total_xp: u64,
    pub anxiety_xp: u64,
    pub cooking_xp: u64,
    pub budget_xp: u64,
    pub study_xp: u64,
    pub streak: u64,
}

impl fmt::Display for ProgressTotals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "total {} XP | anxiety {} | cooking {} | budget {} | study {} | streak {}",
            self.total_xp,
            self.anxiety_xp,
            self.cooking_xp,
            self.budget_xp,
            self.study_xp,
            self.streak
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_with_wire_field_names() {
        let body = serde_json::to_value(ChatRequest::new("demo", "I feel anxious")).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"user_id": "demo", "message": "I feel anxious"})
        );
    }

    #[test]
    fn full_backend_response_keeps_progress() {
        let response: ChatResponse = serde_json::from_str(
            r#"{"reply": "Breathe in for four.", "xp_gained": 10, "total_xp": 40,
                "anxiety_xp": 30, "streak": 4, "unexpected": true}"#,
        )
        .unwrap();

        let progress = response.progress().unwrap();
        assert_eq!(progress.xp_gained, 10);
        assert_eq!(progress.streak, 4);
        assert_eq!(progress.to_string(), "+10 XP (total 40, streak 4)");

        let reply = response.into_reply();
        assert_eq!(reply.text, "Breathe in for four.");
        assert!(reply.suggest.is_empty());
    }

    #[test]
    fn missing_reply_becomes_empty_text() {
        let response: ChatResponse = serde_json::from_str(r#"{"suggest": []}"#).unwrap();
        assert!(response.progress().is_none());
        assert_eq!(response.into_reply(), Reply::plain(""));
    }

    #[test]
    fn odd_counters_do_not_spoil_the_reply() {
        let response: ChatResponse = serde_json::from_str(
            r#"{"reply": "Try deep breathing.", "xp_gained": 10.5, "total_xp": "20",
                "anxiety_xp": null, "streak": -1}"#,
        )
        .unwrap();

        assert_eq!(response.xp_gained, None);
        assert_eq!(response.total_xp, None);
        assert_eq!(response.streak, None);
        assert!(response.progress().is_none());
        assert_eq!(response.into_reply().text, "Try deep breathing.");

        let response: ChatResponse =
            serde_json::from_str(r#"{"reply": "ok", "xp_gained": 10, "streak": "3"}"#).unwrap();
        let progress = response.progress().unwrap();
        assert_eq!(progress.xp_gained, 10);
        assert_eq!(progress.streak, 0);
    }

    #[test]
    fn progress_totals_tolerate_missing_counters() {
        let report: ProgressReport =
            serde_json::from_str(r#"{"user_id": "demo", "progress": {"total_xp": 25}}"#).unwrap();
        assert_eq!(report.progress.total_xp, 25);
        assert_eq!(report.progress.streak, 0);
    }
}
