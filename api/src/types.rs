//! Wire types for the Career AI backend.
//!
//! The backend wraps payloads in `{ status, message?, data?, errors? }`, but
//! neither the nesting nor the field types are consistent: some endpoints
//! nest the payload under `data`, others return it bare, and `status` and
//! `errors` vary in shape. Bodies are therefore read as raw JSON;
//! [`unwrap_data`] and [`error_message`] pick out the parts that matter.

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ApiError;

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;

/// Reply shown when the chat endpoint answers without any text.
pub const EMPTY_REPLY: &str = "I received your message but couldn't generate a proper response.";

// =============================================================================
// ENVELOPE
// =============================================================================

/// Return `value.data` when present and non-null, otherwise `value` itself.
#[must_use]
pub fn unwrap_data(value: Value) -> Value {
    match value {
        Value::Object(mut map) => match map.remove("data") {
            Some(data) if !data.is_null() => data,
            Some(data) => {
                map.insert("data".to_owned(), data);
                Value::Object(map)
            }
            None => Value::Object(map),
        },
        other => other,
    }
}

/// Extract the backend's `message` from an error body, if it has one.
#[must_use]
pub fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.trim().is_empty())
        .map(ToOwned::to_owned)
}

/// Decode a JSON value into `T`.
///
/// # Errors
///
/// Returns [`ApiError::Decode`] when the value does not match `T`.
pub fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
}

// =============================================================================
// AUTH
// =============================================================================

/// Authenticated user profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub career_goal: Option<String>,
    #[serde(default)]
    pub current_level: Option<String>,
    #[serde(default)]
    pub readiness_score: f64,
    #[serde(default)]
    pub onboarding_completed: bool,
    #[serde(default)]
    pub target_role: Option<String>,
    #[serde(default)]
    pub experience_years: Option<f64>,
    #[serde(default)]
    pub interests: Vec<String>,
}

impl User {
    /// First word of the display name, or `"there"` when the name is blank.
    #[must_use]
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or("there")
    }
}

/// Payload of a successful login or registration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AuthResponse {
    pub user: User,
    pub token: String,
}

// =============================================================================
// AGENT CHAT
// =============================================================================

/// One stored transcript entry as the backend returns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub role: String,
    pub content: String,
}

/// Assistant text from a chat reply: `response`, then `message`, then
/// [`EMPTY_REPLY`].
#[must_use]
pub fn reply_text(data: &Value) -> String {
    ["response", "message"]
        .iter()
        .filter_map(|key| data.get(key).and_then(Value::as_str))
        .find(|text| !text.is_empty())
        .unwrap_or(EMPTY_REPLY)
        .to_owned()
}

/// Transcript entries under `history`; a missing or null list is empty.
///
/// # Errors
///
/// Returns [`ApiError::Decode`] when `history` is not a list of entries.
pub fn history_entries(data: Value) -> Result<Vec<HistoryEntry>, ApiError> {
    match data.get("history") {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(history) => decode(history.clone()),
    }
}

// =============================================================================
// RESOURCES
// =============================================================================

/// Read-only listings behind the dashboard, profile, skill-gap, roadmap,
/// applications, feedback, resume, and project views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Dashboard,
    Profile,
    Skills,
    SkillGaps,
    Goals,
    PrimaryGoal,
    Plans,
    CurrentPlan,
    PlanSummary,
    Applications,
    ApplicationStats,
    Opportunities,
    Feedback,
    FeedbackStats,
    LearningPriorities,
    Resumes,
    Projects,
    ProjectStats,
}

impl Resource {
    pub const ALL: [Resource; 18] = [
        Self::Dashboard,
        Self::Profile,
        Self::Skills,
        Self::SkillGaps,
        Self::Goals,
        Self::PrimaryGoal,
        Self::Plans,
        Self::CurrentPlan,
        Self::PlanSummary,
        Self::Applications,
        Self::ApplicationStats,
        Self::Opportunities,
        Self::Feedback,
        Self::FeedbackStats,
        Self::LearningPriorities,
        Self::Resumes,
        Self::Projects,
        Self::ProjectStats,
    ];

    /// Backend path, relative to the API base URL.
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Dashboard => "/agent/dashboard",
            Self::Profile => "/profile",
            Self::Skills => "/skills",
            Self::SkillGaps => "/skills/gaps",
            Self::Goals => "/goals",
            Self::PrimaryGoal => "/goals/primary",
            Self::Plans => "/plans",
            Self::CurrentPlan => "/plans/current",
            Self::PlanSummary => "/plans/summary",
            Self::Applications => "/applications",
            Self::ApplicationStats => "/applications/stats",
            Self::Opportunities => "/applications/opportunities",
            Self::Feedback => "/feedback",
            Self::FeedbackStats => "/feedback/stats",
            Self::LearningPriorities => "/feedback/priorities",
            Self::Resumes => "/resume",
            Self::Projects => "/projects",
            Self::ProjectStats => "/projects/stats",
        }
    }

    /// Kebab-case name used on the command line.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Profile => "profile",
            Self::Skills => "skills",
            Self::SkillGaps => "skill-gaps",
            Self::Goals => "goals",
            Self::PrimaryGoal => "primary-goal",
            Self::Plans => "plans",
            Self::CurrentPlan => "current-plan",
            Self::PlanSummary => "plan-summary",
            Self::Applications => "applications",
            Self::ApplicationStats => "application-stats",
            Self::Opportunities => "opportunities",
            Self::Feedback => "feedback",
            Self::FeedbackStats => "feedback-stats",
            Self::LearningPriorities => "learning-priorities",
            Self::Resumes => "resumes",
            Self::Projects => "projects",
            Self::ProjectStats => "project-stats",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Resource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|r| r.as_str() == wanted)
            .ok_or_else(|| {
                let known: Vec<&str> = Self::ALL.iter().map(|r| r.as_str()).collect();
                format!("unknown resource '{s}' (expected one of: {})", known.join(", "))
            })
    }
}
