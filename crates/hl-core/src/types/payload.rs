//! Typed views over the two supported webhook payload families.
//!
//! Every field is optional and lenient: hosting platforms omit or null out
//! nested objects freely, and a field of the wrong JSON type reads as absent
//! so the accessor's stated default applies instead of losing the delivery.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Account {
    #[serde(default, deserialize_with = "lenient")]
    pub login: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Pusher {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommitAuthor {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub date: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Commit {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub timestamp: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub author: Option<CommitAuthor>,
}

impl Commit {
    /// Commit timestamp, falling back to the author date.
    pub fn raw_timestamp(&self) -> &str {
        non_empty(self.timestamp.as_deref())
            .or_else(|| non_empty(self.author.as_ref().and_then(|a| a.date.as_deref())))
            .unwrap_or("")
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PushPayload {
    #[serde(rename = "ref", default, deserialize_with = "lenient")]
    pub git_ref: Option<String>,
    /// Present only when the platform sent a non-empty object.
    #[serde(default, deserialize_with = "non_empty_object")]
    pub head_commit: Option<Commit>,
    #[serde(default, deserialize_with = "lenient")]
    pub pusher: Option<Pusher>,
    #[serde(default, deserialize_with = "lenient")]
    pub sender: Option<Account>,
}

impl PushPayload {
    pub fn git_ref(&self) -> &str {
        self.git_ref.as_deref().unwrap_or("")
    }

    pub fn head_commit(&self) -> Option<&Commit> {
        self.head_commit.as_ref()
    }

    pub fn pusher_name(&self) -> Option<&str> {
        non_empty(self.pusher.as_ref().and_then(|p| p.name.as_deref()))
    }

    pub fn sender_login(&self) -> Option<&str> {
        non_empty(self.sender.as_ref().and_then(|s| s.login.as_deref()))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BranchRef {
    #[serde(rename = "ref", default, deserialize_with = "lenient")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PullRequest {
    /// Decimal text of the PR number, whether sent as a number or a string.
    #[serde(default, deserialize_with = "number_text")]
    pub number: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub merged: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub merged_at: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub head: Option<BranchRef>,
    #[serde(default, deserialize_with = "lenient")]
    pub base: Option<BranchRef>,
}

impl PullRequest {
    pub fn head_branch(&self) -> &str {
        self.head
            .as_ref()
            .and_then(|head| head.name.as_deref())
            .unwrap_or("")
    }

    pub fn base_branch(&self) -> &str {
        self.base
            .as_ref()
            .and_then(|base| base.name.as_deref())
            .unwrap_or("")
    }

    pub fn is_merged(&self) -> bool {
        self.merged.unwrap_or(false)
    }

    pub fn number(&self) -> String {
        self.number.clone().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PullRequestPayload {
    #[serde(default, deserialize_with = "lenient")]
    pub action: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub pull_request: Option<PullRequest>,
    #[serde(default, deserialize_with = "lenient")]
    pub sender: Option<Account>,
}

impl PullRequestPayload {
    pub fn action(&self) -> &str {
        self.action.as_deref().unwrap_or("")
    }

    pub fn sender_login(&self) -> Option<&str> {
        non_empty(self.sender.as_ref().and_then(|s| s.login.as_deref()))
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Reads any JSON value and keeps it only if it has the expected shape.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| serde_json::from_value(value).ok()))
}

fn non_empty_object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Object(map)) if !map.is_empty() => {
            Ok(serde_json::from_value(Value::Object(map)).ok())
        }
        _ => Ok(None),
    }
}

fn number_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(number)) => Some(number.to_string()),
        Some(Value::String(text)) => Some(text),
        _ => None,
    })
}
