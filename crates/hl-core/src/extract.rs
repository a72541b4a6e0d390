//! Pulls canonical fields out of kind-specific webhook payloads.

use crate::time::to_canonical;
use crate::types::payload::{PullRequestPayload, PushPayload};
use crate::types::{CanonicalEvent, EventKind, SourceKind, UNKNOWN_AUTHOR};
use serde::Deserialize;
use serde_json::Value;
use std::fmt;

pub const BRANCH_REF_PREFIX: &str = "refs/heads/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Push to a tag or any other non-branch ref.
    NotABranchRef,
    MissingHeadCommit,
    /// Pull request actions other than `opened` and merged `closed`.
    UnsupportedAction,
    /// The payload root was not a JSON object.
    MalformedPayload,
}

impl SkipReason {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotABranchRef => "not_a_branch_ref",
            Self::MissingHeadCommit => "missing_head_commit",
            Self::UnsupportedAction => "unsupported_action",
            Self::MalformedPayload => "malformed_payload",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extracted {
    Event(CanonicalEvent),
    Skipped(SkipReason),
}

pub fn extract(kind: SourceKind, payload: &Value) -> Extracted {
    match kind {
        SourceKind::Push => match PushPayload::deserialize(payload) {
            Ok(push) => extract_push(&push),
            Err(err) => {
                tracing::warn!(%err, "push payload is not an object");
                Extracted::Skipped(SkipReason::MalformedPayload)
            }
        },
        SourceKind::PullRequest => match PullRequestPayload::deserialize(payload) {
            Ok(pr) => extract_pull_request(&pr),
            Err(err) => {
                tracing::warn!(%err, "pull request payload is not an object");
                Extracted::Skipped(SkipReason::MalformedPayload)
            }
        },
    }
}

pub fn extract_push(payload: &PushPayload) -> Extracted {
    let Some(branch) = payload.git_ref().strip_prefix(BRANCH_REF_PREFIX) else {
        return Extracted::Skipped(SkipReason::NotABranchRef);
    };
    let Some(head) = payload.head_commit() else {
        return Extracted::Skipped(SkipReason::MissingHeadCommit);
    };
    let author = payload
        .pusher_name()
        .or_else(|| payload.sender_login())
        .unwrap_or(UNKNOWN_AUTHOR);

    Extracted::Event(CanonicalEvent {
        correlation_id: head.id.clone().unwrap_or_default(),
        author: author.to_string(),
        kind: EventKind::Push,
        from_branch: String::new(),
        to_branch: branch.to_string(),
        timestamp: to_canonical(head.raw_timestamp()),
    })
}

pub fn extract_pull_request(payload: &PullRequestPayload) -> Extracted {
    let pr = payload.pull_request.clone().unwrap_or_default();
    let (kind, raw_timestamp) = match payload.action() {
        "closed" if pr.is_merged() => (EventKind::Merge, pr.merged_at.as_deref()),
        "opened" => (EventKind::PullRequest, pr.created_at.as_deref()),
        _ => return Extracted::Skipped(SkipReason::UnsupportedAction),
    };

    Extracted::Event(CanonicalEvent {
        correlation_id: pr.number(),
        author: payload.sender_login().unwrap_or(UNKNOWN_AUTHOR).to_string(),
        kind,
        from_branch: pr.head_branch().to_string(),
        to_branch: pr.base_branch().to_string(),
        timestamp: to_canonical(raw_timestamp.unwrap_or("")),
    })
}
