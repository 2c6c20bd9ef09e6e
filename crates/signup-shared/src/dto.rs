//! Data Transfer Objects - request/response types for the API.
//!
//! Request fields are all optional so that a missing field reaches
//! validation and is reported by name, instead of failing JSON decoding.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request to join the beta.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BetaSignupRequest {
    pub email: Option<String>,
    pub experience: Option<String>,
    pub goal: Option<String>,
    pub referrer: Option<String>,
    pub referrer_other: Option<String>,
}

/// Request to enter a competition.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetitionSignupRequest {
    pub email: Option<String>,
    pub accepted_rules: Option<bool>,
    pub campaign: Option<String>,
}

/// Request to submit a competition project.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetitionSubmissionRequest {
    pub email: Option<String>,
    pub project_url: Option<String>,
    pub project_title: Option<String>,
    pub description: Option<String>,
    pub campaign: Option<String>,
}

/// Request to join the GoalPost beta on one platform.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalpostBetaRequest {
    pub email: Option<String>,
    pub platform: Option<String>,
}

/// Response to a successful create.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupCreatedResponse {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<DateTime<Utc>>,
    pub message: String,
}

/// Record count, optionally scoped to a campaign.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountResponse {
    pub count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campaign: Option<String>,
    pub message: String,
}

/// One bucket of a grouped count. `key` is null for records without a
/// value in the grouped field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupCountDto {
    pub key: Option<String>,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BetaStatsResponse {
    pub total: u64,
    pub by_referrer: Vec<GroupCountDto>,
    pub by_experience: Vec<GroupCountDto>,
    pub by_goal: Vec<GroupCountDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetitionStatsResponse {
    pub total: u64,
    /// Signups in the last 24 hours.
    pub recent_count: u64,
    pub by_campaign: Vec<GroupCountDto>,
    /// Signups per UTC day over the last 7 days, oldest first.
    pub daily_signups: Vec<GroupCountDto>,
}

/// Public projection of a submission. The email is masked.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentSubmission {
    pub email: String,
    pub project_url: String,
    pub project_title: Option<String>,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentSubmissionsResponse {
    pub submissions: Vec<RecentSubmission>,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalpostCountsResponse {
    pub ios: u64,
    pub android: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformCountResponse {
    pub platform: String,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub environment: String,
}

/// Service descriptor served at the root path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceDescriptor {
    pub name: String,
    pub version: String,
    pub endpoints: BTreeMap<String, String>,
}
