//! Data Transfer Objects - request/response types for the API.

use serde::{Deserialize, Serialize};

/// Request to open a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub eid: String,
    pub password: String,
}

/// Response carrying a newly opened session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub session_id: String,
}

/// Session id passed as a query parameter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionQuery {
    pub sessionid: String,
}

/// Parameters of the add-message call, as query string or form body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddMessageParams {
    pub sessionid: String,
    pub context: String,
    pub forum: String,
    pub topic: String,
    pub user: String,
    pub title: String,
    pub body: String,
}

/// Parameters of the forum listing call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForumsInSiteParams {
    pub sessionid: String,
    #[serde(rename = "siteId")]
    pub site_id: String,
}

/// The resolved timezone of the session user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeZoneResponse {
    pub timezone: String,
}

/// Request to change the session user's timezone preference.
///
/// `None` clears the preference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeZoneRequest {
    pub timezone: Option<String>,
}

/// A forum and its topics as shown in listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForumSummary {
    pub id: i64,
    pub title: String,
    pub topics: Vec<TopicSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicSummary {
    pub id: i64,
    pub title: String,
}
