//! Wire types for the content API
//!
//! Field names follow the API's camelCase JSON. Anything the browser can live
//! without is defaulted so a sparse record never fails to decode.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

/// Pagination and status metadata attached to list responses
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiMeta {
    #[serde(deserialize_with = "null_as_default")]
    pub code: u16,
    #[serde(deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(deserialize_with = "null_as_default")]
    pub item_count: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub total_items: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub items_per_page: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub total_pages: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub current_page: u64,
}

/// Social platform an account belongs to
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Social {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub platform: String,
    #[serde(deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(deserialize_with = "null_as_default")]
    pub updated_at: String,
}

/// A linked social account of an influencer
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Account {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub influencer_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub social_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub username: String,
    #[serde(deserialize_with = "null_as_default")]
    pub platform_user_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub bio: String,

    /// Decimal string, e.g. "1205"
    #[serde(deserialize_with = "count_or_default")]
    pub following_count: String,

    /// Decimal string, e.g. "4200000"
    #[serde(deserialize_with = "count_or_default")]
    pub followers_count: String,

    #[serde(deserialize_with = "null_as_default")]
    pub join_date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub social: Social,
    #[serde(deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(deserialize_with = "null_as_default")]
    pub updated_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Influencer {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    pub avatar_url: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub accounts: Vec<Account>,
    #[serde(deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(deserialize_with = "null_as_default")]
    pub updated_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct InfluencersResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub meta: ApiMeta,
    #[serde(deserialize_with = "null_as_default")]
    pub data: Vec<Influencer>,
}

/// A post as stored by the repository
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiPost {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub tweet_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub hashtags: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub posted_at: String,
    #[serde(deserialize_with = "null_as_default")]
    pub social_account_id: String,

    /// True once the crawler has stored the post's media file
    #[serde(deserialize_with = "null_as_default")]
    pub is_downloaded: bool,

    /// Storage path of the downloaded file
    pub file_path: Option<String>,

    #[serde(deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(deserialize_with = "null_as_default")]
    pub updated_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PostsResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub meta: ApiMeta,
    #[serde(deserialize_with = "null_as_default")]
    pub data: Vec<ApiPost>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlRequest {
    pub username: String,
    pub max_collect_count: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CrawlResponse {
    pub success: bool,
    pub message: Option<String>,
}

/// Treats an explicit `null` like a missing key
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Counts arrive as decimal strings, plain numbers or not at all
#[derive(Deserialize)]
#[serde(untagged)]
enum RawCount {
    Text(String),
    Integer(u64),
    Float(f64),
    Other(IgnoredAny),
}

/// Normalizes a count to its decimal string; unusable values become ""
fn count_or_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<RawCount>::deserialize(deserializer)? {
        Some(RawCount::Text(text)) => text,
        Some(RawCount::Integer(n)) => n.to_string(),
        Some(RawCount::Float(n)) if n >= 0.0 && n.fract() == 0.0 => (n as u64).to_string(),
        Some(RawCount::Float(_)) | Some(RawCount::Other(_)) | None => String::new(),
    })
}
