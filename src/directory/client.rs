use async_trait::async_trait;
use chrono::{Duration, NaiveDate, Utc};
use reqwest::Client;
use serde_json::json;

use super::models::{GraphQlResponse, Post};
use super::DirectoryClient;
use crate::error::UpstreamError;

const SERVICE: &str = "Product Hunt";
const PAGE_SIZE: u32 = 50;
const LOOKBACK_DAYS: i64 = 14;

pub struct ProductHuntClient {
    client: Client,
    url: String,
    token: Option<String>,
    timeout_secs: u64,
}

impl ProductHuntClient {
    pub fn new(client: Client, url: String, token: Option<String>, timeout_secs: u64) -> Self {
        Self {
            client,
            url,
            token,
            timeout_secs,
        }
    }
}

fn posts_query(posted_after: NaiveDate) -> String {
    format!(
        r#"query {{
  posts(first: {PAGE_SIZE}, order: VOTES, postedAfter: "{}") {{
    edges {{
      node {{
        id
        name
        tagline
        description
        url
        votesCount
        createdAt
        featuredAt
        topics {{
          edges {{
            node {{
              name
            }}
          }}
        }}
      }}
    }}
  }}
}}"#,
        posted_after.format("%Y-%m-%d")
    )
}

/// Unwrap a GraphQL payload. A non-empty `errors` array fails the call with
/// the first message, matching what the directory reports.
fn into_posts(payload: GraphQlResponse) -> Result<Vec<Post>, UpstreamError> {
    if let Some(first) = payload.errors.into_iter().next() {
        return Err(UpstreamError::GraphQl(first.message));
    }
    let data = payload.data.ok_or_else(|| UpstreamError::Decode {
        service: SERVICE,
        message: "response has neither data nor errors".to_string(),
    })?;
    Ok(data.posts.edges.into_iter().map(|e| Post::from(e.node)).collect())
}

#[async_trait]
impl DirectoryClient for ProductHuntClient {
    #[tracing::instrument(skip_all)]
    async fn fetch_recent_posts(&self) -> Result<Vec<Post>, UpstreamError> {
        let posted_after = (Utc::now() - Duration::days(LOOKBACK_DAYS)).date_naive();
        let payload = json!({ "query": posts_query(posted_after) });

        let mut req = self
            .client
            .post(&self.url)
            .header("Accept", "application/json")
            .json(&payload);
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| UpstreamError::from_reqwest(SERVICE, e, self.timeout_secs))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(UpstreamError::Status {
                service: SERVICE,
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GraphQlResponse = resp
            .json()
            .await
            .map_err(|e| UpstreamError::from_reqwest(SERVICE, e, self.timeout_secs))?;

        let posts = into_posts(parsed)?;
        tracing::info!(count = posts.len(), %posted_after, "fetched directory posts");
        Ok(posts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_uses_fixed_page_and_date() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 2).unwrap();
        let q = posts_query(date);
        assert!(q.contains("posts(first: 50, order: VOTES, postedAfter: \"2026-10-02\")"));
        assert!(q.contains("votesCount"));
        assert!(q.contains("featuredAt"));
    }

    #[test]
    fn test_payload_flattens_topics() {
        let payload: GraphQlResponse = serde_json::from_str(
            r#"{"data":{"posts":{"edges":[{"node":{
                "id":"1","name":"Bot","tagline":"chat","description":null,
                "url":"https://example.com","votesCount":12,
                "createdAt":"2026-10-01T08:00:00Z","featuredAt":null,
                "topics":{"edges":[{"node":{"name":"Artificial Intelligence"}},{"node":{"name":"SaaS"}}]}
            }}]}}}"#,
        )
        .unwrap();
        let posts = into_posts(payload).unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].topics, vec!["Artificial Intelligence", "SaaS"]);
        assert_eq!(posts[0].votes_count, Some(12));
        assert!(posts[0].featured_at.is_none());
    }

    #[test]
    fn test_graphql_errors_fail_with_first_message() {
        let payload: GraphQlResponse = serde_json::from_str(
            r#"{"data":null,"errors":[{"message":"invalid token"},{"message":"second"}]}"#,
        )
        .unwrap();
        let err = into_posts(payload).unwrap_err();
        assert_eq!(err.to_string(), "invalid token");
    }

    #[test]
    fn test_empty_feed_is_ok() {
        let payload: GraphQlResponse =
            serde_json::from_str(r#"{"data":{"posts":{"edges":[]}}}"#).unwrap();
        assert!(into_posts(payload).unwrap().is_empty());
    }

    #[test]
    fn test_missing_data_is_decode_error() {
        let payload: GraphQlResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert!(matches!(
            into_posts(payload),
            Err(UpstreamError::Decode { .. })
        ));
    }
}
