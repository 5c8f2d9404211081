// SPDX-FileCopyrightText: 2026 Gamewish Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the IGDB v4 API.
//!
//! IGDB takes Apicalypse queries as a plain-text POST body and authenticates
//! with a Twitch client id plus an app access token.

use std::time::Duration;

use gamewish_core::GamewishError;
use reqwest::header::{HeaderMap, HeaderValue};
use tracing::{debug, warn};

use crate::types::{ApiError, ApiGame};

/// Default API root.
pub const API_BASE_URL: &str = "https://api.igdb.com/v4";

/// HTTP client for IGDB communication.
#[derive(Debug, Clone)]
pub struct IgdbClient {
    client: reqwest::Client,
    base_url: String,
    max_retries: u32,
}

impl IgdbClient {
    /// Creates a client with the `Client-ID` and `Authorization` headers preset.
    pub fn new(
        client_id: &str,
        token_type: &str,
        access_token: &str,
        base_url: &str,
    ) -> Result<Self, GamewishError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "client-id",
            HeaderValue::from_str(client_id).map_err(|e| {
                GamewishError::Config(format!("invalid client id header value: {e}"))
            })?,
        );
        headers.insert(
            "authorization",
            HeaderValue::from_str(&authorization(token_type, access_token)).map_err(|e| {
                GamewishError::Config(format!("invalid access token header value: {e}"))
            })?,
        );
        headers.insert("content-type", HeaderValue::from_static("text/plain"));
        headers.insert("accept", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| GamewishError::Search {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            max_retries: 1,
        })
    }

    /// Runs an Apicalypse query against `/games`.
    ///
    /// Transient failures (429, 5xx) are retried once after a short pause.
    pub async fn query_games(&self, body: &str) -> Result<Vec<ApiGame>, GamewishError> {
        let url = format!("{}/games", self.base_url);
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                warn!(attempt, "retrying IGDB request after transient error");
                tokio::time::sleep(Duration::from_secs(1)).await;
            }

            debug!(query = body, attempt, "IGDB request");
            let response = self
                .client
                .post(&url)
                .body(body.to_string())
                .send()
                .await
                .map_err(|e| GamewishError::Search {
                    message: format!("HTTP request failed: {e}"),
                    source: Some(Box::new(e)),
                })?;

            let status = response.status();
            let text = response.text().await.map_err(|e| GamewishError::Search {
                message: format!("failed to read response body: {e}"),
                source: Some(Box::new(e)),
            })?;

            if status.is_success() {
                return serde_json::from_str(&text).map_err(|e| GamewishError::Search {
                    message: format!("failed to parse IGDB response: {e}"),
                    source: Some(Box::new(e)),
                });
            }

            let error = GamewishError::Search {
                message: describe_error(status, &text),
                source: None,
            };
            if is_transient_error(status) && attempt < self.max_retries {
                warn!(status = %status, "transient IGDB error, will retry");
                last_error = Some(error);
                continue;
            }
            return Err(error);
        }

        Err(last_error.unwrap_or_else(|| GamewishError::Search {
            message: "IGDB request failed after retries".into(),
            source: None,
        }))
    }
}

/// `Authorization` value: the token type title-cased, then the token.
pub fn authorization(token_type: &str, token: &str) -> String {
    let mut chars = token_type.chars();
    let title: String = match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    };
    format!("{title} {token}")
}

fn describe_error(status: reqwest::StatusCode, body: &str) -> String {
    match serde_json::from_str::<Vec<ApiError>>(body) {
        Ok(errors) if !errors.is_empty() => {
            let first = &errors[0];
            match &first.cause {
                Some(cause) => format!("IGDB error ({status}): {}: {cause}", first.title),
                None => format!("IGDB error ({status}): {}", first.title),
            }
        }
        _ => format!("IGDB returned {status}: {body}"),
    }
}

fn is_transient_error(status: reqwest::StatusCode) -> bool {
    status.as_u16() == 429 || status.is_server_error()
}
