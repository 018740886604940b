//! Horoscope provider: remote fetch with bundled fallback.
//!
//! One HTTP request per fetch against the horoscope API, no retry. Any
//! failure (connection error, non-success status, unparseable body) degrades
//! silently to the bundled per-sign fallback table with the date rewritten to
//! today. Callers can still tell the two apart: the result carries a
//! [`Source`] tag, so tests and the UI can distinguish live data from
//! fallback data deterministically.

use crate::errors::{AppResult, HoroscopeError};
use crate::zodiac;
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use tracing::debug;

mod fallback;

pub use fallback::fallback_horoscope;

/// A daily textual forecast bound to a sign and a date.
///
/// Created per fetch and never persisted; the state store keeps only the
/// current one.
#[derive(Debug, Clone, PartialEq)]
pub struct Horoscope {
    /// Sign id slug, e.g. `"aries"`.
    pub sign: String,
    /// The calendar date this forecast is for.
    pub date: NaiveDate,
    /// Free-text forecast body.
    pub description: String,
    /// Compatibility note.
    pub compatibility: String,
    /// Mood label.
    pub mood: String,
    /// Lucky number, kept as text the way the API reports it.
    pub lucky_number: String,
    /// Lucky time of day, e.g. `"9:00 AM"`.
    pub lucky_time: String,
}

/// Where a fetched horoscope came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// Parsed from a live API response.
    Live,
    /// Served from the bundled fallback table after a failed fetch.
    Fallback,
}

/// A fetch result: the horoscope plus its provenance.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyHoroscope {
    pub horoscope: Horoscope,
    pub source: Source,
}

/// Response body of the horoscope API. Every field is optional; absent
/// fields get fixed defaults, the same for every sign.
#[derive(Debug, Deserialize)]
struct ApiResponse {
    description: Option<String>,
    compatibility: Option<String>,
    mood: Option<String>,
    lucky_number: Option<String>,
    lucky_time: Option<String>,
}

const DEFAULT_DESCRIPTION: &str = "Your daily horoscope is here to guide you.";
const DEFAULT_COMPATIBILITY: &str = "Check your compatibility today.";
const DEFAULT_MOOD: &str = "Balanced";
const DEFAULT_LUCKY_NUMBER: &str = "7";
const DEFAULT_LUCKY_TIME: &str = "12:00 PM";

/// Why a remote fetch did not produce a horoscope. Never surfaced to
/// callers; logged and then papered over by the fallback table.
#[derive(Debug)]
enum FetchFailure {
    Request(reqwest::Error),
    Status(reqwest::StatusCode),
    Body(reqwest::Error),
}

impl std::fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchFailure::Request(e) => write!(f, "request failed: {}", e),
            FetchFailure::Status(s) => write!(f, "non-success response: {}", s),
            FetchFailure::Body(e) => write!(f, "unparseable response body: {}", e),
        }
    }
}

/// Client for the remote horoscope API.
pub struct HoroscopeClient {
    base_url: String,
    client: reqwest::Client,
}

impl HoroscopeClient {
    /// Creates a new client against the given API base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Fetches today's horoscope for `sign`.
    ///
    /// Makes a single attempt against the API; on any failure the bundled
    /// fallback for the sign is returned with today's date, tagged
    /// [`Source::Fallback`].
    ///
    /// # Errors
    ///
    /// Returns [`HoroscopeError::UnknownSign`] if `sign` is not one of the
    /// twelve canonical sign ids; those have no fallback entry.
    pub async fn fetch(&self, sign: &str) -> AppResult<DailyHoroscope> {
        if !zodiac::is_valid_sign(sign) {
            return Err(HoroscopeError::UnknownSign(sign.to_string()).into());
        }

        match self.fetch_remote(sign).await {
            Ok(horoscope) => {
                debug!(sign, "Fetched live horoscope");
                Ok(DailyHoroscope {
                    horoscope,
                    source: Source::Live,
                })
            }
            Err(failure) => {
                debug!(sign, %failure, "Horoscope fetch failed, using fallback");
                // The sign was validated above, so a fallback entry exists.
                let horoscope = fallback_horoscope(sign)
                    .ok_or_else(|| HoroscopeError::UnknownSign(sign.to_string()))?;
                Ok(DailyHoroscope {
                    horoscope,
                    source: Source::Fallback,
                })
            }
        }
    }

    /// Performs the single remote request and parses the response.
    async fn fetch_remote(&self, sign: &str) -> Result<Horoscope, FetchFailure> {
        let response = self
            .client
            .post(&self.base_url)
            .query(&[("sign", sign), ("day", "today")])
            .send()
            .await
            .map_err(FetchFailure::Request)?;

        if !response.status().is_success() {
            return Err(FetchFailure::Status(response.status()));
        }

        let body: ApiResponse = response.json().await.map_err(FetchFailure::Body)?;

        Ok(Horoscope {
            sign: sign.to_string(),
            date: Local::now().date_naive(),
            description: body
                .description
                .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
            compatibility: body
                .compatibility
                .unwrap_or_else(|| DEFAULT_COMPATIBILITY.to_string()),
            mood: body.mood.unwrap_or_else(|| DEFAULT_MOOD.to_string()),
            lucky_number: body
                .lucky_number
                .unwrap_or_else(|| DEFAULT_LUCKY_NUMBER.to_string()),
            lucky_time: body
                .lucky_time
                .unwrap_or_else(|| DEFAULT_LUCKY_TIME.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;
    use mockito::Matcher;

    #[tokio::test]
    async fn test_fetch_live_horoscope() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("sign".into(), "leo".into()),
                Matcher::UrlEncoded("day".into(), "today".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "description": "A golden day.",
                    "compatibility": "Aries",
                    "mood": "Radiant",
                    "lucky_number": "1",
                    "lucky_time": "12:00 PM"
                }"#,
            )
            .create_async()
            .await;

        let client = HoroscopeClient::new(server.url());
        let result = client.fetch("leo").await.unwrap();

        mock.assert_async().await;
        assert_eq!(result.source, Source::Live);
        assert_eq!(result.horoscope.sign, "leo");
        assert_eq!(result.horoscope.description, "A golden day.");
        assert_eq!(result.horoscope.mood, "Radiant");
        assert_eq!(result.horoscope.date, Local::now().date_naive());
    }

    #[tokio::test]
    async fn test_fetch_fills_missing_fields_with_defaults() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"description": "Only a description."}"#)
            .create_async()
            .await;

        let client = HoroscopeClient::new(server.url());
        let result = client.fetch("virgo").await.unwrap();

        assert_eq!(result.source, Source::Live);
        assert_eq!(result.horoscope.description, "Only a description.");
        assert_eq!(result.horoscope.compatibility, DEFAULT_COMPATIBILITY);
        assert_eq!(result.horoscope.mood, DEFAULT_MOOD);
        assert_eq!(result.horoscope.lucky_number, DEFAULT_LUCKY_NUMBER);
        assert_eq!(result.horoscope.lucky_time, DEFAULT_LUCKY_TIME);
    }

    #[tokio::test]
    async fn test_fetch_falls_back_on_server_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/")
            .match_query(Matcher::Any)
            .with_status(500)
            .create_async()
            .await;

        let client = HoroscopeClient::new(server.url());
        let result = client.fetch("aries").await.unwrap();

        assert_eq!(result.source, Source::Fallback);
        assert_eq!(result.horoscope.sign, "aries");
        assert_eq!(result.horoscope.date, Local::now().date_naive());
    }

    #[tokio::test]
    async fn test_fetch_falls_back_on_connection_failure() {
        // Nothing listens on the discard port, so the request fails outright.
        let client = HoroscopeClient::new("http://127.0.0.1:9");
        let result = client.fetch("aries").await.unwrap();

        let expected = fallback_horoscope("aries").unwrap();
        assert_eq!(result.source, Source::Fallback);
        assert_eq!(result.horoscope, expected);
        assert_eq!(result.horoscope.date, Local::now().date_naive());
    }

    #[tokio::test]
    async fn test_fetch_falls_back_on_malformed_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("not json at all")
            .create_async()
            .await;

        let client = HoroscopeClient::new(server.url());
        let result = client.fetch("pisces").await.unwrap();

        assert_eq!(result.source, Source::Fallback);
    }

    #[tokio::test]
    async fn test_fetch_rejects_unknown_sign() {
        let client = HoroscopeClient::new("http://127.0.0.1:9");
        let result = client.fetch("ophiuchus").await;

        assert!(matches!(
            result,
            Err(AppError::Horoscope(HoroscopeError::UnknownSign(_)))
        ));
    }
}
