//! Thin HTTP wrapper around the remote record-keeping service.

use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::Error;

/// The hosted record-keeping service that the CLI talks to by default.
pub const DEFAULT_API_URL: &str = "https://van-rental.onrender.com/api";

/// The date format the remote API speaks, e.g. "2024-03-05".
const WIRE_DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// How much of an error response body to quote in error messages.
const ERROR_BODY_LIMIT: usize = 200;

/// An HTTP client bound to the base URL of the record-keeping service.
///
/// Each record service holds a clone of this client; construct it once at
/// start-up and hand it around.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client with a request timeout suitable for a slow free-tier
    /// host.
    ///
    /// # Errors
    /// Returns [Error::Network] if the underlying HTTP client cannot be
    /// constructed.
    pub fn new(base_url: &str) -> Result<Self, Error> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|error| Error::Network(format!("could not build the HTTP client: {error}")))?;

        Ok(Self::with_client(base_url, client))
    }

    /// Create a client from an existing `reqwest::Client`.
    ///
    /// Useful in tests that need to point the services at a mock server.
    pub fn with_client(base_url: &str, client: Client) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// GET a list endpoint and decode each element of the returned array.
    ///
    /// A body that is not a JSON array is reported as [Error::UnexpectedShape]
    /// rather than a decode error: the remote occasionally answers a list
    /// request with an error object and a 200 status.
    pub(crate) async fn get_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, Error> {
        let response = self.client.get(self.url(path)).send().await?;
        let response = check_status(response).await?;
        let body: Value = response.json().await?;

        let Value::Array(items) = body else {
            return Err(Error::UnexpectedShape(format!(
                "expected an array from {path}, got {}",
                value_kind(&body)
            )));
        };

        items
            .into_iter()
            .map(|item| {
                serde_json::from_value(item)
                    .map_err(|error| Error::UnexpectedShape(error.to_string()))
            })
            .collect()
    }

    /// POST a JSON body and decode the JSON response.
    pub(crate) async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, Error>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let response = self.client.post(self.url(path)).json(body).send().await?;
        let response = check_status(response).await?;

        Ok(response.json().await?)
    }

    /// POST a JSON body and return the raw response text.
    pub(crate) async fn post_text<B: Serialize>(&self, path: &str, body: &B) -> Result<String, Error> {
        let response = self.client.post(self.url(path)).json(body).send().await?;
        let response = check_status(response).await?;

        Ok(response.text().await?)
    }

    /// PUT a JSON body to a record path and decode the JSON response.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if the record no longer exists remotely.
    pub(crate) async fn put_json<B, T>(&self, path: &str, body: &B) -> Result<T, Error>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let response = self.client.put(self.url(path)).json(body).send().await?;
        let response = check_record_status(response).await?;

        Ok(response.json().await?)
    }

    /// DELETE a record path.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if the record no longer exists remotely.
    pub(crate) async fn delete(&self, path: &str) -> Result<(), Error> {
        let response = self.client.delete(self.url(path)).send().await?;
        check_record_status(response).await?;

        Ok(())
    }

    /// POST a multipart form, e.g. an image upload.
    pub(crate) async fn post_multipart(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<(), Error> {
        let response = self.client.post(self.url(path)).multipart(form).send().await?;
        check_status(response).await?;

        Ok(())
    }
}

/// Map a non-success status to [Error::Network] with the body quoted.
async fn check_status(response: Response) -> Result<Response, Error> {
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let body = body.trim();
    let detail = if body.is_empty() {
        String::new()
    } else if body.len() > ERROR_BODY_LIMIT {
        let truncated: String = body.chars().take(ERROR_BODY_LIMIT).collect();
        format!(": {truncated}...")
    } else {
        format!(": {body}")
    };
    tracing::error!("the server answered {status}{detail}");

    Err(Error::Network(format!("the server answered {status}{detail}")))
}

/// Like [check_status], but a 404 on a record path means the record is gone.
async fn check_record_status(response: Response) -> Result<Response, Error> {
    if response.status() == StatusCode::NOT_FOUND {
        return Err(Error::NotFound);
    }

    check_status(response).await
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Parse a date string from the remote API.
///
/// Remote records have carried empty strings and malformed dates; those come
/// back as `None` instead of failing the whole fetch.
pub(crate) fn parse_wire_date(text: &str) -> Option<Date> {
    Date::parse(text.trim(), &WIRE_DATE_FORMAT).ok()
}

/// Format a date the way the remote API expects it.
pub(crate) fn format_wire_date(date: Date) -> String {
    date.format(&WIRE_DATE_FORMAT)
        .expect("a calendar date always formats as year-month-day")
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::{ApiClient, format_wire_date, parse_wire_date};

    #[test]
    fn parse_wire_date_accepts_iso_dates() {
        assert_eq!(parse_wire_date("2024-03-05"), Some(date!(2024 - 03 - 05)));
        assert_eq!(parse_wire_date(" 2024-12-31 "), Some(date!(2024 - 12 - 31)));
    }

    #[test]
    fn parse_wire_date_rejects_garbage() {
        assert_eq!(parse_wire_date(""), None);
        assert_eq!(parse_wire_date("not a date"), None);
        assert_eq!(parse_wire_date("2024-13-01"), None);
        assert_eq!(parse_wire_date("05/03/2024"), None);
    }

    #[test]
    fn format_wire_date_round_trips() {
        let date = date!(2024 - 03 - 05);

        assert_eq!(parse_wire_date(&format_wire_date(date)), Some(date));
    }

    #[test]
    fn base_url_trailing_slash_is_ignored() {
        let client = ApiClient::new("https://example.com/api/").expect("could not build client");

        assert_eq!(client.url("/tripdata"), "https://example.com/api/tripdata");
    }
}
