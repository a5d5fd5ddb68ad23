//! Remote authentication.

use serde::Serialize;
use serde_json::Value;

use crate::{Error, api::ApiClient};

const AUTH_PATH: &str = "/authenticate";

#[derive(Serialize)]
struct Credentials<'a> {
    name: &'a str,
    password: &'a str,
}

/// Check a name and password against the remote service.
///
/// The endpoint has answered with JSON booleans, bare objects and plain
/// `"true"`/`"false"` text across deployments; all of those are accepted.
/// A definite rejection is `Ok(false)`, not an error.
///
/// # Errors
/// Returns [Error::Network] if the call itself fails.
pub async fn authenticate(client: &ApiClient, name: &str, password: &str) -> Result<bool, Error> {
    let body = client
        .post_text(AUTH_PATH, &Credentials { name, password })
        .await?;

    Ok(parse_bool_response(&body))
}

fn parse_bool_response(body: &str) -> bool {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Bool(value)) => value,
        Ok(Value::Null) => false,
        Ok(Value::Number(number)) => number.as_f64() != Some(0.0),
        Ok(Value::String(text)) => text.eq_ignore_ascii_case("true"),
        // Objects and arrays count as an accepted login.
        Ok(_) => true,
        Err(_) => body.trim().eq_ignore_ascii_case("true"),
    }
}
