//! OAuth 1.0a user-context signing (HMAC-SHA1).
//!
//! X API v2 write endpoints accept the same signature scheme as v1.1. JSON
//! request bodies are not part of the signature base string, only the query
//! parameters and the `oauth_*` protocol parameters.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha1::Sha1;

use crate::error::{Result, XError};

type HmacSha1 = Hmac<Sha1>;

/// User-context credentials for the acting account.
#[derive(Debug, Clone)]
pub struct XCredentials {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub access_token: String,
    pub access_token_secret: String,
}

fn encode(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Build the `Authorization` header value for one request.
pub fn authorization_header(
    credentials: &XCredentials,
    method: &str,
    url: &str,
    params: &[(&str, &str)],
) -> Result<String> {
    let nonce = uuid::Uuid::new_v4().simple().to_string();
    let timestamp = chrono::Utc::now().timestamp().to_string();
    authorization_header_with(credentials, method, url, params, &nonce, &timestamp)
}

pub(crate) fn authorization_header_with(
    credentials: &XCredentials,
    method: &str,
    url: &str,
    params: &[(&str, &str)],
    nonce: &str,
    timestamp: &str,
) -> Result<String> {
    let mut oauth_params = vec![
        ("oauth_consumer_key", credentials.consumer_key.as_str()),
        ("oauth_nonce", nonce),
        ("oauth_signature_method", "HMAC-SHA1"),
        ("oauth_timestamp", timestamp),
        ("oauth_token", credentials.access_token.as_str()),
        ("oauth_version", "1.0"),
    ];

    let signature = sign(credentials, method, url, &oauth_params, params)?;
    oauth_params.push(("oauth_signature", &signature));

    let fields = oauth_params
        .iter()
        .map(|(k, v)| format!("{}=\"{}\"", encode(k), encode(v)))
        .collect::<Vec<_>>()
        .join(", ");

    Ok(format!("OAuth {}", fields))
}

fn sign(
    credentials: &XCredentials,
    method: &str,
    url: &str,
    oauth_params: &[(&str, &str)],
    params: &[(&str, &str)],
) -> Result<String> {
    let base = signature_base(method, url, oauth_params, params);
    let key = format!(
        "{}&{}",
        encode(&credentials.consumer_secret),
        encode(&credentials.access_token_secret)
    );

    let mut mac =
        HmacSha1::new_from_slice(key.as_bytes()).map_err(|e| XError::Signing(e.to_string()))?;
    mac.update(base.as_bytes());
    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}

fn signature_base(
    method: &str,
    url: &str,
    oauth_params: &[(&str, &str)],
    params: &[(&str, &str)],
) -> String {
    let mut encoded: Vec<(String, String)> = oauth_params
        .iter()
        .chain(params.iter())
        .map(|(k, v)| (encode(k), encode(v)))
        .collect();
    encoded.sort();

    let parameter_string = encoded
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    format!(
        "{}&{}&{}",
        method.to_uppercase(),
        encode(url),
        encode(&parameter_string)
    )
}
