use crate::config::Credentials;
use crate::error::{ChirpError, Result};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use hmac::{Hmac, Mac};
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::Serialize;
use sha1::Sha1;

/// Identifier returned by the platform for a successful post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostId(pub String);

/// Write-side collaborator: publish a short text post, update the account's
/// profile description. Both raise on failure; neither is retried here.
pub trait Publisher: Send + Sync {
    fn publish(&self, text: &str) -> Result<PostId>;
    fn update_profile_description(&self, description: &str) -> Result<()>;
}

// ---------------------------------------------------------------------------
// OAuth 1.0a request signing
// ---------------------------------------------------------------------------

type HmacSha1 = Hmac<Sha1>;

fn percent_encode(s: &str) -> String {
    urlencoding::encode(s).into_owned()
}

/// Build an OAuth 1.0a `Authorization` header for one request.
///
/// `extra_params` carries query/form parameters that take part in the
/// signature base string; JSON bodies do not.
fn oauth1_header(
    credentials: &Credentials,
    method: &str,
    url: &str,
    extra_params: &[(&str, &str)],
) -> String {
    let nonce: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect();
    let timestamp = chrono::Utc::now().timestamp().to_string();

    let oauth_params: Vec<(&str, &str)> = vec![
        ("oauth_consumer_key", &credentials.consumer_key),
        ("oauth_nonce", &nonce),
        ("oauth_signature_method", "HMAC-SHA1"),
        ("oauth_timestamp", &timestamp),
        ("oauth_token", &credentials.access_token),
        ("oauth_version", "1.0"),
    ];

    let mut signed: Vec<(String, String)> = oauth_params
        .iter()
        .chain(extra_params.iter())
        .map(|(k, v)| (percent_encode(k), percent_encode(v)))
        .collect();
    signed.sort();
    let param_string = signed
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    let base_string = format!(
        "{}&{}&{}",
        method,
        percent_encode(url),
        percent_encode(&param_string)
    );
    let signing_key = format!(
        "{}&{}",
        percent_encode(&credentials.consumer_secret),
        percent_encode(&credentials.access_token_secret)
    );

    // HMAC construction is infallible for any key length.
    let mut mac = HmacSha1::new_from_slice(signing_key.as_bytes()).expect("hmac key");
    mac.update(base_string.as_bytes());
    let signature = BASE64.encode(mac.finalize().into_bytes());

    let mut header_params: Vec<(String, String)> = oauth_params
        .iter()
        .map(|(k, v)| (k.to_string(), percent_encode(v)))
        .collect();
    header_params.push(("oauth_signature".to_string(), percent_encode(&signature)));
    header_params.sort();

    let fields = header_params
        .iter()
        .map(|(k, v)| format!("{k}=\"{v}\""))
        .collect::<Vec<_>>()
        .join(", ");
    format!("OAuth {fields}")
}

// ---------------------------------------------------------------------------
// HttpPublisher
// ---------------------------------------------------------------------------

const DEFAULT_API_BASE: &str = "https://api.twitter.com";

/// Platform client over the v2 post endpoint and the v1.1 profile endpoint,
/// signing each request with OAuth 1.0a user context.
pub struct HttpPublisher {
    credentials: Credentials,
    client: reqwest::blocking::Client,
    base_url: String,
}

impl HttpPublisher {
    pub fn new(credentials: Credentials) -> Self {
        Self::with_base(credentials, DEFAULT_API_BASE)
    }

    /// Point the client at a different API host (tests).
    pub fn with_base(credentials: Credentials, base_url: impl Into<String>) -> Self {
        Self {
            credentials,
            client: reqwest::blocking::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Fetch the authenticated account's username via `GET /2/users/me`.
    pub fn verify_credentials(&self) -> Result<String> {
        let url = format!("{}/2/users/me", self.base_url);
        let auth = oauth1_header(&self.credentials, "GET", &url, &[]);
        let response = self
            .client
            .get(&url)
            .header("authorization", auth)
            .send()
            .map_err(|e| ChirpError::AuthCheck(e.to_string()))?;

        let status = response.status();
        let body: serde_json::Value = response
            .json()
            .map_err(|e| ChirpError::AuthCheck(e.to_string()))?;
        if !status.is_success() {
            return Err(ChirpError::AuthCheck(format!("{status}: {body}")));
        }
        body["data"]["username"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| ChirpError::AuthCheck("no user data returned".to_string()))
    }
}

impl Publisher for HttpPublisher {
    fn publish(&self, text: &str) -> Result<PostId> {
        let url = format!("{}/2/tweets", self.base_url);
        let auth = oauth1_header(&self.credentials, "POST", &url, &[]);
        let response = self
            .client
            .post(&url)
            .header("authorization", auth)
            .json(&serde_json::json!({ "text": text }))
            .send()
            .map_err(|e| ChirpError::Publish(e.to_string()))?;

        let status = response.status();
        let body: serde_json::Value = response
            .json()
            .map_err(|e| ChirpError::Publish(e.to_string()))?;
        if !status.is_success() {
            return Err(ChirpError::Publish(format!("{status}: {body}")));
        }
        body["data"]["id"]
            .as_str()
            .map(|id| PostId(id.to_string()))
            .ok_or_else(|| ChirpError::Publish("response carried no post id".to_string()))
    }

    fn update_profile_description(&self, description: &str) -> Result<()> {
        let url = format!("{}/1.1/account/update_profile.json", self.base_url);
        // Form parameters take part in the OAuth signature.
        let auth = oauth1_header(
            &self.credentials,
            "POST",
            &url,
            &[("description", description)],
        );
        let response = self
            .client
            .post(&url)
            .header("authorization", auth)
            .form(&[("description", description)])
            .send()
            .map_err(|e| ChirpError::ProfileUpdate(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ChirpError::ProfileUpdate(format!("{status}: {body}")));
        }
        Ok(())
    }
}
