use crate::config::FetchConfig;
use crate::errors::{AppError, AppResult};
use reqwest::{header, StatusCode, Url};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use sha1::{Digest, Sha1};
use tracing::{error, info, warn};

/// User agent sent with every request.
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Login credentials for a Wilma instance.
///
/// The password and the shared API secret are wrapped in [`SecretString`] so
/// an accidental `{:?}` cannot leak them into logs.
#[derive(Debug)]
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
    pub api_key: SecretString,
}

/// An authenticated Wilma session.
///
/// Owns the cookie-carrying HTTP client bound to the normalized base URL.
/// The only way to obtain one is [`login`], so an unauthenticated client
/// cannot reach the schedule fetcher by construction.
#[derive(Debug, Clone)]
pub struct Session {
    client: reqwest::Client,
    base_url: Url,
}

impl Session {
    pub(crate) fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// The normalized base URL all endpoint paths are joined onto.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

/// Response body of the unauthenticated `index_json` discovery call.
#[derive(Debug, Deserialize)]
struct IndexResponse {
    #[serde(rename = "SessionID")]
    session_id: Option<String>,
}

/// Normalizes the user-supplied Wilma address into a base URL.
///
/// A bare host gains an `https://` scheme; an explicit `http(s)://` scheme is
/// honored as given. The result always ends with a trailing slash so that
/// endpoint paths resolve under it rather than replacing the last segment.
pub fn normalize_base_url(raw: &str) -> AppResult<Url> {
    let mut address = if raw.contains("://") {
        raw.to_string()
    } else {
        format!("https://{raw}")
    };
    if !address.ends_with('/') {
        address.push('/');
    }
    Ok(Url::parse(&address)?)
}

/// Fetches the transient session identifier from the discovery endpoint.
///
/// Returns the `SessionID` field of the JSON body, or an empty string when
/// the field is absent. Transport and JSON parse failures are fatal; this
/// step is never retried.
pub async fn fetch_session_key(client: &reqwest::Client, base_url: &Url) -> AppResult<String> {
    let body = client
        .get(base_url.join("index_json")?)
        .send()
        .await?
        .text()
        .await?;
    let index: IndexResponse = serde_json::from_str(&body)?;

    match index.session_id {
        Some(session_id) => {
            info!("Got session key successfully");
            Ok(session_id)
        }
        None => {
            warn!("Discovery response carries no SessionID field");
            Ok(String::new())
        }
    }
}

/// Builds the login request signature: `sha1:` + hex(SHA1("user|session|secret")).
///
/// Pure function, always succeeds.
pub fn build_signature(username: &str, session_id: &str, api_key: &SecretString) -> String {
    let mut hasher = Sha1::new();
    hasher.update(username.as_bytes());
    hasher.update(b"|");
    hasher.update(session_id.as_bytes());
    hasher.update(b"|");
    hasher.update(api_key.expose_secret().as_bytes());
    format!("sha1:{}", hex::encode(hasher.finalize()))
}

/// Authenticates against the Wilma login endpoint.
///
/// Fetches the session key, signs it together with the username and the
/// shared secret, and POSTs the form-encoded credentials. The server's
/// session cookie lands in the returned [`Session`]'s cookie store and is
/// what authenticates all subsequent requests.
///
/// # Errors
///
/// Any non-200 login status is fatal ([`AppError::LoginRejected`]); transport
/// and parse failures during discovery or login are fatal too. No retries.
pub async fn login(
    base_url: Url,
    credentials: &Credentials,
    config: &FetchConfig,
) -> AppResult<Session> {
    let client = reqwest::Client::builder()
        .cookie_store(true)
        .user_agent(USER_AGENT)
        .timeout(config.http_timeout)
        .build()?;

    let session_key = fetch_session_key(&client, &base_url).await?;
    let signature = build_signature(&credentials.username, &session_key, &credentials.api_key);

    let response = client
        .post(base_url.join("login")?)
        .header(header::ACCEPT, "application/json")
        .form(&[
            ("Login", credentials.username.as_str()),
            ("Password", credentials.password.expose_secret().as_str()),
            ("SessionId", session_key.as_str()),
            ("ApiKey", signature.as_str()),
            ("format", "json"),
        ])
        .send()
        .await?;

    let status = response.status();
    if status != StatusCode::OK {
        error!(status = status.as_u16(), "Login rejected");
        return Err(AppError::LoginRejected {
            status: status.as_u16(),
        });
    }

    info!(status = status.as_u16(), "Logged in successfully");
    Ok(Session { client, base_url })
}
