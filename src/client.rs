//! Blocking client for the HoYoLAB game-record API.
//!
//! Requests are plain GETs with query parameters. Each one carries the
//! session headers plus a freshly generated `ds` token; responses come back
//! wrapped in a `{retcode, message, data}` envelope which is unwrapped here
//! and turned into [`Error`] variants when `data` is null.

use log::debug;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Duration;
use url::Url;

use crate::ds::{DS_SALT, ds_token};
use crate::error::{Error, Result, error_for_retcode};
use crate::query::{Query, ScheduleType};
use crate::server::{Server, recognize_server};

pub const HOYOLAB_URL: &str = "https://bbs-api-os.hoyolab.com/";
pub const APP_VERSION: &str = "1.5.0";
pub const CLIENT_TYPE: &str = "4";
pub const DEFAULT_LANGUAGE: &str = "en-us";
pub const MAX_SEARCH_SIZE: u32 = 20;

/// Game id of Genshin Impact on the community side.
const GENSHIN_GID: i64 = 2;

/// Headers shared by every request made on behalf of one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    headers: BTreeMap<String, String>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self::with_language(DEFAULT_LANGUAGE)
    }

    pub fn with_language(language: &str) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("x-rpc-app_version".to_string(), APP_VERSION.to_string());
        headers.insert("x-rpc-client_type".to_string(), CLIENT_TYPE.to_string());
        headers.insert("x-rpc-language".to_string(), language.to_string());
        Self { headers }
    }

    /// Stores the login cookie. Required for anything beyond search.
    ///
    /// Both values come from the browser's cookies and are not checked here;
    /// a bad pair only shows up as [`Error::NotLoggedIn`] on the next call.
    pub fn set_cookie(&mut self, account_id: u64, cookie_token: &str) {
        self.headers.insert(
            "cookie".to_string(),
            format!("account_id={account_id}; cookie_token={cookie_token}"),
        );
    }

    pub fn cookie(&self) -> Option<&str> {
        self.header("cookie")
    }

    pub fn language(&self) -> &str {
        self.header("x-rpc-language").unwrap_or(DEFAULT_LANGUAGE)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    pub fn headers(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[derive(Debug, Deserialize)]
struct Envelope {
    retcode: i64,
    #[serde(default)]
    message: String,
    data: Option<Value>,
}

/// Parses a response body, returning `data` or the classified failure.
pub fn unwrap_envelope(body: &str, url: &str) -> Result<Value> {
    let envelope: Envelope = serde_json::from_str(body).map_err(|source| Error::Decode {
        url: url.to_string(),
        source,
    })?;

    if let Some(data) = envelope.data {
        return Ok(data);
    }

    let err = error_for_retcode(envelope.retcode, &envelope.message, url);
    debug!(
        "retcode {} ({}) classified as: {}",
        envelope.retcode, envelope.message, err
    );
    Err(err)
}

/// Joins `endpoint` onto `base` and appends the encoded query.
pub fn build_url(base: &Url, endpoint: &str, query: &Query) -> Result<Url> {
    let mut url = base.join(endpoint)?;
    if !query.is_empty() {
        url.set_query(Some(&query.encode()));
    }
    Ok(url)
}

/// URL with the `authkey` masked, for logs and error messages.
fn redacted(url: &Url) -> String {
    if !url.query_pairs().any(|(k, _)| k == "authkey") {
        return url.to_string();
    }
    let mut masked = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == "authkey" { "***".to_string() } else { v.into_owned() };
            (k.into_owned(), v)
        })
        .collect();
    masked.query_pairs_mut().clear().extend_pairs(pairs);
    masked.to_string()
}

/// Blocking HTTP client bound to one API host.
pub struct Client {
    agent: ureq::Agent,
    base_url: Url,
}

impl Client {
    /// Client for the public HoYoLAB host.
    pub fn hoyolab(timeout: Option<Duration>) -> Result<Self> {
        Self::new(HOYOLAB_URL, timeout)
    }

    /// Client for an arbitrary base URL. `timeout` of `None` keeps the
    /// transport default.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut base = base_url.to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base)?;

        let config = ureq::Agent::config_builder()
            .timeout_global(timeout)
            .http_status_as_error(false)
            .build();

        Ok(Self {
            agent: config.into(),
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Sends a signed GET to `endpoint` and returns the envelope's `data`.
    ///
    /// No retries: an expired `ds` or missing cookie surfaces as
    /// [`Error::InvalidDs`] / [`Error::NotLoggedIn`] and the caller decides.
    pub fn fetch(&self, session: &Session, endpoint: &str, query: &Query) -> Result<Value> {
        let url = build_url(&self.base_url, endpoint, query)?;

        let mut request = self.agent.get(url.as_str());
        for (name, value) in session.headers() {
            request = request.header(name, value);
        }
        let ds = ds_token(DS_SALT);
        request = request.header("ds", ds.as_str());

        let shown = redacted(&url);
        debug!("GET {shown}");
        let mut response = request.call().map_err(|source| Error::Transport {
            url: shown.clone(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Http {
                status: status.as_u16(),
                url: shown,
            });
        }

        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|source| Error::Transport {
                url: shown.clone(),
                source,
            })?;

        unwrap_envelope(&body, &shown)
    }

    /// Searches posts, topics and users. At most 20 results are returned.
    pub fn search(&self, session: &Session, keyword: &str, size: u32) -> Result<Value> {
        let query = Query::new()
            .param("keyword", keyword)
            .param("size", size.min(MAX_SEARCH_SIZE))
            .param("gids", GENSHIN_GID);
        self.fetch(session, "community/apihub/wapi/search", &query)
    }

    /// Community profile (nickname, introduction, community stats).
    pub fn community_user_info(&self, session: &Session, community_uid: u64) -> Result<Value> {
        let query = Query::new().param("uid", community_uid);
        self.fetch(session, "community/user/wapi/getUserFullInfo", &query)
    }

    /// First game record card of a community user, `None` when the profile is
    /// private.
    pub fn record_card(&self, session: &Session, community_uid: u64) -> Result<Option<Value>> {
        let query = Query::new()
            .param("uid", community_uid)
            .param("gids", GENSHIN_GID);
        let data = self.fetch(session, "game_record/card/wapi/getGameRecordCard", &query)?;
        Ok(first_card(data))
    }

    /// Game UID behind a community UID, `None` when the card is private.
    pub fn uid_from_community(&self, session: &Session, community_uid: u64) -> Result<Option<u64>> {
        let card = self.record_card(session, community_uid)?;
        Ok(card.as_ref().and_then(game_role_id))
    }

    /// Characters, stats and exploration progress of a game account.
    pub fn user_info(&self, session: &Session, uid: u64, server: Option<Server>) -> Result<Value> {
        let server = match server {
            Some(s) => s,
            None => recognize_server(uid)?,
        };
        let query = Query::new().param("server", server).param("role_id", uid);
        self.fetch(session, "game_record/genshin/api/index", &query)
    }

    /// Spiral Abyss progress for the current season, or the previous one when
    /// `previous` is set.
    pub fn spiral_abyss(
        &self,
        session: &Session,
        uid: u64,
        server: Option<Server>,
        previous: bool,
    ) -> Result<Value> {
        let server = match server {
            Some(s) => s,
            None => recognize_server(uid)?,
        };
        let query = Query::new()
            .param("server", server)
            .param("role_id", uid)
            .param("schedule_type", ScheduleType::from_previous(previous));
        self.fetch(session, "game_record/genshin/api/spiralAbyss", &query)
    }
}

fn first_card(data: Value) -> Option<Value> {
    match data {
        Value::Object(mut map) => match map.remove("list") {
            Some(Value::Array(cards)) => cards.into_iter().next(),
            _ => None,
        },
        _ => None,
    }
}

fn game_role_id(card: &Value) -> Option<u64> {
    match card.get("game_role_id")? {
        Value::String(s) => s.trim().parse().ok(),
        Value::Number(n) => n.as_u64(),
        _ => None,
    }
}
