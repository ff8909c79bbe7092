//! Wish (gacha) history fetching.
//!
//! The history endpoints live on a separate host and authorize with an
//! `authkey` taken from the in-game feedback URL instead of the login
//! cookie. Records come back newest first, twenty per page; paging stops at
//! the first empty page.

use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use crate::client::{Client, Session};
use crate::error::{Error, Result};
use crate::query::Query;

pub const GACHA_INFO_URL: &str = "https://hk4e-api-os.mihoyo.com/event/gacha_info/api/";
pub const PAGE_SIZE: u32 = 20;

/// A banner category, e.g. "Character Event Wish".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GachaType {
    pub id: String,
    pub key: String,
    pub name: String,
}

/// A single pull.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GachaRecord {
    pub gacha_type: GachaType,
    pub name: String,
    pub rarity: u8,
    #[serde(default)]
    pub item_type: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub uid: String,
}

#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(default)]
    uid: String,
    #[serde(default)]
    time: String,
    name: String,
    #[serde(default)]
    item_type: String,
    #[serde(deserialize_with = "deserialize_rank_type")]
    rank_type: u8,
    id: String,
}

// `list` and `gacha_type_list` are required; only an explicit `[]` is empty.
#[derive(Debug, Deserialize)]
struct ConfigList {
    gacha_type_list: Vec<GachaType>,
}

#[derive(Debug, Deserialize)]
struct LogPage {
    list: Vec<RawRecord>,
}

/// `rank_type` arrives as a numeric string ("3", "4", "5").
fn deserialize_rank_type<'de, D>(deserializer: D) -> std::result::Result<u8, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    s.trim()
        .parse()
        .map_err(|_| serde::de::Error::custom(format!("invalid rank_type: {s:?}")))
}

/// Pulls the `authkey` query parameter out of a feedback/history URL.
///
/// The in-game URL sometimes keeps its query after the fragment
/// (`...index.html#/log?authkey=...`), so that part is searched as well.
pub fn authkey_from_url(raw: &str) -> Result<String> {
    let url = Url::parse(raw.trim())?;
    if let Some((_, v)) = url.query_pairs().find(|(k, _)| k == "authkey") {
        return Ok(v.into_owned());
    }
    url.fragment()
        .and_then(|frag| frag.split_once('?'))
        .and_then(|(_, q)| {
            url::form_urlencoded::parse(q.as_bytes())
                .find(|(k, _)| k == "authkey")
                .map(|(_, v)| v.into_owned())
        })
        .ok_or(Error::MissingAuthkey)
}

pub struct GachaClient {
    client: Client,
}

impl GachaClient {
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        Ok(Self {
            client: Client::new(GACHA_INFO_URL, timeout)?,
        })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}{endpoint}", self.client.base_url())
    }

    fn base_query(&self, session: &Session, authkey: &str) -> Query {
        Query::new()
            .param("authkey", authkey)
            .param("authkey_ver", 1i64)
            .param("lang", session.language())
    }

    /// Banner categories in the order the server lists them.
    pub fn gacha_types(&self, session: &Session, authkey: &str) -> Result<Vec<GachaType>> {
        let query = self.base_query(session, authkey);
        let data = self.client.fetch(session, "getConfigList", &query)?;
        let config: ConfigList = serde_json::from_value(data).map_err(|source| Error::Decode {
            url: self.endpoint_url("getConfigList"),
            source,
        })?;
        Ok(config.gacha_type_list)
    }

    /// One page of history for `gacha_type`, newest first.
    pub fn gacha_page(
        &self,
        session: &Session,
        authkey: &str,
        gacha_type: &GachaType,
        page: u32,
        end_id: &str,
    ) -> Result<Vec<GachaRecord>> {
        let query = self
            .base_query(session, authkey)
            .param("gacha_type", gacha_type.key.as_str())
            .param("size", PAGE_SIZE)
            .param("page", page)
            .param("end_id", end_id);
        let data = self.client.fetch(session, "getGachaLog", &query)?;
        let page: LogPage = serde_json::from_value(data).map_err(|source| Error::Decode {
            url: self.endpoint_url("getGachaLog"),
            source,
        })?;
        Ok(page
            .list
            .into_iter()
            .map(|r| into_record(r, gacha_type))
            .collect())
    }

    /// Full history of one banner.
    pub fn gacha_log(
        &self,
        session: &Session,
        authkey: &str,
        gacha_type: &GachaType,
    ) -> Result<Vec<GachaRecord>> {
        collect_pages(|page, end_id| self.gacha_page(session, authkey, gacha_type, page, end_id))
    }

    /// Full history of every banner, banners in server order.
    pub fn entire_gacha_log(&self, session: &Session, authkey: &str) -> Result<Vec<GachaRecord>> {
        let mut records = Vec::new();
        for gacha_type in self.gacha_types(session, authkey)? {
            let log = self.gacha_log(session, authkey, &gacha_type)?;
            info!("{}: {} pulls", gacha_type.name, log.len());
            records.extend(log);
        }
        Ok(records)
    }
}

fn into_record(raw: RawRecord, gacha_type: &GachaType) -> GachaRecord {
    GachaRecord {
        gacha_type: gacha_type.clone(),
        rarity: raw.rank_type,
        name: raw.name,
        item_type: raw.item_type,
        time: raw.time,
        id: raw.id,
        uid: raw.uid,
    }
}

/// Drives `fetch_page(page, end_id)` from page 1 until it returns nothing.
/// `end_id` is the id of the last record seen so far ("0" initially).
pub fn collect_pages<F>(mut fetch_page: F) -> Result<Vec<GachaRecord>>
where
    F: FnMut(u32, &str) -> Result<Vec<GachaRecord>>,
{
    let mut records: Vec<GachaRecord> = Vec::new();
    let mut page = 1;
    loop {
        let end_id = records.last().map(|r| r.id.clone()).unwrap_or_else(|| "0".to_string());
        let batch = fetch_page(page, &end_id)?;
        if batch.is_empty() {
            debug!("page {page} empty, stopping");
            break;
        }
        records.extend(batch);
        page += 1;
    }
    Ok(records)
}
