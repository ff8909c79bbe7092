//! Error taxonomy for the HoYoLAB client.
//!
//! Transport failures, envelope decoding failures and every server-side
//! `(retcode, message)` pair the client knows about get their own variant so
//! callers can match on them. Unknown pairs fall back to [`Error::Service`].

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP {status} for url: \"{url}\"")]
    Http { status: u16, url: String },

    #[error("request to \"{url}\" failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: ureq::Error,
    },

    #[error("failed to decode response from \"{url}\": {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    #[error("UID could not be found.")]
    UidNotFound,

    #[error("User has set their data to be private.")]
    DataNotPublic,

    #[error("Invalid DS token, might be expired.")]
    InvalidDs,

    #[error("Login cookies have not been provided or are incorrect.")]
    NotLoggedIn,

    #[error("Invalid Spiral Abyss schedule type, can only be 1 or 2.")]
    InvalidScheduleType,

    #[error("{retcode} Error ({message}) for url: \"{url}\"")]
    Service {
        retcode: i64,
        message: String,
        url: String,
    },

    #[error("UID {0} isn't associated with any server")]
    UnrecognizedUid(String),

    #[error("no authkey found in url")]
    MissingAuthkey,
}

/// Server-side failure kinds recognised from the response envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiFailure {
    UidNotFound,
    DataNotPublic,
    InvalidDs,
    NotLoggedIn,
    InvalidScheduleType,
}

impl From<ApiFailure> for Error {
    fn from(kind: ApiFailure) -> Self {
        match kind {
            ApiFailure::UidNotFound => Error::UidNotFound,
            ApiFailure::DataNotPublic => Error::DataNotPublic,
            ApiFailure::InvalidDs => Error::InvalidDs,
            ApiFailure::NotLoggedIn => Error::NotLoggedIn,
            ApiFailure::InvalidScheduleType => Error::InvalidScheduleType,
        }
    }
}

// Messages are compared byte for byte; the untranslated ones come straight
// from the server locale.
static RETCODE_RULES: &[(i64, &str, ApiFailure)] = &[
    (1009, "角色信息错误", ApiFailure::UidNotFound),
    (10102, "Data is not public for the user", ApiFailure::DataNotPublic),
    (-401, "请求异常", ApiFailure::InvalidDs),
    (10001, "Please login", ApiFailure::NotLoggedIn),
    (1, "Invalid schedule type", ApiFailure::InvalidScheduleType),
];

/// Looks up the first rule matching `(retcode, message)` exactly.
pub fn classify_retcode(retcode: i64, message: &str) -> Option<ApiFailure> {
    RETCODE_RULES
        .iter()
        .find(|(code, msg, _)| *code == retcode && *msg == message)
        .map(|(_, _, kind)| *kind)
}

/// Turns a failed envelope into an [`Error`], keeping the raw fields when no
/// rule matches.
pub fn error_for_retcode(retcode: i64, message: &str, url: &str) -> Error {
    match classify_retcode(retcode, message) {
        Some(kind) => kind.into(),
        None => Error::Service {
            retcode,
            message: message.to_string(),
            url: url.to_string(),
        },
    }
}
