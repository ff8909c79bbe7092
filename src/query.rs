//! Query parameters for endpoint requests.

use url::form_urlencoded;

use crate::server::Server;

/// Spiral Abyss season selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleType {
    Current,
    Previous,
}

impl ScheduleType {
    pub fn from_previous(previous: bool) -> Self {
        if previous {
            Self::Previous
        } else {
            Self::Current
        }
    }

    pub fn code(&self) -> u8 {
        match self {
            Self::Current => 1,
            Self::Previous => 2,
        }
    }
}

/// A value that may appear in an endpoint query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    Int(i64),
    UInt(u64),
    Str(String),
    Server(Server),
    Schedule(ScheduleType),
}

impl QueryValue {
    pub fn render(&self) -> String {
        match self {
            Self::Int(v) => v.to_string(),
            Self::UInt(v) => v.to_string(),
            Self::Str(s) => s.clone(),
            Self::Server(s) => s.as_str().to_string(),
            Self::Schedule(s) => s.code().to_string(),
        }
    }
}

impl From<i64> for QueryValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<u64> for QueryValue {
    fn from(v: u64) -> Self {
        Self::UInt(v)
    }
}

impl From<u32> for QueryValue {
    fn from(v: u32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<&str> for QueryValue {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<Server> for QueryValue {
    fn from(v: Server) -> Self {
        Self::Server(v)
    }
}

impl From<ScheduleType> for QueryValue {
    fn from(v: ScheduleType) -> Self {
        Self::Schedule(v)
    }
}

/// Ordered list of query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    params: Vec<(String, QueryValue)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn param(mut self, name: &str, value: impl Into<QueryValue>) -> Self {
        self.params.push((name.to_string(), value.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Form-encodes the parameters in insertion order (spaces become `+`).
    pub fn encode(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (name, value) in &self.params {
            serializer.append_pair(name, &value.render());
        }
        serializer.finish()
    }
}
