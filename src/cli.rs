use std::path::PathBuf;

use crate::history::DEFAULT_HISTORY_FILE;
use crate::server::Server;

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerArg {
    #[value(name = "cn_gf01")]
    CnGf01,
    #[value(name = "cn_qd01")]
    CnQd01,
    #[value(name = "os_usa")]
    OsUsa,
    #[value(name = "os_euro")]
    OsEuro,
    #[value(name = "os_asia")]
    OsAsia,
    #[value(name = "os_cht")]
    OsCht,
}

impl From<ServerArg> for Server {
    fn from(arg: ServerArg) -> Self {
        match arg {
            ServerArg::CnGf01 => Server::CnGf01,
            ServerArg::CnQd01 => Server::CnQd01,
            ServerArg::OsUsa => Server::OsUsa,
            ServerArg::OsEuro => Server::OsEuro,
            ServerArg::OsAsia => Server::OsAsia,
            ServerArg::OsCht => Server::OsCht,
        }
    }
}

#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Download the full wish history to a JSON file
    Dump {
        /// Feedback or wish history URL containing an authkey
        #[arg(required_unless_present = "authkey")]
        url: Option<String>,

        /// Use an authkey directly instead of extracting it from a URL
        #[arg(long, conflicts_with = "url")]
        authkey: Option<String>,

        /// Output file
        #[arg(short, long, default_value = DEFAULT_HISTORY_FILE)]
        output: PathBuf,
    },

    /// Show pulls needed for each 5★ per banner, from a dumped history file
    Summary {
        #[arg(default_value = DEFAULT_HISTORY_FILE)]
        file: PathBuf,
    },

    /// Search posts, topics and users
    Search {
        keyword: String,

        /// Number of results (max 20)
        #[arg(long, default_value_t = 20)]
        size: u32,
    },

    /// Community profile of a community UID
    Profile { community_uid: u64 },

    /// Game record card of a community UID
    Card { community_uid: u64 },

    /// Game UID behind a community UID
    Uid { community_uid: u64 },

    /// Characters, stats and explorations of a game UID
    User {
        uid: u64,

        /// Override the server recognized from the UID
        #[arg(long, value_enum)]
        server: Option<ServerArg>,
    },

    /// Spiral Abyss progress of a game UID
    Abyss {
        uid: u64,

        /// Override the server recognized from the UID
        #[arg(long, value_enum)]
        server: Option<ServerArg>,

        /// Show the previous season instead of the current one
        #[arg(long)]
        previous: bool,
    },
}

#[derive(clap::Parser, Debug)]
#[command(name = "genshinstats", version, about = "HoYoLAB game record and wish history client")]
pub struct Args {
    /// HoYoLAB account_id cookie value
    #[arg(long, env = "GENSHINSTATS_ACCOUNT_ID", global = true)]
    pub account_id: Option<u64>,

    /// HoYoLAB cookie_token cookie value
    #[arg(long, env = "GENSHINSTATS_COOKIE_TOKEN", global = true, hide_env_values = true)]
    pub cookie_token: Option<String>,

    /// Response language, e.g. en-us, zh-cn
    #[arg(long, env = "GENSHINSTATS_LANG", global = true)]
    pub lang: Option<String>,

    /// Request timeout in seconds (transport default when unset)
    #[arg(long, env = "GENSHINSTATS_TIMEOUT_SECS", global = true)]
    pub timeout_secs: Option<u64>,

    /// Emit JSON instead of colored text
    #[arg(long, global = true)]
    pub json: bool,

    /// Debug mode: log requests and response classification
    #[arg(long, env = "GENSHINSTATS_DEBUG", global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    pub fn parse() -> Self {
        <Args as clap::Parser>::parse()
    }
}
