use anyhow::{Context, Result};
use log::{LevelFilter, debug};

use genshinstats::cli::{Args, Command};
use genshinstats::client::Client;
use genshinstats::config::resolve_config;
use genshinstats::display::{print_missing, print_saved, print_summary, print_uid, print_value};
use genshinstats::gacha::{GachaClient, authkey_from_url};
use genshinstats::history::{load_history, save_history};
use genshinstats::summary::summarize;
use genshinstats::{Session, is_game_uid};

fn init_logging(debug: bool) {
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if debug {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.format_timestamp(None).init();
}

/// Accepts either a game UID or a community UID and returns the game UID.
fn game_uid(client: &Client, session: &Session, uid: u64) -> Result<u64> {
    if is_game_uid(uid) {
        return Ok(uid);
    }
    debug!("{uid} is not a game uid, looking it up as a community uid");
    client
        .uid_from_community(session, uid)?
        .with_context(|| format!("community user {uid} has no public game uid"))
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.debug);

    let config = resolve_config(&args);
    debug!(
        "language={}, timeout={:?}, cookie={}",
        config.language,
        config.timeout,
        if config.account_id.is_some() && config.cookie_token.is_some() {
            "set"
        } else {
            "unset"
        }
    );
    let session = config.session();

    match &args.command {
        Command::Dump {
            url,
            authkey,
            output,
        } => {
            let authkey = match (authkey, url) {
                (Some(key), _) => key.clone(),
                (None, Some(url)) => authkey_from_url(url).context("extract authkey")?,
                (None, None) => anyhow::bail!("either a url or --authkey is required"),
            };
            let gacha = GachaClient::new(config.timeout)?;
            let records = gacha
                .entire_gacha_log(&session, &authkey)
                .context("fetch wish history")?;
            save_history(output, &records)?;
            print_saved(output, records.len());
        }
        Command::Summary { file } => {
            let records = load_history(file)?;
            print_summary(&summarize(&records), args.json)?;
        }
        Command::Search { keyword, size } => {
            let client = Client::hoyolab(config.timeout)?;
            let data = client.search(&session, keyword, *size)?;
            print_value(&format!("search: {keyword}"), &data, args.json)?;
        }
        Command::Profile { community_uid } => {
            let client = Client::hoyolab(config.timeout)?;
            let data = client.community_user_info(&session, *community_uid)?;
            print_value(&format!("community user {community_uid}"), &data, args.json)?;
        }
        Command::Card { community_uid } => {
            let client = Client::hoyolab(config.timeout)?;
            match client.record_card(&session, *community_uid)? {
                Some(card) => {
                    print_value(&format!("record card {community_uid}"), &card, args.json)?
                }
                None => print_missing("record card", args.json)?,
            }
        }
        Command::Uid { community_uid } => {
            let client = Client::hoyolab(config.timeout)?;
            match client.uid_from_community(&session, *community_uid)? {
                Some(uid) => print_uid(*community_uid, uid, args.json)?,
                None => print_missing("game uid", args.json)?,
            }
        }
        Command::User { uid, server } => {
            let client = Client::hoyolab(config.timeout)?;
            let uid = game_uid(&client, &session, *uid)?;
            let data = client.user_info(&session, uid, server.map(Into::into))?;
            print_value(&format!("user {uid}"), &data, args.json)?;
        }
        Command::Abyss {
            uid,
            server,
            previous,
        } => {
            let client = Client::hoyolab(config.timeout)?;
            let uid = game_uid(&client, &session, *uid)?;
            let data = client.spiral_abyss(&session, uid, server.map(Into::into), *previous)?;
            let season = if *previous { "previous" } else { "current" };
            print_value(&format!("spiral abyss {uid} ({season})"), &data, args.json)?;
        }
    }
    Ok(())
}
