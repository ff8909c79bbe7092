#[cfg(feature = "colors")]
use owo_colors::OwoColorize;
use serde::Serialize;
use serde_json::{Value, json};

// Plain-text stand-ins for the owo-colors methods when "colors" is disabled
#[cfg(not(feature = "colors"))]
pub mod color_shim {
    use std::fmt::{self, Display, Formatter};

    #[derive(Clone)]
    pub struct Plain(pub String);

    impl Display for Plain {
        fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
            f.write_str(&self.0)
        }
    }

    pub trait ColorizeShim {
        fn as_str(&self) -> &str;

        fn bright_black(&self) -> Plain {
            Plain(self.as_str().to_string())
        }
        fn bright_yellow(&self) -> Plain {
            Plain(self.as_str().to_string())
        }
        fn bright_magenta(&self) -> Plain {
            Plain(self.as_str().to_string())
        }
        fn bold(&self) -> Plain {
            Plain(self.as_str().to_string())
        }
        fn dimmed(&self) -> Plain {
            Plain(self.as_str().to_string())
        }
        fn cyan(&self) -> Plain {
            Plain(self.as_str().to_string())
        }
        fn red(&self) -> Plain {
            Plain(self.as_str().to_string())
        }
        fn green(&self) -> Plain {
            Plain(self.as_str().to_string())
        }
    }

    impl ColorizeShim for &str {
        fn as_str(&self) -> &str {
            self
        }
    }
    impl ColorizeShim for String {
        fn as_str(&self) -> &str {
            self.as_str()
        }
    }
    impl ColorizeShim for Plain {
        fn as_str(&self) -> &str {
            &self.0
        }
    }
}

#[cfg(not(feature = "colors"))]
use color_shim::ColorizeShim as OwoColorize;

use crate::summary::{BannerSummary, PityStreak};

const SEPARATOR_WIDTH: usize = 30;

// Soft pity starts at 74 on character banners
fn colorize_pulls(pulls: u32) -> String {
    let text = pulls.to_string();
    if pulls >= 74 {
        text.red().bold().to_string()
    } else if pulls <= 30 {
        text.green().bold().to_string()
    } else {
        text
    }
}

fn streak_line(streak: &PityStreak) -> String {
    format!("{} {}", streak.name.bright_yellow(), colorize_pulls(streak.pulls))
}

/// Text rendering of a pull summary, one block per banner.
pub fn format_summary_text(summaries: &[BannerSummary]) -> String {
    let mut out = String::new();
    for banner in summaries {
        out.push_str(&"-".repeat(SEPARATOR_WIDTH).bright_black().to_string());
        out.push('\n');
        out.push_str(&format!("Gacha Type: {}\n", banner.gacha_type.bold()));
        for streak in &banner.streaks {
            out.push_str(&streak_line(streak));
            out.push('\n');
        }
        out.push_str(
            &format!(
                "{} pulls total, {} since last 5★",
                banner.total_pulls, banner.pulls_since_last
            )
            .dimmed()
            .to_string(),
        );
        out.push('\n');
    }
    out
}

pub fn build_summary_json(summaries: &[BannerSummary]) -> Value {
    json!({ "banners": summaries })
}

pub fn print_summary(summaries: &[BannerSummary], as_json: bool) -> anyhow::Result<()> {
    if as_json {
        print_json(&build_summary_json(summaries))
    } else {
        print!("{}", format_summary_text(summaries));
        Ok(())
    }
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Raw endpoint payloads are always shown as JSON; `--json` only drops the
/// heading line.
pub fn print_value(title: &str, value: &Value, as_json: bool) -> anyhow::Result<()> {
    if !as_json {
        println!("{} {}", "❯".cyan(), title.bold());
    }
    print_json(value)
}

pub fn print_missing(what: &str, as_json: bool) -> anyhow::Result<()> {
    if as_json {
        print_json(&Value::Null)
    } else {
        println!("{} {}", "❯".cyan(), format!("{what} is not public").dimmed());
        Ok(())
    }
}

pub fn build_uid_json(community_uid: u64, uid: u64) -> Value {
    json!({ "community_uid": community_uid, "uid": uid })
}

/// Game UID behind a community profile; plain text is the bare number so it
/// can be piped into `user`/`abyss`.
pub fn print_uid(community_uid: u64, uid: u64, as_json: bool) -> anyhow::Result<()> {
    if as_json {
        print_json(&build_uid_json(community_uid, uid))
    } else {
        println!("{uid}");
        Ok(())
    }
}

pub fn print_saved(path: &std::path::Path, count: usize) {
    println!(
        "{} {} records to {}",
        "Saved".green().bold(),
        count,
        path.display()
    );
}
