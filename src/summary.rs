//! Pity streaks: how many pulls each 5★ took, per banner.

use serde::Serialize;

use crate::gacha::GachaRecord;

pub const RARE_RARITY: u8 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PityStreak {
    pub name: String,
    /// Pulls since the previous 5★, counting this one.
    pub pulls: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BannerSummary {
    pub gacha_type: String,
    pub total_pulls: usize,
    pub streaks: Vec<PityStreak>,
    pub pulls_since_last: u32,
}

/// Groups newest-first records by banner name and walks each group oldest
/// first. Banners keep the order in which they first appear.
pub fn summarize(records: &[GachaRecord]) -> Vec<BannerSummary> {
    let mut groups: Vec<(&str, Vec<&GachaRecord>)> = Vec::new();
    for record in records {
        let name = record.gacha_type.name.as_str();
        match groups.iter_mut().find(|(n, _)| *n == name) {
            Some((_, group)) => group.push(record),
            None => groups.push((name, vec![record])),
        }
    }

    groups
        .into_iter()
        .map(|(name, history)| {
            let mut streaks = Vec::new();
            let mut counter = 0u32;
            for pull in history.iter().rev() {
                counter += 1;
                if pull.rarity == RARE_RARITY {
                    streaks.push(PityStreak {
                        name: pull.name.clone(),
                        pulls: counter,
                    });
                    counter = 0;
                }
            }
            BannerSummary {
                gacha_type: name.to_string(),
                total_pulls: history.len(),
                streaks,
                pulls_since_last: counter,
            }
        })
        .collect()
}
