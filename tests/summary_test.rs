use std::fs;

use genshinstats::gacha::{GachaRecord, GachaType};
use genshinstats::history::{load_history, save_history};
use genshinstats::summary::{PityStreak, summarize};
use tempfile::TempDir;

fn banner(key: &str, name: &str) -> GachaType {
    GachaType {
        id: key.to_string(),
        key: key.to_string(),
        name: name.to_string(),
    }
}

fn pull(gacha_type: &GachaType, name: &str, rarity: u8, id: u32) -> GachaRecord {
    GachaRecord {
        gacha_type: gacha_type.clone(),
        name: name.to_string(),
        rarity,
        item_type: if rarity == 5 { "Character" } else { "Weapon" }.to_string(),
        time: String::new(),
        id: id.to_string(),
        uid: "812345678".to_string(),
    }
}

/// Newest-first history: `oldest_first` is reversed before returning.
fn history(gacha_type: &GachaType, oldest_first: &[(&str, u8)], start_id: u32) -> Vec<GachaRecord> {
    let mut records: Vec<GachaRecord> = oldest_first
        .iter()
        .enumerate()
        .map(|(i, (name, rarity))| pull(gacha_type, name, *rarity, start_id + i as u32))
        .collect();
    records.reverse();
    records
}

#[test]
fn summary_counts_pulls_until_each_five_star() {
    let event = banner("301", "Character Event Wish");
    let mut pulls = vec![("Cool Steel", 3); 9];
    pulls.push(("Venti", 5));
    pulls.extend(vec![("Sucrose", 4); 3]);
    pulls.push(("Klee", 5));
    pulls.extend(vec![("Slingshot", 3); 2]);
    let records = history(&event, &pulls, 1);

    let summary = summarize(&records);
    assert_eq!(summary.len(), 1);
    let s = &summary[0];
    assert_eq!(s.gacha_type, "Character Event Wish");
    assert_eq!(s.total_pulls, 16);
    assert_eq!(
        s.streaks,
        vec![
            PityStreak {
                name: "Venti".to_string(),
                pulls: 10
            },
            PityStreak {
                name: "Klee".to_string(),
                pulls: 4
            },
        ]
    );
    assert_eq!(s.pulls_since_last, 2);
}

#[test]
fn summary_groups_banners_in_first_seen_order() {
    let event = banner("301", "Character Event Wish");
    let standard = banner("200", "Permanent Wish");
    let mut records = history(&standard, &[("Diluc", 5)], 100);
    records.extend(history(&event, &[("Amber", 4), ("Qiqi", 5)], 200));
    records.extend(history(&standard, &[("Harbinger of Dawn", 3)], 50));

    let summary = summarize(&records);
    let names: Vec<&str> = summary.iter().map(|s| s.gacha_type.as_str()).collect();
    assert_eq!(names, ["Permanent Wish", "Character Event Wish"]);

    // Permanent: records are [Diluc(newest), Harbinger(oldest)] -> walk Harbinger then Diluc
    assert_eq!(summary[0].streaks[0].pulls, 2);
    assert_eq!(summary[0].pulls_since_last, 0);
    assert_eq!(summary[1].streaks[0].name, "Qiqi");
    assert_eq!(summary[1].streaks[0].pulls, 2);
}

#[test]
fn summary_of_empty_history() {
    assert!(summarize(&[]).is_empty());
}

#[test]
fn history_file_roundtrip_keeps_order() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join("gacha-history.json");
    let event = banner("301", "Character Event Wish");
    let records = history(&event, &[("Amber", 4), ("Qiqi", 5), ("Cool Steel", 3)], 1);

    save_history(&path, &records).unwrap();
    let loaded = load_history(&path).unwrap();
    assert_eq!(loaded, records);

    let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw[0]["gacha_type"]["name"], "Character Event Wish");
    assert_eq!(raw[1]["rarity"], 5);
}

#[test]
fn load_history_reports_path_on_error() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("missing.json");
    let err = load_history(&missing).unwrap_err();
    assert!(format!("{err:#}").contains("missing.json"));

    let broken = temp_dir.path().join("broken.json");
    fs::write(&broken, "[{").unwrap();
    let err = load_history(&broken).unwrap_err();
    assert!(err.to_string().contains("Failed to parse history file"));
}
