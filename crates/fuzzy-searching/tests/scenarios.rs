//! End-to-end search scenarios

use fuzzy_searching::{
    align_strings, levenshtein, Fuse, FuseConfig, FuseProp, ObjectSortStrategy, Searchable,
};
use pretty_assertions::assert_eq;

const ANIMES: &[&str] = &[
    "Gekijouban Fairy Tail: Houou no Miko",
    "Fairy Tail the Movie: The Phoenix Priestess",
    "Priestess of the Phoenix",
    "Fairy Tail: The Phoenix Priestess",
];

/// Anime listing with one searchable field per title
struct AnimeInfo {
    name_eng: &'static str,
    name_jap: &'static str,
    name_other: Vec<&'static str>,
}

impl Searchable for AnimeInfo {
    fn properties(&self) -> Vec<FuseProp> {
        let mut props = vec![FuseProp::new(self.name_eng), FuseProp::new(self.name_jap)];
        props.extend(self.name_other.iter().map(|name| FuseProp::new(*name)));
        props
    }
}

fn anime_list() -> Vec<AnimeInfo> {
    vec![
        AnimeInfo {
            name_eng: "Fullmetal Alchemist: Brotherhood",
            name_jap: "Hagane no Renkinjutsushi: Fullmetal Alchemist",
            name_other: vec![],
        },
        AnimeInfo {
            name_eng: "Fairy Tail the Movie: The Phoenix Priestess",
            name_jap: "Gekijouban Fairy Tail: Houou no Miko",
            name_other: vec!["Priestess of the Phoenix", "Fairy Tail: The Phoenix Priestess"],
        },
        AnimeInfo {
            name_eng: "Neon Genesis Evangelion",
            name_jap: "Shin Seiki Evangelion",
            name_other: vec![],
        },
    ]
}

#[test]
fn test_exact_single() {
    let fuse = Fuse::new();
    let found = fuse.search_text("The Silmarillion", "The Silmarillion").unwrap();
    assert_eq!(found.score, 0.0);
    assert_eq!(found.ranges, vec![0..=15]);
}

#[test]
fn test_prefix_fuzzy() {
    let fuse = Fuse::new();
    let corpus = ["Right Ho Jeeves", "Thank You Jeeves", "The DaVinci Code"];

    let hits = fuse.search_strings("jeeves", &corpus);
    let indices: Vec<usize> = hits.iter().map(|h| h.index).collect();
    assert_eq!(indices, vec![0, 1]);
    assert!(hits[0].score <= hits[1].score);
    assert_eq!(hits[0].ranges.last(), Some(&(9..=14)));
}

#[test]
fn test_boundary_drift() {
    let fuse = Fuse::new();
    let found = fuse.search_text("code", "The DaVinci Code").unwrap();
    assert!(found.score < 1.0);
    assert!(found.ranges.contains(&(12..=15)));

    let tight = Fuse::with_config(FuseConfig::default().with_distance(1)).unwrap();
    assert_eq!(tight.search_text("code", "The DaVinci Code"), None);
}

#[test]
fn test_levenshtein_over_records() {
    let animes = anime_list();

    let hits = levenshtein::search_records(
        "Fairy Tail: The Phoenix Priestess",
        &animes,
        AnimeInfo::properties,
    );
    assert_eq!(hits.len(), 3);
    assert_eq!(hits[0].index, 1);
    assert_eq!(hits[0].diff_score, 0.0);

    let disjoint =
        levenshtein::search_records("Мій маленький поні", &animes, AnimeInfo::properties);
    assert_eq!(disjoint.len(), 3);
    assert!(disjoint[0].diff_score > 0.9);
    assert!(disjoint[2].diff_score > 0.9);
}

#[test]
fn test_levenshtein_over_strings() {
    let hits = levenshtein::search_strings("Fairy Tail: The Phoenix Priestess", ANIMES);
    assert_eq!(hits.len(), 4);
    assert_eq!(hits[0].diff_score, 0.0);

    let disjoint = levenshtein::search_strings("Мій маленький поні", ANIMES);
    assert!(disjoint.iter().all(|h| h.diff_score > 0.9));
}

#[test]
fn test_fuzzy_alignment_top_result() {
    let ranked = align_strings("Fairy Tail: The Phoenix Priestess", ANIMES);
    assert_eq!(ranked[0].as_string(), "Fairy Tail: The Phoenix Priestess");
}

#[test]
fn test_tokenize_averaging() {
    let plain = Fuse::new();
    let tokenized = Fuse::with_config(FuseConfig::default().with_tokenize(true)).unwrap();
    let text = "The Phoenix Priestess";

    let plain_score = plain
        .search_text("priestess phoenix", text)
        .map_or(1.0, |m| m.score);
    let found = tokenized.search_text("priestess phoenix", text).unwrap();

    assert!(found.score < plain_score);
    // "Phoenix" is 4..=10, "Priestess" is 12..=20
    assert!(found.ranges.iter().any(|r| r.contains(&4) && r.contains(&10)));
    assert!(found.ranges.iter().any(|r| r.contains(&12) && r.contains(&20)));
}

#[test]
fn test_best_field_ranks_record() {
    let config = FuseConfig::default().with_object_sort_strategy(ObjectSortStrategy::BestScore);
    let fuse = Fuse::with_config(config).unwrap();

    let hits = fuse.search_records("phoenix", &anime_list(), AnimeInfo::properties);
    assert_eq!(hits[0].index, 1);
    assert!(hits[0].fields.len() >= 2);
}
