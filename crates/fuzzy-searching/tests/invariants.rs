//! Properties that hold for every search over the book corpus

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use fuzzy_searching::{
    align, main_queue, Dispatcher, Fuse, FuseConfig, FuseProp, Inline, Pattern, StringHit,
};
use pretty_assertions::assert_eq;

const BOOKS: &[&str] = &[
    "Angels & Demons",
    "Old Man's War",
    "The Lock Artist",
    "HTML5",
    "Right Ho Jeeves",
    "The Code of the Wooster",
    "Thank You Jeeves",
    "The DaVinci Code",
    "The Silmarillion",
    "Syrup",
    "The Lost Symbol",
    "The Book of Lies",
    "Lamb",
    "Fool",
    "Incompetence",
    "Fat",
    "Colony",
    "Backwards, Red Dwarf",
    "The Grand Design",
    "The Book of Samson",
    "The Preservationist",
    "Fallen",
    "Monster 1959",
];

const QUERIES: &[&str] = &["the", "jeeves", "code", "lamb", "book of", "preservation", "xyzzy"];

fn books() -> Vec<String> {
    BOOKS.iter().map(|s| s.to_string()).collect()
}

fn configs() -> Vec<FuseConfig> {
    vec![
        FuseConfig::default(),
        FuseConfig::default().with_tokenize(true),
        FuseConfig::default().with_location(4).with_distance(10),
        FuseConfig::default().with_threshold(0.3),
    ]
}

fn check_hits(hits: &[StringHit]) {
    assert!(hits.windows(2).all(|w| w[0].score <= w[1].score));
    for hit in hits {
        assert!((0.0..1.0).contains(&hit.score), "score {} out of range", hit.score);

        let len = BOOKS[hit.index].chars().count();
        for range in &hit.ranges {
            assert!(range.start() <= range.end());
            assert!(*range.end() < len);
        }
        for pair in hit.ranges.windows(2) {
            assert!(pair[0].end() < pair[1].start());
        }
    }
}

#[test]
fn test_sorted_bounded_well_formed() {
    for config in configs() {
        let fuse = Fuse::with_config(config).unwrap();
        for query in QUERIES {
            check_hits(&fuse.search_strings(query, BOOKS));
        }
    }
}

#[test]
fn test_exact_match_covers_candidate() {
    let fuse = Fuse::new();
    for book in BOOKS.iter().filter(|b| b.chars().count() <= 64) {
        let found = fuse.search_text(book, book).unwrap();
        assert_eq!(found.score, 0.0);
        assert_eq!(found.ranges, vec![0..=book.chars().count() - 1]);
    }
}

#[test]
fn test_empty_pattern() {
    assert!(Pattern::compile("", false).is_none());
    assert!(Fuse::new().search_strings("", BOOKS).is_empty());
}

#[test]
fn test_case_folding() {
    let fuse = Fuse::new();
    for query in QUERIES {
        for book in BOOKS {
            let lower = fuse.search_text(query, book);
            let upper = fuse.search_text(&query.to_uppercase(), &book.to_uppercase());
            assert_eq!(lower, upper, "{query:?} in {book:?}");
        }
    }
}

#[test]
fn test_alignment_reconstructs_candidate() {
    for query in QUERIES {
        for book in BOOKS {
            let alignment = align(query, book);
            assert_eq!(alignment.as_string(), *book);

            let segments = alignment.result.segments();
            assert!(segments.windows(2).all(|w| w[0].is_match() != w[1].is_match()));
            assert_eq!(alignment.result.merge(&alignment.result), alignment.result);
        }
    }
}

#[test]
fn test_chunked_matches_sync_inline() {
    for chunk_size in [1, 2, 3, 7, 100] {
        let config = FuseConfig::default().with_chunk_size(chunk_size);
        let fuse = Fuse::with_config(config).unwrap().with_dispatcher(Dispatcher::inline());

        for query in QUERIES {
            let expected = fuse.search_strings(query, BOOKS);
            let calls = Arc::new(AtomicUsize::new(0));
            let c = calls.clone();
            fuse.search_strings_with(query, books(), move |hits| {
                assert_eq!(hits, expected);
                c.fetch_add(1, Ordering::SeqCst);
            });
            assert_eq!(calls.load(Ordering::SeqCst), 1);
        }
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn test_chunked_matches_sync_on_pool() {
    for chunk_size in [1, 2, 3, 7, 100] {
        let fuse = Fuse::with_config(FuseConfig::default().with_chunk_size(chunk_size)).unwrap();
        for query in QUERIES {
            let expected = fuse.search_strings(query, BOOKS);
            let chunked = fuse.search_strings_async(query, books()).await;
            assert_eq!(chunked, expected);
        }
    }
}

#[tokio::test]
async fn test_no_match_still_completes() {
    let fuse = Fuse::with_config(FuseConfig::default().with_chunk_size(4)).unwrap();
    assert!(fuse.search_strings_async("xyzzy", books()).await.is_empty());
    assert!(fuse.search_strings_async("", books()).await.is_empty());

    let records: Vec<Vec<FuseProp>> = BOOKS.iter().map(|b| vec![FuseProp::new(*b)]).collect();
    let hits = fuse
        .search_records_async("xyzzy", records, |r: &Vec<FuseProp>| r.clone())
        .await;
    assert!(hits.is_empty());
}

#[test]
fn test_records_nudge_only_on_sync_path() {
    let fuse = Fuse::new().with_dispatcher(Dispatcher::inline());
    let records: Vec<Vec<FuseProp>> = vec![vec![FuseProp::new("Lamb")]];

    let sync = fuse.search_records("lamb", &records, |r| r.clone());
    assert_eq!(sync[0].score, 0.001);

    let out = Arc::new(parking_lot::Mutex::new(Vec::new()));
    let slot = out.clone();
    fuse.search_records_with("lamb", records, |r: &Vec<FuseProp>| r.clone(), move |hits| {
        *slot.lock() = hits;
    });
    assert_eq!(out.lock()[0].score, 0.0);
}

#[test]
fn test_completion_waits_for_main_loop() {
    let (queue, mut main_loop) = main_queue();
    let fuse = Fuse::new().with_dispatcher(Dispatcher::new(Inline, queue));

    let calls = Arc::new(AtomicUsize::new(0));
    let c = calls.clone();
    fuse.search_strings_with("zzzzzz", books(), move |hits| {
        assert!(hits.is_empty());
        c.fetch_add(1, Ordering::SeqCst);
    });

    assert_eq!(calls.load(Ordering::SeqCst), 0);
    main_loop.run_pending();
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}
