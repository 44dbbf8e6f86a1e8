use gitrank_viewer::models::{Dataset, RankEntry, RepoEntry};
use gitrank_viewer::pagination::{paginate, total_pages, Pagination};

fn dataset(n: usize) -> Dataset {
    Dataset::from_entries(
        (1..=n)
            .map(|i| {
                RankEntry::Repo(RepoEntry {
                    name: format!("repo-{i}"),
                    url: format!("u{i}"),
                    description: None,
                    language: None,
                    accumulated_stars: Some(i as u64),
                    accumulated_stars_1d: None,
                    accumulated_stars_7d: None,
                    accumulated_stars_30d: None,
                })
            })
            .collect(),
    )
}

#[test]
fn test_total_pages_is_ceiling() {
    assert_eq!(total_pages(0, 10), 0);
    assert_eq!(total_pages(1, 10), 1);
    assert_eq!(total_pages(10, 10), 1);
    assert_eq!(total_pages(11, 10), 2);
    assert_eq!(total_pages(250, 100), 3);
}

#[test]
fn test_every_page_has_expected_items_and_ranks() {
    for len in [0usize, 1, 7, 20, 23] {
        let data = dataset(len);
        for size in [1usize, 5, 10, 100] {
            let pages = total_pages(len, size);
            for page in 1..=pages {
                let slice = paginate(data.entries(), page, size);
                let expected = size.min(len - (page - 1) * size);
                assert_eq!(slice.items.len(), expected, "len={len} size={size} page={page}");

                let numbered: Vec<_> = slice.numbered().collect();
                for (i, (display_rank, item)) in numbered.iter().enumerate() {
                    assert_eq!(*display_rank, (page - 1) * size + i + 1);
                    assert_eq!(item.rank, *display_rank);
                }
            }
        }
    }
}

#[test]
fn test_out_of_range_page_is_empty() {
    let data = dataset(5);
    assert!(paginate(data.entries(), 2, 5).items.is_empty());
    assert!(paginate(data.entries(), 100, 10).items.is_empty());
    assert!(paginate(&[], 1, 10).items.is_empty());
}

#[test]
fn test_navigation_stops_at_bounds() {
    let mut p = Pagination::new(10).unwrap();
    let len = 25;

    assert!(!p.prev());
    assert_eq!(p.current_page(), 1);

    assert!(p.next(len));
    assert!(p.next(len));
    assert_eq!(p.current_page(), 3);
    assert!(!p.next(len));
    assert_eq!(p.current_page(), 3);

    assert!(p.prev());
    assert_eq!(p.current_page(), 2);
}

#[test]
fn test_controls_state() {
    let mut p = Pagination::new(10).unwrap();

    assert!(p.controls(0).is_none());
    assert!(p.controls(10).is_none());

    let c = p.controls(30).unwrap();
    assert_eq!(c.total_pages, 3);
    assert!(!c.prev_enabled);
    assert!(c.next_enabled);

    p.next(30);
    let c = p.controls(30).unwrap();
    assert!(c.prev_enabled && c.next_enabled);

    p.next(30);
    let c = p.controls(30).unwrap();
    assert_eq!(c.current_page, 3);
    assert!(c.prev_enabled);
    assert!(!c.next_enabled);
}

#[test]
fn test_page_size_change_resets_page() {
    let mut p = Pagination::new(10).unwrap();
    p.next(50);
    p.next(50);
    assert_eq!(p.current_page(), 3);

    p.set_items_per_page(20).unwrap();
    assert_eq!(p.current_page(), 1);
    assert_eq!(p.items_per_page(), 20);
}

#[test]
fn test_zero_page_size_rejected() {
    assert!(Pagination::new(0).is_err());

    let mut p = Pagination::new(10).unwrap();
    p.next(30);
    assert!(p.set_items_per_page(0).is_err());
    assert_eq!(p.items_per_page(), 10);
    assert_eq!(p.current_page(), 2);
}
