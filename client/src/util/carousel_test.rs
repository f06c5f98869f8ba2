use super::*;

#[test]
fn index_wraps_both_directions() {
    let mut carousel = Carousel::new(vec![10, 20, 30]);
    assert_eq!(carousel.prev().map(|t| t.image_id), Some(30));
    assert_eq!(carousel.next().map(|t| t.image_id), Some(10));
    carousel.next();
    carousel.next();
    assert_eq!(carousel.next().map(|t| t.image_id), Some(10));
}

#[test]
fn empty_carousel_issues_no_fetches() {
    let mut carousel = Carousel::new(Vec::new());
    assert_eq!(carousel.load_current(), None);
    assert_eq!(carousel.next(), None);
    assert_eq!(carousel.prev(), None);
}

#[test]
fn superseded_fetch_is_discarded() {
    let mut carousel = Carousel::new(vec![1, 2, 3]);
    let first = carousel.select(1).expect("ticket i");
    let second = carousel.select(2).expect("ticket j");

    assert!(!carousel.resolve(first, Some("https://img/2".to_owned())));
    assert_eq!(carousel.url(), None);
    assert!(carousel.is_loading());

    assert!(carousel.resolve(second, Some("https://img/3".to_owned())));
    assert_eq!(carousel.url(), Some("https://img/3"));
}

#[test]
fn late_result_after_newer_one_does_not_overwrite() {
    let mut carousel = Carousel::new(vec![1, 2]);
    let old = carousel.load_current().expect("ticket");
    let new = carousel.next().expect("ticket");
    carousel.resolve(new, Some("new".to_owned()));
    carousel.resolve(old, Some("old".to_owned()));
    assert_eq!(carousel.url(), Some("new"));
}

#[test]
fn index_change_clears_previous_url() {
    let mut carousel = Carousel::new(vec![1, 2]);
    let t = carousel.load_current().expect("ticket");
    carousel.resolve(t, Some("a".to_owned()));
    carousel.next();
    assert_eq!(carousel.url(), None);
}

#[test]
fn failed_fetch_leaves_no_url() {
    let mut carousel = Carousel::new(vec![1]);
    let t = carousel.load_current().expect("ticket");
    assert!(carousel.resolve(t, None));
    assert_eq!(carousel.url(), None);
    assert!(!carousel.is_loading());
}

#[test]
fn select_out_of_range_is_ignored() {
    let mut carousel = Carousel::new(vec![1]);
    assert_eq!(carousel.select(4), None);
    assert_eq!(carousel.index(), 0);
}
