use sortmap::SortedMap;

fn sample() -> SortedMap {
    let mut map = SortedMap::with_default_capacity().unwrap();
    map.set(b"b", b"2").unwrap();
    map.set(b"c", b"3").unwrap();
    map.set(b"a", b"1").unwrap();
    map
}

#[test]
fn test_iter_ascending() {
    let map = sample();
    let pairs: Vec<(&[u8], &[u8])> = map.iter().collect();
    assert_eq!(
        pairs,
        vec![
            (&b"a"[..], &b"1"[..]),
            (&b"b"[..], &b"2"[..]),
            (&b"c"[..], &b"3"[..]),
        ]
    );
}

#[test]
fn test_iter_reverse() {
    let map = sample();
    let keys: Vec<&[u8]> = map.iter().rev().map(|(key, _)| key).collect();
    assert_eq!(keys, vec![&b"c"[..], &b"b"[..], &b"a"[..]]);
}

#[test]
fn test_iter_exact_size() {
    let map = sample();
    let mut iter = map.iter();
    assert_eq!(iter.len(), 3);
    iter.next();
    assert_eq!(iter.len(), 2);
    iter.next_back();
    assert_eq!(iter.size_hint(), (1, Some(1)));
}

#[test]
fn test_for_loop_over_reference() {
    let map = sample();
    let mut total = 0;
    for (_, value) in &map {
        total += value.len();
    }
    assert_eq!(total, 3);
}

#[test]
fn test_iter_skips_retired_slots() {
    let mut map = sample();
    map.delete(b"b");

    assert_eq!(map.iter().count(), 2);
    assert!(map.iter().all(|(key, _)| key != b"b"));
}

#[test]
fn test_iter_empty() {
    let map = SortedMap::with_capacity(5, 0.5).unwrap();
    assert_eq!(map.iter().next(), None);
}
