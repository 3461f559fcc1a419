//! End-to-end scenarios for publish, steal, merge, swap, and update.
//!
//! All scenarios use two-entry segments so that segment boundaries are easy
//! to reason about.

use marklist::Worklist;

fn drain<const N: usize>(worklist: &Worklist<i32, N>) -> Vec<i32> {
    let mut local = worklist.local();
    let mut popped = Vec::new();
    while let Some(entry) = local.pop() {
        popped.push(entry);
    }
    popped.sort_unstable();
    popped
}

fn fill<const N: usize>(worklist: &Worklist<i32, N>, entries: &[i32]) {
    let mut local = worklist.local();
    for &entry in entries {
        local.push(entry);
    }
    local.publish();
}

#[test]
fn published_work_is_popped_by_another_view() {
    let worklist: Worklist<i32, 2> = Worklist::new();
    let mut producer = worklist.local();

    producer.push(1);
    producer.push(2);
    producer.push(3);
    producer.publish();

    assert_eq!(drain(&worklist), vec![1, 2, 3]);
    assert!(worklist.is_empty());
}

#[test]
fn interleaved_producer_consumer_conserves_entries() {
    let worklist: Worklist<i32, 2> = Worklist::new();
    let mut producer = worklist.local();
    let mut popped = Vec::new();

    producer.push(1);
    producer.push(2);
    popped.push(producer.pop().unwrap());
    assert_eq!(popped, vec![2]);

    producer.push(3);
    producer.push(4);
    producer.push(5);
    producer.publish();

    popped.extend(drain(&worklist));
    popped.sort_unstable();
    assert_eq!(popped, vec![1, 2, 3, 4, 5]);
}

#[test]
fn merge_transfers_segments() {
    let source: Worklist<i32, 2> = Worklist::new();
    let target: Worklist<i32, 2> = Worklist::new();
    fill(&source, &[1, 2, 3]);
    assert_eq!(source.len(), 2);

    target.merge(&source);

    assert!(source.is_empty());
    assert_eq!(target.len(), 2);
    assert_eq!(drain(&target), vec![1, 2, 3]);
}

#[test]
fn swap_exchanges_worklists() {
    let left: Worklist<i32, 2> = Worklist::new();
    let right: Worklist<i32, 2> = Worklist::new();
    fill(&left, &[1, 2]);
    fill(&right, &[3, 4]);

    left.swap(&right);

    assert_eq!(left.len(), 1);
    assert_eq!(right.len(), 1);
    assert_eq!(drain(&left), vec![3, 4]);
    assert_eq!(drain(&right), vec![1, 2]);
}

#[test]
fn swap_is_involutive() {
    let left: Worklist<i32, 2> = Worklist::new();
    let right: Worklist<i32, 2> = Worklist::new();
    fill(&left, &[1, 2, 3]);

    left.swap(&right);
    left.swap(&right);

    assert_eq!(left.len(), 2);
    assert!(right.is_empty());
    assert_eq!(drain(&left), vec![1, 2, 3]);
}

#[test]
fn update_keeps_matching_entries_and_evicts_empty_segments() {
    let worklist: Worklist<i32, 2> = Worklist::new();
    fill(&worklist, &[1, 2, 3, 4, 5, 6]);
    assert_eq!(worklist.len(), 3);

    worklist.update(|entry| *entry % 2 == 1);

    assert_eq!(worklist.len(), 3);
    let mut survivors = Vec::new();
    worklist.for_each(|&entry| survivors.push(entry));
    survivors.sort_unstable();
    assert_eq!(survivors, vec![1, 3, 5]);

    worklist.clear();
}

#[test]
fn update_discarding_everything_empties_the_worklist() {
    let worklist: Worklist<i32, 2> = Worklist::new();
    fill(&worklist, &[1, 2, 3, 4]);

    worklist.update(|_| false);

    assert!(worklist.is_empty());
    assert_eq!(drain(&worklist), Vec::<i32>::new());
}

#[test]
fn publish_twice_is_observationally_single() {
    let worklist: Worklist<i32, 2> = Worklist::new();
    let mut local = worklist.local();

    local.push(1);
    local.push(2);
    local.push(3);
    local.publish();
    let after_first = worklist.len();

    local.publish();

    assert_eq!(worklist.len(), after_first);
    assert_eq!(drain(&worklist), vec![1, 2, 3]);
}

#[test]
fn segment_count_matches_per_view_fill() {
    let worklist: Worklist<i32, 2> = Worklist::new();
    let pushed: [usize; 3] = [5, 1, 4];

    for (view, &count) in pushed.iter().enumerate() {
        let mut local = worklist.local();
        for i in 0..count {
            local.push(i32::try_from(view * 100 + i).unwrap());
        }
        local.publish();
    }

    // Every view publishes ceil(count / 2) segments of its own.
    let expected: usize = pushed.iter().map(|count| count.div_ceil(2)).sum();
    assert_eq!(worklist.len(), expected);

    let total: usize = pushed.iter().sum();
    assert_eq!(drain(&worklist).len(), total);
}

#[test]
fn entries_with_destructors_round_trip() {
    let worklist: Worklist<String, 2> = Worklist::new();
    let mut producer = worklist.local();

    for word in ["alpha", "beta", "gamma"] {
        producer.push(word.to_owned());
    }
    producer.publish();

    let mut consumer = worklist.local();
    let mut popped = Vec::new();
    while let Some(entry) = consumer.pop() {
        popped.push(entry);
    }
    popped.sort_unstable();
    assert_eq!(popped, vec!["alpha", "beta", "gamma"]);
}

#[test]
fn clear_discards_published_entries_with_destructors() {
    let worklist: Worklist<String, 2> = Worklist::new();
    let mut producer = worklist.local();

    for i in 0..10 {
        producer.push(format!("entry-{i}"));
    }
    producer.publish();
    assert!(!worklist.is_empty());

    worklist.clear();
    assert!(worklist.is_empty());
}
