#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{row, Row};
use sortmerge_core::{group_by_key, merge_join, order, Group, JoinedPair};

#[test]
fn test_scenario_grouped_left_joined_to_unique_right() {
    let left = [1, 1, 2, 2];
    let right = [1, 2];

    let pairs: Vec<((i32, Vec<i32>), i32)> = merge_join(
        group_by_key(&left, |x| *x),
        |g| *g.key(),
        right.iter().copied(),
        |x| *x,
    )
    .map(|pair| {
        let (group, r) = pair.into_both().unwrap();
        ((*group.key(), group.members().to_vec()), r)
    })
    .collect();

    assert_eq!(pairs, vec![((1, vec![1, 1]), 1), ((2, vec![2, 2]), 2)]);
}

#[test]
fn test_many_to_many_through_groups() {
    let orders = vec![row(1, "o1"), row(1, "o2"), row(2, "o3"), row(4, "o4")];
    let payments = vec![row(1, "p1"), row(1, "p2"), row(1, "p3"), row(3, "p4")];

    let mut cross = Vec::new();
    let joined = merge_join(
        group_by_key(&orders, |r| r.id),
        |g: &Group<u32, Row>| *g.key(),
        group_by_key(&payments, |r| r.id),
        |g: &Group<u32, Row>| *g.key(),
    );
    for pair in joined {
        if let JoinedPair::Both(os, ps) = pair {
            for o in &os {
                for p in &ps {
                    cross.push((o.name.as_str(), p.name.as_str()));
                }
            }
        }
    }

    assert_eq!(
        cross,
        vec![
            ("o1", "p1"),
            ("o1", "p2"),
            ("o1", "p3"),
            ("o2", "p1"),
            ("o2", "p2"),
            ("o2", "p3"),
        ]
    );
}

#[test]
fn test_group_keys_are_strictly_increasing_join_input() {
    let left = [1, 1, 3];
    let right = [1, 2, 2, 3, 3, 3];

    let sizes: Vec<(Option<usize>, Option<usize>)> = merge_join(
        group_by_key(&left, |x| *x),
        |g| *g.key(),
        group_by_key(&right, |x| *x),
        |g| *g.key(),
    )
    .checked()
    .map(|pair| {
        let (l, r) = pair.unwrap().into_options();
        (l.map(|g| g.len()), r.map(|g| g.len()))
    })
    .collect();

    assert_eq!(sizes, vec![(Some(2), Some(1)), (None, Some(2)), (Some(1), Some(3))]);
}

#[test]
fn test_ordered_then_grouped_then_joined() {
    let left = order(vec![3, 1, 3, 2], |x: &i32| *x);
    let right = order(vec![2, 3, 3, 5], |x: &i32| *x);

    let counts: Vec<(i32, usize, usize)> = merge_join(
        left.groups(),
        |g| *g.key(),
        right.groups(),
        |g| *g.key(),
    )
    .filter_map(JoinedPair::into_both)
    .map(|(l, r)| (*l.key(), l.len(), r.len()))
    .collect();

    assert_eq!(counts, vec![(2, 1, 1), (3, 2, 2)]);
}
