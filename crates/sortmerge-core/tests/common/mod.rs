use sortmerge_core::{group_by_key, merge_join, JoinedPair};

/// A row with a join key and a payload, as produced by a scan of a table
#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub id: u32,
    pub name: String,
}

#[allow(dead_code)]
pub fn row(id: u32, name: &str) -> Row {
    Row {
        id,
        name: name.to_string(),
    }
}

/// Join two integer sequences by identity, as `(left, right)` options
#[allow(dead_code)]
pub fn join_ints(left: &[i32], right: &[i32]) -> Vec<(Option<i32>, Option<i32>)> {
    merge_join(left.iter().copied(), |x| *x, right.iter().copied(), |x| *x)
        .map(JoinedPair::into_options)
        .collect()
}

/// Group an integer slice by identity, as `(key, members)` pairs
#[allow(dead_code)]
pub fn runs(items: &[i32]) -> Vec<(i32, Vec<i32>)> {
    group_by_key(items, |x| *x)
        .map(|g| (*g.key(), g.members().to_vec()))
        .collect()
}

/// Sorted, duplicate-free copy of `values`
#[allow(dead_code)]
pub fn sorted_unique(mut values: Vec<i32>) -> Vec<i32> {
    values.sort_unstable();
    values.dedup();
    values
}
