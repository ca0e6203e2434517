//! Key joins between feature tables
//!
//! The right side is indexed by key, first occurrence wins, so a join
//! never multiplies left rows. Right columns whose name already exists on
//! the left get a `_right` suffix.

use std::collections::HashMap;

use olist_io::Table;

use crate::error::FeatureResult;

/// Which left rows survive a join
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    /// Only left rows with a matching right row
    Inner,
    /// Every left row; unmatched rows get missing right cells
    Left,
}

/// Join `right` onto `left` on the `key` column of both tables
pub fn join_on(left: &Table, right: &Table, key: &str, kind: JoinKind) -> FeatureResult<Table> {
    let mut index: HashMap<String, usize> = HashMap::with_capacity(right.num_rows());
    for (row, k) in right.keys(key)?.into_iter().enumerate() {
        if let Some(k) = k {
            index.entry(k).or_insert(row);
        }
    }

    let matches: Vec<Option<usize>> = left
        .keys(key)?
        .iter()
        .map(|k| k.as_ref().and_then(|k| index.get(k).copied()))
        .collect();

    let (mut joined, right_rows) = match kind {
        JoinKind::Inner => {
            let (left_rows, right_rows): (Vec<usize>, Vec<Option<usize>>) = matches
                .iter()
                .enumerate()
                .filter_map(|(l, r)| r.map(|r| (l, Some(r))))
                .unzip();
            (left.take(&left_rows), right_rows)
        }
        JoinKind::Left => (left.clone(), matches),
    };

    for (name, column) in right.iter().filter(|(name, _)| *name != key) {
        let name = if joined.has_column(name) {
            format!("{name}_right")
        } else {
            name.to_string()
        };
        joined.add_column(name, column.take_optional(&right_rows))?;
    }

    Ok(joined)
}
