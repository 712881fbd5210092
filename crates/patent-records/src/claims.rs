//! Claim tree reconstruction
//!
//! The claims tab is a flat list of rows. Each row fills exactly one of three
//! marker columns; the column decides the level and, for levels 2 and 3, the
//! marker text is a dotted path to the parent (`"2.1"` = second top-level
//! claim, its first child). Parents are looked up by position in the claims
//! built so far, so rows must be authored parent-first.

use crate::error::RecordError;
use crate::records::{Claim, ClaimLevel};

/// Number of marker columns in front of the claim text.
const MARKER_COLUMNS: usize = 3;

#[derive(Debug, Default)]
pub struct ClaimHierarchyBuilder {
    claims: Vec<Claim>,
}

impl ClaimHierarchyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one sheet row. Rows with no marker are ignored.
    ///
    /// `row` is the 0-based row number within the queried range and is only
    /// used in error messages.
    pub fn push_row(&mut self, row: usize, cells: &[String]) -> Result<(), RecordError> {
        let Some((column, marker)) = cells
            .iter()
            .take(MARKER_COLUMNS)
            .enumerate()
            .find(|(_, cell)| !cell.trim().is_empty())
        else {
            return Ok(());
        };

        let Some(level) = ClaimLevel::from_column(column) else {
            return Ok(());
        };

        // The sheet API trims trailing blanks, so a missing text cell is an empty claim.
        let content = cells.get(column + 1).cloned().unwrap_or_default();
        let claim = Claim::new(level, content);

        match level {
            ClaimLevel::L1 => self.claims.push(claim),
            ClaimLevel::L2 => {
                let path = parse_marker(row, marker, 1)?;
                let parent = self
                    .claims
                    .get_mut(path[0] - 1)
                    .ok_or_else(|| missing_parent(row, marker))?;
                parent.children.push(claim);
            }
            ClaimLevel::L3 => {
                let path = parse_marker(row, marker, 2)?;
                let parent = self
                    .claims
                    .get_mut(path[0] - 1)
                    .and_then(|l1| l1.children.get_mut(path[1] - 1))
                    .ok_or_else(|| missing_parent(row, marker))?;
                parent.children.push(claim);
            }
        }

        Ok(())
    }

    pub fn finish(self) -> Vec<Claim> {
        self.claims
    }
}

/// Build the claim forest from the claims range matrix.
pub fn build_claims(matrix: &[Vec<String>]) -> Result<Vec<Claim>, RecordError> {
    let mut builder = ClaimHierarchyBuilder::new();
    for (row, cells) in matrix.iter().enumerate() {
        builder.push_row(row, cells)?;
    }
    Ok(builder.finish())
}

/// Pre-order, depth-first walk of the claim forest.
pub fn flatten_claims(claims: &[Claim]) -> Vec<&Claim> {
    fn walk<'a>(claims: &'a [Claim], out: &mut Vec<&'a Claim>) {
        for claim in claims {
            out.push(claim);
            walk(&claim.children, out);
        }
    }

    let mut out = Vec::new();
    walk(claims, &mut out);
    out
}

/// Parse a dotted parent path into 1-based indices.
///
/// Empty segments are skipped so `"2."` reads as `[2]`. At least `needed`
/// indices must be present and none may be zero.
fn parse_marker(row: usize, marker: &str, needed: usize) -> Result<Vec<usize>, RecordError> {
    let invalid = || RecordError::InvalidMarker {
        row,
        marker: marker.to_string(),
    };

    let path = marker
        .trim()
        .split('.')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(|segment| segment.parse::<usize>().map_err(|_| invalid()))
        .collect::<Result<Vec<_>, _>>()?;

    if path.len() < needed {
        return Err(invalid());
    }
    if path.iter().take(needed).any(|&index| index == 0) {
        return Err(missing_parent(row, marker));
    }

    Ok(path)
}

fn missing_parent(row: usize, marker: &str) -> RecordError {
    RecordError::MissingParent {
        row,
        marker: marker.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_level_two_attaches_to_referenced_parent() {
        let matrix = vec![
            row(&["1", "A"]),
            row(&["", "1.1", "B"]),
            row(&["2", "C"]),
        ];

        let claims = build_claims(&matrix).unwrap();

        assert_eq!(claims.len(), 2);
        assert_eq!(claims[0].content, "A");
        assert_eq!(claims[0].children, vec![Claim::new(ClaimLevel::L2, "B")]);
        assert_eq!(claims[1].content, "C");
        assert!(claims[1].children.is_empty());
    }

    #[test]
    fn test_trailing_dot_marker_uses_first_segment() {
        let matrix = vec![row(&["1", "A"]), row(&["2", "B"]), row(&["", "2.", "C"])];

        let claims = build_claims(&matrix).unwrap();

        assert!(claims[0].children.is_empty());
        assert_eq!(claims[1].children[0].content, "C");
    }

    #[test]
    fn test_level_three_nested_under_level_two() {
        let matrix = vec![
            row(&["1", "A"]),
            row(&["", "1.1", "A1"]),
            row(&["", "1.2", "A2"]),
            row(&["", "", "1.2.1", "A2i"]),
        ];

        let claims = build_claims(&matrix).unwrap();

        let a2 = &claims[0].children[1];
        assert_eq!(a2.content, "A2");
        assert_eq!(a2.children, vec![Claim::new(ClaimLevel::L3, "A2i")]);
    }

    #[test]
    fn test_rows_without_marker_are_ignored() {
        let matrix = vec![row(&["1", "A"]), row(&[]), row(&["", "", ""])];

        let claims = build_claims(&matrix).unwrap();

        assert_eq!(claims.len(), 1);
    }

    #[test]
    fn test_missing_text_cell_reads_as_empty_claim() {
        let claims = build_claims(&[row(&["1"])]).unwrap();
        assert_eq!(claims[0].content, "");
    }

    #[test]
    fn test_missing_parent_is_fatal() {
        let matrix = vec![row(&["1", "A"]), row(&["", "3.1", "B"])];

        let err = build_claims(&matrix).unwrap_err();

        assert_eq!(
            err,
            RecordError::MissingParent {
                row: 1,
                marker: "3.1".to_string()
            }
        );
    }

    #[test]
    fn test_missing_level_two_parent_for_level_three_is_fatal() {
        let matrix = vec![row(&["1", "A"]), row(&["", "", "1.1", "B"])];
        assert!(matches!(
            build_claims(&matrix),
            Err(RecordError::MissingParent { row: 1, .. })
        ));
    }

    #[test]
    fn test_non_numeric_marker_is_fatal() {
        let matrix = vec![row(&["1", "A"]), row(&["", "a.b", "B"])];
        assert!(matches!(
            build_claims(&matrix),
            Err(RecordError::InvalidMarker { row: 1, .. })
        ));
    }

    #[test]
    fn test_level_three_requires_two_segments() {
        let matrix = vec![row(&["1", "A"]), row(&["", "", "1", "B"])];
        assert!(matches!(
            build_claims(&matrix),
            Err(RecordError::InvalidMarker { .. })
        ));
    }

    #[test]
    fn test_flatten_is_pre_order() {
        let matrix = vec![
            row(&["1", "A"]),
            row(&["", "1.1", "B"]),
            row(&["", "", "1.1.1", "C"]),
            row(&["2", "D"]),
            row(&["", "2.1", "E"]),
        ];
        let claims = build_claims(&matrix).unwrap();

        let order: Vec<(&str, usize)> = flatten_claims(&claims)
            .into_iter()
            .map(|c| (c.content.as_str(), c.level.depth()))
            .collect();

        assert_eq!(
            order,
            vec![("A", 0), ("B", 1), ("C", 2), ("D", 0), ("E", 1)]
        );
    }

    #[test]
    fn test_marker_referencing_later_claim_is_missing_parent() {
        // The second top-level claim does not exist yet when "2." is read.
        let matrix = vec![row(&["1", "A"]), row(&["", "2.", "B"]), row(&["1", "C"])];

        assert_eq!(
            build_claims(&matrix).unwrap_err(),
            RecordError::MissingParent {
                row: 1,
                marker: "2.".to_string()
            }
        );
    }

    /// Child counts per top-level claim, and per level-2 claim below it.
    fn forest_shape() -> impl Strategy<Value = Vec<Vec<usize>>> {
        prop::collection::vec(prop::collection::vec(0usize..3, 0..4), 0..5)
    }

    /// Sheet rows for `shape`, parent-first, plus the expected pre-order
    /// `(content, depth)` walk.
    fn rows_for(shape: &[Vec<usize>]) -> (Vec<Vec<String>>, Vec<(String, usize)>) {
        let mut matrix = Vec::new();
        let mut expected = Vec::new();
        for (i, children) in shape.iter().enumerate() {
            let l1 = format!("{}", i + 1);
            let text = format!("claim {}", l1);
            matrix.push(row(&[l1.as_str(), text.as_str()]));
            expected.push((text, 0));
            for (j, grandchildren) in children.iter().enumerate() {
                let l2 = format!("{}.{}", i + 1, j + 1);
                let text = format!("claim {}", l2);
                matrix.push(row(&["", l2.as_str(), text.as_str()]));
                expected.push((text, 1));
                for k in 0..*grandchildren {
                    let l3 = format!("{}.{}", l2, k + 1);
                    let text = format!("claim {}", l3);
                    matrix.push(row(&["", "", l3.as_str(), text.as_str()]));
                    expected.push((text, 2));
                }
            }
        }
        (matrix, expected)
    }

    proptest! {
        #[test]
        fn well_formed_rows_flatten_back_in_sheet_order(shape in forest_shape()) {
            let (matrix, expected) = rows_for(&shape);

            let claims = build_claims(&matrix).unwrap();
            let walked: Vec<(String, usize)> = flatten_claims(&claims)
                .into_iter()
                .map(|c| (c.content.clone(), c.level.depth()))
                .collect();

            prop_assert_eq!(claims.len(), shape.len());
            prop_assert_eq!(walked, expected);
        }

        #[test]
        fn reference_past_last_claim_is_missing_parent(
            shape in forest_shape(),
            ahead in 1usize..4
        ) {
            let (mut matrix, _) = rows_for(&shape);
            let marker = format!("{}.1", shape.len() + ahead);
            matrix.push(row(&["", marker.as_str(), "orphan"]));
            let orphan_row = matrix.len() - 1;

            prop_assert_eq!(
                build_claims(&matrix).unwrap_err(),
                RecordError::MissingParent { row: orphan_row, marker }
            );
        }
    }
}
