//! Minimum-cost pairing of reference and candidate objects.

use pathfinding::{kuhn_munkres::kuhn_munkres_min, matrix::Matrix};
use ramsight_core::GameObject;

/// Distances are scaled to integers before solving; this keeps sub-pixel resolution.
const COST_SCALE: f64 = 1000.0;

/// A reference/candidate pair chosen by [`assign`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Assignment {
    pub reference: usize,
    pub candidate: usize,
    /// Euclidean distance between the two box centers.
    pub distance: f64,
}

/// Pairs up objects of the same category.
///
/// With more than one object on both sides, the pairing minimizes the sum of center
/// distances; the surplus of the larger side stays unassigned. Otherwise objects are
/// paired in list order.
///
/// ```
/// use ramsight_core::{Category, GameObject, Position};
/// use ramsight_stats::assignment::assign;
///
/// let at = |x| GameObject::new(Category::Jet).with_position(Position::new(x, 0));
/// let reference = [at(0), at(50)];
/// let candidate = [at(49), at(2), at(100)];
///
/// let reference: Vec<_> = reference.iter().collect();
/// let candidate: Vec<_> = candidate.iter().collect();
/// let pairs: Vec<_> = assign(&reference, &candidate)
///     .iter()
///     .map(|a| (a.reference, a.candidate))
///     .collect();
/// assert_eq!(pairs, [(0, 1), (1, 0)]);
/// ```
#[must_use]
pub fn assign(reference: &[&GameObject], candidate: &[&GameObject]) -> Vec<Assignment> {
    if reference.len() <= 1 || candidate.len() <= 1 {
        return reference
            .iter()
            .zip(candidate)
            .enumerate()
            .map(|(i, (r, c))| Assignment {
                reference: i,
                candidate: i,
                distance: r.center_distance(c),
            })
            .collect();
    }

    // the solver needs no more rows than columns
    let transposed = reference.len() > candidate.len();
    let (rows, columns) = if transposed {
        (candidate, reference)
    } else {
        (reference, candidate)
    };
    let costs = Matrix::from_fn(rows.len(), columns.len(), |(i, j)| {
        scaled_cost(rows[i].center_distance(columns[j]))
    });
    let (_, columns_of_rows) = kuhn_munkres_min(&costs);

    let mut assignments: Vec<_> = columns_of_rows
        .into_iter()
        .enumerate()
        .map(|(row, column)| {
            let (r, c) = if transposed {
                (column, row)
            } else {
                (row, column)
            };
            Assignment {
                reference: r,
                candidate: c,
                distance: reference[r].center_distance(candidate[c]),
            }
        })
        .collect();
    assignments.sort_by_key(|a| a.reference);
    assignments
}

#[expect(clippy::cast_possible_truncation)]
fn scaled_cost(distance: f64) -> i64 {
    (distance * COST_SCALE).round() as i64
}
