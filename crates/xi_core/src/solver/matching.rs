//! Maximum bipartite matching and minimum vertex cover
//!
//! Columns are the left side, rows the right side. Matching uses Kuhn's
//! augmenting-path search; columns are processed in ascending order, each takes
//! the lowest free adjacent row if there is one, and re-routing also tries rows
//! in ascending order, so the result is a pure function of the edge set.
//!
//! The minimum vertex cover is derived from a maximum matching with Konig's
//! construction, so its size always equals the matching size.
//!
//! # Reference
//! Kuhn (1955), "The Hungarian Method for the Assignment Problem";
//! Konig (1931), "Graphs and Matrices".

/// A maximum matching between `cols` columns and `rows` rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BipartiteMatching {
    row_of_col: Vec<Option<usize>>,
    col_of_row: Vec<Option<usize>>,
}

impl BipartiteMatching {
    /// Computes a maximum matching over the edges for which `edge(row, col)` holds.
    pub fn maximum(rows: usize, cols: usize, edge: impl Fn(usize, usize) -> bool) -> Self {
        let mut matching = Self {
            row_of_col: vec![None; cols],
            col_of_row: vec![None; rows],
        };

        let mut visited = vec![false; rows];
        for col in 0..cols {
            visited.iter_mut().for_each(|v| *v = false);
            matching.augment(col, &edge, &mut visited);
        }
        matching
    }

    /// Tries to match `col`, re-routing already matched columns along an
    /// alternating path when no free row is adjacent.
    fn augment(
        &mut self,
        col: usize,
        edge: &impl Fn(usize, usize) -> bool,
        visited: &mut [bool],
    ) -> bool {
        let rows = self.col_of_row.len();

        let free_row =
            (0..rows).find(|&r| !visited[r] && self.col_of_row[r].is_none() && edge(r, col));
        if let Some(row) = free_row {
            visited[row] = true;
            self.link(row, col);
            return true;
        }

        for row in 0..rows {
            if visited[row] || !edge(row, col) {
                continue;
            }
            visited[row] = true;
            if let Some(other) = self.col_of_row[row] {
                if self.augment(other, edge, visited) {
                    self.link(row, col);
                    return true;
                }
            }
        }
        false
    }

    fn link(&mut self, row: usize, col: usize) {
        self.col_of_row[row] = Some(col);
        self.row_of_col[col] = Some(row);
    }

    /// Number of matched pairs
    pub fn size(&self) -> usize {
        self.row_of_col.iter().filter(|r| r.is_some()).count()
    }

    pub fn row_of_col(&self, col: usize) -> Option<usize> {
        self.row_of_col.get(col).copied().flatten()
    }

    pub fn col_of_row(&self, row: usize) -> Option<usize> {
        self.col_of_row.get(row).copied().flatten()
    }

    /// Lowest-index column left unmatched
    pub fn first_unmatched_col(&self) -> Option<usize> {
        self.row_of_col.iter().position(Option::is_none)
    }

    /// Minimum vertex cover of the same edge set (Konig's theorem).
    ///
    /// `edge` must be the predicate this matching was computed from.
    pub fn min_vertex_cover(&self, edge: impl Fn(usize, usize) -> bool) -> LineCover {
        let rows = self.col_of_row.len();
        let cols = self.row_of_col.len();

        // Alternating reachability from unmatched columns:
        // column -> row over any edge, row -> column over its matched edge.
        let mut col_reached = vec![false; cols];
        let mut row_reached = vec![false; rows];
        let mut stack: Vec<usize> = (0..cols).filter(|&c| self.row_of_col[c].is_none()).collect();
        for &col in &stack {
            col_reached[col] = true;
        }

        while let Some(col) = stack.pop() {
            for row in 0..rows {
                if row_reached[row] || !edge(row, col) {
                    continue;
                }
                row_reached[row] = true;
                if let Some(next) = self.col_of_row[row] {
                    if !col_reached[next] {
                        col_reached[next] = true;
                        stack.push(next);
                    }
                }
            }
        }

        LineCover {
            rows: row_reached,
            cols: col_reached.iter().map(|reached| !reached).collect(),
        }
    }
}

/// A set of covering lines: covered rows and covered columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineCover {
    rows: Vec<bool>,
    cols: Vec<bool>,
}

impl LineCover {
    pub fn row_covered(&self, row: usize) -> bool {
        self.rows[row]
    }

    pub fn col_covered(&self, col: usize) -> bool {
        self.cols[col]
    }

    /// Total number of lines
    pub fn len(&self) -> usize {
        self.rows.iter().filter(|c| **c).count() + self.cols.iter().filter(|c| **c).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True if every edge has at least one covered endpoint
    pub fn covers_all(&self, edge: impl Fn(usize, usize) -> bool) -> bool {
        (0..self.rows.len()).all(|r| {
            (0..self.cols.len()).all(|c| !edge(r, c) || self.rows[r] || self.cols[c])
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid<'a>(cells: &'a [&'a [u8]]) -> impl Fn(usize, usize) -> bool + 'a {
        move |r, c| cells[r][c] == 1
    }

    #[test]
    fn test_augmenting_path_beats_first_fit() {
        // First-fit would give column 0 row 0 and leave column 1 unmatched.
        let cells: &[&[u8]] = &[&[1, 1], &[1, 0]];
        let matching = BipartiteMatching::maximum(2, 2, grid(cells));

        assert_eq!(matching.size(), 2);
        assert_eq!(matching.row_of_col(0), Some(1));
        assert_eq!(matching.row_of_col(1), Some(0));
    }

    #[test]
    fn test_lowest_row_wins_ties() {
        let cells: &[&[u8]] = &[&[1, 0], &[1, 0], &[0, 1], &[0, 1]];
        let matching = BipartiteMatching::maximum(4, 2, grid(cells));

        assert_eq!(matching.row_of_col(0), Some(0));
        assert_eq!(matching.row_of_col(1), Some(2));
        assert_eq!(matching.col_of_row(1), None);
    }

    #[test]
    fn test_unmatched_column_reported() {
        let cells: &[&[u8]] = &[&[1, 1, 0], &[1, 1, 0], &[1, 1, 0]];
        let matching = BipartiteMatching::maximum(3, 3, grid(cells));

        assert_eq!(matching.size(), 2);
        assert_eq!(matching.first_unmatched_col(), Some(2));
    }

    #[test]
    fn test_cover_is_minimum_where_greedy_is_not() {
        // Zeros on a 4x4 grid where picking the line with the most zeros first
        // (row 0 has three) leads to four lines; the true minimum is three.
        let cells: &[&[u8]] = &[
            &[1, 1, 1, 0],
            &[1, 0, 0, 0],
            &[0, 1, 0, 0],
            &[0, 0, 1, 0],
        ];
        let edge = grid(cells);
        let matching = BipartiteMatching::maximum(4, 4, &edge);
        let cover = matching.min_vertex_cover(&edge);

        assert_eq!(matching.size(), 3);
        assert_eq!(cover.len(), 3);
        assert!(cover.covers_all(&edge));
    }

    #[test]
    fn test_cover_of_perfect_matching_has_order_lines() {
        let cells: &[&[u8]] = &[&[1, 0, 0], &[1, 1, 0], &[0, 1, 1]];
        let edge = grid(cells);
        let matching = BipartiteMatching::maximum(3, 3, &edge);
        let cover = matching.min_vertex_cover(&edge);

        assert_eq!(matching.size(), 3);
        assert_eq!(cover.len(), 3);
        assert!(cover.covers_all(&edge));
    }

    #[test]
    fn test_empty_edge_set() {
        let matching = BipartiteMatching::maximum(2, 2, |_, _| false);
        let cover = matching.min_vertex_cover(|_, _| false);
        assert_eq!(matching.size(), 0);
        assert!(cover.is_empty());
    }
}
