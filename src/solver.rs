use serde::Serialize;

use crate::grid::Grid;
use crate::slicer::Slicer;
use crate::types::Rect;

#[derive(Debug, Clone, Serialize)]
pub struct Solution {
    pub slices: Vec<Rect>,
    pub used: usize,
    pub waste: usize,
    pub surface: usize,
}

impl Solution {
    pub fn slice_count(&self) -> usize {
        self.slices.len()
    }

    /// Share of the grid covered by slices, rounded to two decimals.
    pub fn used_percent(&self) -> f64 {
        if self.surface == 0 {
            return 0.0;
        }
        (self.used as f64 * 10_000.0 / self.surface as f64).round() / 100.0
    }

    /// Slice count on the first line, then one `r0 c0 r1 c1` line per slice.
    pub fn to_submission(&self) -> String {
        let mut out = format!("{}\n", self.slices.len());
        for s in &self.slices {
            out.push_str(&s.to_string());
            out.push('\n');
        }
        out
    }
}

/// Runs the slicer until every cell of the grid is cut or wasted.
pub struct Solver {
    grid: Grid,
}

impl Solver {
    pub fn new(grid: Grid) -> Self {
        Self { grid }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn into_grid(self) -> Grid {
        self.grid
    }

    pub fn solve(&mut self) -> Solution {
        let mut slices = Vec::new();
        while !self.grid.is_empty() {
            if let Some(rect) = Slicer::new(&mut self.grid).select_slice() {
                slices.push(rect);
            }
        }

        let solution = Solution {
            slices,
            used: self.grid.used(),
            waste: self.grid.waste_count(),
            surface: self.grid.surface(),
        };
        tracing::info!(
            slices = solution.slice_count(),
            used = solution.used,
            waste = solution.waste,
            surface = solution.surface,
            "solved"
        );
        solution
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CellState, Topping};

    /// Validates a complete solution against the grid it was cut from:
    /// 1. Every slice fits the size cap and holds enough of each topping
    /// 2. No two slices overlap
    /// 3. Every cell is either in exactly one slice or wasted
    fn assert_solution_valid(description: &str, sol: &Solution, grid: &Grid) {
        let fresh = Grid::parse(description).unwrap();
        for (i, s) in sol.slices.iter().enumerate() {
            assert!(
                s.area() <= fresh.max_size(),
                "slice {i} ({s}) has area {} > {}",
                s.area(),
                fresh.max_size()
            );
            for t in Topping::ALL {
                assert!(
                    fresh.topping_count(t, *s) >= fresh.min_ingredient(),
                    "slice {i} ({s}) has too few {t:?}"
                );
            }
        }

        for i in 0..sol.slices.len() {
            for j in (i + 1)..sol.slices.len() {
                assert!(
                    !sol.slices[i].overlaps(&sol.slices[j]),
                    "slice {i} ({}) overlaps slice {j} ({})",
                    sol.slices[i],
                    sol.slices[j]
                );
            }
        }

        for row in 0..grid.rows() {
            for col in 0..grid.cols() {
                let cell = crate::types::Cell::new(row, col);
                let owners = sol.slices.iter().filter(|s| s.contains(cell)).count();
                match grid.state(cell) {
                    CellState::Cut(_) => assert_eq!(owners, 1, "cell {cell} cut but in {owners} slices"),
                    CellState::Wasted => assert_eq!(owners, 0, "cell {cell} wasted but in a slice"),
                    CellState::Uncut(_) => panic!("cell {cell} left uncut"),
                }
            }
        }

        assert_eq!(sol.used + sol.waste, sol.surface);
        let covered: usize = sol.slices.iter().map(|s| s.area()).sum();
        assert_eq!(covered, sol.used);
    }

    fn solve(description: &str) -> (Solution, Grid) {
        let mut solver = Solver::new(Grid::parse(description).unwrap());
        let sol = solver.solve();
        (sol, solver.into_grid())
    }

    #[test]
    fn test_small_mixed_grid() {
        let input = "3 3 1 6\nTTT\nTMM\nTMM\n";
        let (sol, grid) = solve(input);
        assert_solution_valid(input, &sol, &grid);
        assert_eq!(sol.surface, 9);
        assert!(sol.slice_count() >= 1);
    }

    #[test]
    fn test_example_input() {
        let input = "3 5 1 6\nTTTTT\nTMMMT\nTTTTT\n";
        let (sol, grid) = solve(input);
        assert_solution_valid(input, &sol, &grid);
        assert!(sol.slice_count() >= 2);
    }

    #[test]
    fn test_impossible_cell_is_wasted() {
        let input = "1 1 1 1\nT\n";
        let (sol, grid) = solve(input);
        assert_solution_valid(input, &sol, &grid);
        assert_eq!(sol.slice_count(), 0);
        assert_eq!(sol.waste, 1);
        assert_eq!(sol.used, 0);
        assert_eq!(sol.used_percent(), 0.0);
    }

    #[test]
    fn test_single_topping_grid_is_all_waste() {
        let input = "2 3 1 6\nMMM\nMMM\n";
        let (sol, grid) = solve(input);
        assert_solution_valid(input, &sol, &grid);
        assert_eq!(sol.waste, 6);
    }

    #[test]
    fn test_alternating_pairs() {
        let input = "2 4 1 2\nTMTM\nMTMT\n";
        let (sol, grid) = solve(input);
        assert_solution_valid(input, &sol, &grid);
        assert_eq!(sol.used, 8);
        assert_eq!(sol.slice_count(), 4);
        assert_eq!(sol.used_percent(), 100.0);
    }

    #[test]
    fn test_larger_grid() {
        let rows = [
            "TMMMTTTMTM",
            "MMTTMTMMTT",
            "TTMTMMTMMT",
            "MTTMTMTTMM",
            "TMTMMTMTTM",
            "MMTTTMMTMT",
            "TMMTMTTMMT",
            "MTTMMTMTTM",
        ];
        let input = format!("8 10 2 7\n{}\n", rows.join("\n"));
        let (sol, grid) = solve(&input);
        assert_solution_valid(&input, &sol, &grid);
        assert!(sol.used > 0);
    }

    #[test]
    fn test_slices_stay_clear_of_earlier_cuts() {
        let input = "7 8 2 8\nTTTMTTMT\nTTTTMTTM\nMTMMMTTM\nMMTMMMMT\nMTMMMTMM\nMMMTMTTT\nMTMMMMTT\n";
        let (sol, grid) = solve(input);
        assert_solution_valid(input, &sol, &grid);
    }

    #[test]
    fn test_submission_format() {
        let sol = Solution {
            slices: vec![
                Rect::new(
                    crate::types::Cell::new(0, 0),
                    crate::types::Cell::new(2, 1),
                ),
                Rect::new(
                    crate::types::Cell::new(0, 2),
                    crate::types::Cell::new(2, 2),
                ),
            ],
            used: 9,
            waste: 6,
            surface: 15,
        };
        assert_eq!(sol.to_submission(), "2\n0 0 2 1\n0 2 2 2\n");
        assert_eq!(sol.used_percent(), 60.0);
    }
}
