use crate::grid::Grid;
use crate::types::{Cell, CellState};

const WASTED: char = '#';
const UNCUT: char = '.';
const SLICE_SYMBOLS: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Symbol for a slice id. Cycles once the alphabet runs out, so neighbouring
/// slices in big grids may share a symbol.
pub fn slice_symbol(id: u32) -> char {
    SLICE_SYMBOLS[id as usize % SLICE_SYMBOLS.len()] as char
}

/// Framed diagram of the grid, one symbol per cell.
pub fn render_grid(grid: &Grid) -> String {
    let w = grid.cols() * 2 + 2;
    let h = grid.rows() + 1;
    let mut canvas = vec![vec![' '; w + 1]; h + 1];

    draw_frame(&mut canvas, w, h);

    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            canvas[row + 1][2 + col * 2] = match grid.state(Cell::new(row, col)) {
                CellState::Cut(id) => slice_symbol(id),
                CellState::Wasted => WASTED,
                CellState::Uncut(_) => UNCUT,
            };
        }
    }

    let mut result = String::new();
    for row in &canvas {
        let line: String = row.iter().collect();
        result.push_str(line.trim_end());
        result.push('\n');
    }
    result
}

#[allow(clippy::needless_range_loop)]
fn draw_frame(canvas: &mut [Vec<char>], w: usize, h: usize) {
    for i in 0..=w {
        canvas[0][i] = '-';
        canvas[h][i] = '-';
    }
    for j in 0..=h {
        canvas[j][0] = '|';
        canvas[j][w] = '|';
    }
    for &(cx, cy) in &[(0, 0), (w, 0), (0, h), (w, h)] {
        canvas[cy][cx] = '+';
    }
}
