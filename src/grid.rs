use crate::error::FormatError;
use crate::types::{Cell, CellState, Rect, Topping};

/// The pizza: a grid of toppings that slices get cut out of.
///
/// Keeps a running count of uncut cells per topping so that
/// `remaining` is O(1) no matter how much has been cut.
#[derive(Debug, Clone)]
pub struct Grid {
    rows: usize,
    cols: usize,
    min_ingredient: usize,
    max_size: usize,
    cells: Vec<CellState>,
    remaining: [usize; 2],
    next_slice: u32,
    used: usize,
    waste: usize,
}

impl Grid {
    pub fn parse(description: &str) -> Result<Self, FormatError> {
        let mut lines = description.lines().map(|l| l.trim_end_matches('\r'));

        let header = lines.next().ok_or(FormatError::MissingHeader)?;
        let fields: Vec<&str> = header.split_whitespace().collect();
        if fields.len() != 4 {
            return Err(FormatError::HeaderFields(fields.len()));
        }
        let rows = parse_field("rows", fields[0])?;
        let cols = parse_field("cols", fields[1])?;
        let min_ingredient = parse_field("min_ingredient", fields[2])?;
        let max_size = parse_field("max_size", fields[3])?;
        if rows == 0 {
            return Err(FormatError::Zero("rows"));
        }
        if cols == 0 {
            return Err(FormatError::Zero("cols"));
        }
        if max_size == 0 {
            return Err(FormatError::Zero("max_size"));
        }
        rows.checked_mul(cols)
            .ok_or(FormatError::TooLarge { rows, cols })?;

        let body: Vec<&str> = lines.collect();
        let found = body.iter().rposition(|l| !l.trim().is_empty()).map_or(0, |i| i + 1);
        if found != rows {
            return Err(FormatError::RowCount {
                expected: rows,
                found,
            });
        }

        let mut cells = Vec::new();
        let mut remaining = [0; 2];
        for (row, line) in body[..rows].iter().enumerate() {
            let line = line.trim();
            let len = line.chars().count();
            if len != cols {
                return Err(FormatError::RowLength {
                    row,
                    expected: cols,
                    found: len,
                });
            }
            for (col, ch) in line.chars().enumerate() {
                let topping =
                    Topping::from_marker(ch).ok_or(FormatError::UnknownTopping { ch, row, col })?;
                remaining[topping.index()] += 1;
                cells.push(CellState::Uncut(topping));
            }
        }

        Ok(Self {
            rows,
            cols,
            min_ingredient,
            max_size,
            cells,
            remaining,
            next_slice: 0,
            used: 0,
            waste: 0,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn min_ingredient(&self) -> usize {
        self.min_ingredient
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn surface(&self) -> usize {
        self.rows * self.cols
    }

    /// Cells that ended up inside a slice.
    pub fn used(&self) -> usize {
        self.used
    }

    pub fn waste_count(&self) -> usize {
        self.waste
    }

    pub fn state(&self, cell: Cell) -> CellState {
        self.cells[self.offset(cell)]
    }

    fn offset(&self, cell: Cell) -> usize {
        cell.row * self.cols + cell.col
    }

    fn topping_at(&self, cell: Cell) -> Option<Topping> {
        match self.state(cell) {
            CellState::Uncut(t) => Some(t),
            _ => None,
        }
    }

    /// Cuts every still uncut cell of `rect` into a new slice.
    /// Cells already cut or wasted are left alone.
    pub fn cut(&mut self, rect: Rect) -> Rect {
        let rect = Rect::new(rect.start, rect.end);
        let id = self.next_slice;
        for cell in rect.cells() {
            let idx = self.offset(cell);
            if let CellState::Uncut(t) = self.cells[idx] {
                self.remaining[t.index()] -= 1;
                self.cells[idx] = CellState::Cut(id);
                self.used += 1;
            }
        }
        self.next_slice += 1;
        rect
    }

    /// Throws a single uncut cell away. Returns `false` if the cell was
    /// not uncut, in which case nothing changes.
    pub fn waste(&mut self, cell: Cell) -> bool {
        let idx = self.offset(cell);
        let CellState::Uncut(t) = self.cells[idx] else {
            tracing::warn!(%cell, "attempted to waste a cell that is not uncut");
            return false;
        };
        self.remaining[t.index()] -= 1;
        self.cells[idx] = CellState::Wasted;
        self.waste += 1;
        true
    }

    /// Uncut cells holding `topping` inside `rect`.
    pub fn topping_count(&self, topping: Topping, rect: Rect) -> usize {
        rect.cells()
            .filter(|&c| self.topping_at(c) == Some(topping))
            .count()
    }

    /// True if every cell of `rect` is still uncut.
    pub fn is_clear(&self, rect: Rect) -> bool {
        rect.cells().all(|c| self.topping_at(c).is_some())
    }

    pub fn remaining(&self, topping: Topping) -> usize {
        self.remaining[topping.index()]
    }

    /// How many `topping` cells would be left on the grid if `rect` were cut now.
    pub fn remaining_after(&self, topping: Topping, rect: Rect) -> usize {
        self.remaining(topping) - self.topping_count(topping, rect)
    }

    pub fn right_of(&self, cell: Cell) -> Option<Cell> {
        let next = Cell::new(cell.row, cell.col + 1);
        (next.col < self.cols && self.topping_at(next).is_some()).then_some(next)
    }

    pub fn below_of(&self, cell: Cell) -> Option<Cell> {
        let next = Cell::new(cell.row + 1, cell.col);
        (next.row < self.rows && self.topping_at(next).is_some()).then_some(next)
    }

    pub fn first_uncut(&self) -> Option<Cell> {
        self.cells
            .iter()
            .position(|s| matches!(s, CellState::Uncut(_)))
            .map(|i| Cell::new(i / self.cols, i % self.cols))
    }

    pub fn is_empty(&self) -> bool {
        self.remaining.iter().all(|&n| n == 0)
    }
}

impl std::str::FromStr for Grid {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Grid::parse(s)
    }
}

fn parse_field(field: &'static str, value: &str) -> Result<usize, FormatError> {
    value.parse::<usize>().map_err(|_| FormatError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}
