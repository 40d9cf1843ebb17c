use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Topping {
    Tomato,
    Mushroom,
}

impl Topping {
    pub const ALL: [Topping; 2] = [Topping::Tomato, Topping::Mushroom];

    pub fn from_marker(c: char) -> Option<Self> {
        match c {
            'T' => Some(Topping::Tomato),
            'M' => Some(Topping::Mushroom),
            _ => None,
        }
    }

    /// Slot of this topping in per-topping count arrays.
    pub fn index(&self) -> usize {
        match self {
            Topping::Tomato => 0,
            Topping::Mushroom => 1,
        }
    }

    pub fn other(&self) -> Self {
        match self {
            Topping::Tomato => Topping::Mushroom,
            Topping::Mushroom => Topping::Tomato,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// What a grid cell currently holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellState {
    Uncut(Topping),
    Cut(u32),
    Wasted,
}

/// Inclusive cell range. Always normalized so that `start <= end` on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub start: Cell,
    pub end: Cell,
}

impl Rect {
    pub fn new(a: Cell, b: Cell) -> Self {
        Self {
            start: Cell::new(a.row.min(b.row), a.col.min(b.col)),
            end: Cell::new(a.row.max(b.row), a.col.max(b.col)),
        }
    }

    pub fn single(cell: Cell) -> Self {
        Self {
            start: cell,
            end: cell,
        }
    }

    pub fn height(&self) -> usize {
        self.end.row.abs_diff(self.start.row) + 1
    }

    pub fn width(&self) -> usize {
        self.end.col.abs_diff(self.start.col) + 1
    }

    pub fn area(&self) -> usize {
        self.height() * self.width()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        (self.start.row..=self.end.row).contains(&cell.row)
            && (self.start.col..=self.end.col).contains(&cell.col)
    }

    pub fn overlaps(&self, other: &Rect) -> bool {
        self.start.row <= other.end.row
            && other.start.row <= self.end.row
            && self.start.col <= other.end.col
            && other.start.col <= self.end.col
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (self.start.row..=self.end.row)
            .flat_map(move |row| (self.start.col..=self.end.col).map(move |col| Cell::new(row, col)))
    }
}

/// Submission line format: `startRow startCol endRow endCol`.
impl std::fmt::Display for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.start.row, self.start.col, self.end.row, self.end.col
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_normalizes_corners() {
        let r = Rect::new(Cell::new(2, 0), Cell::new(0, 3));
        assert_eq!(r.start, Cell::new(0, 0));
        assert_eq!(r.end, Cell::new(2, 3));
        assert_eq!(r.area(), 12);
        assert_eq!(r.to_string(), "0 0 2 3");
    }

    #[test]
    fn test_single_cell_area() {
        assert_eq!(Rect::single(Cell::new(4, 5)).area(), 1);
    }

    #[test]
    fn test_overlap() {
        let a = Rect::new(Cell::new(0, 0), Cell::new(1, 1));
        let b = Rect::new(Cell::new(1, 1), Cell::new(2, 2));
        let c = Rect::new(Cell::new(0, 2), Cell::new(0, 3));
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
        assert!(b.contains(Cell::new(2, 1)));
        assert!(!c.contains(Cell::new(1, 2)));
    }

    #[test]
    fn test_cells_row_major() {
        let r = Rect::new(Cell::new(0, 0), Cell::new(1, 1));
        let cells: Vec<Cell> = r.cells().collect();
        assert_eq!(
            cells,
            vec![Cell::new(0, 0), Cell::new(0, 1), Cell::new(1, 0), Cell::new(1, 1)]
        );
    }

    #[test]
    fn test_topping_markers() {
        assert_eq!(Topping::from_marker('T'), Some(Topping::Tomato));
        assert_eq!(Topping::from_marker('M'), Some(Topping::Mushroom));
        assert_eq!(Topping::from_marker('x'), None);
        assert_eq!(Topping::Tomato.other(), Topping::Mushroom);
    }
}
