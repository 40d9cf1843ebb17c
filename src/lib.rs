pub mod error;
pub mod grid;
pub mod render;
pub mod slicer;
pub mod solver;
pub mod tree;
pub mod types;
