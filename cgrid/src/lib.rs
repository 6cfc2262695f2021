pub mod algorithms;
pub mod array;
pub mod dims;
pub mod grid;
pub mod paint;
