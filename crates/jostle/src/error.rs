#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("grid size must be positive and finite, got {grid_size}")]
    InvalidGridSize { grid_size: f64 },

    #[error("item {index} has an invalid size {width}x{height}")]
    InvalidItemSize {
        index: usize,
        width: f64,
        height: f64,
    },

    #[error("item {index} has a non-finite position")]
    NonFinitePosition { index: usize },

    #[error("layout parameter `{name}` is out of range: {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error("item count changed during a layout run (expected {expected}, got {actual})")]
    ItemCountChanged { expected: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
