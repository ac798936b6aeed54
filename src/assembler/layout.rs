use crate::render::Position;

/// Assigns a position to the node at `index` in encounter order.
///
/// Implementations must be deterministic: the same index always yields the
/// same position.
pub trait Layout: Send + Sync {
    fn name(&self) -> &str;
    fn position(&self, index: usize) -> Position;
}

/// Row-major grid: `columns` nodes per row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    pub columns: usize,
    pub spacing_x: f64,
    pub spacing_y: f64,
    pub origin_x: f64,
    pub origin_y: f64,
}

impl GridLayout {
    pub const DEFAULT_COLUMNS: usize = 4;
    pub const DEFAULT_SPACING_X: f64 = 300.0;
    pub const DEFAULT_SPACING_Y: f64 = 200.0;
    pub const DEFAULT_ORIGIN: f64 = 100.0;
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            columns: Self::DEFAULT_COLUMNS,
            spacing_x: Self::DEFAULT_SPACING_X,
            spacing_y: Self::DEFAULT_SPACING_Y,
            origin_x: Self::DEFAULT_ORIGIN,
            origin_y: Self::DEFAULT_ORIGIN,
        }
    }
}

impl Layout for GridLayout {
    fn name(&self) -> &str {
        "grid"
    }

    fn position(&self, index: usize) -> Position {
        // A zero-column grid degenerates to a single column.
        let columns = self.columns.max(1);
        let col = (index % columns) as f64;
        let row = (index / columns) as f64;
        Position::new(
            self.origin_x + self.spacing_x * col,
            self.origin_y + self.spacing_y * row,
        )
    }
}

/// Single horizontal row, used for stream-detail pipelines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipelineLayout {
    pub spacing_x: f64,
    pub origin_x: f64,
    pub y: f64,
}

impl Default for PipelineLayout {
    fn default() -> Self {
        Self {
            spacing_x: 280.0,
            origin_x: 50.0,
            y: 100.0,
        }
    }
}

impl Layout for PipelineLayout {
    fn name(&self) -> &str {
        "pipeline"
    }

    fn position(&self, index: usize) -> Position {
        Position::new(self.origin_x + self.spacing_x * index as f64, self.y)
    }
}
