use crate::error::{Error, Result};
use crate::geom::{self, Axes, Point, Rect, Size, Vector};
use serde::{Deserialize, Serialize};

/// A positioned, sized rectangle. `position` is the center.
///
/// Items are identified by their index in the slice handed to the engine, never by value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub position: Point,
    pub size: Size,
}

impl Item {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            position: geom::point(x, y),
            size: geom::size(width, height),
        }
    }

    pub fn half_size(&self) -> Vector {
        geom::vector(self.size.width / 2.0, self.size.height / 2.0)
    }

    pub fn area(&self) -> f64 {
        self.size.width * self.size.height
    }

    pub fn top_left(&self) -> Point {
        self.position - self.half_size()
    }

    /// `(x_min, x_max, y_min, y_max)`.
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        let r = self.rect();
        (r.min.x, r.max.x, r.min.y, r.max.y)
    }

    pub fn rect(&self) -> Rect {
        let half = self.half_size();
        Rect::new(self.position - half, self.position + half)
    }

    /// Whether the two boxes, each grown by `margin` on the shared edge, overlap on both axes.
    pub fn overlaps_with_margin(&self, other: &Item, margin: f64) -> bool {
        let a = self.rect();
        let b = other.rect();
        a.min.x < b.max.x + margin
            && a.max.x > b.min.x - margin
            && a.min.y < b.max.y + margin
            && a.max.y > b.min.y - margin
    }

    fn snap(&mut self, cell: f64) {
        let half = self.half_size();
        self.position = geom::grid_snap(self.position - half, cell) + half;
    }
}

/// Rejects items a layout run cannot work with.
pub fn validate_items(items: &[Item]) -> Result<()> {
    for (index, item) in items.iter().enumerate() {
        let (width, height) = (item.size.width, item.size.height);
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(Error::InvalidItemSize {
                index,
                width,
                height,
            });
        }
        if !geom::is_finite_point(item.position) {
            return Err(Error::NonFinitePosition { index });
        }
    }
    Ok(())
}

/// Moves every item so its top-left corner lands on the nearest multiple of `cell`.
pub fn snap_to_grid(items: &mut [Item], cell: f64) -> Result<()> {
    if !(cell.is_finite() && cell > 0.0) {
        return Err(Error::InvalidGridSize { grid_size: cell });
    }
    for item in items.iter_mut() {
        item.snap(cell);
    }
    Ok(())
}

/// Center the item would have after [`snap_to_grid`].
pub fn snapped_position(item: &Item, cell: f64) -> Point {
    let mut snapped = *item;
    snapped.snap(cell);
    snapped.position
}

/// Area-weighted centroid of all item centers. `None` when the total area is zero.
pub fn centroid(items: &[Item]) -> Option<Point> {
    let mut sum = geom::vector(0.0, 0.0);
    let mut weight = 0.0;
    for item in items {
        let area = item.area();
        sum += item.position.to_vector() * area;
        weight += area;
    }
    if !(weight.is_finite() && weight > geom::EPSILON) {
        return None;
    }
    let c = sum / weight;
    geom::is_finite_vector(c).then(|| c.to_point())
}

/// Translates the collection so its centroid sits on the origin along `axes`.
pub fn recenter(items: &mut [Item], axes: Axes) -> bool {
    let Some(c) = centroid(items) else {
        return false;
    };
    let shift = axes.mask(c.to_vector());
    if shift.x == 0.0 && shift.y == 0.0 {
        return false;
    }
    for item in items.iter_mut() {
        item.position -= shift;
    }
    true
}
