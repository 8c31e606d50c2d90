use crate::Pos;

/// A rectangle of board positions, given by its corners.
///
/// Both corners are _inclusive_, so a position with `x == x_max` lies
/// inside the box.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundingBox {
    pub x_min: i8,
    pub y_min: i8,
    pub x_max: i8,
    pub y_max: i8,
}

impl BoundingBox {
    pub fn contains(&self, pos: Pos) -> bool {
        pos.x >= self.x_min && pos.y >= self.y_min && pos.x <= self.x_max && pos.y <= self.y_max
    }

    pub fn singleton(pos: Pos) -> Self {
        Self {
            x_min: pos.x,
            y_min: pos.y,
            x_max: pos.x,
            y_max: pos.y,
        }
    }

    pub fn from_coordinates_iter(mut iter: impl Iterator<Item = (i8, i8)>) -> Option<Self> {
        let (x0, y0) = iter.next()?;
        let mut bbox = Self::singleton(Pos::new(x0, y0));
        for (x, y) in iter {
            bbox.update(Pos::new(x, y));
        }
        Some(bbox)
    }

    /// Expands the bounding box to cover `pos`.
    pub fn update(&mut self, pos: Pos) {
        self.x_min = self.x_min.min(pos.x);
        self.x_max = self.x_max.max(pos.x);
        self.y_min = self.y_min.min(pos.y);
        self.y_max = self.y_max.max(pos.y);
    }
}
