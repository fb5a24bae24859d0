//! Page box geometry and band calculations

use lopdf::Object;

/// A page rectangle in PDF user space
///
/// The coordinate system has origin at bottom-left of the page, so `lly` is
/// the bottom edge and `ury` the top edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub llx: f64,
    pub lly: f64,
    pub urx: f64,
    pub ury: f64,
}

impl BoundingBox {
    /// Create a box from its lower-left and upper-right corners
    pub fn new(llx: f64, lly: f64, urx: f64, ury: f64) -> Self {
        Self { llx, lly, urx, ury }
    }

    /// Parse a PDF rectangle array `[x1 y1 x2 y2]`
    ///
    /// PDF allows any pair of opposite corners, so the result is normalized
    /// to lower-left / upper-right. Returns `None` if the object is not a
    /// four-number array.
    pub fn from_object(object: &Object) -> Option<Self> {
        let values = match object {
            Object::Array(arr) if arr.len() == 4 => arr
                .iter()
                .map(as_number)
                .collect::<Option<Vec<f64>>>()?,
            _ => return None,
        };

        Some(Self {
            llx: values[0].min(values[2]),
            lly: values[1].min(values[3]),
            urx: values[0].max(values[2]),
            ury: values[1].max(values[3]),
        })
    }

    /// Serialize as a PDF rectangle array
    pub fn to_object(&self) -> Object {
        Object::Array(vec![
            number_object(self.llx),
            number_object(self.lly),
            number_object(self.urx),
            number_object(self.ury),
        ])
    }

    pub fn width(&self) -> f64 {
        self.urx - self.llx
    }

    pub fn height(&self) -> f64 {
        self.ury - self.lly
    }

    /// Horizontal band `index` of `count` equal bands, counted from the bottom
    ///
    /// Bands are measured up from y = 0 using the top edge `ury` as the page
    /// height, and start at x = 0 with the right edge kept. Boundaries are
    /// `card_height * index` and `card_height * (index + 1)` with no
    /// rounding, so the top band's upper edge may drift from `ury` by
    /// floating-point error when the height does not divide evenly.
    pub fn band(&self, index: usize, count: usize) -> Self {
        let card_height = self.ury / count as f64;
        Self {
            llx: 0.0,
            lly: card_height * index as f64,
            urx: self.urx,
            ury: card_height * (index + 1) as f64,
        }
    }

    /// All `count` bands, bottom to top
    pub fn bands(&self, count: usize) -> Vec<Self> {
        (0..count).map(|i| self.band(i, count)).collect()
    }

    /// Intersection with another box, or `None` if they don't overlap
    pub fn intersect(&self, other: &Self) -> Option<Self> {
        let clipped = Self {
            llx: self.llx.max(other.llx),
            lly: self.lly.max(other.lly),
            urx: self.urx.min(other.urx),
            ury: self.ury.min(other.ury),
        };

        if clipped.llx < clipped.urx && clipped.lly < clipped.ury {
            Some(clipped)
        } else {
            None
        }
    }
}

/// Read a PDF number (integer or real) as f64
pub(crate) fn as_number(object: &Object) -> Option<f64> {
    match object {
        Object::Integer(n) => Some(*n as f64),
        Object::Real(r) => Some(*r as f64),
        _ => None,
    }
}

/// Integral values are written as PDF integers, everything else as reals
///
/// lopdf stores reals as `f32`, so fractional boundaries keep about seven
/// significant digits in the written file.
fn number_object(value: f64) -> Object {
    if value.fract() == 0.0 && value.abs() < i32::MAX as f64 {
        Object::Integer(value as i64)
    } else {
        Object::Real(value as _)
    }
}
