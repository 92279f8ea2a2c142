use serde::{Deserialize, Serialize};

/// A position in logical surface coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// One continuous pointer-down-to-pointer-up path
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub points: Vec<Point>,
}

impl Stroke {
    /// Start a stroke at its origin
    pub fn starting_at(origin: Point) -> Self {
        Self {
            points: vec![origin],
        }
    }

    pub fn last(&self) -> Option<Point> {
        self.points.last().copied()
    }

    /// A stroke needs at least two points to have drawn anything
    pub fn is_complete(&self) -> bool {
        self.points.len() >= 2
    }
}
