use std::fmt;
use std::str::FromStr;

/// A single pointer sample in input coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline(always)]
    pub fn sqr_distance(&self, other: &Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    #[inline(always)]
    pub fn distance(&self, other: &Point) -> f32 {
        self.sqr_distance(other).sqrt()
    }

    #[inline(always)]
    pub fn midpoint(&self, other: &Point) -> Point {
        Point::new((self.x + other.x) * 0.5, (self.y + other.y) * 0.5)
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self::new(x, y)
    }
}

/// Formats as `"<x>,<y>"`, the layout used by stored pattern documents.
impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePointError(pub String);

impl fmt::Display for ParsePointError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid point '{}', expected \"<x>,<y>\"", self.0)
    }
}

impl std::error::Error for ParsePointError {}

impl FromStr for Point {
    type Err = ParsePointError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParsePointError(s.to_string());

        let (x, y) = s.split_once(',').ok_or_else(err)?;
        let x = x.trim().parse::<f32>().map_err(|_| err())?;
        let y = y.trim().parse::<f32>().map_err(|_| err())?;

        Ok(Point::new(x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distances() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(a.sqr_distance(&b), 25.0);
        assert_eq!(a.distance(&b), 5.0);
        assert_eq!(a.midpoint(&b), Point::new(1.5, 2.0));
    }

    #[test]
    fn test_parse_and_display() {
        let p: Point = "12.5,-3".parse().unwrap();
        assert_eq!(p, Point::new(12.5, -3.0));
        assert_eq!(p.to_string(), "12.5,-3");

        let back: Point = p.to_string().parse().unwrap();
        assert_eq!(back, p);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!("12.5".parse::<Point>().is_err());
        assert!("a,b".parse::<Point>().is_err());
        assert!("".parse::<Point>().is_err());
    }
}
