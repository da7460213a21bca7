//! City type.

use serde::{Deserialize, Serialize};

/// A city on the plane.
///
/// The id equals the city's position in the canonical city list; routes
/// are encoded as sequences of these ids.
///
/// # Examples
///
/// ```
/// use tsp_stepper::models::City;
///
/// let c = City::new(3, 41.0, 49.0);
/// assert_eq!(c.id(), 3);
/// assert_eq!(c.x(), 41.0);
/// assert_eq!(c.y(), 49.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct City {
    id: usize,
    x: f64,
    y: f64,
}

impl City {
    /// Creates a new city.
    pub fn new(id: usize, x: f64, y: f64) -> Self {
        Self { id, x, y }
    }

    /// Builds a city list from coordinates, assigning ids `0..n` in order.
    ///
    /// ```
    /// use tsp_stepper::models::City;
    ///
    /// let cities = City::from_coords(&[(0.0, 0.0), (3.0, 4.0)]);
    /// assert_eq!(cities[1].id(), 1);
    /// ```
    pub fn from_coords(coords: &[(f64, f64)]) -> Vec<City> {
        coords
            .iter()
            .enumerate()
            .map(|(id, &(x, y))| City::new(id, x, y))
            .collect()
    }

    /// City ID (index in the city list).
    pub fn id(&self) -> usize {
        self.id
    }

    /// X-coordinate.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Y-coordinate.
    pub fn y(&self) -> f64 {
        self.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_city_new() {
        let c = City::new(1, 10.0, 20.0);
        assert_eq!(c.id(), 1);
        assert_eq!(c.x(), 10.0);
        assert_eq!(c.y(), 20.0);
    }

    #[test]
    fn test_from_coords_assigns_ids_in_order() {
        let cities = City::from_coords(&[(1.0, 1.0), (2.0, 2.0), (3.0, 3.0)]);
        let ids: Vec<usize> = cities.iter().map(|c| c.id()).collect();
        assert_eq!(ids, vec![0, 1, 2]);
        assert_eq!(cities[2].x(), 3.0);
    }

    #[test]
    fn test_city_serde_shape() {
        let c = City::new(2, 1.5, -4.0);
        let json = serde_json::to_string(&c).expect("serializable");
        assert_eq!(json, r#"{"id":2,"x":1.5,"y":-4.0}"#);
    }
}
