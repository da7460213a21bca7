//! Seeded city placement.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::distance::distance;
use crate::error::{Result, TspError};
use crate::models::City;

const PLACEMENT_ATTEMPTS: usize = 100;

/// Where and how many cities to place.
///
/// # Examples
///
/// ```
/// use tsp_stepper::instance::CityLayout;
///
/// let layout = CityLayout::default().with_count(5).with_size(400.0, 300.0);
/// assert_eq!(layout.count, 5);
/// assert!(layout.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CityLayout {
    /// Number of cities.
    pub count: usize,
    /// Canvas width.
    pub width: f64,
    /// Canvas height.
    pub height: f64,
    /// Empty border kept on every side.
    pub margin: f64,
    /// Preferred minimum distance between two cities.
    pub min_separation: f64,
}

impl Default for CityLayout {
    fn default() -> Self {
        Self {
            count: 7,
            width: 800.0,
            height: 600.0,
            margin: 40.0,
            min_separation: 30.0,
        }
    }
}

impl CityLayout {
    /// Sets the number of cities.
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    /// Sets the canvas size.
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Sets the border width.
    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    /// Sets the preferred minimum spacing.
    pub fn with_min_separation(mut self, min_separation: f64) -> Self {
        self.min_separation = min_separation;
        self
    }

    /// Checks that the placement area is non-empty and finite.
    pub fn validate(&self) -> Result<()> {
        let values = [self.width, self.height, self.margin, self.min_separation];
        if values.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(TspError::invalid_config(
                "layout dimensions must be finite and non-negative",
            ));
        }
        if self.width <= 2.0 * self.margin || self.height <= 2.0 * self.margin {
            return Err(TspError::invalid_config(format!(
                "margin {} leaves no room on a {}x{} canvas",
                self.margin, self.width, self.height
            )));
        }
        Ok(())
    }
}

/// Places `layout.count` cities uniformly inside the margins.
///
/// Each city is re-drawn up to 100 times to keep `min_separation` from
/// the cities already placed; after that the last draw is kept. The same
/// seed always gives the same cities. Without a seed one is drawn and
/// logged so the instance can be reproduced.
///
/// # Errors
///
/// [`TspError::InvalidConfig`] if the layout is invalid.
///
/// # Examples
///
/// ```
/// use tsp_stepper::instance::{random_cities, CityLayout};
///
/// let layout = CityLayout::default().with_count(6);
/// let a = random_cities(&layout, Some(42)).unwrap();
/// let b = random_cities(&layout, Some(42)).unwrap();
/// assert_eq!(a, b);
/// assert_eq!(a.len(), 6);
/// ```
#[instrument(level = "debug", skip(layout), fields(count = layout.count))]
pub fn random_cities(layout: &CityLayout, seed: Option<u64>) -> Result<Vec<City>> {
    layout.validate()?;
    let seed = seed.unwrap_or_else(|| {
        let drawn = rand::random::<u64>();
        tracing::info!(seed = drawn, "generated city seed");
        drawn
    });
    let mut rng = StdRng::seed_from_u64(seed);

    let (x_lo, x_hi) = (layout.margin, layout.width - layout.margin);
    let (y_lo, y_hi) = (layout.margin, layout.height - layout.margin);

    let mut cities: Vec<City> = Vec::with_capacity(layout.count);
    for id in 0..layout.count {
        let mut candidate = City::new(id, rng.random_range(x_lo..x_hi), rng.random_range(y_lo..y_hi));
        for _ in 1..PLACEMENT_ATTEMPTS {
            let crowded = cities
                .iter()
                .any(|c| distance(c, &candidate) < layout.min_separation);
            if !crowded {
                break;
            }
            candidate = City::new(id, rng.random_range(x_lo..x_hi), rng.random_range(y_lo..y_hi));
        }
        cities.push(candidate);
    }
    Ok(cities)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cities_inside_margins() {
        let layout = CityLayout::default().with_count(50);
        let cities = random_cities(&layout, Some(7)).expect("valid layout");
        for c in &cities {
            assert!(c.x() >= 40.0 && c.x() < 760.0);
            assert!(c.y() >= 40.0 && c.y() < 560.0);
        }
    }

    #[test]
    fn test_ids_are_positions() {
        let cities = random_cities(&CityLayout::default(), Some(1)).expect("valid layout");
        for (i, c) in cities.iter().enumerate() {
            assert_eq!(c.id(), i);
        }
    }

    #[test]
    fn test_separation_respected_when_room() {
        let layout = CityLayout::default().with_count(8).with_min_separation(50.0);
        let cities = random_cities(&layout, Some(99)).expect("valid layout");
        for (i, a) in cities.iter().enumerate() {
            for b in &cities[i + 1..] {
                assert!(distance(a, b) >= 50.0);
            }
        }
    }

    #[test]
    fn test_different_seeds_differ() {
        let layout = CityLayout::default();
        let a = random_cities(&layout, Some(1)).expect("valid layout");
        let b = random_cities(&layout, Some(2)).expect("valid layout");
        assert_ne!(a, b);
    }

    #[test]
    fn test_invalid_layout() {
        let layout = CityLayout::default().with_size(60.0, 600.0);
        assert!(matches!(
            random_cities(&layout, Some(1)),
            Err(TspError::InvalidConfig { .. })
        ));
        let nan = CityLayout::default().with_margin(f64::NAN);
        assert!(nan.validate().is_err());
    }

    #[test]
    fn test_zero_cities() {
        let layout = CityLayout::default().with_count(0);
        assert!(random_cities(&layout, None).expect("valid layout").is_empty());
    }
}
