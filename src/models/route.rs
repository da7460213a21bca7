//! Route encodings.
//!
//! A route is a sequence of city ids. The *open* form lists every city
//! once; the *closed* form repeats the first id at the end.

use crate::error::{Result, TspError};

/// Returns `true` if the route is closed (length ≥ 2 and first == last).
pub fn is_closed(route: &[usize]) -> bool {
    route.len() >= 2 && route.first() == route.last()
}

/// Returns the closed form of a route.
///
/// Already-closed and empty routes are returned unchanged.
///
/// # Examples
///
/// ```
/// use tsp_stepper::models::close_route;
///
/// assert_eq!(close_route(&[0, 2, 1]), vec![0, 2, 1, 0]);
/// assert_eq!(close_route(&[0, 2, 1, 0]), vec![0, 2, 1, 0]);
/// assert!(close_route(&[]).is_empty());
/// ```
pub fn close_route(route: &[usize]) -> Vec<usize> {
    let mut closed = route.to_vec();
    if let Some(&first) = route.first() {
        if !is_closed(route) {
            closed.push(first);
        }
    }
    closed
}

/// Returns the open form of a route, dropping a trailing repeat of the first id.
///
/// ```
/// use tsp_stepper::models::open_route;
///
/// assert_eq!(open_route(&[0, 2, 1, 0]), &[0, 2, 1]);
/// assert_eq!(open_route(&[0, 2, 1]), &[0, 2, 1]);
/// ```
pub fn open_route(route: &[usize]) -> &[usize] {
    if is_closed(route) {
        &route[..route.len() - 1]
    } else {
        route
    }
}

/// Checks that an open route visits each of the `n` cities exactly once.
pub(crate) fn validate_permutation(route: &[usize], n: usize) -> Result<()> {
    if route.len() != n {
        return Err(TspError::invalid_route(format!(
            "route visits {} cities, expected {}",
            route.len(),
            n
        )));
    }
    let mut seen = vec![false; n];
    for &id in route {
        if id >= n {
            return Err(TspError::invalid_route(format!(
                "city {id} is out of range for {n} cities"
            )));
        }
        if seen[id] {
            return Err(TspError::invalid_route(format!("city {id} appears twice")));
        }
        seen[id] = true;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_closed() {
        assert!(is_closed(&[0, 1, 2, 0]));
        assert!(!is_closed(&[0, 1, 2]));
        assert!(!is_closed(&[0]));
        assert!(!is_closed(&[]));
    }

    #[test]
    fn test_close_single() {
        assert_eq!(close_route(&[4]), vec![4, 4]);
    }

    #[test]
    fn test_open_close_inverse() {
        let open = vec![3, 1, 0, 2];
        assert_eq!(open_route(&close_route(&open)), open.as_slice());
    }

    #[test]
    fn test_validate_permutation_ok() {
        assert!(validate_permutation(&[2, 0, 1], 3).is_ok());
    }

    #[test]
    fn test_validate_permutation_errors() {
        assert!(validate_permutation(&[0, 1], 3).is_err());
        assert!(validate_permutation(&[0, 1, 1], 3).is_err());
        assert!(validate_permutation(&[0, 1, 5], 3).is_err());
    }
}
