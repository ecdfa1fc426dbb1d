//! Geographic bounding boxes for fitting the map view.

use serde::Serialize;

use crate::project::{Location, ProjectCollection};

/// Smallest box containing a set of points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    /// South-west corner.
    pub south_west: Location,
    /// North-east corner.
    pub north_east: Location,
}

impl Bounds {
    /// Bounds of the located projects, or `None` if no project has a location.
    #[must_use]
    pub fn of(projects: &ProjectCollection) -> Option<Self> {
        Self::from_points(projects.iter().filter_map(|p| p.location))
    }

    /// Bounds of an iterator of points.
    #[must_use]
    pub fn from_points(points: impl IntoIterator<Item = Location>) -> Option<Self> {
        points.into_iter().fold(None, |acc, point| {
            Some(match acc {
                None => Self {
                    south_west: point,
                    north_east: point,
                },
                Some(b) => b.extend(point),
            })
        })
    }

    #[must_use]
    fn extend(self, point: Location) -> Self {
        Self {
            south_west: Location {
                lon: self.south_west.lon.min(point.lon),
                lat: self.south_west.lat.min(point.lat),
            },
            north_east: Location {
                lon: self.north_east.lon.max(point.lon),
                lat: self.north_east.lat.max(point.lat),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::Project;

    fn point(lon: f64, lat: f64) -> Location {
        Location { lon, lat }
    }

    fn located(lon: f64, lat: f64) -> Project {
        Project {
            location: Some(point(lon, lat)),
            ..Project::default()
        }
    }

    #[test]
    fn test_bounds_of_points() {
        let projects = ProjectCollection::new(vec![
            located(-57.6, -38.1),
            Project::default(),
            located(-57.5, -37.9),
            located(-57.55, -38.0),
        ]);
        let bounds = Bounds::of(&projects).unwrap();

        assert_eq!(bounds.south_west, point(-57.6, -38.1));
        assert_eq!(bounds.north_east, point(-57.5, -37.9));
    }

    #[test]
    fn test_single_point_is_degenerate_box() {
        let projects = ProjectCollection::new(vec![located(1.0, 2.0)]);
        let bounds = Bounds::of(&projects).unwrap();
        assert_eq!(bounds.south_west, bounds.north_east);
        assert_eq!(bounds.north_east, point(1.0, 2.0));
    }

    #[test]
    fn test_no_locations() {
        let projects = ProjectCollection::new(vec![Project::default()]);
        assert!(Bounds::of(&projects).is_none());
    }
}
