//! Types and functions for working with positions.

use crate::mercator::{pixel_x_to_longitude, pixel_y_to_latitude};

/// Geographical position with latitude and longitude.
pub type Position = geo_types::Point;

/// Construct `Position` from latitude and longitude.
pub fn lat_lon(lat: f64, lon: f64) -> Position {
    Position::new(lon, lat)
}

/// Construct `Position` from longitude and latitude. Note that it is common standard to write
/// coordinates starting with the latitude instead, which is also the order used by the host
/// (`[lat, lon]` lists).
pub fn lon_lat(lon: f64, lat: f64) -> Position {
    Position::new(lon, lat)
}

/// Geographic extent of a region, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Span {
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

/// Region of the map as reported by, or handed to, the [`crate::MapSurface`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    pub center: Position,
    pub span: Span,
}

/// Size of the view in screen points.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewSize {
    pub width: f64,
    pub height: f64,
}

impl ViewSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// View which has not been laid out yet.
    pub fn is_empty(&self) -> bool {
        self.width <= 0. || self.height <= 0.
    }
}

/// Axis-aligned rectangle in the Mercator pixel space. `y` grows towards the south.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MapRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl MapRect {
    pub fn min_x(&self) -> f64 {
        self.x
    }

    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    pub fn min_y(&self) -> f64 {
        self.y
    }

    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }
}

/// Corners of the visible part of the map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibleRegion {
    pub northeast: Position,
    pub southwest: Position,
}

impl VisibleRegion {
    /// Unproject corners of a rectangle given in the Mercator pixel space.
    pub fn from_rect(rect: MapRect) -> Self {
        Self {
            northeast: lon_lat(
                pixel_x_to_longitude(rect.max_x()),
                pixel_y_to_latitude(rect.min_y()),
            ),
            southwest: lon_lat(
                pixel_x_to_longitude(rect.min_x()),
                pixel_y_to_latitude(rect.max_y()),
            ),
        }
    }
}
