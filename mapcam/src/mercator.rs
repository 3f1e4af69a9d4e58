//! Conversions between geographical coordinates, the fixed-resolution Mercator pixel space, zoom
//! levels and camera altitudes.
//!
//! The pixel space spans `2 * MERCATOR_OFFSET` pixels in both directions, which corresponds to
//! a world bitmap at zoom level 21. Origin of the geographical coordinates (0°, 0°) lies at
//! `(MERCATOR_OFFSET, MERCATOR_OFFSET)`.
//!
//! All arithmetic is done in `f64`.
//! <https://en.wikipedia.org/wiki/Mercator_projection>

use crate::position::{lat_lon, Position, Span, ViewSize};
use std::f64::consts::FRAC_PI_2;

/// Half of the world width in pixels, at zoom level 21.
pub const MERCATOR_OFFSET: f64 = 268435456.0;

/// Radius of the Earth expressed in pixels, i.e. `MERCATOR_OFFSET / π`.
pub const MERCATOR_RADIUS: f64 = 85445659.44705395;

/// Zoom level at which one pixel of the view is one pixel of the Mercator pixel space.
const NATIVE_ZOOM_LEVEL: f64 = 21.;

/// Zoom levels are clamped to this before calculating spans or altitudes.
const MAX_PROJECTED_ZOOM_LEVEL: f64 = 28.;

/// Latitudes beyond this cannot be projected, as the Mercator projection goes to infinity.
const MAX_LATITUDE: f64 = 85.05112877980659;

/// Equatorial radius of WGS 84, in meters.
const EARTH_RADIUS: f64 = 6_378_137.0;

/// Half of the vertical field of view of the renderer's camera, in degrees.
const CAMERA_HALF_FIELD_OF_VIEW: f64 = 15.;

pub fn longitude_to_pixel_x(longitude: f64) -> f64 {
    (MERCATOR_OFFSET + MERCATOR_RADIUS * longitude.to_radians()).round()
}

pub fn latitude_to_pixel_y(latitude: f64) -> f64 {
    let sin = latitude.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians().sin();
    (MERCATOR_OFFSET - MERCATOR_RADIUS * ((1. + sin) / (1. - sin)).ln() / 2.).round()
}

pub fn pixel_x_to_longitude(pixel_x: f64) -> f64 {
    ((pixel_x.round() - MERCATOR_OFFSET) / MERCATOR_RADIUS).to_degrees()
}

pub fn pixel_y_to_latitude(pixel_y: f64) -> f64 {
    let y = (pixel_y.round() - MERCATOR_OFFSET) / MERCATOR_RADIUS;
    (FRAC_PI_2 - 2. * y.exp().atan()).to_degrees()
}

/// How many pixels of the Mercator pixel space fit in one pixel of the view.
fn zoom_scale(zoom_level: f64) -> f64 {
    2f64.powf(NATIVE_ZOOM_LEVEL - zoom_level.min(MAX_PROJECTED_ZOOM_LEVEL))
}

/// Geographical span visible in a view of given size, centered at `center`.
///
/// Latitude delta is positive, even though `y` grows towards the south in the pixel space.
pub fn zoom_level_to_span(center: Position, zoom_level: f64, view_size: ViewSize) -> Span {
    let center_x = longitude_to_pixel_x(center.x());
    let center_y = latitude_to_pixel_y(center.y());

    let zoom_scale = zoom_scale(zoom_level);
    let scaled_width = view_size.width * zoom_scale;
    let scaled_height = view_size.height * zoom_scale;

    let top_left_x = center_x - scaled_width / 2.;
    let top_left_y = center_y - scaled_height / 2.;

    let min_longitude = pixel_x_to_longitude(top_left_x);
    let max_longitude = pixel_x_to_longitude(top_left_x + scaled_width);

    let min_latitude = pixel_y_to_latitude(top_left_y);
    let max_latitude = pixel_y_to_latitude(top_left_y + scaled_height);

    Span {
        latitude_delta: -(max_latitude - min_latitude),
        longitude_delta: max_longitude - min_longitude,
    }
}

/// Distance from the ground at which the camera sees the same vertical extent as
/// [`zoom_level_to_span`] would give.
pub fn zoom_level_to_altitude(center: Position, zoom_level: f64, view_size: ViewSize) -> f64 {
    let center_y = latitude_to_pixel_y(center.y());
    let scaled_height = view_size.height * zoom_scale(zoom_level);
    let top_left_y = center_y - scaled_height / 2.;

    let bottom_latitude = pixel_y_to_latitude(top_left_y + scaled_height);
    let bottom = lat_lon(bottom_latitude, center.x());

    great_circle_distance(center, bottom) / CAMERA_HALF_FIELD_OF_VIEW.to_radians().tan()
}

/// Zoom level at which a view of `view_width` shows `span`. Inverse of [`zoom_level_to_span`],
/// rounded up to two decimal places.
pub fn region_to_zoom_level(center: Position, span: Span, view_width: f64) -> f64 {
    let center_x = longitude_to_pixel_x(center.x());
    let left_x = longitude_to_pixel_x(center.x() - span.longitude_delta / 2.);
    let pixel_width = (center_x - left_x).abs() * 2.;

    let zoom_exponent = (pixel_width / view_width).log2();
    round_up_to_hundredths(NATIVE_ZOOM_LEVEL - zoom_exponent)
}

/// Rounds towards positive infinity, so 10.361 becomes 10.37.
pub fn round_up_to_hundredths(value: f64) -> f64 {
    (value * 100.).ceil() / 100.
}

/// Haversine distance in meters.
pub fn great_circle_distance(from: Position, to: Position) -> f64 {
    let from_latitude = from.y().to_radians();
    let to_latitude = to.y().to_radians();
    let latitude_delta = to_latitude - from_latitude;
    let longitude_delta = (to.x() - from.x()).to_radians();

    let a = (latitude_delta / 2.).sin().powi(2)
        + from_latitude.cos() * to_latitude.cos() * (longitude_delta / 2.).sin().powi(2);

    2. * EARTH_RADIUS * a.sqrt().asin()
}
