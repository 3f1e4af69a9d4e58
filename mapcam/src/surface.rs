//! The renderer the engine drives.

use bytes::Bytes;

use crate::position::{MapRect, Position, Region, ViewSize};

/// Camera looking at `center` from `altitude` meters above the ground.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub center: Position,
    pub altitude: f64,
    /// Degrees from the nadir.
    pub pitch: f64,
    /// Degrees clockwise from the north.
    pub heading: f64,
}

/// Handle of an annotation, assigned by the [`MapSurface`] when it is added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnnotationId(pub u64);

/// Point annotation displaying a [`crate::Marker`].
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub marker_id: String,
    pub position: Position,
    pub icon: Bytes,
    /// Width and height of the icon in pixels.
    pub icon_size: (u32, u32),
    /// Vertical shift of the icon, so that its bottom edge points at `position`.
    pub center_offset_y: f64,
}

/// Map renderer, e.g. a native map view of the platform. The engine never renders anything by
/// itself, it only tells the surface what to show and reads back what it is showing.
pub trait MapSurface {
    fn set_region(&mut self, region: Region, animated: bool);

    fn set_camera(&mut self, camera: Camera, animated: bool);

    fn add_annotation(&mut self, annotation: Annotation) -> AnnotationId;

    fn remove_annotation(&mut self, id: AnnotationId);

    /// All annotations currently shown, including those not added by the engine.
    fn annotations(&self) -> Vec<AnnotationId>;

    /// Visible part of the map in the Mercator pixel space.
    fn visible_rect(&self) -> MapRect;

    fn region(&self) -> Region;

    fn bounds_size(&self) -> ViewSize;

    fn camera(&self) -> Camera;

    fn center(&self) -> Position {
        self.region().center
    }

    /// Options the engine does not interpret itself, like map type or gestures.
    fn apply_options(&mut self, _options: &serde_json::Map<String, serde_json::Value>) {}
}
