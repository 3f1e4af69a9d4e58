#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[error("invalid zoom level")]
pub struct InvalidZoom;

const DEFAULT_MIN_ZOOM_LEVEL: f64 = 2.;
const DEFAULT_MAX_ZOOM_LEVEL: f64 = 21.;

/// Zooming in from below this level starts from this level.
const ZOOM_IN_FLOOR: f64 = 2.;

/// Zooming out to this level or below snaps the map fully out.
const ZOOM_OUT_SNAP: f64 = 2.;

/// Zoom level, pitch and heading of a single map view, together with the zoom bounds.
///
/// Only [`crate::CameraController`] writes to it.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoomState {
    pub(crate) zoom_level: f64,
    pub(crate) min_zoom_level: f64,
    pub(crate) max_zoom_level: f64,
    pub(crate) pitch: f64,
    pub(crate) heading: f64,
}

impl Default for ZoomState {
    fn default() -> Self {
        Self {
            zoom_level: 0.,
            min_zoom_level: DEFAULT_MIN_ZOOM_LEVEL,
            max_zoom_level: DEFAULT_MAX_ZOOM_LEVEL,
            pitch: 0.,
            heading: 0.,
        }
    }
}

impl ZoomState {
    pub fn zoom_level(&self) -> f64 {
        self.zoom_level
    }

    pub fn min_zoom_level(&self) -> f64 {
        self.min_zoom_level
    }

    pub fn max_zoom_level(&self) -> f64 {
        self.max_zoom_level
    }

    pub fn pitch(&self) -> f64 {
        self.pitch
    }

    pub fn heading(&self) -> f64 {
        self.heading
    }

    fn contains(&self, zoom_level: f64) -> bool {
        (self.min_zoom_level..=self.max_zoom_level).contains(&zoom_level)
    }

    fn clamp(&self, zoom_level: f64) -> f64 {
        zoom_level.max(self.min_zoom_level).min(self.max_zoom_level)
    }

    /// Zoom in by one level. Levels below 2 are treated as 2 before zooming in.
    pub(crate) fn zoom_in(&mut self) -> Result<(), InvalidZoom> {
        let zoom_level = self.zoom_level.max(ZOOM_IN_FLOOR) + 1.;
        if !self.contains(zoom_level) {
            return Err(InvalidZoom);
        }
        self.zoom_level = zoom_level;
        Ok(())
    }

    /// Zoom out by one level. Landing at or below 2 (after rounding) snaps to 0.
    pub(crate) fn zoom_out(&mut self) -> Result<(), InvalidZoom> {
        let zoom_level = self.zoom_level - 1.;
        if !self.contains(zoom_level) {
            return Err(InvalidZoom);
        }
        self.zoom_level = if zoom_level.round() <= ZOOM_OUT_SNAP {
            0.
        } else {
            zoom_level
        };
        Ok(())
    }

    /// Zoom using a relative value, saturating at the bounds.
    pub(crate) fn zoom_by(&mut self, delta: f64) {
        self.zoom_level = self.clamp(self.zoom_level + delta);
    }

    /// Set exact zoom level, saturating at the bounds.
    pub(crate) fn zoom_to(&mut self, zoom_level: f64) {
        self.zoom_level = self.clamp(zoom_level);
    }

    /// Set zoom level without clamping, for values read back from the renderer.
    pub(crate) fn set_zoom_level(&mut self, zoom_level: f64) {
        self.zoom_level = zoom_level;
    }

    pub(crate) fn set_pitch(&mut self, pitch: f64) {
        self.pitch = pitch;
    }

    pub(crate) fn set_heading(&mut self, heading: f64) {
        self.heading = heading;
    }

    /// Returns `true` if the current zoom level was above the new maximum and got pulled down.
    pub(crate) fn set_max_zoom_level(&mut self, max_zoom_level: f64) -> bool {
        self.max_zoom_level = max_zoom_level;
        if self.zoom_level > max_zoom_level {
            self.zoom_level = max_zoom_level;
            true
        } else {
            false
        }
    }

    /// Returns `true` if the current zoom level was below the new minimum and got pulled up.
    pub(crate) fn set_min_zoom_level(&mut self, min_zoom_level: f64) -> bool {
        self.min_zoom_level = min_zoom_level;
        if self.zoom_level < min_zoom_level {
            self.zoom_level = min_zoom_level;
            true
        } else {
            false
        }
    }
}
