use serde::{Deserialize, Deserializer};

use crate::{
    mercator::{region_to_zoom_level, zoom_level_to_altitude, zoom_level_to_span},
    position::{lat_lon, Position, Region, VisibleRegion},
    surface::{Camera, MapSurface},
    zoom::ZoomState,
};

const MAX_PITCH: f64 = 90.;

/// Camera position requested by the host. Missing fields keep their current values.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct CameraPosition {
    /// Sent as a `[lat, lon]` list.
    #[serde(default, deserialize_with = "deserialize_lat_lon")]
    pub target: Option<Position>,
    #[serde(default)]
    pub zoom: Option<f64>,
    #[serde(default)]
    pub pitch: Option<f64>,
    #[serde(default)]
    pub heading: Option<f64>,
}

fn deserialize_lat_lon<'de, D>(deserializer: D) -> Result<Option<Position>, D::Error>
where
    D: Deserializer<'de>,
{
    let target = Option::<[f64; 2]>::deserialize(deserializer)?;
    Ok(target.map(|[lat, lon]| lat_lon(lat, lon)))
}

/// High-level camera command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraUpdate {
    SetPosition(CameraPosition),
    ZoomBy(f64),
    ZoomTo(f64),
    ZoomIn,
    ZoomOut,
}

/// Turns camera commands into camera changes of the [`MapSurface`]. It is the only writer of the
/// view's [`ZoomState`].
#[derive(Debug, Default, Clone)]
pub struct CameraController {
    state: ZoomState,
}

impl CameraController {
    pub fn new(state: ZoomState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &ZoomState {
        &self.state
    }

    pub fn apply(&mut self, surface: &mut dyn MapSurface, update: CameraUpdate, animated: bool) {
        match update {
            CameraUpdate::SetPosition(position) => self.set_position(surface, position, animated),
            CameraUpdate::ZoomBy(delta) => self.zoom_by(surface, delta, animated),
            CameraUpdate::ZoomTo(zoom_level) => self.zoom_to(surface, zoom_level, animated),
            CameraUpdate::ZoomIn => self.zoom_in(surface, animated),
            CameraUpdate::ZoomOut => self.zoom_out(surface, animated),
        }
    }

    pub fn set_position(
        &mut self,
        surface: &mut dyn MapSurface,
        position: CameraPosition,
        animated: bool,
    ) {
        let center = position.target.unwrap_or(surface.camera().center);

        if let Some(zoom_level) = position.zoom {
            self.state.zoom_to(zoom_level);
        }

        if let Some(pitch) = position.pitch {
            self.state.set_pitch(pitch.clamp(0., MAX_PITCH));
        }

        if let Some(heading) = position.heading {
            self.state.set_heading(heading.rem_euclid(360.));
        }

        self.render_at(surface, center, animated);
    }

    pub fn zoom_in(&mut self, surface: &mut dyn MapSurface, animated: bool) {
        match self.state.zoom_in() {
            Ok(()) => self.render(surface, animated),
            Err(err) => log::debug!("Not zooming in from {}: {err}.", self.state.zoom_level),
        }
    }

    pub fn zoom_out(&mut self, surface: &mut dyn MapSurface, animated: bool) {
        match self.state.zoom_out() {
            Ok(()) => self.render(surface, animated),
            Err(err) => log::debug!("Not zooming out from {}: {err}.", self.state.zoom_level),
        }
    }

    pub fn zoom_by(&mut self, surface: &mut dyn MapSurface, delta: f64, animated: bool) {
        self.state.zoom_by(delta);
        self.render(surface, animated);
    }

    pub fn zoom_to(&mut self, surface: &mut dyn MapSurface, zoom_level: f64, animated: bool) {
        self.state.zoom_to(zoom_level);
        self.render(surface, animated);
    }

    /// Show the region which a view of the surface's size has at `zoom_level`, instead of
    /// positioning the camera by its altitude.
    pub fn set_region(
        &mut self,
        surface: &mut dyn MapSurface,
        center: Position,
        zoom_level: f64,
        animated: bool,
    ) {
        self.state.zoom_to(zoom_level);

        let span = zoom_level_to_span(center, self.state.zoom_level, surface.bounds_size());
        log::debug!("Setting region around {center:?} spanning {span:?}.");
        surface.set_region(Region { center, span }, animated);

        // Changing pitch or heading stops a running animation.
        if !animated {
            let camera = surface.camera();
            surface.set_camera(
                Camera {
                    pitch: self.state.pitch,
                    heading: self.state.heading,
                    ..camera
                },
                false,
            );
        }
    }

    pub fn set_min_zoom_level(&mut self, surface: &mut dyn MapSurface, min_zoom_level: f64) {
        if self.state.set_min_zoom_level(min_zoom_level) {
            self.render(surface, false);
        }
    }

    pub fn set_max_zoom_level(&mut self, surface: &mut dyn MapSurface, max_zoom_level: f64) {
        if self.state.set_max_zoom_level(max_zoom_level) {
            self.render(surface, false);
        }
    }

    pub fn min_max_zoom_levels(&self) -> [f64; 2] {
        [self.state.min_zoom_level, self.state.max_zoom_level]
    }

    pub fn visible_region(surface: &dyn MapSurface) -> VisibleRegion {
        VisibleRegion::from_rect(surface.visible_rect())
    }

    /// Recalculate the zoom level from the region the surface actually shows, which might have
    /// been changed by gestures, and store it.
    pub fn resync(&mut self, surface: &dyn MapSurface) -> f64 {
        let width = surface.bounds_size().width;
        let zoom_level = region_to_zoom_level(surface.center(), surface.region().span, width);

        if zoom_level.is_finite() {
            self.state.set_zoom_level(zoom_level);
        } else {
            log::debug!("Cannot calculate zoom level of {width} px wide view, keeping the stored one.");
        }

        self.state.zoom_level
    }

    /// Current zoom level, as shown by the surface.
    pub fn zoom_level(&mut self, surface: &dyn MapSurface) -> f64 {
        self.resync(surface)
    }

    /// Adopt zoom level, pitch and heading of the surface after its region settled.
    pub fn resync_camera(&mut self, surface: &dyn MapSurface) {
        if surface.bounds_size().is_empty() {
            return;
        }

        self.resync(surface);

        let camera = surface.camera();
        self.state.set_pitch(camera.pitch);
        self.state.set_heading(camera.heading);
    }

    /// Position the camera again at the current center and zoom level.
    pub fn render(&self, surface: &mut dyn MapSurface, animated: bool) {
        let center = surface.center();
        self.render_at(surface, center, animated);
    }

    fn render_at(&self, surface: &mut dyn MapSurface, center: Position, animated: bool) {
        let altitude = zoom_level_to_altitude(center, self.state.zoom_level, surface.bounds_size());

        log::debug!(
            "Moving camera to {center:?} at zoom level {} (altitude {altitude:.1} m).",
            self.state.zoom_level
        );

        surface.set_camera(
            Camera {
                center,
                altitude,
                pitch: self.state.pitch,
                heading: self.state.heading,
            },
            animated,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        mercator::{latitude_to_pixel_y, longitude_to_pixel_x},
        position::{MapRect, Span, ViewSize},
        surface::testing::FakeSurface,
    };
    use approx::assert_abs_diff_eq;

    fn controller_at(zoom_level: f64) -> CameraController {
        let mut state = ZoomState::default();
        state.set_zoom_level(zoom_level);
        CameraController::new(state)
    }

    fn altitude_at(surface: &FakeSurface, zoom_level: f64) -> f64 {
        zoom_level_to_altitude(surface.center(), zoom_level, surface.bounds_size())
    }

    #[test]
    fn set_position_moves_the_camera() {
        let mut surface = FakeSurface::default();
        let mut controller = CameraController::default();

        controller.set_position(
            &mut surface,
            CameraPosition {
                target: Some(lat_lon(52.2297, 21.0122)),
                zoom: Some(12.),
                pitch: Some(30.),
                heading: Some(-90.),
            },
            true,
        );

        let (camera, animated) = surface.cameras[0];
        assert!(animated);
        assert_eq!(lat_lon(52.2297, 21.0122), camera.center);
        assert_eq!(30., camera.pitch);
        assert_eq!(270., camera.heading);
        assert_eq!(altitude_at(&surface, 12.), camera.altitude);
        assert_eq!(12., controller.state().zoom_level());
    }

    #[test]
    fn set_position_keeps_what_is_missing() {
        let mut surface = FakeSurface::default();
        let mut controller = controller_at(9.);
        let center = surface.camera.center;

        controller.set_position(&mut surface, CameraPosition::default(), false);

        let camera = surface.last_camera().unwrap();
        assert_eq!(center, camera.center);
        assert_eq!(9., controller.state().zoom_level());
        assert_eq!(altitude_at(&surface, 9.), camera.altitude);
    }

    #[test]
    fn set_position_clamps_out_of_range_values() {
        let mut surface = FakeSurface::default();
        let mut controller = controller_at(9.);

        controller.set_position(
            &mut surface,
            CameraPosition {
                zoom: Some(40.),
                pitch: Some(120.),
                ..Default::default()
            },
            false,
        );

        assert_eq!(21., controller.state().zoom_level());
        assert_eq!(90., controller.state().pitch());
    }

    #[test]
    fn zooming_out_from_2_snaps_to_0_when_minimum_allows() {
        let mut surface = FakeSurface::default();
        let mut controller = controller_at(2.);
        controller.set_min_zoom_level(&mut surface, 0.);

        controller.zoom_out(&mut surface, false);

        assert_eq!(0., controller.state().zoom_level());
        let (camera, animated) = surface.cameras[0];
        assert!(!animated);
        assert_eq!(altitude_at(&surface, 0.), camera.altitude);
    }

    #[test]
    fn panning_keeps_zoom_level_below_minimum() {
        let mut surface = FakeSurface::default();
        let mut controller = controller_at(3.);

        controller.zoom_out(&mut surface, false);
        assert_eq!(0., controller.state().zoom_level());

        controller.set_position(
            &mut surface,
            CameraPosition {
                target: Some(lat_lon(10., 10.)),
                ..Default::default()
            },
            true,
        );

        assert_eq!(0., controller.state().zoom_level());
        let camera = surface.last_camera().unwrap();
        assert_eq!(lat_lon(10., 10.), camera.center);
        assert_eq!(altitude_at(&surface, 0.), camera.altitude);
    }

    #[test]
    fn zooming_out_beyond_minimum_does_nothing() {
        let mut surface = FakeSurface::default();
        let mut controller = controller_at(2.);

        controller.zoom_out(&mut surface, false);

        assert_eq!(2., controller.state().zoom_level());
        assert!(surface.cameras.is_empty());
    }

    #[test]
    fn zooming_in_and_out() {
        let mut surface = FakeSurface::default();
        let mut controller = controller_at(14.);

        controller.zoom_in(&mut surface, true);
        assert_eq!(15., controller.state().zoom_level());
        assert_eq!(altitude_at(&surface, 15.), surface.last_camera().unwrap().altitude);

        controller.zoom_out(&mut surface, true);
        assert_eq!(14., controller.state().zoom_level());
        assert_eq!(altitude_at(&surface, 14.), surface.last_camera().unwrap().altitude);
    }

    #[test]
    fn zoom_to_clamps() {
        let mut surface = FakeSurface::default();
        let mut controller = controller_at(10.);

        controller.zoom_to(&mut surface, 25., false);
        assert_eq!(21., controller.state().zoom_level());

        controller.zoom_to(&mut surface, 1., false);
        assert_eq!(2., controller.state().zoom_level());

        // Both still move the camera.
        assert_eq!(2, surface.cameras.len());
    }

    #[test]
    fn zoom_level_follows_the_surface() {
        let mut surface = FakeSurface::default();
        let mut controller = controller_at(4.);

        // Somebody pinched the map. 10.365 is rounded up to 10.37.
        surface.region.span = zoom_level_to_span(surface.center(), 10.365, surface.size);

        assert_eq!(10.37, controller.zoom_level(&surface));
        assert_eq!(10.37, controller.state().zoom_level());

        controller.zoom_by(&mut surface, 1., false);
        assert_abs_diff_eq!(11.37, controller.state().zoom_level(), epsilon = 1e-9);
    }

    #[test]
    fn zoom_level_of_unlaid_view_is_the_stored_one() {
        let mut surface = FakeSurface {
            size: ViewSize::default(),
            ..Default::default()
        };
        let mut controller = controller_at(7.);
        surface.region.span = Span {
            latitude_delta: 1.,
            longitude_delta: 1.,
        };

        assert_eq!(7., controller.zoom_level(&surface));
    }

    #[test]
    fn lowering_maximum_moves_the_camera() {
        let mut surface = FakeSurface::default();
        let mut controller = controller_at(18.);

        controller.set_max_zoom_level(&mut surface, 15.);

        assert_eq!([2., 15.], controller.min_max_zoom_levels());
        assert_eq!(15., controller.state().zoom_level());
        assert_eq!(altitude_at(&surface, 15.), surface.last_camera().unwrap().altitude);

        // Raising it back is not observable.
        controller.set_max_zoom_level(&mut surface, 20.);
        assert_eq!(1, surface.cameras.len());
    }

    #[test]
    fn raising_minimum_moves_the_camera() {
        let mut surface = FakeSurface::default();
        let mut controller = controller_at(3.);

        controller.set_min_zoom_level(&mut surface, 6.);

        assert_eq!(6., controller.state().zoom_level());
        assert_eq!(1, surface.cameras.len());
    }

    #[test]
    fn set_region_uses_span_of_the_zoom_level() {
        let mut surface = FakeSurface::default();
        let mut controller = CameraController::default();
        let center = lat_lon(50.0614, 19.9366);

        controller.set_region(&mut surface, center, 11., false);

        let (region, animated) = surface.regions[0];
        assert!(!animated);
        assert_eq!(center, region.center);
        assert_eq!(zoom_level_to_span(center, 11., surface.size), region.span);

        // Pitch and heading are restored afterwards, but only when not animating.
        assert_eq!(1, surface.cameras.len());
        controller.set_region(&mut surface, center, 11., true);
        assert_eq!(1, surface.cameras.len());
    }

    #[test]
    fn visible_region_of_the_surface() {
        let surface = FakeSurface {
            visible_rect: MapRect {
                x: longitude_to_pixel_x(10.),
                y: latitude_to_pixel_y(50.),
                width: longitude_to_pixel_x(12.) - longitude_to_pixel_x(10.),
                height: latitude_to_pixel_y(49.) - latitude_to_pixel_y(50.),
            },
            ..Default::default()
        };

        let region = CameraController::visible_region(&surface);

        assert_abs_diff_eq!(50., region.northeast.y(), epsilon = 1e-5);
        assert_abs_diff_eq!(12., region.northeast.x(), epsilon = 1e-5);
        assert_abs_diff_eq!(49., region.southwest.y(), epsilon = 1e-5);
        assert_abs_diff_eq!(10., region.southwest.x(), epsilon = 1e-5);
    }

    #[test]
    fn resync_camera_adopts_pitch_and_heading() {
        let mut surface = FakeSurface::default();
        let mut controller = controller_at(3.);
        surface.region.span = zoom_level_to_span(surface.center(), 8., surface.size);
        surface.camera.pitch = 45.;
        surface.camera.heading = 120.;

        controller.resync_camera(&surface);

        assert_abs_diff_eq!(8., controller.state().zoom_level(), epsilon = 0.01 + 1e-9);
        assert_eq!(45., controller.state().pitch());
        assert_eq!(120., controller.state().heading());
    }

    #[test]
    fn parsing_camera_position() {
        let position: CameraPosition = serde_json::from_value(serde_json::json!({
            "target": [52.0, 21.0],
            "zoom": 11,
        }))
        .unwrap();

        assert_eq!(Some(lat_lon(52., 21.)), position.target);
        assert_eq!(Some(11.), position.zoom);
        assert_eq!(None, position.pitch);
        assert_eq!(None, position.heading);
    }
}
