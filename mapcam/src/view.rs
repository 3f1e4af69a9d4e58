use crate::{
    camera::{CameraController, CameraUpdate},
    marker::Marker,
    marker_store::MarkerStore,
    options::{CreationParams, MapOptions},
    position::{ViewSize, VisibleRegion},
    surface::MapSurface,
};

/// Events of the view the host is interested in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewEvent {
    /// Region of the map settled.
    CameraIdle,
    /// Region of the map started to change.
    CameraMoveStarted,
}

/// Single map view: its surface, camera and markers.
pub struct MapView<S> {
    surface: S,
    camera: CameraController,
    markers: MarkerStore,
    options: MapOptions,
    /// Bounds of the last layout pass.
    laid_out: Option<ViewSize>,
}

impl<S: MapSurface> MapView<S> {
    pub fn new(surface: S, params: CreationParams) -> Self {
        let mut view = Self {
            surface,
            camera: CameraController::default(),
            markers: MarkerStore::default(),
            options: MapOptions::default(),
            laid_out: None,
        };

        view.update_options(params.options);
        view.camera
            .set_position(&mut view.surface, params.initial_camera_position, false);
        view
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn camera(&self) -> &CameraController {
        &self.camera
    }

    pub fn markers(&self) -> &MarkerStore {
        &self.markers
    }

    pub fn options(&self) -> &MapOptions {
        &self.options
    }

    /// Apply options which changed. Options not mentioned keep their values.
    pub fn update_options(&mut self, options: MapOptions) {
        self.interpret_options(&options);
        self.options.update(options);
    }

    fn interpret_options(&mut self, options: &MapOptions) {
        self.surface.apply_options(options.as_map());

        let preference = options.zoom_preference();
        if let Some(min) = preference.min {
            self.camera.set_min_zoom_level(&mut self.surface, min);
        }
        if let Some(max) = preference.max {
            self.camera.set_max_zoom_level(&mut self.surface, max);
        }
    }

    pub fn update_camera(&mut self, update: CameraUpdate, animated: bool) {
        self.camera.apply(&mut self.surface, update, animated);
    }

    pub fn add_markers(&mut self, markers: impl IntoIterator<Item = Marker>) {
        self.markers.add(&mut self.surface, markers);
    }

    pub fn replace_markers(&mut self, markers: impl IntoIterator<Item = Marker>) {
        self.markers.replace(&mut self.surface, markers);
    }

    pub fn remove_markers<I>(&mut self, ids: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.markers.remove(&mut self.surface, ids);
    }

    pub fn clear_markers(&mut self) {
        self.markers.clear(&mut self.surface);
    }

    pub fn visible_region(&self) -> VisibleRegion {
        CameraController::visible_region(&self.surface)
    }

    /// Zoom level of what the surface shows right now. The stored zoom level is updated as well.
    pub fn zoom_level(&mut self) -> f64 {
        self.camera.zoom_level(&self.surface)
    }

    pub fn min_max_zoom_levels(&self) -> [f64; 2] {
        self.camera.min_max_zoom_levels()
    }

    /// To be called by the surface whenever its layout changes. Zoom level is expressed in terms
    /// of the view's size, so when it changes, the camera has to be positioned again.
    pub fn layout(&mut self) {
        let size = self.surface.bounds_size();
        if self.laid_out == Some(size) {
            return;
        }
        self.laid_out = Some(size);

        if size.is_empty() {
            log::trace!("View has no size yet, not positioning the camera.");
            return;
        }

        log::debug!("View resized to {}x{}.", size.width, size.height);
        let options = self.options.clone();
        self.interpret_options(&options);
        self.camera.render(&mut self.surface, false);
    }

    /// To be called by the surface when its region is about to change.
    pub fn region_will_change(&self) -> ViewEvent {
        ViewEvent::CameraMoveStarted
    }

    /// To be called by the surface when its region has changed.
    pub fn region_did_change(&mut self) -> ViewEvent {
        self.camera.resync_camera(&self.surface);
        ViewEvent::CameraIdle
    }
}
