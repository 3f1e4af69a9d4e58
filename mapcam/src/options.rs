//! Configuration sent by the host when creating and updating the view.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::camera::CameraPosition;

/// Arguments of the view creation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreationParams {
    #[serde(default)]
    pub initial_camera_position: CameraPosition,
    #[serde(default)]
    pub options: MapOptions,
}

/// Bounds of the zoom level. Missing values leave the current bound unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ZoomPreference {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// Map options as sent by the host. Only the zoom preference is interpreted by the engine, the
/// rest is up to the [`crate::MapSurface`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct MapOptions(Map<String, Value>);

impl MapOptions {
    pub fn new(options: Map<String, Value>) -> Self {
        Self(options)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// `minMaxZoomPreference: [min, max]`, where either might be `null`.
    pub fn zoom_preference(&self) -> ZoomPreference {
        let Some(Value::Array(preference)) = self.0.get("minMaxZoomPreference") else {
            return ZoomPreference::default();
        };

        ZoomPreference {
            min: preference.first().and_then(Value::as_f64),
            max: preference.get(1).and_then(Value::as_f64),
        }
    }

    /// Overwrite options present in `other`, keeping the rest.
    pub fn update(&mut self, other: MapOptions) {
        self.0.extend(other.0);
    }
}
