//! Method calls exchanged with the host application.
//!
//! Arguments and results are JSON-like values. Malformed arguments of known methods are ignored
//! (and logged), the host still gets a successful result. Only unknown methods fail.

use bytes::Bytes;
use serde_json::{json, Value};

use crate::{
    camera::{CameraPosition, CameraUpdate},
    marker::Marker,
    options::MapOptions,
    position::{lat_lon, Position},
    surface::MapSurface,
    view::{MapView, ViewEvent},
};

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ChannelError {
    #[error("method '{0}' is not implemented")]
    NotImplemented(String),
}

impl ViewEvent {
    /// Name of the method invoked on the host.
    pub fn method(&self) -> &'static str {
        match self {
            Self::CameraIdle => "camera#onIdle",
            Self::CameraMoveStarted => "camera#onMoveStarted",
        }
    }
}

impl<S: MapSurface> MapView<S> {
    /// Handle a method call of the host.
    pub fn handle_method_call(
        &mut self,
        method: &str,
        arguments: &Value,
    ) -> Result<Value, ChannelError> {
        log::trace!("Method call '{method}'.");

        match method {
            "map#update" => {
                match arguments.get("options").and_then(Value::as_object) {
                    Some(options) => self.update_options(MapOptions::new(options.clone())),
                    None => log::warn!("'{method}' without options: {arguments}."),
                }
                Ok(Value::Null)
            }
            "camera#animate" => {
                self.handle_camera_update(arguments, true);
                Ok(Value::Null)
            }
            "camera#move" => {
                self.handle_camera_update(arguments, false);
                Ok(Value::Null)
            }
            "markers#add" => {
                self.add_markers(parse_markers(arguments));
                Ok(Value::Null)
            }
            "markers#replace" => {
                self.replace_markers(parse_markers(arguments));
                Ok(Value::Null)
            }
            "markers#remove" => {
                let ids = list(arguments).iter().filter_map(Value::as_str);
                self.remove_markers(ids);
                Ok(Value::Null)
            }
            "markers#clear" => {
                self.clear_markers();
                Ok(Value::Null)
            }
            "map#getVisibleRegion" => {
                let region = self.visible_region();
                Ok(json!({
                    "northeast": to_lat_lon(region.northeast),
                    "southwest": to_lat_lon(region.southwest),
                }))
            }
            "camera#getZoomLevel" => Ok(json!(self.zoom_level())),
            "map#getMinMaxZoomLevels" => Ok(json!(self.min_max_zoom_levels())),
            _ => Err(ChannelError::NotImplemented(method.to_owned())),
        }
    }

    fn handle_camera_update(&mut self, arguments: &Value, animated: bool) {
        let update = list(&arguments["cameraUpdate"]);
        match parse_camera_update(update) {
            Some(update) => self.update_camera(update, animated),
            None => log::warn!("Ignoring unsupported camera update: {update:?}."),
        }
    }
}

fn list(value: &Value) -> &[Value] {
    value.as_array().map(Vec::as_slice).unwrap_or_default()
}

fn to_lat_lon(position: Position) -> [f64; 2] {
    [position.y(), position.x()]
}

fn parse_lat_lon(value: &Value) -> Option<Position> {
    match list(value) {
        [lat, lon] => Some(lat_lon(lat.as_f64()?, lon.as_f64()?)),
        _ => None,
    }
}

/// Parse `[opcode, arguments...]`.
pub fn parse_camera_update(update: &[Value]) -> Option<CameraUpdate> {
    let (opcode, arguments) = update.split_first()?;

    match opcode.as_str()? {
        "newCameraPosition" => {
            let position = serde_json::from_value(arguments.first()?.clone()).ok()?;
            Some(CameraUpdate::SetPosition(position))
        }
        "newLatLng" => Some(CameraUpdate::SetPosition(CameraPosition {
            target: Some(parse_lat_lon(arguments.first()?)?),
            ..Default::default()
        })),
        "newLatLngZoom" => Some(CameraUpdate::SetPosition(CameraPosition {
            target: Some(parse_lat_lon(arguments.first()?)?),
            zoom: Some(arguments.get(1).and_then(Value::as_f64).unwrap_or(0.)),
            ..Default::default()
        })),
        "zoomBy" => Some(CameraUpdate::ZoomBy(arguments.first()?.as_f64()?)),
        "zoomTo" => Some(CameraUpdate::ZoomTo(arguments.first()?.as_f64()?)),
        "zoomIn" => Some(CameraUpdate::ZoomIn),
        "zoomOut" => Some(CameraUpdate::ZoomOut),
        _ => None,
    }
}

/// Parse list of `[id, icon, [lat, lon]]`, skipping the ones which do not parse.
fn parse_markers(arguments: &Value) -> Vec<Marker> {
    list(arguments)
        .iter()
        .filter_map(|marker| {
            let parsed = parse_marker(marker);
            if parsed.is_none() {
                log::warn!("Ignoring malformed marker.");
            }
            parsed
        })
        .collect()
}

fn parse_marker(marker: &Value) -> Option<Marker> {
    let [id, icon, position] = list(marker) else {
        return None;
    };

    let icon: Vec<u8> = serde_json::from_value(icon.clone()).ok()?;
    let position = parse_lat_lon(position)?;

    Marker::new(id.as_str()?, Bytes::from(icon), position)
        .inspect_err(|err| log::warn!("Marker '{id}': {err}."))
        .ok()
}
