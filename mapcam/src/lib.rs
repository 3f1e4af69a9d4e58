#![doc = include_str!("../README.md")]
#![deny(clippy::unwrap_used, rustdoc::broken_intra_doc_links)]

mod camera;
mod channel;
mod marker;
mod marker_store;
pub mod mercator;
mod options;
mod position;
mod surface;
mod view;
mod zoom;

pub use camera::{CameraController, CameraPosition, CameraUpdate};
pub use channel::{parse_camera_update, ChannelError};
pub use marker::{InvalidIcon, Marker};
pub use marker_store::MarkerStore;
pub use options::{CreationParams, MapOptions, ZoomPreference};
pub use position::{lat_lon, lon_lat, MapRect, Position, Region, Span, ViewSize, VisibleRegion};
pub use surface::{Annotation, AnnotationId, Camera, MapSurface};
pub use view::{MapView, ViewEvent};
pub use zoom::{InvalidZoom, ZoomState};
