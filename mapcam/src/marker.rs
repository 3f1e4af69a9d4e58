use bytes::Bytes;

use crate::{position::Position, surface::Annotation};

#[derive(thiserror::Error, Debug)]
#[error("marker icon is not a valid image")]
pub struct InvalidIcon(#[source] image::ImageError);

/// Point on the map with an image. Markers are identified by their `id` only.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    id: String,
    icon: Bytes,
    icon_size: (u32, u32),
    position: Position,
}

impl Marker {
    /// Create a marker, making sure that `icon` can actually be displayed.
    pub fn new(id: impl Into<String>, icon: Bytes, position: Position) -> Result<Self, InvalidIcon> {
        let image = image::load_from_memory(&icon).map_err(InvalidIcon)?;
        Ok(Self {
            id: id.into(),
            icon,
            icon_size: (image.width(), image.height()),
            position,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn icon(&self) -> &Bytes {
        &self.icon
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub(crate) fn annotation(&self) -> Annotation {
        Annotation {
            marker_id: self.id.clone(),
            position: self.position,
            icon: self.icon.clone(),
            icon_size: self.icon_size,
            center_offset_y: -f64::from(self.icon_size.1) / 2.,
        }
    }
}
