use std::collections::{hash_map::Entry, HashMap};

use crate::{
    marker::Marker,
    surface::{AnnotationId, MapSurface},
};

/// Markers currently displayed by the [`MapSurface`], keyed by their ids.
///
/// Every tracked id has exactly one annotation on the surface.
#[derive(Debug, Default)]
pub struct MarkerStore {
    markers: HashMap<String, AnnotationId>,
}

impl MarkerStore {
    /// Display markers whose ids are not displayed yet. Markers with known ids are skipped, even if
    /// their icon or position differ. Use [`MarkerStore::replace`] or remove them first to change
    /// them.
    pub fn add(&mut self, surface: &mut dyn MapSurface, markers: impl IntoIterator<Item = Marker>) {
        for marker in markers {
            match self.markers.entry(marker.id().to_owned()) {
                Entry::Vacant(entry) => {
                    log::trace!("Adding marker '{}'.", marker.id());
                    entry.insert(surface.add_annotation(marker.annotation()));
                }
                Entry::Occupied(_) => {
                    log::trace!("Marker '{}' is already displayed.", marker.id());
                }
            }
        }
    }

    /// Remove markers with given ids. Unknown ids are ignored.
    pub fn remove<I>(&mut self, surface: &mut dyn MapSurface, ids: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for id in ids {
            if let Some(annotation) = self.markers.remove(id.as_ref()) {
                log::trace!("Removing marker '{}'.", id.as_ref());
                surface.remove_annotation(annotation);
            }
        }
    }

    /// Remove everything, then add `markers`. Markers which were displayed before get new
    /// annotations.
    pub fn replace(
        &mut self,
        surface: &mut dyn MapSurface,
        markers: impl IntoIterator<Item = Marker>,
    ) {
        self.clear(surface);
        self.add(surface, markers);
    }

    /// Remove all annotations from the surface, including the ones which were not added through
    /// this store.
    pub fn clear(&mut self, surface: &mut dyn MapSurface) {
        let annotations = surface.annotations();
        log::trace!(
            "Clearing {} markers, {} annotations.",
            self.markers.len(),
            annotations.len()
        );

        for annotation in annotations {
            surface.remove_annotation(annotation);
        }
        self.markers.clear();
    }

    pub fn contains(&self, id: &str) -> bool {
        self.markers.contains_key(id)
    }

    /// Annotation displaying the marker.
    pub fn annotation(&self, id: &str) -> Option<AnnotationId> {
        self.markers.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}
