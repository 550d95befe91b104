//! Ordered marker collection mirrored into a key-value store
//!
//! Every mutating call rewrites the whole persisted document before it
//! returns. If that write fails the in-memory change is undone, so the list
//! and its persisted form never disagree after a call completes.

use crate::{
    core::{constants::MARKER_STORAGE_KEY, geo::LatLng},
    layers::marker::{Marker, MarkerId, MarkerRecord},
    storage::KeyValueStore,
    MapError, Result,
};

#[cfg(feature = "debug")]
use log::{debug, warn};

pub struct MarkerStore<S: KeyValueStore> {
    storage: S,
    key: String,
    markers: Vec<Marker>,
    next_id: u64,
}

impl<S: KeyValueStore> MarkerStore<S> {
    /// Empty store persisting under the default `savedMarkers` key
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, MARKER_STORAGE_KEY)
    }

    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            markers: Vec::new(),
            next_id: 0,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Snapshot of the current markers in display order
    pub fn list(&self) -> Vec<Marker> {
        self.markers.clone()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Marker> {
        self.markers.iter()
    }

    pub fn get(&self, id: MarkerId) -> Option<&Marker> {
        self.markers.iter().find(|m| m.id() == id)
    }

    /// Current position of a marker in the list
    pub fn index_of(&self, id: MarkerId) -> Option<usize> {
        self.markers.iter().position(|m| m.id() == id)
    }

    /// Appends a marker and persists.
    ///
    /// Title and description are trimmed; a title that is empty after
    /// trimming is rejected with [`MapError::InvalidInput`].
    pub fn create(&mut self, title: &str, description: &str, position: LatLng) -> Result<Marker> {
        let title = title.trim();
        if title.is_empty() {
            return Err(MapError::InvalidInput(
                "marker title must not be empty".to_string(),
            ));
        }

        let marker = Marker::new(
            self.allocate_id(),
            title.to_string(),
            description.trim().to_string(),
            position,
        );
        self.markers.push(marker.clone());

        if let Err(e) = self.save() {
            self.markers.pop();
            return Err(e);
        }

        #[cfg(feature = "debug")]
        debug!("created marker {} {}", marker.id(), marker);

        Ok(marker)
    }

    /// Removes the marker at `index`, shifting later markers down by one
    pub fn remove(&mut self, index: usize) -> Result<Marker> {
        if index >= self.markers.len() {
            return Err(MapError::IndexOutOfRange {
                index,
                len: self.markers.len(),
            });
        }

        let removed = self.markers.remove(index);
        if let Err(e) = self.save() {
            self.markers.insert(index, removed);
            return Err(e);
        }

        #[cfg(feature = "debug")]
        debug!("removed marker {} at index {}", removed.id(), index);

        Ok(removed)
    }

    /// Removes a marker by its stable id
    pub fn remove_by_id(&mut self, id: MarkerId) -> Result<Marker> {
        let index = self.index_of(id).ok_or(MapError::UnknownMarker(id))?;
        self.remove(index)
    }

    /// Drops every marker and persists an empty list
    pub fn clear(&mut self) -> Result<()> {
        let previous = std::mem::take(&mut self.markers);
        if let Err(e) = self.save() {
            self.markers = previous;
            return Err(e);
        }

        #[cfg(feature = "debug")]
        debug!("cleared {} markers", previous.len());

        Ok(())
    }

    /// Writes the whole list as a JSON array of `{lat, lng, title, description}`
    pub fn save(&mut self) -> Result<()> {
        let records: Vec<MarkerRecord> = self.markers.iter().map(MarkerRecord::from).collect();
        let document = serde_json::to_string(&records)?;
        self.storage.set(&self.key, &document)?;

        #[cfg(feature = "debug")]
        debug!("persisted {} markers under {:?}", records.len(), self.key);

        Ok(())
    }

    /// Replaces the list with the persisted one.
    ///
    /// An absent key means no markers. A document that is not an array of
    /// valid marker records fails with [`MapError::CorruptState`] and leaves
    /// the current list untouched. Titles and descriptions are kept exactly
    /// as persisted. Returns the number of markers loaded.
    pub fn load(&mut self) -> Result<usize> {
        let Some(document) = self.storage.get(&self.key)? else {
            self.markers.clear();
            return Ok(0);
        };

        let records: Vec<MarkerRecord> = serde_json::from_str(&document)
            .map_err(|e| MapError::CorruptState(format!("{} is not a marker list: {}", self.key, e)))?;

        let mut entries = Vec::with_capacity(records.len());
        for (index, record) in records.into_iter().enumerate() {
            let position = LatLng::try_new(record.lat, record.lng)
                .map_err(|e| MapError::CorruptState(format!("entry {}: {}", index, e)))?;
            if record.title.trim().is_empty() {
                return Err(MapError::CorruptState(format!(
                    "entry {}: empty title",
                    index
                )));
            }
            entries.push((record.title, record.description, position));
        }

        let mut markers = Vec::with_capacity(entries.len());
        for (title, description, position) in entries {
            markers.push(Marker::new(self.allocate_id(), title, description, position));
        }
        self.markers = markers;

        #[cfg(feature = "debug")]
        debug!("loaded {} markers from {:?}", self.markers.len(), self.key);

        Ok(self.markers.len())
    }

    /// Startup variant of [`load`](Self::load): corrupt state is logged and
    /// the store starts out empty instead of failing
    pub fn load_or_empty(&mut self) -> usize {
        match self.load() {
            Ok(count) => count,
            Err(e) => {
                #[cfg(feature = "debug")]
                warn!("Error loading saved markers: {}", e);
                #[cfg(not(feature = "debug"))]
                let _ = e;

                self.markers.clear();
                0
            }
        }
    }

    fn allocate_id(&mut self) -> MarkerId {
        let id = MarkerId::new(self.next_id);
        self.next_id += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory::MemoryStore;

    fn coord(lat: f64, lng: f64) -> LatLng {
        LatLng::try_new(lat, lng).unwrap()
    }

    fn persisted(store: &MarkerStore<MemoryStore>) -> Option<String> {
        store.storage().get(MARKER_STORAGE_KEY).unwrap()
    }

    /// Store whose writes can be switched off
    #[derive(Default)]
    struct FlakyStore {
        inner: MemoryStore,
        fail_writes: bool,
    }

    impl KeyValueStore for FlakyStore {
        fn get(&self, key: &str) -> Result<Option<String>> {
            self.inner.get(key)
        }

        fn set(&mut self, key: &str, value: &str) -> Result<()> {
            if self.fail_writes {
                return Err(MapError::Storage("quota exceeded".to_string()));
            }
            self.inner.set(key, value)
        }

        fn remove(&mut self, key: &str) -> Result<()> {
            self.inner.remove(key)
        }
    }

    #[test]
    fn test_create_appends_and_persists() {
        let mut store = MarkerStore::new(MemoryStore::new());
        let marker = store.create("  Home ", " base ", coord(-2.5, 118.0)).unwrap();

        assert_eq!(marker.title(), "Home");
        assert_eq!(marker.description(), "base");
        assert_eq!(store.len(), 1);
        assert_eq!(
            persisted(&store).as_deref(),
            Some(r#"[{"lat":-2.5,"lng":118.0,"title":"Home","description":"base"}]"#)
        );
    }

    #[test]
    fn test_create_rejects_blank_title() {
        let mut store = MarkerStore::new(MemoryStore::new());
        assert!(matches!(
            store.create("", "", coord(0.0, 0.0)),
            Err(MapError::InvalidInput(_))
        ));
        assert!(matches!(
            store.create("   ", "desc", coord(0.0, 0.0)),
            Err(MapError::InvalidInput(_))
        ));
        assert!(store.is_empty());
        assert_eq!(persisted(&store), None);
    }

    #[test]
    fn test_duplicates_allowed_and_ids_unique() {
        let mut store = MarkerStore::new(MemoryStore::new());
        let a = store.create("Same", "", coord(1.0, 1.0)).unwrap();
        let b = store.create("Same", "", coord(1.0, 1.0)).unwrap();
        assert_eq!(store.len(), 2);
        assert_ne!(a.id(), b.id());
        assert_eq!(a.to_record(), b.to_record());
    }

    #[test]
    fn test_remove_compacts() {
        let mut store = MarkerStore::new(MemoryStore::new());
        let a = store.create("A", "", coord(1.0, 1.0)).unwrap();
        let b = store.create("B", "", coord(2.0, 2.0)).unwrap();
        let c = store.create("C", "", coord(3.0, 3.0)).unwrap();

        let removed = store.remove(0).unwrap();
        assert_eq!(removed.id(), a.id());
        assert_eq!(store.index_of(b.id()), Some(0));
        assert_eq!(store.index_of(c.id()), Some(1));

        let titles: Vec<_> = store.iter().map(|m| m.title().to_string()).collect();
        assert_eq!(titles, ["B", "C"]);
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut store = MarkerStore::new(MemoryStore::new());
        store.create("A", "", coord(1.0, 1.0)).unwrap();
        let before = persisted(&store);

        match store.remove(1) {
            Err(MapError::IndexOutOfRange { index, len }) => {
                assert_eq!(index, 1);
                assert_eq!(len, 1);
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(store.len(), 1);
        assert_eq!(persisted(&store), before);
    }

    #[test]
    fn test_remove_by_id_survives_earlier_removal() {
        let mut store = MarkerStore::new(MemoryStore::new());
        let a = store.create("A", "", coord(1.0, 1.0)).unwrap();
        let b = store.create("B", "", coord(2.0, 2.0)).unwrap();

        store.remove_by_id(a.id()).unwrap();
        let removed = store.remove_by_id(b.id()).unwrap();
        assert_eq!(removed.title(), "B");
        assert!(store.is_empty());

        assert!(matches!(
            store.remove_by_id(a.id()),
            Err(MapError::UnknownMarker(id)) if id == a.id()
        ));
    }

    #[test]
    fn test_clear_persists_empty_array() {
        let mut store = MarkerStore::new(MemoryStore::new());
        store.create("A", "", coord(1.0, 1.0)).unwrap();
        store.create("B", "", coord(2.0, 2.0)).unwrap();

        store.clear().unwrap();
        assert!(store.is_empty());
        assert_eq!(persisted(&store).as_deref(), Some("[]"));

        let mut fresh = MarkerStore::new(store.into_storage());
        assert_eq!(fresh.load().unwrap(), 0);
        assert!(fresh.is_empty());
    }

    #[test]
    fn test_save_load_round_trip() {
        let mut store = MarkerStore::new(MemoryStore::new());
        store.create("Home", "", coord(-2.5, 118.0)).unwrap();
        store.create("Work", "office", coord(51.507351, -0.127758)).unwrap();
        store.create("Pole", "", coord(90.0, -180.0)).unwrap();
        let before: Vec<MarkerRecord> = store.iter().map(Marker::to_record).collect();

        let mut fresh = MarkerStore::new(store.into_storage());
        assert_eq!(fresh.load().unwrap(), 3);
        let after: Vec<MarkerRecord> = fresh.iter().map(Marker::to_record).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_round_trip_keeps_full_precision() {
        let mut store = MarkerStore::new(MemoryStore::new());
        let points = [
            (22.26, 127.03465148502943),
            (-6.175392014852194, 106.82715095326304),
            (0.1 + 0.2, -179.99999999999997),
            (89.99999999999999, 1e-300),
        ];
        for (lat, lng) in points {
            store.create("P", "", coord(lat, lng)).unwrap();
        }

        let mut fresh = MarkerStore::new(store.into_storage());
        fresh.load().unwrap();
        let restored: Vec<(f64, f64)> = fresh
            .iter()
            .map(|m| (m.position().lat(), m.position().lng()))
            .collect();
        assert_eq!(restored, points);
    }

    #[test]
    fn test_load_keeps_titles_verbatim() {
        let document = r#"[{"lat":1.0,"lng":2.0,"title":" Home ","description":" base "}]"#;
        let storage = MemoryStore::new().with_entry(MARKER_STORAGE_KEY, document);
        let mut store = MarkerStore::new(storage);

        assert_eq!(store.load().unwrap(), 1);
        assert_eq!(store.list()[0].title(), " Home ");
        assert_eq!(store.list()[0].description(), " base ");

        store.save().unwrap();
        assert_eq!(persisted(&store).as_deref(), Some(document));
    }

    #[test]
    fn test_load_absent_key_is_empty() {
        let mut store = MarkerStore::new(MemoryStore::new());
        assert_eq!(store.load().unwrap(), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn test_load_tolerates_missing_description() {
        let storage = MemoryStore::new()
            .with_entry(MARKER_STORAGE_KEY, r#"[{"lat": 1.5, "lng": 2.5, "title": "Old"}]"#);
        let mut store = MarkerStore::new(storage);
        assert_eq!(store.load().unwrap(), 1);
        assert_eq!(store.list()[0].description(), "");
    }

    #[test]
    fn test_load_corrupt_state_leaves_list_untouched() {
        for document in [
            "not json",
            r#"{"lat": 1, "lng": 2}"#,
            r#"[{"lat": "x", "lng": 2, "title": "T"}]"#,
            r#"[{"lat": 95, "lng": 2, "title": "T"}]"#,
            r#"[{"lat": 1, "lng": 2, "title": "  "}]"#,
        ] {
            let mut store = MarkerStore::new(MemoryStore::new());
            store.create("Existing", "", coord(0.0, 0.0)).unwrap();
            store.storage.set(MARKER_STORAGE_KEY, document).unwrap();

            assert!(
                matches!(store.load(), Err(MapError::CorruptState(_))),
                "{}",
                document
            );
            assert_eq!(store.len(), 1);
            assert_eq!(store.list()[0].title(), "Existing");
        }
    }

    #[test]
    fn test_load_or_empty_recovers() {
        let storage = MemoryStore::new().with_entry(MARKER_STORAGE_KEY, "{broken");
        let mut store = MarkerStore::new(storage);
        assert_eq!(store.load_or_empty(), 0);
        assert!(store.is_empty());

        // the store stays usable and overwrites the broken document
        store.create("New", "", coord(1.0, 1.0)).unwrap();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_failed_write_rolls_back() {
        let mut store = MarkerStore::new(FlakyStore::default());
        store.create("A", "", coord(1.0, 1.0)).unwrap();
        store.create("B", "", coord(2.0, 2.0)).unwrap();
        store.storage.fail_writes = true;

        assert!(matches!(store.create("C", "", coord(3.0, 3.0)), Err(MapError::Storage(_))));
        assert_eq!(store.len(), 2);

        assert!(store.remove(0).is_err());
        assert_eq!(store.list()[0].title(), "A");

        assert!(store.clear().is_err());
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_custom_key() {
        let mut store = MarkerStore::with_key(MemoryStore::new(), "pins");
        store.create("A", "", coord(1.0, 1.0)).unwrap();
        assert_eq!(store.key(), "pins");
        assert!(store.storage().get("pins").unwrap().is_some());
        assert!(store.storage().get(MARKER_STORAGE_KEY).unwrap().is_none());
    }
}
