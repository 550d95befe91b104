use mapmark::prelude::*;

fn records(store: &MarkerStore<impl KeyValueStore>) -> Vec<MarkerRecord> {
    store.iter().map(Marker::to_record).collect()
}

#[test]
fn test_validate_accepts_whole_range() -> anyhow::Result<()> {
    for lat in [-90.0, -45.25, 0.0, 12.345678, 90.0] {
        for lng in [-180.0, -0.5, 0.0, 118.0149, 180.0] {
            let coord = validate(&lat.to_string(), &lng.to_string())?;
            assert!((coord.lat() - lat).abs() < 1e-12);
            assert!((coord.lng() - lng).abs() < 1e-12);
        }
    }
    Ok(())
}

#[test]
fn test_validate_rejects_out_of_range() {
    let cases = [
        ("90.000001", "0", Axis::Latitude),
        ("-91", "0", Axis::Latitude),
        ("0", "180.5", Axis::Longitude),
        ("0", "-200", Axis::Longitude),
        ("100", "200", Axis::Latitude),
    ];
    for (lat, lng, expected) in cases {
        match validate(lat, lng) {
            Err(MapError::Range { axis, .. }) => assert_eq!(axis, expected, "{lat}, {lng}"),
            other => panic!("{lat}, {lng}: unexpected {other:?}"),
        }
    }
}

#[test]
fn test_dms_examples() {
    assert_eq!(to_dms(0.0, Axis::Latitude), "0° 0' 0.00\" N");
    assert_eq!(to_dms(-45.5, Axis::Latitude), "45° 30' 0.00\" S");

    let text = to_dms(118.0149, Axis::Longitude);
    assert!(text.starts_with("118° 0' "), "{text}");
    assert!(text.ends_with('E'), "{text}");
    assert_eq!(to_dms(-118.0149, Axis::Longitude).chars().last(), Some('W'));
}

#[test]
fn test_home_scenario() -> anyhow::Result<()> {
    let mut store = MarkerStore::new(MemoryStore::new());
    store.create("Home", "", LatLng::try_new(-2.5, 118.0)?)?;
    assert_eq!(store.list().len(), 1);

    store.remove(0)?;
    assert_eq!(store.list().len(), 0);
    assert_eq!(
        store.storage().get("savedMarkers")?.as_deref(),
        Some("[]")
    );
    Ok(())
}

#[test]
fn test_failed_operations_leave_store_unchanged() -> anyhow::Result<()> {
    let mut store = MarkerStore::new(MemoryStore::new());
    let position = LatLng::try_new(1.0, 2.0)?;

    assert!(matches!(
        store.create("", "", position),
        Err(MapError::InvalidInput(_))
    ));
    assert!(store.is_empty());

    store.create("A", "", position)?;
    assert!(matches!(
        store.remove(5),
        Err(MapError::IndexOutOfRange { index: 5, len: 1 })
    ));
    assert_eq!(store.len(), 1);
    Ok(())
}

#[test]
fn test_file_store_survives_restart() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;

    let before = {
        let mut store = MarkerStore::new(FileStore::open(dir.path())?);
        store.create("Monas", "National monument", LatLng::try_new(-6.1754, 106.8272)?)?;
        store.create("Kuta", "", LatLng::try_new(-8.7184, 115.1686)?)?;
        store.create("Kuta", "", LatLng::try_new(-8.7184, 115.1686)?)?;
        records(&store)
    };

    let raw = std::fs::read_to_string(dir.path().join("savedMarkers.json"))?;
    let json: serde_json::Value = serde_json::from_str(&raw)?;
    assert_eq!(json.as_array().map(Vec::len), Some(3));
    assert_eq!(json[0]["title"], "Monas");
    assert_eq!(json[0]["lat"], -6.1754);

    let mut reopened = MarkerStore::new(FileStore::open(dir.path())?);
    assert_eq!(reopened.load()?, 3);
    assert_eq!(records(&reopened), before);

    reopened.clear()?;
    let mut again = MarkerStore::new(FileStore::open(dir.path())?);
    assert_eq!(again.load()?, 0);
    Ok(())
}

#[test]
fn test_reads_document_written_by_widget() -> anyhow::Result<()> {
    // layout produced by the browser widget's own save routine
    let document = r#"[{"lat":-2.5489,"lng":118.0149,"title":"Centre","description":"Indonesia"}]"#;
    let storage = MemoryStore::new().with_entry("savedMarkers", document);

    let mut store = MarkerStore::new(storage);
    store.load()?;
    let marker = &store.list()[0];
    assert_eq!(marker.title(), "Centre");
    assert_eq!(marker.description(), "Indonesia");
    assert_eq!(marker.position().to_decimal_string(), "-2.548900, 118.014900");

    // and writes it back byte for byte
    store.save()?;
    assert_eq!(store.storage().get("savedMarkers")?.as_deref(), Some(document));
    Ok(())
}
