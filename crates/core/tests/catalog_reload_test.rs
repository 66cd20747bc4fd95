use staymap::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn write_dataset(json: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_open_dataset_with_source_columns() {
    let _ = env_logger::builder().is_test(true).try_init();

    let file = write_dataset(
        r#"[
            {
                "id": 11156,
                "listing_url": "https://www.airbnb.com/rooms/11156",
                "name": "An Oasis in the City",
                "neighborhood_overview": "Potts Point",
                "latitude": -33.86917,
                "longitude": 151.22656,
                "accommodates": 1,
                "review_scores_rating": 92,
                "price": 65.0,
                "calendar": {
                    "2019-01-15": {"available": true, "price": 70.0},
                    "2019-01-16": {"available": false}
                }
            },
            {"id": 12351, "latitude": -33.86515, "longitude": 151.1919}
        ]"#,
    );

    let catalog = Catalog::open(file.path(), Config::default()).unwrap();
    assert_eq!(catalog.len(), 2);

    let snapshot = catalog.snapshot();
    let oasis = snapshot.get(ListingId(11156)).unwrap();
    assert_eq!(oasis.neighborhood.as_deref(), Some("Potts Point"));
    assert_eq!(oasis.rating, Some(92.0));
    assert_eq!(oasis.calendar.len(), 2);
}

#[test]
fn test_reload_swaps_snapshot() {
    let first = write_dataset(r#"[{"id": 1, "latitude": 0.0, "longitude": 0.0}]"#);
    let catalog = CatalogBuilder::new().dataset(first.path()).build().unwrap();
    let before = catalog.snapshot();

    let second = write_dataset(
        r#"[
            {"id": 1, "latitude": 0.0, "longitude": 0.0, "review_scores_rating": 10},
            {"id": 2, "latitude": 0.0, "longitude": 0.001, "review_scores_rating": 20}
        ]"#,
    );
    catalog.reload(second.path()).unwrap();

    // Readers holding the old snapshot still see the old data.
    assert_eq!(before.len(), 1);
    assert_eq!(catalog.len(), 2);
    assert_eq!(
        catalog.nearest_higher(ListingId(1)).unwrap().listing.id,
        ListingId(2)
    );
}

#[test]
fn test_reload_rejects_invalid_dataset() {
    let first = write_dataset(r#"[{"id": 1, "latitude": 0.0, "longitude": 0.0}]"#);
    let catalog = CatalogBuilder::new().dataset(first.path()).build().unwrap();

    let bad = write_dataset(r#"[{"id": 1, "latitude": 95.0, "longitude": 0.0}]"#);
    assert!(catalog.reload(bad.path()).is_err());

    let duplicate = write_dataset(
        r#"[
            {"id": 3, "latitude": 0.0, "longitude": 0.0},
            {"id": 3, "latitude": 1.0, "longitude": 1.0}
        ]"#,
    );
    assert!(catalog.reload(duplicate.path()).is_err());

    assert_eq!(catalog.len(), 1);
}

#[test]
fn test_concurrent_readers_during_reload() {
    let dataset = write_dataset(
        r#"[
            {"id": 1, "latitude": 0.0, "longitude": 0.0, "review_scores_rating": 10},
            {"id": 2, "latitude": 0.0, "longitude": 0.001, "review_scores_rating": 20}
        ]"#,
    );
    let catalog = std::sync::Arc::new(Catalog::open(dataset.path(), Config::default()).unwrap());

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let catalog = std::sync::Arc::clone(&catalog);
            std::thread::spawn(move || {
                for _ in 0..200 {
                    let result = catalog.nearest_higher(ListingId(1)).unwrap();
                    assert_eq!(result.listing.id, ListingId(2));
                }
            })
        })
        .collect();

    for _ in 0..20 {
        catalog.reload(dataset.path()).unwrap();
    }

    for reader in readers {
        reader.join().unwrap();
    }
}
