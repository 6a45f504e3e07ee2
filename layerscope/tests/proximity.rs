use approx::assert_abs_diff_eq;
use assert_matches::assert_matches;
use layerscope::analysis::{compare_layers, compute_buffer};
use layerscope::feature::{FeatureCollection, FeatureId, FeatureKind};
use layerscope::layerscope_types::lonlat;
use layerscope::{AnalysisConfig, LayerError, LayerId, LayerStore};

const STATIONS: &str = r#"{
    "type": "FeatureCollection",
    "features": [
        {
            "type": "Feature",
            "geometry": { "type": "Point", "coordinates": [-74.0060, 40.7128] },
            "properties": { "id": 1, "name": "Station A" }
        }
    ]
}"#;

const SENSORS: &str = r#"{
    "type": "FeatureCollection",
    "features": [
        {
            "type": "Feature",
            "geometry": { "type": "Point", "coordinates": [-74.0065, 40.7130] },
            "properties": { "id": 2, "pm25": 12.5 }
        },
        {
            "type": "Feature",
            "geometry": { "type": "Point", "coordinates": [-73.9000, 40.8000] },
            "properties": { "id": 3 }
        }
    ]
}"#;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn collection(json: &str) -> FeatureCollection {
    FeatureCollection::from_slice(json.as_bytes()).expect("valid GeoJSON")
}

#[test]
fn nearby_points_of_two_layers_are_paired() {
    init_logger();

    let pairs = compare_layers(&collection(STATIONS), &collection(SENSORS), 200.0);

    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0].id_a, FeatureId::from(1_i64));
    assert_eq!(pairs[0].id_b, FeatureId::from(2_i64));
    assert_abs_diff_eq!(pairs[0].distance_m, 47.7, epsilon = 1.0);
}

#[test]
fn buffer_around_station() {
    init_logger();

    let result = compute_buffer(&lonlat!(-74.0060, 40.7128), 100.0, &collection(SENSORS));

    assert_eq!(result.points.len(), 1);
    assert_eq!(result.points[0].feature.id(), Some(FeatureId::from(2_i64)));
    assert_eq!(
        result.points[0]
            .feature
            .property("pm25")
            .and_then(|v| v.as_f64()),
        Some(12.5)
    );
}

#[test]
fn store_workflow() {
    init_logger();

    let mut store = LayerStore::new(AnalysisConfig::default().with_buffer_radius(100.0));
    let stations = LayerId::from("trans_gbfs");
    let sensors = LayerId::from("env_airquality");

    store.insert(layerscope::Layer::persisted(
        stations.clone(),
        "Stations",
        collection(STATIONS),
    ));
    assert_matches!(
        store.compare(&stations, &sensors, None),
        Err(LayerError::NotEnoughLayers { available: 1 })
    );

    store.insert(layerscope::Layer::persisted(
        sensors.clone(),
        "Air quality",
        collection(SENSORS),
    ));

    let pairs = store
        .compare(&stations, &sensors, None)
        .expect("both layers are loaded");
    assert_eq!(pairs.len(), 1);

    let overlay = store
        .get(&LayerId::from("comparison_trans_gbfs_env_airquality"))
        .expect("comparison overlay is added");
    assert_eq!(overlay.features().len(), 1);
    assert_eq!(overlay.features()[0].kind(), Some(FeatureKind::Comparison));

    let buffers = store
        .buffer(&lonlat!(-74.0060, 40.7128), None)
        .expect("layers are active");
    assert_eq!(buffers.len(), 2);
    assert!(store.contains(&LayerId::from("trans_gbfs_buffer")));
    assert!(store.contains(&LayerId::from("env_airquality_buffer")));

    store.remove(&sensors);
    assert!(!store.contains(&LayerId::from("env_airquality_buffer")));
    assert!(!store.contains(&LayerId::from("comparison_trans_gbfs_env_airquality")));
    assert!(store.contains(&LayerId::from("trans_gbfs_buffer")));
}
