//! End-to-end prediction flow: artifact on disk -> load -> predict -> estimate.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::json;
use tempfile::TempDir;

use ev_price_predictor::model::PricePipeline;
use ev_price_predictor::pricing::{self, Tier};
use ev_price_predictor::types::{
    BodyStyle, Brand, PlugType, PowerTrain, RapidCharge, Segment, VehicleSpec,
};

/// Artifact with identity scalers and all-zero weights: every valid record
/// scores exactly `intercept`.
fn stub_artifact(intercept: f64) -> serde_json::Value {
    let numeric = |name: &str| json!({"kind": "numeric", "name": name, "center": 0.0, "scale": 1.0});
    let categorical = |name: &str, options: Vec<&str>| {
        json!({"kind": "categorical", "name": name, "categories": options})
    };
    let columns = vec![
        numeric("AccelSec"),
        numeric("Range_Km"),
        numeric("Efficiency_WhKm"),
        numeric("FastCharge_KmH"),
        categorical("Brand", Brand::ALL.iter().map(|v| v.as_str()).collect()),
        categorical("RapidCharge", RapidCharge::ALL.iter().map(|v| v.as_str()).collect()),
        categorical("PowerTrain", PowerTrain::ALL.iter().map(|v| v.as_str()).collect()),
        categorical("PlugType", PlugType::ALL.iter().map(|v| v.as_str()).collect()),
        categorical("BodyStyle", BodyStyle::ALL.iter().map(|v| v.as_str()).collect()),
        categorical("Segment", Segment::ALL.iter().map(|v| v.as_str()).collect()),
    ];
    let width = 4 + 29 + 2 + 3 + 4 + 9 + 8;
    json!({
        "version": "stub",
        "target_transform": "log1p",
        "columns": columns,
        "coefficients": vec![0.0; width],
        "intercept": intercept,
    })
}

fn write_artifact(dir: &TempDir, artifact: &serde_json::Value) -> PathBuf {
    let path = dir.path().join("pipeline.json");
    fs::write(&path, serde_json::to_string_pretty(artifact).unwrap()).unwrap();
    path
}

fn scenario_spec() -> VehicleSpec {
    VehicleSpec {
        accel_sec: 7.0,
        range_km: 400,
        efficiency_whkm: 170,
        fast_charge_kmh: 400,
        brand: Brand::Tesla,
        rapid_charge: RapidCharge::Yes,
        power_train: PowerTrain::AWD,
        plug_type: PlugType::Type2Ccs,
        body_style: BodyStyle::SUV,
        segment: Segment::D,
    }
}

#[test]
fn scenario_intercept_11_rounds_to_59_900_mid_range() {
    let dir = TempDir::new().unwrap();
    let path = write_artifact(&dir, &stub_artifact(11.0));
    let pipeline = PricePipeline::load(&path).unwrap();

    let y = pipeline.predict(&scenario_spec()).unwrap();
    assert_eq!(y, 11.0);

    let est = pricing::estimate(y);
    assert!((est.raw_eur - 59_873.14).abs() < 0.01);
    assert_eq!(est.rounded_eur, 59_900.0);
    assert_eq!(est.tier, Tier::MidRange);
    assert_eq!(pricing::format_eur(est.rounded_eur), "59,900 \u{20ac}");
}

#[test]
fn deeply_negative_output_displays_as_zero() {
    let dir = TempDir::new().unwrap();
    let path = write_artifact(&dir, &stub_artifact(-2.0));
    let pipeline = PricePipeline::load(&path).unwrap();

    let est = pricing::estimate(pipeline.predict(&scenario_spec()).unwrap());
    assert_eq!(est.rounded_eur, 0.0);
    assert_eq!(est.tier, Tier::Budget);
}

#[test]
fn widget_order_does_not_affect_the_pipeline_row() {
    // JSON object key order is not the column order; the typed record always
    // assembles the canonical row.
    let shuffled: VehicleSpec = serde_json::from_value(json!({
        "Segment": "D",
        "Brand": "Tesla",
        "FastCharge_KmH": 400,
        "RapidCharge": "Yes",
        "AccelSec": 7.0,
        "BodyStyle": "SUV",
        "Efficiency_WhKm": 170,
        "PlugType": "Type 2 CCS",
        "Range_Km": 400,
        "PowerTrain": "AWD"
    }))
    .unwrap();

    let dir = TempDir::new().unwrap();
    let path = write_artifact(&dir, &stub_artifact(11.0));
    let pipeline = PricePipeline::load(&path).unwrap();
    assert_eq!(
        pipeline.predict(&shuffled).unwrap(),
        pipeline.predict(&scenario_spec()).unwrap()
    );
}

#[test]
fn missing_artifact_blocks_startup_path() {
    let dir = TempDir::new().unwrap();
    let err = PricePipeline::load(&dir.path().join("absent.json")).unwrap_err();
    assert!(err.to_string().contains("failed to read model artifact"));
}

#[test]
fn truncated_artifact_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("pipeline.json");
    let full = serde_json::to_string(&stub_artifact(11.0)).unwrap();
    fs::write(&path, &full[..full.len() / 2]).unwrap();
    let err = PricePipeline::load(&path).unwrap_err();
    assert!(err.to_string().contains("failed to parse model artifact"));
}

#[test]
fn shipped_artifact_loads_and_scores_the_defaults() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("model/ev_full_pipeline.json");
    let pipeline = PricePipeline::load(&path).unwrap();
    assert_eq!(pipeline.version(), "1.0");
    assert_eq!(pipeline.n_features(), 59);

    let est = pricing::estimate(pipeline.predict(&VehicleSpec::default()).unwrap());
    assert!(est.rounded_eur > 0.0);
    assert_eq!(est.rounded_eur % 100.0, 0.0);
}
