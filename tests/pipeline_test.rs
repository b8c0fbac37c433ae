// tests/pipeline_test.rs — Integration test: bundled artifacts end to end

use pretty_assertions::assert_eq;
use std::path::PathBuf;

use session_scorer::core::{AppContext, PredictionService};
use session_scorer::features::transform::{HOUR, VISIT_NUMBER_11, VISIT_NUMBER_1, VISIT_NUMBER_2_10};
use session_scorer::features::{SessionRecord, NOT_SET};
use session_scorer::infra::config::Config;
use session_scorer::infra::errors::ServiceError;
use session_scorer::model::Classifier;

fn bundled_config() -> Config {
    let mut config = Config::default();
    config.artifacts.dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("artifacts");
    config.artifacts.unpack_on_start = false;
    config
}

fn bundled_context() -> AppContext {
    AppContext::load(&bundled_config()).expect("bundled artifacts load")
}

fn reference_session() -> SessionRecord {
    SessionRecord {
        utm_campaign: Some("blog".into()),
        device_category: Some("desktop".into()),
        device_os: Some("Windows".into()),
        device_brand: Some("Google".into()),
        device_browser: Some("Chrome".into()),
        geo_city: Some("Moscow".into()),
        visit_number: 2,
        visit_date: "2024-01-01".into(),
        visit_time: "10:15:00".into(),
    }
}

#[test]
fn test_bundled_schema_matches_model() {
    let ctx = bundled_context();
    assert_eq!(ctx.schema().len(), 49);
    assert_eq!(
        &ctx.schema()[..4],
        &[HOUR, VISIT_NUMBER_1, VISIT_NUMBER_2_10, VISIT_NUMBER_11]
    );
}

#[test]
fn test_reference_session_features() {
    let ctx = bundled_context();
    let features = ctx.transformer().transform(&reference_session()).unwrap();

    assert_eq!(features.get(HOUR), Some(10.0));
    assert_eq!(features.get(VISIT_NUMBER_1), Some(0.0));
    assert_eq!(features.get(VISIT_NUMBER_2_10), Some(1.0));
    assert_eq!(features.get(VISIT_NUMBER_11), Some(0.0));
    assert_eq!(features.get("geo_city_Moscow"), Some(1.0));
    assert_eq!(features.get("geo_city_others"), Some(0.0));
    assert_eq!(features.get("utm_campaign_blog"), Some(1.0));
    assert_eq!(features.get("device_browser_Chrome"), Some(1.0));

    // Every one-hot block has exactly one hot column for known values.
    let hot: f64 = features.values()[4..].iter().sum();
    assert_eq!(hot, 6.0);
}

#[test]
fn test_reference_prediction_is_stable() {
    let ctx = bundled_context();
    let service = PredictionService::new(&ctx);
    let first = service.predict(&reference_session()).unwrap();

    assert!((0.0..=1.0).contains(&first.probability));
    assert_eq!(first.target_class, u8::from(first.probability >= 0.5));
    for _ in 0..10 {
        let again = service.predict(&reference_session()).unwrap();
        assert_eq!(again.probability.to_bits(), first.probability.to_bits());
        assert_eq!(again.target_class, first.target_class);
    }
}

#[test]
fn test_unlisted_city_scores_like_others() {
    let ctx = bundled_context();
    let transformer = ctx.transformer();
    let atlantis = SessionRecord {
        geo_city: Some("Atlantis".into()),
        ..reference_session()
    };
    let others = SessionRecord {
        geo_city: Some("others".into()),
        ..reference_session()
    };
    let moscow = transformer.transform(&reference_session()).unwrap();
    let a = transformer.transform(&atlantis).unwrap();
    let o = transformer.transform(&others).unwrap();
    assert_eq!(a, o);

    // Only the two city columns differ from the Moscow row.
    let diffs: Vec<&str> = moscow
        .iter()
        .zip(a.iter())
        .filter(|(m, x)| m.1 != x.1)
        .map(|(m, _)| m.0)
        .collect();
    assert_eq!(diffs, vec!["geo_city_Moscow", "geo_city_others"]);

    let service = PredictionService::new(&ctx);
    assert_eq!(
        service.predict(&atlantis).unwrap(),
        service.predict(&others).unwrap()
    );
}

#[test]
fn test_missing_fields_match_sentinel() {
    let ctx = bundled_context();
    let missing = SessionRecord {
        utm_campaign: None,
        device_os: None,
        device_brand: None,
        geo_city: None,
        ..reference_session()
    };
    let sentinel = SessionRecord {
        utm_campaign: Some(NOT_SET.into()),
        device_os: Some(NOT_SET.into()),
        device_brand: Some(NOT_SET.into()),
        geo_city: Some(NOT_SET.into()),
        ..reference_session()
    };
    let transformer = ctx.transformer();
    assert_eq!(
        transformer.transform(&missing).unwrap(),
        transformer.transform(&sentinel).unwrap()
    );
}

#[test]
fn test_visit_number_boundaries() {
    let ctx = bundled_context();
    let transformer = ctx.transformer();
    let cases = [
        (1, [1.0, 0.0, 0.0]),
        (10, [0.0, 1.0, 0.0]),
        (11, [0.0, 0.0, 1.0]),
    ];
    for (visit_number, expected) in cases {
        let features = transformer
            .transform(&SessionRecord {
                visit_number,
                ..reference_session()
            })
            .unwrap();
        let got = [
            features.get(VISIT_NUMBER_1).unwrap(),
            features.get(VISIT_NUMBER_2_10).unwrap(),
            features.get(VISIT_NUMBER_11).unwrap(),
        ];
        assert_eq!(got, expected, "visit_number {visit_number}");
    }
}

#[test]
fn test_unseen_categories_encode_to_zero() {
    let ctx = bundled_context();
    let features = ctx
        .transformer()
        .transform(&SessionRecord {
            device_browser: Some("Netscape".into()),
            ..reference_session()
        })
        .unwrap();
    let browser_total: f64 = features
        .iter()
        .filter(|(name, _)| name.starts_with("device_browser_"))
        .map(|(_, v)| v)
        .sum();
    assert_eq!(browser_total, 0.0);
}

#[test]
fn test_probability_matches_classifier_output() {
    let ctx = bundled_context();
    let features = ctx.transformer().transform(&reference_session()).unwrap();
    let [p0, p1] = ctx.classifier().predict_proba(&features).unwrap();
    assert!((p0 + p1 - 1.0).abs() < 1e-12);

    let result = PredictionService::new(&ctx)
        .predict(&reference_session())
        .unwrap();
    assert_eq!(result.probability, p1);
}

#[test]
fn test_bad_input_is_client_fault() {
    let ctx = bundled_context();
    let service = PredictionService::new(&ctx);

    let err = service
        .predict(&SessionRecord {
            visit_date: "01/01/2024".into(),
            ..reference_session()
        })
        .unwrap_err();
    assert!(matches!(err, ServiceError::Transform(_)));
    assert!(err.is_client_fault());

    let err = service
        .predict(&SessionRecord {
            visit_number: -1,
            ..reference_session()
        })
        .unwrap_err();
    assert!(matches!(err, ServiceError::InputShape(_)));
}

#[test]
fn test_concurrent_predictions_share_context() {
    let ctx = std::sync::Arc::new(bundled_context());
    let expected = PredictionService::new(&ctx)
        .predict(&reference_session())
        .unwrap();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let ctx = ctx.clone();
            std::thread::spawn(move || {
                PredictionService::new(&ctx)
                    .predict(&reference_session())
                    .unwrap()
            })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
