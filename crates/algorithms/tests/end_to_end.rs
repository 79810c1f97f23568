//! End-to-end engine tests: observations → matrices → totals → differences → tags.

use lccqa_algorithms::prelude::*;

const ACRE: f64 = 4046.86;

fn registry() -> ClassRegistry {
    ClassRegistry::new(["Water", "Forest", "Developed"]).unwrap()
}

fn matrix(obs: &[TransitionObservation], version: &str) -> ChangeMatrix {
    let areas = aggregate(obs, &registry(), AggregateParams::default()).unwrap();
    let key = MatrixKey::new("caro_51033", Period::new(2014, 2018).unwrap(), version);
    build_matrix(&areas, key).unwrap()
}

#[test]
fn forest_to_developed_scenario() {
    let m = matrix(
        &[
            TransitionObservation::new("Forest", "Developed", 40468.6),
            TransitionObservation::new("Water", "Forest", 0.0),
        ],
        "2024ed",
    );

    let close = |a: &[f64], b: &[f64]| a.iter().zip(b).all(|(x, y)| (x - y).abs() < 1e-9);
    assert!(close(&m.decrease().to_vec(), &[0.0, 10.0, 0.0]));
    assert!(close(&m.increase().to_vec(), &[0.0, 0.0, 10.0]));
    assert!(close(&m.net_change().to_vec(), &[0.0, -10.0, 10.0]));
    assert!((m.total_change() - 10.0).abs() < 1e-9);

    let table = m.to_table();
    assert!((table.get("Increase", "Decrease").unwrap() - 10.0).abs() < 1e-9);
    assert!((table.get("Forest", "Decrease").unwrap() - 10.0).abs() < 1e-9);
    assert!((table.get("Net Change", "Developed").unwrap() - 10.0).abs() < 1e-9);
}

#[test]
fn two_versions_with_totals_and_tags() {
    let newer_obs = vec![
        TransitionObservation::stable("Forest", 500.0 * ACRE),
        TransitionObservation::stable("Water", 50.0 * ACRE),
        TransitionObservation::new("Forest", "Developed", 8.0 * ACRE),
        TransitionObservation::new("Developed", "Forest", 2.0 * ACRE),
    ];
    let older_obs = vec![
        TransitionObservation::stable("Forest", 505.0 * ACRE),
        TransitionObservation::stable("Water", 50.0 * ACRE),
        TransitionObservation::new("Forest", "Developed", 5.0 * ACRE),
    ];

    let newer = matrix(&newer_obs, "2024ed");
    let older = matrix(&older_obs, "2022ed");

    // Difference anchored to the newer version's total change (10 acres)
    let diff = difference(&newer, &older).unwrap();
    assert!((diff.value("Forest", "Developed").unwrap() - 0.3).abs() < 1e-9);
    assert!((diff.value("Developed", "Forest").unwrap() - 0.2).abs() < 1e-9);
    assert_eq!(diff.sheet_name(), "2014-2018_2024ed-2022ed");

    // Developed → Forest is unlikely
    let rules = RuleTable::new(
        &registry(),
        [SeverityRule::new(Severity::NeedsReview, [("Developed", "Forest")])],
    )
    .unwrap();
    let tags = classify(&newer, &rules).unwrap();
    assert_eq!(tags[(2, 1)], Severity::NeedsReview);
    let tags = classify(&older, &rules).unwrap();
    assert_eq!(SeverityCounts::from_tags(&tags).flagged(), 0);

    // Totals across versions
    let period = Period::new(2014, 2018).unwrap();
    let reg = registry();
    let t_new = reduce_totals(
        &aggregate(&newer_obs, &reg, AggregateParams::default()).unwrap(),
        period,
        "2024ed",
    )
    .unwrap();
    let t_old = reduce_totals(
        &aggregate(&older_obs, &reg, AggregateParams::default()).unwrap(),
        period,
        "2022ed",
    )
    .unwrap();
    let merged = merge_all([&t_new, &t_old]).unwrap().sorted_columns();

    assert_eq!(
        merged.columns(),
        &[
            "2014_1418_2022ed",
            "2014_1418_2024ed",
            "2018_1418_2022ed",
            "2018_1418_2024ed"
        ]
    );
    assert!((merged.get("Developed", "2018_1418_2024ed").unwrap() - 8.0).abs() < 1e-9);
    assert!((merged.get("Developed", "2014_1418_2022ed").unwrap()).abs() < 1e-12);
    assert!((merged.get("Forest", "2014_1418_2022ed").unwrap() - 510.0).abs() < 1e-9);

    let table = merged.to_table();
    let total = table.get("Total Acres", "2018_1418_2024ed").unwrap();
    assert!((total - 560.0).abs() < 1e-9);
}

#[test]
fn abbreviated_pipeline() {
    let reg = registry()
        .with_abbreviations([("Water", "WAT"), ("Forest", "FOR"), ("Developed", "DEV")])
        .unwrap();
    let obs = vec![TransitionObservation::new("Water", "Developed", ACRE)];
    let areas = aggregate(&obs, &reg, AggregateParams::default()).unwrap();
    let key = MatrixKey::new("r", Period::new(2018, 2022).unwrap(), "2024ed");
    let m = build_matrix(&areas, key).unwrap();

    assert_eq!(m.classes().names(), &["WAT", "FOR", "DEV"]);
    assert!((m.value("WAT", "DEV").unwrap() - 1.0).abs() < 1e-9);

    // Totals keep the full class names
    let totals = reduce_totals(&areas, Period::new(2018, 2022).unwrap(), "2024ed").unwrap();
    assert_eq!(totals.classes(), &["Water", "Developed"]);

    let rules = RuleTable::new(
        &reg,
        [SeverityRule::new(Severity::Invalid, [("Water", "Developed")])],
    )
    .unwrap();
    let tags = classify(&m, &rules).unwrap();
    let flags = flagged(&m, &tags);
    assert_eq!(flags.len(), 1);
    assert_eq!(flags[0].early, "WAT");
}
