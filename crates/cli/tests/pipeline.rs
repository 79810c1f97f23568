//! Pipeline tests over a temporary data folder.

use std::fs;
use std::path::Path;

use lccqa_algorithms::severity::SeverityCounts;
use lccqa_cli::pipeline::TOTALS_SHEET;
use lccqa_cli::{run_region, write_report, Config, Engine};
use lccqa_core::{Error, Severity, TransitionGrid};

const ACRE: f64 = 4046.86;

fn write_table(dir: &Path, name: &str, rows: &[(i64, f64)]) {
    let mut text = String::from("OID,Value,Count\n");
    for (i, (value, count)) in rows.iter().enumerate() {
        text.push_str(&format!("{},{},{}\n", i, value, count));
    }
    fs::write(dir.join(name), text).unwrap();
}

fn config_text(root: &Path) -> String {
    format!(
        r#"
[folders]
qaqc = "{out}"

[[classes]]
name = "Water"
abbrev = "W"

[[classes]]
name = "Forest"
abbrev = "F"

[[classes]]
name = "Developed"
abbrev = "D"

[[codes]]
value = 1
class = "Water"

[[codes]]
value = 2
class = "Forest"

[[codes]]
value = 3
class = "Developed"

[[codes]]
value = 13
class = "Water to Developed"

[[codes]]
value = 23
class = "Forest to Developed"

[[codes]]
value = 32
class = "Developed to Forest"

[regions]
r1 = [2014, 2018, 2022]

[[versions]]
name = "2024ed"
data_folder = "{data}"
file_pattern = "{{region}}_{{early}}_{{late}}.csv"

[[versions]]
name = "2022ed"
data_folder = "{data}"
file_pattern = "{{region}}_{{early}}{{late}}_v2.csv"
max_years = 2

[compare]
newer = "2024ed"
older = "2022ed"

[[severity]]
tier = "invalid"
color = "FF0000"
transitions = [["Water", "Developed"]]

[[severity]]
tier = "needs_review"
color = "FFFF00"
transitions = [["Developed", "Forest"]]
"#,
        out = root.join("out").display(),
        data = root.join("data").display(),
    )
}

fn setup() -> (tempfile::TempDir, Config) {
    let root = tempfile::tempdir().unwrap();
    let data = root.path().join("data");
    fs::create_dir_all(&data).unwrap();

    write_table(
        &data,
        "r1_2014_2018.csv",
        &[
            (1, 10.0 * ACRE),
            (2, 100.0 * ACRE),
            (3, 10.0 * ACRE),
            (23, 10.0 * ACRE),
            (32, ACRE),
        ],
    );
    write_table(&data, "r1_2018_2022.csv", &[(2, 100.0 * ACRE), (23, 5.0 * ACRE)]);
    write_table(
        &data,
        "r1_20142018_v2.csv",
        &[(2, 100.0 * ACRE), (23, 5.0 * ACRE), (13, ACRE)],
    );

    let config = Config::parse(&config_text(root.path())).unwrap();
    (root, config)
}

#[test]
fn region_matrices_differences_and_totals() {
    let (_root, config) = setup();
    let engine = Engine::from_config(&config).unwrap();
    let report = run_region(&config, &engine, "r1").unwrap();

    assert_eq!(report.matrices.len(), 3);
    let newer = report.matrix("2024ed", "2014-2018-2024ed").unwrap();
    assert_eq!(newer.classes().names(), &["W", "F", "D"]);
    assert!((newer.total_change() - 11.0).abs() < 1e-9);
    assert!(report.matrix("2022ed", "2018-2022-2022ed").is_none());

    // Developed → Forest flagged for review in the newer edition
    let (_, tags) = &report.matrices[0];
    assert_eq!(tags[(2, 1)], Severity::NeedsReview);
    // Water → Developed invalid in the older edition
    let (older, tags) = &report.matrices[2];
    assert_eq!(older.version(), "2022ed");
    assert_eq!(tags[(0, 2)], Severity::Invalid);
    assert_eq!(SeverityCounts::from_tags(tags).invalid, 1);

    assert_eq!(report.differences.len(), 1);
    let (diff, diff_tags) = &report.differences[0];
    assert!((diff.value("F", "D").unwrap() - 5.0 / 11.0).abs() < 1e-9);
    assert!((diff.value("W", "D").unwrap() + 1.0 / 11.0).abs() < 1e-9);
    // Negative difference is not a realized transition
    assert_eq!(diff_tags[(0, 2)], Severity::Normal);

    assert_eq!(
        report.totals.columns(),
        &[
            "2014_1418_2022ed",
            "2014_1418_2024ed",
            "2018_1418_2022ed",
            "2018_1418_2024ed",
            "2018_1822_2024ed",
            "2022_1822_2024ed"
        ]
    );
    // Totals rows carry full class names in registry order
    assert_eq!(report.totals.classes(), &["Water", "Forest", "Developed"]);
    assert!((report.totals.get("Developed", "2018_1418_2024ed").unwrap() - 20.0).abs() < 1e-9);
    assert!((report.totals.get("Water", "2022_1822_2024ed").unwrap()).abs() < 1e-12);
    assert_eq!(report.totals.get("D", "2018_1418_2024ed"), None);

    let book = report.workbook(&engine.palette);
    let sheet = book.sheet(TOTALS_SHEET).unwrap();
    assert_eq!(
        sheet.table.row_labels(),
        &["Water", "Forest", "Developed", "Total Acres"]
    );
    let matrix = book.sheet("2014-2018-2024ed").unwrap();
    assert_eq!(matrix.table.col_labels(), &["W", "F", "D", "Decrease"]);
}

#[test]
fn totals_rows_follow_registry_order() {
    let (root, mut config) = setup();
    let data = root.path().join("data");
    // Water first appears in the second period
    write_table(&data, "r2_2014_2018.csv", &[(2, 100.0 * ACRE), (23, 5.0 * ACRE)]);
    write_table(&data, "r2_2018_2022.csv", &[(1, 3.0 * ACRE), (2, 95.0 * ACRE)]);
    write_table(&data, "r2_20142018_v2.csv", &[(2, 100.0 * ACRE), (23, 4.0 * ACRE)]);
    config.regions.insert("r2".to_string(), vec![2014, 2018, 2022]);

    let engine = Engine::from_config(&config).unwrap();
    let report = run_region(&config, &engine, "r2").unwrap();

    assert_eq!(report.totals.classes(), &["Water", "Forest", "Developed"]);
    assert_eq!(report.totals.get("Water", "2014_1418_2024ed"), Some(0.0));
    assert!((report.totals.get("Water", "2022_1822_2024ed").unwrap() - 3.0).abs() < 1e-9);
}

#[test]
fn report_written_to_disk() {
    let (root, config) = setup();
    let engine = Engine::from_config(&config).unwrap();
    let report = run_region(&config, &engine, "r1").unwrap();
    let html = write_report(&report, &engine.palette, &config.folders.qaqc).unwrap();

    assert_eq!(html, root.path().join("out").join("r1_LCC_QA.html"));
    let text = fs::read_to_string(&html).unwrap();
    assert!(text.contains("background:#FF0000;"));
    assert!(text.contains("background:#FFFF00;"));
    assert!(text.contains("2014-2018_2024ed-2022ed"));

    let sheets = root.path().join("out").join("r1_LCC_QA");
    for name in [
        "2014-2018-2024ed",
        "2018-2022-2024ed",
        "2014-2018-2022ed",
        "2014-2018_2024ed-2022ed",
        TOTALS_SHEET,
    ] {
        assert!(sheets.join(format!("{}.csv", name)).exists(), "missing sheet {}", name);
    }
}

#[test]
fn missing_source_fails_region() {
    let (root, config) = setup();
    fs::remove_file(root.path().join("data").join("r1_2018_2022.csv")).unwrap();
    let engine = Engine::from_config(&config).unwrap();

    let err = run_region(&config, &engine, "r1").unwrap_err();
    let missing = err
        .chain()
        .any(|e| matches!(e.downcast_ref::<Error>(), Some(Error::MissingSource { .. })));
    assert!(missing, "expected MissingSource, got {:#}", err);
}

#[test]
fn unknown_code_fails_region() {
    let (root, config) = setup();
    write_table(&root.path().join("data"), "r1_2018_2022.csv", &[(99, ACRE)]);
    let engine = Engine::from_config(&config).unwrap();

    let err = run_region(&config, &engine, "r1").unwrap_err();
    let unknown = err
        .chain()
        .any(|e| matches!(e.downcast_ref::<Error>(), Some(Error::UnknownTransitionCode(99))));
    assert!(unknown, "expected UnknownTransitionCode, got {:#}", err);
}

#[test]
fn unknown_region() {
    let (_root, config) = setup();
    let engine = Engine::from_config(&config).unwrap();
    assert!(run_region(&config, &engine, "nowhere").is_err());
}
