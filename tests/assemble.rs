use anyhow::Result;
use std::fs;
use tempfile::tempdir;
use trafik::assemble::assemble_dataset;
use trafik::config::FailurePolicy;
use trafik::discover::StreetPage;
use trafik::normalize::TableRules;
use trafik::pipeline::{AssembleOptions, run_assemble};

const MAINST_HTML: &str = r#"
<html><body>
<h1>Trafikflöden</h1>
<table>
  <tr><th>Delsträcka</th><th>År</th><th>ÅMVD</th></tr>
  <tr><td>A – B</td><td>2015</td><td>1,000</td></tr>
  <tr><td></td><td>2016</td><td>1,200</td></tr>
  <tr><td>Delsträcka</td><td>År</td><td>ÅMVD</td></tr>
  <tr><td>C – D</td><td>2015</td><td>500</td></tr>
</table>
</body></html>
"#;

fn page(id: &str, html: &str) -> StreetPage {
    StreetPage {
        id: id.to_string(),
        html: html.to_string(),
    }
}

#[test]
fn assembles_tagged_records_in_row_order() -> Result<()> {
    let pages = vec![page("data/MainSt.html", MAINST_HTML)];

    let (dataset, report) =
        assemble_dataset(&pages, &TableRules::default(), FailurePolicy::Abort)?;

    assert_eq!(report.files_parsed, 1);
    assert_eq!(report.records, 3);

    let rows = dataset
        .iter()
        .map(|r| (r.street.as_str(), r.from.as_str(), r.to.as_str(), r.year, r.cars))
        .collect::<Vec<_>>();
    assert_eq!(
        rows,
        vec![
            ("MainSt", "A", "B", 2015, Some(1000)),
            ("MainSt", "A", "B", 2016, Some(1200)),
            ("MainSt", "C", "D", 2015, Some(500)),
        ]
    );

    Ok(())
}

#[test]
fn pages_are_processed_in_identifier_order() -> Result<()> {
    let single = r#"<table>
        <tr><td>X – Y</td><td>2015</td><td>10</td></tr>
    </table>"#;
    let pages = vec![page("data/Bgatan.html", single), page("data/Agatan.html", single)];

    let (dataset, _) = assemble_dataset(&pages, &TableRules::default(), FailurePolicy::Abort)?;

    let streets = dataset.iter().map(|r| r.street.clone()).collect::<Vec<_>>();
    assert_eq!(streets, vec!["Agatan", "Bgatan"]);

    Ok(())
}

#[test]
fn fill_state_resets_between_street_pages() {
    // A second page opening with a blank stretch label must fail; endpoints
    // never carry over from the previous page's table.
    let pages = vec![
        page(
            "data/Agatan.html",
            "<table><tr><td>A – B</td><td>2015</td><td>100</td></tr></table>",
        ),
        page(
            "data/Bgatan.html",
            "<table><tr><td></td><td>2015</td><td>100</td></tr></table>",
        ),
    ];

    let err = assemble_dataset(&pages, &TableRules::default(), FailurePolicy::Abort).unwrap_err();
    let rendered = format!("{err:#}");
    assert!(rendered.contains("data/Bgatan.html"));
    assert!(rendered.contains("no stretch label"));
}

#[test]
fn abort_policy_fails_the_batch_and_names_the_file() {
    let pages = vec![
        page("data/MainSt.html", MAINST_HTML),
        page("data/Broken.html", "<html><body>no table here</body></html>"),
    ];

    let err = assemble_dataset(&pages, &TableRules::default(), FailurePolicy::Abort).unwrap_err();
    assert!(format!("{err:#}").contains("data/Broken.html"));
}

#[test]
fn skip_policy_keeps_the_healthy_pages() -> Result<()> {
    let pages = vec![
        page("data/Broken.html", "<html><body>no table here</body></html>"),
        page("data/MainSt.html", MAINST_HTML),
    ];

    let (dataset, report) =
        assemble_dataset(&pages, &TableRules::default(), FailurePolicy::Skip)?;

    assert_eq!(report.files_skipped, 1);
    assert_eq!(report.files_parsed, 1);
    assert_eq!(dataset.len(), 3);
    assert!(dataset.iter().all(|r| r.street == "MainSt"));

    Ok(())
}

#[test]
fn pipeline_discovers_excludes_and_exports() -> Result<()> {
    let temp = tempdir()?;
    let root = temp.path();

    let street_dir = root.join("streets");
    fs::create_dir_all(&street_dir)?;
    fs::write(street_dir.join("Avenyn.html"), MAINST_HTML)?;
    fs::write(
        street_dir.join("Storgatan.html"),
        "<table><tr><td>Torget – Bron</td><td>2017</td><td>2 400 bilar/dygn</td></tr></table>",
    )?;
    fs::write(
        street_dir.join("index.html"),
        "<html><body>navigation only</body></html>",
    )?;

    let out_path = root.join("out/streets.tsv");
    let config_path = root.join("trafik.toml");
    fs::write(
        &config_path,
        format!(
            "[input]\ndir = {:?}\n\n[output]\nformat = \"tsv\"\npath = {:?}\n",
            street_dir.display().to_string(),
            out_path.display().to_string(),
        ),
    )?;

    let report = run_assemble(&AssembleOptions {
        config_path,
        input_dir: None,
        out_path: None,
        format: None,
        dry_run: false,
    })?;

    assert_eq!(report.files_discovered, 2);
    assert_eq!(report.files_parsed, 2);
    assert_eq!(report.records, 4);

    let content = fs::read_to_string(out_path)?;
    let lines = content.lines().collect::<Vec<_>>();
    assert_eq!(lines[0], "street\tfrom\tto\tyear\tcars");
    assert_eq!(lines[1], "Avenyn\tA\tB\t2015\t1000");
    assert_eq!(lines[4], "Storgatan\tTorget\tBron\t2017\t2400");

    Ok(())
}

#[test]
fn pipeline_format_override_writes_json() -> Result<()> {
    let temp = tempdir()?;
    let root = temp.path();

    let street_dir = root.join("streets");
    fs::create_dir_all(&street_dir)?;
    fs::write(street_dir.join("Avenyn.html"), MAINST_HTML)?;

    let out_path = root.join("out/streets.json");

    run_assemble(&AssembleOptions {
        config_path: root.join("missing.toml"),
        input_dir: Some(street_dir),
        out_path: Some(out_path.clone()),
        format: Some("json".to_string()),
        dry_run: false,
    })?;

    let records: Vec<serde_json::Value> = serde_json::from_str(&fs::read_to_string(out_path)?)?;
    assert_eq!(records.len(), 3);
    assert_eq!(records[0]["street"], "Avenyn");
    assert_eq!(records[1]["cars"], 1200);

    Ok(())
}
