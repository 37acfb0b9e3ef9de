// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use serde_json::json;
use tempfile::tempdir;
use vestplan::store::{SAMPLE_FIXTURE, Settings, parse_vest_event};
use vestplan::{cli, commands::exporter};

fn run_export(args: &[&str]) {
    let vest = parse_vest_event(SAMPLE_FIXTURE).unwrap();
    let settings = Settings::default();
    let mut argv = vec!["vestplan", "export"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    if let Some(("export", export_m)) = matches.subcommand() {
        exporter::handle(&vest, &settings, export_m).unwrap();
    } else {
        panic!("no export subcommand");
    }
}

#[test]
fn export_range_csv_has_header_and_every_step() {
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("range.csv");
    let out_str = out_path.to_string_lossy().to_string();

    run_export(&["range", "--format", "csv", "--out", &out_str, "--steps", "4"]);

    let mut rdr = csv::Reader::from_path(&out_path).unwrap();
    let headers = rdr.headers().unwrap().clone();
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        vec!["stock_price", "gross_value", "net_value"]
    );
    let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 5);
    assert_eq!(&rows[0][0], "100.96");
    assert_eq!(&rows[2][0], "112.18");
    assert_eq!(&rows[4][0], "123.40");
}

#[test]
fn export_history_json_is_ordered_oldest_first() {
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("history.json");
    let out_str = out_path.to_string_lossy().to_string();

    run_export(&[
        "history", "--format", "json", "--out", &out_str, "--order", "oldest",
    ]);

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    let statuses: Vec<&str> = parsed["lots"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["status"].as_str().unwrap())
        .collect();
    assert_eq!(statuses, vec!["Held", "Sold", "Split"]);
    assert_eq!(parsed["lots"][2]["split"], json!("30H/70S"));
    assert_eq!(parsed["summary"]["lots"], json!(3));
    assert_eq!(parsed["summary"]["split"], json!(1));
}

#[test]
fn export_history_csv_leaves_undefined_gains_blank() {
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("history.csv");
    let out_str = out_path.to_string_lossy().to_string();

    run_export(&["history", "--format", "csv", "--out", &format!("  {}  ", out_str)]);

    let mut rdr = csv::Reader::from_path(&out_path).unwrap();
    let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 3);
    // newest first: split, sold, held
    assert_eq!(&rows[0][6], "Split");
    assert_eq!(&rows[0][8], "14000");
    assert_eq!(&rows[1][6], "Sold");
    assert_eq!(&rows[1][9], "");
    assert_eq!(&rows[2][6], "Held");
    assert_eq!(&rows[2][8], "");
}
