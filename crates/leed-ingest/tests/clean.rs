//! Integration tests for loading and cleaning a raw scorecard export.

use std::fs;
use std::path::Path;

use leed_ingest::{
    CleanOptions, IngestError, MalformedRowPolicy, clean_leed_data, load_buildings,
    read_csv_table,
};
use leed_model::DataType;
use tempfile::TempDir;

fn write(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

const BUILDINGS: &str = "\
building_code,building,leed_code
101,Tucker Hall,v4
102,Landrum Hall,LEED 3_0
";

#[test]
fn resolves_names_and_versions_through_reference_table() {
    let dir = TempDir::new().unwrap();
    let buildings = load_buildings(&write(dir.path(), "buildings.csv", BUILDINGS)).unwrap();
    let data = write(
        dir.path(),
        "original_data.csv",
        "building_code,cat_code,cat,awarded_points,potential_points,type\n\
         101,EA,Energy and Atmosphere,12,33,cat\n\
         101,EA,Optimize Energy Performance,8,18,credit\n\
         102,WE,Water Efficiency,4,10,cat\n",
    );

    let (df, _) = read_csv_table(&data).unwrap();
    let cleaned = clean_leed_data(&df, Some(&buildings), &CleanOptions::default()).unwrap();

    assert!(cleaned.skipped.is_empty());
    assert_eq!(cleaned.records.len(), 3);
    let first = &cleaned.records[0];
    assert_eq!(first.building_name, "Tucker Hall");
    assert_eq!(first.leed_version, "4.0");
    assert_eq!(first.points_earned, Some(12.0));
    assert_eq!(first.data_type, DataType::Category);
    assert_eq!(cleaned.records[1].data_type, DataType::Credit);
    assert_eq!(cleaned.records[2].building_name, "Landrum Hall");
    assert_eq!(cleaned.records[2].leed_version, "3.0");
}

#[test]
fn skip_policy_drops_unknown_codes_and_records_row_numbers() {
    let dir = TempDir::new().unwrap();
    let buildings = load_buildings(&write(dir.path(), "buildings.csv", BUILDINGS)).unwrap();
    let data = write(
        dir.path(),
        "original_data.csv",
        "building_code,cat_code,awarded_points,type\n\
         101,EA,12,cat\n\
         999,EA,3,cat\n\
         102,,4,cat\n",
    );

    let (df, _) = read_csv_table(&data).unwrap();
    let cleaned = clean_leed_data(&df, Some(&buildings), &CleanOptions::default()).unwrap();

    assert_eq!(cleaned.records.len(), 1);
    assert_eq!(cleaned.skipped.len(), 2);
    assert_eq!(cleaned.skipped[0].row, 2);
    assert!(cleaned.skipped[0].reason.contains("999"));
    assert_eq!(cleaned.skipped[1].row, 3);
    assert_eq!(cleaned.skipped[1].reason, "empty category");
}

#[test]
fn fail_policy_aborts_on_first_malformed_row() {
    let dir = TempDir::new().unwrap();
    let buildings = load_buildings(&write(dir.path(), "buildings.csv", BUILDINGS)).unwrap();
    let data = write(
        dir.path(),
        "original_data.csv",
        "building_code,cat_code,type\n101,EA,cat\n999,EA,cat\n",
    );

    let (df, _) = read_csv_table(&data).unwrap();
    let options = CleanOptions::default().with_malformed_rows(MalformedRowPolicy::Fail);
    match clean_leed_data(&df, Some(&buildings), &options) {
        Err(IngestError::MalformedRow { row, .. }) => assert_eq!(row, 2),
        other => panic!("expected malformed row error, got {other:?}"),
    }
}

#[test]
fn direct_columns_work_without_reference_table() {
    let dir = TempDir::new().unwrap();
    let data = write(
        dir.path(),
        "original_data.csv",
        "Building_Name,Category,Points_Earned,Points_Available,Data_Type,LEED_Version\n\
         BuildingA,Energy,5,10,Category,v4\n\
         BuildingB,Energy,n/a,10,Category,3\n",
    );

    let (df, _) = read_csv_table(&data).unwrap();
    let cleaned = clean_leed_data(&df, None, &CleanOptions::default()).unwrap();

    assert_eq!(cleaned.records.len(), 2);
    assert_eq!(cleaned.records[0].building_name, "BuildingA");
    assert_eq!(cleaned.records[0].leed_version, "4.0");
    assert_eq!(cleaned.records[1].points_earned, None);
    assert_eq!(cleaned.records[1].points_available, Some(10.0));
    assert_eq!(cleaned.records[1].leed_version, "3.0");
}

#[test]
fn missing_required_column_is_fatal() {
    let dir = TempDir::new().unwrap();
    let data = write(
        dir.path(),
        "original_data.csv",
        "building_name,awarded_points,type\nBuildingA,5,cat\n",
    );

    let (df, _) = read_csv_table(&data).unwrap();
    let result = clean_leed_data(&df, None, &CleanOptions::default());
    assert!(matches!(result, Err(IngestError::MissingColumn { .. })));
}

#[test]
fn load_buildings_reports_missing_file() {
    let dir = TempDir::new().unwrap();
    let result = load_buildings(&dir.path().join("buildings.csv"));
    assert!(matches!(result, Err(IngestError::FileNotFound { .. })));
}

#[test]
fn load_buildings_accepts_alternate_header_names() {
    let dir = TempDir::new().unwrap();
    let path = write(
        dir.path(),
        "buildings.csv",
        "building_code,building_name,leed_version\n201, Park Hall ,2_2\n",
    );
    let index = load_buildings(&path).unwrap();
    let resolved = index.get("201").unwrap();
    assert_eq!(resolved.name, "Park Hall");
    assert_eq!(resolved.leed_version, "2.2");
}
