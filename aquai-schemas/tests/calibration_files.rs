//! Calibration from CSV files on disk

use std::fs;

use aquai_core::{FixedTime, WaterSourceCategory};
use aquai_schemas::{calibrate, calibrate_files, CalibrationError, Dataset};
use tempfile::TempDir;

const STATION_SHEET: &str = "\
Station Name,State,pH Mean,B.O.D. (mg/l),Fecal Coliform (MPN/100ml),D.O. (mg/l)
Yamuna at Nizamuddin,Delhi,7.6,24,120000,1.8
Gomti at Lucknow,Uttar Pradesh,7.9,6.5,3500,5.2
Ganga at Varanasi,Uttar Pradesh,8.1,3.5,  2400 ,6.8
";

#[test]
fn single_sheet_from_disk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("stations.csv");
    fs::write(&path, STATION_SHEET).unwrap();

    let dataset = Dataset::from_path(&path).unwrap();
    assert_eq!(dataset.len(), 3);

    let stats = calibrate(&dataset, WaterSourceCategory::Drains, &FixedTime::new(1_700_000_000_000)).unwrap();
    assert_eq!(stats.data_points, 3);
    assert_eq!(stats.identified_columns.len(), 4);
    assert!((stats.mean_values["ph"] - 7.866_666_666_666_667).abs() < 1e-9);
    assert!((stats.mean_values["bod"] - 34.0 / 3.0).abs() < 1e-9);
    assert!((stats.mean_values["do"] - 13.8 / 3.0).abs() < 1e-9);
    assert_eq!(stats.bod_weight, 5.0);
    assert_eq!(stats.fecal_weight, 6.5);
    assert_eq!(stats.virtual_path, "assets/drains/");
    assert_eq!(stats.trained_at, 1_700_000_000_000);
}

#[test]
fn several_sheets_are_merged() {
    let dir = TempDir::new().unwrap();
    let first = dir.path().join("q1.csv");
    let second = dir.path().join("q2.csv");
    fs::write(&first, "pH,BOD\n7.0,2\n7.2,4\n").unwrap();
    fs::write(&second, "BOD,Fecal Coliform\n6,900\n").unwrap();

    let stats = calibrate_files(&[&first, &second], WaterSourceCategory::River, &FixedTime::new(0)).unwrap();
    assert_eq!(stats.data_points, 3);
    assert_eq!(stats.mean_values["bod"], 4.0);
    assert_eq!(stats.mean_values["fecal"], 900.0);
    assert_eq!(stats.identified_columns, vec!["pH", "BOD", "Fecal Coliform"]);
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("absent.csv");
    let result = calibrate_files(&[missing], WaterSourceCategory::River, &FixedTime::new(0));
    assert!(matches!(result, Err(CalibrationError::Io(_))));
}

#[test]
fn header_only_file_is_empty() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("empty.csv");
    fs::write(&path, "pH,BOD\n").unwrap();

    let result = calibrate_files(&[path], WaterSourceCategory::River, &FixedTime::new(0));
    assert!(matches!(result, Err(CalibrationError::EmptyDataset)));
}

#[test]
fn unrecognized_headers_are_listed() {
    let dataset = Dataset::from_csv_reader("Site,Lat,Lng\nA,1,2\n".as_bytes()).unwrap();
    let err = calibrate(&dataset, WaterSourceCategory::River, &FixedTime::new(0)).unwrap_err();
    assert_eq!(err.to_string(), "no recognized columns; available: Site, Lat, Lng");
}
