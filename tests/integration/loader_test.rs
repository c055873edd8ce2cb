use std::path::Path;

use crate::utils::{
    HEADER, REFERENCE_ROWS, reference_records, write_temp, write_trial_csv, write_trial_parquet,
};
use trial_report::models::columns;
use trial_report::{LoaderConfig, TrialError, load_clinical_data, load_clinical_data_with_config};

#[test]
fn test_load_reference_csv() {
    let file = write_trial_csv(REFERENCE_ROWS);
    let dataset = load_clinical_data(file.path()).unwrap();

    assert_eq!(dataset.num_rows(), 3);
    for column in columns::ALL {
        assert!(dataset.has_column(column), "missing {column}");
    }
    assert_eq!(dataset.records().unwrap(), reference_records());
}

#[test]
fn test_extra_columns_are_ignored() {
    let file = write_temp(
        "site,patient_id,age,cancer_type,baseline_tumor_size,final_tumor_size,treatment,survival_months,notes\n\
         Aarhus,P1,60,Lung,10,5,Treatment_A,20,first\n",
        ".csv",
    );
    let dataset = load_clinical_data(file.path()).unwrap();
    assert_eq!(dataset.records().unwrap(), reference_records()[..1].to_vec());
}

#[test]
fn test_missing_path_is_file_access_error() {
    let err = load_clinical_data(Path::new("/no/such/dir/clinical_trial_patients.csv")).unwrap_err();
    assert!(matches!(err, TrialError::FileAccess { .. }), "{err}");
}

#[test]
fn test_ragged_rows_are_parse_errors() {
    let file = write_trial_csv("P1,60,Lung,10,5,Treatment_A,20\nP2,40,Lung\n");
    let err = load_clinical_data(file.path()).unwrap_err();
    assert!(err.is_parse(), "{err}");
}

#[test]
fn test_empty_file_is_parse_error() {
    let file = write_temp("", ".csv");
    let err = load_clinical_data(file.path()).unwrap_err();
    assert!(err.is_parse(), "{err}");
}

#[test]
fn test_header_only_file_is_empty_dataset() {
    let file = write_temp(&format!("{HEADER}\n"), ".csv");
    let dataset = load_clinical_data(file.path()).unwrap();
    assert!(dataset.is_empty());
    assert!(dataset.has_column(columns::SURVIVAL_MONTHS));
}

#[test]
fn test_empty_cells_load_as_missing() {
    let file = write_trial_csv("P1,,Lung,10,5,Control,\nP2,61,Lung,10,5,Control,12\n");
    let records = load_clinical_data(file.path()).unwrap().records().unwrap();
    assert_eq!(records[0].age, None);
    assert_eq!(records[0].survival_months, None);
    assert_eq!(records[1].age, Some(61.0));
}

#[test]
fn test_small_batches_keep_row_order() {
    let file = write_trial_csv(REFERENCE_ROWS);
    let config = LoaderConfig {
        batch_size: 1,
        ..Default::default()
    };
    let dataset = load_clinical_data_with_config(file.path(), &config).unwrap();
    assert_eq!(dataset.batches().len(), 3);
    assert_eq!(dataset.records().unwrap(), reference_records());
}

#[test]
fn test_semicolon_delimiter() {
    let file = write_temp(
        &format!("{}\nP1;60;Lung;10;5;Treatment_A;20\n", HEADER.replace(',', ";")),
        ".csv",
    );
    let config = LoaderConfig {
        delimiter: b';',
        ..Default::default()
    };
    let dataset = load_clinical_data_with_config(file.path(), &config).unwrap();
    assert_eq!(dataset.records().unwrap(), reference_records()[..1].to_vec());
}

#[test]
fn test_load_parquet() {
    let file = write_trial_parquet(&reference_records());
    let dataset = load_clinical_data(file.path()).unwrap();
    assert_eq!(dataset.records().unwrap(), reference_records());
}

#[test]
fn test_invalid_parquet_is_parse_error() {
    let file = write_temp("this is not parquet", ".parquet");
    let err = load_clinical_data(file.path()).unwrap_err();
    assert!(err.is_parse(), "{err}");
}

/// 1000 whole-number rows followed by rows whose late values only fit wider types
fn late_widening_rows() -> String {
    let mut rows = String::new();
    for i in 0..1000 {
        rows.push_str(&format!("P{i},60,Lung,10,5,Control,\n"));
    }
    rows.push_str("P1000,60.5,Lung,10,4.5,Control,12.5\n");
    rows.push_str("P1001,61,Lung,10,5,Treatment_A,12\n");
    rows
}

#[test]
fn test_late_fractional_and_late_filled_values_load() {
    let file = write_trial_csv(&late_widening_rows());
    let dataset = load_clinical_data(file.path()).unwrap();
    assert_eq!(dataset.num_rows(), 1002);

    let records = dataset.records().unwrap();
    assert_eq!(records[0].survival_months, None);
    assert_eq!(records[1000].age, Some(60.5));
    assert_eq!(records[1000].final_tumor_size, Some(4.5));
    assert_eq!(records[1000].survival_months, Some(12.5));
    assert_eq!(records[1001].survival_months, Some(12.0));
}

#[test]
fn test_short_inference_window_still_reads_whole_file() {
    let file = write_trial_csv(&late_widening_rows());
    let config = LoaderConfig {
        batch_size: 128,
        schema_inference_records: Some(10),
        ..Default::default()
    };
    let dataset = load_clinical_data_with_config(file.path(), &config).unwrap();
    assert_eq!(dataset.batches().len(), 8);

    let survival = dataset.float_column(columns::SURVIVAL_MONTHS).unwrap();
    assert_eq!(survival.iter().flatten().count(), 2);
    assert_eq!(survival[1000], Some(12.5));
    assert_eq!(
        dataset.string_column(columns::PATIENT_ID).unwrap()[1001].as_deref(),
        Some("P1001")
    );
}
