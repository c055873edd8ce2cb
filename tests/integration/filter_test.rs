use trial_report::analysis::{group_means, responder_expr};
use trial_report::models::columns;
use trial_report::{
    AnalysisConfig, ClinicalDataset, ClinicalRecord, ExpressionFilter, compute_survival_statistics,
    get_responsive_patients,
};

/// Every combination of the predicate inputs, including missing values
fn grid() -> Vec<ClinicalRecord> {
    let ages = [None, Some(30.0), Some(49.0), Some(50.0), Some(50.5), Some(80.0)];
    let cancers = [None, Some("Lung"), Some("lung"), Some("Breast")];
    let sizes = [None, Some(5.0), Some(10.0)];
    let treatments = ["Treatment_A", "Control", "Treatment_B"];

    let mut records = Vec::new();
    for age in ages {
        for cancer in cancers {
            for baseline in sizes {
                for final_size in sizes {
                    let n = records.len();
                    records.push(ClinicalRecord {
                        patient_id: Some(format!("P{n}")),
                        age,
                        cancer_type: cancer.map(str::to_string),
                        baseline_tumor_size: baseline,
                        final_tumor_size: final_size,
                        treatment: Some(treatments[n % treatments.len()].to_string()),
                        survival_months: (n % 7 != 0).then(|| (n % 13) as f64 * 2.5),
                    });
                }
            }
        }
    }
    records
}

fn is_responder(record: &ClinicalRecord, config: &AnalysisConfig) -> bool {
    record.age.is_some_and(|age| age >= config.age_threshold)
        && record.cancer_type.as_deref() == Some(config.target_cancer_type.as_str())
        && record.tumor_shrank()
}

fn mean_for(records: &[ClinicalRecord], group: &str) -> f64 {
    let values: Vec<f64> = records
        .iter()
        .filter(|r| r.treatment.as_deref() == Some(group))
        .filter_map(|r| r.survival_months)
        .collect();
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

#[test]
fn test_responders_match_row_predicates() {
    let records = grid();
    let dataset = ClinicalDataset::from_records(&records).unwrap();
    let config = AnalysisConfig::default();

    let expected: Vec<String> = records
        .iter()
        .filter(|r| is_responder(r, &config))
        .filter_map(|r| r.patient_id.clone())
        .collect();
    let actual = get_responsive_patients(&dataset, &config).unwrap();

    assert!(!expected.is_empty());
    assert_eq!(actual, expected);
}

#[test]
fn test_responder_filter_keeps_whole_rows() {
    let records = grid();
    let dataset = ClinicalDataset::from_records(&records).unwrap();
    let config = AnalysisConfig::default();

    let filtered = dataset
        .filter(&ExpressionFilter::new(responder_expr(&config)))
        .unwrap();
    let kept = filtered.records().unwrap();

    assert!(kept.iter().all(|r| is_responder(r, &config)));
    assert_eq!(
        kept.len(),
        records.iter().filter(|r| is_responder(r, &config)).count()
    );
}

#[test]
fn test_group_means_match_reference() {
    let records = grid();
    let dataset = ClinicalDataset::from_records(&records).unwrap();
    let config = AnalysisConfig::default();

    let stats = compute_survival_statistics(&dataset, &config).unwrap();
    let tolerance = 1e-9;
    assert!((stats.avg_survival_treatment_group - mean_for(&records, "Treatment_A")).abs() < tolerance);
    assert!((stats.avg_survival_control - mean_for(&records, "Control")).abs() < tolerance);

    let groups = group_means(&dataset, columns::TREATMENT, columns::SURVIVAL_MONTHS).unwrap();
    assert_eq!(groups.len(), 3);
    let other = groups["Treatment_B"].mean().unwrap();
    assert!((other - mean_for(&records, "Treatment_B")).abs() < tolerance);
    assert_eq!(
        groups.values().map(|g| g.rows).sum::<usize>(),
        records.len()
    );
}
