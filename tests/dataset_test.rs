mod common;

use vitales::Selection;
use vitales::model::division::UNKNOWN_DIVISION;
use vitales::utils::arrow::string_column;

#[test]
fn join_appends_division_names_with_fallback() {
    let dataset = common::dataset();
    assert_eq!(dataset.num_rows(), 11);

    let names = string_column(dataset.batch(), "NOM_DPTO").unwrap();
    assert_eq!(names.value(0), "ANTIOQUIA");
    // Division 99/999 is not in DIVIPOLA
    assert_eq!(names.value(9), UNKNOWN_DIVISION);
    // Null codes also resolve to the fallback label
    assert_eq!(names.value(10), UNKNOWN_DIVISION);

    let municipalities = string_column(dataset.batch(), "NOM_MUNIC").unwrap();
    assert_eq!(municipalities.value(2), "ITAGUI");
    assert_eq!(municipalities.value(9), UNKNOWN_DIVISION);
}

#[test]
fn departments_are_sorted_unique_names() {
    let dataset = common::dataset();
    assert_eq!(
        dataset.departments().unwrap(),
        vec![
            "ANTIOQUIA",
            "ATLANTICO",
            "BOGOTA D.C.",
            "BOLIVAR",
            UNKNOWN_DIVISION
        ]
    );
}

#[test]
fn age_groups_are_sorted_unique_codes() {
    let dataset = common::dataset();
    assert_eq!(dataset.age_groups().unwrap(), vec![5, 7, 9, 12, 17, 20, 29]);
}

#[test]
fn observed_causes_are_trimmed_codes() {
    let dataset = common::dataset();
    let observed = dataset.observed_causes().unwrap();
    assert!(observed.contains("X954"));
    assert!(observed.contains("I219"));
    assert_eq!(observed.len(), 6);
}

#[test]
fn department_filter_restricts_rows() {
    let dataset = common::dataset();
    let selection = Selection {
        department: Some("ANTIOQUIA".to_string()),
        ..Selection::all()
    };
    let filtered = dataset.filtered(&selection).unwrap();
    assert_eq!(filtered.num_rows(), 4);
}

#[test]
fn combined_filters_intersect() {
    let dataset = common::dataset();
    let selection = Selection {
        department: Some("ANTIOQUIA".to_string()),
        sex: Some(1),
        age_group: Some(12),
    };
    let filtered = dataset.filtered(&selection).unwrap();
    assert_eq!(filtered.num_rows(), 2);
}

#[test]
fn unmatched_filter_yields_empty_batch() {
    let dataset = common::dataset();
    let selection = Selection {
        department: Some("AMAZONAS".to_string()),
        ..Selection::all()
    };
    let filtered = dataset.filtered(&selection).unwrap();
    assert_eq!(filtered.num_rows(), 0);
}
