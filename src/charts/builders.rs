//! Builders for the eight dashboard payloads
//!
//! Each builder filters the joined table with the current selection, runs a
//! group-by/count, and shapes the result. The department chart is the one
//! deliberate exception to uniform filtering: it stays national and applies
//! only the sex and age filters.

use itertools::Itertools;
use rustc_hash::FxHashMap;

use super::{
    AgeGroupBars, CauseRow, CauseTable, CityBars, DepartmentBars, MonthlyTrend, PieSlices,
    SexByDepartment, SexSeries, SummaryStats,
};
use crate::aggregate::{
    bottom_n, count_by_int, count_by_int_pair, count_by_string, count_where_int_eq, distinct_int,
    sorted_by_key, top_n,
};
use crate::codes::CauseCatalog;
use crate::dataset::{MortalityData, Selection};
use crate::error::Result;
use crate::filter::{Expr, starts_with_filter};
use crate::model::{Sex, age_stage, month_name};

/// ICD-10 prefix for the homicide code family
const HOMICIDE_PREFIX: &str = "X95";

/// Municipalities below this count are dropped from the pie chart
const PIE_MIN_DEATHS: u64 = 5;

/// Headline statistics for the filtered rows
///
/// # Errors
/// Returns an error if filtering or aggregation fails
pub fn summary(data: &MortalityData, selection: &Selection) -> Result<SummaryStats> {
    let filtered = data.filtered(selection)?;
    Ok(SummaryStats {
        total_deaths: filtered.num_rows() as u64,
        male_deaths: count_where_int_eq(&filtered, "SEXO", 1)?,
        female_deaths: count_where_int_eq(&filtered, "SEXO", 2)?,
        departments: distinct_int(&filtered, "COD_DPTO")?,
    })
}

/// Deaths per department in department code order
///
/// Applies only the sex and age filters; the chart keeps national breadth.
///
/// # Errors
/// Returns an error if filtering or aggregation fails
pub fn deaths_by_department(data: &MortalityData, selection: &Selection) -> Result<DepartmentBars> {
    let filtered = data.filtered(&selection.without_department())?;
    let counts = count_by_int(&filtered, "COD_DPTO")?;

    let mut labels = Vec::with_capacity(counts.len());
    let mut values = Vec::with_capacity(counts.len());
    for (code, count) in sorted_by_key(counts) {
        labels.push(data.divisions().department_label(Some(code)));
        values.push(count);
    }
    Ok(DepartmentBars { labels, values })
}

/// Deaths per month in calendar order
///
/// # Errors
/// Returns an error if filtering or aggregation fails
pub fn monthly_trend(data: &MortalityData, selection: &Selection) -> Result<MonthlyTrend> {
    let filtered = data.filtered(selection)?;
    let counts = count_by_int(&filtered, "MES")?;

    let mut labels = Vec::with_capacity(counts.len());
    let mut values = Vec::with_capacity(counts.len());
    for (month, count) in sorted_by_key(counts) {
        labels.push(month_name(month));
        values.push(count);
    }
    Ok(MonthlyTrend { labels, values })
}

/// Top five municipalities by homicide count
///
/// # Errors
/// Returns an error if filtering or aggregation fails
pub fn most_violent_cities(data: &MortalityData, selection: &Selection) -> Result<CityBars> {
    let filtered = data.filter_with(Expr::And(vec![
        starts_with_filter("CAUSA_DEFUNCION", HOMICIDE_PREFIX),
        selection.to_expr(),
    ]))?;
    let counts = count_by_int_pair(&filtered, "COD_DPTO", "COD_MUNIC")?;

    let mut labels = Vec::new();
    let mut values = Vec::new();
    for ((dpto, munic), count) in top_n(counts, 5) {
        labels.push(data.divisions().municipality_label(Some(dpto), Some(munic)));
        values.push(count);
    }
    Ok(CityBars { labels, values })
}

/// The ten municipalities with the lowest mortality, at least five deaths each
///
/// # Errors
/// Returns an error if filtering or aggregation fails
pub fn lowest_mortality_cities(data: &MortalityData, selection: &Selection) -> Result<PieSlices> {
    let filtered = data.filtered(selection)?;
    let counts: FxHashMap<(i32, i32), u64> =
        count_by_int_pair(&filtered, "COD_DPTO", "COD_MUNIC")?
            .into_iter()
            .filter(|(_, count)| *count >= PIE_MIN_DEATHS)
            .collect();

    let mut labels = Vec::new();
    let mut values = Vec::new();
    for ((dpto, munic), count) in bottom_n(counts, 10) {
        labels.push(data.divisions().municipality_label(Some(dpto), Some(munic)));
        values.push(count);
    }
    Ok(PieSlices { labels, values })
}

/// Top ten causes of death with resolved descriptions
///
/// # Errors
/// Returns an error if filtering or aggregation fails
pub fn leading_causes(
    data: &MortalityData,
    catalog: &CauseCatalog,
    selection: &Selection,
) -> Result<CauseTable> {
    let filtered = data.filtered(selection)?;
    let counts = count_by_string(&filtered, "CAUSA_DEFUNCION")?;

    let rows = top_n(counts, 10)
        .into_iter()
        .map(|(codigo, total)| CauseRow {
            causa: catalog.describe(&codigo),
            codigo,
            total,
        })
        .collect_vec();
    Ok(CauseTable { rows })
}

/// Deaths by sex stacked per department
///
/// # Errors
/// Returns an error if filtering or aggregation fails
pub fn sex_by_department(data: &MortalityData, selection: &Selection) -> Result<SexByDepartment> {
    let filtered = data.filtered(selection)?;
    let counts = count_by_int_pair(&filtered, "COD_DPTO", "SEXO")?;

    let department_codes = counts
        .keys()
        .map(|(dpto, _)| *dpto)
        .unique()
        .sorted()
        .collect_vec();
    let departments = department_codes
        .iter()
        .map(|code| data.divisions().department_label(Some(*code)))
        .collect_vec();

    // Fold raw sex codes onto display labels so unexpected codes stack too
    let mut by_label: FxHashMap<&'static str, FxHashMap<i32, u64>> = FxHashMap::default();
    for ((dpto, sex_code), count) in counts {
        *by_label
            .entry(Sex::label_for_code(sex_code))
            .or_default()
            .entry(dpto)
            .or_insert(0) += count;
    }

    let series = ["Masculino", "Femenino", "Indeterminado", "Desconocido"]
        .into_iter()
        .filter_map(|label| {
            let per_department = by_label.get(label)?;
            let values = department_codes
                .iter()
                .map(|code| per_department.get(code).copied().unwrap_or(0))
                .collect_vec();
            Some(SexSeries { label, values })
        })
        .collect_vec();

    Ok(SexByDepartment {
        departments,
        series,
    })
}

/// Deaths per life-stage age group, most frequent first
///
/// # Errors
/// Returns an error if filtering or aggregation fails
pub fn age_group_distribution(data: &MortalityData, selection: &Selection) -> Result<AgeGroupBars> {
    let filtered = data.filtered(selection)?;
    let code_counts = count_by_int(&filtered, "GRUPO_EDAD1")?;

    let mut stage_counts: FxHashMap<&'static str, u64> = FxHashMap::default();
    for (code, count) in code_counts {
        *stage_counts.entry(age_stage(code)).or_insert(0) += count;
    }

    let mut labels = Vec::with_capacity(stage_counts.len());
    let mut values = Vec::with_capacity(stage_counts.len());
    for (stage, count) in top_n(stage_counts, usize::MAX) {
        labels.push(stage);
        values.push(count);
    }
    Ok(AgeGroupBars { labels, values })
}
