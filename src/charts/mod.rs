//! Chart and table payloads
//!
//! The dashboard renders exactly eight shapes; each has a serializable
//! payload type here and a builder in [`builders`] that produces it from the
//! current filter selection.

pub mod builders;

use serde::Serialize;

pub use builders::{
    age_group_distribution, deaths_by_department, leading_causes, lowest_mortality_cities,
    monthly_trend, most_violent_cities, sex_by_department, summary,
};

/// Headline statistics for the stat cards
#[derive(Debug, Clone, Serialize)]
pub struct SummaryStats {
    /// Total deaths in the filtered rows
    pub total_deaths: u64,
    /// Deaths with sex code 1
    pub male_deaths: u64,
    /// Deaths with sex code 2
    pub female_deaths: u64,
    /// Distinct departments represented
    pub departments: u64,
}

/// Deaths per department, department code order
#[derive(Debug, Clone, Serialize)]
pub struct DepartmentBars {
    /// Department names
    pub labels: Vec<String>,
    /// Death counts
    pub values: Vec<u64>,
}

/// Deaths per month, calendar order
#[derive(Debug, Clone, Serialize)]
pub struct MonthlyTrend {
    /// Spanish month names
    pub labels: Vec<&'static str>,
    /// Death counts
    pub values: Vec<u64>,
}

/// Top homicide municipalities
#[derive(Debug, Clone, Serialize)]
pub struct CityBars {
    /// Municipality names
    pub labels: Vec<String>,
    /// Homicide counts
    pub values: Vec<u64>,
}

/// Lowest-mortality municipalities as pie slices
#[derive(Debug, Clone, Serialize)]
pub struct PieSlices {
    /// Municipality names
    pub labels: Vec<String>,
    /// Death counts
    pub values: Vec<u64>,
}

/// One row of the leading-causes table
#[derive(Debug, Clone, Serialize)]
pub struct CauseRow {
    /// ICD-10 code
    pub codigo: String,
    /// Resolved Spanish description
    pub causa: String,
    /// Reported cases
    pub total: u64,
}

/// The leading-causes table
#[derive(Debug, Clone, Serialize)]
pub struct CauseTable {
    /// Rows, most frequent first
    pub rows: Vec<CauseRow>,
}

/// One stacked series of the sex-by-department chart
#[derive(Debug, Clone, Serialize)]
pub struct SexSeries {
    /// Sex label
    pub label: &'static str,
    /// Death counts aligned with the department axis
    pub values: Vec<u64>,
}

/// Deaths by sex, stacked per department
#[derive(Debug, Clone, Serialize)]
pub struct SexByDepartment {
    /// Department names, department code order
    pub departments: Vec<String>,
    /// One series per sex present in the data
    pub series: Vec<SexSeries>,
}

/// Deaths per life-stage age group
#[derive(Debug, Clone, Serialize)]
pub struct AgeGroupBars {
    /// Life-stage labels, most frequent first
    pub labels: Vec<&'static str>,
    /// Death counts
    pub values: Vec<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payloads_serialize_to_the_wire_shape() {
        let stats = SummaryStats {
            total_deaths: 11,
            male_deaths: 7,
            female_deaths: 3,
            departments: 5,
        };
        let value = serde_json::to_value(&stats).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "total_deaths": 11,
                "male_deaths": 7,
                "female_deaths": 3,
                "departments": 5,
            })
        );

        let row = CauseRow {
            codigo: "I219".to_string(),
            causa: "Infarto agudo del miocardio".to_string(),
            total: 3,
        };
        let value = serde_json::to_value(&row).unwrap();
        assert_eq!(value["codigo"], "I219");
        assert_eq!(value["total"], 3);
    }
}
