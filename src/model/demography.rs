//! Demographic code tables
//!
//! Sex codes and the DANE `GRUPO_EDAD1` age-group buckets (0-29), with the
//! life-stage grouping used by the age distribution chart and the reference
//! table shown on the dashboard.

use serde::Serialize;

/// Sex as coded in the mortality extract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sex {
    /// Code 1
    Male,
    /// Code 2
    Female,
    /// Code 3
    Indeterminate,
}

impl Sex {
    /// Decode the extract's sex code
    #[must_use]
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(Self::Male),
            2 => Some(Self::Female),
            3 => Some(Self::Indeterminate),
            _ => None,
        }
    }

    /// Spanish display label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Male => "Masculino",
            Self::Female => "Femenino",
            Self::Indeterminate => "Indeterminado",
        }
    }

    /// Label for a raw code, `Desconocido` for codes outside the table
    #[must_use]
    pub fn label_for_code(code: i32) -> &'static str {
        Self::from_code(code).map_or("Desconocido", Self::label)
    }
}

/// Life-stage label for a `GRUPO_EDAD1` code
#[must_use]
pub fn age_stage(code: i32) -> &'static str {
    match code {
        0..=4 => "Mortalidad neonatal",
        5 | 6 => "Mortalidad infantil",
        7 | 8 => "Primera infancia",
        9 | 10 => "Niñez",
        11 => "Adolescencia",
        12 | 13 => "Juventud",
        14..=16 => "Adultez temprana",
        17..=19 => "Adultez intermedia",
        20..=24 => "Vejez",
        25..=28 => "Longevidad / Centenarios",
        29 => "Edad desconocida",
        _ => "Desconocido",
    }
}

/// Spanish month name for a 1-based month number
///
/// Values outside 1-12 label as `Desconocido`, matching how malformed month
/// codes surface on the trend chart.
#[must_use]
pub fn month_name(month: i32) -> &'static str {
    match month {
        1 => "Enero",
        2 => "Febrero",
        3 => "Marzo",
        4 => "Abril",
        5 => "Mayo",
        6 => "Junio",
        7 => "Julio",
        8 => "Agosto",
        9 => "Septiembre",
        10 => "Octubre",
        11 => "Noviembre",
        12 => "Diciembre",
        _ => "Desconocido",
    }
}

/// One row of the age-group reference table
#[derive(Debug, Clone, Serialize)]
pub struct AgeReferenceRow {
    /// `GRUPO_EDAD1` code or code range
    pub codigo: &'static str,
    /// Life-stage category
    pub categoria: &'static str,
    /// Raw age range covered by the codes
    pub rango: &'static str,
}

/// Reference table for the `GRUPO_EDAD1` buckets
pub const AGE_REFERENCE: &[AgeReferenceRow] = &[
    AgeReferenceRow { codigo: "0-4", categoria: "Mortalidad neonatal", rango: "Menor de 1 mes" },
    AgeReferenceRow { codigo: "5-6", categoria: "Mortalidad infantil", rango: "1 a 11 meses" },
    AgeReferenceRow { codigo: "7-8", categoria: "Primera infancia", rango: "1 a 4 años" },
    AgeReferenceRow { codigo: "9-10", categoria: "Niñez", rango: "5 a 14 años" },
    AgeReferenceRow { codigo: "11", categoria: "Adolescencia", rango: "15 a 19 años" },
    AgeReferenceRow { codigo: "12-13", categoria: "Juventud", rango: "20 a 29 años" },
    AgeReferenceRow { codigo: "14-16", categoria: "Adultez temprana", rango: "30 a 44 años" },
    AgeReferenceRow { codigo: "17-19", categoria: "Adultez intermedia", rango: "45 a 59 años" },
    AgeReferenceRow { codigo: "20-24", categoria: "Vejez", rango: "60 a 84 años" },
    AgeReferenceRow { codigo: "25-28", categoria: "Longevidad/Centenarios", rango: "85 a 100+ años" },
    AgeReferenceRow { codigo: "29", categoria: "Edad desconocida", rango: "Sin información" },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sex_codes_decode() {
        assert_eq!(Sex::from_code(1), Some(Sex::Male));
        assert_eq!(Sex::from_code(2), Some(Sex::Female));
        assert_eq!(Sex::from_code(3), Some(Sex::Indeterminate));
        assert_eq!(Sex::from_code(9), None);
        assert_eq!(Sex::label_for_code(9), "Desconocido");
    }

    #[test]
    fn age_stage_boundaries() {
        assert_eq!(age_stage(0), "Mortalidad neonatal");
        assert_eq!(age_stage(4), "Mortalidad neonatal");
        assert_eq!(age_stage(5), "Mortalidad infantil");
        assert_eq!(age_stage(11), "Adolescencia");
        assert_eq!(age_stage(16), "Adultez temprana");
        assert_eq!(age_stage(24), "Vejez");
        assert_eq!(age_stage(29), "Edad desconocida");
        assert_eq!(age_stage(42), "Desconocido");
    }

    #[test]
    fn month_names_cover_the_year() {
        assert_eq!(month_name(1), "Enero");
        assert_eq!(month_name(12), "Diciembre");
        assert_eq!(month_name(0), "Desconocido");
        assert_eq!(month_name(13), "Desconocido");
    }
}
