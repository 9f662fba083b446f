//! Interactive filter selection
//!
//! The dashboard's three dropdowns compile to a conjunction of equality
//! predicates over the joined mortality table.

use serde::Deserialize;

use crate::filter::{Expr, LiteralValue, eq_filter};

/// The state of the three dashboard filters; `None` means "all"
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Selection {
    /// Department name (`NOM_DPTO` equality)
    pub department: Option<String>,
    /// Sex code (`SEXO` equality)
    pub sex: Option<i32>,
    /// Age-group code (`GRUPO_EDAD1` equality)
    pub age_group: Option<i32>,
}

impl Selection {
    /// A selection with no active filters
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Copy of this selection with the department filter cleared
    ///
    /// The national department chart keeps its geographic breadth regardless
    /// of the department dropdown.
    #[must_use]
    pub fn without_department(&self) -> Self {
        Self {
            department: None,
            ..self.clone()
        }
    }

    /// Compile the selection into a filter expression
    #[must_use]
    pub fn to_expr(&self) -> Expr {
        let mut predicates = Vec::new();
        if let Some(department) = &self.department {
            predicates.push(eq_filter(
                "NOM_DPTO",
                LiteralValue::String(department.clone()),
            ));
        }
        if let Some(sex) = self.sex {
            predicates.push(eq_filter("SEXO", LiteralValue::Int(i64::from(sex))));
        }
        if let Some(age_group) = self.age_group {
            predicates.push(eq_filter(
                "GRUPO_EDAD1",
                LiteralValue::Int(i64::from(age_group)),
            ));
        }
        if predicates.is_empty() {
            Expr::AlwaysTrue
        } else {
            Expr::And(predicates)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_selection_is_always_true() {
        assert!(matches!(Selection::all().to_expr(), Expr::AlwaysTrue));
    }

    #[test]
    fn full_selection_requires_all_three_columns() {
        let selection = Selection {
            department: Some("ANTIOQUIA".to_string()),
            sex: Some(1),
            age_group: Some(12),
        };
        let required = selection.to_expr().required_columns();
        assert!(required.contains("NOM_DPTO"));
        assert!(required.contains("SEXO"));
        assert!(required.contains("GRUPO_EDAD1"));
    }

    #[test]
    fn without_department_keeps_the_other_filters() {
        let selection = Selection {
            department: Some("ANTIOQUIA".to_string()),
            sex: Some(2),
            age_group: None,
        };
        let national = selection.without_department();
        assert_eq!(national.department, None);
        assert_eq!(national.sex, Some(2));
    }
}
