use std::sync::Arc;

use vitales::codes::CatalogSource;
use vitales::server::{FilterQuery, router};
use vitales::{DashboardConfig, Selection, load_dashboard};

fn demo_config() -> DashboardConfig {
    DashboardConfig {
        demo: true,
        ..DashboardConfig::default()
    }
}

#[tokio::test]
async fn demo_dashboard_loads_end_to_end() {
    let dashboard = load_dashboard(&demo_config()).await.unwrap();
    assert_eq!(dashboard.data.num_rows(), 20_000);
    assert_eq!(dashboard.catalog.source(), CatalogSource::Canonical);

    // Every demo division resolves, so no row joined to the unknown label
    let departments = dashboard.data.departments().unwrap();
    assert!(!departments.is_empty());
    assert!(!departments.contains(&"Desconocido".to_string()));
}

#[tokio::test]
async fn router_builds_over_the_demo_dashboard() {
    let dashboard = load_dashboard(&demo_config()).await.unwrap();
    let _app = router(Arc::new(dashboard));
}

#[test]
fn filter_query_round_trips_a_selection() {
    let query = FilterQuery {
        departamento: Some("ANTIOQUIA".to_string()),
        sexo: Some("1".to_string()),
        edad: Some("12".to_string()),
    };
    assert_eq!(
        query.selection(),
        Selection {
            department: Some("ANTIOQUIA".to_string()),
            sex: Some(1),
            age_group: Some(12),
        }
    );
}
