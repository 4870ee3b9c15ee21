use crate::models::Dataset;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Critical,
}

impl HealthStatus {
    /// 0 issues is healthy, 1-2 degraded, 3 or more critical.
    pub fn from_issue_count(count: usize) -> Self {
        match count {
            0 => HealthStatus::Healthy,
            1 | 2 => HealthStatus::Degraded,
            _ => HealthStatus::Critical,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HealthStatus::Healthy => "healthy",
            HealthStatus::Degraded => "degraded",
            HealthStatus::Critical => "critical",
        }
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub issues: Vec<String>,
    pub recommendations: Vec<String>,
}

impl HealthReport {
    /// Issues paired with their recommendation.
    pub fn findings(&self) -> impl Iterator<Item = (&str, &str)> {
        self.issues
            .iter()
            .map(String::as_str)
            .zip(self.recommendations.iter().map(String::as_str))
    }
}

/// Classifies a dataset by how many content categories are unusable.
pub fn health_of(data: &Dataset) -> HealthReport {
    let rules = [
        (
            data.current_user.name.is_empty(),
            "Usuario actual no disponible",
            "Verificar datos de autenticación",
        ),
        (
            data.news.is_empty(),
            "No hay noticias disponibles",
            "Verificar fuente de noticias",
        ),
        (
            data.events.is_empty(),
            "No hay eventos disponibles",
            "Verificar calendario de eventos",
        ),
        (
            data.new_hires.is_empty(),
            "No hay información de nuevos empleados",
            "Verificar datos de RRHH",
        ),
        (
            data.quick_links.is_empty(),
            "No hay enlaces rápidos configurados",
            "Configurar enlaces útiles",
        ),
    ];

    let mut issues = Vec::new();
    let mut recommendations = Vec::new();
    for (failed, issue, recommendation) in rules {
        if failed {
            issues.push(issue.to_string());
            recommendations.push(recommendation.to_string());
        }
    }

    HealthReport {
        status: HealthStatus::from_issue_count(issues.len()),
        issues,
        recommendations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fallback_dataset;
    use crate::sanitize::sanitize_or_fallback;
    use crate::test_support::valid_fixture;

    fn populated() -> Dataset {
        sanitize_or_fallback(&valid_fixture())
    }

    #[test]
    fn test_populated_dataset_is_healthy() {
        let report = health_of(&populated());
        assert_eq!(report.status, HealthStatus::Healthy);
        assert!(report.issues.is_empty());
        assert!(report.recommendations.is_empty());
    }

    #[test]
    fn test_missing_news_and_events_is_degraded() {
        let mut data = populated();
        data.news.clear();
        data.events.clear();

        let report = health_of(&data);
        assert_eq!(report.status, HealthStatus::Degraded);
        assert_eq!(
            report.issues,
            vec!["No hay noticias disponibles", "No hay eventos disponibles"]
        );
        assert_eq!(
            report.recommendations,
            vec!["Verificar fuente de noticias", "Verificar calendario de eventos"]
        );
    }

    #[test]
    fn test_four_missing_categories_is_critical() {
        let mut data = populated();
        data.news.clear();
        data.events.clear();
        data.new_hires.clear();
        data.quick_links.clear();

        let report = health_of(&data);
        assert_eq!(report.status, HealthStatus::Critical);
        assert_eq!(report.issues.len(), 4);
    }

    #[test]
    fn test_empty_user_name_is_reported() {
        let mut data = populated();
        data.current_user.name.clear();

        let report = health_of(&data);
        assert_eq!(report.status, HealthStatus::Degraded);
        let findings: Vec<_> = report.findings().collect();
        assert_eq!(
            findings,
            vec![("Usuario actual no disponible", "Verificar datos de autenticación")]
        );
    }

    #[test]
    fn test_fallback_dataset_is_critical() {
        let report = health_of(&fallback_dataset());
        assert_eq!(report.status, HealthStatus::Critical);
        assert_eq!(report.issues.len(), 4);
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&HealthStatus::Degraded).unwrap();
        assert_eq!(json, "\"degraded\"");
    }
}
