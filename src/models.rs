use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// Everything the dashboard renders, as read from the fixture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub current_user: CurrentUser,
    pub news: Vec<NewsItem>,
    pub events: Vec<EventItem>,
    pub new_hires: Vec<EmployeeItem>,
    pub quick_links: Vec<QuickLinkItem>,
    pub spaces: Vec<SpaceItem>,
    pub applications: Vec<ApplicationItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub department: String,
    pub role: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    pub id: String,
    pub title: String,
    pub author: String,
    pub publish_date: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventItem {
    pub id: String,
    pub title: String,
    pub start_date: String,
    pub end_date: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeItem {
    pub id: String,
    pub name: String,
    pub position: String,
    pub department: String,
    pub start_date: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickLinkItem {
    pub id: String,
    pub title: String,
    pub url: String,
    pub category: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpaceItem {
    pub id: String,
    pub name: String,
    pub description: String,
    // Kept as a JSON number so integers and floats re-serialize untouched
    pub member_count: Number,
    pub is_active: bool,
    pub last_activity: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationItem {
    pub id: String,
    pub name: String,
    pub url: String,
    pub icon: String,
    pub category: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Item count of each of the six sequences.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetCounts {
    pub news: usize,
    pub events: usize,
    pub new_hires: usize,
    pub quick_links: usize,
    pub spaces: usize,
    pub applications: usize,
}

impl DatasetCounts {
    pub fn total(&self) -> usize {
        self.news + self.events + self.new_hires + self.quick_links + self.spaces + self.applications
    }

    /// Labelled counts in dataset field order.
    pub fn labelled(&self) -> [(&'static str, usize); 6] {
        [
            ("News", self.news),
            ("Events", self.events),
            ("New Hires", self.new_hires),
            ("Quick Links", self.quick_links),
            ("Spaces", self.spaces),
            ("Applications", self.applications),
        ]
    }
}

impl Dataset {
    pub fn counts(&self) -> DatasetCounts {
        DatasetCounts {
            news: self.news.len(),
            events: self.events.len(),
            new_hires: self.new_hires.len(),
            quick_links: self.quick_links.len(),
            spaces: self.spaces.len(),
            applications: self.applications.len(),
        }
    }
}

/// The user substituted when the fixture's own user can't be trusted.
pub fn fallback_user() -> CurrentUser {
    CurrentUser {
        id: "fallback-user".to_string(),
        name: "Usuario Desconocido".to_string(),
        email: "usuario@empresa.com".to_string(),
        department: "General".to_string(),
        role: "Empleado".to_string(),
        extra: Map::new(),
    }
}

/// Builds a fresh default dataset: fallback user, every sequence empty.
pub fn fallback_dataset() -> Dataset {
    Dataset {
        current_user: fallback_user(),
        news: Vec::new(),
        events: Vec::new(),
        new_hires: Vec::new(),
        quick_links: Vec::new(),
        spaces: Vec::new(),
        applications: Vec::new(),
    }
}
