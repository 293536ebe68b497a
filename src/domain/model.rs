use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Response wrapper used by the backend: `{ code, message, data }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsEnvelope {
    pub code: i64,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<EmployeeStats>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeStats {
    pub total: Option<i64>,
    pub dept_count: Option<i64>,
    pub average_salary: Option<f64>,
    pub active_count: Option<i64>,
    #[serde(default)]
    pub dept_distribution: Vec<Map<String, Value>>,
    #[serde(default)]
    pub gender_distribution: Vec<Map<String, Value>>,
    #[serde(default)]
    pub salary_distribution: Vec<Map<String, Value>>,
}

impl StatsEnvelope {
    /// Best-effort typed view; `None` when the document has another shape.
    pub fn from_value(value: &Value) -> Option<Self> {
        StatsEnvelope::deserialize(value).ok()
    }

    pub fn is_ok(&self) -> bool {
        self.code == 200
    }
}
