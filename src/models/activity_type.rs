use serde::{Deserialize, Serialize};

/// One option of the activity-type select, as served by `/getActivityType`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityType {
    pub id: i64,
    pub value: String,
}
