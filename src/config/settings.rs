use super::fields::{DEFAULT_APP_NAME, DEFAULT_NOTIFICATION_EMAIL, DEFAULT_READY2RUN_WORKFLOW_ID};
use serde::{Deserialize, Serialize};

/// Naming and workflow identifiers used when building the stack plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppSettings {
    /// Prefix for every resource name.
    pub app_name: String,
    pub ready2run_workflow_id: String,
    pub notification_email: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            app_name: DEFAULT_APP_NAME.to_string(),
            ready2run_workflow_id: DEFAULT_READY2RUN_WORKFLOW_ID.to_string(),
            notification_email: DEFAULT_NOTIFICATION_EMAIL.to_string(),
        }
    }
}
