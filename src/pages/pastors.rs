use serde::Serialize;
use serde_json::Value;

use crate::api::DashboardApi;

#[derive(Debug, Clone, Default, Serialize)]
pub struct PastorsView {
    /// Entries of the API's `pastors` array; empty when unavailable.
    pub pastors: Vec<Value>,
    pub vision: Option<Value>,
}

/// Both requests run concurrently; either may be missing independently.
pub async fn load(api: &dyn DashboardApi) -> PastorsView {
    let (pastors, vision) = tokio::join!(api.pastors(), api.vision());

    let pastors = pastors
        .and_then(|mut body| match body.get_mut("pastors").map(Value::take) {
            Some(Value::Array(list)) => Some(list),
            _ => None,
        })
        .unwrap_or_default();

    PastorsView { pastors, vision }
}
