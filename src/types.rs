use serde::Deserialize;
use serde_json::{Map, Value};

// Leaderboard payload as written by the data collection job
#[derive(Debug, Default, Deserialize)]
pub struct RankPayload {
    #[serde(default)]
    pub top_repos: Option<Vec<Map<String, Value>>>,
    #[serde(default)]
    pub top_users: Option<Vec<Map<String, Value>>>,
    #[serde(default)]
    pub meta: Option<PayloadMeta>,
}

impl RankPayload {
    /// The ranked list, preferring `top_repos` over `top_users`.
    pub fn into_list(self) -> (Vec<Map<String, Value>>, Option<PayloadMeta>) {
        let list = self.top_repos.or(self.top_users).unwrap_or_default();
        (list, self.meta)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PayloadMeta {
    #[serde(default)]
    pub user_total_count: Option<Value>,
}

impl PayloadMeta {
    /// Only a JSON number counts; strings, nulls and the like are ignored.
    pub fn user_total_count(&self) -> Option<u64> {
        match self.user_total_count.as_ref()? {
            Value::Number(n) => n
                .as_u64()
                .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
            _ => None,
        }
    }
}
