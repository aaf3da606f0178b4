//! Account usage statistics returned by `/api/account/usage-stats`.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::lenient;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageStats {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api: Option<ApiUsage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub templates: Option<TemplateUsage>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recent: Vec<Activity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account: Option<AccountInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiUsage {
    #[serde(deserialize_with = "lenient::count")]
    pub total_calls: Option<u64>,
    #[serde(deserialize_with = "lenient::count")]
    pub templates_rendered: Option<u64>,
    /// Bytes.
    #[serde(deserialize_with = "lenient::count")]
    pub data_processed: Option<u64>,
    #[serde(deserialize_with = "lenient::count")]
    pub rate_limit_remaining: Option<u64>,
    /// A timestamp string or an epoch number, shown as received.
    #[serde(deserialize_with = "lenient::string")]
    pub rate_limit_reset: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TemplateUsage {
    pub most_used: Option<TemplateRef>,
    #[serde(deserialize_with = "lenient::count")]
    pub unique_count: Option<u64>,
    /// Milliseconds.
    #[serde(deserialize_with = "lenient::number")]
    pub avg_render_time: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateRef {
    #[serde(deserialize_with = "lenient::string")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub id: Option<String>,
}

impl TemplateRef {
    /// Name when known, otherwise the ID.
    pub fn label(&self) -> Option<&str> {
        self.name.as_deref().or(self.id.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Activity {
    #[serde(deserialize_with = "lenient::string")]
    pub action: Option<String>,
    /// RFC 3339 text or epoch milliseconds.
    #[serde(deserialize_with = "lenient::string")]
    pub timestamp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<TemplateRef>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AccountInfo {
    #[serde(deserialize_with = "lenient::string")]
    pub plan: Option<String>,
    #[serde(deserialize_with = "lenient::count")]
    pub monthly_usage: Option<u64>,
    #[serde(deserialize_with = "lenient::count")]
    pub monthly_limit: Option<u64>,
}

impl AccountInfo {
    /// Share of the monthly limit already used, in percent.
    ///
    /// `None` when the plan has no (or a zero) limit.
    pub fn usage_percentage(&self) -> Option<f64> {
        match self.monthly_limit {
            Some(limit) if limit > 0 => {
                Some(self.monthly_usage.unwrap_or(0) as f64 / limit as f64 * 100.0)
            }
            _ => None,
        }
    }
}

const DEMO_TEMPLATE_NAME: &str = "Deep Nested JSON Transform Demo";
const DEMO_TEMPLATE_ID: &str = "72d561bf-3c17-4b34-b48d-cee00f1f0e1e";

impl UsageStats {
    /// Demonstration figures for deployments without a usage endpoint.
    pub fn sample(now: DateTime<Utc>) -> Self {
        let demo = || TemplateRef {
            name: Some(DEMO_TEMPLATE_NAME.into()),
            id: Some(DEMO_TEMPLATE_ID.into()),
        };
        let ago = |minutes: i64| (now - Duration::minutes(minutes)).to_rfc3339();

        Self {
            api: Some(ApiUsage {
                total_calls: Some(127),
                templates_rendered: Some(89),
                data_processed: Some(2_048_576),
                rate_limit_remaining: Some(4873),
                rate_limit_reset: Some((now + Duration::hours(1)).to_rfc3339()),
            }),
            templates: Some(TemplateUsage {
                most_used: Some(demo()),
                unique_count: Some(15),
                avg_render_time: Some(245.0),
            }),
            recent: vec![
                Activity {
                    action: Some("Template rendered".into()),
                    timestamp: Some(ago(5)),
                    template: Some(demo()),
                },
                Activity {
                    action: Some("Template listed".into()),
                    timestamp: Some(ago(10)),
                    template: None,
                },
                Activity {
                    action: Some("Template rendered".into()),
                    timestamp: Some(ago(15)),
                    template: Some(TemplateRef {
                        name: Some("Invoice Template".into()),
                        id: Some("22222222-2222-2222-2222-222222222222".into()),
                    }),
                },
            ],
            account: Some(AccountInfo {
                plan: Some("Free".into()),
                monthly_usage: Some(127),
                monthly_limit: Some(1000),
            }),
        }
    }
}

/// Human-readable byte count: `0 B`, `1.5 KB`, `1.95 MB`, ...
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

    if bytes == 0 {
        return "0 B".into();
    }

    let exponent = ((bytes as f64).ln() / 1024_f64.ln()).floor() as usize;
    let exponent = exponent.min(UNITS.len() - 1);
    let scaled = bytes as f64 / 1024_f64.powi(exponent as i32);

    let mut number = format!("{scaled:.2}");
    if number.contains('.') {
        let trimmed = number.trim_end_matches('0').trim_end_matches('.').len();
        number.truncate(trimmed);
    }
    format!("{number} {}", UNITS[exponent])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bytes_are_scaled_and_trimmed() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(1024), "1 KB");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(2_048_576), "1.95 MB");
    }

    #[test]
    fn huge_values_stay_in_gigabytes() {
        assert_eq!(format_bytes(2 * 1024 * 1024 * 1024 * 1024), "2048 GB");
    }

    #[test]
    fn usage_percentage_needs_a_limit() {
        let account = AccountInfo {
            plan: None,
            monthly_usage: Some(250),
            monthly_limit: Some(1000),
        };
        assert_eq!(account.usage_percentage(), Some(25.0));
        assert_eq!(AccountInfo::default().usage_percentage(), None);
    }

    #[test]
    fn partial_payload_deserialises() {
        let stats: UsageStats = serde_json::from_value(json!({
            "api": {"totalCalls": 3},
            "recent": [{"action": "Template listed", "timestamp": "2026-01-01T00:00:00Z"}]
        }))
        .unwrap();
        assert_eq!(stats.api.unwrap().total_calls, Some(3));
        assert_eq!(stats.recent.len(), 1);
        assert!(stats.account.is_none());
    }

    #[test]
    fn loosely_typed_fields_deserialise() {
        let stats: UsageStats = serde_json::from_value(json!({
            "api": {"totalCalls": "12", "rateLimitReset": 1700000000},
            "recent": [{"action": "Template rendered", "timestamp": 1700000000000u64}],
            "account": {"monthlyUsage": 5.0, "monthlyLimit": null}
        }))
        .unwrap();
        let api = stats.api.unwrap();
        assert_eq!(api.total_calls, Some(12));
        assert_eq!(api.rate_limit_reset.as_deref(), Some("1700000000"));
        assert_eq!(stats.recent[0].timestamp.as_deref(), Some("1700000000000"));
        let account = stats.account.unwrap();
        assert_eq!(account.monthly_usage, Some(5));
        assert_eq!(account.monthly_limit, None);
    }

    #[test]
    fn sample_is_anchored_on_now() {
        let now = Utc::now();
        let stats = UsageStats::sample(now);
        assert_eq!(stats.recent.len(), 3);
        assert_eq!(
            stats.templates.unwrap().most_used.unwrap().label(),
            Some(DEMO_TEMPLATE_NAME)
        );
        let percentage = stats.account.unwrap().usage_percentage().unwrap();
        assert!((percentage - 12.7).abs() < 1e-9);
    }
}
