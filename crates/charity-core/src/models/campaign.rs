use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::format::{format_vnd, time_remaining_at};

/// Fundraising campaign. Amounts are stored by the backend in thousands of VND.
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    #[serde(rename = "goalAmount")]
    pub goal_amount: Option<f64>,
    #[serde(rename = "raisedAmount")]
    pub raised_amount: Option<f64>,
    #[serde(rename = "endDate")]
    #[cfg_attr(feature = "ts", ts(type = "string | null"))]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(rename = "imageUrl")]
    pub image_url: Option<String>,
    pub status: Option<String>,
}

impl Campaign {
    /// Percent of goal raised, clamped to 0..=100. Zero when no goal is set.
    pub fn progress_percent(&self) -> u8 {
        match (self.raised_amount, self.goal_amount) {
            (Some(raised), Some(goal)) if goal > 0.0 && raised.is_finite() => {
                ((raised / goal) * 100.0).clamp(0.0, 100.0).floor() as u8
            }
            _ => 0,
        }
    }

    pub fn raised_display(&self) -> String {
        format_vnd(self.raised_amount)
    }

    pub fn goal_display(&self) -> String {
        format_vnd(self.goal_amount)
    }

    pub fn time_remaining_at(&self, now: DateTime<Utc>) -> Option<String> {
        self.end_date.map(|end| time_remaining_at(end, now))
    }

    pub fn time_remaining(&self) -> Option<String> {
        self.time_remaining_at(Utc::now())
    }

    pub fn has_ended_at(&self, now: DateTime<Utc>) -> bool {
        self.end_date.map(|end| end <= now).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn campaign(raised: Option<f64>, goal: Option<f64>) -> Campaign {
        Campaign {
            id: 1,
            title: "Clean water for Ha Giang".to_string(),
            description: None,
            goal_amount: goal,
            raised_amount: raised,
            end_date: None,
            image_url: None,
            status: Some("active".to_string()),
        }
    }

    #[test]
    fn test_parse_campaign() {
        let json = r#"{"id": 3, "title": "Books", "goalAmount": 50000, "raisedAmount": 12500, "endDate": "2026-12-31T00:00:00Z"}"#;
        let c: Campaign = serde_json::from_str(json).unwrap();
        assert_eq!(c.progress_percent(), 25);
        assert_eq!(c.goal_display(), "50.000.000 ₫");
        assert!(c.end_date.is_some());
    }

    #[test]
    fn test_progress_percent_edges() {
        assert_eq!(campaign(Some(10.0), None).progress_percent(), 0);
        assert_eq!(campaign(Some(10.0), Some(0.0)).progress_percent(), 0);
        assert_eq!(campaign(Some(250.0), Some(100.0)).progress_percent(), 100);
        assert_eq!(campaign(Some(33.3), Some(100.0)).progress_percent(), 33);
        assert_eq!(campaign(None, Some(100.0)).raised_display(), "0 ₫");
    }

    #[test]
    fn test_time_remaining_and_ended() {
        let now = Utc.with_ymd_and_hms(2026, 10, 14, 12, 0, 0).unwrap();
        let mut c = campaign(None, None);
        assert_eq!(c.time_remaining_at(now), None);

        c.end_date = Some(now + Duration::days(3) + Duration::hours(2));
        assert_eq!(c.time_remaining_at(now).as_deref(), Some("3 days left"));
        assert!(!c.has_ended_at(now));

        c.end_date = Some(now - Duration::minutes(1));
        assert_eq!(c.time_remaining_at(now).as_deref(), Some("Ended"));
        assert!(c.has_ended_at(now));
    }
}
