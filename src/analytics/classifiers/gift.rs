use serde::Serialize;

use super::Withheld;
use crate::analytics::math::pct;
use crate::analytics::models::{Event, EventKind};

const NO_GIFTS_NOTE: &str =
    "No gift events ingested yet. Add event stream or manual tags to unlock ROI scoring.";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GiftMetrics {
    #[serde(rename = "earlyGiftRate")]
    pub early_gift_rate: Option<f64>,
    #[serde(rename = "lateGiftRate")]
    pub late_gift_rate: Option<f64>,
    #[serde(rename = "unitGiftRate")]
    pub unit_gift_rate: Option<f64>,
    #[serde(rename = "itemGiftRate")]
    pub item_gift_rate: Option<f64>,
    #[serde(rename = "giftROI")]
    pub gift_roi: Option<f64>,
    #[serde(rename = "benchWasteRate")]
    pub bench_waste_rate: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum GiftEfficiency {
    NeedsGiftEvents {
        metrics: Withheld,
        notes: Vec<&'static str>,
    },
    Ok {
        metrics: GiftMetrics,
        /// Raw count of gifts sent while the partner was already stable.
        over_gifting_alerts: usize,
    },
}

impl GiftEfficiency {
    pub fn metrics(&self) -> Option<&GiftMetrics> {
        match self {
            GiftEfficiency::Ok { metrics, .. } => Some(metrics),
            GiftEfficiency::NeedsGiftEvents { .. } => None,
        }
    }
}

pub fn compute_gift_efficiency(events: &[Event]) -> GiftEfficiency {
    let gifts: Vec<&Event> = events.iter().filter(|e| e.is(EventKind::GiftSent)).collect();
    if gifts.is_empty() {
        return GiftEfficiency::NeedsGiftEvents {
            metrics: Withheld,
            notes: vec![NO_GIFTS_NOTE],
        };
    }

    let total = gifts.len();
    let early = count_where(&gifts, |g| stage_major(g) <= 2);
    let late = count_where(&gifts, |g| stage_major(g) >= 4);
    let units = count_where(&gifts, |g| g.str_field("giftType") == Some("unit"));
    let items = count_where(&gifts, |g| g.str_field("giftType") == Some("item"));
    let became_carry = count_where(&gifts, |g| g.str_field("outcome") == Some("became_carry"));
    let benched = count_where(&gifts, |g| g.str_field("outcome") == Some("benched"));

    GiftEfficiency::Ok {
        metrics: GiftMetrics {
            early_gift_rate: pct(early, total),
            late_gift_rate: pct(late, total),
            unit_gift_rate: pct(units, total),
            item_gift_rate: pct(items, total),
            gift_roi: pct(became_carry, total),
            bench_waste_rate: pct(benched, total),
        },
        over_gifting_alerts: count_where(&gifts, |g| g.str_field("partnerState") == Some("stable")),
    }
}

/// Gifts with no recorded stage land in the early bucket.
fn stage_major(gift: &Event) -> i64 {
    gift.int_field("stageMajor").unwrap_or(-1)
}

fn count_where(gifts: &[&Event], predicate: impl Fn(&Event) -> bool) -> usize {
    gifts.iter().filter(|gift| predicate(**gift)).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn events(values: Vec<Value>) -> Vec<Event> {
        values.into_iter().map(Event::from).collect()
    }

    #[test]
    fn empty_log_reports_needs_gift_events() {
        let report = compute_gift_efficiency(&[]);
        assert!(report.metrics().is_none());

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["status"], json!("needs_gift_events"));
        assert!(value["metrics"].is_null());
        assert_eq!(value["notes"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn other_event_kinds_do_not_count_as_gifts() {
        let log = events(vec![json!({"type": "roll_down"}), json!({"type": "rescue_arrival"})]);
        assert!(matches!(
            compute_gift_efficiency(&log),
            GiftEfficiency::NeedsGiftEvents { .. }
        ));
    }

    #[test]
    fn rates_over_all_gifts_in_both_shapes() {
        let log = events(vec![
            json!({"type": "gift_sent", "stageMajor": 2, "giftType": "unit", "outcome": "became_carry"}),
            json!({"type": "gift_sent", "payload": {"stageMajor": 4, "giftType": "item", "outcome": "benched", "partnerState": "stable"}}),
            json!({"type": "gift_sent", "payload": {"stageMajor": 3, "giftType": "item", "partnerState": "stable"}}),
            json!({"type": "gift_sent", "payload": {"giftType": "unit", "outcome": "became_carry"}}),
            json!({"type": "roll_down", "stageMajor": 4}),
        ]);

        let report = compute_gift_efficiency(&log);
        let metrics = report.metrics().unwrap();
        assert_eq!(metrics.early_gift_rate, Some(50.0));
        assert_eq!(metrics.late_gift_rate, Some(25.0));
        assert_eq!(metrics.unit_gift_rate, Some(50.0));
        assert_eq!(metrics.item_gift_rate, Some(50.0));
        assert_eq!(metrics.gift_roi, Some(50.0));
        assert_eq!(metrics.bench_waste_rate, Some(25.0));

        match report {
            GiftEfficiency::Ok {
                over_gifting_alerts,
                ..
            } => assert_eq!(over_gifting_alerts, 2),
            other => panic!("expected ok report, got {:?}", other),
        }
    }

    #[test]
    fn ok_report_serializes_camel_case_keys() {
        let log = events(vec![json!({"type": "gift_sent", "giftType": "unit"})]);
        let value = serde_json::to_value(compute_gift_efficiency(&log)).unwrap();
        assert_eq!(value["status"], json!("ok"));
        assert_eq!(value["metrics"]["unitGiftRate"], json!(100.0));
        assert_eq!(value["metrics"]["giftROI"], json!(0.0));
        assert_eq!(value["overGiftingAlerts"], json!(0));
    }
}
