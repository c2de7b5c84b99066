// src/services/revenue.rs

use crate::models::{
    ChartSeries, RevenueComparisonReply, RevenueData, RevenuePeriod, RevenuePeriodType,
    RevenueTrendReply,
};

impl RevenuePeriod {
    /// Value of the upstream `time_period` parameter.
    pub fn as_param(self) -> &'static str {
        match self {
            RevenuePeriod::Last7Days => "last_7_days",
            RevenuePeriod::Last30Days => "last_30_days",
            RevenuePeriod::Last6Months => "last_6_months",
            RevenuePeriod::LastYear => "last_year",
            RevenuePeriod::Last5Years => "last_5_years",
        }
    }
}

impl RevenuePeriodType {
    pub fn as_param(self) -> &'static str {
        match self {
            RevenuePeriodType::Daily => "daily",
            RevenuePeriodType::Weekly => "weekly",
            RevenuePeriodType::Monthly => "monthly",
        }
    }

    /// Chart labels for the previous and current period.
    pub fn labels(self) -> [&'static str; 2] {
        match self {
            RevenuePeriodType::Daily => ["Yesterday", "Today"],
            RevenuePeriodType::Weekly => ["Previous Week", "This Week"],
            RevenuePeriodType::Monthly => ["Last Month", "This Month"],
        }
    }
}

impl RevenueData {
    pub fn empty() -> Self {
        Self::default()
    }

    /// The headline total is the latest point of the series.
    pub fn from_trend(reply: RevenueTrendReply) -> Self {
        let total = reply.data.last().copied().unwrap_or(0.0);
        Self {
            total,
            trend: reply.trend,
            chart_data: ChartSeries {
                labels: reply.labels,
                data: reply.data,
            },
        }
    }

    pub fn from_comparison(reply: &RevenueComparisonReply, period_type: RevenuePeriodType) -> Self {
        let [previous_label, current_label] = period_type.labels();
        Self {
            total: reply.current_period.revenue,
            trend: reply.growth_rate,
            chart_data: ChartSeries {
                labels: vec![previous_label.to_string(), current_label.to_string()],
                data: vec![reply.previous_period.revenue, reply.current_period.revenue],
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn trend_total_is_the_last_point() {
        let reply: RevenueTrendReply = serde_json::from_value(json!({
            "labels": ["Mar 1", "Mar 2", "Mar 3"],
            "data": [100.0, 250.5, 180.0],
            "trend": -28.1
        }))
        .unwrap();
        let data = RevenueData::from_trend(reply);
        assert_eq!(data.total, 180.0);
        assert_eq!(data.trend, -28.1);
        assert_eq!(data.chart_data.labels.len(), 3);
    }

    #[test]
    fn empty_trend_totals_zero() {
        let data = RevenueData::from_trend(RevenueTrendReply::default());
        assert_eq!(data, RevenueData::empty());
    }

    #[test]
    fn comparison_labels_follow_period_type() {
        let reply: RevenueComparisonReply = serde_json::from_value(json!({
            "current_period": {"revenue": 1200.0, "start_date": "2025-03-10"},
            "previous_period": {"revenue": 1000.0},
            "growth_rate": 20.0,
            "period_type": "weekly",
            "metadata": {"currency": "INR"}
        }))
        .unwrap();
        let data = RevenueData::from_comparison(&reply, RevenuePeriodType::Weekly);
        assert_eq!(data.chart_data.labels, vec!["Previous Week", "This Week"]);
        assert_eq!(data.chart_data.data, vec![1000.0, 1200.0]);
        assert_eq!(data.total, 1200.0);
        assert_eq!(data.trend, 20.0);
    }

    #[test]
    fn query_values_match_upstream_names() {
        assert_eq!(RevenuePeriod::default().as_param(), "last_30_days");
        assert_eq!(RevenuePeriodType::Monthly.as_param(), "monthly");
        let parsed: RevenuePeriod = serde_json::from_value(json!("last_year")).unwrap();
        assert_eq!(parsed, RevenuePeriod::LastYear);
    }
}
