//! Core types for the history analytics engine

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::format::{display_date, usd};

/// Severity level of a recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Informational - no action needed
    Info,
    /// Worth attention but not urgent
    Attention,
    /// Should be addressed soon
    Warning,
    /// Requires immediate attention
    Alert,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Attention => "attention",
            Severity::Warning => "warning",
            Severity::Alert => "alert",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "info" => Ok(Severity::Info),
            "attention" => Ok(Severity::Attention),
            "warning" => Ok(Severity::Warning),
            "alert" => Ok(Severity::Alert),
            _ => Err(format!("Unknown severity: {}", s)),
        }
    }
}

/// Direction of net profit over the recent window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Rising,
    /// Also covers an unchanged profit
    Falling,
}

impl TrendDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrendDirection::Rising => "rising",
            TrendDirection::Falling => "falling",
        }
    }
}

/// One line of pattern analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PatternInsight {
    InsufficientData,
    BestWeekday { weekday: Weekday, average: f64 },
    WorstWeekday { weekday: Weekday, average: f64 },
    Trend { direction: TrendDirection },
    SuccessRate { percent: f64 },
    AverageProfit { amount: f64 },
}

impl fmt::Display for PatternInsight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternInsight::InsufficientData => {
                write!(f, "Not enough data for pattern analysis")
            }
            PatternInsight::BestWeekday { weekday, .. } => {
                write!(f, "Best day of the week: {}", weekday_name(*weekday))
            }
            PatternInsight::WorstWeekday { weekday, .. } => {
                write!(f, "Worst day of the week: {}", weekday_name(*weekday))
            }
            PatternInsight::Trend { direction } => {
                write!(f, "Weekly trend: profit is {}", direction.as_str())
            }
            PatternInsight::SuccessRate { percent } => {
                write!(f, "Profitable days: {:.1}%", percent)
            }
            PatternInsight::AverageProfit { amount } => {
                write!(f, "Average profit per day: {}", usd(*amount))
            }
        }
    }
}

pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyKind {
    High,
    Low,
}

/// A day whose net profit is far from the historical mean
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anomaly {
    pub date: NaiveDate,
    pub net_profit: f64,
    pub kind: AnomalyKind,
}

impl fmt::Display for Anomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.kind {
            AnomalyKind::High => "unusually high",
            AnomalyKind::Low => "unusually low",
        };
        write!(
            f,
            "{}: {} profit {}",
            display_date(self.date),
            label,
            usd(self.net_profit)
        )
    }
}

/// Flat 30-day projection of recent profit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MonthlyForecast {
    InsufficientData,
    Projected { daily_average: f64, monthly: f64 },
}

impl fmt::Display for MonthlyForecast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthlyForecast::InsufficientData => write!(f, "Not enough data for a forecast"),
            MonthlyForecast::Projected { monthly, .. } => {
                write!(f, "Monthly forecast: {}", usd(*monthly))
            }
        }
    }
}

/// Budget that historically produced high ROI
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BudgetSuggestion {
    InsufficientData,
    NoHighRoiDays,
    Suggested {
        ad_spend: f64,
        roi_net: f64,
        sample_days: usize,
    },
}

impl fmt::Display for BudgetSuggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BudgetSuggestion::InsufficientData => {
                write!(f, "Not enough data for budget analysis")
            }
            BudgetSuggestion::NoHighRoiDays => {
                write!(f, "No high-ROI days to learn from yet")
            }
            BudgetSuggestion::Suggested {
                ad_spend, roi_net, ..
            } => write!(
                f,
                "Optimal budget: {} (average ROI: {:.1}%)",
                usd(*ad_spend),
                roi_net
            ),
        }
    }
}

/// Advice for a freshly entered day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Recommendation {
    CriticalRoi,
    LowRoi,
    ScaleUp,
    Overspending,
    BudgetTooLow,
    TopDay,
    BelowRecord { best_profit: f64 },
    AllNormal,
}

impl Recommendation {
    pub fn severity(&self) -> Severity {
        match self {
            Recommendation::CriticalRoi => Severity::Alert,
            Recommendation::LowRoi => Severity::Warning,
            Recommendation::Overspending
            | Recommendation::BudgetTooLow
            | Recommendation::BelowRecord { .. } => Severity::Attention,
            Recommendation::ScaleUp | Recommendation::TopDay | Recommendation::AllNormal => {
                Severity::Info
            }
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recommendation::CriticalRoi => {
                write!(f, "ROI is critically low! Review your traffic sources now")
            }
            Recommendation::LowRoi => {
                write!(f, "ROI could be better. Try optimizing your creatives")
            }
            Recommendation::ScaleUp => {
                write!(f, "Excellent ROI! It is safe to increase the budget")
            }
            Recommendation::Overspending => {
                write!(f, "Spending more than usual today. Watch the results")
            }
            Recommendation::BudgetTooLow => {
                write!(f, "Budget is low today. Consider increasing it")
            }
            Recommendation::TopDay => {
                write!(f, "One of your best days! Remember these settings")
            }
            Recommendation::BelowRecord { best_profit } => write!(
                f,
                "Your record is {}. Try to repeat that day's conditions",
                usd(*best_profit)
            ),
            Recommendation::AllNormal => {
                write!(f, "Everything looks normal, keep it up!")
            }
        }
    }
}
