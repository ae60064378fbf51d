//! Profit and break-even calculations
//!
//! 1. Revenue = deposits × geo rate
//! 2. Expenses = ad spend + fixed expenses + additional expenses
//! 3. Gross profit = revenue − expenses
//! 4. My share = gross profit × share fraction
//! 5. Platform fee = my share × fee fraction
//! 6. Net profit = my share − platform fee

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::models::{BreakEvenResult, DailyBreakdown, DailyInputs};

/// The derived quantities for one day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfitBreakdown {
    pub revenue: f64,
    pub total_expenses: f64,
    pub gross_profit: f64,
    pub my_share: f64,
    pub platform_fee: f64,
    pub net_profit: f64,
    pub roi_gross: f64,
    pub roi_net: f64,
}

/// Pure calculator over an injected configuration
#[derive(Debug, Clone, Copy)]
pub struct ProfitCalculator<'a> {
    config: &'a EngineConfig,
}

impl<'a> ProfitCalculator<'a> {
    pub fn new(config: &'a EngineConfig) -> Self {
        Self { config }
    }

    /// Total daily cost: ad spend plus fixed and additional expenses
    pub fn total_expenses(&self, ad_spend: f64, additional_expenses: f64) -> f64 {
        ad_spend + self.config.fixed_expenses + additional_expenses
    }

    /// Compute the full breakdown for one day's numbers
    ///
    /// ROI is defined as 0 when `ad_spend` is 0.
    pub fn compute_profit(
        &self,
        deposits: u32,
        ad_spend: f64,
        additional_expenses: f64,
        deposit_rate: f64,
    ) -> ProfitBreakdown {
        let revenue = f64::from(deposits) * deposit_rate;
        let total_expenses = self.total_expenses(ad_spend, additional_expenses);
        let gross_profit = revenue - total_expenses;

        let my_share = gross_profit * self.config.my_share_fraction;
        let platform_fee = my_share * self.config.platform_fee_fraction;
        let net_profit = my_share - platform_fee;

        let (roi_gross, roi_net) = if ad_spend > 0.0 {
            (
                gross_profit / ad_spend * 100.0,
                net_profit / ad_spend * 100.0,
            )
        } else {
            (0.0, 0.0)
        };

        ProfitBreakdown {
            revenue,
            total_expenses,
            gross_profit,
            my_share,
            platform_fee,
            net_profit,
            roi_gross,
            roi_net,
        }
    }

    /// Build the persisted record for a day's inputs
    pub fn breakdown(&self, inputs: &DailyInputs, created_at: DateTime<Utc>) -> DailyBreakdown {
        let p = self.compute_profit(
            inputs.deposits,
            inputs.ad_spend,
            inputs.additional_expenses,
            inputs.deposit_rate,
        );

        DailyBreakdown {
            geo: inputs.geo.clone(),
            deposit_rate: inputs.deposit_rate,
            deposits: inputs.deposits,
            ad_spend: inputs.ad_spend,
            additional_expenses: inputs.additional_expenses,
            revenue: p.revenue,
            total_expenses: p.total_expenses,
            gross_profit: p.gross_profit,
            my_share: p.my_share,
            platform_fee: p.platform_fee,
            net_profit: p.net_profit,
            roi_gross: p.roi_gross,
            roi_net: p.roi_net,
            created_at,
        }
    }

    /// Deposits and revenue needed for zero profit
    pub fn compute_break_even(
        &self,
        ad_spend: f64,
        additional_expenses: f64,
        deposit_rate: f64,
    ) -> BreakEvenResult {
        let total_expenses = self.total_expenses(ad_spend, additional_expenses);

        BreakEvenResult {
            deposits_needed: total_expenses / deposit_rate,
            revenue_needed: total_expenses,
            total_expenses,
        }
    }
}
