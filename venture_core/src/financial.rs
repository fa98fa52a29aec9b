//! Financial projection
//!
//! A simple monthly subscription model: compounding user growth net of
//! churn, conversion-rate paying users, ARPU revenue against fixed,
//! per-user and marketing costs. Produces the month-by-month series and the
//! derived break-even / ROI / CAC / LTV metrics.

use serde::{Deserialize, Serialize};

/// Input assumptions for a projection
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FinancialAssumptions {
    pub initial_users: u64,
    /// Monthly user growth, fraction (0.15 = 15%)
    pub monthly_growth_rate: f64,
    /// Monthly churn, fraction
    pub churn_rate: f64,
    /// Share of users that pay, fraction
    pub conversion_rate: f64,
    /// Average revenue per paying user per month, KRW
    pub arpu: i64,
    /// Fixed costs per month, KRW
    pub fixed_costs: i64,
    /// Variable cost per active user per month, KRW
    pub variable_cost_per_user: i64,
    /// Marketing spend per month, KRW
    pub marketing_cost: i64,
    pub horizon_months: u32,
}

impl Default for FinancialAssumptions {
    fn default() -> Self {
        Self {
            initial_users: 10,
            monthly_growth_rate: 0.15,
            churn_rate: 0.05,
            conversion_rate: 0.10,
            arpu: 9_900,
            fixed_costs: 10_000_000,
            variable_cost_per_user: 1_000,
            marketing_cost: 5_000_000,
            horizon_months: 12,
        }
    }
}

/// One month of the projected series
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MonthlyFigures {
    pub month: u32,
    pub users: u64,
    pub revenue: i64,
    pub costs: i64,
    pub profit: i64,
    pub cumulative_profit: i64,
}

/// Derived headline metrics
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProjectionMetrics {
    /// First month with positive cumulative profit, if any
    pub break_even_month: Option<u32>,
    pub total_users: u64,
    pub total_revenue: i64,
    pub total_costs: i64,
    /// (total revenue - total costs) / total costs, percent
    pub roi_percent: f64,
    /// Marketing cost over final-month new users, KRW
    pub customer_acquisition_cost: f64,
    /// ARPU x 12 / churn rate, KRW
    pub lifetime_value: f64,
}

/// A complete projection: the monthly series plus derived metrics
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FinancialProjection {
    pub assumptions: FinancialAssumptions,
    pub months: Vec<MonthlyFigures>,
    pub metrics: ProjectionMetrics,
}

/// Run the projection for the given assumptions.
pub fn project(assumptions: &FinancialAssumptions) -> FinancialProjection {
    let mut months = Vec::with_capacity(assumptions.horizon_months as usize);
    let mut current_users = assumptions.initial_users;
    let mut cumulative_profit: i64 = 0;
    let mut last_new_users: u64 = 0;

    for month in 1..=assumptions.horizon_months {
        let new_users = (current_users as f64 * assumptions.monthly_growth_rate) as u64;
        let churned_users =
            ((current_users as f64 * assumptions.churn_rate) as u64).min(current_users + new_users);
        current_users = current_users + new_users - churned_users;
        last_new_users = new_users;

        let paying_users = (current_users as f64 * assumptions.conversion_rate) as u64;
        let revenue = paying_users as i64 * assumptions.arpu;

        let costs = assumptions.fixed_costs
            + current_users as i64 * assumptions.variable_cost_per_user
            + assumptions.marketing_cost;

        let profit = revenue - costs;
        cumulative_profit += profit;

        months.push(MonthlyFigures {
            month,
            users: current_users,
            revenue,
            costs,
            profit,
            cumulative_profit,
        });
    }

    let total_revenue: i64 = months.iter().map(|m| m.revenue).sum();
    let total_costs: i64 = months.iter().map(|m| m.costs).sum();
    let roi_percent = if total_costs != 0 {
        (total_revenue - total_costs) as f64 / total_costs as f64 * 100.0
    } else {
        0.0
    };

    let metrics = ProjectionMetrics {
        break_even_month: months
            .iter()
            .find(|m| m.cumulative_profit > 0)
            .map(|m| m.month),
        total_users: current_users,
        total_revenue,
        total_costs,
        roi_percent,
        customer_acquisition_cost: assumptions.marketing_cost as f64
            / last_new_users.max(1) as f64,
        lifetime_value: assumptions.arpu as f64 * 12.0 / assumptions.churn_rate.max(0.01),
    };

    FinancialProjection {
        assumptions: assumptions.clone(),
        months,
        metrics,
    }
}
