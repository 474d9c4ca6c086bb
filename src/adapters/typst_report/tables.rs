//! Table formatting for reports.
//!
//! Provides functions to generate Typst markup for:
//! - Forecast summary (token, period, rate, final balance)
//! - Milestone growth table
//! - Portfolio summary and per-position tables

use chrono::{Duration, NaiveDate};

use crate::domain::interest::{Forecast, SeriesPoint};
use crate::domain::portfolio::{format_health_factor, Portfolio};
use crate::domain::position::Position;
use crate::domain::token::{find_token, Direction};

/// Number of rows in the growth table, excluding day 0.
const GROWTH_TABLE_STEPS: u32 = 10;

pub fn fmt_currency(value: f64) -> String {
    if value >= 0.0 {
        format!("${:.2}", value)
    } else {
        format!("-${:.2}", value.abs())
    }
}

/// Currency for Typst content, where a bare `$` would open math mode.
fn money(value: f64) -> String {
    fmt_currency(value).replace('$', "\\$")
}

pub fn render_forecast_summary(forecast: &Forecast) -> String {
    let name = find_token(&forecast.symbol)
        .map(|t| t.name)
        .unwrap_or("Unknown token");
    let (rate_label, interest_label) = match forecast.direction {
        Direction::Supply => ("Supply APY", "Interest Earned"),
        Direction::Borrow => ("Borrow APR", "Interest Owed"),
    };

    let mut output = String::new();
    output.push_str("#table(\n  columns: 2,\n  [*Property*], [*Value*],\n");
    output.push_str(&format!(
        "  [Token], [{} ({})],\n",
        forecast.symbol, name
    ));
    output.push_str(&format!("  [Direction], [{}],\n", forecast.direction));
    output.push_str(&format!(
        "  [Initial Amount], [{:.2} {}],\n",
        forecast.principal, forecast.symbol
    ));
    output.push_str(&format!("  [Time Period], [{} days],\n", forecast.days));
    output.push_str(&format!(
        "  [{}], [{:.3}% ({})],\n",
        rate_label, forecast.rate.percent, forecast.rate.source
    ));
    output.push_str(&format!(
        "  [Final Balance], [{:.2} {}],\n",
        forecast.final_balance, forecast.symbol
    ));
    output.push_str(&format!(
        "  [{}], [{:.2} {}],\n",
        interest_label,
        forecast.interest(),
        forecast.symbol
    ));
    output.push_str(")\n");
    output
}

/// Milestone rows of the series: day 0, evenly spaced days, and the last day.
pub fn growth_milestones(series: &[SeriesPoint]) -> Vec<&SeriesPoint> {
    let Some(last) = series.last() else {
        return Vec::new();
    };
    let step = last.day.div_ceil(GROWTH_TABLE_STEPS).max(1);
    let mut rows: Vec<&SeriesPoint> = series.iter().filter(|p| p.day % step == 0).collect();
    if rows.last().map(|p| p.day) != Some(last.day) {
        rows.push(last);
    }
    rows
}

pub fn render_growth_table(series: &[SeriesPoint], start_date: Option<NaiveDate>) -> String {
    let rows = growth_milestones(series);
    if rows.is_empty() {
        return "_No growth data._\n".to_string();
    }

    let mut output = String::new();
    match start_date {
        Some(_) => output.push_str("#table(\n  columns: 3,\n  [*Day*], [*Date*], [*Balance*],\n"),
        None => output.push_str("#table(\n  columns: 2,\n  [*Day*], [*Balance*],\n"),
    }
    for point in rows {
        match start_date {
            Some(start) => {
                // Dates past chrono's range render as "-".
                let date = start
                    .checked_add_signed(Duration::days(i64::from(point.day)))
                    .map_or_else(|| "-".to_string(), |d| d.to_string());
                output.push_str(&format!(
                    "  [{}], [{}], [{:.2}],\n",
                    point.label, date, point.balance
                ));
            }
            None => {
                output.push_str(&format!("  [{}], [{:.2}],\n", point.label, point.balance));
            }
        }
    }
    output.push_str(")\n");
    output
}

pub fn render_portfolio_summary(portfolio: &Portfolio, projection_days: u32) -> String {
    let mut output = String::new();
    output.push_str("#table(\n  columns: 2,\n  [*Metric*], [*Value*],\n");
    output.push_str(&format!(
        "  [Total Supplied], [{}],\n",
        money(portfolio.total_supplied())
    ));
    output.push_str(&format!(
        "  [Total Borrowed], [{}],\n",
        money(portfolio.total_borrowed())
    ));
    output.push_str(&format!(
        "  [Net Worth], [{}],\n",
        money(portfolio.net_worth())
    ));
    output.push_str(&format!(
        "  [Health Factor], [{} ({})],\n",
        format_health_factor(portfolio.health_factor()),
        portfolio.health_status()
    ));
    output.push_str(&format!(
        "  [Projected Earnings ({} days)], [{}],\n",
        projection_days,
        money(portfolio.projected_earnings(projection_days))
    ));
    output.push_str(&format!(
        "  [Projected Interest Owed ({} days)], [{}],\n",
        projection_days,
        money(portfolio.projected_interest_owed(projection_days))
    ));
    output.push_str(")\n");
    output
}

pub fn render_positions_table<'a, I>(positions: I, direction: Direction) -> String
where
    I: IntoIterator<Item = &'a Position>,
{
    let (rate_header, accrued_header, empty) = match direction {
        Direction::Supply => ("APY", "Earned", "_No supplied assets._\n"),
        Direction::Borrow => ("APR", "Interest Paid", "_No borrowed assets._\n"),
    };

    let mut body = String::new();
    for pos in positions {
        body.push_str(&format!(
            "  [{}], [{}], [{}], [{:.2}%], [{}], [{}],\n",
            pos.symbol,
            fmt_amount(pos),
            money(pos.value),
            pos.rate,
            money(pos.yearly_interest()),
            money(pos.accrued)
        ));
    }
    if body.is_empty() {
        return empty.to_string();
    }

    let mut output = String::from("#table(\n  columns: 6,\n");
    output.push_str(&format!(
        "  [*Asset*], [*Amount*], [*Value*], [*{}*], [*Yearly*], [*{}*],\n",
        rate_header, accrued_header
    ));
    output.push_str(&body);
    output.push_str(")\n");
    output
}

pub fn render_allocation_table(portfolio: &Portfolio) -> String {
    let slices = portfolio.allocation();
    if slices.is_empty() {
        return "_No supplied assets._\n".to_string();
    }
    let mut output = String::from("#table(\n  columns: 3,\n  [*Asset*], [*Value*], [*Share*],\n");
    for slice in slices {
        output.push_str(&format!(
            "  [{}], [{}], [{:.1}%],\n",
            slice.symbol,
            money(slice.value),
            slice.share * 100.0
        ));
    }
    output.push_str(")\n");
    output
}

// ETH to two decimals, stablecoins as entered.
fn fmt_amount(pos: &Position) -> String {
    if pos.symbol == "ETH" {
        format!("{:.2} {}", pos.amount, pos.symbol)
    } else {
        format!("{} {}", pos.amount, pos.symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::interest::build_series;
    use crate::domain::rates::{RateQuote, RateSource};

    fn sample_forecast(direction: Direction) -> Forecast {
        Forecast::compute(
            "DAI",
            direction,
            1000.0,
            365,
            RateQuote {
                percent: 4.5,
                source: RateSource::Configured,
            },
        )
    }

    #[test]
    fn fmt_currency_signs() {
        assert_eq!(fmt_currency(1234.5), "$1234.50");
        assert_eq!(fmt_currency(-20.0), "-$20.00");
        assert_eq!(money(-20.0), "-\\$20.00");
    }

    #[test]
    fn forecast_summary_supply() {
        let output = render_forecast_summary(&sample_forecast(Direction::Supply));
        assert!(output.contains("[Token], [DAI (Dai Stablecoin)]"));
        assert!(output.contains("[Supply APY], [4.500% (configured)]"));
        assert!(output.contains("[Final Balance], [1046.02 DAI]"));
        assert!(output.contains("[Interest Earned]"));
    }

    #[test]
    fn forecast_summary_borrow_labels() {
        let output = render_forecast_summary(&sample_forecast(Direction::Borrow));
        assert!(output.contains("[Borrow APR]"));
        assert!(output.contains("[Interest Owed]"));
    }

    #[test]
    fn milestones_include_first_and_last() {
        let series = build_series(1000.0, Some(4.5), 365);
        let rows = growth_milestones(&series);
        assert_eq!(rows.first().unwrap().day, 0);
        assert_eq!(rows.last().unwrap().day, 365);
        assert!(rows.len() <= GROWTH_TABLE_STEPS as usize + 2);
    }

    #[test]
    fn milestones_short_series_every_day() {
        let series = build_series(1000.0, Some(4.5), 5);
        assert_eq!(growth_milestones(&series).len(), 6);
    }

    #[test]
    fn growth_table_with_dates() {
        let series = build_series(100.0, None, 2);
        let start = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        let output = render_growth_table(&series, Some(start));
        assert!(output.contains("columns: 3"));
        assert!(output.contains("[Day 1], [2025-01-01], [100.00]"));
    }

    #[test]
    fn growth_table_dates_past_calendar_range() {
        let series = build_series(100.0, Some(4.5), 10);
        let start: NaiveDate = "+262142-12-31".parse().unwrap();
        let output = render_growth_table(&series, Some(start));
        assert!(output.contains("[Day 0], [+262142-12-31], [100.00]"));
        assert!(output.contains("[Day 10], [-], ["));
    }

    #[test]
    fn growth_table_empty() {
        assert_eq!(render_growth_table(&[], None), "_No growth data._\n");
    }

    #[test]
    fn portfolio_summary_shows_infinity() {
        let portfolio = Portfolio::new().record_supply(Position::new("DAI", 150.0, 1.0, 2.5));
        let output = render_portfolio_summary(&portfolio, 30);
        assert!(output.contains("[Total Supplied], [\\$150.00]"));
        assert!(output.contains("[Health Factor], [∞ (healthy)]"));
        assert!(output.contains("[Projected Earnings (30 days)]"));
    }

    #[test]
    fn positions_table_rows() {
        let portfolio = Portfolio::new()
            .record_borrow(Position::new("ETH", 0.5, 2100.0, 3.85))
            .record_borrow(Position::new("USDC", 200.0, 1.0, 4.15));
        let output = render_positions_table(portfolio.borrowed(), Direction::Borrow);
        assert!(output.contains("[*APR*]"));
        assert!(output.contains("[ETH], [0.50 ETH], [\\$1050.00], [3.85%]"));
        assert!(output.contains("[USDC], [200 USDC], [\\$200.00], [4.15%]"));
    }

    #[test]
    fn positions_table_empty() {
        let portfolio = Portfolio::new();
        assert_eq!(
            render_positions_table(portfolio.supplied(), Direction::Supply),
            "_No supplied assets._\n"
        );
    }

    #[test]
    fn allocation_table_shares() {
        let portfolio = Portfolio::new()
            .record_supply(Position::new("DAI", 100.0, 1.0, 2.5))
            .record_supply(Position::new("USDC", 300.0, 1.0, 2.5));
        let output = render_allocation_table(&portfolio);
        assert!(output.contains("[DAI], [\\$100.00], [25.0%]"));
        assert!(output.contains("[USDC], [\\$300.00], [75.0%]"));
    }
}
