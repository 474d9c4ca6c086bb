//! Typst report generation.
//!
//! Orchestrates placeholder resolution: takes a Typst template (either the
//! built-in default or a custom file via `[report] template_path`), resolves
//! all `{{PLACEHOLDER}}` markers using helpers from `chart_svg` and `tables`,
//! and writes the final `.typ` file.

pub mod chart_svg;
pub mod default_template;
pub mod tables;

use chrono::NaiveDate;
use std::fs;

use crate::domain::error::LendsimError;
use crate::domain::interest::Forecast;
use crate::domain::portfolio::Portfolio;
use crate::domain::token::Direction;
use crate::ports::report_port::ReportPort;

/// Resolve all forecast placeholders in `template`.
pub fn resolve_forecast(template: &str, forecast: &Forecast, start_date: Option<NaiveDate>) -> String {
    let mut output = template.to_string();

    output = output.replace("{{FORECAST_SUMMARY}}", &tables::render_forecast_summary(forecast));

    let svg = chart_svg::generate_growth_svg(&forecast.series);
    let chart = if svg.is_empty() {
        "_No growth data._".to_string()
    } else {
        format!(
            "#image.decode(\n\"{}\",\n  width: 100%,\n)",
            svg.replace('\\', "\\\\").replace('"', "\\\"")
        )
    };
    output = output.replace("{{GROWTH_CHART_SVG}}", &chart);

    output = output.replace(
        "{{GROWTH_TABLE}}",
        &tables::render_growth_table(&forecast.series, start_date),
    );

    output
}

/// Resolve all portfolio placeholders in `template`.
pub fn resolve_portfolio(template: &str, portfolio: &Portfolio, projection_days: u32) -> String {
    let mut output = template.to_string();

    let summary = if portfolio.is_empty() {
        "_No positions yet. Supply or borrow assets to populate the portfolio._\n".to_string()
    } else {
        tables::render_portfolio_summary(portfolio, projection_days)
    };
    output = output.replace("{{PORTFOLIO_SUMMARY}}", &summary);
    output = output.replace(
        "{{SUPPLIED_TABLE}}",
        &tables::render_positions_table(portfolio.supplied(), Direction::Supply),
    );
    output = output.replace(
        "{{BORROWED_TABLE}}",
        &tables::render_positions_table(portfolio.borrowed(), Direction::Borrow),
    );
    output = output.replace("{{ALLOCATION_TABLE}}", &tables::render_allocation_table(portfolio));

    output
}

/// [`ReportPort`] writing Typst markup to disk.
#[derive(Debug, Clone, Default)]
pub struct TypstReportAdapter {
    template: Option<String>,
    start_date: Option<NaiveDate>,
}

impl TypstReportAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `template` instead of the built-in one.
    pub fn with_template(mut self, template: String) -> Self {
        self.template = Some(template);
        self
    }

    /// Label growth milestones with calendar dates counted from `start_date`.
    pub fn with_start_date(mut self, start_date: NaiveDate) -> Self {
        self.start_date = Some(start_date);
        self
    }
}

impl ReportPort for TypstReportAdapter {
    fn write_forecast(&self, forecast: &Forecast, output_path: &str) -> Result<(), LendsimError> {
        let template = self
            .template
            .as_deref()
            .unwrap_or(default_template::forecast_template());
        let content = resolve_forecast(template, forecast, self.start_date);
        fs::write(output_path, content)?;
        Ok(())
    }

    fn write_portfolio(
        &self,
        portfolio: &Portfolio,
        projection_days: u32,
        output_path: &str,
    ) -> Result<(), LendsimError> {
        let template = self
            .template
            .as_deref()
            .unwrap_or(default_template::portfolio_template());
        let content = resolve_portfolio(template, portfolio, projection_days);
        fs::write(output_path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::position::Position;
    use crate::domain::rates::{RateQuote, RateSource};
    use tempfile::TempDir;

    fn sample_forecast() -> Forecast {
        Forecast::compute(
            "USDC",
            Direction::Borrow,
            500.0,
            90,
            RateQuote {
                percent: 4.15,
                source: RateSource::Fallback,
            },
        )
    }

    fn sample_portfolio() -> Portfolio {
        Portfolio::new()
            .record_supply(Position::new("DAI", 200.0, 1.0, 2.5))
            .record_borrow(Position::new("USDC", 100.0, 1.0, 4.15))
    }

    #[test]
    fn forecast_default_template_no_placeholders_remain() {
        let output = resolve_forecast(default_template::forecast_template(), &sample_forecast(), None);
        assert!(
            !output.contains("{{"),
            "unresolved placeholder in output: {output}"
        );
        assert!(output.contains("= Yield Forecast"));
        assert!(output.contains("#image.decode("));
        assert!(output.contains("[Borrow APR], [4.150% (fallback)]"));
    }

    #[test]
    fn forecast_svg_quotes_are_escaped() {
        let output = resolve_forecast("{{GROWTH_CHART_SVG}}", &sample_forecast(), None);
        assert!(output.contains("<svg width=\\\"600\\\""));
    }

    #[test]
    fn portfolio_default_template_no_placeholders_remain() {
        let output = resolve_portfolio(default_template::portfolio_template(), &sample_portfolio(), 365);
        assert!(!output.contains("{{"));
        assert!(output.contains("[Health Factor], [1.50 (at risk)]"));
        assert!(output.contains("[DAI], [\\$200.00], [100.0%]"));
    }

    #[test]
    fn empty_portfolio_message() {
        let output = resolve_portfolio(default_template::portfolio_template(), &Portfolio::new(), 30);
        assert!(output.contains("_No positions yet."));
        assert!(output.contains("_No supplied assets._"));
        assert!(output.contains("_No borrowed assets._"));
    }

    #[test]
    fn custom_template() {
        let custom = "= My Forecast\n{{FORECAST_SUMMARY}}";
        let output = resolve_forecast(custom, &sample_forecast(), None);
        assert!(output.starts_with("= My Forecast"));
        assert!(output.contains("#table("));
        assert!(!output.contains("{{"));
    }

    #[test]
    fn adapter_writes_files() {
        let dir = TempDir::new().unwrap();
        let forecast_path = dir.path().join("forecast.typ");
        let portfolio_path = dir.path().join("portfolio.typ");

        let adapter = TypstReportAdapter::new()
            .with_start_date(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        adapter
            .write_forecast(&sample_forecast(), forecast_path.to_str().unwrap())
            .unwrap();
        adapter
            .write_portfolio(&sample_portfolio(), 30, portfolio_path.to_str().unwrap())
            .unwrap();

        let forecast = fs::read_to_string(&forecast_path).unwrap();
        assert!(forecast.contains("[*Date*]"));
        assert!(forecast.contains("[Day 0], [2025-01-01], [500.00]"));
        let portfolio = fs::read_to_string(&portfolio_path).unwrap();
        assert!(portfolio.contains("= Portfolio Overview"));
    }

    #[test]
    fn adapter_custom_template() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.typ");
        let adapter = TypstReportAdapter::new().with_template("Net: {{PORTFOLIO_SUMMARY}}".into());
        adapter
            .write_portfolio(&sample_portfolio(), 30, path.to_str().unwrap())
            .unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("Net: #table("));
    }

    #[test]
    fn adapter_write_error_is_io() {
        let adapter = TypstReportAdapter::new();
        let err = adapter
            .write_forecast(&sample_forecast(), "/nonexistent/dir/report.typ")
            .unwrap_err();
        assert!(matches!(err, LendsimError::Io(_)));
    }
}
