//! Report generation port trait.

use crate::domain::error::LendsimError;
use crate::domain::interest::Forecast;
use crate::domain::portfolio::Portfolio;

/// Port for writing forecast and portfolio reports.
pub trait ReportPort {
    fn write_forecast(&self, forecast: &Forecast, output_path: &str) -> Result<(), LendsimError>;

    fn write_portfolio(
        &self,
        portfolio: &Portfolio,
        projection_days: u32,
        output_path: &str,
    ) -> Result<(), LendsimError>;
}
