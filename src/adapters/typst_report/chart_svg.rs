//! SVG line chart of a balance-growth series.
//!
//! Balances are in token units, so the y axis carries plain numbers.

use crate::domain::interest::SeriesPoint;

const CHART_WIDTH: f64 = 600.0;
const CHART_HEIGHT: f64 = 300.0;
const MARGIN_LEFT: f64 = 70.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 30.0;
const MARGIN_BOTTOM: f64 = 40.0;

/// Render `series` as a standalone SVG document. Returns an empty string
/// for an empty series.
pub fn generate_growth_svg(series: &[SeriesPoint]) -> String {
    let (Some(first), Some(last)) = (series.first(), series.last()) else {
        return String::new();
    };

    let min_balance = series
        .iter()
        .map(|p| p.balance)
        .fold(f64::INFINITY, f64::min);
    let max_balance = series
        .iter()
        .map(|p| p.balance)
        .fold(f64::NEG_INFINITY, f64::max);
    // Flat series (zero rate or zero days) still get a visible band.
    let range = if max_balance > min_balance {
        max_balance - min_balance
    } else {
        1.0
    };

    let plot_width = CHART_WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_height = CHART_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;

    let x_scale =
        |i: usize| -> f64 { MARGIN_LEFT + (i as f64 / (series.len() - 1).max(1) as f64) * plot_width };
    let y_scale =
        |v: f64| -> f64 { MARGIN_TOP + plot_height - ((v - min_balance) / range) * plot_height };

    let path_data = series
        .iter()
        .enumerate()
        .map(|(i, point)| {
            let cmd = if i == 0 { "M" } else { "L" };
            format!("{} {:.1} {:.1}", cmd, x_scale(i), y_scale(point.balance))
        })
        .collect::<Vec<_>>()
        .join(" ");

    let mid = &series[series.len() / 2];
    let axis_y = CHART_HEIGHT - MARGIN_BOTTOM;

    let mut svg = String::new();
    svg.push_str(&format!(
        r##"<svg width="{w}" height="{h}" viewBox="0 0 {w} {h}" xmlns="http://www.w3.org/2000/svg">"##,
        w = CHART_WIDTH,
        h = CHART_HEIGHT
    ));
    svg.push_str("\n  <rect width=\"100%\" height=\"100%\" fill=\"white\"/>\n");
    svg.push_str(&format!(
        "  <text x=\"{}\" y=\"15\" text-anchor=\"end\" font-size=\"12\" fill=\"#666\">Balance</text>\n",
        CHART_WIDTH - MARGIN_RIGHT
    ));
    svg.push_str(&format!(
        "  <line x1=\"{x}\" y1=\"{top}\" x2=\"{x}\" y2=\"{bottom}\" stroke=\"#ccc\" stroke-width=\"1\"/>\n",
        x = MARGIN_LEFT,
        top = MARGIN_TOP,
        bottom = axis_y
    ));
    svg.push_str(&format!(
        "  <line x1=\"{}\" y1=\"{y}\" x2=\"{}\" y2=\"{y}\" stroke=\"#ccc\" stroke-width=\"1\"/>\n",
        MARGIN_LEFT,
        CHART_WIDTH - MARGIN_RIGHT,
        y = axis_y
    ));

    for (y, value) in [
        (MARGIN_TOP + 5.0, max_balance),
        (MARGIN_TOP + plot_height / 2.0, (max_balance + min_balance) / 2.0),
        (axis_y - 5.0, min_balance),
    ] {
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{:.1}\" text-anchor=\"end\" font-size=\"10\" fill=\"#666\">{:.2}</text>\n",
            MARGIN_LEFT - 5.0,
            y,
            value
        ));
    }

    for (x, label) in [
        (MARGIN_LEFT, &first.label),
        (MARGIN_LEFT + plot_width / 2.0, &mid.label),
        (CHART_WIDTH - MARGIN_RIGHT, &last.label),
    ] {
        svg.push_str(&format!(
            "  <text x=\"{:.1}\" y=\"{}\" text-anchor=\"middle\" font-size=\"10\" fill=\"#666\">{}</text>\n",
            x, CHART_HEIGHT, label
        ));
    }

    svg.push_str(&format!(
        "  <path d=\"{}\" fill=\"none\" stroke=\"#a855f7\" stroke-width=\"2\"/>\n",
        path_data
    ));
    svg.push_str("</svg>");
    svg
}
