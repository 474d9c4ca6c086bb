//! Built-in Typst report templates with `{{PLACEHOLDER}}` markers.

const FORECAST_TEMPLATE: &str = r#"#set page(paper: "a4", margin: 2cm)
#set text(size: 10pt)

= Yield Forecast

{{FORECAST_SUMMARY}}

== Interest Growth Over Time

{{GROWTH_CHART_SVG}}

== Milestones

{{GROWTH_TABLE}}

#text(size: 8pt, fill: gray)[Simulated figures for education only. Not connected to any blockchain.]
"#;

const PORTFOLIO_TEMPLATE: &str = r#"#set page(paper: "a4", margin: 2cm)
#set text(size: 10pt)

= Portfolio Overview

{{PORTFOLIO_SUMMARY}}

== Supplied Assets

{{SUPPLIED_TABLE}}

== Borrowed Assets

{{BORROWED_TABLE}}

== Supply Allocation

{{ALLOCATION_TABLE}}

#text(size: 8pt, fill: gray)[Health factor = supplied value x 0.75 / borrowed value.]
"#;

pub fn forecast_template() -> &'static str {
    FORECAST_TEMPLATE
}

pub fn portfolio_template() -> &'static str {
    PORTFOLIO_TEMPLATE
}
