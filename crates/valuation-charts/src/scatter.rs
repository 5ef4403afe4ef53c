//! Per-ticker ratio scatter with a median reference line.

use market_data::CompanyRecord;

use crate::figure::{Annotation, Axis, Figure, Layout, Legend, ScatterTrace, Shape, Text, Title, Trace};
use crate::stats::median;
use crate::ValuationMetric;

/// Median of `metric` over `records`, ignoring missing values.
pub fn median_line(records: &[CompanyRecord], metric: ValuationMetric) -> Option<f64> {
    median(records.iter().map(|r| metric.value(r)))
}

fn group_by_industry(records: &[CompanyRecord]) -> Vec<(&str, Vec<&CompanyRecord>)> {
    let mut groups: Vec<(&str, Vec<&CompanyRecord>)> = Vec::new();
    for record in records {
        match groups.iter_mut().find(|(industry, _)| *industry == record.industry) {
            Some((_, members)) => members.push(record),
            None => groups.push((record.industry.as_str(), vec![record])),
        }
    }
    groups
}

/// Scatter of `metric` per ticker, one trace per industry.
///
/// A dashed line marks the median. When no row has a value for the metric
/// the line and its label are left out.
pub fn generate_scatter(records: &[CompanyRecord], metric: ValuationMetric) -> Figure {
    let column = metric.column();

    let data = group_by_industry(records)
        .into_iter()
        .map(|(industry, members)| {
            Trace::Scatter(ScatterTrace {
                name: industry.to_string(),
                mode: "markers".to_string(),
                x: members.iter().map(|r| r.ticker.clone()).collect(),
                y: members.iter().map(|r| metric.value(r)).collect(),
                customdata: members.iter().map(|r| [r.name.clone()]).collect(),
                hovertemplate: format!(
                    "Industry={industry}<br>Ticker=%{{x}}<br>{column}=%{{y}}<br>Name=%{{customdata[0]}}<extra></extra>"
                ),
                legendgroup: industry.to_string(),
                showlegend: true,
            })
        })
        .collect();

    let mut layout = Layout::titled(Title::centered(format!("{column} Comparison"), 18));
    layout.xaxis = Some(Axis {
        title: Text {
            text: "Ticker".to_string(),
        },
    });
    layout.yaxis = Some(Axis {
        title: Text {
            text: column.to_string(),
        },
    });
    layout.legend = Some(Legend {
        title: Text {
            text: "Industry".to_string(),
        },
    });

    if let Some(m) = median_line(records, metric) {
        layout.shapes.push(Shape::hline(m, "dash"));
        layout
            .annotations
            .push(Annotation::top_left(format!("Median {column}: {m:.2}"), m));
    }

    Figure { data, layout }
}
