//! Market-cap treemap: Sector → Industry → Ticker.

use std::collections::HashMap;

use market_data::CompanyRecord;

use crate::figure::{
    ColorBar, ColorScaleMarker, Figure, Layout, Text, Title, Trace, TreemapNodeData, TreemapTrace,
};
use crate::stats::weighted_mean;

const TITLE: &str = "Market Capitalization by Sector and Industry";
const COLORSCALE: &str = "Viridis";
/// Placeholder for branch hover fields whose leaves disagree.
const MIXED: &str = "(?)";
const HOVER_TEMPLATE: &str = "<b>Ticker:</b> %{customdata[0]}<br>\
<b>Name:</b> %{customdata[1]}<br>\
<b>Market Cap:</b> %{customdata[2]:,.2f}M<extra></extra>";

pub fn market_cap_million(market_cap: f64) -> f64 {
    market_cap / 1_000_000.0
}

/// Hover text shared by every leaf under a node, or mixed.
#[derive(Debug, Clone, PartialEq)]
enum Shared {
    Unset,
    Same(String),
    Mixed,
}

impl Shared {
    fn merge(&mut self, value: &str) {
        *self = match std::mem::replace(self, Shared::Unset) {
            Shared::Unset => Shared::Same(value.to_string()),
            Shared::Same(current) if current == value => Shared::Same(current),
            _ => Shared::Mixed,
        };
    }

    fn text(&self) -> String {
        match self {
            Shared::Same(v) => v.clone(),
            Shared::Unset | Shared::Mixed => MIXED.to_string(),
        }
    }
}

struct Node {
    id: String,
    label: String,
    parent: String,
    ticker: Shared,
    name: Shared,
    leaf_caps: Vec<f64>,
    is_leaf: bool,
}

impl Node {
    fn value(&self) -> f64 {
        self.leaf_caps.iter().sum()
    }

    /// A leaf is colored by its market cap, merged duplicates included.
    /// Branches take the value-weighted mean of the rows below them.
    fn color(&self) -> f64 {
        if self.is_leaf {
            self.value()
        } else {
            weighted_mean(&self.leaf_caps, &self.leaf_caps).unwrap_or(0.0)
        }
    }
}

#[derive(Default)]
struct NodeTable {
    nodes: Vec<Node>,
    index: HashMap<String, usize>,
}

impl NodeTable {
    fn add(
        &mut self,
        id: String,
        label: &str,
        parent: &str,
        is_leaf: bool,
        record: &CompanyRecord,
        cap: f64,
    ) {
        let idx = match self.index.get(&id) {
            Some(&idx) => idx,
            None => {
                self.nodes.push(Node {
                    id: id.clone(),
                    label: label.to_string(),
                    parent: parent.to_string(),
                    ticker: Shared::Unset,
                    name: Shared::Unset,
                    leaf_caps: Vec::new(),
                    is_leaf,
                });
                self.index.insert(id, self.nodes.len() - 1);
                self.nodes.len() - 1
            }
        };
        let node = &mut self.nodes[idx];
        node.ticker.merge(&record.ticker);
        node.name.merge(&record.name);
        node.leaf_caps.push(cap);
    }
}

/// Build the market-cap treemap for `records`.
///
/// Rows without a positive market cap have no area and are left out. Empty
/// input gives a treemap trace with no nodes under the usual layout.
pub fn generate_treemap(records: &[CompanyRecord]) -> Figure {
    let mut table = NodeTable::default();

    for record in records {
        let Some(cap) = record.market_cap.filter(|c| *c > 0.0) else {
            continue;
        };
        let sector_id = record.sector.clone();
        let industry_id = format!("{}/{}", record.sector, record.industry);
        let leaf_id = format!("{}/{}", industry_id, record.ticker);

        table.add(sector_id.clone(), &record.sector, "", false, record, cap);
        table.add(industry_id.clone(), &record.industry, &sector_id, false, record, cap);
        table.add(leaf_id, &record.ticker, &industry_id, true, record, cap);
    }

    let nodes = table.nodes;
    let trace = TreemapTrace {
        ids: nodes.iter().map(|n| n.id.clone()).collect(),
        labels: nodes.iter().map(|n| n.label.clone()).collect(),
        parents: nodes.iter().map(|n| n.parent.clone()).collect(),
        values: nodes.iter().map(Node::value).collect(),
        branchvalues: "total".to_string(),
        marker: ColorScaleMarker {
            colors: nodes.iter().map(Node::color).collect(),
            colorscale: COLORSCALE.to_string(),
            showscale: true,
            colorbar: ColorBar {
                title: Text {
                    text: "Market_Cap".to_string(),
                },
            },
        },
        customdata: nodes
            .iter()
            .map(|n| TreemapNodeData(n.ticker.text(), n.name.text(), market_cap_million(n.value())))
            .collect(),
        hovertemplate: HOVER_TEMPLATE.to_string(),
    };

    Figure {
        data: vec![Trace::Treemap(trace)],
        layout: Layout::titled(Title::centered(TITLE, 20)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn company(ticker: &str, name: &str, industry: &str, cap: Option<f64>) -> CompanyRecord {
        let mut record = CompanyRecord::new(ticker, name, "Consumer Cyclical", industry);
        record.market_cap = cap;
        record
    }

    fn treemap(records: &[CompanyRecord]) -> TreemapTrace {
        match generate_treemap(records).data.into_iter().next() {
            Some(Trace::Treemap(t)) => t,
            other => panic!("expected treemap trace, got {other:?}"),
        }
    }

    #[test]
    fn test_hierarchy_ids_and_parents() {
        let trace = treemap(&[
            company("MCD", "McDonald's", "Restaurants", Some(200e9)),
            company("SBUX", "Starbucks", "Restaurants", Some(100e9)),
        ]);

        assert_eq!(
            trace.ids,
            vec![
                "Consumer Cyclical",
                "Consumer Cyclical/Restaurants",
                "Consumer Cyclical/Restaurants/MCD",
                "Consumer Cyclical/Restaurants/SBUX",
            ]
        );
        assert_eq!(
            trace.parents,
            vec!["", "Consumer Cyclical", "Consumer Cyclical/Restaurants", "Consumer Cyclical/Restaurants"]
        );
        assert_eq!(trace.labels[2], "MCD");
    }

    #[test]
    fn test_branch_values_are_totals() {
        let trace = treemap(&[
            company("MCD", "McDonald's", "Restaurants", Some(200e9)),
            company("SBUX", "Starbucks", "Restaurants", Some(100e9)),
            company("HD", "Home Depot", "Home Improvement Retail", Some(400e9)),
        ]);

        assert_eq!(trace.values[0], 700e9);
        assert_eq!(trace.values[1], 300e9);
        assert_eq!(trace.branchvalues, "total");
    }

    #[test]
    fn test_market_cap_million_for_every_leaf() {
        let records = vec![
            company("MCD", "McDonald's", "Restaurants", Some(212_345_678_901.0)),
            company("DPZ", "Domino's", "Restaurants", Some(15_000_000_000.0)),
            company("CAVA", "Cava", "Restaurants", Some(1_500_000.0)),
        ];
        let trace = treemap(&records);

        for record in &records {
            let id = format!("Consumer Cyclical/Restaurants/{}", record.ticker);
            let idx = trace.ids.iter().position(|i| *i == id).unwrap();
            let raw = record.market_cap.unwrap();
            assert_eq!(trace.customdata[idx].0, record.ticker);
            assert_eq!(trace.customdata[idx].1, record.name);
            assert_eq!(trace.customdata[idx].2, raw / 1_000_000.0);
            assert_eq!(trace.values[idx], raw);
        }
    }

    #[test]
    fn test_branch_hover_marks_mixed_leaves() {
        let trace = treemap(&[
            company("MCD", "McDonald's", "Restaurants", Some(200e9)),
            company("SBUX", "Starbucks", "Restaurants", Some(100e9)),
            company("HD", "Home Depot", "Home Improvement Retail", Some(400e9)),
        ]);

        assert_eq!(trace.customdata[0].0, MIXED);
        assert_eq!(trace.customdata[0].2, 700_000.0);
        // single-leaf branch keeps its leaf's text
        let hd_industry = trace
            .ids
            .iter()
            .position(|i| i == "Consumer Cyclical/Home Improvement Retail")
            .unwrap();
        assert_eq!(trace.customdata[hd_industry].0, "HD");
    }

    #[test]
    fn test_colors_follow_market_cap() {
        let trace = treemap(&[
            company("MCD", "McDonald's", "Restaurants", Some(300.0)),
            company("SBUX", "Starbucks", "Restaurants", Some(100.0)),
        ]);

        assert_eq!(trace.marker.colors[2], 300.0);
        assert_eq!(trace.marker.colors[3], 100.0);
        // (300*300 + 100*100) / 400
        assert_eq!(trace.marker.colors[1], 250.0);
        assert_eq!(trace.marker.colorscale, "Viridis");
    }

    #[test]
    fn test_rows_without_market_cap_are_skipped() {
        let trace = treemap(&[
            company("MCD", "McDonald's", "Restaurants", Some(200e9)),
            company("NEW", "Newco", "Restaurants", None),
            company("ZERO", "Zero", "Restaurants", Some(0.0)),
        ]);
        assert_eq!(trace.ids.len(), 3);
        assert!(!trace.ids.iter().any(|i| i.ends_with("/NEW") || i.ends_with("/ZERO")));
    }

    #[test]
    fn test_duplicate_tickers_merge() {
        let trace = treemap(&[
            company("MCD", "McDonald's", "Restaurants", Some(100.0)),
            company("MCD", "McDonald's", "Restaurants", Some(50.0)),
        ]);
        assert_eq!(trace.ids.len(), 3);
        assert_eq!(trace.values[2], 150.0);
        assert_eq!(trace.marker.colors[2], 150.0);
        assert_eq!(trace.customdata[2].2, 150.0 / 1_000_000.0);
    }

    #[test]
    fn test_empty_input_keeps_layout() {
        let figure = generate_treemap(&[]);
        assert_eq!(figure.layout.title.text, TITLE);
        assert_eq!(figure.layout.title.font.size, 20);
        match &figure.data[0] {
            Trace::Treemap(t) => assert!(t.ids.is_empty()),
            other => panic!("unexpected trace {other:?}"),
        }
    }
}
