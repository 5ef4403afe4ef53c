//! Plotly figure model.
//!
//! Serializes to the JSON `{ "data": [...], "layout": {...} }` that
//! `Plotly.react` accepts. Only the attributes the dashboard uses are modeled.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Treemap(TreemapTrace),
    Scatter(ScatterTrace),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreemapTrace {
    pub ids: Vec<String>,
    pub labels: Vec<String>,
    pub parents: Vec<String>,
    pub values: Vec<f64>,
    pub branchvalues: String,
    pub marker: ColorScaleMarker,
    pub customdata: Vec<TreemapNodeData>,
    pub hovertemplate: String,
}

/// Per-node hover payload: `[Ticker, Name, Market_Cap_Million]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreemapNodeData(pub String, pub String, pub f64);

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorScaleMarker {
    pub colors: Vec<f64>,
    pub colorscale: String,
    pub showscale: bool,
    pub colorbar: ColorBar,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorBar {
    pub title: Text,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterTrace {
    pub name: String,
    pub mode: String,
    pub x: Vec<String>,
    pub y: Vec<Option<f64>>,
    pub customdata: Vec<[String; 1]>,
    pub hovertemplate: String,
    pub legendgroup: String,
    pub showlegend: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Text {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    pub text: String,
    pub font: Font,
    pub x: f64,
    pub xanchor: String,
}

impl Title {
    pub fn centered(text: impl Into<String>, size: u32) -> Self {
        Self {
            text: text.into(),
            font: Font { size },
            x: 0.5,
            xanchor: "center".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Font {
    pub size: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub title: Text,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub title: Text,
}

/// A layout shape. The dashboard only draws dashed horizontal lines.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Shape {
    #[serde(rename = "type")]
    pub kind: String,
    pub xref: String,
    pub x0: f64,
    pub x1: f64,
    pub yref: String,
    pub y0: f64,
    pub y1: f64,
    pub line: Line,
}

impl Shape {
    /// Horizontal line spanning the whole x domain at `y`.
    pub fn hline(y: f64, dash: &str) -> Self {
        Self {
            kind: "line".to_string(),
            xref: "x domain".to_string(),
            x0: 0.0,
            x1: 1.0,
            yref: "y".to_string(),
            y0: y,
            y1: y,
            line: Line {
                dash: dash.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Line {
    pub dash: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Annotation {
    pub text: String,
    pub xref: String,
    pub x: f64,
    pub yref: String,
    pub y: f64,
    pub showarrow: bool,
    pub xanchor: String,
    pub yanchor: String,
}

impl Annotation {
    /// Label sitting on top of an [`Shape::hline`], at its left end.
    pub fn top_left(text: impl Into<String>, y: f64) -> Self {
        Self {
            text: text.into(),
            xref: "x domain".to_string(),
            x: 0.0,
            yref: "y".to_string(),
            y,
            showarrow: false,
            xanchor: "left".to_string(),
            yanchor: "bottom".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub title: Title,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend: Option<Legend>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub shapes: Vec<Shape>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,
}

impl Layout {
    pub fn titled(title: Title) -> Self {
        Self {
            title,
            xaxis: None,
            yaxis: None,
            legend: None,
            shapes: Vec::new(),
            annotations: Vec::new(),
        }
    }
}
