use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One point of a stock price series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: String,
    pub price: f64,
}

/// A labelled value used by bar and pie charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub label: String,
    pub value: f64,
}

/// Display-only descriptor of a chart or prompt the assistant wants rendered.
///
/// The descriptor is kept exactly as the backend sent it ([`raw`](Self::raw)).
/// [`view`](Self::view) is a typed reading of the component types this client
/// knows how to summarise; anything that does not fit one of them is still
/// forwarded, with [`ComponentView::Unknown`] as its view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub struct UiComponent {
    raw: Value,
    view: ComponentView,
}

/// Typed reading of a known component type.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ComponentView {
    /// Price history for a single ticker
    StockPriceChart {
        symbol: String,
        #[serde(default)]
        title: Option<String>,
        #[serde(default)]
        data: Vec<PricePoint>,
    },
    /// Ranked horizontal bars (e.g. peers by market cap)
    RankingBarChart {
        #[serde(default)]
        title: Option<String>,
        #[serde(default)]
        data: Vec<DataPoint>,
    },
    /// Share of a whole (e.g. shareholding pattern)
    PieChart {
        #[serde(default)]
        title: Option<String>,
        #[serde(default)]
        data: Vec<DataPoint>,
    },
    /// The assistant needs the user to pick one of several options
    ClarificationOptions {
        question: String,
        #[serde(default)]
        options: Vec<String>,
    },
    /// Unknown type, or a known type whose fields don't match
    #[serde(skip)]
    Unknown,
}

impl UiComponent {
    /// The descriptor exactly as received.
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    pub fn view(&self) -> &ComponentView {
        &self.view
    }

    /// Wire name of the component type, `"unknown"` when the tag is missing.
    pub fn kind(&self) -> &str {
        self.raw
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or("unknown")
    }

    /// One-line plain text summary, used where charts can't be drawn.
    pub fn summary(&self) -> String {
        match &self.view {
            ComponentView::StockPriceChart { symbol, data, .. } => {
                match (data.first(), data.last()) {
                    (Some(first), Some(last)) if data.len() > 1 => format!(
                        "{} price chart: {} points, {} {:.2} -> {} {:.2}",
                        symbol,
                        data.len(),
                        first.date,
                        first.price,
                        last.date,
                        last.price
                    ),
                    _ => format!("{} price chart: {} points", symbol, data.len()),
                }
            }
            ComponentView::RankingBarChart { title, data } => format!(
                "{}: {}",
                title.as_deref().unwrap_or("Ranking"),
                join_points(data)
            ),
            ComponentView::PieChart { title, data } => format!(
                "{}: {}",
                title.as_deref().unwrap_or("Breakdown"),
                join_points(data)
            ),
            ComponentView::ClarificationOptions { question, options } => {
                let numbered: Vec<String> = options
                    .iter()
                    .enumerate()
                    .map(|(i, option)| format!("{}) {}", i + 1, option))
                    .collect();
                format!("{} {}", question, numbered.join(" "))
            }
            ComponentView::Unknown => format!("{} component", self.kind()),
        }
    }
}

impl TryFrom<Value> for UiComponent {
    type Error = String;

    /// Any JSON object is a descriptor; other JSON values are not.
    fn try_from(raw: Value) -> Result<Self, Self::Error> {
        if !raw.is_object() {
            return Err(format!("UI component must be a JSON object, got {}", raw));
        }
        let view = ComponentView::deserialize(&raw).unwrap_or(ComponentView::Unknown);
        Ok(Self { raw, view })
    }
}

impl From<UiComponent> for Value {
    fn from(component: UiComponent) -> Self {
        component.raw
    }
}

fn join_points(data: &[DataPoint]) -> String {
    data.iter()
        .map(|p| format!("{} {}", p.label, p.value))
        .collect::<Vec<_>>()
        .join(", ")
}
