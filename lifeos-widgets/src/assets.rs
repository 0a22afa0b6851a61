use lifeos_core::Widget;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    prelude::Widget as RatatuiWidget,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: String,
    pub name: String,
    pub symbol: String,
    pub amount: f64,
    pub value: f64,
    /// Percent move since purchase; sign picks the row color.
    #[serde(default)]
    pub change: f64,
    #[serde(rename = "type", default)]
    pub kind: String,
}

/// Config for the investment portfolio card.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AssetListConfig {
    pub assets: Vec<Asset>,
}

/// Holdings list with per-asset value and percentage move.
pub struct AssetList {
    config: AssetListConfig,
}

impl AssetList {
    pub fn new(config: AssetListConfig) -> Self {
        Self { config }
    }
}

impl Widget for AssetList {
    fn on_config_updated(&mut self, config: &Value) {
        self.config = serde_json::from_value(config.clone()).unwrap_or_default();
    }

    fn render(&mut self, area: Rect, buf: &mut Buffer) {
        let lines: Vec<Line> = self
            .config
            .assets
            .iter()
            .map(|asset| {
                let change_color = if asset.change >= 0.0 {
                    Color::Green
                } else {
                    Color::Red
                };
                Line::from(vec![
                    Span::styled(
                        format!("{:<16}", asset.name),
                        Style::default().fg(Color::White),
                    ),
                    Span::styled(
                        format!("{} {}  ", asset.amount, asset.symbol),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::styled(
                        format!("${:.2}  ", asset.value),
                        Style::default().fg(Color::White),
                    ),
                    Span::styled(
                        format!("{:+.1}%", asset.change),
                        Style::default().fg(change_color),
                    ),
                ])
            })
            .collect();

        Paragraph::new(lines).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn config_uses_wire_names() {
        let cfg: AssetListConfig = serde_json::from_value(json!({
            "assets": [{
                "id": "a1", "name": "Bitcoin", "symbol": "BTC",
                "amount": 0.5, "value": 31000.0, "change": 2.4, "type": "crypto"
            }]
        }))
        .unwrap();
        assert_eq!(cfg.assets[0].symbol, "BTC");
        assert_eq!(cfg.assets[0].kind, "crypto");
    }

    #[test]
    fn change_defaults_to_flat() {
        let cfg: AssetListConfig = serde_json::from_value(json!({
            "assets": [{"id": "a1", "name": "Cash", "symbol": "USD", "amount": 100.0, "value": 100.0}]
        }))
        .unwrap();
        assert_eq!(cfg.assets[0].change, 0.0);
    }
}
