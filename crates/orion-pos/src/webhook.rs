//! # POS Webhook Events
//!
//! The POS pushes `{ "type": "...", "data": ... }` envelopes. Known types
//! decode into typed payloads; anything else is kept as [`PosWebhookEvent::Unknown`]
//! so the caller can log and move on.

use serde::Deserialize;
use serde_json::Value;

use crate::error::PosResult;
use crate::protocol::{PosProduct, PosSale, StockLevel};

#[derive(Debug, Clone, PartialEq)]
pub enum PosWebhookEvent {
    /// A checkout finished on the till.
    SaleCompleted(PosSale),
    /// Absolute stock levels changed on the POS side.
    StockUpdated(Vec<StockLevel>),
    /// A product was created on the POS.
    ProductAdded(PosProduct),
    Unknown(String),
}

#[derive(Deserialize)]
struct Envelope {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    data: Value,
}

impl PosWebhookEvent {
    /// Decodes a webhook body. Malformed data for a known type is an error;
    /// an unknown type is not.
    pub fn from_json(body: &str) -> PosResult<Self> {
        let envelope: Envelope = serde_json::from_str(body)?;
        Self::from_parts(&envelope.kind, envelope.data)
    }

    pub fn from_parts(kind: &str, data: Value) -> PosResult<Self> {
        Ok(match kind {
            "sale_completed" => PosWebhookEvent::SaleCompleted(serde_json::from_value(data)?),
            "stock_updated" => PosWebhookEvent::StockUpdated(serde_json::from_value(data)?),
            "product_added" => PosWebhookEvent::ProductAdded(serde_json::from_value(data)?),
            other => PosWebhookEvent::Unknown(other.to_string()),
        })
    }

    pub fn kind(&self) -> &str {
        match self {
            PosWebhookEvent::SaleCompleted(_) => "sale_completed",
            PosWebhookEvent::StockUpdated(_) => "stock_updated",
            PosWebhookEvent::ProductAdded(_) => "product_added",
            PosWebhookEvent::Unknown(kind) => kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PosError;

    #[test]
    fn test_stock_updated() {
        let event = PosWebhookEvent::from_json(
            r#"{"type":"stock_updated","data":[{"productId":"2","stock":12}]}"#,
        )
        .unwrap();

        match event {
            PosWebhookEvent::StockUpdated(levels) => {
                assert_eq!(levels.len(), 1);
                assert_eq!(levels[0].product_id, "2");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_unknown_type_is_not_an_error() {
        let event = PosWebhookEvent::from_json(r#"{"type":"shift_closed","data":{"till":4}}"#)
            .unwrap();
        assert_eq!(event, PosWebhookEvent::Unknown("shift_closed".into()));
        assert_eq!(event.kind(), "shift_closed");
    }

    #[test]
    fn test_malformed_known_type_is_decode_error() {
        let err = PosWebhookEvent::from_json(r#"{"type":"sale_completed","data":{"id":1}}"#)
            .unwrap_err();
        assert!(matches!(err, PosError::Decode(_)));
    }

    #[test]
    fn test_missing_type_is_decode_error() {
        assert!(PosWebhookEvent::from_json(r#"{"data":[]}"#).is_err());
    }
}
