// ============================================================================
// JSON Codec
// Encodes money as a JSON object through the generic encoder/decoder hooks
// ============================================================================

use crate::domain::{MoneyError, MoneyResult};
use crate::interfaces::{CurrencyLookup, MoneyData, MoneyDecoder, MoneyEncoder};
use crate::numeric::FixedDecimal;
use num_bigint::BigInt;
use serde_json::{json, Value};
use std::sync::Arc;

/// JSON representation of money:
///
/// ```text
/// {"minor_units": "1050", "scale": 2, "currency": "AUD"}
/// ```
///
/// Minor units travel as a string so that amounts beyond 64 bits survive
/// JSON readers that parse numbers as doubles.
pub struct JsonCodec {
    lookup: Arc<dyn CurrencyLookup>,
}

impl JsonCodec {
    pub fn new(lookup: Arc<dyn CurrencyLookup>) -> Self {
        Self { lookup }
    }
}

fn invalid(detail: &str) -> MoneyError {
    MoneyError::InvalidInput(detail.to_string())
}

fn field<'a>(value: &'a Value, name: &str) -> MoneyResult<&'a Value> {
    value
        .get(name)
        .ok_or_else(|| MoneyError::InvalidInput(format!("missing field {name:?}")))
}

impl MoneyEncoder<Value> for JsonCodec {
    fn encode(&self, data: &MoneyData) -> Value {
        json!({
            "minor_units": data.amount.minor_units().to_string(),
            "scale": data.amount.scale(),
            "currency": data.currency.code(),
        })
    }
}

impl MoneyDecoder<Value> for JsonCodec {
    fn decode(&self, value: &Value) -> MoneyResult<MoneyData> {
        let minor_units = field(value, "minor_units")?
            .as_str()
            .and_then(|text| text.parse::<BigInt>().ok())
            .ok_or_else(|| invalid("minor_units must be an integer string"))?;

        let scale = field(value, "scale")?
            .as_u64()
            .and_then(|scale| u32::try_from(scale).ok())
            .ok_or_else(|| invalid("scale must be a non-negative integer"))?;

        let code = field(value, "currency")?
            .as_str()
            .ok_or_else(|| invalid("currency must be a string"))?;

        let currency = self.lookup.resolve(code)?;
        let amount = FixedDecimal::new(minor_units, scale)?;
        Ok(MoneyData::new(amount, currency))
    }
}
