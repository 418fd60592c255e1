use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// One catalogue entry as returned by the OpenRouter listing endpoint.
/// Every field is untrusted: ids and names may be absent, context lengths
/// may be strings or garbage, pricing may be missing entirely.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModelRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "de_context_length")]
    pub context_length: Option<u64>,
    #[serde(default)]
    pub pricing: Option<Pricing>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Pricing {
    #[serde(default)]
    pub prompt: Value,
    #[serde(default)]
    pub completion: Value,
}

/// Accepts a JSON number or a numeric string; anything else becomes `None`.
fn de_context_length<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    })
}

impl ModelRecord {
    pub fn context_tokens(&self) -> u64 {
        self.context_length.unwrap_or(0)
    }
}

/// Parses a raw per-token price into a cost. Absent, empty, or non-numeric
/// values degrade to infinity so malformed pricing never looks free.
pub fn parse_price(raw: &Value) -> f64 {
    let parsed = match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match parsed {
        Some(v) if v.is_finite() => v,
        _ => f64::INFINITY,
    }
}

/// A model is free iff both prompt and completion costs parse to <= 0.
pub fn is_free_model(model: &ModelRecord) -> bool {
    let (prompt, completion) = match &model.pricing {
        Some(p) => (parse_price(&p.prompt), parse_price(&p.completion)),
        None => (f64::INFINITY, f64::INFINITY),
    };
    prompt <= 0.0 && completion <= 0.0
}

/// Keeps the free entries and orders them by descending context length.
/// The sort is stable, so records with equal (or missing) context lengths
/// keep their catalogue order.
pub fn free_models_sorted(models: Vec<ModelRecord>) -> Vec<ModelRecord> {
    let mut free: Vec<ModelRecord> = models.into_iter().filter(is_free_model).collect();
    free.sort_by(|a, b| b.context_tokens().cmp(&a.context_tokens()));
    free
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(id: &str, context: u64, prompt: &str, completion: &str) -> ModelRecord {
        ModelRecord {
            id: Some(id.to_string()),
            name: None,
            context_length: Some(context),
            pricing: Some(Pricing {
                prompt: json!(prompt),
                completion: json!(completion),
            }),
        }
    }

    #[test]
    fn test_parse_price_numeric_strings() {
        assert_eq!(parse_price(&json!("0.000000")), 0.0);
        assert_eq!(parse_price(&json!("1.25")), 1.25);
        assert_eq!(parse_price(&json!("-0.5")), -0.5);
    }

    #[test]
    fn test_parse_price_numbers() {
        assert_eq!(parse_price(&json!(0)), 0.0);
        assert_eq!(parse_price(&json!(0.002)), 0.002);
        assert_eq!(parse_price(&json!(-1)), -1.0);
    }

    #[test]
    fn test_parse_price_missing_or_junk_is_infinite() {
        assert_eq!(parse_price(&Value::Null), f64::INFINITY);
        assert_eq!(parse_price(&json!("")), f64::INFINITY);
        assert_eq!(parse_price(&json!("not-a-number")), f64::INFINITY);
        assert_eq!(parse_price(&json!(true)), f64::INFINITY);
        assert_eq!(parse_price(&json!({"amount": 1})), f64::INFINITY);
    }

    #[test]
    fn test_is_free_model_zero_string_prices() {
        let model = record("a", 1, "0.000000", "0");
        assert!(is_free_model(&model));
    }

    #[test]
    fn test_is_free_model_rejects_paid() {
        let model = record("a", 1, "0.000001", "0.00");
        assert!(!is_free_model(&model));
    }

    #[test]
    fn test_is_free_model_missing_pricing() {
        let model = ModelRecord {
            id: Some("a".into()),
            ..Default::default()
        };
        assert!(!is_free_model(&model));
    }

    #[test]
    fn test_deserialize_lenient_context_length() {
        let m: ModelRecord = serde_json::from_value(json!({
            "id": "v/m",
            "context_length": "32000"
        }))
        .unwrap();
        assert_eq!(m.context_length, Some(32000));

        let m: ModelRecord = serde_json::from_value(json!({
            "id": "v/m",
            "context_length": {"max": 1}
        }))
        .unwrap();
        assert_eq!(m.context_length, None);

        let m: ModelRecord = serde_json::from_value(json!({})).unwrap();
        assert_eq!(m.id, None);
        assert_eq!(m.context_tokens(), 0);
    }

    #[test]
    fn test_free_models_sorted_descending_and_stable() {
        let models = vec![
            record("small", 16_000, "0", "0"),
            record("paid", 128_000, "0.01", "0.01"),
            record("tie-a", 64_000, "0", "0"),
            record("tie-b", 64_000, "0", "0"),
        ];

        let free = free_models_sorted(models);
        let ids: Vec<&str> = free.iter().map(|m| m.id.as_deref().unwrap()).collect();
        assert_eq!(ids, vec!["tie-a", "tie-b", "small"]);
    }

    #[test]
    fn test_missing_context_sorts_last() {
        let no_ctx = ModelRecord {
            id: Some("none".into()),
            pricing: Some(Pricing {
                prompt: json!("0"),
                completion: json!("0"),
            }),
            ..Default::default()
        };
        let models = vec![no_ctx, record("big", 200_000, "0", "0")];

        let free = free_models_sorted(models);
        assert_eq!(free[0].id.as_deref(), Some("big"));
        assert_eq!(free[1].id.as_deref(), Some("none"));
    }
}
