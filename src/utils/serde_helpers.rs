// Tolerancia de tipos: el backend y los datos antiguos mezclan números y cadenas
// (ids numéricos, `rating` guardado como "4.3").

use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::Value;

/// Acepta `"abc"`, `12` o `12.0` como id
pub fn id_from_any<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(de::Error::custom(format!("id inválido: {}", other))),
    }
}

/// Acepta `4.3` o `"4.3"`
pub fn f64_from_any<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| de::Error::custom("número fuera de rango")),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|e| de::Error::custom(format!("número inválido '{}': {}", s, e))),
        Value::Null => Ok(0.0),
        other => Err(de::Error::custom(format!("número inválido: {}", other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(deserialize_with = "id_from_any")]
        id: String,
        #[serde(deserialize_with = "f64_from_any")]
        rating: f64,
    }

    #[test]
    fn test_mixed_types_are_accepted() {
        let p: Probe = serde_json::from_str(r#"{"id": 3, "rating": "4.5"}"#).unwrap();
        assert_eq!(p.id, "3");
        assert_eq!(p.rating, 4.5);

        let p: Probe = serde_json::from_str(r#"{"id": "x1", "rating": 3}"#).unwrap();
        assert_eq!(p.id, "x1");
        assert_eq!(p.rating, 3.0);
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!(serde_json::from_str::<Probe>(r#"{"id": [], "rating": 1}"#).is_err());
        assert!(serde_json::from_str::<Probe>(r#"{"id": "a", "rating": "high"}"#).is_err());
    }
}
