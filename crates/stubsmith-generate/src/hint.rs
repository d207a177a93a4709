use serde_json::Value;

use stubsmith_core::{DATAGEN_EXTENSION, Extensions};

use crate::errors::GenerationError;

/// Generator hint carried by the `x-datagen` vendor extension.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeneratorHint {
    pub name: String,
    pub args: Vec<Value>,
}

impl GeneratorHint {
    /// Decode the hint for `field` from a descriptor's extensions.
    ///
    /// Decoding is weak: scalar names are stringified and a scalar `args`
    /// becomes a one-element list. A missing block yields an empty hint.
    pub fn from_extensions(field: &str, extensions: &Extensions) -> Result<Self, GenerationError> {
        match extensions.get(DATAGEN_EXTENSION) {
            None | Some(Value::Null) => Ok(Self::default()),
            Some(Value::Object(block)) => {
                let name = decode_name(field, block.get("name"))?;
                let args = decode_args(field, block.get("args"))?;
                Ok(Self { name, args })
            }
            Some(other) => Err(decode_error(
                field,
                format!("expected an object, found {}", json_kind(other)),
            )),
        }
    }
}

fn decode_name(field: &str, value: Option<&Value>) -> Result<String, GenerationError> {
    match value {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(name)) => Ok(name.trim().to_string()),
        Some(Value::Number(number)) => Ok(number.to_string()),
        Some(Value::Bool(flag)) => Ok(flag.to_string()),
        Some(other) => Err(decode_error(
            field,
            format!("name must be a string, found {}", json_kind(other)),
        )),
    }
}

fn decode_args(field: &str, value: Option<&Value>) -> Result<Vec<Value>, GenerationError> {
    match value {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => {
            if let Some((idx, item)) = items
                .iter()
                .enumerate()
                .find(|(_, item)| item.is_array() || item.is_object())
            {
                return Err(decode_error(
                    field,
                    format!("args[{idx}] must be a scalar, found {}", json_kind(item)),
                ));
            }
            Ok(items.clone())
        }
        Some(Value::Object(_)) => Err(decode_error(field, "args must be a list".to_string())),
        Some(scalar) => Ok(vec![scalar.clone()]),
    }
}

fn decode_error(field: &str, reason: String) -> GenerationError {
    GenerationError::Decode {
        field: field.to_string(),
        reason,
    }
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn extensions(block: Value) -> Extensions {
        let mut extensions = Extensions::new();
        extensions.insert(DATAGEN_EXTENSION.to_string(), block);
        extensions
    }

    #[test]
    fn wraps_scalar_args() {
        let hint = GeneratorHint::from_extensions(
            "title",
            &extensions(json!({"name": "words", "args": 3})),
        )
        .expect("decode hint");
        assert_eq!(hint.name, "words");
        assert_eq!(hint.args, vec![json!(3)]);
    }

    #[test]
    fn missing_block_is_empty() {
        let hint = GeneratorHint::from_extensions("title", &Extensions::new()).expect("decode");
        assert_eq!(hint, GeneratorHint::default());
    }

    #[test]
    fn rejects_structured_args() {
        let err = GeneratorHint::from_extensions(
            "title",
            &extensions(json!({"name": "words", "args": [[1, 2]]})),
        )
        .expect_err("nested args");
        assert!(matches!(err, GenerationError::Decode { .. }));

        let err = GeneratorHint::from_extensions("title", &extensions(json!("words")))
            .expect_err("non-object block");
        assert!(matches!(err, GenerationError::Decode { .. }));
    }
}
