use serde_json::Value;

use crate::errors::GenerationError;

/// Units produced by count-taking generators when no count is given.
pub const DEFAULT_COUNT: usize = 10;

/// Positional generator arguments, coerced weakly.
pub struct ArgList<'a> {
    generator: &'static str,
    args: &'a [Value],
}

impl<'a> ArgList<'a> {
    pub fn new(generator: &'static str, args: &'a [Value]) -> Self {
        Self { generator, args }
    }

    /// Non-negative count at `index`, `default` when absent.
    pub fn count(&self, index: usize, default: usize) -> Result<usize, GenerationError> {
        let Some(value) = self.present(index) else {
            return Ok(default);
        };
        to_i64(value)
            .and_then(|count| usize::try_from(count).ok())
            .ok_or_else(|| self.conversion_error(index, value, "non-negative integer"))
    }

    /// Flag at `index`, false when absent.
    pub fn flag(&self, index: usize) -> Result<bool, GenerationError> {
        let Some(value) = self.present(index) else {
            return Ok(false);
        };
        to_bool(value).ok_or_else(|| self.conversion_error(index, value, "boolean"))
    }

    fn present(&self, index: usize) -> Option<&'a Value> {
        self.args.get(index).filter(|value| !value.is_null())
    }

    fn conversion_error(
        &self,
        index: usize,
        value: &Value,
        target: &'static str,
    ) -> GenerationError {
        GenerationError::ArgumentConversion {
            generator: self.generator.to_string(),
            index,
            value: value.to_string(),
            target,
        }
    }
}

/// Numbers (truncated), numeric strings and booleans convert to integers.
pub fn to_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::String(text) => {
            let text = text.trim();
            text.parse::<i64>().ok().or_else(|| {
                text.parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite())
                    .map(|f| f.trunc() as i64)
            })
        }
        Value::Bool(flag) => Some(i64::from(*flag)),
        _ => None,
    }
}

/// Booleans, numbers (non-zero is true) and the usual textual spellings.
pub fn to_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(flag) => Some(*flag),
        Value::Number(number) => number.as_f64().map(|f| f != 0.0),
        Value::String(text) => match text.trim().to_ascii_lowercase().as_str() {
            "1" | "t" | "true" | "yes" | "y" | "on" => Some(true),
            "0" | "f" | "false" | "no" | "n" | "off" | "" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn counts_are_coerced_weakly() {
        let args = [json!("15"), json!(2.9), json!(true)];
        let list = ArgList::new("words", &args);
        assert_eq!(list.count(0, DEFAULT_COUNT).expect("string count"), 15);
        assert_eq!(list.count(1, DEFAULT_COUNT).expect("float count"), 2);
        assert_eq!(list.count(3, DEFAULT_COUNT).expect("absent count"), DEFAULT_COUNT);
        assert!(list.flag(2).expect("flag"));
    }

    #[test]
    fn reports_unconvertible_arguments() {
        let args = [json!("many"), json!(-3)];
        let list = ArgList::new("words", &args);
        let err = list.count(0, DEFAULT_COUNT).expect_err("not a number");
        assert!(matches!(
            err,
            GenerationError::ArgumentConversion { index: 0, .. }
        ));
        assert!(list.count(1, DEFAULT_COUNT).is_err());
        assert!(list.flag(0).is_err());
    }
}
