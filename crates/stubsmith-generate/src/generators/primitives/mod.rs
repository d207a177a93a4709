use chrono::{Duration, SecondsFormat, Utc};
use rand::{Rng, RngCore};
use rand_regex::Regex as RandRegex;

use crate::accessor::ConstraintAccessor;
use crate::errors::GenerationError;
use crate::generators::{GeneratedValue, GeneratorContext, GeneratorRegistry, Producer};
use crate::params::{ArgList, DEFAULT_COUNT};

const DEFAULT_INT_MIN: i64 = 0;
const DEFAULT_INT_MAX: i64 = 10000;
const DEFAULT_FLOAT_MIN: f64 = 0.0;
const DEFAULT_FLOAT_MAX: f64 = 10000.0;
const DEFAULT_TEXT_MAX: i64 = 32;
const DEFAULT_MAX_REPEAT: u32 = 32;
const DEFAULT_ITEMS_MAX: i64 = 3;
const PATTERN_ATTEMPTS: usize = 16;
const UNIQUE_ATTEMPTS_PER_ITEM: usize = 10;
const DATE_SPAN_DAYS: i64 = 365;
const DEFAULT_CHARSET: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const CHARACTERS_CHARSET: &str = "abcdefghijklmnopqrstuvwxyz0123456789";

pub fn register(registry: &mut GeneratorRegistry) {
    registry.register_generator(Box::new(BoolGenerator));
    registry.register_generator(Box::new(CharactersGenerator));
    registry.register_generator(Box::new(StringGenerator));
    registry.register_generator(Box::new(IntegerGenerator));
    registry.register_generator(Box::new(NumberGenerator));
    registry.register_generator(Box::new(ArrayGenerator));
    registry.register_generator(Box::new(EnumGenerator));
    registry.register_generator(Box::new(DateGenerator));
    registry.register_generator(Box::new(DateTimeGenerator));
    for (id, version) in [
        ("uuid", UuidVersion::Random),
        ("uuid3", UuidVersion::Md5),
        ("uuid4", UuidVersion::Random),
        ("uuid5", UuidVersion::Sha1),
    ] {
        registry.register_generator(Box::new(UuidGenerator { id, version }));
    }
}

struct BoolGenerator;

impl Producer for BoolGenerator {
    fn id(&self) -> &'static str {
        "bool"
    }

    fn produce(
        &self,
        _ctx: &GeneratorContext<'_>,
        rng: &mut dyn RngCore,
    ) -> Result<GeneratedValue, GenerationError> {
        Ok(GeneratedValue::Bool(rng.random_bool(0.5)))
    }
}

struct CharactersGenerator;

impl Producer for CharactersGenerator {
    fn id(&self) -> &'static str {
        "characters"
    }

    fn produce(
        &self,
        ctx: &GeneratorContext<'_>,
        rng: &mut dyn RngCore,
    ) -> Result<GeneratedValue, GenerationError> {
        let count = ArgList::new(self.id(), ctx.accessor.args()).count(0, DEFAULT_COUNT)?;
        Ok(GeneratedValue::Text(random_text(
            CHARACTERS_CHARSET,
            count,
            rng,
        )))
    }
}

/// Text honoring `pattern` when present, else alphanumeric within the
/// length bounds.
struct StringGenerator;

impl Producer for StringGenerator {
    fn id(&self) -> &'static str {
        "string"
    }

    fn produce(
        &self,
        ctx: &GeneratorContext<'_>,
        rng: &mut dyn RngCore,
    ) -> Result<GeneratedValue, GenerationError> {
        let accessor = ctx.accessor;
        let (min_len, max_len) = text_bounds(accessor)?;

        if let Some(pattern) = accessor.pattern() {
            let regex = RandRegex::compile(strip_anchors(pattern), DEFAULT_MAX_REPEAT).map_err(
                |err| {
                    GenerationError::InvalidConstraint(format!(
                        "invalid pattern for field '{}': {err}",
                        accessor.field_name()
                    ))
                },
            )?;
            let mut value: String = rng.sample(&regex);
            for _ in 1..PATTERN_ATTEMPTS {
                let len = value.chars().count();
                if len >= min_len && len <= max_len {
                    break;
                }
                value = rng.sample(&regex);
            }
            return Ok(GeneratedValue::Text(value));
        }

        let len = if min_len == max_len {
            min_len
        } else {
            rng.random_range(min_len..=max_len)
        };
        Ok(GeneratedValue::Text(random_text(DEFAULT_CHARSET, len, rng)))
    }
}

struct IntegerGenerator;

impl Producer for IntegerGenerator {
    fn id(&self) -> &'static str {
        "integer"
    }

    fn produce(
        &self,
        ctx: &GeneratorContext<'_>,
        rng: &mut dyn RngCore,
    ) -> Result<GeneratedValue, GenerationError> {
        let accessor = ctx.accessor;
        let (min, max) = integer_bounds(accessor)?;

        let Some(step) = accessor.multiple_of().filter(|step| *step != 0.0) else {
            return Ok(GeneratedValue::Int(rng.random_range(min..=max)));
        };
        if step.fract() != 0.0 {
            return Err(GenerationError::InvalidConstraint(format!(
                "field '{}': multipleOf {step} is not an integer",
                accessor.field_name()
            )));
        }
        let step = (step.abs() as i64).max(1);
        let first = div_ceil(min, step);
        let last = max.div_euclid(step);
        if first > last {
            return Err(GenerationError::InvalidConstraint(format!(
                "field '{}': no multiple of {step} between {min} and {max}",
                accessor.field_name()
            )));
        }
        let k = rng.random_range(first..=last);
        Ok(GeneratedValue::Int(k.saturating_mul(step)))
    }
}

struct NumberGenerator;

impl Producer for NumberGenerator {
    fn id(&self) -> &'static str {
        "number"
    }

    fn produce(
        &self,
        ctx: &GeneratorContext<'_>,
        rng: &mut dyn RngCore,
    ) -> Result<GeneratedValue, GenerationError> {
        let accessor = ctx.accessor;
        let bounds = FloatBounds::from_accessor(accessor)?;

        if let Some(step) = accessor.multiple_of().filter(|step| *step != 0.0) {
            let step = step.abs();
            let mut first = (bounds.min / step).ceil();
            if bounds.exclusive_min && first * step <= bounds.min {
                first += 1.0;
            }
            let mut last = (bounds.max / step).floor();
            if bounds.exclusive_max && last * step >= bounds.max {
                last -= 1.0;
            }
            if first > last {
                return Err(GenerationError::InvalidConstraint(format!(
                    "field '{}': no multiple of {step} between {} and {}",
                    accessor.field_name(),
                    bounds.min,
                    bounds.max
                )));
            }
            let (Some(first), Some(last)) = (float_to_i64(first), float_to_i64(last)) else {
                return Err(GenerationError::InvalidConstraint(format!(
                    "field '{}': too many multiples of {step} between {} and {}",
                    accessor.field_name(),
                    bounds.min,
                    bounds.max
                )));
            };
            let k = rng.random_range(first..=last);
            return Ok(GeneratedValue::Float(k as f64 * step));
        }

        let value = bounds.sample(rng);
        let rounded = (value * 100.0).round() / 100.0;
        let value = if bounds.admits(rounded) {
            rounded
        } else if bounds.admits(value) {
            value
        } else {
            bounds.lowest().ok_or_else(|| {
                GenerationError::InvalidConstraint(format!(
                    "field '{}': no number between {} and {}",
                    accessor.field_name(),
                    bounds.min,
                    bounds.max
                ))
            })?
        };
        Ok(GeneratedValue::Float(value))
    }
}

/// List whose elements come from the producer resolved for the items
/// accessor.
struct ArrayGenerator;

impl Producer for ArrayGenerator {
    fn id(&self) -> &'static str {
        "array"
    }

    fn produce(
        &self,
        ctx: &GeneratorContext<'_>,
        rng: &mut dyn RngCore,
    ) -> Result<GeneratedValue, GenerationError> {
        let accessor = ctx.accessor;
        let items = accessor.items()?;
        let (min, max) = items_bounds(accessor)?;
        let count = if min == max {
            min
        } else {
            rng.random_range(min..=max)
        };

        let mut values = Vec::with_capacity(count);
        if !accessor.unique_items() {
            for _ in 0..count {
                values.push(ctx.registry.generate(items.as_ref(), rng)?);
            }
            return Ok(GeneratedValue::List(values));
        }

        let mut attempts = 0;
        while values.len() < count && attempts < count * UNIQUE_ATTEMPTS_PER_ITEM {
            attempts += 1;
            let value = ctx.registry.generate(items.as_ref(), rng)?;
            if !values.contains(&value) {
                values.push(value);
            }
        }
        if values.len() < min {
            return Err(GenerationError::InvalidConstraint(format!(
                "field '{}': could not generate {min} unique items",
                accessor.field_name()
            )));
        }
        Ok(GeneratedValue::List(values))
    }
}

struct EnumGenerator;

impl Producer for EnumGenerator {
    fn id(&self) -> &'static str {
        "enum"
    }

    fn produce(
        &self,
        ctx: &GeneratorContext<'_>,
        rng: &mut dyn RngCore,
    ) -> Result<GeneratedValue, GenerationError> {
        let values = ctx.accessor.enum_values().ok_or_else(|| {
            GenerationError::InvalidConstraint(format!(
                "enum values missing for field '{}'",
                ctx.accessor.field_name()
            ))
        })?;
        let idx = rng.random_range(0..values.len());
        Ok(GeneratedValue::from_json(&values[idx]))
    }
}

/// Full-date within a year of today.
struct DateGenerator;

impl Producer for DateGenerator {
    fn id(&self) -> &'static str {
        "date"
    }

    fn produce(
        &self,
        _ctx: &GeneratorContext<'_>,
        rng: &mut dyn RngCore,
    ) -> Result<GeneratedValue, GenerationError> {
        let base = Utc::now().date_naive();
        let offset = rng.random_range(-DATE_SPAN_DAYS..=DATE_SPAN_DAYS);
        let date = base + Duration::days(offset);
        Ok(GeneratedValue::Text(date.format("%Y-%m-%d").to_string()))
    }
}

/// RFC 3339 UTC timestamp within a year of now.
struct DateTimeGenerator;

impl Producer for DateTimeGenerator {
    fn id(&self) -> &'static str {
        "date-time"
    }

    fn produce(
        &self,
        _ctx: &GeneratorContext<'_>,
        rng: &mut dyn RngCore,
    ) -> Result<GeneratedValue, GenerationError> {
        let span = DATE_SPAN_DAYS * 24 * 60 * 60;
        let offset = rng.random_range(-span..=span);
        let timestamp = Utc::now() + Duration::seconds(offset);
        Ok(GeneratedValue::Text(
            timestamp.to_rfc3339_opts(SecondsFormat::Secs, true),
        ))
    }
}

#[derive(Clone, Copy)]
enum UuidVersion {
    Random,
    Md5,
    Sha1,
}

struct UuidGenerator {
    id: &'static str,
    version: UuidVersion,
}

impl Producer for UuidGenerator {
    fn id(&self) -> &'static str {
        self.id
    }

    fn produce(
        &self,
        _ctx: &GeneratorContext<'_>,
        rng: &mut dyn RngCore,
    ) -> Result<GeneratedValue, GenerationError> {
        let mut bytes = [0_u8; 16];
        rng.fill_bytes(&mut bytes);
        let uuid = match self.version {
            UuidVersion::Random => {
                bytes[6] = (bytes[6] & 0x0f) | 0x40;
                bytes[8] = (bytes[8] & 0x3f) | 0x80;
                uuid::Uuid::from_bytes(bytes)
            }
            UuidVersion::Md5 => uuid::Uuid::new_v3(&uuid::Uuid::NAMESPACE_OID, &bytes),
            UuidVersion::Sha1 => uuid::Uuid::new_v5(&uuid::Uuid::NAMESPACE_OID, &bytes),
        };
        Ok(GeneratedValue::Text(uuid.to_string()))
    }
}

pub(crate) fn random_text(charset: &str, len: usize, rng: &mut dyn RngCore) -> String {
    let chars: Vec<char> = charset.chars().collect();
    let mut value = String::with_capacity(len);
    if chars.is_empty() {
        return value;
    }
    for _ in 0..len {
        let idx = rng.random_range(0..chars.len());
        value.push(chars[idx]);
    }
    value
}

/// `rand_regex` generates from the pattern body; anchors carry no text.
pub(crate) fn strip_anchors(pattern: &str) -> &str {
    let pattern = pattern.strip_prefix('^').unwrap_or(pattern);
    match pattern.strip_suffix('$') {
        Some(body) if !body.ends_with('\\') => body,
        _ => pattern,
    }
}

fn text_bounds(accessor: &dyn ConstraintAccessor) -> Result<(usize, usize), GenerationError> {
    let min = accessor.min_length();
    let max = accessor.max_length();
    let (min, max) = match (min, max) {
        (Some(min), Some(max)) => (min, max),
        (Some(min), None) => (min, DEFAULT_TEXT_MAX.max(min)),
        (None, Some(max)) => (1.min(max), max),
        (None, None) => (1, DEFAULT_TEXT_MAX),
    };
    checked_range(accessor, "length", min, max)
}

fn items_bounds(accessor: &dyn ConstraintAccessor) -> Result<(usize, usize), GenerationError> {
    let (min, max) = match (accessor.min_items(), accessor.max_items()) {
        (Some(min), Some(max)) => (min, max),
        (Some(min), None) => (min, DEFAULT_ITEMS_MAX.max(min)),
        (None, Some(max)) => (1.min(max), max),
        (None, None) => (1, DEFAULT_ITEMS_MAX),
    };
    checked_range(accessor, "items", min, max)
}

fn checked_range(
    accessor: &dyn ConstraintAccessor,
    what: &str,
    min: i64,
    max: i64,
) -> Result<(usize, usize), GenerationError> {
    let invalid = || {
        GenerationError::InvalidConstraint(format!(
            "field '{}': {what} bounds {min}..{max} are not satisfiable",
            accessor.field_name()
        ))
    };
    let min = usize::try_from(min).map_err(|_| invalid())?;
    let max = usize::try_from(max).map_err(|_| invalid())?;
    if min > max {
        return Err(invalid());
    }
    Ok((min, max))
}

fn integer_bounds(accessor: &dyn ConstraintAccessor) -> Result<(i64, i64), GenerationError> {
    let min = match accessor.minimum() {
        Some(bound) if bound.exclusive => {
            Some(integer_edge(accessor, bound.value.floor(), true)?.saturating_add(1))
        }
        Some(bound) => Some(integer_edge(accessor, bound.value.ceil(), true)?),
        None => None,
    };
    let max = match accessor.maximum() {
        Some(bound) if bound.exclusive => {
            Some(integer_edge(accessor, bound.value.ceil(), false)?.saturating_sub(1))
        }
        Some(bound) => Some(integer_edge(accessor, bound.value.floor(), false)?),
        None => None,
    };
    let (min, max) = match (min, max) {
        (Some(min), Some(max)) => (min, max),
        (Some(min), None) if min <= DEFAULT_INT_MAX => (min, DEFAULT_INT_MAX),
        (Some(min), None) => (min, min.saturating_add(DEFAULT_INT_MAX)),
        (None, Some(max)) if max >= DEFAULT_INT_MIN => (DEFAULT_INT_MIN, max),
        (None, Some(max)) => (max.saturating_sub(DEFAULT_INT_MAX), max),
        (None, None) => (DEFAULT_INT_MIN, DEFAULT_INT_MAX),
    };
    if min > max {
        return Err(GenerationError::InvalidConstraint(format!(
            "field '{}': minimum {min} exceeds maximum {max}",
            accessor.field_name()
        )));
    }
    Ok((min, max))
}

struct FloatBounds {
    min: f64,
    max: f64,
    exclusive_min: bool,
    exclusive_max: bool,
}

impl FloatBounds {
    fn from_accessor(accessor: &dyn ConstraintAccessor) -> Result<Self, GenerationError> {
        let minimum = accessor.minimum();
        let maximum = accessor.maximum();
        let (min, max) = match (minimum, maximum) {
            (Some(min), Some(max)) => (min.value, max.value),
            (Some(min), None) => (min.value, widen(min.value, 1.0).max(DEFAULT_FLOAT_MAX)),
            (None, Some(max)) => (widen(max.value, -1.0).min(DEFAULT_FLOAT_MIN), max.value),
            (None, None) => (DEFAULT_FLOAT_MIN, DEFAULT_FLOAT_MAX),
        };
        let bounds = Self {
            min,
            max,
            exclusive_min: minimum.is_some_and(|bound| bound.exclusive),
            exclusive_max: maximum.is_some_and(|bound| bound.exclusive),
        };
        let empty = min > max || (min == max && (bounds.exclusive_min || bounds.exclusive_max));
        if empty || !min.is_finite() || !max.is_finite() {
            return Err(GenerationError::InvalidConstraint(format!(
                "field '{}': no number between {min} and {max}",
                accessor.field_name()
            )));
        }
        Ok(bounds)
    }

    /// Uniform draw over the bounds. Interpolates so spans wider than
    /// `f64::MAX` stay finite.
    fn sample(&self, rng: &mut dyn RngCore) -> f64 {
        if self.min == self.max {
            return self.min;
        }
        let t: f64 = rng.random();
        (self.min * (1.0 - t) + self.max * t).clamp(self.min, self.max)
    }

    /// Closest admitted value to the lower bound.
    fn lowest(&self) -> Option<f64> {
        let lowest = if self.exclusive_min {
            self.min.next_up()
        } else {
            self.min
        };
        self.admits(lowest).then_some(lowest)
    }

    fn admits(&self, value: f64) -> bool {
        let above = if self.exclusive_min {
            value > self.min
        } else {
            value >= self.min
        };
        let below = if self.exclusive_max {
            value < self.max
        } else {
            value <= self.max
        };
        above && below
    }
}

/// Integer bound for an integral float edge. An edge beyond the `i64`
/// range clamps when it lies on the open side and fails otherwise.
fn integer_edge(
    accessor: &dyn ConstraintAccessor,
    edge: f64,
    lower: bool,
) -> Result<i64, GenerationError> {
    if let Some(value) = float_to_i64(edge) {
        return Ok(value);
    }
    match (edge.is_nan(), lower, edge > 0.0) {
        (false, true, false) => Ok(i64::MIN),
        (false, false, true) => Ok(i64::MAX),
        _ => Err(GenerationError::InvalidConstraint(format!(
            "field '{}': integer bound {edge} is out of range",
            accessor.field_name()
        ))),
    }
}

/// Exact `i64` for an integral float, `None` outside the `i64` range.
pub(crate) fn float_to_i64(value: f64) -> Option<i64> {
    const EDGE: f64 = 9_223_372_036_854_775_808.0;
    (value.is_finite() && (-EDGE..EDGE).contains(&value)).then_some(value as i64)
}

/// Default bound `DEFAULT_FLOAT_MAX` away from `value`, or proportionally
/// further for large values, capped at the largest finite float.
fn widen(value: f64, direction: f64) -> f64 {
    let span = DEFAULT_FLOAT_MAX.max(value.abs());
    (value + direction * span).clamp(f64::MIN, f64::MAX)
}

fn div_ceil(value: i64, step: i64) -> i64 {
    let quotient = value.div_euclid(step);
    if value.rem_euclid(step) == 0 {
        quotient
    } else {
        quotient + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_pattern_anchors() {
        assert_eq!(strip_anchors("^[a-z]+$"), "[a-z]+");
        assert_eq!(strip_anchors("price\\$"), "price\\$");
        assert_eq!(strip_anchors("[0-9]{3}"), "[0-9]{3}");
    }

    #[test]
    fn rounds_up_to_step_multiples() {
        assert_eq!(div_ceil(7, 5), 2);
        assert_eq!(div_ceil(10, 5), 2);
        assert_eq!(div_ceil(-7, 5), -1);
    }
}
