//! Invalid-mode violation engine.
//!
//! Takes a producer's output and bends it so it breaks the constraint
//! dimensions requested by the accessor's mode. Flags that cannot be
//! honored for the descriptor at hand are collected, not dropped.

use rand::seq::SliceRandom;
use rand::{Rng, RngCore};
use regex::Regex;
use serde_json::Value;
use tracing::debug;

use stubsmith_core::{InvalidFlag, StubMode};

use crate::accessor::ConstraintAccessor;
use crate::errors::GenerationError;
use crate::generators::primitives::{float_to_i64, random_text};
use crate::generators::{GeneratedValue, GeneratorContext, GeneratorRegistry, Producer};

const PAD_CHARSET: &str = "abcdefghijklmnopqrstuvwxyz";
const ENUM_SUFFIX_LEN: usize = 6;
const ENUM_ATTEMPTS: usize = 16;
const STEP_TOLERANCE: f64 = 1e-9;

/// Result of applying the requested violations.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    pub value: GeneratedValue,
    /// Requested flags that could not be honored.
    pub unhonored: StubMode,
}

/// Produce a value with `producer` and apply every flag in the accessor's
/// mode to it.
pub fn violate(
    ctx: &GeneratorContext<'_>,
    producer: &dyn Producer,
    rng: &mut dyn RngCore,
) -> Result<Violation, GenerationError> {
    let accessor = ctx.accessor;
    let mut requested = accessor.mode();
    let mut unhonored = StubMode::empty();

    if requested.contains(StubMode::REQUIRED) {
        requested.remove(StubMode::REQUIRED);
        if accessor.required() {
            // An absent value cannot break any other constraint.
            requested.remove(StubMode::INVALID);
            return Ok(Violation {
                value: GeneratedValue::Null,
                unhonored: requested,
            });
        }
        unhonored |= StubMode::REQUIRED;
    }

    let mut value = producer.produce(ctx, rng)?;

    let generic = requested.contains(StubMode::INVALID);
    requested.remove(StubMode::INVALID);

    // With specific flags alongside, those decide whether the value is invalid.
    if generic && requested.is_empty() {
        let mut candidates = applicable_flags(accessor);
        candidates.shuffle(rng);

        let mut honored = false;
        for flag in candidates {
            if apply(flag, &mut value, accessor, ctx.registry, rng)?
                && violates(flag, &value, accessor)
            {
                debug!(
                    field = accessor.field_name(),
                    flag = %flag,
                    "generic invalid mode applied"
                );
                honored = true;
                break;
            }
        }
        if !honored {
            match wrong_type(accessor.type_name(), rng) {
                Some(wrong) => value = wrong,
                None => unhonored |= StubMode::INVALID,
            }
        }
    }

    for flag in requested.flags() {
        if !apply(flag, &mut value, accessor, ctx.registry, rng)? {
            unhonored |= flag.as_set();
        }
    }
    // A later flag can undo an earlier one; only the final value counts.
    for flag in requested.flags() {
        if !unhonored.has(flag) && !violates(flag, &value, accessor) {
            debug!(
                field = accessor.field_name(),
                flag = %flag,
                "violation undone by a later flag"
            );
            unhonored |= flag.as_set();
        }
    }
    if generic && !requested.is_empty() && unhonored.contains(requested) {
        unhonored |= StubMode::INVALID;
    }

    Ok(Violation { value, unhonored })
}

/// Specific flags whose constraint is defined on the accessor.
fn applicable_flags(accessor: &dyn ConstraintAccessor) -> Vec<InvalidFlag> {
    let mut flags = Vec::new();
    if accessor.required() {
        flags.push(InvalidFlag::Required);
    }
    if accessor.maximum().is_some() {
        flags.push(InvalidFlag::Maximum);
    }
    if accessor.minimum().is_some() {
        flags.push(InvalidFlag::Minimum);
    }
    if accessor.max_length().is_some() {
        flags.push(InvalidFlag::MaxLength);
    }
    if accessor.min_length().is_some_and(|min| min > 0) {
        flags.push(InvalidFlag::MinLength);
    }
    if accessor.pattern().is_some() {
        flags.push(InvalidFlag::Pattern);
    }
    if accessor.max_items().is_some() {
        flags.push(InvalidFlag::MaxItems);
    }
    if accessor.min_items().is_some_and(|min| min > 0) {
        flags.push(InvalidFlag::MinItems);
    }
    if accessor.unique_items() {
        flags.push(InvalidFlag::UniqueItems);
    }
    if accessor.multiple_of().is_some_and(|step| step != 0.0) {
        flags.push(InvalidFlag::MultipleOf);
    }
    if accessor.enum_values().is_some() {
        flags.push(InvalidFlag::Enum);
    }
    flags
}

/// Apply one specific flag. Returns whether the value now violates it.
fn apply(
    flag: InvalidFlag,
    value: &mut GeneratedValue,
    accessor: &dyn ConstraintAccessor,
    registry: &GeneratorRegistry,
    rng: &mut dyn RngCore,
) -> Result<bool, GenerationError> {
    // Element-level dimensions of a collection are violated on one element.
    if let GeneratedValue::List(values) = value
        && is_element_level(flag)
    {
        let Ok(items) = accessor.items() else {
            return Ok(false);
        };
        if values.is_empty() {
            values.push(registry.generate(items.as_ref(), rng)?);
        }
        return apply(flag, &mut values[0], items.as_ref(), registry, rng);
    }

    let honored = match flag {
        InvalidFlag::Invalid => false,
        InvalidFlag::Required => {
            if accessor.required() {
                *value = GeneratedValue::Null;
                true
            } else {
                false
            }
        }
        InvalidFlag::Maximum => match accessor.maximum() {
            Some(bound) => exceed_bound(value, bound.value, bound.exclusive, 1.0),
            None => false,
        },
        InvalidFlag::Minimum => match accessor.minimum() {
            Some(bound) => exceed_bound(value, bound.value, bound.exclusive, -1.0),
            None => false,
        },
        InvalidFlag::MaxLength => match (accessor.max_length(), value) {
            (Some(max), GeneratedValue::Text(text)) => {
                let target = usize::try_from(max.saturating_add(1)).unwrap_or(0);
                let len = text.chars().count();
                if len < target {
                    text.push_str(&random_text(PAD_CHARSET, target - len, rng));
                }
                text.chars().count() > usize::try_from(max).unwrap_or(0) || max < 0
            }
            _ => false,
        },
        InvalidFlag::MinLength => match (accessor.min_length(), value) {
            (Some(min), GeneratedValue::Text(text)) if min > 0 => {
                let keep = usize::try_from(min - 1).unwrap_or(0);
                if text.chars().count() > keep {
                    *text = text.chars().take(keep).collect();
                }
                true
            }
            _ => false,
        },
        InvalidFlag::Pattern => match (accessor.pattern(), value) {
            (Some(pattern), GeneratedValue::Text(text)) => {
                let regex = Regex::new(pattern).map_err(|err| {
                    GenerationError::InvalidConstraint(format!(
                        "invalid pattern for field '{}': {err}",
                        accessor.field_name()
                    ))
                })?;
                match non_matching(&regex, text, rng) {
                    Some(candidate) => {
                        *text = candidate;
                        true
                    }
                    None => false,
                }
            }
            _ => false,
        },
        InvalidFlag::MaxItems => match (accessor.max_items(), value) {
            (Some(max), GeneratedValue::List(values)) => {
                let target = usize::try_from(max.saturating_add(1)).unwrap_or(0);
                while values.len() < target {
                    match next_element(values, accessor, registry, rng)? {
                        Some(element) => values.push(element),
                        None => break,
                    }
                }
                values.len() >= target
            }
            _ => false,
        },
        InvalidFlag::MinItems => match (accessor.min_items(), value) {
            (Some(min), GeneratedValue::List(values)) if min > 0 => {
                let keep = usize::try_from(min - 1).unwrap_or(0);
                values.truncate(keep);
                true
            }
            _ => false,
        },
        InvalidFlag::UniqueItems => match value {
            GeneratedValue::List(values) if accessor.unique_items() => {
                if values.is_empty() {
                    match next_element(values, accessor, registry, rng)? {
                        Some(element) => values.push(element),
                        None => return Ok(false),
                    }
                }
                let duplicate = values[0].clone();
                values.push(duplicate);
                true
            }
            _ => false,
        },
        InvalidFlag::MultipleOf => match accessor.multiple_of() {
            Some(step) if step != 0.0 => miss_step(value, step.abs()),
            _ => false,
        },
        InvalidFlag::Enum => match accessor.enum_values() {
            Some(values) => match outside_enum(values, value, rng) {
                Some(outside) => {
                    *value = outside;
                    true
                }
                None => false,
            },
            None => false,
        },
    };
    Ok(honored)
}

/// Move a numeric value onto (exclusive) or just past (inclusive) a bound.
/// `direction` is `1.0` for maximums and `-1.0` for minimums. Fails when the
/// target is not representable.
fn exceed_bound(value: &mut GeneratedValue, bound: f64, exclusive: bool, direction: f64) -> bool {
    match value {
        GeneratedValue::Int(current) => {
            let target = if exclusive {
                if direction > 0.0 { bound.ceil() } else { bound.floor() }
            } else if direction > 0.0 {
                bound.floor() + 1.0
            } else {
                bound.ceil() - 1.0
            };
            match float_to_i64(target) {
                Some(target) => {
                    *current = target;
                    true
                }
                None => false,
            }
        }
        GeneratedValue::Float(current) => {
            let target = if exclusive {
                bound
            } else {
                let stepped = bound + direction;
                match (stepped != bound, direction > 0.0) {
                    (true, _) => stepped,
                    (false, true) => bound.next_up(),
                    (false, false) => bound.next_down(),
                }
            };
            if !target.is_finite() {
                return false;
            }
            *current = target;
            true
        }
        _ => false,
    }
}

/// Shift a numeric value half a step off the nearest multiple.
fn miss_step(value: &mut GeneratedValue, step: f64) -> bool {
    match value {
        GeneratedValue::Int(current) => {
            let base = ((*current as f64) / step).round() * step;
            if step.fract() == 0.0 && step >= 2.0 {
                *current = base as i64 + 1;
            } else {
                *value = GeneratedValue::Float(base + step / 2.0);
            }
            true
        }
        GeneratedValue::Float(current) => {
            let base = (*current / step).round() * step;
            *current = base + step / 2.0;
            true
        }
        _ => false,
    }
}

fn non_matching(regex: &Regex, current: &str, rng: &mut dyn RngCore) -> Option<String> {
    let noise = random_text("~!@%&*", 3, rng);
    let candidates = [
        format!("{current}{noise}"),
        format!("{noise}{current}"),
        String::new(),
        noise.clone(),
        " ".to_string(),
        "\u{0}".to_string(),
        format!("{current} "),
    ];
    candidates
        .into_iter()
        .find(|candidate| !regex.is_match(candidate))
}

/// A value that equals none of the permitted values.
fn outside_enum(
    permitted: &[Value],
    current: &GeneratedValue,
    rng: &mut dyn RngCore,
) -> Option<GeneratedValue> {
    let is_permitted = |candidate: &GeneratedValue| {
        permitted.iter().any(|allowed| candidate.matches_json(allowed))
    };

    if permitted.iter().all(Value::is_boolean) {
        return [GeneratedValue::Bool(true), GeneratedValue::Bool(false)]
            .into_iter()
            .find(|candidate| !is_permitted(candidate));
    }

    if permitted.iter().all(Value::is_number) {
        let max = permitted
            .iter()
            .filter_map(Value::as_f64)
            .fold(f64::MIN, f64::max);
        let candidate = if permitted.iter().all(|value| value.is_i64() || value.is_u64()) {
            GeneratedValue::Int((max as i64).saturating_add(1))
        } else {
            GeneratedValue::Float(max + 1.0)
        };
        return (!is_permitted(&candidate)).then_some(candidate);
    }

    let base = match current {
        GeneratedValue::Text(text) if !text.is_empty() => text.clone(),
        _ => permitted
            .iter()
            .find_map(Value::as_str)
            .unwrap_or("value")
            .to_string(),
    };
    for _ in 0..ENUM_ATTEMPTS {
        let suffix = random_text(PAD_CHARSET, ENUM_SUFFIX_LEN, rng);
        let candidate = GeneratedValue::Text(format!("{base}-{suffix}"));
        if !is_permitted(&candidate) {
            return Some(candidate);
        }
    }
    None
}

/// Element to grow a collection with: a fresh one from the element
/// descriptor, else a copy of the last element.
fn next_element(
    values: &[GeneratedValue],
    accessor: &dyn ConstraintAccessor,
    registry: &GeneratorRegistry,
    rng: &mut dyn RngCore,
) -> Result<Option<GeneratedValue>, GenerationError> {
    if let Ok(items) = accessor.items() {
        return registry.generate(items.as_ref(), rng).map(Some);
    }
    Ok(values.last().cloned())
}

/// Flags checked on one element when the value is a collection.
fn is_element_level(flag: InvalidFlag) -> bool {
    !StubMode::COLLECTION.contains(flag.as_set())
}

/// Whether `value` breaks the constraint named by `flag`.
fn violates(flag: InvalidFlag, value: &GeneratedValue, accessor: &dyn ConstraintAccessor) -> bool {
    if let GeneratedValue::List(values) = value
        && is_element_level(flag)
    {
        let Ok(items) = accessor.items() else {
            return false;
        };
        return values
            .iter()
            .any(|element| violates(flag, element, items.as_ref()));
    }

    match flag {
        InvalidFlag::Invalid => false,
        InvalidFlag::Required => accessor.required() && value.is_null(),
        InvalidFlag::Maximum => match (accessor.maximum(), value.as_f64()) {
            (Some(bound), Some(current)) if bound.exclusive => current >= bound.value,
            (Some(bound), Some(current)) => current > bound.value,
            _ => false,
        },
        InvalidFlag::Minimum => match (accessor.minimum(), value.as_f64()) {
            (Some(bound), Some(current)) if bound.exclusive => current <= bound.value,
            (Some(bound), Some(current)) => current < bound.value,
            _ => false,
        },
        InvalidFlag::MaxLength => match (accessor.max_length(), value.as_str()) {
            (Some(max), Some(text)) => longer_than(text.chars().count(), max),
            _ => false,
        },
        InvalidFlag::MinLength => match (accessor.min_length(), value.as_str()) {
            (Some(min), Some(text)) => shorter_than(text.chars().count(), min),
            _ => false,
        },
        InvalidFlag::Pattern => match (accessor.pattern(), value.as_str()) {
            (Some(pattern), Some(text)) => {
                Regex::new(pattern).is_ok_and(|regex| !regex.is_match(text))
            }
            _ => false,
        },
        InvalidFlag::MaxItems => match (accessor.max_items(), value.as_list()) {
            (Some(max), Some(values)) => longer_than(values.len(), max),
            _ => false,
        },
        InvalidFlag::MinItems => match (accessor.min_items(), value.as_list()) {
            (Some(min), Some(values)) => shorter_than(values.len(), min),
            _ => false,
        },
        InvalidFlag::UniqueItems => match value.as_list() {
            Some(values) if accessor.unique_items() => values
                .iter()
                .enumerate()
                .any(|(idx, element)| values[idx + 1..].contains(element)),
            _ => false,
        },
        InvalidFlag::MultipleOf => match (accessor.multiple_of(), value) {
            (Some(step), GeneratedValue::Int(current)) if step.fract() == 0.0 && step != 0.0 => {
                match float_to_i64(step.abs()) {
                    Some(step) => current % step != 0,
                    None => *current != 0,
                }
            }
            (Some(step), current) if step != 0.0 => current.as_f64().is_some_and(|current| {
                let quotient = current / step;
                (quotient - quotient.round()).abs() > STEP_TOLERANCE
            }),
            _ => false,
        },
        InvalidFlag::Enum => match accessor.enum_values() {
            Some(permitted) => !permitted.iter().any(|allowed| value.matches_json(allowed)),
            None => false,
        },
    }
}

fn longer_than(len: usize, limit: i64) -> bool {
    i64::try_from(len).map_or(true, |len| len > limit)
}

fn shorter_than(len: usize, limit: i64) -> bool {
    i64::try_from(len).is_ok_and(|len| len < limit)
}

/// A value of a JSON type other than the declared one.
fn wrong_type(type_name: &str, rng: &mut dyn RngCore) -> Option<GeneratedValue> {
    let value = match type_name {
        "string" => GeneratedValue::Int(rng.random_range(0..1000)),
        "integer" | "number" => GeneratedValue::Text(random_text(PAD_CHARSET, 8, rng)),
        "boolean" => GeneratedValue::Text("not-a-boolean".to_string()),
        "array" | "object" => GeneratedValue::Text(random_text(PAD_CHARSET, 8, rng)),
        _ => return None,
    };
    Some(value)
}
