//! Identifiers with a fixed textual shape, generated from regular patterns.

use rand::{Rng, RngCore};
use rand_regex::Regex as RandRegex;

use crate::errors::GenerationError;
use crate::generators::{GeneratedValue, GeneratorContext, GeneratorRegistry, Producer};

const MAX_REPEAT: u32 = 8;

const ISBN10: &str = "[0-9]{9}[0-9X]";
const ISBN13: &str = "97[89][0-9]{10}";
const SSN: &str = "[0-9]{3}-[0-9]{2}-[0-9]{4}";
const HEX_COLOR: &str = "#(?:[0-9a-f]{3}|[0-9a-f]{6})";
const RGB_COLOR: &str = concat!(
    "rgb\\(",
    "(?:25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9]?[0-9]),",
    "(?:25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9]?[0-9]),",
    "(?:25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9]?[0-9])",
    "\\)"
);
const MAC_ADDRESS: &str = "[0-9a-f]{2}(?::[0-9a-f]{2}){5}";

pub fn register(registry: &mut GeneratorRegistry) {
    for (id, patterns) in [
        ("isbn", &[ISBN10, ISBN13][..]),
        ("isbn10", &[ISBN10][..]),
        ("isbn13", &[ISBN13][..]),
        ("ssn", &[SSN][..]),
        ("hexcolor", &[HEX_COLOR][..]),
        ("rgbcolor", &[RGB_COLOR][..]),
        ("mac-address", &[MAC_ADDRESS][..]),
    ] {
        registry.register_generator(Box::new(PatternGenerator { id, patterns }));
    }
}

/// Picks one of its patterns at random and samples it.
struct PatternGenerator {
    id: &'static str,
    patterns: &'static [&'static str],
}

impl Producer for PatternGenerator {
    fn id(&self) -> &'static str {
        self.id
    }

    fn produce(
        &self,
        _ctx: &GeneratorContext<'_>,
        rng: &mut dyn RngCore,
    ) -> Result<GeneratedValue, GenerationError> {
        let pattern = self.patterns[rng.random_range(0..self.patterns.len())];
        let regex = RandRegex::compile(pattern, MAX_REPEAT).map_err(|err| {
            GenerationError::InvalidConstraint(format!("invalid pattern for {}: {err}", self.id))
        })?;
        let value: String = rng.sample(&regex);
        Ok(GeneratedValue::Text(value))
    }
}
