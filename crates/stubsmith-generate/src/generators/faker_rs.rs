use fake::Fake;
use fake::faker::address::raw as address;
use fake::faker::company::raw as company;
use fake::faker::creditcard::raw as creditcard;
use fake::faker::impls::address::CityNameGenFn;
use fake::faker::internet::raw as internet;
use fake::faker::job::raw as job;
use fake::faker::lorem::raw as lorem;
use fake::faker::name::raw as name;
use fake::faker::phone_number::raw as phone_number;
use fake::locales::{Data, EN, FR_FR, PT_BR, ZH_CN, ZH_TW};
use rand::{Rng, RngCore};

use crate::errors::GenerationError;
use crate::faker_rs::LocaleKey;
use crate::faker_rs::adapter;
use crate::generators::{GeneratedValue, GeneratorContext, GeneratorRegistry, Producer};
use crate::params::{ArgList, DEFAULT_COUNT};

const COORDINATE_SCALE: f64 = 1_000_000.0;

type TextFn = Box<dyn Fn(&mut dyn RngCore) -> String + Send + Sync>;
type CountedFn = Box<dyn Fn(usize, bool, &mut dyn RngCore) -> String + Send + Sync>;

pub fn register(registry: &mut GeneratorRegistry, locale: LocaleKey) {
    match locale {
        LocaleKey::EnUs => register_locale(registry, EN),
        LocaleKey::FrFr => register_locale(registry, FR_FR),
        LocaleKey::PtBr => register_locale(registry, PT_BR),
        LocaleKey::ZhCn => register_locale(registry, ZH_CN),
        LocaleKey::ZhTw => register_locale(registry, ZH_TW),
    }
    registry.register_generator(Box::new(CoordinateGenerator {
        id: "latitude",
        limit: 90.0,
    }));
    registry.register_generator(Box::new(CoordinateGenerator {
        id: "longitude",
        limit: 180.0,
    }));
}

fn register_locale<L>(registry: &mut GeneratorRegistry, locale: L)
where
    L: Data + CityNameGenFn + Copy + Send + Sync + 'static,
{
    let texts: Vec<(&'static str, TextFn)> = vec![
        ("word", text(move |rng| lorem::Word(locale).fake_with_rng(rng))),
        ("noun", text(move |rng| adapter::noun(locale, rng))),
        ("adjective", text(move |rng| adapter::adjective(locale, rng))),
        ("city", text(move |rng| address::CityName(locale).fake_with_rng(rng))),
        ("city-prefix", text(move |rng| address::CityPrefix(locale).fake_with_rng(rng))),
        ("city-suffix", text(move |rng| address::CitySuffix(locale).fake_with_rng(rng))),
        ("street-name", text(move |rng| address::StreetName(locale).fake_with_rng(rng))),
        ("street-suffix", text(move |rng| address::StreetSuffix(locale).fake_with_rng(rng))),
        (
            "street-address",
            text(move |rng| {
                let number: String = address::BuildingNumber(locale).fake_with_rng(rng);
                let street: String = address::StreetName(locale).fake_with_rng(rng);
                format!("{number} {street}")
            }),
        ),
        (
            "secondary-address",
            text(move |rng| address::SecondaryAddress(locale).fake_with_rng(rng)),
        ),
        ("postcode", text(move |rng| address::PostCode(locale).fake_with_rng(rng))),
        ("state", text(move |rng| address::StateAbbr(locale).fake_with_rng(rng))),
        ("state-name", text(move |rng| address::StateName(locale).fake_with_rng(rng))),
        ("country", text(move |rng| address::CountryName(locale).fake_with_rng(rng))),
        ("company", text(move |rng| company::CompanyName(locale).fake_with_rng(rng))),
        (
            "company-suffix",
            text(move |rng| company::CompanySuffix(locale).fake_with_rng(rng)),
        ),
        (
            "company-slogan",
            text(move |rng| company::CatchPhrase(locale).fake_with_rng(rng)),
        ),
        ("company-bs", text(move |rng| company::Bs(locale).fake_with_rng(rng))),
        ("job-title", text(move |rng| job::Title(locale).fake_with_rng(rng))),
        ("landline", text(move |rng| phone_number::PhoneNumber(locale).fake_with_rng(rng))),
        ("mobile", text(move |rng| phone_number::CellNumber(locale).fake_with_rng(rng))),
        ("email", text(move |rng| adapter::email(locale, rng))),
        ("free-email", text(move |rng| internet::FreeEmail(locale).fake_with_rng(rng))),
        ("safe-email", text(move |rng| internet::SafeEmail(locale).fake_with_rng(rng))),
        ("name", text(move |rng| name::Name(locale).fake_with_rng(rng))),
        ("silly-name", text(move |rng| adapter::silly_name(locale, rng))),
        ("first-name", text(move |rng| name::FirstName(locale).fake_with_rng(rng))),
        ("last-name", text(move |rng| name::LastName(locale).fake_with_rng(rng))),
        ("name-prefix", text(move |rng| name::Title(locale).fake_with_rng(rng))),
        ("name-suffix", text(move |rng| name::Suffix(locale).fake_with_rng(rng))),
        ("user-name", text(move |rng| internet::Username(locale).fake_with_rng(rng))),
        ("hostname", text(move |rng| adapter::hostname(locale, rng))),
        ("domain", text(move |rng| adapter::domain(locale, rng))),
        (
            "domain-suffix",
            text(move |rng| internet::DomainSuffix(locale).fake_with_rng(rng)),
        ),
        ("ipv4", text(move |rng| internet::IPv4(locale).fake_with_rng(rng))),
        ("ipv6", text(move |rng| internet::IPv6(locale).fake_with_rng(rng))),
        (
            "ip",
            text(move |rng| {
                if rng.random_bool(0.5) {
                    internet::IPv4(locale).fake_with_rng(rng)
                } else {
                    internet::IPv6(locale).fake_with_rng(rng)
                }
            }),
        ),
        (
            "credit-card",
            text(move |rng| creditcard::CreditCardNumber(locale).fake_with_rng(rng)),
        ),
    ];
    for (id, text) in texts {
        registry.register_generator(Box::new(TextGenerator { id, text }));
    }

    let counted_texts: Vec<(&'static str, CountedFn)> = vec![
        (
            "words",
            counted(move |count, supplemental, rng| {
                adapter::words(locale, count, supplemental, rng).join(" ")
            }),
        ),
        (
            "sentence",
            counted(move |count, supplemental, rng| {
                adapter::sentence(locale, count, supplemental, rng)
            }),
        ),
        (
            "sentences",
            counted(move |count, supplemental, rng| {
                adapter::sentences(locale, count, supplemental, rng)
            }),
        ),
        (
            "paragraph",
            counted(move |count, supplemental, rng| {
                adapter::paragraph(locale, count, supplemental, rng)
            }),
        ),
        (
            "paragraphs",
            counted(move |count, supplemental, rng| {
                adapter::paragraphs(locale, count, supplemental, rng)
            }),
        ),
    ];
    for (id, text) in counted_texts {
        registry.register_generator(Box::new(CountedTextGenerator { id, text }));
    }
}

fn text<F>(f: F) -> TextFn
where
    F: Fn(&mut dyn RngCore) -> String + Send + Sync + 'static,
{
    Box::new(f)
}

fn counted<F>(f: F) -> CountedFn
where
    F: Fn(usize, bool, &mut dyn RngCore) -> String + Send + Sync + 'static,
{
    Box::new(f)
}

/// Locale text without arguments.
struct TextGenerator {
    id: &'static str,
    text: TextFn,
}

impl Producer for TextGenerator {
    fn id(&self) -> &'static str {
        self.id
    }

    fn produce(
        &self,
        _ctx: &GeneratorContext<'_>,
        rng: &mut dyn RngCore,
    ) -> Result<GeneratedValue, GenerationError> {
        Ok(GeneratedValue::Text((self.text)(rng)))
    }
}

/// Locale text taking `[count, supplemental]`.
struct CountedTextGenerator {
    id: &'static str,
    text: CountedFn,
}

impl Producer for CountedTextGenerator {
    fn id(&self) -> &'static str {
        self.id
    }

    fn produce(
        &self,
        ctx: &GeneratorContext<'_>,
        rng: &mut dyn RngCore,
    ) -> Result<GeneratedValue, GenerationError> {
        let args = ArgList::new(self.id, ctx.accessor.args());
        let count = args.count(0, DEFAULT_COUNT)?;
        let supplemental = args.flag(1)?;
        Ok(GeneratedValue::Text((self.text)(count, supplemental, rng)))
    }
}

/// Decimal degrees within `[-limit, limit]`.
struct CoordinateGenerator {
    id: &'static str,
    limit: f64,
}

impl Producer for CoordinateGenerator {
    fn id(&self) -> &'static str {
        self.id
    }

    fn produce(
        &self,
        _ctx: &GeneratorContext<'_>,
        rng: &mut dyn RngCore,
    ) -> Result<GeneratedValue, GenerationError> {
        let value: f64 = rng.random_range(-self.limit..=self.limit);
        Ok(GeneratedValue::Float(
            (value * COORDINATE_SCALE).round() / COORDINATE_SCALE,
        ))
    }
}
