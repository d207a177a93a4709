//! Composite values built from `fake` primitives for one locale.

use fake::Fake;
use fake::faker::company::raw as company;
use fake::faker::internet::raw as internet;
use fake::faker::lorem::raw as lorem;
use fake::faker::name::raw as name;
use fake::locales::Data;
use rand::{Rng, RngCore};

use crate::generators::primitives::random_text;

const HOSTNAME_FALLBACK_CHARSET: &str = "abcdefghijklmnopqrstuvwxyz";
const SENTENCE_WORDS: (usize, usize) = (4, 12);
const PARAGRAPH_SENTENCES: (usize, usize) = (3, 6);

/// Extra vocabulary mixed into lorem text when supplemental words are on.
const SUPPLEMENTAL_WORDS: &[&str] = &[
    "abbas", "abduco", "abeo", "abscido", "absconditus", "absens", "absorbeo", "absque",
    "abstergo", "absum", "abundans", "abutor", "accedo", "accendo", "acceptus", "accipio",
    "accommodo", "accusator", "acer", "acerbitas", "acervus", "acidus", "acies", "acquiro",
    "adamo", "adaugeo", "addo", "adduco", "ademptio", "adeo", "adeptio", "adfectus",
    "adfero", "adficio", "adflicto", "adhaero", "adhuc", "adicio", "adimpleo", "adinventitias",
    "adipiscor", "adiuvo", "administratio", "admiratio", "admitto", "admoneo", "admoveo",
    "adnuo", "adopto", "adsidue", "adstringo", "adsuesco", "adsum", "adulatio", "adulescens",
    "aduro", "advenio", "adversus", "advoco", "aedificium", "aeger", "aegre", "aegrotatio",
    "aegrus", "aeneus", "aequitas", "aequus", "aer", "aestas", "aestivus", "aestus", "aetas",
    "aeternus", "ager", "aggero", "aggredior", "agnitio", "agnosco", "ago", "ait", "aiunt",
    "alienus", "alii", "alioqui", "aliqua", "alius", "allatus", "alo", "alter", "altus",
    "alveus", "amaritudo", "ambitus", "ambulo", "amicitia", "amiculum", "amissio", "amita",
    "amitto", "amo", "amor", "amoveo", "amplexus", "amplitudo", "amplus", "ancilla",
    "angelus", "angulus", "angustus", "animadverto", "animi", "animus", "annus", "anser",
    "ante", "antea", "antepono", "antiquus", "aperio", "aperte", "apostolus", "apparatus",
    "appello", "appono", "appositus", "approbo", "apto", "aptus", "apud", "aqua", "ara",
    "aranea", "arbitro", "arbor", "arbustum", "arca", "arceo", "arcesso", "arcus", "argentum",
    "argumentum", "arguo", "arma", "armarium", "armo", "aro", "ars", "articulus", "artificiose",
    "arto", "arx", "ascisco", "ascit", "asper", "aspicio", "asporto", "assentator", "astrum",
    "atavus", "ater", "atqui", "atrocitas", "atrox", "attero", "attollo", "attonbitus",
];

/// `count` lorem words, some replaced by supplemental vocabulary.
pub fn words<L>(locale: L, count: usize, supplemental: bool, rng: &mut dyn RngCore) -> Vec<String>
where
    L: Data + Copy,
{
    let mut words: Vec<String> = lorem::Words(locale, count..count + 1).fake_with_rng(rng);
    words.truncate(count);
    while words.len() < count {
        let word: String = lorem::Word(locale).fake_with_rng(rng);
        words.push(word);
    }
    if supplemental {
        for word in words.iter_mut() {
            if rng.random_bool(0.5) {
                let idx = rng.random_range(0..SUPPLEMENTAL_WORDS.len());
                *word = SUPPLEMENTAL_WORDS[idx].to_string();
            }
        }
    }
    words
}

/// A capitalized sentence of `count` words ending with a period.
pub fn sentence<L>(locale: L, count: usize, supplemental: bool, rng: &mut dyn RngCore) -> String
where
    L: Data + Copy,
{
    let words = words(locale, count, supplemental, rng);
    if words.is_empty() {
        return String::new();
    }
    format!("{}.", capitalize(&words.join(" ")))
}

pub fn sentences<L>(locale: L, count: usize, supplemental: bool, rng: &mut dyn RngCore) -> String
where
    L: Data + Copy,
{
    let sentences: Vec<String> = (0..count)
        .map(|_| {
            let words = rng.random_range(SENTENCE_WORDS.0..=SENTENCE_WORDS.1);
            sentence(locale, words, supplemental, rng)
        })
        .collect();
    sentences.join(" ")
}

/// A paragraph of `count` sentences.
pub fn paragraph<L>(locale: L, count: usize, supplemental: bool, rng: &mut dyn RngCore) -> String
where
    L: Data + Copy,
{
    sentences(locale, count, supplemental, rng)
}

pub fn paragraphs<L>(locale: L, count: usize, supplemental: bool, rng: &mut dyn RngCore) -> String
where
    L: Data + Copy,
{
    let paragraphs: Vec<String> = (0..count)
        .map(|_| {
            let sentences = rng.random_range(PARAGRAPH_SENTENCES.0..=PARAGRAPH_SENTENCES.1);
            paragraph(locale, sentences, supplemental, rng)
        })
        .collect();
    paragraphs.join("\n")
}

pub fn noun<L>(locale: L, rng: &mut dyn RngCore) -> String
where
    L: Data + Copy,
{
    let noun: String = company::BuzzwordTail(locale).fake_with_rng(rng);
    noun.to_lowercase()
}

pub fn adjective<L>(locale: L, rng: &mut dyn RngCore) -> String
where
    L: Data + Copy,
{
    let adjective: String = company::Buzzword(locale).fake_with_rng(rng);
    adjective.to_lowercase()
}

pub fn silly_name<L>(locale: L, rng: &mut dyn RngCore) -> String
where
    L: Data + Copy,
{
    let adjective = adjective(locale, rng);
    let noun = noun(locale, rng);
    format!("{} {}", capitalize(&adjective), capitalize(&noun))
}

/// Lowercase ASCII host label derived from a locale word.
pub fn hostname<L>(locale: L, rng: &mut dyn RngCore) -> String
where
    L: Data + Copy,
{
    let word: String = lorem::Word(locale).fake_with_rng(rng);
    let label: String = word
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect::<String>()
        .to_ascii_lowercase();
    if label.is_empty() {
        return random_text(HOSTNAME_FALLBACK_CHARSET, 8, rng);
    }
    label
}

pub fn domain<L>(locale: L, rng: &mut dyn RngCore) -> String
where
    L: Data + Copy,
{
    let host = hostname(locale, rng);
    let suffix: String = internet::DomainSuffix(locale).fake_with_rng(rng);
    format!("{host}.{suffix}")
}

/// Address-style email on a generated domain.
pub fn email<L>(locale: L, rng: &mut dyn RngCore) -> String
where
    L: Data + Copy,
{
    let first: String = name::FirstName(locale).fake_with_rng(rng);
    let last: String = name::LastName(locale).fake_with_rng(rng);
    let mut user: String = format!("{first}.{last}")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '.')
        .collect::<String>()
        .to_ascii_lowercase();
    if user.trim_matches('.').is_empty() {
        user = internet::Username(locale).fake_with_rng(rng);
    }
    format!("{}@{}", user.trim_matches('.'), domain(locale, rng))
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
