pub mod adapter;
pub mod locales;

pub use locales::LocaleKey;
