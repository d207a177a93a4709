use std::sync::Arc;

use stubsmith_generate::{AliasTable, GeneratorRegistry};

fn main() {
    let locale = std::env::args().nth(1).unwrap_or_default();
    let registry = GeneratorRegistry::new(&locale, Arc::new(AliasTable::default()))
        .expect("supported locale");
    for id in registry.generator_ids() {
        let aliases = registry.aliases().aliases_for(id);
        if aliases.is_empty() {
            println!("{id}");
        } else {
            println!("{id} ({})", aliases.join(", "));
        }
    }
}
