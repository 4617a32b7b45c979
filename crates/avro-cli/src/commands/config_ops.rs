use std::fs;

use avro_core::grammar::{decode, default_json};
use avro_core::settings;

pub fn grammar_export() {
    print!("{}", default_json());
}

pub fn grammar_validate(file: &str) {
    let content = die!(fs::read(file), "Error reading {file}: {}");
    let grammar = die!(decode(&content), "Error: {}");
    let with_rules = grammar
        .patterns()
        .iter()
        .filter(|p| p.rules.is_some())
        .count();
    println!(
        "OK: {} patterns ({} with rules), {} vowels, {} consonants",
        grammar.patterns().len(),
        with_rules,
        grammar.vowel_count(),
        grammar.consonant_count()
    );
}

pub fn settings_export() {
    print!("{}", settings::default_toml());
}

pub fn settings_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let s = die!(settings::parse_settings_toml(&content), "Error: {}");
    println!(
        "OK: rules.exact_out_of_range={:?}, engine.default_mode={}",
        s.rules.exact_out_of_range,
        s.default_mode()
    );
}

/// Install a custom settings file before any engine is built.
pub fn settings_install(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    die!(settings::init_custom(content), "Error: {}");
}
