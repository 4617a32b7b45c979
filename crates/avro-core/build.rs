fn main() {
    // Validate embedded data files at compile time.
    validate_toml(
        "src/default_settings.toml",
        include_str!("src/default_settings.toml"),
    );
    validate_json(
        "src/grammar/default_grammar.json",
        include_str!("src/grammar/default_grammar.json"),
    );
}

fn validate_toml(path: &str, content: &str) {
    if content.parse::<toml::Value>().is_err() {
        panic!("{path} contains invalid TOML");
    }
}

fn validate_json(path: &str, content: &str) {
    if serde_json::from_str::<serde_json::Value>(content).is_err() {
        panic!("{path} contains invalid JSON");
    }
}
