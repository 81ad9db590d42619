fn main() {
    // Validate embedded TOML files at compile time.
    validate_toml(
        "src/default_settings.toml",
        include_str!("src/default_settings.toml"),
    );
}

fn validate_toml(path: &str, content: &str) {
    let value = match content.parse::<toml::Table>() {
        Ok(value) => value,
        Err(_) => panic!("{path} contains invalid TOML"),
    };
    for section in ["sources", "store", "search"] {
        if !value.contains_key(section) {
            panic!("{path} is missing the [{section}] section");
        }
    }
}
