use std::collections::HashMap;

pub const STARTER_WORDS: &str = include_str!("../content/words/starter.txt");

pub fn builtin_rosters() -> HashMap<&'static str, &'static str> {
    HashMap::from([("classic", include_str!("../content/enemies/classic.json"))])
}

pub fn builtin_rules() -> HashMap<&'static str, &'static str> {
    HashMap::from([("default", include_str!("../content/rules/default.yaml"))])
}
