//! Pattern tables mapping merchant descriptions to categories.
//!
//! Patterns are regular expressions compiled case-insensitively. Short
//! merchant tokens are wrapped in `\b` so `\besso\b` keeps "PETRO ESSO" and
//! "ESSO 2231" but rejects "ESPRESSO", and `\bcab\b` rejects "CABLESYSTEMS".
//! Tables are plain data: the defaults below can be replaced per category
//! from the configuration file.

use anyhow::Result;
use overview_core::{Category, CategoryKey, OverviewError, Transaction, TransportCategory};
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const GROCERIES: &[&str] = &[
    r"\biga\b", "save on foods", "nesters", "t&t", "kiki", r"\byig\b", "persia foods",
];

pub const TRANSPORT: &[&str] = &[
    "car2go", r"\bevo\b", r"\bavis\b", "rentals", "petrocan", "husky", r"\besso\b", "super save",
    r"\bcab\b", "compass", r"\btaxi\b", r"\bshell\b", "impark", "easypark", "parking", "bc ferries",
];

pub const RESTAURANT: &[&str] = &[
    "doordash", "skipthedishes", "restau", "a&w", "cuisine", "moxie's", "burger",
    "la belle patate", r"\bpho\b", "pizza", "bestie", "kitchen", "thai", "el camino's", "grill",
    "ice cream", "japanese", "kaori izakaya", "taco", "mexican", "zipang provisions", "mr. steak",
    r"\bpoke\b", "sushi", "earls", "mcdonald's", "diner", "subway sandwiches", "falafel", "donair",
    "fish", "pizz", "poutine", "white spot", "vij's", "the capital", "cactus club", "cantina",
    "fork", "denny's", "mumbai local", "freshii", "captain's boil", "korean",
];

pub const COFFEE: &[&str] = &[
    "cafe", "coffee", "tim hortons", "starbucks", "bean", "birds & the beets", "the mighty oak",
    "le marche st george", "caffe", "coco and olive", r"\bburo\b", "blenz", "green horn", "bakery",
    "a & w",
];

pub const BAR: &[&str] = &[
    "brew", "beer", r"\bpub\b", "steamworks", "distillery", r"\bbar\b", "narrow lounge",
    "rumpus room", "five point", "score on davie", "tap & barrel", "the cambie", "colony",
    "alibi room",
];

pub const BILLS: &[&str] = &["ymca", r"\bshaw\b", "fido", "soundcloud", "icbc", "bc hydro"];

pub const TR_CARSHARE: &[&str] = &["car2go", r"\bevo\b", r"\bmodo\b", "zipcar"];
pub const TR_RENTAL: &[&str] = &[r"\bavis\b", "rentals", "enterprise", "budget"];
pub const TR_CAB: &[&str] = &[r"\bcab\b", r"\btaxi\b", r"\buber\b", "lyft"];
pub const TR_TRANSLINK: &[&str] = &["compass", "translink"];
pub const TR_MISC: &[&str] = &["parking", "impark", "easypark", "ferries"];
pub const TR_CAR: &[&str] = &[
    "petrocan", "husky", r"\besso\b", "super save", r"\bshell\b", "mechanic", r"\btire",
];

/// True if any pattern is found in `place`.
pub fn matches(place: &str, patterns: &[Regex]) -> bool {
    patterns.iter().any(|re| re.is_match(place))
}

/// Compiled, ordered (category, patterns) pairs for one categorization level.
#[derive(Debug, Clone)]
pub struct RuleSet<K: CategoryKey> {
    rules: Vec<(K, Vec<Regex>)>,
}

impl<K: CategoryKey> RuleSet<K> {
    /// Compile a table. Rules are laid out in `K::RULE_ORDER` whatever the
    /// table's own order; categories missing from the table get no pattern.
    pub fn compile<S: AsRef<str>>(table: &BTreeMap<K, Vec<S>>) -> Result<Self> {
        let mut rules = Vec::with_capacity(K::RULE_ORDER.len());
        for key in K::RULE_ORDER {
            let patterns = match table.get(key) {
                Some(patterns) => patterns
                    .iter()
                    .map(|p| compile_pattern(*key, p.as_ref()))
                    .collect::<Result<Vec<_>>>()?,
                None => Vec::new(),
            };
            rules.push((*key, patterns));
        }
        Ok(Self { rules })
    }

    /// First category whose patterns match, else the catch-all.
    pub fn classify(&self, txn: &Transaction) -> K {
        self.rules
            .iter()
            .find(|(_, patterns)| matches(&txn.place, patterns))
            .map(|(key, _)| *key)
            .unwrap_or_else(K::catch_all)
    }

    /// Whether `txn` matches the patterns of `key` alone, ignoring priority.
    pub fn matches(&self, key: K, txn: &Transaction) -> bool {
        self.rules
            .iter()
            .find(|(k, _)| *k == key)
            .is_some_and(|(_, patterns)| matches(&txn.place, patterns))
    }

    pub fn pattern_count(&self) -> usize {
        self.rules.iter().map(|(_, p)| p.len()).sum()
    }
}

fn compile_pattern<K: CategoryKey>(key: K, pattern: &str) -> Result<Regex> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| {
            OverviewError::InvalidPattern {
                category: key.name().to_string(),
                pattern: pattern.to_string(),
                reason: e.to_string(),
            }
            .into()
        })
}

fn owned(patterns: &[&str]) -> Vec<String> {
    patterns.iter().map(|p| p.to_string()).collect()
}

/// Top-level pattern lists as they appear in the `[rules]` config section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CategoryPatterns {
    pub groceries: Vec<String>,
    pub transport: Vec<String>,
    pub restaurant: Vec<String>,
    pub coffee: Vec<String>,
    pub bar: Vec<String>,
    pub bills: Vec<String>,
}

impl Default for CategoryPatterns {
    fn default() -> Self {
        Self {
            groceries: owned(GROCERIES),
            transport: owned(TRANSPORT),
            restaurant: owned(RESTAURANT),
            coffee: owned(COFFEE),
            bar: owned(BAR),
            bills: owned(BILLS),
        }
    }
}

impl CategoryPatterns {
    pub fn compile(&self) -> Result<RuleSet<Category>> {
        let table = BTreeMap::from([
            (Category::Groceries, self.groceries.clone()),
            (Category::Transport, self.transport.clone()),
            (Category::Restaurant, self.restaurant.clone()),
            (Category::Coffee, self.coffee.clone()),
            (Category::Bar, self.bar.clone()),
            (Category::Bills, self.bills.clone()),
        ]);
        RuleSet::compile(&table)
    }
}

/// Transport sub-category pattern lists (`[transport_rules]` config section).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TransportPatterns {
    pub carshare: Vec<String>,
    pub rental: Vec<String>,
    pub cab: Vec<String>,
    pub translink: Vec<String>,
    pub misc: Vec<String>,
    pub car: Vec<String>,
}

impl Default for TransportPatterns {
    fn default() -> Self {
        Self {
            carshare: owned(TR_CARSHARE),
            rental: owned(TR_RENTAL),
            cab: owned(TR_CAB),
            translink: owned(TR_TRANSLINK),
            misc: owned(TR_MISC),
            car: owned(TR_CAR),
        }
    }
}

impl TransportPatterns {
    pub fn compile(&self) -> Result<RuleSet<TransportCategory>> {
        let table = BTreeMap::from([
            (TransportCategory::Carshare, self.carshare.clone()),
            (TransportCategory::Rental, self.rental.clone()),
            (TransportCategory::Cab, self.cab.clone()),
            (TransportCategory::Translink, self.translink.clone()),
            (TransportCategory::Misc, self.misc.clone()),
            (TransportCategory::Car, self.car.clone()),
        ]);
        RuleSet::compile(&table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn txn(place: &str) -> Transaction {
        Transaction::new(NaiveDate::from_ymd_opt(2021, 3, 1).unwrap(), place, 10.0)
    }

    fn rules() -> RuleSet<Category> {
        CategoryPatterns::default().compile().unwrap()
    }

    #[test]
    fn test_match_is_case_insensitive() {
        let r = rules();
        assert_eq!(r.classify(&txn("SAVE ON FOODS #2190 VANCOUVER BC")), Category::Groceries);
        assert_eq!(r.classify(&txn("Starbucks 0421")), Category::Coffee);
    }

    #[test]
    fn test_word_boundaries_are_regex_not_substring() {
        let r = rules();
        assert!(r.matches(Category::Transport, &txn("ESSO 2231 VANCOUVER")));
        assert!(r.matches(Category::Transport, &txn("ESSO")));
        assert!(!r.matches(Category::Transport, &txn("ESSOTERIC BOOKS")));
        assert!(!r.matches(Category::Transport, &txn("CAFE ESPRESSO #3 VANCOUVER")));

        assert!(r.matches(Category::Bar, &txn("THE PUB 340")));
        assert!(!r.matches(Category::Bar, &txn("PUBLIX")));
    }

    #[test]
    fn test_tokens_inside_longer_words_fall_through() {
        let r = rules();
        assert_eq!(r.classify(&txn("ESPRESSO BAR 12")), Category::Bar);
        assert_eq!(r.classify(&txn("CAFE ESPRESSO #3 VANCOUVER")), Category::Coffee);
        assert_eq!(r.classify(&txn("REVOLVER COFFEE")), Category::Coffee);
        assert_eq!(r.classify(&txn("SHAW CABLESYSTEMS")), Category::Bills);
        assert_eq!(r.classify(&txn("FIDO PHONE BILL")), Category::Bills);
        assert_eq!(r.classify(&txn("SHAWARMA PALACE")), Category::Misc);
    }

    #[test]
    fn test_tokens_at_end_of_place_still_match() {
        let r = rules();
        assert_eq!(r.classify(&txn("PETRO ESSO")), Category::Transport);
        assert_eq!(r.classify(&txn("THE DIVE BAR")), Category::Bar);
        assert_eq!(r.classify(&txn("KINGS HEAD PUB")), Category::Bar);
        assert_eq!(r.classify(&txn("YELLOW CAB")), Category::Transport);
    }

    #[test]
    fn test_first_match_wins() {
        let r = rules();
        // "iga" (groceries) and "sushi" (restaurant) both match; groceries is evaluated first
        let t = txn("IGA SUSHI COUNTER");
        assert!(r.matches(Category::Restaurant, &t));
        assert_eq!(r.classify(&t), Category::Groceries);

        // "a&w" is restaurant, ahead of coffee's "a & w"
        assert_eq!(r.classify(&txn("A&W #1422")), Category::Restaurant);
        assert_eq!(r.classify(&txn("A & W #1422")), Category::Coffee);
    }

    #[test]
    fn test_unmatched_falls_to_misc() {
        let r = rules();
        assert_eq!(r.classify(&txn("AMAZON.CA MARKETPLACE")), Category::Misc);
    }

    #[test]
    fn test_transport_sub_rules() {
        let r = TransportPatterns::default().compile().unwrap();
        assert_eq!(r.classify(&txn("EVO CAR SHARE")), TransportCategory::Carshare);
        assert_eq!(r.classify(&txn("COMPASS VENDING")), TransportCategory::Translink);
        assert_eq!(r.classify(&txn("YELLOW CAB")), TransportCategory::Cab);
        assert_eq!(r.classify(&txn("ESSO 2231")), TransportCategory::Car);
        assert_eq!(r.classify(&txn("IMPARK LOT 12")), TransportCategory::Misc);
        assert_eq!(r.classify(&txn("PETRO ESSO")), TransportCategory::Car);
        assert_eq!(r.classify(&txn("EVOLVE TAXI")), TransportCategory::Cab);
        assert_eq!(r.classify(&txn("SOMETHING ELSE")), TransportCategory::Misc);
    }

    #[test]
    fn test_missing_table_entry_has_no_patterns() {
        let table = BTreeMap::from([(Category::Coffee, vec!["bean"])]);
        let r = RuleSet::compile(&table).unwrap();
        assert_eq!(r.pattern_count(), 1);
        assert_eq!(r.classify(&txn("IGA")), Category::Misc);
        assert_eq!(r.classify(&txn("JJ BEAN")), Category::Coffee);
    }

    #[test]
    fn test_invalid_pattern_is_reported() {
        let patterns = CategoryPatterns {
            bar: vec!["bar[".to_string()],
            ..CategoryPatterns::default()
        };
        let err = patterns.compile().unwrap_err();
        match err.downcast_ref::<OverviewError>() {
            Some(OverviewError::InvalidPattern { category, pattern, .. }) => {
                assert_eq!(category, "bar");
                assert_eq!(pattern, "bar[");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
