//! Country-name qualifiers to ISO 3166-1 alpha-2 codes.
//!
//! Lookup keys are lowercase; local-language variants sit next to the English
//! names. Anything not in the table is uppercased and used as a code guess.

use std::collections::HashMap;

use crate::place::record::normalize_text;

const DEFAULT_COUNTRY_NAMES: &[(&str, &str)] = &[
    ("slovenia", "SI"),
    ("slovenija", "SI"),
    ("austria", "AT"),
    ("österreich", "AT"),
    ("osterreich", "AT"),
    ("avstrija", "AT"),
    ("croatia", "HR"),
    ("hrvatska", "HR"),
    ("hrvaška", "HR"),
    ("italy", "IT"),
    ("italia", "IT"),
    ("italija", "IT"),
    ("germany", "DE"),
    ("deutschland", "DE"),
    ("nemčija", "DE"),
    ("hungary", "HU"),
    ("magyarország", "HU"),
    ("madžarska", "HU"),
    ("serbia", "RS"),
    ("srbija", "RS"),
    ("bosnia and herzegovina", "BA"),
    ("bosnia", "BA"),
    ("montenegro", "ME"),
    ("north macedonia", "MK"),
    ("macedonia", "MK"),
    ("switzerland", "CH"),
    ("schweiz", "CH"),
    ("suisse", "CH"),
    ("france", "FR"),
    ("francija", "FR"),
    ("spain", "ES"),
    ("españa", "ES"),
    ("portugal", "PT"),
    ("netherlands", "NL"),
    ("the netherlands", "NL"),
    ("holland", "NL"),
    ("belgium", "BE"),
    ("czech republic", "CZ"),
    ("czechia", "CZ"),
    ("slovakia", "SK"),
    ("poland", "PL"),
    ("greece", "GR"),
    ("turkey", "TR"),
    ("türkiye", "TR"),
    ("russia", "RU"),
    ("ukraine", "UA"),
    ("united kingdom", "GB"),
    ("uk", "GB"),
    ("great britain", "GB"),
    ("britain", "GB"),
    ("england", "GB"),
    ("scotland", "GB"),
    ("wales", "GB"),
    ("ireland", "IE"),
    ("united states", "US"),
    ("united states of america", "US"),
    ("usa", "US"),
    ("america", "US"),
    ("canada", "CA"),
    ("mexico", "MX"),
    ("brazil", "BR"),
    ("argentina", "AR"),
    ("india", "IN"),
    ("bharat", "IN"),
    ("nepal", "NP"),
    ("sri lanka", "LK"),
    ("china", "CN"),
    ("japan", "JP"),
    ("australia", "AU"),
    ("new zealand", "NZ"),
    ("south africa", "ZA"),
    ("egypt", "EG"),
];

/// Extensible country-name lookup.
#[derive(Debug, Clone, Default)]
pub struct CountryTable {
    names: HashMap<String, String>,
}

lazy_static::lazy_static! {
    static ref DEFAULT_TABLE: CountryTable = CountryTable::with_defaults();
}

impl CountryTable {
    /// An empty table; every qualifier falls through to the uppercase guess.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults() -> Self {
        let mut table = Self::new();
        for (name, code) in DEFAULT_COUNTRY_NAMES {
            table.insert(name, code);
        }
        table
    }

    /// Shared read-only copy of the default table.
    pub fn shared() -> &'static CountryTable {
        &DEFAULT_TABLE
    }

    /// Add or replace a name variant.
    pub fn insert(&mut self, name: &str, code: &str) {
        self.names.insert(normalize_text(name), code.trim().to_uppercase());
    }

    pub fn code_for(&self, name: &str) -> Option<&str> {
        self.names.get(&normalize_text(name)).map(String::as_str)
    }

    /// ISO code for a qualifier, or the qualifier uppercased if unknown.
    pub fn normalize(&self, qualifier: &str) -> String {
        match self.code_for(qualifier) {
            Some(code) => code.to_string(),
            None => normalize_text(qualifier).to_uppercase(),
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_names_map_to_codes() {
        let table = CountryTable::with_defaults();
        assert_eq!(table.normalize("Slovenia"), "SI");
        assert_eq!(table.normalize("  AUSTRIA "), "AT");
        assert_eq!(table.normalize("United   States"), "US");
        assert_eq!(table.normalize("Österreich"), "AT");
    }

    #[test]
    fn test_unknown_names_pass_through_uppercased() {
        let table = CountryTable::with_defaults();
        assert_eq!(table.normalize("fr"), "FR");
        assert_eq!(table.normalize("Atlantis"), "ATLANTIS");
    }

    #[test]
    fn test_table_is_extensible() {
        let mut table = CountryTable::new();
        assert_eq!(table.normalize("Slovenia"), "SLOVENIA");
        table.insert("Slovenia", "si");
        assert_eq!(table.code_for("slovenia"), Some("SI"));
    }
}
