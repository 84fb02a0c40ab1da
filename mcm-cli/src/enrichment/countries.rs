//! Country name → ISO-3166 alpha-2 lookup
//!
//! Names are matched case-insensitively after trimming. Anything not in the
//! table resolves to [`UNKNOWN_COUNTRY`].

use mcm_common::db::UNKNOWN_COUNTRY;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Country names as the metadata service spells them
const COUNTRY_CODES: &[(&str, &str)] = &[
    ("Argentina", "AR"),
    ("Australia", "AU"),
    ("Austria", "AT"),
    ("Belgium", "BE"),
    ("Brazil", "BR"),
    ("Canada", "CA"),
    ("Chile", "CL"),
    ("China", "CN"),
    ("Colombia", "CO"),
    ("Czech Republic", "CZ"),
    ("Czechia", "CZ"),
    ("Denmark", "DK"),
    ("Egypt", "EG"),
    ("Finland", "FI"),
    ("France", "FR"),
    ("Germany", "DE"),
    ("West Germany", "DE"),
    ("Greece", "GR"),
    ("Hong Kong", "HK"),
    ("Hungary", "HU"),
    ("Iceland", "IS"),
    ("India", "IN"),
    ("Indonesia", "ID"),
    ("Iran", "IR"),
    ("Ireland", "IE"),
    ("Israel", "IL"),
    ("Italy", "IT"),
    ("Japan", "JP"),
    ("Mexico", "MX"),
    ("Netherlands", "NL"),
    ("New Zealand", "NZ"),
    ("Nigeria", "NG"),
    ("Norway", "NO"),
    ("Poland", "PL"),
    ("Portugal", "PT"),
    ("Romania", "RO"),
    ("Russia", "RU"),
    ("South Africa", "ZA"),
    ("South Korea", "KR"),
    ("Korea", "KR"),
    ("Spain", "ES"),
    ("Sweden", "SE"),
    ("Switzerland", "CH"),
    ("Taiwan", "TW"),
    ("Thailand", "TH"),
    ("Turkey", "TR"),
    ("Ukraine", "UA"),
    ("United Kingdom", "GB"),
    ("UK", "GB"),
    ("United States", "US"),
    ("USA", "US"),
];

static CODES_BY_NAME: Lazy<HashMap<String, &'static str>> = Lazy::new(|| {
    COUNTRY_CODES
        .iter()
        .map(|(name, code)| (name.to_lowercase(), *code))
        .collect()
});

/// Map the first entry of a comma-separated country list to its code.
pub fn country_code(countries: Option<&str>) -> String {
    countries
        .and_then(|list| list.split(',').next())
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .and_then(|name| CODES_BY_NAME.get(&name.to_lowercase()).copied())
        .unwrap_or(UNKNOWN_COUNTRY)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_country_wins() {
        assert_eq!(country_code(Some("United States, United Kingdom")), "US");
        assert_eq!(country_code(Some("United Kingdom, United States")), "GB");
    }

    #[test]
    fn test_case_and_whitespace_ignored() {
        assert_eq!(country_code(Some("  japan ")), "JP");
    }

    #[test]
    fn test_unmapped_or_absent_is_unknown() {
        assert_eq!(country_code(Some("Atlantis")), "UN");
        assert_eq!(country_code(Some("")), "UN");
        assert_eq!(country_code(Some("N/A")), "UN");
        assert_eq!(country_code(None), "UN");
    }
}
