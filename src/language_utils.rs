/*!
 * Language catalog for code validation and display names.
 *
 * The catalog maps lowercase language codes to English display names. It holds
 * every ISO 639-1 (2-letter) code known to `isolang` plus a handful of regional
 * variants. ISO 639-2/T and ISO 639-2/B (3-letter) codes are accepted on
 * lookup and normalized to their 2-letter form.
 */

use std::collections::HashMap;

use isolang::Language;
use log::debug;
use once_cell::sync::OnceCell;

use crate::errors::{ConfigError, LanguageRole};

/// ISO 639-1 codes the catalog is built from
const ISO_639_1_CODES: &[&str] = &[
    "aa", "ab", "ae", "af", "ak", "am", "an", "ar", "as", "av", "ay", "az", "ba", "be", "bg",
    "bi", "bm", "bn", "bo", "br", "bs", "ca", "ce", "ch", "co", "cr", "cs", "cu", "cv", "cy",
    "da", "de", "dv", "dz", "ee", "el", "en", "eo", "es", "et", "eu", "fa", "ff", "fi", "fj",
    "fo", "fr", "fy", "ga", "gd", "gl", "gn", "gu", "gv", "ha", "he", "hi", "ho", "hr", "ht",
    "hu", "hy", "hz", "ia", "id", "ie", "ig", "ii", "ik", "io", "is", "it", "iu", "ja", "jv",
    "ka", "kg", "ki", "kj", "kk", "kl", "km", "kn", "ko", "kr", "ks", "ku", "kv", "kw", "ky",
    "la", "lb", "lg", "li", "ln", "lo", "lt", "lu", "lv", "mg", "mh", "mi", "mk", "ml", "mn",
    "mr", "ms", "mt", "my", "na", "nb", "nd", "ne", "ng", "nl", "nn", "no", "nr", "nv", "ny",
    "oc", "oj", "om", "or", "os", "pa", "pi", "pl", "ps", "pt", "qu", "rm", "rn", "ro", "ru",
    "rw", "sa", "sc", "sd", "se", "sg", "si", "sk", "sl", "sm", "sn", "so", "sq", "sr", "ss",
    "st", "su", "sv", "sw", "ta", "te", "tg", "th", "ti", "tk", "tl", "tn", "to", "tr", "ts",
    "tt", "tw", "ty", "ug", "uk", "ur", "uz", "ve", "vi", "vo", "wa", "wo", "xh", "yi", "yo",
    "za", "zh", "zu",
];

/// Regional variants that have no ISO 639-1 code of their own
const REGIONAL_VARIANTS: &[(&str, &str)] = &[
    ("en-gb", "British English"),
    ("en-us", "American English"),
    ("es-mx", "Mexican Spanish"),
    ("fr-ca", "Canadian French"),
    ("pt-br", "Brazilian Portuguese"),
    ("pt-pt", "European Portuguese"),
    ("zh-cn", "Simplified Chinese"),
    ("zh-tw", "Traditional Chinese"),
];

/// ISO 639-2/B codes that differ from their ISO 639-2/T counterpart
const PART2B_TO_PART2T: &[(&str, &str)] = &[
    ("alb", "sqi"),
    ("arm", "hye"),
    ("baq", "eus"),
    ("bur", "mya"),
    ("chi", "zho"),
    ("cze", "ces"),
    ("dut", "nld"),
    ("fre", "fra"),
    ("geo", "kat"),
    ("ger", "deu"),
    ("gre", "ell"),
    ("ice", "isl"),
    ("mac", "mkd"),
    ("may", "msa"),
    ("per", "fas"),
    ("rum", "ron"),
    ("slo", "slk"),
    ("wel", "cym"),
];

static CATALOG: OnceCell<LanguageCatalog> = OnceCell::new();

/// Immutable mapping from language code to display name
#[derive(Debug, Clone)]
pub struct LanguageCatalog {
    names: HashMap<String, String>,
}

impl LanguageCatalog {
    /// Process-wide catalog, built on first use
    pub fn global() -> Result<&'static LanguageCatalog, ConfigError> {
        CATALOG.get_or_try_init(Self::load)
    }

    /// Build the catalog from the bundled ISO 639-1 table and regional variants
    pub fn load() -> Result<Self, ConfigError> {
        let mut entries = Vec::with_capacity(ISO_639_1_CODES.len() + REGIONAL_VARIANTS.len());

        for code in ISO_639_1_CODES {
            match Language::from_639_1(code) {
                Some(language) => entries.push((code.to_string(), display_name(language.to_name()))),
                None => debug!("Skipping language code unknown to isolang: {}", code),
            }
        }

        entries.extend(
            REGIONAL_VARIANTS
                .iter()
                .map(|(code, name)| (code.to_string(), name.to_string())),
        );

        Self::from_entries(entries)
    }

    /// Build a catalog from explicit (code, name) pairs
    ///
    /// Codes are stored lowercase. An empty set of entries cannot back a catalog.
    pub fn from_entries<I, C, N>(entries: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (C, N)>,
        C: Into<String>,
        N: Into<String>,
    {
        let names: HashMap<String, String> = entries
            .into_iter()
            .map(|(code, name)| (code.into().trim().to_lowercase(), name.into()))
            .collect();

        if names.is_empty() {
            return Err(ConfigError::CatalogUnavailable(
                "no language codes available".to_string(),
            ));
        }

        Ok(Self { names })
    }

    /// Normalize a code to the form stored in the catalog
    ///
    /// Returns `None` when the code is not known.
    pub fn normalize(&self, code: &str) -> Option<String> {
        let code = code.trim().to_lowercase();

        if self.names.contains_key(&code) {
            return Some(code);
        }

        if code.len() == 3 {
            let part2t = PART2B_TO_PART2T
                .iter()
                .find(|(part2b, _)| *part2b == code)
                .map_or(code.as_str(), |(_, part2t)| *part2t);

            let part1 = Language::from_639_3(part2t).and_then(|language| language.to_639_1())?;
            if self.names.contains_key(part1) {
                return Some(part1.to_string());
            }
        }

        None
    }

    /// Whether the code (in any case) is known to the catalog
    pub fn is_valid(&self, code: &str) -> bool {
        self.normalize(code).is_some()
    }

    /// Display name of a language, e.g. "French" for "fr"
    pub fn language_name(&self, code: &str) -> Result<&str, ConfigError> {
        self.normalize(code)
            .and_then(|normalized| self.names.get(&normalized))
            .map(String::as_str)
            .ok_or_else(|| ConfigError::UnknownLanguageCode(code.trim().to_lowercase()))
    }

    /// Validate a code supplied for one side of a language pair
    ///
    /// Returns the normalized code, or an error listing the available codes.
    pub fn validate(&self, code: &str, role: LanguageRole) -> Result<String, ConfigError> {
        self.normalize(code).ok_or_else(|| ConfigError::InvalidLanguageCode {
            role,
            code: code.to_string(),
            available: self.codes(),
        })
    }

    /// All known codes, sorted
    pub fn codes(&self) -> Vec<String> {
        let mut codes: Vec<String> = self.names.keys().cloned().collect();
        codes.sort();
        codes
    }

    /// All (code, name) pairs, sorted by code
    pub fn languages(&self) -> Vec<(&str, &str)> {
        let mut languages: Vec<(&str, &str)> = self
            .names
            .iter()
            .map(|(code, name)| (code.as_str(), name.as_str()))
            .collect();
        languages.sort_by(|a, b| a.0.cmp(b.0));
        languages
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Strip qualifiers such as "(macrolanguage)" or "(1453-)" from ISO names
fn display_name(name: &str) -> String {
    name.split(" (").next().unwrap_or(name).trim().to_string()
}

/// Check a code against the global catalog
pub fn is_valid_language_code(code: &str) -> bool {
    LanguageCatalog::global()
        .map(|catalog| catalog.is_valid(code))
        .unwrap_or(false)
}

/// Get the language name from a code using the global catalog
pub fn get_language_name(code: &str) -> Result<String, ConfigError> {
    LanguageCatalog::global()?
        .language_name(code)
        .map(str::to_string)
}
