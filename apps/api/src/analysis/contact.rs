//! Contact and URL extraction for the leading sections of a resume.
//!
//! Matched contact fields and hyperlinks are cut out of the line text before the
//! line is stored, and recorded separately in [`ContactInfo`] / [`UrlList`].

use std::collections::BTreeMap;
use std::ops::Range;

use regex::Regex;
use serde::Serialize;
use tracing::debug;

use crate::errors::AnalysisError;

const EMAIL_PATTERN: &str = r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}";
const LINKEDIN_PATTERN: &str =
    r"(?i)(?:https?://)?(?:[a-z]{2,3}\.)?linkedin\.com/(?:in|pub)/[A-Za-z0-9_%-]+/?";
const GITHUB_PATTERN: &str = r"(?i)(?:https?://)?(?:www\.)?github\.com/[A-Za-z0-9_-]+/?";
const PHONE_PATTERN: &str = r"(?:\+\d{1,3}[\s.-]?)?(?:\(\d{3}\)|\d{3})[\s.-]?\d{3}[\s.-]?\d{4}\b";
const URL_PATTERN: &str = r"(?i:https?://|www\.)[^\s,;|]+|(?i:\b[a-z0-9][a-z0-9-]*(?:\.[a-z0-9-]+)*\.(?:com|org|net|io|dev|edu|gov|co|me|ai|app)\b(?:/[^\s,;|]*)?)";

/// Contact field key → first matching substring. A key, once resolved, is never overwritten.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ContactInfo {
    fields: BTreeMap<String, String>,
}

impl ContactInfo {
    #[cfg(test)]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn is_resolved(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Records `value` under `key` unless the key is already resolved.
    /// Returns whether the value was recorded.
    fn resolve(&mut self, key: &str, value: String) -> bool {
        if self.is_resolved(key) {
            return false;
        }
        self.fields.insert(key.to_string(), value);
        true
    }
}

/// Hyperlinks found outside contact fields, first-seen order, no duplicates.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct UrlList {
    urls: Vec<String>,
}

impl UrlList {
    pub fn as_slice(&self) -> &[String] {
        &self.urls
    }

    pub fn contains(&self, url: &str) -> bool {
        self.urls.iter().any(|u| u == url)
    }

    fn push_unique(&mut self, url: &str) -> bool {
        if self.contains(url) {
            return false;
        }
        self.urls.push(url.to_string());
        true
    }
}

/// Everything pulled out of the text stream during one segmentation pass.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Extracted {
    pub contact_info: ContactInfo,
    pub urls: UrlList,
}

#[derive(Debug, Clone)]
struct ContactPattern {
    key: String,
    pattern: Regex,
}

/// Fixed, ordered registry of contact field patterns plus the generic URL pattern.
#[derive(Debug, Clone)]
pub struct ContactRegistry {
    fields: Vec<ContactPattern>,
    email: Regex,
    url: Regex,
}

impl ContactRegistry {
    /// Builds a registry. `fields` are scanned in order; `email` is also used to
    /// keep e-mail addresses out of the URL list.
    pub fn new(fields: &[(&str, &str)], email: &str, url: &str) -> Result<Self, AnalysisError> {
        let compile = |name: &str, pattern: &str| {
            Regex::new(pattern).map_err(|e| {
                AnalysisError::Configuration(format!("invalid '{name}' pattern: {e}"))
            })
        };

        let fields = fields
            .iter()
            .map(|(key, pattern)| {
                Ok(ContactPattern {
                    key: key.to_string(),
                    pattern: compile(key, pattern)?,
                })
            })
            .collect::<Result<Vec<_>, AnalysisError>>()?;

        Ok(Self {
            fields,
            email: compile("email", email)?,
            url: compile("url", url)?,
        })
    }

    pub fn builtin() -> Result<Self, AnalysisError> {
        Self::new(
            &[
                ("email", EMAIL_PATTERN),
                ("linkedin", LINKEDIN_PATTERN),
                ("github", GITHUB_PATTERN),
                ("phone", PHONE_PATTERN),
            ],
            EMAIL_PATTERN,
            URL_PATTERN,
        )
    }

    /// Resolves still-missing contact fields found in `line`, cutting each match
    /// out of the text. Returns how many fields this line resolved.
    pub fn extract_contacts(&self, line: &mut String, info: &mut ContactInfo) -> usize {
        // Collect first, record after: the set of missing fields must not change mid-scan.
        let mut found: Vec<(&str, String)> = Vec::new();
        for field in self.fields.iter().filter(|f| !info.is_resolved(&f.key)) {
            let Some(m) = field.pattern.find(line) else {
                continue;
            };
            let (range, value) = (m.range(), m.as_str().to_string());
            line.replace_range(range, "");
            found.push((field.key.as_str(), value));
        }

        let mut resolved = 0;
        for (key, value) in found {
            debug!(field = key, "contact field resolved");
            if info.resolve(key, value) {
                resolved += 1;
            }
        }
        resolved
    }

    /// Records every non-email URL in `line` (first-seen order, no duplicates)
    /// and cuts all of them out of the text.
    pub fn extract_urls(&self, line: &mut String, urls: &mut UrlList) {
        let email_spans: Vec<Range<usize>> = self.email.find_iter(line).map(|m| m.range()).collect();

        let hits: Vec<Range<usize>> = self
            .url
            .find_iter(line)
            .filter(|m| !self.email.is_match(m.as_str()))
            .filter(|m| !email_spans.iter().any(|e| overlaps(e, &m.range())))
            .map(|m| m.range())
            .collect();

        for range in &hits {
            urls.push_unique(&line[range.clone()]);
        }
        for range in hits.into_iter().rev() {
            line.replace_range(range, "");
        }
    }
}

fn overlaps(a: &Range<usize>, b: &Range<usize>) -> bool {
    a.start < b.end && b.start < a.end
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> ContactRegistry {
        ContactRegistry::builtin().unwrap()
    }

    #[test]
    fn test_email_is_extracted_and_stripped() {
        let mut info = ContactInfo::default();
        let mut line = "john@example.com".to_string();
        let resolved = registry().extract_contacts(&mut line, &mut info);
        assert_eq!(resolved, 1);
        assert_eq!(info.get("email"), Some("john@example.com"));
        assert!(line.trim().is_empty());
    }

    #[test]
    fn test_multiple_fields_on_one_line() {
        let mut info = ContactInfo::default();
        let mut line = "jane@mail.org | (555) 123-4567 | linkedin.com/in/jane-doe".to_string();
        let resolved = registry().extract_contacts(&mut line, &mut info);
        assert_eq!(resolved, 3);
        assert_eq!(info.get("phone"), Some("(555) 123-4567"));
        assert_eq!(info.get("linkedin"), Some("linkedin.com/in/jane-doe"));
        assert!(!line.contains("jane@mail.org"));
        assert!(!line.contains("555"));
    }

    #[test]
    fn test_resolved_field_is_never_overwritten() {
        let reg = registry();
        let mut info = ContactInfo::default();
        let mut first = "first@example.com".to_string();
        let mut second = "second@example.com".to_string();
        reg.extract_contacts(&mut first, &mut info);
        let resolved = reg.extract_contacts(&mut second, &mut info);
        assert_eq!(resolved, 0);
        assert_eq!(info.get("email"), Some("first@example.com"));
        // Already-resolved fields are not stripped from later lines.
        assert_eq!(second, "second@example.com");
    }

    #[test]
    fn test_urls_are_deduplicated_and_stripped() {
        let reg = registry();
        let mut urls = UrlList::default();
        let mut line = "Portfolio https://jane.dev/work and https://jane.dev/work".to_string();
        reg.extract_urls(&mut line, &mut urls);
        assert_eq!(urls.as_slice(), ["https://jane.dev/work".to_string()]);
        assert_eq!(line.trim(), "Portfolio  and");
    }

    #[test]
    fn test_email_domains_are_not_urls() {
        let reg = registry();
        let mut urls = UrlList::default();
        let mut line = "Reach me at jane@example.com or www.jane.io".to_string();
        reg.extract_urls(&mut line, &mut urls);
        assert_eq!(urls.as_slice(), ["www.jane.io".to_string()]);
        assert!(line.contains("jane@example.com"));
    }

    #[test]
    fn test_bare_domain_matches_any_case() {
        let reg = registry();
        let mut urls = UrlList::default();
        let mut line = "Portfolio: JaneDoe.com".to_string();
        reg.extract_urls(&mut line, &mut urls);
        assert_eq!(urls.as_slice(), ["JaneDoe.com".to_string()]);
        assert_eq!(line.trim(), "Portfolio:");
    }

    #[test]
    fn test_first_seen_order_across_lines() {
        let reg = registry();
        let mut urls = UrlList::default();
        let mut a = "site.com".to_string();
        let mut b = "blog.org site.com".to_string();
        reg.extract_urls(&mut a, &mut urls);
        reg.extract_urls(&mut b, &mut urls);
        assert_eq!(
            urls.as_slice(),
            ["site.com".to_string(), "blog.org".to_string()]
        );
    }

    #[test]
    fn test_invalid_pattern_is_configuration_error() {
        let err = ContactRegistry::new(&[("phone", "(")], EMAIL_PATTERN, URL_PATTERN).unwrap_err();
        assert!(matches!(err, AnalysisError::Configuration(_)));
    }
}
