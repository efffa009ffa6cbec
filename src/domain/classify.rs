//! Destination classification for redirect-history records.

use std::collections::HashSet;
use url::Url;

/// Tag applied when a destination does not match any known label,
/// or when the URL cannot be parsed.
pub const UNCLASSIFIED: &str = "unclassified";

/// Classifies destination URLs by their domain.
///
/// Built once at startup from the configured set of known destination labels
/// (`KNOWN_DESTINATIONS`). A destination like `http://site1.com/offer` is
/// tagged `site1` when `site1` is a known label; everything else falls back
/// to [`UNCLASSIFIED`].
#[derive(Debug, Clone)]
pub struct Classifier {
    known: HashSet<String>,
}

impl Classifier {
    pub fn new(known_destinations: &[String]) -> Self {
        Self {
            known: known_destinations.iter().cloned().collect(),
        }
    }

    /// Returns the classification tag for a destination URL.
    ///
    /// The candidate label is the first DNS label of the URL's host
    /// (`site1.com` → `site1`). Only labels from the known set are returned
    /// as-is; unknown labels and unparseable URLs classify as
    /// [`UNCLASSIFIED`].
    pub fn classify(&self, destination_url: &str) -> String {
        let label = Url::parse(destination_url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string))
            .and_then(|host| host.split('.').next().map(str::to_string));

        match label {
            Some(label) if self.known.contains(&label) => label,
            _ => UNCLASSIFIED.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> Classifier {
        Classifier::new(&["site1".to_string(), "site2".to_string()])
    }

    #[test]
    fn test_classify_known_destination() {
        assert_eq!(classifier().classify("http://site1.com/special-offer"), "site1");
        assert_eq!(classifier().classify("https://site2.org/"), "site2");
    }

    #[test]
    fn test_classify_known_with_port_and_query() {
        assert_eq!(
            classifier().classify("http://site1.com:8080/offer?x=1"),
            "site1"
        );
    }

    #[test]
    fn test_classify_unknown_destination() {
        assert_eq!(classifier().classify("http://elsewhere.com/"), UNCLASSIFIED);
    }

    #[test]
    fn test_classify_unparseable_url() {
        assert_eq!(classifier().classify("not a url"), UNCLASSIFIED);
        assert_eq!(classifier().classify(""), UNCLASSIFIED);
    }

    #[test]
    fn test_classify_subdomain_uses_first_label() {
        // www.site1.com yields label "www", which is not in the known set.
        assert_eq!(classifier().classify("http://www.site1.com/"), UNCLASSIFIED);
    }
}
