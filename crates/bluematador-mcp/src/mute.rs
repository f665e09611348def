//! Mute-rule composition helpers
//!
//! Pure functions behind the two high-level mute tools: case-insensitive
//! service resolution against the monitor table, monitor-name validation,
//! wildcard pattern compilation, and the ARN service-segment filter.

use regex::{Regex, RegexBuilder};
use std::collections::BTreeMap;

/// Resolve a user-supplied service name to the canonical key in the monitor
/// table, matching case-insensitively.
pub fn resolve_service<'a>(
    monitors: &'a BTreeMap<String, Vec<String>>,
    service_name: &str,
) -> Option<&'a str> {
    monitors
        .keys()
        .find(|key| key.eq_ignore_ascii_case(service_name))
        .map(|key| key.as_str())
}

/// Requested monitor names that do not exist in the service's monitor list
pub fn invalid_monitors<'a>(available: &[String], requested: &'a [String]) -> Vec<&'a str> {
    requested
        .iter()
        .filter(|name| !available.contains(name))
        .map(|name| name.as_str())
        .collect()
}

/// Compile a wildcard pattern into an anchored, case-insensitive regex.
/// `*` matches any run of characters; every other character is literal.
pub fn wildcard_regex(pattern: &str) -> Result<Regex, regex::Error> {
    let escaped = pattern
        .split('*')
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(".*");
    RegexBuilder::new(&format!("^{escaped}$"))
        .case_insensitive(true)
        .build()
}

/// Service segment of an ARN-style reference: the third colon-delimited part
/// (`arn:aws:sqs:...` yields `sqs`), lowercased. References without that
/// shape yield `None` and never match a service-type filter.
pub fn service_segment(reference: &str) -> Option<String> {
    let mut parts = reference.split(':');
    let segment = parts.nth(2)?;
    Some(segment.to_ascii_lowercase())
}

/// Whether a resource reference passes the pattern and the optional
/// service-type filter
pub fn matches(reference: &str, pattern: &Regex, service_type: Option<&str>) -> bool {
    if !pattern.is_match(reference) {
        return false;
    }
    match service_type {
        Some(wanted) => {
            service_segment(reference).as_deref() == Some(wanted.to_ascii_lowercase().as_str())
        }
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monitor_table(entries: &[(&str, &[&str])]) -> BTreeMap<String, Vec<String>> {
        entries
            .iter()
            .map(|(service, monitors)| {
                (
                    service.to_string(),
                    monitors.iter().map(|m| m.to_string()).collect(),
                )
            })
            .collect()
    }

    #[test]
    fn service_resolution_is_case_insensitive() {
        let table = monitor_table(&[("sqs", &["queue-depth"]), ("rds", &["cpu"])]);
        assert_eq!(resolve_service(&table, "SQS"), Some("sqs"));
        assert_eq!(resolve_service(&table, "sqs"), Some("sqs"));
        assert_eq!(resolve_service(&table, "Rds"), Some("rds"));
        assert_eq!(resolve_service(&table, "lambda"), None);
    }

    #[test]
    fn invalid_monitors_reports_only_the_unknown_subset() {
        let available = vec!["queue-depth".to_string(), "age-of-oldest".to_string()];
        let requested = vec![
            "queue-depth".to_string(),
            "bogus".to_string(),
            "also-bogus".to_string(),
        ];
        assert_eq!(
            invalid_monitors(&available, &requested),
            vec!["bogus", "also-bogus"]
        );
        assert!(invalid_monitors(&available, &available.clone()).is_empty());
    }

    #[test]
    fn wildcard_matches_prefix_patterns() {
        let regex = wildcard_regex("sqs-*").unwrap();
        let names = ["sqs-prod-1", "sqs-dev", "rds-1"];
        let matched: Vec<_> = names.iter().filter(|n| regex.is_match(n)).collect();
        assert_eq!(matched, vec![&"sqs-prod-1", &"sqs-dev"]);
    }

    #[test]
    fn wildcard_is_anchored_on_both_ends() {
        let regex = wildcard_regex("prod").unwrap();
        assert!(regex.is_match("prod"));
        assert!(!regex.is_match("sqs-prod"));
        assert!(!regex.is_match("prod-1"));
    }

    #[test]
    fn wildcard_is_case_insensitive() {
        let regex = wildcard_regex("SQS-*").unwrap();
        assert!(regex.is_match("sqs-prod"));
    }

    #[test]
    fn wildcard_escapes_regex_metacharacters() {
        let regex = wildcard_regex("app.queue+1*").unwrap();
        assert!(regex.is_match("app.queue+1-prod"));
        assert!(!regex.is_match("appXqueue+1-prod"));
        assert!(!regex.is_match("app.queueee1-prod"));
    }

    #[test]
    fn multiple_wildcards_compose() {
        let regex = wildcard_regex("app-*-db*").unwrap();
        assert!(regex.is_match("app-prod-db"));
        assert!(regex.is_match("app-staging-db-replica"));
        assert!(!regex.is_match("app-prod-cache"));
    }

    #[test]
    fn service_segment_extracts_the_third_part() {
        assert_eq!(
            service_segment("arn:aws:sqs:us-east-1:123:orders").as_deref(),
            Some("sqs")
        );
        assert_eq!(
            service_segment("arn:aws:SQS:us-east-1:123:orders").as_deref(),
            Some("sqs")
        );
    }

    #[test]
    fn non_arn_references_have_no_service_segment() {
        assert_eq!(service_segment("plain-resource-name"), None);
        assert_eq!(service_segment("a:b"), None);
    }

    #[test]
    fn service_filter_excludes_non_arn_references() {
        let regex = wildcard_regex("*").unwrap();
        assert!(matches("arn:aws:sqs:us-east-1:1:q", &regex, Some("sqs")));
        assert!(!matches("arn:aws:rds:us-east-1:1:db", &regex, Some("sqs")));
        // Plain names cannot satisfy a service filter at all
        assert!(!matches("sqs-queue-without-arn", &regex, Some("sqs")));
        assert!(matches("sqs-queue-without-arn", &regex, None));
    }

    #[test]
    fn service_filter_is_case_insensitive() {
        let regex = wildcard_regex("*orders*").unwrap();
        assert!(matches("arn:aws:sqs:us-east-1:1:orders", &regex, Some("SQS")));
    }
}
