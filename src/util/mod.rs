//
//  jenkins-cli
//  util/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/16.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Utility functions shared by the command implementations.

use std::collections::BTreeMap;

/// Parses a `KEY=VALUE` build parameter.
///
/// The value may be empty (`KEY=`) and may itself contain `=`. The key must
/// not be empty.
///
/// ```rust
/// use jenkins_cli::util::parse_key_value;
///
/// assert_eq!(
///     parse_key_value("BRANCH_NAME=master"),
///     Ok(("BRANCH_NAME".to_string(), "master".to_string()))
/// );
/// assert!(parse_key_value("no-equals-sign").is_err());
/// ```
pub fn parse_key_value(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid parameter '{s}': expected KEY=VALUE"))?;

    let key = key.trim();
    if key.is_empty() {
        return Err(format!("invalid parameter '{s}': empty name"));
    }

    Ok((key.to_string(), value.to_string()))
}

/// Merges command-line parameters over configured defaults.
///
/// Later entries win, so a `-p KEY=VALUE` flag replaces a default of the same
/// name.
pub fn merge_parameters(
    defaults: &BTreeMap<String, String>,
    overrides: &[(String, String)],
) -> BTreeMap<String, String> {
    let mut merged = defaults.clone();
    merged.extend(overrides.iter().cloned());
    merged
}
