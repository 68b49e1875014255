//! Checker options.
//!
//! Options are plain serde structs with camelCase keys and defaults for every
//! field, so an empty JSON object is a valid configuration.

use crate::matchers::MethodMatcher;
use anyhow::{Context, Result, bail};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::path::Path;

pub const GENERATED_MESSAGE: &str = "com.google.protobuf.GeneratedMessage";
pub const GENERATED_MESSAGE_LITE: &str = "com.google.protobuf.GeneratedMessageLite";

/// Getter names: `get` followed by at least one character.
pub const PROTO_GETTER_PATTERN: &str = "^get.+$";

/// Generated-message methods that look like getters but are not field accessors.
pub const NON_ACCESSOR_GETTERS: [&str; 2] = ["getCachedSize", "getSerializedSize"];

/// Which calls count as pure accessors when comparing accessor chains.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct AccessorFamilyConfig {
    /// Accessors must be declared on a subtype of one of these
    pub descendant_of_any: Vec<String>,
    /// Regex the accessor name must match
    pub name_pattern: String,
    /// Names rejected even when they match `name_pattern`
    pub excluded_names: Vec<String>,
}

impl Default for AccessorFamilyConfig {
    fn default() -> Self {
        AccessorFamilyConfig {
            descendant_of_any: vec![
                GENERATED_MESSAGE.to_string(),
                GENERATED_MESSAGE_LITE.to_string(),
            ],
            name_pattern: PROTO_GETTER_PATTERN.to_string(),
            excluded_names: NON_ACCESSOR_GETTERS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl AccessorFamilyConfig {
    pub fn is_default(&self) -> bool {
        *self == AccessorFamilyConfig::default()
    }

    /// Zero-parameter instance methods on the configured types whose names
    /// match the pattern and are not excluded.
    pub fn build_matcher(&self) -> Result<MethodMatcher> {
        if self.descendant_of_any.is_empty() {
            bail!("accessor family must name at least one declaring type");
        }
        let pattern = Regex::new(&self.name_pattern)
            .with_context(|| format!("invalid accessor name pattern `{}`", self.name_pattern))?;

        let owners: Vec<&str> = self.descendant_of_any.iter().map(String::as_str).collect();
        let excluded: Vec<&str> = self.excluded_names.iter().map(String::as_str).collect();
        Ok(MethodMatcher::instance_method()
            .on_descendant_of_any(&owners)
            .with_name_matching(pattern)
            .excluding_names(&excluded)
            .with_parameters(&[]))
    }
}

static DEFAULT_ACCESSOR_MATCHER: Lazy<MethodMatcher> = Lazy::new(|| {
    MethodMatcher::instance_method()
        .on_descendant_of_any(&[GENERATED_MESSAGE, GENERATED_MESSAGE_LITE])
        .with_name_matching(Regex::new(PROTO_GETTER_PATTERN).expect("valid getter pattern"))
        .excluding_names(&NON_ACCESSOR_GETTERS)
        .with_parameters(&[])
});

/// Accessor matcher for immutable protobuf messages.
pub fn default_accessor_matcher() -> &'static MethodMatcher {
    &DEFAULT_ACCESSOR_MATCHER
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawCheckerOptions {
    accessor_family: AccessorFamilyConfig,
    disabled_checks: Vec<String>,
}

/// Validated checker options.
///
/// Every constructor compiles the accessor family, so holding a
/// `CheckerOptions` means the configuration is usable.
#[derive(Clone, Debug, Deserialize)]
#[serde(try_from = "RawCheckerOptions")]
pub struct CheckerOptions {
    accessor_family: AccessorFamilyConfig,
    /// Names of checks that must not report
    disabled_checks: Vec<String>,
    /// Compiled `accessor_family`, `None` for the default family
    accessor_matcher: Option<MethodMatcher>,
}

impl Default for CheckerOptions {
    fn default() -> Self {
        CheckerOptions {
            accessor_family: AccessorFamilyConfig::default(),
            disabled_checks: Vec::new(),
            accessor_matcher: None,
        }
    }
}

impl PartialEq for CheckerOptions {
    fn eq(&self, other: &Self) -> bool {
        self.accessor_family == other.accessor_family
            && self.disabled_checks == other.disabled_checks
    }
}

impl Eq for CheckerOptions {}

impl TryFrom<RawCheckerOptions> for CheckerOptions {
    type Error = anyhow::Error;

    fn try_from(raw: RawCheckerOptions) -> Result<CheckerOptions> {
        CheckerOptions::new(raw.accessor_family, raw.disabled_checks)
    }
}

impl CheckerOptions {
    /// Options with a custom accessor family, validated up front.
    pub fn new(
        accessor_family: AccessorFamilyConfig,
        disabled_checks: Vec<String>,
    ) -> Result<CheckerOptions> {
        let accessor_matcher = if accessor_family.is_default() {
            None
        } else {
            Some(
                accessor_family
                    .build_matcher()
                    .context("invalid accessorFamily")?,
            )
        };
        Ok(CheckerOptions {
            accessor_family,
            disabled_checks,
            accessor_matcher,
        })
    }

    /// Parse and validate options from JSON.
    pub fn from_json(json: &str) -> Result<CheckerOptions> {
        let raw: RawCheckerOptions =
            serde_json::from_str(json).context("failed to parse checker options")?;
        CheckerOptions::try_from(raw)
    }

    pub fn from_file(path: &Path) -> Result<CheckerOptions> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read checker options from {}", path.display()))?;
        CheckerOptions::from_json(&json)
            .with_context(|| format!("in checker options file {}", path.display()))
    }

    pub fn accessor_family(&self) -> &AccessorFamilyConfig {
        &self.accessor_family
    }

    pub fn disabled_checks(&self) -> &[String] {
        &self.disabled_checks
    }

    /// Matcher deciding which calls count as pure accessors in chain mode.
    pub fn accessor_matcher(&self) -> &MethodMatcher {
        match &self.accessor_matcher {
            Some(matcher) => matcher,
            None => default_accessor_matcher(),
        }
    }

    pub fn is_check_enabled(&self, name: &str) -> bool {
        !self.disabled_checks.iter().any(|disabled| disabled == name)
    }
}
