// Conformance suite files in the uritemplate-test JSON layout

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

use crate::domain::template::{Template, Variables};

/// One named group of test cases sharing a set of variables
#[derive(Debug, Deserialize)]
pub struct SuiteGroup {
    #[serde(default)]
    pub level: Option<u8>,
    #[serde(default)]
    pub variables: Variables,
    pub testcases: Vec<(String, Expected)>,
}

/// Expected outcome for a template
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Expected {
    Exact(String),
    /// Any of these is acceptable (map ordering may vary)
    AnyOf(Vec<String>),
    /// `false`: the template must be rejected
    Error(bool),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CaseFailure {
    pub group: String,
    pub template: String,
    pub expected: Expected,
    pub actual: std::result::Result<String, String>,
}

#[derive(Debug, Default)]
pub struct SuiteReport {
    pub passed: usize,
    pub failures: Vec<CaseFailure>,
}

impl SuiteReport {
    pub fn total(&self) -> usize {
        self.passed + self.failures.len()
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    fn merge(&mut self, other: SuiteReport) {
        self.passed += other.passed;
        self.failures.extend(other.failures);
    }
}

pub type Suite = BTreeMap<String, SuiteGroup>;

pub fn load_suite_file(path: &Path) -> Result<Suite> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Could not read suite file {}", path.display()))?;
    parse_suite(&text).with_context(|| format!("Invalid suite file {}", path.display()))
}

pub fn parse_suite(text: &str) -> Result<Suite> {
    Ok(serde_json::from_str(text)?)
}

pub fn run_suite(suite: &Suite) -> SuiteReport {
    let mut report = SuiteReport::default();
    for (name, group) in suite {
        report.merge(run_group(name, group));
    }
    report
}

fn run_group(name: &str, group: &SuiteGroup) -> SuiteReport {
    let mut report = SuiteReport::default();
    for (template, expected) in &group.testcases {
        let actual = template
            .parse::<Template>()
            .map(|t| t.expand(&group.variables))
            .map_err(|e| e.to_string());

        let passed = match (expected, &actual) {
            (Expected::Exact(want), Ok(got)) => want == got,
            (Expected::AnyOf(options), Ok(got)) => options.contains(got),
            (Expected::Error(_), Err(_)) => true,
            _ => false,
        };

        if passed {
            report.passed += 1;
        } else {
            tracing::debug!(group = name, template = %template, ?actual, "case failed");
            report.failures.push(CaseFailure {
                group: name.to_string(),
                template: template.clone(),
                expected: expected.clone(),
                actual,
            });
        }
    }
    report
}
