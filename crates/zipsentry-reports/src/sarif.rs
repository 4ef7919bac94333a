use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

use zipsentry_core::{ARCHIVE_ENTRY_RULE, Finding};

/// SARIF (Static Analysis Results Interchange Format) v2.1.0 implementation
/// Spec: https://docs.oasis-open.org/sarif/sarif/v2.1.0/sarif-v2.1.0.html

#[derive(Debug, Serialize, Deserialize)]
pub struct SarifReport {
    #[serde(rename = "$schema")]
    pub schema: String,
    pub version: String,
    pub runs: Vec<SarifRun>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SarifRun {
    pub tool: SarifTool,
    pub results: Vec<SarifResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifacts: Option<Vec<SarifArtifact>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SarifTool {
    pub driver: SarifDriver,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SarifDriver {
    pub name: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub information_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rules: Option<Vec<SarifRule>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SarifRule {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_description: Option<SarifMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<SarifRuleProperties>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_configuration: Option<SarifConfiguration>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SarifRuleProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cwe: Option<Vec<String>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SarifConfiguration {
    pub level: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SarifMessage {
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SarifResult {
    #[serde(rename = "ruleId")]
    pub rule_id: String,
    #[serde(rename = "ruleIndex")]
    pub rule_index: usize,
    pub level: String,
    pub message: SarifMessage,
    pub locations: Vec<SarifLocation>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SarifLocation {
    #[serde(rename = "physicalLocation")]
    pub physical_location: SarifPhysicalLocation,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SarifPhysicalLocation {
    #[serde(rename = "artifactLocation")]
    pub artifact_location: SarifArtifactLocation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<SarifRegion>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SarifArtifactLocation {
    pub uri: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SarifRegion {
    #[serde(rename = "startLine")]
    pub start_line: i32,
    #[serde(rename = "startColumn", skip_serializing_if = "Option::is_none")]
    pub start_column: Option<i32>,
    #[serde(rename = "endLine", skip_serializing_if = "Option::is_none")]
    pub end_line: Option<i32>,
    #[serde(rename = "endColumn", skip_serializing_if = "Option::is_none")]
    pub end_column: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SarifArtifact {
    pub location: SarifArtifactLocation,
}

impl SarifReport {
    /// Render findings as a single-run SARIF report.
    ///
    /// The archive-entry rule is advisory, so every result carries level
    /// `warning`.
    pub fn from_findings(findings: &[Finding], version: &str) -> Self {
        let rule = SarifRule {
            id: ARCHIVE_ENTRY_RULE.id.to_string(),
            name: ARCHIVE_ENTRY_RULE.name.to_string(),
            short_description: Some(SarifMessage {
                text: ARCHIVE_ENTRY_RULE.short_description.to_string(),
            }),
            properties: Some(SarifRuleProperties {
                tags: Some(vec!["security".to_string()]),
                cwe: Some(ARCHIVE_ENTRY_RULE.cwe_ids()),
            }),
            default_configuration: Some(SarifConfiguration {
                level: "warning".to_string(),
            }),
        };

        let mut artifacts: Vec<SarifArtifact> = Vec::new();
        let mut results = Vec::new();
        for finding in findings {
            let uri = finding
                .file()
                .map(|p| p.to_string_lossy().to_string())
                .unwrap_or_else(|| "<memory>".to_string());
            if !artifacts.iter().any(|a| a.location.uri == uri) {
                artifacts.push(SarifArtifact {
                    location: SarifArtifactLocation { uri: uri.clone() },
                });
            }
            results.push(SarifResult {
                rule_id: finding.rule_id.clone(),
                rule_index: 0,
                level: "warning".to_string(),
                message: SarifMessage {
                    text: finding.message.clone(),
                },
                locations: vec![SarifLocation {
                    physical_location: SarifPhysicalLocation {
                        artifact_location: SarifArtifactLocation { uri },
                        region: Some(SarifRegion {
                            start_line: finding.span.start_line as i32,
                            start_column: Some(finding.span.start_column as i32),
                            end_line: Some(finding.span.end_line as i32),
                            end_column: Some(finding.span.end_column as i32),
                        }),
                    },
                }],
            });
        }

        SarifReport {
            schema: "https://raw.githubusercontent.com/oasis-tcs/sarif-spec/master/Schemata/sarif-schema-2.1.0.json".to_string(),
            version: "2.1.0".to_string(),
            runs: vec![SarifRun {
                tool: SarifTool {
                    driver: SarifDriver {
                        name: "Zipsentry".to_string(),
                        version: version.to_string(),
                        information_uri: Some(
                            "https://github.com/zipsentry/zipsentry".to_string(),
                        ),
                        rules: Some(vec![rule]),
                    },
                },
                results,
                artifacts: Some(artifacts),
            }],
        }
    }

    /// Export SARIF report to JSON string
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Save SARIF report to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = self.to_json()?;
        std::fs::write(&path, json)?;
        log::debug!("wrote SARIF report to {}", path.as_ref().display());
        Ok(())
    }

    /// Load SARIF report from JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let report: SarifReport = serde_json::from_str(json)?;
        Ok(report)
    }
}
