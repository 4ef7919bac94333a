//! Rule metadata.

/// Describes one diagnostic rule: identity, summary, and the fixed message
/// attached to every finding it emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleDescriptor {
    pub id: &'static str,
    pub name: &'static str,
    pub short_description: &'static str,
    pub message: &'static str,
}

impl RuleDescriptor {
    /// CWE (Common Weakness Enumeration) IDs associated with this rule.
    pub fn cwe_ids(&self) -> Vec<String> {
        match self.id {
            "archive-entry" => vec!["CWE-22".to_string(), "CWE-409".to_string()],
            _ => vec![],
        }
    }
}

/// The archive-entry rule: expanding an archive entry whose path was never
/// validated lets a crafted archive write outside the target directory.
pub const ARCHIVE_ENTRY_RULE: RuleDescriptor = RuleDescriptor {
    id: "archive-entry",
    name: "ArchiveEntryUse",
    short_description: "Expanding archive files is security-sensitive",
    message: "Make sure that decompressing this archive file is safe here.",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_archive_entry_rule_metadata() {
        assert_eq!(ARCHIVE_ENTRY_RULE.id, "archive-entry");
        assert!(ARCHIVE_ENTRY_RULE.message.contains("decompressing"));
    }

    #[test]
    fn test_cwe_ids() {
        assert_eq!(ARCHIVE_ENTRY_RULE.cwe_ids(), vec!["CWE-22", "CWE-409"]);
    }
}
