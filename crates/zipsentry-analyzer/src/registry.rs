//! The sensitive archive-entry type registry and its classifier.

use zipsentry_parser::{ResolvedType, SemanticModel};

/// Fully-qualified names of the archive-entry types this rule recognizes.
/// Any subtype of either entry matches as well. The set is a compiled-in
/// constant; there is no runtime configuration surface.
pub const SENSITIVE_ENTRY_TYPES: &[&str] = &[
    "java.util.zip.ZipEntry",
    "org.apache.commons.compress.archivers.ArchiveEntry",
];

/// True when `ty` is equal to, or a subtype of, a registered entry type.
///
/// Total over all resolved types: primitives and unknown types simply
/// answer `false`.
pub fn is_sensitive_entry_type(model: &SemanticModel, ty: &ResolvedType) -> bool {
    SENSITIVE_ENTRY_TYPES
        .iter()
        .any(|name| model.is_subtype_of(ty, name))
}
