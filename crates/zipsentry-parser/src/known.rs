//! Compiled-in knowledge about JDK and Commons Compress archive APIs.
//!
//! These tables are the frontend's stand-in for a full classpath model:
//! the nominal supertype edges between the archive types, and the methods
//! known to produce archive entries. Both are process-wide constants,
//! safe to share across concurrent file scans.

/// Direct nominal supertype edges, `(type, supertype)`.
pub(crate) const SUPERTYPE_EDGES: &[(&str, &str)] = &[
    ("java.util.jar.JarEntry", "java.util.zip.ZipEntry"),
    ("java.util.jar.JarFile", "java.util.zip.ZipFile"),
    ("java.util.jar.JarInputStream", "java.util.zip.ZipInputStream"),
    (
        "org.apache.commons.compress.archivers.zip.ZipArchiveEntry",
        "java.util.zip.ZipEntry",
    ),
    (
        "org.apache.commons.compress.archivers.zip.ZipArchiveEntry",
        "org.apache.commons.compress.archivers.ArchiveEntry",
    ),
    (
        "org.apache.commons.compress.archivers.jar.JarArchiveEntry",
        "org.apache.commons.compress.archivers.zip.ZipArchiveEntry",
    ),
    (
        "org.apache.commons.compress.archivers.tar.TarArchiveEntry",
        "org.apache.commons.compress.archivers.ArchiveEntry",
    ),
    (
        "org.apache.commons.compress.archivers.ar.ArArchiveEntry",
        "org.apache.commons.compress.archivers.ArchiveEntry",
    ),
    (
        "org.apache.commons.compress.archivers.arj.ArjArchiveEntry",
        "org.apache.commons.compress.archivers.ArchiveEntry",
    ),
    (
        "org.apache.commons.compress.archivers.cpio.CpioArchiveEntry",
        "org.apache.commons.compress.archivers.ArchiveEntry",
    ),
    (
        "org.apache.commons.compress.archivers.dump.DumpArchiveEntry",
        "org.apache.commons.compress.archivers.ArchiveEntry",
    ),
    (
        "org.apache.commons.compress.archivers.sevenz.SevenZArchiveEntry",
        "org.apache.commons.compress.archivers.ArchiveEntry",
    ),
    (
        "org.apache.commons.compress.archivers.zip.ZipArchiveInputStream",
        "org.apache.commons.compress.archivers.ArchiveInputStream",
    ),
    (
        "org.apache.commons.compress.archivers.tar.TarArchiveInputStream",
        "org.apache.commons.compress.archivers.ArchiveInputStream",
    ),
    (
        "org.apache.commons.compress.archivers.jar.JarArchiveInputStream",
        "org.apache.commons.compress.archivers.zip.ZipArchiveInputStream",
    ),
    (
        "org.apache.commons.compress.archivers.ar.ArArchiveInputStream",
        "org.apache.commons.compress.archivers.ArchiveInputStream",
    ),
    (
        "org.apache.commons.compress.archivers.cpio.CpioArchiveInputStream",
        "org.apache.commons.compress.archivers.ArchiveInputStream",
    ),
    (
        "org.apache.commons.compress.archivers.dump.DumpArchiveInputStream",
        "org.apache.commons.compress.archivers.ArchiveInputStream",
    ),
];

/// Entry-producing methods, `(receiver type, method name, return type)`.
/// Lookup walks the receiver's supertypes, so `JarInputStream.getNextEntry`
/// resolves through `ZipInputStream`.
pub(crate) const ENTRY_METHODS: &[(&str, &str, &str)] = &[
    (
        "java.util.zip.ZipInputStream",
        "getNextEntry",
        "java.util.zip.ZipEntry",
    ),
    (
        "java.util.jar.JarInputStream",
        "getNextJarEntry",
        "java.util.jar.JarEntry",
    ),
    ("java.util.zip.ZipFile", "getEntry", "java.util.zip.ZipEntry"),
    (
        "java.util.jar.JarFile",
        "getJarEntry",
        "java.util.jar.JarEntry",
    ),
    (
        "org.apache.commons.compress.archivers.ArchiveInputStream",
        "getNextEntry",
        "org.apache.commons.compress.archivers.ArchiveEntry",
    ),
    (
        "org.apache.commons.compress.archivers.zip.ZipArchiveInputStream",
        "getNextZipEntry",
        "org.apache.commons.compress.archivers.zip.ZipArchiveEntry",
    ),
    (
        "org.apache.commons.compress.archivers.tar.TarArchiveInputStream",
        "getNextTarEntry",
        "org.apache.commons.compress.archivers.tar.TarArchiveEntry",
    ),
    (
        "org.apache.commons.compress.archivers.jar.JarArchiveInputStream",
        "getNextJarEntry",
        "org.apache.commons.compress.archivers.jar.JarArchiveEntry",
    ),
    (
        "org.apache.commons.compress.archivers.zip.ZipFile",
        "getEntry",
        "org.apache.commons.compress.archivers.zip.ZipArchiveEntry",
    ),
];

/// Whether `name` appears anywhere in the built-in tables. Used to resolve
/// simple names brought in by wildcard imports.
pub(crate) fn is_known_type(name: &str) -> bool {
    SUPERTYPE_EDGES
        .iter()
        .any(|(ty, supertype)| *ty == name || *supertype == name)
        || ENTRY_METHODS
            .iter()
            .any(|(receiver, _, ret)| *receiver == name || *ret == name)
}
