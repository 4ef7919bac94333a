use zipsentry::scan_source;
use zipsentry::{ArchiveEntryCheck, FindingCollector, JavaParser};

fn matched<'a>(source: &'a str, finding: &zipsentry::Finding) -> &'a str {
    &source[finding.span.start_byte..finding.span.end_byte]
}

#[test]
fn test_uninitialized_declaration_is_reported() -> anyhow::Result<()> {
    let source = r#"import java.util.zip.ZipEntry;

class A {
    void m() {
        ZipEntry entry;
    }
}
"#;
    let findings = scan_source("A.java", source)?;
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].span.start_line, 5);
    assert_eq!(
        findings[0].message,
        "Make sure that decompressing this archive file is safe here."
    );
    assert_eq!(matched(source, &findings[0]), "ZipEntry entry");
    Ok(())
}

#[test]
fn test_initialized_declaration_defers_to_the_call() -> anyhow::Result<()> {
    let source = r#"import java.util.zip.ZipEntry;
import java.util.zip.ZipInputStream;

class A {
    void m(ZipInputStream zis) throws Exception {
        ZipEntry entry = zis.getNextEntry();
    }
}
"#;
    let findings = scan_source("A.java", source)?;
    // Exactly one finding, attached to the call, not the declaration.
    assert_eq!(findings.len(), 1);
    assert_eq!(matched(source, &findings[0]), "zis.getNextEntry()");
    Ok(())
}

#[test]
fn test_assignment_outside_a_declaration_reports_the_call() -> anyhow::Result<()> {
    let source = r#"import java.util.zip.ZipEntry;
import java.util.zip.ZipInputStream;

class A {
    void m(ZipInputStream zis) throws Exception {
        ZipEntry entry;
        entry = zis.getNextEntry();
    }
}
"#;
    let findings = scan_source("A.java", source)?;
    assert_eq!(findings.len(), 2);
    assert_eq!(matched(source, &findings[0]), "ZipEntry entry");
    assert_eq!(matched(source, &findings[1]), "zis.getNextEntry()");
    Ok(())
}

#[test]
fn test_nested_matching_calls_each_report() -> anyhow::Result<()> {
    let source = r#"import java.util.zip.ZipEntry;
import java.util.zip.ZipFile;

class A {
    void m(ZipFile zf, String name) {
        ZipEntry entry = zf.getEntry(zf.getEntry(name).getName());
    }
}
"#;
    let findings = scan_source("A.java", source)?;
    assert_eq!(findings.len(), 2);
    // Pre-order: the outer call first, then the nested one.
    assert_eq!(
        matched(source, &findings[0]),
        "zf.getEntry(zf.getEntry(name).getName())"
    );
    assert_eq!(matched(source, &findings[1]), "zf.getEntry(name)");
    Ok(())
}

#[test]
fn test_jar_types_match_as_subtypes() -> anyhow::Result<()> {
    let source = r#"import java.util.jar.JarEntry;
import java.util.jar.JarInputStream;

class A {
    void m(JarInputStream jis) throws Exception {
        JarEntry je;
        jis.getNextJarEntry();
    }
}
"#;
    let findings = scan_source("A.java", source)?;
    assert_eq!(findings.len(), 2);
    assert_eq!(matched(source, &findings[0]), "JarEntry je");
    assert_eq!(matched(source, &findings[1]), "jis.getNextJarEntry()");
    Ok(())
}

#[test]
fn test_commons_compress_types_match() -> anyhow::Result<()> {
    let source = r#"import org.apache.commons.compress.archivers.ArchiveEntry;
import org.apache.commons.compress.archivers.ArchiveInputStream;

class A {
    void m(ArchiveInputStream in, ArchiveEntry pending) throws Exception {
        in.getNextEntry();
    }
}
"#;
    let findings = scan_source("A.java", source)?;
    // The ArchiveEntry parameter is an uninitialized declaration; the
    // stream parameter is not an entry type.
    assert_eq!(findings.len(), 2);
    assert_eq!(matched(source, &findings[0]), "ArchiveEntry pending");
    assert_eq!(matched(source, &findings[1]), "in.getNextEntry()");
    Ok(())
}

#[test]
fn test_tar_entry_calls_match() -> anyhow::Result<()> {
    let source = r#"import org.apache.commons.compress.archivers.tar.TarArchiveInputStream;

class A {
    void m(TarArchiveInputStream tin) throws Exception {
        tin.getNextTarEntry();
    }
}
"#;
    let findings = scan_source("A.java", source)?;
    assert_eq!(findings.len(), 1);
    assert_eq!(matched(source, &findings[0]), "tin.getNextTarEntry()");
    Ok(())
}

#[test]
fn test_user_defined_subtype_is_sensitive() -> anyhow::Result<()> {
    let source = r#"import java.util.zip.ZipEntry;

class CustomEntry extends ZipEntry {
    CustomEntry(String name) {
        super(name);
    }
}

class A {
    void m() {
        CustomEntry entry;
    }
}
"#;
    let findings = scan_source("A.java", source)?;
    assert_eq!(findings.len(), 1);
    assert_eq!(matched(source, &findings[0]), "CustomEntry entry");
    Ok(())
}

#[test]
fn test_unrelated_code_reports_nothing() -> anyhow::Result<()> {
    let source = r#"import java.util.List;

class Plain {
    void m(List<String> names) {
        String s;
        int count = names.size();
        s = names.get(0);
    }
}
"#;
    let findings = scan_source("Plain.java", source)?;
    assert!(findings.is_empty());
    Ok(())
}

#[test]
fn test_missing_semantic_model_skips_the_file() -> anyhow::Result<()> {
    let source = r#"import java.util.zip.ZipEntry;

class A {
    void m() {
        ZipEntry entry;
    }
}
"#;
    let mut parser = JavaParser::new()?;
    let file = parser
        .parse_source(None, source)?
        .without_semantic_model();

    let mut collector = FindingCollector::new();
    ArchiveEntryCheck::new().scan(&file, &mut collector);
    assert!(collector.is_empty());
    Ok(())
}

#[test]
fn test_scanning_twice_is_deterministic() -> anyhow::Result<()> {
    let source = r#"import java.util.zip.ZipEntry;
import java.util.zip.ZipInputStream;

class A {
    void m(ZipInputStream zis) throws Exception {
        ZipEntry a;
        ZipEntry b = zis.getNextEntry();
        zis.getNextEntry();
    }
}
"#;
    let first = scan_source("A.java", source)?;
    let second = scan_source("A.java", source)?;
    assert_eq!(first, second);
    assert_eq!(first.len(), 3);

    // Source order: declaration, then the two calls line by line.
    let lines: Vec<usize> = first.iter().map(|f| f.span.start_line).collect();
    assert_eq!(lines, vec![6, 7, 8]);
    Ok(())
}
