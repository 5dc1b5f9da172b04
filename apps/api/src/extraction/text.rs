//! Raw text from `.txt`, `.pdf` and `.docx` files.

use std::io::{Cursor, Read};
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;
use zip::ZipArchive;

use crate::errors::ExtractionError;

/// File extensions accepted as résumé sources.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["pdf", "docx", "txt"];

pub fn is_supported(path: &Path) -> bool {
    extension(path).is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
}

/// Text of the document at `path`, or an empty string on any failure.
///
/// Failures are logged, never raised.
pub fn extract_text(path: &Path) -> String {
    match try_extract_text(path) {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(path = %path.display(), "Text extraction failed: {e}");
            String::new()
        }
    }
}

/// Text of the document at `path` with the failure reason preserved.
pub fn try_extract_text(path: &Path) -> Result<String, ExtractionError> {
    if !path.is_file() {
        return Err(ExtractionError::NotFound(path.display().to_string()));
    }

    let text = match extension(path).as_deref() {
        Some("txt") => {
            let bytes = std::fs::read(path)?;
            String::from_utf8_lossy(&bytes).into_owned()
        }
        Some("pdf") => {
            let bytes = std::fs::read(path)?;
            // Malformed PDFs can panic inside the parser.
            std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(&bytes))
                .map_err(|_| ExtractionError::Pdf("parser panicked".to_string()))?
                .map_err(|e| ExtractionError::Pdf(e.to_string()))?
        }
        Some("docx") => {
            let bytes = std::fs::read(path)?;
            docx_text(&bytes)?
        }
        _ => {
            return Err(ExtractionError::UnsupportedFormat(
                path.display().to_string(),
            ))
        }
    };

    tracing::debug!(path = %path.display(), chars = text.len(), "Extracted document text");
    Ok(text)
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
}

/// Paragraph text from `word/document.xml`, one paragraph per line.
pub(crate) fn docx_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    let mut archive =
        ZipArchive::new(Cursor::new(bytes)).map_err(|e| ExtractionError::Docx(e.to_string()))?;

    let xml = {
        let mut file = archive
            .by_name("word/document.xml")
            .map_err(|e| ExtractionError::Docx(format!("missing document.xml: {e}")))?;
        let mut content = String::new();
        file.read_to_string(&mut content)?;
        content
    };

    let mut reader = Reader::from_str(&xml);
    let mut buf = Vec::new();
    let mut text = String::new();
    let mut in_text = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                if e.local_name().as_ref() == b"t" {
                    in_text = true;
                }
            }
            Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                b"t" => in_text = false,
                b"p" => text.push('\n'),
                _ => {}
            },
            Ok(Event::Empty(ref e)) => match e.local_name().as_ref() {
                b"tab" => text.push('\t'),
                b"br" | b"cr" => text.push('\n'),
                _ => {}
            },
            Ok(Event::Text(e)) => {
                if in_text {
                    text.push_str(&e.unescape().unwrap_or_default());
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ExtractionError::Docx(format!("XML parse error: {e}"))),
            _ => {}
        }
        buf.clear();
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use zip::write::SimpleFileOptions;

    use super::*;

    fn docx_bytes(document_xml: &str) -> Vec<u8> {
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut zip = zip::ZipWriter::new(&mut cursor);
            zip.start_file("word/document.xml", SimpleFileOptions::default())
                .unwrap();
            zip.write_all(document_xml.as_bytes()).unwrap();
            zip.finish().unwrap();
        }
        cursor.into_inner()
    }

    #[test]
    fn test_docx_paragraphs_tabs_and_breaks() {
        let xml = r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>
            <w:p><w:r><w:t>Jane </w:t></w:r><w:r><w:t>Doe</w:t></w:r></w:p>
            <w:p><w:r><w:t>Skills</w:t><w:tab/><w:t>Rust &amp; Go</w:t><w:br/><w:t>SQL</w:t></w:r></w:p>
        </w:body></w:document>"#;
        let text = docx_text(&docx_bytes(xml)).unwrap();
        assert!(text.contains("Jane Doe\n"));
        assert!(text.contains("Skills\tRust & Go\nSQL\n"));
    }

    #[test]
    fn test_docx_without_document_xml_fails() {
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut zip = zip::ZipWriter::new(&mut cursor);
            zip.start_file("other.xml", SimpleFileOptions::default()).unwrap();
            zip.write_all(b"<x/>").unwrap();
            zip.finish().unwrap();
        }
        let err = docx_text(&cursor.into_inner()).unwrap_err();
        assert!(matches!(err, ExtractionError::Docx(_)));
    }

    #[test]
    fn test_txt_is_read_lossily() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cv.txt");
        std::fs::write(&path, b"Jane Doe\n\xffPython").unwrap();
        let text = try_extract_text(&path).unwrap();
        assert!(text.starts_with("Jane Doe\n"));
        assert!(text.ends_with("Python"));
    }

    #[test]
    fn test_unsupported_and_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let odt = dir.path().join("cv.odt");
        std::fs::write(&odt, "text").unwrap();
        assert!(matches!(
            try_extract_text(&odt),
            Err(ExtractionError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            try_extract_text(&dir.path().join("absent.pdf")),
            Err(ExtractionError::NotFound(_))
        ));
        assert_eq!(extract_text(&odt), "");
    }

    #[test]
    fn test_supported_extension_check_is_case_insensitive() {
        assert!(is_supported(Path::new("CV.PDF")));
        assert!(is_supported(Path::new("cv.docx")));
        assert!(!is_supported(Path::new("cv.rtf")));
        assert!(!is_supported(Path::new("README")));
    }
}
