//! Document extraction: a file on disk becomes plain text for the classifier.
//!
//! Dispatch is purely on the lowercase file extension. Reading is the only
//! side effect, so extraction is idempotent and safe to repeat. The caller
//! handles failures per document; nothing here aborts a batch.

use std::fs;
use std::path::Path;

use docx_rs::{
    read_docx, DocumentChild, Paragraph, ParagraphChild, Run, RunChild, Table, TableCellContent,
    TableChild, TableRowChild,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    /// Extension this pipeline does not handle. Carries the lowercased
    /// extension, empty when the file has none.
    #[error("unsupported file format: .{extension}")]
    UnsupportedFormat { extension: String },

    #[error("failed to read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF text extraction failed: {0}")]
    Pdf(#[from] pdf_extract::OutputError),

    #[error("DOCX text extraction failed: {0}")]
    Docx(#[from] docx_rs::ReaderError),
}

/// Converts a source document into plain text.
///
/// - `.txt`: read verbatim as UTF-8.
/// - `.docx`: visible text content only; no formatting, headers/footers or
///   embedded objects.
/// - `.pdf`: embedded text layer only, no OCR. Image-only PDFs come back
///   empty or garbled without an error from this layer.
/// - anything else: [`ExtractError::UnsupportedFormat`].
pub fn extract_text(path: &Path) -> Result<String, ExtractError> {
    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "txt" => Ok(fs::read_to_string(path)?),
        "docx" => extract_docx(path),
        "pdf" => Ok(pdf_extract::extract_text(path)?),
        _ => Err(ExtractError::UnsupportedFormat { extension }),
    }
}

/// Walks the DOCX body and collects visible run text, one line per
/// paragraph. Table cells contribute their paragraphs as lines too.
fn extract_docx(path: &Path) -> Result<String, ExtractError> {
    let bytes = fs::read(path)?;
    let docx = read_docx(&bytes)?;

    let mut lines: Vec<String> = Vec::new();
    for child in &docx.document.children {
        match child {
            DocumentChild::Paragraph(p) => lines.push(paragraph_text(p)),
            DocumentChild::Table(t) => collect_table_text(t, &mut lines),
            _ => {}
        }
    }

    Ok(lines.join("\n"))
}

fn paragraph_text(paragraph: &Paragraph) -> String {
    let mut text = String::new();
    collect_paragraph_children(&paragraph.children, &mut text);
    text
}

fn collect_paragraph_children(children: &[ParagraphChild], out: &mut String) {
    for child in children {
        match child {
            ParagraphChild::Run(run) => collect_run_text(run, out),
            // Hyperlink display text is visible content (mail addresses, URLs).
            ParagraphChild::Hyperlink(link) => collect_paragraph_children(&link.children, out),
            _ => {}
        }
    }
}

fn collect_run_text(run: &Run, out: &mut String) {
    for child in &run.children {
        match child {
            RunChild::Text(t) => out.push_str(&t.text),
            RunChild::Tab(_) => out.push('\t'),
            RunChild::Break(_) => out.push('\n'),
            _ => {}
        }
    }
}

fn collect_table_text(table: &Table, lines: &mut Vec<String>) {
    for row in &table.rows {
        match row {
            TableChild::TableRow(row) => {
                for cell in &row.cells {
                    match cell {
                        TableRowChild::TableCell(cell) => {
                            for content in &cell.children {
                                if let TableCellContent::Paragraph(p) = content {
                                    lines.push(paragraph_text(p));
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Assembles a minimal single-page PDF around `text`: one Helvetica
/// text-showing operator and a hand-computed xref table. `text` must not
/// contain PDF string delimiters (parentheses, backslash); nothing is
/// escaped.
#[cfg(test)]
pub(crate) fn minimal_pdf(text: &str) -> String {
    let content = format!("BT /F1 12 Tf 72 720 Td ({text}) Tj ET");
    let objects = [
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
        "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
         /Resources << /Font << /F1 4 0 R >> >> /Contents 5 0 R >>"
            .to_string(),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string(),
        format!(
            "<< /Length {} >>\nstream\n{}\nendstream",
            content.len(),
            content
        ),
    ];

    let mut pdf = String::from("%PDF-1.4\n");
    let mut offsets = Vec::new();
    for (i, object) in objects.iter().enumerate() {
        offsets.push(pdf.len());
        pdf.push_str(&format!("{} 0 obj\n{object}\nendobj\n", i + 1));
    }

    let xref_start = pdf.len();
    pdf.push_str(&format!("xref\n0 {}\n", objects.len() + 1));
    pdf.push_str("0000000000 65535 f \n");
    for offset in &offsets {
        pdf.push_str(&format!("{offset:010} 00000 n \n"));
    }
    pdf.push_str(&format!(
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_start}\n%%EOF",
        objects.len() + 1
    ));

    pdf
}

#[cfg(test)]
mod tests {
    use super::*;
    use docx_rs::{Docx, TableCell, TableRow};
    use std::path::PathBuf;

    fn write_txt(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    fn write_docx(dir: &Path, name: &str, paragraphs: &[&str]) -> PathBuf {
        let path = dir.join(name);
        let file = fs::File::create(&path).unwrap();
        let mut docx = Docx::new();
        for text in paragraphs {
            docx = docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(*text)));
        }
        docx.build().pack(file).unwrap();
        path
    }

    #[test]
    fn test_txt_is_read_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_txt(dir.path(), "ada.txt", "Ada Lovelace\nRust, 12 years\n");

        let text = extract_text(&path).unwrap();
        assert_eq!(text, "Ada Lovelace\nRust, 12 years\n");
    }

    #[test]
    fn test_extension_dispatch_is_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_txt(dir.path(), "ADA.TXT", "shouting resume");

        let text = extract_text(&path).unwrap();
        assert_eq!(text, "shouting resume");
    }

    #[test]
    fn test_docx_paragraphs_become_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_docx(
            dir.path(),
            "grace.docx",
            &["Grace Hopper", "Compilers and COBOL"],
        );

        let text = extract_text(&path).unwrap();
        assert_eq!(text, "Grace Hopper\nCompilers and COBOL");
    }

    #[test]
    fn test_docx_table_cells_are_extracted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("skills.docx");
        let file = fs::File::create(&path).unwrap();

        let cell = TableCell::new()
            .add_paragraph(Paragraph::new().add_run(Run::new().add_text("Rust")));
        Docx::new()
            .add_paragraph(Paragraph::new().add_run(Run::new().add_text("Skills")))
            .add_table(Table::new(vec![TableRow::new(vec![cell])]))
            .build()
            .pack(file)
            .unwrap();

        let text = extract_text(&path).unwrap();
        assert!(text.contains("Skills"));
        assert!(text.contains("Rust"));
    }

    #[test]
    fn test_pdf_text_layer_is_extracted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ada.pdf");
        fs::write(&path, minimal_pdf("Ada Lovelace wrote the first program")).unwrap();

        let text = extract_text(&path).unwrap();
        assert!(text.contains("Ada Lovelace"));
    }

    #[test]
    fn test_unsupported_extension_is_identified() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_txt(dir.path(), "chart.xlsx", "not really a spreadsheet");

        let err = extract_text(&path).unwrap_err();
        match err {
            ExtractError::UnsupportedFormat { extension } => assert_eq!(extension, "xlsx"),
            other => panic!("expected UnsupportedFormat, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_extension_is_unsupported() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_txt(dir.path(), "README", "no extension here");

        assert!(matches!(
            extract_text(&path),
            Err(ExtractError::UnsupportedFormat { extension }) if extension.is_empty()
        ));
    }

    #[test]
    fn test_corrupt_pdf_errors_without_panicking() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_txt(dir.path(), "broken.pdf", "this is not a pdf at all");

        assert!(matches!(extract_text(&path), Err(ExtractError::Pdf(_))));
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let err = extract_text(Path::new("ghost.txt")).unwrap_err();
        assert!(matches!(err, ExtractError::Io(_)));
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_docx(dir.path(), "stable.docx", &["same text every time"]);

        let first = extract_text(&path).unwrap();
        let second = extract_text(&path).unwrap();
        assert_eq!(first, second);
    }
}
