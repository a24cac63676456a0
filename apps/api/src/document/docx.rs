//! Plain-text extraction from OOXML word-processing documents.
//!
//! Walks the `docx-rs` tree: Document → Paragraph → Run → Text. One output
//! line per paragraph, including paragraphs inside table cells. Tabs and
//! breaks inside a run become `\t` and `\n`.

use docx_rs::{
    read_docx, DocumentChild, Paragraph, ParagraphChild, Run, RunChild, Table,
    TableCellContent, TableChild, TableRowChild,
};

use crate::document::{DocumentFormat, ExtractError};

pub fn extract_docx_text(bytes: &[u8], format: DocumentFormat) -> Result<String, ExtractError> {
    let docx = read_docx(bytes)
        .map_err(|e| ExtractError::decode(format, format!("not a readable OOXML document: {e:?}")))?;

    let mut text = String::new();
    for child in &docx.document.children {
        match child {
            DocumentChild::Paragraph(paragraph) => push_paragraph(&mut text, paragraph),
            DocumentChild::Table(table) => push_table(&mut text, table),
            _ => {}
        }
    }
    Ok(text)
}

fn push_paragraph(text: &mut String, paragraph: &Paragraph) {
    push_paragraph_children(text, &paragraph.children);
    text.push('\n');
}

fn push_paragraph_children(text: &mut String, children: &[ParagraphChild]) {
    for child in children {
        match child {
            ParagraphChild::Run(run) => push_run(text, run),
            // Hyperlinked runs carry contact details (email, LinkedIn).
            ParagraphChild::Hyperlink(link) => push_paragraph_children(text, &link.children),
            _ => {}
        }
    }
}

fn push_run(text: &mut String, run: &Run) {
    for child in &run.children {
        match child {
            RunChild::Text(t) => text.push_str(&t.text),
            RunChild::Tab(_) => text.push('\t'),
            RunChild::Break(_) => text.push('\n'),
            _ => {}
        }
    }
}

fn push_table(text: &mut String, table: &Table) {
    for row in &table.rows {
        let TableChild::TableRow(row) = row;
        for cell in &row.cells {
            let TableRowChild::TableCell(cell) = cell;
            for content in &cell.children {
                match content {
                    TableCellContent::Paragraph(paragraph) => push_paragraph(text, paragraph),
                    TableCellContent::Table(nested) => push_table(text, nested),
                    _ => {}
                }
            }
        }
    }
}
