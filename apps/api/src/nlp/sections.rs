use indexmap::IndexMap;

use crate::nlp::vocabulary::SECTION_KEYWORDS;

/// Section name → verbatim text block, in document order.
/// Sections that never appear are absent rather than empty.
pub type SectionMap = IndexMap<String, String>;

/// Splits résumé text into named sections using heading keywords.
///
/// A line whose lower-cased, trimmed content contains a keyword from
/// `SECTION_KEYWORDS` opens that section; the heading line itself is not part
/// of the block. Lines before the first heading are dropped. When a section
/// heading appears twice the later block replaces the earlier one but keeps
/// its original position.
pub fn extract_sections(text: &str) -> SectionMap {
    let mut sections = SectionMap::new();
    let mut current: Option<&'static str> = None;
    let mut buffer: Vec<&str> = Vec::new();

    for line in text.lines() {
        match match_section_heading(line) {
            Some(section) => {
                if let Some(name) = current {
                    sections.insert(name.to_string(), flush(&buffer));
                }
                current = Some(section);
                buffer.clear();
            }
            None => buffer.push(line),
        }
    }

    if let Some(name) = current {
        sections.insert(name.to_string(), flush(&buffer));
    }

    sections
}

/// Returns the first section (in table order) whose keyword appears in `line`.
fn match_section_heading(line: &str) -> Option<&'static str> {
    let line_lower = line.trim().to_lowercase();
    SECTION_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|kw| line_lower.contains(kw)))
        .map(|(name, _)| *name)
}

fn flush(lines: &[&str]) -> String {
    lines.join("\n").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_sections_in_order() {
        let sections = extract_sections("EXPERIENCE\nWorked at Acme\nEDUCATION\nBA from State U");
        let expected: Vec<(&str, &str)> = vec![
            ("experience", "Worked at Acme"),
            ("education", "BA from State U"),
        ];
        let actual: Vec<(&str, &str)> = sections
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_preamble_is_discarded() {
        let sections = extract_sections("Jane Doe\njane@example.com\nSummary\nBuilder of things");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections["summary"], "Builder of things");
    }

    #[test]
    fn test_no_headings_yields_empty_map() {
        assert!(extract_sections("just a name\nand a phone").is_empty());
        assert!(extract_sections("").is_empty());
    }

    #[test]
    fn test_multiline_block_is_trimmed_and_joined() {
        let sections = extract_sections("Skills\n\n  Rust\nGo  \n\nProjects\nA compiler\n");
        assert_eq!(sections["skills"], "Rust\nGo");
        assert_eq!(sections["projects"], "A compiler");
    }

    #[test]
    fn test_heading_matching_two_sections_uses_table_order() {
        // "Education & Experience" hits both tables; experience is declared first.
        let sections = extract_sections("Education & Experience\nMIT, then Acme");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections["experience"], "MIT, then Acme");
    }

    #[test]
    fn test_empty_section_is_present_with_empty_text() {
        let sections = extract_sections("Certifications\nLanguages\nEnglish, French");
        assert_eq!(sections["certifications"], "");
        assert_eq!(sections["languages"], "English, French");
    }

    #[test]
    fn test_repeated_heading_keeps_first_position_last_content() {
        let sections = extract_sections("Summary\nfirst\nProjects\np\nObjective\nsecond");
        let keys: Vec<&str> = sections.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["summary", "projects"]);
        assert_eq!(sections["summary"], "second");
    }

    #[test]
    fn test_crlf_lines_are_handled() {
        let sections = extract_sections("Experience\r\nAcme Corp\r\n");
        assert_eq!(sections["experience"], "Acme Corp");
    }
}
