//! Static lookup tables for the rule-based extractors.
//!
//! Every table is checked in declaration order, so the order here is part of
//! the observable behaviour (result ordering and section tie-breaks).

/// Technical skills recognised by a case-insensitive substring scan.
pub const TECHNICAL_SKILLS: &[&str] = &[
    "Python",
    "JavaScript",
    "Java",
    "C++",
    "C#",
    "PHP",
    "Ruby",
    "Go",
    "Rust",
    "React",
    "Angular",
    "Vue",
    "Node.js",
    "Django",
    "Flask",
    "Spring",
    "MySQL",
    "PostgreSQL",
    "MongoDB",
    "Redis",
    "AWS",
    "Azure",
    "GCP",
    "Docker",
    "Kubernetes",
    "Git",
    "Linux",
    "Agile",
    "Scrum",
];

/// Locations recognised by a case-insensitive substring scan.
pub const LOCATIONS: &[&str] = &[
    "San Francisco",
    "New York",
    "London",
    "Berlin",
    "Paris",
    "Tokyo",
    "California",
    "Texas",
    "Florida",
    "Washington",
    "Massachusetts",
];

/// Section name → heading keywords. A line containing any keyword (after
/// lower-casing and trimming) opens that section; the first entry wins.
pub const SECTION_KEYWORDS: &[(&str, &[&str])] = &[
    ("summary", &["summary", "objective", "profile"]),
    ("experience", &["experience", "work history", "employment"]),
    ("education", &["education", "academic", "degree"]),
    ("skills", &["skills", "competencies", "technologies"]),
    ("certifications", &["certifications", "certificates"]),
    ("projects", &["projects", "portfolio"]),
    ("languages", &["languages", "language skills"]),
];

/// Returns every vocabulary term contained in `text`, in table order.
pub fn scan_vocabulary(text: &str, vocabulary: &[&str]) -> Vec<String> {
    let text_lower = text.to_lowercase();
    vocabulary
        .iter()
        .filter(|term| text_lower.contains(&term.to_lowercase()))
        .map(|term| term.to_string())
        .collect()
}
