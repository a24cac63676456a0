// CV pipeline prompt templates.
// Placeholders are substituted with str::replace before sending.

pub const PROFILE_EXTRACT_SYSTEM: &str = "\
You are a precise résumé data extractor. \
Turn raw CV text into a structured JSON profile.";

/// Replace `{raw_text}` before sending.
pub const PROFILE_EXTRACT_PROMPT: &str = r#"Parse the following CV text into a structured JSON object.

CV TEXT:
{raw_text}

OUTPUT SCHEMA (return exactly this structure):
{
  "full_name": "string" | null,
  "email": "string" | null,
  "phone": "string" | null,
  "location": "string" | null,
  "headline": "string" | null,        // current job title or headline
  "summary": "string" | null,         // professional summary
  "work_experience": [{"company": "string", "title": "string", "start_date": "string", "end_date": "string" | null, "description": "string"}],
  "education": [{"institution": "string", "degree": "string", "field": "string", "start_date": "string", "end_date": "string" | null}],
  "skills": {"technical": ["string"], "soft": ["string"]},
  "certifications": ["string"],
  "projects": [{"name": "string", "description": "string", "technologies": ["string"], "url": "string" | null}],
  "languages": ["string"],
  "achievements": ["string"]
}

RULES:
1. "skills" MUST contain both "technical" and "soft" keys, even if empty.
2. certifications, languages and achievements are plain strings, not objects.
3. Keep entries in the order they appear in the CV.
4. Return ONLY the JSON object, nothing else, no code fences."#;

pub const FEEDBACK_SYSTEM: &str = "\
You are an experienced recruiter reviewing parsed CVs. \
Assess completeness and quality and give concrete, actionable advice.";

/// Replace `{text_length}`, `{word_count}`, `{statistics_json}` and
/// `{profile_json}` before sending.
pub const FEEDBACK_PROMPT: &str = r#"Analyze this parsed CV and provide feedback.

ORIGINAL TEXT LENGTH: {text_length} characters, {word_count} words

RULE-BASED STATISTICS:
{statistics_json}

PARSED CV DATA:
{profile_json}

OUTPUT SCHEMA (return exactly this structure):
{
  "score": integer,                   // 0-100 overall quality score
  "confidence": number,               // 0.0-1.0 confidence in this analysis
  "summary": {"key": "value"},        // key statistics about the CV
  "extracted_fields": {"field": true},// which profile fields were successfully extracted
  "missing_fields": ["string"],       // important information that is absent
  "suggestions": ["string"],          // improvement recommendations, most important first
  "statistics": {"key": number}       // detailed metrics; include "wordCount" and "textLength"
}

Return ONLY the JSON object, nothing else, no code fences."#;
