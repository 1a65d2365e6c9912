// Resume analysis prompt templates.
// `{resume_text}` is replaced with the user's pasted resume.

pub const SKILL_EXTRACTION_SYSTEM: &str = "\
You are a resume reviewer who extracts skills exactly as evidenced by the text. \
Never invent skills the resume does not mention or clearly demonstrate. \
Respond with valid JSON only.";

pub const SKILL_EXTRACTION_PROMPT: &str = r#"Extract the skills from the resume below and sort them into technical and soft skills.

RESUME:
{resume_text}

OUTPUT SCHEMA (return exactly this structure):
{
  "technicalSkills": ["string"],
  "softSkills": ["string"]
}

Rules:
- Use the candidate's own wording for each skill, deduplicated.
- Tools, languages, frameworks and platforms are technical skills.
- Communication, leadership and collaboration traits are soft skills."#;

pub const ATS_ANALYSIS_SYSTEM: &str = "\
You are an applicant tracking system (ATS) compatibility auditor. \
Score how well a resume will survive automated parsing and keyword screening. \
Respond with valid JSON only.";

pub const ATS_ANALYSIS_PROMPT: &str = r#"Evaluate the resume below for ATS compatibility.

RESUME:
{resume_text}

OUTPUT SCHEMA (return exactly this structure):
{
  "score": 0-100 integer,
  "suggestions": ["string"]
}

Rules:
- Consider format compatibility, keyword coverage and section structure.
- Each suggestion is one concrete, actionable change.
- Return an empty suggestions list only if the score is 100."#;
