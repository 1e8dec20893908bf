//! Prompt templates and canned question content.
//!
//! Templates carry `{placeholder}` markers filled with `str::replace` just
//! before the request goes out.

/// System role sent with every question.
pub const QA_SYSTEM_PROMPT: &str = "You are an expert career coach and resume analyst.";

/// Grounded question prompt. Fill `{context}` with the retrieved chunks and
/// `{question}` with the user's question.
///
/// The wording constrains the model to the supplied excerpts and tells it
/// exactly what to say when the context has no answer. Grounding is a
/// contract on the prompt text, not something the service can enforce.
pub const QA_PROMPT_TEMPLATE: &str = r#"Use ONLY the following context from the resume to answer the question.
If the information is not in the context provided, say "I don't see that information in the resume."
Do not make up or assume information that isn't explicitly in the resume.

Be specific and actionable in your feedback.
Reference specific sections, skills, or experiences from the resume when relevant.

Context from resume:
{context}

Question: {question}

Detailed Answer:"#;

/// Ungrounded comparison prompt, used when a caller asks for the baseline
/// answer alongside the grounded one. Fill `{question}`.
pub const BASELINE_PROMPT_TEMPLATE: &str = r#"Answer this question about a resume: {question}

Note: You don't have access to the actual resume content.
Answer as best you can based on general knowledge only."#;

/// Starter questions surfaced to clients that want to offer one-click asks.
pub const SUGGESTED_QUESTIONS: [&str; 10] = [
    "What are my strongest technical skills?",
    "What skills am I missing for a Machine Learning Engineer role?",
    "How strong is my work experience section?",
    "What projects do I have and how impressive are they?",
    "What should I improve to be more competitive for Data Science roles?",
    "How does my education background support my target roles?",
    "What keywords am I missing that recruiters look for?",
    "What is my biggest weakness as a candidate based on this resume?",
    "What roles am I best qualified for right now?",
    "Write me a 3-sentence professional summary based on this resume",
];
