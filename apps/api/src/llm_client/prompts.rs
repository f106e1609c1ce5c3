// Prompt constants for every model call the service makes.
// Placeholders use {name} syntax and are filled with str::replace at the
// call site. Keep the wording stable; clients parse the JSON these request.

/// Resume analysis prompt. Replace {resume_text} with the extracted resume.
pub const RESUME_ANALYZE_PROMPT: &str = r#"Analyze the following resume:

{resume_text}

Return strict JSON with:
- skills: extracted skills list
- rating: score from 1-10
- improvements: list of 3 suggestions
"#;

/// ATS comparison prompt. Replace {resume_text} and {jd}.
pub const ATS_CHECK_PROMPT: &str = r#"You are an ATS expert. Compare the resume with the job description.

Resume:
{resume_text}

Job Description:
{jd}

Return STRICT JSON with:
- atsScore (0-100)
- matchedKeywords (list)
- missingKeywords (list)
- summary (short paragraph)
"#;

/// System prompt for retrieval-augmented chat. Pins the model to the
/// retrieved context and gives it a fixed refusal line.
pub const RAG_CHAT_SYSTEM: &str = r#"Answer strictly from the document context.
If the information does not exist in the documents,
reply with: "I don't know based on the available documents."
"#;

/// User-prompt template for retrieval-augmented chat.
/// Replace {context} with the retrieved documents and {query} with the
/// user's question. An empty context block is left empty on purpose: the
/// system prompt then steers the model to the refusal line.
pub const QA_PROMPT_TEMPLATE: &str = r#"{query}

Context information is below, surrounded by ---------------------

---------------------
{context}
---------------------

Given the context information and no prior knowledge, answer the query.
"#;
