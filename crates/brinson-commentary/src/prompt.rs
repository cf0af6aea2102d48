//! Prompt construction for the commentary request.

/// Build the fixed commentary prompt around a rendered summary table.
///
/// The summary text is embedded verbatim; the template asks the service for
/// four sections (Overview, Top contributors, Largest detractors,
/// Conclusion). The service's adherence is best-effort and is not validated.
pub fn build_prompt(summary_text: &str) -> String {
    format!(
        "Write a clear, concise professional performance attribution commentary\n\
         based on this sector-level attribution summary:\n\
         \n\
         {summary_text}\n\
         \n\
         Structure the output with:\n\
         - Overview\n\
         - Top contributors\n\
         - Largest detractors\n\
         - Conclusion\n\
         \n\
         Keep it readable and suitable for an investment performance report.\n"
    )
}
