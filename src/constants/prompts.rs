pub const ANSWER_SYSTEM_PROMPT_GENERIC: &str =
    "You are a professional who provides correct explanations for exam candidates.";

pub const SUMMARY_SYSTEM_PROMPT: &str = "You are a professional content summarizer who creates concise summaries of community discussions.";

pub const NO_DISCUSSIONS_SUMMARY: &str = "No community discussions available for this question.";

pub const NOT_SPECIFIED_ANSWER: &str = "Not specified";

/// Closes the question block opened by the answer prompt header.
pub const ANSWER_PROMPT_DELIMITER: &str = "---";

/// JSON schema name sent with structured answer requests.
pub const ANSWER_SCHEMA_NAME: &str = "correct_answers";

pub fn answer_system_prompt(course_name: Option<&str>) -> String {
    match course_name.map(str::trim).filter(|name| !name.is_empty()) {
        Some(name) => format!(
            "You are a professional who provides correct explanations for candidates of the exam named \"{}\".",
            name
        ),
        None => ANSWER_SYSTEM_PROMPT_GENERIC.to_string(),
    }
}

pub fn answer_prompt_header(answer_num: u32) -> String {
    let options = if answer_num == 1 { "option" } else { "options" };
    format!(
        "For the question and choices below, identify exactly {answer_num} correct {options} and explain why each option is correct or incorrect.
Images referenced by the question or the choices are attached at the position where they appear.
Return `correct_indexes` as zero-based indexes of the correct options (option A is 0, option B is 1, and so on), containing exactly {answer_num} {entries}.
Return `explanations` with exactly one entry per option, in option order, each stating whether the option is correct or incorrect and why.
{ANSWER_PROMPT_DELIMITER}
",
        entries = if answer_num == 1 { "entry" } else { "entries" },
    )
}

pub fn discussion_summary_prompt(discussion_content: &str) -> String {
    format!(
        "Please create a concise summary (approximately 200 characters) of the following community discussions about an exam question. Focus on the main points, popular opinions (based on upvotes), and the general consensus on answer choices.

Community Discussions:
{discussion_content}

Please provide a summary that captures:
1. The overall sentiment and main discussion points
2. Popular answer choices mentioned by users
3. Key insights or concerns raised by the community

Summary (approximately 200 characters):"
    )
}
