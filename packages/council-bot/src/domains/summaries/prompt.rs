/// Instruction sent with every agenda document.
pub fn summary_prompt(label: &str) -> String {
    format!(
        r#"You are summarizing a council meeting agenda for residents.

Write the summary like this:
- Start with one sentence of the form "The {label} met to discuss ..." naming the main topic.
- Then list the substantive agenda items as bullet points, one per line, each starting with "• ".
- Leave out procedural items such as apologies, attendance, conflict of interest declarations, confirmation of minutes and public comment.
- Do not comment on opening or closing formalities such as karakia, welcomes or the meeting closing.
- Use plain text only. Do not use bold, italics, headings or any other markdown.
- You may end with at most two hashtags relevant to the topics.

Keep each bullet short and factual."#
    )
}
