use std::collections::HashMap;

use leon::Template;

use crate::error::Result;

pub const SYSTEM_PROMPT: &str = "\
You are an assistant for a developer who wants to find the right API call for a specific task.
The developer has bash history that contains the command they used to perform a task.
Synthesize their bash history to provide the API call prediction model with extra context about the task.
For reference, the API call prediction model, called Gorilla, is trained on a large dataset of API calls and their associated tasks.
You may see the developer's previous operations with the API calling tool in their bash history.
Use the previous bash history as well as their query to provide the model with a short paragraph of possible relevant context.
There is a chance that their query has nothing to do with the bash history, so in that case, return 'No relevant context found'.
";

pub const USER_PROMPT_TEMPLATE: &str = "\
The user's bash history is:
{history}

The user's previous operations with the API calling tool are:
{tool_history}

The query of the user is:
{query}

Use this information to provide the model with a short paragraph of possible relevant context.
";

/// Fills the user prompt. Values are inserted verbatim, braces included.
pub fn render_user_prompt(history: &str, tool_history: &str, query: &str) -> Result<String> {
    let template = Template::parse(USER_PROMPT_TEMPLATE)?;

    let context: HashMap<String, String> = [
        ("history", history),
        ("tool_history", tool_history),
        ("query", query),
    ]
    .into_iter()
    .map(|(key, value)| (key.to_string(), value.to_string()))
    .collect();

    Ok(template.render(&context)?)
}
