//! Prompt templates sent to the completion service.

use super::location::Location;

/// Prompt asking for a short, playful reply about a matched location.
pub fn location_prompt(location: &Location, college_name: &str) -> String {
    format!(
        "You are a witty and fun campus guide AI. Generate a creative, humorous, and engaging \
         response (max 2 sentences) for a student asking about the {name} at {college_name}.\n\
         Include these facts in a fun way:\n\
         - It's located in the {direction} part of campus\n\
         - Make a joke or pun related to the location's purpose\n\
         - Add relevant emojis\n\
         - Keep it friendly and playful\n\n\
         For example, if it's the canteen, joke about food or hunger. \
         If it's the library, joke about studying or books.",
        name = location.name(),
        direction = location.direction(),
    )
}

/// Prompt for open conversation that stays in the campus-guide persona.
pub fn conversation_prompt(query: &str, college_name: &str) -> String {
    format!(
        "You are a friendly campus guide for {college_name}. Answer the student's message in \
         at most 2 sentences, keep it playful, and nudge them to ask where a campus building \
         is if you cannot help.\n\nStudent: {query}"
    )
}
