//! Prompt templates for each response contract

use flavorgraph_core::limits::MAX_RESPONSE_INGREDIENTS;
use flavorgraph_core::Node;

/// Ask for up to three ingredient names separated by `|`
pub fn pipe_list_prompt(query: &str, hints: &[String]) -> String {
    let mut prompt = format!(
        "You are a flavor pairing expert. Answer the question below with at most \
         {} ingredient names separated by \"|\" and nothing else. No numbering, \
         no explanations.\n",
        MAX_RESPONSE_INGREDIENTS
    );

    if !hints.is_empty() {
        prompt.push_str("\nPrefer these classic pairings when they fit:\n");
        for hint in hints {
            prompt.push_str("- ");
            prompt.push_str(hint);
            prompt.push('\n');
        }
    }

    prompt.push_str("\nQuestion: ");
    prompt.push_str(query.trim());
    prompt.push('\n');
    prompt
}

/// Ask an agent for one dataset node as a JSON object
pub fn json_object_prompt(query: &str, hints: &[String]) -> String {
    let mut prompt = String::from(
        "Look up the flavor pairing dataset in this repository and pick the single \
         ingredient node that best answers the question below. Reply with one JSON \
         object of the form {\"id\": \"...\", \"name\": \"...\", \"category\": \"...\"} \
         using the node's id and name exactly as they appear in the dataset. \
         Do not modify any files.\n",
    );

    if !hints.is_empty() {
        prompt.push_str("\nHighly recommended pairings in the dataset include:\n");
        for hint in hints {
            prompt.push_str("- ");
            prompt.push_str(hint);
            prompt.push('\n');
        }
    }

    prompt.push_str("\nQuestion: ");
    prompt.push_str(query.trim());
    prompt.push('\n');
    prompt
}

/// Ask the provider to choose one of `candidates` for an unmatched answer
pub fn pick_prompt(query: &str, answer: &str, candidates: &[&Node]) -> String {
    let mut prompt = format!(
        "The question was: {}\nThe previous answer was: {}\n\n\
         That answer does not name a known ingredient. Pick the one ingredient \
         from this list that best answers the question. Reply with its id only, \
         or NONE if nothing fits.\n\n",
        query.trim(),
        answer.trim()
    );

    for node in candidates {
        prompt.push_str(&format!("- {}: {}\n", node.id, node.name));
    }
    prompt
}
