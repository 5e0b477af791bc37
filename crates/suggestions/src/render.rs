use crate::WordSuggestion;

pub const MAX_RENDERED_EXAMPLES: usize = 3;

/// Text block describing one word, examples capped at [`MAX_RENDERED_EXAMPLES`].
pub fn render(word: &WordSuggestion) -> String {
    let mut lines = vec![
        format!("{} ({})", word.word, word.word_class),
        format!("    variations: {}", word.variations.join(", ")),
    ];
    lines.extend(
        word.definitions
            .iter()
            .enumerate()
            .map(|(index, definition)| format!("    {}. {definition}", index + 1)),
    );
    lines.push("    Examples".to_owned());
    if word.examples.is_empty() {
        lines.push("        No examples".to_owned());
    }
    for example in word.examples.iter().take(MAX_RENDERED_EXAMPLES) {
        lines.push(format!("        {}", example.igbo));
        lines.push(format!("          {}", example.english));
    }
    let mut out = lines.join("\n");
    out.push('\n');
    out
}
