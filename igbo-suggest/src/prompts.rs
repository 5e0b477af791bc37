use std::io;

use suggestions::form::WordForm;
use suggestions::{SuggestionUpdate, WordSuggestion};

use crate::utilities::{input, str_to_bool};

/// Walks through the form fields. A blank answer keeps the current value.
pub fn fill_form(mut form: WordForm) -> io::Result<WordForm> {
    if form.edited_id().is_some() {
        println!("The form is pre-filled because you are editing an existing word.");
    }
    form.word = ask("Word", &form.word)?;
    form.word_class = ask("Part of speech", &form.word_class)?;
    form.definitions = ask_list("definition", &form.definitions)?;
    form.variations = ask_list("variation", &form.variations)?;
    Ok(form)
}

pub fn fill_update(current: &WordSuggestion) -> io::Result<SuggestionUpdate> {
    let cleaned = fill_form(WordForm::editing(current))?.cleaned();
    Ok(SuggestionUpdate {
        word: cleaned.word,
        word_class: cleaned.word_class,
        definitions: cleaned.definitions,
        variations: Some(cleaned.variations),
        examples: None,
        original_word_id: None,
    })
}

fn ask(label: &str, current: &str) -> io::Result<String> {
    let prompt = if current.is_empty() {
        format!("{label}: ")
    } else {
        format!("{label} [{current}]: ")
    };
    let answer = input(&prompt)?.unwrap_or_default();
    let answer = answer.trim();
    Ok(if answer.is_empty() {
        current.to_owned()
    } else {
        answer.to_owned()
    })
}

fn ask_list(label: &str, current: &[String]) -> io::Result<Vec<String>> {
    if !current.is_empty() {
        println!("Current {label}s: {}", current.join("; "));
        let keep = input("Keep them? (Y/n): ")?
            .and_then(|answer| str_to_bool(&answer))
            .unwrap_or(true);
        if keep {
            return Ok(current.to_vec());
        }
    }
    println!("Enter one {label} per line, an empty line to finish.");
    let mut entries = Vec::new();
    loop {
        match input(&format!("{}. ", entries.len() + 1))? {
            Some(entry) if !entry.trim().is_empty() => entries.push(entry),
            _ => break,
        }
    }
    Ok(entries)
}
