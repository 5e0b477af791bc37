use std::io::{self, BufRead, Write};

/// Lowest Jaro similarity at which a word counts as a likely typo of another.
const SIMILARITY_THRESHOLD: f64 = 0.8;

/// Prompts on stdout and reads one answer. `None` once stdin is closed.
pub fn input(prompt: &str) -> io::Result<Option<String>> {
    print!("{prompt}");
    io::stdout().flush()?;
    read_answer(&mut io::stdin().lock())
}

fn read_answer<R: BufRead>(reader: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    let answer = line.trim_end_matches(['\r', '\n']).len();
    line.truncate(answer);
    Ok(Some(line))
}

pub fn str_to_bool(answer: &str) -> Option<bool> {
    match answer.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" | "yeah" | "yea" | "true" | "on" => Some(true),
        "n" | "no" | "nope" | "false" | "off" => Some(false),
        _ => None,
    }
}

/// The candidate most similar to `target`, if any is similar enough.
pub fn closest_word<'a, I>(candidates: I, target: &str) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let target = target.to_lowercase();
    candidates
        .into_iter()
        .map(|candidate| (candidate, strsim::jaro(&candidate.to_lowercase(), &target)))
        .filter(|(_, similarity)| *similarity >= SIMILARITY_THRESHOLD)
        .max_by(|(_, a), (_, b)| a.total_cmp(b))
        .map(|(candidate, _)| candidate)
}
