/// Short function words that are shown together with the word that follows them
const GROUP_WORDS: [&str; 32] = [
    "a", "an", "the", "of", "to", "in", "on", "at", "by", "for", "with", "and", "or", "but", "my",
    "your", "his", "her", "its", "our", "their", "this", "that", "these", "those", "some", "any",
    "each", "every", "no", "one", "two",
];

/// Punctuation that closes a clause when it ends a word
const CLAUSE_TERMINATORS: [char; 6] = [',', ';', ':', '.', '!', '?'];

pub(crate) fn is_group_word(word: &str) -> bool {
    let lowered = word.to_lowercase();
    GROUP_WORDS.contains(&lowered.as_str())
}

fn closes_clause(word: &str) -> bool {
    word.ends_with(CLAUSE_TERMINATORS)
}

/// Split text into caption-sized chunks
///
/// Words are first cut into clauses at trailing punctuation, then inside each
/// clause a function word is joined with the word after it. Every resulting
/// one- or two-word unit becomes a chunk. Joining the chunks with single spaces
/// gives back the original words in order.
pub fn chunk_text(text: &str) -> Vec<String> {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return Vec::new();
    }

    split_clauses(&words)
        .into_iter()
        .flat_map(group_words)
        .collect()
}

/// Cut a word list after every word that ends in clause punctuation
fn split_clauses<'a>(words: &[&'a str]) -> Vec<Vec<&'a str>> {
    let mut clauses = Vec::new();
    let mut current = Vec::new();

    for &word in words {
        current.push(word);
        if closes_clause(word) {
            clauses.push(std::mem::take(&mut current));
        }
    }

    if !current.is_empty() {
        clauses.push(current);
    }

    clauses
}

/// Join each function word with its successor inside one clause
fn group_words(clause: Vec<&str>) -> Vec<String> {
    let mut units = Vec::with_capacity(clause.len());
    let mut i = 0;

    while i < clause.len() {
        let word = clause[i];
        if is_group_word(word) && i + 1 < clause.len() {
            units.push(format!("{} {}", word, clause[i + 1]));
            i += 2;
        } else {
            units.push(word.to_string());
            i += 1;
        }
    }

    units
}
