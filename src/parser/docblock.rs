// Docblock parsing
//
// Extracts one-line summaries and `@param` descriptions from `/** ... */`
// comments. Malformed input yields None, never an error.

/// Strip the comment delimiters and leading ` * ` margins, returning the
/// logical lines of a docblock.
pub(crate) fn logical_lines(doc: &str) -> Vec<String> {
    let trimmed = doc.trim();
    let inner = trimmed
        .strip_prefix("/**")
        .unwrap_or(trimmed)
        .strip_suffix("*/")
        .unwrap_or(trimmed);

    inner
        .lines()
        .map(|line| {
            let line = line.trim_start();
            let line = line.strip_prefix('*').unwrap_or(line);
            line.trim().to_string()
        })
        .collect()
}

/// The summary is the first paragraph: lines up to a blank line or the
/// first tag, joined with single spaces.
pub fn summary(doc: &str) -> Option<String> {
    let mut parts = Vec::new();

    for line in logical_lines(doc) {
        if line.is_empty() {
            if parts.is_empty() {
                continue;
            }
            break;
        }
        if line.starts_with('@') {
            break;
        }
        parts.push(line);
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}

/// Locate the description of `@param ... $name` inside a docblock.
/// Continuation lines up to the next tag or blank line are appended.
pub fn param_description(doc: &str, name: &str) -> Option<String> {
    let lines = logical_lines(doc);
    let variable = format!("${}", name);
    let mut i = 0;

    while i < lines.len() {
        let line = &lines[i];
        i += 1;

        if !line.starts_with("@param") {
            continue;
        }

        let mut words = line.split_whitespace().skip(1).peekable();
        let mut matched = false;
        for word in words.by_ref() {
            if word == variable {
                matched = true;
                break;
            }
            // the type expression precedes the variable; anything else
            // means a differently-shaped tag
            if word.starts_with('$') {
                break;
            }
        }
        if !matched {
            continue;
        }

        let mut description: Vec<String> = words.map(str::to_string).collect();
        while i < lines.len() {
            let cont = &lines[i];
            if cont.is_empty() || cont.starts_with('@') {
                break;
            }
            description.push(cont.clone());
            i += 1;
        }

        let text = description.join(" ").trim().to_string();
        return if text.is_empty() { None } else { Some(text) };
    }

    None
}
