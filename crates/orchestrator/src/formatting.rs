//! Splitting long replies into platform-sized chunks.

/// Maximum length of one outbound message.
pub const MAX_MESSAGE_LEN: usize = 2000;

/// Marker prefixed (with a newline) to every continuation chunk.
pub const CONTINUATION_MARKER: &str = "*(continued)*";

/// Split `text` into chunks each at most [`MAX_MESSAGE_LEN`] characters.
///
/// Splits happen at line boundaries; every chunk after the first is prefixed
/// with [`CONTINUATION_MARKER`] and a newline. Joining the marker-stripped
/// chunks with `'\n'` reproduces the original text. A single line longer
/// than the chunk budget is hard-split at character boundaries so no chunk
/// can ever exceed the limit.
pub fn chunk_message(text: &str) -> Vec<String> {
    if text.len() <= MAX_MESSAGE_LEN {
        return vec![text.to_string()];
    }

    // Leave room for the marker and its newline on continuation chunks.
    let budget = MAX_MESSAGE_LEN - CONTINUATION_MARKER.len() - 1;

    let mut raw: Vec<String> = Vec::new();
    let mut current: Option<String> = None;

    for line in text.split('\n') {
        if line.len() > budget {
            if let Some(chunk) = current.take() {
                raw.push(chunk);
            }
            for piece in hard_split(line, budget) {
                raw.push(piece.to_string());
            }
            continue;
        }

        match current.as_mut() {
            None => current = Some(line.to_string()),
            Some(chunk) if chunk.len() + 1 + line.len() <= budget => {
                chunk.push('\n');
                chunk.push_str(line);
            }
            Some(_) => {
                raw.push(current.take().unwrap_or_default());
                current = Some(line.to_string());
            }
        }
    }

    if let Some(chunk) = current.take() {
        raw.push(chunk);
    }

    raw.into_iter()
        .enumerate()
        .map(|(i, chunk)| {
            if i == 0 {
                chunk
            } else {
                format!("{}\n{}", CONTINUATION_MARKER, chunk)
            }
        })
        .collect()
}

/// Remove the continuation marker from a chunk, if present.
pub fn strip_continuation_marker(chunk: &str) -> &str {
    chunk
        .strip_prefix(CONTINUATION_MARKER)
        .and_then(|rest| rest.strip_prefix('\n'))
        .unwrap_or(chunk)
}

/// Split a single overlong line at character boundaries.
fn hard_split(line: &str, budget: usize) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut rest = line;
    while rest.len() > budget {
        let mut cut = budget;
        while !rest.is_char_boundary(cut) {
            cut -= 1;
        }
        let (head, tail) = rest.split_at(cut);
        pieces.push(head);
        rest = tail;
    }
    pieces.push(rest);
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_is_single_chunk() {
        let chunks = chunk_message("hello world");
        assert_eq!(chunks, vec!["hello world".to_string()]);
    }

    #[test]
    fn test_exactly_at_limit_is_single_chunk() {
        let text = "x".repeat(MAX_MESSAGE_LEN);
        assert_eq!(chunk_message(&text).len(), 1);
    }

    #[test]
    fn test_long_body_splits_at_line_boundaries() {
        // 4500 characters of 50-char lines
        let line = "y".repeat(49);
        let lines: Vec<String> = (0..90).map(|_| line.clone()).collect();
        let text = lines.join("\n");
        assert_eq!(text.len(), 4499);

        let chunks = chunk_message(&text);
        assert!(chunks.len() >= 3);

        for chunk in &chunks {
            assert!(chunk.len() <= MAX_MESSAGE_LEN, "chunk of {} chars", chunk.len());
        }

        // Every chunk splits on a line boundary: stripped chunks contain only
        // whole lines.
        for chunk in &chunks {
            for chunk_line in strip_continuation_marker(chunk).split('\n') {
                assert_eq!(chunk_line.len(), 49);
            }
        }
    }

    #[test]
    fn test_continuation_chunks_are_marked() {
        let line = "z".repeat(80);
        let text = (0..60).map(|_| line.clone()).collect::<Vec<_>>().join("\n");

        let chunks = chunk_message(&text);
        assert!(chunks.len() > 1);
        assert!(!chunks[0].starts_with(CONTINUATION_MARKER));
        for chunk in &chunks[1..] {
            assert!(chunk.starts_with(CONTINUATION_MARKER));
        }
    }

    #[test]
    fn test_marker_stripped_concat_reproduces_original() {
        let mut lines = Vec::new();
        for i in 0..120 {
            lines.push(format!("line {} with some trailing content here", i));
        }
        lines.push(String::new()); // blank line
        lines.push("final".to_string());
        let text = lines.join("\n");
        assert!(text.len() > MAX_MESSAGE_LEN);

        let chunks = chunk_message(&text);
        let rebuilt = chunks
            .iter()
            .map(|c| strip_continuation_marker(c))
            .collect::<Vec<_>>()
            .join("\n");
        assert_eq!(rebuilt, text);
    }

    #[test]
    fn test_single_overlong_line_never_exceeds_limit() {
        let text = "w".repeat(5000);
        let chunks = chunk_message(&text);
        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.len() <= MAX_MESSAGE_LEN);
        }
    }

    #[test]
    fn test_strip_marker_is_noop_on_plain_chunk() {
        assert_eq!(strip_continuation_marker("plain"), "plain");
        let marked = format!("{}\nrest", CONTINUATION_MARKER);
        assert_eq!(strip_continuation_marker(&marked), "rest");
    }
}
