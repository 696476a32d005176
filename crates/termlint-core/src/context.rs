//! Context snippets around flagged words.
//!
//! For each occurrence of a flagged word, collect the words before and after
//! it until roughly [`MATCH_PADDING_CHARS`] characters have been gathered on
//! each side. Padding never reaches the previous or next occurrence of the
//! same word, so repeated words close together get short, non-overlapping
//! snippets.

use serde::{Deserialize, Serialize};

/// Soft limit on the characters of context gathered on each side.
///
/// The limit is checked before each word is added, so a snippet may run past
/// it by up to one word.
pub const MATCH_PADDING_CHARS: usize = 40;

/// One occurrence of a flagged word with its surrounding text.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    /// Words before the occurrence, each followed by a space.
    pub pre_text: String,
    /// The occurrence itself.
    #[serde(rename = "match")]
    pub matched: String,
    /// Words after the occurrence, each followed by a space.
    pub post_text: String,
}

/// Build a [`Match`] for every occurrence of `word` in `words`.
///
/// Comparison is exact string equality on the already-normalized words.
#[tracing::instrument(skip(words), fields(word_count = words.len()))]
pub fn matches_with_context(words: &[String], word: &str) -> Vec<Match> {
    let positions: Vec<usize> = words
        .iter()
        .enumerate()
        .filter(|(_, w)| w.as_str() == word)
        .map(|(i, _)| i)
        .collect();

    positions
        .iter()
        .enumerate()
        .map(|(k, &pos)| {
            let previous = k.checked_sub(1).map(|j| positions[j]);
            let next = positions.get(k + 1).copied();

            let start = context_start(words, pos, previous);
            let end = context_end(words, pos, next);

            Match {
                pre_text: padded(&words[start..pos]),
                matched: words[pos].clone(),
                post_text: padded(&words[pos + 1..end]),
            }
        })
        .collect()
}

/// First index of the preceding context for the word at `pos`.
fn context_start(words: &[String], pos: usize, previous: Option<usize>) -> usize {
    let mut start = pos;
    let mut len = 0;
    while start > 0 && len <= MATCH_PADDING_CHARS {
        let i = start - 1;
        if previous.is_some_and(|p| i <= p) {
            break;
        }
        len += words[i].chars().count() + 1;
        start = i;
    }
    start
}

/// One past the last index of the following context for the word at `pos`.
fn context_end(words: &[String], pos: usize, next: Option<usize>) -> usize {
    let mut end = pos + 1;
    let mut len = 0;
    while end < words.len() && len <= MATCH_PADDING_CHARS {
        if next.is_some_and(|n| end >= n) {
            break;
        }
        len += words[end].chars().count() + 1;
        end += 1;
    }
    end
}

fn padded(words: &[String]) -> String {
    let mut out = String::new();
    for w in words {
        out.push_str(w);
        out.push(' ');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(s: &str) -> Vec<String> {
        s.split(' ').map(str::to_string).collect()
    }

    #[test]
    fn single_occurrence() {
        let m = matches_with_context(&words("the colour is nice"), "colour");
        assert_eq!(
            m,
            vec![Match {
                pre_text: "the ".to_string(),
                matched: "colour".to_string(),
                post_text: "is nice ".to_string(),
            }]
        );
    }

    #[test]
    fn no_occurrence() {
        assert!(matches_with_context(&words("nothing to see"), "colour").is_empty());
        assert!(matches_with_context(&[], "colour").is_empty());
    }

    #[test]
    fn adjacent_occurrences_clamp_to_each_other() {
        let m = matches_with_context(&words("bad bad bad"), "bad");
        assert_eq!(m.len(), 3);
        for snippet in &m {
            assert_eq!(snippet.pre_text, "");
            assert_eq!(snippet.post_text, "");
            assert_eq!(snippet.matched, "bad");
        }
    }

    #[test]
    fn outer_edges_still_padded() {
        let m = matches_with_context(&words("one bad bad two"), "bad");
        assert_eq!(m[0].pre_text, "one ");
        assert_eq!(m[0].post_text, "");
        assert_eq!(m[1].pre_text, "");
        assert_eq!(m[1].post_text, "two ");
    }

    #[test]
    fn context_stops_before_neighbor() {
        let m = matches_with_context(&words("x bad y z bad w"), "bad");
        assert_eq!(m.len(), 2);
        assert_eq!(m[0].pre_text, "x ");
        assert_eq!(m[0].post_text, "y z ");
        assert_eq!(m[1].pre_text, "y z ");
        assert_eq!(m[1].post_text, "w ");
        assert!(!m[0].post_text.contains("bad"));
        assert!(!m[1].pre_text.contains("bad"));
    }

    #[test]
    fn padding_is_a_soft_limit() {
        // Each filler word plus its space is 10 characters. Words are added
        // while the gathered text is at most 40 characters long, so the
        // fifth word still goes in.
        let filler = "aaaaaaaaa";
        let mut text = vec![filler; 8];
        text.push("bad");
        text.extend(vec![filler; 8]);
        let list: Vec<String> = text.into_iter().map(str::to_string).collect();

        let m = matches_with_context(&list, "bad");
        assert_eq!(m.len(), 1);
        assert_eq!(m[0].pre_text.len(), 50);
        assert_eq!(m[0].post_text.len(), 50);
        assert!(m[0].pre_text.len() > MATCH_PADDING_CHARS);
    }

    #[test]
    fn single_long_word_is_kept_whole() {
        let long = "x".repeat(80);
        let list = vec![long.clone(), "bad".to_string(), long.clone()];
        let m = matches_with_context(&list, "bad");
        assert_eq!(m[0].pre_text, format!("{long} "));
        assert_eq!(m[0].post_text, format!("{long} "));
    }

    #[test]
    fn serializes_with_historical_field_names() {
        let m = Match {
            pre_text: "the ".to_string(),
            matched: "colour".to_string(),
            post_text: "is ".to_string(),
        };
        let json = serde_json::to_value(&m).unwrap();
        assert_eq!(json["preText"], "the ");
        assert_eq!(json["match"], "colour");
        assert_eq!(json["postText"], "is ");
    }
}
