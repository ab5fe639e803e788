/// Sentence-terminal punctuation marks
const TERMINAL_PUNCTUATION: [char; 3] = ['.', '?', '!'];

/// Segments longer than this get a terminal period when the engine omitted one
const AUTO_PUNCTUATE_MIN_CHARS: usize = 10;

/// Normalize one finalized segment.
///
/// Trims the segment, collapses internal whitespace runs, capitalizes the
/// segment start and the first letter after sentence-terminal punctuation,
/// and appends a period to longer segments the engine left unpunctuated.
/// Returns `None` for whitespace-only segments.
pub fn polish_segment(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let mut polished = String::with_capacity(trimmed.len() + 1);
    let mut capitalize_next = true;
    let mut after_terminal = false;
    let mut last_was_space = false;

    for ch in trimmed.chars() {
        if ch.is_whitespace() {
            if !last_was_space {
                polished.push(' ');
                last_was_space = true;
            }
            if after_terminal {
                capitalize_next = true;
            }
            continue;
        }
        last_was_space = false;

        if TERMINAL_PUNCTUATION.contains(&ch) {
            after_terminal = true;
            polished.push(ch);
            continue;
        }
        after_terminal = false;

        if capitalize_next && ch.is_alphabetic() {
            polished.extend(ch.to_uppercase());
        } else {
            polished.push(ch);
        }
        capitalize_next = false;
    }

    let ends_terminal = polished
        .chars()
        .last()
        .is_some_and(|ch| TERMINAL_PUNCTUATION.contains(&ch));
    if !ends_terminal && polished.chars().count() > AUTO_PUNCTUATE_MIN_CHARS {
        polished.push('.');
    }

    Some(polished)
}

/// Accumulates processed final segments into the canonical transcript
///
/// The transcript only ever grows; the individually processed segments are
/// additionally kept as an audit trail so the transcript could be rebuilt
/// if that ever became necessary.
#[derive(Debug, Clone, Default)]
pub struct TranscriptAssembler {
    transcript: String,
    segments: Vec<String>,
}

impl TranscriptAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process one finalized segment and append it
    ///
    /// Returns false when the segment normalized away to nothing.
    pub fn push_final(&mut self, raw: &str) -> bool {
        let Some(polished) = polish_segment(raw) else {
            return false;
        };
        if !self.transcript.is_empty() {
            self.transcript.push(' ');
        }
        self.transcript.push_str(&polished);
        self.segments.push(polished);
        true
    }

    /// The canonical transcript accumulated so far
    pub fn transcript(&self) -> &str {
        &self.transcript
    }

    /// Audit trail of processed segments, in arrival order
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transcript.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polish_trims_and_capitalizes() {
        assert_eq!(
            polish_segment("  i went for a walk today  ").as_deref(),
            Some("I went for a walk today.")
        );
    }

    #[test]
    fn test_polish_discards_whitespace_only() {
        assert_eq!(polish_segment(""), None);
        assert_eq!(polish_segment("   \t \n "), None);
    }

    #[test]
    fn test_polish_short_segments_left_unpunctuated() {
        // 10 characters or fewer: no automatic period
        assert_eq!(polish_segment("test").as_deref(), Some("Test"));
        assert_eq!(polish_segment("hello").as_deref(), Some("Hello"));
    }

    #[test]
    fn test_polish_keeps_existing_terminal_punctuation() {
        assert_eq!(
            polish_segment("did that really happen?").as_deref(),
            Some("Did that really happen?")
        );
        assert_eq!(
            polish_segment("what a great day!").as_deref(),
            Some("What a great day!")
        );
    }

    #[test]
    fn test_polish_capitalizes_after_sentence_boundary() {
        assert_eq!(
            polish_segment("it rained. we stayed inside").as_deref(),
            Some("It rained. We stayed inside.")
        );
    }

    #[test]
    fn test_polish_no_capitalization_without_whitespace_after_punctuation() {
        // "3.5" style tokens must not trigger capitalization
        assert_eq!(
            polish_segment("i ran 3.5k this morning").as_deref(),
            Some("I ran 3.5k this morning.")
        );
    }

    #[test]
    fn test_polish_collapses_whitespace_runs() {
        assert_eq!(
            polish_segment("so   many\t\tspaces   here").as_deref(),
            Some("So many spaces here.")
        );
    }

    #[test]
    fn test_accumulation_joins_with_single_space() {
        let mut assembler = TranscriptAssembler::new();
        assert!(assembler.push_final("hello world"));
        assert!(assembler.push_final("this is another sentence"));
        assert_eq!(
            assembler.transcript(),
            "Hello world. This is another sentence."
        );
        assert_eq!(assembler.segment_count(), 2);
    }

    #[test]
    fn test_accumulation_matches_individually_processed_segments() {
        let raws = ["first thing i remember", "then  we had lunch", "great day!"];
        let mut assembler = TranscriptAssembler::new();
        for raw in raws {
            assembler.push_final(raw);
        }

        let expected: Vec<String> = raws
            .iter()
            .filter_map(|raw| polish_segment(raw))
            .collect();
        assert_eq!(assembler.transcript(), expected.join(" "));
        assert_eq!(assembler.segments(), expected.as_slice());
    }

    #[test]
    fn test_empty_segments_do_not_accumulate() {
        let mut assembler = TranscriptAssembler::new();
        assert!(!assembler.push_final("   "));
        assert!(assembler.is_empty());
        assert_eq!(assembler.segment_count(), 0);
    }
}
