//! Template merge engine
//!
//! Inserts an approved transcript into the current text of a journal field.
//! When the field still carries placeholder lines from a quick-start
//! template, the first placeholder is replaced by the transcript and the
//! remaining placeholders are dropped as obsolete scaffolding; everything
//! the user wrote themselves is preserved verbatim and in order. Without a
//! template (or once no placeholder is left) the transcript is appended as
//! a trailing line.
//!
//! Placeholder recognition is plain data (`templates.rs`): adding a new
//! template never touches the merge logic here.

mod templates;

pub use templates::{template, PlaceholderPattern, Template, TemplateId};

/// Merge an approved transcript into the current field text
///
/// `transcript` must be non-empty after trimming; that is the caller's
/// contract. The transcript is inserted exactly once.
pub fn merge_transcript(
    transcript: &str,
    field_text: &str,
    template_id: Option<TemplateId>,
) -> String {
    let transcript = transcript.trim();
    debug_assert!(
        !transcript.is_empty(),
        "merge requires a non-empty transcript"
    );

    let Some(template_id) = template_id else {
        return append_trailing_line(field_text, transcript);
    };

    let placeholders = templates::template(template_id).placeholders;
    let mut replaced = false;
    let mut lines: Vec<&str> = Vec::new();

    for line in field_text.lines() {
        if placeholders.iter().any(|pattern| pattern.matches(line)) {
            if !replaced {
                lines.push(transcript);
                replaced = true;
            }
            // Later matches are leftover scaffolding, dropped entirely.
        } else {
            lines.push(line);
        }
    }

    if !replaced {
        // User already overwrote every placeholder.
        return append_trailing_line(field_text, transcript);
    }

    collapse_blank_runs(&lines.join("\n"))
}

/// Append the transcript as a new trailing line
///
/// Skips the append when the transcript is already the field's last
/// non-blank line, so re-merging approved text is a no-op instead of a
/// duplication.
fn append_trailing_line(field_text: &str, transcript: &str) -> String {
    let last_content = field_text
        .lines()
        .rev()
        .find(|line| !line.trim().is_empty());
    if last_content.map(str::trim) == Some(transcript) {
        return collapse_blank_runs(field_text);
    }

    if field_text.trim().is_empty() {
        return transcript.to_string();
    }

    collapse_blank_runs(&format!("{}\n{}", field_text.trim_end(), transcript))
}

/// Collapse runs of 3+ consecutive newlines to exactly 2
fn collapse_blank_runs(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut newlines = 0usize;
    for ch in text.chars() {
        if ch == '\n' {
            newlines += 1;
            if newlines <= 2 {
                out.push(ch);
            }
        } else {
            newlines = 0;
            out.push(ch);
        }
    }
    out
}
