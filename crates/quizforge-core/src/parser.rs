//! Question block parser.
//!
//! Turns loosely formatted generator output such as
//!
//! ```text
//! Question 1: What is X?
//! A) foo
//! B) bar
//! C) baz
//! D) qux
//! Correct answer: B
//! Explanation: because reasons.
//! ```
//!
//! into [`Question`] records. Parsing never fails: missing sections come
//! back empty or unset and callers decide what to skip.

use std::path::Path;

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::{AnswerKey, Question};
use crate::text::collapse_whitespace;

static QUESTION_HEADER: Lazy<Regex> = Lazy::new(|| Regex::new(r"Question\s+\d+\s*:").unwrap());

static OPTION_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"([ABCD])\)").unwrap());

static OPTION_TERMINATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Correct|Answer|Explanation").unwrap());

/// A line that opens the answer or explanation section.
static SECTION_START: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?im)^[ \t]*(?:correct\s+answer|answer|correct|explanation)\s*:").unwrap()
});

/// Answer-key patterns, tried in order; the first match wins.
static ANSWER_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)correct\s+answer[:\s]*([ABCD])\b",
        r"(?i)answer[:\s]*([ABCD])\b",
        r"(?i)correct[:\s]*([ABCD])\b",
        r"(?i)\*\*([ABCD])\*\*",
        r"(?i)\b([ABCD])\s+is\s+correct",
        r"(?i)option\s*([ABCD])\s+is\s+correct",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

static EXPLANATION_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)explanation[:\s]*").unwrap());

static REASONING_MARKERS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [r"(?i)reasoning[:\s]*", r"(?i)why[:\s]*", r"(?i)because[:\s]*"]
        .iter()
        .map(|p| Regex::new(p).unwrap())
        .collect()
});

static NEXT_QUESTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\n\s*question").unwrap());

static ANSWER_KEY_SPLIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)correct\s+answer[:\s]*").unwrap());

static ANSWER_KEY_TAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?is)(answer[:\s]*[ABCD]\b|the\s+correct\s+answer\s+is|\([ABCD]\)\s*correct|\*\*[ABCD]\*\*|[ABCD]\)\s*\*|explanation[:\s]|reasoning[:\s]).*$",
    )
    .unwrap()
});

static BLANK_LINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n").unwrap());

static OPTION_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ABCD]\)\s*\S").unwrap());

/// Parse a single question block.
pub fn parse_question_block(block: &str) -> Question {
    let stem_start = QUESTION_HEADER.find(block).map_or(0, |m| m.end());
    let body = &block[stem_start..];

    let markers: Vec<(AnswerKey, usize, usize)> = OPTION_MARKER
        .captures_iter(body)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let key = caps[1].chars().next().and_then(AnswerKey::from_char)?;
            Some((key, whole.start(), whole.end()))
        })
        .collect();

    let stem_end = match markers.first() {
        Some(&(_, start, _)) => start,
        None => OPTION_TERMINATOR
            .find(body)
            .map_or(body.len(), |m| m.start()),
    };
    let question = body[..stem_end].trim().to_string();

    let options = parse_options(body, &markers);
    let correct_answer = find_answer_key(block);
    let explanation = text_after_marker(block, &EXPLANATION_MARKER);

    if correct_answer.is_none() {
        tracing::debug!("no answer key found in question block: {:.80}", block.trim());
    }

    Question {
        question,
        options,
        correct_answer,
        explanation,
    }
}

/// Each option's text runs from its marker to the first of: the next
/// marker, a terminator keyword, or the end of its line. Markers at or after
/// the first `Correct answer:` / `Explanation:` section line belong to that
/// section, and only the first occurrence of each letter counts.
fn parse_options(body: &str, markers: &[(AnswerKey, usize, usize)]) -> Vec<String> {
    let Some(&(_, first_start, _)) = markers.first() else {
        return Vec::new();
    };
    let section_end = SECTION_START
        .find_at(body, first_start)
        .map_or(body.len(), |m| m.start());

    let mut seen = Vec::new();
    let mut options = Vec::new();
    for (i, &(key, start, end)) in markers.iter().enumerate() {
        if start >= section_end || options.len() == AnswerKey::ALL.len() {
            break;
        }
        if seen.contains(&key) {
            continue;
        }
        seen.push(key);
        let next = markers
            .get(i + 1)
            .map_or(body.len(), |&(_, next_start, _)| next_start);
        options.push(option_text(body, end, next.min(section_end)));
    }
    options
}

/// Option text between a marker's end and `limit`. A terminator keyword only
/// counts after the first character, so an option may begin with one.
fn option_text(body: &str, end: usize, limit: usize) -> String {
    let limit = limit.max(end);
    let span = &body[end..limit];
    let lead = span.len() - span.trim_start().len();
    let Some(first) = span[lead..].chars().next() else {
        return String::new();
    };
    let scan_from = end + lead + first.len_utf8();
    let rest = &body[scan_from..limit];
    let stop = [
        OPTION_TERMINATOR.find(rest).map(|m| m.start()),
        rest.find('\n'),
    ]
    .into_iter()
    .flatten()
    .min()
    .map_or(limit, |offset| scan_from + offset);
    body[end..stop].trim().to_string()
}

fn find_answer_key(block: &str) -> Option<AnswerKey> {
    ANSWER_PATTERNS.iter().find_map(|re| {
        re.captures(block)
            .and_then(|caps| caps[1].chars().next())
            .and_then(AnswerKey::from_char)
    })
}

/// Text following `marker` up to the next "question" line or end of block.
fn text_after_marker(block: &str, marker: &Regex) -> Option<String> {
    let m = marker.find(block)?;
    let rest = &block[m.end()..];
    let end = NEXT_QUESTION.find(rest).map_or(rest.len(), |n| n.start());
    let text = rest[..end].trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

/// Split generated text into blocks that each start at a `Question N:` header.
///
/// Text before the first header is discarded.
pub fn split_question_blocks(text: &str) -> Vec<&str> {
    let starts: Vec<usize> = QUESTION_HEADER.find_iter(text).map(|m| m.start()).collect();
    starts
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            let end = starts.get(i + 1).copied().unwrap_or(text.len());
            &text[start..end]
        })
        .collect()
}

/// Split and parse every question in a generated text.
pub fn parse_question_text(text: &str) -> Vec<Question> {
    split_question_blocks(text)
        .into_iter()
        .map(parse_question_block)
        .collect()
}

/// Read and parse a question file.
pub fn parse_question_file(path: &Path) -> Result<Vec<Question>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read question file: {}", path.display()))?;
    Ok(parse_question_text(&content))
}

/// Load knowledge-base text, treating any failure as "no knowledge base".
///
/// Callers pass optional paths straight through, so a missing or unreadable
/// file is logged and ignored rather than reported.
pub fn load_knowledge_base(path: Option<&Path>) -> Option<String> {
    let path = path?;
    match std::fs::read_to_string(path) {
        Ok(content) => Some(content),
        Err(e) => {
            tracing::warn!("ignoring knowledge base {}: {}", path.display(), e);
            None
        }
    }
}

/// The explanation of a block with whitespace collapsed, falling back to
/// text after "reasoning", "why", or "because" markers.
pub fn extract_reasoning(block: &str) -> Option<String> {
    std::iter::once(&*EXPLANATION_MARKER)
        .chain(REASONING_MARKERS.iter())
        .find_map(|marker| text_after_marker(block, marker))
        .map(|text| collapse_whitespace(&text))
}

/// A question block with its answer key and explanation removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanedBlock {
    pub text: String,
    /// Number of `X) ...` option lines that remain.
    pub options_found: usize,
}

impl CleanedBlock {
    /// Whether all four options survived cleaning.
    pub fn is_complete(&self) -> bool {
        self.options_found >= AnswerKey::ALL.len()
    }
}

/// Strip the answer key, explanation, and reasoning from a block so the
/// question can be shown to a learner.
pub fn strip_answer_key(block: &str) -> CleanedBlock {
    let cut = match ANSWER_KEY_SPLIT.find(block) {
        Some(m) => block[..m.start()].to_string(),
        None => ANSWER_KEY_TAIL.replace(block, "").into_owned(),
    };
    let text = BLANK_LINES.replace_all(&cut, "\n").trim().to_string();
    let options_found = OPTION_LINE.find_iter(&text).count();
    CleanedBlock {
        text,
        options_found,
    }
}

/// A warning from question validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// Zero-based position of the question in its batch.
    pub index: usize,
    pub message: String,
}

/// Check parsed questions for problems that would degrade scoring.
pub fn validate_questions(questions: &[Question]) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    let mut warn = |index: usize, message: String| {
        warnings.push(ValidationWarning { index, message });
    };

    for (index, q) in questions.iter().enumerate() {
        if q.question.trim().is_empty() {
            warn(index, "question text is empty".into());
        }
        if q.options.len() < AnswerKey::ALL.len() {
            warn(
                index,
                format!("only {} of 4 options found", q.options.len()),
            );
        }
        match q.correct_answer {
            None => warn(index, "no correct answer found".into()),
            Some(key) if key.index() >= q.options.len() => warn(
                index,
                format!("correct answer {key} has no matching option"),
            ),
            Some(_) => {}
        }
        if q.explanation.is_none() {
            warn(index, "no explanation provided".into());
        }
    }

    warnings
}
