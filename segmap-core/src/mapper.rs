//! Interactive discovery of unmapped device codes.
//!
//! The curator is shown each unknown code with its rendered glyph and asked
//! to name the character, one line per answer. The [`Console`] trait is the
//! seam between the discovery loop and a real terminal; whole sessions run
//! under test against a [`ScriptedConsole`].

use std::collections::VecDeque;

use crate::error::{SegmapError, SegmapResult};
use crate::seg14;
use crate::store::MappingStore;
use crate::DeviceCode;

/// Response that abandons the current code instead of naming a character.
pub const SKIP_RESPONSE: char = 'x';

/// Line-oriented console for the discovery dialogue.
pub trait Console {
    /// Show text to the curator verbatim.
    fn show(&mut self, text: &str);

    /// Show a prompt and read one line of response, line terminator
    /// stripped. Returns `None` when the input stream is exhausted.
    fn prompt(&mut self, text: &str) -> SegmapResult<Option<String>>;
}

/// Outcome counts of a discovery session.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    /// Codes newly mapped this session.
    pub mapped: usize,
    /// Codes explicitly skipped this session.
    pub skipped: usize,
}

/// Walk the code list and prompt for every code the store does not know.
///
/// Each unknown code is presented as raw code, derived segment word, and
/// rendered glyph. A response is accepted only if it is exactly one
/// character after terminator stripping, so a single space names the blank
/// glyph; `x` skips the code. A response the store rejects (duplicate code
/// or character) is reported and the same code prompted again. Exhausted
/// console input is fatal.
pub fn run_session<C: Console>(
    codes: &[DeviceCode],
    store: &mut MappingStore,
    console: &mut C,
) -> SegmapResult<SessionSummary> {
    let mut summary = SessionSummary::default();
    for &code in codes {
        if store.contains(code) {
            continue;
        }
        let segments = seg14::remap(code);
        console.show(&format!(
            "\n####################\n{code:04x} -> {segments:04x}\n"
        ));
        console.show(&seg14::render(segments));
        loop {
            let response = console
                .prompt(&format!("map character ({SKIP_RESPONSE} to skip)>"))?
                .ok_or(SegmapError::InputClosed)?;
            let mut chars = response.chars();
            let (Some(ch), None) = (chars.next(), chars.next()) else {
                console.show("ERROR: Reply with one character\n");
                continue;
            };
            if ch == SKIP_RESPONSE {
                summary.skipped += 1;
                break;
            }
            match store.add(code, ch) {
                Ok(()) => {
                    summary.mapped += 1;
                    break;
                }
                Err(err @ (SegmapError::DuplicateCode(_) | SegmapError::DuplicateChar { .. })) => {
                    console.show(&format!("ERROR: {err}\n"));
                }
                Err(err) => return Err(err),
            }
        }
    }
    log::info!(
        "discovery session done: {} mapped, {} skipped",
        summary.mapped,
        summary.skipped
    );
    Ok(summary)
}

/// Scripted console for tests: captures output, replays queued responses.
#[derive(Default)]
pub struct ScriptedConsole {
    output: String,
    responses: VecDeque<String>,
}

impl ScriptedConsole {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with pre-queued response lines.
    pub fn with_responses<I>(responses: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            output: String::new(),
            responses: responses.into_iter().map(Into::into).collect(),
        }
    }

    /// Queue one more response line.
    pub fn push_response(&mut self, line: impl Into<String>) {
        self.responses.push_back(line.into());
    }

    /// Everything shown so far, prompts included.
    pub fn output(&self) -> &str {
        &self.output
    }
}

impl Console for ScriptedConsole {
    fn show(&mut self, text: &str) {
        self.output.push_str(text);
    }

    fn prompt(&mut self, text: &str) -> SegmapResult<Option<String>> {
        self.output.push_str(text);
        Ok(self.responses.pop_front())
    }
}
