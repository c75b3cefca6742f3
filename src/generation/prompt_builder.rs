//! Turns a question into interleaved text / image segments for a multimodal
//! chat request. Images are never folded into text: every image reference is
//! its own segment, placed exactly where it appears in the question.

use std::mem;

use crate::constants::prompts::{answer_prompt_header, ANSWER_PROMPT_DELIMITER};
use crate::llm::PromptSegment;
use crate::models::domain::Question;

#[derive(Debug, Default)]
struct SegmentWriter {
    segments: Vec<PromptSegment>,
    pending: String,
}

impl SegmentWriter {
    fn text(&mut self, text: &str) {
        self.pending.push_str(text);
    }

    fn image(&mut self, url: &str) {
        self.flush();
        self.segments.push(PromptSegment::ImageUrl(url.to_string()));
    }

    fn flush(&mut self) {
        if !self.pending.is_empty() {
            self.segments
                .push(PromptSegment::Text(mem::take(&mut self.pending)));
        }
    }

    fn finish(mut self) -> Vec<PromptSegment> {
        self.flush();
        self.segments
    }
}

/// Label for the choice at `idx`: `A`, `B`, `C`, ...
pub fn choice_label(idx: usize) -> char {
    u32::try_from(idx)
        .ok()
        .and_then(|offset| char::from_u32('A' as u32 + offset))
        .unwrap_or('?')
}

pub fn build_answer_prompt(question: &Question) -> Vec<PromptSegment> {
    let mut writer = SegmentWriter::default();
    writer.text(&answer_prompt_header(question.required_answer_count()));

    for (idx, subject) in question.subjects.iter().enumerate() {
        if question.is_subject_image(idx) {
            writer.image(subject);
        } else {
            writer.text(subject);
            writer.text("\n");
        }
    }

    writer.text("\n");

    for (idx, choice) in question.choices.iter().enumerate() {
        writer.text(&format!(
            "{}. {}\n",
            choice_label(idx),
            choice.as_deref().unwrap_or("")
        ));
        if let Some(url) = question.choice_image(idx) {
            writer.image(url);
        }
    }

    writer.text(ANSWER_PROMPT_DELIMITER);
    writer.finish()
}
