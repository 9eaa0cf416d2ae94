// ABOUTME: Pulls the JSON payload out of free-form model output
// ABOUTME: Prefers the first fenced code block, otherwise uses the whole text
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

const FENCE: &str = "```";

/// Return the candidate JSON text inside `output`
///
/// When `output` contains a fenced block, the content of the first block is
/// returned with any language tag (for example `json`) on the opening line
/// dropped. An unterminated block runs to the end of the text. Without a
/// fence the trimmed text is returned as-is.
#[must_use]
pub fn extract_payload(output: &str) -> &str {
    let Some(open) = output.find(FENCE) else {
        return output.trim();
    };

    let after_fence = &output[open + FENCE.len()..];
    let body = match after_fence.split_once('\n') {
        Some((tag, rest)) if is_language_tag(tag) => rest,
        _ => after_fence,
    };

    let end = body.find(FENCE).unwrap_or(body.len());
    body[..end].trim()
}

fn is_language_tag(candidate: &str) -> bool {
    candidate
        .trim()
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '+'))
}
