//! Wire types for the `generateContent` endpoint.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub(super) struct GenerateContentRequestDto<'a> {
    pub(super) contents: [ContentDto<'a>; 1],
}

#[derive(Debug, Serialize)]
pub(super) struct ContentDto<'a> {
    pub(super) parts: [RequestPartDto<'a>; 1],
}

#[derive(Debug, Serialize)]
pub(super) struct RequestPartDto<'a> {
    pub(super) text: &'a str,
}

impl<'a> GenerateContentRequestDto<'a> {
    pub(super) fn for_prompt(prompt: &'a str) -> Self {
        Self {
            contents: [ContentDto {
                parts: [RequestPartDto { text: prompt }],
            }],
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct GenerateContentResponseDto {
    #[serde(default)]
    candidates: Vec<CandidateDto>,
}

#[derive(Debug, Deserialize)]
struct CandidateDto {
    content: Option<CandidateContentDto>,
}

#[derive(Debug, Deserialize)]
struct CandidateContentDto {
    #[serde(default)]
    parts: Vec<ResponsePartDto>,
}

#[derive(Debug, Deserialize)]
struct ResponsePartDto {
    text: Option<String>,
}

impl GenerateContentResponseDto {
    /// Concatenated text of the first candidate.
    pub(super) fn into_text(self) -> Result<String, String> {
        let candidate = self
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| "response contained no candidates".to_owned())?;
        let content = candidate
            .content
            .ok_or_else(|| "first candidate has no content".to_owned())?;
        Ok(content
            .parts
            .into_iter()
            .filter_map(|part| part.text)
            .collect())
    }
}
