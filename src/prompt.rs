//! Prompt assembly for generation requests.
//!
//! Splits the typed parts of a request into the final text prompt and the
//! resolved reference-image paths.

use crate::models::PromptPart;
use std::path::{Path, PathBuf};

/// A partitioned prompt: joined text plus resolved image paths, in the
/// order the image parts appeared.
#[derive(Debug, Clone, PartialEq)]
pub struct AssembledPrompt {
    pub text: String,
    pub image_paths: Vec<PathBuf>,
}

/// Partition prompt parts by type.
///
/// Text parts are concatenated with a blank line between them. Image parts
/// reference files relative to the upload directory; a leading `/` is
/// stripped so frontend paths like `/uploads/x.png` resolve under the
/// injected base directory.
pub fn assemble_prompt(parts: &[PromptPart], upload_dir: &Path) -> AssembledPrompt {
    let mut text_parts = Vec::new();
    let mut image_paths = Vec::new();

    for part in parts {
        match part {
            PromptPart::Text { text } => text_parts.push(text.as_str()),
            PromptPart::Image { content } => {
                image_paths.push(upload_dir.join(content.trim_start_matches('/')));
            }
        }
    }

    AssembledPrompt {
        text: text_parts.join("\n\n"),
        image_paths,
    }
}
