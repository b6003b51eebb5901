//! Instruction assembly for the vision model.
//!
//! `build_instruction` is a pure function over [`DescribeOptions`]: no I/O,
//! no randomness, identical inputs always produce the identical string.

pub const DEFAULT_DESCRIPTION_TYPE: &str = "Describe in Detail";
pub const DEFAULT_TONE: &str = "Friendly";
pub const DEFAULT_OUTPUT_LENGTH: &str = "Medium";
pub const DEFAULT_DETAIL_LEVEL: &str = "Balanced";
pub const DEFAULT_RETURN_FORMAT: &str = "plain text";

/// Options controlling how the instruction is phrased.
///
/// All fields are free-form labels; values are woven into the instruction
/// verbatim, with no validation against an enumerated set. The HTTP surface
/// only ever sets the first three; the rest keep their internal defaults.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DescribeOptions {
    pub description_type: String,
    pub tone: String,
    pub output_length: String,
    pub detail_level: String,
    pub style_prompt: Option<String>,
    pub return_format: String,
}

impl Default for DescribeOptions {
    fn default() -> Self {
        Self {
            description_type: DEFAULT_DESCRIPTION_TYPE.to_string(),
            tone: DEFAULT_TONE.to_string(),
            output_length: DEFAULT_OUTPUT_LENGTH.to_string(),
            detail_level: DEFAULT_DETAIL_LEVEL.to_string(),
            style_prompt: None,
            return_format: DEFAULT_RETURN_FORMAT.to_string(),
        }
    }
}

/// Composes the natural-language instruction sent alongside the image.
///
/// With `require_json` the closing line demands a single JSON object of the
/// form `{"description": "..."}`; otherwise the model is asked for free text
/// in `opts.return_format`. The gateway always passes `false`; the JSON
/// branch exists for callers that post-process the output mechanically.
pub fn build_instruction(opts: &DescribeOptions, require_json: bool) -> String {
    let mut instruction = format!(
        "You are describing a single attached image.\n\
         Task: {}.\n\
         Tone: write in a {} voice.\n\
         Length: keep the result {}.\n\
         Detail: aim for a {} level of visual detail.",
        opts.description_type, opts.tone, opts.output_length, opts.detail_level
    );

    if let Some(style) = &opts.style_prompt {
        instruction.push_str("\nStyle: ");
        instruction.push_str(style);
        instruction.push('.');
    }

    if require_json {
        instruction.push_str(
            "\nReturn exactly one JSON object of the form {\"description\": \"...\"} \
             with no surrounding prose and no code fences.",
        );
    } else {
        instruction.push_str("\nReturn the description as ");
        instruction.push_str(&opts.return_format);
        instruction.push_str(", with no preamble.");
    }

    instruction
}
