// Prompt assembly for the analysis request

/// Instruction prefixed to every prompt so the model answers with bare JSON.
pub const JSON_ONLY_INSTRUCTION: &str =
    "Process the following data and respond with only a single valid JSON object or array, no additional text or explanation:";

/// Decoded multipart upload for a single analysis request.
#[derive(Debug, Default)]
pub struct QuestionUpload {
    pub questions: String,
    pub image_filename: Option<String>,
    pub csv: Option<String>,
}

/// Assembles the full model prompt from the uploaded material.
///
/// The image contributes only its filename; the model is told it exists
/// but the bytes are not forwarded.
pub fn build_prompt(upload: &QuestionUpload) -> String {
    let mut parts: Vec<String> = vec![format!("Questions: {}", upload.questions)];

    if let Some(filename) = &upload.image_filename {
        parts.push(format!("Image file provided: {}", filename));
    }

    if let Some(csv) = &upload.csv {
        parts.push(format!("CSV Data: {}", csv));
    }

    format!("{}\n\n{}", JSON_ONLY_INSTRUCTION, parts.join("\n\n"))
}
