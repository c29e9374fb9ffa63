//! Response extraction.
//!
//! Turns a service response into the text shown in the transcript: the
//! answer verbatim, suffixed with at most one citation locator. A pure
//! function of its input; the response is never mutated.

use kbchat_core::{AppError, AppResult};

use crate::wire::RetrieveAndGenerateResponse;

/// Separator between the answer and the reference block.
const REFERENCE_SEPARATOR: &str = "\n\nReference:\n";

/// Extract the display text from a service response.
///
/// - No citations at all, or a first citation with no retrieved references:
///   the answer text exactly. These two shapes are distinct on the wire but
///   identical to the reader.
/// - At least one retrieved reference: the answer followed by the FIRST
///   reference of the FIRST citation. Later citations and references are
///   never consulted.
///
/// # Errors
/// `Extraction` when the response has no answer text, or when the first
/// reference exists but carries no source locator.
pub fn extract_display_text(response: &RetrieveAndGenerateResponse) -> AppResult<String> {
    let answer = response
        .output
        .as_ref()
        .and_then(|output| output.text.as_deref())
        .ok_or_else(|| AppError::Extraction("response has no output text".to_string()))?;

    let first_reference = response
        .citations
        .first()
        .and_then(|citation| citation.retrieved_references.first());

    match first_reference {
        None => Ok(answer.to_string()),
        Some(reference) => {
            let uri = reference
                .location
                .as_ref()
                .and_then(|location| location.s3_location.as_ref())
                .map(|s3| s3.uri.as_str())
                .ok_or_else(|| {
                    AppError::Extraction(
                        "retrieved reference has no source locator".to_string(),
                    )
                })?;

            Ok(format!("{}{}{}", answer, REFERENCE_SEPARATOR, uri))
        }
    }
}
