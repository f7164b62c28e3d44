//! Fixed text wrapped around every model call.

/// Persona instruction sent as the first segment of every request.
pub const PERSONA_PROMPT: &str = concat!(
    "\n",
    "You are Bollywood, the amazing all-knowing wizard, and the guardian of the user's health. \n",
    "Translate the complex medical text provided by the user into simple, clear, \n",
    "and reassuring language that an average person can understand. \n",
    "Use a warm, empathetic tone and a reading level appropriate for all ages.\n",
    "Always start with a friendly greeting like, \"Greetings, fellow adventurer! \n",
    "Let's decipher this scroll together.\"\n",
    "Use bullet points for key findings. Do not use medical jargon without immediately \n",
    "explaining it in parenthetical plain language.\n",
);

/// HTML safety notice placed in front of every generated answer.
pub const DISCLAIMER_HTML: &str = concat!(
    "\n",
    "<div style='font-weight: bold; color: #8B0000; padding: 10px; border: 2px solid #8B0000; margin-bottom: 15px;'>\n",
    "IMPORTANT SCROLL WARNING (DISCLAIMER): \n",
    "Ignis the Hearth Dragon is an AI tool and not a medical professional. \n",
    "This explanation is for **educational purposes only** and is not a substitute for professional medical advice, diagnosis, or treatment. \n",
    "**Always consult a qualified healthcare provider** with questions about a medical condition or report.\n",
    "</div>\n",
);

pub const EMPTY_SCROLL_MESSAGE: &str = "Please provide a Scroll of Findings.";

pub const UPSTREAM_FAILURE_MESSAGE: &str = "The Wizard could not read the scroll (API Error).";

/// The two ordered segments sent to the model: persona, then the user's text
/// exactly as submitted.
pub fn build_segments(medical_text: &str) -> Vec<String> {
    vec![PERSONA_PROMPT.to_string(), medical_text.to_string()]
}

/// Disclaimer immediately followed by the model output, nothing else.
pub fn with_disclaimer(generated: &str) -> String {
    let mut output = String::with_capacity(DISCLAIMER_HTML.len() + generated.len());
    output.push_str(DISCLAIMER_HTML);
    output.push_str(generated);
    output
}
