//! Grounded-prompt construction.
//!
//! A single pure function combines the fixed grounding instruction, the
//! current knowledge text, and the latest user input into one request
//! string. There is no truncation and no chunking: the whole knowledge
//! base rides along on every turn, so the payload grows with it.

/// Fixed system instruction prepended to every request.
///
/// Instructs the model to answer strictly from the knowledge-base section
/// and to fall back to [`REFUSAL_SENTENCE`] when the answer is absent.
pub const SYSTEM_INSTRUCTION: &str = "\
You are a friendly, human-sounding assistant for my company. Your core job \
is answering customer questions using only the data I supply in the \
\"Knowledge base\" section below. You are never allowed to invent \
information that is not in the company's sources.

Your ground rules:

1. Stick to the sources:
   - Use only the data in the \"Knowledge base\" section.
   - If the answer is not in my data, say \"That information is not \
available in my current data.\" and nothing else.

2. Tone:
   - Match the customer's register; keep it warm, polite, and clear, with \
a human rather than robotic voice.
   - Avoid technical jargon unless the customer asks for it.

3. Reasoning:
   - If a question needs analysis, lay out 2-3 short steps of your logic \
without exposing any internal deliberation.
   - If the customer is unclear, ask exactly one clarifying question.

4. Accuracy:
   - When you use a knowledge-base item, cite its reference if one exists, \
e.g. (per FAQ#03 or KB#12).

5. Limits:
   - If the question falls outside the available information, apologise \
politely and suggest handing over to a staff member.
   - Do not give medical, legal, or advanced financial advice.
   - Refuse harmful or policy-violating requests.

6. Freshness:
   - Treat anything newly added to the \"Knowledge base\" section as part \
of your knowledge immediately.

Your end goal: a polished, clear, helpful, and accurate experience built \
100% on the company's sources alone.";

/// The exact refusal sentence mandated by the grounding instruction.
pub const REFUSAL_SENTENCE: &str = "That information is not available in my current data.";

/// Stands in for the knowledge section when nothing has been added yet.
pub const KNOWLEDGE_PLACEHOLDER: &str = "There is no data in the knowledge base yet.";

/// Combine the grounding instruction, knowledge text, and user input into
/// the single outbound request string.
///
/// Pure and deterministic: identical inputs always yield the identical
/// prompt. Blank `user_input` is rejected by the orchestrator before it
/// can reach this function.
pub fn build_prompt(user_input: &str, knowledge_base: &str) -> String {
    let knowledge = if knowledge_base.is_empty() {
        KNOWLEDGE_PLACEHOLDER
    } else {
        knowledge_base
    };
    format!(
        "{SYSTEM_INSTRUCTION}\n\n---\nKnowledge base:\n{knowledge}\n---\n\nCustomer question:\n{user_input}\n"
    )
}
