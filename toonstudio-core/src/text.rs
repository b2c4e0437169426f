use regex::Regex;
use std::sync::OnceLock;

fn answer_label_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // A single leading role label such as "Answer:" or "RESULT\n".
        // The word boundary keeps "Results show ..." intact.
        Regex::new(r"(?i)^(?:answer|response|result|output)\b[\s:]*")
            .expect("valid answer label regex")
    })
}

fn fence_open_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Opening fence with an optional short lowercase language tag (```json, ```toon).
    RE.get_or_init(|| Regex::new(r"```[a-z]*\n?").expect("valid fence open regex"))
}

fn fence_close_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"```\n?").expect("valid fence close regex"))
}

fn sanitize_once(text: &str) -> String {
    let out = text.trim();
    let out = answer_label_re().replace(out, "");
    let out = fence_open_re().replace_all(&out, "");
    let out = fence_close_re().replace_all(&out, "");
    out.trim().to_string()
}

/// Normalizes a raw model answer for display: drops a leading role label and
/// markdown code fences, then trims.
///
/// The pass is repeated until the text stops changing, so the result is always a
/// fixed point (`sanitize_answer(sanitize_answer(s)) == sanitize_answer(s)`).
/// Every pass that changes the text makes it shorter, which bounds the loop.
pub fn sanitize_answer(raw: &str) -> String {
    let mut out = sanitize_once(raw);
    loop {
        let next = sanitize_once(&out);
        if next == out {
            return out;
        }
        out = next;
    }
}
