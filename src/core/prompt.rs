use crate::models::{JudgmentMode, Profile};

/// Upper bound the detailed prompt asks the model to stay under
pub const SCALE_MAX: u8 = 95;

/// Build the compatibility prompt for one (submitter, candidate) pair
///
/// The output-format instructions are advisory; responses still go through
/// extraction and guardrails.
pub fn build_prompt(mode: JudgmentMode, submitter: &Profile, candidate: &Profile) -> String {
    let user_a = profile_json(submitter);
    let user_b = profile_json(candidate);

    match mode {
        JudgmentMode::Detailed => format!(
            r#"You are scoring TEAM COMPLEMENTARITY between two hackathon participants.
DO NOT return text, markdown, or code fences. Return only valid JSON.

MANDATORY OUTPUT: a single JSON object on ONE LINE with exactly these keys (integers only 0-{max}):
{{
  "role_score": int,
  "skill_score": int,
  "interest_score": int,
  "availability_score": int,
  "overall_score": int,
  "scale_max": {max},
  "explanation": "short reason (<=160 chars)"
}}

STRICT RULES:
- SCALE: All scores must be in range 0-{max} inclusive. Never exceed {max}.
- OVERALL_SCORE: Arithmetic mean of the 4 sub-scores, rounded to nearest int.
- ROLES: Complementary roles (e.g., FE + BE) get HIGH (>=70). Overlapping roles get LOW (<=30).
- SKILLS: Complementary skills get HIGH (>=70). Overlapping skills get LOW (<=30).
- INTERESTS: Shared interests modestly raise score. Lack of overlap is not a penalty.
- AVAILABILITY: Fully aligned schedules get HIGH. Partial overlap gets mid. No overlap gets LOW (<=30).
- EXPLANATION: One concise sentence (<=160 chars). No extra commentary.
- FORMAT: The whole object on ONE LINE. No line breaks, no backticks, no prose.

USER_A: {user_a}
USER_B: {user_b}
"#,
            max = SCALE_MAX,
            user_a = user_a,
            user_b = user_b,
        ),
        JudgmentMode::Minimal => format!(
            r#"You are a strict evaluator for hackathon teammate compatibility.

OUTPUT FORMAT (VERY IMPORTANT):
- Output ONLY a single JSON object on ONE LINE.
- Do NOT include Markdown or code fences.
- Do NOT include any extra commentary.
- The JSON MUST be exactly: {{"score": <integer>, "explanation": "<string>"}}

SCORING RULES:
- If users have the SAME roles OR significant overlap in skills, "score" MUST be <= 30.
- If they have DIFFERENT roles AND different skills, "score" SHOULD be between 70 and 100.
- "explanation" MUST be 1-2 short sentences.

Compare these two participants:
User A (new): {user_a}
User B (existing): {user_b}

Return exactly one line of JSON. No backticks. No prose. No extra keys.
"#,
            user_a = user_a,
            user_b = user_b,
        ),
    }
}

fn profile_json(profile: &Profile) -> String {
    // Serializing plain strings and string vectors cannot fail
    serde_json::to_string(profile).unwrap_or_default()
}
