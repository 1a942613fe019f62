//! Persona preambles, the policy playbook, and per-stage prompt builders.
//!
//! Prompt versioning: bump `PROMPT_VERSION` whenever a preamble or the
//! playbook changes so logged runs can be tied back to the wording used.

/// Prompt version. Bump on any preamble or playbook change.
pub const PROMPT_VERSION: &str = "1.0.0";

/// House policy the compliance officer audits against.
pub const POLICY_PLAYBOOK: &str = "\
POLICY RULES:
1. Payment: Must be Net-30 or Net-45. (Net-90 is a VIOLATION).
2. Liability: Must be at least $10,000. ($100 is a VIOLATION).
3. Jurisdiction: Must be USA. (Antarctica is a VIOLATION).";

pub const ANALYST_PREAMBLE: &str = "You are a Legal Analyst. Extract clauses verbatim.";

pub const NEGOTIATOR_PREAMBLE: &str = "You are a Legal Negotiator. Draft redlines and emails.";

/// Compliance preamble with the playbook embedded.
pub fn compliance_preamble(playbook: &str) -> String {
    format!("You are a Compliance Officer. Auditing against:\n{playbook}")
}

/// Stage 1: ask the analyst for the three clause categories.
pub fn extraction_prompt(raw_text: &str) -> String {
    format!("Extract Payment, Liability, and Jurisdiction clauses:\n{raw_text}")
}

/// Stage 2: ask the compliance officer to audit the extracted clauses.
pub fn audit_prompt(extracted_clauses: &str) -> String {
    format!("Audit these clauses:\n{extracted_clauses}")
}

/// Stage 3: ask the negotiator for redlines and a cover email.
pub fn negotiation_prompt(audit_report: &str) -> String {
    format!("Violations found:\n{audit_report}\n\n1. Redline the clauses.\n2. Draft an email.")
}
