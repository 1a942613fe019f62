//! Three-stage contract review.
//!
//! ```text
//! TextSource → Analyst.ask → Compliance.ask ─┬─ "VIOLATION" → Negotiator.ask → OutputSink
//!                                            └─ otherwise   → done
//! ```
//!
//! Every stage always yields text: extraction failures and completion
//! failures arrive as diagnostic strings and flow on like ordinary answers.

use std::path::Path;

use serde::Serialize;
use tracing::{error, info, warn};

use crate::agents::session::SessionAgent;
use crate::extract::{extract_or_diagnostic, TextSource};
use crate::presenter::Presenter;
use crate::prompts;
use crate::sink::OutputSink;

/// Token whose presence in the audit report triggers negotiation.
pub const VIOLATION_TOKEN: &str = "VIOLATION";

/// Case-insensitive check for [`VIOLATION_TOKEN`] in an audit report.
pub fn detect_violation(audit_report: &str) -> bool {
    audit_report.to_uppercase().contains(VIOLATION_TOKEN)
}

/// The three personas of one run. Each owns its own session.
#[derive(Debug)]
pub struct ReviewAgents {
    pub analyst: SessionAgent,
    pub compliance: SessionAgent,
    pub negotiator: SessionAgent,
}

/// Outcome of one review run.
///
/// `negotiation_draft` is `Some` exactly when `violation_detected` is true.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineResult {
    pub extracted_clauses: String,
    pub audit_report: String,
    pub violation_detected: bool,
    pub negotiation_draft: Option<String>,
}

impl PipelineResult {
    pub fn is_approved(&self) -> bool {
        !self.violation_detected
    }
}

pub struct ReviewPipeline {
    source: Box<dyn TextSource>,
    agents: ReviewAgents,
    sink: Box<dyn OutputSink>,
    presenter: Box<dyn Presenter>,
}

impl ReviewPipeline {
    pub fn new(
        source: Box<dyn TextSource>,
        agents: ReviewAgents,
        sink: Box<dyn OutputSink>,
        presenter: Box<dyn Presenter>,
    ) -> Self {
        Self {
            source,
            agents,
            sink,
            presenter,
        }
    }

    pub fn agents(&self) -> &ReviewAgents {
        &self.agents
    }

    /// Review the contract at `contract`. Never aborts part-way.
    pub async fn run(&mut self, contract: &Path) -> PipelineResult {
        info!(path = %contract.display(), "processing contract");
        let raw_text = extract_or_diagnostic(self.source.as_ref(), contract);

        let extracted_clauses = self
            .agents
            .analyst
            .ask(&prompts::extraction_prompt(&raw_text))
            .await;
        self.presenter.render("Analyst Report", &extracted_clauses);

        let audit_report = self
            .agents
            .compliance
            .ask(&prompts::audit_prompt(&extracted_clauses))
            .await;
        self.presenter.render("Compliance Audit", &audit_report);

        let violation_detected = detect_violation(&audit_report);
        let negotiation_draft = if violation_detected {
            warn!("violations detected, starting negotiation");
            let draft = self
                .agents
                .negotiator
                .ask(&prompts::negotiation_prompt(&audit_report))
                .await;
            self.presenter.render("Negotiation Package", &draft);
            if let Err(e) = self.sink.write_draft(&draft) {
                error!(error = %e, "failed to persist negotiation draft");
            }
            Some(draft)
        } else {
            info!("contract approved");
            None
        };

        PipelineResult {
            extracted_clauses,
            audit_report,
            violation_detected,
            negotiation_draft,
        }
    }
}
