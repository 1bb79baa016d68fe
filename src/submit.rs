// Submission flow: one user action turns into at most two backend calls,
// research first and report rendering second. The report call only happens
// after a research call that succeeded and parsed.

use tracing::{info, info_span, warn};

use crate::api::{Mode, PdfRequest, ResearchBackend, ResearchRequest, ResearchResult};
use crate::error::ApiError;
use crate::report::ReportArtifact;

/// A research topic, trimmed and known to be non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query(String);

impl Query {
    /// Trim `raw`; `None` when nothing is left.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Query(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// What happened to the report step of a completed submission.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportOutcome {
    Ready(ReportArtifact),
    Failed { reason: String },
}

/// Result of one submission, ready to be rendered.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Nothing usable was typed; no request was made.
    EmptyQuery,
    /// The research endpoint answered with a non-success status.
    ResearchRejected { status: u16, body: String },
    /// Transport failure or malformed research response.
    Failed { message: String },
    /// Research succeeded. The report may or may not have been produced.
    Completed {
        query: Query,
        mode: Mode,
        result: ResearchResult,
        report: ReportOutcome,
    },
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            Outcome::Completed {
                report: ReportOutcome::Ready(_),
                ..
            }
        )
    }
}

/// Run the research pipeline for `raw_query` against `backend`.
pub fn submit<B: ResearchBackend + ?Sized>(backend: &B, raw_query: &str, mode: Mode) -> Outcome {
    let Some(query) = Query::parse(raw_query) else {
        warn!("empty research query, nothing submitted");
        return Outcome::EmptyQuery;
    };

    let span = info_span!("submit", mode = mode.label(), query = query.as_str());
    let _guard = span.enter();

    let request = ResearchRequest::new(query.as_str());
    let result = match backend.research(mode, &request) {
        Ok(result) => result,
        Err(ApiError::Status { status, body, .. }) => {
            return Outcome::ResearchRejected { status, body };
        }
        Err(e) => {
            warn!(endpoint = e.endpoint(), error = %e, "research call failed");
            return Outcome::Failed { message: e.to_string() };
        }
    };
    info!(
        sources = result.sources.len(),
        follow_ups = result.follow_up_questions.len(),
        "research completed"
    );

    let pdf_request = PdfRequest {
        query: query.as_str().to_string(),
        report_md: result.report_md.clone(),
    };
    let report = match backend.generate_pdf(&pdf_request) {
        Ok(bytes) => {
            info!(bytes = bytes.len(), "report generated");
            ReportOutcome::Ready(ReportArtifact::new(query.as_str(), bytes))
        }
        Err(e) => {
            warn!(endpoint = e.endpoint(), error = %e, "report generation failed");
            ReportOutcome::Failed { reason: e.to_string() }
        }
    };

    Outcome::Completed {
        query,
        mode,
        result,
        report,
    }
}
