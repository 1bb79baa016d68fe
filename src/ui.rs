// UI layer: interactive menu built on `dialoguer`, a spinner from
// `indicatif` while the backend works, and plain-text rendering of the
// submission outcome. The functions are synchronous; each menu pick runs
// one full submission before returning to the menu.

use crate::api::{ApiClient, Mode, PdfRequest, ResearchBackend, ResearchRequest, ResearchResult};
use crate::config::Config;
use crate::error::ApiResult;
use crate::report::ReportArtifact;
use crate::submit::{submit, Outcome, ReportOutcome};
use anyhow::Result;
use crossterm::style::Stylize;
use crossterm::tty::IsTty;
use dialoguer::{Confirm, Input, Select};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// One line of rendered output. Kept structured so the same rendering can
/// be printed with colours or compared as plain text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Heading(String),
    Text(String),
    Success(String),
    Warning(String),
    Error(String),
    Rule,
}

impl Line {
    fn plain(&self) -> String {
        match self {
            Line::Heading(s) => format!("## {s}"),
            Line::Text(s) | Line::Success(s) | Line::Warning(s) | Line::Error(s) => s.clone(),
            Line::Rule => "---".into(),
        }
    }

    fn styled(&self) -> String {
        match self {
            Line::Heading(s) => format!("{}", s.clone().bold().cyan()),
            Line::Text(s) => s.clone(),
            Line::Success(s) => format!("{}", s.clone().green()),
            Line::Warning(s) => format!("{}", s.clone().yellow()),
            Line::Error(s) => format!("{}", s.clone().red()),
            Line::Rule => format!("{}", "-".repeat(40).dark_grey()),
        }
    }
}

/// Turn an outcome into display lines.
pub fn outcome_lines(outcome: &Outcome) -> Vec<Line> {
    match outcome {
        Outcome::EmptyQuery => vec![Line::Warning("Please enter a valid research query.".into())],
        Outcome::ResearchRejected { body, .. } => vec![Line::Error(format!("Error: {body}"))],
        Outcome::Failed { message } => vec![Line::Error(format!("Error occurred: {message}"))],
        Outcome::Completed { result, report, .. } => {
            let mut lines = vec![Line::Success("Summary generated successfully!".into())];
            lines.extend(result_lines(result));
            lines.push(Line::Rule);
            lines.push(Line::Heading("Download Report".into()));
            match report {
                ReportOutcome::Ready(artifact) => lines.push(Line::Text(format!(
                    "{} ({} bytes)",
                    artifact.file_name(),
                    artifact.len()
                ))),
                ReportOutcome::Failed { .. } => {
                    lines.push(Line::Error("Failed to generate PDF report.".into()))
                }
            }
            lines
        }
    }
}

fn result_lines(result: &ResearchResult) -> Vec<Line> {
    let mut lines = vec![Line::Heading("Sources".into())];
    lines.extend(result.sources.iter().map(|s| Line::Text(format!("- [{s}]({s})"))));

    lines.push(Line::Heading("Reasoning Summary".into()));
    lines.push(Line::Text(result.reasoning_summary.clone()));

    lines.push(Line::Heading("Fact Consistency Check".into()));
    lines.push(Line::Text(result.fact_consistency.clone()));

    lines.push(Line::Heading("Follow-up Questions".into()));
    lines.extend(result.follow_up_questions.iter().map(|q| Line::Text(format!("- {q}"))));
    lines
}

/// Plain-text rendering of an outcome, one line per entry.
pub fn render(outcome: &Outcome) -> String {
    display_lines(outcome, false).join("\n")
}

/// Rendered lines, coloured only when `styled` is set.
pub fn display_lines(outcome: &Outcome, styled: bool) -> Vec<String> {
    outcome_lines(outcome)
        .iter()
        .map(|line| if styled { line.styled() } else { line.plain() })
        .collect()
}

/// Print an outcome to stdout. Colours are used only when stdout is a
/// terminal, so redirected output stays free of escape codes.
pub fn print_outcome(outcome: &Outcome) {
    for line in display_lines(outcome, std::io::stdout().is_tty()) {
        println!("{line}");
    }
}

/// Backend wrapper that keeps the spinner message in step with the call
/// currently in flight.
struct WithSpinner<'a, B: ResearchBackend> {
    inner: &'a B,
    spinner: &'a ProgressBar,
}

impl<B: ResearchBackend> ResearchBackend for WithSpinner<'_, B> {
    fn research(&self, mode: Mode, req: &ResearchRequest) -> ApiResult<ResearchResult> {
        self.spinner
            .set_message("Fetching top sources and generating reasoning summary...");
        self.inner.research(mode, req)
    }

    fn generate_pdf(&self, req: &PdfRequest) -> ApiResult<Vec<u8>> {
        self.spinner.set_message("Generating PDF...");
        self.inner.generate_pdf(req)
    }
}

/// Run one submission with a spinner on screen, clearing it afterwards.
pub fn submit_with_spinner<B: ResearchBackend>(backend: &B, query: &str, mode: Mode) -> Result<Outcome> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
    spinner.enable_steady_tick(Duration::from_millis(100));
    let outcome = submit(&WithSpinner { inner: backend, spinner: &spinner }, query, mode);
    spinner.finish_and_clear();
    Ok(outcome)
}

/// Main interactive menu. Each pick of a research mode asks for a topic,
/// runs the submission and shows the result; "Exit" leaves the loop.
pub fn main_menu(api: &ApiClient, cfg: &Config) -> Result<()> {
    let mut items: Vec<&str> = Mode::ALL.iter().map(|m| m.label()).collect();
    items.push("Exit");
    loop {
        let selection = Select::new()
            .with_prompt("Select Mode")
            .items(&items)
            .default(0)
            .interact()?;
        let Some(&mode) = Mode::ALL.get(selection) else {
            break;
        };

        // Empty input is allowed here so the warning path is reachable.
        let query: String = Input::new()
            .with_prompt("Enter your research topic")
            .allow_empty(true)
            .interact_text()?;

        let outcome = submit_with_spinner(api, &query, mode)?;
        print_outcome(&outcome);

        if let Outcome::Completed { report: ReportOutcome::Ready(artifact), .. } = &outcome {
            let save = Confirm::new()
                .with_prompt(format!("Save {} to {}?", artifact.file_name(), cfg.out_dir.display()))
                .default(true)
                .interact()?;
            if save {
                save_report(artifact, cfg);
            }
        }
        println!();
    }
    Ok(())
}

/// Single non-interactive submission for `--query`. Returns whether the
/// full pipeline (research and report) succeeded.
pub fn run_once(api: &ApiClient, cfg: &Config, query: &str, mode: Mode, save: bool) -> Result<bool> {
    let outcome = submit_with_spinner(api, query, mode)?;
    print_outcome(&outcome);
    if save {
        if let Outcome::Completed { report: ReportOutcome::Ready(artifact), .. } = &outcome {
            save_report(artifact, cfg);
        }
    }
    Ok(outcome.is_success())
}

fn save_report(artifact: &ReportArtifact, cfg: &Config) {
    match artifact.save_to(&cfg.out_dir) {
        Ok(path) => println!("Report saved to {}", path.display()),
        Err(e) => println!("Saving report failed: {:#}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::submit::Query;

    fn scenario(report: ReportOutcome) -> Outcome {
        Outcome::Completed {
            query: Query::parse("AI in healthcare").unwrap(),
            mode: Mode::Quick,
            result: ResearchResult {
                sources: vec!["https://a.com".into()],
                reasoning_summary: "AI shortens diagnosis time.".into(),
                fact_consistency: "Consistent".into(),
                follow_up_questions: vec!["Q1?".into()],
                report_md: "# Report".into(),
            },
            report,
        }
    }

    #[test]
    fn completed_outcome_renders_every_section() {
        let artifact = ReportArtifact::new("AI in healthcare", b"%PDF-1.4...".to_vec());
        let text = render(&scenario(ReportOutcome::Ready(artifact)));

        assert!(text.contains("## Sources\n- [https://a.com](https://a.com)\n"), "{text}");
        assert!(text.contains("## Reasoning Summary\nAI shortens diagnosis time."));
        assert!(text.contains("## Fact Consistency Check\nConsistent"));
        assert!(text.contains("## Follow-up Questions\n- Q1?"));
        assert!(text.contains("AI in healthcare_report.pdf"));
        assert!(!text.contains("Failed to generate PDF report."));
        assert_eq!(text.matches("\n- ").count(), 2);
    }

    #[test]
    fn pdf_failure_still_shows_results() {
        let text = render(&scenario(ReportOutcome::Failed { reason: "500".into() }));

        assert!(text.contains("AI shortens diagnosis time."));
        assert!(text.contains("- Q1?"));
        assert!(text.ends_with("Failed to generate PDF report."), "{text}");
        assert!(!text.contains("_report.pdf"));
    }

    #[test]
    fn plain_lines_carry_no_escape_codes() {
        let outcome = scenario(ReportOutcome::Failed { reason: "500".into() });

        let plain = display_lines(&outcome, false);
        assert!(plain.iter().all(|l| !l.contains('\x1b')), "{plain:?}");
        assert_eq!(plain.join("\n"), render(&outcome));

        let styled = display_lines(&outcome, true);
        assert!(styled.iter().any(|l| l.contains('\x1b')));
        assert_eq!(styled.len(), plain.len());
    }

    #[test]
    fn error_outcomes_render_single_line() {
        assert_eq!(render(&Outcome::EmptyQuery), "Please enter a valid research query.");
        assert_eq!(
            render(&Outcome::ResearchRejected { status: 422, body: "query too long".into() }),
            "Error: query too long"
        );
        assert_eq!(
            render(&Outcome::Failed { message: "connection refused".into() }),
            "Error occurred: connection refused"
        );
    }
}
