//! Live progress on stderr

use colored::*;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use crate::bulk_delete::{RunEvent, RunSummary};
use crate::cli::commands::OutputFormat;

const BAR_TEMPLATE: &str = "[{bar:30}] {msg}";

pub struct ProgressPrinter {
    enabled: bool,
    draw_target: fn() -> ProgressDrawTarget,
    bar: Option<ProgressBar>,
}

impl ProgressPrinter {
    /// Draws on stderr; the bar hides itself when stderr is not a terminal
    pub fn new(format: OutputFormat) -> Self {
        Self {
            enabled: format == OutputFormat::Text,
            draw_target: ProgressDrawTarget::stderr,
            bar: None,
        }
    }

    pub fn handle(&mut self, event: RunEvent<'_>) {
        if !self.enabled {
            return;
        }

        match event {
            RunEvent::Started(summary) => {
                eprintln!("Deleting {} products...", summary.total.to_string().bold());
                let bar =
                    ProgressBar::with_draw_target(Some(summary.total as u64), (self.draw_target)());
                bar.set_style(bar_style());
                bar.set_message(status_message(summary));
                self.bar = Some(bar);
            }
            RunEvent::Completed { outcome, summary } => {
                let failure = outcome
                    .failure()
                    .map(|kind| format!("  {} {} ({})", "✗".red(), outcome.identifier, kind));

                match &self.bar {
                    Some(bar) => {
                        if let Some(line) = failure {
                            bar.suspend(|| eprintln!("{}", line));
                        }
                        bar.set_position(summary.completed() as u64);
                        bar.set_message(status_message(summary));
                    }
                    None => {
                        if let Some(line) = failure {
                            eprintln!("{}", line);
                        }
                    }
                }
            }
            RunEvent::Finished(summary) => {
                if let Some(bar) = self.bar.take() {
                    bar.set_message(status_message(summary));
                    if summary.cancelled {
                        bar.abandon();
                    } else {
                        bar.finish();
                    }
                }
            }
        }
    }
}

fn bar_style() -> ProgressStyle {
    ProgressStyle::with_template(BAR_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>.")
}

/// ` 42%  21/50  ok 20  failed 1`
pub fn status_message(summary: &RunSummary) -> String {
    format!(
        "{:>3}%  {}/{}  ok {}  failed {}",
        summary.progress,
        summary.completed(),
        summary.total,
        summary.success,
        summary.failed
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bulk_delete::{DeletionOutcome, FailureKind};
    use crate::sheet::Identifier;

    fn hidden(format: OutputFormat) -> ProgressPrinter {
        ProgressPrinter {
            draw_target: ProgressDrawTarget::hidden,
            ..ProgressPrinter::new(format)
        }
    }

    #[test]
    fn test_status_message() {
        let summary = RunSummary {
            total: 4,
            success: 1,
            failed: 1,
            progress: 50,
            ..RunSummary::default()
        };

        assert_eq!(status_message(&summary), " 50%  2/4  ok 1  failed 1");
    }

    #[test]
    fn test_bar_follows_events() {
        let mut printer = hidden(OutputFormat::Text);
        let mut summary = RunSummary::start(2, Vec::new());

        printer.handle(RunEvent::Started(&summary));
        assert_eq!(printer.bar.as_ref().unwrap().length(), Some(2));

        let outcome =
            DeletionOutcome::failed(Identifier::new("GONE").unwrap(), FailureKind::NotFound);
        summary.record(&outcome);
        printer.handle(RunEvent::Completed {
            outcome: &outcome,
            summary: &summary,
        });
        assert_eq!(printer.bar.as_ref().unwrap().position(), 1);

        summary.finish();
        printer.handle(RunEvent::Finished(&summary));
        assert!(printer.bar.is_none());
    }

    #[test]
    fn test_json_output_draws_nothing() {
        let mut printer = hidden(OutputFormat::Json);
        let summary = RunSummary::start(3, Vec::new());

        printer.handle(RunEvent::Started(&summary));

        assert!(printer.bar.is_none());
    }
}
