use std::sync::Arc;

use super::common::*;
use crate::calculator::domain::WizardStep;
use crate::calculator::navigator::NavigationError;
use crate::calculator::persistence::MemorySlot;
use crate::calculator::session::NextOutcome;
use crate::calculator::submission::SubmissionOutcome;
use crate::report::{ResultsPage, COULD_NOT_CALCULATE};

#[tokio::test]
async fn successful_submission_stores_result_and_renders_backend_report() {
    let gateway = Arc::new(StaticGateway::new(backend_document()));
    let mut harness = harness(gateway.clone());
    session_at_review(&mut harness.session).await;

    let outcome = harness.session.next().await.expect("submission runs");

    let NextOutcome::Results { submission, page } = outcome else {
        panic!("expected the results destination");
    };
    assert_eq!(submission.outcome, SubmissionOutcome::Stored);
    assert!(stored(&harness.results).is_some());

    let ResultsPage::Calculated { report } = page else {
        panic!("expected a calculated page");
    };
    let titles: Vec<_> = report.programs.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, ["ESSOR", "C3i", "CanExport SMEs"]);
    assert_eq!(report.company.company, "Usinage Lapointe");
    assert_eq!(report.chart[3].value, 58_000.0);

    let payloads = gateway.payloads();
    assert_eq!(payloads.len(), 1);
    assert_eq!(payloads[0]["totalBudget"], 100_000.0);
    assert_eq!(payloads[0]["disclaimerAccepted"], true);
    assert!(payloads[0]["submittedAt"].is_string());
}

#[tokio::test]
async fn soft_failure_clears_stale_result() {
    let gateway = Arc::new(FailingGateway::new(503));
    let stale = MemorySlot::with_value(backend_document().to_string());
    let mut harness = harness_with_results(gateway.clone(), stale);
    session_at_review(&mut harness.session).await;

    let outcome = harness.session.next().await.expect("navigation succeeds");

    let NextOutcome::Results { submission, page } = outcome else {
        panic!("expected the results destination");
    };
    assert!(matches!(
        submission.outcome,
        SubmissionOutcome::SoftFailed { .. }
    ));
    assert_eq!(stored(&harness.results), None);
    match page {
        ResultsPage::CouldNotCalculate { message, estimate } => {
            assert_eq!(message, COULD_NOT_CALCULATE);
            assert_eq!(estimate.summary.intensity_low, Some(25));
            assert_eq!(estimate.summary.support_high, 38_000.0);
        }
        other => panic!("stale data rendered: {other:?}"),
    }
    assert_eq!(gateway.calls(), 1);
    assert!(!harness.session.snapshot().submitting);
}

#[tokio::test]
async fn invalid_step_blocks_next_without_mutation() {
    let mut harness = harness(Arc::new(FailingGateway::new(500)));

    let err = harness.session.next().await.expect_err("empty profile");

    assert_eq!(err, NavigationError::StepIncomplete(WizardStep::Profile));
    assert_eq!(harness.session.snapshot().current_step, WizardStep::Profile);
    assert_eq!(stored(&harness.answers), None);
}

#[tokio::test]
async fn reset_keeps_the_stored_result() {
    let gateway = Arc::new(StaticGateway::new(backend_document()));
    let mut harness = harness(gateway);
    session_at_review(&mut harness.session).await;
    harness.session.next().await.expect("submits");

    let snapshot = harness.session.reset();

    assert_eq!(snapshot.current_step, WizardStep::Profile);
    assert_eq!(snapshot.total_budget, 0.0);
    assert!(harness.session.results().is_calculated());

    harness.session.clear_results();
    assert!(!harness.session.results().is_calculated());
}

#[tokio::test]
async fn snapshot_reports_validity_per_step() {
    let mut harness = harness(Arc::new(FailingGateway::new(500)));

    let snapshot = harness.session.update(profile_patch());

    let validity: Vec<_> = snapshot.steps.iter().map(|status| status.valid).collect();
    assert_eq!(validity, [true, false, false, true, false]);
    assert_eq!(snapshot.step_label, "Business Profile");
}

#[test]
fn non_object_result_is_treated_as_missing() {
    let harness = harness_with_results(
        Arc::new(FailingGateway::new(500)),
        MemorySlot::with_value("[]"),
    );

    assert!(harness.session.stored_result().is_none());
    assert!(!harness.session.results().is_calculated());
}

#[tokio::test]
async fn export_request_follows_the_rendered_page() {
    let mut harness = harness(Arc::new(StaticGateway::new(backend_document())));
    session_at_review(&mut harness.session).await;

    let estimated = harness.session.export_request();
    assert_eq!(estimated.calc.location_label, "Montérégie, Québec");
    assert_eq!(estimated.estimates.intensity_high, Some(38.0));

    harness.session.next().await.expect("submits");
    let calculated = harness.session.export_request();
    assert_eq!(calculated.calc.company_name, "Usinage Lapointe");
    assert_eq!(calculated.calc.location_label, "Montérégie");
    assert_eq!(calculated.top_programs[0].title, "ESSOR");
    assert_eq!(calculated.estimates.intensity_low, None);
}
