use crate::infra::{EchoJudge, KeywordEvaluator, LengthDesignScorer};
use chrono::Utc;
use clap::Args;
use std::sync::Arc;

use interview_ai::error::AppError;
use interview_ai::workflows::interview::rounds::{NullSpeechCapture, SubmissionTrigger};
use interview_ai::workflows::interview::{
    InterviewService, RoundView, StartOutcome, SubmitOutcome, SummaryOutcome,
};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Role to interview for (ai, fullstack, security, devops)
    #[arg(long, default_value = "ai")]
    pub(crate) role: String,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ReportArgs {
    /// Role to interview for (ai, fullstack, security, devops)
    #[arg(long, default_value = "ai")]
    pub(crate) role: String,
}

type DemoService = InterviewService<KeywordEvaluator, LengthDesignScorer, EchoJudge>;

fn demo_service() -> Arc<DemoService> {
    Arc::new(InterviewService::new(
        Arc::new(KeywordEvaluator),
        Arc::new(LengthDesignScorer),
        Arc::new(EchoJudge),
        Arc::new(NullSpeechCapture),
    ))
}

const DEMO_ANSWER: &str = "I would approach this by breaking the problem into smaller parts, \
covering the core requirements first and then discussing tradeoffs, monitoring, and how I \
would validate the solution with the team before rolling it out.";

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let service = demo_service();
    println!("Scripted interview for role '{}'", args.role);
    play_interview(&service, &args.role).await?;

    match service.summary(&args.role) {
        SummaryOutcome::Summary(summary) => {
            println!("\nSummary for {}", summary.role_title);
            if let (Some(score), Some(label)) = (summary.overall_score, summary.overall_label) {
                println!("Overall: {score:.1} ({label})");
            }
            for entry in &summary.rounds {
                match &entry.result {
                    Some(result) => println!(
                        "  Round {} {}: {:.1}",
                        entry.round, entry.label, result.score
                    ),
                    None => println!("  Round {} {}: not completed", entry.round, entry.label),
                }
            }
        }
        SummaryOutcome::Redirect { .. } => println!("No rounds completed."),
    }

    Ok(())
}

pub(crate) async fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let service = demo_service();
    play_interview(&service, &args.role).await?;

    match service.report(&args.role) {
        Ok(document) => {
            for (number, page) in document.pages.iter().enumerate() {
                println!("--- page {} ---", number + 1);
                for line in &page.lines {
                    println!("{}", line.text);
                }
            }
        }
        Err(_) => println!("No rounds completed."),
    }

    Ok(())
}

async fn play_interview(service: &DemoService, role: &str) -> Result<(), AppError> {
    // Rounds one and two: free-text questions.
    for round in [1u8, 2] {
        let StartOutcome::Round(snapshot) = service.start_round(role, round, Utc::now())? else {
            println!("Unknown role '{role}', stopping.");
            return Ok(());
        };
        if let RoundView::Qa { question, .. } = &snapshot.view {
            println!("\nRound {round}: {question}");
        }

        loop {
            let outcome = service
                .submit_answer(
                    role,
                    round,
                    DEMO_ANSWER.to_string(),
                    SubmissionTrigger::Manual,
                    Utc::now(),
                )
                .await?;
            match outcome {
                SubmitOutcome::NextQuestion { view } => {
                    if let RoundView::Qa { question, .. } = &view {
                        println!("Next: {question}");
                    }
                }
                SubmitOutcome::RoundComplete { result, .. } => {
                    println!("Round {round} complete: {:.1}", result.score);
                    break;
                }
                SubmitOutcome::Redirect { .. } => break,
            }
        }
    }

    // Round three: coding against the offline judge.
    let StartOutcome::Round(snapshot) = service.start_round(role, 3, Utc::now())? else {
        return Ok(());
    };
    let RoundView::Coding {
        mut code,
        mut language,
        ..
    } = snapshot.view
    else {
        return Ok(());
    };
    loop {
        let results = service
            .run_code(role, 3, code.clone(), Some(language.clone()))
            .await?;
        let passed = results.iter().filter(|r| r.passed).count();
        println!("\nCoding run: {passed}/{} cases passed", results.len());

        match service.submit_code(role, 3, Utc::now())? {
            SubmitOutcome::NextQuestion { view } => {
                if let RoundView::Coding {
                    code: next_code,
                    language: next_language,
                    ..
                } = view
                {
                    code = next_code;
                    language = next_language;
                }
            }
            SubmitOutcome::RoundComplete { result, .. } => {
                println!("Round 3 complete: {:.1}", result.score);
                break;
            }
            SubmitOutcome::Redirect { .. } => break,
        }
    }

    // Round four: system design essay.
    if let StartOutcome::Round(snapshot) = service.start_round(role, 4, Utc::now())? {
        if let RoundView::Design { question, .. } = &snapshot.view {
            println!("\nRound 4: {question}");
        }
        let outcome = service
            .submit_answer(
                role,
                4,
                DEMO_ANSWER.to_string(),
                SubmissionTrigger::Manual,
                Utc::now(),
            )
            .await?;
        if let SubmitOutcome::RoundComplete { result, .. } = outcome {
            println!("Round 4 complete: {:.1}", result.score);
        }
    }

    Ok(())
}
