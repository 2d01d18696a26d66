// src/cli/chat.rs — Line-based practice session

use std::sync::Arc;

use crate::persona::PersonaCatalog;
use crate::session::{Coach, NavTarget, Session, SessionEvent};
use crate::view::{self, ReportView};

/// Run the interactive practice REPL.
pub async fn run_chat(coach: Arc<Coach>, persona: Option<String>) -> anyhow::Result<()> {
    let catalog = coach.catalog();
    let mut session = Session::new();

    eprintln!(
        "hcpcoach v{} | {} personas | /help for commands\n",
        env!("CARGO_PKG_VERSION"),
        catalog.len(),
    );

    coach
        .handle_event(&mut session, SessionEvent::navigate(NavTarget::PersonaList))
        .await?;
    let first = match persona {
        Some(name) => name,
        None => pick_persona(catalog)?.ok_or_else(|| anyhow::anyhow!("Selection cancelled"))?,
    };
    start_with(&coach, &mut session, first).await?;

    while let Some(input) = read_input() {
        let trimmed = input.trim();

        if trimmed == "quit" || trimmed == "exit" || trimmed == "/quit" {
            break;
        }

        if trimmed.starts_with('/') {
            match handle_slash_command(trimmed, &coach, &mut session).await {
                Ok(Flow::Continue) => continue,
                Ok(Flow::Quit) => break,
                Err(e) => {
                    eprintln!("  {e}");
                    continue;
                }
            }
        }

        if trimmed.is_empty() {
            continue;
        }

        let name = persona_name(&session);
        eprintln!("  ({name} is typing...)");
        match coach
            .handle_event(&mut session, SessionEvent::send_message(message_text(&input)))
            .await
        {
            Ok(()) => {
                if let Some(reply) = session.transcript().last() {
                    println!("{name}: {}\n", reply.content);
                }
            }
            Err(e) if e.is_retriable() => eprintln!("  {e} (try again)"),
            Err(e) => eprintln!("  {e}"),
        }
    }

    eprintln!(
        "\nSession ended. {} exchange(s) this conversation.",
        session.exchange_count()
    );
    Ok(())
}

enum Flow {
    Continue,
    Quit,
}

async fn handle_slash_command(
    input: &str,
    coach: &Coach,
    session: &mut Session,
) -> anyhow::Result<Flow> {
    let cmd = input.split_whitespace().next().unwrap_or("");

    match cmd {
        "/help" => {
            eprintln!("  /end      End the session and show the report");
            eprintln!("  /switch   Pick a different persona");
            eprintln!("  /who      Show the current persona");
            eprintln!("  /quit     Exit");
        }

        "/who" => match session.selected_persona() {
            Some(p) => eprintln!(
                "  {} | {} | {} years | {}\n  {}",
                p.name, p.specialty, p.experience_years, p.difficulty, p.context
            ),
            None => eprintln!("  No persona selected."),
        },

        "/switch" => {
            let next = pick_persona(coach.catalog())?;
            if !restart_with(coach, session, SessionEvent::SwitchPersona, next).await? {
                eprintln!("  Keeping {}.", persona_name(session));
            }
        }

        "/end" => {
            eprintln!("  Analyzing your performance...");
            coach.handle_event(session, SessionEvent::EndSession).await?;
            if let Some(report) = view::report(session) {
                print_report(&report);
            }
            return after_report(coach, session).await;
        }

        _ => eprintln!("  Unknown command: {cmd} (try /help)"),
    }
    Ok(Flow::Continue)
}

/// Offer another round once the report is shown.
async fn after_report(coach: &Coach, session: &mut Session) -> anyhow::Result<Flow> {
    let options = vec!["Practice with another persona", "Return to dashboard and quit"];
    let choice = inquire::Select::new("What next?", options)
        .prompt()
        .unwrap_or("Return to dashboard and quit");

    if choice.starts_with("Practice") {
        let next = pick_persona(coach.catalog()).unwrap_or(None);
        if restart_with(coach, session, SessionEvent::RestartWithNewPersona, next).await? {
            return Ok(Flow::Continue);
        }
    }
    coach
        .handle_event(session, SessionEvent::ReturnToDashboard)
        .await?;
    Ok(Flow::Quit)
}

/// Apply `transition` and open a conversation with `next`. A cancelled
/// pick (`None`) or an unknown name leaves the session as it was.
async fn restart_with(
    coach: &Coach,
    session: &mut Session,
    transition: SessionEvent,
    next: Option<String>,
) -> anyhow::Result<bool> {
    let Some(name) = next else {
        return Ok(false);
    };
    coach.catalog().get(&name)?;
    coach.handle_event(session, transition).await?;
    start_with(coach, session, name).await?;
    Ok(true)
}

async fn start_with(coach: &Coach, session: &mut Session, name: String) -> anyhow::Result<()> {
    coach
        .handle_event(session, SessionEvent::select_persona(name))
        .await?;
    if let Some(greeting) = session.transcript().first() {
        println!("{}: {}\n", persona_name(session), greeting.content);
    }
    Ok(())
}

/// `None` when the picker is dismissed with Esc.
fn pick_persona(catalog: &PersonaCatalog) -> anyhow::Result<Option<String>> {
    let labels: Vec<String> = catalog
        .list()
        .iter()
        .map(|p| format!("{} ({}, {})", p.name, p.specialty, p.difficulty))
        .collect();
    let choice = inquire::Select::new("Choose your practice partner:", labels.clone())
        .with_help_message("Harder personas raise tougher objections")
        .prompt_skippable()
        .map_err(|_| anyhow::anyhow!("Selection cancelled"))?;
    let Some(choice) = choice else {
        return Ok(None);
    };

    let idx = labels.iter().position(|l| *l == choice).unwrap_or(0);
    catalog
        .list()
        .get(idx)
        .map(|p| Some(p.name.clone()))
        .ok_or_else(|| anyhow::anyhow!("No personas available"))
}

/// The typed line minus its terminator; inner and leading spaces are kept.
fn message_text(input: &str) -> &str {
    input.trim_end_matches(|c| c == '\n' || c == '\r')
}

fn persona_name(session: &Session) -> String {
    session
        .selected_persona()
        .map(|p| p.name.clone())
        .unwrap_or_else(|| "Counterpart".into())
}

fn print_report(r: &ReportView) {
    let a = &r.assessment;
    println!("\n=== Session Complete: {} ===", r.persona_name);
    println!(
        "Overall {}% ({:+} vs {}) | {} exchange(s) | {} | level: {}",
        a.overall_score,
        r.score_delta,
        r.baseline,
        r.exchange_count,
        r.duration,
        a.skill_level.as_str()
    );
    println!();
    for row in &r.categories {
        println!(
            "  {:<22} {:>3}  (team {:>3})",
            row.category.as_str(),
            row.score,
            row.benchmark
        );
    }
    println!("\nInsights:");
    for i in &a.insights {
        println!("  - {i}");
    }
    println!("\nRecommended modules:");
    for m in &a.modules {
        println!(
            "  [{}] {} ({}, {})",
            m.priority.as_str(),
            m.title,
            m.kind,
            m.duration
        );
    }
    println!("\nPractice scenarios:");
    for s in &a.scenarios {
        println!("  [{}] {} with {}", s.difficulty, s.title, s.personas.join(", "));
    }
    println!("\n{}\n", r.coaching_note);
}

fn read_input() -> Option<String> {
    use std::io::{self, BufRead, Write};

    print!("> ");
    io::stdout().flush().ok();

    let stdin = io::stdin();
    let mut line = String::new();
    match stdin.lock().read_line(&mut line) {
        Ok(0) => None, // EOF
        Ok(_) => Some(line),
        Err(_) => None,
    }
}
