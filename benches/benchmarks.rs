// benches/benchmarks.rs — Performance benchmarks (criterion)
//
// Three hot paths:
//   1. Reply selection from a seeded RNG
//   2. A full session (select, 10 messages, end) with delays disabled
//   3. Projection of a completed session into its report view

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use hcpcoach::assessment::FixedAssessor;
use hcpcoach::dialogue::{select_response, ScriptedResponder};
use hcpcoach::persona::PersonaCatalog;
use hcpcoach::session::{Coach, NavTarget, Session, SessionEvent};
use hcpcoach::view;

// ─── Helpers ────────────────────────────────────────────────────────────────

fn coach() -> Coach {
    Coach::new(
        Arc::new(PersonaCatalog::builtin()),
        Arc::new(ScriptedResponder::seeded(7)),
        Arc::new(FixedAssessor),
    )
}

async fn run_session(coach: &Coach, messages: usize) -> Session {
    let mut s = Session::new();
    let events = [
        SessionEvent::navigate(NavTarget::PersonaList),
        SessionEvent::select_persona("Dr. Sarah Chen"),
    ];
    for event in events {
        coach.handle_event(&mut s, event).await.expect("setup event");
    }
    for i in 0..messages {
        coach
            .handle_event(&mut s, SessionEvent::send_message(format!("message {i}")))
            .await
            .expect("send message");
    }
    coach
        .handle_event(&mut s, SessionEvent::EndSession)
        .await
        .expect("end session");
    s
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .expect("tokio runtime")
}

// ─── Benchmarks ─────────────────────────────────────────────────────────────

fn bench_select_response(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(1);
    c.bench_function("select_response", |b| {
        b.iter(|| select_response(&mut rng, black_box("Dr. Sarah Chen"), black_box("hello")))
    });
}

fn bench_full_session(c: &mut Criterion) {
    let rt = runtime();
    let coach = coach();
    c.bench_function("full_session_10_messages", |b| {
        b.iter(|| rt.block_on(run_session(&coach, black_box(10))))
    });
}

fn bench_project_report(c: &mut Criterion) {
    let rt = runtime();
    let coach = coach();
    let session = rt.block_on(run_session(&coach, 25));
    c.bench_function("project_report_view", |b| {
        b.iter(|| view::project(black_box(&session), coach.catalog()))
    });
}

criterion_group!(
    benches,
    bench_select_response,
    bench_full_session,
    bench_project_report
);
criterion_main!(benches);
