use std::sync::Arc;

use quiz_core::model::{AnswerKey, QuestionRecord, QuestionSet};
use services::{BankError, QuestionBankSource};

use super::test_harness::{
    drive_dom, sample_records, setup_quiz_harness, setup_quiz_harness_with_source,
};
use crate::vm::QuizIntent;

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_renders_start_gate() {
    let mut harness = setup_quiz_harness(sample_records());
    harness.rebuild();
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Welcome to the"), "missing welcome in {html}");
    assert!(html.contains("Start Quiz"), "missing start button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_walks_a_full_pass() {
    let mut harness = setup_quiz_harness(sample_records());
    harness.rebuild();
    harness.drive_async().await;

    let dispatch = harness.handles.dispatch();
    dispatch.call(QuizIntent::Start);
    drive_dom(&mut harness.dom);

    let html = harness.render();
    assert!(html.contains("Q1"), "missing first prompt in {html}");
    assert!(html.contains("Time Left: 30s"), "missing countdown in {html}");
    assert!(html.contains("1 / 3 Questions"), "missing progress in {html}");
    assert!(html.contains("disabled"), "previous not disabled in {html}");

    dispatch.call(QuizIntent::Select(AnswerKey::new("b")));
    drive_dom(&mut harness.dom);
    let html = harness.render();
    assert!(
        html.contains("quiz-option--selected"),
        "missing selection in {html}"
    );

    for _ in 0..3 {
        dispatch.call(QuizIntent::Next);
        drive_dom(&mut harness.dom);
    }

    let html = harness.render();
    assert!(html.contains("1 / 3"), "missing final score in {html}");
    assert!(
        html.contains("achieved 1 Marks"),
        "missing result detail in {html}"
    );
    assert!(html.contains("Play Again"), "missing restart in {html}");

    dispatch.call(QuizIntent::Restart);
    drive_dom(&mut harness.dom);
    let html = harness.render();
    assert!(html.contains("Start Quiz"), "missing start gate in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_times_out_to_the_next_question() {
    let mut harness = setup_quiz_harness(sample_records());
    harness.rebuild();
    harness.drive_async().await;

    let dispatch = harness.handles.dispatch();
    dispatch.call(QuizIntent::Start);
    drive_dom(&mut harness.dom);

    for _ in 0..30 {
        dispatch.call(QuizIntent::Tick);
    }
    drive_dom(&mut harness.dom);

    let vm = harness.handles.vm();
    let vm_guard = vm.read();
    let vm_state = vm_guard.as_ref().expect("vm loaded");
    assert_eq!(vm_state.current_index(), 1);
    assert_eq!(vm_state.remaining_seconds(), 30);
    drop(vm_guard);

    let html = harness.render();
    assert!(html.contains("Q2"), "missing second prompt in {html}");
    assert!(
        html.contains("Time Left: 30s"),
        "countdown not reset in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_renders_free_text_input() {
    let records = vec![
        QuestionRecord::free_text("Describe the water cycle.", AnswerKey::new("n/a")).unwrap(),
    ];
    let mut harness = setup_quiz_harness(records);
    harness.rebuild();
    harness.drive_async().await;

    harness.handles.dispatch().call(QuizIntent::Start);
    drive_dom(&mut harness.dom);

    let html = harness.render();
    assert!(
        html.contains("Type your answer"),
        "missing free-text input in {html}"
    );
}

struct FailingSource;

#[async_trait::async_trait]
impl QuestionBankSource for FailingSource {
    async fn fetch(&self) -> Result<QuestionSet, BankError> {
        Err(BankError::Io(std::io::Error::other("bank unreachable")))
    }
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_renders_load_failure() {
    let mut harness = setup_quiz_harness_with_source(Arc::new(FailingSource));
    harness.rebuild();
    harness.drive_async().await;

    let html = harness.render();
    assert!(
        html.contains("Could not load the quiz"),
        "missing error in {html}"
    );
    assert!(html.contains("Retry"), "missing retry in {html}");
}
