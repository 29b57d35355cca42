use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use quiz_core::model::{AnswerKey, QuestionRecord, QuestionSet};
use quiz_core::time::fixed_clock;
use services::{QuestionBankService, QuestionBankSource, QuizFlowService, StaticBankSource};

use crate::context::{UiApp, build_app_context};
use crate::views::QuizView;
use crate::views::quiz::QuizTestHandles;

struct TestApp {
    quiz_flow: Arc<QuizFlowService>,
}

impl UiApp for TestApp {
    fn quiz_flow(&self) -> Arc<QuizFlowService> {
        Arc::clone(&self.quiz_flow)
    }
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    handles: QuizTestHandles,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.handles.clone());
    rsx! { QuizView {} }
}

pub struct QuizHarness {
    pub dom: VirtualDom,
    pub handles: QuizTestHandles,
}

impl QuizHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn sample_records() -> Vec<QuestionRecord> {
    [("Q1", "b"), ("Q2", "a"), ("Q3", "c")]
        .into_iter()
        .map(|(prompt, correct)| {
            QuestionRecord::multiple_choice(
                prompt,
                vec![
                    (AnswerKey::new("a"), "Option A".to_string()),
                    (AnswerKey::new("b"), "Option B".to_string()),
                    (AnswerKey::new("c"), "Option C".to_string()),
                ],
                AnswerKey::new(correct),
            )
            .unwrap()
        })
        .collect()
}

pub fn setup_quiz_harness(records: Vec<QuestionRecord>) -> QuizHarness {
    let source = StaticBankSource::new(QuestionSet::new(records));
    setup_quiz_harness_with_source(Arc::new(source))
}

pub fn setup_quiz_harness_with_source(source: Arc<dyn QuestionBankSource>) -> QuizHarness {
    let flow = Arc::new(QuizFlowService::new(
        fixed_clock(),
        QuestionBankService::new(source),
    ));
    let handles = QuizTestHandles::default();
    let dom = VirtualDom::new_with_props(
        ViewHarness,
        ViewHarnessProps {
            app: Arc::new(TestApp { quiz_flow: flow }),
            handles: handles.clone(),
        },
    );

    QuizHarness { dom, handles }
}
