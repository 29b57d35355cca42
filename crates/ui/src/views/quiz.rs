use std::time::Duration;

use dioxus::prelude::*;

use quiz_core::SessionPhase;
use quiz_core::model::{AnswerKey, AnswerOption};

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{QuizIntent, QuizVm, format_time_left, load_quiz};

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

#[component]
pub fn QuizView() -> Element {
    let ctx = use_context::<AppContext>();
    let flow = ctx.quiz_flow();

    let vm = use_signal(|| None::<QuizVm>);

    let flow_for_resource = flow.clone();
    let resource = use_resource(move || {
        let flow = flow_for_resource.clone();
        let mut vm = vm;
        async move {
            let loaded = load_quiz(&flow).await?;
            vm.set(Some(loaded));
            Ok::<_, ViewError>(())
        }
    });
    let state = view_state_from_resource(&resource);

    let dispatch = {
        let flow = flow.clone();
        use_callback(move |intent: QuizIntent| {
            let mut vm = vm;
            if let Some(vm) = vm.write().as_mut() {
                vm.apply(&flow, intent);
            }
        })
    };

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<QuizTestHandles>() {
                handles.register(dispatch, vm);
            }
        }
    }

    let on_retry = use_callback(move |()| {
        let mut resource = resource;
        resource.restart();
    });

    // Hard reset: discard all in-memory state and re-fetch the bank.
    let on_hard_reset = use_callback(move |()| {
        let mut vm = vm;
        let mut resource = resource;
        vm.set(None);
        resource.restart();
    });

    // Countdown ticker: armed while a question is on screen. Any phase or
    // question change bumps the epoch, which retires the previous loop
    // before a new one (if any) is spawned; a stale loop can never tick a
    // reset or completed session.
    let timer_key = use_memo(move || {
        vm.read()
            .as_ref()
            .map(|vm| (vm.timer_armed(), vm.current_index()))
    });
    let mut ticker_epoch = use_signal(|| 0_u64);
    use_effect(move || {
        let armed = matches!(timer_key(), Some((true, _)));
        let epoch = ticker_epoch.peek().wrapping_add(1);
        ticker_epoch.set(epoch);
        if armed {
            spawn(async move {
                loop {
                    tokio::time::sleep(Duration::from_secs(1)).await;
                    if *ticker_epoch.peek() != epoch {
                        break;
                    }
                    dispatch.call(QuizIntent::Tick);
                }
            });
        }
    });

    let vm_guard = vm.read();
    let phase = vm_guard.as_ref().map(QuizVm::phase);
    let bank_empty = vm_guard.as_ref().is_some_and(|vm| vm.total() == 0);
    let prompt = vm_guard
        .as_ref()
        .and_then(QuizVm::prompt)
        .unwrap_or_default()
        .to_string();
    let options: Option<Vec<AnswerOption>> = vm_guard
        .as_ref()
        .and_then(|vm| vm.options().map(<[AnswerOption]>::to_vec));
    let selected = vm_guard.as_ref().and_then(|vm| vm.selected_key().cloned());
    let free_text = selected
        .as_ref()
        .map(|key| key.as_str().to_string())
        .unwrap_or_default();
    let score = vm_guard.as_ref().map_or(0, QuizVm::score);
    let total = vm_guard.as_ref().map_or(0, QuizVm::total);
    let can_go_back = vm_guard.as_ref().is_some_and(QuizVm::can_go_back);
    let progress_percent = vm_guard.as_ref().map_or(0.0, QuizVm::progress_percent);
    let timer_percent = vm_guard.as_ref().map_or(0.0, QuizVm::timer_percent);
    let timer_label = format_time_left(vm_guard.as_ref().map_or(0, QuizVm::remaining_seconds));
    let progress_label = vm_guard
        .as_ref()
        .map(QuizVm::progress_label)
        .unwrap_or_default();
    drop(vm_guard);

    rsx! {
        div { class: "page quiz-page", id: "quiz-root",
            header { class: "quiz-brand",
                button {
                    class: "quiz-brand__button",
                    id: "quiz-hard-reset",
                    r#type: "button",
                    onclick: move |_| on_hard_reset.call(()),
                    "QuizWars"
                }
            }
            div { class: "quiz-card",
                match state {
                    ViewState::Idle | ViewState::Loading => rsx! {
                        p { class: "quiz-loading", "Loading Quiz..." }
                    },
                    ViewState::Error(err) => rsx! {
                        p { class: "quiz-error", "{err.message()}" }
                        button {
                            class: "quiz-retry",
                            id: "quiz-retry",
                            r#type: "button",
                            onclick: move |_| on_retry.call(()),
                            "Retry"
                        }
                    },
                    ViewState::Ready(()) => match phase {
                        None => rsx! {
                            p { class: "quiz-loading", "Loading Quiz..." }
                        },
                        Some(SessionPhase::NotStarted) => rsx! {
                            if bank_empty {
                                p { class: "quiz-loading", "Loading Quiz..." }
                            } else {
                                div { class: "quiz-welcome",
                                    h2 { class: "quiz-welcome__title",
                                        "Welcome to the "
                                        span { class: "quiz-welcome__brand", "QuizWars" }
                                    }
                                    button {
                                        class: "quiz-start",
                                        id: "quiz-start",
                                        r#type: "button",
                                        onclick: move |_| dispatch.call(QuizIntent::Start),
                                        "Start Quiz"
                                    }
                                }
                            }
                        },
                        Some(SessionPhase::InProgress) => rsx! {
                            div { class: "quiz-progress",
                                div {
                                    class: "quiz-progress__fill",
                                    style: "width: {progress_percent}%",
                                }
                            }
                            h2 { class: "quiz-question", "{prompt}" }
                            if let Some(options) = options {
                                div { class: "quiz-options",
                                    for option in options {
                                        OptionButton {
                                            key: "{option.key}",
                                            option_key: option.key.clone(),
                                            label: option.label.clone(),
                                            selected: selected.as_ref() == Some(&option.key),
                                            on_intent: dispatch,
                                        }
                                    }
                                }
                            } else {
                                input {
                                    class: "quiz-free-text",
                                    id: "quiz-free-text",
                                    r#type: "text",
                                    placeholder: "Type your answer",
                                    value: "{free_text}",
                                    oninput: move |evt: FormEvent| {
                                        dispatch.call(QuizIntent::Select(AnswerKey::new(evt.value())));
                                    },
                                }
                            }
                            div { class: "quiz-timer",
                                div {
                                    class: "quiz-timer__fill",
                                    style: "width: {timer_percent}%",
                                }
                            }
                            p { class: "quiz-timer__label", "{timer_label}" }
                            div { class: "quiz-nav",
                                button {
                                    class: "quiz-nav__button",
                                    id: "quiz-previous",
                                    r#type: "button",
                                    disabled: !can_go_back,
                                    onclick: move |_| dispatch.call(QuizIntent::Previous),
                                    "Previous"
                                }
                                span { class: "quiz-nav__progress", "{progress_label}" }
                                button {
                                    class: "quiz-nav__button quiz-nav__button--next",
                                    id: "quiz-next",
                                    r#type: "button",
                                    onclick: move |_| dispatch.call(QuizIntent::Next),
                                    "Next"
                                }
                            }
                        },
                        Some(SessionPhase::Completed) => rsx! {
                            ResultsCard { score, total, on_intent: dispatch }
                        },
                    },
                }
            }
        }
    }
}

#[component]
fn OptionButton(
    option_key: AnswerKey,
    label: String,
    selected: bool,
    on_intent: EventHandler<QuizIntent>,
) -> Element {
    let class = if selected {
        "quiz-option quiz-option--selected"
    } else {
        "quiz-option"
    };
    rsx! {
        button {
            class: "{class}",
            r#type: "button",
            onclick: move |_| on_intent.call(QuizIntent::Select(option_key.clone())),
            "{label}"
        }
    }
}

#[component]
fn ResultsCard(score: u32, total: usize, on_intent: EventHandler<QuizIntent>) -> Element {
    rsx! {
        div { class: "quiz-results",
            div { class: "quiz-results__score", "{score} / {total}" }
            p { class: "quiz-results__subtitle", "You can do better!" }
            p { class: "quiz-results__detail",
                "You have completed the Quiz and achieved {score} Marks!"
            }
            button {
                class: "quiz-results__restart",
                id: "quiz-restart",
                r#type: "button",
                onclick: move |_| on_intent.call(QuizIntent::Restart),
                "Play Again"
            }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct QuizTestHandles {
    dispatch: Rc<RefCell<Option<Callback<QuizIntent>>>>,
    vm: Rc<RefCell<Option<Signal<Option<QuizVm>>>>>,
}

#[cfg(test)]
impl QuizTestHandles {
    pub(crate) fn register(&self, dispatch: Callback<QuizIntent>, vm: Signal<Option<QuizVm>>) {
        *self.dispatch.borrow_mut() = Some(dispatch);
        *self.vm.borrow_mut() = Some(vm);
    }

    pub(crate) fn dispatch(&self) -> Callback<QuizIntent> {
        (*self.dispatch.borrow()).expect("quiz dispatch registered")
    }

    pub(crate) fn vm(&self) -> Signal<Option<QuizVm>> {
        (*self.vm.borrow()).expect("quiz vm registered")
    }
}
