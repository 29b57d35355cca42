use dioxus::prelude::*;

use crate::views::QuizView;

#[component]
pub fn App() -> Element {
    rsx! {
        document::Stylesheet { href: asset!("/assets/style.css") }

        // Stable OS/window title; the quiz view renders its own heading.
        document::Title { "QuizWars" }

        div { class: "app-root",
            ErrorBoundary {
                handle_error: |errors: ErrorContext| rsx! {
                    div { class: "fatal",
                        h1 { "Something went wrong" }
                        pre { "{errors:?}" }
                    }
                },
                QuizView {}
            }
        }
    }
}
