use dioxus::prelude::*;

use crate::components::app_navbar::{nav_link, NavTarget};
use crate::t;
use crate::views::use_lang_marker;

#[component]
pub fn Help() -> Element {
    let _lang_marker = use_lang_marker();

    let faqs = [
        (t!("help-faq-what-question"), t!("help-faq-what-answer")),
        (t!("help-faq-connect-question"), t!("help-faq-connect-answer")),
        (t!("help-faq-privacy-question"), t!("help-faq-privacy-answer")),
        (t!("help-faq-support-question"), t!("help-faq-support-answer")),
    ];

    rsx! {
        div { style: "display:none", "{_lang_marker}" }
        section { class: "page help",
            header { class: "help__header",
                h1 { {t!("help-title")} }
                p { class: "help__intro", {t!("help-intro")} }
            }

            div { class: "help__faqs",
                for (question, answer) in faqs {
                    article { key: "{question}", class: "roundup-card help__faq",
                        h2 { class: "help__question", "{question}" }
                        p { class: "help__answer", "{answer}" }
                    }
                }
            }

            div { class: "help__back",
                {nav_link(NavTarget::Home, &t!("help-back-link"))}
            }
        }
    }
}
