use dioxus::prelude::*;
use services::Certificate;

use crate::views::lesson::LessonState;

#[component]
pub fn CelebrationPanel() -> Element {
    let state = use_context::<LessonState>();
    let mut certificate = state.certificate;
    let mut name = use_signal(String::new);

    let Some(issued) = certificate.read().clone() else {
        return rsx! {};
    };
    let shown = issued.with_learner(&name.read());

    rsx! {
        div { class: "celebration-backdrop",
            div { class: "celebration",
                h2 { "Congratulations!" }
                p { "You've completed the course. Here is your certificate of completion." }
                input {
                    class: "celebration-name",
                    r#type: "text",
                    placeholder: "Enter your name",
                    value: "{name}",
                    oninput: move |evt| name.set(evt.value()),
                }
                CertificateCard { certificate: shown }
                button { class: "btn btn-primary", onclick: move |_| certificate.set(None), "Close" }
            }
        }
    }
}

#[component]
pub fn CertificateCard(certificate: Certificate) -> Element {
    let learner = certificate.learner.clone();
    let course = certificate.course_title.clone();
    let date = certificate.date_label();
    let summary = format!(
        "{} sections completed · {} points",
        certificate.sections_completed, certificate.points
    );

    rsx! {
        div { class: "certificate",
            div { class: "certificate-brand", "ZEN AI VANGUARD" }
            h3 { "Certificate of Completion" }
            p { "is hereby granted to" }
            p { class: "certificate-name", "{learner}" }
            p { "for successfully completing \"{course}\"." }
            p { class: "certificate-summary", "{summary}" }
            p { class: "certificate-date", "{date}" }
        }
    }
}
