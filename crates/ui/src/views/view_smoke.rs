use dioxus::prelude::*;
use services::Certificate;
use storage::repository::InMemoryRepository;
use vanguard_core::model::{CodeLanguage, ContentItem, SECTION_POINTS, SectionId};
use vanguard_core::time::fixed_now;

use super::test_harness::setup_lesson_harness;
use crate::views::{CertificateCard, ContentBlock, LabResult, WidgetPlaceholder};
use crate::vm::{LAB_ERROR_MESSAGE, LabOutput};

fn render_static(app: fn() -> Element) -> String {
    let mut dom = VirtualDom::new(app);
    dom.rebuild_in_place();
    dioxus_ssr::render(&dom)
}

#[tokio::test(flavor = "current_thread")]
async fn lesson_smoke_renders_curriculum_and_header() {
    let mut harness = setup_lesson_harness(InMemoryRepository::new()).await;
    harness.settle().await;
    let html = harness.render();

    assert!(html.contains("Module 1: The Intelligence Inside"), "missing module title in {html}");
    assert!(html.contains("1.1 Understanding the Machine Mind"), "missing lesson in {html}");
    assert!(html.contains("0/24"), "missing counter in {html}");
    assert!(html.contains(r#"data-section="true""#), "sections not observable in {html}");
    assert!(html.contains("Prediction Engine: Student Success"), "missing widget in {html}");
    assert!(
        html.contains(r#"id="overview" class="section section--depth-0 is-visible""#),
        "overview should start visible in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn lesson_smoke_reflects_stored_progress() {
    let mut harness = setup_lesson_harness(InMemoryRepository::new()).await;
    harness
        .services
        .progress()
        .complete_section(SectionId::from("1-1"), SECTION_POINTS)
        .await;

    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("1/24"), "missing counter in {html}");
    assert!(html.contains("nav-item--done"), "missing completed nav item in {html}");
    assert!(html.contains("is-complete"), "missing completed section in {html}");
}

#[test]
fn certificate_smoke_renders_name_and_date() {
    fn app() -> Element {
        let certificate = Certificate {
            learner: "Ada Lovelace".into(),
            course_title: "Introduction to Machine Learning".into(),
            points: 480,
            sections_completed: 24,
            issued_at: fixed_now(),
        };
        rsx! { CertificateCard { certificate } }
    }

    let html = render_static(app);
    assert!(html.contains("Ada Lovelace"));
    assert!(html.contains("November 14, 2023"));
    assert!(html.contains("24 sections completed"));
}

#[test]
fn placeholder_smoke_names_component() {
    fn app() -> Element {
        rsx! { WidgetPlaceholder { name: "HologramComposer" } }
    }

    let html = render_static(app);
    assert!(html.contains("HologramComposer"));
    assert!(html.contains("widget--placeholder"));
}

#[test]
fn lab_result_smoke_shows_inline_error() {
    fn app() -> Element {
        rsx! { LabResult { output: LabOutput::Failed } }
    }

    let html = render_static(app);
    assert!(html.contains(&LAB_ERROR_MESSAGE[..5]));
    assert!(html.contains("lab-error"));
}

#[test]
fn code_block_smoke_tags_language_and_output() {
    fn app() -> Element {
        rsx! {
            ContentBlock {
                item: ContentItem::Code {
                    language: CodeLanguage::Python,
                    source: "print(1 + 1)".into(),
                    output: Some("2".into()),
                },
            }
        }
    }

    let html = render_static(app);
    assert!(html.contains("language-python"));
    assert!(html.contains("code-output"));
}
