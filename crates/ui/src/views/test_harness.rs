use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use services::AppServices;
use services::ai::AiConfig;
use storage::repository::{InMemoryRepository, Storage};
use vanguard_core::time::fixed_clock;

use crate::context::{UiApp, build_app_context};
use crate::views::Shell;

#[derive(Props, Clone)]
struct HarnessProps {
    app: Arc<AppServices>,
}

impl PartialEq for HarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for HarnessProps {}

#[component]
fn HarnessRoot(props: HarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    rsx! { Shell {} }
}

pub struct LessonHarness {
    pub dom: VirtualDom,
    pub services: AppServices,
}

impl LessonHarness {
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

    /// Rebuild, then let the progress snapshot resolve and the lesson mount.
    pub async fn settle(&mut self) {
        self.rebuild();
        for _ in 0..3 {
            self.drive_async().await;
        }
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

pub async fn setup_lesson_harness(repo: InMemoryRepository) -> LessonHarness {
    let services = AppServices::from_storage(
        Storage::from_repository(repo),
        fixed_clock(),
        AiConfig::default(),
    )
    .await
    .expect("services");

    let dom = VirtualDom::new_with_props(
        HarnessRoot,
        HarnessProps {
            app: Arc::new(services.clone()),
        },
    );

    LessonHarness { dom, services }
}
