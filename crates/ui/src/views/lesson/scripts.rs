/// Pixels reserved for the fixed header when scrolling a section into view.
pub(crate) const HEADER_OFFSET_PX: u32 = 80;

/// Attach one `IntersectionObserver` to every rendered section and stream
/// batches back as `[{ id, isIntersecting }]`. Replaces any previous observer.
pub(crate) fn section_observer_script(root_margin: &str) -> String {
    format!(
        r#"(function() {{
                    if (window.__vanguardObserver) {{
                        window.__vanguardObserver.disconnect();
                    }}
                    const observer = new IntersectionObserver((entries) => {{
                        const batch = entries
                            .filter((entry) => entry.target.id)
                            .map((entry) => ({{
                                id: entry.target.id,
                                isIntersecting: entry.isIntersecting,
                            }}));
                        if (batch.length) {{
                            dioxus.send(batch);
                        }}
                    }}, {{ rootMargin: {root_margin:?}, threshold: 0 }});
                    window.__vanguardObserver = observer;
                    document
                        .querySelectorAll("[data-section]")
                        .forEach((el) => observer.observe(el));
                }})();"#
    )
}

/// Forward palette shortcut candidates as `{ key, command, inTextField }`.
pub(crate) fn shortcut_listener_script() -> String {
    r#"(function() {
                    if (window.__vanguardKeys) {
                        document.removeEventListener("keydown", window.__vanguardKeys);
                    }
                    const handler = (event) => {
                        const command = event.metaKey || event.ctrlKey;
                        const key = event.key || "";
                        if (!(command && key.toLowerCase() === "k") && key !== "/") {
                            return;
                        }
                        const el = document.activeElement;
                        const inTextField = !!el && (
                            el.tagName === "INPUT" ||
                            el.tagName === "TEXTAREA" ||
                            el.isContentEditable
                        );
                        if (command || !inTextField) {
                            event.preventDefault();
                        }
                        dioxus.send({ key, command, inTextField });
                    };
                    window.__vanguardKeys = handler;
                    document.addEventListener("keydown", handler);
                })();"#
        .to_string()
}

/// Stream `{ scrollTop, scrollHeight, clientHeight }` once per animation frame.
pub(crate) fn scroll_listener_script() -> String {
    r#"(function() {
                    if (window.__vanguardScroll) {
                        window.removeEventListener("scroll", window.__vanguardScroll);
                    }
                    let pending = false;
                    const report = () => {
                        pending = false;
                        const root = document.documentElement;
                        dioxus.send({
                            scrollTop: window.scrollY || root.scrollTop,
                            scrollHeight: root.scrollHeight,
                            clientHeight: root.clientHeight,
                        });
                    };
                    const handler = () => {
                        if (!pending) {
                            pending = true;
                            requestAnimationFrame(report);
                        }
                    };
                    window.__vanguardScroll = handler;
                    window.addEventListener("scroll", handler, { passive: true });
                    report();
                })();"#
        .to_string()
}

pub(crate) fn teardown_listeners_script() -> &'static str {
    r#"(function() {
                    if (window.__vanguardObserver) {
                        window.__vanguardObserver.disconnect();
                        window.__vanguardObserver = null;
                    }
                    if (window.__vanguardKeys) {
                        document.removeEventListener("keydown", window.__vanguardKeys);
                        window.__vanguardKeys = null;
                    }
                    if (window.__vanguardScroll) {
                        window.removeEventListener("scroll", window.__vanguardScroll);
                        window.__vanguardScroll = null;
                    }
                })();"#
}

/// Smooth-scroll a section below the header; optionally record `#id` in
/// history without navigating.
pub(crate) fn scroll_to_section_script(section_id: &str, push_history: bool) -> String {
    format!(
        r##"(function() {{
                    const id = {section_id:?};
                    const el = document.getElementById(id);
                    if (!el) return;
                    const top = el.getBoundingClientRect().top + window.pageYOffset - {HEADER_OFFSET_PX};
                    window.scrollTo({{ top, behavior: "smooth" }});
                    if ({push_history}) {{
                        history.pushState(null, "", "#" + id);
                    }}
                }})();"##
    )
}

pub(crate) fn scroll_to_top_script() -> &'static str {
    r#"window.scrollTo({ top: 0, behavior: "smooth" });"#
}

pub(crate) fn focus_element_script(element_id: &str) -> String {
    format!(
        r#"(function() {{
                    const el = document.getElementById({element_id:?});
                    if (el) {{
                        el.focus();
                    }}
                }})();"#
    )
}
