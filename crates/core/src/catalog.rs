//! The built-in course content.

use crate::model::{ContentItem, Curriculum, CurriculumError, Section};

const COURSE_TITLE: &str = "Introduction to Machine Learning";

const SUMMARY_FOR_AI: &str = "ZEN AI VANGUARD is a comprehensive curriculum designed to take \
students from foundational AI concepts to advanced, real-world applications. It covers the \
architecture of AI, generative models for various modalities (text, image, audio, video, 3D), \
ethics, and hands-on projects. The course features interactive labs for concepts like prompt \
engineering, adversarial attacks, and AI ethics.";

fn p(text: &str) -> ContentItem {
    ContentItem::paragraph(text)
}

fn h(text: &str) -> ContentItem {
    ContentItem::heading(text)
}

fn lab(component: &str, interactive_id: &str) -> ContentItem {
    ContentItem::interactive(component, interactive_id)
}

/// Build the ZEN AI VANGUARD curriculum.
///
/// # Errors
///
/// Returns `CurriculumError` if the tree contains duplicate or empty ids.
pub fn vanguard_curriculum() -> Result<Curriculum, CurriculumError> {
    Curriculum::new(
        COURSE_TITLE,
        SUMMARY_FOR_AI,
        vec![overview(), models_landscape(), module_one(), module_two()],
    )
}

fn overview() -> Section {
    Section::new("overview", "Course Overview")
        .with_icon("BookOpen")
        .with_content(vec![
            p("Welcome to ZEN AI VANGUARD, a journey into the heart of artificial intelligence. \
               This curriculum is designed not just to teach you the 'how' of AI, but the 'why'. \
               We'll explore the philosophical underpinnings, the technical marvels, and the \
               ethical considerations that shape this transformative technology. Prepare to \
               build, innovate, and lead in the new frontier of AI."),
            h("What You Will Learn"),
            ContentItem::list([
                "The core principles of AI model architecture and mechanics.",
                "How to engineer prompts for creative and technical generative tasks.",
                "The mechanics of text, image, audio, video, and 3D generation.",
                "The ethical frameworks necessary for responsible AI development.",
                "Hands-on project experience synthesizing your skills.",
            ]),
        ])
}

fn models_landscape() -> Section {
    Section::new("ai-models", "AI Models Landscape (2025)")
        .with_icon("CubeTransparent")
        .with_content(vec![
            p("The field of AI is characterized by a rapidly evolving landscape of models from \
               various providers. Understanding their capabilities, costs, and specializations is \
               key. This interactive explorer provides a snapshot of the major models available \
               in late 2025."),
            lab("ModelExplorer", "model-explorer-1"),
        ])
}

fn module_one() -> Section {
    Section::new("module-1", "Module 1: The Intelligence Inside")
        .with_icon("Sparkles")
        .with_content(vec![p(
            "Every intelligent system, whether biological or artificial, transforms information \
             into action. This section reveals how that happens inside AI models: how data becomes \
             patterns, how patterns become meaning, and how meaning becomes decisions. Through \
             interactive labs, visualizations, and simulations, you'll literally watch \
             intelligence form.",
        )])
        .with_sub_sections(vec![
            Section::new("1-1", "1.1 Understanding the Machine Mind").with_content(vec![
                h("Core Concepts"),
                ContentItem::list([
                    "Neural networks imitate brain structures through layers of connected \"neurons.\"",
                    "Transformers changed everything by enabling attention: the ability to weigh \
                     relationships among all tokens at once.",
                    "Context windows define short-term memory; embeddings store long-term meaning.",
                    "Foundation models scale to trillions of parameters, each parameter a \
                     microscopic dial of understanding.",
                ]),
                h("Visualizations & Labs"),
                lab("NeuralEvolutionChronicle", "neural-evolution-1"),
                lab("ModelArmsRaceTimeline", "arms-race-1"),
                lab("ParameterUniverseExplorer", "param-universe-1"),
                lab("ArchitectureBuilderSandbox", "arch-builder-1"),
                h("The Power of the Key: API Access"),
                p("Think of an API Key as the secret password that grants access to a powerful AI \
                   model. Without it, your requests are rejected. With it, you unlock the model's \
                   vast intelligence to generate text, images, and more. This simulation \
                   demonstrates the concept."),
                lab("ApiKeyChatSimulator", "api-key-sim-1"),
            ]),
            Section::new("1-2", "1.2 Exploring Prediction and Learning").with_content(vec![
                p("Drag the slider for \"Hours Studied.\" The predicted exam score is recalculated \
                   in real time using a simple linear model: Score = 8 x hours + 15. You'll see \
                   how adding data improves confidence, introducing the idea of gradient descent."),
                lab("SimplePredictiveModel", "simple-model-1"),
                p("Training a model is like navigating a complex \"loss landscape\" to find the \
                   point of lowest error."),
                lab("LossLandscapeNavigator", "loss-landscape-1"),
            ]),
            Section::new("1-3", "1.3 Ethics and Choice in Design").with_content(vec![
                p("You're the lead engineer on an autonomous-vehicle system whose brakes have \
                   failed. You must choose between two outcomes. The assistant switches \
                   philosophical lenses (Utilitarian, Deontological, Virtue) and explains how each \
                   theory justifies or condemns your choice."),
                lab("EthicalDilemmaSimulator", "dilemma-sim-1"),
            ]),
            Section::new("1-4", "1.4 Data as Fuel").with_content(vec![
                p("Visualize how raw data becomes \"features.\" Upload a CSV file and watch \
                   missing-value handling, normalization, and the split into training and test \
                   sets. This builds intuition for why data quality matters more than model size."),
                lab("DataVisualizer", "data-viz-1"),
            ]),
            Section::new("1-5", "1.5 Vulnerability and Security").with_content(vec![
                p("A photo of a panda registers 98% confidence until imperceptible noise flips the \
                   label to gibbon. Lesson: intelligence is brittle when perception lacks context."),
                lab("AdversarialAttackSimulator", "adversarial-sim-1"),
            ]),
            Section::new("1-6", "1.6 Memory and Attention").with_content(vec![
                p("Paste a paragraph and drag a slider to vary context from 10% to 100%. The \
                   model summarizes only the visible text, so you feel what attention really \
                   means."),
                lab("ContextWindowExplorer", "context-window-1"),
                p("Hold a five-turn chat, then analyze which tokens are remembered and which are \
                   forgotten as the context grows."),
                lab("MemoryDecayLab", "memory-decay-1"),
            ]),
            Section::new("1-7", "1.7 Interpretability and Bias").with_content(vec![
                p("Enter a prompt (\"a happy dog in a park\") and see which words drew the model's \
                   focus, with a narration of its causal reasoning."),
                lab("ExplainabilityPanel", "xai-panel-1"),
                p("Type a shared prompt in multiple languages; compare outputs and tone. This lets \
                   you see cultural drift."),
                lab("EthicalBiasMirror", "bias-mirror-1"),
            ]),
            Section::new("1-8", "1.8 Hands-On Project").with_content(vec![
                h("Objective: Machine Mind Map XR"),
                p("Synthesize what you've learned into a personal neural-architecture map."),
                ContentItem::list([
                    "Capture screenshots from: Token Visualizer, Explainability Panel, \
                     Architecture Builder, Ethical Bias Mirror.",
                    "Arrange them on a 3-D canvas.",
                    "Add generated voice-over narration.",
                    "Export as an animated video or interactive WebGL card to your Digital Diary.",
                ]),
            ]),
            Section::new("1-9", "1.9 Check Your Understanding").with_content(vec![
                p("Test your knowledge on the core concepts of this module."),
                lab("EnergyCarbonTracker", "energy-tracker-1"),
            ]),
            Section::new("1-10", "1.10 Reflection & Export").with_content(vec![p(
                "A reflection summary combines your interactions, quiz results, and narration \
                 transcript. You'll receive a downloadable Learning Log, a replay of your most \
                 active simulation, and a ZEN Card certifying module completion.",
            )]),
        ])
}

fn module_two() -> Section {
    Section::new("module-2", "Module 2: Generative Intelligence")
        .with_icon("Sparkles")
        .with_content(vec![p(
            "You've learned how machines think. Now you'll learn how they dream. Generative AI \
             doesn't simply process information; it creates. From text and art to sound, motion, \
             and 3D space, these models convert data into new possibilities. This section turns \
             you into a creative engineer, blending imagination with algorithmic precision.",
        )])
        .with_sub_sections(vec![
            Section::new("2-1", "2.1 The Science of Creation").with_content(vec![
                h("Conceptual Primer"),
                ContentItem::list([
                    "Generative models learn probability distributions, predicting what's \
                     plausible next.",
                    "Diffusion models reverse noise into structure.",
                    "GANs pit a generator against a discriminator.",
                    "Transformers generate step-by-step reasoning chains.",
                    "Multimodal embeddings allow text, image, sound, and code to share one \
                     meaning space.",
                ]),
                h("Visual Walkthrough: Diffusion Field Explorer"),
                p("A simulation paints pure static, then walks through each denoising step until \
                   a clear image emerges. Use the sliders for steps, guidance scale, and sampling \
                   rate to feel how quality trades off with compute."),
                lab("DiffusionFieldExplorer", "diffusion-explorer-1"),
            ]),
            Section::new("2-2", "2.2 Language as Design").with_content(vec![
                p("Words are code. Prompts are blueprints. Here you'll learn to steer models from \
                   chaos to coherence."),
                h("Interactive Studio: Prompt Architect Workbench"),
                p("Design complex prompts with nested roles and constraints. Define tone, medium, \
                   and structure, then see how each choice alters the output."),
                lab("PromptArchitectWorkbench", "prompt-architect-1"),
            ]),
            Section::new("2-3", "2.3 Visual Generation & Design Systems").with_content(vec![
                h("Core Concepts"),
                ContentItem::list([
                    "Latent space = compressed imagination.",
                    "Style transfer manipulates embeddings.",
                    "Compositionality means generating multiple objects with consistent \
                     relationships.",
                    "ControlNet & LoRA fine-tune structure while keeping base knowledge stable.",
                ]),
                h("Mini Apps"),
                lab("CompositorCanvasPro", "compositor-canvas-1"),
                lab("SceneDirectorXR", "scene-director-1"),
                lab("PatternGenomeSynthesizer", "pattern-synth-1"),
                lab("LightingPhysicsLab", "lighting-lab-1"),
                lab("EthicalStyleInspector", "style-inspector-1"),
            ]),
            Section::new("2-4", "2.4 Sound, Music & Voice").with_content(vec![
                h("Audio Fundamentals"),
                p("Sound is data with rhythm. Waveforms, vectors and meaning."),
                h("Mini Apps"),
                lab("MelodyMakerAI", "melody-maker-1"),
                lab("VoiceMorphStudio", "voice-morph-1"),
                lab("AmbientArchitect", "ambient-architect-1"),
                lab("SpeechEmotionAnalyzer", "speech-analyzer-1"),
                lab("AudioVisualSyncLab", "av-sync-lab-1"),
            ]),
            Section::new("2-5", "2.5 Video & Motion Synthesis").with_content(vec![
                h("Key Ideas"),
                ContentItem::list([
                    "Motion generation = temporal diffusion.",
                    "Consistency across frames requires latent coherence.",
                    "New models render text-to-video in seconds.",
                ]),
                h("Mini Apps"),
                lab("StoryboardForgePlus", "storyboard-forge-1"),
                lab("MotionPhysicsPlayground", "motion-physics-1"),
                lab("CinematicPromptSequencer", "prompt-sequencer-1"),
                lab("GestureAnimator", "gesture-animator-1"),
                lab("VoiceDrivenEditingDesk", "voice-editor-1"),
            ]),
            Section::new("2-6", "2.6 3D Creation & Spatial Computing").with_content(vec![
                p("AI now builds spaces you can inhabit. These experiences merge procedural \
                   generation, physics, and narrative."),
                h("Mini Apps"),
                lab("DreamspaceConstructor", "dreamspace-1"),
                lab("TextureAlchemyLab", "texture-lab-1"),
                lab("PhysicsPainter", "physics-painter-1"),
                lab("SpatialNarrativeEngine", "spatial-narrative-1"),
                lab("SoundfieldComposer", "soundfield-composer-1"),
            ]),
            Section::new("2-7", "2.7 Ethics & Authenticity in Creation").with_content(vec![
                p("Every creation carries intent and impact. Socratic dialogues let you debate \
                   ownership, authorship, and originality. You'll explore bias in visual datasets, \
                   misinformation in video synthesis, and copyright frameworks emerging worldwide."),
                h("Interactive Debates"),
                lab("InteractiveDebates", "interactive-debates-1"),
            ]),
            Section::new("2-8", "2.8 Hands-On Project").with_content(vec![
                h("Objective: Creative Triptych XR"),
                p("Build a multimodal experience uniting text, image, and sound."),
                ContentItem::list([
                    "Draft a concept brief.",
                    "Generate assets using at least three tools from this module.",
                    "Combine them in a timeline composer.",
                    "Add a generated artist statement and metadata.",
                    "Publish to your Digital Diary Gallery.",
                ]),
            ]),
            Section::new("2-9", "2.9 Metrics & Mastery Check").with_content(vec![p(
                "Check your mastery of the skills learned in this module against the target \
                 metrics.",
            )]),
            Section::new("2-10", "2.10 Reflection & Export").with_content(vec![p(
                "All your generated assets are compiled into a Portfolio Showreel. It includes \
                 prompts, outputs, ethics notes, and performance metrics. Your ZEN Card verifies \
                 completion.",
            )]),
        ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{SectionId, WidgetKind};

    #[test]
    fn builtin_curriculum_validates() {
        let curriculum = vanguard_curriculum().unwrap();
        assert_eq!(curriculum.title(), COURSE_TITLE);
        assert_eq!(curriculum.total_sections(), 24);
    }

    #[test]
    fn flattened_order_interleaves_modules_and_lessons() {
        let flat = vanguard_curriculum().unwrap().flatten();
        let ids: Vec<&str> = flat.iter().take(6).map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["overview", "ai-models", "module-1", "1-1", "1-2", "1-3"]);
        assert_eq!(flat[13].id.as_str(), "module-2");
        assert_eq!(flat.last().map(|s| s.id.as_str()), Some("2-10"));
        assert_eq!(
            flat[3].parent_title.as_deref(),
            Some("Module 1: The Intelligence Inside")
        );
    }

    #[test]
    fn tagline_welcomes_the_learner() {
        let curriculum = vanguard_curriculum().unwrap();
        assert!(curriculum.tagline().unwrap().starts_with("Welcome to ZEN AI VANGUARD"));
    }

    #[test]
    fn representative_widgets_are_wired() {
        let curriculum = vanguard_curriculum().unwrap();
        let lesson = curriculum.section(&SectionId::from("1-2")).unwrap();
        assert!(lesson.content().iter().any(|item| matches!(
            item,
            ContentItem::Interactive { component: WidgetKind::PredictionSlider, .. }
        )));
    }
}
