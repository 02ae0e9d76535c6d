//! The project tree and story shipped with the illustration.

use std::sync::LazyLock;

use crate::model::{
    story::{Story, StorySection},
    tree::{FileNode, Icon, NodeKind},
};

static FILE_TREE: LazyLock<FileNode> = LazyLock::new(build_file_tree);
static STORY: LazyLock<Story> = LazyLock::new(build_story);

/// Process-wide tree; built once on first use.
pub fn file_tree() -> &'static FileNode {
    &FILE_TREE
}

/// Process-wide story; built once on first use.
pub fn story() -> &'static Story {
    &STORY
}

fn build_file_tree() -> FileNode {
    use NodeKind::{Config, File, Folder, Root};

    FileNode::new("root", "project-root", Root, "The foundation. The seed.").with_children([
        FileNode::new(
            "config",
            "package.json",
            Config,
            "Dependencies and Scripts. The DNA.",
        )
        .with_icon(Icon::Settings),
        FileNode::new("env", ".env", Config, "Environment Variables. The Nutrients.")
            .with_icon(Icon::Database),
        FileNode::new("src", "src", Folder, "Source Code. The Trunk.")
            .with_icon(Icon::Folder)
            .with_children([
                FileNode::new("index", "index.tsx", File, "Entry Point. The Sprout.")
                    .with_icon(Icon::Terminal),
                FileNode::new("app", "App.tsx", File, "Main Application Logic.")
                    .with_icon(Icon::Layout),
                FileNode::new(
                    "components",
                    "components",
                    Folder,
                    "Reusable UI. Major Branches.",
                )
                .with_icon(Icon::Box)
                .with_children([
                    FileNode::new("button", "Button.tsx", File, "Atomic Component. A Leaf.")
                        .with_icon(Icon::FileCode),
                    FileNode::new("card", "Card.tsx", File, "Container Component.")
                        .with_icon(Icon::FileCode),
                ]),
                FileNode::new("hooks", "hooks", Folder, "Logic Extraction. Inner Fibers.")
                    .with_icon(Icon::Cpu)
                    .with_children([FileNode::new(
                        "useAuth",
                        "useAuth.ts",
                        File,
                        "Authentication Logic.",
                    )
                    .with_icon(Icon::FileCode)]),
            ]),
    ])
}

fn section(
    id: &str,
    title: &str,
    subtitle: &str,
    description: &str,
    range: (f64, f64),
    highlights: &[&str],
) -> StorySection {
    StorySection {
        id: id.to_string(),
        title: title.to_string(),
        subtitle: subtitle.to_string(),
        description: description.to_string(),
        threshold_start: range.0,
        threshold_end: range.1,
        highlight_node_ids: highlights.iter().map(|s| s.to_string()).collect(),
    }
}

fn build_story() -> Story {
    let sections = vec![
        section(
            "intro",
            "The Seed",
            "Initialization",
            "Every complex system begins as a single point of potential. In software, this is \
             your configuration. The `package.json` and environment files act as the DNA and \
             soil nutrients, defining what the organism can become.",
            (0.0, 0.15),
            &["config", "env"],
        ),
        section(
            "germination",
            "Germination",
            "The Root System",
            "Before visible growth occurs, the roots must anchor. Dependencies are installed, \
             establishing the structural integrity required for the application to run. This \
             hidden network supports everything above.",
            (0.15, 0.35),
            &["root"],
        ),
        section(
            "sprout",
            "The Sprout",
            "Entry Point",
            "The `index.tsx` file breaks the surface. This is the first executable moment, \
             where the DOM is mounted and the React lifecycle begins. The trunk forms.",
            (0.35, 0.55),
            &["src", "index", "app"],
        ),
        section(
            "branching",
            "Branching",
            "Structural Definition",
            "As the application scales, logic must separate. The `src` directory diverges \
             into `components`, `hooks`, and `services`. These major branches allow for \
             parallel development and organized complexity.",
            (0.55, 0.75),
            &["components", "hooks"],
        ),
        section(
            "canopy",
            "The Canopy",
            "Leaf Components",
            "Finally, the detailed work appears. Buttons, Inputs, Cards. These are the \
             leaves\u{2014}the interface points that interact with the user (light). The tree \
             is now a complete, living system.",
            (0.75, 1.0),
            &["button", "card", "useAuth"],
        ),
    ];
    match Story::new(sections) {
        Ok(story) => story,
        Err(err) => unreachable!("built-in story is invalid: {err}"),
    }
}
