use crate::{
    config::StageConfig,
    foundation::{
        core::{Point, Viewbox},
        error::{GrowError, GrowResult},
    },
    layout::{
        branch::{BranchEdge, Jitter, Placement, layout_branch},
        roots::RootSystem,
    },
    model::tree::FileNode,
};

/// Static geometry of the whole canvas.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SceneLayout {
    pub viewbox: Viewbox,
    pub base: Point,
    pub roots: RootSystem,
    /// Trunk subtree first, then the offshoots, in pre-order; later edges draw on top.
    pub edges: Vec<BranchEdge>,
}

impl SceneLayout {
    #[tracing::instrument(skip(tree, config), fields(tree = %tree.id))]
    pub fn build(tree: &FileNode, config: &StageConfig) -> GrowResult<Self> {
        config.validate()?;
        tree.validate()?;

        let trunk = tree.child(&config.trunk_id).ok_or_else(|| {
            GrowError::layout(format!(
                "tree root '{}' has no child '{}' to use as the trunk",
                tree.id, config.trunk_id
            ))
        })?;

        let base = config.base_point();
        let jitter = if config.organic {
            Jitter::seeded(config.seed)
        } else {
            Jitter::off()
        };

        let mut edges = Vec::with_capacity(tree.iter().count());
        layout_branch(
            trunk,
            Placement::trunk(base, config.trunk_length),
            jitter,
            &mut edges,
        );

        let offshoots: Vec<&FileNode> = tree
            .children
            .iter()
            .filter(|c| c.id != config.trunk_id)
            .collect();
        for (i, node) in offshoots.iter().enumerate() {
            let angle = if i % 2 == 0 {
                -config.offshoot_angle
            } else {
                config.offshoot_angle
            };
            let place = Placement {
                depth: 1,
                index: i,
                siblings: offshoots.len(),
                origin: base,
                angle_deg: angle,
                length: config.offshoot_length,
            };
            layout_branch(node, place, jitter, &mut edges);
        }

        tracing::debug!(edges = edges.len(), "scene laid out");
        Ok(Self {
            viewbox: config.viewbox,
            base,
            roots: RootSystem::generate(base, config.seed, config.organic),
            edges,
        })
    }

    pub fn edge(&self, node_id: &str) -> Option<&BranchEdge> {
        self.edges.iter().find(|e| e.node_id == node_id)
    }

    /// Deepest edge depth present.
    pub fn max_depth(&self) -> usize {
        self.edges.iter().map(|e| e.depth).max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        foundation::core::Progress,
        model::{builtin, tree::NodeKind},
    };

    #[test]
    fn every_non_root_node_gets_one_edge() {
        let layout = SceneLayout::build(builtin::file_tree(), &StageConfig::default()).unwrap();
        assert_eq!(layout.edges.len(), builtin::file_tree().iter().count() - 1);
        assert!(layout.edge("root").is_none());
        assert_eq!(layout.edges[0].node_id, "src");
        assert_eq!(layout.max_depth(), 2);
    }

    #[test]
    fn offshoots_leave_the_base_sideways_and_down() {
        let layout = SceneLayout::build(builtin::file_tree(), &StageConfig::default()).unwrap();
        let config = layout.edge("config").unwrap();
        let env = layout.edge("env").unwrap();
        assert_eq!(config.kind, NodeKind::Config);
        assert_eq!(config.depth, 1);
        assert_eq!(config.line.p0, layout.base);
        assert_eq!(config.angle_deg, -120.0);
        assert_eq!(env.angle_deg, 120.0);
        assert!(config.end().x < layout.base.x && config.end().y > layout.base.y);
        assert!(env.end().x > layout.base.x && env.end().y > layout.base.y);
        assert_eq!(config.length, 50.0);
    }

    #[test]
    fn missing_trunk_is_rejected() {
        let cfg = StageConfig {
            trunk_id: "lib".to_string(),
            ..StageConfig::default()
        };
        let err = SceneLayout::build(builtin::file_tree(), &cfg).unwrap_err();
        assert!(matches!(err, GrowError::Layout(_)));
        assert!(err.to_string().contains("lib"));
    }

    #[test]
    fn rebuild_is_idempotent() {
        let cfg = StageConfig {
            seed: 77,
            ..StageConfig::default()
        };
        let a = SceneLayout::build(builtin::file_tree(), &cfg).unwrap();
        let b = SceneLayout::build(builtin::file_tree(), &cfg).unwrap();
        assert_eq!(a, b);
        let p = Progress::new(0.42);
        let ta: Vec<_> = a.edges.iter().map(|e| e.timing.targets(p)).collect();
        let tb: Vec<_> = b.edges.iter().map(|e| e.timing.targets(p)).collect();
        assert_eq!(ta, tb);
    }

    #[test]
    fn endpoints_match_scenarios() {
        let layout = SceneLayout::build(builtin::file_tree(), &StageConfig::default()).unwrap();
        for e in &layout.edges {
            assert_eq!(e.timing.targets(Progress::START).draw, 0.0);
            assert_eq!(e.timing.targets(Progress::END).draw, 1.0);
        }
    }
}
