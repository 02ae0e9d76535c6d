use std::collections::BTreeSet;

use crate::foundation::{
    core::Progress,
    error::{GrowError, GrowResult},
};

/// One narrative stage, active over `[threshold_start, threshold_end)`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StorySection {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub threshold_start: f64,
    pub threshold_end: f64,
    #[serde(default)]
    pub highlight_node_ids: Vec<String>, // display only, not checked against the tree
}

impl StorySection {
    pub fn contains(&self, p: Progress) -> bool {
        self.threshold_start <= p.get() && p.get() < self.threshold_end
    }

    pub fn highlights(&self, node_id: &str) -> bool {
        self.highlight_node_ids.iter().any(|id| id == node_id)
    }

    fn validate(&self) -> GrowResult<()> {
        let (s, e) = (self.threshold_start, self.threshold_end);
        if !(s.is_finite() && e.is_finite()) || s < 0.0 || e > 1.0 || s >= e {
            return Err(GrowError::validation(format!(
                "section '{}' thresholds must satisfy 0 <= start < end <= 1 (got {s}..{e})",
                self.id
            )));
        }
        Ok(())
    }
}

/// Authoring mistakes in how sections tile `[0, 1]`.
#[derive(Clone, Debug, PartialEq)]
pub enum CoverageIssue {
    Gap { from: f64, to: f64 },
    Overlap { first: String, second: String },
}

/// Ordered, non-empty sequence of story sections.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "Vec<StorySection>", into = "Vec<StorySection>")]
pub struct Story {
    sections: Vec<StorySection>,
}

impl Story {
    pub fn new(sections: Vec<StorySection>) -> GrowResult<Self> {
        if sections.is_empty() {
            return Err(GrowError::validation("story must have at least one section"));
        }
        let mut ids = BTreeSet::new();
        for s in &sections {
            if !ids.insert(s.id.as_str()) {
                return Err(GrowError::validation(format!(
                    "duplicate section id '{}'",
                    s.id
                )));
            }
            s.validate()?;
        }

        let story = Self { sections };
        for issue in story.coverage_issues() {
            tracing::warn!(?issue, "story sections do not tile [0, 1]");
        }
        Ok(story)
    }

    pub fn sections(&self) -> &[StorySection] {
        &self.sections
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&StorySection> {
        self.sections.get(index)
    }

    /// Index of the first section containing `p`, else the last section.
    pub fn select_index(&self, p: Progress) -> usize {
        self.sections
            .iter()
            .position(|s| s.contains(p))
            .unwrap_or(self.sections.len() - 1)
    }

    pub fn select(&self, p: Progress) -> &StorySection {
        &self.sections[self.select_index(p)]
    }

    /// Gaps and overlaps, walking sections by start threshold.
    pub fn coverage_issues(&self) -> Vec<CoverageIssue> {
        let mut ordered: Vec<&StorySection> = self.sections.iter().collect();
        ordered.sort_by(|a, b| a.threshold_start.total_cmp(&b.threshold_start));

        let mut issues = Vec::new();
        let mut covered_to = 0.0;
        let mut prev: Option<&StorySection> = None;
        for s in ordered {
            if s.threshold_start > covered_to {
                issues.push(CoverageIssue::Gap {
                    from: covered_to,
                    to: s.threshold_start,
                });
            } else if let Some(p) = prev.filter(|p| s.threshold_start < p.threshold_end) {
                issues.push(CoverageIssue::Overlap {
                    first: p.id.clone(),
                    second: s.id.clone(),
                });
            }
            covered_to = f64::max(covered_to, s.threshold_end);
            prev = Some(s);
        }
        if covered_to < 1.0 {
            issues.push(CoverageIssue::Gap {
                from: covered_to,
                to: 1.0,
            });
        }
        issues
    }
}

impl TryFrom<Vec<StorySection>> for Story {
    type Error = GrowError;

    fn try_from(sections: Vec<StorySection>) -> GrowResult<Self> {
        Self::new(sections)
    }
}

impl From<Story> for Vec<StorySection> {
    fn from(story: Story) -> Self {
        story.sections
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(id: &str, start: f64, end: f64) -> StorySection {
        StorySection {
            id: id.to_string(),
            title: id.to_uppercase(),
            subtitle: String::new(),
            description: String::new(),
            threshold_start: start,
            threshold_end: end,
            highlight_node_ids: vec![],
        }
    }

    #[test]
    fn rejects_empty_duplicate_and_inverted() {
        assert!(Story::new(vec![]).is_err());
        assert!(Story::new(vec![section("a", 0.0, 0.5), section("a", 0.5, 1.0)]).is_err());
        assert!(Story::new(vec![section("a", 0.6, 0.4)]).is_err());
        assert!(Story::new(vec![section("a", 0.0, 1.2)]).is_err());
    }

    #[test]
    fn select_first_match_then_fallback_to_last() {
        let story = Story::new(vec![
            section("a", 0.0, 0.5),
            section("b", 0.5, 1.0),
        ])
        .unwrap();
        assert_eq!(story.select(Progress::new(0.0)).id, "a");
        assert_eq!(story.select(Progress::new(0.5)).id, "b");
        assert_eq!(story.select(Progress::END).id, "b");
    }

    #[test]
    fn gap_falls_back_to_last() {
        let story = Story::new(vec![
            section("a", 0.0, 0.3),
            section("b", 0.6, 0.9),
            section("c", 0.9, 1.0),
        ])
        .unwrap();
        assert_eq!(story.select(Progress::new(0.45)).id, "c");
        assert_eq!(
            story.coverage_issues(),
            vec![CoverageIssue::Gap { from: 0.3, to: 0.6 }]
        );
    }

    #[test]
    fn overlap_prefers_earlier_section() {
        let story = Story::new(vec![section("a", 0.0, 0.6), section("b", 0.4, 1.0)]).unwrap();
        assert_eq!(story.select(Progress::new(0.5)).id, "a");
        assert_eq!(
            story.coverage_issues(),
            vec![CoverageIssue::Overlap {
                first: "a".to_string(),
                second: "b".to_string()
            }]
        );
    }

    #[test]
    fn declaration_order_does_not_matter_for_coverage() {
        let story = Story::new(vec![section("b", 0.5, 1.0), section("a", 0.0, 0.5)]).unwrap();
        assert!(story.coverage_issues().is_empty());
        assert_eq!(story.select(Progress::new(0.2)).id, "a");

        let gappy = Story::new(vec![section("c", 0.7, 1.0), section("a", 0.0, 0.4)]).unwrap();
        assert_eq!(
            gappy.coverage_issues(),
            vec![CoverageIssue::Gap { from: 0.4, to: 0.7 }]
        );
    }

    #[test]
    fn json_goes_through_validation() {
        let ok = r#"[{"id":"a","title":"A","subtitle":"","description":"","threshold_start":0.0,"threshold_end":1.0}]"#;
        let story: Story = serde_json::from_str(ok).unwrap();
        assert_eq!(story.len(), 1);
        assert!(story.get(0).unwrap().highlight_node_ids.is_empty());

        assert!(serde_json::from_str::<Story>("[]").is_err());
    }
}
