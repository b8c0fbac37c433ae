// src/model/trees.rs — Gradient-boosted tree ensemble (binary logloss)

use serde::{Deserialize, Serialize};

use super::math::sigmoid;

/// One node of a flattened tree. Node 0 is the root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    /// `x[feature] < threshold` goes left, otherwise right.
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    pub nodes: Vec<TreeNode>,
}

impl Tree {
    /// Leaf value reached by `values`. Children always sit after their
    /// parent (checked on load), so the walk terminates.
    pub fn leaf_value(&self, values: &[f64]) -> f64 {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                TreeNode::Leaf { value } => return *value,
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if values[*feature] < *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }

    fn validate(&self, n_features: usize) -> Result<(), String> {
        if self.nodes.is_empty() {
            return Err("tree has no nodes".into());
        }
        for (i, node) in self.nodes.iter().enumerate() {
            match node {
                TreeNode::Leaf { value } if !value.is_finite() => {
                    return Err(format!("node {i}: non-finite leaf value"));
                }
                TreeNode::Leaf { .. } => {}
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if *feature >= n_features {
                        return Err(format!(
                            "node {i}: split feature {feature} out of range ({n_features} features)"
                        ));
                    }
                    if threshold.is_nan() {
                        return Err(format!("node {i}: NaN threshold"));
                    }
                    for child in [*left, *right] {
                        if child <= i || child >= self.nodes.len() {
                            return Err(format!("node {i}: invalid child index {child}"));
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeEnsemble {
    pub feature_names: Vec<String>,
    #[serde(default)]
    pub base_score: f64,
    pub trees: Vec<Tree>,
}

impl TreeEnsemble {
    pub fn raw_score(&self, values: &[f64]) -> f64 {
        self.base_score + self.trees.iter().map(|t| t.leaf_value(values)).sum::<f64>()
    }

    pub fn positive_probability(&self, values: &[f64]) -> f64 {
        sigmoid(self.raw_score(values))
    }

    pub fn validate(&self) -> Result<(), String> {
        if !self.base_score.is_finite() {
            return Err(format!("non-finite base_score: {}", self.base_score));
        }
        for (i, tree) in self.trees.iter().enumerate() {
            tree.validate(self.feature_names.len())
                .map_err(|e| format!("tree {i}: {e}"))?;
        }
        Ok(())
    }
}
