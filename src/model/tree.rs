//! Regression-tree ensembles for the `gbdt` estimator.
//!
//! Trees are stored structure-of-arrays: one entry per node in each array,
//! root at index 0. A node whose left and right children are both 0 is a leaf.

use thiserror::Error;

/// Index of a node within one tree.
pub type NodeId = u32;

// ============================================================================
// TreeValidationError
// ============================================================================

/// Structural validation errors for [`Tree`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeValidationError {
    #[error("tree has no nodes")]
    EmptyTree,

    #[error("node arrays have mismatched lengths (expected {expected}, `{array}` has {got})")]
    LengthMismatch {
        array: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("node {node} has {side} child {child} but the tree has {n_nodes} nodes")]
    ChildOutOfBounds {
        node: NodeId,
        side: &'static str,
        child: NodeId,
        n_nodes: usize,
    },

    #[error("node {node} points to itself")]
    SelfLoop { node: NodeId },

    #[error("node {node} is reachable by more than one path")]
    DuplicateVisit { node: NodeId },

    #[error("cycle detected at node {node}")]
    CycleDetected { node: NodeId },

    #[error("node {node} is unreachable from the root")]
    UnreachableNode { node: NodeId },

    #[error("node {node} splits on feature {feature} but the model has {n_features} features")]
    FeatureOutOfBounds {
        node: NodeId,
        feature: u32,
        n_features: usize,
    },

    #[error("node {node} has a non-finite threshold or leaf value")]
    NonFiniteValue { node: NodeId },
}

// ============================================================================
// Tree
// ============================================================================

/// One regression tree with scalar leaves.
#[derive(Debug, Clone)]
pub struct Tree {
    split_indices: Box<[u32]>,
    split_thresholds: Box<[f64]>,
    left_children: Box<[NodeId]>,
    right_children: Box<[NodeId]>,
    default_left: Box<[bool]>,
    leaf_values: Box<[f64]>,
}

impl Tree {
    /// Build and validate a tree from parallel node arrays.
    pub fn new(
        split_indices: Vec<u32>,
        split_thresholds: Vec<f64>,
        left_children: Vec<NodeId>,
        right_children: Vec<NodeId>,
        default_left: Vec<bool>,
        leaf_values: Vec<f64>,
        n_features: usize,
    ) -> Result<Self, TreeValidationError> {
        let n_nodes = leaf_values.len();
        if n_nodes == 0 {
            return Err(TreeValidationError::EmptyTree);
        }
        for (array, got) in [
            ("split_indices", split_indices.len()),
            ("thresholds", split_thresholds.len()),
            ("children_left", left_children.len()),
            ("children_right", right_children.len()),
            ("default_left", default_left.len()),
        ] {
            if got != n_nodes {
                return Err(TreeValidationError::LengthMismatch {
                    array,
                    expected: n_nodes,
                    got,
                });
            }
        }

        let tree = Self {
            split_indices: split_indices.into_boxed_slice(),
            split_thresholds: split_thresholds.into_boxed_slice(),
            left_children: left_children.into_boxed_slice(),
            right_children: right_children.into_boxed_slice(),
            default_left: default_left.into_boxed_slice(),
            leaf_values: leaf_values.into_boxed_slice(),
        };
        tree.validate(n_features)?;
        Ok(tree)
    }

    /// A single-leaf tree.
    pub fn leaf(value: f64) -> Self {
        Self {
            split_indices: Box::new([0]),
            split_thresholds: Box::new([0.0]),
            left_children: Box::new([0]),
            right_children: Box::new([0]),
            default_left: Box::new([false]),
            leaf_values: Box::new([value]),
        }
    }

    #[inline]
    pub fn n_nodes(&self) -> usize {
        self.leaf_values.len()
    }

    #[inline]
    pub fn is_leaf(&self, node: NodeId) -> bool {
        let i = node as usize;
        self.left_children[i] == 0 && self.right_children[i] == 0
    }

    #[inline]
    pub fn leaf_value(&self, node: NodeId) -> f64 {
        self.leaf_values[node as usize]
    }

    /// Check structure: children in bounds, no cycles, every node reachable,
    /// split features inside the encoded feature vector.
    pub fn validate(&self, n_features: usize) -> Result<(), TreeValidationError> {
        let n_nodes = self.n_nodes();
        if n_nodes == 0 {
            return Err(TreeValidationError::EmptyTree);
        }

        // Iterative DFS with color marking.
        // 0 = unvisited, 1 = visiting, 2 = done
        let mut color = vec![0u8; n_nodes];
        let mut stack: Vec<(NodeId, u8)> = vec![(0, 0)];

        while let Some((node, phase)) = stack.pop() {
            let node_usize = node as usize;
            if phase == 1 {
                color[node_usize] = 2;
                continue;
            }

            match color[node_usize] {
                0 => {}
                1 => return Err(TreeValidationError::CycleDetected { node }),
                _ => return Err(TreeValidationError::DuplicateVisit { node }),
            }
            color[node_usize] = 1;
            stack.push((node, 1));

            if self.is_leaf(node) {
                if !self.leaf_values[node_usize].is_finite() {
                    return Err(TreeValidationError::NonFiniteValue { node });
                }
                continue;
            }

            let feature = self.split_indices[node_usize];
            if feature as usize >= n_features {
                return Err(TreeValidationError::FeatureOutOfBounds {
                    node,
                    feature,
                    n_features,
                });
            }
            if !self.split_thresholds[node_usize].is_finite() {
                return Err(TreeValidationError::NonFiniteValue { node });
            }

            let left = self.left_children[node_usize];
            let right = self.right_children[node_usize];
            for (side, child) in [("left", left), ("right", right)] {
                if child == node {
                    return Err(TreeValidationError::SelfLoop { node });
                }
                if child as usize >= n_nodes {
                    return Err(TreeValidationError::ChildOutOfBounds {
                        node,
                        side,
                        child,
                        n_nodes,
                    });
                }
            }

            stack.push((right, 0));
            stack.push((left, 0));
        }

        match color.iter().position(|&c| c == 0) {
            Some(i) => Err(TreeValidationError::UnreachableNode { node: i as NodeId }),
            None => Ok(()),
        }
    }

    /// Walk from the root to a leaf. Features below the threshold go left;
    /// NaN follows the node's default direction.
    pub fn traverse_to_leaf(&self, features: &[f64]) -> NodeId {
        let mut node: NodeId = 0;
        while !self.is_leaf(node) {
            let i = node as usize;
            let fvalue = features[self.split_indices[i] as usize];
            let go_left = if fvalue.is_nan() {
                self.default_left[i]
            } else {
                fvalue < self.split_thresholds[i]
            };
            node = if go_left {
                self.left_children[i]
            } else {
                self.right_children[i]
            };
        }
        node
    }

    #[inline]
    pub fn predict_row(&self, features: &[f64]) -> f64 {
        self.leaf_value(self.traverse_to_leaf(features))
    }
}

// ============================================================================
// Forest
// ============================================================================

/// Additive tree ensemble: `margin = base_score + Σ tree(x)`.
#[derive(Debug, Clone)]
pub struct Forest {
    trees: Vec<Tree>,
    base_score: f64,
    n_features: usize,
}

impl Forest {
    pub fn new(trees: Vec<Tree>, base_score: f64, n_features: usize) -> Self {
        Self {
            trees,
            base_score,
            n_features,
        }
    }

    #[inline]
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Raw margin for one encoded row.
    pub fn margin(&self, features: &[f64]) -> f64 {
        debug_assert!(
            features.len() >= self.n_features,
            "not enough features: got {}, need {}",
            features.len(),
            self.n_features
        );
        self.trees
            .iter()
            .fold(self.base_score, |acc, tree| acc + tree.predict_row(features))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    /// x0 < 0.5 → -1.0, else (x1 < 2.0 → 0.5, else 2.0)
    fn stump_tree() -> Tree {
        Tree::new(
            vec![0, 0, 1, 0, 0],
            vec![0.5, 0.0, 2.0, 0.0, 0.0],
            vec![1, 0, 3, 0, 0],
            vec![2, 0, 4, 0, 0],
            vec![true, false, false, false, false],
            vec![0.0, -1.0, 0.0, 0.5, 2.0],
            2,
        )
        .expect("valid tree")
    }

    #[test]
    fn traversal_follows_thresholds() {
        let tree = stump_tree();
        assert_eq!(tree.predict_row(&[0.0, 9.0]), -1.0);
        assert_eq!(tree.predict_row(&[1.0, 1.0]), 0.5);
        assert_eq!(tree.predict_row(&[1.0, 3.0]), 2.0);
    }

    #[test]
    fn nan_uses_default_direction() {
        let tree = stump_tree();
        assert_eq!(tree.predict_row(&[f64::NAN, 0.0]), -1.0);
        // node 2 defaults right
        assert_eq!(tree.predict_row(&[1.0, f64::NAN]), 2.0);
    }

    #[test]
    fn forest_sums_trees_and_base_score() {
        let forest = Forest::new(vec![stump_tree(), Tree::leaf(0.25)], 0.1, 2);
        assert_abs_diff_eq!(forest.margin(&[1.0, 1.0]), 0.1 + 0.5 + 0.25, epsilon = 1e-12);
        assert_abs_diff_eq!(forest.margin(&[0.0, 0.0]), 0.1 - 1.0 + 0.25, epsilon = 1e-12);
    }

    #[test]
    fn validation_rejects_out_of_bounds_child() {
        let err = Tree::new(
            vec![0, 0, 0],
            vec![0.5, 0.0, 0.0],
            vec![1, 0, 0],
            vec![7, 0, 0],
            vec![true, false, false],
            vec![0.0, 1.0, 2.0],
            1,
        )
        .unwrap_err();
        assert!(matches!(err, TreeValidationError::ChildOutOfBounds { side: "right", .. }));
    }

    #[test]
    fn validation_rejects_cycles_and_unreachable_nodes() {
        // node 1 points back to the root
        let err = Tree::new(
            vec![0, 0, 0],
            vec![0.5, 0.5, 0.0],
            vec![1, 0, 0],
            vec![2, 2, 0],
            vec![true, true, false],
            vec![0.0, 0.0, 1.0],
            1,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            TreeValidationError::CycleDetected { .. } | TreeValidationError::DuplicateVisit { .. }
        ));

        let err = Tree::new(
            vec![0, 0],
            vec![0.0, 0.0],
            vec![0, 0],
            vec![0, 0],
            vec![false, false],
            vec![1.0, 2.0],
            1,
        )
        .unwrap_err();
        assert_eq!(err, TreeValidationError::UnreachableNode { node: 1 });
    }

    #[test]
    fn validation_rejects_unknown_feature() {
        let err = Tree::new(
            vec![3, 0, 0],
            vec![0.5, 0.0, 0.0],
            vec![1, 0, 0],
            vec![2, 0, 0],
            vec![true, false, false],
            vec![0.0, 1.0, 2.0],
            2,
        )
        .unwrap_err();
        assert!(matches!(err, TreeValidationError::FeatureOutOfBounds { feature: 3, .. }));
    }

    #[test]
    fn validation_rejects_length_mismatch() {
        let err = Tree::new(vec![0], vec![], vec![0], vec![0], vec![false], vec![1.0], 1)
            .unwrap_err();
        assert!(matches!(err, TreeValidationError::LengthMismatch { array: "thresholds", .. }));
    }
}
