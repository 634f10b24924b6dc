//! Bounding Volume Hierarchy over the scene's shape table.
//!
//! A binary tree of AABBs. Leaves hold indices into the shape table;
//! internal nodes hold exactly two children and the union of their boxes.
//! Built once from a finalized shape collection, read-only afterwards.

use glint_core::Primitive;
use glint_math::{Aabb, Interval, Ray};

use crate::tracer::{Hit, RAY_EPSILON};

/// Maximum primitives per leaf node before splitting.
const LEAF_MAX_SIZE: usize = 4;

/// BVH node - either a branch with two children or a leaf with shape
/// indices.
enum BvhNode {
    Branch {
        left: Box<BvhNode>,
        right: Box<BvhNode>,
        bbox: Aabb,
    },
    Leaf {
        shapes: Vec<usize>,
        bbox: Aabb,
    },
}

impl BvhNode {
    fn bbox(&self) -> &Aabb {
        match self {
            BvhNode::Branch { bbox, .. } => bbox,
            BvhNode::Leaf { bbox, .. } => bbox,
        }
    }
}

/// A bounding volume hierarchy for nearest-intersection queries.
pub struct Bvh {
    root: BvhNode,
}

impl Bvh {
    /// Build a BVH over the shape table. Returns None for an empty table.
    ///
    /// Pure function of the input: rebuilding after any change to the
    /// table is the caller's responsibility.
    pub fn build(shapes: &[Primitive]) -> Option<Bvh> {
        if shapes.is_empty() {
            return None;
        }

        let indices: Vec<usize> = (0..shapes.len()).collect();
        let root = build_node(shapes, indices);

        log::info!("built BVH over {} shapes", shapes.len());
        Some(Bvh { root })
    }

    /// Bounding box of the whole hierarchy.
    pub fn bounding_box(&self) -> Aabb {
        *self.root.bbox()
    }

    /// Nearest hit along the ray with RAY_EPSILON < t < max_t.
    pub fn intersect(&self, shapes: &[Primitive], ray: &Ray, max_t: f32) -> Option<Hit> {
        let mut best = None;
        intersect_node(&self.root, shapes, ray, max_t, &mut best);
        best
    }
}

// ============================================================================
// Construction
// ============================================================================

fn shape_centroid(shapes: &[Primitive], index: usize) -> glint_math::Vec3 {
    shapes[index].bounding_box().centroid()
}

fn build_node(shapes: &[Primitive], indices: Vec<usize>) -> BvhNode {
    let bbox = indices
        .iter()
        .fold(Aabb::EMPTY, |acc, &i| acc.merge(&shapes[i].bounding_box()));

    if indices.len() <= LEAF_MAX_SIZE {
        return BvhNode::Leaf {
            shapes: indices,
            bbox,
        };
    }

    // Bounds over shape centroids, not shape extents
    let centroid_bounds = indices
        .iter()
        .fold(Aabb::EMPTY, |acc, &i| acc.expand(shape_centroid(shapes, i)));

    let axis = largest_gap_axis(shapes, &indices);
    let midpoint = 0.5 * (centroid_bounds.min[axis] + centroid_bounds.max[axis]);

    let mut left_set = Vec::new();
    let mut right_set = Vec::new();
    for &i in &indices {
        if shape_centroid(shapes, i)[axis] < midpoint {
            left_set.push(i);
        } else {
            right_set.push(i);
        }
    }

    if left_set.is_empty() || right_set.is_empty() {
        // Degenerate midpoint split: fall back to a median split. The
        // stable sort keeps table order for identical centroids, and the
        // n/2 split leaves both halves strictly smaller, so recursion
        // terminates even when every centroid coincides.
        let mut sorted = indices;
        sorted.sort_by(|&a, &b| {
            let ka = shape_centroid(shapes, a)[axis];
            let kb = shape_centroid(shapes, b)[axis];
            ka.partial_cmp(&kb).unwrap_or(std::cmp::Ordering::Equal)
        });

        let mid = sorted.len() / 2;
        right_set = sorted.split_off(mid);
        left_set = sorted;
    }

    BvhNode::Branch {
        left: Box::new(build_node(shapes, left_set)),
        right: Box::new(build_node(shapes, right_set)),
        bbox,
    }
}

/// Pick the split axis with the largest empty gap between shape bounds.
///
/// Per axis, the per-shape box minima and maxima are sorted independently
/// and the largest `sorted_min[i] - sorted_max[i-1]` over consecutive
/// shapes is the axis's gap. Ties prefer X, then Y, then Z.
fn largest_gap_axis(shapes: &[Primitive], indices: &[usize]) -> usize {
    let mut best_axis = 0;
    let mut best_gap = f32::NEG_INFINITY;

    for axis in 0..3 {
        let mut mins: Vec<f32> = indices
            .iter()
            .map(|&i| shapes[i].bounding_box().min[axis])
            .collect();
        let mut maxs: Vec<f32> = indices
            .iter()
            .map(|&i| shapes[i].bounding_box().max[axis])
            .collect();
        mins.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        maxs.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let mut gap: f32 = 0.0;
        for i in 1..mins.len() {
            gap = gap.max(mins[i] - maxs[i - 1]);
        }

        if gap > best_gap {
            best_gap = gap;
            best_axis = axis;
        }
    }

    best_axis
}

// ============================================================================
// Traversal
// ============================================================================

/// Branch-and-bound descent. `best` is the single accumulator for the
/// closest hit across the whole recursion; `max_t` is the current upper
/// bound on useful distances.
fn intersect_node(
    node: &BvhNode,
    shapes: &[Primitive],
    ray: &Ray,
    mut max_t: f32,
    best: &mut Option<Hit>,
) -> bool {
    let Some(range) = node.bbox().hit_distance(ray) else {
        return false;
    };
    if range.min > max_t {
        return false;
    }

    match node {
        BvhNode::Leaf { shapes: ids, .. } => {
            let mut hit = false;
            for &id in ids {
                if let Some(t) = shapes[id].hit(ray, Interval::new(RAY_EPSILON, max_t)) {
                    max_t = t;
                    *best = Some(Hit { t, shape: id });
                    hit = true;
                }
            }
            hit
        }

        BvhNode::Branch { left, right, .. } => {
            let left_range = left.bbox().hit_distance(ray);
            let right_range = right.bbox().hit_distance(ray);

            // Visit the child with the smaller entry distance first
            let (first, second) = match (left_range, right_range) {
                (None, None) => return false,
                (Some(_), None) => (left, right),
                (None, Some(_)) => (right, left),
                (Some(l), Some(r)) => {
                    if l.min < r.min {
                        (left, right)
                    } else {
                        (right, left)
                    }
                }
            };

            let mut hit = false;
            if intersect_node(first, shapes, ray, max_t, best) {
                // Tighten the bound so the second child can be pruned
                if let Some(found) = best {
                    max_t = found.t;
                }
                hit = true;
            }
            if intersect_node(second, shapes, ray, max_t, best) {
                hit = true;
            }

            hit
        }
    }
}
