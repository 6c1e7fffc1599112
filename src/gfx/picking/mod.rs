//! # Picking
//!
//! Turns a cursor position into the nodes under it, nearest first.
//!
//! ## How it works
//!
//! 1. **Tagging**: every visible node, in pre-order, gets a tag `1..`
//! 2. **Hit-test pass**: each node draws its picking variant into a
//!    hit-test painter, which records `(tag, min depth)` for anything landing
//!    within a few pixels of the cursor
//! 3. **Ordering**: records are sorted by depth (ties keep traversal order)
//!    and mapped back to nodes
//!
//! Layers are tried in precedence order: screen, then overlay, then scene.
//! The first layer with any hit wins, regardless of 3D depth. Text is tested
//! together with the screen layer, as the rectangle each string covers.


use std::cmp::Ordering;
use std::collections::HashSet;

use crate::gfx::camera::Camera;
use crate::gfx::rendering::painter::Layer;
use crate::gfx::scene::{NodeId, RenderContext, SceneGraph};

pub use hit_test::{HitRecord, HitTestPainter2D, HitTestPainter3D};

/// One node under the cursor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit {
    pub node: NodeId,
    /// Nearest window depth of the node's hit fragments; 0 for screen items.
    pub depth: f64,
}

/// Result of a layered pick.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PickResult {
    /// Layer that produced the hits, `None` if nothing was hit.
    pub layer: Option<Layer>,
    /// Hits, nearest first, one per node.
    pub hits: Vec<PickHit>,
}

impl PickResult {
    pub fn nearest(&self) -> Option<NodeId> {
        self.hits.first().map(|h| h.node)
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    pub fn nodes(&self) -> Vec<NodeId> {
        self.hits.iter().map(|h| h.node).collect()
    }
}

/// Layered hit-testing over a scene graph.
#[derive(Debug, Clone, Copy)]
pub struct Picker {
    /// Side of the square around the cursor, in pixels.
    pub tolerance: f64,
}

impl Default for Picker {
    fn default() -> Self {
        Self { tolerance: 5.0 }
    }
}

impl Picker {
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    /// Picks at a window position (Y from the top). `order` is the pre-order
    /// list of nodes attached to the view.
    pub fn pick(&self, graph: &SceneGraph, order: &[NodeId], camera: &Camera, x: f64, y: f64) -> PickResult {
        for layer in Layer::PICK_ORDER {
            let hits = self.pick_layer(layer, graph, order, camera, x, y);
            log::trace!("pick ({x}, {y}) {layer:?}: {} hit(s)", hits.len());
            if !hits.is_empty() {
                return PickResult {
                    layer: Some(layer),
                    hits,
                };
            }
        }
        PickResult::default()
    }

    /// Hits in a single layer. [`Layer::Screen`] includes text;
    /// [`Layer::Text`] tests text alone.
    pub fn pick_layer(
        &self,
        layer: Layer,
        graph: &SceneGraph,
        order: &[NodeId],
        camera: &Camera,
        x: f64,
        y: f64,
    ) -> Vec<PickHit> {
        let tagged: Vec<NodeId> = order
            .iter()
            .copied()
            .filter(|id| graph.node(*id).is_some_and(|n| n.is_visible()))
            .collect();

        let records = match layer {
            Layer::Scene | Layer::Overlay => {
                let mut painter = HitTestPainter3D::new(camera, x, y, self.tolerance);
                for (i, id) in tagged.iter().enumerate() {
                    let Some(node) = graph.node(*id) else {
                        continue;
                    };
                    painter.set_tag(i as u32 + 1);
                    let ctx = RenderContext { camera, node: *id };
                    if layer == Layer::Scene {
                        node.item().pick_scene(&mut painter, &ctx);
                    } else {
                        node.item().pick_overlay(&mut painter, &ctx);
                    }
                }
                painter.take_records()
            }
            Layer::Screen | Layer::Text => {
                let mut painter = HitTestPainter2D::new(x, y, self.tolerance);
                for (i, id) in tagged.iter().enumerate() {
                    let Some(node) = graph.node(*id) else {
                        continue;
                    };
                    painter.set_tag(i as u32 + 1);
                    let ctx = RenderContext { camera, node: *id };
                    if layer == Layer::Screen {
                        node.item().pick_2d(&mut painter, &ctx);
                    }
                    node.item().pick_text(&mut painter, &ctx);
                }
                painter.take_records()
            }
        };

        resolve(records, &tagged)
    }
}

/// Sorts records nearest first (stable, so ties keep tag order) and maps tags
/// back to nodes, keeping the first occurrence of each node.
fn resolve(mut records: Vec<HitRecord>, tagged: &[NodeId]) -> Vec<PickHit> {
    records.sort_by(|a, b| a.min_depth.partial_cmp(&b.min_depth).unwrap_or(Ordering::Equal));
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter_map(|r| {
            let node = *tagged.get((r.tag as usize).checked_sub(1)?)?;
            seen.insert(node).then_some(PickHit {
                node,
                depth: r.min_depth,
            })
        })
        .collect()
}
