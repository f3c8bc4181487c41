//! Depth-cache maintenance, cycle detection, and reparenting.
//!
//! Depth is a memoized count of ancestors, refreshed by walking the
//! parent chain. Reparenting re-expresses a frame under a different
//! parent without changing its absolute placement: both chains are walked
//! to their lowest common ancestor, the frame itself is stepped up to it
//! with [`Frame::unproject_frame`], and a scratch copy of the new parent
//! carries it back down with [`Frame::project_frame`].

use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;

use crate::frame::{Frame, FrameData};

/// Chain length walked before cycle detection switches from plain
/// counting to an identity set. Generous enough that ordinary trees never
/// allocate.
const CYCLE_SCAN_THRESHOLD: usize = 512;

/// Errors raised by the hierarchy operations.
#[derive(Debug, PartialEq, Eq)]
pub enum HierarchyError {
    /// The parent chain contains a cycle, or the requested reparent would
    /// create one.
    CycleDetected,
}

impl fmt::Display for HierarchyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HierarchyError::CycleDetected => write!(f, "frame parent chain contains a cycle"),
        }
    }
}

impl std::error::Error for HierarchyError {}

impl Frame {
    /// The chain from this frame to its root, self first.
    fn ancestor_chain(&self) -> Result<Vec<Frame>, HierarchyError> {
        let mut chain = vec![self.clone()];
        let mut seen: Option<HashSet<*const RefCell<FrameData>>> = None;
        let mut current = self.parent();
        while let Some(node) = current {
            if chain.len() >= CYCLE_SCAN_THRESHOLD {
                let seen = seen.get_or_insert_with(|| {
                    tracing::trace!(
                        threshold = CYCLE_SCAN_THRESHOLD,
                        "deep parent chain, tracking visited frames"
                    );
                    chain.iter().map(Frame::address).collect()
                });
                if !seen.insert(node.address()) {
                    return Err(HierarchyError::CycleDetected);
                }
            }
            current = node.parent();
            chain.push(node);
        }
        Ok(chain)
    }

    /// Refresh the depth cache of every frame from here to the root and
    /// return this frame's fresh depth.
    pub fn recompute_depths(&self) -> Result<usize, HierarchyError> {
        let chain = self.ancestor_chain()?;
        let top = chain.len() - 1;
        for (i, node) in chain.iter().enumerate() {
            node.data.borrow_mut().depth = top - i;
        }
        Ok(top)
    }

    /// Number of ancestors above this frame, freshly recomputed by
    /// walking the parent chain.
    pub fn depth(&self) -> Result<usize, HierarchyError> {
        self.recompute_depths()
    }

    /// Re-express this frame relative to `new_parent` (or the global
    /// frame, for `None`) without changing its absolute placement.
    ///
    /// Fails with [`HierarchyError::CycleDetected`] when the target is
    /// this frame itself or one of its descendants, or when either chain
    /// already contains a cycle; nothing is mutated on failure. A target
    /// equal to the current parent is a no-op. Depth caches of this
    /// frame's former descendants are left stale; callers refresh them
    /// with [`recompute_depths`](Frame::recompute_depths) as needed.
    pub fn reparent(&self, new_parent: Option<&Frame>) -> Result<&Self, HierarchyError> {
        // Fresh depths on both chains; the walks double as cycle checks.
        self.recompute_depths()?;
        if let Some(np) = new_parent {
            np.recompute_depths()?;

            // The target may not be this frame or sit below it.
            let mut cursor = Some(np.clone());
            while let Some(node) = cursor {
                if node.is_same(self) {
                    return Err(HierarchyError::CycleDetected);
                }
                cursor = node.parent();
            }
        }

        // No-op when the parent is unchanged.
        match (self.parent(), new_parent) {
            (None, None) => return Ok(self),
            (Some(p), Some(np)) if p.is_same(np) => return Ok(self),
            _ => {}
        }

        // Candidate common ancestor: the first frame on the target's
        // chain strictly shallower than this one.
        let my_depth = self.cached_depth();
        let mut candidate = new_parent.cloned();
        while let Some(c) = candidate.clone() {
            if c.cached_depth() < my_depth {
                break;
            }
            candidate = c.parent();
        }

        // Step this frame up one level at a time until it hangs directly
        // under the candidate, lifting the candidate whenever the depths
        // meet (the two chains can sit on different branches at the same
        // depth). Running out of parents means the common ancestor is the
        // global frame.
        loop {
            match (self.parent(), candidate.clone()) {
                (None, None) => break,
                (Some(p), Some(c)) if p.is_same(&c) => break,
                (None, Some(_)) => {
                    candidate = None;
                    break;
                }
                (Some(p), _) => {
                    p.unproject_frame(self);
                    while let Some(c) = candidate.clone() {
                        if self.cached_depth() > c.cached_depth() {
                            break;
                        }
                        candidate = c.parent();
                    }
                }
            }
        }

        let np = match new_parent {
            None => {
                // Fully unprojected: the frame is already global.
                let mut d = self.data.borrow_mut();
                d.parent = None;
                d.depth = 0;
                return Ok(self);
            }
            Some(np) => np,
        };

        match &candidate {
            Some(c) if np.is_same(c) => {
                // The target itself is the common ancestor; the basis is
                // already expressed in its coordinates.
                let mut d = self.data.borrow_mut();
                d.parent = Some(np.clone());
                d.depth = np.cached_depth() + 1;
            }
            _ => {
                // Express the target relative to the common ancestor on a
                // scratch copy, then project this frame through it.
                let scratch = np.duplicate();
                loop {
                    match (scratch.parent(), candidate.clone()) {
                        (Some(sp), Some(c)) if sp.is_same(&c) => break,
                        (Some(sp), _) => {
                            sp.unproject_frame(&scratch);
                        }
                        (None, _) => break,
                    }
                }
                scratch.project_frame(self);
                let mut d = self.data.borrow_mut();
                d.parent = Some(np.clone());
                d.depth = np.cached_depth() + 1;
            }
        }
        Ok(self)
    }
}
