//! Client window resolution
//!
//! Maps an arbitrary window (a frame, a toolkit widget, a container) to the
//! nearest window carrying WM_STATE, which is how a window manager marks a
//! managed client.

use tracing::{debug, trace, warn};
use x11rb::protocol::xproto::Window;

use super::{NONE, WindowTree};
use crate::error::{Result, XraiseError};

/// Which way to walk the hierarchy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Follow parent links toward the root
    Parents,
    /// Depth-first over children, in the order the server returns them
    Children,
}

impl TryFrom<i32> for Direction {
    type Error = XraiseError;

    fn try_from(value: i32) -> Result<Self> {
        match value {
            0 => Ok(Direction::Parents),
            1 => Ok(Direction::Children),
            other => Err(XraiseError::InvalidDirection(other)),
        }
    }
}

/// Search from `window` for the nearest WM_STATE-bearing window.
///
/// A window that is itself marked is returned without any tree query.
/// Fails with [`XraiseError::NotFound`] when the walk is exhausted or
/// starts at the none window.
pub fn resolve_client<T: WindowTree + ?Sized>(
    tree: &T,
    window: Window,
    direction: Direction,
) -> Result<Window> {
    match direction {
        Direction::Parents => find_in_parents(tree, window),
        Direction::Children => find_in_children(tree, window),
    }
}

fn find_in_parents<T: WindowTree + ?Sized>(tree: &T, mut window: Window) -> Result<Window> {
    loop {
        if window == NONE {
            return Err(XraiseError::NotFound);
        }
        if has_wm_state(tree, window) {
            return Ok(window);
        }

        debug!("Window 0x{:x} has no WM_STATE, searching parents", window);
        // Children of the node are dropped here unused
        window = match tree.query_tree(window) {
            Ok(node) => node.parent,
            Err(e) => {
                warn!("Failed to query tree of window 0x{:x}: {}", window, e);
                NONE
            }
        };
    }
}

fn find_in_children<T: WindowTree + ?Sized>(tree: &T, window: Window) -> Result<Window> {
    if window == NONE {
        return Err(XraiseError::NotFound);
    }
    if has_wm_state(tree, window) {
        return Ok(window);
    }

    let children = match tree.query_tree(window) {
        Ok(node) => node.children,
        Err(e) => {
            warn!("Failed to query tree of window 0x{:x}: {}", window, e);
            return Err(XraiseError::NotFound);
        }
    };
    debug!("Window 0x{:x} has no WM_STATE, searching {} children", window, children.len());

    children
        .iter()
        .find_map(|&child| find_in_children(tree, child).ok())
        .ok_or(XraiseError::NotFound)
}

/// Read failures count as "no WM_STATE" so the walk can carry on.
fn has_wm_state<T: WindowTree + ?Sized>(tree: &T, window: Window) -> bool {
    trace!("Reading WM_STATE on window 0x{:x}", window);
    match tree.is_client(window) {
        Ok(marked) => marked,
        Err(XraiseError::WindowDoesNotExist { .. }) => {
            debug!("Window 0x{:x} vanished during the search", window);
            false
        }
        Err(e) => {
            warn!("{}", e);
            false
        }
    }
}
