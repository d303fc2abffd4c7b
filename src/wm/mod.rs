//! Window server collaborators and the raise/lower pipeline
//!
//! The pointer locator and client resolver only talk to the server through
//! the traits below, so they run the same against a live X connection
//! ([`connection::X11Server`]) or an in-memory hierarchy in tests.

pub mod client;
pub mod connection;
pub mod pointer;
pub mod property;

#[cfg(test)]
pub mod fake;

use tracing::{debug, info};
use x11rb::protocol::xproto::Window;

use crate::config::Mode;
use crate::error::Result;

use pointer::{LocateOptions, locate};

/// The "none" window handle
pub const NONE: Window = 0;

/// Pointer state as reported for one screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerReply {
    pub root: Window,
    /// Window directly under the pointer (may be the root or 0)
    pub child: Window,
    pub root_x: i16,
    pub root_y: i16,
}

/// Parent link and children of one window, in server stacking order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeNode {
    pub parent: Window,
    pub children: Vec<Window>,
}

/// Per-screen pointer queries
pub trait PointerSource {
    /// Root window of every screen, indexed by screen number
    fn screen_roots(&self) -> Vec<Window>;

    /// `Ok(None)` when the pointer is not on the screen owning `root`
    fn query_pointer(&self, root: Window) -> Result<Option<PointerReply>>;
}

/// Read access to the live window hierarchy
pub trait WindowTree {
    fn query_tree(&self, window: Window) -> Result<TreeNode>;

    /// True when the window carries a non-empty WM_STATE property
    fn is_client(&self, window: Window) -> Result<bool>;
}

/// Stacking order changes
pub trait Stacking {
    fn restack(&self, window: Window, mode: Mode) -> Result<()>;
}

/// Find the client window under the pointer and raise or lower it.
///
/// Returns the window that was restacked. Fails without touching the
/// stacking order when no screen reports the pointer.
pub fn raise_under_pointer<S>(server: &S, mode: Mode) -> Result<Window>
where
    S: PointerSource + WindowTree + Stacking,
{
    let location = locate(server, LocateOptions { resolve_client: true })?;
    debug!(
        "Pointer at ({}, {}) on screen {}, root 0x{:x}, target 0x{:x}",
        location.x, location.y, location.screen, location.root, location.window
    );

    server.restack(location.window, mode)?;
    info!("Restacked window 0x{:x} ({:?})", location.window, mode);

    Ok(location.window)
}
