//! Pointer location
//!
//! Finds the screen holding the pointer and the window under it, then
//! optionally maps that window to its client window.

use tracing::{debug, warn};
use x11rb::protocol::xproto::Window;

use super::client::{Direction, resolve_client};
use super::{NONE, PointerReply, PointerSource, WindowTree};
use crate::error::{Result, XraiseError};

/// What the caller wants out of [`locate`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LocateOptions {
    /// Replace the raw pointer window with its client window
    pub resolve_client: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseLocation {
    /// Pointer position relative to the root of `screen`
    pub x: i16,
    pub y: i16,
    pub screen: usize,
    pub root: Window,
    pub window: Window,
}

/// Query screens in order and stop at the first one reporting the pointer.
///
/// The returned `window` is whatever the server reported under the pointer.
pub fn locate_pointer<P: PointerSource + ?Sized>(source: &P) -> Result<MouseLocation> {
    let roots = source.screen_roots();

    for (screen, &root) in roots.iter().enumerate() {
        match source.query_pointer(root) {
            Ok(Some(reply)) => return Ok(location_from(screen, reply)),
            Ok(None) => debug!("Pointer is not on screen {}", screen),
            Err(e) => warn!("Pointer query on screen {} failed: {}", screen, e),
        }
    }

    Err(XraiseError::PointerQueryFailed { screens: roots.len() })
}

/// Locate the pointer and, if asked, resolve the client window under it.
///
/// Over the bare desktop or over nothing the result is the screen's root.
/// Otherwise parents are searched first, then children; when both fail the
/// window under the pointer is kept as is.
pub fn locate<S>(server: &S, options: LocateOptions) -> Result<MouseLocation>
where
    S: PointerSource + WindowTree + ?Sized,
{
    let mut location = locate_pointer(server)?;
    if options.resolve_client {
        location.window = client_under_pointer(server, location.window, location.root);
    }
    Ok(location)
}

fn client_under_pointer<T: WindowTree + ?Sized>(tree: &T, window: Window, root: Window) -> Window {
    if window == root || window == NONE {
        return root;
    }

    let found = resolve_client(tree, window, Direction::Parents)
        .or_else(|_| resolve_client(tree, window, Direction::Children));

    match found {
        Ok(client) => {
            debug!("Window 0x{:x}, root 0x{:x}, client 0x{:x}", window, root, client);
            client
        }
        Err(e) => {
            debug!("Window 0x{:x}: {}, using it as is", window, e);
            window
        }
    }
}

fn location_from(screen: usize, reply: PointerReply) -> MouseLocation {
    MouseLocation {
        x: reply.root_x,
        y: reply.root_y,
        screen,
        root: reply.root,
        window: reply.child,
    }
}
