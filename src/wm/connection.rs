//! X11 server connection
//!
//! Wraps an x11rb `RustConnection` and implements the collaborator traits
//! the locator and resolver are written against.

use tracing::{debug, info, trace};
use x11rb::connection::Connection;
use x11rb::protocol::xproto::{Atom, ConfigureWindowAux, ConnectionExt, StackMode, Window};
use x11rb::rust_connection::RustConnection;

use super::property::{self, PropertyRequest};
use super::{PointerReply, PointerSource, Stacking, TreeNode, WindowTree};
use crate::config::Mode;
use crate::error::{Result, XraiseError};

/// Property whose presence marks a managed client window
pub const WM_STATE: &str = "WM_STATE";

pub struct X11Server {
    conn: RustConnection,
    roots: Vec<Window>,
    wm_state: Atom,
}

impl X11Server {
    /// Connect to the display at `address` and intern the atoms the resolver needs
    pub fn connect(address: &str) -> Result<Self> {
        let (conn, default_screen) =
            x11rb::connect(Some(address)).map_err(|source| XraiseError::Connect {
                display: address.to_string(),
                source,
            })?;

        let roots: Vec<Window> = conn.setup().roots.iter().map(|s| s.root).collect();
        info!(
            "Connected to X server {}, {} screen(s), default screen {}",
            address,
            roots.len(),
            default_screen
        );

        let wm_state = property::intern(&conn, WM_STATE)?;
        debug!("WM_STATE atom: {}", wm_state);

        Ok(Self { conn, roots, wm_state })
    }
}

impl PointerSource for X11Server {
    fn screen_roots(&self) -> Vec<Window> {
        self.roots.clone()
    }

    fn query_pointer(&self, root: Window) -> Result<Option<PointerReply>> {
        let reply = self.conn.query_pointer(root)?.reply()?;
        if !reply.same_screen {
            return Ok(None);
        }

        Ok(Some(PointerReply {
            root: reply.root,
            child: reply.child,
            root_x: reply.root_x,
            root_y: reply.root_y,
        }))
    }
}

impl WindowTree for X11Server {
    fn query_tree(&self, window: Window) -> Result<TreeNode> {
        let tree = self.conn.query_tree(window)?.reply()?;
        Ok(TreeNode {
            parent: tree.parent,
            children: tree.children,
        })
    }

    fn is_client(&self, window: Window) -> Result<bool> {
        let state = property::read_property(
            &self.conn,
            window,
            self.wm_state,
            PropertyRequest::default(),
        )?;
        if !state.is_empty() {
            trace!(
                "WM_STATE on 0x{:x}: {} items, type {}, format {}",
                window, state.item_count, state.type_, state.format
            );
        }
        Ok(!state.is_empty())
    }
}

impl Stacking for X11Server {
    fn restack(&self, window: Window, mode: Mode) -> Result<()> {
        let stack_mode = match mode {
            Mode::Raise => StackMode::ABOVE,
            Mode::Lower => StackMode::BELOW,
        };

        self.conn
            .configure_window(window, &ConfigureWindowAux::new().stack_mode(stack_mode))?
            .check()
            .map_err(|e| XraiseError::RestackFailed {
                action: mode.verb(),
                window,
                message: e.to_string(),
            })?;
        self.conn.flush()?;

        Ok(())
    }
}
