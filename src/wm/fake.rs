//! In-memory window server used by the tests

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};

use x11rb::protocol::xproto::Window;

use super::{NONE, PointerReply, PointerSource, Stacking, TreeNode, WindowTree};
use crate::config::Mode;
use crate::error::{Result, XraiseError};

#[derive(Debug, Default)]
pub struct FakeServer {
    roots: Vec<Window>,
    parents: HashMap<Window, Window>,
    children: HashMap<Window, Vec<Window>>,
    clients: HashSet<Window>,
    pointer: Option<(usize, PointerReply)>,
    broken_pointer: HashSet<usize>,
    broken_reads: HashSet<Window>,
    broken_trees: HashSet<Window>,
    restack_fails: bool,
    next_id: Window,

    pointer_queries: Cell<usize>,
    property_reads: Cell<usize>,
    tree_queries: Cell<usize>,
    restacked: RefCell<Vec<(Window, Mode)>>,
}

impl FakeServer {
    pub fn new(screens: usize) -> Self {
        let mut server = Self {
            next_id: 0x100,
            ..Self::default()
        };
        for _ in 0..screens {
            let root = server.allocate();
            server.roots.push(root);
        }
        server
    }

    fn allocate(&mut self) -> Window {
        let id = self.next_id;
        self.next_id += 1;
        self.children.insert(id, Vec::new());
        id
    }

    pub fn root(&self, screen: usize) -> Window {
        self.roots[screen]
    }

    /// New window stacked last among `parent`'s children
    pub fn add_window(&mut self, parent: Window) -> Window {
        let id = self.allocate();
        self.parents.insert(id, parent);
        self.children.entry(parent).or_default().push(id);
        id
    }

    pub fn mark_client(&mut self, window: Window) {
        self.clients.insert(window);
    }

    pub fn put_pointer(&mut self, screen: usize, child: Window, x: i16, y: i16) {
        let reply = PointerReply {
            root: self.roots[screen],
            child,
            root_x: x,
            root_y: y,
        };
        self.pointer = Some((screen, reply));
    }

    pub fn fail_pointer_on(&mut self, screen: usize) {
        self.broken_pointer.insert(screen);
    }

    /// Property reads on `window` report a vanished window
    pub fn fail_reads_on(&mut self, window: Window) {
        self.broken_reads.insert(window);
    }

    pub fn fail_tree_on(&mut self, window: Window) {
        self.broken_trees.insert(window);
    }

    pub fn fail_restack(&mut self) {
        self.restack_fails = true;
    }

    pub fn reset_counters(&self) {
        self.pointer_queries.set(0);
        self.property_reads.set(0);
        self.tree_queries.set(0);
    }

    pub fn pointer_queries(&self) -> usize {
        self.pointer_queries.get()
    }

    pub fn property_reads(&self) -> usize {
        self.property_reads.get()
    }

    pub fn tree_queries(&self) -> usize {
        self.tree_queries.get()
    }

    pub fn restacked(&self) -> Vec<(Window, Mode)> {
        self.restacked.borrow().clone()
    }
}

impl PointerSource for FakeServer {
    fn screen_roots(&self) -> Vec<Window> {
        self.roots.clone()
    }

    fn query_pointer(&self, root: Window) -> Result<Option<PointerReply>> {
        self.pointer_queries.set(self.pointer_queries.get() + 1);

        let screen = self.roots.iter().position(|&r| r == root);
        if screen.is_some_and(|s| self.broken_pointer.contains(&s)) {
            return Err(XraiseError::Connection {
                source: x11rb::errors::ConnectionError::UnknownError,
            });
        }

        Ok(self
            .pointer
            .filter(|(s, _)| Some(*s) == screen)
            .map(|(_, reply)| reply))
    }
}

impl WindowTree for FakeServer {
    fn query_tree(&self, window: Window) -> Result<TreeNode> {
        self.tree_queries.set(self.tree_queries.get() + 1);

        if self.broken_trees.contains(&window) || !self.children.contains_key(&window) {
            return Err(XraiseError::WindowDoesNotExist { window });
        }

        Ok(TreeNode {
            parent: self.parents.get(&window).copied().unwrap_or(NONE),
            children: self.children[&window].clone(),
        })
    }

    fn is_client(&self, window: Window) -> Result<bool> {
        self.property_reads.set(self.property_reads.get() + 1);

        if self.broken_reads.contains(&window) {
            return Err(XraiseError::WindowDoesNotExist { window });
        }
        Ok(self.clients.contains(&window))
    }
}

impl Stacking for FakeServer {
    fn restack(&self, window: Window, mode: Mode) -> Result<()> {
        if self.restack_fails {
            return Err(XraiseError::RestackFailed {
                action: mode.verb(),
                window,
                message: "BadWindow".into(),
            });
        }
        self.restacked.borrow_mut().push((window, mode));
        Ok(())
    }
}
