//! Error types shared by the pointer locator, client resolver and the
//! x11rb-backed window server.

use x11rb::protocol::xproto::Window;

#[derive(Debug, thiserror::Error)]
pub enum XraiseError {
    #[error("pointer not found on any of {screens} screen(s)")]
    PointerQueryFailed { screens: usize },

    #[error("window id 0x{window:x} does not exist")]
    WindowDoesNotExist { window: Window },

    #[error("failed to read property on window 0x{window:x}: {message}")]
    PropertyReadFailed { window: Window, message: String },

    #[error("no client window found")]
    NotFound,

    #[error("invalid client search direction ({0})")]
    InvalidDirection(i32),

    #[error("failed to connect to display '{display}': {source}")]
    Connect {
        display: String,
        #[source]
        source: x11rb::errors::ConnectError,
    },

    #[error("X11 connection failed: {source}")]
    Connection {
        #[from]
        source: x11rb::errors::ConnectionError,
    },

    #[error("X11 request failed: {source}")]
    Reply {
        #[from]
        source: x11rb::errors::ReplyError,
    },

    #[error("failed to {action} window 0x{window:x}: {message}")]
    RestackFailed {
        action: &'static str,
        window: Window,
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, XraiseError>;
