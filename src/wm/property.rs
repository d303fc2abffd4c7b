//! Window property reads
//!
//! Fetches an entire property value regardless of its type. Callers mostly
//! care about the item count: a missing property reads back as zero items.

use tracing::trace;
use x11rb::connection::Connection;
use x11rb::errors::ReplyError;
use x11rb::protocol::ErrorKind;
use x11rb::protocol::xproto::{Atom, AtomEnum, ConnectionExt, GetPropertyReply, Window};

use crate::error::{Result, XraiseError};

/// Property to read, by name or by already interned atom
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKey<'a> {
    Name(&'a str),
    Atom(Atom),
}

impl From<Atom> for PropertyKey<'_> {
    fn from(atom: Atom) -> Self {
        PropertyKey::Atom(atom)
    }
}

impl<'a> From<&'a str> for PropertyKey<'a> {
    fn from(name: &'a str) -> Self {
        PropertyKey::Name(name)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PropertyRequest {
    /// Hand the raw bytes back in [`Property::value`]
    pub want_value: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Property {
    /// Number of 8, 16 or 32 bit items
    pub item_count: u32,
    pub type_: Atom,
    /// Bits per item, 0 when the property is absent
    pub format: u8,
    pub value: Option<Vec<u8>>,
}

impl Property {
    pub fn is_empty(&self) -> bool {
        self.item_count == 0
    }
}

/// Intern `name`, creating the atom if the server does not know it yet
pub fn intern<C: Connection>(conn: &C, name: &str) -> Result<Atom> {
    Ok(conn.intern_atom(false, name.as_bytes())?.reply()?.atom)
}

/// Read the full value of `key` on `window`.
///
/// `WindowDoesNotExist` when the window is gone, `PropertyReadFailed` for
/// any other failure of the read itself.
pub fn read_property<'a, C: Connection>(
    conn: &C,
    window: Window,
    key: impl Into<PropertyKey<'a>>,
    request: PropertyRequest,
) -> Result<Property> {
    let atom = match key.into() {
        PropertyKey::Name(name) => intern(conn, name)?,
        PropertyKey::Atom(atom) => atom,
    };

    let reply = conn
        .get_property(false, window, atom, AtomEnum::ANY, 0, u32::MAX)
        .map_err(|e| property_error(window, e.into()))?
        .reply()
        .map_err(|e| property_error(window, e))?;

    trace!(
        "Property {} on 0x{:x}: {} items, type {}, format {}",
        atom, window, reply.value_len, reply.type_, reply.format
    );

    Ok(property_from_reply(reply, request))
}

/// A reply for an unset property carries type NONE, format 0 and no items.
fn property_from_reply(reply: GetPropertyReply, request: PropertyRequest) -> Property {
    Property {
        item_count: reply.value_len,
        type_: reply.type_,
        format: reply.format,
        value: request.want_value.then_some(reply.value),
    }
}

fn property_error(window: Window, err: ReplyError) -> XraiseError {
    match err {
        ReplyError::X11Error(e) if e.error_kind == ErrorKind::Window => {
            XraiseError::WindowDoesNotExist { window }
        }
        other => XraiseError::PropertyReadFailed {
            window,
            message: other.to_string(),
        },
    }
}
