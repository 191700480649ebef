// SPDX-License-Identifier: MIT

//! `RTM_NEWLINK` messages: the `ifinfomsg` header and its attributes.

pub mod attributes;
pub mod constants;

mod hardware;
mod header;
mod message;
mod state;

pub use self::hardware::{Arphrd, HardwareTypeLookup};
pub use self::header::{LinkHeader, LinkMessageBuffer, LINK_HEADER_LEN};
pub use self::message::LinkMessage;
pub use self::state::OperState;
