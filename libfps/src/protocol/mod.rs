// libfps/src/protocol/mod.rs

//! Wire protocol: frame layouts, checksum, command set and codec.

pub mod checksum;
pub mod codec;
pub mod commands;
pub mod frame;
pub mod parser;
pub mod responses;

pub use checksum::checksum;
pub use commands::{Command, DataPhase, EnrollStep, TimeoutClass};
pub use frame::{CommandPacket, DataPacket, ResponsePacket};
pub use responses::ResponseCode;
