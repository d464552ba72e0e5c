//! In-memory repositories. All state lives for the lifetime of the process.

mod room;
mod session;

pub use room::InMemoryRoomRepository;
pub use session::InMemorySessionRepository;
