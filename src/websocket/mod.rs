pub mod connection;
pub mod handler;
pub mod messages;

pub use connection::Broadcaster;
pub use handler::ws_handler;
pub use messages::QueueSnapshot;
