mod dispatcher;
mod payload;
mod sink;
pub mod testing;

pub use dispatcher::CommandDispatcher;
pub use payload::{
    ClearUiRequest, Command, DeleteUserAreaRequest, SimulateRequest, WriteRequest,
    DELETE_CONFIRMATION, SIMULATE_FOOTER, SIMULATE_HEADER,
};
pub use sink::ICommandSink;
