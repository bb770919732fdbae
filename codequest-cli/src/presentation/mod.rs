pub mod console;

pub use console::{
    describe_event, help, needs_redraw, parse_line, render_catalog, render_session,
    ConsoleAction,
};
