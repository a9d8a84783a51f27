use crate::session::{Role, Turn};

/// Rendering surface collaborator. The controller pushes turns and clear
/// instructions; the visual form is entirely the sink's concern.
pub trait PresentationSink {
    fn render_turn(&mut self, turn: &Turn);
    fn clear_surface(&mut self);
}

/// Minimal line-oriented sink for terminal sessions.
#[derive(Debug, Default)]
pub struct TerminalSink;

impl PresentationSink for TerminalSink {
    fn render_turn(&mut self, turn: &Turn) {
        let label = match turn.role {
            Role::User => "you",
            Role::Assistant => "tutor",
            Role::Error => "error",
        };
        println!("[{label}] {}", turn.content);
    }

    fn clear_surface(&mut self) {
        println!("--- new session ---");
    }
}
