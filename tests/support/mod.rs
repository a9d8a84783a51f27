use tutor_chat::session::Turn;
use tutor_chat::sink::PresentationSink;

/// Records every rendering instruction the controller emits.
#[derive(Debug, Default)]
pub struct SinkSpy {
    pub rendered: Vec<Turn>,
    pub clears: usize,
}

impl PresentationSink for SinkSpy {
    fn render_turn(&mut self, turn: &Turn) {
        self.rendered.push(turn.clone());
    }

    fn clear_surface(&mut self) {
        self.clears += 1;
    }
}
