//! Input state collected from window events between two frames.

/// Keys the program reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    /// Space: append a segment.
    Grow,
    /// Escape: quit.
    Exit,
}

impl Binding {
    fn slot(self) -> usize {
        match self {
            Binding::Grow => 0,
            Binding::Exit => 1,
        }
    }
}

#[derive(Debug, Default)]
pub struct InputState {
    /// `None` until the window reports the cursor for the first time.
    cursor: Option<(f64, f64)>,
    held: [bool; 2],
    grow_edges: u32,
    exit_requested: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cursor position in window pixels, origin at the top left.
    pub fn set_cursor(&mut self, x: f64, y: f64) {
        self.cursor = Some((x, y));
    }

    pub fn cursor(&self) -> Option<(f64, f64)> {
        self.cursor
    }

    /// Only the transition from released to pressed counts, so a key
    /// held down (or auto-repeating) triggers once.
    pub fn press(&mut self, key: Binding) {
        let held = &mut self.held[key.slot()];

        if *held {
            return;
        }

        *held = true;

        match key {
            Binding::Grow => self.grow_edges += 1,
            Binding::Exit => self.exit_requested = true,
        }
    }

    pub fn release(&mut self, key: Binding) {
        self.held[key.slot()] = false;
    }

    #[cfg(test)]
    pub fn is_held(&self, key: Binding) -> bool {
        self.held[key.slot()]
    }

    /// Returns how many times grow was pressed since the last call.
    pub fn take_grow_edges(&mut self) -> u32 {
        std::mem::take(&mut self.grow_edges)
    }

    pub fn request_exit(&mut self) {
        self.exit_requested = true;
    }

    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }
}
