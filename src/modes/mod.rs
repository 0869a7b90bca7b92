#[cfg(feature = "minifb")]
pub mod minifb_mode;

pub mod windowed_mode;

#[derive(Debug, PartialEq, Eq, Copy, Clone, Default)]
pub enum Mode {
    /// winit window presenting through softbuffer.
    #[default]
    Win,

    #[cfg(feature = "minifb")]
    WinLegacy,
}

impl Mode {
    pub fn get_name(&self) -> &'static str {
        match self {
            Mode::Win => "winit",

            #[cfg(feature = "minifb")]
            Mode::WinLegacy => "minifb",
        }
    }
}
