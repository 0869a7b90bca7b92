use anyhow::anyhow;
use fps_clock::FpsClock;
use log::info;
use minifb::{Key, MouseMode, Window, WindowOptions};

use crate::controls::Binding;
use crate::data::{Command, Program};

const BINDINGS: [(Key, Binding); 2] = [(Key::Space, Binding::Grow), (Key::Escape, Binding::Exit)];

pub fn minifb_main(mut prog: Program) -> anyhow::Result<()> {
    let scale = prog.scale() as usize;
    let (w, h) = (prog.canvas().width() * scale, prog.canvas().height() * scale);

    let mut win = Window::new(
        "mousesnake",
        w,
        h,
        WindowOptions {
            resize: false,
            ..WindowOptions::default()
        },
    )
    .map_err(|e| anyhow!("Unable to create window: {e}"))?;

    info!("Window ready at {w}x{h}");

    let mut buffer = vec![0u32; w * h];
    let mut clock = FpsClock::new(prog.fps());

    let mut cmds = Vec::with_capacity(BINDINGS.len() + 1);

    while win.is_open() && !prog.is_close_requested() {
        if let Some((x, y)) = win.get_mouse_pos(MouseMode::Clamp) {
            cmds.push(Command::Cursor(x as f64, y as f64));
        }

        // minifb only reports key states; InputState turns them into edges.
        for (key, binding) in BINDINGS {
            cmds.push(if win.is_key_down(key) {
                Command::Press(binding)
            } else {
                Command::Release(binding)
            });
        }

        prog.eval_commands(&mut cmds);
        prog.frame();

        prog.canvas().scale_to(scale, &mut buffer, None);

        win.update_with_buffer(&buffer, w, h)
            .map_err(|e| anyhow!("Failed to present the frame: {e}"))?;

        clock.tick();
    }

    Ok(())
}
