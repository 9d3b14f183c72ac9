//! Kaleidoscope entry point
//!
//! Terminal controller: reads one command per line from stdin and drives
//! the animator. Frames arrive over an observer channel and are drawn on
//! request.

use std::io::{self, BufRead, Write};
use std::sync::mpsc::Receiver;

use kaleidoscope::command::{Command, HELP};
use kaleidoscope::renderer::Canvas;
use kaleidoscope::sim::{Animator, Frame};
use kaleidoscope::{Result, Settings};

const DEFAULT_SETTINGS_PATH: &str = "kaleidoscope.json";

/// Controller state: the animator plus the latest frame seen
struct Controller {
    settings: Settings,
    animator: Animator,
    frames: Receiver<Frame>,
    latest: Frame,
    canvas: Canvas,
}

impl Controller {
    fn new(settings: Settings) -> Result<Self> {
        let sim = settings.build_simulation()?;
        let latest = sim.snapshot();
        let animator = Animator::new(sim, settings.tick_period())?;
        let (_id, frames) = animator.subscribe_channel();
        let canvas = Canvas::new(settings.canvas_columns, settings.canvas_rows);
        Ok(Self {
            settings,
            animator,
            frames,
            latest,
            canvas,
        })
    }

    /// Drain pending frames, keeping the newest. Returns how many arrived.
    fn drain_frames(&mut self) -> usize {
        let mut count = 0;
        for frame in self.frames.try_iter() {
            self.latest = frame;
            count += 1;
        }
        count
    }

    /// Apply one command. Returns false when the controller should exit.
    fn handle(&mut self, cmd: Command, out: &mut impl Write) -> Result<bool> {
        match cmd {
            Command::Run => {
                if !self.animator.start()? {
                    writeln!(out, "already running")?;
                }
            }
            Command::Stop => {
                if !self.animator.pause() {
                    writeln!(out, "not running")?;
                }
            }
            Command::Add { shape, velocity } => {
                let (dx, dy) = velocity.unwrap_or(self.settings.new_figure_velocity);
                let count = self.animator.with_simulation(|sim| {
                    sim.add_figure(dx, dy, shape);
                    sim.len()
                });
                writeln!(out, "added {shape} ({count} figures)")?;
            }
            Command::Colors => self.animator.with_simulation(|sim| sim.change_colors()),
            Command::Faster => self.animator.with_simulation(|sim| sim.speed_up()),
            Command::Slower => self.animator.with_simulation(|sim| sim.slow_down()),
            Command::Resize { width, height } => {
                self.animator
                    .with_simulation(|sim| sim.resize_window(width, height));
            }
            Command::Step(n) => {
                if self.animator.is_running() {
                    writeln!(out, "stop the animation before stepping")?;
                } else {
                    for _ in 0..n {
                        self.animator.tick_now();
                    }
                }
            }
            Command::Show => {
                // Commands since the last frame are not in it yet
                self.latest = self.animator.with_simulation(|sim| sim.snapshot());
                self.canvas.draw(&self.latest);
                write!(out, "{}", self.canvas.to_ansi())?;
                writeln!(
                    out,
                    "tick {}, {} figures, {}x{}",
                    self.latest.tick,
                    self.latest.figures.len(),
                    self.latest.extent.x,
                    self.latest.extent.y
                )?;
            }
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Quit => return Ok(false),
        }
        Ok(true)
    }
}

fn run(settings: Settings) -> Result<()> {
    let mut controller = Controller::new(settings)?;
    let stdin = io::stdin();
    let mut out = io::stdout();

    writeln!(out, "kaleidoscope: type 'help' for commands")?;
    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let frames = controller.drain_frames();
        if controller.animator.is_running() {
            writeln!(out, "({frames} frames since last command)")?;
        }

        match Command::parse(&line) {
            Ok(cmd) => {
                if !controller.handle(cmd, &mut out)? {
                    break;
                }
            }
            Err(e) => writeln!(out, "error: {e}")?,
        }
        out.flush()?;
    }

    controller.animator.pause();
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Kaleidoscope starting...");

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_SETTINGS_PATH.to_string());

    let result = Settings::load_or_default(&path).and_then(run);
    if let Err(e) = result {
        log::error!("{e}");
        std::process::exit(1);
    }
}
