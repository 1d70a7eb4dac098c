//! Snake Modes entry point
//!
//! Native builds run a headless demo: the autopilot plays one run in the
//! chosen mode and the board is drawn as text. The web build is driven from
//! JS through the `web` module instead.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;
    use std::time::Duration;

    use clap::Parser;

    use snake_modes::platform::FileStore;
    use snake_modes::score::{BestScoreStore, MemoryStore};
    use snake_modes::sim::CollectibleKind;
    use snake_modes::{Frame, GameLoop, LoopState, RenderSink, Settings};

    #[derive(Debug, Parser)]
    #[command(name = "snake-modes", about = "Headless snake run driven by the autopilot")]
    struct Args {
        /// classic, noDie, speed, walls or portal (unknown names play classic)
        #[arg(short, long)]
        mode: Option<String>,

        /// Fixed seed for a reproducible run
        #[arg(short, long)]
        seed: Option<u64>,

        /// Starting ticks per second
        #[arg(long)]
        tick_rate: Option<f32>,

        /// Stop after this many ticks (no-die runs never end on their own)
        #[arg(long, default_value_t = 2000)]
        max_ticks: u64,

        /// Settings JSON file; flags override its values
        #[arg(long)]
        settings: Option<PathBuf>,

        /// Where to keep the best score; in-memory when omitted
        #[arg(long)]
        best_score_file: Option<PathBuf>,

        /// Sleep between ticks at the game's tick rate
        #[arg(long)]
        realtime: bool,

        /// Draw every frame instead of only the last one
        #[arg(long)]
        show_frames: bool,
    }

    /// Draws frames as text
    struct TextRenderer {
        show_frames: bool,
        last: Option<Frame>,
    }

    impl RenderSink for TextRenderer {
        fn render(&mut self, frame: &Frame) {
            if self.show_frames {
                println!("{}", draw(frame));
            }
            self.last = Some(frame.clone());
        }
    }

    fn draw(frame: &Frame) -> String {
        let size = snake_modes::consts::GRID_SIZE;
        let mut rows = vec![vec!['.'; size as usize]; size as usize];
        let mut put = |x: i32, y: i32, c: char| {
            if (0..size).contains(&x) && (0..size).contains(&y) {
                rows[y as usize][x as usize] = c;
            }
        };

        for wall in &frame.walls {
            put(wall.x, wall.y, '#');
        }
        for item in &frame.collectibles {
            let c = match item.kind {
                CollectibleKind::Food => '*',
                CollectibleKind::PortalA => 'A',
                CollectibleKind::PortalB => 'B',
            };
            put(item.pos.x, item.pos.y, c);
        }
        for (i, seg) in frame.snake.iter().enumerate().rev() {
            put(seg.x, seg.y, if i == 0 { '@' } else { 'o' });
        }

        let mut out = format!(
            "mode={} score={} best={} rate={:.1}/s\n",
            frame.mode, frame.score, frame.best_score, frame.tick_rate
        );
        for row in rows {
            out.extend(row);
            out.push('\n');
        }
        out
    }

    pub fn run() {
        env_logger::init();
        let args = Args::parse();

        let mut settings = args
            .settings
            .as_deref()
            .map(Settings::load)
            .unwrap_or_default();
        if let Some(mode) = &args.mode {
            settings.mode = snake_modes::sim::Mode::from_name_or_default(mode);
        }
        if let Some(seed) = args.seed {
            settings.seed = Some(seed);
        }
        if let Some(rate) = args.tick_rate {
            settings.initial_tick_rate = rate;
        }

        let store: Box<dyn BestScoreStore> = match &args.best_score_file {
            Some(path) => Box::new(FileStore::new(path)),
            None => Box::new(MemoryStore::default()),
        };

        log::info!("Snake Modes (native) starting...");
        let renderer = TextRenderer {
            show_frames: args.show_frames,
            last: None,
        };
        let mut game = GameLoop::new(settings, store, renderer);
        game.set_autopilot(true);
        game.start();

        let mut ticks = 0;
        while game.loop_state() == LoopState::Running && ticks < args.max_ticks {
            if args.realtime {
                if let Some(interval) = game.tick_interval() {
                    std::thread::sleep(Duration::from_secs_f32(interval));
                }
            }
            game.step();
            ticks += 1;
        }
        game.stop();

        if let Some(frame) = &game.renderer().last {
            println!("{}", draw(frame));
            println!("Run over: {:?} after {ticks} ticks", frame.end_reason);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    native::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point lives in the library's `web` module
}
