use std::time::Duration;

use mazeforge::{
    build_maze_with_events,
    render::{self, Renderer},
};

/// Maximum number of grid events to buffer between the build and the renderer
const MAX_EVENTS_IN_CHANNEL_BUFFER: usize = 1000;

/// How long the finished maze stays on screen before the next build clears it
const HOLD_FINISHED_MAZE: Duration = Duration::from_millis(1500);

/// Log to a file, since the terminal itself is occupied by the maze.
/// The returned guard must stay alive for the rest of the program.
fn init_tracing() -> tracing_appender::non_blocking::WorkerGuard {
    let file_appender = tracing_appender::rolling::never(".", "mazeforge.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);
    let level = match std::env::var("DEBUG") {
        Ok(val) if val == "1" => tracing::Level::DEBUG,
        _ => tracing::Level::INFO,
    };
    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(false)
        .with_max_level(level)
        .init();
    guard
}

fn main() -> std::io::Result<()> {
    // Usage: mazeforge [side] [count] [seed]
    let mut args = std::env::args();
    args.next(); // Skip executable name
    let side = args.next().and_then(|s| s.parse::<u8>().ok()).unwrap_or(8);
    let count = args.next().and_then(|s| s.parse::<u64>().ok()).unwrap_or(1);
    let seed = args.next().and_then(|s| s.parse::<u64>().ok());

    if side < 1 {
        eprintln!("Maze side must be at least 1.");
        return Ok(());
    }

    let _guard = init_tracing();

    let mut stdout = std::io::stdout();
    render::setup_terminal(&mut stdout)?;

    let mut counts = Vec::with_capacity(count as usize);
    for iteration in 0..count {
        tracing::info!(
            "[driver] building maze {}/{} with side {}",
            iteration + 1,
            count,
            side
        );

        let (grid_event_tx, grid_event_rx) =
            std::sync::mpsc::sync_channel(MAX_EVENTS_IN_CHANNEL_BUFFER);

        // Spawn a thread to listen for grid updates and animate the carve
        let refresh_time = Renderer::calibrated_refresh_time(side);
        let render_thread_handle =
            std::thread::spawn(move || Renderer::new(refresh_time).render(grid_event_rx));

        // Reseed per iteration so repeated builds differ but stay reproducible
        let build_seed = seed.map(|s| s.wrapping_add(iteration));
        let result = build_maze_with_events(side, build_seed, Some(grid_event_tx));

        // The builder closed the channel, so the renderer drains and exits
        let rendered = render_thread_handle.join().expect("Render thread panicked");
        if let Err(e) = rendered {
            render::restore_terminal(&mut stdout)?;
            return Err(e);
        }

        match result {
            Ok(result) => counts.push(result.walls_removed),
            Err(e) => {
                render::restore_terminal(&mut stdout)?;
                eprintln!("{}", e);
                return Ok(());
            }
        }

        std::thread::sleep(HOLD_FINISHED_MAZE);
    }

    render::restore_terminal(&mut stdout)?;
    for walls_removed in counts {
        println!("Removed {} walls.", walls_removed);
    }
    Ok(())
}
