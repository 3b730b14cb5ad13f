use crossterm::event::{self, Event};
use rand::rngs::StdRng;
use rand::SeedableRng;
use snake_duel::build_info;
use snake_duel::cli::{self, Command, RunOptions};
use snake_duel::config::{KeyBindings, MatchConfig};
use snake_duel::constants::REALTIME_FRAME_MS;
use snake_duel::input::{map_key, InputAction};
use snake_duel::logging;
use snake_duel::sim::{MatchController, Renderer};
use snake_duel::ui::{run_session, TerminalRenderer};
use std::io;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

#[cfg(feature = "web")]
use snake_duel::web::{start_spectator_server, SpectatorRenderer, SpectatorServer};
#[cfg(feature = "web")]
use std::sync::Arc;

#[cfg(feature = "web")]
type Spectator = Option<SpectatorRenderer>;
#[cfg(not(feature = "web"))]
type Spectator = Option<std::convert::Infallible>;

fn main() -> io::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let options = match cli::parse_args(args) {
        Ok(Command::Run(options)) => options,
        Ok(Command::Version) => {
            println!("{}", build_info::version_line());
            std::process::exit(0);
        }
        Ok(Command::Help) => {
            println!("{}", cli::USAGE);
            std::process::exit(0);
        }
        Err(message) => {
            eprintln!("{}", message);
            eprintln!("Run 'snake_duel --help' for usage.");
            std::process::exit(1);
        }
    };

    match logging::init_logging(options.log.as_deref()) {
        Ok(Some(path)) => eprintln!("Logging to {}", path.display()),
        Ok(None) => {}
        Err(e) => eprintln!("Warning: logging disabled: {}", e),
    }

    let config = match MatchConfig::load_or_default(options.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let names = {
        let stdin = io::stdin();
        cli::resolve_names(
            &options.names,
            options.prompt,
            &mut stdin.lock(),
            &mut io::stdout(),
        )?
    };
    let config = config.with_player_names(&names);

    let mut rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut controller = match MatchController::new(config, &mut rng) {
        Ok(controller) => controller,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let mut spectator = start_spectators(&options);

    let mut renderer = TerminalRenderer::new(io::stdout(), controller.config())?;
    let result = run_session(
        &mut renderer,
        TerminalRenderer::enter_screen,
        |renderer| run_match(&mut controller, renderer, &mut spectator, &mut rng),
        TerminalRenderer::restore_screen,
    );

    for snake in controller.snakes() {
        println!("{}: {} PPT", snake.name, snake.score);
    }
    info!(elapsed_ms = controller.elapsed_ms(), "match ended");

    result
}

/// Poll input, advance the simulation by wall-clock time and draw, until quit.
fn run_match(
    controller: &mut MatchController,
    renderer: &mut TerminalRenderer<io::Stdout>,
    spectator: &mut Spectator,
    rng: &mut StdRng,
) -> io::Result<()> {
    let bindings: Vec<KeyBindings> = controller
        .config()
        .players
        .iter()
        .map(|player| player.keys.clone())
        .collect();
    let mut last_frame = Instant::now();

    loop {
        let snapshot = controller.snapshot();
        renderer.draw(&snapshot)?;
        publish(spectator, &snapshot);

        if event::poll(Duration::from_millis(REALTIME_FRAME_MS))? {
            if let Event::Key(key) = event::read()? {
                match map_key(key, &bindings) {
                    InputAction::Quit => return Ok(()),
                    InputAction::Steer { player, direction } => {
                        match controller.handle_command(player, direction) {
                            Ok(steer) => debug!(%player, ?direction, ?steer, "steer"),
                            Err(e) => warn!(error = %e, "command rejected"),
                        }
                    }
                    InputAction::None => {}
                }
            }
        }

        // Carry sub-millisecond remainders into the next frame.
        let elapsed_ms = u64::try_from(last_frame.elapsed().as_millis()).unwrap_or(u64::MAX);
        last_frame += Duration::from_millis(elapsed_ms);
        for event in controller.advance(elapsed_ms, rng) {
            debug!(?event, "match event");
        }
    }
}

#[cfg(feature = "web")]
fn start_spectators(options: &RunOptions) -> Spectator {
    let port = options.serve?;
    let server = Arc::new(SpectatorServer::new());
    let renderer = SpectatorRenderer::new(server.snapshot_sender());

    std::thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(e) => {
                warn!(error = %e, "could not start spectator runtime");
                return;
            }
        };
        if let Err(e) = runtime.block_on(start_spectator_server(port, server)) {
            warn!(port, error = %e, "spectator server stopped");
        }
    });

    Some(renderer)
}

#[cfg(not(feature = "web"))]
fn start_spectators(options: &RunOptions) -> Spectator {
    if options.serve.is_some() {
        eprintln!("Warning: --serve needs a build with the web feature; ignoring it.");
    }
    None
}

#[cfg(feature = "web")]
fn publish(spectator: &mut Spectator, snapshot: &snake_duel::MatchSnapshot) {
    if let Some(spectator) = spectator {
        if let Err(e) = spectator.draw(snapshot) {
            warn!(error = %e, "could not publish snapshot");
        }
    }
}

#[cfg(not(feature = "web"))]
fn publish(_spectator: &mut Spectator, _snapshot: &snake_duel::MatchSnapshot) {}
