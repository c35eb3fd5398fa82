// hanoitty: Towers of Hanoi with an animated terminal replay

use std::io::{self, Write};

use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use hanoitty::config::{Cli, Mode};
use hanoitty::logging::{self, EventLog};
use hanoitty::solver;
use hanoitty::ui::App;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let log_config = cli.log_config();

    let mode = match cli.into_mode() {
        Ok(mode) => mode,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    };

    let event_log = EventLog::default();
    logging::init(&log_config, event_log.clone())?;

    match mode {
        Mode::Solve { disks, from, to } => {
            let moves = solver::solve_cached(disks, from, to)?;
            let mut out = io::BufWriter::new(io::stdout().lock());
            for (i, mv) in moves.iter().enumerate() {
                writeln!(out, "{:>8}  {} {}", i + 1, mv.from, mv.to)?;
            }
            out.flush()?;
            Ok(())
        }
        Mode::Play(config) => {
            let mut app = App::new(&config, event_log)?;
            tracing::info!(disks = config.disks, "hanoitty started");

            // Set up terminal
            enable_raw_mode()?;
            let mut stdout = io::stdout();
            execute!(stdout, EnterAlternateScreen)?;
            let backend = CrosstermBackend::new(stdout);
            let mut terminal = Terminal::new(backend)?;

            let res = app.run(&mut terminal);

            // Restore terminal
            disable_raw_mode()?;
            execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
            terminal.show_cursor()?;

            if let Err(err) = res {
                eprintln!("Error: {:?}", err);
            }
            if let Some(err) = app.session.last_error() {
                eprintln!("Driver error: {}", err);
            }

            Ok(())
        }
    }
}
