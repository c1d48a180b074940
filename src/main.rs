//! # Stampsheet CLI
//!
//! Command-line front end for rendering stamp sheets.
//!
//! ## Usage
//!
//! ```bash
//! # Summarize a catalog
//! stampsheet info --catalog devices.json
//!
//! # Render the first sheet to ./out
//! stampsheet render --catalog devices.json --out out
//!
//! # Render sheet 2 as ink plates with a fixed seed
//! stampsheet render --catalog devices.json --sheet 2 --print --seed 7
//!
//! # Replay a command sequence, exporting along the way
//! stampsheet play --catalog devices.json next,print,plates,reseed,export
//! ```
//!
//! Set `RUST_LOG=debug` for render details.

use std::path::{Path, PathBuf};

use chrono::Local;
use clap::{Parser, Subcommand};

use stampsheet::{
    Command, Session, SheetConfig, SheetRenderer, StampError,
    assets::{AssetStore, FileLoader},
    catalog::Catalog,
    export,
    session::Effect,
    sheet::{RenderOutcome, RenderedSheet},
};

/// Stampsheet - generative stamp sheets for obsolete devices
#[derive(Parser, Debug)]
#[command(name = "stampsheet")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every subcommand.
#[derive(clap::Args, Debug)]
struct Inputs {
    /// JSON record source
    #[arg(long, value_name = "FILE")]
    catalog: Option<PathBuf>,

    /// JSON sheet configuration (defaults apply to missing fields)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory product image paths are relative to (defaults to the
    /// catalog's directory)
    #[arg(long, value_name = "DIR")]
    images: Option<PathBuf>,

    /// Run seed
    #[arg(long, default_value_t = stampsheet::session::DEFAULT_RUN_SEED)]
    seed: u32,

    /// Output directory for exports
    #[arg(long, default_value = ".")]
    out: PathBuf,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Summarize a catalog and the sheet layout
    Info {
        #[command(flatten)]
        inputs: Inputs,
    },

    /// Render one sheet to PNG
    Render {
        #[command(flatten)]
        inputs: Inputs,

        /// Sheet number, starting at 1
        #[arg(long, default_value_t = 1)]
        sheet: usize,

        /// Render ink plates instead of the color preview
        #[arg(long)]
        print: bool,

        /// Hide circuit traces
        #[arg(long)]
        no_traces: bool,
    },

    /// Apply a comma-separated list of session commands
    ///
    /// Commands: next, prev, traces, print, reseed[=N], export, plates
    Play {
        #[command(flatten)]
        inputs: Inputs,

        /// Command list, e.g. "next,print,plates"
        commands: String,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), StampError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Info { inputs } => {
            let app = App::open(&inputs)?;
            let config = app.renderer.config();
            println!("Records:  {}", app.catalog.as_ref().map_or(0, Catalog::len));
            println!(
                "Sheet:    {}x{} px, {}x{} grid ({} per sheet)",
                config.width,
                config.height,
                config.columns,
                config.rows,
                config.page_size()
            );
            println!("Sheets:   {}", app.renderer.sheet_count(app.catalog.as_ref()));
            let plates = if app.renderer.plates_available() {
                "available"
            } else {
                "disabled"
            };
            println!("Plates:   {}", plates);
        }
        Commands::Render {
            inputs,
            sheet,
            print,
            no_traces,
        } => {
            let mut app = App::open(&inputs)?;
            let total = app.renderer.sheet_count(app.catalog.as_ref());
            let session = Session {
                run_seed: inputs.seed,
                sheet_index: sheet.saturating_sub(1) % total,
                show_traces: !no_traces,
                print_mode: print && app.renderer.plates_available(),
            };
            if print && !session.print_mode {
                log::warn!("print plates are disabled in the configuration");
            }
            let rendered = app.render(&session)?;
            if session.print_mode {
                app.export_plates(&session, &rendered)?;
            }
            app.export_sheet(&session, &rendered)?;
        }
        Commands::Play { inputs, commands } => {
            let mut app = App::open(&inputs)?;
            let session = Session {
                run_seed: inputs.seed,
                ..Session::default()
            };
            play(&mut app, session, &commands)?;
        }
    }

    Ok(())
}

/// Apply each command in `commands` and carry out its effect. Returns the
/// final session and the most recent render.
fn play(
    app: &mut App,
    mut session: Session,
    commands: &str,
) -> Result<(Session, Option<RenderedSheet>), StampError> {
    let mut last: Option<(Session, RenderedSheet)> = None;
    for token in commands.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        let command = parse_command(token)?;
        let total = app.renderer.sheet_count(app.catalog.as_ref());
        let transition = session.apply(command, total, app.renderer.plates_available());
        session = transition.session;
        match transition.effect {
            Effect::None => {}
            Effect::Rerender => {
                let rendered = app.render(&session)?;
                println!(
                    "{}: sheet {}/{}, {} stamps, seed {}, traces {}, print {}",
                    token,
                    session.sheet_index + 1,
                    total,
                    rendered.stamps.len(),
                    session.run_seed,
                    session.show_traces,
                    session.print_mode
                );
                last = Some((session, rendered));
            }
            effect @ (Effect::ExportSheet | Effect::ExportPlates) => {
                let rendered = match last.take() {
                    Some((s, sheet)) if s == session => sheet,
                    _ => app.render(&session)?,
                };
                if effect == Effect::ExportSheet {
                    app.export_sheet(&session, &rendered)?;
                } else {
                    app.export_plates(&session, &rendered)?;
                }
                last = Some((session, rendered));
            }
            Effect::Warning(msg) => println!("{}: {}", token, msg),
        }
    }
    Ok((session, last.map(|(_, sheet)| sheet)))
}

/// Parse one session command token.
fn parse_command(token: &str) -> Result<Command, StampError> {
    let (name, arg) = match token.split_once('=') {
        Some((n, a)) => (n, Some(a)),
        None => (token, None),
    };
    let command = match name.to_lowercase().as_str() {
        "next" => Command::NextSheet,
        "prev" | "previous" => Command::PreviousSheet,
        "traces" => Command::ToggleTraces,
        "print" => Command::TogglePrintMode,
        "export" => Command::ExportSheet,
        "plates" => Command::ExportPlates,
        "reseed" => {
            let seed = match arg {
                Some(a) => a
                    .parse()
                    .map_err(|_| StampError::Config(format!("invalid seed '{}'", a)))?,
                None => rand::random::<u32>(),
            };
            Command::Reseed { seed }
        }
        other => {
            return Err(StampError::Config(format!(
                "unknown command '{}' (expected next, prev, traces, print, reseed, export, plates)",
                other
            )));
        }
    };
    Ok(command)
}

/// Loaded inputs plus the renderer and image cache.
struct App {
    catalog: Option<Catalog>,
    renderer: SheetRenderer,
    assets: AssetStore,
    loader: FileLoader,
    out: PathBuf,
}

impl App {
    fn open(inputs: &Inputs) -> Result<Self, StampError> {
        let config = match &inputs.config {
            Some(path) => SheetConfig::load(path)?,
            None => SheetConfig::default(),
        };

        // A missing record source renders the placeholder sheet.
        let catalog = match &inputs.catalog {
            Some(path) => match Catalog::load(path) {
                Ok(c) => Some(c),
                Err(e) => {
                    log::warn!("{}", e);
                    None
                }
            },
            None => None,
        };

        let base = inputs.images.clone().unwrap_or_else(|| {
            inputs
                .catalog
                .as_deref()
                .and_then(Path::parent)
                .map(Path::to_path_buf)
                .unwrap_or_default()
        });

        Ok(Self {
            catalog,
            renderer: SheetRenderer::new(config)?,
            assets: AssetStore::new(),
            loader: FileLoader::new(base),
            out: inputs.out.clone(),
        })
    }

    /// Load the sheet's images, then render it.
    fn render(&mut self, session: &Session) -> Result<RenderedSheet, StampError> {
        if let Some(catalog) = &self.catalog {
            let paths = self.renderer.sheet_image_paths(session, catalog);
            self.assets.load_all(paths, &self.loader);
        }
        match self.renderer.render(session, self.catalog.as_ref(), &self.assets) {
            RenderOutcome::Rendered(sheet) | RenderOutcome::Placeholder(sheet) => Ok(sheet),
            RenderOutcome::Pending { settled, requested } => Err(StampError::Image(format!(
                "images still loading ({}/{})",
                settled, requested
            ))),
        }
    }

    fn export_sheet(&self, session: &Session, sheet: &RenderedSheet) -> Result<(), StampError> {
        std::fs::create_dir_all(&self.out)?;
        let name = export::sheet_file_name(session.run_seed, session.sheet_index, &Local::now());
        let path = self.out.join(name);
        export::save_png(&sheet.preview, &path)?;
        println!("Saved to {}", path.display());
        Ok(())
    }

    fn export_plates(&self, session: &Session, sheet: &RenderedSheet) -> Result<(), StampError> {
        let Some(plates) = &sheet.plates else {
            log::warn!("sheet has no plates to export");
            return Ok(());
        };
        std::fs::create_dir_all(&self.out)?;
        let (primary, secondary) = export::save_plates(
            plates,
            &self.out,
            session.run_seed,
            session.sheet_index,
            &Local::now(),
        )?;
        println!("Saved to {}", primary.display());
        println!("Saved to {}", secondary.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command_tokens() {
        assert_eq!(parse_command("next").unwrap(), Command::NextSheet);
        assert_eq!(parse_command("Prev").unwrap(), Command::PreviousSheet);
        assert_eq!(parse_command("plates").unwrap(), Command::ExportPlates);
        assert_eq!(parse_command("reseed=7").unwrap(), Command::Reseed { seed: 7 });
        assert!(matches!(parse_command("reseed").unwrap(), Command::Reseed { .. }));
        assert!(parse_command("reseed=x").is_err());
        assert!(parse_command("jump").is_err());
    }

    #[test]
    fn test_play_parses_subcommand() {
        let cli = Cli::try_parse_from(["stampsheet", "play", "--seed", "3", "next,print"]).unwrap();
        match cli.command {
            Commands::Play { inputs, commands } => {
                assert_eq!(inputs.seed, 3);
                assert_eq!(commands, "next,print");
            }
            other => panic!("unexpected subcommand {:?}", other),
        }
    }

    #[test]
    fn test_play_renders_on_rerender() {
        let inputs = Inputs {
            catalog: None,
            config: None,
            images: None,
            seed: 3,
            out: std::env::temp_dir().join("stampsheet-play-test"),
        };
        let mut app = App::open(&inputs).unwrap();
        let (session, sheet) = play(&mut app, Session::default(), "traces").unwrap();
        assert!(!session.show_traces);
        let sheet = sheet.unwrap();
        let config = app.renderer.config();
        assert_eq!(sheet.preview.dimensions(), (config.width, config.height));

        let (_, none) = play(&mut app, session, "reseed=42").unwrap();
        assert!(none.is_none());
        assert!(play(&mut app, session, "traces,jump").is_err());
    }
}
