//! ame - headless driver
//!
//! Opens files, optionally replays a keystroke script, then saves and/or
//! prints the result.

use std::io::Write;

use anyhow::{Context, Result};
use clap::Parser;

use ame::clipboard::SystemClipboard;
use ame::keymap::{load_default_keymap, Keymap};
use ame::messages::{EditorMsg, Msg, SessionMsg};
use ame::model::Session;
use ame::runtime::{run_script, App, Script};
use ame::EditorConfig;

mod cli;

use cli::{CliArgs, StartupConfig};

fn main() -> Result<()> {
    ame::tracing::init();

    let startup = CliArgs::parse()
        .into_config()
        .map_err(anyhow::Error::msg)?;

    let config = EditorConfig::load();
    let session = Session::new(config, Box::new(SystemClipboard));
    let keymap = Keymap::with_bindings(load_default_keymap());
    let mut app = App::new(session, keymap);

    open_files(&mut app, &startup)?;

    if let Some(line) = startup.initial_line {
        app.dispatch(Msg::Editor(EditorMsg::GotoLine(line)));
    }

    if let Some(path) = &startup.script {
        let script = Script::load(path)
            .with_context(|| format!("loading script {}", path.display()))?;
        run_script(&mut app, &script)
            .with_context(|| format!("running script {}", path.display()))?;
    }

    if startup.save_on_exit {
        save_modified(&mut app)?;
    }

    if startup.print_on_exit {
        let mut stdout = std::io::stdout().lock();
        for line in app.session.active_document().lines().texts() {
            writeln!(stdout, "{}", line)?;
        }
    }

    if let Some(message) = &app.session.message {
        tracing::info!("Last message: {}", message);
    }
    Ok(())
}

/// Open the first file on the left and the second, if any, on the right
fn open_files(app: &mut App, startup: &StartupConfig) -> Result<()> {
    let paths = startup.mode.file_paths();
    for (idx, path) in paths.iter().enumerate() {
        if idx == 1 {
            app.dispatch(Msg::Session(SessionMsg::Split));
            app.dispatch(Msg::Session(SessionMsg::SwapFocus));
        }
        app.session
            .open_file(path)
            .map_err(|e| anyhow::anyhow!(e.user_message(&path.display().to_string())))?;
    }
    if paths.len() > 1 {
        app.dispatch(Msg::Session(SessionMsg::SwapFocus));
    }
    Ok(())
}

fn save_modified(app: &mut App) -> Result<()> {
    let ids: Vec<_> = app
        .session
        .documents()
        .iter()
        .filter(|doc| doc.is_dirty() && doc.file_path.is_some())
        .filter_map(|doc| doc.id)
        .collect();
    for id in ids {
        if let Some(doc) = app.session.document_mut(id) {
            doc.save()
                .with_context(|| format!("saving {}", doc.name))?;
        }
    }
    Ok(())
}
