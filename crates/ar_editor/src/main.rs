//! AR Scene Editor
//!
//! Entry point for the command-line editor shell.
//!
//! The shell drives the same `EditorSession` a windowed host would: each
//! line is one user action, and the resulting transform view is printed
//! after it.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use ar_backend::{AssetKind, AssetRecord, AssetStore, BackendConfig, InMemoryStore, RestStore};
use ar_editor::{
    core::TransformChannel,
    input::{KeyInput, NumericField, SliderTarget},
    viewport::gizmos::GizmoMode,
    EditorPreferences, EditorSession, HttpAssetLoader,
};
use ar_math::Axis;

const DEMO_ASSET: &str = "demo";

const HELP: &str = "\
Commands:
  open <id>                  select an asset from the store
  key <chord>                press a shortcut (t, r, s, g, ctrl+z, ctrl+shift+z, ctrl+y)
  undo | redo
  set <channel> <axis> <v>   numeric field (rotation in degrees)
  slide <target> <v>         slider: position.x, rotation.y, scale.z, ambient, light.x
  mode <translate|rotate|scale>
  uniform <on|off>           uniform scale
  axis <mode> <axis>         toggle a gizmo axis
  snap                       toggle gizmo snapping
  reset [all]                reset the transform (and scene settings)
  save | publish
  show | frame
  help | quit";

fn open_store() -> Arc<dyn AssetStore> {
    match BackendConfig::from_env().and_then(RestStore::new) {
        Ok(store) => {
            log::info!("Using backend at {}", store.config().base_url);
            Arc::new(store)
        }
        Err(e) => {
            log::warn!("No backend configured ({}), using an in-memory store", e);
            Arc::new(InMemoryStore::with_records([AssetRecord::new(
                DEMO_ASSET,
                "https://example.com/demo/target.png",
                AssetKind::ImageTarget,
            )
            .with_name("Demo target")]))
        }
    }
}

fn parse_slider(target: &str) -> Option<SliderTarget> {
    match target {
        "ambient" => Some(SliderTarget::AmbientIntensity),
        _ => {
            let (head, axis) = target.split_once('.')?;
            let axis = Axis::parse(axis)?;
            if head == "light" {
                return Some(SliderTarget::LightPosition(axis));
            }
            TransformChannel::parse(head).map(|channel| SliderTarget::transform(channel, axis))
        }
    }
}

fn print_view(session: &EditorSession) {
    let view = session.view();
    let t = view.transform;
    match &view.asset_id {
        Some(id) => println!("asset:    {} {:?} {}", id, view.asset_name, view.kind.map(|k| k.to_string()).unwrap_or_default()),
        None => println!("asset:    (none)"),
    }
    println!("position: {:.3} {:.3} {:.3}", t.position.x, t.position.y, t.position.z);
    println!(
        "rotation: {:.1}° {:.1}° {:.1}°",
        view.rotation_degrees.x, view.rotation_degrees.y, view.rotation_degrees.z
    );
    println!("scale:    {:.3} {:.3} {:.3}", t.scale.x, t.scale.y, t.scale.z);
    println!(
        "mode: {}  axes: {:?}  uniform: {}  grid: {}  history: {}/{}{}{}",
        view.mode,
        view.enabled_axes,
        view.uniform_scale,
        view.show_grid,
        view.history_index + 1,
        view.history_len,
        if view.dirty { "  (unsaved)" } else { "" },
        if view.published { "  (published)" } else { "" },
    );
    if let Some(warning) = &view.warning {
        println!("{}", warning);
    }
    if let Some(message) = &view.message {
        println!("{}", message);
    }
}

async fn execute(session: &mut EditorSession, loader: &HttpAssetLoader, line: &str) -> bool {
    let args: Vec<&str> = line.split_whitespace().collect();
    let Some((&cmd, rest)) = args.split_first() else {
        return true;
    };

    match (cmd, rest) {
        ("quit" | "exit", _) => return false,
        ("help", _) => println!("{}", HELP),
        ("open", [id]) => {
            if session.open_asset(id).await.is_ok() {
                session.load_selected(loader).await;
            }
        }
        ("key", [chord]) => match KeyInput::parse(chord) {
            Some(input) => {
                if session.handle_key(&input).is_none() {
                    println!("No shortcut for {}", chord);
                }
            }
            None => println!("Invalid key chord: {}", chord),
        },
        ("undo", []) => {
            session.undo();
        }
        ("redo", []) => {
            session.redo();
        }
        ("set", [channel, axis, value]) => {
            match (TransformChannel::parse(channel), Axis::parse(axis)) {
                (Some(channel), Some(axis)) => {
                    session.set_field_text(NumericField::new(channel, axis), value);
                }
                _ => println!("Unknown field: {} {}", channel, axis),
            }
        }
        ("slide", [target, value]) => match (parse_slider(target), value.parse::<f32>()) {
            (Some(target), Ok(value)) => {
                session.set_slider(target, value);
            }
            _ => println!("Usage: slide <target> <value>"),
        },
        ("mode", [mode]) => match GizmoMode::parse(mode) {
            Some(mode) => {
                session.set_mode(mode);
            }
            None => println!("Unknown mode: {}", mode),
        },
        ("uniform", [state]) => session.set_uniform_scale(matches!(*state, "on" | "true" | "1")),
        ("axis", [mode, axis]) => match (GizmoMode::parse(mode), Axis::parse(axis)) {
            (Some(mode), Some(axis)) => {
                let enabled = session.toggle_axis(mode, axis);
                println!("{} {} {}", mode, axis, if enabled { "enabled" } else { "disabled" });
            }
            _ => println!("Usage: axis <mode> <axis>"),
        },
        ("snap", []) => {
            let enabled = session.toggle_snap();
            println!("Snapping {}", if enabled { "on" } else { "off" });
        }
        ("reset", []) => {
            session.reset_transform();
        }
        ("reset", ["all"]) => {
            session.reset_all();
        }
        ("save", []) => {
            if let Ok(payload) = session.save().await {
                log::debug!("Saved payload: {:?}", payload);
            }
        }
        ("publish", []) => {
            if let Ok(outcome) = session.publish().await {
                println!("Share link: {}", outcome.share_url());
                println!("Scan code:  {} bytes of PNG", outcome.code().png.len());
            }
        }
        ("show", []) => {}
        ("frame", []) => println!("{:#?}", session.frame()),
        _ => println!("Unknown command. Type 'help' for commands."),
    }

    print_view(session);
    session.clear_message();
    true
}

async fn write_prompt(stdout: &mut tokio::io::Stdout) -> std::io::Result<()> {
    stdout.write_all(b"ar> ").await?;
    stdout.flush().await
}

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let prefs = EditorPreferences::load_or_default();
    let mut session = EditorSession::with_store(open_store(), &prefs);

    let loader = match HttpAssetLoader::new() {
        Ok(loader) => loader,
        Err(e) => {
            log::error!("Failed to create HTTP client: {}", e);
            return;
        }
    };

    let asset_id = std::env::args().nth(1).unwrap_or_else(|| DEMO_ASSET.to_string());
    if session.open_asset(&asset_id).await.is_ok() {
        session.load_selected(&loader).await;
    }

    println!("{} v{}", ar_editor::NAME, ar_editor::VERSION);
    println!("Type 'help' for commands, 'quit' to exit.");
    println!();
    print_view(&session);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        if let Err(e) = write_prompt(&mut stdout).await {
            log::error!("Failed to write prompt: {}", e);
            break;
        }

        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                log::error!("Failed to read input: {}", e);
                break;
            }
        };

        if !execute(&mut session, &loader, line.trim()).await {
            break;
        }
    }

    if session.view().dirty {
        log::warn!("Exiting with unsaved changes");
    }
}
