use std::path::PathBuf;
use std::rc::Rc;

use anyhow::Result;
use env_logger::Env;
use tint_color::{ColorShape, ColorSwatch, ColorValue};
use tint_session::{
    HeadlessSurface, PickerHost, PresentationStyle, ReattachmentStore,
    RecentColorStore, SelectionRequest, SelectionSession, SessionArguments,
    SessionEvent, StoreOptions,
};

/// Overrides the directory the recent colors are written to.
const STORAGE_DIR_ENV: &str = "TINT_STORAGE_DIR";

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let mut options = StoreOptions::default();
    if let Some(dir) = std::env::var_os(STORAGE_DIR_ENV) {
        options.storage_dir = PathBuf::from(dir);
    }
    log::info!("recent colors stored in {}", options.storage_dir.display());

    let host = PickerHost::new(
        Rc::new(RecentColorStore::open(options)),
        Rc::new(ReattachmentStore::new()),
    );

    run_dial(&host)?;
    run_grid(&host)?;
    run_reconstructed(&host)?;

    let recent: Vec<String> = host
        .store()
        .recent(host.namespace())
        .iter()
        .map(ToString::to_string)
        .collect();
    log::info!("recent colors: {}", recent.join(" "));

    Ok(())
}

/// Free dial: start from the last pick, move the dial, confirm.
fn run_dial(host: &PickerHost) -> Result<()> {
    let start = host
        .store()
        .most_recent_or(host.namespace(), ColorValue::rgb(0x3F, 0x51, 0xB5));
    let request = SelectionRequest::builder()
        .title("Accent color")
        .default_color_value(start)
        .on_result(|color| log::info!("dial picked {color}"))
        .on_dismiss(|| log::info!("dial closed"))
        .build()?;

    let mut session = host.present(request, None, HeadlessSurface::new());
    describe(&session);
    session.handle(SessionEvent::DialChanged("#E91E63".parse()?));
    session.handle(SessionEvent::Confirm);
    Ok(())
}

/// Swatch grid in a bottom sheet with square cells and per-swatch ticks.
fn run_grid(host: &PickerHost) -> Result<()> {
    let request = SelectionRequest::builder()
        .title("Label color")
        .style(PresentationStyle::GridSheet)
        .swatch_tier(ColorSwatch::S700)
        .shape(ColorShape::Square)
        .tick_per_swatch(true)
        .default_color("#388E3C")
        .on_result(|color| log::info!("grid picked {color}"))
        .on_dismiss(|| log::info!("grid closed"))
        .build()?;

    let mut session = host.present(request, None, HeadlessSurface::new());
    describe(&session);
    session.handle(SessionEvent::SwatchPicked(12));
    session.handle(SessionEvent::Confirm);
    Ok(())
}

/// The host drops a tagged session mid-interaction and rebuilds it from
/// its serialized arguments; the rebuilt session reports to the caller.
fn run_reconstructed(host: &PickerHost) -> Result<()> {
    let request = SelectionRequest::builder()
        .title("Background")
        .style(PresentationStyle::GridDialog)
        .swatches(["#f6e58d", "#ffbe76", "#ff7979", "#badc58", "#30336b"])
        .on_result(|color| log::info!("background picked {color}"))
        .on_dismiss(|| log::info!("background closed"))
        .build()?;

    let mut session =
        host.present(request, Some("background"), HeadlessSurface::new());
    session.handle(SessionEvent::SwatchPicked(1));

    let saved = session.suspend().to_json()?;
    log::info!("host recreated, saved arguments: {saved}");

    let arguments = SessionArguments::from_json(&saved)?;
    let mut rebuilt = host.reconstruct(arguments, HeadlessSurface::new());
    describe(&rebuilt);
    rebuilt.handle(SessionEvent::SwatchPicked(4));
    rebuilt.handle(SessionEvent::Confirm);
    Ok(())
}

fn describe(session: &SelectionSession<HeadlessSurface>) {
    let surface = session.surface();
    if let Some(chrome) = surface.chrome() {
        log::info!(
            "{} [{} / {}] as {:?}",
            chrome.title,
            chrome.confirm_label,
            chrome.cancel_label,
            chrome.style
        );
    }

    if session.params().style().is_grid() {
        let cells: Vec<String> = surface
            .swatches()
            .iter()
            .map(|cell| {
                if cell.selected {
                    format!("[{}]", cell.hex)
                } else {
                    cell.hex.clone()
                }
            })
            .collect();
        log::info!("swatches: {}", cells.join(" "));
    } else {
        let slots: Vec<String> = surface
            .recent()
            .iter()
            .map(|slot| match slot.filled() {
                Some(color) => color.to_string(),
                None => String::from("--"),
            })
            .collect();
        log::info!(
            "dial at {}, recent: {}",
            session.current_color(),
            slots.join(" ")
        );
    }
}
