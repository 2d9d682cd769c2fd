use std::{env, time::Duration};

use anyhow::Result;
use log::{info, warn};
use tokio::{sync::mpsc::unbounded_channel, time};

use floatdesk_desktop::{DesktopConfig, JsonFileStore, WindowGestures, WindowManager};
use floatdesk_geometry::Size;
use floatdesk_input::PointerEvent;
use floatdesk_util::CoalescingReceiver;

mod session;

const VIEWPORT: Size = Size::new(1280.0, 800.0);
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::init();

    let config = match env::args().nth(1) {
        Some(path) => DesktopConfig::load(path)?,
        None => DesktopConfig::default(),
    };

    let store = JsonFileStore::open(&config.layout_path)?;
    info!("Layouts are stored in {}", store.path().display());

    let mut manager = WindowManager::new(config.windows.clone(), store);
    manager.set_viewport(VIEWPORT);
    for descriptor in session::windows() {
        manager.open(descriptor);
    }

    let mut gestures = WindowGestures::new(config.gestures.clone());

    let (events_tx, events_rx) = unbounded_channel::<PointerEvent>();
    let mut events = CoalescingReceiver::new(events_rx);
    let player = tokio::spawn(session::play(session::script(), events_tx));

    let mut frames = time::interval(FRAME_INTERVAL);

    loop {
        tokio::select! {
            event = events.recv() => {
                match event {
                    Ok(event) => gestures.route(&mut manager, &event),
                    // Session ended.
                    Err(_) => break,
                }
            }

            now = frames.tick() => {
                gestures.tick(&mut manager, now.into_std());
            }
        }
    }

    if let Err(e) = player.await? {
        warn!("Session ended early: {e:?}");
    }

    manager.save_all();
    for window in manager.z_ordered() {
        let g = window.geometry;
        info!(
            "{} \"{}\": {:?} at ({}, {}) size {}x{}, z {}",
            window.id, window.title, window.mode, g.x, g.y, g.width, g.height, window.z_index
        );
    }

    Ok(())
}
