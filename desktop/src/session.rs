//! A scripted touch session that stands in for a real touch screen.

use std::time::{Duration, Instant};

use anyhow::Result;
use tokio::{sync::mpsc::UnboundedSender, time};

use floatdesk_desktop::WindowDescriptor;
use floatdesk_geometry::Point;
use floatdesk_input::{PointerEvent, PointerId, PointerPhase};

pub fn windows() -> [WindowDescriptor; 2] {
    [
        WindowDescriptor::new("chat", "Chat", (80.0, 80.0, 360.0, 320.0))
            .with_content("Messages"),
        WindowDescriptor::new("contacts", "Contacts", (520.0, 120.0, 300.0, 400.0))
            .with_content("People"),
    ]
}

/// One contact sample, `after` the previous one.
#[derive(Debug, Clone, Copy)]
pub struct Step {
    pub after: Duration,
    pub pointer: PointerId,
    pub phase: PointerPhase,
    pub pos: Point,
}

impl Step {
    fn new(after_ms: u64, pointer: u64, phase: PointerPhase, pos: (f64, f64)) -> Self {
        Self {
            after: Duration::from_millis(after_ms),
            pointer: PointerId(pointer),
            phase,
            pos: pos.into(),
        }
    }
}

/// Drags the chat window, pinches the contacts window, and swipes the chat window down with
/// three fingers.
pub fn script() -> Vec<Step> {
    use PointerPhase::*;

    let mut steps = vec![Step::new(0, 1, Down, (120.0, 120.0))];
    steps.extend((1..=10).map(|i| {
        let i = i as f64;
        Step::new(8, 1, Move, (120.0 + 5.0 * i, 120.0 - i))
    }));
    steps.push(Step::new(16, 1, Up, (170.0, 110.0)));

    steps.push(Step::new(200, 2, Down, (600.0, 300.0)));
    steps.push(Step::new(4, 3, Down, (700.0, 300.0)));
    steps.extend((1..=10).map(|i| Step::new(8, 3, Move, (700.0 + 4.0 * i as f64, 300.0))));
    steps.push(Step::new(16, 3, Up, (740.0, 300.0)));
    steps.push(Step::new(4, 2, Up, (600.0, 300.0)));

    let fingers = [(4, 150.0), (5, 200.0), (6, 250.0)];
    steps.extend(
        fingers
            .iter()
            .map(|&(pointer, x)| Step::new(200, pointer, Down, (x, 200.0))),
    );
    for y in [230.0, 260.0, 290.0] {
        steps.extend(
            fingers
                .iter()
                .map(|&(pointer, x)| Step::new(8, pointer, Move, (x, y))),
        );
    }
    steps.extend(
        fingers
            .iter()
            .map(|&(pointer, x)| Step::new(16, pointer, Up, (x, 290.0))),
    );

    steps
}

/// Sends the steps in real time. Ends when all steps are sent or the receiver is gone.
pub async fn play(steps: Vec<Step>, events: UnboundedSender<PointerEvent>) -> Result<()> {
    for step in steps {
        time::sleep(step.after).await;
        let event = PointerEvent::new(step.pointer, step.phase, step.pos, Instant::now());
        events.send(event)?;
    }
    Ok(())
}
