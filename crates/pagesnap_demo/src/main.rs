//! Pagesnap demo
//!
//! Simulates a hosting page: four sections over a shared scroll position,
//! a phone-sized viewport, and a user who flicks partway down the page.
//! The first half runs on a scripted virtual clock so every decision is
//! visible in the log; the second half hands the clock to a background
//! `Ticker` the way a headless host would.

use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pagesnap_nav::prelude::*;
use pagesnap_timing::Ticker;

/// Shared page state the section stubs measure against
struct Page {
    scroll_y: f32,
}

struct SectionStub {
    page: Arc<Mutex<Page>>,
    top: f32,
    label: &'static str,
}

impl SnapTarget for SectionStub {
    fn offset_top(&self) -> f32 {
        self.top - self.page.lock().unwrap().scroll_y
    }

    fn align_to_top(&self) {
        let mut page = self.page.lock().unwrap();
        page.scroll_y = self.top;
        tracing::info!("host animates to '{}' (offset {})", self.label, self.top);
    }
}

/// The user scrolls: the page moves, then the host reports the position.
fn user_scroll(controller: &SnapController, page: &Arc<Mutex<Page>>, position: f32, now: Instant) {
    page.lock().unwrap().scroll_y = position;
    controller.on_scroll(position, now);
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let page = Arc::new(Mutex::new(Page { scroll_y: 0.0 }));
    let controller = SnapController::new(SnapConfig::default());

    controller.subscribe(|snapshot: NavSnapshot| {
        tracing::info!(
            "indicator: section {} (scrolling={}, mobile={})",
            snapshot.current_index,
            snapshot.is_scrolling,
            snapshot.is_mobile
        );
    });

    // A phone-sized viewport activates snapping
    controller.on_resize(480.0);

    for (top, label) in [
        (0.0, "hero"),
        (800.0, "featured"),
        (1600.0, "catalog"),
        (2400.0, "footer"),
    ] {
        controller.register_section(Arc::new(SectionStub {
            page: Arc::clone(&page),
            top,
            label,
        }));
    }

    // --- Scripted segment: virtual clock -------------------------------

    let t0 = Instant::now();
    let at = |millis: u64| t0 + Duration::from_millis(millis);

    tracing::info!("flick: three observations inside one quiet window");
    user_scroll(&controller, &page, 0.0, at(0));
    user_scroll(&controller, &page, 60.0, at(40));
    user_scroll(&controller, &page, 120.0, at(80));

    // Quiet window elapses: one decision, net delta 120 -> next section
    controller.tick(at(80 + 150));

    // Snap window elapses: guard drops
    controller.tick(at(80 + 150 + 600));
    tracing::info!(
        "scripted segment done: page at {}, section {}",
        page.lock().unwrap().scroll_y,
        controller.current_section_index()
    );

    // --- Live segment: background ticker -------------------------------

    let ticker_handle = controller.handle();
    let _ticker = Ticker::spawn(Duration::from_millis(16), move |now| {
        ticker_handle.tick(now);
    });

    tracing::info!("live: a small corrective nudge, ticker drives the clock");
    let live_base = page.lock().unwrap().scroll_y;
    user_scroll(&controller, &page, live_base, Instant::now());
    thread::sleep(Duration::from_millis(30));
    user_scroll(&controller, &page, live_base + 30.0, Instant::now());

    // Wait out the quiet window and the snap window
    thread::sleep(Duration::from_millis(900));

    let snapshot = controller.snapshot();
    tracing::info!(
        "live segment done: page at {}, section {} (scrolling={})",
        page.lock().unwrap().scroll_y,
        snapshot.current_index,
        snapshot.is_scrolling
    );

    Ok(())
}
