use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use blockfall::core::{Engine, GameSnapshot};
use blockfall::input::InputHandler;
use blockfall::term::{FrameBuffer, GameView, Viewport};
use blockfall::types::{Intent, RunStatus};

struct CountingAlloc;

static COUNT_ENABLED: AtomicBool = AtomicBool::new(false);
static ALLOC_COUNT: AtomicUsize = AtomicUsize::new(0);

#[global_allocator]
static GLOBAL: CountingAlloc = CountingAlloc;

unsafe impl GlobalAlloc for CountingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            let _ = layout;
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.alloc(layout)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout)
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            let _ = (layout, new_size);
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.realloc(ptr, layout, new_size)
    }
}

fn with_alloc_counting<F: FnOnce()>(f: F) -> usize {
    ALLOC_COUNT.store(0, Ordering::Relaxed);
    COUNT_ENABLED.store(true, Ordering::Relaxed);
    f();
    COUNT_ENABLED.store(false, Ordering::Relaxed);
    ALLOC_COUNT.load(Ordering::Relaxed)
}

#[test]
fn frame_hot_paths_do_not_allocate() {
    // Setup (outside counting) so one-time allocations don't trip the gate.
    let mut engine = Engine::with_seed(1);
    let mut input = InputHandler::new().with_key_release_timeout_ms(60_000);
    let view = GameView::default();
    let viewport = Viewport::new(80, 24);
    let mut fb = FrameBuffer::new(viewport.width, viewport.height);
    let mut snap = GameSnapshot::default();
    let frame = Duration::from_millis(16);

    // Warm-up.
    let _ = engine.step(frame, &[Intent::Left]);
    view.render_into(&snap, viewport, &mut fb);

    let allocs = with_alloc_counting(|| {
        for _ in 0..200 {
            let _ = input.update(16);
            let _ = engine.step(frame, &[]);
        }

        let moves = [Intent::Left, Intent::Right, Intent::RotateCw, Intent::SoftDrop];
        for _ in 0..50 {
            let _ = engine.step(frame, &moves);
        }

        // Hard drop drives the lock, line clear and promotion paths.
        for _ in 0..60 {
            snap = engine.step(frame, &[Intent::HardDrop]);
            if snap.status == RunStatus::GameOver {
                snap = engine.step(frame, &[Intent::Restart]);
            }
            engine.snapshot_into(&mut snap);
            view.render_into(&snap, viewport, &mut fb);
        }
    });

    assert_eq!(allocs, 0);
}
