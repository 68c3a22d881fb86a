//! Concurrent rendering from one shared engine.

use std::sync::Arc;
use std::thread;

use newsdesk_render::{Engine, RenderContext, Router};

fn engine() -> Engine {
    Engine::builder()
        .resolver(
            Router::new()
                .route("home", "/")
                .route("feedEntries", "/feed/{feedID}/entries")
                .route("entry", "/entry/{entryID}"),
        )
        .build()
        .unwrap()
}

#[test]
fn languages_do_not_leak_between_threads() {
    let engine = engine();

    thread::scope(|scope| {
        for worker in 0..8 {
            let engine = &engine;
            scope.spawn(move || {
                let (language, own, other) = if worker % 2 == 0 {
                    ("fr_FR", "Mode hors ligne", "Offline Mode")
                } else {
                    ("en_US", "Offline Mode", "Mode hors ligne")
                };
                for _ in 0..50 {
                    let out = engine
                        .render("offline.html", &RenderContext::new(language))
                        .unwrap();
                    let out = String::from_utf8(out).unwrap();
                    assert!(out.contains(own), "{language}: {out}");
                    assert!(!out.contains(other), "{language}: {out}");
                }
            });
        }
    });
}

#[test]
fn shared_engine_renders_pages_and_feeds_concurrently() {
    let engine = Arc::new(engine());
    let expected_html = engine
        .render("category_entries_public.html", &RenderContext::new("de_DE").with("total", 0))
        .unwrap();
    let expected_rss = engine
        .render(
            "category_entries_public.html",
            &RenderContext::new("de_DE").with("rss", true),
        )
        .unwrap();

    let handles: Vec<_> = (0..6)
        .map(|i| {
            let engine = Arc::clone(&engine);
            let expected_html = expected_html.clone();
            let expected_rss = expected_rss.clone();
            thread::spawn(move || {
                for _ in 0..20 {
                    if i % 2 == 0 {
                        let ctx = RenderContext::new("de_DE").with("total", 0);
                        let out = engine.render("category_entries_public.html", &ctx).unwrap();
                        assert_eq!(out, expected_html);
                    } else {
                        let ctx = RenderContext::new("de_DE").with("rss", true);
                        let out = engine.render("category_entries_public.html", &ctx).unwrap();
                        assert_eq!(out, expected_rss);
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}
