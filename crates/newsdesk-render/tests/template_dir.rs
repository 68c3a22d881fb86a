//! Loading templates from a directory on disk.

use std::fs;
use std::path::Path;

use newsdesk_render::{Engine, EngineConfig, LoadError, RenderContext};
use serial_test::serial;
use tempfile::TempDir;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn theme() -> TempDir {
    let tmp = TempDir::new().unwrap();
    write(
        tmp.path(),
        "common/layout.html",
        "{% macro shell(title) %}<main title=\"{{ title }}\">{{ caller() }}</main>{% endmacro %}",
    );
    write(
        tmp.path(),
        "views/unread.html",
        "{% macro base() %}{% call shell(t('menu.categories')) %}{{ count }} unread{% endcall %}{% endmacro %}\
         {% macro base_rss() %}<count>{{ count }}</count>{% endmacro %}",
    );
    write(tmp.path(), "views/notes.txt", "not a template");
    write(
        tmp.path(),
        "standalone/maintenance.html",
        "<p>{{ t('page.offline.message') }}</p>",
    );
    tmp
}

fn render(engine: &Engine, name: &str, ctx: &RenderContext) -> String {
    String::from_utf8(engine.render(name, ctx).unwrap()).unwrap()
}

#[test]
fn engine_loads_configured_directory() {
    let tmp = theme();
    let engine = Engine::new(EngineConfig::default().with_templates_dir(tmp.path())).unwrap();

    assert_eq!(engine.template_names(), vec!["maintenance.html", "unread.html"]);

    let ctx = RenderContext::new("fr_FR").with("count", 4);
    assert_eq!(
        render(&engine, "unread.html", &ctx),
        "<main title=\"Catégories\">4 unread</main>"
    );
    assert_eq!(
        render(&engine, "unread.html", &ctx.clone().with("rss", true)),
        "<count>4</count>"
    );
    assert_eq!(
        render(&engine, "maintenance.html", &ctx),
        "<p>Vous êtes hors ligne</p>"
    );
}

#[test]
fn directory_replaces_embedded_templates() {
    let tmp = theme();
    let engine = Engine::new(EngineConfig::default().with_templates_dir(tmp.path())).unwrap();
    assert!(!engine.has_template("offline.html"));
}

#[test]
fn broken_file_fails_build() {
    let tmp = theme();
    write(tmp.path(), "views/broken.html", "{% for %}");
    let err = Engine::new(EngineConfig::default().with_templates_dir(tmp.path())).unwrap_err();
    assert!(matches!(err, LoadError::Syntax { name, .. } if name == "broken.html"));
}

#[test]
fn name_shared_by_view_and_standalone_fails_build() {
    let tmp = theme();
    write(tmp.path(), "standalone/unread.html", "duplicate");
    let err = Engine::new(EngineConfig::default().with_templates_dir(tmp.path())).unwrap_err();
    assert!(matches!(err, LoadError::DuplicateTemplate { .. }));
}

#[test]
fn missing_directory_fails_build() {
    let tmp = TempDir::new().unwrap();
    let missing = tmp.path().join("theme");
    let err = Engine::new(EngineConfig::default().with_templates_dir(&missing)).unwrap_err();
    assert!(matches!(err, LoadError::Read { path, .. } if path == missing));
}

#[test]
#[serial]
fn from_env_reads_templates_dir() {
    let tmp = theme();
    std::env::set_var("NEWSDESK_TEMPLATES_DIR", tmp.path());
    let engine = Engine::from_env();
    std::env::remove_var("NEWSDESK_TEMPLATES_DIR");

    let engine = engine.unwrap();
    assert!(engine.has_template("unread.html"));
}
