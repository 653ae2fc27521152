mod support;

use std::sync::{Arc, Mutex};
use support::{engine, RecordingOpener, RecordingRecycleBin};
use tempfile::{tempdir, TempDir};
use websearch::defaults::Defaults;
use websearch::editor::EngineEditor;
use websearch::launcher::launch_action;
use websearch::plugin::{FallbackProvider, Plugin, PluginManager};
use websearch::usage::{load_usage, UsageTracker};
use websearch::{EngineStore, WebSearchPlugin, MAX_SCORE};

fn new_plugin(dir: &TempDir, opener: RecordingOpener) -> WebSearchPlugin {
    let store = EngineStore::new(dir.path().join("engines.json"), Defaults::bundled());
    let editor = EngineEditor::new(dir.path().join("icons"), Box::new(RecordingRecycleBin::default()));
    let plugin = WebSearchPlugin::new(store, editor, Box::new(opener));
    plugin
        .set_engines(vec![
            engine("1", "Google", "gg", true),
            engine("2", "Youtube", "yt", false),
            engine("3", "Wikipedia", "", true),
        ])
        .unwrap();
    plugin
}

#[test]
fn search_returns_web_search_action() {
    let dir = tempdir().unwrap();
    let plugin = new_plugin(&dir, RecordingOpener::default());
    let results = plugin.search("gg rust lang");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].label, "Search Google for 'rust lang'");
    assert_eq!(results[0].desc, "Web search");
    assert_eq!(
        results[0].action,
        "https://google.example/search?q=rust%20lang"
    );
}

#[test]
fn search_orders_by_score() {
    let dir = tempdir().unwrap();
    let plugin = new_plugin(&dir, RecordingOpener::default());
    plugin
        .set_engines(vec![
            engine("1", "Google", "ggl", true),
            engine("2", "GitHub", "g", true),
        ])
        .unwrap();
    let results = plugin.search("g");
    assert_eq!(results.len(), 2);
    assert!(results[0].label.starts_with("Search GitHub"));
}

#[test]
fn rank_items_carry_completion_and_score() {
    let dir = tempdir().unwrap();
    let plugin = new_plugin(&dir, RecordingOpener::default());
    let items = plugin.rank_items("wikipedia ferris");
    assert_eq!(items.len(), 1);
    let (item, score) = &items[0];
    assert_eq!(*score, MAX_SCORE);
    assert_eq!(item.id, "3");
    assert_eq!(item.completion, "Wikipedia ferris");
}

#[test]
fn fallbacks_only_include_flagged_engines() {
    let dir = tempdir().unwrap();
    let plugin = new_plugin(&dir, RecordingOpener::default());
    let items = plugin.fallback_items("borrow checker");
    let names: Vec<_> = items.iter().map(|i| i.text.as_str()).collect();
    assert_eq!(names, ["Google", "Wikipedia"]);
    assert_eq!(items[0].url, "https://google.example/search?q=borrow%20checker");
}

#[test]
fn empty_fallback_query_uses_placeholder() {
    let dir = tempdir().unwrap();
    let plugin = new_plugin(&dir, RecordingOpener::default());
    let actions = plugin.fallbacks("");
    assert_eq!(actions.len(), 2);
    assert_eq!(actions[0].label, "Search Google for '…'");
    assert_eq!(actions[0].action, "https://google.example/search?q=");
}

#[test]
fn triggers_and_commands_list_engines_with_triggers() {
    let dir = tempdir().unwrap();
    let plugin = new_plugin(&dir, RecordingOpener::default());
    assert_eq!(plugin.triggers(), vec!["gg ", "yt "]);
    let commands = plugin.commands();
    assert_eq!(commands.len(), 2);
    assert_eq!(commands[0].action, "query:gg ");
    assert_eq!(commands[0].desc, "Google");
}

#[test]
fn activation_opens_url_and_records_usage() {
    let dir = tempdir().unwrap();
    let opener = RecordingOpener::default();
    let usage_path = dir.path().join("usage.json");
    let plugin = new_plugin(&dir, opener.clone()).with_usage(UsageTracker::load(&usage_path, 0.5));

    let (item, _) = plugin.rank_items("yt ferris").remove(0);
    plugin.activate(&item).unwrap();
    plugin.activate(&item).unwrap();

    assert_eq!(
        *opener.opened.lock().unwrap(),
        vec![
            "https://youtube.example/search?q=ferris".to_string(),
            "https://youtube.example/search?q=ferris".to_string(),
        ]
    );
    assert_eq!(load_usage(&usage_path).unwrap().get("2"), Some(&2));
}

#[test]
fn launch_action_opens_search_result() {
    let dir = tempdir().unwrap();
    let opener = RecordingOpener::default();
    let plugin = new_plugin(&dir, RecordingOpener::default());
    let action = plugin.search("gg tokio").remove(0);
    launch_action(&action, &opener).unwrap();
    assert_eq!(
        *opener.opened.lock().unwrap(),
        vec!["https://google.example/search?q=tokio".to_string()]
    );
}

#[test]
fn launching_search_action_records_usage() {
    let dir = tempdir().unwrap();
    let opener = RecordingOpener::default();
    let usage_path = dir.path().join("usage.json");
    let plugin = new_plugin(&dir, opener.clone()).with_usage(UsageTracker::load(&usage_path, 0.5));

    let action = plugin.search("gg tokio").remove(0);
    assert_eq!(action.args.as_deref(), Some("1"));
    plugin.launch(&action).unwrap();

    let fallback = plugin.fallbacks("tokio").remove(1);
    plugin.launch(&fallback).unwrap();

    assert_eq!(opener.opened.lock().unwrap().len(), 2);
    let usage = load_usage(&usage_path).unwrap();
    assert_eq!(usage.get("1"), Some(&1));
    assert_eq!(usage.get("3"), Some(&1));
}

#[test]
fn icon_cache_is_cleared_when_engines_change() {
    let dir = tempdir().unwrap();
    let plugin = new_plugin(&dir, RecordingOpener::default());
    let (item, _) = plugin.rank_items("gg x").remove(0);

    assert!(plugin.icon(&item).is_some());
    assert!(plugin.cached_icons() > 0);

    plugin.restore_default_engines().unwrap();
    assert_eq!(plugin.cached_icons(), 0);
}

#[test]
fn plugin_subscribers_receive_new_list() {
    let dir = tempdir().unwrap();
    let plugin = new_plugin(&dir, RecordingOpener::default());
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let id = plugin.subscribe(move |engines| {
        sink.lock()
            .unwrap()
            .push(engines.iter().map(|e| e.name.clone()).collect::<Vec<_>>());
    });

    plugin.set_engines(vec![engine("9", "Crates", "cr", true)]).unwrap();
    assert!(plugin.unsubscribe(id));
    plugin.set_engines(Vec::new()).unwrap();

    assert_eq!(*seen.lock().unwrap(), vec![vec!["Crates".to_string()]]);
}

#[test]
fn manager_falls_back_when_nothing_matches() {
    let dir = tempdir().unwrap();
    let plugin = Arc::new(new_plugin(&dir, RecordingOpener::default()));
    let mut manager = PluginManager::new();
    manager.register(Box::new(Arc::clone(&plugin)));
    manager.register_fallback(Box::new(plugin));

    assert_eq!(manager.plugin_names(), vec!["websearch"]);
    assert_eq!(manager.search_or_fallback("gg crab").len(), 1);

    let fallbacks = manager.search_or_fallback("zzz");
    assert_eq!(fallbacks.len(), 2);
    assert_eq!(fallbacks[1].label, "Search Wikipedia for 'zzz'");
}
