//! Integration tests for menu-locale.

#![allow(clippy::unwrap_used)] // Tests can use unwrap for cleaner assertions

mod common;

use assert_cmd::Command;
use predicates::prelude::*;

/// Helper to create a command for the menu-locale binary, isolated from the
/// user's config and environment.
fn menu_locale_cmd(home: &std::path::Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("menu-locale"));
    cmd.current_dir(home)
        .env("XDG_CONFIG_HOME", home.join("xdg"))
        .env_remove("MENU_LOCALE_LANGUAGE")
        .env_remove("MENU_LOCALE_LOCALES_DIR")
        .env_remove("MENU_LOCALE_ADDRESS");
    cmd
}

#[test]
fn test_help() {
    let home = tempfile::TempDir::new().unwrap();
    menu_locale_cmd(home.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("lookup"))
        .stdout(predicate::str::contains("serve"));
}

#[test]
fn test_version() {
    let home = tempfile::TempDir::new().unwrap();
    menu_locale_cmd(home.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_unknown_command() {
    let home = tempfile::TempDir::new().unwrap();
    menu_locale_cmd(home.path())
        .arg("unknown-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"))
        .stderr(predicate::str::contains("Error:").not());
}

#[test]
fn test_identifiers_lists_menu_set() {
    let home = tempfile::TempDir::new().unwrap();
    menu_locale_cmd(home.path())
        .arg("identifiers")
        .assert()
        .success()
        .stdout(predicate::str::contains("about"))
        .stdout(predicate::str::contains("httpsEverywhere"));
}

#[test]
fn test_lookup_prints_translations_and_placeholders() {
    let (home, locales) =
        common::locales_dir(&[("en-US", "menu.ftl", "about = About Brave\nnewTab = New Tab\n")]);

    menu_locale_cmd(home.path())
        .arg("--locales-dir")
        .arg(&locales)
        .args(["--language", "en-US", "--quiet", "lookup", "about", "quit", "notAMenuItem"])
        .assert()
        .success()
        .stdout(predicate::str::contains("About Brave"))
        .stdout(predicate::str::contains("[QUIT]"))
        .stdout(predicate::str::contains("[NOTAMENUITEM]"));
}

#[test]
fn test_dump_json_with_config_identifiers() {
    let (home, locales) = common::locales_dir(&[
        ("nl-NL", "menu.ftl", "about = Over\n"),
        ("nl-NL", "app.ftl", "quit = Afsluiten\n"),
    ]);
    let config = common::write_config(
        home.path(),
        &format!(
            "language: nl-NL\nlocales:\n  dir: {}\n  identifiers: [about, quit]\n",
            locales.display()
        ),
    );

    let assert = menu_locale_cmd(home.path())
        .arg("--config")
        .arg(&config)
        .args(["--output", "json", "--quiet", "dump"])
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let mapping: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(mapping, serde_json::json!({"about": "Over", "quit": "Afsluiten"}));
}

#[test]
fn test_config_language_is_normalized() {
    let (home, locales) = common::locales_dir(&[("nl-NL", "menu.ftl", "about = Over\n")]);
    let config = common::write_config(
        home.path(),
        &format!(
            "language: nl_NL.UTF-8\nlocales:\n  dir: {}\n  identifiers: [about]\n",
            locales.display()
        ),
    );

    menu_locale_cmd(home.path())
        .arg("--config")
        .arg(&config)
        .args(["--quiet", "lookup", "about"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Over"));
}

#[test]
fn test_bad_config_exits_with_config_code() {
    let home = tempfile::TempDir::new().unwrap();
    let config = common::write_config(home.path(), "language: [oops");

    menu_locale_cmd(home.path())
        .arg("--config")
        .arg(&config)
        .arg("identifiers")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Configuration error"));
}

mod cache_tests {
    use std::sync::{Arc, Mutex};

    use menu_locale::cache::{CacheSettings, TranslationCache, UpdatePolicy};
    use menu_locale::identifiers::IdentifierSet;
    use menu_locale::loader::{FluentLoader, StaticLoader};

    use super::common;

    fn about_quit() -> IdentifierSet {
        IdentifierSet::new(["about", "quit"])
    }

    #[tokio::test]
    async fn test_about_resolves_quit_does_not() {
        let loader = StaticLoader::new().with_language("en-US", [("about", "About")]);
        let settings = CacheSettings::builder().identifiers(about_quit()).build();
        let cache = TranslationCache::new(loader, settings);

        let calls = Arc::new(Mutex::new(0));
        let counter = Arc::clone(&calls);
        cache
            .init_with_callback("en-US", move |_| *counter.lock().unwrap() += 1)
            .wait()
            .await
            .unwrap();

        assert_eq!(*calls.lock().unwrap(), 1);
        assert_eq!(cache.translation("about"), "About");
        assert_eq!(cache.translation("quit"), "[QUIT]");
        assert_eq!(cache.translation(""), "[]");
    }

    #[tokio::test]
    async fn test_last_completion_wins_regardless_of_call_order() {
        let mut loader = common::GatedLoader::new();
        let release_en = loader.language("en-US", &[("about", "About")]);
        let release_nl = loader.language("nl-NL", &[("about", "Over")]);
        let settings = CacheSettings::builder().identifiers(about_quit()).build();
        let cache = TranslationCache::new(loader, settings);

        let en = cache.init("en-US");
        let nl = cache.init("nl-NL");
        assert_eq!(cache.language(), "nl-NL");
        assert_eq!(cache.translation("about"), "[ABOUT]");

        // nl-NL completes first, en-US last
        release_nl.send(()).unwrap();
        nl.wait().await.unwrap();
        assert_eq!(cache.translation("about"), "Over");

        release_en.send(()).unwrap();
        en.wait().await.unwrap();
        assert_eq!(cache.translation("about"), "About");
    }

    #[tokio::test]
    async fn test_latest_call_policy_discards_superseded_batch() {
        let mut loader = common::GatedLoader::new();
        let release_en = loader.language("en-US", &[("about", "About")]);
        let release_nl = loader.language("nl-NL", &[("about", "Over")]);
        let settings = CacheSettings::builder()
            .identifiers(about_quit())
            .policy(UpdatePolicy::LatestCall)
            .build();
        let cache = TranslationCache::new(loader, settings);

        let en = cache.init("en-US");
        let nl = cache.init("nl-NL");

        release_nl.send(()).unwrap();
        assert!(!nl.wait().await.unwrap().discarded);

        release_en.send(()).unwrap();
        let report = en.wait().await.unwrap();
        assert!(report.discarded);
        assert_eq!(cache.translation("about"), "Over");
    }

    #[tokio::test]
    async fn test_panicking_callback_still_applies_batch() {
        let loader = StaticLoader::new().with_language("en-US", [("about", "About")]);
        let settings = CacheSettings::builder().identifiers(about_quit()).build();
        let cache = TranslationCache::new(loader, settings);
        let mut reports = cache.subscribe();

        let result = cache
            .init_with_callback("en-US", |_| panic!("menu rebuild failed"))
            .wait()
            .await;

        assert!(result.is_err());
        assert_eq!(cache.translation("about"), "About");
        let report = reports.recv().await.unwrap();
        assert_eq!(report.language, "en-US");
        assert_eq!(report.resolved, 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_latest_call_inits_match_active_language() {
        const LANGUAGES: [&str; 6] = ["en-US", "nl-NL", "pt-BR", "bn-BD", "de-DE", "fr-FR"];

        for _ in 0..20 {
            let loader = LANGUAGES
                .iter()
                .fold(StaticLoader::new(), |loader, &l| loader.with_language(l, [("about", l)]));
            let settings = CacheSettings::builder()
                .identifiers(about_quit())
                .policy(UpdatePolicy::LatestCall)
                .build();
            let cache = TranslationCache::new(loader, settings);

            let callers: Vec<_> = LANGUAGES
                .iter()
                .map(|&language| {
                    let cache = cache.clone();
                    tokio::spawn(async move { cache.init(language) })
                })
                .collect();
            for caller in callers {
                caller.await.unwrap().wait().await.unwrap();
            }

            assert_eq!(cache.translation("about"), cache.language());
        }
    }

    #[tokio::test]
    async fn test_fluent_resources_end_to_end() {
        let (_home, locales) = common::locales_dir(&[
            ("pt-BR", "menu.ftl", "about = Sobre\n"),
            ("pt-BR", "password.ftl", "confirmClearPasswords = Limpar senhas?\n"),
        ]);
        let settings = CacheSettings::builder()
            .locales_dir(locales)
            .identifiers(IdentifierSet::new(["about", "confirmClearPasswords", "quit"]))
            .build();
        let cache = TranslationCache::new(FluentLoader::new(), settings);

        let report = cache.init("pt-BR").wait().await.unwrap();

        assert_eq!(report.resolved, 2);
        assert_eq!(report.unresolved, vec!["quit".to_string()]);
        assert_eq!(cache.translation("about"), "Sobre");
        assert_eq!(cache.translation("confirmClearPasswords"), "Limpar senhas?");
        assert_eq!(cache.translation("quit"), "[QUIT]");
    }
}

mod ipc_tests {
    use menu_locale::cache::{CacheSettings, TranslationCache, Translations};
    use menu_locale::identifiers::IdentifierSet;
    use menu_locale::ipc::{
        IpcClient, IpcMain, IpcServer, ProcessRole, TRANSLATIONS_CHANNEL, install_responder,
    };
    use menu_locale::loader::StaticLoader;
    use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
    use tokio::net::TcpStream;
    use tokio::sync::oneshot;

    use super::common;

    async fn start(ipc: IpcMain) -> (IpcClient, oneshot::Sender<()>) {
        let server = IpcServer::bind("127.0.0.1:0", ipc).await.unwrap();
        let address = server.local_addr().unwrap().to_string();
        let (stop, stopped) = oneshot::channel::<()>();
        tokio::spawn(server.serve_until(async {
            let _ = stopped.await;
        }));
        (IpcClient::new(address), stop)
    }

    #[tokio::test]
    async fn test_peer_receives_full_snapshot() {
        let loader = StaticLoader::new().with_language("en-US", [("about", "About")]);
        let settings =
            CacheSettings::builder().identifiers(IdentifierSet::new(["about", "quit"])).build();
        let cache = TranslationCache::new(loader, settings);

        let mut ipc = IpcMain::new();
        assert!(install_responder(ProcessRole::Coordinator, &mut ipc, cache.clone()));
        let (client, _stop) = start(ipc).await;

        cache.init("en-US").wait().await.unwrap();

        let translations = client.translations().await.unwrap();
        let expected: Translations = [("about".to_string(), "About".to_string())].into();
        assert_eq!(translations, expected);
    }

    #[tokio::test]
    async fn test_query_before_completion_returns_empty_mapping() {
        let mut loader = common::GatedLoader::new();
        let _release = loader.language("en-US", &[("about", "About")]);
        let cache = TranslationCache::new(loader, CacheSettings::default());

        let mut ipc = IpcMain::new();
        install_responder(ProcessRole::Coordinator, &mut ipc, cache.clone());
        let (client, _stop) = start(ipc).await;

        // Resolution is parked on the gate; the responder must not wait for it.
        let _pending = cache.init("en-US");
        assert!(client.translations().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_peer_role_serves_no_translations() {
        let cache = TranslationCache::new(StaticLoader::new(), CacheSettings::default());

        let mut ipc = IpcMain::new();
        assert!(!install_responder(ProcessRole::Peer, &mut ipc, cache));
        let (client, _stop) = start(ipc).await;

        let err = client.request(TRANSLATIONS_CHANNEL).await.unwrap_err();
        assert_eq!(err.exit_code(), 10);
        assert!(err.to_string().contains("no handler registered"));
    }

    #[tokio::test]
    async fn test_server_outlives_misbehaving_connections() {
        let loader = StaticLoader::new().with_language("en-US", [("about", "About")]);
        let settings =
            CacheSettings::builder().identifiers(IdentifierSet::new(["about"])).build();
        let cache = TranslationCache::new(loader, settings);
        cache.init("en-US").wait().await.unwrap();

        let mut ipc = IpcMain::new();
        install_responder(ProcessRole::Coordinator, &mut ipc, cache);
        let (client, _stop) = start(ipc).await;

        // A peer that connects and hangs up without sending anything.
        drop(TcpStream::connect(client.address()).await.unwrap());

        // A peer that never ends its request line.
        let mut flood = TcpStream::connect(client.address()).await.unwrap();
        let junk = vec![b'x'; menu_locale::ipc::MAX_FRAME_BYTES + 1];
        flood.write_all(&junk).await.unwrap();
        let mut response = String::new();
        BufReader::new(&mut flood).read_line(&mut response).await.unwrap();
        assert!(response.contains("exceeds"), "unexpected response: {response}");

        let translations = client.translations().await.unwrap();
        assert_eq!(translations.get("about").map(String::as_str), Some("About"));
    }
}
