//! End-to-end generation against a mock mirror.

use elfshoe::config::{parse_config, ElfshoeConfig};
use elfshoe::generator::generate;
use elfshoe::lint::{is_failure, RuleRegistry, ScriptSource};
use elfshoe::render::{IpxeRenderer, Renderer};
use elfshoe::resolver::{RunOptions, WarningKind};
use httpmock::prelude::*;
use httpmock::Method::HEAD;
use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

const RELEASES: &str = r#"[
    {"version": "41", "arch": "x86_64", "variant": "Server"},
    {"version": "41", "arch": "aarch64", "variant": "Server"},
    {"version": "40", "arch": "x86_64", "variant": "Server"},
    {"version": "40", "arch": "aarch64", "variant": "Server"},
    {"version": "39", "arch": "x86_64", "variant": "Server"},
    {"version": "41", "arch": "x86_64", "variant": "Workstation"}
]"#;

fn serve_releases(server: &MockServer) {
    server.mock(|when, then| {
        when.method(GET).path("/releases.json");
        then.status(200)
            .header("content-type", "application/json")
            .body(RELEASES);
    });
}

fn config(server: &MockServer) -> ElfshoeConfig {
    let yaml = format!(
        r#"
menu:
  title: Lab Boot
  default_item: fedora_menu
  timeout: 10000
distributions:
  fedora:
    label: Fedora
    type: dynamic
    metadata_provider: fedora
    metadata_url: {releases}
    metadata_filter: {{architectures: [x86_64, arm64], recency_limit: 2}}
    url_template: {mirror}/fedora/{{version}}/Server/{{arch}}/os
    boot_files: {{kernel: images/pxeboot/vmlinuz, initrd: images/pxeboot/initrd.img}}
    boot_params: inst.repo={{base_url}} ip=dhcp
  debian:
    label: Debian
    versions: [{{version: bookworm}}, {{version: trixie}}]
    url_template: {mirror}/debian/{{version}}/{{arch}}
    boot_files: {{kernel: linux, initrd: initrd.gz}}
additional_items:
  - {{id: netboot, label: netboot.xyz, type: chain, url: "https://boot.netboot.xyz"}}
  - {{id: shell, label: iPXE Shell, type: shell}}
"#,
        releases = server.url("/releases.json"),
        mirror = server.base_url(),
    );
    parse_config(&yaml, Path::new("config.yaml")).unwrap()
}

fn options(validate_urls: bool) -> RunOptions {
    RunOptions {
        validate_urls,
        timeout: Duration::from_secs(5),
        max_parallel: 4,
    }
}

fn serve_artifact(server: &MockServer, path: &str) {
    server.mock(|when, then| {
        when.method(HEAD).path(path);
        then.status(200);
    });
}

#[test]
fn validation_drops_entries_with_missing_artifacts() {
    let server = MockServer::start();
    serve_releases(&server);
    for (version, arch) in [("41", "x86_64"), ("41", "aarch64"), ("40", "x86_64")] {
        for file in ["vmlinuz", "initrd.img"] {
            serve_artifact(
                &server,
                &format!("/fedora/{}/Server/{}/os/images/pxeboot/{}", version, arch, file),
            );
        }
    }
    // 40/aarch64 has a kernel but no initrd.
    serve_artifact(&server, "/fedora/40/Server/aarch64/os/images/pxeboot/vmlinuz");
    for codename in ["bookworm", "trixie"] {
        for file in ["linux", "initrd.gz"] {
            serve_artifact(&server, &format!("/debian/{}/amd64/{}", codename, file));
        }
    }

    let report = generate(&config(&server), options(true)).unwrap();

    let fedora: Vec<_> = report.model.distributions[0]
        .entries
        .iter()
        .map(|e| e.id.as_str())
        .collect();
    assert_eq!(
        fedora,
        vec!["fedora_41_x86_64", "fedora_41_arm64", "fedora_40_x86_64"]
    );
    assert_eq!(report.model.distributions[1].entries.len(), 2);

    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].distribution, "fedora");
    match &report.warnings[0].kind {
        WarningKind::ValidationFailure { urls } => {
            assert_eq!(urls.len(), 1);
            assert!(urls[0].ends_with("/fedora/40/Server/aarch64/os/images/pxeboot/initrd.img"))
        }
        other => panic!("unexpected warning {:?}", other),
    }
}

#[test]
fn disabled_validation_sends_no_probes() {
    let server = MockServer::start();
    serve_releases(&server);
    let probe = server.mock(|when, then| {
        when.method(HEAD);
        then.status(200);
    });

    let report = generate(&config(&server), options(false)).unwrap();

    probe.assert_calls(0);
    assert_eq!(report.model.distributions[0].entries.len(), 4);
    assert!(report.warnings.is_empty());
}

#[test]
fn always_reachable_mirror_matches_unvalidated_run() {
    let server = MockServer::start();
    serve_releases(&server);
    server.mock(|when, then| {
        when.method(HEAD);
        then.status(200);
    });

    let validated = generate(&config(&server), options(true)).unwrap();
    let unvalidated = generate(&config(&server), options(false)).unwrap();

    assert_eq!(validated.model, unvalidated.model);
}

#[test]
fn failing_metadata_source_only_affects_its_distribution() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/releases.json");
        then.status(500);
    });

    let report = generate(&config(&server), options(false)).unwrap();

    assert!(report.model.distributions[0].is_empty());
    assert_eq!(report.model.distributions[1].entries.len(), 2);
    assert_eq!(report.warnings.len(), 1);
    assert!(matches!(
        report.warnings[0].kind,
        WarningKind::MetadataFetch { .. }
    ));
}

#[test]
fn rendered_menu_is_lint_clean() {
    let server = MockServer::start();
    serve_releases(&server);

    let report = generate(&config(&server), options(false)).unwrap();
    let script = IpxeRenderer::new().render(&report.model);

    assert!(script.contains("choose --default fedora_menu --timeout 10000 target && goto ${target}"));
    assert!(script.contains("iseq ${buildarch} arm64 && item fedora_41_arm64"));
    assert!(script.contains(&format!(
        "initrd {}/fedora/41/Server/aarch64/os/images/pxeboot/initrd.img",
        server.base_url()
    )));
    assert!(script.contains(&format!(
        "inst.repo={}/fedora/41/Server/x86_64/os ip=dhcp",
        server.base_url()
    )));

    let diagnostics = RuleRegistry::with_builtins().check(&ScriptSource::new("menu.ipxe", &script));
    assert!(
        !is_failure(&diagnostics, true),
        "unexpected diagnostics: {:?}",
        diagnostics
    );
}

#[test]
fn resolution_is_idempotent() {
    let server = MockServer::start();
    serve_releases(&server);

    let first = generate(&config(&server), options(false)).unwrap();
    let second = generate(&config(&server), options(false)).unwrap();

    assert_eq!(
        IpxeRenderer::new().render(&first.model),
        IpxeRenderer::new().render(&second.model)
    );
}

#[test]
fn script_labels_are_unique_with_messy_feed() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/releases.json");
        then.status(200)
            .header("content-type", "application/json")
            .body(
                r#"[{"version": "41", "arch": "x86_64", "variant": "Server"},
                    {"version": "41", "arch": "aarch64", "variant": "Server"},
                    {"version": "41", "arch": "arm64", "variant": "Server"},
                    {"version": "", "arch": "x86_64", "variant": "Server"}]"#,
            );
    });
    let yaml = format!(
        r#"
menu:
  default_item: fedora_menu
distributions:
  fedora:
    type: dynamic
    metadata_provider: fedora
    metadata_url: {}
    url_template: http://mirror/fedora/{{version}}/{{arch}}
    boot_files: {{kernel: vmlinuz, initrd: initrd.img}}
additional_items:
  - {{id: fedora_41_x86_64, label: Pinned, type: shell}}
"#,
        server.url("/releases.json")
    );
    let config = parse_config(&yaml, Path::new("config.yaml")).unwrap();

    let report = generate(&config, options(false)).unwrap();
    let script = IpxeRenderer::new().render(&report.model);

    let mut labels = HashSet::new();
    for label in script.lines().filter(|l| l.starts_with(':')) {
        assert!(labels.insert(label), "label {} defined twice", label);
    }
    let ids: Vec<_> = report.model.distributions[0]
        .entries
        .iter()
        .map(|e| e.id.as_str())
        .collect();
    assert_eq!(ids, vec!["fedora_41_arm64"]);

    let kinds: Vec<_> = report.warnings.iter().map(|w| &w.kind).collect();
    assert!(kinds.contains(&&WarningKind::BlankVersion));
    assert!(kinds.contains(&&WarningKind::DuplicateEntry {
        id: "fedora_41_arm64".into()
    }));
    assert!(kinds.contains(&&WarningKind::DuplicateEntry {
        id: "fedora_41_x86_64".into()
    }));
}
