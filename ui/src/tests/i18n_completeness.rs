use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

/// Canonical FTL file per locale.
const FTL_FILENAME: &str = "roundup-ui.ftl";

/// Root (relative to crate) for i18n assets.
const I18N_DIR: &str = "i18n";

/// Message id → set of `{ $placeable }` names. Terms, comments and
/// continuation lines are skipped; every message in this crate is one line.
fn parse_ftl(content: &str) -> BTreeMap<String, BTreeSet<String>> {
    let mut messages = BTreeMap::new();
    for line in content.lines() {
        if line.starts_with(char::is_whitespace) {
            continue;
        }
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('-') {
            continue;
        }
        let Some((id, pattern)) = line.split_once('=') else {
            continue;
        };
        let id = id.trim();
        if id.is_empty() || !id.chars().all(valid_key_char) {
            continue;
        }
        messages.insert(id.to_string(), placeables(pattern));
    }
    messages
}

fn placeables(pattern: &str) -> BTreeSet<String> {
    pattern
        .split("{")
        .skip(1)
        .filter_map(|rest| {
            let inner = rest.split('}').next()?.trim();
            inner.strip_prefix('$').map(|name| name.trim().to_string())
        })
        .collect()
}

fn valid_key_char(c: char) -> bool {
    matches!(c, 'a'..='z' | '0'..='9' | '-')
}

/// Every literal first argument of the translation macro under `src/`.
/// Dynamic ids and direct `fl!` calls are not seen.
fn referenced_keys(src_root: &Path) -> BTreeSet<String> {
    let needle = concat!("t", "!(\"");
    let mut found = BTreeSet::new();
    let mut stack = vec![src_root.to_path_buf()];

    while let Some(path) = stack.pop() {
        if path.is_dir() {
            if let Ok(read_dir) = fs::read_dir(&path) {
                stack.extend(read_dir.flatten().map(|entry| entry.path()));
            }
            continue;
        }
        if path.extension().and_then(|s| s.to_str()) != Some("rs") {
            continue;
        }
        let Ok(content) = fs::read_to_string(&path) else {
            continue;
        };
        for (index, _) in content.match_indices(needle) {
            let rest = &content[index + needle.len()..];
            if let Some(end) = rest.find('"') {
                let key = &rest[..end];
                if !key.is_empty() && key.chars().all(valid_key_char) {
                    found.insert(key.to_string());
                }
            }
        }
    }

    found
}

fn locale_dirs(i18n_root: &Path) -> Vec<String> {
    let mut dirs: Vec<String> = fs::read_dir(i18n_root)
        .map(|read_dir| {
            read_dir
                .flatten()
                .filter(|entry| entry.path().is_dir())
                .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
                .filter(|name| name.contains('-'))
                .collect()
        })
        .unwrap_or_default();
    dirs.sort();
    dirs
}

fn load(i18n_root: &Path, locale: &str) -> BTreeMap<String, BTreeSet<String>> {
    let path = i18n_root.join(locale).join(FTL_FILENAME);
    let content = fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("cannot read {}: {err}", path.display()));
    parse_ftl(&content)
}

fn i18n_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(I18N_DIR)
}

#[test]
fn referenced_keys_exist_in_fallback() {
    let fallback = load(&i18n_root(), "en-US");
    assert!(!fallback.is_empty(), "no messages parsed from en-US");

    let src_root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("src");
    let missing: Vec<_> = referenced_keys(&src_root)
        .into_iter()
        .filter(|key| !fallback.contains_key(key))
        .collect();
    assert!(
        missing.is_empty(),
        "keys used in code but missing from en-US:\n{}",
        missing.join("\n")
    );
}

#[test]
fn every_locale_matches_fallback_keys_and_placeables() {
    let root = i18n_root();
    let fallback = load(&root, "en-US");
    let mut report = Vec::new();

    for locale in locale_dirs(&root).into_iter().filter(|l| l != "en-US") {
        let messages = load(&root, &locale);
        for (key, args) in &fallback {
            match messages.get(key) {
                None => report.push(format!("{locale}: missing {key}")),
                Some(found) if found != args => report.push(format!(
                    "{locale}: {key} uses {found:?}, en-US uses {args:?}"
                )),
                Some(_) => {}
            }
        }
        for key in messages.keys().filter(|key| !fallback.contains_key(*key)) {
            report.push(format!("{locale}: {key} is not in en-US"));
        }
    }

    assert!(report.is_empty(), "locale drift:\n{}", report.join("\n"));
}

#[test]
fn placeables_are_parsed() {
    let parsed = parse_ftl("greeting = Hi, { $name }! { $count }\n# note = x\n-term = y\n");
    assert_eq!(parsed.len(), 1);
    assert_eq!(
        parsed["greeting"],
        BTreeSet::from(["name".to_string(), "count".to_string()])
    );
}
