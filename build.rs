// build.rs

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::Path;

fn main() {
    // --- 1. Determine the build-time default language ---
    let lang: String;

    // Priority 1: Check for `lang_*` feature flags set by Cargo.
    let mut active_langs = Vec::new();
    for (key, _) in env::vars() {
        if let Some(l) = key.strip_prefix("CARGO_FEATURE_LANG_") {
            active_langs.push(l.to_lowercase());
        }
    }
    active_langs.sort();

    if !active_langs.is_empty() {
        if active_langs.len() > 1 {
            println!(
                "cargo:warning=Multiple language features enabled ({:?}). Using the first one found: '{}'.",
                active_langs, active_langs[0]
            );
        }
        lang = active_langs[0].clone();
    } else {
        // Priority 2 & 3: NIGHTINGALE_LANG, then "en".
        lang = env::var("NIGHTINGALE_LANG").unwrap_or_else(|_| "en".to_string());
    }

    println!("cargo:rustc-env=NIGHTINGALE_LANG_EFFECTIVE={}", lang);

    // --- 2. Rerun triggers ---
    println!("cargo:rerun-if-env-changed=NIGHTINGALE_LANG");
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=locales/");

    // --- 3. Load every locale file; English is the fallback for missing keys ---
    let fallback_content = fs::read_to_string("locales/en.toml")
        .expect("Failed to read fallback language file: locales/en.toml");
    let fallback: BTreeMap<String, String> =
        toml::from_str(&fallback_content).expect("Failed to parse locales/en.toml");

    let mut locales: BTreeMap<String, BTreeMap<String, String>> = BTreeMap::new();
    for entry in fs::read_dir("locales").expect("Failed to list the locales/ directory") {
        let path = entry.expect("Failed to read locales/ entry").path();
        if path.extension().and_then(|e| e.to_str()) != Some("toml") {
            continue;
        }
        let Some(code) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        let content = fs::read_to_string(&path)
            .unwrap_or_else(|_| panic!("Failed to read {}", path.display()));
        let specific: BTreeMap<String, String> = toml::from_str(&content)
            .unwrap_or_else(|_| panic!("Failed to parse {}", path.display()));

        let mut merged = fallback.clone();
        merged.extend(specific);
        locales.insert(code.to_string(), merged);
    }

    let translations = match locales.get(&lang) {
        Some(t) => t.clone(),
        None => {
            println!(
                "cargo:warning=Language file 'locales/{}.toml' not found. Falling back to 'en'.",
                lang
            );
            fallback.clone()
        }
    };
    let effective = if locales.contains_key(&lang) { lang.as_str() } else { "en" };

    // --- 4. Generate the compile-time `t!` macro ---
    let mut code = String::from(
        "/// Resolves a message key of the default language at compile time.\n#[macro_export]\nmacro_rules! t {\n",
    );
    for (key, value) in &translations {
        code.push_str(&format!("    ({:?}) => {{ {:?} }};\n", key, value));
    }
    // Missing keys fail the build instead of panicking at runtime.
    code.push_str(
        "    ($key:expr) => {{ compile_error!(concat!(\"Missing translation key: \", $key)) }};\n",
    );
    code.push_str("}\n\n");

    // --- 5. Generate the runtime locale table used by `--language` ---
    code.push_str("/// Language compiled in as the default.\n");
    code.push_str("#[doc(hidden)]\n");
    code.push_str(&format!("pub const DEFAULT_LANGUAGE: &str = {:?};\n\n", effective));
    code.push_str("/// Every bundled locale as `(code, [(key, message)])`, sorted by code and key.\n");
    code.push_str("#[doc(hidden)]\n");
    code.push_str("pub static LOCALES: &[(&str, &[(&str, &str)])] = &[\n");
    for (code_name, messages) in &locales {
        code.push_str(&format!("    ({:?}, &[\n", code_name));
        for (key, value) in messages {
            code.push_str(&format!("        ({:?}, {:?}),\n", key, value));
        }
        code.push_str("    ]),\n");
    }
    code.push_str("];\n");

    // --- 6. Write the generated code to `OUT_DIR` ---
    let out_dir = env::var("OUT_DIR").unwrap();
    let dest_path = Path::new(&out_dir).join("translations.rs");
    fs::write(&dest_path, code).unwrap();
}
