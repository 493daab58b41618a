use generate_util::{ModuleResolver, ResolveCache, ResolveOptions, ResolverConfig};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn resolver(global: &Path) -> ModuleResolver {
    let config = ResolverConfig {
        global_modules: Some(global.to_path_buf()),
        ..ResolverConfig::default()
    };
    ModuleResolver::new(&config).unwrap()
}

fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

#[test]
fn resolves_aliased_package_from_local_node_modules() {
    let cwd = TempDir::new().unwrap();
    let global = TempDir::new().unwrap();
    write(
        &cwd.path().join("node_modules/generate-foo/generator.js"),
        "module.exports = function(app) {};",
    );

    let mut r = resolver(global.path());
    let opts = ResolveOptions::new().prefix("generate").cwd(cwd.path());

    assert_eq!(
        r.resolve_module("foo", &opts),
        Some(cwd.path().join("node_modules/generate-foo"))
    );
    assert_eq!(
        r.try_resolve("foo", &opts),
        Some(cwd.path().join("node_modules/generate-foo/generator.js"))
    );
}

#[test]
fn try_resolve_prefers_package_entry_over_configfile() {
    let cwd = TempDir::new().unwrap();
    let global = TempDir::new().unwrap();
    let pkg = cwd.path().join("node_modules/generate-bar");
    write(&pkg.join("package.json"), r#"{"main": "lib/bar.js"}"#);
    write(&pkg.join("lib/bar.js"), "");
    write(&pkg.join("generator.js"), "");

    let mut r = resolver(global.path());
    let opts = ResolveOptions::new().cwd(cwd.path());

    assert_eq!(
        r.try_resolve("generate-bar", &opts),
        Some(pkg.join("lib/bar.js"))
    );
}

#[test]
fn try_resolve_honors_custom_configfile() {
    let cwd = TempDir::new().unwrap();
    let global = TempDir::new().unwrap();
    let pkg = cwd.path().join("node_modules/verb-toc");
    write(&pkg.join("verbfile.js"), "");

    let mut r = resolver(global.path());
    let opts = ResolveOptions::new()
        .prefix("verb")
        .cwd(cwd.path())
        .configfile("verbfile.js");

    assert_eq!(r.try_resolve("toc", &opts), Some(pkg.join("verbfile.js")));
    assert_eq!(
        r.try_resolve("toc", &opts.clone().configfile("generator.js")),
        None
    );
}

#[test]
fn explicit_cwd_never_falls_back_to_global() {
    let cwd = TempDir::new().unwrap();
    let global = TempDir::new().unwrap();
    write(&global.path().join("generate-qux/index.js"), "");

    let mut r = resolver(global.path());
    let open = ResolveOptions::new().prefix("generate");
    assert_eq!(
        r.resolve_module("qux", &open),
        Some(global.path().join("generate-qux"))
    );
    assert_eq!(
        r.try_resolve("qux", &open),
        Some(global.path().join("generate-qux/index.js"))
    );

    // Earlier global hits must not leak into a search pinned to `cwd`.
    let pinned = ResolveOptions::new().prefix("generate").cwd(cwd.path());
    assert_eq!(r.resolve_module("qux", &pinned), None);
    assert_eq!(r.try_resolve("qux", &pinned), None);
}

#[test]
fn results_are_served_from_cache_after_filesystem_changes() {
    let cwd = TempDir::new().unwrap();
    let global = TempDir::new().unwrap();
    let pkg = cwd.path().join("node_modules/generate-cached");
    write(&pkg.join("generator.js"), "");

    let mut r = resolver(global.path());
    let opts = ResolveOptions::new().cwd(cwd.path());
    let first_module = r.resolve_module("generate-cached", &opts);
    let first_entry = r.try_resolve("generate-cached", &opts);
    assert_eq!(first_entry, Some(pkg.join("generator.js")));

    write(&pkg.join("index.js"), "");
    assert_eq!(r.try_resolve("generate-cached", &opts), first_entry);

    fs::remove_dir_all(&pkg).unwrap();
    assert_eq!(r.resolve_module("generate-cached", &opts), first_module);
    assert_eq!(r.try_resolve("generate-cached", &opts), first_entry);
}

#[test]
fn missing_modules_resolve_to_none() {
    let cwd = TempDir::new().unwrap();
    let global = TempDir::new().unwrap();

    let mut r = resolver(global.path());
    let opts = ResolveOptions::new().cwd(cwd.path());
    assert_eq!(r.resolve_module("generate-nothing", &opts), None);
    assert_eq!(r.try_resolve("generate-nothing", &opts), None);
    assert_eq!(
        r.try_resolve("generate-nothing", &ResolveOptions::new()),
        None
    );
    assert!(r.cache().is_empty());
}

#[test]
fn directory_without_entry_or_configfile_is_unresolved() {
    let cwd = TempDir::new().unwrap();
    let global = TempDir::new().unwrap();
    fs::create_dir_all(cwd.path().join("node_modules/generate-empty")).unwrap();

    let mut r = resolver(global.path());
    let opts = ResolveOptions::new().cwd(cwd.path());
    assert!(r.resolve_module("generate-empty", &opts).is_some());
    assert_eq!(r.try_resolve("generate-empty", &opts), None);
}

#[test]
fn resolves_absolute_file_paths() {
    let cwd = TempDir::new().unwrap();
    let global = TempDir::new().unwrap();
    let file = cwd.path().join("fixtures/generator.js");
    write(&file, "");

    let mut r = ModuleResolver::with_cache(global.path(), Vec::new(), ResolveCache::new());
    let request = file.to_string_lossy().into_owned();
    assert_eq!(r.try_resolve(&request, &ResolveOptions::new()), Some(file));
}
