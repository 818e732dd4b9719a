use std::fs;
use std::path::{Path, PathBuf};

use mayasdk::{
    declare_plugin, locate, FsProbe, LocateError, LocatorConfig, Platform,
};

/// Lay out a fake devkit under `base/maya<version>` with the given libraries.
fn fake_devkit(base: &Path, dir_name: &str, platform: Platform, libs: &[&str]) -> PathBuf {
    let spec = platform.spec();
    let root = base.join(dir_name);
    let include = root.join(spec.include_suffix).join("maya");
    let lib_dir = root.join(spec.library_suffix);
    fs::create_dir_all(&include).unwrap();
    fs::create_dir_all(&lib_dir).unwrap();
    fs::write(include.join("MFn.h"), "// header").unwrap();
    for lib in libs {
        fs::write(lib_dir.join(platform.library_file_name(lib)), "").unwrap();
    }
    root
}

#[test]
fn finds_devkit_under_install_base() {
    let tmp = tempfile::tempdir().unwrap();
    let root = fake_devkit(tmp.path(), "maya2024", Platform::Linux, &["OpenMaya"]);

    let config = LocatorConfig::new(Platform::Linux)
        .with_version("2024")
        .with_install_base(tmp.path());
    let sdk = locate(&config, &FsProbe).unwrap();

    assert!(sdk.found);
    assert_eq!(sdk.location, root);
    assert_eq!(sdk.include_dir, root.join("include"));
    assert_eq!(sdk.library, root.join("lib/libOpenMaya.so"));
    assert_eq!(sdk.libraries, vec![root.join("lib/libOpenMaya.so")]);
    assert_eq!(sdk.definitions, vec!["REQUIRE_IOSTREAM", "_BOOL", "LINUX"]);
    assert_eq!(sdk.plugin_extension, ".so");
    assert_eq!(sdk.unit.name, "Maya::Maya");
    assert_eq!(sdk.unit.include_dirs, vec![root.join("include")]);
}

#[test]
fn windows_devkit_naming() {
    let tmp = tempfile::tempdir().unwrap();
    let root = fake_devkit(tmp.path(), "maya2025", Platform::Windows, &["OpenMaya", "OpenMayaUI"]);

    let config = LocatorConfig::new(Platform::Windows)
        .with_version("2025")
        .with_install_base(tmp.path());
    let sdk = locate(&config, &FsProbe).unwrap();

    assert_eq!(sdk.library, root.join("lib/OpenMaya.lib"));
    assert!(sdk.definitions.contains(&"NT_PLUGIN".to_string()));
    assert_eq!(sdk.plugin_extension, ".mll");

    let plugin = declare_plugin("myNode", &sdk);
    assert_eq!(plugin.file_name(), "myNode.mll");
    assert_eq!(plugin.link_args.len(), 2);
}

#[test]
fn old_linux_release_uses_x64_directory() {
    let tmp = tempfile::tempdir().unwrap();
    let root = fake_devkit(tmp.path(), "maya2015-x64", Platform::Linux, &["OpenMaya"]);

    let config = LocatorConfig::new(Platform::Linux)
        .with_version("2015")
        .with_install_base(tmp.path());
    let sdk = locate(&config, &FsProbe).unwrap();
    assert_eq!(sdk.location, root);
}

#[test]
fn location_override_is_searched() {
    let tmp = tempfile::tempdir().unwrap();
    let elsewhere = fake_devkit(tmp.path(), "custom-maya", Platform::Linux, &["OpenMaya"]);

    let config = LocatorConfig::new(Platform::Linux)
        .with_version("2024")
        .with_install_base(tmp.path().join("empty"))
        .with_location_override(&elsewhere);
    let sdk = locate(&config, &FsProbe).unwrap();

    assert_eq!(sdk.include_dir, elsewhere.join("include"));
    assert_eq!(sdk.library, elsewhere.join("lib/libOpenMaya.so"));
}

#[test]
fn header_under_devkit_include_is_found() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().join("maya2024");
    fs::create_dir_all(root.join("devkit/include/maya")).unwrap();
    fs::create_dir_all(root.join("lib")).unwrap();
    fs::write(root.join("devkit/include/maya/MFn.h"), "").unwrap();
    fs::write(root.join("lib/libOpenMaya.so"), "").unwrap();

    let config = LocatorConfig::new(Platform::Linux)
        .with_version("2024")
        .with_install_base(tmp.path());
    let sdk = locate(&config, &FsProbe).unwrap();
    assert_eq!(sdk.include_dir, root.join("devkit/include"));
}

#[test]
fn missing_primary_library_fails_even_with_companions() {
    let tmp = tempfile::tempdir().unwrap();
    fake_devkit(
        tmp.path(),
        "maya2024",
        Platform::Linux,
        &["OpenMayaAnim", "OpenMayaUI", "Foundation"],
    );

    let config = LocatorConfig::new(Platform::Linux)
        .with_version("2024")
        .with_install_base(tmp.path());
    match locate(&config, &FsProbe) {
        Err(LocateError::NotFound { missing, .. }) => assert_eq!(missing, vec!["MAYA_LIBRARY"]),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[test]
fn missing_header_fails() {
    let tmp = tempfile::tempdir().unwrap();
    let lib = tmp.path().join("maya2024/lib");
    fs::create_dir_all(&lib).unwrap();
    for name in ["libOpenMaya.so", "libOpenMayaUI.so", "libFoundation.so"] {
        fs::write(lib.join(name), "").unwrap();
    }

    let config = LocatorConfig::new(Platform::Linux)
        .with_version("2024")
        .with_install_base(tmp.path());
    match locate(&config, &FsProbe) {
        Err(LocateError::NotFound { missing, searched }) => {
            assert_eq!(missing, vec!["MAYA_INCLUDE_DIR"]);
            assert!(searched.contains(&tmp.path().join("maya2024/include")));
            assert!(!searched.contains(&lib));
        }
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[test]
fn macos_header_under_plain_include_is_found() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().join("maya2024");
    let include = root.join("include");
    let lib_dir = root.join("Maya.app/Contents/MacOS");
    fs::create_dir_all(include.join("maya")).unwrap();
    fs::create_dir_all(&lib_dir).unwrap();
    fs::write(include.join("maya/MFn.h"), "").unwrap();
    fs::write(lib_dir.join("libOpenMaya.dylib"), "").unwrap();

    let config = LocatorConfig::new(Platform::MacOs)
        .with_version("2024")
        .with_install_base(tmp.path());
    let sdk = locate(&config, &FsProbe).unwrap();

    assert_eq!(sdk.include_dir, include);
    assert_eq!(sdk.library, lib_dir.join("libOpenMaya.dylib"));
    assert_eq!(sdk.plugin_extension, ".bundle");
}

#[test]
fn old_macos_release_publishes_libstdcxx_flags() {
    let tmp = tempfile::tempdir().unwrap();
    let root = fake_devkit(tmp.path(), "maya2016", Platform::MacOs, &["OpenMaya"]);

    let config = LocatorConfig::new(Platform::MacOs)
        .with_version("2016")
        .with_install_base(tmp.path());
    let sdk = locate(&config, &FsProbe).unwrap();

    let mut out = Vec::new();
    sdk.emit_cargo_directives(&mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert!(lines.contains(&"cargo:cflags=-std=c++0x -stdlib=libstdc++"));
    let root_line = format!("cargo:root={}", root.display());
    assert!(lines.contains(&root_line.as_str()));
}

#[test]
fn current_macos_release_publishes_no_cflags() {
    let tmp = tempfile::tempdir().unwrap();
    fake_devkit(tmp.path(), "maya2024", Platform::MacOs, &["OpenMaya"]);

    let config = LocatorConfig::new(Platform::MacOs)
        .with_version("2024")
        .with_install_base(tmp.path());
    let sdk = locate(&config, &FsProbe).unwrap();

    let mut out = Vec::new();
    sdk.emit_cargo_directives(&mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(!text.contains("cargo:cflags="));
}

#[test]
fn companions_present_are_linked_transitively() {
    let tmp = tempfile::tempdir().unwrap();
    let root = fake_devkit(
        tmp.path(),
        "maya2024",
        Platform::Linux,
        &["OpenMaya", "OpenMayaRender", "clew"],
    );

    let config = LocatorConfig::new(Platform::Linux)
        .with_version("2024")
        .with_install_base(tmp.path());
    let sdk = locate(&config, &FsProbe).unwrap();

    let expected = vec![
        root.join("lib/libOpenMaya.so"),
        root.join("lib/libOpenMayaRender.so"),
        root.join("lib/libclew.so"),
    ];
    assert_eq!(sdk.libraries, expected);
    assert_eq!(sdk.unit.transitive_libraries(), expected);

    let deps: Vec<&str> = sdk
        .unit
        .link_dependencies
        .iter()
        .map(|d| d.name.as_str())
        .collect();
    assert_eq!(deps, vec!["Maya::OpenMayaRender", "Maya::clew"]);

    let mut out = Vec::new();
    sdk.emit_cargo_directives(&mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("cargo:rustc-link-lib=dylib=OpenMayaRender\n"));
    assert!(!text.contains("OpenMayaAnim"));
}

#[test]
fn serializes_outputs_to_json() {
    let tmp = tempfile::tempdir().unwrap();
    fake_devkit(tmp.path(), "maya2024", Platform::Linux, &["OpenMaya"]);

    let config = LocatorConfig::new(Platform::Linux)
        .with_version("2024")
        .with_install_base(tmp.path());
    let sdk = locate(&config, &FsProbe).unwrap();
    let json = serde_json::to_value(&sdk).unwrap();

    assert_eq!(json["found"], true);
    assert_eq!(json["platform"], "linux");
    assert_eq!(json["version"], "2024");
    assert_eq!(json["plugin_extension"], ".so");
}
