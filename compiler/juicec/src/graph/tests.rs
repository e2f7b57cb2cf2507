#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::fs;
use std::path::{Path, PathBuf};

use juice_compiler::ErrorPhase;
use pretty_assertions::assert_eq;

use super::{build, BuildFailure, BuildOptions};
use crate::DriverError;

fn write(root: &Path, relative: &str, text: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, text).unwrap();
}

fn options(out_dir: PathBuf) -> BuildOptions {
    BuildOptions {
        namespace: "app".to_string(),
        out_dir,
        prelude: true,
    }
}

fn names(written: &[PathBuf]) -> Vec<String> {
    written
        .iter()
        .map(|path| path.file_name().unwrap().to_string_lossy().into_owned())
        .collect()
}

#[test]
fn test_builds_every_reachable_unit() {
    let src = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    write(
        src.path(),
        "main.juice",
        "import lib.math\nimport internal util (helper)\nimport foreign ffi.os\nx := math.double(2)",
    );
    write(src.path(), "lib/math.juice", "export fn double(n) { n * 2 }");
    write(src.path(), "util.juice", "export fn helper() { 1 }");
    write(src.path(), "ffi/os.js", "export const platform = \"test\";\n");

    let report = build(&src.path().join("main.juice"), &options(out.path().to_path_buf())).unwrap();
    assert!(report.is_success(), "{:?}", report.failures);
    assert_eq!(
        names(&report.written),
        [
            "app.util.js",
            "ffi.os__foreign.js",
            "lib.math.js",
            "main.js",
            "prelude.js"
        ]
    );

    let main = fs::read_to_string(out.path().join("main.js")).unwrap();
    assert!(main.contains("import * as math from \"./lib.math.js\";"));
    assert!(main.contains("import { helper } from \"./app.util.js\";"));
    assert!(main.contains("import * as os from \"./ffi.os__foreign.js\";"));

    let foreign = fs::read_to_string(out.path().join("ffi.os__foreign.js")).unwrap();
    assert_eq!(foreign, "export const platform = \"test\";\n");

    let math = fs::read_to_string(out.path().join("lib.math.js")).unwrap();
    assert_eq!(math, "export function double(n) {\nreturn (n * 2);\n}\n");
}

#[test]
fn test_module_names_reach_constructor_tags() {
    let src = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    write(src.path(), "main.juice", "import shapes.point");
    write(src.path(), "shapes/point.juice", "export $point := { x, y }");

    let report = build(&src.path().join("main.juice"), &options(out.path().to_path_buf())).unwrap();
    assert!(report.is_success());
    let point = fs::read_to_string(out.path().join("shapes.point.js")).unwrap();
    assert!(point.contains("\"app.shapes.point@point#point\""));
}

#[test]
fn test_import_cycles_compile_each_unit_once() {
    let src = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    write(src.path(), "main.juice", "import a\nimport b");
    write(src.path(), "a.juice", "import b\nimport main");
    write(src.path(), "b.juice", "import a");

    let mut opts = options(out.path().to_path_buf());
    opts.prelude = false;
    let report = build(&src.path().join("main.juice"), &opts).unwrap();
    assert!(report.is_success());
    assert_eq!(names(&report.written), ["a.js", "b.js", "main.js"]);
}

#[test]
fn test_failures_are_collected_per_unit() {
    let src = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    write(src.path(), "main.juice", "import broken\nimport missing\nimport ok");
    write(src.path(), "broken.juice", "x := (1, 2");
    write(src.path(), "ok.juice", "y := 2");

    let mut opts = options(out.path().to_path_buf());
    opts.prelude = false;
    let report = build(&src.path().join("main.juice"), &opts).unwrap();
    assert!(!report.is_success());
    assert_eq!(names(&report.written), ["main.js", "ok.js"]);
    assert_eq!(report.failures.len(), 2);

    let compile_failure = report.failures.iter().find_map(|failure| match failure {
        BuildFailure::Compile { path, error, .. } => Some((path, error)),
        BuildFailure::Io(_) => None,
    });
    let (path, error) = compile_failure.unwrap();
    assert!(path.ends_with("broken.juice"));
    assert_eq!(error.phase, ErrorPhase::Parse);

    assert!(report.failures.iter().any(|failure| matches!(
        failure,
        BuildFailure::Io(DriverError::Read { path, .. }) if path.ends_with("missing.juice")
    )));
}

#[test]
fn test_missing_foreign_module_is_reported() {
    let src = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    write(src.path(), "main.juice", "import foreign gone");

    let report = build(&src.path().join("main.juice"), &options(out.path().to_path_buf())).unwrap();
    assert!(matches!(
        report.failures.as_slice(),
        [BuildFailure::Io(DriverError::CopyForeign { .. })]
    ));
}

#[test]
fn test_entry_without_file_name_is_rejected() {
    let out = tempfile::tempdir().unwrap();
    let err = build(Path::new(".."), &options(out.path().to_path_buf())).unwrap_err();
    assert!(matches!(err, DriverError::InvalidEntry { .. }));
}
