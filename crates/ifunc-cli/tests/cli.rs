//! End-to-end tests for the `ifunc` binary.

use ifunc_ir::{Binding, Field, File, FuncType, Program, TypeExpr, TypeSpec};
use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn ifunc(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ifunc"))
        .args(args)
        .env_remove("IFUNC_LOG")
        .output()
        .expect("failed to run ifunc")
}

fn testdata(case: &str) -> String {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("testdata")
        .join(case)
        .display()
        .to_string()
}

#[test]
fn prints_func_type_then_adapter() {
    let output = ifunc(&[&testdata("onepackage"), "Contexter"]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "type ContexterFunc func(context.Context) context.Context\n\n\
         func (fn ContexterFunc) Context(ctx context.Context) context.Context {\n\
         \treturn fn(ctx)\n\
         }\n"
    );
}

#[test]
fn missing_interface_fails() {
    let output = ifunc(&[&testdata("onepackage"), "Missing"]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("did not find"), "stderr: {stderr}");
    assert!(stderr.contains("Missing"), "stderr: {stderr}");
}

#[test]
fn unsupported_shapes_fail() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("bad.go"),
        "package bad\n\n\
         type Two interface {\n\tA()\n\tB()\n}\n\n\
         type Number int\n\n\
         func Helper() {}\n",
    )
    .unwrap();
    let path = dir.path().display().to_string();

    for (name, message) in [
        ("Two", "has 2 methods"),
        ("Number", "is not an interface"),
        ("Helper", "is not a type"),
    ] {
        let output = ifunc(&[&path, name]);
        assert!(!output.status.success(), "{name} should fail");
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains(message), "{name}: {stderr}");
    }
}

#[test]
fn missing_arguments_fail() {
    let output = ifunc(&[&testdata("onepackage")]);
    assert!(!output.status.success());
}

#[test]
fn reads_json_program() {
    let spec = TypeSpec::new(
        "Closer",
        TypeExpr::interface(vec![Field::method(
            "Close",
            FuncType::new(vec![], Some(vec![Field::unnamed(TypeExpr::ident("error"))])),
        )]),
    );
    let mut program = Program::new();
    program.add_file("closer.go", File::new("io").with("Closer", Binding::Type(spec)));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("program.json");
    fs::write(&path, serde_json::to_string(&program).unwrap()).unwrap();

    let output = ifunc(&["--json", &path.display().to_string(), "Closer"]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "type CloserFunc func() error\n\nfunc (fn CloserFunc) Close() error {\n\treturn fn()\n}\n"
    );
}
