//! Integration tests for `assetline build` and the single-task commands.

mod common;

use common::TestProject;

#[test]
fn build_in_production_minifies_without_maps() {
    let project = TestProject::builder().with_sample_site().build();

    let result = project.run_with_env(&["build"], &[("ASSETLINE_ENV", "production")]);

    assert!(result.success, "{}", result.combined_output());
    assert!(result.stdout.contains("Build complete"), "{}", result.stdout);
    assert!(result.stdout.contains("Production"), "{}", result.stdout);
    assert_exists!(project, "dist/index.html");
    assert_exists!(project, "dist/css/style.min.css");
    assert_exists!(project, "dist/js/bundle.min.js");
    assert_exists!(project, "dist/images/logo.svg");
    assert_missing!(project, "dist/css/style.min.css.map");
    assert_missing!(project, "dist/js/bundle.min.js.map");
}

#[test]
fn build_logs_task_lines_and_sizes() {
    let project = TestProject::builder().with_sample_site().build();

    let result = project.run(&["build"]);

    assert!(result.success, "{}", result.combined_output());
    for line in [
        "Compiling HTML...",
        "HTML compiled",
        "CSS processed",
        "JavaScript bundled",
        "Assets copied",
        "CSS size:",
        "Development",
    ] {
        assert!(result.stdout.contains(line), "missing {line:?} in\n{}", result.stdout);
    }
}

#[test]
fn task_failure_is_logged_but_exit_code_is_zero() {
    let project = TestProject::builder()
        .with_sample_site()
        .with_file("src/assets/css/style.css", ".a { @apply not-a-utility; }")
        .build();

    let result = project.run(&["build"]);

    assert!(result.success, "{}", result.combined_output());
    assert!(result.stderr.contains("Error in CSS processing"), "{}", result.stderr);
    assert!(result.stdout.contains("1 failed task"), "{}", result.stdout);
}

#[test]
fn single_task_commands_touch_only_their_outputs() {
    let project = TestProject::builder().with_sample_site().build();

    let css = project.run(&["css"]);
    assert!(css.success, "{}", css.combined_output());
    assert_exists!(project, "dist/css/style.min.css");
    assert_missing!(project, "dist/index.html");

    let js = project.run(&["js"]);
    assert!(js.success, "{}", js.combined_output());
    assert_exists!(project, "dist/js/bundle.min.js");

    let html = project.run(&["html"]);
    assert!(html.success, "{}", html.combined_output());
    assert_exists!(project, "dist/index.html");
    assert_missing!(project, "dist/images");
}

#[test]
fn malformed_config_is_fatal() {
    let project = TestProject::builder()
        .with_sample_site()
        .with_file("assetline.toml", "[paths\nout = ")
        .build();

    let result = project.run(&["build"]);

    assert!(!result.success);
    assert!(result.stderr.contains("Failed to load configuration"), "{}", result.stderr);
    assert_missing!(project, "dist");
}

#[test]
fn unknown_config_key_warns_with_suggestion() {
    let project = TestProject::builder()
        .with_sample_site()
        .with_file("assetline.toml", "[paths]\nout = \"public\"\nscirpts = \"x\"\n")
        .build();

    let result = project.run(&["html"]);

    assert!(result.success, "{}", result.combined_output());
    assert!(result.stderr.contains("Unknown config key 'scirpts'"), "{}", result.stderr);
    assert!(result.stderr.contains("Did you mean 'scripts'?"), "{}", result.stderr);
    assert_exists!(project, "public/index.html");
}

#[test]
fn root_flag_targets_another_directory() {
    let project = TestProject::builder()
        .with_file("site/src/pages/index.html", "<p>@@year</p>")
        .build();

    let result = project.run(&["html", "--root", "site"]);

    assert!(result.success, "{}", result.combined_output());
    assert_exists!(project, "site/dist/index.html");
    assert_missing!(project, "dist");
}
