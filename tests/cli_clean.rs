//! Integration tests for `assetline clean`.

mod common;

use common::TestProject;

#[test]
fn clean_removes_output_and_is_idempotent() {
    let project = TestProject::builder().build();
    project.write("dist/css/old.css", "x");
    project.write("src/keep.html", "<p></p>");

    let first = project.run(&["clean"]);
    assert!(first.success, "{}", first.combined_output());
    assert_missing!(project, "dist");
    assert_exists!(project, "src/keep.html");

    let second = project.run(&["clean"]);
    assert!(second.success, "{}", second.combined_output());
    assert!(second.stdout.contains("Cleaned"), "{}", second.stdout);
}

#[test]
fn clean_honours_output_override() {
    let project = TestProject::builder().build();
    project.write("public/index.html", "x");
    project.write("dist/index.html", "x");

    let result = project.run_with_env(&["clean"], &[("ASSETLINE_OUT", "public")]);

    assert!(result.success, "{}", result.combined_output());
    assert_missing!(project, "public");
    assert_exists!(project, "dist/index.html");
}
