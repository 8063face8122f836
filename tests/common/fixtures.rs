//! Sample site content shared by integration tests.

pub const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html>
  <head>
    <link rel="stylesheet" href="css/style.min.css">
  </head>
  <body>
    <!-- page header -->
    @@include('../partials/header.html', {"title": "Home"})
    <main class="container">
      <p class="select-none p-4">Hello</p>
    </main>
    <footer>&copy; @@year</footer>
    <script src="js/bundle.min.js"></script>
  </body>
</html>
"#;

pub const HEADER_PARTIAL: &str = r#"<header class="flex md:p-6">
  <h1>@@title</h1>
</header>
"#;

pub const STYLE_CSS: &str = r#"/* base layers */
@tailwind base;
@tailwind components;
@tailwind utilities;

.card {
  @apply select-none rounded;
}
"#;

pub const A_JS: &str = r#"// first script
function alphaWidget() {
  return "alpha-marker";
}
"#;

pub const B_JS: &str = r#"/* second script */
function betaWidget() {
  return "beta-marker";
}
"#;

pub const LOGO_SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg"/>"#;

/// Click handler that depends on the caller's `this`
pub const HANDLER_JS: &str = r#"var menu = { open: false };
menu.toggle = function () {
  this.open = !this.open;
  return this.open;
};
"#;
